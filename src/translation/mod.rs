/*!
 * Text translation.
 *
 * - `chunking`: sentence-aware splitting of long text
 * - `pipeline`: sequential chunk-by-chunk translation with per-chunk fallback
 * - `static_table`: offline word-for-word translation from bundled tables
 */

// Re-export main types for easier usage
pub use self::chunking::{split_into_chunks, Chunk};
pub use self::pipeline::{
    ChunkResult, ChunkedTranslationPipeline, PipelineOptions, TranslationOutcome,
    TranslationRequest,
};
pub use self::static_table::StaticTableTranslator;

// Submodules
pub mod chunking;
pub mod pipeline;
pub mod static_table;
