/*!
 * # linguaflow - multilingual translation toolkit
 *
 * A Rust library for translating text through free web services.
 *
 * ## Features
 *
 * - Translate text of any length through size-limited providers (MyMemory)
 *   by sending sentence-aligned chunks one at a time
 * - Keep the original text of any chunk that fails instead of failing the
 *   whole translation
 * - Offline word-for-word translation from bundled tables
 * - Grammar checking with LanguageTool
 * - Dictionary lookups, offline or through dictionaryapi.dev
 * - Injectable speech synthesis and recognition
 * - ISO 639-1 and ISO 639-2 language code support
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `translation`: Text translation:
 *   - `translation::chunking`: Sentence-aware splitting
 *   - `translation::pipeline`: Sequential chunked translation with fallback
 *   - `translation::static_table`: Offline word tables
 * - `providers`: Translation provider clients:
 *   - `providers::mymemory`: MyMemory API client
 *   - `providers::mock`: Scripted provider for tests
 * - `grammar`: LanguageTool client
 * - `dictionary`: Local and remote dictionaries
 * - `speech`: Speech capability trait and implementations
 * - `app_controller`: Main application controller
 * - `language_utils`: ISO language code utilities
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod dictionary;
pub mod errors;
pub mod grammar;
pub mod language_utils;
pub mod providers;
pub mod speech;
pub mod translation;

// Re-export main types for easier usage
pub use app_config::Config;
pub use errors::{AppError, DictionaryError, GrammarError, ProviderError, SpeechError, TranslationError};
pub use language_utils::{get_language_name, language_codes_match, normalize_to_part2t};
pub use providers::TranslationProvider;
pub use translation::{ChunkedTranslationPipeline, PipelineOptions, StaticTableTranslator};
