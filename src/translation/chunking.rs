/*!
 * Sentence-aware text chunking.
 *
 * Remote providers cap the size of a single request. Text longer than the
 * cap is cut at sentence boundaries and the sentences are packed greedily
 * into chunks, so no request ever ends mid-sentence.
 */

use once_cell::sync::Lazy;
use regex::Regex;

/// A sentence is a run of non-terminal characters closed by one or more of
/// `.`, `!` or `?`. Trailing text without terminal punctuation counts as a
/// final sentence so nothing is dropped.
static SENTENCE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[^.!?]*[.!?]+|[^.!?]+$").expect("sentence pattern is valid")
});

/// A bounded slice of the source text submitted as one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// Position of the chunk in the source text
    pub order: usize,
    /// Chunk text
    pub text: String,
}

impl Chunk {
    /// Length in characters
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// Split text into sentences, keeping their terminal punctuation and any
/// leading whitespace
pub fn split_sentences(text: &str) -> Vec<&str> {
    SENTENCE_PATTERN.find_iter(text).map(|m| m.as_str()).collect()
}

/// Split text into chunks of at most `max_chars` characters.
///
/// Text that already fits is returned as a single chunk, untouched. Longer
/// text is packed sentence by sentence; a chunk is closed as soon as the
/// next sentence would overflow it. A single sentence longer than
/// `max_chars` becomes one oversized chunk and is not subdivided.
/// Whitespace-only input yields no chunks.
pub fn split_into_chunks(text: &str, max_chars: usize) -> Vec<Chunk> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    if text.chars().count() <= max_chars {
        return vec![Chunk {
            order: 0,
            text: text.to_string(),
        }];
    }

    fn push(buffer: &str, chunks: &mut Vec<Chunk>) {
        let trimmed = buffer.trim();
        if !trimmed.is_empty() {
            chunks.push(Chunk {
                order: chunks.len(),
                text: trimmed.to_string(),
            });
        }
    }

    let mut chunks: Vec<Chunk> = Vec::new();

    let mut current = String::new();
    let mut current_len = 0;
    for sentence in split_sentences(text) {
        let sentence_len = sentence.chars().count();
        if current_len + sentence_len <= max_chars {
            current.push_str(sentence);
            current_len += sentence_len;
        } else {
            push(&current, &mut chunks);
            current = sentence.to_string();
            current_len = sentence_len;
        }
    }
    push(&current, &mut chunks);

    chunks
}
