/*!
 * Common test utilities for the linguaflow test suite
 */

use std::path::{Path, PathBuf};
use std::fs;
use anyhow::Result;
use tempfile::TempDir;


/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// A sentence of exactly `len` characters: a label, padding, and a period
pub fn sentence_of_len(label: usize, len: usize) -> String {
    let mut sentence = format!("Sentence {} ", label);
    while sentence.chars().count() < len - 1 {
        sentence.push('x');
    }
    sentence.push('.');
    sentence
}

/// `count` sentences concatenated so that each one, counting the space in
/// front of it, is exactly `len` characters long
pub fn text_of_sentences(count: usize, len: usize) -> String {
    (0..count)
        .map(|i| {
            if i == 0 {
                sentence_of_len(i, len)
            } else {
                format!(" {}", sentence_of_len(i, len - 1))
            }
        })
        .collect()
}
