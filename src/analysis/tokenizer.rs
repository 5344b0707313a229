use crate::core::error::{Error, Result};

/// Splits on the ASCII space byte only, yielding maximal non-empty runs.
/// Tabs and newlines are not separators; inside a word they fail
/// validation as control characters.
pub fn split_words(text: &str) -> impl Iterator<Item = &str> {
    text.split(' ').filter(|word| !word.is_empty())
}

/// A word is valid when none of its bytes falls below 0x20.
pub fn is_valid_word(word: &str) -> bool {
    word.bytes().all(|byte| byte >= 0x20)
}

pub fn validate_word(word: &str) -> Result<()> {
    if is_valid_word(word) {
        Ok(())
    } else {
        Err(Error::invalid_character(word))
    }
}

/// Copy of `word` with control bytes elided, safe to embed in an error
/// message.
pub fn sanitize(word: &str) -> String {
    word.chars().filter(|chr| (*chr as u32) >= 0x20).collect()
}
