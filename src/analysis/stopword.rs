use std::collections::HashSet;

use crate::analysis::tokenizer::{split_words, validate_word};
use crate::core::error::Result;

/// Immutable set of tokens dropped from documents and queries.
///
/// Fixed at engine construction. A later change would strand posting keys
/// that retroactively became stop words, so there is deliberately no
/// mutator; a different set means building a new engine.
#[derive(Debug, Clone, Default)]
pub struct StopWordSet {
    words: HashSet<String>,
}

impl StopWordSet {
    /// Collects non-empty words, collapsing duplicates. Fails with
    /// `InvalidCharacter` if any word carries a control byte.
    pub fn new<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut collected = HashSet::new();
        for word in words {
            let word = word.as_ref();
            if word.is_empty() {
                continue;
            }
            validate_word(word)?;
            collected.insert(word.to_string());
        }
        Ok(StopWordSet { words: collected })
    }

    /// Builds the set from a single space-separated string.
    pub fn from_text(text: &str) -> Result<Self> {
        Self::new(split_words(text))
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
