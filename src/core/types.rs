use std::fmt;

use serde::{Deserialize, Serialize};

/// Caller-assigned document identifier, unique per engine instance.
/// Signed so that out-of-range input can be rejected at ingest rather than
/// silently wrapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DocumentId(pub i64);

impl DocumentId {
    pub fn new(id: i64) -> Self {
        DocumentId(id)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl From<i64> for DocumentId {
    fn from(id: i64) -> Self {
        DocumentId(id)
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle label attached to a document. Ranking never consults it; only
/// caller predicates do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentStatus {
    Actual,
    Irrelevant,
    Banned,
    Removed,
}

/// Single ranked retrieval hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredDocument {
    pub id: DocumentId,
    pub relevance: f64,
    pub rating: i32,
}

/// Integer mean of the ratings list, truncated toward zero. An empty list
/// rates 0.
pub fn average_rating(ratings: &[i32]) -> i32 {
    if ratings.is_empty() {
        return 0;
    }
    let sum: i64 = ratings.iter().map(|rating| i64::from(*rating)).sum();
    (sum / ratings.len() as i64) as i32
}
