use std::cmp::Ordering;

use crate::core::config::RELEVANCE_TOLERANCE;
use crate::core::types::ScoredDocument;

/// Inverse document frequency: ln of the corpus share containing the term.
/// Callers only invoke this for terms with at least one posting, so the
/// denominator is never zero.
pub fn inverse_document_frequency(document_count: usize, containing_documents: usize) -> f64 {
    (document_count as f64 / containing_documents as f64).ln()
}

/// Rank ordering: relevance descending, with ratings breaking ties whose
/// relevances differ by less than the tolerance. Remaining ties are left
/// to the sort.
pub fn compare_ranked(lhs: &ScoredDocument, rhs: &ScoredDocument) -> Ordering {
    if (lhs.relevance - rhs.relevance).abs() < RELEVANCE_TOLERANCE {
        rhs.rating.cmp(&lhs.rating)
    } else {
        rhs.relevance
            .partial_cmp(&lhs.relevance)
            .unwrap_or(Ordering::Equal)
    }
}
