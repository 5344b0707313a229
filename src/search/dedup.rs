use std::collections::{BTreeSet, HashSet};

use tracing::info;

use crate::core::types::DocumentId;
use crate::search::engine::SearchEngine;

/// Removes every document whose set of distinct terms duplicates that of a
/// smaller-id document. Within a duplicate class the smallest id survives;
/// the rest are removed in ascending order, each removal logged. Returns
/// the removed ids in removal order.
pub fn remove_duplicates(engine: &mut SearchEngine) -> Vec<DocumentId> {
    let mut ids: Vec<DocumentId> = engine.ids().collect();
    ids.sort_unstable();

    let mut seen: HashSet<BTreeSet<String>> = HashSet::new();
    let mut duplicates = Vec::new();

    for id in ids {
        let signature: BTreeSet<String> =
            engine.word_frequencies(id).keys().cloned().collect();
        if !seen.insert(signature) {
            duplicates.push(id);
        }
    }

    for &id in &duplicates {
        info!(id = id.value(), "found duplicate document");
        engine.remove_document(id);
    }

    duplicates
}
