use std::collections::{BTreeMap, HashMap};

use rayon::prelude::*;

use crate::core::types::{DocumentId, DocumentStatus};

/// Per-document metadata retained alongside the postings.
#[derive(Debug, Clone)]
pub struct DocumentRecord {
    pub rating: i32,
    pub status: DocumentStatus,
    pub text: String,
}

static EMPTY_FREQUENCIES: BTreeMap<String, f64> = BTreeMap::new();

/// Inverted index with a per-document transpose.
///
/// `postings` is the authoritative term → (document → tf) mapping.
/// `per_doc_terms` mirrors it exactly in the other direction, which makes
/// word-frequency lookups and duplicate signatures cost O(|terms in doc|)
/// instead of a full posting scan. Every mutation keeps the two in step.
#[derive(Debug, Default)]
pub struct InvertedIndex {
    postings: HashMap<String, HashMap<DocumentId, f64>>,
    per_doc_terms: HashMap<DocumentId, BTreeMap<String, f64>>,
    docs: HashMap<DocumentId, DocumentRecord>,
    doc_ids: Vec<DocumentId>,
}

impl InvertedIndex {
    pub fn new() -> Self {
        InvertedIndex::default()
    }

    pub fn document_count(&self) -> usize {
        self.docs.len()
    }

    pub fn contains(&self, id: DocumentId) -> bool {
        self.docs.contains_key(&id)
    }

    pub fn record(&self, id: DocumentId) -> Option<&DocumentRecord> {
        self.docs.get(&id)
    }

    /// Document ids in insertion order.
    pub fn ids(&self) -> &[DocumentId] {
        &self.doc_ids
    }

    /// Posting list for a term; `None` when the term never occurs.
    pub fn posting(&self, term: &str) -> Option<&HashMap<DocumentId, f64>> {
        self.postings.get(term)
    }

    /// Term frequencies of one document; empty for unknown ids.
    pub fn word_frequencies(&self, id: DocumentId) -> &BTreeMap<String, f64> {
        self.per_doc_terms.get(&id).unwrap_or(&EMPTY_FREQUENCIES)
    }

    /// Registers a document whose `terms` have already been validated and
    /// stop-filtered by the caller. Each occurrence contributes 1/N to the
    /// term's frequency. A document with no surviving terms creates no
    /// postings but still counts toward the corpus.
    pub fn insert(&mut self, id: DocumentId, record: DocumentRecord, terms: &[&str]) {
        if !terms.is_empty() {
            let inverse_word_count = 1.0 / terms.len() as f64;
            let per_doc = self.per_doc_terms.entry(id).or_default();
            for term in terms {
                *self
                    .postings
                    .entry((*term).to_string())
                    .or_default()
                    .entry(id)
                    .or_insert(0.0) += inverse_word_count;
                *per_doc.entry((*term).to_string()).or_insert(0.0) += inverse_word_count;
            }
        }
        self.docs.insert(id, record);
        self.doc_ids.push(id);
    }

    /// Erases a document from the id list, the metadata table, every
    /// posting list, and the transpose. Unknown ids are a no-op. Returns
    /// whether anything was removed. Posting lists left empty are dropped
    /// so that term presence stays well defined for idf.
    pub fn remove(&mut self, id: DocumentId) -> bool {
        if self.docs.remove(&id).is_none() {
            return false;
        }
        self.doc_ids.retain(|existing| *existing != id);

        if let Some(terms) = self.per_doc_terms.remove(&id) {
            for term in terms.keys() {
                let now_empty = match self.postings.get_mut(term) {
                    Some(docs) => {
                        docs.remove(&id);
                        docs.is_empty()
                    }
                    None => false,
                };
                if now_empty {
                    self.postings.remove(term);
                }
            }
        }
        true
    }

    /// Same cleanup as `remove`, sweeping the posting lists in parallel.
    pub fn remove_par(&mut self, id: DocumentId) -> bool {
        if self.docs.remove(&id).is_none() {
            return false;
        }
        self.doc_ids.retain(|existing| *existing != id);
        self.per_doc_terms.remove(&id);

        self.postings.par_iter_mut().for_each(|(_, docs)| {
            docs.remove(&id);
        });
        self.postings.retain(|_, docs| !docs.is_empty());
        true
    }
}
