use std::collections::BTreeMap;

use rayon::prelude::*;
use tracing::debug;

use crate::analysis::stopword::StopWordSet;
use crate::analysis::tokenizer::{split_words, validate_word};
use crate::core::config::MAX_RESULT_DOCUMENT_COUNT;
use crate::core::error::{Error, ErrorKind, Result};
use crate::core::types::{average_rating, DocumentId, DocumentStatus, ScoredDocument};
use crate::index::inverted::{DocumentRecord, InvertedIndex};
use crate::parallel::sharded_map::ShardedMap;
use crate::query::parser::{parse_query, Query};
use crate::scoring::rank::{compare_ranked, inverse_document_frequency};

/// In-memory ranked document search engine.
///
/// Stop words are fixed at construction. Documents are immutable once
/// ingested and leave only through removal or duplicate elimination.
/// Ingest and removal take `&mut self`; every retrieval method takes
/// `&self` and is safe under concurrent read-only access.
pub struct SearchEngine {
    stop_words: StopWordSet,
    index: InvertedIndex,
}

impl SearchEngine {
    pub fn new(stop_words: StopWordSet) -> Self {
        SearchEngine {
            stop_words,
            index: InvertedIndex::new(),
        }
    }

    /// Builds the engine from any iterable of stop words.
    pub fn with_stop_words<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(SearchEngine::new(StopWordSet::new(words)?))
    }

    /// Builds the engine from a space-separated stop-word string.
    pub fn from_stop_text(text: &str) -> Result<Self> {
        Ok(SearchEngine::new(StopWordSet::from_text(text)?))
    }

    /// Ingests a document. All validation happens before any state is
    /// touched, so a failed call leaves the engine unchanged. A document
    /// consisting only of stop words creates no postings but still counts
    /// toward the corpus.
    pub fn add_document(
        &mut self,
        id: DocumentId,
        text: &str,
        status: DocumentStatus,
        ratings: &[i32],
    ) -> Result<()> {
        if id.value() < 0 {
            return Err(Error::new(
                ErrorKind::NegativeId,
                format!("document id {} is negative", id),
            ));
        }
        if self.index.contains(id) {
            return Err(Error::new(
                ErrorKind::DuplicateId,
                format!("document id {} already exists", id),
            ));
        }

        let words = self.split_into_words_no_stop(text)?;
        let record = DocumentRecord {
            rating: average_rating(ratings),
            status,
            text: text.to_string(),
        };
        let term_count = words.len();
        self.index.insert(id, record, &words);
        debug!(id = id.value(), terms = term_count, "document added");
        Ok(())
    }

    pub fn document_count(&self) -> usize {
        self.index.document_count()
    }

    /// Document ids in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = DocumentId> + '_ {
        self.index.ids().iter().copied()
    }

    /// Term frequencies of one document; empty for unknown ids.
    pub fn word_frequencies(&self, id: DocumentId) -> &BTreeMap<String, f64> {
        self.index.word_frequencies(id)
    }

    // ---- ranked retrieval -------------------------------------------------

    pub fn find_top_documents(&self, raw_query: &str) -> Result<Vec<ScoredDocument>> {
        self.find_top_documents_with_status(raw_query, DocumentStatus::Actual)
    }

    pub fn find_top_documents_par(&self, raw_query: &str) -> Result<Vec<ScoredDocument>> {
        self.find_top_documents_with_status_par(raw_query, DocumentStatus::Actual)
    }

    pub fn find_top_documents_with_status(
        &self,
        raw_query: &str,
        status: DocumentStatus,
    ) -> Result<Vec<ScoredDocument>> {
        self.find_top_documents_filtered(raw_query, move |_, document_status, _| {
            document_status == status
        })
    }

    pub fn find_top_documents_with_status_par(
        &self,
        raw_query: &str,
        status: DocumentStatus,
    ) -> Result<Vec<ScoredDocument>> {
        self.find_top_documents_filtered_par(raw_query, move |_, document_status, _| {
            document_status == status
        })
    }

    /// Ranked retrieval under a caller-supplied predicate over
    /// (id, status, rating). Returning no results is not an error.
    pub fn find_top_documents_filtered<P>(
        &self,
        raw_query: &str,
        predicate: P,
    ) -> Result<Vec<ScoredDocument>>
    where
        P: Fn(DocumentId, DocumentStatus, i32) -> bool,
    {
        let query = parse_query(&self.stop_words, raw_query)?;
        let mut matched = self.find_all_documents(&query, &predicate);
        matched.sort_by(compare_ranked);
        matched.truncate(MAX_RESULT_DOCUMENT_COUNT);
        Ok(matched)
    }

    /// Same contract as the sequential variant; plus- and minus-word
    /// iteration runs in parallel through the sharded accumulator.
    pub fn find_top_documents_filtered_par<P>(
        &self,
        raw_query: &str,
        predicate: P,
    ) -> Result<Vec<ScoredDocument>>
    where
        P: Fn(DocumentId, DocumentStatus, i32) -> bool + Sync,
    {
        let query = parse_query(&self.stop_words, raw_query)?;
        let mut matched = self.find_all_documents_par(&query, &predicate);
        matched.par_sort_by(compare_ranked);
        matched.truncate(MAX_RESULT_DOCUMENT_COUNT);
        Ok(matched)
    }

    // ---- matching ---------------------------------------------------------

    /// Reports which plus words of the query occur in the document, along
    /// with its status. Any minus-word hit empties the word list.
    pub fn match_document(
        &self,
        raw_query: &str,
        id: DocumentId,
    ) -> Result<(Vec<String>, DocumentStatus)> {
        let record = self.known_record(id)?;
        let query = parse_query(&self.stop_words, raw_query)?;

        for word in &query.minus_words {
            if self.posting_contains(word, id) {
                return Ok((Vec::new(), record.status));
            }
        }

        let matched: Vec<String> = query
            .plus_words
            .iter()
            .filter(|word| self.posting_contains(word.as_str(), id))
            .cloned()
            .collect();
        Ok((matched, record.status))
    }

    /// Parallel variant: minus words are checked with a short-circuiting
    /// any-reduction, plus words by parallel filter then sort and dedup.
    pub fn match_document_par(
        &self,
        raw_query: &str,
        id: DocumentId,
    ) -> Result<(Vec<String>, DocumentStatus)> {
        let record = self.known_record(id)?;
        let query = parse_query(&self.stop_words, raw_query)?;

        if query
            .minus_words
            .par_iter()
            .any(|word| self.posting_contains(word, id))
        {
            return Ok((Vec::new(), record.status));
        }

        let mut matched: Vec<String> = query
            .plus_words
            .par_iter()
            .filter(|word| self.posting_contains(word.as_str(), id))
            .cloned()
            .collect();
        matched.sort_unstable();
        matched.dedup();
        Ok((matched, record.status))
    }

    // ---- removal ----------------------------------------------------------

    /// Removes a document from every structure. Unknown ids are a no-op.
    pub fn remove_document(&mut self, id: DocumentId) {
        if self.index.remove(id) {
            debug!(id = id.value(), "document removed");
        }
    }

    /// Same cleanup as `remove_document`, sweeping posting lists in
    /// parallel.
    pub fn remove_document_par(&mut self, id: DocumentId) {
        if self.index.remove_par(id) {
            debug!(id = id.value(), "document removed");
        }
    }

    // ---- internals --------------------------------------------------------

    fn known_record(&self, id: DocumentId) -> Result<&DocumentRecord> {
        self.index.record(id).ok_or_else(|| {
            Error::new(
                ErrorKind::UnknownId,
                format!("document id {} does not exist", id),
            )
        })
    }

    fn posting_contains(&self, word: &str, id: DocumentId) -> bool {
        self.index
            .posting(word)
            .is_some_and(|posting| posting.contains_key(&id))
    }

    fn split_into_words_no_stop<'t>(&self, text: &'t str) -> Result<Vec<&'t str>> {
        let mut words = Vec::new();
        for word in split_words(text) {
            validate_word(word)?;
            if !self.stop_words.contains(word) {
                words.push(word);
            }
        }
        Ok(words)
    }

    fn find_all_documents<P>(&self, query: &Query, predicate: &P) -> Vec<ScoredDocument>
    where
        P: Fn(DocumentId, DocumentStatus, i32) -> bool,
    {
        let mut relevance: BTreeMap<DocumentId, f64> = BTreeMap::new();

        for word in &query.plus_words {
            let Some(posting) = self.index.posting(word) else {
                continue;
            };
            let word_weight =
                inverse_document_frequency(self.index.document_count(), posting.len());
            for (&id, &term_freq) in posting {
                if let Some(record) = self.index.record(id) {
                    if predicate(id, record.status, record.rating) {
                        *relevance.entry(id).or_insert(0.0) += term_freq * word_weight;
                    }
                }
            }
        }

        for word in &query.minus_words {
            let Some(posting) = self.index.posting(word) else {
                continue;
            };
            for id in posting.keys() {
                relevance.remove(id);
            }
        }

        self.materialize(relevance.into_iter())
    }

    fn find_all_documents_par<P>(&self, query: &Query, predicate: &P) -> Vec<ScoredDocument>
    where
        P: Fn(DocumentId, DocumentStatus, i32) -> bool + Sync,
    {
        let relevance: ShardedMap<f64> = ShardedMap::default();

        query.plus_words.par_iter().for_each(|word| {
            let Some(posting) = self.index.posting(word) else {
                return;
            };
            let word_weight =
                inverse_document_frequency(self.index.document_count(), posting.len());
            for (&id, &term_freq) in posting {
                if let Some(record) = self.index.record(id) {
                    if predicate(id, record.status, record.rating) {
                        relevance.with_value(id, |value| *value += term_freq * word_weight);
                    }
                }
            }
        });

        query.minus_words.par_iter().for_each(|word| {
            let Some(posting) = self.index.posting(word) else {
                return;
            };
            for &id in posting.keys() {
                relevance.erase(id);
            }
        });

        self.materialize(relevance.build_ordered().into_iter())
    }

    fn materialize(
        &self,
        relevance: impl Iterator<Item = (DocumentId, f64)>,
    ) -> Vec<ScoredDocument> {
        relevance
            .filter_map(|(id, relevance)| {
                self.index.record(id).map(|record| ScoredDocument {
                    id,
                    relevance,
                    rating: record.rating,
                })
            })
            .collect()
    }
}

impl<'a> IntoIterator for &'a SearchEngine {
    type Item = DocumentId;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, DocumentId>>;

    fn into_iter(self) -> Self::IntoIter {
        self.index.ids().iter().copied()
    }
}
