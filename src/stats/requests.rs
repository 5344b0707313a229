use std::collections::VecDeque;

use crate::core::config::REQUEST_WINDOW;
use crate::core::error::Result;
use crate::core::types::{DocumentId, DocumentStatus, ScoredDocument};
use crate::search::engine::SearchEngine;

/// Sliding window over the outcomes of recent retrieval calls.
///
/// Purely count-based: the window holds the last `REQUEST_WINDOW` outcomes
/// regardless of wall-clock time. A failed query records nothing.
pub struct RequestQueue<'a> {
    engine: &'a SearchEngine,
    requests: VecDeque<bool>,
    no_result_count: usize,
}

impl<'a> RequestQueue<'a> {
    pub fn new(engine: &'a SearchEngine) -> Self {
        RequestQueue {
            engine,
            requests: VecDeque::with_capacity(REQUEST_WINDOW),
            no_result_count: 0,
        }
    }

    pub fn add_find_request(&mut self, raw_query: &str) -> Result<Vec<ScoredDocument>> {
        self.add_find_request_with_status(raw_query, DocumentStatus::Actual)
    }

    pub fn add_find_request_with_status(
        &mut self,
        raw_query: &str,
        status: DocumentStatus,
    ) -> Result<Vec<ScoredDocument>> {
        self.add_find_request_filtered(raw_query, move |_, document_status, _| {
            document_status == status
        })
    }

    pub fn add_find_request_filtered<P>(
        &mut self,
        raw_query: &str,
        predicate: P,
    ) -> Result<Vec<ScoredDocument>>
    where
        P: Fn(DocumentId, DocumentStatus, i32) -> bool,
    {
        let documents = self.engine.find_top_documents_filtered(raw_query, predicate)?;
        self.record(!documents.is_empty());
        Ok(documents)
    }

    /// Number of queries in the window that yielded no results.
    pub fn no_result_requests(&self) -> usize {
        self.no_result_count
    }

    fn record(&mut self, had_results: bool) {
        if self.requests.len() == REQUEST_WINDOW {
            if let Some(evicted) = self.requests.pop_front() {
                if !evicted {
                    self.no_result_count -= 1;
                }
            }
        }
        self.requests.push_back(had_results);
        if !had_results {
            self.no_result_count += 1;
        }
    }
}
