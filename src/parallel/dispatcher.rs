use rayon::prelude::*;

use crate::core::error::Result;
use crate::core::types::ScoredDocument;
use crate::search::engine::SearchEngine;

/// Runs each query as an independent sequential retrieval, in parallel
/// across queries. Results keep the input order; the first failing query
/// fails the whole call.
pub fn process_queries(
    engine: &SearchEngine,
    queries: &[String],
) -> Result<Vec<Vec<ScoredDocument>>> {
    queries
        .par_iter()
        .map(|query| engine.find_top_documents(query))
        .collect()
}

/// Concatenation of the per-query result lists in input order; within one
/// query the ranked order is preserved.
pub fn process_queries_joined(
    engine: &SearchEngine,
    queries: &[String],
) -> Result<Vec<ScoredDocument>> {
    let results = process_queries(engine, queries)?;
    Ok(results.into_iter().flatten().collect())
}
