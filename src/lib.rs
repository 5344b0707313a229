pub mod core;
pub mod analysis;
pub mod query;
pub mod index;
pub mod scoring;
pub mod search;
pub mod parallel;
pub mod stats;

/*
FINDEX STRUCT ARCHITECTURE

core      — Error/ErrorKind, DocumentId/DocumentStatus/ScoredDocument,
            engine-wide constants
analysis  — space tokenizer with control-character validation; immutable
            StopWordSet fixed at engine construction
query     — raw query → sorted, deduplicated plus/minus word lists
index     — InvertedIndex: postings (term → doc → tf) plus the faithful
            per-document transpose, metadata table, insertion-ordered ids
scoring   — idf weight and the relevance/rating rank ordering
search    — SearchEngine facade (ingest, ranked retrieval, matching,
            removal) and duplicate elimination
parallel  — ShardedMap accumulator for the in-query parallel path;
            cross-query dispatcher
stats     — RequestQueue sliding window over recent query outcomes

SearchEngine ──owns──> StopWordSet + InvertedIndex
FindTopDocuments ──parses──> Query ──accumulates──> ShardedMap (par path)
RequestQueue ──wraps──> FindTopDocuments
RemoveDuplicates ──reads──> per-document transpose ──removes──> documents
*/
