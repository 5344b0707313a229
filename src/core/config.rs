/// Ranked retrieval returns at most this many documents.
pub const MAX_RESULT_DOCUMENT_COUNT: usize = 5;

/// Relevances closer than this are considered tied and ranked by rating.
pub const RELEVANCE_TOLERANCE: f64 = 1e-6;

/// Number of query outcomes retained by the request statistics window.
pub const REQUEST_WINDOW: usize = 1440;

/// Bucket count for the parallel relevance accumulator. Must exceed the
/// expected parallel width; a small prime keeps the modulo spread even.
pub const ACCUMULATOR_BUCKETS: usize = 101;
