use std::collections::BTreeMap;

use parking_lot::Mutex;

use crate::core::config::ACCUMULATOR_BUCKETS;
use crate::core::types::DocumentId;

/// Bucketed mutex-protected map keyed by document id, used as the
/// relevance accumulator on the parallel retrieval path.
///
/// Contention scales with 1/buckets, so concurrent plus-word workers
/// rarely collide on a lock. Ordering during accumulation is irrelevant;
/// `build_ordered` produces the sorted view once the workers are done.
pub struct ShardedMap<V> {
    buckets: Vec<Mutex<BTreeMap<DocumentId, V>>>,
}

impl<V> ShardedMap<V> {
    pub fn new(bucket_count: usize) -> Self {
        let bucket_count = bucket_count.max(1);
        ShardedMap {
            buckets: (0..bucket_count).map(|_| Mutex::new(BTreeMap::new())).collect(),
        }
    }

    fn bucket(&self, id: DocumentId) -> &Mutex<BTreeMap<DocumentId, V>> {
        let index = id.value().unsigned_abs() as usize % self.buckets.len();
        &self.buckets[index]
    }

    /// Removes the slot for `id` if present.
    pub fn erase(&self, id: DocumentId) {
        self.bucket(id).lock().remove(&id);
    }
}

impl<V: Default> ShardedMap<V> {
    /// Exclusive scoped access to the slot for `id`, default-created when
    /// absent. The bucket lock is held exactly for the duration of `f`, so
    /// no two callers ever observe the same slot at once.
    pub fn with_value<R>(&self, id: DocumentId, f: impl FnOnce(&mut V) -> R) -> R {
        let mut bucket = self.bucket(id).lock();
        f(bucket.entry(id).or_default())
    }
}

impl<V: Clone> ShardedMap<V> {
    /// Locks each bucket in turn and merges the shards into one ordered
    /// map.
    pub fn build_ordered(&self) -> BTreeMap<DocumentId, V> {
        let mut merged = BTreeMap::new();
        for bucket in &self.buckets {
            let shard = bucket.lock();
            for (id, value) in shard.iter() {
                merged.insert(*id, value.clone());
            }
        }
        merged
    }
}

impl<V> Default for ShardedMap<V> {
    fn default() -> Self {
        ShardedMap::new(ACCUMULATOR_BUCKETS)
    }
}
