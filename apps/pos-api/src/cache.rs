//! Simple in-memory cache with TTL.
//!
//! Used as an advisory fast path for category-existence checks on the
//! product endpoints. The cache is never the sole source of truth for a
//! decision that mutates persisted state - the foreign key constraint in
//! the schema is the enforcement; this only saves a lookup and produces
//! friendlier error messages.

use std::collections::HashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

use parking_lot::RwLock;

/// A TTL map. Expired entries read as absent and are swept on writes.
#[derive(Debug)]
pub struct TtlCache<K, V> {
    entries: RwLock<HashMap<K, (V, Instant)>>,
    ttl: Duration,
}

impl<K: Eq + Hash + Clone, V: Clone> TtlCache<K, V> {
    /// Creates a new cache with the specified TTL.
    pub fn new(ttl: Duration) -> Self {
        TtlCache {
            entries: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    /// Retrieves a live value, or None if absent or expired.
    pub fn get(&self, key: &K) -> Option<V> {
        let entries = self.entries.read();
        let (value, expires_at) = entries.get(key)?;

        if Instant::now() >= *expires_at {
            return None;
        }

        Some(value.clone())
    }

    /// Stores a value, sweeping expired entries while holding the lock.
    pub fn set(&self, key: K, value: V) {
        let now = Instant::now();
        let mut entries = self.entries.write();

        entries.retain(|_, (_, expires_at)| *expires_at > now);
        entries.insert(key, (value, now + self.ttl));
    }

    /// Removes a value.
    pub fn remove(&self, key: &K) {
        self.entries.write().remove(key);
    }

    /// Removes all values.
    pub fn clear(&self) {
        self.entries.write().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let cache: TtlCache<i64, bool> = TtlCache::new(Duration::from_secs(60));

        assert_eq!(cache.get(&1), None);

        cache.set(1, true);
        assert_eq!(cache.get(&1), Some(true));

        cache.remove(&1);
        assert_eq!(cache.get(&1), None);
    }

    #[test]
    fn test_entries_expire() {
        let cache: TtlCache<i64, bool> = TtlCache::new(Duration::from_millis(0));

        cache.set(1, true);
        assert_eq!(cache.get(&1), None);
    }

    #[test]
    fn test_clear() {
        let cache: TtlCache<i64, bool> = TtlCache::new(Duration::from_secs(60));
        cache.set(1, true);
        cache.set(2, false);

        cache.clear();
        assert_eq!(cache.get(&1), None);
        assert_eq!(cache.get(&2), None);
    }
}
