//! Shared application state handed to every handler.

use std::sync::Arc;
use std::time::Duration;

use crate::cache::TtlCache;
use toko_db::Database;

/// Application state. Cloned per request by axum; everything inside is
/// either reference counted or pool-backed.
#[derive(Clone)]
pub struct AppState {
    /// Database handle (pool + repositories).
    pub db: Database,

    /// Advisory cache: category id → exists. Mutating category endpoints
    /// invalidate entries; the FK constraint remains the enforcement.
    pub category_cache: Arc<TtlCache<i64, bool>>,
}

impl AppState {
    pub fn new(db: Database, category_cache_ttl: Duration) -> Self {
        AppState {
            db,
            category_cache: Arc::new(TtlCache::new(category_cache_ttl)),
        }
    }

    /// Category existence with the cache in front of the database.
    ///
    /// Only positive results are cached: a freshly created category must
    /// become visible immediately, and a stale positive is harmless
    /// because the foreign key still decides writes.
    pub async fn category_exists(&self, id: i64) -> Result<bool, toko_db::DbError> {
        if let Some(true) = self.category_cache.get(&id) {
            return Ok(true);
        }

        let exists = self.db.categories().exists(id).await?;
        if exists {
            self.category_cache.set(id, true);
        }

        Ok(exists)
    }
}
