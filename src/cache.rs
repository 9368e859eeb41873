use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

use crate::domain::CatalogEntry;

/// Shared, immutable view of the normalized catalog
pub type CatalogSnapshot = Arc<Vec<CatalogEntry>>;

struct Slot {
    entries: CatalogSnapshot,
    fetched_at: Instant,
    expired: bool,
    version: u64,
}

/// Holds the most recently fetched catalog for a bounded time window.
///
/// Readers get an `Arc` to the snapshot, so a refresh never disturbs a
/// request that is still filtering the previous one.
pub struct CatalogCache {
    ttl: Duration,
    slot: RwLock<Option<Slot>>,
}

impl CatalogCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            slot: RwLock::new(None),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// The cached catalog, if it is younger than the TTL
    pub async fn fresh(&self) -> Option<CatalogSnapshot> {
        let slot = self.slot.read().await;
        slot.as_ref()
            .filter(|s| !s.expired && s.fetched_at.elapsed() < self.ttl)
            .map(|s| s.entries.clone())
    }

    /// The cached catalog regardless of age
    pub async fn stale(&self) -> Option<CatalogSnapshot> {
        self.slot.read().await.as_ref().map(|s| s.entries.clone())
    }

    /// Replace the cached catalog and return the new snapshot
    pub async fn store(&self, entries: Vec<CatalogEntry>) -> CatalogSnapshot {
        let entries = Arc::new(entries);
        let mut slot = self.slot.write().await;
        let version = slot.as_ref().map_or(1, |s| s.version + 1);
        *slot = Some(Slot {
            entries: entries.clone(),
            fetched_at: Instant::now(),
            expired: false,
            version,
        });
        entries
    }

    /// Mark the cached catalog as expired while keeping it available as stale
    pub async fn invalidate(&self) {
        if let Some(slot) = self.slot.write().await.as_mut() {
            slot.expired = true;
            slot.version += 1;
        }
    }

    /// Monotonic counter bumped on every store or invalidation; 0 when empty
    pub async fn version(&self) -> u64 {
        self.slot.read().await.as_ref().map_or(0, |s| s.version)
    }
}
