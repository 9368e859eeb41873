use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use crate::cache::{CatalogCache, CatalogSnapshot};
use crate::catalog::adapter::{adapt, RawRecord};
use crate::catalog::filter::{filter_entries, search_entries, FilterCriteria};
use crate::catalog::views;
use crate::domain::{CatalogEntry, Category, Submission};
use crate::metrics;
use crate::storage::{CatalogStore, RecordQuery};

/// Fetch/write layer between the record store and the page handlers.
///
/// Store failures never escape: reads fall back to the last catalog that was
/// fetched successfully (or an empty one) and submissions report `false`.
#[derive(Clone)]
pub struct CatalogService {
    store: Arc<dyn CatalogStore>,
    cache: Arc<CatalogCache>,
    refresh_lock: Arc<Mutex<()>>,
    /// Completed store fetches, successful or not
    fetch_attempts: Arc<AtomicU64>,
}

impl CatalogService {
    pub fn new(store: Arc<dyn CatalogStore>, ttl: Duration) -> Self {
        Self {
            store,
            cache: Arc::new(CatalogCache::new(ttl)),
            refresh_lock: Arc::new(Mutex::new(())),
            fetch_attempts: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn cache(&self) -> &CatalogCache {
        &self.cache
    }

    /// The published catalog, refetched when the cached copy has expired
    pub async fn catalog(&self) -> CatalogSnapshot {
        if let Some(entries) = self.cache.fresh().await {
            metrics::cache_hit();
            debug!("Serving cached catalog ({} entries)", entries.len());
            return entries;
        }

        // One refetch at a time; callers that waited on it share its outcome.
        let seen = self.fetch_attempts.load(Ordering::Acquire);
        let _guard = self.refresh_lock.lock().await;
        if let Some(entries) = self.cache.fresh().await {
            metrics::cache_hit();
            return entries;
        }
        if self.fetch_attempts.load(Ordering::Acquire) != seen {
            debug!("Store fetch failed while waiting; serving last known catalog");
            return self.cache.stale().await.unwrap_or_default();
        }

        let fetched = self.fetch_published().await;
        self.fetch_attempts.fetch_add(1, Ordering::Release);
        match fetched {
            Some(entries) => self.cache.store(entries).await,
            None => self.cache.stale().await.unwrap_or_default(),
        }
    }

    /// Expire the cached catalog and fetch it again
    pub async fn refresh(&self) -> CatalogSnapshot {
        self.cache.invalidate().await;
        self.catalog().await
    }

    async fn fetch_published(&self) -> Option<Vec<CatalogEntry>> {
        metrics::catalog_fetched();
        match self.store.list_records(&RecordQuery::Published).await {
            Ok(records) => {
                let entries = normalize_records(&records);
                info!(
                    "Fetched {} records, {} published entries",
                    records.len(),
                    entries.len()
                );
                Some(entries)
            }
            Err(e) => {
                metrics::catalog_fetch_failed();
                error!("Error fetching apps: {}", e);
                None
            }
        }
    }

    /// Apply `criteria` to the catalog, optionally narrowed to one category first
    pub async fn filter(
        &self,
        category: Option<Category>,
        criteria: &FilterCriteria,
    ) -> Vec<CatalogEntry> {
        let catalog = self.catalog().await;
        let selected = match category {
            Some(category) => {
                filter_entries(views::in_category(&catalog, category), criteria)
            }
            None => filter_entries(catalog.iter(), criteria),
        };
        selected.into_iter().cloned().collect()
    }

    /// Text search over the whole catalog, ignoring platform and URL type
    pub async fn search(&self, query: &str) -> Vec<CatalogEntry> {
        let catalog = self.catalog().await;
        search_entries(catalog.iter(), query)
            .into_iter()
            .cloned()
            .collect()
    }

    pub async fn find_by_slug(&self, slug: &str) -> Option<CatalogEntry> {
        let catalog = self.catalog().await;
        views::find_by_slug(&catalog, slug).cloned()
    }

    pub async fn by_category(&self, category: Category) -> Vec<CatalogEntry> {
        let catalog = self.catalog().await;
        views::in_category(&catalog, category)
            .into_iter()
            .cloned()
            .collect()
    }

    pub async fn featured(&self) -> Vec<CatalogEntry> {
        let catalog = self.catalog().await;
        views::featured(&catalog).into_iter().cloned().collect()
    }

    pub async fn related(&self, entry: &CatalogEntry) -> Vec<CatalogEntry> {
        let catalog = self.catalog().await;
        views::related(&catalog, entry)
            .into_iter()
            .cloned()
            .collect()
    }

    pub async fn category_counts(&self) -> Vec<(Category, usize)> {
        let catalog = self.catalog().await;
        views::category_counts(&catalog)
    }

    /// Write a submission to the store as a record awaiting review.
    /// Returns `false` for invalid submissions and store failures alike.
    pub async fn submit(&self, submission: &Submission) -> bool {
        if let Err(e) = submission.validate() {
            warn!("Rejected app submission: {}", e);
            metrics::submission("invalid");
            return false;
        }
        match self.store.create_record(&submission.to_fields()).await {
            Ok(record) => {
                info!("Created app submission {} for {}", record.id, submission.app_name);
                metrics::submission("created");
                true
            }
            Err(e) => {
                error!("Error creating app submission: {}", e);
                metrics::submission("failed");
                false
            }
        }
    }
}

/// Drop malformed records, adapt the rest, and keep only published entries
pub fn normalize_records(records: &[RawRecord]) -> Vec<CatalogEntry> {
    let mut rejected = 0;
    let entries: Vec<CatalogEntry> = records
        .iter()
        .filter(|record| {
            let ok = record.is_well_formed();
            if !ok {
                warn!(record_id = %record.id, "Skipping record missing required fields");
                rejected += 1;
            }
            ok
        })
        .map(adapt)
        .filter(CatalogEntry::is_published)
        .collect();
    if rejected > 0 {
        metrics::records_rejected(rejected);
    }
    entries
}
