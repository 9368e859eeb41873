/// Column names used in store-side filter formulas.
/// These must match the backing table exactly.
pub const FIELD_SLUG: &str = "Slug";
pub const FIELD_STATUS: &str = "Status";

// Store connection defaults
pub const DEFAULT_TABLE_NAME: &str = "Apps";
pub const DEFAULT_API_URL: &str = "https://api.airtable.com/v0";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
/// The store caps a single list page at 100 records
pub const STORE_PAGE_SIZE: usize = 100;

/// How long a fetched catalog is served before it is refetched (15 minutes)
pub const DEFAULT_CACHE_TTL_SECS: u64 = 900;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_CONFIG_PATH: &str = "catalog.toml";
pub const DEFAULT_LOG_DIR: &str = "logs";

// Page-level selection limits
pub const FEATURED_LIMIT: usize = 5;
pub const RELATED_LIMIT: usize = 4;

/// Verifier recorded on seeded entries
pub const SEED_VERIFIER: &str = "System";
