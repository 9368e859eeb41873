use serde::{Deserialize, Serialize};

use crate::domain::{CatalogEntry, Platform, UrlType};

/// User-selected constraints on the visible catalog.
///
/// Every dimension is optional; an absent or empty dimension does not
/// constrain the result. Active dimensions are combined with AND.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    /// Entry must list at least one of these platforms
    pub platforms: Option<Vec<Platform>>,
    /// Entry's URL type must be one of these
    pub url_types: Option<Vec<UrlType>>,
    /// Case-insensitive substring over name, descriptions and tags
    pub search_query: Option<String>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_platforms(mut self, platforms: impl IntoIterator<Item = Platform>) -> Self {
        self.platforms = Some(platforms.into_iter().collect());
        self
    }

    pub fn with_url_types(mut self, url_types: impl IntoIterator<Item = UrlType>) -> Self {
        self.url_types = Some(url_types.into_iter().collect());
        self
    }

    pub fn with_search(mut self, query: impl Into<String>) -> Self {
        self.search_query = Some(query.into());
        self
    }

    /// True when no dimension would constrain the result
    pub fn is_empty(&self) -> bool {
        self.active_platforms().is_none()
            && self.active_url_types().is_none()
            && self.active_query().is_none()
    }

    fn active_platforms(&self) -> Option<&[Platform]> {
        self.platforms.as_deref().filter(|p| !p.is_empty())
    }

    fn active_url_types(&self) -> Option<&[UrlType]> {
        self.url_types.as_deref().filter(|u| !u.is_empty())
    }

    fn active_query(&self) -> Option<&str> {
        self.search_query
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
    }

    /// Whether a single entry satisfies every active dimension
    pub fn matches(&self, entry: &CatalogEntry) -> bool {
        let needle = self.active_query().map(str::to_lowercase);
        self.matches_with(entry, needle.as_deref())
    }

    fn matches_with(&self, entry: &CatalogEntry, needle: Option<&str>) -> bool {
        if let Some(platforms) = self.active_platforms() {
            if !platforms.iter().any(|p| entry.has_platform(*p)) {
                return false;
            }
        }
        if let Some(url_types) = self.active_url_types() {
            if !url_types.contains(&entry.url_type) {
                return false;
            }
        }
        match needle {
            Some(needle) => matches_text(entry, needle),
            None => true,
        }
    }
}

/// Select the entries that satisfy `criteria`, preserving input order.
///
/// Returns references into the input; entries are never copied, mutated or
/// reordered. Empty criteria select everything.
pub fn filter_entries<'a, I>(entries: I, criteria: &FilterCriteria) -> Vec<&'a CatalogEntry>
where
    I: IntoIterator<Item = &'a CatalogEntry>,
{
    let needle = criteria.active_query().map(str::to_lowercase);
    entries
        .into_iter()
        .filter(|entry| criteria.matches_with(entry, needle.as_deref()))
        .collect()
}

/// Text-only search over the whole catalog
pub fn search_entries<'a, I>(entries: I, query: &str) -> Vec<&'a CatalogEntry>
where
    I: IntoIterator<Item = &'a CatalogEntry>,
{
    filter_entries(entries, &FilterCriteria::new().with_search(query))
}

/// `needle` must already be trimmed and lowercased
fn matches_text(entry: &CatalogEntry, needle: &str) -> bool {
    entry.name.to_lowercase().contains(needle)
        || entry.short_description.to_lowercase().contains(needle)
        || entry.full_description.to_lowercase().contains(needle)
        || entry
            .tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(needle))
}
