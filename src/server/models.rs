use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::catalog::filter::FilterCriteria;
use crate::domain::{CatalogEntry, CategoryInfo, Platform, UrlType};

/// Query string accepted by the listing endpoints.
/// `platforms` and `url_types` are comma separated, e.g. `platforms=iOS,macOS`.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct ListParams {
    pub platforms: Option<String>,
    pub url_types: Option<String>,
    pub q: Option<String>,
    pub category: Option<String>,
}

/// Criteria parsed from a query string
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedFilter {
    pub criteria: FilterCriteria,
    /// A dimension was requested but named no known value, so nothing can match
    pub unsatisfiable: bool,
}

impl ListParams {
    pub fn to_filter(&self) -> ParsedFilter {
        let (platforms, bad_platforms) = parse_list::<Platform>(self.platforms.as_deref());
        let (url_types, bad_url_types) = parse_list::<UrlType>(self.url_types.as_deref());
        ParsedFilter {
            criteria: FilterCriteria {
                platforms,
                url_types,
                search_query: self.q.clone(),
            },
            unsatisfiable: bad_platforms || bad_url_types,
        }
    }
}

fn parse_list<T: FromStr>(raw: Option<&str>) -> (Option<Vec<T>>, bool) {
    let tokens: Vec<&str> = raw
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect();
    if tokens.is_empty() {
        return (None, false);
    }
    let known: Vec<T> = tokens.iter().filter_map(|t| t.parse().ok()).collect();
    if known.is_empty() {
        (None, true)
    } else {
        (Some(known), false)
    }
}

#[derive(Serialize)]
pub struct AppList {
    pub count: usize,
    pub apps: Vec<CatalogEntry>,
}

impl AppList {
    pub fn new(apps: Vec<CatalogEntry>) -> Self {
        Self {
            count: apps.len(),
            apps,
        }
    }
}

#[derive(Serialize)]
pub struct AppDetail {
    pub app: CatalogEntry,
    pub category: CategoryInfo,
    pub related: Vec<CatalogEntry>,
}

#[derive(Serialize)]
pub struct CategorySummary {
    #[serde(flatten)]
    pub info: CategoryInfo,
    pub count: usize,
}

#[derive(Serialize)]
pub struct CategoryPage {
    pub category: CategoryInfo,
    /// Entries in the category before platform/URL type filters
    pub total: usize,
    pub count: usize,
    pub apps: Vec<CatalogEntry>,
}

#[derive(Serialize)]
pub struct SearchResults {
    pub query: String,
    pub count: usize,
    pub apps: Vec<CatalogEntry>,
}

#[derive(Serialize)]
pub struct SubmissionResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Serialize)]
pub struct RefreshResult {
    pub count: usize,
    pub version: u64,
}
