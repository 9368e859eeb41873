use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::slug::slugify;
use crate::domain::{CatalogEntry, Category, EntryStatus, Platform, UrlType};

/// One record as returned by the tabular store
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRecord {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_time: Option<String>,
    #[serde(default)]
    pub fields: RawFields,
}

/// Image asset attached to a record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
}

/// Column values of a store record, keyed by the store's column names.
///
/// Enumerated columns are kept as plain strings here so that a record with an
/// unexpected value still deserializes; [`adapt`] decides what to do with it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawFields {
    #[serde(rename = "App Name", default, skip_serializing_if = "Option::is_none")]
    pub app_name: Option<String>,
    #[serde(rename = "Slug", default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(rename = "Icon", default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<Vec<Attachment>>,
    #[serde(rename = "Short Description", default, skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,
    #[serde(rename = "Full Description", default, skip_serializing_if = "Option::is_none")]
    pub full_description: Option<String>,
    #[serde(rename = "Category", default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(rename = "Platform", default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<Vec<String>>,
    #[serde(rename = "Primary URL", default, skip_serializing_if = "Option::is_none")]
    pub primary_url: Option<String>,
    #[serde(rename = "URL Type", default, skip_serializing_if = "Option::is_none")]
    pub url_type: Option<String>,
    #[serde(rename = "Tags", default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(rename = "Installation Notes", default, skip_serializing_if = "Option::is_none")]
    pub installation_notes: Option<String>,
    #[serde(rename = "Last Verified", default, skip_serializing_if = "Option::is_none")]
    pub last_verified: Option<String>,
    #[serde(rename = "Verified By", default, skip_serializing_if = "Option::is_none")]
    pub verified_by: Option<String>,
    #[serde(rename = "Quality Score", default, skip_serializing_if = "Option::is_none")]
    pub quality_score: Option<f64>,
    #[serde(rename = "Featured", default, skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
    #[serde(rename = "Status", default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(rename = "Submitter Email", default, skip_serializing_if = "Option::is_none")]
    pub submitter_email: Option<String>,
    #[serde(rename = "Submitter Name", default, skip_serializing_if = "Option::is_none")]
    pub submitter_name: Option<String>,
}

impl RawRecord {
    /// True when every column the catalog requires is present.
    /// Callers drop records failing this check before adapting them.
    pub fn is_well_formed(&self) -> bool {
        let f = &self.fields;
        non_empty(&f.app_name).is_some()
            && non_empty(&f.primary_url).is_some()
            && f.short_description.is_some()
            && f.full_description.is_some()
    }
}

/// Normalize one store record into a catalog entry.
///
/// Never fails. Missing optional columns become `None`, and the defaulted
/// columns fall back as follows: slug from the name, category `utilities`,
/// URL type `Website`, tags empty, featured `false`, status `Published`.
/// Enumerated values the catalog does not know are never passed through:
/// unknown platforms are dropped, an unknown category or URL type takes the
/// default, and an unknown status becomes `Pending Review` so the record is
/// not served.
pub fn adapt(record: &RawRecord) -> CatalogEntry {
    let f = &record.fields;
    let name = f.app_name.clone().unwrap_or_default();

    let slug = match non_empty(&f.slug) {
        Some(slug) => slug.to_string(),
        None => slugify(&name),
    };

    let category = match non_empty(&f.category) {
        Some(value) => value.parse().unwrap_or_else(|e| {
            warn!(record_id = %record.id, "{e}; defaulting to utilities");
            Category::default()
        }),
        None => Category::default(),
    };

    let url_type = match non_empty(&f.url_type) {
        Some(value) => value.parse().unwrap_or_else(|e| {
            warn!(record_id = %record.id, "{e}; defaulting to Website");
            UrlType::default()
        }),
        None => UrlType::default(),
    };

    let status = match non_empty(&f.status) {
        Some(value) => value.parse().unwrap_or_else(|e| {
            warn!(record_id = %record.id, "{e}; holding record for review");
            EntryStatus::PendingReview
        }),
        None => EntryStatus::default(),
    };

    let mut platforms: Vec<Platform> = Vec::new();
    for value in f.platform.iter().flatten() {
        match value.parse::<Platform>() {
            Ok(platform) if !platforms.contains(&platform) => platforms.push(platform),
            Ok(_) => {}
            Err(e) => warn!(record_id = %record.id, "{e}; dropping it"),
        }
    }

    CatalogEntry {
        id: record.id.clone(),
        slug,
        icon: f
            .icon
            .as_ref()
            .and_then(|assets| assets.first())
            .map(|asset| asset.url.clone()),
        short_description: f.short_description.clone().unwrap_or_default(),
        full_description: f.full_description.clone().unwrap_or_default(),
        category,
        platforms,
        primary_url: f.primary_url.clone().unwrap_or_default(),
        url_type,
        tags: f.tags.clone().unwrap_or_default(),
        installation_notes: f.installation_notes.clone(),
        last_verified: f.last_verified.as_deref().and_then(|v| parse_date(&record.id, v)),
        verified_by: f.verified_by.clone(),
        quality_score: f.quality_score,
        featured: f.featured.unwrap_or(false),
        status,
        created_at: record
            .created_time
            .as_deref()
            .and_then(|v| parse_timestamp(&record.id, v)),
        name,
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn parse_date(record_id: &str, value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|dt| dt.date_naive()))
        .or_else(|| {
            debug!(record_id, value, "Unparseable Last Verified date");
            None
        })
}

fn parse_timestamp(record_id: &str, value: &str) -> Option<DateTime<Utc>> {
    match DateTime::parse_from_rfc3339(value) {
        Ok(dt) => Some(dt.with_timezone(&Utc)),
        Err(e) => {
            debug!(record_id, value, "Unparseable createdTime: {e}");
            None
        }
    }
}
