#![allow(dead_code)]

use app_directory::catalog::{adapt, RawFields, RawRecord};
use app_directory::domain::{CatalogEntry, Platform, UrlType};
use app_directory::seed::SAMPLE_APPS;
use serde_json::{json, Value};

/// Published raw records for every sample app, with stable ids
pub fn sample_records() -> Vec<RawRecord> {
    SAMPLE_APPS
        .iter()
        .enumerate()
        .map(|(i, app)| RawRecord {
            id: format!("recSample{i:02}"),
            created_time: Some("2024-05-01T12:00:00.000Z".to_string()),
            fields: app.to_fields("2024-05-01"),
        })
        .collect()
}

pub fn sample_catalog() -> Vec<CatalogEntry> {
    sample_records().iter().map(adapt).collect()
}

/// A record built from store-shaped JSON fields
pub fn record(id: &str, fields: Value) -> RawRecord {
    serde_json::from_value(json!({ "id": id, "fields": fields })).expect("valid record fixture")
}

pub fn entry(name: &str, platforms: &[Platform], url_type: UrlType, tags: &[&str]) -> CatalogEntry {
    let fields = RawFields {
        app_name: Some(name.to_string()),
        short_description: Some(String::new()),
        full_description: Some(String::new()),
        primary_url: Some(format!("https://example.com/{}", name.to_lowercase())),
        platform: Some(platforms.iter().map(|p| p.as_str().to_string()).collect()),
        url_type: Some(url_type.as_str().to_string()),
        tags: Some(tags.iter().map(|t| t.to_string()).collect()),
        ..Default::default()
    };
    adapt(&RawRecord {
        id: format!("rec{name}"),
        created_time: None,
        fields,
    })
}

pub fn names(entries: &[&CatalogEntry]) -> Vec<String> {
    entries.iter().map(|e| e.name.clone()).collect()
}
