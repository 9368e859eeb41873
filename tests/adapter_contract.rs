mod common;

use app_directory::catalog::adapt;
use app_directory::domain::{Category, EntryStatus, Platform, UrlType};
use app_directory::service::normalize_records;
use common::{record, sample_records};
use serde_json::json;

#[test]
fn missing_columns_take_defaults() {
    let entry = adapt(&record(
        "recDefaults",
        json!({
            "App Name": "My Cool App!!",
            "Short Description": "Does things",
            "Full Description": "Does things well",
            "Primary URL": "https://example.com"
        }),
    ));

    assert_eq!(entry.slug, "my-cool-app");
    assert_eq!(entry.category, Category::Utilities);
    assert_eq!(entry.url_type, UrlType::Website);
    assert!(entry.tags.is_empty());
    assert!(entry.platforms.is_empty());
    assert!(!entry.featured);
    assert_eq!(entry.status, EntryStatus::Published);
    assert_eq!(entry.icon, None);
    assert_eq!(entry.quality_score, None);
}

#[test]
fn stored_slug_wins_over_derived_one() {
    let entry = adapt(&record(
        "recSlug",
        json!({
            "App Name": "Visual Studio Code",
            "Slug": "vs-code",
            "Short Description": "",
            "Full Description": "",
            "Primary URL": "https://code.visualstudio.com"
        }),
    ));
    assert_eq!(entry.slug, "vs-code");
}

#[test]
fn full_record_maps_every_column() {
    let entry = adapt(&record(
        "recFull",
        json!({
            "App Name": "Maccy",
            "Icon": [{ "url": "https://cdn.example.com/maccy.png" }, { "url": "https://cdn.example.com/other.png" }],
            "Short Description": "Clipboard manager",
            "Full Description": "Keeps a searchable clipboard history.",
            "Category": "automation",
            "Platform": ["macOS"],
            "Primary URL": "https://github.com/p0deje/Maccy",
            "URL Type": "GitHub",
            "Tags": ["clipboard", "open-source"],
            "Installation Notes": "brew install maccy",
            "Last Verified": "2024-03-09",
            "Verified By": "System",
            "Quality Score": 4.5,
            "Featured": true,
            "Status": "Published"
        }),
    ));

    assert_eq!(entry.icon.as_deref(), Some("https://cdn.example.com/maccy.png"));
    assert_eq!(entry.category, Category::Automation);
    assert_eq!(entry.platforms, vec![Platform::MacOs]);
    assert_eq!(entry.url_type, UrlType::GitHub);
    assert_eq!(entry.tags, vec!["clipboard", "open-source"]);
    assert_eq!(entry.installation_notes.as_deref(), Some("brew install maccy"));
    assert_eq!(entry.last_verified.map(|d| d.to_string()).as_deref(), Some("2024-03-09"));
    assert_eq!(entry.quality_score, Some(4.5));
    assert!(entry.featured);
}

#[test]
fn unknown_enumerated_values_never_leak() {
    let entry = adapt(&record(
        "recOdd",
        json!({
            "App Name": "Odd",
            "Short Description": "",
            "Full Description": "",
            "Primary URL": "https://example.com",
            "Category": "games",
            "Platform": ["Android", "iOS", "iOS"],
            "URL Type": "Play Store",
            "Status": "Draft"
        }),
    ));

    assert_eq!(entry.category, Category::Utilities);
    assert_eq!(entry.platforms, vec![Platform::Ios]);
    assert_eq!(entry.url_type, UrlType::Website);
    assert_eq!(entry.status, EntryStatus::PendingReview);
}

#[test]
fn serializes_with_catalog_field_names() {
    let entry = adapt(&sample_records()[0]);
    let value = serde_json::to_value(&entry).unwrap();

    assert_eq!(value["name"], "Figma");
    assert_eq!(value["slug"], "figma");
    assert_eq!(value["primaryURL"], "https://www.figma.com");
    assert_eq!(value["urlType"], "Website");
    assert_eq!(value["category"], "design");
    assert_eq!(value["platforms"], json!(["Web", "macOS"]));
    assert_eq!(value["status"], "Published");
}

#[test]
fn normalization_skips_records_without_required_columns() {
    let mut records = sample_records();
    records.push(record("recNoUrl", json!({ "App Name": "No URL", "Short Description": "", "Full Description": "" })));
    records.push(record(
        "recReview",
        json!({
            "App Name": "Waiting",
            "Short Description": "",
            "Full Description": "",
            "Primary URL": "https://example.com",
            "Status": "Pending Review"
        }),
    ));

    let catalog = normalize_records(&records);
    assert_eq!(catalog.len(), sample_records().len());
    assert!(catalog.iter().all(|e| e.is_published()));
}
