pub mod airtable;
pub mod in_memory;

pub use airtable::AirtableStore;
pub use in_memory::InMemoryStore;

use crate::catalog::adapter::{RawFields, RawRecord};
use crate::constants::{FIELD_SLUG, FIELD_STATUS};
use crate::domain::EntryStatus;
use crate::error::Result;
use async_trait::async_trait;

/// Read/write access to the tabular store that owns the catalog records
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Fetch every record selected by `query`, following pagination
    async fn list_records(&self, query: &RecordQuery) -> Result<Vec<RawRecord>>;

    /// Create one record and return it as stored (with its assigned id)
    async fn create_record(&self, fields: &RawFields) -> Result<RawRecord>;
}

/// Record selections the catalog needs from the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordQuery {
    Published,
    /// At most one published record; used to detect existing entries before writing
    BySlug(String),
}

impl RecordQuery {
    /// Store-side filter formula for this selection
    pub fn formula(&self) -> String {
        let published = equals(FIELD_STATUS, EntryStatus::Published.as_str());
        match self {
            RecordQuery::Published => published,
            RecordQuery::BySlug(slug) => format!("AND({}, {})", equals(FIELD_SLUG, slug), published),
        }
    }

    pub fn max_records(&self) -> Option<usize> {
        match self {
            RecordQuery::BySlug(_) => Some(1),
            RecordQuery::Published => None,
        }
    }

    /// In-process evaluation of [`formula`](Self::formula), for stores
    /// without a formula engine. Compares raw column values exactly as the
    /// store would, so a record without a Status column is not published.
    pub fn matches(&self, fields: &RawFields) -> bool {
        let published = fields.status.as_deref() == Some(EntryStatus::Published.as_str());
        published
            && match self {
                RecordQuery::Published => true,
                RecordQuery::BySlug(slug) => fields.slug.as_deref() == Some(slug.as_str()),
            }
    }
}

fn equals(field: &str, value: &str) -> String {
    format!("{{{field}}} = \"{}\"", escape_formula_string(value))
}

/// Escape a value for use inside a double-quoted formula string literal
pub fn escape_formula_string(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_formulas() {
        assert_eq!(RecordQuery::Published.formula(), r#"{Status} = "Published""#);
        assert_eq!(
            RecordQuery::BySlug("figma".into()).formula(),
            r#"AND({Slug} = "figma", {Status} = "Published")"#
        );
    }

    #[test]
    fn slug_values_are_escaped() {
        let formula = RecordQuery::BySlug(r#"x", TRUE(), "y"#.to_string()).formula();
        assert_eq!(
            formula,
            r#"AND({Slug} = "x\", TRUE(), \"y", {Status} = "Published")"#
        );
    }

    #[test]
    fn limits() {
        assert_eq!(RecordQuery::Published.max_records(), None);
        assert_eq!(RecordQuery::BySlug("a".into()).max_records(), Some(1));
    }

    #[test]
    fn in_process_matching_requires_explicit_status() {
        let mut fields = RawFields {
            slug: Some("figma".into()),
            ..Default::default()
        };
        assert!(!RecordQuery::Published.matches(&fields));

        fields.status = Some("Published".into());
        assert!(RecordQuery::Published.matches(&fields));
        assert!(RecordQuery::BySlug("figma".into()).matches(&fields));
        assert!(!RecordQuery::BySlug("gimp".into()).matches(&fields));

        fields.status = Some("Pending Review".into());
        assert!(!RecordQuery::BySlug("figma".into()).matches(&fields));
    }
}
