use super::{CatalogStore, RecordQuery};
use crate::catalog::adapter::{RawFields, RawRecord};
use crate::error::Result;
use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use std::sync::{Arc, Mutex};
use tracing::debug;
use uuid::Uuid;

/// In-memory record store for development/testing.
/// Keeps records in insertion order, like a table view sorted by creation.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    records: Arc<Mutex<Vec<RawRecord>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<RawRecord>) -> Self {
        Self {
            records: Arc::new(Mutex::new(records)),
        }
    }

    /// Snapshot of every stored record, regardless of status
    pub fn records(&self) -> Vec<RawRecord> {
        self.records.lock().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn new_record_id() -> String {
    let simple = Uuid::new_v4().simple().to_string();
    format!("rec{}", &simple[..14])
}

#[async_trait]
impl CatalogStore for InMemoryStore {
    async fn list_records(&self, query: &RecordQuery) -> Result<Vec<RawRecord>> {
        let records = self.records.lock().unwrap();
        let selected = records
            .iter()
            .filter(|r| query.matches(&r.fields))
            .take(query.max_records().unwrap_or(usize::MAX))
            .cloned()
            .collect();
        Ok(selected)
    }

    async fn create_record(&self, fields: &RawFields) -> Result<RawRecord> {
        let record = RawRecord {
            id: new_record_id(),
            created_time: Some(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
            fields: fields.clone(),
        };

        let mut records = self.records.lock().unwrap();
        records.push(record.clone());

        debug!("Created record {} ({:?})", record.id, record.fields.app_name);
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn published(name: &str) -> RawFields {
        RawFields {
            app_name: Some(name.to_string()),
            status: Some("Published".to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn assigns_ids_and_preserves_order() {
        let store = InMemoryStore::new();
        let a = store.create_record(&published("A")).await.unwrap();
        let b = store.create_record(&published("B")).await.unwrap();
        assert!(a.id.starts_with("rec"));
        assert_eq!(a.id.len(), 17);
        assert_ne!(a.id, b.id);
        assert!(a.created_time.is_some());

        let listed = store.list_records(&RecordQuery::Published).await.unwrap();
        let names: Vec<_> = listed.iter().map(|r| r.fields.app_name.clone().unwrap()).collect();
        assert_eq!(names, vec!["A", "B"]);
    }

    #[tokio::test]
    async fn applies_query_and_limit() {
        let store = InMemoryStore::new();
        for i in 0..7 {
            let mut fields = published(&format!("App {i}"));
            fields.slug = Some("app".to_string());
            store.create_record(&fields).await.unwrap();
        }
        let mut pending = published("Pending");
        pending.slug = Some("pending".to_string());
        pending.status = Some("Pending Review".to_string());
        store.create_record(&pending).await.unwrap();

        assert_eq!(store.len(), 8);
        assert_eq!(store.list_records(&RecordQuery::Published).await.unwrap().len(), 7);
        assert_eq!(store.list_records(&RecordQuery::BySlug("app".into())).await.unwrap().len(), 1);
        assert!(store.list_records(&RecordQuery::BySlug("pending".into())).await.unwrap().is_empty());
    }
}
