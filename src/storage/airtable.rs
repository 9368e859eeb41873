use super::{CatalogStore, RecordQuery};
use crate::catalog::adapter::{RawFields, RawRecord};
use crate::config::StoreConfig;
use crate::constants::STORE_PAGE_SIZE;
use crate::error::{CatalogError, Result};
use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, instrument};

/// Record store backed by an Airtable-compatible REST API
pub struct AirtableStore {
    client: Client,
    table_url: Url,
    api_key: String,
}

#[derive(Deserialize)]
struct ListResponse {
    #[serde(default)]
    records: Vec<RawRecord>,
    offset: Option<String>,
}

#[derive(Deserialize)]
struct CreateResponse {
    #[serde(default)]
    records: Vec<RawRecord>,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ErrorDetail {
    Typed { message: String },
    Code(String),
}

impl AirtableStore {
    pub fn new(config: &StoreConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;
        Ok(Self {
            client,
            table_url: table_url(&config.api_url, &config.base_id, &config.table_name)?,
            api_key: config.api_key.clone(),
        })
    }

    pub fn table_url(&self) -> &Url {
        &self.table_url
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }
        let body = response.text().await.unwrap_or_default();
        let message = match serde_json::from_str::<ErrorBody>(&body) {
            Ok(ErrorBody { error: ErrorDetail::Typed { message } }) => message,
            Ok(ErrorBody { error: ErrorDetail::Code(code) }) => code,
            Err(_) => body,
        };
        Err(CatalogError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

/// `{api_url}/{base_id}/{table_name}` with each segment percent-encoded
fn table_url(api_url: &str, base_id: &str, table_name: &str) -> Result<Url> {
    let mut url = Url::parse(api_url)
        .map_err(|e| CatalogError::Config(format!("Invalid store API URL '{api_url}': {e}")))?;
    url.path_segments_mut()
        .map_err(|_| CatalogError::Config(format!("Store API URL '{api_url}' cannot be a base")))?
        .pop_if_empty()
        .push(base_id)
        .push(table_name);
    Ok(url)
}

#[async_trait]
impl CatalogStore for AirtableStore {
    #[instrument(skip(self))]
    async fn list_records(&self, query: &RecordQuery) -> Result<Vec<RawRecord>> {
        let mut records = Vec::new();
        let mut offset: Option<String> = None;

        loop {
            let mut params = vec![
                ("filterByFormula", query.formula()),
                ("pageSize", STORE_PAGE_SIZE.to_string()),
            ];
            if let Some(max) = query.max_records() {
                params.push(("maxRecords", max.to_string()));
            }
            if let Some(offset) = &offset {
                params.push(("offset", offset.clone()));
            }

            let response = self
                .client
                .get(self.table_url.clone())
                .bearer_auth(&self.api_key)
                .query(&params)
                .send()
                .await?;
            let page: ListResponse = Self::read_json(response).await?;
            debug!("Fetched page of {} records", page.records.len());
            records.extend(page.records);

            match page.offset {
                Some(next) => offset = Some(next),
                None => break,
            }
        }

        Ok(records)
    }

    #[instrument(skip_all)]
    async fn create_record(&self, fields: &RawFields) -> Result<RawRecord> {
        let body = json!({
            "records": [{ "fields": fields }],
            "typecast": true,
        });
        let response = self
            .client
            .post(self.table_url.clone())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;
        let created: CreateResponse = Self::read_json(response).await?;
        created.records.into_iter().next().ok_or_else(|| CatalogError::Api {
            status: 200,
            message: "create returned no records".to_string(),
        })
    }
}
