use super::types::{AddedRecords, TableRow, TableStore};
use crate::config::Config;
use crate::error::SyncError;
use crate::sync::VeilleRecord;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

#[derive(Deserialize)]
struct RecordsResponse {
    records: Vec<TableRow>,
}

#[derive(Deserialize)]
struct AddedResponse {
    records: Vec<AddedId>,
}

#[derive(Deserialize)]
struct AddedId {
    id: u64,
}

#[derive(Serialize)]
struct RecordsPayload<'a> {
    records: Vec<FieldsEnvelope<'a>>,
}

#[derive(Serialize)]
struct FieldsEnvelope<'a> {
    fields: &'a VeilleRecord,
}

pub struct GristClient {
    client: reqwest::Client,
    api_key: String,
    table_url: String,
    timeout: Duration,
}

impl GristClient {
    pub fn new(
        api_url: &str,
        doc_id: &str,
        api_key: &str,
        timeout: Duration,
    ) -> Result<Self, SyncError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SyncError::Configuration(format!("Failed to build HTTP client: {}", e)))?;

        let table_url = format!("{}/docs/{}/tables", api_url.trim_end_matches('/'), doc_id);
        info!("Grist client initialized ({})", table_url);

        Ok(Self {
            client,
            api_key: api_key.to_string(),
            table_url,
            timeout,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, SyncError> {
        Self::new(
            &config.api_url,
            &config.doc_id,
            &config.api_key,
            config.timeout,
        )
    }

    pub fn records_url(&self, table_id: &str) -> String {
        format!("{}/{}/records", self.table_url, table_id)
    }

    fn request_error(
        &self,
        operation: &'static str,
        table_id: &str,
        e: reqwest::Error,
    ) -> SyncError {
        if e.is_timeout() {
            SyncError::table_access(
                operation,
                table_id,
                format!("timed out after {:?}", self.timeout),
            )
        } else {
            SyncError::table_access(operation, table_id, e)
        }
    }

    async fn send(
        &self,
        operation: &'static str,
        table_id: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<Vec<u8>, SyncError> {
        let response = request
            .header("accept", "application/json")
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| self.request_error(operation, table_id, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SyncError::table_access(
                operation,
                table_id,
                format!("HTTP {} {}", status, body),
            ));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| self.request_error(operation, table_id, e))?;
        Ok(bytes.to_vec())
    }
}

pub fn parse_rows(table_id: &str, body: &[u8]) -> Result<Vec<TableRow>, SyncError> {
    let data: RecordsResponse = serde_json::from_slice(body).map_err(|e| {
        SyncError::table_access("fetch", table_id, format!("invalid response: {}", e))
    })?;
    Ok(data.records)
}

/// An empty body means the table accepted nothing; it is not an error.
pub fn parse_added(table_id: &str, body: &[u8]) -> Result<AddedRecords, SyncError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(AddedRecords::default());
    }

    let data: AddedResponse = serde_json::from_slice(body).map_err(|e| {
        SyncError::table_access("add", table_id, format!("invalid response: {}", e))
    })?;
    Ok(AddedRecords {
        ids: data.records.into_iter().map(|r| r.id).collect(),
    })
}

fn records_payload(records: &[VeilleRecord]) -> RecordsPayload<'_> {
    RecordsPayload {
        records: records
            .iter()
            .map(|fields| FieldsEnvelope { fields })
            .collect(),
    }
}

#[async_trait]
impl TableStore for GristClient {
    async fn fetch_table(&self, table_id: &str) -> Result<Vec<TableRow>, SyncError> {
        let url = self.records_url(table_id);
        debug!("GET {}", url);

        let body = self.send("fetch", table_id, self.client.get(&url)).await?;
        parse_rows(table_id, &body)
    }

    async fn add_records(
        &self,
        table_id: &str,
        records: &[VeilleRecord],
    ) -> Result<AddedRecords, SyncError> {
        let url = self.records_url(table_id);
        debug!("POST {} ({} records)", url, records.len());

        let request = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&records_payload(records));
        let body = self.send("add", table_id, request).await?;
        parse_added(table_id, &body)
    }
}
