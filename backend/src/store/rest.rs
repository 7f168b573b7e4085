//! Record store backed by the hosted backend's REST interface.
//!
//! Tables are exposed PostgREST-style under `{base_url}/rest/v1/{table}`; a
//! JSON array `POST` inserts all rows in one statement, so a rejected call
//! leaves nothing behind.

use super::{RecordStore, StoreError};
use async_trait::async_trait;
use common::model::reservation::ReservationRecord;

pub struct RestStore {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl RestStore {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }
}

#[async_trait]
impl RecordStore for RestStore {
    async fn insert_batch(
        &self,
        table: &str,
        records: &[ReservationRecord],
    ) -> Result<(), StoreError> {
        let response = self
            .client
            .post(self.table_url(table))
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .header("Prefer", "return=minimal")
            .json(records)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let message = response.text().await.unwrap_or_default();
        Err(StoreError::Rejected {
            status: status.as_u16(),
            message,
        })
    }
}
