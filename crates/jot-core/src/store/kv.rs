//! Hosted key-value note store.
//!
//! Talks to a Redis-compatible REST gateway (the Upstash/Vercel-KV shape):
//! `GET {base}/get/{key}` returns `{"result": <serialized value or null>}`
//! and `POST {base}/set/{key}` with the value as the request body returns
//! `{"result": "OK"}`. One record per sync code, stored under `sync:{code}`
//! as the full serialized account.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use super::NoteStore;
use crate::error::{Error, Result};
use crate::models::{Note, SyncAccount};
use crate::util::{compact_text, is_http_url};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// REST KV backend, selected when hosted-KV credentials are configured.
#[derive(Clone)]
pub struct RestKvStore {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

impl fmt::Debug for RestKvStore {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("RestKvStore")
            .field("base_url", &self.base_url)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct KvGetResponse {
    result: Option<String>,
}

impl RestKvStore {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Result<Self> {
        let base_url = base_url.into();
        if !is_http_url(&base_url) {
            return Err(Error::InvalidInput(
                "KV base URL must start with http:// or https://".to_string(),
            ));
        }
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.into(),
        })
    }

    fn record_key(code: &str) -> String {
        format!("sync:{code}")
    }

    async fn fetch_raw(&self, key: &str) -> Result<Option<String>> {
        let url = format!("{}/get/{key}", self.base_url);
        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status, key, "KV get failed");
            return Err(Error::Storage(format!(
                "KV get failed with HTTP {status}: {}",
                compact_text(&body)
            )));
        }

        let payload = response.json::<KvGetResponse>().await?;
        Ok(payload.result)
    }

    async fn store_raw(&self, key: &str, value: String) -> Result<()> {
        let url = format!("{}/set/{key}", self.base_url);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .body(value)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status, key, "KV set failed");
            return Err(Error::Storage(format!(
                "KV set failed with HTTP {status}: {}",
                compact_text(&body)
            )));
        }
        Ok(())
    }

    async fn store_account(&self, account: &SyncAccount) -> Result<()> {
        let key = Self::record_key(&account.sync_code);
        let value = serde_json::to_string(account)?;
        self.store_raw(&key, value).await
    }
}

#[async_trait]
impl NoteStore for RestKvStore {
    async fn exists(&self, code: &str) -> Result<bool> {
        Ok(self.get(code).await?.is_some())
    }

    async fn create(&self, code: &str) -> Result<SyncAccount> {
        let account = SyncAccount::new(code);
        self.store_account(&account).await?;
        Ok(account)
    }

    async fn get(&self, code: &str) -> Result<Option<SyncAccount>> {
        let Some(raw) = self.fetch_raw(&Self::record_key(code)).await? else {
            return Ok(None);
        };
        let account = serde_json::from_str::<SyncAccount>(&raw)?;
        Ok(Some(account))
    }

    async fn put(&self, code: &str, notes: Vec<Note>) -> Result<Option<SyncAccount>> {
        let Some(mut account) = self.get(code).await? else {
            return Ok(None);
        };
        account.notes = notes;
        account.updated_at = chrono::Utc::now();
        self.store_account(&account).await?;
        Ok(Some(account))
    }
}
