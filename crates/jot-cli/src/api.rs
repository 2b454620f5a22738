//! HTTP client for the jot-api server.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use jot_core::util::{compact_text, is_http_url};
use jot_core::{Note, NoteType};

use crate::error::CliError;

#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedSync {
    pub sync_code: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchedNotes {
    pub notes: Vec<Note>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PushedNotes {
    pub notes: Vec<Note>,
    pub sync_count: usize,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    #[serde(rename = "type")]
    pub note_type: NoteType,
    pub type_reason: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub suggestions: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, CliError> {
        let base_url = base_url.into();
        if !is_http_url(&base_url) {
            return Err(CliError::Api(format!(
                "API URL must start with http:// or https://, got '{base_url}'"
            )));
        }
        Ok(Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn create_sync_code(&self) -> Result<CreatedSync, CliError> {
        let response = self
            .client
            .post(format!("{}/sync", self.base_url))
            .send()
            .await?;
        Self::decode(response).await
    }

    pub async fn fetch_notes(&self, code: &str) -> Result<FetchedNotes, CliError> {
        let response = self
            .client
            .get(format!("{}/sync/{code}", self.base_url))
            .send()
            .await?;
        Self::decode(response).await
    }

    pub async fn push_notes(&self, code: &str, notes: &[Note]) -> Result<PushedNotes, CliError> {
        let response = self
            .client
            .post(format!("{}/sync/{code}", self.base_url))
            .json(&serde_json::json!({ "notes": notes }))
            .send()
            .await?;
        Self::decode(response).await
    }

    pub async fn analyze(&self, content: &str) -> Result<Analysis, CliError> {
        let response = self
            .client
            .post(format!("{}/analyze", self.base_url))
            .json(&serde_json::json!({ "content": content }))
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn decode<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, CliError> {
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            tracing::debug!(status, body = %compact_text(&body), "API error response");
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .ok()
                .and_then(|payload| payload.error)
                .unwrap_or_else(|| compact_text(&body));
            return Err(CliError::Api(format!("{message} (HTTP {status})")));
        }
        Ok(response.json::<T>().await?)
    }
}
