use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use jot_core::code::generate_sync_code;
use jot_core::{merge_notes, MemoryStore, Note, NoteStore, RestKvStore};

use crate::classify::{Classification, ClassifierClient};
use crate::config::AppConfig;
use crate::error::ApiError;

/// Bounded retry budget for finding a free sync code.
const MAX_CODE_ATTEMPTS: usize = 10;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    store: Arc<dyn NoteStore>,
    classifier: Option<Arc<ClassifierClient>>,
}

impl AppState {
    /// Build the process-wide state. The store backend is chosen exactly
    /// once here, from static configuration, and injected everywhere else.
    pub fn from_config(config: Arc<AppConfig>) -> Result<Self, ApiError> {
        let store: Arc<dyn NoteStore> = match &config.kv {
            Some(kv) => {
                tracing::info!(backend = "rest-kv", url = %kv.rest_api_url, "Selected note store");
                Arc::new(
                    RestKvStore::new(kv.rest_api_url.clone(), kv.rest_api_token.clone())
                        .map_err(|error| ApiError::Config(error.to_string()))?,
                )
            }
            None => {
                tracing::info!(backend = "memory", "Selected note store");
                Arc::new(MemoryStore::new())
            }
        };

        let classifier = match &config.classifier {
            Some(classifier_config) => Some(Arc::new(
                ClassifierClient::new(classifier_config.clone())
                    .map_err(|error| ApiError::Config(error.to_string()))?,
            )),
            None => None,
        };

        Ok(Self {
            config,
            store,
            classifier,
        })
    }
}

pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/sync", post(create_sync_code))
        .route("/sync/{code}", get(fetch_notes).post(push_notes))
        .route("/analyze", post(analyze))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_headers(Any)
                .allow_methods(Any),
        )
        .with_state(state)
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    timestamp: i64,
}

async fn healthz() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        timestamp: Utc::now().timestamp(),
    })
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateSyncResponse {
    success: bool,
    sync_code: String,
    created_at: DateTime<Utc>,
}

async fn create_sync_code(
    State(state): State<AppState>,
) -> Result<Json<CreateSyncResponse>, ApiError> {
    let mut free_code = None;
    for _ in 0..MAX_CODE_ATTEMPTS {
        let candidate = generate_sync_code();
        if !state.store.exists(&candidate).await? {
            free_code = Some(candidate);
            break;
        }
    }
    let code = free_code.ok_or(ApiError::GenerationExhausted)?;

    let account = state.store.create(&code).await?;
    tracing::info!(endpoint = "create_sync_code", sync_code = %account.sync_code, "Issued sync code");
    Ok(Json(CreateSyncResponse {
        success: true,
        sync_code: account.sync_code,
        created_at: account.created_at,
    }))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FetchNotesResponse {
    success: bool,
    sync_code: String,
    notes: Vec<Note>,
    updated_at: DateTime<Utc>,
}

async fn fetch_notes(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<FetchNotesResponse>, ApiError> {
    let account = state
        .store
        .get(&code)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("unknown sync code: {code}")))?;

    tracing::info!(endpoint = "fetch_notes", sync_code = %code, count = account.notes.len(), "Fetched notes");
    Ok(Json(FetchNotesResponse {
        success: true,
        sync_code: account.sync_code,
        notes: account.notes,
        updated_at: account.updated_at,
    }))
}

#[derive(Debug, Deserialize)]
struct PushNotesRequest {
    notes: Vec<Note>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PushNotesResponse {
    success: bool,
    message: String,
    notes: Vec<Note>,
    sync_count: usize,
}

/// Full-replace-with-merge: the stored collection is recomputed from the
/// union of incoming and stored notes on every push, never appended to.
async fn push_notes(
    State(state): State<AppState>,
    Path(code): Path<String>,
    Json(request): Json<PushNotesRequest>,
) -> Result<Json<PushNotesResponse>, ApiError> {
    let account = state
        .store
        .get(&code)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("unknown sync code: {code}")))?;

    let merged = merge_notes(&request.notes, &account.notes);
    let sync_count = merged.len();

    let updated = state
        .store
        .put(&code, merged)
        .await?
        .ok_or_else(|| ApiError::Persistence(format!("account vanished during push: {code}")))?;

    tracing::info!(
        endpoint = "push_notes",
        sync_code = %code,
        incoming = request.notes.len(),
        merged = sync_count,
        "Merged and stored notes"
    );
    Ok(Json(PushNotesResponse {
        success: true,
        message: "sync complete".to_string(),
        notes: updated.notes,
        sync_count,
    }))
}

#[derive(Debug, Deserialize)]
struct AnalyzeRequest {
    content: String,
}

async fn analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<Classification>, ApiError> {
    let content = request.content.trim();
    if content.is_empty() {
        return Err(ApiError::validation("content must not be empty"));
    }

    let classifier = state.classifier.as_ref().ok_or_else(|| {
        ApiError::Config("no classification provider is configured on the backend".to_string())
    })?;

    let classification = classifier.classify(content).await.map_err(|error| {
        tracing::error!(endpoint = "analyze", error = %error, "Classification failed");
        ApiError::Classification
    })?;

    tracing::info!(
        endpoint = "analyze",
        note_type = %classification.note_type,
        tag_count = classification.tags.len(),
        "Classified content"
    );
    Ok(Json(classification))
}
