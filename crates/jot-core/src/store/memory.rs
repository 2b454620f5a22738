//! In-process note store, the fallback when no hosted KV is configured.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::NoteStore;
use crate::error::Result;
use crate::models::{Note, SyncAccount};

/// Process-local map of sync accounts.
///
/// Each operation takes the lock once; the get-merge-put sequence performed
/// by push is NOT atomic across operations, so concurrent pushes to the same
/// code can lose an update. The hosted backend offers nothing stronger, so
/// callers must not assume read-modify-write atomicity from either.
#[derive(Debug, Default)]
pub struct MemoryStore {
    accounts: RwLock<HashMap<String, SyncAccount>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NoteStore for MemoryStore {
    async fn exists(&self, code: &str) -> Result<bool> {
        Ok(self.accounts.read().await.contains_key(code))
    }

    async fn create(&self, code: &str) -> Result<SyncAccount> {
        let account = SyncAccount::new(code);
        self.accounts
            .write()
            .await
            .insert(code.to_string(), account.clone());
        Ok(account)
    }

    async fn get(&self, code: &str) -> Result<Option<SyncAccount>> {
        Ok(self.accounts.read().await.get(code).cloned())
    }

    async fn put(&self, code: &str, notes: Vec<Note>) -> Result<Option<SyncAccount>> {
        let mut accounts = self.accounts.write().await;
        let Some(account) = accounts.get_mut(code) else {
            return Ok(None);
        };
        account.notes = notes;
        account.updated_at = Utc::now();
        Ok(Some(account.clone()))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::models::Note;

    #[tokio::test]
    async fn test_create_then_get_roundtrip() {
        let store = MemoryStore::new();
        assert!(!store.exists("JOT-ABC123").await.unwrap());

        let created = store.create("JOT-ABC123").await.unwrap();
        assert!(created.notes.is_empty());
        assert!(store.exists("JOT-ABC123").await.unwrap());

        let fetched = store.get("JOT-ABC123").await.unwrap().unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_get_unknown_code_is_none() {
        let store = MemoryStore::new();
        assert!(store.get("JOT-MISSING").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_put_replaces_notes_and_refreshes_updated_at() {
        let store = MemoryStore::new();
        let created = store.create("JOT-ABC123").await.unwrap();

        let updated = store
            .put("JOT-ABC123", vec![Note::new("hello")])
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.notes.len(), 1);
        assert!(updated.updated_at >= created.updated_at);
        assert_eq!(updated.created_at, created.created_at);
    }

    #[tokio::test]
    async fn test_put_unknown_code_writes_nothing() {
        let store = MemoryStore::new();
        let result = store.put("JOT-MISSING", vec![Note::new("x")]).await.unwrap();
        assert!(result.is_none());
        assert!(!store.exists("JOT-MISSING").await.unwrap());
    }
}
