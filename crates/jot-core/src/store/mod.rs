//! Note store abstraction with interchangeable backends.
//!
//! The API server picks one backend at process startup from configuration
//! and injects it as `Arc<dyn NoteStore>`; backends are never mixed within a
//! running process.

mod kv;
mod memory;

use async_trait::async_trait;

pub use kv::RestKvStore;
pub use memory::MemoryStore;

use crate::error::Result;
use crate::models::{Note, SyncAccount};

/// Key-value persistence of sync accounts, keyed by sync code.
#[async_trait]
pub trait NoteStore: Send + Sync {
    /// Whether an account exists for `code`.
    async fn exists(&self, code: &str) -> Result<bool>;

    /// Create a fresh, empty account for `code`.
    ///
    /// Callers are expected to have pre-checked via [`Self::exists`]; an
    /// existing record under the same code is overwritten.
    async fn create(&self, code: &str) -> Result<SyncAccount>;

    /// Fetch the account for `code`, if any.
    async fn get(&self, code: &str) -> Result<Option<SyncAccount>>;

    /// Replace the note collection for `code` and refresh `updated_at`.
    ///
    /// Returns `None` when no account exists for `code`; nothing is written
    /// in that case.
    async fn put(&self, code: &str, notes: Vec<Note>) -> Result<Option<SyncAccount>>;
}
