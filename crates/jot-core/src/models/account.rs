//! Sync account model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Note;

/// One synced note collection, addressed by its sync code.
///
/// Accounts are created empty when a code is issued. `notes` and
/// `updated_at` change only through the merge-and-store path; accounts are
/// never deleted (no expiry policy is defined).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncAccount {
    /// Human-shareable code, the primary key
    pub sync_code: String,
    /// The note collection, keyed by note id
    pub notes: Vec<Note>,
    /// When the code was issued
    pub created_at: DateTime<Utc>,
    /// Last successful push
    pub updated_at: DateTime<Utc>,
}

impl SyncAccount {
    /// Create a fresh, empty account for the given code.
    #[must_use]
    pub fn new(sync_code: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            sync_code: sync_code.into(),
            notes: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_new_account_is_empty() {
        let account = SyncAccount::new("JOT-ABC123");
        assert_eq!(account.sync_code, "JOT-ABC123");
        assert!(account.notes.is_empty());
        assert_eq!(account.created_at, account.updated_at);
    }

    #[test]
    fn test_account_wire_shape() {
        let account = SyncAccount::new("JOT-ABC123");
        let value = serde_json::to_value(&account).unwrap();
        assert_eq!(*value.get("syncCode").unwrap(), "JOT-ABC123");
        assert!(value.get("updatedAt").is_some());
    }
}
