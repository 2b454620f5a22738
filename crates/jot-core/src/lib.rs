//! jot-core - Core library for Jot
//!
//! This crate contains the shared note model, the merge algorithm used for
//! cross-device sync, the sync-code generator, and the note store backends
//! used by the API server and the CLI client.

pub mod code;
pub mod error;
pub mod merge;
pub mod models;
pub mod store;
pub mod util;

pub use error::{Error, Result};
pub use merge::merge_notes;
pub use models::{Note, NoteType, SyncAccount};
pub use store::{MemoryStore, NoteStore, RestKvStore};
