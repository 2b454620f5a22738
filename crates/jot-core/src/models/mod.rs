//! Data models shared by the API server and the CLI client.

mod account;
mod note;

pub use account::SyncAccount;
pub use note::{extract_tags, Note, NoteType};
