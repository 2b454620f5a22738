pub mod add;
pub mod analyze;
pub mod common;
pub mod delete;
pub mod list;
pub mod remind;
pub mod sync;
