//! Storage Module
//!
//! SQLite-based review state store with:
//! - Durable SM-2 scheduling state per item
//! - Due-queue queries ordered by due date
//! - Append-only attempt log written transactionally with state updates
//! - SQL-aggregate retention statistics

mod migrations;
mod sqlite;

pub use migrations::MIGRATIONS;
pub use sqlite::{Result, StorageError, Store};
