//! Synchronization errors.

use thiserror::Error;

/// Errors surfaced by the synchronization layer. Store failures are
/// flattened to a table name plus a display string so callers never
/// depend on transport details.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SyncError {
    /// A collection load failed.
    #[error("failed to load {table}: {detail}")]
    Fetch {
        /// The table being loaded.
        table: &'static str,
        /// Display form of the underlying failure.
        detail: String,
    },

    /// A create, update, or delete failed.
    #[error("failed to write {table}: {detail}")]
    Write {
        /// The table being written.
        table: &'static str,
        /// Display form of the underlying failure.
        detail: String,
    },

    /// A record the caller named is not in the collection.
    #[error("no record {id} in {table}")]
    UnknownRecord {
        /// The table searched.
        table: &'static str,
        /// The id that was not found.
        id: String,
    },
}
