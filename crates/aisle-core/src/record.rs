//! # Owned Record Trait
//!
//! Every synchronized collection is a set of rows exclusively owned by one
//! user. `OwnedRecord` is the seam between the domain types here and the
//! generic synchronization controller: it names the remote table, fixes the
//! deterministic merge position for newly created rows, and exposes the
//! identity fields the ownership filters are built from.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::identity::{RecordId, UserId};

/// Where a freshly created row is merged into the local collection.
///
/// Deterministic per entity: guest and vendor lists show newest first,
/// budget items keep insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOrder {
    /// New rows go to the front (newest-first lists).
    Prepend,
    /// New rows go to the back (insertion-ordered lists).
    Append,
}

/// A row type stored in a user-scoped remote table.
pub trait OwnedRecord:
    Clone + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Remote table name.
    const TABLE: &'static str;

    /// Merge position for rows returned from a successful create.
    const MERGE_ORDER: MergeOrder;

    /// Server-assigned row id, absent until the row has been stored.
    fn record_id(&self) -> Option<&RecordId>;

    /// Owner of the row, absent only on unsaved template rows.
    fn owner(&self) -> Option<&UserId>;

    /// Stamp the row with its owner before it is written.
    fn set_owner(&mut self, owner: UserId);
}
