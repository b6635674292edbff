//! # Aisle Sync
//!
//! Synchronization layer between the typed domain records and the remote
//! record store. The [`ResourceController`] owns one user-scoped
//! collection (tasks, guests, vendors, budget items), drives its load
//! lifecycle through [`CollectionState`], and applies writes with the
//! owner filter on every call. Checklist toggles are optimistic: the
//! local flip happens first and is rolled back if the write fails.
//!
//! There is no automatic retry anywhere in this crate. A failed load
//! parks the collection in its error state with whatever fallback records
//! make sense, and recovery is an explicit, user-triggered [`retry`].
//!
//! [`retry`]: ResourceController::retry

pub mod collection;
pub mod controller;
pub mod error;
pub mod notice;
pub mod toggle;

pub use collection::{CollectionState, CollectionStatus};
pub use controller::{ResourceController, SeedPolicy};
pub use error::SyncError;
pub use notice::{Notice, NOTICE_TTL};
pub use toggle::ToggleCommand;
