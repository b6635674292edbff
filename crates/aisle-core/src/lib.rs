//! # aisle-core — Foundational Types for the Aisle Planning Stack
//!
//! Domain types shared by every other crate in the workspace: identifier
//! newtypes, UTC timestamps, the five planning records (profile, checklist
//! task, budget item, guest, vendor), their closed enumerations, the fixed
//! checklist seed template, and the pure derived-value computations the
//! pages render (budget summary, guest counts, checklist progress, wedding
//! countdown).
//!
//! ## Crate Policy
//!
//! - No I/O, no async, no HTTP. Everything here is a plain value type or a
//!   pure function over value types.
//! - Every record is exclusively owned by one user; ownership is expressed
//!   through the `user_id` field and re-checked by every remote filter.

pub mod budget;
pub mod checklist;
pub mod error;
pub mod guest;
pub mod identity;
pub mod profile;
pub mod record;
pub mod temporal;
pub mod vendor;

// ─── Identity re-exports ────────────────────────────────────────────

pub use identity::{RecordId, TaskKey, UserId};

// ─── Temporal re-exports ────────────────────────────────────────────

pub use temporal::Timestamp;

// ─── Record re-exports ──────────────────────────────────────────────

pub use record::{MergeOrder, OwnedRecord};

// ─── Domain re-exports ──────────────────────────────────────────────

pub use budget::{BudgetItem, BudgetSummary};
pub use checklist::{default_tasks, group_by_category, ChecklistProgress, Task, TaskCategory};
pub use error::ValidationError;
pub use guest::{Guest, GuestCounts, RsvpStatus};
pub use profile::{Countdown, Profile};
pub use vendor::{Vendor, VendorStatus};
