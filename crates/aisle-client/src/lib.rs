//! # aisle-client — Clients for the External Collaborators
//!
//! Aisle delegates authentication and row storage to two hosted services.
//! This crate gives each one a trait seam and a typed reqwest
//! implementation:
//!
//! - [`IdentityService`] / [`HttpIdentityClient`] — password sign-in,
//!   sign-up with an e-mail confirmation redirect, sign-out, password
//!   reset, and bearer-token user resolution.
//! - [`RecordStore`] / [`HttpRecordStore`] — generic per-table CRUD with
//!   `column=eq.value` filters and column ordering, speaking the
//!   PostgREST conventions of the hosted store.
//!
//! [`stub`] holds the in-memory implementations the rest of the workspace
//! tests against (and the CLI's demo mode runs on).
//!
//! ## Timeouts, no retries
//!
//! Every request carries a finite timeout (default 10s). There is no
//! automatic retry or backoff anywhere in this crate — retry is a
//! user-triggered action at the page level, never a transport policy.

pub mod config;
pub mod error;
pub mod http;
pub mod identity;
pub mod store;
pub mod stub;

pub use config::{ClientConfig, ConfigError};
pub use error::{IdentityError, StoreError};
pub use http::{HttpIdentityClient, HttpRecordStore};
pub use identity::{AuthUser, Credentials, IdentityService, Session};
pub use store::{Filter, Ordering, RecordStore};
pub use stub::{StubIdentityService, StubRecordStore};
