//! # In-Memory Stubs
//!
//! Deterministic in-process implementations of the service seams, used by
//! the API integration tests and by demo mode. The record store keeps its
//! tables as JSON rows behind a mutex and can be armed to fail the next
//! call of a given kind, which is how the degraded-load and rollback paths
//! get exercised without a network.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering as AtomicOrdering};

use async_trait::async_trait;
use chrono::{Duration, TimeZone, Utc};
use parking_lot::Mutex;
use serde_json::Value;
use uuid::Uuid;

use aisle_core::{Timestamp, UserId};

use crate::error::{IdentityError, StoreError};
use crate::identity::{AuthUser, Credentials, IdentityService, Session};
use crate::store::{Filter, Ordering, RecordStore};

// ─── Record Store Stub ──────────────────────────────────────────────

/// In-memory record store. Tables are vectors of JSON rows; inserts stamp
/// a fresh id plus `created_at`/`updated_at`, matching what the hosted
/// store returns with `Prefer: return=representation`.
#[derive(Debug, Default)]
pub struct StubRecordStore {
    tables: Mutex<HashMap<String, Vec<Value>>>,
    /// Monotonic tick so every stamped timestamp is distinct; real-clock
    /// stamps can tie within a second and make ordering tests flaky.
    clock: AtomicU64,
    fail_select: AtomicBool,
    fail_insert: AtomicBool,
    fail_update: AtomicBool,
    fail_delete: AtomicBool,
}

impl StubRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm a one-shot failure on the next `select`.
    pub fn fail_next_select(&self) {
        self.fail_select.store(true, AtomicOrdering::SeqCst);
    }

    /// Arm a one-shot failure on the next `insert`.
    pub fn fail_next_insert(&self) {
        self.fail_insert.store(true, AtomicOrdering::SeqCst);
    }

    /// Arm a one-shot failure on the next `update`.
    pub fn fail_next_update(&self) {
        self.fail_update.store(true, AtomicOrdering::SeqCst);
    }

    /// Arm a one-shot failure on the next `delete`.
    pub fn fail_next_delete(&self) {
        self.fail_delete.store(true, AtomicOrdering::SeqCst);
    }

    /// Snapshot of a table's rows, for assertions.
    pub fn rows(&self, table: &str) -> Vec<Value> {
        self.tables
            .lock()
            .get(table)
            .cloned()
            .unwrap_or_default()
    }

    /// Seed a table with pre-built rows.
    pub fn seed(&self, table: &str, rows: Vec<Value>) {
        self.tables.lock().insert(table.to_string(), rows);
    }

    fn next_timestamp(&self) -> String {
        let tick = self.clock.fetch_add(1, AtomicOrdering::SeqCst);
        let base = Utc
            .with_ymd_and_hms(2026, 1, 1, 0, 0, 0)
            .single()
            .unwrap_or_else(Utc::now);
        Timestamp::from_utc(base + Duration::seconds(tick as i64)).to_rfc3339()
    }

    fn take_failure(&self, flag: &AtomicBool, table: &str) -> Result<(), StoreError> {
        if flag.swap(false, AtomicOrdering::SeqCst) {
            Err(StoreError::Api {
                table: table.to_string(),
                status: 503,
                body: "stubbed failure".to_string(),
            })
        } else {
            Ok(())
        }
    }
}

fn sort_rows(rows: &mut [Value], order: &Ordering) {
    rows.sort_by(|a, b| {
        let av = a.get(&order.column);
        let bv = b.get(&order.column);
        let cmp = compare_values(av, bv);
        if order.ascending {
            cmp
        } else {
            cmp.reverse()
        }
    });
}

fn compare_values(a: Option<&Value>, b: Option<&Value>) -> std::cmp::Ordering {
    use std::cmp::Ordering as O;
    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(O::Equal),
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(x), Some(y)) => x.to_string().cmp(&y.to_string()),
        (None, None) => O::Equal,
        (Some(_), None) => O::Greater,
        (None, Some(_)) => O::Less,
    }
}

#[async_trait]
impl RecordStore for StubRecordStore {
    async fn select(
        &self,
        table: &str,
        filter: &Filter,
        order: Option<&Ordering>,
    ) -> Result<Vec<Value>, StoreError> {
        self.take_failure(&self.fail_select, table)?;
        let tables = self.tables.lock();
        let mut rows: Vec<Value> = tables
            .get(table)
            .map(|rows| rows.iter().filter(|r| filter.matches(r)).cloned().collect())
            .unwrap_or_default();
        if let Some(order) = order {
            sort_rows(&mut rows, order);
        }
        Ok(rows)
    }

    async fn insert(&self, table: &str, rows: Vec<Value>) -> Result<Vec<Value>, StoreError> {
        self.take_failure(&self.fail_insert, table)?;
        let now = self.next_timestamp();
        let mut stored = Vec::with_capacity(rows.len());
        for mut row in rows {
            if let Some(object) = row.as_object_mut() {
                object
                    .entry("id")
                    .or_insert_with(|| Value::String(Uuid::new_v4().to_string()));
                object
                    .entry("created_at")
                    .or_insert_with(|| Value::String(now.clone()));
                object.insert("updated_at".to_string(), Value::String(now.clone()));
            }
            stored.push(row);
        }
        self.tables
            .lock()
            .entry(table.to_string())
            .or_default()
            .extend(stored.iter().cloned());
        Ok(stored)
    }

    async fn update(
        &self,
        table: &str,
        filter: &Filter,
        patch: Value,
    ) -> Result<Vec<Value>, StoreError> {
        self.take_failure(&self.fail_update, table)?;
        let now = self.next_timestamp();
        let mut tables = self.tables.lock();
        let mut updated = Vec::new();
        if let Some(rows) = tables.get_mut(table) {
            for row in rows.iter_mut().filter(|r| filter.matches(r)) {
                if let (Some(target), Some(changes)) = (row.as_object_mut(), patch.as_object()) {
                    for (key, value) in changes {
                        target.insert(key.clone(), value.clone());
                    }
                    target.insert("updated_at".to_string(), Value::String(now.clone()));
                }
                updated.push(row.clone());
            }
        }
        Ok(updated)
    }

    async fn delete(&self, table: &str, filter: &Filter) -> Result<(), StoreError> {
        self.take_failure(&self.fail_delete, table)?;
        if let Some(rows) = self.tables.lock().get_mut(table) {
            rows.retain(|r| !filter.matches(r));
        }
        Ok(())
    }
}

// ─── Identity Stub ──────────────────────────────────────────────────

#[derive(Debug, Clone)]
struct Account {
    id: UserId,
    password: String,
    confirmed: bool,
}

/// In-memory identity service. Accounts registered through `sign_up` stay
/// unconfirmed (no session until confirmation, as the hosted service
/// behaves); tests that need a live session call `seed_confirmed_user`.
#[derive(Debug, Default)]
pub struct StubIdentityService {
    accounts: Mutex<HashMap<String, Account>>,
    sessions: Mutex<HashMap<String, String>>,
    reset_requests: Mutex<Vec<String>>,
}

impl StubIdentityService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a confirmed account and an active session for it.
    /// Returns the user id and a bearer token.
    pub fn seed_confirmed_user(&self, email: &str, password: &str) -> (UserId, String) {
        let id = UserId::new();
        self.accounts.lock().insert(
            email.to_string(),
            Account {
                id,
                password: password.to_string(),
                confirmed: true,
            },
        );
        let token = format!("stub-token-{}", Uuid::new_v4());
        self.sessions.lock().insert(token.clone(), email.to_string());
        (id, token)
    }

    /// E-mail addresses that asked for a password reset, in order.
    pub fn reset_requests(&self) -> Vec<String> {
        self.reset_requests.lock().clone()
    }

    /// Whether a registered account is still awaiting confirmation.
    pub fn is_unconfirmed(&self, email: &str) -> bool {
        self.accounts
            .lock()
            .get(email)
            .is_some_and(|a| !a.confirmed)
    }
}

#[async_trait]
impl IdentityService for StubIdentityService {
    async fn sign_in(&self, credentials: &Credentials) -> Result<Session, IdentityError> {
        let account = {
            let accounts = self.accounts.lock();
            accounts.get(&credentials.email).cloned()
        };
        let account = account.ok_or_else(|| IdentityError::InvalidCredentials {
            detail: "Invalid login credentials".to_string(),
        })?;
        if account.password != *credentials.password {
            return Err(IdentityError::InvalidCredentials {
                detail: "Invalid login credentials".to_string(),
            });
        }
        if !account.confirmed {
            return Err(IdentityError::InvalidCredentials {
                detail: "Email not confirmed".to_string(),
            });
        }
        let token = format!("stub-token-{}", Uuid::new_v4());
        self.sessions
            .lock()
            .insert(token.clone(), credentials.email.clone());
        Ok(Session {
            access_token: token,
            token_type: "bearer".to_string(),
            expires_in: Some(3600),
            user: AuthUser {
                id: account.id,
                email: credentials.email.clone(),
            },
        })
    }

    async fn sign_up(
        &self,
        credentials: &Credentials,
        _redirect_to: &str,
    ) -> Result<(), IdentityError> {
        let mut accounts = self.accounts.lock();
        if accounts.contains_key(&credentials.email) {
            return Err(IdentityError::Api {
                endpoint: "/signup".to_string(),
                status: 422,
                body: "User already registered".to_string(),
            });
        }
        accounts.insert(
            credentials.email.clone(),
            Account {
                id: UserId::new(),
                password: credentials.password.to_string(),
                confirmed: false,
            },
        );
        Ok(())
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), IdentityError> {
        self.sessions.lock().remove(access_token);
        Ok(())
    }

    async fn request_password_reset(
        &self,
        email: &str,
        _redirect_to: &str,
    ) -> Result<(), IdentityError> {
        // The hosted service never reveals whether the address exists.
        self.reset_requests.lock().push(email.to_string());
        Ok(())
    }

    async fn current_user(&self, access_token: &str) -> Result<AuthUser, IdentityError> {
        let email = {
            let sessions = self.sessions.lock();
            sessions.get(access_token).cloned()
        };
        let email = email.ok_or_else(|| IdentityError::Unauthenticated {
            detail: "unknown or revoked token".to_string(),
        })?;
        let accounts = self.accounts.lock();
        let account = accounts
            .get(&email)
            .ok_or_else(|| IdentityError::Unauthenticated {
                detail: "account removed".to_string(),
            })?;
        Ok(AuthUser {
            id: account.id,
            email,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn insert_assigns_id_and_timestamps() {
        let store = StubRecordStore::new();
        let rows = store
            .insert("vendors", vec![serde_json::json!({ "name": "Bloom & Co" })])
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert!(rows[0].get("id").is_some());
        assert!(rows[0].get("created_at").is_some());
        assert!(rows[0].get("updated_at").is_some());
    }

    #[tokio::test]
    async fn update_merges_patch_and_bumps_updated_at() {
        let store = StubRecordStore::new();
        let inserted = store
            .insert(
                "budget_items",
                vec![serde_json::json!({ "category": "Venue", "spent": 0.0 })],
            )
            .await
            .unwrap();
        let id = inserted[0]["id"].as_str().unwrap().to_string();

        let updated = store
            .update(
                "budget_items",
                &Filter::new().eq("id", &id),
                serde_json::json!({ "spent": 400.0 }),
            )
            .await
            .unwrap();
        assert_eq!(updated.len(), 1);
        assert_eq!(updated[0]["spent"], 400.0);
        assert_eq!(updated[0]["category"], "Venue");
    }

    #[tokio::test]
    async fn armed_failure_fires_once() {
        let store = StubRecordStore::new();
        store.fail_next_select();
        assert!(store.select("tasks", &Filter::new(), None).await.is_err());
        assert!(store.select("tasks", &Filter::new(), None).await.is_ok());
    }

    #[tokio::test]
    async fn delete_removes_only_matching_rows() {
        let store = StubRecordStore::new();
        store
            .insert(
                "wedding_guests",
                vec![
                    serde_json::json!({ "id": "g1", "name": "Ada" }),
                    serde_json::json!({ "id": "g2", "name": "Grace" }),
                ],
            )
            .await
            .unwrap();
        store
            .delete("wedding_guests", &Filter::new().eq("id", "g1"))
            .await
            .unwrap();
        let rows = store.rows("wedding_guests");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["id"], "g2");
    }

    #[tokio::test]
    async fn sign_up_leaves_account_unconfirmed() {
        let identity = StubIdentityService::new();
        let creds = Credentials::new("ada@example.com", "s3cret-pw");
        identity.sign_up(&creds, "https://app/protected").await.unwrap();
        assert!(identity.is_unconfirmed("ada@example.com"));
        assert!(identity.sign_in(&creds).await.is_err());
    }

    #[tokio::test]
    async fn seeded_user_round_trips_through_session() {
        let identity = StubIdentityService::new();
        let (id, token) = identity.seed_confirmed_user("ada@example.com", "s3cret-pw");
        let user = identity.current_user(&token).await.unwrap();
        assert_eq!(user.id, id);

        identity.sign_out(&token).await.unwrap();
        assert!(identity.current_user(&token).await.is_err());
    }
}
