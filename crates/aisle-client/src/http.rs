//! # HTTP Implementations
//!
//! reqwest-backed clients for the hosted identity service and record
//! store. Each wraps a `reqwest::Client` with the project API key as a
//! default header and a finite per-request timeout; both are `Send + Sync`
//! and designed to be shared via `Arc` across async tasks.
//!
//! Authorization: the project API key travels in the `apikey` header on
//! every request; user-session endpoints additionally send the session's
//! bearer token. Row-level ownership is enforced by the explicit
//! `user_id` filter on every store call.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::config::ClientConfig;
use crate::error::{IdentityError, StoreError};
use crate::identity::{AuthUser, Credentials, IdentityService, Session};
use crate::store::{Filter, Ordering, RecordStore};

fn build_client(config: &ClientConfig) -> Result<reqwest::Client, String> {
    let mut headers = reqwest::header::HeaderMap::new();
    headers.insert(
        "apikey",
        reqwest::header::HeaderValue::from_str(&config.api_key)
            .map_err(|_| "invalid API key characters".to_string())?,
    );
    headers.insert(
        reqwest::header::CONTENT_TYPE,
        reqwest::header::HeaderValue::from_static("application/json"),
    );
    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .default_headers(headers)
        .build()
        .map_err(|e| format!("failed to build HTTP client: {e}"))
}

// ─── Identity Client ────────────────────────────────────────────────

/// HTTP client for the hosted identity service.
#[derive(Debug)]
pub struct HttpIdentityClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpIdentityClient {
    /// Build a client from configuration.
    pub fn new(config: &ClientConfig) -> Result<Self, IdentityError> {
        let client = build_client(config).map_err(|detail| IdentityError::Api {
            endpoint: config.identity_base_url.clone(),
            status: 0,
            body: detail,
        })?;
        Ok(Self {
            client,
            base_url: config.identity_base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn send(
        &self,
        request: reqwest::RequestBuilder,
        endpoint: &str,
    ) -> Result<reqwest::Response, IdentityError> {
        request.send().await.map_err(|source| IdentityError::Http {
            endpoint: endpoint.to_string(),
            source,
        })
    }
}

#[async_trait]
impl IdentityService for HttpIdentityClient {
    async fn sign_in(&self, credentials: &Credentials) -> Result<Session, IdentityError> {
        let endpoint = self.endpoint("/token?grant_type=password");
        let body = serde_json::json!({
            "email": credentials.email,
            "password": &*credentials.password,
        });
        let resp = self
            .send(self.client.post(&endpoint).json(&body), &endpoint)
            .await?;

        let status = resp.status();
        if status.is_client_error() {
            let body = resp.text().await.unwrap_or_default();
            return Err(IdentityError::InvalidCredentials {
                detail: extract_error_detail(&body)
                    .unwrap_or_else(|| "invalid e-mail or password".to_string()),
            });
        }
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(IdentityError::Api {
                endpoint,
                status: status.as_u16(),
                body,
            });
        }
        resp.json()
            .await
            .map_err(|source| IdentityError::Deserialization { endpoint, source })
    }

    async fn sign_up(
        &self,
        credentials: &Credentials,
        redirect_to: &str,
    ) -> Result<(), IdentityError> {
        let endpoint = self.endpoint("/signup");
        let body = serde_json::json!({
            "email": credentials.email,
            "password": &*credentials.password,
        });
        let resp = self
            .send(
                self.client
                    .post(&endpoint)
                    .query(&[("redirect_to", redirect_to)])
                    .json(&body),
                &endpoint,
            )
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(IdentityError::Api {
                endpoint,
                status: status.as_u16(),
                body: extract_error_detail(&body).unwrap_or(body),
            });
        }
        Ok(())
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), IdentityError> {
        let endpoint = self.endpoint("/logout");
        let resp = self
            .send(
                self.client.post(&endpoint).bearer_auth(access_token),
                &endpoint,
            )
            .await?;

        // An already-expired token is still a successful logout.
        let status = resp.status();
        if status.is_success() || status == reqwest::StatusCode::UNAUTHORIZED {
            Ok(())
        } else {
            let body = resp.text().await.unwrap_or_default();
            Err(IdentityError::Api {
                endpoint,
                status: status.as_u16(),
                body,
            })
        }
    }

    async fn request_password_reset(
        &self,
        email: &str,
        redirect_to: &str,
    ) -> Result<(), IdentityError> {
        let endpoint = self.endpoint("/recover");
        let resp = self
            .send(
                self.client
                    .post(&endpoint)
                    .query(&[("redirect_to", redirect_to)])
                    .json(&serde_json::json!({ "email": email })),
                &endpoint,
            )
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(IdentityError::Api {
                endpoint,
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }

    async fn current_user(&self, access_token: &str) -> Result<AuthUser, IdentityError> {
        let endpoint = self.endpoint("/user");
        let resp = self
            .send(
                self.client.get(&endpoint).bearer_auth(access_token),
                &endpoint,
            )
            .await?;

        let status = resp.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            let body = resp.text().await.unwrap_or_default();
            return Err(IdentityError::Unauthenticated {
                detail: extract_error_detail(&body)
                    .unwrap_or_else(|| "missing or expired session token".to_string()),
            });
        }
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(IdentityError::Api {
                endpoint,
                status: status.as_u16(),
                body,
            });
        }
        resp.json()
            .await
            .map_err(|source| IdentityError::Deserialization { endpoint, source })
    }
}

/// Pull the human-readable message out of an identity error body, which
/// arrives as `{"error_description": ...}` or `{"msg": ...}`.
fn extract_error_detail(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    ["error_description", "msg", "message"]
        .iter()
        .find_map(|key| value.get(key).and_then(Value::as_str))
        .map(str::to_string)
}

// ─── Record Store Client ────────────────────────────────────────────

/// HTTP client for the hosted record store.
#[derive(Debug)]
pub struct HttpRecordStore {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl HttpRecordStore {
    /// Build a client from configuration.
    pub fn new(config: &ClientConfig) -> Result<Self, StoreError> {
        let client = build_client(config).map_err(|detail| StoreError::Api {
            table: String::new(),
            status: 0,
            body: detail,
        })?;
        Ok(Self {
            client,
            base_url: config.store_base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/{table}", self.base_url)
    }

    async fn check(
        &self,
        resp: Result<reqwest::Response, reqwest::Error>,
        table: &str,
        endpoint: &str,
    ) -> Result<reqwest::Response, StoreError> {
        let resp = resp.map_err(|source| StoreError::Http {
            endpoint: endpoint.to_string(),
            source,
        })?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            tracing::warn!(table, status = status.as_u16(), "record store call failed");
            return Err(StoreError::Api {
                table: table.to_string(),
                status: status.as_u16(),
                body,
            });
        }
        Ok(resp)
    }

    async fn rows(&self, resp: reqwest::Response, table: &str) -> Result<Vec<Value>, StoreError> {
        resp.json()
            .await
            .map_err(|source| StoreError::Deserialization {
                table: table.to_string(),
                source,
            })
    }
}

#[async_trait]
impl RecordStore for HttpRecordStore {
    async fn select(
        &self,
        table: &str,
        filter: &Filter,
        order: Option<&Ordering>,
    ) -> Result<Vec<Value>, StoreError> {
        let endpoint = self.table_url(table);
        let mut query = filter.to_query();
        query.push(("select".to_string(), "*".to_string()));
        if let Some(order) = order {
            query.push(order.to_query());
        }
        let resp = self
            .client
            .get(&endpoint)
            .bearer_auth(&self.api_key)
            .query(&query)
            .send()
            .await;
        let resp = self.check(resp, table, &endpoint).await?;
        self.rows(resp, table).await
    }

    async fn insert(&self, table: &str, rows: Vec<Value>) -> Result<Vec<Value>, StoreError> {
        let endpoint = self.table_url(table);
        let resp = self
            .client
            .post(&endpoint)
            .bearer_auth(&self.api_key)
            .header("Prefer", "return=representation")
            .json(&rows)
            .send()
            .await;
        let resp = self.check(resp, table, &endpoint).await?;
        self.rows(resp, table).await
    }

    async fn update(
        &self,
        table: &str,
        filter: &Filter,
        patch: Value,
    ) -> Result<Vec<Value>, StoreError> {
        let endpoint = self.table_url(table);
        let resp = self
            .client
            .patch(&endpoint)
            .bearer_auth(&self.api_key)
            .header("Prefer", "return=representation")
            .query(&filter.to_query())
            .json(&patch)
            .send()
            .await;
        let resp = self.check(resp, table, &endpoint).await?;
        self.rows(resp, table).await
    }

    async fn delete(&self, table: &str, filter: &Filter) -> Result<(), StoreError> {
        let endpoint = self.table_url(table);
        let resp = self
            .client
            .delete(&endpoint)
            .bearer_auth(&self.api_key)
            .query(&filter.to_query())
            .send()
            .await;
        self.check(resp, table, &endpoint).await?;
        Ok(())
    }
}
