//! # Record Store Seam
//!
//! Trait interface for the per-table CRUD service. Rows cross this seam as
//! raw JSON values; the synchronization layer owns the typed conversion.
//! Filters are equality-only — that is all the application ever needs, and
//! the owner filter (`user_id = <owner>`) is on every call as the
//! defense-in-depth ownership check.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::StoreError;

/// Equality filter over row columns.
#[derive(Debug, Clone, Default)]
pub struct Filter {
    clauses: Vec<(String, String)>,
}

impl Filter {
    /// An empty filter (matches every row).
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an equality clause.
    pub fn eq(mut self, column: impl Into<String>, value: impl ToString) -> Self {
        self.clauses.push((column.into(), value.to_string()));
        self
    }

    /// The clauses as `(column, value)` pairs.
    pub fn clauses(&self) -> impl Iterator<Item = (&str, &str)> {
        self.clauses.iter().map(|(c, v)| (c.as_str(), v.as_str()))
    }

    /// Wire form: `(column, "eq.value")` query pairs.
    pub fn to_query(&self) -> Vec<(String, String)> {
        self.clauses
            .iter()
            .map(|(column, value)| (column.clone(), format!("eq.{value}")))
            .collect()
    }

    /// Whether a JSON row satisfies every clause. Used by the in-memory
    /// stub, which matches against the same string form the wire uses.
    pub fn matches(&self, row: &Value) -> bool {
        self.clauses.iter().all(|(column, value)| {
            match row.get(column) {
                Some(Value::String(s)) => s == value,
                Some(other) => other.to_string() == *value,
                None => false,
            }
        })
    }
}

/// Column ordering for reads.
#[derive(Debug, Clone)]
pub struct Ordering {
    pub column: String,
    pub ascending: bool,
}

impl Ordering {
    /// Ascending order on a column.
    pub fn asc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            ascending: true,
        }
    }

    /// Descending order on a column.
    pub fn desc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            ascending: false,
        }
    }

    /// Wire form: `("order", "column.asc")`.
    pub fn to_query(&self) -> (String, String) {
        let direction = if self.ascending { "asc" } else { "desc" };
        ("order".to_string(), format!("{}.{direction}", self.column))
    }
}

/// The per-table CRUD service.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Read all rows matching the filter, optionally ordered.
    async fn select(
        &self,
        table: &str,
        filter: &Filter,
        order: Option<&Ordering>,
    ) -> Result<Vec<Value>, StoreError>;

    /// Insert rows, returning the stored representations (with
    /// server-assigned ids and timestamps).
    async fn insert(&self, table: &str, rows: Vec<Value>) -> Result<Vec<Value>, StoreError>;

    /// Patch all rows matching the filter, returning the updated rows.
    async fn update(
        &self,
        table: &str,
        filter: &Filter,
        patch: Value,
    ) -> Result<Vec<Value>, StoreError>;

    /// Delete all rows matching the filter.
    async fn delete(&self, table: &str, filter: &Filter) -> Result<(), StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_wire_form() {
        let filter = Filter::new().eq("user_id", "u-1").eq("task_key", "7");
        assert_eq!(
            filter.to_query(),
            vec![
                ("user_id".to_string(), "eq.u-1".to_string()),
                ("task_key".to_string(), "eq.7".to_string()),
            ]
        );
    }

    #[test]
    fn filter_matches_string_bool_and_number_columns() {
        let row = serde_json::json!({
            "user_id": "u-1",
            "completed": false,
            "allocated": 1000.0
        });
        assert!(Filter::new().eq("user_id", "u-1").matches(&row));
        assert!(Filter::new().eq("completed", false).matches(&row));
        assert!(!Filter::new().eq("user_id", "u-2").matches(&row));
        assert!(!Filter::new().eq("missing", "x").matches(&row));
    }

    #[test]
    fn ordering_wire_form() {
        assert_eq!(
            Ordering::asc("task_key").to_query(),
            ("order".to_string(), "task_key.asc".to_string())
        );
        assert_eq!(
            Ordering::desc("created_at").to_query(),
            ("order".to_string(), "created_at.desc".to_string())
        );
    }
}
