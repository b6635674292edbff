//! # Owner-Scoped Resource Controller
//!
//! One controller per user-scoped collection. The controller pairs a
//! [`CollectionState`] with the remote store, stamps the owner onto every
//! write, and puts the owner filter on every call — a row can only ever be
//! read, patched, or deleted through a filter that names both the row and
//! its owner.
//!
//! Writes are pessimistic: the local collection changes only after the
//! store confirms, and the stored representation (with its server-assigned
//! id and timestamps) is what gets merged. The single optimistic exception
//! is the checklist toggle, which lives in [`crate::toggle`].

use std::sync::Arc;

use serde_json::Value;

use aisle_client::{Filter, Ordering, RecordStore};
use aisle_core::{
    default_tasks, BudgetItem, Guest, MergeOrder, OwnedRecord, RecordId, Task, UserId, Vendor,
};

use crate::collection::{CollectionState, CollectionStatus};
use crate::error::SyncError;
use crate::notice::Notice;

/// What to do when a load finds no rows for the owner.
#[derive(Debug, Clone, Copy)]
pub enum SeedPolicy<R> {
    /// Empty is empty; most collections start blank.
    None,
    /// Seed a fixed template (the checklist). Applied only when the owner
    /// has zero rows, never merged into existing data.
    Template(fn() -> Vec<R>),
}

/// Synchronized view of one user's rows in one table.
pub struct ResourceController<R: OwnedRecord> {
    store: Arc<dyn RecordStore>,
    owner: UserId,
    ordering: Option<Ordering>,
    seed: SeedPolicy<R>,
    state: CollectionState<R>,
    notice: Option<Notice>,
}

impl<R: OwnedRecord> ResourceController<R> {
    pub fn new(
        store: Arc<dyn RecordStore>,
        owner: UserId,
        seed: SeedPolicy<R>,
        ordering: Option<Ordering>,
    ) -> Self {
        Self {
            store,
            owner,
            ordering,
            seed,
            state: CollectionState::new(),
            notice: None,
        }
    }

    pub fn owner(&self) -> UserId {
        self.owner
    }

    pub fn status(&self) -> CollectionStatus {
        self.state.status()
    }

    pub fn records(&self) -> &[R] {
        self.state.records()
    }

    /// The last load error, when the collection is degraded.
    pub fn load_error(&self) -> Option<&str> {
        self.state.error()
    }

    /// The current notice, if one is posted and unexpired.
    pub fn notice(&self) -> Option<&str> {
        self.notice
            .as_ref()
            .filter(|n| !n.is_expired())
            .map(Notice::message)
    }

    pub(crate) fn post_notice(&mut self, message: &str) {
        self.notice = Some(Notice::new(message));
    }

    pub(crate) fn state_mut(&mut self) -> &mut CollectionState<R> {
        &mut self.state
    }

    pub(crate) fn store(&self) -> &Arc<dyn RecordStore> {
        &self.store
    }

    fn owner_filter(&self) -> Filter {
        Filter::new().eq("user_id", self.owner)
    }

    fn row_filter(&self, id: &RecordId) -> Filter {
        Filter::new().eq("id", id).eq("user_id", self.owner)
    }

    // ─── Load ───────────────────────────────────────────────────────

    /// Load the owner's rows, seeding the template when the collection is
    /// empty and a template policy is set. A load failure parks the
    /// collection in its error state (with the unsaved template as
    /// fallback, when there is one) and surfaces the error; it never
    /// blocks the caller from rendering.
    pub async fn initialize(&mut self) -> Result<(), SyncError> {
        let generation = self.state.begin_load();
        let selected = self
            .store
            .select(R::TABLE, &self.owner_filter(), self.ordering.as_ref())
            .await;

        let rows = match selected {
            Ok(rows) => rows,
            Err(err) => {
                let error = SyncError::Fetch {
                    table: R::TABLE,
                    detail: err.to_string(),
                };
                tracing::warn!(table = R::TABLE, %err, "collection load failed");
                self.state
                    .fail_load(generation, error.to_string(), self.fallback_records());
                return Err(error);
            }
        };

        let mut records = match decode_rows::<R>(rows) {
            Ok(records) => records,
            Err(error) => {
                tracing::warn!(table = R::TABLE, %error, "collection rows failed to decode");
                self.state
                    .fail_load(generation, error.to_string(), self.fallback_records());
                return Err(error);
            }
        };
        if records.is_empty() {
            if let SeedPolicy::Template(template) = self.seed {
                records = self.seed_template(template()).await;
            }
        }
        self.state.complete_load(generation, records);
        Ok(())
    }

    /// User-triggered reload after a failure. The only retry there is.
    pub async fn retry(&mut self) -> Result<(), SyncError> {
        self.initialize().await
    }

    /// Write the template rows for this owner. If the write fails the
    /// locally stamped template is still returned so the user sees a
    /// working checklist, with a notice that it did not persist.
    async fn seed_template(&mut self, template: Vec<R>) -> Vec<R> {
        let mut local = Vec::with_capacity(template.len());
        let mut rows = Vec::with_capacity(template.len());
        for mut record in template {
            record.set_owner(self.owner);
            if let Ok(row) = serde_json::to_value(&record) {
                rows.push(row);
            }
            local.push(record);
        }

        match self.store.insert(R::TABLE, rows).await {
            Ok(stored) => match decode_rows::<R>(stored) {
                Ok(records) if !records.is_empty() => records,
                _ => local,
            },
            Err(err) => {
                tracing::warn!(table = R::TABLE, %err, "template seed did not persist");
                self.post_notice("Your checklist could not be saved yet — showing defaults.");
                local
            }
        }
    }

    fn fallback_records(&self) -> Vec<R> {
        match self.seed {
            SeedPolicy::Template(template) => {
                let mut records = template();
                for record in &mut records {
                    record.set_owner(self.owner);
                }
                records
            }
            SeedPolicy::None => Vec::new(),
        }
    }

    // ─── Writes ─────────────────────────────────────────────────────

    /// Create a row. The owner is stamped here, the store assigns id and
    /// timestamps, and the stored representation is merged at the
    /// collection's fixed merge position.
    pub async fn create(&mut self, mut record: R) -> Result<R, SyncError> {
        record.set_owner(self.owner);
        let row = serde_json::to_value(&record).map_err(|e| write_err::<R>(e))?;
        let stored = self
            .store
            .insert(R::TABLE, vec![row])
            .await
            .map_err(|e| write_err::<R>(e))?;
        let stored = decode_first::<R>(stored)?;

        match R::MERGE_ORDER {
            MergeOrder::Prepend => self.state.records_mut().insert(0, stored.clone()),
            MergeOrder::Append => self.state.records_mut().push(stored.clone()),
        }
        Ok(stored)
    }

    /// Patch a row in place. The filter names both the row and the owner,
    /// and the stored representation replaces the local copy.
    pub async fn update(&mut self, id: &RecordId, patch: Value) -> Result<R, SyncError> {
        let updated = self
            .store
            .update(R::TABLE, &self.row_filter(id), patch)
            .await
            .map_err(|e| write_err::<R>(e))?;
        if updated.is_empty() {
            return Err(SyncError::UnknownRecord {
                table: R::TABLE,
                id: id.to_string(),
            });
        }
        let stored = decode_first::<R>(updated)?;

        if let Some(local) = self
            .state
            .records_mut()
            .iter_mut()
            .find(|r| r.record_id() == Some(id))
        {
            *local = stored.clone();
        }
        Ok(stored)
    }

    /// Delete a row. Confirmation is the caller's responsibility; by the
    /// time this runs the user has already said yes.
    pub async fn destroy(&mut self, id: &RecordId) -> Result<(), SyncError> {
        self.store
            .delete(R::TABLE, &self.row_filter(id))
            .await
            .map_err(|e| write_err::<R>(e))?;
        self.state
            .records_mut()
            .retain(|r| r.record_id() != Some(id));
        Ok(())
    }
}

// ─── Named constructors ─────────────────────────────────────────────

impl ResourceController<Task> {
    /// Checklist controller: template-seeded, stable `task_key` order.
    pub fn tasks(store: Arc<dyn RecordStore>, owner: UserId) -> Self {
        Self::new(
            store,
            owner,
            SeedPolicy::Template(default_tasks),
            Some(Ordering::asc("task_key")),
        )
    }
}

impl ResourceController<Guest> {
    /// Guest list controller: newest first.
    pub fn guests(store: Arc<dyn RecordStore>, owner: UserId) -> Self {
        Self::new(
            store,
            owner,
            SeedPolicy::None,
            Some(Ordering::desc("created_at")),
        )
    }
}

impl ResourceController<Vendor> {
    /// Vendor controller: newest first.
    pub fn vendors(store: Arc<dyn RecordStore>, owner: UserId) -> Self {
        Self::new(
            store,
            owner,
            SeedPolicy::None,
            Some(Ordering::desc("created_at")),
        )
    }
}

impl ResourceController<BudgetItem> {
    /// Budget controller: insertion order.
    pub fn budget_items(store: Arc<dyn RecordStore>, owner: UserId) -> Self {
        Self::new(
            store,
            owner,
            SeedPolicy::None,
            Some(Ordering::asc("created_at")),
        )
    }
}

// ─── Row codecs ─────────────────────────────────────────────────────

fn decode_rows<R: OwnedRecord>(rows: Vec<Value>) -> Result<Vec<R>, SyncError> {
    rows.into_iter()
        .map(|row| {
            serde_json::from_value(row).map_err(|e| SyncError::Fetch {
                table: R::TABLE,
                detail: format!("bad row: {e}"),
            })
        })
        .collect()
}

fn decode_first<R: OwnedRecord>(rows: Vec<Value>) -> Result<R, SyncError> {
    let row = rows.into_iter().next().ok_or_else(|| SyncError::Write {
        table: R::TABLE,
        detail: "store returned no representation".to_string(),
    })?;
    serde_json::from_value(row).map_err(|e| SyncError::Write {
        table: R::TABLE,
        detail: format!("bad row: {e}"),
    })
}

fn write_err<R: OwnedRecord>(err: impl std::fmt::Display) -> SyncError {
    SyncError::Write {
        table: R::TABLE,
        detail: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aisle_client::StubRecordStore;
    use aisle_core::{Guest, RsvpStatus};

    fn store() -> Arc<StubRecordStore> {
        Arc::new(StubRecordStore::new())
    }

    #[tokio::test]
    async fn empty_checklist_is_seeded_once() {
        let store = store();
        let owner = UserId::new();
        let mut controller = ResourceController::tasks(store.clone(), owner);
        controller.initialize().await.unwrap();

        assert_eq!(controller.status(), CollectionStatus::Ready);
        assert_eq!(controller.records().len(), 17);
        assert_eq!(store.rows("tasks").len(), 17);
        for task in controller.records() {
            assert_eq!(task.user_id, Some(owner));
            assert!(task.id.is_some());
        }

        // A second load must not seed again.
        controller.initialize().await.unwrap();
        assert_eq!(store.rows("tasks").len(), 17);
    }

    #[tokio::test]
    async fn existing_tasks_suppress_the_template() {
        let store = store();
        let owner = UserId::new();
        let mut first = ResourceController::tasks(store.clone(), owner);
        first.initialize().await.unwrap();
        first
            .update(
                &first.records()[0].id.unwrap(),
                serde_json::json!({ "completed": true }),
            )
            .await
            .unwrap();

        let mut second = ResourceController::tasks(store.clone(), owner);
        second.initialize().await.unwrap();
        assert_eq!(second.records().len(), 17);
        assert!(second.records().iter().any(|t| t.completed));
    }

    #[tokio::test]
    async fn failed_load_degrades_with_template_fallback() {
        let store = store();
        let owner = UserId::new();
        let mut controller = ResourceController::tasks(store.clone(), owner);
        store.fail_next_select();

        let err = controller.initialize().await.unwrap_err();
        assert!(matches!(err, SyncError::Fetch { table: "tasks", .. }));
        assert_eq!(controller.status(), CollectionStatus::Error);
        assert_eq!(controller.records().len(), 17);
        assert!(controller.load_error().is_some());

        // User-triggered retry recovers.
        controller.retry().await.unwrap();
        assert_eq!(controller.status(), CollectionStatus::Ready);
        assert!(controller.load_error().is_none());
    }

    #[tokio::test]
    async fn undecodable_rows_degrade_like_a_failed_fetch() {
        let store = store();
        let owner = UserId::new();
        // A stored row whose category is outside the closed set.
        store.seed(
            "tasks",
            vec![serde_json::json!({
                "id": RecordId::new(),
                "user_id": owner,
                "task_key": "1",
                "category": "2 Years Out",
                "text": "Dream big",
                "completed": false,
            })],
        );

        let mut controller = ResourceController::tasks(store.clone(), owner);
        let err = controller.initialize().await.unwrap_err();
        assert!(matches!(err, SyncError::Fetch { table: "tasks", .. }));
        assert_eq!(controller.status(), CollectionStatus::Error);
        assert_eq!(controller.records().len(), 17);
        assert!(controller.load_error().is_some());
    }

    #[tokio::test]
    async fn failed_seed_write_still_shows_the_template() {
        let store = store();
        let owner = UserId::new();
        let mut controller = ResourceController::tasks(store.clone(), owner);
        store.fail_next_insert();

        controller.initialize().await.unwrap();
        assert_eq!(controller.status(), CollectionStatus::Ready);
        assert_eq!(controller.records().len(), 17);
        assert!(controller.notice().is_some());
        // Nothing persisted.
        assert!(store.rows("tasks").is_empty());
    }

    #[tokio::test]
    async fn created_guests_merge_newest_first() {
        let store = store();
        let owner = UserId::new();
        let mut controller = ResourceController::guests(store.clone(), owner);
        controller.initialize().await.unwrap();

        let ada = controller
            .create(Guest::new(owner, "Ada", "ada@example.com"))
            .await
            .unwrap();
        let grace = controller
            .create(Guest::new(owner, "Grace", "grace@example.com"))
            .await
            .unwrap();

        assert_eq!(controller.records()[0].id, grace.id);
        assert_eq!(controller.records()[1].id, ada.id);
        assert_eq!(ada.rsvp_status, RsvpStatus::Pending);
        assert_eq!(ada.meal_choice, "N/A");
    }

    #[tokio::test]
    async fn destroy_removes_only_the_named_row() {
        let store = store();
        let owner = UserId::new();
        let mut controller = ResourceController::guests(store.clone(), owner);
        controller.initialize().await.unwrap();

        let ada = controller.create(Guest::new(owner, "Ada", "ada@example.com")).await.unwrap();
        controller.create(Guest::new(owner, "Grace", "grace@example.com")).await.unwrap();

        controller.destroy(&ada.id.unwrap()).await.unwrap();
        assert_eq!(controller.records().len(), 1);
        assert_eq!(store.rows("wedding_guests").len(), 1);
    }

    #[tokio::test]
    async fn failed_destroy_keeps_the_local_record() {
        let store = store();
        let owner = UserId::new();
        let mut controller = ResourceController::guests(store.clone(), owner);
        controller.initialize().await.unwrap();
        let ada = controller.create(Guest::new(owner, "Ada", "ada@example.com")).await.unwrap();

        store.fail_next_delete();
        let err = controller.destroy(&ada.id.unwrap()).await.unwrap_err();
        assert!(matches!(err, SyncError::Write { table: "wedding_guests", .. }));
        assert_eq!(controller.records().len(), 1);
        assert_eq!(controller.records()[0].name, "Ada");
        assert_eq!(store.rows("wedding_guests").len(), 1);
    }

    #[tokio::test]
    async fn update_of_missing_row_is_unknown_record() {
        let store = store();
        let owner = UserId::new();
        let mut controller = ResourceController::guests(store.clone(), owner);
        controller.initialize().await.unwrap();

        let err = controller
            .update(&RecordId::new(), serde_json::json!({ "name": "Nobody" }))
            .await
            .unwrap_err();
        assert!(matches!(err, SyncError::UnknownRecord { .. }));
    }

    #[tokio::test]
    async fn failed_write_leaves_the_collection_untouched() {
        let store = store();
        let owner = UserId::new();
        let mut controller = ResourceController::guests(store.clone(), owner);
        controller.initialize().await.unwrap();
        controller.create(Guest::new(owner, "Ada", "ada@example.com")).await.unwrap();

        store.fail_next_insert();
        let err = controller.create(Guest::new(owner, "Grace", "grace@example.com")).await;
        assert!(err.is_err());
        assert_eq!(controller.records().len(), 1);
    }
}
