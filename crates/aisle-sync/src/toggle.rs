//! # Optimistic Checklist Toggle
//!
//! Toggling a checklist task flips the local flag immediately, then
//! settles the write against the store. Success posts the transient
//! "Changes saved!" notice; failure rolls the flag back to the captured
//! snapshot, so a user never keeps a state the store rejected.
//!
//! The toggle is split into `begin` (capture and flip) and `settle`
//! (write and confirm or roll back) so the window between the two is an
//! explicit, testable thing rather than an accident of scheduling.
//! Concurrent toggles of the same task are intentionally unsequenced:
//! each settles against its own snapshot.

use aisle_client::Filter;
use aisle_core::{OwnedRecord, Task, TaskKey};

use crate::controller::ResourceController;
use crate::error::SyncError;

/// Snapshot of one in-flight toggle.
#[derive(Debug, Clone)]
pub struct ToggleCommand {
    task_key: TaskKey,
    previous: bool,
}

impl ToggleCommand {
    pub fn task_key(&self) -> &TaskKey {
        &self.task_key
    }

    /// The completion flag as it was when the toggle began.
    pub fn previous(&self) -> bool {
        self.previous
    }

    /// The flag value this toggle is writing.
    pub fn desired(&self) -> bool {
        !self.previous
    }
}

impl ResourceController<Task> {
    /// Capture the task's current flag and flip it locally. Returns
    /// `None` when no task has the key.
    pub fn begin_toggle(&mut self, task_key: &TaskKey) -> Option<ToggleCommand> {
        let task = self
            .state_mut()
            .records_mut()
            .iter_mut()
            .find(|t| &t.task_key == task_key)?;
        let previous = task.completed;
        task.completed = !previous;
        Some(ToggleCommand {
            task_key: task_key.clone(),
            previous,
        })
    }

    /// Settle a toggle against the store. On success the stored row
    /// replaces the local one and the saved notice is posted; on failure
    /// the local flag is rolled back to the command's snapshot and the
    /// error is returned.
    pub async fn settle_toggle(&mut self, command: ToggleCommand) -> Result<(), SyncError> {
        let filter = Filter::new()
            .eq("task_key", command.task_key.as_str())
            .eq("user_id", self.owner());
        let patch = serde_json::json!({ "completed": command.desired() });

        let result = self.store().update(Task::TABLE, &filter, patch).await;
        match result {
            Ok(rows) => {
                if let Some(stored) = rows
                    .into_iter()
                    .next()
                    .and_then(|row| serde_json::from_value::<Task>(row).ok())
                {
                    if let Some(local) = self
                        .state_mut()
                        .records_mut()
                        .iter_mut()
                        .find(|t| t.task_key == command.task_key)
                    {
                        *local = stored;
                    }
                }
                self.post_notice("Changes saved!");
                Ok(())
            }
            Err(err) => {
                self.rollback(&command);
                Err(SyncError::Write {
                    table: Task::TABLE,
                    detail: err.to_string(),
                })
            }
        }
    }

    /// Flip a task and settle it in one call.
    pub async fn toggle_completion(&mut self, task_key: &TaskKey) -> Result<(), SyncError> {
        let command = self
            .begin_toggle(task_key)
            .ok_or_else(|| SyncError::UnknownRecord {
                table: Task::TABLE,
                id: task_key.to_string(),
            })?;
        self.settle_toggle(command).await
    }

    fn rollback(&mut self, command: &ToggleCommand) {
        if let Some(task) = self
            .state_mut()
            .records_mut()
            .iter_mut()
            .find(|t| t.task_key == command.task_key)
        {
            task.completed = command.previous;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use aisle_client::StubRecordStore;
    use aisle_core::UserId;

    use super::*;

    async fn seeded_controller() -> (Arc<StubRecordStore>, ResourceController<Task>) {
        let store = Arc::new(StubRecordStore::new());
        let owner = UserId::new();
        let mut controller = ResourceController::tasks(store.clone(), owner);
        controller.initialize().await.unwrap();
        (store, controller)
    }

    fn completed(controller: &ResourceController<Task>, key: &str) -> bool {
        controller
            .records()
            .iter()
            .find(|t| t.task_key.as_str() == key)
            .map(|t| t.completed)
            .unwrap()
    }

    #[tokio::test]
    async fn successful_toggle_persists_and_posts_the_notice() {
        let (store, mut controller) = seeded_controller().await;
        let key = TaskKey::new("4");

        controller.toggle_completion(&key).await.unwrap();
        assert!(completed(&controller, "4"));
        assert_eq!(controller.notice(), Some("Changes saved!"));

        let persisted = store
            .rows("tasks")
            .into_iter()
            .find(|r| r["task_key"] == "4")
            .unwrap();
        assert_eq!(persisted["completed"], true);
    }

    #[tokio::test]
    async fn failed_toggle_rolls_back_to_the_snapshot() {
        let (store, mut controller) = seeded_controller().await;
        let key = TaskKey::new("4");

        store.fail_next_update();
        let err = controller.toggle_completion(&key).await;
        assert!(err.is_err());
        assert!(!completed(&controller, "4"));
        assert!(controller.notice().is_none());

        let persisted = store
            .rows("tasks")
            .into_iter()
            .find(|r| r["task_key"] == "4")
            .unwrap();
        assert_eq!(persisted["completed"], false);
    }

    #[tokio::test]
    async fn double_toggle_returns_to_the_original_state() {
        let (store, mut controller) = seeded_controller().await;
        let key = TaskKey::new("9");

        controller.toggle_completion(&key).await.unwrap();
        controller.toggle_completion(&key).await.unwrap();
        assert!(!completed(&controller, "9"));

        let persisted = store
            .rows("tasks")
            .into_iter()
            .find(|r| r["task_key"] == "9")
            .unwrap();
        assert_eq!(persisted["completed"], false);
    }

    #[tokio::test]
    async fn overlapping_toggles_settle_against_their_own_snapshots() {
        let (store, mut controller) = seeded_controller().await;
        let key = TaskKey::new("7");

        // Two toggles begin before either settles. The first one's write
        // fails, and its rollback restores ITS snapshot — the second
        // toggle's flip is lost. Unsequenced by design.
        let first = controller.begin_toggle(&key).unwrap();
        let second = controller.begin_toggle(&key).unwrap();
        assert!(!first.previous());
        assert!(second.previous());

        controller.settle_toggle(second).await.unwrap();
        store.fail_next_update();
        assert!(controller.settle_toggle(first).await.is_err());

        assert!(!completed(&controller, "7"));
    }

    #[tokio::test]
    async fn toggling_an_unknown_key_is_an_error() {
        let (_store, mut controller) = seeded_controller().await;
        let err = controller
            .toggle_completion(&TaskKey::new("99"))
            .await
            .unwrap_err();
        assert!(matches!(err, SyncError::UnknownRecord { .. }));
    }
}
