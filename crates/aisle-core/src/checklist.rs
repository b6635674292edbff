//! # Checklist Tasks and Planning Phases
//!
//! The wedding checklist is a fixed-shape collection: seven ordered planning
//! phases and a 17-task default template seeded once per owner. Categories
//! form a closed enumeration — ordering is never inferred from data, and
//! phases with no tasks are skipped, never reordered.

use serde::{Deserialize, Serialize};

use crate::identity::{RecordId, TaskKey, UserId};
use crate::record::{MergeOrder, OwnedRecord};
use crate::temporal::Timestamp;

// ─── Planning Phases ────────────────────────────────────────────────

/// The seven planning phases, ordered from earliest to the wedding week.
///
/// Serialized with the exact labels the remote store uses, so rows written
/// by earlier versions of the application deserialize unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum TaskCategory {
    /// 12 or more months before the wedding.
    #[serde(rename = "12+ Months Out")]
    TwelvePlusMonths = 1,
    /// 12 to 9 months out.
    #[serde(rename = "12-9 Months Out")]
    TwelveToNineMonths = 2,
    /// 9 to 6 months out.
    #[serde(rename = "9-6 Months Out")]
    NineToSixMonths = 3,
    /// 6 to 3 months out.
    #[serde(rename = "6-3 Months Out")]
    SixToThreeMonths = 4,
    /// 3 months to 1 month out.
    #[serde(rename = "3-1 Months Out")]
    ThreeToOneMonths = 5,
    /// The final month.
    #[serde(rename = "1 Month Out")]
    OneMonth = 6,
    /// The wedding week itself.
    #[serde(rename = "Week Of")]
    WeekOf = 7,
}

impl TaskCategory {
    /// Total number of planning phases.
    pub const PHASE_COUNT: u8 = 7;

    /// All phases in display order.
    pub const ORDERED: [TaskCategory; 7] = [
        Self::TwelvePlusMonths,
        Self::TwelveToNineMonths,
        Self::NineToSixMonths,
        Self::SixToThreeMonths,
        Self::ThreeToOneMonths,
        Self::OneMonth,
        Self::WeekOf,
    ];

    /// The numeric phase position (1-7).
    pub fn number(&self) -> u8 {
        *self as u8
    }

    /// The label stored in the `category` column.
    pub fn label(&self) -> &'static str {
        match self {
            Self::TwelvePlusMonths => "12+ Months Out",
            Self::TwelveToNineMonths => "12-9 Months Out",
            Self::NineToSixMonths => "9-6 Months Out",
            Self::SixToThreeMonths => "6-3 Months Out",
            Self::ThreeToOneMonths => "3-1 Months Out",
            Self::OneMonth => "1 Month Out",
            Self::WeekOf => "Week Of",
        }
    }
}

impl std::fmt::Display for TaskCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// ─── Task Record ────────────────────────────────────────────────────

/// One checklist task, owned by a single user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Server-assigned row id, absent on unsaved template rows.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    /// Owner, absent only on unsaved template rows.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
    /// Stable key, unique per owner (template keys "1" through "17").
    pub task_key: TaskKey,
    /// Planning phase.
    pub category: TaskCategory,
    /// Display text.
    pub text: String,
    /// Completion flag — the one optimistically toggled field.
    pub completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
}

impl Task {
    /// An unsaved template task.
    fn template(key: &str, category: TaskCategory, text: &str) -> Self {
        Self {
            id: None,
            user_id: None,
            task_key: TaskKey::new(key),
            category,
            text: text.to_string(),
            completed: false,
            created_at: None,
            updated_at: None,
        }
    }
}

impl OwnedRecord for Task {
    const TABLE: &'static str = "tasks";
    const MERGE_ORDER: MergeOrder = MergeOrder::Append;

    fn record_id(&self) -> Option<&RecordId> {
        self.id.as_ref()
    }

    fn owner(&self) -> Option<&UserId> {
        self.user_id.as_ref()
    }

    fn set_owner(&mut self, owner: UserId) {
        self.user_id = Some(owner);
    }
}

// ─── Seed Template ──────────────────────────────────────────────────

/// The fixed default checklist: 17 tasks across the 7 phases, seeded once
/// for an owner with no existing tasks. Never applied to an owner that
/// already has any task rows.
pub fn default_tasks() -> Vec<Task> {
    use TaskCategory::*;
    vec![
        Task::template("1", TwelvePlusMonths, "Set a budget"),
        Task::template("2", TwelvePlusMonths, "Choose your wedding party"),
        Task::template("3", TwelvePlusMonths, "Create a guest list"),
        Task::template("4", TwelveToNineMonths, "Book your venue"),
        Task::template("5", TwelveToNineMonths, "Hire a wedding planner"),
        Task::template("6", TwelveToNineMonths, "Choose your wedding dress"),
        Task::template("7", NineToSixMonths, "Send save-the-dates"),
        Task::template("8", NineToSixMonths, "Book photographer & videographer"),
        Task::template("9", NineToSixMonths, "Plan honeymoon"),
        Task::template("10", SixToThreeMonths, "Choose wedding rings"),
        Task::template("11", SixToThreeMonths, "Finalize menu with caterer"),
        Task::template("12", ThreeToOneMonths, "Send out invitations"),
        Task::template("13", ThreeToOneMonths, "Get marriage license"),
        Task::template("14", OneMonth, "Final dress fitting"),
        Task::template("15", OneMonth, "Confirm all vendors"),
        Task::template("16", WeekOf, "Pick up wedding rings"),
        Task::template("17", WeekOf, "Relax and enjoy!"),
    ]
}

// ─── Derived Values ─────────────────────────────────────────────────

/// Overall checklist completion, recomputed on every render.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChecklistProgress {
    /// Number of completed tasks.
    pub completed: usize,
    /// Total number of tasks.
    pub total: usize,
    /// Completion percentage, 0 when there are no tasks.
    pub percent: f64,
}

impl ChecklistProgress {
    /// Compute progress over a task collection.
    pub fn of(tasks: &[Task]) -> Self {
        let total = tasks.len();
        let completed = tasks.iter().filter(|t| t.completed).count();
        let percent = if total > 0 {
            completed as f64 / total as f64 * 100.0
        } else {
            0.0
        };
        Self {
            completed,
            total,
            percent,
        }
    }
}

/// Group tasks by phase in the fixed phase order.
///
/// Phases with no tasks are skipped; the relative order of tasks within a
/// phase is preserved from the input.
pub fn group_by_category(tasks: &[Task]) -> Vec<(TaskCategory, Vec<&Task>)> {
    TaskCategory::ORDERED
        .iter()
        .filter_map(|category| {
            let phase_tasks: Vec<&Task> =
                tasks.iter().filter(|t| t.category == *category).collect();
            if phase_tasks.is_empty() {
                None
            } else {
                Some((*category, phase_tasks))
            }
        })
        .collect()
}
