//! # Budget Items and Budget Summary
//!
//! Budget categories are free text (unlike checklist phases). The summary
//! values are pure functions over the in-memory collection, recomputed on
//! every render and never persisted.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::identity::{RecordId, UserId};
use crate::record::{MergeOrder, OwnedRecord};
use crate::temporal::Timestamp;

/// One budget line item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
    /// Free-text category label ("Venue", "Catering", ...).
    pub category: String,
    /// Amount set aside for this category.
    pub allocated: f64,
    /// Amount spent so far.
    pub spent: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
}

impl BudgetItem {
    /// A new unsaved item. `spent` starts equal to `allocated`, matching
    /// how items have always been created in this application.
    pub fn new(owner: UserId, category: impl Into<String>, allocated: f64) -> Self {
        Self {
            id: None,
            user_id: Some(owner),
            category: category.into(),
            allocated,
            spent: allocated,
            created_at: None,
            updated_at: None,
        }
    }

    /// Validate a prospective item before it is written.
    pub fn validate(category: &str, allocated: f64) -> Result<(), ValidationError> {
        if category.trim().is_empty() {
            return Err(ValidationError::EmptyField {
                field: "category".to_string(),
            });
        }
        if allocated < 0.0 || !allocated.is_finite() {
            return Err(ValidationError::NegativeAmount {
                field: "allocated".to_string(),
                value: allocated,
            });
        }
        Ok(())
    }
}

impl OwnedRecord for BudgetItem {
    const TABLE: &'static str = "budget_items";
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

// ─── Derived Values ─────────────────────────────────────────────────

/// Derived budget totals for one owner's items against their estimated
/// budget from the profile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BudgetSummary {
    /// Sum of allocations across all items.
    pub total_allocated: f64,
    /// Sum of spending across all items.
    pub total_spent: f64,
    /// Estimated budget minus total allocated. May go negative when the
    /// owner overcommits; the page renders that state distinctly.
    pub remaining: f64,
    /// Spent as a percentage of the estimated budget. Zero whenever the
    /// estimated budget is zero or negative — never a division by zero.
    pub percent_spent: f64,
}

impl BudgetSummary {
    /// Compute the summary for a collection of items.
    pub fn of(items: &[BudgetItem], estimated_budget: f64) -> Self {
        let total_allocated: f64 = items.iter().map(|i| i.allocated).sum();
        let total_spent: f64 = items.iter().map(|i| i.spent).sum();
        let percent_spent = if estimated_budget > 0.0 {
            total_spent / estimated_budget * 100.0
        } else {
            0.0
        };
        Self {
            total_allocated,
            total_spent,
            remaining: estimated_budget - total_allocated,
            percent_spent,
        }
    }

    /// Whether allocations exceed the estimated budget.
    pub fn overcommitted(&self) -> bool {
        self.remaining < 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(category: &str, allocated: f64, spent: f64) -> BudgetItem {
        BudgetItem {
            id: Some(RecordId::new()),
            user_id: Some(UserId::new()),
            category: category.to_string(),
            allocated,
            spent,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn summary_scenario() {
        // One item {allocated: 1000, spent: 400} against a 5000 budget.
        let items = vec![item("Venue", 1000.0, 400.0)];
        let summary = BudgetSummary::of(&items, 5000.0);
        assert_eq!(summary.total_allocated, 1000.0);
        assert_eq!(summary.total_spent, 400.0);
        assert_eq!(summary.remaining, 4000.0);
        assert_eq!(summary.percent_spent, 8.0);
        assert!(!summary.overcommitted());
    }

    #[test]
    fn percent_spent_is_zero_for_zero_budget() {
        let items = vec![item("Venue", 1000.0, 400.0)];
        assert_eq!(BudgetSummary::of(&items, 0.0).percent_spent, 0.0);
    }

    #[test]
    fn percent_spent_is_zero_for_negative_budget() {
        let items = vec![item("Venue", 1000.0, 400.0)];
        assert_eq!(BudgetSummary::of(&items, -50.0).percent_spent, 0.0);
    }

    #[test]
    fn remaining_goes_negative_when_overcommitted() {
        let items = vec![item("Venue", 4000.0, 0.0), item("Catering", 3000.0, 0.0)];
        let summary = BudgetSummary::of(&items, 5000.0);
        assert_eq!(summary.remaining, -2000.0);
        assert!(summary.overcommitted());
    }

    #[test]
    fn empty_collection_sums_to_zero() {
        let summary = BudgetSummary::of(&[], 5000.0);
        assert_eq!(summary.total_allocated, 0.0);
        assert_eq!(summary.total_spent, 0.0);
        assert_eq!(summary.remaining, 5000.0);
        assert_eq!(summary.percent_spent, 0.0);
    }

    #[test]
    fn new_item_spends_its_allocation() {
        let owner = UserId::new();
        let item = BudgetItem::new(owner, "Flowers", 800.0);
        assert_eq!(item.spent, 800.0);
        assert_eq!(item.user_id, Some(owner));
        assert!(item.id.is_none());
    }

    #[test]
    fn validation_rejects_blank_category_and_negative_amount() {
        assert!(BudgetItem::validate("", 100.0).is_err());
        assert!(BudgetItem::validate("   ", 100.0).is_err());
        assert!(BudgetItem::validate("Venue", -1.0).is_err());
        assert!(BudgetItem::validate("Venue", f64::NAN).is_err());
        assert!(BudgetItem::validate("Venue", 0.0).is_ok());
    }
}
