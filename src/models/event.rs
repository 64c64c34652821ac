//! Outcome events
//!
//! Each completed command yields exactly one event. Failure outcomes that the
//! user can correct (overspending, an over-committed percentage) are events
//! too, so a presentation layer can react without inspecting error values.

use serde::{Deserialize, Serialize};

/// Discrete outcome of a single engine command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetEvent {
    IncomeRecorded,
    FixedExpenseAdded,
    FixedExpenseUpdated,
    FixedExpenseRemoved,
    CategoryAdded,
    CategoryUpdated,
    CategoryRemoved,
    SpendRecorded,
    InvalidSpend,
    InvalidCategoryPercentage,
}

impl BudgetEvent {
    /// Whether this event reports a rejected command
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::InvalidSpend | Self::InvalidCategoryPercentage)
    }
}
