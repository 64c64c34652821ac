//! Income classification
//!
//! The engine supports two allocation policies, selected per income event.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How an income amount should be spread across categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum IncomeKind {
    /// A regular paycheck: every category's allocation is re-derived from the
    /// full available pool. Spend progress resets with the new cycle.
    #[default]
    Paycheck,

    /// Extra money on top of the cycle (bonus, gift, side income): only the
    /// new amount is distributed, on top of what each category already holds.
    /// Spend progress is preserved.
    Supplemental,
}

impl fmt::Display for IncomeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Paycheck => write!(f, "paycheck"),
            Self::Supplemental => write!(f, "supplemental"),
        }
    }
}
