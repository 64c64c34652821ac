//! Read-only projections for presentation
//!
//! Derived entirely from a `BudgetState` snapshot; holds no authority of its
//! own.

use serde::{Deserialize, Serialize};

use super::category::BudgetCategory;
use super::ids::CategoryId;
use super::money::Money;
use super::state::BudgetState;

/// Presentation view of one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub id: CategoryId,
    pub name: String,
    pub percentage: u8,
    pub allocated: Money,
    pub remaining: Money,
    pub spent: Money,
}

impl CategorySummary {
    fn from_category(category: &BudgetCategory) -> Self {
        Self {
            id: category.id,
            name: category.name.clone(),
            percentage: category.percentage,
            allocated: category.allocated_amount,
            remaining: category.remaining_amount,
            spent: category.spent_amount(),
        }
    }
}

/// Presentation view of the whole budget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetSummary {
    pub balance: Money,
    pub total_fixed_expenses: Money,
    pub available_for_allocation: Money,
    pub total_allocated: Money,
    pub total_remaining: Money,
    pub categories: Vec<CategorySummary>,
}

impl BudgetSummary {
    /// Project a snapshot into its presentation view
    pub fn from_state(state: &BudgetState) -> Self {
        Self {
            balance: state.balance,
            total_fixed_expenses: state.total_fixed_expenses(),
            available_for_allocation: state.available_for_allocation(),
            total_allocated: state.total_allocated(),
            total_remaining: state.total_remaining(),
            categories: state
                .categories
                .iter()
                .map(CategorySummary::from_category)
                .collect(),
        }
    }
}
