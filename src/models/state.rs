//! The budget state snapshot
//!
//! `BudgetState` is the aggregate root. Commands never mutate a snapshot in
//! place; they build a new one and the engine swaps it in after the new
//! snapshot has been persisted. Element order in `fixed_expenses` and
//! `categories` is insertion order - the proration tie-break depends on it.

use serde::{Deserialize, Serialize};

use super::category::BudgetCategory;
use super::expense::FixedExpense;
use super::ids::{CategoryId, ExpenseId};
use super::money::Money;

/// Immutable snapshot of the whole budget
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BudgetState {
    /// Running balance: income received minus bills paid and spending recorded
    #[serde(default)]
    pub balance: Money,

    /// Recurring expenses, in insertion order
    #[serde(default)]
    pub fixed_expenses: Vec<FixedExpense>,

    /// Spending categories, in insertion order
    #[serde(default)]
    pub categories: Vec<BudgetCategory>,
}

impl BudgetState {
    /// Sum of all fixed expense amounts (one cycle each)
    pub fn total_fixed_expenses(&self) -> Money {
        self.fixed_expenses.iter().map(|e| e.amount).sum()
    }

    /// Funds available to spread across categories: balance minus one cycle
    /// of every fixed expense, never below zero
    pub fn available_for_allocation(&self) -> Money {
        (self.balance - self.total_fixed_expenses()).floor_at_zero()
    }

    /// Sum of all category allocations
    pub fn total_allocated(&self) -> Money {
        self.categories.iter().map(|c| c.allocated_amount).sum()
    }

    /// Sum of all category remaining funds
    pub fn total_remaining(&self) -> Money {
        self.categories.iter().map(|c| c.remaining_amount).sum()
    }

    /// Sum of all category percentages
    pub fn total_percentage(&self) -> u32 {
        self.categories.iter().map(|c| c.percentage as u32).sum()
    }

    /// Sum of category percentages excluding one category
    pub fn percentage_of_others(&self, excluded: CategoryId) -> u32 {
        self.categories
            .iter()
            .filter(|c| c.id != excluded)
            .map(|c| c.percentage as u32)
            .sum()
    }

    /// Look up a category by id
    pub fn category(&self, id: CategoryId) -> Option<&BudgetCategory> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Look up a fixed expense by id
    pub fn fixed_expense(&self, id: ExpenseId) -> Option<&FixedExpense> {
        self.fixed_expenses.iter().find(|e| e.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_state() -> BudgetState {
        let mut state = BudgetState {
            balance: Money::from_cents(300_000),
            ..Default::default()
        };
        state.fixed_expenses.push(FixedExpense::new(
            "Rent",
            Money::from_cents(100_000),
            date(2025, 4, 1),
        ));
        state.fixed_expenses.push(FixedExpense::new(
            "Internet",
            Money::from_cents(5_000),
            date(2025, 4, 15),
        ));
        state.categories.push(BudgetCategory::new("Savings", 50));
        state.categories.push(BudgetCategory::new("Food", 30));
        state
    }

    #[test]
    fn test_total_fixed_expenses() {
        let state = sample_state();
        assert_eq!(state.total_fixed_expenses().cents(), 105_000);
    }

    #[test]
    fn test_available_for_allocation() {
        let state = sample_state();
        assert_eq!(state.available_for_allocation().cents(), 195_000);
    }

    #[test]
    fn test_available_floors_at_zero() {
        let mut state = sample_state();
        state.balance = Money::from_cents(50_000);
        assert_eq!(state.available_for_allocation(), Money::zero());
    }

    #[test]
    fn test_percentage_sums() {
        let state = sample_state();
        assert_eq!(state.total_percentage(), 80);

        let savings_id = state.categories[0].id;
        assert_eq!(state.percentage_of_others(savings_id), 30);
    }

    #[test]
    fn test_allocation_totals() {
        let mut state = sample_state();
        state.categories[0].allocated_amount = Money::from_cents(100_000);
        state.categories[0].remaining_amount = Money::from_cents(60_000);
        state.categories[1].allocated_amount = Money::from_cents(50_000);
        state.categories[1].remaining_amount = Money::from_cents(50_000);

        assert_eq!(state.total_allocated().cents(), 150_000);
        assert_eq!(state.total_remaining().cents(), 110_000);
    }

    #[test]
    fn test_lookups() {
        let state = sample_state();
        let rent_id = state.fixed_expenses[0].id;
        let food_id = state.categories[1].id;

        assert_eq!(state.fixed_expense(rent_id).unwrap().name, "Rent");
        assert_eq!(state.category(food_id).unwrap().name, "Food");
        assert!(state.category(CategoryId::new()).is_none());
        assert!(state.fixed_expense(ExpenseId::new()).is_none());
    }

    #[test]
    fn test_default_state_is_zeroed() {
        let state = BudgetState::default();
        assert!(state.balance.is_zero());
        assert!(state.fixed_expenses.is_empty());
        assert!(state.categories.is_empty());
    }

    #[test]
    fn test_serialization_round_trip() {
        let state = sample_state();
        let json = serde_json::to_string_pretty(&state).unwrap();
        let deserialized: BudgetState = serde_json::from_str(&json).unwrap();
        assert_eq!(state, deserialized);
    }

    #[test]
    fn test_partial_snapshot_fills_defaults() {
        let json = r#"{"balance":"12.34"}"#;
        let state: BudgetState = serde_json::from_str(json).unwrap();
        assert_eq!(state.balance.cents(), 1234);
        assert!(state.fixed_expenses.is_empty());
        assert!(state.categories.is_empty());
    }
}
