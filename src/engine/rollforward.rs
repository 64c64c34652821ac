//! Due-expense rollforward
//!
//! When the engine has been idle past one or more due dates, each elapsed
//! billing cycle is paid retroactively: the expense amount is deducted from
//! the balance once per cycle and the due date advances one calendar month at
//! a time until it lands strictly after today. Multiple months offline means
//! multiple deductions.

use chrono::{Months, NaiveDate};
use tracing::debug;

use crate::models::BudgetState;

/// Apply every elapsed billing cycle to the snapshot.
///
/// Returns the advanced snapshot, or `None` when no expense was due.
pub(crate) fn roll_forward_due(state: &BudgetState, today: NaiveDate) -> Option<BudgetState> {
    if state.fixed_expenses.is_empty() {
        return None;
    }

    let mut balance = state.balance;
    let mut changed = false;

    let fixed_expenses = state
        .fixed_expenses
        .iter()
        .map(|expense| {
            let mut next_due = expense.next_due_date;
            let mut cycles = 0u32;

            while next_due <= today {
                balance -= expense.amount;
                cycles += 1;
                match next_due.checked_add_months(Months::new(1)) {
                    Some(advanced) => next_due = advanced,
                    // Calendar overflow; stop rather than loop forever.
                    None => break,
                }
            }

            if cycles > 0 {
                changed = true;
                debug!(
                    expense = %expense.name,
                    cycles,
                    next_due = %next_due,
                    "applied due fixed expense"
                );
                let mut advanced = expense.clone();
                advanced.next_due_date = next_due;
                advanced
            } else {
                expense.clone()
            }
        })
        .collect();

    if changed {
        Some(BudgetState {
            balance,
            fixed_expenses,
            categories: state.categories.clone(),
        })
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FixedExpense, Money};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn state_with_expense(amount_cents: i64, due: NaiveDate) -> BudgetState {
        BudgetState {
            balance: Money::zero(),
            fixed_expenses: vec![FixedExpense::new(
                "Rent",
                Money::from_cents(amount_cents),
                due,
            )],
            categories: Vec::new(),
        }
    }

    #[test]
    fn test_not_due_yet_is_untouched() {
        let state = state_with_expense(100_000, date(2025, 5, 1));
        assert!(roll_forward_due(&state, date(2025, 4, 30)).is_none());
    }

    #[test]
    fn test_single_cycle() {
        let state = state_with_expense(100_000, date(2025, 4, 1));
        let rolled = roll_forward_due(&state, date(2025, 4, 1)).unwrap();

        assert_eq!(rolled.balance.cents(), -100_000);
        assert_eq!(rolled.fixed_expenses[0].next_due_date, date(2025, 5, 1));
    }

    #[test]
    fn test_three_elapsed_months() {
        // Due Jan 15, resumed Apr 10: Jan, Feb, and Mar cycles are paid and
        // the due date lands on Apr 15.
        let state = state_with_expense(50_000, date(2025, 1, 15));
        let rolled = roll_forward_due(&state, date(2025, 4, 10)).unwrap();

        assert_eq!(rolled.balance.cents(), -150_000);
        assert_eq!(rolled.fixed_expenses[0].next_due_date, date(2025, 4, 15));
    }

    #[test]
    fn test_month_end_clamping() {
        // Jan 31 + one month clamps to Feb 28 in a non-leap year.
        let state = state_with_expense(10_000, date(2025, 1, 31));
        let rolled = roll_forward_due(&state, date(2025, 1, 31)).unwrap();

        assert_eq!(rolled.fixed_expenses[0].next_due_date, date(2025, 2, 28));
    }

    #[test]
    fn test_only_due_expenses_advance() {
        let mut state = state_with_expense(100_000, date(2025, 4, 1));
        state.fixed_expenses.push(FixedExpense::new(
            "Insurance",
            Money::from_cents(20_000),
            date(2025, 4, 20),
        ));

        let rolled = roll_forward_due(&state, date(2025, 4, 5)).unwrap();

        assert_eq!(rolled.balance.cents(), -100_000);
        assert_eq!(rolled.fixed_expenses[0].next_due_date, date(2025, 5, 1));
        assert_eq!(rolled.fixed_expenses[1].next_due_date, date(2025, 4, 20));
    }

    #[test]
    fn test_categories_are_untouched() {
        use crate::models::BudgetCategory;

        let mut state = state_with_expense(100_000, date(2025, 4, 1));
        let mut category = BudgetCategory::new("Savings", 50);
        category.allocated_amount = Money::from_cents(30_000);
        category.remaining_amount = Money::from_cents(25_000);
        state.categories.push(category.clone());

        let rolled = roll_forward_due(&state, date(2025, 4, 2)).unwrap();
        assert_eq!(rolled.categories, vec![category]);
    }

    #[test]
    fn test_no_expenses_is_noop() {
        let state = BudgetState::default();
        assert!(roll_forward_due(&state, date(2025, 4, 1)).is_none());
    }
}
