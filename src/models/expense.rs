//! Fixed recurring expense model
//!
//! A fixed expense is a bill with a stable amount that comes due once per
//! calendar month. The engine deducts it from the balance each time its due
//! date elapses and pushes the due date into the next cycle.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::ExpenseId;
use super::money::Money;

/// A recurring monthly expense with a fixed amount
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixedExpense {
    /// Unique identifier
    #[serde(default)]
    pub id: ExpenseId,

    /// Expense name (e.g., "Rent")
    pub name: String,

    /// Amount deducted each billing cycle
    pub amount: Money,

    /// The next date this expense comes due
    pub next_due_date: NaiveDate,
}

impl FixedExpense {
    /// Create a new fixed expense
    ///
    /// The name is trimmed; validity is checked separately via [`validate`].
    ///
    /// [`validate`]: FixedExpense::validate
    pub fn new(name: impl Into<String>, amount: Money, next_due_date: NaiveDate) -> Self {
        Self {
            id: ExpenseId::new(),
            name: name.into().trim().to_string(),
            amount,
            next_due_date,
        }
    }

    /// Check whether this expense is due on or before the given date
    pub fn is_due(&self, today: NaiveDate) -> bool {
        self.next_due_date <= today
    }

    /// Validate the expense
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if self.name.trim().is_empty() {
            return Err(ExpenseValidationError::EmptyName);
        }

        if !self.amount.is_positive() {
            return Err(ExpenseValidationError::NonPositiveAmount);
        }

        Ok(())
    }
}

impl fmt::Display for FixedExpense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.amount)
    }
}

/// Validation errors for fixed expenses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    EmptyName,
    NonPositiveAmount,
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Expense name cannot be empty"),
            Self::NonPositiveAmount => write!(f, "Expense amount must be positive"),
        }
    }
}

impl std::error::Error for ExpenseValidationError {}
