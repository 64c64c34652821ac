//! Budget category model
//!
//! A category claims a percentage of the available pool. The engine keeps
//! `allocated_amount` (the category's current share) and `remaining_amount`
//! (what is left after spending) in sync; what was spent is derived.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::CategoryId;
use super::money::Money;

/// Largest percentage a single category may claim
pub const MAX_PERCENTAGE: u8 = 100;

/// A percentage-weighted spending category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetCategory {
    /// Unique identifier
    #[serde(default)]
    pub id: CategoryId,

    /// Category name (e.g., "Groceries")
    pub name: String,

    /// Share of the available pool, 1-100
    pub percentage: u8,

    /// Funds currently allocated to this category
    pub allocated_amount: Money,

    /// Allocated funds not yet spent
    pub remaining_amount: Money,
}

impl BudgetCategory {
    /// Create a new category with no funds allocated yet
    pub fn new(name: impl Into<String>, percentage: u8) -> Self {
        Self {
            id: CategoryId::new(),
            name: name.into().trim().to_string(),
            percentage,
            allocated_amount: Money::zero(),
            remaining_amount: Money::zero(),
        }
    }

    /// Funds spent from this category so far
    pub fn spent_amount(&self) -> Money {
        self.allocated_amount - self.remaining_amount
    }

    /// Validate the category
    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        if self.name.trim().is_empty() {
            return Err(CategoryValidationError::EmptyName);
        }

        if self.percentage == 0 || self.percentage > MAX_PERCENTAGE {
            return Err(CategoryValidationError::PercentageOutOfRange(
                self.percentage,
            ));
        }

        if self.allocated_amount.is_negative() {
            return Err(CategoryValidationError::NegativeAllocation);
        }

        if self.remaining_amount.is_negative() || self.remaining_amount > self.allocated_amount {
            return Err(CategoryValidationError::RemainingOutOfBounds);
        }

        Ok(())
    }
}

impl fmt::Display for BudgetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}%)", self.name, self.percentage)
    }
}

/// Validation errors for categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryValidationError {
    EmptyName,
    PercentageOutOfRange(u8),
    NegativeAllocation,
    RemainingOutOfBounds,
}

impl fmt::Display for CategoryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Category name cannot be empty"),
            Self::PercentageOutOfRange(p) => {
                write!(f, "Category percentage must be 1-100, got {}", p)
            }
            Self::NegativeAllocation => write!(f, "Allocated amount cannot be negative"),
            Self::RemainingOutOfBounds => {
                write!(f, "Remaining amount must be between zero and the allocation")
            }
        }
    }
}

impl std::error::Error for CategoryValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_category() {
        let category = BudgetCategory::new("Groceries", 30);
        assert_eq!(category.name, "Groceries");
        assert_eq!(category.percentage, 30);
        assert!(category.allocated_amount.is_zero());
        assert!(category.remaining_amount.is_zero());
    }

    #[test]
    fn test_spent_amount_is_derived() {
        let mut category = BudgetCategory::new("Fun", 10);
        category.allocated_amount = Money::from_cents(10_000);
        category.remaining_amount = Money::from_cents(7_500);

        assert_eq!(category.spent_amount().cents(), 2_500);
    }

    #[test]
    fn test_validation_name_and_percentage() {
        let mut category = BudgetCategory::new("Valid", 50);
        assert!(category.validate().is_ok());

        category.name = String::new();
        assert_eq!(category.validate(), Err(CategoryValidationError::EmptyName));

        category.name = "Valid".to_string();
        category.percentage = 0;
        assert_eq!(
            category.validate(),
            Err(CategoryValidationError::PercentageOutOfRange(0))
        );

        category.percentage = 101;
        assert_eq!(
            category.validate(),
            Err(CategoryValidationError::PercentageOutOfRange(101))
        );
    }

    #[test]
    fn test_validation_amount_bounds() {
        let mut category = BudgetCategory::new("Valid", 50);
        category.allocated_amount = Money::from_cents(5_000);
        category.remaining_amount = Money::from_cents(5_000);
        assert!(category.validate().is_ok());

        // Remaining above allocation is inconsistent
        category.remaining_amount = Money::from_cents(6_000);
        assert_eq!(
            category.validate(),
            Err(CategoryValidationError::RemainingOutOfBounds)
        );

        category.remaining_amount = Money::from_cents(-1);
        assert_eq!(
            category.validate(),
            Err(CategoryValidationError::RemainingOutOfBounds)
        );

        category.remaining_amount = Money::zero();
        category.allocated_amount = Money::from_cents(-1);
        assert_eq!(
            category.validate(),
            Err(CategoryValidationError::NegativeAllocation)
        );
    }

    #[test]
    fn test_serialization() {
        let mut category = BudgetCategory::new("Savings", 40);
        category.allocated_amount = Money::from_cents(120_000);
        category.remaining_amount = Money::from_cents(80_000);

        let json = serde_json::to_string(&category).unwrap();
        assert!(json.contains("\"1200.00\""));

        let deserialized: BudgetCategory = serde_json::from_str(&json).unwrap();
        assert_eq!(category, deserialized);
        assert_eq!(deserialized.spent_amount().cents(), 40_000);
    }
}
