//! Custom error types for budgetflow
//!
//! This module defines the error hierarchy for the engine using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for budgetflow operations
#[derive(Error, Debug)]
pub enum BudgetError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Rejected command input (blank name, non-positive amount, ...)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Category percentages would sum past 100
    #[error("Category percentages would exceed 100: requested {requested}, only {available} available")]
    PercentageExceeded { requested: u8, available: u8 },

    /// Spend exceeds a category's remaining funds
    #[error("Insufficient funds in category '{category}': need {requested}, have {remaining}")]
    InsufficientRemaining {
        category: String,
        requested: i64,
        remaining: i64,
    },

    /// The storage collaborator failed to persist a snapshot. The in-memory
    /// state is left on the previous snapshot when this is returned.
    #[error("Failed to persist budget state: {0}")]
    PersistFailure(String),

    /// Storage errors outside the write-through path
    #[error("Storage error: {0}")]
    Storage(String),
}

impl BudgetError {
    /// Create a "not found" error for categories
    pub fn category_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Category",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for fixed expenses
    pub fn expense_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Fixed expense",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation failure the user can correct
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidInput(_)
                | Self::PercentageExceeded { .. }
                | Self::InsufficientRemaining { .. }
                | Self::NotFound { .. }
        )
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for BudgetError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for BudgetError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for budgetflow operations
pub type BudgetResult<T> = Result<T, BudgetError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BudgetError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_not_found_error() {
        let err = BudgetError::category_not_found("Groceries");
        assert_eq!(err.to_string(), "Category not found: Groceries");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_insufficient_remaining_error() {
        let err = BudgetError::InsufficientRemaining {
            category: "Groceries".into(),
            requested: 5000,
            remaining: 3000,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient funds in category 'Groceries': need 5000, have 3000"
        );
        assert!(err.is_user_error());
    }

    #[test]
    fn test_percentage_exceeded_error() {
        let err = BudgetError::PercentageExceeded {
            requested: 60,
            available: 40,
        };
        assert_eq!(
            err.to_string(),
            "Category percentages would exceed 100: requested 60, only 40 available"
        );
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let budget_err: BudgetError = io_err.into();
        assert!(matches!(budget_err, BudgetError::Io(_)));
    }
}
