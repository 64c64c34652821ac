//! budgetflow - percentage-based budget allocation engine
//!
//! This library implements the core of a personal budget tracker: income is
//! recorded against a running balance, fixed recurring expenses are deducted
//! as their due dates elapse, and the remaining pool is split across
//! user-defined spending categories by percentage weight. Spending is
//! validated against each category's remaining funds.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `clock`: Time source abstraction for due-date processing
//! - `models`: Core data models (money, expenses, categories, state, events)
//! - `storage`: Snapshot persistence contract and JSON file backend
//! - `engine`: The command layer that drives all state transitions
//!
//! # Example
//!
//! ```rust,no_run
//! use budgetflow::engine::BudgetEngine;
//! use budgetflow::models::{IncomeKind, Money};
//! use budgetflow::storage::MemoryStateStore;
//!
//! # fn main() -> Result<(), budgetflow::BudgetError> {
//! let mut engine = BudgetEngine::new(Box::new(MemoryStateStore::new()))?;
//! engine.add_income(Money::from_cents(300_000), IncomeKind::Paycheck)?;
//! engine.add_category("Savings", 50)?;
//! println!("{}", engine.summary().available_for_allocation);
//! # Ok(())
//! # }
//! ```

pub mod clock;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod storage;

pub use error::{BudgetError, BudgetResult};
