//! The budget engine
//!
//! `BudgetEngine` owns the authoritative `BudgetState` and is the only way to
//! change it. Every command validates its input, applies any fixed expenses
//! that have come due, builds a new snapshot, persists it through the
//! injected store, and only then swaps it in and notifies subscribers. A
//! command either fully succeeds with exactly one new snapshot and one event,
//! or it fails and the state is unchanged.

pub(crate) mod allocation;
pub(crate) mod rollforward;
pub mod subscribers;

use chrono::NaiveDate;
use tracing::debug;

use crate::clock::{Clock, SystemClock};
use crate::error::{BudgetError, BudgetResult};
use crate::models::{
    BudgetCategory, BudgetEvent, BudgetState, BudgetSummary, CategoryId, ExpenseId, FixedExpense,
    IncomeKind, Money,
};
use crate::storage::StateStore;

pub use subscribers::{EventCallback, StateCallback, SubscriptionId};
use subscribers::SubscriberRegistry;

/// The budget allocation state machine
pub struct BudgetEngine {
    store: Box<dyn StateStore>,
    clock: Box<dyn Clock>,
    state: BudgetState,
    subscribers: SubscriberRegistry,
}

impl BudgetEngine {
    /// Create an engine backed by the given store, using the system clock.
    ///
    /// Loads the last persisted snapshot (or starts from the zeroed default)
    /// and immediately applies any fixed expenses that came due while the
    /// engine was not running.
    pub fn new(store: Box<dyn StateStore>) -> BudgetResult<Self> {
        Self::with_clock(store, Box::new(SystemClock))
    }

    /// Create an engine with an explicit clock.
    pub fn with_clock(store: Box<dyn StateStore>, clock: Box<dyn Clock>) -> BudgetResult<Self> {
        let state = store.load()?.unwrap_or_default();
        let mut engine = Self {
            store,
            clock,
            state,
            subscribers: SubscriberRegistry::default(),
        };
        engine.ensure_up_to_date()?;
        Ok(engine)
    }

    /// The current snapshot
    pub fn state(&self) -> &BudgetState {
        &self.state
    }

    /// Read-only projection of the current snapshot
    pub fn summary(&self) -> BudgetSummary {
        BudgetSummary::from_state(&self.state)
    }

    /// Register a callback for every new snapshot
    pub fn subscribe_state(
        &mut self,
        callback: impl Fn(&BudgetState) + Send + 'static,
    ) -> SubscriptionId {
        self.subscribers.subscribe_state(Box::new(callback))
    }

    /// Register a callback for every command outcome
    pub fn subscribe_events(
        &mut self,
        callback: impl Fn(BudgetEvent) + Send + 'static,
    ) -> SubscriptionId {
        self.subscribers.subscribe_events(Box::new(callback))
    }

    /// Drop a subscription; returns whether it existed
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }

    /// Apply any fixed expenses that have come due.
    ///
    /// Commands do this implicitly; this entry point exists for callers that
    /// want to refresh without mutating anything else (e.g. on app resume).
    /// Returns whether anything advanced.
    pub fn refresh_due_expenses(&mut self) -> BudgetResult<bool> {
        self.ensure_up_to_date()
    }

    /// Record income and allocate it across categories.
    ///
    /// `IncomeKind::Paycheck` re-derives every category from the full
    /// available pool; `IncomeKind::Supplemental` adds only the new amount's
    /// shares on top of existing allocations.
    pub fn add_income(&mut self, amount: Money, kind: IncomeKind) -> BudgetResult<()> {
        if !amount.is_positive() {
            return Err(BudgetError::InvalidInput(
                "income amount must be positive".into(),
            ));
        }

        self.ensure_up_to_date()?;

        let mut next = self.state.clone();
        next.balance += amount;
        next.categories = match kind {
            IncomeKind::Paycheck => {
                allocation::recompute(&next.categories, next.available_for_allocation())
            }
            IncomeKind::Supplemental => allocation::distribute(&next.categories, amount),
        };

        debug!(amount = %amount, kind = %kind, "income recorded");
        self.commit(next, BudgetEvent::IncomeRecorded)
    }

    /// Add a recurring monthly expense.
    ///
    /// The expense joins the pool calculation immediately, and if its due
    /// date has already passed it is paid as part of this command.
    pub fn add_fixed_expense(
        &mut self,
        name: &str,
        amount: Money,
        due_date: NaiveDate,
    ) -> BudgetResult<ExpenseId> {
        let expense = FixedExpense::new(name, amount, due_date);
        expense
            .validate()
            .map_err(|e| BudgetError::InvalidInput(e.to_string()))?;
        let id = expense.id;

        self.ensure_up_to_date()?;

        let mut next = self.state.clone();
        next.fixed_expenses.push(expense);
        next.categories = allocation::recompute(&next.categories, next.available_for_allocation());

        debug!(expense = name, amount = %amount, due = %due_date, "fixed expense added");
        self.commit(next, BudgetEvent::FixedExpenseAdded)?;

        // The new expense may already be due.
        self.ensure_up_to_date()?;
        Ok(id)
    }

    /// Move a fixed expense's next due date.
    ///
    /// A missing id is a silent no-op.
    pub fn update_fixed_expense_due_date(
        &mut self,
        id: ExpenseId,
        due_date: NaiveDate,
    ) -> BudgetResult<()> {
        self.ensure_up_to_date()?;

        let Some(index) = self.state.fixed_expenses.iter().position(|e| e.id == id) else {
            debug!(expense_id = %id, "due date update for unknown expense ignored");
            return Ok(());
        };

        let mut next = self.state.clone();
        next.fixed_expenses[index].next_due_date = due_date;
        next.categories = allocation::recompute(&next.categories, next.available_for_allocation());

        self.commit(next, BudgetEvent::FixedExpenseUpdated)?;

        // The new due date may already have elapsed.
        self.ensure_up_to_date()?;
        Ok(())
    }

    /// Remove a fixed expense.
    ///
    /// A missing id is a silent no-op.
    pub fn remove_fixed_expense(&mut self, id: ExpenseId) -> BudgetResult<()> {
        self.ensure_up_to_date()?;

        if self.state.fixed_expense(id).is_none() {
            debug!(expense_id = %id, "removal of unknown expense ignored");
            return Ok(());
        }

        let mut next = self.state.clone();
        next.fixed_expenses.retain(|e| e.id != id);
        next.categories = allocation::recompute(&next.categories, next.available_for_allocation());

        self.commit(next, BudgetEvent::FixedExpenseRemoved)
    }

    /// Add a spending category claiming `percentage` of the pool.
    ///
    /// Fails if the name is blank, the percentage is outside 1-100, or the
    /// combined percentage of all categories would pass 100.
    pub fn add_category(&mut self, name: &str, percentage: u8) -> BudgetResult<CategoryId> {
        let category = BudgetCategory::new(name, percentage);
        if let Err(e) = category.validate() {
            return Err(self.reject(
                BudgetEvent::InvalidCategoryPercentage,
                BudgetError::InvalidInput(e.to_string()),
            ));
        }
        let id = category.id;

        self.ensure_up_to_date()?;

        let committed = self.state.total_percentage();
        if committed + percentage as u32 > 100 {
            let available = 100u32.saturating_sub(committed) as u8;
            return Err(self.reject(
                BudgetEvent::InvalidCategoryPercentage,
                BudgetError::PercentageExceeded {
                    requested: percentage,
                    available,
                },
            ));
        }

        let mut next = self.state.clone();
        next.categories.push(category);
        next.categories = allocation::recompute(&next.categories, next.available_for_allocation());

        debug!(category = name, percentage, "category added");
        self.commit(next, BudgetEvent::CategoryAdded)?;
        Ok(id)
    }

    /// Change a category's percentage claim.
    ///
    /// A missing id is a silent no-op; an over-committed percentage fails
    /// with the state unchanged.
    pub fn update_category_percentage(
        &mut self,
        id: CategoryId,
        percentage: u8,
    ) -> BudgetResult<()> {
        if percentage == 0 || percentage > 100 {
            return Err(self.reject(
                BudgetEvent::InvalidCategoryPercentage,
                BudgetError::InvalidInput(format!(
                    "Category percentage must be 1-100, got {}",
                    percentage
                )),
            ));
        }

        self.ensure_up_to_date()?;

        let Some(index) = self.state.categories.iter().position(|c| c.id == id) else {
            debug!(category_id = %id, "percentage update for unknown category ignored");
            return Ok(());
        };

        let others = self.state.percentage_of_others(id);
        if others + percentage as u32 > 100 {
            let available = 100u32.saturating_sub(others) as u8;
            return Err(self.reject(
                BudgetEvent::InvalidCategoryPercentage,
                BudgetError::PercentageExceeded {
                    requested: percentage,
                    available,
                },
            ));
        }

        let mut next = self.state.clone();
        next.categories[index].percentage = percentage;
        next.categories = allocation::recompute(&next.categories, next.available_for_allocation());

        self.commit(next, BudgetEvent::CategoryUpdated)
    }

    /// Remove a category and re-derive the rest.
    ///
    /// A missing id is a silent no-op.
    pub fn remove_category(&mut self, id: CategoryId) -> BudgetResult<()> {
        self.ensure_up_to_date()?;

        if self.state.category(id).is_none() {
            debug!(category_id = %id, "removal of unknown category ignored");
            return Ok(());
        }

        let mut next = self.state.clone();
        next.categories.retain(|c| c.id != id);
        next.categories = allocation::recompute(&next.categories, next.available_for_allocation());

        self.commit(next, BudgetEvent::CategoryRemoved)
    }

    /// Record spending against a category.
    ///
    /// The whole command is rejected, with nothing applied, when the amount
    /// is not positive, the category does not exist, or the category's
    /// remaining funds are insufficient.
    pub fn record_spend(&mut self, category_id: CategoryId, amount: Money) -> BudgetResult<()> {
        if !amount.is_positive() {
            return Err(self.reject(
                BudgetEvent::InvalidSpend,
                BudgetError::InvalidInput("spend amount must be positive".into()),
            ));
        }

        self.ensure_up_to_date()?;

        let found = self
            .state
            .categories
            .iter()
            .position(|c| c.id == category_id)
            .map(|i| {
                let c = &self.state.categories[i];
                (i, c.name.clone(), c.remaining_amount)
            });
        let Some((index, name, remaining)) = found else {
            return Err(self.reject(
                BudgetEvent::InvalidSpend,
                BudgetError::category_not_found(category_id.to_string()),
            ));
        };

        let new_remaining = remaining - amount;
        if new_remaining.is_negative() {
            return Err(self.reject(
                BudgetEvent::InvalidSpend,
                BudgetError::InsufficientRemaining {
                    category: name,
                    requested: amount.cents(),
                    remaining: remaining.cents(),
                },
            ));
        }

        let mut next = self.state.clone();
        next.categories[index].remaining_amount = new_remaining;
        next.balance -= amount;

        debug!(category = %name, amount = %amount, "spend recorded");
        self.commit(next, BudgetEvent::SpendRecorded)
    }

    /// Roll forward due expenses; persist and publish only when something
    /// actually advanced.
    fn ensure_up_to_date(&mut self) -> BudgetResult<bool> {
        let today = self.clock.today();
        match rollforward::roll_forward_due(&self.state, today) {
            Some(rolled) => {
                self.persist_and_swap(rolled)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Write-through: persist, then swap the snapshot in and publish it.
    /// On a persist failure the in-memory state is left untouched.
    fn persist_and_swap(&mut self, next: BudgetState) -> BudgetResult<()> {
        self.store
            .save(&next)
            .map_err(|e| BudgetError::PersistFailure(e.to_string()))?;
        self.state = next;
        self.subscribers.notify_state(&self.state);
        Ok(())
    }

    fn commit(&mut self, next: BudgetState, event: BudgetEvent) -> BudgetResult<()> {
        self.persist_and_swap(next)?;
        self.subscribers.notify_event(event);
        Ok(())
    }

    /// Publish a failure event and hand the error back to the caller.
    fn reject(&mut self, event: BudgetEvent, error: BudgetError) -> BudgetError {
        self.subscribers.notify_event(event);
        error
    }
}
