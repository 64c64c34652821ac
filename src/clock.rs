//! Time source abstraction
//!
//! Due-expense rollforward compares due dates against "today". Hiding the
//! calendar behind a trait keeps that logic deterministic in tests.

use chrono::{Local, NaiveDate};

/// Clock abstracts access to the current date so the engine remains
/// deterministic in tests.
pub trait Clock: Send {
    /// Returns the current local date.
    fn today(&self) -> NaiveDate;
}

/// Production clock backed by the system's local time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A clock pinned to a fixed date.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
