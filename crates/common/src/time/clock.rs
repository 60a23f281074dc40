//! Clock abstraction for date-based business rules
//!
//! Due-date logic works on calendar days in the server's local time zone.
//! Services take an `Arc<dyn Clock>` so tests can pin "today".

use std::sync::{Arc, Mutex};

use chrono::{Days, Local, NaiveDate};

/// Source of the current calendar date.
pub trait Clock: Send + Sync + 'static {
    /// Today's date, ignoring time of day.
    fn today(&self) -> NaiveDate;
}

/// Real system clock using the local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Mock clock for testing
///
/// Clones share the same underlying date, so a test can keep one handle and
/// move time forward while a service holds another.
#[derive(Debug, Clone)]
pub struct MockClock {
    today: Arc<Mutex<NaiveDate>>,
}

impl MockClock {
    /// Create a mock clock fixed at `today`.
    pub fn new(today: NaiveDate) -> Self {
        Self { today: Arc::new(Mutex::new(today)) }
    }

    /// Move the clock to a specific date.
    pub fn set(&self, today: NaiveDate) {
        if let Ok(mut guard) = self.today.lock() {
            *guard = today;
        }
    }

    /// Advance the clock by whole days.
    pub fn advance_days(&self, days: u64) {
        if let Ok(mut guard) = self.today.lock() {
            if let Some(next) = guard.checked_add_days(Days::new(days)) {
                *guard = next;
            }
        }
    }
}

impl Clock for MockClock {
    fn today(&self) -> NaiveDate {
        match self.today.lock() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }
}
