//! Notification selection
//!
//! Pure function over a snapshot of entries and a reference date. A pending
//! entry is selected when its forecast is on or before `today + horizon`;
//! there is no lower bound, so overdue entries stay listed until their
//! status changes.

use chrono::{Days, NaiveDate};
use paytrack_domain::{Entry, Notification};

/// Last forecast date that still falls inside the horizon.
pub fn horizon_limit(today: NaiveDate, horizon_days: u32) -> NaiveDate {
    today.checked_add_days(Days::new(u64::from(horizon_days))).unwrap_or(NaiveDate::MAX)
}

/// Select and classify the notifications for `today`.
///
/// Output is ordered by forecast ascending, ties by id.
pub fn select_notifications(
    entries: &[Entry],
    today: NaiveDate,
    horizon_days: u32,
) -> Vec<Notification> {
    let limit = horizon_limit(today, horizon_days);

    let mut selected: Vec<&Entry> =
        entries.iter().filter(|entry| entry.is_pending() && entry.forecast <= limit).collect();
    selected.sort_by(|a, b| a.forecast.cmp(&b.forecast).then(a.id.cmp(&b.id)));

    selected.into_iter().map(|entry| Notification::for_entry(entry, today)).collect()
}
