//! Due-date notification types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::entry::Entry;

/// Classification of a pending entry near or past its forecast date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NotificationKind {
    /// Forecast date is still ahead
    #[serde(rename = "warning")]
    DueSoon,
    /// Forecast date is today or already passed
    #[serde(rename = "danger")]
    Overdue,
}

impl NotificationKind {
    /// `days_left <= 0` is overdue, anything later is due soon.
    pub fn from_days_left(days_left: i64) -> Self {
        if days_left <= 0 {
            Self::Overdue
        } else {
            Self::DueSoon
        }
    }
}

/// A pending entry surfaced to the user because payment is due
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: i64,
    pub client: String,
    pub forecast: NaiveDate,
    /// Whole days from today until the forecast date; zero or negative once due
    #[serde(rename = "daysLeft")]
    pub days_left: i64,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
}

impl Notification {
    /// Build the notification for `entry` as seen on `today`.
    pub fn for_entry(entry: &Entry, today: NaiveDate) -> Self {
        let days_left = entry.forecast.signed_duration_since(today).num_days();
        Self {
            id: entry.id,
            client: entry.client.clone(),
            forecast: entry.forecast,
            days_left,
            kind: NotificationKind::from_days_left(days_left),
        }
    }
}
