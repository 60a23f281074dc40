//! Domain types and models

pub mod entry;
pub mod notification;
pub mod summary;

pub use entry::{Entry, EntryPayload, EntryStatus, NewEntry};
pub use notification::{Notification, NotificationKind};
pub use summary::MonthlySummary;
