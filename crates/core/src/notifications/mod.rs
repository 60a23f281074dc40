//! Due-date notifications for pending entries

mod selector;
mod service;

pub use selector::{horizon_limit, select_notifications};
pub use service::NotificationService;
