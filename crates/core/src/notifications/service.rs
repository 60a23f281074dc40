//! Notification service - resolves "today" and queries the store

use std::sync::Arc;

use paytrack_common::Clock;
use paytrack_domain::{Notification, Result};
use tracing::debug;

use super::selector::{horizon_limit, select_notifications};
use crate::entries::ports::EntryRepository;

/// Builds the due-date notification list on demand
pub struct NotificationService {
    repository: Arc<dyn EntryRepository>,
    clock: Arc<dyn Clock>,
    horizon_days: u32,
}

impl NotificationService {
    /// Create a new notification service
    pub fn new(
        repository: Arc<dyn EntryRepository>,
        clock: Arc<dyn Clock>,
        horizon_days: u32,
    ) -> Self {
        Self { repository, clock, horizon_days }
    }

    pub fn horizon_days(&self) -> u32 {
        self.horizon_days
    }

    /// Current notifications, recomputed from the store on every call.
    pub async fn notifications(&self) -> Result<Vec<Notification>> {
        let today = self.clock.today();
        let candidates =
            self.repository.list_pending_due_by(horizon_limit(today, self.horizon_days)).await?;

        let notifications = select_notifications(&candidates, today, self.horizon_days);
        debug!(
            %today,
            horizon_days = self.horizon_days,
            count = notifications.len(),
            "notifications selected"
        );
        Ok(notifications)
    }
}
