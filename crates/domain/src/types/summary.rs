//! Monthly commission totals

use serde::{Deserialize, Serialize};

use super::entry::{Entry, EntryStatus};

/// Commission totals over a set of entries, optionally scoped to one month
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MonthlySummary {
    /// `None` when the summary covers every entry
    pub month: Option<u32>,
    pub entry_count: usize,
    /// Sum over all statuses
    pub total_commission: f64,
    pub pending_commission: f64,
    pub completed_commission: f64,
    pub cancelled_commission: f64,
}

impl MonthlySummary {
    pub fn from_entries(month: Option<u32>, entries: &[Entry]) -> Self {
        entries.iter().fold(Self { month, ..Self::default() }, |mut acc, entry| {
            acc.entry_count += 1;
            acc.total_commission += entry.commission;
            match entry.status {
                EntryStatus::Pending => acc.pending_commission += entry.commission,
                EntryStatus::Completed => acc.completed_commission += entry.commission,
                EntryStatus::Cancelled => acc.cancelled_commission += entry.commission,
            }
            acc
        })
    }
}
