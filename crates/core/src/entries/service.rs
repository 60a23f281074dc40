//! Entry service - validation and CRUD orchestration

use std::sync::Arc;

use paytrack_domain::{Entry, EntryPayload, MonthlySummary, PaytrackError, Result};
use tracing::debug;

use super::ports::EntryRepository;

/// Entry service for the commission spreadsheet
pub struct EntryService {
    repository: Arc<dyn EntryRepository>,
}

impl EntryService {
    /// Create a new entry service
    pub fn new(repository: Arc<dyn EntryRepository>) -> Self {
        Self { repository }
    }

    pub async fn list_all(&self) -> Result<Vec<Entry>> {
        self.repository.list_all().await
    }

    /// Entries for one calendar month across all years.
    ///
    /// Months outside 1..=12 match nothing and return an empty list.
    pub async fn list_by_month(&self, month: u32) -> Result<Vec<Entry>> {
        if !(1..=12).contains(&month) {
            debug!(month, "month out of range, returning no entries");
            return Ok(Vec::new());
        }
        self.repository.list_by_month(month).await
    }

    pub async fn get(&self, id: i64) -> Result<Entry> {
        self.repository.get_by_id(id).await?.ok_or_else(|| not_found(id))
    }

    /// Validate and insert a single entry
    pub async fn create(&self, payload: &EntryPayload) -> Result<Entry> {
        let entry = payload.validate()?;
        self.repository.create(entry).await
    }

    /// Validate every payload, then insert them all in one transaction.
    pub async fn create_batch(&self, payloads: &[EntryPayload]) -> Result<usize> {
        if payloads.is_empty() {
            return Err(PaytrackError::InvalidInput(
                "batch must contain at least one entry".into(),
            ));
        }

        let entries = payloads
            .iter()
            .enumerate()
            .map(|(index, payload)| {
                payload.validate().map_err(|err| {
                    PaytrackError::InvalidInput(format!("entry {index}: {}", err.message()))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        self.repository.create_batch(entries).await
    }

    /// Validate, then replace the business fields of entry `id`.
    ///
    /// An invalid payload is rejected before the id is looked up.
    pub async fn update(&self, id: i64, payload: &EntryPayload) -> Result<Entry> {
        let entry = payload.validate()?;
        self.repository.update(id, entry).await?.ok_or_else(|| not_found(id))
    }

    /// Returns rows affected; deleting an unknown id is not an error.
    pub async fn delete(&self, id: i64) -> Result<usize> {
        self.repository.delete(id).await
    }

    /// Commission totals for one month, or for every entry when `month` is `None`.
    pub async fn monthly_summary(&self, month: Option<u32>) -> Result<MonthlySummary> {
        let entries = match month {
            Some(month) => self.list_by_month(month).await?,
            None => self.list_all().await?,
        };
        Ok(MonthlySummary::from_entries(month, &entries))
    }
}

fn not_found(id: i64) -> PaytrackError {
    PaytrackError::NotFound(format!("entry {id} not found"))
}
