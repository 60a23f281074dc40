//! Port interfaces for entry persistence
//!
//! These traits define the boundary between the entry services and the
//! storage adapter. Payloads arrive here already validated.

use async_trait::async_trait;
use chrono::NaiveDate;
use paytrack_domain::{Entry, NewEntry, Result};

/// Trait for commission entry persistence and retrieval
#[async_trait]
pub trait EntryRepository: Send + Sync {
    /// All entries, transaction date descending (ties by id descending)
    async fn list_all(&self) -> Result<Vec<Entry>>;

    /// Entries whose transaction date falls in `month` (1..=12) of any year
    async fn list_by_month(&self, month: u32) -> Result<Vec<Entry>>;

    /// Get entry by ID
    async fn get_by_id(&self, id: i64) -> Result<Option<Entry>>;

    /// Insert one entry and return it as stored
    async fn create(&self, entry: NewEntry) -> Result<Entry>;

    /// Insert every entry or none; returns the number inserted
    async fn create_batch(&self, entries: Vec<NewEntry>) -> Result<usize>;

    /// Replace the business fields of an entry; `None` when the id is unknown
    async fn update(&self, id: i64, entry: NewEntry) -> Result<Option<Entry>>;

    /// Hard delete; returns rows affected
    async fn delete(&self, id: i64) -> Result<usize>;

    /// Pending entries with forecast on or before `horizon`, forecast ascending
    async fn list_pending_due_by(&self, horizon: NaiveDate) -> Result<Vec<Entry>>;
}
