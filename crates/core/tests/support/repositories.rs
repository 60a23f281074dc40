//! In-memory `EntryRepository` for service tests
//!
//! Mirrors the ordering and month semantics of the SQLite adapter so the
//! services can be exercised without a database.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};
use paytrack_core::EntryRepository;
use paytrack_domain::{Entry, NewEntry, PaytrackError, Result as DomainResult};

#[derive(Default)]
struct State {
    entries: Vec<Entry>,
    next_id: i64,
}

/// In-memory mock for `EntryRepository`.
///
/// Clones share state. `fail_with` makes every call return the given error,
/// which lets tests check error propagation.
#[derive(Default, Clone)]
pub struct InMemoryEntryRepository {
    state: Arc<Mutex<State>>,
    failure: Arc<Mutex<Option<PaytrackError>>>,
}

impl InMemoryEntryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed with entries, assigning ids in order.
    pub fn with_entries(entries: Vec<NewEntry>) -> Self {
        let repo = Self::new();
        {
            let mut state = repo.state.lock().unwrap();
            for entry in entries {
                state.next_id += 1;
                let id = state.next_id;
                let created_at = entry.date.and_hms_opt(8, 0, 0).unwrap();
                state.entries.push(entry.into_entry(id, created_at));
            }
        }
        repo
    }

    pub fn fail_with(&self, err: PaytrackError) {
        *self.failure.lock().unwrap() = Some(err);
    }

    pub fn len(&self) -> usize {
        self.state.lock().unwrap().entries.len()
    }

    fn check_failure(&self) -> DomainResult<()> {
        match self.failure.lock().unwrap().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn sorted(mut entries: Vec<Entry>) -> Vec<Entry> {
        entries.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
        entries
    }
}

#[async_trait]
impl EntryRepository for InMemoryEntryRepository {
    async fn list_all(&self) -> DomainResult<Vec<Entry>> {
        self.check_failure()?;
        Ok(Self::sorted(self.state.lock().unwrap().entries.clone()))
    }

    async fn list_by_month(&self, month: u32) -> DomainResult<Vec<Entry>> {
        self.check_failure()?;
        let state = self.state.lock().unwrap();
        Ok(Self::sorted(
            state.entries.iter().filter(|e| e.date.month() == month).cloned().collect(),
        ))
    }

    async fn get_by_id(&self, id: i64) -> DomainResult<Option<Entry>> {
        self.check_failure()?;
        Ok(self.state.lock().unwrap().entries.iter().find(|e| e.id == id).cloned())
    }

    async fn create(&self, entry: NewEntry) -> DomainResult<Entry> {
        self.check_failure()?;
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        let created_at = entry.date.and_hms_opt(8, 0, 0).unwrap();
        let stored = entry.into_entry(state.next_id, created_at);
        state.entries.push(stored.clone());
        Ok(stored)
    }

    async fn create_batch(&self, entries: Vec<NewEntry>) -> DomainResult<usize> {
        self.check_failure()?;
        let count = entries.len();
        for entry in entries {
            self.create(entry).await?;
        }
        Ok(count)
    }

    async fn update(&self, id: i64, entry: NewEntry) -> DomainResult<Option<Entry>> {
        self.check_failure()?;
        let mut state = self.state.lock().unwrap();
        let Some(existing) = state.entries.iter_mut().find(|e| e.id == id) else {
            return Ok(None);
        };
        let updated = entry.into_entry(existing.id, existing.created_at);
        *existing = updated.clone();
        Ok(Some(updated))
    }

    async fn delete(&self, id: i64) -> DomainResult<usize> {
        self.check_failure()?;
        let mut state = self.state.lock().unwrap();
        let before = state.entries.len();
        state.entries.retain(|e| e.id != id);
        Ok(before - state.entries.len())
    }

    async fn list_pending_due_by(&self, horizon: NaiveDate) -> DomainResult<Vec<Entry>> {
        self.check_failure()?;
        let mut due: Vec<Entry> = self
            .state
            .lock()
            .unwrap()
            .entries
            .iter()
            .filter(|e| e.is_pending() && e.forecast <= horizon)
            .cloned()
            .collect();
        due.sort_by(|a, b| a.forecast.cmp(&b.forecast).then(a.id.cmp(&b.id)));
        Ok(due)
    }
}
