//! Shared test helpers for `paytrack-core` integration tests.
//!
//! These helpers provide reusable fixtures and an in-memory repository so
//! service tests can focus on behaviour instead of storage.

#![allow(dead_code)]

pub mod repositories;

use chrono::NaiveDate;
use paytrack_domain::{EntryPayload, EntryStatus, NewEntry};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn new_entry(client: &str, date: NaiveDate, forecast: NaiveDate, status: EntryStatus) -> NewEntry {
    NewEntry {
        client: client.to_string(),
        date,
        product: "Plano Saúde".to_string(),
        commission: 100.0,
        forecast,
        status,
    }
}

pub fn payload(client: &str, date: &str, forecast: &str) -> EntryPayload {
    EntryPayload {
        client: Some(client.to_string()),
        date: Some(date.to_string()),
        product: Some("Plano Saúde".to_string()),
        commission: Some(100.0),
        forecast: Some(forecast.to_string()),
        status: Some("pendente".to_string()),
    }
}
