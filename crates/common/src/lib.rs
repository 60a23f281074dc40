//! # Paytrack Common
//!
//! Infrastructure primitives shared by the Paytrack crates.
//!
//! This crate contains:
//! - `storage`: r2d2-backed SQLite connection pool, connection wrapper,
//!   per-connection pragmas and the storage error type
//! - `time`: the [`Clock`](time::Clock) abstraction used to resolve "today"
//!
//! ## Architecture
//! - No dependencies on other Paytrack crates
//! - No business rules; only plumbing that more than one layer needs

pub mod storage;
pub mod time;

pub use storage::{StorageError, StorageResult};
pub use time::{Clock, MockClock, SystemClock};
