//! # Paytrack Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - Port interfaces (traits) for entry persistence
//! - The entry service: validation and CRUD orchestration
//! - The notification selector and the service that feeds it
//!
//! ## Architecture Principles
//! - Only depends on `paytrack-common` and `paytrack-domain`
//! - No database, HTTP, or platform code
//! - All external dependencies via traits

pub mod entries;
pub mod notifications;

pub use entries::ports::EntryRepository;
pub use entries::EntryService;
pub use notifications::{horizon_limit, select_notifications, NotificationService};
