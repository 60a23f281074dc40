//! Time utilities
//!
//! Date-granularity clock used wherever business logic needs "today".

pub mod clock;

pub use clock::{Clock, MockClock, SystemClock};
