//! Cross-cutting helpers for the API layer

pub mod health;
pub mod logging;
