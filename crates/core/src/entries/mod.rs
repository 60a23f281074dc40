//! Commission entry management

pub mod ports;
mod service;

pub use service::EntryService;
