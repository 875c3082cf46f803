#![forbid(unsafe_code)]

//! Core domain model and business logic for the macro calculator.
//!
//! This crate provides:
//! - Domain types (profile, estimates, log entries, theme)
//! - The estimator (BMR, TDEE, macros, water and salt)
//! - The weight log and its trend series
//! - Persistence (key-value JSON store, CSV export)
//! - Configuration and logging setup

pub mod types;
pub mod error;
pub mod form;
pub mod estimator;
pub mod weight_log;
pub mod store;
pub mod tracker;
pub mod trend;
pub mod csv_export;
pub mod config;
pub mod logging;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use estimator::estimate;
pub use weight_log::WeightLog;
pub use store::{JsonFileStore, KeyValueStore, MemoryStore};
pub use tracker::Tracker;
pub use trend::TrendSeries;
pub use csv_export::export_log;
pub use config::Config;
