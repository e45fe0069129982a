// src/models/mod.rs

//! Domain models for the tracker.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod config;
mod query;
pub mod selectors;
mod status;
mod tracking;

// Re-export all public types
pub use config::{
    Config, FetcherConfig, FetcherKind, LocaleConfig, LoggingConfig, Messages, Placeholders,
    ServerConfig, SourceConfig, TRACKING_NUMBER_PLACEHOLDER,
};
pub use query::TrackingQuery;
pub use selectors::{Probe, SelectorRule, TextSource};
pub use status::StatusCategory;
pub use tracking::{EventRecord, TrackingSnapshot};

/// Output of the field and event extractors before placeholders are applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedFields {
    pub status: String,
    pub location: String,
    pub carrier: String,
    pub estimated_delivery: String,
    pub events: Vec<EventRecord>,
}
