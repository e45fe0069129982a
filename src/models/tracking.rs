//! Tracking record structures.

use serde::{Deserialize, Serialize};

use super::StatusCategory;

/// One row of the shipment history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EventRecord {
    /// Event date as displayed by the source
    pub date: String,

    /// Event description (at most 150 characters)
    pub description: String,

    /// Event location (empty when unknown)
    pub location: String,
}

/// Result of one extraction pass for one tracking number.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TrackingSnapshot {
    /// Normalized tracking number
    pub tracking_number: String,

    /// Current status text
    pub status: String,

    /// Current location
    pub location: String,

    /// Carrier name
    pub carrier: String,

    /// Estimated delivery date
    pub estimated_delivery: String,

    /// Shipment history in document order
    pub events: Vec<EventRecord>,

    /// RFC 3339 time of assembly
    pub last_update: String,

    /// Failure message, only set on failed lookups
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TrackingSnapshot {
    /// A snapshot carrying only an error message.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            tracking_number: String::new(),
            status: String::new(),
            location: String::new(),
            carrier: String::new(),
            estimated_delivery: String::new(),
            events: Vec::new(),
            last_update: String::new(),
            error: Some(message.into()),
        }
    }

    pub fn is_failed(&self) -> bool {
        self.error.is_some()
    }

    /// Display category derived from the status text.
    pub fn status_category(&self) -> StatusCategory {
        StatusCategory::classify(&self.status)
    }
}
