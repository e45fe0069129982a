//! Tracking number input.

use std::fmt;

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

use crate::error::{AppError, Result};

/// Bytes escaped inside a single URL path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// A normalized tracking number.
///
/// Always non-empty, trimmed and uppercased.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TrackingQuery(String);

impl TrackingQuery {
    /// Validate and normalize raw user input.
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(AppError::validation("tracking number is empty"));
        }
        Ok(Self(trimmed.to_uppercase()))
    }

    /// The normalized tracking number.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Tracking number percent-encoded as one URL path segment.
    pub fn url_encoded(&self) -> String {
        utf8_percent_encode(&self.0, PATH_SEGMENT).to_string()
    }
}

impl fmt::Display for TrackingQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
