//! Event timeline extraction service.

use scraper::{ElementRef, Html, Selector};

use crate::models::EventRecord;
use crate::models::selectors::events;
use crate::services::fields::first_match;
use crate::utils::{normalize_whitespace, truncate_chars};

/// Maximum number of candidate rows examined.
pub const MAX_EVENTS: usize = 10;

/// Maximum description length in characters.
pub const MAX_DESCRIPTION_CHARS: usize = 150;

/// Service decomposing the shipment history into event records.
pub struct EventExtractor<'a> {
    unknown_date: &'a str,
}

impl<'a> EventExtractor<'a> {
    /// `unknown_date` fills the date of events without one.
    pub fn new(unknown_date: &'a str) -> Self {
        Self { unknown_date }
    }

    /// Extract up to [`MAX_EVENTS`] records in document order.
    pub fn extract_events(&self, document: &Html) -> Vec<EventRecord> {
        let candidates = Self::locate_rows(document);
        log::debug!("Examining {} timeline candidate(s)", candidates.len());

        candidates
            .into_iter()
            .filter_map(|row| self.parse_row(row))
            .collect()
    }

    /// The rows of the first container selector matching anything, capped.
    ///
    /// Results from different selectors are never merged.
    fn locate_rows(document: &Html) -> Vec<ElementRef<'_>> {
        for css in events::CONTAINERS {
            let selector = match Selector::parse(css) {
                Ok(selector) => selector,
                Err(e) => {
                    log::debug!("Unsupported container selector '{css}': {e:?}");
                    continue;
                }
            };

            let rows: Vec<_> = document.select(&selector).take(MAX_EVENTS).collect();
            if !rows.is_empty() {
                log::debug!("Timeline container selector '{css}' matched");
                return rows;
            }
        }
        Vec::new()
    }

    fn parse_row(&self, row: ElementRef<'_>) -> Option<EventRecord> {
        let non_empty = |text: &str| !text.is_empty();

        let description = first_match(row, events::DESCRIPTION, non_empty)
            .unwrap_or_else(|| normalize_whitespace(&row.text().collect::<String>()));
        let description = truncate_chars(&description, MAX_DESCRIPTION_CHARS);
        if description.is_empty() {
            return None;
        }

        let date = first_match(row, events::DATE, non_empty)
            .unwrap_or_else(|| self.unknown_date.to_string());
        let location = first_match(row, events::LOCATION, non_empty).unwrap_or_default();

        Some(EventRecord {
            date,
            description,
            location,
        })
    }
}
