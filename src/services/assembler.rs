//! Snapshot assembly.

use chrono::{DateTime, SecondsFormat, Utc};
use scraper::Html;

use crate::models::{ExtractedFields, Placeholders, TrackingQuery, TrackingSnapshot};
use crate::services::events::EventExtractor;
use crate::services::fields::FieldExtractor;

/// Combines extraction results into a [`TrackingSnapshot`].
pub struct SnapshotAssembler<'a> {
    placeholders: &'a Placeholders,
}

impl<'a> SnapshotAssembler<'a> {
    pub fn new(placeholders: &'a Placeholders) -> Self {
        Self { placeholders }
    }

    /// Run every extractor over a fetched page.
    pub fn extract(&self, html: &str) -> ExtractedFields {
        let document = Html::parse_document(html);

        ExtractedFields {
            status: FieldExtractor::status(&document),
            location: FieldExtractor::location(&document),
            carrier: FieldExtractor::carrier(&document),
            estimated_delivery: FieldExtractor::estimated_delivery(&document),
            events: EventExtractor::new(&self.placeholders.event_date).extract_events(&document),
        }
    }

    /// Assemble a snapshot stamped with the current time.
    pub fn assemble(&self, query: &TrackingQuery, fields: ExtractedFields) -> TrackingSnapshot {
        self.assemble_at(query, fields, Utc::now())
    }

    /// Assemble a snapshot stamped with `now`.
    pub fn assemble_at(
        &self,
        query: &TrackingQuery,
        fields: ExtractedFields,
        now: DateTime<Utc>,
    ) -> TrackingSnapshot {
        TrackingSnapshot {
            tracking_number: query.as_str().to_string(),
            status: or_placeholder(fields.status, &self.placeholders.status),
            location: or_placeholder(fields.location, &self.placeholders.location),
            carrier: or_placeholder(fields.carrier, &self.placeholders.carrier),
            estimated_delivery: or_placeholder(
                fields.estimated_delivery,
                &self.placeholders.estimated_delivery,
            ),
            events: fields.events,
            last_update: now.to_rfc3339_opts(SecondsFormat::Secs, true),
            error: None,
        }
    }

    /// Parse, extract and assemble in one step.
    pub fn snapshot_from_html(&self, query: &TrackingQuery, html: &str) -> TrackingSnapshot {
        let fields = self.extract(html);
        self.assemble(query, fields)
    }
}

fn or_placeholder(value: String, placeholder: &str) -> String {
    if value.trim().is_empty() {
        placeholder.to_string()
    } else {
        value
    }
}
