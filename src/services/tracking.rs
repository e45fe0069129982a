// src/services/tracking.rs

//! Tracking service.
//!
//! Validates the query, fetches the page and runs the extraction engine.

use std::sync::Arc;

use futures::stream::{self, StreamExt};

use crate::error::{AppError, Result};
use crate::fetcher::Fetcher;
use crate::models::{LocaleConfig, TrackingQuery, TrackingSnapshot};
use crate::services::assembler::SnapshotAssembler;

/// Service answering tracking lookups.
pub struct TrackingService {
    fetcher: Arc<dyn Fetcher>,
    locale: Arc<LocaleConfig>,
    max_concurrent: usize,
}

impl TrackingService {
    pub fn new(fetcher: Arc<dyn Fetcher>, locale: LocaleConfig, max_concurrent: usize) -> Self {
        Self {
            fetcher,
            locale: Arc::new(locale),
            max_concurrent: max_concurrent.max(1),
        }
    }

    pub fn locale(&self) -> &LocaleConfig {
        &self.locale
    }

    /// Look up one tracking number.
    ///
    /// Blank input fails with [`AppError::Validation`] before any fetch.
    /// Once a page is obtained the lookup cannot fail.
    pub async fn track(&self, raw: &str) -> Result<TrackingSnapshot> {
        let query = TrackingQuery::parse(raw)?;

        let page = self.fetcher.fetch(&query).await.map_err(|e| {
            log::warn!(
                "Fetching {} via {} failed: {}",
                query,
                self.fetcher.name(),
                e
            );
            AppError::from(e)
        })?;
        log::debug!(
            "Fetched {} ({} bytes, status {}) in {}ms",
            page.url,
            page.html.len(),
            page.status,
            page.elapsed.as_millis()
        );

        let assembler = SnapshotAssembler::new(&self.locale.placeholders);
        let snapshot = assembler.snapshot_from_html(&query, &page.html);
        log::info!(
            "Tracked {}: status '{}', {} event(s)",
            snapshot.tracking_number,
            snapshot.status,
            snapshot.events.len()
        );
        Ok(snapshot)
    }

    /// Look up one tracking number, folding failures into the snapshot.
    pub async fn track_or_failed(&self, raw: &str) -> TrackingSnapshot {
        match self.track(raw).await {
            Ok(snapshot) => snapshot,
            Err(e) => TrackingSnapshot::failed(self.user_message(&e)),
        }
    }

    /// Look up several tracking numbers concurrently, preserving input order.
    pub async fn track_many(&self, numbers: &[String]) -> Vec<TrackingSnapshot> {
        stream::iter(numbers)
            .map(|number| self.track_or_failed(number))
            .buffered(self.max_concurrent)
            .collect::<Vec<_>>()
            .await
    }

    /// Localized message shown to callers for an error.
    ///
    /// Only validation errors are specific; everything else gets the generic
    /// failure message.
    pub fn user_message(&self, error: &AppError) -> String {
        match error {
            AppError::Validation(_) => self.locale.messages.missing_tracking_number.clone(),
            _ => self.locale.messages.fetch_failed.clone(),
        }
    }
}
