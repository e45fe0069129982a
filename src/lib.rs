// src/lib.rs

//! Shipment tracking extractor library.
//!
//! Turns an aggregator's tracking page into a normalized [`TrackingSnapshot`]
//! using ordered selector heuristics that tolerate markup changes.
//!
//! [`TrackingSnapshot`]: models::TrackingSnapshot

#[cfg(feature = "server")]
pub mod api;
pub mod error;
pub mod fetcher;
pub mod models;
pub mod services;
pub mod utils;
