//! Service layer for the tracker.
//!
//! This module contains the business logic for:
//! - Field extraction (`FieldExtractor`)
//! - Event timeline extraction (`EventExtractor`)
//! - Snapshot assembly (`SnapshotAssembler`)
//! - Tracking lookups (`TrackingService`)

pub mod assembler;
pub mod events;
pub mod fields;
pub mod tracking;

pub use assembler::SnapshotAssembler;
pub use events::EventExtractor;
pub use fields::FieldExtractor;
pub use tracking::TrackingService;
