//! Record processing for raw sensor readings (bronze to silver)
//!
//! This module turns the raw reading stream into a clean set and a
//! quarantine side channel, keeping a ledger of what happened.
//!
//! # Architecture
//!
//! - [`processor`] - RecordProcessor and per-run orchestration
//! - [`deduplication`] - first-seen-wins identity tracking
//! - [`validation`] - field-level rules producing ordered reject reasons
//! - [`ledger`] - counters, reason histogram and the quality report
//!
//! # Processing Pipeline
//!
//! 1. **Deduplication**: a repeated `reading_id` is quarantined as
//!    `duplicate_reading_id` and never reaches validation
//! 2. **Validation**: every rule runs; a reading is clean iff no rule failed
//! 3. **Ledger**: every routing decision is counted
//!
//! Validation failures are expected outcomes, not errors. Nothing in this
//! module returns `Result`.

pub mod deduplication;
pub mod ledger;
pub mod processor;
pub mod validation;

#[cfg(test)]
pub mod tests;

pub use deduplication::{DedupDecision, Deduplicator, analyze_duplicate_patterns};
pub use ledger::{QualityLedger, QualityReport, ReasonCount};
pub use processor::{RecordProcessor, SilverOutcome};
pub use validation::{Verdict, is_iso_utc_z, validate_reading};
