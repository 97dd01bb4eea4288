//! Stage-one orchestration: deduplicate, validate, and route readings
//!
//! The processor owns no state between calls. Each call to
//! [`RecordProcessor::process`] builds its own deduplicator and ledger, so
//! repeated runs over the same input produce identical outcomes.

use crate::app::models::{QuarantinedReading, RawReading, RejectReason};
use crate::config::ValidationConfig;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use super::{
    deduplication::{DedupDecision, Deduplicator, analyze_duplicate_patterns},
    ledger::{QualityLedger, QualityReport},
    validation::validate_reading,
};

/// Result of routing a batch of readings
#[derive(Debug, Clone, Default)]
pub struct SilverOutcome {
    /// Readings that passed deduplication and validation, in input order
    pub clean: Vec<RawReading>,
    /// Rejected readings with their reasons, in input order
    pub quarantine: Vec<QuarantinedReading>,
    /// Counts and reason histogram for the batch
    pub report: QualityReport,
}

/// Record processor for raw sensor readings
///
/// # Example
///
/// ```rust
/// use ops_kpi_pipeline::app::services::record_processor::RecordProcessor;
/// use ops_kpi_pipeline::config::ValidationConfig;
///
/// let processor = RecordProcessor::new(ValidationConfig::default());
/// let outcome = processor.process(Vec::new());
/// assert_eq!(outcome.report.total, 0);
/// ```
#[derive(Debug, Clone)]
pub struct RecordProcessor {
    validation: ValidationConfig,
    show_progress: bool,
}

impl RecordProcessor {
    pub fn new(validation: ValidationConfig) -> Self {
        Self {
            validation,
            show_progress: false,
        }
    }

    /// Show a progress bar while routing readings
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Route every reading to the clean set or to quarantine
    ///
    /// Duplicates are rejected before validation runs; the first reading with
    /// a given identity is always the one that reaches the validator.
    pub fn process(&self, readings: Vec<RawReading>) -> SilverOutcome {
        info!("Starting validation of {} readings", readings.len());

        let (distinct_ids, duplicate_groups, total_duplicates) =
            analyze_duplicate_patterns(&readings);
        debug!(
            "{} distinct reading ids, {} repeated ids accounting for {} duplicates",
            distinct_ids, duplicate_groups, total_duplicates
        );

        let progress = self
            .show_progress
            .then(|| Self::create_progress_bar(readings.len() as u64));

        let mut deduplicator = Deduplicator::new();
        let mut ledger = QualityLedger::new();
        let mut clean = Vec::new();
        let mut quarantine = Vec::new();

        for reading in readings {
            match deduplicator.check(&reading) {
                DedupDecision::Duplicate => {
                    debug!("Rejected duplicate reading_id {}", reading.identity_key());
                    ledger.record_duplicate();
                    quarantine.push(QuarantinedReading::new(
                        reading,
                        vec![RejectReason::DuplicateReadingId],
                    ));
                }
                DedupDecision::Keep => {
                    let verdict = validate_reading(&reading, &self.validation);
                    if verdict.is_valid() {
                        ledger.record_clean();
                        clean.push(reading);
                    } else {
                        ledger.record_rejected(&verdict.reasons);
                        let quarantined =
                            QuarantinedReading::new(reading, verdict.into_reasons());
                        debug!(
                            "Rejected reading {:?}: {}",
                            quarantined.reading.identity_key(),
                            quarantined.reject_reason()
                        );
                        quarantine.push(quarantined);
                    }
                }
            }

            if let Some(pb) = &progress {
                pb.inc(1);
            }
        }

        let report = ledger.finish();

        if let Some(pb) = progress {
            pb.finish_with_message(format!(
                "Validation complete: {} clean, {} rejected",
                report.clean, report.rejects
            ));
        }

        info!("{}", report.summary());

        SilverOutcome {
            clean,
            quarantine,
            report,
        }
    }

    fn create_progress_bar(total: u64) -> ProgressBar {
        let pb = ProgressBar::new(total);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-");
        pb.set_style(style);
        pb.set_message("Validating readings");
        pb
    }
}
