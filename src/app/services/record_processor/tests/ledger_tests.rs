//! Tests for the quality ledger and report

use crate::app::models::RejectReason;
use crate::app::services::record_processor::ledger::{QualityLedger, QualityReport, ReasonCount};

#[test]
fn test_empty_ledger() {
    let report = QualityLedger::new().finish();

    assert_eq!(report, QualityReport::default());
    assert_eq!(report.clean_rate(), 100.0);
    assert_eq!(report.reject_rate(), 0.0);
    assert!(report.is_consistent());
}

#[test]
fn test_counts_accumulate() {
    let mut ledger = QualityLedger::new();
    ledger.record_clean();
    ledger.record_clean();
    ledger.record_duplicate();
    ledger.record_rejected(&[RejectReason::MissingAssetId, RejectReason::BadTsUtc]);

    let report = ledger.finish();
    assert_eq!(report.total, 4);
    assert_eq!(report.clean, 2);
    assert_eq!(report.rejects, 2);
    assert_eq!(report.dup_rejects, 1);
    assert_eq!(report.clean_rate(), 50.0);
    assert!(report.is_consistent());
}

#[test]
fn test_each_reason_has_its_own_bucket() {
    let mut ledger = QualityLedger::new();
    ledger.record_rejected(&[
        RejectReason::MissingReadingId,
        RejectReason::MissingAssetId,
        RejectReason::BadTsUtc,
    ]);

    let report = ledger.finish();
    assert_eq!(report.rejects, 1);
    assert_eq!(report.reasons.len(), 3);
    assert_eq!(report.reason_count(RejectReason::MissingReadingId), 1);
    assert_eq!(report.reason_count(RejectReason::MissingAssetId), 1);
    assert_eq!(report.reason_count(RejectReason::BadTsUtc), 1);
    assert_eq!(report.reason_count(RejectReason::RpmOutOfRange), 0);
}

#[test]
fn test_reasons_sorted_by_count_with_stable_ties() {
    let mut ledger = QualityLedger::new();
    ledger.record_rejected(&[RejectReason::TemperatureOutOfRange]);
    ledger.record_rejected(&[RejectReason::MissingAssetId]);
    ledger.record_duplicate();
    ledger.record_rejected(&[RejectReason::PressureOutOfRange]);
    ledger.record_rejected(&[RejectReason::PressureOutOfRange]);
    ledger.record_duplicate();

    let report = ledger.finish();
    assert_eq!(
        report.reasons,
        vec![
            ReasonCount {
                reason: RejectReason::DuplicateReadingId,
                count: 2
            },
            ReasonCount {
                reason: RejectReason::PressureOutOfRange,
                count: 2
            },
            ReasonCount {
                reason: RejectReason::TemperatureOutOfRange,
                count: 1
            },
            ReasonCount {
                reason: RejectReason::MissingAssetId,
                count: 1
            },
        ]
    );
}

#[test]
fn test_summary_mentions_counts() {
    let mut ledger = QualityLedger::new();
    ledger.record_clean();
    ledger.record_duplicate();

    let summary = ledger.finish().summary();
    assert!(summary.contains("2 readings"));
    assert!(summary.contains("1 clean (50.0%)"));
    assert!(summary.contains("1 duplicates"));
}
