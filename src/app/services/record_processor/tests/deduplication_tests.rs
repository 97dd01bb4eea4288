//! Tests for identity-based deduplication

use super::*;
use crate::app::services::record_processor::deduplication::{
    DedupDecision, Deduplicator, analyze_duplicate_patterns,
};

#[test]
fn test_first_occurrence_kept() {
    let mut deduplicator = Deduplicator::new();

    let first = create_valid_reading("RDG-1", "AST-1");
    let second = create_valid_reading("RDG-2", "AST-1");

    assert_eq!(deduplicator.check(&first), DedupDecision::Keep);
    assert_eq!(deduplicator.check(&second), DedupDecision::Keep);
    assert_eq!(deduplicator.seen_count(), 2);
}

#[test]
fn test_repeats_rejected_regardless_of_content() {
    let mut deduplicator = Deduplicator::new();

    // The first reading is invalid but still claims the identity
    let invalid_first = with_field(create_valid_reading("RDG-1", "AST-1"), "asset_id", None);
    let valid_repeat = create_valid_reading("RDG-1", "AST-2");

    assert_eq!(deduplicator.check(&invalid_first), DedupDecision::Keep);
    assert_eq!(deduplicator.check(&valid_repeat), DedupDecision::Duplicate);
    assert_eq!(deduplicator.check(&valid_repeat), DedupDecision::Duplicate);
}

#[test]
fn test_identity_compared_after_trimming() {
    let mut deduplicator = Deduplicator::new();

    let plain = create_valid_reading("RDG-1", "AST-1");
    let padded = create_valid_reading("  RDG-1 ", "AST-1");

    assert_eq!(deduplicator.check(&plain), DedupDecision::Keep);
    assert_eq!(deduplicator.check(&padded), DedupDecision::Duplicate);
}

#[test]
fn test_empty_identities_never_deduplicated() {
    let mut deduplicator = Deduplicator::new();

    let missing = with_field(create_valid_reading("", "AST-1"), "reading_id", None);
    let empty = create_valid_reading("", "AST-1");
    let blank = create_valid_reading("   ", "AST-1");

    for reading in [&missing, &empty, &blank, &missing, &blank] {
        assert_eq!(deduplicator.check(reading), DedupDecision::Keep);
    }
    assert_eq!(deduplicator.seen_count(), 0);
}

#[test]
fn test_numeric_identity_uses_text_rendering() {
    let mut deduplicator = Deduplicator::new();

    let numeric_id = with_field(
        create_valid_reading("", "AST-1"),
        "reading_id",
        Some(FieldValue::from(42i64)),
    );
    let text_id = create_valid_reading("42", "AST-1");

    assert_eq!(deduplicator.check(&numeric_id), DedupDecision::Keep);
    assert_eq!(deduplicator.check(&text_id), DedupDecision::Duplicate);
}

#[test]
fn test_analyze_duplicate_patterns() {
    let readings = vec![
        create_valid_reading("RDG-1", "AST-1"),
        create_valid_reading("RDG-1", "AST-1"),
        create_valid_reading("RDG-1", "AST-1"),
        create_valid_reading("RDG-2", "AST-1"),
        create_valid_reading("RDG-3", "AST-1"),
        create_valid_reading("RDG-3", "AST-1"),
        create_valid_reading("", "AST-1"),
        create_valid_reading("", "AST-1"),
    ];

    let (distinct, duplicate_groups, total_duplicates) = analyze_duplicate_patterns(&readings);
    assert_eq!(distinct, 3);
    assert_eq!(duplicate_groups, 2);
    assert_eq!(total_duplicates, 3);
}
