//! Identity-based deduplication of raw readings
//!
//! The first reading seen for a `reading_id` is kept and every later reading
//! with the same id is rejected before validation. Readings whose id is empty
//! after trimming cannot be compared and always pass through.

use crate::app::models::RawReading;
use std::collections::{HashMap, HashSet};

/// Routing decision for one reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DedupDecision {
    /// First occurrence, or no usable identity
    Keep,
    /// Identity already seen in this run
    Duplicate,
}

/// Tracks identity keys seen during one run
#[derive(Debug, Default)]
pub struct Deduplicator {
    seen: HashSet<String>,
}

impl Deduplicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decide whether a reading is a repeat, recording its identity if new
    pub fn check(&mut self, reading: &RawReading) -> DedupDecision {
        let key = reading.identity_key();
        if key.is_empty() {
            return DedupDecision::Keep;
        }

        if self.seen.insert(key) {
            DedupDecision::Keep
        } else {
            DedupDecision::Duplicate
        }
    }

    /// Number of distinct non-empty identities seen so far
    pub fn seen_count(&self) -> usize {
        self.seen.len()
    }
}

/// Analyze duplicate identities in a collection of readings
///
/// # Returns
///
/// Tuple of (distinct_ids, duplicate_groups, total_duplicates)
pub fn analyze_duplicate_patterns(readings: &[RawReading]) -> (usize, usize, usize) {
    let mut groups: HashMap<String, usize> = HashMap::new();

    for reading in readings {
        let key = reading.identity_key();
        if !key.is_empty() {
            *groups.entry(key).or_insert(0) += 1;
        }
    }

    let distinct_ids = groups.len();
    let duplicate_groups = groups.values().filter(|&&count| count > 1).count();
    let total_duplicates = groups.values().map(|&count| count.saturating_sub(1)).sum();

    (distinct_ids, duplicate_groups, total_duplicates)
}
