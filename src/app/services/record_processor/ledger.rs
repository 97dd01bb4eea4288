//! Quality ledger and the quality report it produces
//!
//! The ledger is owned by a single processing call and finished into an
//! immutable [`QualityReport`] snapshot once every reading has been routed.

use crate::app::models::RejectReason;

/// Count of readings rejected for one reason
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReasonCount {
    pub reason: RejectReason,
    pub count: usize,
}

/// Accumulates routing outcomes for one run
#[derive(Debug, Default)]
pub struct QualityLedger {
    total: usize,
    clean: usize,
    rejects: usize,
    dup_rejects: usize,
    /// Buckets in first-seen order
    reasons: Vec<ReasonCount>,
}

impl QualityLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_clean(&mut self) {
        self.total += 1;
        self.clean += 1;
    }

    pub fn record_duplicate(&mut self) {
        self.total += 1;
        self.rejects += 1;
        self.dup_rejects += 1;
        self.bump(RejectReason::DuplicateReadingId);
    }

    /// Record a validation failure; each reason increments its own bucket
    pub fn record_rejected(&mut self, reasons: &[RejectReason]) {
        self.total += 1;
        self.rejects += 1;
        for &reason in reasons {
            self.bump(reason);
        }
    }

    fn bump(&mut self, reason: RejectReason) {
        match self.reasons.iter_mut().find(|bucket| bucket.reason == reason) {
            Some(bucket) => bucket.count += 1,
            None => self.reasons.push(ReasonCount { reason, count: 1 }),
        }
    }

    /// Snapshot the ledger; reasons sorted by descending count, ties in first-seen order
    pub fn finish(self) -> QualityReport {
        let mut reasons = self.reasons;
        reasons.sort_by(|a, b| b.count.cmp(&a.count));

        QualityReport {
            total: self.total,
            clean: self.clean,
            rejects: self.rejects,
            dup_rejects: self.dup_rejects,
            reasons,
        }
    }
}

/// Snapshot of one validation/deduplication run
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QualityReport {
    /// Every reading seen
    pub total: usize,
    /// Readings routed to the clean set
    pub clean: usize,
    /// Readings routed to quarantine, duplicates included
    pub rejects: usize,
    /// Subset of `rejects` caused by a repeated identity
    pub dup_rejects: usize,
    /// Reason histogram sorted by descending count
    pub reasons: Vec<ReasonCount>,
}

impl QualityReport {
    /// Count for one reason, zero when never seen
    pub fn reason_count(&self, reason: RejectReason) -> usize {
        self.reasons
            .iter()
            .find(|bucket| bucket.reason == reason)
            .map_or(0, |bucket| bucket.count)
    }

    /// Percentage of readings that were clean
    pub fn clean_rate(&self) -> f64 {
        if self.total == 0 {
            100.0
        } else {
            (self.clean as f64 / self.total as f64) * 100.0
        }
    }

    /// Percentage of readings that were quarantined
    pub fn reject_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            (self.rejects as f64 / self.total as f64) * 100.0
        }
    }

    /// True when the ledger counts agree with each other
    pub fn is_consistent(&self) -> bool {
        self.clean + self.rejects == self.total && self.rejects >= self.dup_rejects
    }

    /// One-line summary for logging
    pub fn summary(&self) -> String {
        format!(
            "Quality Summary: {} readings | {} clean ({:.1}%) | {} rejected ({:.1}%) | {} duplicates",
            self.total,
            self.clean,
            self.clean_rate(),
            self.rejects,
            self.reject_rate(),
            self.dup_rejects
        )
    }
}
