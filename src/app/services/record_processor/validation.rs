//! Field-level validation of raw readings
//!
//! Every rule runs independently so one reading can collect several
//! reasons. Numeric rules treat an unparseable value as out of range.

use crate::app::models::{FieldValue, RawReading, RejectReason, numeric, trimmed};
use crate::config::{ValidationConfig, ValueRange};

/// Outcome of validating one reading
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Verdict {
    /// Failure reasons in rule order
    pub reasons: Vec<RejectReason>,
}

impl Verdict {
    pub fn is_valid(&self) -> bool {
        self.reasons.is_empty()
    }

    pub fn into_reasons(self) -> Vec<RejectReason> {
        self.reasons
    }
}

/// Validate a single reading against the configured rules
///
/// Pure function of the reading and the configuration.
pub fn validate_reading(reading: &RawReading, config: &ValidationConfig) -> Verdict {
    let mut reasons = Vec::new();

    if trimmed(&reading.reading_id).is_empty() {
        reasons.push(RejectReason::MissingReadingId);
    }
    if trimmed(&reading.asset_id).is_empty() {
        reasons.push(RejectReason::MissingAssetId);
    }
    if !is_iso_utc_z(reading.ts_utc.as_ref()) {
        reasons.push(RejectReason::BadTsUtc);
    }

    let numeric_rules = [
        (
            &reading.temperature_c,
            &config.temperature_c,
            RejectReason::TemperatureOutOfRange,
        ),
        (
            &reading.vibration_mm_s,
            &config.vibration_mm_s,
            RejectReason::VibrationOutOfRange,
        ),
        (
            &reading.pressure_bar,
            &config.pressure_bar,
            RejectReason::PressureOutOfRange,
        ),
        (
            &reading.flow_l_min,
            &config.flow_l_min,
            RejectReason::FlowOutOfRange,
        ),
        (&reading.rpm, &config.rpm, RejectReason::RpmOutOfRange),
    ];

    for (field, range, reason) in numeric_rules {
        if !in_range(field, range) {
            reasons.push(reason);
        }
    }

    Verdict { reasons }
}

fn in_range(field: &Option<FieldValue>, range: &ValueRange) -> bool {
    numeric(field).is_some_and(|value| range.contains(value))
}

/// Minimal shape check for UTC timestamps such as `2026-02-02T12:30:00Z`
pub fn is_iso_utc_z(ts: Option<&FieldValue>) -> bool {
    match ts.and_then(FieldValue::as_str) {
        Some(s) => !s.is_empty() && s.contains('T') && s.ends_with('Z'),
        None => false,
    }
}
