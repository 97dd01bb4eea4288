//! Tests for the record processor module
//!
//! Shared fixtures for deduplication, validation, ledger and processor tests.

pub mod deduplication_tests;
pub mod ledger_tests;

use crate::app::models::{FieldValue, RawReading};

/// Create a reading that passes every validation rule
pub fn create_valid_reading(reading_id: &str, asset_id: &str) -> RawReading {
    RawReading {
        reading_id: Some(FieldValue::from(reading_id)),
        asset_id: Some(FieldValue::from(asset_id)),
        ts_utc: Some(FieldValue::from("2026-02-02T12:30:00Z")),
        temperature_c: Some(FieldValue::from(55.12)),
        vibration_mm_s: Some(FieldValue::from(2.1)),
        pressure_bar: Some(FieldValue::from(6.5)),
        flow_l_min: Some(FieldValue::from(120.4)),
        rpm: Some(FieldValue::from(2900i64)),
        operating_state: Some(FieldValue::from("running")),
        sample_interval_sec: Some(FieldValue::from(900i64)),
    }
}

/// Create a valid reading with one field replaced
pub fn with_field(
    mut reading: RawReading,
    field: &str,
    value: Option<FieldValue>,
) -> RawReading {
    match field {
        "reading_id" => reading.reading_id = value,
        "asset_id" => reading.asset_id = value,
        "ts_utc" => reading.ts_utc = value,
        "temperature_c" => reading.temperature_c = value,
        "vibration_mm_s" => reading.vibration_mm_s = value,
        "pressure_bar" => reading.pressure_bar = value,
        "flow_l_min" => reading.flow_l_min = value,
        "rpm" => reading.rpm = value,
        "operating_state" => reading.operating_state = value,
        "sample_interval_sec" => reading.sample_interval_sec = value,
        other => panic!("unknown field {}", other),
    }
    reading
}
