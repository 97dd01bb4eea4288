//! Core data structures for sensor readings and their aggregates.
//!
//! Raw readings keep every field as an optional scalar so that malformed
//! input is carried through to quarantine untouched. Numeric interpretation
//! happens only through [`FieldValue::as_f64`], which reports unusable values
//! as `None` instead of a sentinel.

use crate::constants::{REASON_DELIMITER, fields};
use serde_json::{Map, Number, Value};
use std::fmt;

/// A single scalar as it arrived from the input
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    /// Numeric literal; keeps the original rendering for output
    Number(Number),
    Bool(bool),
}

impl FieldValue {
    /// Build from a JSON value; `null` is absence
    pub fn from_json(value: Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::String(s) => Some(FieldValue::Text(s)),
            Value::Number(n) => Some(FieldValue::Number(n)),
            Value::Bool(b) => Some(FieldValue::Bool(b)),
            other => Some(FieldValue::Text(other.to_string())),
        }
    }

    /// Build from a tabular cell; empty cells are absence
    pub fn from_cell(cell: Option<&str>) -> Option<Self> {
        match cell {
            Some(s) if !s.is_empty() => Some(FieldValue::Text(s.to_string())),
            _ => None,
        }
    }

    /// Interpret as a finite real number
    pub fn as_f64(&self) -> Option<f64> {
        let parsed = match self {
            FieldValue::Number(n) => n.as_f64(),
            FieldValue::Text(s) => s.trim().parse::<f64>().ok(),
            FieldValue::Bool(_) => None,
        };
        parsed.filter(|v| v.is_finite())
    }

    /// Textual content with surrounding whitespace removed
    pub fn trimmed_text(&self) -> String {
        self.to_string().trim().to_string()
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => write!(f, "{}", s),
            FieldValue::Number(n) => write!(f, "{}", n),
            FieldValue::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Number::from_f64(value)
            .map(FieldValue::Number)
            .unwrap_or_else(|| FieldValue::Text(value.to_string()))
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Number(Number::from(value))
    }
}

/// Reads a field through `as_f64`
pub fn numeric(field: &Option<FieldValue>) -> Option<f64> {
    field.as_ref().and_then(FieldValue::as_f64)
}

/// Trimmed text of a field; absent fields read as empty
pub fn trimmed(field: &Option<FieldValue>) -> String {
    field
        .as_ref()
        .map(FieldValue::trimmed_text)
        .unwrap_or_default()
}

/// One sensor observation as landed in bronze
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawReading {
    pub reading_id: Option<FieldValue>,
    pub asset_id: Option<FieldValue>,
    pub ts_utc: Option<FieldValue>,
    pub temperature_c: Option<FieldValue>,
    pub vibration_mm_s: Option<FieldValue>,
    pub pressure_bar: Option<FieldValue>,
    pub flow_l_min: Option<FieldValue>,
    pub rpm: Option<FieldValue>,
    pub operating_state: Option<FieldValue>,
    pub sample_interval_sec: Option<FieldValue>,
}

impl RawReading {
    /// Build from a decoded JSON object; unknown keys are ignored
    pub fn from_json_object(mut object: Map<String, Value>) -> Self {
        let mut take = |name: &str| object.remove(name).and_then(FieldValue::from_json);
        Self {
            reading_id: take(fields::READING_ID),
            asset_id: take(fields::ASSET_ID),
            ts_utc: take(fields::TS_UTC),
            temperature_c: take(fields::TEMPERATURE_C),
            vibration_mm_s: take(fields::VIBRATION_MM_S),
            pressure_bar: take(fields::PRESSURE_BAR),
            flow_l_min: take(fields::FLOW_L_MIN),
            rpm: take(fields::RPM),
            operating_state: take(fields::OPERATING_STATE),
            sample_interval_sec: take(fields::SAMPLE_INTERVAL_SEC),
        }
    }

    /// Identity key after trimming; empty when absent
    pub fn identity_key(&self) -> String {
        trimmed(&self.reading_id)
    }

    /// Asset key after trimming; empty when absent
    pub fn asset_key(&self) -> String {
        trimmed(&self.asset_id)
    }

    pub fn is_running(&self) -> bool {
        trimmed(&self.operating_state) == crate::constants::RUNNING_STATE
    }

    /// Fields in output column order
    pub fn columns(&self) -> [&Option<FieldValue>; 10] {
        [
            &self.reading_id,
            &self.asset_id,
            &self.ts_utc,
            &self.temperature_c,
            &self.vibration_mm_s,
            &self.pressure_bar,
            &self.flow_l_min,
            &self.rpm,
            &self.operating_state,
            &self.sample_interval_sec,
        ]
    }
}

/// Closed set of reasons a reading can be quarantined for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RejectReason {
    DuplicateReadingId,
    MissingReadingId,
    MissingAssetId,
    BadTsUtc,
    TemperatureOutOfRange,
    VibrationOutOfRange,
    PressureOutOfRange,
    FlowOutOfRange,
    RpmOutOfRange,
}

impl RejectReason {
    /// Stable token used in outputs and reports
    pub fn as_str(&self) -> &'static str {
        match self {
            RejectReason::DuplicateReadingId => "duplicate_reading_id",
            RejectReason::MissingReadingId => "missing_reading_id",
            RejectReason::MissingAssetId => "missing_asset_id",
            RejectReason::BadTsUtc => "bad_ts_utc",
            RejectReason::TemperatureOutOfRange => "temperature_out_of_range",
            RejectReason::VibrationOutOfRange => "vibration_out_of_range",
            RejectReason::PressureOutOfRange => "pressure_out_of_range",
            RejectReason::FlowOutOfRange => "flow_out_of_range",
            RejectReason::RpmOutOfRange => "rpm_out_of_range",
        }
    }
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rejected reading with every original field preserved
#[derive(Debug, Clone, PartialEq)]
pub struct QuarantinedReading {
    pub reading: RawReading,
    pub reasons: Vec<RejectReason>,
}

impl QuarantinedReading {
    pub fn new(reading: RawReading, reasons: Vec<RejectReason>) -> Self {
        Self { reading, reasons }
    }

    /// All reasons joined for the `reject_reason` column
    pub fn reject_reason(&self) -> String {
        self.reasons
            .iter()
            .map(RejectReason::as_str)
            .collect::<Vec<_>>()
            .join(REASON_DELIMITER)
    }

    pub fn is_duplicate(&self) -> bool {
        self.reasons == [RejectReason::DuplicateReadingId]
    }
}

/// Reference data for one asset
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssetInfo {
    pub asset_id: String,
    pub plant_id: Option<String>,
    pub asset_type: Option<String>,
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub install_date: Option<String>,
    pub criticality: Option<String>,
    pub maintenance_strategy: Option<String>,
}

/// Enrichment attached to an asset summary, with placeholders filled in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enrichment {
    pub plant_id: String,
    pub asset_type: String,
    pub criticality: String,
    pub maintenance_strategy: String,
}

/// One row per (date, asset)
#[derive(Debug, Clone, PartialEq)]
pub struct AssetDailySummary {
    pub date: String,
    pub plant_id: String,
    pub asset_id: String,
    pub asset_type: String,
    pub criticality: String,
    pub maintenance_strategy: String,
    pub readings: u64,
    pub running_ratio: f64,
    pub temperature_c_mean: Option<f64>,
    pub vibration_mm_s_mean: Option<f64>,
    pub vibration_mm_s_max: Option<f64>,
    pub rpm_mean: Option<f64>,
    pub health_score: f64,
}

/// One row per (date, plant)
#[derive(Debug, Clone, PartialEq)]
pub struct PlantDailyKpi {
    pub date: String,
    pub plant_id: String,
    pub assets_count: u64,
    pub total_readings: u64,
    pub avg_running_ratio: Option<f64>,
    pub avg_temperature_c: Option<f64>,
    pub avg_vibration_mm_s: Option<f64>,
    pub avg_health_score: Option<f64>,
}
