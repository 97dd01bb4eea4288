//! Application constants for the KPI pipeline
//!
//! File names, column orders, reason tokens and placeholders shared by the
//! loader, the two processing stages and the output writer.

// =============================================================================
// Lake Layout
// =============================================================================

/// Default lake root relative to the working directory
pub const DEFAULT_LAKE_ROOT: &str = "lake";

/// Default directory for human-readable reports
pub const DEFAULT_REPORTS_DIR: &str = "reports";

/// Default directory for exported copies of business-facing tables
pub const DEFAULT_EXPORTS_DIR: &str = "exports";

/// Zone names under the lake root
pub const BRONZE_ZONE: &str = "bronze";
pub const SILVER_ZONE: &str = "silver";
pub const QUARANTINE_ZONE: &str = "quarantine";
pub const GOLD_ZONE: &str = "gold";

/// Raw sensor readings landed by the generator
pub const BRONZE_READINGS_FILE: &str = "sensor_readings.jsonl";

/// Asset reference side table landed by the generator
pub const ASSETS_FILE: &str = "assets.csv";

pub const CLEAN_READINGS_FILE: &str = "sensor_readings_clean.csv";
pub const REJECTED_READINGS_FILE: &str = "sensor_readings_rejects.csv";
pub const ASSET_HEALTH_FILE: &str = "asset_health_daily.csv";
pub const PLANT_KPIS_FILE: &str = "plant_kpis.csv";

/// Suffix for staged outputs that have not been committed yet
pub const STAGED_SUFFIX: &str = "partial";

/// Suffix for a previous output held aside while a commit publishes
pub const BACKUP_SUFFIX: &str = "previous";

/// Date format used in paths and output rows
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// =============================================================================
// Record Fields
// =============================================================================

pub mod fields {
    pub const READING_ID: &str = "reading_id";
    pub const ASSET_ID: &str = "asset_id";
    pub const TS_UTC: &str = "ts_utc";
    pub const TEMPERATURE_C: &str = "temperature_c";
    pub const VIBRATION_MM_S: &str = "vibration_mm_s";
    pub const PRESSURE_BAR: &str = "pressure_bar";
    pub const FLOW_L_MIN: &str = "flow_l_min";
    pub const RPM: &str = "rpm";
    pub const OPERATING_STATE: &str = "operating_state";
    pub const SAMPLE_INTERVAL_SEC: &str = "sample_interval_sec";
    pub const REJECT_REASON: &str = "reject_reason";

    pub const PLANT_ID: &str = "plant_id";
    pub const ASSET_TYPE: &str = "asset_type";
    pub const MANUFACTURER: &str = "manufacturer";
    pub const MODEL: &str = "model";
    pub const INSTALL_DATE: &str = "install_date";
    pub const CRITICALITY: &str = "criticality";
    pub const MAINTENANCE_STRATEGY: &str = "maintenance_strategy";
}

/// Column order of the clean (silver) table
pub const CLEAN_COLUMNS: &[&str] = &[
    fields::READING_ID,
    fields::ASSET_ID,
    fields::TS_UTC,
    fields::TEMPERATURE_C,
    fields::VIBRATION_MM_S,
    fields::PRESSURE_BAR,
    fields::FLOW_L_MIN,
    fields::RPM,
    fields::OPERATING_STATE,
    fields::SAMPLE_INTERVAL_SEC,
];

/// Column order of the per-asset daily summary
pub const ASSET_SUMMARY_COLUMNS: &[&str] = &[
    "date",
    "plant_id",
    "asset_id",
    "asset_type",
    "criticality",
    "maintenance_strategy",
    "readings",
    "running_ratio",
    "temperature_c_mean",
    "vibration_mm_s_mean",
    "vibration_mm_s_max",
    "rpm_mean",
    "health_score",
];

/// Column order of the per-plant KPI table
pub const PLANT_KPI_COLUMNS: &[&str] = &[
    "date",
    "plant_id",
    "assets_count",
    "total_readings",
    "avg_running_ratio",
    "avg_temperature_c",
    "avg_vibration_mm_s",
    "avg_health_score",
];

// =============================================================================
// Quality Control
// =============================================================================

/// Delimiter joining multiple reasons in the `reject_reason` column
pub const REASON_DELIMITER: &str = "|";

/// Operating state counted towards the running ratio
pub const RUNNING_STATE: &str = "running";

/// Placeholder for enrichment fields with no asset reference match
pub const UNKNOWN_PLACEHOLDER: &str = "UNKNOWN";

/// Default sanity ranges (inclusive) for the numeric sensor channels
pub mod ranges {
    pub const TEMPERATURE_C: (f64, f64) = (-40.0, 200.0);
    pub const VIBRATION_MM_S: (f64, f64) = (0.0, 50.0);
    pub const PRESSURE_BAR: (f64, f64) = (0.0, 50.0);
    pub const FLOW_L_MIN: (f64, f64) = (0.0, 5000.0);
    pub const RPM: (f64, f64) = (0.0, 20000.0);
}

/// Health score heuristic constants. Not a physical model.
pub mod health {
    pub const BASE_SCORE: f64 = 100.0;
    pub const VIBRATION_WEIGHT: f64 = 8.0;
    pub const VIBRATION_PENALTY_CAP: f64 = 40.0;
    pub const TEMPERATURE_THRESHOLD_C: f64 = 80.0;
    pub const TEMPERATURE_WEIGHT: f64 = 0.5;
    pub const TEMPERATURE_PENALTY_CAP: f64 = 20.0;
    pub const MIN_SCORE: f64 = 0.0;
    pub const MAX_SCORE: f64 = 100.0;
}

/// Decimal places used when publishing aggregate values
pub mod precision {
    pub const RUNNING_RATIO: i32 = 3;
    pub const TEMPERATURE: i32 = 2;
    pub const VIBRATION: i32 = 3;
    pub const RPM: i32 = 0;
    pub const HEALTH_SCORE: i32 = 1;
    pub const AVG_HEALTH_SCORE: i32 = 2;
}

/// Round to a fixed number of decimal places, ties to even
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round_ties_even() / factor
}

/// Name of the data quality report for a run date
pub fn quality_report_filename(date: &str) -> String {
    format!("dq_{}.md", date)
}
