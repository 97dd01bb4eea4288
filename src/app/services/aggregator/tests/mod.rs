//! Tests for daily aggregation
//!
//! Shared fixtures for asset, plant and health score tests.

pub mod plant_kpis_tests;

use crate::app::models::{AssetDailySummary, AssetInfo, FieldValue, RawReading};
use crate::app::services::asset_registry::AssetRegistry;

pub const TEST_DATE: &str = "2026-02-02";

/// Build a clean reading with the channels the aggregator looks at
pub fn reading(
    asset_id: &str,
    state: &str,
    temperature: Option<FieldValue>,
    vibration: Option<FieldValue>,
    rpm: Option<FieldValue>,
) -> RawReading {
    RawReading {
        reading_id: Some(FieldValue::from("RDG")),
        asset_id: Some(FieldValue::from(asset_id)),
        ts_utc: Some(FieldValue::from("2026-02-02T00:00:00Z")),
        temperature_c: temperature,
        vibration_mm_s: vibration,
        pressure_bar: Some(FieldValue::from(6.0)),
        flow_l_min: Some(FieldValue::from(100.0)),
        rpm,
        operating_state: Some(FieldValue::from(state)),
        sample_interval_sec: Some(FieldValue::from(900i64)),
    }
}

/// Registry entry with every enrichment field populated
pub fn asset_info(asset_id: &str, plant_id: &str) -> AssetInfo {
    AssetInfo {
        asset_id: asset_id.to_string(),
        plant_id: Some(plant_id.to_string()),
        asset_type: Some("pump".to_string()),
        manufacturer: Some("Acme".to_string()),
        model: Some("P-100".to_string()),
        install_date: Some("2019-05-01".to_string()),
        criticality: Some("high".to_string()),
        maintenance_strategy: Some("predictive".to_string()),
    }
}

pub fn registry(entries: &[(&str, &str)]) -> AssetRegistry {
    AssetRegistry::from_assets(
        entries
            .iter()
            .map(|(asset_id, plant_id)| asset_info(asset_id, plant_id)),
    )
}

/// Asset summary with only the fields the plant rollup reads
pub fn summary(
    plant_id: &str,
    asset_id: &str,
    readings: u64,
    running_ratio: f64,
    temperature: Option<f64>,
    vibration: Option<f64>,
    health_score: f64,
) -> AssetDailySummary {
    AssetDailySummary {
        date: TEST_DATE.to_string(),
        plant_id: plant_id.to_string(),
        asset_id: asset_id.to_string(),
        asset_type: "pump".to_string(),
        criticality: "high".to_string(),
        maintenance_strategy: "predictive".to_string(),
        readings,
        running_ratio,
        temperature_c_mean: temperature,
        vibration_mm_s_mean: vibration,
        vibration_mm_s_max: vibration,
        rpm_mean: None,
        health_score,
    }
}
