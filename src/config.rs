//! Configuration management and validation.
//!
//! Provides the lake layout, the validation sanity ranges and the health
//! score constants. Defaults reproduce the published behaviour; a TOML file
//! may override any subset of them.

use crate::constants::{
    ASSET_HEALTH_FILE, ASSETS_FILE, BRONZE_READINGS_FILE, BRONZE_ZONE, CLEAN_READINGS_FILE,
    DEFAULT_EXPORTS_DIR, DEFAULT_LAKE_ROOT, DEFAULT_REPORTS_DIR, GOLD_ZONE, PLANT_KPIS_FILE,
    QUARANTINE_ZONE, REJECTED_READINGS_FILE, SILVER_ZONE, health, quality_report_filename, ranges,
};
use crate::error::{PipelineError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Inclusive numeric range used for sanity checks
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// NaN never lies inside a range
    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }

    fn from_bounds(bounds: (f64, f64)) -> Self {
        Self::new(bounds.0, bounds.1)
    }
}

/// Sanity ranges applied by the validator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    pub temperature_c: ValueRange,
    pub vibration_mm_s: ValueRange,
    pub pressure_bar: ValueRange,
    pub flow_l_min: ValueRange,
    pub rpm: ValueRange,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            temperature_c: ValueRange::from_bounds(ranges::TEMPERATURE_C),
            vibration_mm_s: ValueRange::from_bounds(ranges::VIBRATION_MM_S),
            pressure_bar: ValueRange::from_bounds(ranges::PRESSURE_BAR),
            flow_l_min: ValueRange::from_bounds(ranges::FLOW_L_MIN),
            rpm: ValueRange::from_bounds(ranges::RPM),
        }
    }
}

impl ValidationConfig {
    fn named_ranges(&self) -> [(&'static str, &ValueRange); 5] {
        [
            ("temperature_c", &self.temperature_c),
            ("vibration_mm_s", &self.vibration_mm_s),
            ("pressure_bar", &self.pressure_bar),
            ("flow_l_min", &self.flow_l_min),
            ("rpm", &self.rpm),
        ]
    }
}

/// Constants of the health score heuristic
///
/// The score is a business-facing indicator, not a physical model. Changing
/// any of these values changes published output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthScoreConfig {
    pub base_score: f64,
    pub vibration_weight: f64,
    pub vibration_penalty_cap: f64,
    pub temperature_threshold_c: f64,
    pub temperature_weight: f64,
    pub temperature_penalty_cap: f64,
    pub min_score: f64,
    pub max_score: f64,
}

impl Default for HealthScoreConfig {
    fn default() -> Self {
        Self {
            base_score: health::BASE_SCORE,
            vibration_weight: health::VIBRATION_WEIGHT,
            vibration_penalty_cap: health::VIBRATION_PENALTY_CAP,
            temperature_threshold_c: health::TEMPERATURE_THRESHOLD_C,
            temperature_weight: health::TEMPERATURE_WEIGHT,
            temperature_penalty_cap: health::TEMPERATURE_PENALTY_CAP,
            min_score: health::MIN_SCORE,
            max_score: health::MAX_SCORE,
        }
    }
}

/// Directory conventions of the data lake
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LakeLayout {
    pub lake_root: PathBuf,
    pub reports_dir: PathBuf,
    pub exports_dir: PathBuf,
}

impl Default for LakeLayout {
    fn default() -> Self {
        Self {
            lake_root: PathBuf::from(DEFAULT_LAKE_ROOT),
            reports_dir: PathBuf::from(DEFAULT_REPORTS_DIR),
            exports_dir: PathBuf::from(DEFAULT_EXPORTS_DIR),
        }
    }
}

impl LakeLayout {
    /// Layout with every directory rooted under `base`
    pub fn rooted_at(base: &Path) -> Self {
        Self {
            lake_root: base.join(DEFAULT_LAKE_ROOT),
            reports_dir: base.join(DEFAULT_REPORTS_DIR),
            exports_dir: base.join(DEFAULT_EXPORTS_DIR),
        }
    }

    fn zone_dir(&self, zone: &str, date: &str) -> PathBuf {
        self.lake_root.join(zone).join(date)
    }

    pub fn bronze_readings(&self, date: &str) -> PathBuf {
        self.zone_dir(BRONZE_ZONE, date).join(BRONZE_READINGS_FILE)
    }

    pub fn bronze_assets(&self, date: &str) -> PathBuf {
        self.zone_dir(BRONZE_ZONE, date).join(ASSETS_FILE)
    }

    pub fn silver_clean(&self, date: &str) -> PathBuf {
        self.zone_dir(SILVER_ZONE, date).join(CLEAN_READINGS_FILE)
    }

    pub fn quarantine_rejects(&self, date: &str) -> PathBuf {
        self.zone_dir(QUARANTINE_ZONE, date)
            .join(REJECTED_READINGS_FILE)
    }

    pub fn quality_report(&self, date: &str) -> PathBuf {
        self.reports_dir.join(quality_report_filename(date))
    }

    pub fn gold_asset_health(&self, date: &str) -> PathBuf {
        self.zone_dir(GOLD_ZONE, date).join(ASSET_HEALTH_FILE)
    }

    pub fn gold_plant_kpis(&self, date: &str) -> PathBuf {
        self.zone_dir(GOLD_ZONE, date).join(PLANT_KPIS_FILE)
    }

    pub fn exported_plant_kpis(&self, date: &str) -> PathBuf {
        self.exports_dir.join(date).join(PLANT_KPIS_FILE)
    }
}

/// Global configuration for a pipeline run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Where inputs are read from and outputs are written to
    pub layout: LakeLayout,

    /// Sanity ranges for stage 1
    pub validation: ValidationConfig,

    /// Health score constants for stage 2
    pub health: HealthScoreConfig,

    /// Show progress bars while processing records
    pub show_progress: bool,
}

impl PipelineConfig {
    /// Load configuration from a TOML file; missing keys keep their defaults
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            PipelineError::configuration(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;
        let config = Self::from_toml_str(&content)?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| PipelineError::configuration(format!("Invalid TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every range and constant is usable
    pub fn validate(&self) -> Result<()> {
        for (name, range) in self.validation.named_ranges() {
            if !range.min.is_finite() || !range.max.is_finite() {
                return Err(PipelineError::configuration(format!(
                    "Range for {} must be finite",
                    name
                )));
            }
            if range.min > range.max {
                return Err(PipelineError::configuration(format!(
                    "Range for {} has min {} above max {}",
                    name, range.min, range.max
                )));
            }
        }

        let health = &self.health;
        if health.vibration_penalty_cap < 0.0 || health.temperature_penalty_cap < 0.0 {
            return Err(PipelineError::configuration(
                "Health penalty caps must not be negative",
            ));
        }
        if health.min_score > health.max_score {
            return Err(PipelineError::configuration(format!(
                "Health score bounds inverted: {} > {}",
                health.min_score, health.max_score
            )));
        }

        Ok(())
    }

    /// Replace the lake layout
    pub fn with_layout(mut self, layout: LakeLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Override the lake root only
    pub fn with_lake_root(mut self, lake_root: PathBuf) -> Self {
        self.layout.lake_root = lake_root;
        self
    }

    pub fn with_reports_dir(mut self, reports_dir: PathBuf) -> Self {
        self.layout.reports_dir = reports_dir;
        self
    }

    pub fn with_exports_dir(mut self, exports_dir: PathBuf) -> Self {
        self.layout.exports_dir = exports_dir;
        self
    }

    /// Enable progress bars
    pub fn with_progress(mut self) -> Self {
        self.show_progress = true;
        self
    }
}
