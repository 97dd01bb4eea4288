//! Per-asset daily aggregation

use crate::app::models::{AssetDailySummary, RawReading, numeric};
use crate::app::services::asset_registry::AssetRegistry;
use crate::config::HealthScoreConfig;
use crate::constants::{precision, round_to};
use std::collections::HashMap;
use tracing::{debug, info};

use super::health::health_score;

/// Running sum, count and maximum of one numeric channel
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ChannelStats {
    sum: f64,
    count: u64,
    max: Option<f64>,
}

impl ChannelStats {
    /// Fold in a value; `None` is unavailable and ignored
    pub fn add(&mut self, value: Option<f64>) {
        let Some(value) = value else {
            return;
        };
        self.sum += value;
        self.count += 1;
        self.max = Some(self.max.map_or(value, |current| current.max(value)));
    }

    pub fn mean(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / self.count as f64)
    }

    pub fn max(&self) -> Option<f64> {
        self.max
    }

    pub fn count(&self) -> u64 {
        self.count
    }
}

#[derive(Debug, Default)]
struct AssetAccumulator {
    readings: u64,
    running: u64,
    temperature: ChannelStats,
    vibration: ChannelStats,
    rpm: ChannelStats,
}

impl AssetAccumulator {
    fn add(&mut self, reading: &RawReading) {
        self.readings += 1;
        if reading.is_running() {
            self.running += 1;
        }
        self.temperature.add(numeric(&reading.temperature_c));
        self.vibration.add(numeric(&reading.vibration_mm_s));
        self.rpm.add(numeric(&reading.rpm).map(f64::trunc));
    }
}

/// Summarise clean readings into one row per asset for `date`
///
/// Rows are ordered by `(plant_id, asset_id)`. Readings without an asset id
/// are skipped. The health score is computed from unrounded means before
/// the published values are rounded.
pub fn aggregate_assets(
    clean: &[RawReading],
    registry: &AssetRegistry,
    date: &str,
    health: &HealthScoreConfig,
) -> Vec<AssetDailySummary> {
    let mut by_asset: HashMap<String, AssetAccumulator> = HashMap::new();
    let mut skipped = 0usize;

    for reading in clean {
        let asset_id = reading.asset_key();
        if asset_id.is_empty() {
            skipped += 1;
            continue;
        }
        by_asset.entry(asset_id).or_default().add(reading);
    }

    if skipped > 0 {
        debug!("Skipped {} readings without asset_id", skipped);
    }

    let mut summaries: Vec<AssetDailySummary> = by_asset
        .into_iter()
        .map(|(asset_id, acc)| {
            let enrichment = registry.enrichment_for(&asset_id);
            let temperature_mean = acc.temperature.mean();
            let vibration_mean = acc.vibration.mean();
            let score = health_score(vibration_mean, temperature_mean, health);

            AssetDailySummary {
                date: date.to_string(),
                plant_id: enrichment.plant_id,
                asset_id,
                asset_type: enrichment.asset_type,
                criticality: enrichment.criticality,
                maintenance_strategy: enrichment.maintenance_strategy,
                readings: acc.readings,
                running_ratio: round_to(
                    acc.running as f64 / acc.readings as f64,
                    precision::RUNNING_RATIO,
                ),
                temperature_c_mean: temperature_mean
                    .map(|v| round_to(v, precision::TEMPERATURE)),
                vibration_mm_s_mean: vibration_mean.map(|v| round_to(v, precision::VIBRATION)),
                vibration_mm_s_max: acc
                    .vibration
                    .max()
                    .map(|v| round_to(v, precision::VIBRATION)),
                rpm_mean: acc.rpm.mean().map(|v| round_to(v, precision::RPM)),
                health_score: round_to(score, precision::HEALTH_SCORE),
            }
        })
        .collect();

    summaries.sort_by(|a, b| {
        a.plant_id
            .cmp(&b.plant_id)
            .then_with(|| a.asset_id.cmp(&b.asset_id))
    });

    info!(
        "Aggregated {} clean readings into {} asset summaries for {}",
        clean.len() - skipped,
        summaries.len(),
        date
    );
    summaries
}
