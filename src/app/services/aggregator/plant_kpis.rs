//! Per-plant rollup of asset summaries

use crate::app::models::{AssetDailySummary, PlantDailyKpi};
use crate::constants::{precision, round_to};
use std::collections::BTreeMap;
use tracing::info;

use super::asset_summary::ChannelStats;

#[derive(Debug, Default)]
struct PlantAccumulator {
    assets: u64,
    readings: u64,
    running_ratio: ChannelStats,
    temperature: ChannelStats,
    vibration: ChannelStats,
    health: ChannelStats,
}

/// Roll asset summaries up to one row per plant, ordered by `plant_id`
///
/// Each average is the unweighted mean of the published per-asset values.
/// An asset with no value for a field does not count towards that field.
pub fn aggregate_plants(assets: &[AssetDailySummary], date: &str) -> Vec<PlantDailyKpi> {
    let mut by_plant: BTreeMap<&str, PlantAccumulator> = BTreeMap::new();

    for asset in assets {
        let acc = by_plant.entry(asset.plant_id.as_str()).or_default();
        acc.assets += 1;
        acc.readings += asset.readings;
        acc.running_ratio.add(Some(asset.running_ratio));
        acc.temperature.add(asset.temperature_c_mean);
        acc.vibration.add(asset.vibration_mm_s_mean);
        acc.health.add(Some(asset.health_score));
    }

    let kpis: Vec<PlantDailyKpi> = by_plant
        .into_iter()
        .map(|(plant_id, acc)| PlantDailyKpi {
            date: date.to_string(),
            plant_id: plant_id.to_string(),
            assets_count: acc.assets,
            total_readings: acc.readings,
            avg_running_ratio: acc
                .running_ratio
                .mean()
                .map(|v| round_to(v, precision::RUNNING_RATIO)),
            avg_temperature_c: acc
                .temperature
                .mean()
                .map(|v| round_to(v, precision::TEMPERATURE)),
            avg_vibration_mm_s: acc
                .vibration
                .mean()
                .map(|v| round_to(v, precision::VIBRATION)),
            avg_health_score: acc
                .health
                .mean()
                .map(|v| round_to(v, precision::AVG_HEALTH_SCORE)),
        })
        .collect();

    info!(
        "Rolled {} assets up into {} plants",
        assets.len(),
        kpis.len()
    );
    kpis
}
