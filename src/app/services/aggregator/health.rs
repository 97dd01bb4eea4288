//! Health score heuristic for one asset-day

use crate::config::HealthScoreConfig;

/// Score an asset-day from its unrounded channel means
///
/// Vibration contributes a capped linear penalty whenever a mean is
/// available. Temperature only penalises above the threshold. Missing means
/// contribute nothing, so an asset with no usable data scores the base value.
pub fn health_score(
    vibration_mean: Option<f64>,
    temperature_mean: Option<f64>,
    config: &HealthScoreConfig,
) -> f64 {
    let mut score = config.base_score;

    if let Some(vibration) = vibration_mean {
        let penalty = vibration * config.vibration_weight;
        score -= penalty.min(config.vibration_penalty_cap);
    }

    let threshold = config.temperature_threshold_c;
    if let Some(temperature) = temperature_mean.filter(|t| *t > threshold) {
        let penalty = (temperature - threshold) * config.temperature_weight;
        score -= penalty.min(config.temperature_penalty_cap);
    }

    score.clamp(config.min_score, config.max_score)
}
