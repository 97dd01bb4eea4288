//! Daily aggregation of clean readings (silver to gold)
//!
//! - [`asset_summary`] - one row per asset with channel means and a health score
//! - [`plant_kpis`] - one row per plant averaged over its asset rows
//! - [`health`] - the health score heuristic
//!
//! Values that cannot be read as finite numbers are excluded from every
//! statistic. A statistic with no contributing values is `None` and is
//! published as an empty field.

pub mod asset_summary;
pub mod health;
pub mod plant_kpis;

#[cfg(test)]
pub mod tests;

pub use asset_summary::{ChannelStats, aggregate_assets};
pub use health::health_score;
pub use plant_kpis::aggregate_plants;
