//! Asset reference lookups for enrichment
//!
//! Loads the `assets.csv` side table produced alongside the raw readings and
//! indexes it by `asset_id`. The table is optional: when it is absent every
//! asset is reported with the `UNKNOWN` placeholder instead of being dropped.

use crate::app::models::{AssetInfo, Enrichment};
use crate::app::services::record_loader::{column_cells, read_string_table};
use crate::constants::{UNKNOWN_PLACEHOLDER, fields};
use crate::error::Result;
use std::collections::{BTreeSet, HashMap};
use std::path::Path;
use tracing::{info, warn};

/// Asset registry providing O(1) lookups by asset id
#[derive(Debug, Clone, Default)]
pub struct AssetRegistry {
    assets: HashMap<String, AssetInfo>,
}

impl AssetRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from already-parsed rows; later rows win
    pub fn from_assets(assets: impl IntoIterator<Item = AssetInfo>) -> Self {
        let mut registry = Self::new();
        for asset in assets {
            registry.insert(asset);
        }
        registry
    }

    /// Load the side table, tolerating its absence
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            warn!(
                "Asset reference not found at {}, enrichment will use {}",
                path.display(),
                UNKNOWN_PLACEHOLDER
            );
            return Ok(Self::new());
        }

        let df = read_string_table(path)?;
        let asset_ids = column_cells(&df, fields::ASSET_ID)?;
        let plant_ids = column_cells(&df, fields::PLANT_ID)?;
        let asset_types = column_cells(&df, fields::ASSET_TYPE)?;
        let manufacturers = column_cells(&df, fields::MANUFACTURER)?;
        let models = column_cells(&df, fields::MODEL)?;
        let install_dates = column_cells(&df, fields::INSTALL_DATE)?;
        let criticalities = column_cells(&df, fields::CRITICALITY)?;
        let strategies = column_cells(&df, fields::MAINTENANCE_STRATEGY)?;

        let mut registry = Self::new();
        let mut skipped = 0;

        for row in 0..df.height() {
            let Some(asset_id) = clean_cell(&asset_ids[row]) else {
                skipped += 1;
                continue;
            };

            registry.insert(AssetInfo {
                asset_id,
                plant_id: clean_cell(&plant_ids[row]),
                asset_type: clean_cell(&asset_types[row]),
                manufacturer: clean_cell(&manufacturers[row]),
                model: clean_cell(&models[row]),
                install_date: clean_cell(&install_dates[row]),
                criticality: clean_cell(&criticalities[row]),
                maintenance_strategy: clean_cell(&strategies[row]),
            });
        }

        info!(
            "Loaded {} assets across {} plants from {} ({} rows without asset_id skipped)",
            registry.asset_count(),
            registry.plant_ids().len(),
            path.display(),
            skipped
        );

        Ok(registry)
    }

    fn insert(&mut self, asset: AssetInfo) {
        self.assets.insert(asset.asset_id.clone(), asset);
    }

    /// Look up reference data for an asset
    pub fn lookup(&self, asset_id: &str) -> Option<&AssetInfo> {
        self.assets.get(asset_id)
    }

    /// Enrichment fields for an asset with `UNKNOWN` for anything missing
    pub fn enrichment_for(&self, asset_id: &str) -> Enrichment {
        let asset = self.lookup(asset_id);
        let field = |value: Option<&Option<String>>| {
            value
                .and_then(|v| v.clone())
                .unwrap_or_else(|| UNKNOWN_PLACEHOLDER.to_string())
        };

        Enrichment {
            plant_id: field(asset.map(|a| &a.plant_id)),
            asset_type: field(asset.map(|a| &a.asset_type)),
            criticality: field(asset.map(|a| &a.criticality)),
            maintenance_strategy: field(asset.map(|a| &a.maintenance_strategy)),
        }
    }

    pub fn asset_count(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    /// Distinct plant ids referenced by the table, sorted
    pub fn plant_ids(&self) -> Vec<String> {
        self.assets
            .values()
            .filter_map(|a| a.plant_id.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

fn clean_cell(cell: &Option<String>) -> Option<String> {
    cell.as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
