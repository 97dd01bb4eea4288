//! Run orchestration for one processing date.
//!
//! A run reads its inputs, routes and aggregates them in memory, then hands
//! every artifact to [`StagedOutputs`] so that the run either publishes all of
//! its outputs or none of them. Required inputs are checked before anything
//! is staged.

use crate::app::models::{AssetDailySummary, PlantDailyKpi, RawReading};
use crate::app::services::aggregator::{aggregate_assets, aggregate_plants};
use crate::app::services::asset_registry::AssetRegistry;
use crate::app::services::output_writer::{
    StagedOutputs, asset_summary_frame, clean_frame, plant_kpi_frame, quarantine_frame,
};
use crate::app::services::quality_report::render_quality_report;
use crate::app::services::record_loader::{read_bronze_readings, read_clean_readings};
use crate::app::services::record_processor::{QualityReport, RecordProcessor, SilverOutcome};
use crate::config::PipelineConfig;
use crate::constants::DATE_FORMAT;
use crate::error::{PipelineError, Result};

use chrono::NaiveDate;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, info};

/// Parse a run date in `YYYY-MM-DD` form
pub fn parse_run_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|e| {
        PipelineError::configuration(format!("Invalid date '{value}': {e}, expected YYYY-MM-DD"))
    })
}

/// Outcome of one pipeline run
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub date: String,
    /// Quality counts when stage 1 ran
    pub quality: Option<QualityReport>,
    /// Clean readings fed to stage 2
    pub clean_readings: usize,
    pub assets: usize,
    pub plants: usize,
    /// Committed artifacts in write order
    pub outputs: Vec<PathBuf>,
    pub processing_time_ms: u128,
}

impl RunSummary {
    fn new(date: &str) -> Self {
        Self {
            date: date.to_string(),
            ..Self::default()
        }
    }
}

/// Batch pipeline over a data lake
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// Stage 1: bronze readings to the clean set, quarantine and quality report
    pub fn run_silver(&self, date: NaiveDate) -> Result<RunSummary> {
        let start = Instant::now();
        let day = date.format(DATE_FORMAT).to_string();
        info!("Running bronze to silver for {}", day);

        let outcome = self.validate_bronze(&day)?;

        let mut staged = StagedOutputs::new();
        self.stage_silver(&day, &outcome, &mut staged)?;

        let mut summary = RunSummary::new(&day);
        summary.clean_readings = outcome.clean.len();
        summary.quality = Some(outcome.report);
        summary.outputs = staged.commit()?;
        summary.processing_time_ms = start.elapsed().as_millis();
        Ok(summary)
    }

    /// Stage 2: clean readings to per-asset and per-plant tables
    pub fn run_gold(&self, date: NaiveDate) -> Result<RunSummary> {
        let start = Instant::now();
        let day = date.format(DATE_FORMAT).to_string();
        info!("Running silver to gold for {}", day);

        let clean = read_clean_readings(&self.config.layout.silver_clean(&day))?;
        let (assets, plants) = self.aggregate(&day, &clean)?;

        let mut staged = StagedOutputs::new();
        self.stage_gold(&day, &assets, &plants, &mut staged)?;

        let mut summary = RunSummary::new(&day);
        summary.clean_readings = clean.len();
        summary.assets = assets.len();
        summary.plants = plants.len();
        summary.outputs = staged.commit()?;
        summary.processing_time_ms = start.elapsed().as_millis();
        Ok(summary)
    }

    /// Both stages, committed as a single batch
    ///
    /// Stage 2 consumes the in-memory clean set, so nothing is published
    /// unless both stages succeed.
    pub fn run_all(&self, date: NaiveDate) -> Result<RunSummary> {
        let start = Instant::now();
        let day = date.format(DATE_FORMAT).to_string();
        info!("Running full pipeline for {}", day);

        let outcome = self.validate_bronze(&day)?;
        let (assets, plants) = self.aggregate(&day, &outcome.clean)?;

        let mut staged = StagedOutputs::new();
        self.stage_silver(&day, &outcome, &mut staged)?;
        self.stage_gold(&day, &assets, &plants, &mut staged)?;

        let mut summary = RunSummary::new(&day);
        summary.clean_readings = outcome.clean.len();
        summary.assets = assets.len();
        summary.plants = plants.len();
        summary.quality = Some(outcome.report);
        summary.outputs = staged.commit()?;
        summary.processing_time_ms = start.elapsed().as_millis();
        Ok(summary)
    }

    fn validate_bronze(&self, day: &str) -> Result<SilverOutcome> {
        let readings = read_bronze_readings(&self.config.layout.bronze_readings(day))?;
        let processor = RecordProcessor::new(self.config.validation.clone())
            .with_progress(self.config.show_progress);
        Ok(processor.process(readings))
    }

    fn aggregate(
        &self,
        day: &str,
        clean: &[RawReading],
    ) -> Result<(Vec<AssetDailySummary>, Vec<PlantDailyKpi>)> {
        let registry = AssetRegistry::load(&self.config.layout.bronze_assets(day))?;
        let assets = aggregate_assets(clean, &registry, day, &self.config.health);
        let plants = aggregate_plants(&assets, day);
        Ok((assets, plants))
    }

    fn stage_silver(
        &self,
        day: &str,
        outcome: &SilverOutcome,
        staged: &mut StagedOutputs,
    ) -> Result<()> {
        let layout = &self.config.layout;
        staged.add_csv(layout.silver_clean(day), clean_frame(&outcome.clean)?)?;
        staged.add_csv(
            layout.quarantine_rejects(day),
            quarantine_frame(&outcome.quarantine)?,
        )?;
        staged.add_text(
            layout.quality_report(day),
            render_quality_report(day, &outcome.report),
        );
        debug!("Staged silver outputs for {}", day);
        Ok(())
    }

    fn stage_gold(
        &self,
        day: &str,
        assets: &[AssetDailySummary],
        plants: &[PlantDailyKpi],
        staged: &mut StagedOutputs,
    ) -> Result<()> {
        let layout = &self.config.layout;
        staged.add_csv(layout.gold_asset_health(day), asset_summary_frame(assets)?)?;
        staged.add_csv(layout.gold_plant_kpis(day), plant_kpi_frame(plants)?)?;
        staged.add_csv(layout.exported_plant_kpis(day), plant_kpi_frame(plants)?)?;
        debug!("Staged gold outputs for {}", day);
        Ok(())
    }
}
