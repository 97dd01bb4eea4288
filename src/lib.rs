//! Operations KPI Pipeline Library
//!
//! A batch pipeline that turns raw industrial sensor readings into trusted
//! daily KPIs.
//!
//! This library provides tools for:
//! - Loading line-delimited JSON readings landed in the bronze zone
//! - Deduplicating readings by `reading_id` (first occurrence wins)
//! - Validating fields against sanity ranges and quarantining failures with reasons
//! - Keeping a quality ledger and rendering a Markdown data quality report
//! - Aggregating clean readings per asset and per plant with a health score
//! - Publishing every artifact of a run atomically as CSV
//!
//! # Example
//!
//! ```no_run
//! use ops_kpi_pipeline::{Pipeline, PipelineConfig, parse_run_date};
//!
//! let pipeline = Pipeline::new(PipelineConfig::default());
//! let summary = pipeline.run_all(parse_run_date("2026-02-02")?)?;
//! println!("{} outputs written", summary.outputs.len());
//! # Ok::<(), ops_kpi_pipeline::PipelineError>(())
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod processor;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services;
}

// Re-export commonly used types
pub use app::models::{
    AssetDailySummary, AssetInfo, FieldValue, PlantDailyKpi, QuarantinedReading, RawReading,
    RejectReason,
};
pub use app::services::record_processor::{QualityReport, RecordProcessor, SilverOutcome};
pub use config::{HealthScoreConfig, LakeLayout, PipelineConfig, ValidationConfig, ValueRange};
pub use error::{PipelineError, Result};
pub use processor::{Pipeline, RunSummary, parse_run_date};
