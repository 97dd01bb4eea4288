//! Tabular outputs and all-or-nothing commits
//!
//! Record sets are converted to polars DataFrames with every column present
//! in its published order. Missing values are nulls, which the CSV writer
//! emits as empty fields.
//!
//! [`StagedOutputs`] collects every artifact of a run in memory, writes each
//! one to a sibling `*.partial` file, and renames them into place only after
//! every staged write succeeded. Existing outputs are held aside as
//! `*.previous` during the renames and restored if one of them fails.

use crate::app::models::{
    AssetDailySummary, FieldValue, PlantDailyKpi, QuarantinedReading, RawReading,
};
use crate::constants::{
    ASSET_SUMMARY_COLUMNS, BACKUP_SUFFIX, CLEAN_COLUMNS, PLANT_KPI_COLUMNS, STAGED_SUFFIX, fields,
};
use crate::error::{PipelineError, Result};
use polars::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

fn render(value: &Option<FieldValue>) -> Option<String> {
    value.as_ref().map(FieldValue::to_string)
}

fn reading_columns<'a>(readings: impl Iterator<Item = &'a RawReading> + Clone) -> Vec<Column> {
    CLEAN_COLUMNS
        .iter()
        .enumerate()
        .map(|(index, name)| {
            let cells: Vec<Option<String>> = readings
                .clone()
                .map(|reading| render(reading.columns()[index]))
                .collect();
            Column::new((*name).into(), cells)
        })
        .collect()
}

/// Clean readings in silver column order
pub fn clean_frame(clean: &[RawReading]) -> Result<DataFrame> {
    Ok(DataFrame::new(reading_columns(clean.iter()))?)
}

/// Quarantined readings with a trailing `reject_reason` column
pub fn quarantine_frame(quarantine: &[QuarantinedReading]) -> Result<DataFrame> {
    let mut columns = reading_columns(quarantine.iter().map(|q| &q.reading));
    let reasons: Vec<String> = quarantine
        .iter()
        .map(QuarantinedReading::reject_reason)
        .collect();
    columns.push(Column::new(fields::REJECT_REASON.into(), reasons));
    Ok(DataFrame::new(columns)?)
}

/// One row per asset, ordered as given
pub fn asset_summary_frame(summaries: &[AssetDailySummary]) -> Result<DataFrame> {
    let text = |f: fn(&AssetDailySummary) -> String| -> Vec<String> {
        summaries.iter().map(f).collect()
    };
    let optional = |f: fn(&AssetDailySummary) -> Option<f64>| -> Vec<Option<f64>> {
        summaries.iter().map(f).collect()
    };
    let c = ASSET_SUMMARY_COLUMNS;

    let df = df!(
        c[0] => text(|s| s.date.clone()),
        c[1] => text(|s| s.plant_id.clone()),
        c[2] => text(|s| s.asset_id.clone()),
        c[3] => text(|s| s.asset_type.clone()),
        c[4] => text(|s| s.criticality.clone()),
        c[5] => text(|s| s.maintenance_strategy.clone()),
        c[6] => summaries.iter().map(|s| s.readings).collect::<Vec<u64>>(),
        c[7] => summaries.iter().map(|s| s.running_ratio).collect::<Vec<f64>>(),
        c[8] => optional(|s| s.temperature_c_mean),
        c[9] => optional(|s| s.vibration_mm_s_mean),
        c[10] => optional(|s| s.vibration_mm_s_max),
        c[11] => optional(|s| s.rpm_mean),
        c[12] => summaries.iter().map(|s| s.health_score).collect::<Vec<f64>>(),
    )?;
    Ok(df)
}

/// One row per plant, ordered as given
pub fn plant_kpi_frame(kpis: &[PlantDailyKpi]) -> Result<DataFrame> {
    let optional = |f: fn(&PlantDailyKpi) -> Option<f64>| -> Vec<Option<f64>> {
        kpis.iter().map(f).collect()
    };
    let c = PLANT_KPI_COLUMNS;

    let df = df!(
        c[0] => kpis.iter().map(|k| k.date.clone()).collect::<Vec<String>>(),
        c[1] => kpis.iter().map(|k| k.plant_id.clone()).collect::<Vec<String>>(),
        c[2] => kpis.iter().map(|k| k.assets_count).collect::<Vec<u64>>(),
        c[3] => kpis.iter().map(|k| k.total_readings).collect::<Vec<u64>>(),
        c[4] => optional(|k| k.avg_running_ratio),
        c[5] => optional(|k| k.avg_temperature_c),
        c[6] => optional(|k| k.avg_vibration_mm_s),
        c[7] => optional(|k| k.avg_health_score),
    )?;
    Ok(df)
}

/// Serialize a frame as CSV with a header row
pub fn frame_to_csv(frame: &mut DataFrame) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    CsvWriter::new(&mut buffer)
        .include_header(true)
        .finish(frame)?;
    Ok(buffer)
}

fn sibling_path(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".");
    name.push(suffix);
    path.with_file_name(name)
}

/// Sibling path used while an artifact is staged
pub fn staged_path(path: &Path) -> PathBuf {
    sibling_path(path, STAGED_SUFFIX)
}

/// Sibling path holding the previous output during a commit
pub fn backup_path(path: &Path) -> PathBuf {
    sibling_path(path, BACKUP_SUFFIX)
}

/// Artifacts of one run, committed together or not at all
#[derive(Debug, Default)]
pub struct StagedOutputs {
    artifacts: Vec<(PathBuf, Vec<u8>)>,
}

impl StagedOutputs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a frame to be written as CSV at `path`
    pub fn add_csv(&mut self, path: PathBuf, mut frame: DataFrame) -> Result<()> {
        let bytes = frame_to_csv(&mut frame)
            .map_err(|e| PipelineError::output_failed(&path, e.to_string()))?;
        debug!("Queued {} rows for {}", frame.height(), path.display());
        self.artifacts.push((path, bytes));
        Ok(())
    }

    /// Queue a text artifact
    pub fn add_text(&mut self, path: PathBuf, text: impl Into<String>) {
        self.artifacts.push((path, text.into().into_bytes()));
    }

    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }

    /// Write every artifact to its staged path, then rename all into place
    ///
    /// A failed staged write removes every staged file and leaves previous
    /// outputs untouched. During the renames each existing output is moved
    /// to its `*.previous` sibling first; if any step fails, the outputs
    /// already published are rolled back to their previous content.
    pub fn commit(self) -> Result<Vec<PathBuf>> {
        let mut staged: Vec<(PathBuf, PathBuf)> = Vec::with_capacity(self.artifacts.len());

        for (path, bytes) in &self.artifacts {
            let staging = staged_path(path);
            if let Err(e) = write_staged(path, &staging, bytes) {
                discard(&staged);
                let _ = fs::remove_file(&staging);
                return Err(e);
            }
            staged.push((staging, path.clone()));
        }

        let mut published: Vec<Published> = Vec::with_capacity(staged.len());
        for (index, (staging, path)) in staged.iter().enumerate() {
            if let Err(e) = publish(staging, path, &mut published) {
                roll_back(published);
                discard(&staged[index..]);
                return Err(PipelineError::output_failed(path, e.to_string()));
            }
        }

        for backup in published.iter().filter_map(|entry| entry.backup.as_ref()) {
            if let Err(e) = fs::remove_file(backup) {
                warn!("Failed to remove {}: {}", backup.display(), e);
            }
        }

        let committed: Vec<PathBuf> = published.into_iter().map(|entry| entry.path).collect();
        info!("Committed {} outputs", committed.len());
        Ok(committed)
    }
}

/// An output moved into place, with the previous content it replaced
#[derive(Debug)]
struct Published {
    path: PathBuf,
    backup: Option<PathBuf>,
    replaced: bool,
}

fn write_staged(path: &Path, staging: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| PipelineError::output_failed(path, e.to_string()))?;
    }
    fs::write(staging, bytes)
        .map_err(|e| PipelineError::output_failed(path, e.to_string()))
}

fn publish(staging: &Path, path: &Path, published: &mut Vec<Published>) -> std::io::Result<()> {
    let backup = if path.exists() {
        let backup = backup_path(path);
        fs::rename(path, &backup)?;
        Some(backup)
    } else {
        None
    };

    // Recorded before the rename so a failure still restores the backup
    published.push(Published {
        path: path.to_path_buf(),
        backup,
        replaced: false,
    });
    fs::rename(staging, path)?;
    if let Some(entry) = published.last_mut() {
        entry.replaced = true;
    }
    Ok(())
}

fn roll_back(published: Vec<Published>) {
    for entry in published.into_iter().rev() {
        let restored = match (&entry.backup, entry.replaced) {
            (Some(backup), _) => fs::rename(backup, &entry.path),
            (None, true) => fs::remove_file(&entry.path),
            (None, false) => Ok(()),
        };
        if let Err(e) = restored {
            warn!("Failed to roll back {}: {}", entry.path.display(), e);
        }
    }
}

fn discard(staged: &[(PathBuf, PathBuf)]) {
    for (staging, _) in staged {
        if let Err(e) = fs::remove_file(staging) {
            warn!("Failed to remove staged file {}: {}", staging.display(), e);
        }
    }
}
