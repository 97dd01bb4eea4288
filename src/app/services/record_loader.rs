//! Loading of raw and clean sensor readings
//!
//! Bronze readings arrive as line-delimited JSON and are decoded with
//! `serde_json`. Silver readings and side tables are CSV and are read with
//! polars, every column as a string, so that no value is coerced before the
//! aggregation stage decides how to treat it.

use crate::app::models::{FieldValue, RawReading};
use crate::constants::fields;
use crate::error::{PipelineError, Result};
use polars::prelude::*;
use serde_json::Value;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, info};

/// Fail with `InputNotFound` when a required input is absent
pub fn require_input(path: &Path) -> Result<()> {
    if path.is_file() {
        Ok(())
    } else {
        Err(PipelineError::InputNotFound {
            path: path.to_path_buf(),
        })
    }
}

/// Read bronze sensor readings from a JSONL file
///
/// Blank lines are skipped. A line that is not a JSON object aborts the
/// load with its 1-based line number.
pub fn read_bronze_readings(path: &Path) -> Result<Vec<RawReading>> {
    require_input(path)?;

    let reader = BufReader::new(File::open(path)?);
    let mut readings = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let value: Value =
            serde_json::from_str(trimmed).map_err(|e| PipelineError::MalformedRecord {
                path: path.to_path_buf(),
                line: index + 1,
                reason: e.to_string(),
            })?;

        match value {
            Value::Object(object) => readings.push(RawReading::from_json_object(object)),
            other => {
                return Err(PipelineError::MalformedRecord {
                    path: path.to_path_buf(),
                    line: index + 1,
                    reason: format!("expected a JSON object, found {}", json_kind(&other)),
                });
            }
        }
    }

    info!(
        "Loaded {} bronze readings from {}",
        readings.len(),
        path.display()
    );
    Ok(readings)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Read the clean (silver) readings table
pub fn read_clean_readings(path: &Path) -> Result<Vec<RawReading>> {
    require_input(path)?;

    let df = read_string_table(path)?;
    let mut columns = Vec::with_capacity(10);
    for name in [
        fields::READING_ID,
        fields::ASSET_ID,
        fields::TS_UTC,
        fields::TEMPERATURE_C,
        fields::VIBRATION_MM_S,
        fields::PRESSURE_BAR,
        fields::FLOW_L_MIN,
        fields::RPM,
        fields::OPERATING_STATE,
        fields::SAMPLE_INTERVAL_SEC,
    ] {
        columns.push(column_cells(&df, name)?);
    }

    let readings: Vec<RawReading> = (0..df.height())
        .map(|row| {
            let cell = |column: usize| FieldValue::from_cell(columns[column][row].as_deref());
            RawReading {
                reading_id: cell(0),
                asset_id: cell(1),
                ts_utc: cell(2),
                temperature_c: cell(3),
                vibration_mm_s: cell(4),
                pressure_bar: cell(5),
                flow_l_min: cell(6),
                rpm: cell(7),
                operating_state: cell(8),
                sample_interval_sec: cell(9),
            }
        })
        .collect();

    info!(
        "Loaded {} clean readings from {}",
        readings.len(),
        path.display()
    );
    Ok(readings)
}

/// Read a CSV file with a header row, keeping every column as text
pub(crate) fn read_string_table(path: &Path) -> Result<DataFrame> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;

    debug!(
        "Read {} rows x {} columns from {}",
        df.height(),
        df.width(),
        path.display()
    );
    Ok(df)
}

/// Cell values of a column; a missing column reads as all-absent
pub(crate) fn column_cells(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>> {
    let Ok(column) = df.column(name) else {
        debug!("Column {} not present, treating as empty", name);
        return Ok(vec![None; df.height()]);
    };

    let as_text = column.cast(&DataType::String)?;
    let values = as_text.as_materialized_series().str()?;
    Ok(values
        .into_iter()
        .map(|cell| cell.map(str::to_string))
        .collect())
}
