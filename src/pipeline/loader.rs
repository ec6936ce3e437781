use super::Notifier;
use super::schema::{ColumnKind, Shape, columns_of_kind};
use super::timestamps::coerce_timestamp_column;
use crate::error::{Result, ResultExt as _};
use polars::prelude::*;
use std::path::Path;

/// Reads a port-call export. Every column arrives as text and the timestamp
/// columns are then parsed day-first.
///
/// # Errors
///
/// Missing file, malformed CSV or invalid UTF-8.
pub fn load_vessel_calls(path: &Path) -> Result<DataFrame> {
    tracing::info!("Loading vessel calls from {}", path.display());

    let df = CsvReadOptions::default()
        .with_has_header(true)
        // Text everywhere: per-column coercion happens below and in the cleaner,
        // so one stray value deep in the file cannot fail the read.
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .with_context(|| format!("Failed to open {}", path.display()))?
        .finish()
        .context("Failed to read CSV")?;

    let shape = Shape::of(&df);
    let df = parse_timestamp_columns(df, &shape)?;
    tracing::debug!("Loaded {} rows x {} columns", df.height(), df.width());
    Ok(df)
}

/// The loader's recovery boundary: failures are reported and become an empty table.
pub fn load_or_report(path: &Path, notifier: &mut dyn Notifier) -> DataFrame {
    match load_vessel_calls(path) {
        Ok(df) => df,
        Err(e) => {
            tracing::error!("Load of {} failed: {e}", path.display());
            notifier.error(&format!("Error loading file: {e}"));
            DataFrame::empty()
        }
    }
}

/// Day-first parse of whichever timestamp columns the shape says are present.
pub fn parse_timestamp_columns(mut df: DataFrame, shape: &Shape) -> Result<DataFrame> {
    for spec in columns_of_kind(ColumnKind::Timestamp).filter(|c| shape.has(c.name)) {
        let parsed = coerce_timestamp_column(df.column(spec.name)?)?;
        df.with_column(parsed)?;
    }
    Ok(df)
}

pub fn is_empty_table(df: &DataFrame) -> bool {
    df.height() == 0 || df.width() == 0
}
