use super::loader::parse_timestamp_columns;
use super::schema::{CARGO_TONNAGE, Shape, VESSEL_NAME};
use super::timestamps::CSV_DATETIME_FORMAT;
use crate::error::{Result, ResultExt as _};
use polars::prelude::*;
use std::path::Path;

pub const DOWNLOAD_FILE_NAME: &str = "cleaned_dataset.csv";
pub const DOWNLOAD_MIME: &str = "text/csv";

/// Applies every column transform the shape allows. Running it twice changes nothing.
///
/// Absent columns are skipped, never an error.
pub fn clean_vessel_calls(df: DataFrame, shape: &Shape) -> Result<DataFrame> {
    let mut df = parse_timestamp_columns(df, shape)?;

    if shape.has(VESSEL_NAME) {
        df = df
            .lazy()
            .with_column(
                col(VESSEL_NAME)
                    .cast(DataType::String)
                    .str()
                    .strip_chars(lit(NULL))
                    .alias(VESSEL_NAME),
            )
            .collect()
            .context("Failed to trim vessel names")?;
        let names = title_case_column(df.column(VESSEL_NAME)?)?;
        df.with_column(names)?;
    }

    if shape.has(CARGO_TONNAGE) {
        let tonnage = coerce_numeric_column(df.column(CARGO_TONNAGE)?)?;
        df.with_column(tonnage)?;
    }

    Ok(df)
}

/// Title-cases each word: a letter is upper-cased after a non-letter and
/// lower-cased otherwise.
pub fn title_case(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut previous_cased = false;

    for ch in raw.chars() {
        if ch.is_alphabetic() {
            if previous_cased {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            previous_cased = true;
        } else {
            out.push(ch);
            previous_cased = false;
        }
    }

    out
}

/// Numeric parse of one tonnage cell; text and `NaN` become `None`.
pub fn parse_tonnage(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| !v.is_nan())
}

fn title_case_column(column: &Column) -> PolarsResult<Column> {
    let series = column.as_materialized_series();
    let cased: StringChunked = series
        .str()?
        .into_iter()
        .map(|cell| cell.map(title_case))
        .collect();
    Ok(cased.with_name(series.name().clone()).into_series().into_column())
}

fn coerce_numeric_column(column: &Column) -> PolarsResult<Column> {
    let series = column.as_materialized_series();
    let values: Float64Chunked = if series.dtype().is_numeric() {
        series
            .cast(&DataType::Float64)?
            .f64()?
            .into_iter()
            .map(|cell| cell.filter(|v| !v.is_nan()))
            .collect()
    } else {
        series
            .cast(&DataType::String)?
            .str()?
            .into_iter()
            .map(|cell| cell.and_then(parse_tonnage))
            .collect()
    };
    Ok(values.with_name(series.name().clone()).into_series().into_column())
}

/// Serialises the table as UTF-8 CSV, the bytes offered for download.
pub fn to_csv_bytes(df: &mut DataFrame) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    CsvWriter::new(&mut buffer)
        .include_header(true)
        .with_datetime_format(Some(CSV_DATETIME_FORMAT.to_owned()))
        .finish(df)
        .context("Failed to serialise cleaned dataset")?;
    Ok(buffer)
}

/// Writes the cleaned table over `path` and hands back the written bytes.
pub fn save_cleaned(df: &mut DataFrame, path: &Path) -> Result<Vec<u8>> {
    let bytes = to_csv_bytes(df)?;
    std::fs::write(path, &bytes)
        .with_context(|| format!("Failed to write cleaned dataset to {}", path.display()))?;
    tracing::info!(
        "Saved {} cleaned rows ({} bytes) to {}",
        df.height(),
        bytes.len(),
        path.display()
    );
    Ok(bytes)
}
