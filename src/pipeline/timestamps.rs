//! Day-first timestamp parsing shared by the loader and the cleaner.

use chrono::{NaiveDate, NaiveDateTime};
use polars::prelude::*;
use std::sync::LazyLock;

/// Output format for timestamps in the cleaned CSV. [`parse_day_first`] accepts it.
pub const CSV_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// Two-digit years come first: `%Y` would otherwise read "24" as the year 24.
const DAY_FIRST_DATE_FORMATS: [&str; 8] = [
    "%d/%m/%y", "%d-%m-%y", "%d.%m.%y", "%d-%b-%y", "%d/%m/%Y", "%d-%m-%Y", "%d.%m.%Y",
    "%d-%b-%Y",
];

// `%.f` also matches a time without fractional seconds.
const TIME_FORMATS: [&str; 4] = ["%H:%M:%S%.f", "%H:%M", "%I:%M:%S %p", "%I:%M %p"];

static DAY_FIRST_DATETIME_FORMATS: LazyLock<Vec<String>> = LazyLock::new(|| {
    DAY_FIRST_DATE_FORMATS
        .iter()
        .flat_map(|date| TIME_FORMATS.iter().map(move |time| format!("{date} {time}")))
        .collect()
});

// Year-first input is unambiguous, day-first ordering does not apply to it.
const YEAR_FIRST_DATETIME_FORMATS: [&str; 6] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
];

const YEAR_FIRST_DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y/%m/%d"];

/// Parses one cell. `"03/04/2024"` is the 3rd of April.
pub fn parse_day_first(raw: &str) -> Option<NaiveDateTime> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }

    let year_first = value.len() > 4 && value.as_bytes().iter().take(4).all(u8::is_ascii_digit);
    if year_first {
        parse_with(
            value,
            YEAR_FIRST_DATETIME_FORMATS.iter().copied(),
            YEAR_FIRST_DATE_FORMATS.iter().copied(),
        )
    } else {
        parse_with(
            value,
            DAY_FIRST_DATETIME_FORMATS.iter().map(String::as_str),
            DAY_FIRST_DATE_FORMATS.iter().copied(),
        )
    }
}

fn parse_with<'f>(
    value: &str,
    mut datetime_formats: impl Iterator<Item = &'f str>,
    mut date_formats: impl Iterator<Item = &'f str>,
) -> Option<NaiveDateTime> {
    datetime_formats
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .or_else(|| {
            date_formats
                .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

/// Coerces a column to `Datetime(ms)`, turning anything unparseable into null.
///
/// Columns that are already temporal are only normalised to millisecond precision.
pub fn coerce_timestamp_column(column: &Column) -> PolarsResult<Column> {
    let target = DataType::Datetime(TimeUnit::Milliseconds, None);
    let series = column.as_materialized_series();

    if series.dtype().is_temporal() {
        return Ok(series.cast(&target)?.into_column());
    }

    let text = series.cast(&DataType::String)?;
    let millis: Int64Chunked = text
        .str()?
        .into_iter()
        .map(|cell| cell.and_then(parse_day_first).map(|dt| dt.and_utc().timestamp_millis()))
        .collect();

    Ok(millis
        .with_name(series.name().clone())
        .into_datetime(TimeUnit::Milliseconds, None)
        .into_series()
        .into_column())
}
