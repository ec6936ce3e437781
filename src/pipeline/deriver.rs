use super::schema::{BERTHING_DATE, SAILED_DT, Shape, TURNAROUND_HOURS};
use crate::error::{Result, ResultExt as _};
use polars::prelude::*;

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// Adds `TURNAROUND_HOURS = SAILED_DT - BERTHING_DATE` in fractional hours.
///
/// Without both timestamp columns the table is returned as is. A null on either
/// side yields null; negative durations pass through.
pub fn derive_turnaround(mut df: DataFrame, shape: &mut Shape) -> Result<DataFrame> {
    if !shape.has_all(&[BERTHING_DATE, SAILED_DT]) {
        tracing::debug!("Skipping turnaround: berthing or sailed column absent");
        return Ok(df);
    }

    let millis = |name: &str| {
        col(name)
            .cast(DataType::Datetime(TimeUnit::Milliseconds, None))
            .cast(DataType::Int64)
    };

    let elapsed = df
        .clone()
        .lazy()
        .select([(millis(SAILED_DT) - millis(BERTHING_DATE)).alias(TURNAROUND_HOURS)])
        .collect()
        .context("Failed to derive turnaround hours")?;

    // Per-value division. Polars rewrites a literal divisor as a reciprocal
    // multiply, which is off by one ulp for whole hours.
    let hours: Float64Chunked = elapsed
        .column(TURNAROUND_HOURS)?
        .i64()?
        .into_iter()
        .map(|ms| ms.map(|ms| ms as f64 / MILLIS_PER_HOUR))
        .collect();

    df.with_column(hours.with_name(TURNAROUND_HOURS.into()).into_series())
        .context("Failed to add turnaround hours")?;

    shape.mark_present(TURNAROUND_HOURS);
    Ok(df)
}
