//! Read-only views over a cleaned and derived table.
//!
//! The [`Reporter`] is built from a [`ReportConfig`] and never touches ambient
//! process state. Both front ends render the same values:
//!
//! - [`Reporter::overview`]: the first `overview_rows` rows, verbatim
//! - [`Reporter::summary_metrics`]: mean tonnage and mean turnaround
//! - [`Reporter::active_vessels`]: berthed and not yet sailed
//! - [`Reporter::cargo_by_call`]: summed tonnage per call id, ready to plot

use super::schema::{
    ACTIVE_VESSEL_COLUMNS, BERTHING_DATE, CARGO_TONNAGE, SAILED_DT, Shape, TURNAROUND_HOURS,
    VESSEL_CALL_ID,
};
use crate::config::ReportConfig;
use crate::error::{Result, ResultExt as _};
use polars::prelude::*;
use std::collections::BTreeMap;

pub const NO_DATA_MESSAGE: &str = "No data available.";
pub const NO_ACTIVE_VESSELS_MESSAGE: &str = "No active vessels found.";
pub const CHART_COLUMNS_MISSING_MESSAGE: &str = "Required columns not found for visualization.";

#[derive(Clone, Debug, PartialEq)]
pub struct Metric {
    pub label: &'static str,
    pub unit: &'static str,
    /// `None` when every input value was null.
    pub value: Option<f64>,
}

impl Metric {
    pub fn formatted(&self) -> String {
        crate::utils::fmt_opt(self.value)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SummaryMetrics {
    pub cargo_tonnage: Metric,
    /// Present only when the table carries `TURNAROUND_HOURS`.
    pub turnaround_hours: Option<Metric>,
}

#[derive(Clone, Debug)]
pub enum ActiveVessels {
    Found(DataFrame),
    NoneActive,
    /// Berthing or sailed column absent, so activity cannot be judged.
    Unavailable,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CallTonnage {
    pub call_id: i64,
    pub tonnage: f64,
}

/// Bars for the cargo chart, one per call id in ascending order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CargoByCall {
    pub bars: Vec<CallTonnage>,
    /// Groups whose call id could not be read as an integer.
    pub skipped_groups: usize,
}

impl CargoByCall {
    pub const TITLE: &'static str = "Cargo Tonnage by Vessel Call ID";
    pub const X_LABEL: &'static str = "Vessel Call ID (sample)";
    pub const Y_LABEL: &'static str = "Cargo Tonnage (metric tons, MT)";
    /// Width and height of the figure, a 3:1 strip.
    pub const FIGURE_SIZE: (f32, f32) = (30.0, 10.0);
    pub const LABEL_ROTATION_DEG: f32 = 45.0;
    /// Sky blue.
    pub const BAR_RGB: (u8, u8, u8) = (135, 206, 235);
    pub const BAR_ALPHA: f32 = 0.7;

    pub fn total(&self) -> f64 {
        self.bars.iter().map(|b| b.tonnage).sum()
    }
}

/// Everything after the overview. Building it fails as a whole when a required
/// column is missing.
#[derive(Clone, Debug)]
pub struct Report {
    pub metrics: SummaryMetrics,
    pub active: ActiveVessels,
    /// `None` when the call-id or tonnage column is absent.
    pub cargo: Option<CargoByCall>,
}

pub struct Reporter {
    config: ReportConfig,
}

impl Reporter {
    pub fn new(config: ReportConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    pub fn overview(&self, df: &DataFrame) -> DataFrame {
        df.head(Some(self.config.overview_rows))
    }

    /// # Errors
    ///
    /// [`MissingColumn`](crate::error::PortcallError::MissingColumn) when
    /// `CARGO_TONNAGE` is absent. The report stops there and the error is shown.
    pub fn summary_metrics(&self, df: &DataFrame, shape: &Shape) -> Result<SummaryMetrics> {
        shape.require(CARGO_TONNAGE)?;

        let cargo_tonnage = Metric {
            label: "Average Cargo Tonnage",
            unit: "tons",
            value: column_mean(df, CARGO_TONNAGE)?,
        };

        let turnaround_hours = if shape.has(TURNAROUND_HOURS) {
            Some(Metric {
                label: "Average Turnaround Time",
                unit: "hours",
                value: column_mean(df, TURNAROUND_HOURS)?,
            })
        } else {
            None
        };

        Ok(SummaryMetrics {
            cargo_tonnage,
            turnaround_hours,
        })
    }

    /// Rows with a berthing time but no sailing time, projected to the
    /// identifying columns that exist.
    pub fn active_vessels(&self, df: &DataFrame, shape: &Shape) -> Result<ActiveVessels> {
        if !shape.has_all(&[BERTHING_DATE, SAILED_DT]) {
            return Ok(ActiveVessels::Unavailable);
        }

        let projection: Vec<Expr> = ACTIVE_VESSEL_COLUMNS
            .iter()
            .filter(|name| shape.has(name))
            .map(|name| col(*name))
            .collect();

        let active = df
            .clone()
            .lazy()
            .filter(col(BERTHING_DATE).is_not_null().and(col(SAILED_DT).is_null()))
            .select(projection)
            .collect()
            .context("Failed to filter active vessels")?;

        if active.height() == 0 {
            Ok(ActiveVessels::NoneActive)
        } else {
            Ok(ActiveVessels::Found(active))
        }
    }

    /// Total tonnage per call id. Null call ids are dropped, null tonnage counts
    /// as nothing, and a group of only nulls sums to zero.
    pub fn cargo_by_call(&self, df: &DataFrame, shape: &Shape) -> Result<Option<CargoByCall>> {
        if !shape.has_all(&[VESSEL_CALL_ID, CARGO_TONNAGE]) {
            return Ok(None);
        }

        let grouped = df
            .clone()
            .lazy()
            .select([
                col(VESSEL_CALL_ID).cast(DataType::String),
                col(CARGO_TONNAGE).cast(DataType::Float64),
            ])
            .filter(col(VESSEL_CALL_ID).is_not_null())
            .group_by([col(VESSEL_CALL_ID)])
            .agg([col(CARGO_TONNAGE).sum()])
            .collect()
            .context("Failed to group cargo by call id")?;

        let ids = grouped.column(VESSEL_CALL_ID)?.as_materialized_series();
        let tonnage = grouped.column(CARGO_TONNAGE)?.as_materialized_series();

        let mut totals: BTreeMap<i64, f64> = BTreeMap::new();
        let mut skipped_groups = 0;
        for (id, total) in ids.str()?.into_iter().zip(tonnage.f64()?.into_iter()) {
            match id.and_then(parse_call_id) {
                Some(call_id) => *totals.entry(call_id).or_default() += total.unwrap_or(0.0),
                None => skipped_groups += 1,
            }
        }

        if skipped_groups > 0 {
            tracing::warn!(
                "{skipped_groups} call id group(s) are not integers and were left off the chart"
            );
        }

        Ok(Some(CargoByCall {
            bars: totals
                .into_iter()
                .map(|(call_id, tonnage)| CallTonnage { call_id, tonnage })
                .collect(),
            skipped_groups,
        }))
    }

    /// Metrics, active vessels and chart, in the order the front ends show them.
    pub fn report(&self, df: &DataFrame, shape: &Shape) -> Result<Report> {
        Ok(Report {
            metrics: self.summary_metrics(df, shape)?,
            active: self.active_vessels(df, shape)?,
            cargo: self.cargo_by_call(df, shape)?,
        })
    }
}

fn column_mean(df: &DataFrame, name: &str) -> Result<Option<f64>> {
    let series = df.column(name)?.as_materialized_series().cast(&DataType::Float64)?;
    Ok(series.mean())
}

/// Integer axis label for a call id; `"1001"` and `"1001.0"` are the same call.
pub fn parse_call_id(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    raw.parse::<i64>().ok().or_else(|| {
        raw.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && *v >= i64::MIN as f64 && *v <= i64::MAX as f64)
            .map(|v| v.trunc() as i64)
    })
}
