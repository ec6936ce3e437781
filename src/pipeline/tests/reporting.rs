use super::millis;
use crate::config::ReportConfig;
use crate::error::PortcallError;
use crate::pipeline::reporter::parse_call_id;
use crate::pipeline::schema::{
    BERTHING_BERTH_CODE, BERTHING_DATE, CARGO_TONNAGE, SAILED_DT, VESSEL_CALL_ID, VESSEL_NAME,
    VESSEL_NO,
};
use crate::pipeline::*;
use crate::pipeline::Shape;
use anyhow::Result;
use polars::prelude::*;

fn reporter() -> Reporter {
    Reporter::new(ReportConfig::default())
}

fn timestamps(name: &str, values: &[Option<i64>]) -> Column {
    Int64Chunked::from_iter_options(name.into(), values.iter().copied())
        .into_datetime(TimeUnit::Milliseconds, None)
        .into_series()
        .into_column()
}

/// Three calls: sailed, still berthed, and not yet berthed.
fn port_calls() -> Result<DataFrame> {
    let mut df = df!(
        VESSEL_NO => &["V1", "V2", "V3"],
        VESSEL_NAME => &["Aurora", "Baltic Star", "Coral Bay"],
        VESSEL_CALL_ID => &["1001", "1002", "1003"],
        BERTHING_BERTH_CODE => &["B01", "B02", "B03"],
        CARGO_TONNAGE => &[Some(100.0), None, Some(200.0)]
    )?;
    df.with_column(timestamps(
        BERTHING_DATE,
        &[
            Some(millis(2024, 1, 1, 0, 0)),
            Some(millis(2024, 1, 3, 0, 0)),
            None,
        ],
    ))?;
    df.with_column(timestamps(
        SAILED_DT,
        &[Some(millis(2024, 1, 2, 6, 0)), None, None],
    ))?;
    Ok(df)
}

#[test]
fn test_mean_skips_nulls() -> Result<()> {
    let df = port_calls()?;
    let metrics = reporter().summary_metrics(&df, &Shape::of(&df))?;

    assert_eq!(metrics.cargo_tonnage.value, Some(150.0));
    assert_eq!(metrics.cargo_tonnage.formatted(), "150.00");
    assert!(metrics.turnaround_hours.is_none());
    Ok(())
}

#[test]
fn test_turnaround_metric_after_derivation() -> Result<()> {
    let df = port_calls()?;
    let mut shape = Shape::of(&df);
    let df = derive_turnaround(df, &mut shape)?;

    let metrics = reporter().summary_metrics(&df, &shape)?;
    let turnaround = metrics.turnaround_hours.unwrap();
    assert_eq!(turnaround.value, Some(30.0));
    assert_eq!(turnaround.unit, "hours");
    Ok(())
}

#[test]
fn test_all_null_tonnage_has_no_mean() -> Result<()> {
    let df = df!(CARGO_TONNAGE => &[None::<f64>, None])?;
    let metrics = reporter().summary_metrics(&df, &Shape::of(&df))?;
    assert_eq!(metrics.cargo_tonnage.value, None);
    assert_eq!(metrics.cargo_tonnage.formatted(), "—");
    Ok(())
}

#[test]
fn test_missing_tonnage_fails_the_report() -> Result<()> {
    let df = df!(VESSEL_CALL_ID => &["1001"])?;
    let err = reporter().report(&df, &Shape::of(&df)).unwrap_err();

    assert!(matches!(err, PortcallError::MissingColumn(ref name) if name == CARGO_TONNAGE));
    assert_eq!(err.to_string(), "Required column missing: CARGO_TONNAGE");
    Ok(())
}

#[test]
fn test_active_vessels_berthed_not_sailed() -> Result<()> {
    let df = port_calls()?;
    let active = reporter().active_vessels(&df, &Shape::of(&df))?;

    let ActiveVessels::Found(active) = active else {
        panic!("expected one active vessel");
    };
    assert_eq!(active.height(), 1);
    let names: Vec<&str> = active
        .get_column_names()
        .iter()
        .map(|n| n.as_str())
        .collect();
    assert_eq!(
        names,
        vec![VESSEL_NO, VESSEL_NAME, VESSEL_CALL_ID, BERTHING_DATE, BERTHING_BERTH_CODE]
    );
    assert_eq!(active.column(VESSEL_NAME)?.str()?.get(0), Some("Baltic Star"));
    Ok(())
}

#[test]
fn test_no_active_vessels() -> Result<()> {
    let df = DataFrame::new(vec![
        timestamps(BERTHING_DATE, &[Some(millis(2024, 1, 1, 0, 0)), None]),
        timestamps(SAILED_DT, &[Some(millis(2024, 1, 2, 0, 0)), None]),
        Column::new(CARGO_TONNAGE.into(), [1.0, 2.0]),
    ])?;
    let active = reporter().active_vessels(&df, &Shape::of(&df))?;
    assert!(matches!(active, ActiveVessels::NoneActive));
    Ok(())
}

#[test]
fn test_active_vessels_need_both_timestamps() -> Result<()> {
    let df = df!(VESSEL_NAME => &["Aurora"], CARGO_TONNAGE => &[1.0])?;
    let active = reporter().active_vessels(&df, &Shape::of(&df))?;
    assert!(matches!(active, ActiveVessels::Unavailable));
    Ok(())
}

#[test]
fn test_active_projection_keeps_only_present_columns() -> Result<()> {
    let df = DataFrame::new(vec![
        Column::new(VESSEL_NAME.into(), ["Aurora"]),
        timestamps(BERTHING_DATE, &[Some(millis(2024, 1, 1, 0, 0))]),
        timestamps(SAILED_DT, &[None]),
        Column::new(CARGO_TONNAGE.into(), [10.0]),
    ])?;
    let ActiveVessels::Found(active) = reporter().active_vessels(&df, &Shape::of(&df))? else {
        panic!("expected an active vessel");
    };
    assert_eq!(active.width(), 2);
    Ok(())
}

#[test]
fn test_cargo_by_call_sums_per_id() -> Result<()> {
    let df = df!(
        VESSEL_CALL_ID => &[
            Some("1002"),
            Some("1001"),
            Some("1002"),
            None,
            Some("1003"),
            Some("1001.0")
        ],
        CARGO_TONNAGE => &[Some(10.0), Some(5.0), Some(2.5), Some(99.0), None, Some(1.0)]
    )?;

    let chart = reporter().cargo_by_call(&df, &Shape::of(&df))?.unwrap();

    assert_eq!(
        chart.bars,
        vec![
            CallTonnage {
                call_id: 1001,
                tonnage: 6.0
            },
            CallTonnage {
                call_id: 1002,
                tonnage: 12.5
            },
            CallTonnage {
                call_id: 1003,
                tonnage: 0.0
            },
        ]
    );
    assert_eq!(chart.skipped_groups, 0);
    assert_eq!(chart.total(), 18.5);
    Ok(())
}

#[test]
fn test_cargo_by_call_skips_non_integer_ids() -> Result<()> {
    let df = df!(
        VESSEL_CALL_ID => &["1001", "pending"],
        CARGO_TONNAGE => &[5.0, 7.0]
    )?;

    let chart = reporter().cargo_by_call(&df, &Shape::of(&df))?.unwrap();
    assert_eq!(chart.bars.len(), 1);
    assert_eq!(chart.skipped_groups, 1);
    Ok(())
}

#[test]
fn test_cargo_chart_absent_without_call_id() -> Result<()> {
    let df = df!(CARGO_TONNAGE => &[5.0])?;
    assert!(reporter().cargo_by_call(&df, &Shape::of(&df))?.is_none());
    Ok(())
}

#[test]
fn test_overview_respects_row_limit() -> Result<()> {
    let df = port_calls()?;
    let reporter = Reporter::new(ReportConfig {
        overview_rows: 2,
        ..ReportConfig::default()
    });
    let overview = reporter.overview(&df);
    assert_eq!(overview.height(), 2);
    assert_eq!(overview.width(), df.width());
    Ok(())
}

#[test]
fn test_parse_call_id() {
    assert_eq!(parse_call_id("1001"), Some(1001));
    assert_eq!(parse_call_id(" 1001.0 "), Some(1001));
    assert_eq!(parse_call_id("abc"), None);
    assert_eq!(parse_call_id("inf"), None);
}
