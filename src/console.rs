//! Plain console front end.
//!
//! Prints the overview, summary metrics and active vessels to stdout and writes
//! the cargo chart as a standalone HTML page. Table layout follows the
//! [`ReportConfig`] it is given rather than any global display setting.
#![expect(clippy::print_stdout, clippy::print_stderr)]

use crate::config::{PipelineSettings, ReportConfig};
use crate::error::{PortcallError, Result};
use crate::pipeline::{
    ActiveVessels, CargoByCall, Notifier, NO_ACTIVE_VESSELS_MESSAGE, Reporter, SummaryMetrics,
    reporter::CHART_COLUMNS_MISSING_MESSAGE, run_pipeline,
};
use crate::utils::{cell_text, truncate_cell};
use plotly::color::{NamedColor, Rgb};
use plotly::common::{Line, Marker};
use plotly::layout::{Axis, AxisType};
use plotly::{Bar, Layout, Plot};
use polars::prelude::DataFrame;
use std::path::Path;

const COLUMN_GAP: &str = "  ";
/// Pixels per figure-size unit when exporting the chart.
const CHART_PIXELS_PER_UNIT: f32 = 100.0;

/// Errors to stderr, everything else to stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn error(&mut self, message: &str) {
        eprintln!("{message}");
    }

    fn warning(&mut self, message: &str) {
        println!("{message}");
    }

    fn info(&mut self, message: &str) {
        println!("{message}");
    }

    fn success(&mut self, message: &str) {
        println!("{message}");
    }
}

#[derive(Debug, Clone)]
pub struct ConsoleOptions {
    pub settings: PipelineSettings,
    pub report: ReportConfig,
    /// Open the written chart in the default browser.
    pub show_chart: bool,
}

/// Runs the whole pipeline and prints the report.
///
/// A missing input is reported as "No data available." and is not an error.
///
/// # Errors
///
/// Processing or output failures, and a missing `CARGO_TONNAGE` column.
pub fn run_console_report(options: &ConsoleOptions) -> Result<()> {
    let mut notifier = ConsoleNotifier;
    let Some(output) = run_pipeline(&options.settings, &mut notifier)? else {
        return Ok(());
    };
    tracing::info!("{}", output.summary());

    let reporter = Reporter::new(options.report.clone());

    println!("\n--- Dataset Overview ---");
    println!("{}", render_table(&reporter.overview(&output.table), reporter.config()));

    let report = reporter.report(&output.table, &output.shape)?;

    println!("--- Cargo Summary ---");
    println!("{}", render_metrics(&report.metrics));

    println!("--- Active Vessels ---");
    match &report.active {
        ActiveVessels::Found(active) => println!("{}\n", render_table(active, reporter.config())),
        ActiveVessels::NoneActive => println!("{NO_ACTIVE_VESSELS_MESSAGE}\n"),
        ActiveVessels::Unavailable => {
            notifier.warning("Berthing or sailed column not found; active vessels unavailable.");
        }
    }

    match &report.cargo {
        Some(chart) => {
            write_cargo_chart(chart, &options.settings.chart_path, options.show_chart)?;
            println!(
                "Cargo chart ({} calls) written to {}",
                chart.bars.len(),
                options.settings.chart_path.display()
            );
        }
        None => notifier.warning(CHART_COLUMNS_MISSING_MESSAGE),
    }

    Ok(())
}

pub fn render_metrics(metrics: &SummaryMetrics) -> String {
    let mut lines = vec![format!(
        "{}: {} {}",
        metrics.cargo_tonnage.label,
        metrics.cargo_tonnage.formatted(),
        metrics.cargo_tonnage.unit
    )];
    if let Some(turnaround) = &metrics.turnaround_hours {
        lines.push(format!(
            "{}: {} {}",
            turnaround.label,
            turnaround.formatted(),
            turnaround.unit
        ));
    }
    lines.push(String::new());
    lines.join("\n")
}

/// Renders a fixed-width text table.
///
/// `max_columns` and `display_width` both drop trailing columns; a footer line
/// says how many were hidden.
pub fn render_table(df: &DataFrame, config: &ReportConfig) -> String {
    let columns = df.get_columns();
    let limit = config.max_columns.unwrap_or(columns.len()).min(columns.len());

    let mut cells: Vec<Vec<String>> = Vec::with_capacity(limit);
    let mut widths: Vec<usize> = Vec::with_capacity(limit);
    let mut line_width = 0;

    for column in columns.iter().take(limit) {
        let mut col_cells = Vec::with_capacity(df.height() + 1);
        col_cells.push(truncate_cell(column.name().as_str(), config.max_cell_width));
        for row in 0..df.height() {
            col_cells.push(truncate_cell(&cell_text(column, row), config.max_cell_width));
        }
        let width = col_cells.iter().map(|c| c.chars().count()).max().unwrap_or(0);

        let added = if widths.is_empty() { width } else { width + COLUMN_GAP.len() };
        if let Some(max_width) = config.display_width
            && !widths.is_empty()
            && line_width + added > max_width
        {
            break;
        }
        line_width += added;
        widths.push(width);
        cells.push(col_cells);
    }

    let mut out = format!("shape: ({}, {})\n", df.height(), df.width());
    for row in 0..=df.height() {
        let line: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(col_cells, width)| {
                let cell = col_cells.get(row).map(String::as_str).unwrap_or("");
                format!("{cell:<width$}")
            })
            .collect();
        out.push_str(line.join(COLUMN_GAP).trim_end());
        out.push('\n');
        if row == 0 {
            out.push_str(&"-".repeat(line_width));
            out.push('\n');
        }
    }

    let hidden = df.width() - cells.len();
    if hidden > 0 {
        out.push_str(&format!("… {hidden} more column(s) not shown\n"));
    }
    out
}

/// Builds the plotly bar chart: one category per call id, sky-blue bars with
/// black edges, labels rotated 45 degrees, on a 3:1 canvas.
pub fn cargo_chart_plot(chart: &CargoByCall) -> Plot {
    let labels: Vec<String> = chart.bars.iter().map(|b| b.call_id.to_string()).collect();
    let values: Vec<f64> = chart.bars.iter().map(|b| b.tonnage).collect();
    let (r, g, b) = CargoByCall::BAR_RGB;

    let trace = Bar::new(labels, values)
        .name("Cargo tonnage")
        .opacity(f64::from(CargoByCall::BAR_ALPHA))
        .marker(
            Marker::new()
                .color(Rgb::new(r, g, b))
                .line(Line::new().color(NamedColor::Black).width(1.0)),
        );

    let (fig_w, fig_h) = CargoByCall::FIGURE_SIZE;
    let layout = Layout::new()
        .title(CargoByCall::TITLE)
        .width((fig_w * CHART_PIXELS_PER_UNIT) as usize)
        .height((fig_h * CHART_PIXELS_PER_UNIT) as usize)
        .x_axis(
            Axis::new()
                .title(CargoByCall::X_LABEL)
                .type_(AxisType::Category)
                .tick_angle(-f64::from(CargoByCall::LABEL_ROTATION_DEG)),
        )
        .y_axis(Axis::new().title(CargoByCall::Y_LABEL));

    let mut plot = Plot::new();
    plot.add_trace(trace);
    plot.set_layout(layout);
    plot
}

/// Writes the chart page to `path`, overwriting it, and optionally opens it.
pub fn write_cargo_chart(chart: &CargoByCall, path: &Path, show: bool) -> Result<()> {
    if chart.bars.is_empty() {
        tracing::warn!("No call ids to chart; writing an empty chart");
    }
    let plot = cargo_chart_plot(chart);
    std::fs::write(path, plot.to_html()).map_err(|e| {
        PortcallError::Chart(format!("Failed to write chart to {}: {e}", path.display()))
    })?;
    if show {
        plot.show();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::{CallTonnage, Metric};
    use polars::prelude::*;

    fn sample() -> anyhow::Result<DataFrame> {
        Ok(df!(
            "VESSEL_NAME" => &["Aurora", "Baltic Star"],
            "VESSEL_CALL_ID" => &["1001", "1002"],
            "BERTHING_BERTH_CODE" => &["B01", "B02"]
        )?)
    }

    #[test]
    fn test_render_table_all_columns_by_default() -> anyhow::Result<()> {
        let text = render_table(&sample()?, &ReportConfig::default());
        assert!(text.starts_with("shape: (2, 3)"));
        assert!(text.contains("VESSEL_NAME"));
        assert!(text.contains("BERTHING_BERTH_CODE"));
        assert!(text.contains("Baltic Star"));
        assert!(!text.contains("not shown"));
        Ok(())
    }

    #[test]
    fn test_render_table_honours_max_columns() -> anyhow::Result<()> {
        let config = ReportConfig {
            max_columns: Some(1),
            ..ReportConfig::default()
        };
        let text = render_table(&sample()?, &config);
        assert!(text.contains("VESSEL_NAME"));
        assert!(!text.contains("VESSEL_CALL_ID"));
        assert!(text.contains("2 more column(s) not shown"));
        Ok(())
    }

    #[test]
    fn test_render_table_honours_display_width() -> anyhow::Result<()> {
        let config = ReportConfig {
            display_width: Some(30),
            ..ReportConfig::default()
        };
        let text = render_table(&sample()?, &config);
        assert!(text.contains("VESSEL_NAME"));
        assert!(!text.contains("BERTHING_BERTH_CODE"));
        Ok(())
    }

    #[test]
    fn test_render_metrics_formats_two_decimals() {
        let metrics = SummaryMetrics {
            cargo_tonnage: Metric {
                label: "Average Cargo Tonnage",
                unit: "tons",
                value: Some(150.0),
            },
            turnaround_hours: Some(Metric {
                label: "Average Turnaround Time",
                unit: "hours",
                value: Some(30.0),
            }),
        };
        let text = render_metrics(&metrics);
        assert!(text.contains("Average Cargo Tonnage: 150.00 tons"));
        assert!(text.contains("Average Turnaround Time: 30.00 hours"));
    }

    #[test]
    fn test_chart_written_as_html() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("chart.html");
        let chart = CargoByCall {
            bars: vec![
                CallTonnage {
                    call_id: 7,
                    tonnage: 120.0,
                },
                CallTonnage {
                    call_id: 9,
                    tonnage: 80.5,
                },
            ],
            skipped_groups: 0,
        };

        write_cargo_chart(&chart, &path, false)?;
        let html = std::fs::read_to_string(&path)?;
        assert!(html.contains(CargoByCall::TITLE));
        Ok(())
    }
}
