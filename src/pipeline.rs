//! The shared load, clean, derive and report pipeline.
//!
//! Both front ends drive the same plain functions over a polars `DataFrame`:
//!
//! 1. [`loader::load_or_report`]: read the export, day-first timestamps, empty
//!    table on failure
//! 2. [`cleaner::clean_vessel_calls`]: timestamps, vessel names, tonnage
//! 3. [`deriver::derive_turnaround`]: `TURNAROUND_HOURS`
//! 4. [`reporter::Reporter`]: overview, metrics, active vessels, cargo chart
//!
//! [`run_pipeline`] strings stages 1 to 3 together and persists the result.
//!
//! ```no_run
//! use portcall::config::{PipelineSettings, ReportConfig};
//! use portcall::pipeline::{LogNotifier, Reporter, run_pipeline};
//!
//! let mut notifier = LogNotifier;
//! if let Some(output) = run_pipeline(&PipelineSettings::default(), &mut notifier)? {
//!     let report = Reporter::new(ReportConfig::default()).report(&output.table, &output.shape)?;
//!     println!("Mean tonnage: {}", report.metrics.cargo_tonnage.formatted());
//! }
//! # Ok::<(), portcall::error::PortcallError>(())
//! ```

pub mod cleaner;
pub mod deriver;
pub mod loader;
pub mod reporter;
pub mod schema;
pub mod timestamps;

pub use cleaner::{DOWNLOAD_FILE_NAME, DOWNLOAD_MIME, clean_vessel_calls, save_cleaned};
pub use deriver::derive_turnaround;
pub use loader::{is_empty_table, load_or_report, load_vessel_calls};
pub use reporter::{
    ActiveVessels, CallTonnage, CargoByCall, Metric, NO_ACTIVE_VESSELS_MESSAGE, NO_DATA_MESSAGE,
    Report, Reporter, SummaryMetrics,
};
pub use schema::Shape;

use crate::config::PipelineSettings;
use crate::error::Result;
use polars::prelude::DataFrame;

#[cfg(test)]
mod tests;

/// The caller's output channel for user-facing messages.
pub trait Notifier {
    fn error(&mut self, message: &str);
    fn warning(&mut self, message: &str);
    fn info(&mut self, message: &str);
    fn success(&mut self, message: &str);
}

/// Sends every message to the tracing log only.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn error(&mut self, message: &str) {
        tracing::error!("{message}");
    }

    fn warning(&mut self, message: &str) {
        tracing::warn!("{message}");
    }

    fn info(&mut self, message: &str) {
        tracing::info!("{message}");
    }

    fn success(&mut self, message: &str) {
        tracing::info!("{message}");
    }
}

/// A cleaned, derived and persisted table.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub table: DataFrame,
    pub shape: Shape,
    /// Exactly the bytes written to the output path.
    pub csv_bytes: Vec<u8>,
    pub rows: usize,
    pub duration: std::time::Duration,
}

impl PipelineOutput {
    pub fn summary(&self) -> String {
        format!(
            "{} rows x {} columns cleaned in {:.2}s",
            self.rows,
            self.table.width(),
            self.duration.as_secs_f32()
        )
    }
}

/// Load, clean, derive, then write the cleaned CSV.
///
/// Returns `Ok(None)` after reporting "No data available." when the input could
/// not be loaded or holds no rows; nothing is written in that case.
///
/// # Errors
///
/// Processing failures after a successful load, and failure to write the output.
pub fn run_pipeline(
    settings: &PipelineSettings,
    notifier: &mut dyn Notifier,
) -> Result<Option<PipelineOutput>> {
    let start = std::time::Instant::now();

    let df = load_or_report(&settings.input_path, notifier);
    if is_empty_table(&df) {
        notifier.error(NO_DATA_MESSAGE);
        return Ok(None);
    }

    let mut shape = Shape::of(&df);
    let missing = shape.missing_required();
    if !missing.is_empty() {
        tracing::warn!("Input lacks required column(s): {}", missing.join(", "));
    }

    let df = clean_vessel_calls(df, &shape)?;
    let mut table = derive_turnaround(df, &mut shape)?;
    let csv_bytes = save_cleaned(&mut table, &settings.output_path)?;
    notifier.success("Dataset cleaned and saved.");

    Ok(Some(PipelineOutput {
        rows: table.height(),
        table,
        shape,
        csv_bytes,
        duration: start.elapsed(),
    }))
}
