//! # Portcall - Vessel Port-Call Analysis
//!
//! Portcall loads a port-call CSV export, cleans it, derives turnaround times and
//! reports on it. The same pipeline backs two front ends: an egui dashboard and a
//! console report.
//!
//! ## Quick Start
//!
//! ```no_run
//! use portcall::config::{PipelineSettings, ReportConfig};
//! use portcall::pipeline::{LogNotifier, Reporter, run_pipeline};
//!
//! let settings = PipelineSettings::default();
//! if let Some(output) = run_pipeline(&settings, &mut LogNotifier)? {
//!     let reporter = Reporter::new(ReportConfig::default());
//!     let report = reporter.report(&output.table, &output.shape)?;
//!     println!(
//!         "{}: {}",
//!         report.metrics.cargo_tonnage.label,
//!         report.metrics.cargo_tonnage.formatted()
//!     );
//! }
//! # Ok::<(), portcall::error::PortcallError>(())
//! ```
//!
//! ## Core Modules
//!
//! - [`pipeline`]: loader, cleaner, deriver and reporter stages
//!   - [`pipeline::schema`]: the declared column set and its [`pipeline::Shape`]
//! - [`console`]: plain-text report and HTML cargo chart
//! - [`dashboard`]: the interactive eframe window
//! - [`config`]: persisted settings
//! - [`error`]: error types and handling utilities
//! - [`logging`]: tracing setup
//!
//! ## Data Flow
//!
//! ```text
//! CSV ─> load (day-first timestamps) ─> clean ─> derive TURNAROUND_HOURS
//!                                                   │
//!                                                   ├─> cleaned_dataset.csv
//!                                                   └─> Reporter ─> dashboard / console
//! ```
//!
//! A load failure never propagates: it is reported through the caller's
//! [`pipeline::Notifier`] and the run ends with "No data available.".

#![warn(clippy::all, rust_2018_idioms)]

pub mod config;
pub mod console;
pub mod dashboard;
pub mod error;
pub mod logging;
pub mod pipeline;
pub mod theme;
pub mod utils;
