//! The interactive dashboard.
//!
//! A single eframe window titled "Vessel Data Analysis Dashboard". Loading a file
//! runs the shared pipeline once; the sections below then render the reporter's
//! views of the result:
//!
//! 1. Dataset Overview
//! 2. Cargo Summary
//! 3. Active Vessels
//! 4. Cargo Visualization
//!
//! User-facing messages arrive through [`ToastNotifier`] and end up as toasts
//! plus the status line under the toolbar.

use crate::config::{AppConfig, PipelineSettings, load_app_config_from, save_app_config_to};
use crate::error::{PortcallError, Result};
use crate::pipeline::reporter::CHART_COLUMNS_MISSING_MESSAGE;
use crate::pipeline::{
    ActiveVessels, DOWNLOAD_FILE_NAME, DOWNLOAD_MIME, NO_ACTIVE_VESSELS_MESSAGE, NO_DATA_MESSAGE,
    Notifier, PipelineOutput, Report, Reporter, run_pipeline,
};
use crate::theme;
use eframe::egui;
use egui_phosphor::regular as icons;
use polars::prelude::DataFrame;
use rfd::FileDialog;
use std::path::PathBuf;

mod cargo_chart;
mod records_table;

use cargo_chart::render_cargo_chart;
use records_table::render_records_table;

pub const DASHBOARD_TITLE: &str = "Vessel Data Analysis Dashboard";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Clone, Debug)]
pub struct StatusLine {
    pub level: StatusLevel,
    pub text: String,
}

/// Shows each message as a toast and keeps the latest one on the status line.
pub struct ToastNotifier<'a> {
    toasts: &'a mut egui_notify::Toasts,
    status: &'a mut Option<StatusLine>,
}

impl<'a> ToastNotifier<'a> {
    pub fn new(
        toasts: &'a mut egui_notify::Toasts,
        status: &'a mut Option<StatusLine>,
    ) -> Self {
        Self { toasts, status }
    }

    fn set_status(&mut self, level: StatusLevel, message: &str) {
        *self.status = Some(StatusLine {
            level,
            text: message.to_owned(),
        });
    }
}

impl Notifier for ToastNotifier<'_> {
    fn error(&mut self, message: &str) {
        self.toasts.error(message.to_owned());
        self.set_status(StatusLevel::Error, message);
    }

    fn warning(&mut self, message: &str) {
        self.toasts.warning(message.to_owned());
        self.set_status(StatusLevel::Warning, message);
    }

    fn info(&mut self, message: &str) {
        self.toasts.info(message.to_owned());
        self.set_status(StatusLevel::Info, message);
    }

    fn success(&mut self, message: &str) {
        self.toasts.success(message.to_owned());
        self.set_status(StatusLevel::Success, message);
    }
}

/// What the last pipeline run produced.
#[derive(Default)]
struct DashboardModel {
    output: Option<PipelineOutput>,
    overview: Option<DataFrame>,
    report: Option<Report>,
    /// Set when the report could not be built; later sections are not shown.
    report_error: Option<String>,
}

pub struct DashboardApp {
    settings: PipelineSettings,
    reporter: Reporter,
    /// Settings file the chosen input path is remembered in.
    config_path: Option<PathBuf>,
    model: DashboardModel,
    status: Option<StatusLine>,
    toasts: egui_notify::Toasts,
    needs_load: bool,
}

impl DashboardApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        config: AppConfig,
        config_path: Option<PathBuf>,
    ) -> Self {
        theme::apply_portcall_theme(&cc.egui_ctx);
        Self {
            settings: config.pipeline,
            reporter: Reporter::new(config.report),
            config_path,
            model: DashboardModel::default(),
            status: None,
            toasts: egui_notify::Toasts::default(),
            needs_load: true,
        }
    }

    /// Runs the pipeline on the current input and rebuilds every view.
    fn reload(&mut self) {
        self.model = DashboardModel::default();
        let mut notifier = ToastNotifier::new(&mut self.toasts, &mut self.status);

        let output = match run_pipeline(&self.settings, &mut notifier) {
            Ok(Some(output)) => output,
            Ok(None) => return,
            Err(e) => {
                tracing::error!("Pipeline failed: {e}");
                notifier.error(&format!("Processing failed: {e}"));
                return;
            }
        };
        tracing::info!("{}", output.summary());

        self.model.overview = Some(self.reporter.overview(&output.table));
        match self.reporter.report(&output.table, &output.shape) {
            Ok(report) => {
                if report.cargo.is_none() {
                    notifier.warning(CHART_COLUMNS_MISSING_MESSAGE);
                }
                self.model.report = Some(report);
            }
            Err(e) => {
                notifier.error(&e.to_string());
                self.model.report_error = Some(e.to_string());
            }
        }
        self.model.output = Some(output);
    }

    fn pick_input(&mut self) {
        let mut dialog = FileDialog::new().add_filter("CSV", &["csv"]);
        if let Some(parent) = self.settings.input_path.parent()
            && parent.is_dir()
        {
            dialog = dialog.set_directory(parent);
        }
        if let Some(path) = dialog.pick_file() {
            tracing::info!("Input changed to {}", path.display());
            if let Some(config_path) = &self.config_path {
                let mut config = load_app_config_from(config_path);
                config.pipeline.input_path.clone_from(&path);
                if let Err(e) = save_app_config_to(&config, config_path) {
                    tracing::warn!("Could not remember input path: {e}");
                }
            }
            self.settings.input_path = path;
            self.needs_load = true;
        }
    }

    fn download_cleaned(&mut self) {
        let Some(output) = &self.model.output else {
            return;
        };
        let Some(path) = FileDialog::new()
            .set_file_name(DOWNLOAD_FILE_NAME)
            .add_filter("CSV", &["csv"])
            .save_file()
        else {
            return;
        };

        let mut notifier = ToastNotifier::new(&mut self.toasts, &mut self.status);
        match std::fs::write(&path, &output.csv_bytes) {
            Ok(()) => {
                tracing::info!("Downloaded cleaned dataset to {}", path.display());
                notifier.success(&format!("Saved {}", path.display()));
            }
            Err(e) => notifier.error(&format!("Download failed: {e}")),
        }
    }

    fn render_toolbar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui.button(format!("{} Open CSV", icons::FOLDER_OPEN)).clicked() {
                self.pick_input();
            }
            if ui
                .button(format!("{} Reload", icons::ARROW_CLOCKWISE))
                .clicked()
            {
                self.needs_load = true;
            }
            ui.label(
                egui::RichText::new(self.settings.input_path.display().to_string()).weak(),
            );

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let button = ui
                    .add_enabled(
                        self.model.output.is_some(),
                        egui::Button::new(format!(
                            "{} Download Cleaned Dataset",
                            icons::DOWNLOAD_SIMPLE
                        )),
                    )
                    .on_hover_text(format!("{DOWNLOAD_FILE_NAME} ({DOWNLOAD_MIME})"));
                if button.clicked() {
                    self.download_cleaned();
                }
            });
        });

        if let Some(status) = &self.status {
            let color = match status.level {
                StatusLevel::Error => theme::ERROR_COLOR,
                StatusLevel::Warning => theme::WARNING_COLOR,
                StatusLevel::Success => egui::Color32::from_rgb(102, 187, 106),
                StatusLevel::Info => ui.visuals().weak_text_color(),
            };
            ui.colored_label(color, &status.text);
        }
    }

    fn render_sections(&self, ui: &mut egui::Ui) {
        let Some(overview) = &self.model.overview else {
            ui.label(egui::RichText::new(NO_DATA_MESSAGE).weak());
            return;
        };

        section(ui, icons::TABLE, "Dataset Overview", |ui| {
            if let Some(output) = &self.model.output {
                ui.label(egui::RichText::new(output.summary()).weak().small());
            }
            render_records_table(ui, "overview", overview, self.reporter.config());
        });

        if let Some(error) = &self.model.report_error {
            ui.colored_label(theme::ERROR_COLOR, error);
            return;
        }
        let Some(report) = &self.model.report else {
            return;
        };

        section(ui, icons::PACKAGE, "Cargo Summary", |ui| {
            ui.horizontal(|ui| {
                metric_tile(ui, &report.metrics.cargo_tonnage);
                if let Some(turnaround) = &report.metrics.turnaround_hours {
                    ui.add_space(theme::SPACING_LARGE);
                    metric_tile(ui, turnaround);
                }
            });
        });

        section(ui, icons::ANCHOR, "Active Vessels", |ui| match &report.active {
            ActiveVessels::Found(active) => {
                render_records_table(ui, "active_vessels", active, self.reporter.config());
            }
            ActiveVessels::NoneActive => {
                ui.label(NO_ACTIVE_VESSELS_MESSAGE);
            }
            ActiveVessels::Unavailable => {
                ui.label(
                    egui::RichText::new("Berthing or sailed column not found.")
                        .color(theme::WARNING_COLOR),
                );
            }
        });

        section(ui, icons::CHART_BAR, "Cargo Visualization", |ui| {
            match &report.cargo {
                Some(chart) => render_cargo_chart(ui, chart),
                None => {
                    ui.label(
                        egui::RichText::new(CHART_COLUMNS_MISSING_MESSAGE)
                            .color(theme::WARNING_COLOR),
                    );
                }
            }
        });
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.needs_load {
            self.needs_load = false;
            self.reload();
        }

        egui::TopBottomPanel::top("dashboard_top")
            .frame(theme::top_bar_frame())
            .show(ctx, |ui| {
                ui.heading(
                    egui::RichText::new(format!("{} {DASHBOARD_TITLE}", icons::BOAT))
                        .size(24.0)
                        .strong(),
                );
                ui.add_space(theme::SPACING_SMALL);
                self.render_toolbar(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false; 2])
                .show(ui, |ui| self.render_sections(ui));
        });

        self.toasts.show(ctx);
    }
}

fn section(
    ui: &mut egui::Ui,
    icon: &str,
    title: &str,
    add_contents: impl FnOnce(&mut egui::Ui),
) {
    ui.add_space(theme::SPACING_SMALL);
    theme::card_frame(ui).show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.heading(egui::RichText::new(format!("{icon} {title}")).color(theme::ACCENT_COLOR));
        ui.add_space(theme::SPACING_SMALL);
        add_contents(ui);
    });
}

fn metric_tile(ui: &mut egui::Ui, metric: &crate::pipeline::Metric) {
    ui.vertical(|ui| {
        ui.label(egui::RichText::new(metric.label).weak());
        ui.label(
            egui::RichText::new(format!("{} {}", metric.formatted(), metric.unit))
                .size(22.0)
                .strong(),
        );
    });
}

/// Opens the dashboard window and blocks until it is closed.
///
/// # Errors
///
/// The native window or graphics context could not be created.
pub fn run_dashboard(config: AppConfig, config_path: Option<PathBuf>) -> Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(DASHBOARD_TITLE)
            .with_inner_size([1280.0, 900.0])
            .with_min_inner_size([800.0, 600.0]),
        ..Default::default()
    };

    eframe::run_native(
        DASHBOARD_TITLE,
        options,
        Box::new(|cc| Ok(Box::new(DashboardApp::new(cc, config, config_path)))),
    )
    .map_err(|e| PortcallError::Other(format!("Dashboard failed to start: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toast_notifier_keeps_latest_status() {
        let mut toasts = egui_notify::Toasts::default();
        let mut status = None;
        let mut notifier = ToastNotifier::new(&mut toasts, &mut status);

        notifier.warning("Required columns not found for visualization.");
        notifier.error(NO_DATA_MESSAGE);

        let status = status.unwrap();
        assert_eq!(status.level, StatusLevel::Error);
        assert_eq!(status.text, NO_DATA_MESSAGE);
    }
}
