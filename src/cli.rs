#![expect(clippy::print_stdout)]

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use portcall::config::{self, AppConfig};
use portcall::console::{ConsoleNotifier, ConsoleOptions, run_console_report};
use portcall::pipeline::run_pipeline;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "portcall", about = "Vessel port-call cleaning and reporting")]
pub struct Cli {
    /// Settings file to use instead of the one in the platform config directory
    #[arg(long, global = true, env = "PORTCALL_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Clean the export and print the report to the console
    Report {
        /// Port-call CSV export. Defaults to the configured input path.
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Where the cleaned CSV is written. Overwritten on every run.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Where the cargo chart HTML page is written
        #[arg(long)]
        chart: Option<PathBuf>,

        /// Open the chart in the default browser once written
        #[arg(long)]
        show_chart: bool,

        /// Rows shown in the dataset overview
        #[arg(long)]
        rows: Option<usize>,
    },
    /// Clean the export and write the cleaned CSV without reporting
    Clean {
        /// Port-call CSV export. Defaults to the configured input path.
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Where the cleaned CSV is written. Overwritten on every run.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Show the effective settings
    Config {
        /// Also write them to the settings file, creating it if needed
        #[arg(long)]
        save: bool,
    },
}

/// The settings file in use: `--config` or `PORTCALL_CONFIG` when set, otherwise
/// the one in the platform config directory.
pub fn config_path(explicit: Option<PathBuf>) -> Option<PathBuf> {
    explicit.or_else(|| match config::get_config_path() {
        Ok(path) => Some(path),
        Err(e) => {
            tracing::warn!("{e}; using default settings");
            None
        }
    })
}

pub fn effective_config(path: Option<&Path>) -> AppConfig {
    path.map(config::load_app_config_from).unwrap_or_default()
}

pub fn run_command(
    command: Commands,
    mut app_config: AppConfig,
    config_path: Option<&Path>,
) -> Result<()> {
    match command {
        Commands::Report {
            file,
            output,
            chart,
            show_chart,
            rows,
        } => {
            apply_paths(&mut app_config, file, output);
            if let Some(chart) = chart {
                app_config.pipeline.chart_path = chart;
            }
            if let Some(rows) = rows {
                app_config.report.overview_rows = rows;
            }
            let options = ConsoleOptions {
                settings: app_config.pipeline,
                report: app_config.report,
                show_chart,
            };
            run_console_report(&options).context("Report failed")
        }
        Commands::Clean { file, output } => {
            apply_paths(&mut app_config, file, output);
            handle_clean(&app_config)
        }
        Commands::Config { save } => handle_config(&app_config, config_path, save),
    }
}

fn apply_paths(app_config: &mut AppConfig, file: Option<PathBuf>, output: Option<PathBuf>) {
    if let Some(file) = file {
        app_config.pipeline.input_path = file;
    }
    if let Some(output) = output {
        app_config.pipeline.output_path = output;
    }
}

fn handle_clean(app_config: &AppConfig) -> Result<()> {
    let settings = &app_config.pipeline;
    println!(
        "Cleaning {0} and saving to {1}...",
        settings.input_path.display(),
        settings.output_path.display()
    );

    if let Some(output) = run_pipeline(settings, &mut ConsoleNotifier).context("Clean failed")? {
        println!("{}", output.summary());
    }
    Ok(())
}

fn handle_config(app_config: &AppConfig, config_path: Option<&Path>, save: bool) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(app_config)?);
    if save {
        let path = config_path.context("No settings file location; pass --config")?;
        config::save_app_config_to(app_config, path)?;
        println!("Settings saved to {}", path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory as _;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_report_flags_override_config() -> Result<()> {
        let cli = Cli::try_parse_from([
            "portcall",
            "report",
            "--file",
            "calls.csv",
            "--rows",
            "25",
            "--show-chart",
        ])?;
        let Some(Commands::Report {
            file,
            rows,
            show_chart,
            output,
            ..
        }) = cli.command
        else {
            panic!("expected the report command");
        };

        let mut app_config = AppConfig::default();
        apply_paths(&mut app_config, file, output);
        assert_eq!(app_config.pipeline.input_path, PathBuf::from("calls.csv"));
        assert_eq!(
            app_config.pipeline.output_path,
            PathBuf::from(config::DEFAULT_OUTPUT_PATH)
        );
        assert_eq!(rows, Some(25));
        assert!(show_chart);
        Ok(())
    }

    #[test]
    fn test_no_subcommand_opens_dashboard() -> Result<()> {
        let cli = Cli::try_parse_from(["portcall"])?;
        assert!(cli.command.is_none());
        Ok(())
    }

    #[test]
    fn test_config_flag_selects_settings_file() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("custom").join("portcall.json");
        let cli = Cli::try_parse_from([
            "portcall",
            "config",
            "--save",
            "--config",
            path.to_str().context("temp path is not UTF-8")?,
        ])?;
        assert_eq!(config_path(cli.config.clone()), Some(path.clone()));

        let mut app_config = effective_config(Some(&path));
        assert_eq!(app_config, AppConfig::default());
        app_config.report.overview_rows = 12;
        let Some(Commands::Config { save }) = cli.command else {
            panic!("expected the config command");
        };
        handle_config(&app_config, Some(&path), save)?;

        assert!(path.exists());
        assert_eq!(effective_config(Some(&path)).report.overview_rows, 12);
        Ok(())
    }
}
