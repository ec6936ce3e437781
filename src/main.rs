//! # Portcall Entry Point
//!
//! ```text
//! main()
//!   │
//!   ├─> Initialise logging
//!   ├─> Parse CLI arguments (clap)
//!   │
//!   ├─> If command provided: run it and exit
//!   └─> Otherwise: open the dashboard window
//! ```
//!
//! ```bash
//! portcall                         # dashboard
//! portcall report --show-chart     # console report
//! portcall clean --file calls.csv  # clean only
//! ```

#![warn(clippy::all, rust_2018_idioms)]

mod cli;

use anyhow::Result;
use clap::Parser as _;

fn main() -> Result<()> {
    // RUST_LOG overrides the default `info` filter
    portcall::logging::init()?;

    let cli = cli::Cli::parse();
    let config_path = cli::config_path(cli.config);
    let config = cli::effective_config(config_path.as_deref());

    if let Some(command) = cli.command {
        return cli::run_command(command, config, config_path.as_deref());
    }

    portcall::dashboard::run_dashboard(config, config_path)?;
    Ok(())
}
