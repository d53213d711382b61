//! Route Explorer - Command-line tool for static HTTP route discovery.
//!
//! This binary discovers the HTTP routes an application declares across its
//! module graph by reading declarative module metadata, without starting
//! the application or touching any of its runtime dependencies.
//!
//! # Usage
//!
//! ```bash
//! route-explorer [OPTIONS] <ENTRY_PATH> [MODULE_CLASS]
//! ```
//!
//! # Examples
//!
//! List routes starting from the default `AppModule`:
//! ```bash
//! route-explorer ./app.modules.json
//! ```
//!
//! Emit JSON with a global prefix:
//! ```bash
//! route-explorer ./app.modules.json AppModule --json --prefix api
//! ```
//!
//! Enable verbose logging:
//! ```bash
//! route-explorer ./app.modules.json -v
//! ```

mod cli;
mod error;
mod extractor;
mod loader;
mod metadata;
mod model;
mod path;
mod render;
mod walker;

use anyhow::Result;
use clap::Parser;
use log::info;

fn main() -> Result<()> {
    // We need to parse args twice: once to get verbose flag, then again after logger init
    // First, do a quick parse just to check for verbose flag
    let args_for_verbose = cli::CliArgs::parse();

    // Initialize logger based on verbose flag
    let log_level = if args_for_verbose.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    info!("Route Explorer starting...");

    let args = cli::parse_args_from_parsed(args_for_verbose)?;

    // Run the main workflow
    cli::run(args)?;

    info!("Route discovery completed successfully");

    Ok(())
}
