//! reelname CLI
//!
//! Renames movie files to `Title (Year) <rest of the original name>` using TMDB.

use clap::Parser;
use reelname::cli::args::Cli;
use reelname::cli::commands::{run, watch, RunOptions};
use reelname::models::config::{self, Config};
use reelname::preflight;
use reelname::utils::fs::ensure_directory;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose);

    let mut config = config::load_config(cli.config.as_deref())?;
    cli.apply_overrides(&mut config);
    tracing::debug!("Matching config: {:?}", config.matching);

    ensure_directory(&cli.directory)?;

    // Preflight only matters when TMDB is used
    if !cli.offline && !cli.skip_preflight {
        run_preflight_checks(&config).await?;
    }

    let options = RunOptions {
        dry_run: cli.dry_run,
        offline: cli.offline,
    };

    if cli.watch {
        watch::watch_directory(&cli.directory, &config, &options).await?;
    } else {
        run::run_once(&cli.directory, &config, &options).await?;
    }

    Ok(())
}

/// Initialize the logging system. `RUST_LOG` wins when set.
fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let default_filter = if verbose {
        "reelname=debug"
    } else {
        "reelname=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).without_time())
        .with(filter)
        .init();
}

/// Run preflight checks and exit if any fail.
async fn run_preflight_checks(config: &Config) -> anyhow::Result<()> {
    use colored::Colorize;

    println!("{}", "Running preflight checks...".bold());
    println!();

    let results = preflight::run_preflight_checks(config).await;
    preflight::print_results(&results);

    println!();

    if !preflight::all_passed(&results) {
        anyhow::bail!("Preflight checks failed. Fix the issues above and try again.");
    }

    Ok(())
}
