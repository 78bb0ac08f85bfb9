//! Fibgc CLI - An interactive shell for the Fibonacci heap manager.
//!
//! Parses command-line flags, installs a `tracing`-backed `log` subscriber,
//! and runs the menu-driven command loop until the user quits.

mod audit;
mod config;
mod display;
mod error;
mod repl;

use clap::Parser;
use tracing_log::LogTracer;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use config::Config;
use error::Result;

/// Fibgc - an interactive Fibonacci-sized buddy heap with mark-and-sweep GC.
#[derive(Parser, Debug)]
#[command(name = "fibgc")]
#[command(author = "Fibgc Team")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Interactive Fibonacci heap manager with garbage collection", long_about = None)]
struct Cli {
    /// Enable verbose (debug-level) logging
    #[arg(short, long, env = "FIBGC_VERBOSE")]
    verbose: bool,

    /// Disable ANSI color output
    #[arg(long, env = "FIBGC_NO_COLOR")]
    no_color: bool,

    /// Total budget the heap is initialised with
    #[arg(short, long, default_value_t = 16000, env = "FIBGC_BUDGET")]
    budget: u64,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config {
        verbose: cli.verbose,
        color: !cli.no_color,
        budget: cli.budget,
    };

    repl::run(&config)
}

/// Installs a `tracing` subscriber and bridges `log` records through it, so
/// the core crate's `log::debug!`/`info!`/`warn!` calls are also captured.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    let subscriber = fmt::layer().with_target(false).with_thread_ids(false);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(subscriber)
        .try_init();
    let _ = LogTracer::init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_default_budget() {
        let cli = Cli::parse_from(["fibgc"]);
        assert_eq!(cli.budget, 16000);
        assert!(!cli.verbose);
        assert!(!cli.no_color);
    }

    #[test]
    fn cli_parses_budget_override() {
        let cli = Cli::parse_from(["fibgc", "--budget", "500"]);
        assert_eq!(cli.budget, 500);
    }

    #[test]
    fn cli_parses_verbose_and_no_color() {
        let cli = Cli::parse_from(["fibgc", "--verbose", "--no-color"]);
        assert!(cli.verbose);
        assert!(cli.no_color);
    }
}
