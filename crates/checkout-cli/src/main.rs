//! # checkout
//!
//! Replays a scan script against a price book and prints the receipt.
//!
//! ## Usage
//! ```bash
//! # Script from a file
//! cargo run -p checkout-cli -- --prices prices.toml --script scans.txt
//!
//! # Script from stdin, logging every order update
//! echo "scan Soda" | cargo run -p checkout-cli -- -p prices.toml -v
//! ```
//!
//! Exits non-zero when configuration or the price book is invalid, or when
//! any script line was rejected.

use std::io::{self, Read};
use std::process::ExitCode;

use checkout_cli::{
    replay, write_receipt, CliConfig, CliError, CliResult, Invocation, PriceBook, USAGE,
};
use checkout_core::Order;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let config = match CliConfig::load(std::env::args().skip(1)) {
        Ok(Invocation::Run(config)) => config,
        Ok(Invocation::Help) => {
            println!("{}", USAGE);
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            eprintln!("{}", err);
            eprintln!("Try 'checkout --help' for usage.");
            return ExitCode::FAILURE;
        }
    };

    init_tracing(config.verbose);

    match run(&config) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            error!(error = %err, "Checkout failed");
            eprintln!("{}", err);
            ExitCode::FAILURE
        }
    }
}

/// Initializes the logging subsystem. Logs go to stderr so the receipt on
/// stdout stays clean.
///
/// ## Log Levels
/// - Default: `warn` (rejected script lines)
/// - `--verbose`: every catalog and order update
/// - `RUST_LOG` overrides both
fn init_tracing(verbose: bool) {
    let default = if verbose {
        "info,checkout_core=debug,checkout_cli=debug,checkout=debug"
    } else {
        "warn"
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Runs one checkout. Returns `Ok(false)` if any script line was rejected.
fn run(config: &CliConfig) -> CliResult<bool> {
    let catalog = PriceBook::load(&config.price_book)?.build_catalog()?;

    let script = match &config.script {
        Some(path) => std::fs::read_to_string(path).map_err(|source| CliError::Read {
            path: path.clone(),
            source,
        })?,
        None => {
            let mut script = String::new();
            io::stdin().read_to_string(&mut script)?;
            script
        }
    };

    let mut order = Order::new(&catalog);
    info!(order_id = %order.id(), "Order opened");

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let report = replay(&mut order, &script, &mut out)?;
    write_receipt(&order.summary(), &mut out)?;

    info!(
        applied = report.applied,
        rejected = report.rejected.len(),
        total = order.total_price(),
        "Order finished"
    );

    Ok(report.is_clean())
}
