//! sift - filter data frames by displayed values.
//!
//! The binary is thin: argument parsing lives in `cli.rs`, command logic in
//! `commands.rs`. Everything below that is the `sift-engine` library.
//!
//! Logs go to stderr (`RUST_LOG` overrides the `info` default) so the JSON
//! written to stdout stays machine readable.

mod cli;
mod commands;
mod error;

use clap::Parser;

use crate::cli::Cli;

/// Initialize the tracing subscriber.
///
/// `RUST_LOG` replaces the `info` default entirely:
/// - `RUST_LOG=warn` - warnings only
/// - `RUST_LOG=info,sift_engine=debug` - filter pass details
fn init_logging() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_logging();

    let cli = Cli::parse();
    if let Err(e) = commands::run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
