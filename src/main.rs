//! DiskDetect — lists mounted volumes with their capacity and usage.
//!
//! Thin binary entry point. All logic lives in the `diskdetect-core`
//! and `diskdetect-cli` crates.

use clap::Parser;
use diskdetect_cli::Cli;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialise structured logging on stderr so stdout stays parseable.
    tracing_subscriber::fmt()
        .with_max_level(cli.log_level())
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("DiskDetect starting");

    diskdetect_cli::run(&cli)
}
