//! CLI entry point for grid mosaic generation

use clap::Parser;
use mosaic_synth::io::cli::{Cli, MosaicRunner};
use mosaic_synth::io::configuration::DEFAULT_LOG_FILTER;
use tracing_subscriber::EnvFilter;

fn main() -> mosaic_synth::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    MosaicRunner::new(cli).process()?;
    Ok(())
}
