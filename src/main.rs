//! audiolib CLI entrypoint

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use audiolib::cli::Cli;

fn main() -> Result<()> {
    // Fall back to the configured level when RUST_LOG is unset
    let default_level = audiolib::config::config()
        .map(|c| c.log_level.clone())
        .unwrap_or_else(|_| "warn".to_string());

    // Initialize tracing (stderr keeps shell output clean)
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    // Parse and execute CLI
    let cli = Cli::parse();
    cli.execute()
}
