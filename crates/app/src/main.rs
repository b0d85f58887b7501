use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod config;
mod pipeline;

/// Classifies bank statement expenditures into configured positions and
/// writes monthly and yearly overview tables and charts.
#[derive(Parser)]
#[command(name = "ausgaben", version, about)]
struct Cli {
    /// Path to the TOML configuration.
    #[arg(default_value = "config.toml")]
    config: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    pipeline::run(&cli.config)
}
