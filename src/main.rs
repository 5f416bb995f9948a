use std::path::PathBuf;

use clap::Parser;

use clip_sync::bootstrap::{init_tracing_subscriber, resolve_config_path, run_daemon};

/// Clipboard sync daemon.
#[derive(Debug, Parser)]
#[command(name = "clip-sync", version, about)]
struct Cli {
    /// Path to config.toml. Defaults to <config_dir>/clip-sync/config.toml.
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing_subscriber()?;

    let config_path = resolve_config_path(cli.config)?;
    run_daemon(config_path).await
}
