//! dosescope: ED50/TD50 data gathering and dashboard.
//! Entry point for the command-line binary.

mod config;
mod run;

use std::path::PathBuf;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::run::RunMode;

#[derive(Parser)]
#[command(name = "dosescope", version)]
#[command(about = "Process compound data and optionally start the dashboard", long_about = None)]
struct Cli {
    /// CSV file with compound_name and chembl_id columns
    #[arg(long, default_value = "compounds.csv")]
    compound_file: PathBuf,

    /// gather: only gather data; run: only serve the dashboard;
    /// gather-and-run: both; explore: write exploratory figures
    #[arg(long, value_enum, default_value_t = RunMode::GatherAndRun)]
    run_mode: RunMode,

    /// Config TOML file (defaults to dosescope.toml)
    #[arg(long, env = "DOSESCOPE_CONFIG")]
    config: Option<PathBuf>,

    /// Dashboard bind host, overrides [server].host
    #[arg(long)]
    host: Option<String>,

    /// Dashboard port, overrides [server].port
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    info!("dosescope {} starting ({:?})", env!("CARGO_PKG_VERSION"), cli.run_mode);

    let config = Config::load(cli.config.as_deref())?
        .with_server_overrides(cli.host, cli.port);

    run::execute(cli.run_mode, &config, &cli.compound_file).await
}
