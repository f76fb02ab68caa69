//! The run modes: gather, serve, and exploratory export.

use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use clap::ValueEnum;
use dosescope_common::sandbox::SandboxClient;
use dosescope_figures::{build_exploration_figures, build_figures, HtmlExporter};
use dosescope_ingestion::sources::{ChemblClient, PubChemClient};
use dosescope_ingestion::{
    gather_and_clean, load_manifest, load_persisted_data, load_unfiltered_activities,
};
use dosescope_web::AppState;
use tracing::{info, warn};

use crate::config::Config;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RunMode {
    /// Fetch, clean and persist data only
    Gather,
    /// Serve the dashboard from persisted data
    Run,
    /// Gather, then serve
    GatherAndRun,
    /// Write exploratory figures for every persisted activity file
    Explore,
}

impl RunMode {
    pub fn gathers(self) -> bool {
        matches!(self, RunMode::Gather | RunMode::GatherAndRun)
    }

    pub fn serves(self) -> bool {
        matches!(self, RunMode::Run | RunMode::GatherAndRun)
    }
}

pub async fn execute(mode: RunMode, config: &Config, compound_file: &Path) -> anyhow::Result<()> {
    if mode.gathers() {
        gather(config, compound_file).await?;
    }
    if mode.serves() {
        serve(config, compound_file).await?;
    }
    if mode == RunMode::Explore {
        explore(config)?;
    }
    Ok(())
}

fn sandbox(config: &Config) -> anyhow::Result<SandboxClient> {
    let mut client = SandboxClient::with_timeout(Duration::from_secs(config.sources.timeout_secs))?;
    for domain in &config.sources.extra_allowed_domains {
        client.allow_domain(domain);
    }
    Ok(client)
}

pub async fn gather(config: &Config, compound_file: &Path) -> anyhow::Result<()> {
    let (compounds, _) = load_manifest(compound_file)?;
    info!("Gathering data for {} compounds from {}", compounds.len(), compound_file.display());

    let client = sandbox(config)?;
    let pubchem = PubChemClient::with_base_url(client.clone(), &config.sources.pubchem_base_url);
    let chembl = ChemblClient::with_base_url(client, &config.sources.chembl_base_url);

    let summary = gather_and_clean(&compounds, &pubchem, &chembl, &config.paths.store()).await?;
    info!(
        compounds = summary.compounds,
        with_properties = summary.with_properties,
        activity_files = summary.activity_files_written,
        without_activities = summary.without_activities,
        "Gather pass finished"
    );
    for error in &summary.errors {
        warn!("{}", error);
    }
    Ok(())
}

pub async fn serve(config: &Config, compound_file: &Path) -> anyhow::Result<()> {
    let (_, names) = load_manifest(compound_file)?;
    let data = load_persisted_data(&config.paths.store(), &names);
    if data.is_empty() {
        warn!("No data available to create visualizations.");
        return Ok(());
    }

    let figures = build_figures(&data.activities);
    if figures.is_empty() {
        warn!("No compound has both ED50 and TD50 data; nothing to show.");
        return Ok(());
    }

    let addr = config.server.socket_addr()?;
    let state = AppState::new(data.activities, data.drug_info, figures)?;
    dosescope_web::serve(state, addr)
        .await
        .with_context(|| format!("Dashboard failed on {}", addr))
}

pub fn explore(config: &Config) -> anyhow::Result<()> {
    let tables = load_unfiltered_activities(&config.paths.store())?;
    if tables.is_empty() {
        warn!("No activity files found in {}", config.paths.data_dir.display());
        return Ok(());
    }

    let exporter = HtmlExporter::new()?;
    for (compound, table) in &tables {
        let figures = build_exploration_figures(compound, table);
        exporter.write_all(&config.paths.exploration_dir, &figures)?;
    }
    info!(
        compounds = tables.len(),
        dir = %config.paths.exploration_dir.display(),
        "Exploratory figures written"
    );
    Ok(())
}
