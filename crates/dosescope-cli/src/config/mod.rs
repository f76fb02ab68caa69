//! Configuration loading for dosescope.
//! Reads the path given by --config / DOSESCOPE_CONFIG, else dosescope.toml
//! from the current directory. A missing file means defaults.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::Context;
use dosescope_common::sandbox::DEFAULT_TIMEOUT_SECS;
use dosescope_ingestion::sources::{chembl::CHEMBL_API_URL, pubchem::PUBCHEM_API_URL};
use dosescope_ingestion::StorePaths;
use serde::{Deserialize, Serialize};
use tracing::info;

pub const DEFAULT_CONFIG_FILE: &str = "dosescope.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub sources: SourcesConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathsConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    #[serde(default = "default_drug_info_dir")]
    pub drug_info_dir: PathBuf,
    #[serde(default = "default_exploration_dir")]
    pub exploration_dir: PathBuf,
}

fn default_data_dir()        -> PathBuf { PathBuf::from("data") }
fn default_drug_info_dir()   -> PathBuf { PathBuf::from("drug_info") }
fn default_exploration_dir() -> PathBuf { PathBuf::from("exploration") }

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            drug_info_dir: default_drug_info_dir(),
            exploration_dir: default_exploration_dir(),
        }
    }
}

impl PathsConfig {
    pub fn store(&self) -> StorePaths {
        StorePaths::new(&self.data_dir, &self.drug_info_dir)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourcesConfig {
    #[serde(default = "default_pubchem_url")]
    pub pubchem_base_url: String,
    #[serde(default = "default_chembl_url")]
    pub chembl_base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Hosts allowed in addition to PubChem and ChEMBL, e.g. a mirror.
    #[serde(default)]
    pub extra_allowed_domains: Vec<String>,
}

fn default_pubchem_url()  -> String { PUBCHEM_API_URL.to_string() }
fn default_chembl_url()   -> String { CHEMBL_API_URL.to_string() }
fn default_timeout_secs() -> u64    { DEFAULT_TIMEOUT_SECS }

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            pubchem_base_url: default_pubchem_url(),
            chembl_base_url: default_chembl_url(),
            timeout_secs: default_timeout_secs(),
            extra_allowed_domains: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String { "127.0.0.1".to_string() }
fn default_port() -> u16    { 8050 }

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: default_host(), port: default_port() }
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let raw = format!("{}:{}", self.host, self.port);
        raw.parse()
            .with_context(|| format!("Invalid server address: {}", raw))
    }
}

mod tests;

impl Config {
    /// Loads `path` if given, else `dosescope.toml`. Only an explicitly
    /// absent file falls back to defaults; a malformed file is an error.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let path = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));

        if !path.exists() {
            info!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Could not read config {}", path.display()))?;
        let config = Self::from_toml_str(&content)
            .with_context(|| format!("Invalid config {}", path.display()))?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Applies --host / --port overrides.
    pub fn with_server_overrides(mut self, host: Option<String>, port: Option<u16>) -> Self {
        if let Some(host) = host {
            self.server.host = host;
        }
        if let Some(port) = port {
            self.server.port = port;
        }
        self
    }
}
