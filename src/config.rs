//! Configuration management with TOML, environment variables, and CLI overrides.

use crate::catalog::index::DEFAULT_ROOT_URL;
use crate::catalog::Region;
use crate::context::Term;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Application configuration with layered loading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Region to price
    #[serde(default)]
    pub region: Region,

    /// Price list endpoint
    #[serde(default = "default_root_url")]
    pub root_url: String,

    /// Pricing term used when none is given on the command line
    #[serde(default)]
    pub term: Term,

    /// Output format
    #[serde(default)]
    pub format: OutputFormat,

    /// Proxy URL (e.g., socks5://host:port)
    #[serde(default)]
    pub proxy: Option<String>,

    /// Whole-request timeout; offer files run to hundreds of megabytes
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Cache responses on disk and revalidate them
    #[serde(default = "default_cache")]
    pub cache: bool,

    /// Cache location, defaults to the user cache directory
    #[serde(default)]
    pub cache_dir: Option<PathBuf>,

    /// Attribute constraints applied to every price query
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
}

fn default_root_url() -> String {
    DEFAULT_ROOT_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    300
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_cache() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            region: Region::UsEast1,
            root_url: default_root_url(),
            term: Term::OnDemand,
            format: OutputFormat::Table,
            proxy: None,
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            cache: default_cache(),
            cache_dir: None,
            attributes: BTreeMap::new(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading config from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Loads configuration with fallback to default locations.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit_path {
            return Self::from_file(path);
        }

        let local_config = Path::new("config.toml");
        if local_config.exists() {
            debug!("Found config.toml in current directory");
            return Self::from_file(local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("aws-offers").join("config.toml");
            if xdg_config.exists() {
                debug!("Found config in XDG config directory");
                return Self::from_file(xdg_config);
            }
        }

        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Applies environment variable overrides. Unparseable values are ignored.
    pub fn with_env(mut self) -> Self {
        if let Ok(region) = std::env::var("AWS_OFFERS_REGION") {
            if let Ok(r) = region.parse() {
                self.region = r;
            }
        }

        if let Ok(root_url) = std::env::var("AWS_OFFERS_ROOT_URL") {
            self.root_url = root_url;
        }

        if let Ok(proxy) = std::env::var("AWS_OFFERS_PROXY") {
            self.proxy = Some(proxy);
        }

        if let Ok(cache_dir) = std::env::var("AWS_OFFERS_CACHE_DIR") {
            self.cache_dir = Some(PathBuf::from(cache_dir));
        }

        self
    }
}

/// Output format for results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Markdown,
    Csv,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!("Unknown format: {}. Use: table, json, markdown, csv", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Markdown => write!(f, "markdown"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}
