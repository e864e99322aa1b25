use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::Level;

use crate::cli::Cli;

/// Settings for the `docledger` binary, loadable from TOML.
///
/// ```toml
/// state_file = "ledger/world.state"
/// log_level = "info"
/// pretty = true
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub state_file: PathBuf,
    pub log_level: String,
    pub pretty: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            state_file: PathBuf::from("docledger.state"),
            log_level: "warn".into(),
            pretty: false,
        }
    }
}

impl CliConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn from_toml(text: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// File values (or defaults), overridden by command-line flags.
    pub fn resolve(cli: &Cli) -> anyhow::Result<Self> {
        let mut config = match &cli.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        if let Some(state) = &cli.state {
            config.state_file = state.clone();
        }
        if cli.verbose {
            config.log_level = "debug".into();
        }
        if cli.pretty {
            config.pretty = true;
        }
        Ok(config)
    }

    pub fn max_level(&self) -> anyhow::Result<Level> {
        self.log_level
            .parse()
            .map_err(|_| anyhow::anyhow!("invalid log level: {}", self.log_level))
    }
}
