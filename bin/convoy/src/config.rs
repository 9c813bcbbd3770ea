//! Environment file handling.

use std::path::Path;

use alloy_core::primitives::{Address, address};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// The default name for the convoy environment file.
pub const CONVOY_FILENAME: &str = "Convoy.toml";

/// Well-known development identities (the standard Anvil dev accounts), used
/// when no environment file is provided.
const DEV_ACCOUNTS: [Address; 3] = [
    address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266"),
    address!("70997970C51812dc3A010C7d01b50e0d17dc79C8"),
    address!("3C44CdDdB6a900fa2b585dd299e03d12FA4293BC"),
];

/// On-disk description of the target environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentFile {
    /// Network label steps are filtered against.
    pub network: String,
    /// Caller identities available to the run, in priority order.
    pub accounts: Vec<Address>,
}

impl Default for EnvironmentFile {
    fn default() -> Self {
        Self {
            network: "development".to_string(),
            accounts: DEV_ACCOUNTS.to_vec(),
        }
    }
}

impl EnvironmentFile {
    /// Save the environment to a TOML file.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content =
            toml::to_string_pretty(self).context("Failed to serialize environment to TOML")?;
        std::fs::write(path, content)
            .context(format!("Failed to write environment to {}", path.display()))?;
        tracing::info!(path = %path.display(), "Environment file saved");
        Ok(())
    }

    /// Load the environment from a TOML file.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(anyhow::anyhow!(
                "Environment file or directory not found: {}",
                path.display()
            ));
        }

        let config_path = if path.is_dir() {
            path.join(CONVOY_FILENAME)
        } else {
            path.to_path_buf()
        };

        let content = std::fs::read_to_string(&config_path).context(format!(
            "Failed to read environment from {}",
            config_path.display()
        ))?;
        let env: Self =
            toml::from_str(&content).context("Failed to parse environment file as TOML")?;

        if env.accounts.is_empty() {
            anyhow::bail!("Environment file must list at least one account");
        }

        tracing::info!(path = %config_path.display(), network = %env.network, "Environment file loaded");
        Ok(env)
    }
}
