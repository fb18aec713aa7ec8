//! Configuration lookup shared by every command.

use std::path::PathBuf;

use tracing::debug;

use nfse_core::NfseConfig;

/// Where the configuration comes from.
pub struct ConfigSource {
    pub path: PathBuf,
    /// Given with `--config`; such a file must exist.
    pub explicit: bool,
}

impl ConfigSource {
    /// `--config` when given, else the per-user default location.
    pub fn resolve(cli_path: Option<&str>) -> Self {
        match cli_path {
            Some(path) => Self {
                path: PathBuf::from(path),
                explicit: true,
            },
            None => Self {
                path: default_config_path(),
                explicit: false,
            },
        }
    }

    /// Load the configuration. A missing default file means defaults.
    pub fn load(&self) -> anyhow::Result<NfseConfig> {
        if !self.explicit && !self.path.exists() {
            debug!("No config at {}, using defaults", self.path.display());
            return Ok(NfseConfig::default());
        }

        debug!("Loading config from {}", self.path.display());
        Ok(NfseConfig::from_file(&self.path)?)
    }
}

/// `<config_dir>/nfse/config.json`.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("nfse")
        .join("config.json")
}
