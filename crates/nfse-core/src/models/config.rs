//! Configuration structures for the extraction run.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{NfseError, Result};

/// Main configuration for the nfse pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NfseConfig {
    /// Field extraction configuration.
    pub extraction: ExtractionConfig,

    /// Cost center classification configuration.
    pub cost_center: CostCenterConfig,

    /// Spreadsheet output configuration.
    pub output: OutputConfig,
}

/// Field extraction configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// CNPJ prefix identifying the service provider.
    pub provider_prefix: String,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            provider_prefix: "15.040".to_string(),
        }
    }
}

/// A recognized client entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientEntity {
    /// CNPJ prefix of the entity.
    pub prefix: String,

    /// Added on top of `base + branch code`.
    pub offset: u32,
}

impl ClientEntity {
    pub fn new(prefix: impl Into<String>, offset: u32) -> Self {
        Self {
            prefix: prefix.into(),
            offset,
        }
    }
}

/// Cost center classification configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostCenterConfig {
    /// Base code added to every branch code.
    pub base: u32,

    /// Recognized client entities. Their prefixes also select the client CNPJ.
    pub entities: Vec<ClientEntity>,
}

impl Default for CostCenterConfig {
    fn default() -> Self {
        Self {
            base: 10_000,
            entities: vec![
                ClientEntity::new("06.626", 0),
                ClientEntity::new("04.899", 200_000_000),
            ],
        }
    }
}

impl CostCenterConfig {
    /// CNPJ prefixes of the recognized client entities.
    pub fn client_prefixes(&self) -> Vec<String> {
        self.entities.iter().map(|e| e.prefix.clone()).collect()
    }
}

/// Spreadsheet output configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// File name written into the processed folder.
    pub file_name: String,

    /// Worksheet name.
    pub sheet_name: String,

    /// Cell text for fields that were not found.
    pub not_found_marker: String,

    /// Cell text for an undefined cost center.
    pub undefined_marker: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            file_name: "dados_extraidos_com_cc.xlsx".to_string(),
            sheet_name: "Sheet1".to_string(),
            not_found_marker: "Não encontrado".to_string(),
            undefined_marker: "Não definido".to_string(),
        }
    }
}

impl NfseConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| NfseError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content =
            serde_json::to_string_pretty(self).map_err(|e| NfseError::Config(e.to_string()))?;
        fs::write(path, content)?;
        Ok(())
    }
}
