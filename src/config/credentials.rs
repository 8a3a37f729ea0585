use crate::utils::error::{Result, SteamEtlError};
use serde::Deserialize;
use std::path::Path;

/// Optional TOML file holding the API key and Steam ID:
///
/// ```toml
/// api_key = "XXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXX"
/// steam_id = "76561197960287930"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CredentialsFile {
    pub api_key: Option<String>,
    pub steam_id: Option<String>,
}

impl CredentialsFile {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| SteamEtlError::ConfigError {
            message: format!("Failed to read credentials file {}: {}", path.display(), e),
        })?;
        Self::from_str(&content)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| SteamEtlError::ConfigError {
            message: format!("Failed to parse credentials file: {}", e),
        })
    }
}
