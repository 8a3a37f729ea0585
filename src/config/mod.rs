#[cfg(feature = "cli")]
pub mod cli;
pub mod credentials;

use crate::adapters::steam::DEFAULT_API_BASE;
use crate::domain::model::{Credentials, HeaderOrder};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{require_non_empty, validate_path, validate_url, Validate};
use credentials::CredentialsFile;

pub const API_KEY_ENV: &str = "STEAM_API_KEY";
pub const STEAM_ID_ENV: &str = "STEAM_ID";

/// Settings for one run, resolved once at startup and read-only afterwards.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub credentials: Credentials,
    pub api_base: String,
    pub output_path: String,
    pub header_order: HeaderOrder,
}

impl AppConfig {
    /// Explicit values win over the credentials file. The API key is checked first.
    pub fn resolve(
        api_key: Option<String>,
        steam_id: Option<String>,
        file: Option<CredentialsFile>,
    ) -> Result<Credentials> {
        let (file_key, file_id) = file
            .map(|f| (f.api_key, f.steam_id))
            .unwrap_or_default();

        let api_key = require_non_empty(API_KEY_ENV, non_blank(api_key).or(file_key))?;
        let steam_id = require_non_empty(STEAM_ID_ENV, non_blank(steam_id).or(file_id))?;

        Ok(Credentials {
            api_key: api_key.trim().to_string(),
            steam_id: steam_id.trim().to_string(),
        })
    }

    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            api_base: DEFAULT_API_BASE.to_string(),
            output_path: ".".to_string(),
            header_order: HeaderOrder::default(),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        require_non_empty(API_KEY_ENV, Some(self.credentials.api_key.clone()))?;
        require_non_empty(STEAM_ID_ENV, Some(self.credentials.steam_id.clone()))?;
        validate_url("api_base", &self.api_base)?;
        validate_path("output_dir", &self.output_path)?;
        Ok(())
    }
}

impl ConfigProvider for AppConfig {
    fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    fn api_base(&self) -> &str {
        &self.api_base
    }

    fn header_order(&self) -> HeaderOrder {
        self.header_order
    }
}
