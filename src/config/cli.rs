use crate::adapters::steam::DEFAULT_API_BASE;
use crate::config::credentials::CredentialsFile;
use crate::config::{AppConfig, API_KEY_ENV, STEAM_ID_ENV};
use crate::domain::model::HeaderOrder;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "steam-library-etl")]
#[command(about = "Download a Steam library to steam_library_<name>.csv")]
pub struct CliConfig {
    #[arg(long, env = API_KEY_ENV, hide_env_values = true)]
    pub api_key: Option<String>,

    #[arg(long, env = STEAM_ID_ENV)]
    pub steam_id: Option<String>,

    /// TOML file with `api_key` and `steam_id`, used for values not given otherwise
    #[arg(long)]
    pub credentials: Option<PathBuf>,

    #[arg(long, default_value = ".")]
    pub output_dir: String,

    #[arg(long, default_value = DEFAULT_API_BASE)]
    pub api_base: String,

    #[arg(long, value_enum, default_value_t = HeaderOrder::Sorted)]
    pub header_order: HeaderOrder,

    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log CPU and memory usage after each phase")]
    pub monitor: bool,
}

impl CliConfig {
    /// Resolves credentials and builds the immutable run configuration.
    pub fn into_app_config(self) -> Result<AppConfig> {
        let file = self
            .credentials
            .as_ref()
            .map(CredentialsFile::from_file)
            .transpose()?;

        let credentials = AppConfig::resolve(self.api_key, self.steam_id, file)?;
        let config = AppConfig {
            credentials,
            api_base: self.api_base,
            output_path: self.output_dir,
            header_order: self.header_order,
        };
        config.validate()?;
        Ok(config)
    }
}
