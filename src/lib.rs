pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::{steam::SteamClient, storage::LocalStorage};
pub use config::AppConfig;
pub use core::{etl::EtlEngine, pipeline::LibraryPipeline};
pub use domain::model::{CellValue, Credentials, HeaderOrder, Record, Table};
pub use utils::error::{Result, SteamEtlError};
