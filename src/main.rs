use clap::Parser;
use steam_library_etl::config::cli::LogFormat;
use steam_library_etl::utils::logger;
use steam_library_etl::{CliConfig, EtlEngine, LibraryPipeline, LocalStorage, SteamEtlError};

/// Prints the single failure line; details stay at debug level.
fn fail(e: &SteamEtlError) -> ! {
    tracing::debug!(category = ?e.category(), "❌ Run failed: {}", e);
    tracing::debug!("💡 Suggestion: {}", e.recovery_suggestion());
    eprintln!("{}", e.user_friendly_message());
    std::process::exit(e.exit_code());
}

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    match cli.log_format {
        LogFormat::Text => logger::init_cli_logger(cli.verbose),
        LogFormat::Json => logger::init_json_logger(cli.verbose),
    }
    tracing::info!("Starting steam-library-etl");

    let monitor_enabled = cli.monitor;
    let config = match cli.into_app_config() {
        Ok(config) => config,
        Err(e) => fail(&e),
    };
    tracing::debug!("Run config: {:?}", config);

    let storage = LocalStorage::new(config.output_path.clone());
    let pipeline = LibraryPipeline::new(storage, config);
    let engine = EtlEngine::new_with_monitoring(pipeline, monitor_enabled);

    match engine.run().await {
        Ok(outcome) => {
            tracing::info!(rows = outcome.rows_written, "✅ ETL process completed successfully!");
            println!(
                "Successfully downloaded Steam library for {} ({})",
                outcome.persona_name, outcome.output_path
            );
        }
        Err(e) => fail(&e),
    }
}
