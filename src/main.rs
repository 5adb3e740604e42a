use clap::Parser;
use termin_system::utils::error::{ErrorCategory, TerminError};
use termin_system::utils::{logger, validation::Validate};
use termin_system::{CliConfig, TerminServer};

fn exit_code(e: &TerminError) -> i32 {
    match e.category() {
        ErrorCategory::Configuration => 2,
        ErrorCategory::Storage => 3,
        ErrorCategory::Validation | ErrorCategory::Conflict => 1,
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let config = match cli.load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Could not load configuration: {}", e);
            std::process::exit(exit_code(&e));
        }
    };

    logger::init_server_logger(cli.verbose, config.json_logs(), config.logging.level.as_deref());

    tracing::info!("Starting termin-server");
    if cli.verbose {
        tracing::debug!("Resolved config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {} ({})", e, e.code().as_str());
        std::process::exit(exit_code(&e));
    }

    let server = match TerminServer::from_config(&config).await {
        Ok(server) => server,
        Err(e) => {
            tracing::error!("❌ Startup failed: {} (Category: {:?})", e, e.category());
            std::process::exit(exit_code(&e));
        }
    };

    if let Err(e) = server.run().await {
        tracing::error!("❌ Server terminated: {}", e);
        std::process::exit(exit_code(&e));
    }

    Ok(())
}
