use std::process::ExitCode;

use tracing::{error, info};

use arknotify::config::AppConfig;
use arknotify::{runner, setup_logging};

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    // Configuration is resolved before logging because the log file path is
    // itself configuration; startup failures go to stderr.
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = setup_logging(&config.log_file) {
        eprintln!("Failed to set up logging: {e}");
        return ExitCode::FAILURE;
    }

    info!("Starting archive check");
    if let Err(e) = runner::run(&config).await {
        // Anything that escapes the runner is logged and swallowed; a cron
        // job has no caller to raise to.
        error!("Unexpected error during run: {e}");
    }
    info!("Completed archive check");
    ExitCode::SUCCESS
}
