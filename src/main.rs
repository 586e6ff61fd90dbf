use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;

use heapdash::cli::{Cli, Commands};
use heapdash::core::PollOutcome;
use heapdash::report;
use heapdash::utils::app_config::Settings;
use heapdash::utils::logging::{init_logging, LogTarget};
use heapdash::utils::AppConfig;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Pick up HEAPDASH_* variables from a local .env, if there is one
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    let config = match &cli.global.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };
    let settings = config.resolve(cli.global.overrides())?;

    match cli.command.unwrap_or(Commands::Watch) {
        Commands::Watch => {
            let target = match &cli.global.log_file {
                Some(path) => LogTarget::File(path),
                None => LogTarget::Discard,
            };
            init_logging(target, cli.global.quiet)?;
            handle_watch(settings).await?;
        }
        Commands::Once { json } => {
            let target = match &cli.global.log_file {
                Some(path) => LogTarget::File(path),
                None => LogTarget::Stderr,
            };
            init_logging(target, cli.global.quiet)?;
            let outcome = handle_once(settings, json).await?;
            return Ok(report::exit_code(outcome));
        }
    }

    Ok(ExitCode::SUCCESS)
}

#[cfg(feature = "tui")]
async fn handle_watch(settings: Settings) -> Result<()> {
    let mut app = heapdash::app::App::new(settings)?;
    app.run().await
}

#[cfg(not(feature = "tui"))]
async fn handle_watch(_settings: Settings) -> Result<()> {
    println!("This build has no interactive dashboard (enable the 'tui' feature).");
    println!("Use 'heapdash once' to poll the endpoint a single time.");
    Ok(())
}

async fn handle_once(settings: Settings, json: bool) -> Result<PollOutcome> {
    tracing::info!("Polling {}", settings.endpoint);
    let (outcome, page) = report::poll_once(&settings).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report::to_json(outcome, &page))?);
    } else {
        println!("{}", report::to_text(outcome, &page));
    }

    Ok(outcome)
}
