//! Sanke CLI entry point.

use anyhow::Result;
use clap::Parser;
use sanke::cli::{commands, Cli, Commands};
use sanke::config::Settings;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("sanke={}", log_level)),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    // Load configuration
    let settings = match &cli.config {
        Some(path) => Settings::load_from(Some(&std::path::PathBuf::from(path)))?,
        None => Settings::load()?,
    };

    // Execute command
    match cli.command {
        Commands::Harvest {
            urls,
            input,
            schema,
            model,
            max_concurrent,
            title,
            output,
        } => {
            commands::run_harvest(
                &urls,
                input,
                schema,
                model,
                max_concurrent,
                title,
                output,
                settings,
            )
            .await?;
        }

        Commands::Schemas { name } => {
            commands::run_schemas(name.as_deref())?;
        }

        Commands::Doctor => {
            commands::run_doctor(&settings)?;
        }

        Commands::Config { action } => {
            commands::run_config(&action, settings)?;
        }
    }

    Ok(())
}
