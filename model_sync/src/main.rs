//! model-sync CLI - reconcile model definition files with live database schemas
//!
//! Usage:
//!   model-sync add <databaseName> [modelNames...] [--all] [--properties]
//!   model-sync update <databaseName> [modelNames...] [--all] [--properties]
//!   model-sync delete <databaseName>
//!
//! Examples:
//!   model-sync add db1 UserAccount OrderItem
//!   model-sync update db1 --all --properties
//!   model-sync delete db1

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use model_sync::commands::StdinConfirm;
use model_sync::error::Error;
use model_sync::{config, utils, BatchOutcome, DeleteOutcome, ModelSyncClient};

#[derive(Parser)]
#[command(name = "model-sync")]
#[command(about = "Keep generated model definitions in sync with live database schemas")]
#[command(version)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "model-sync.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create model files and registry entries for tables discovered in the database
    Add {
        /// Name of the configured datasource
        database_name: String,

        /// Models to add (PascalCase)
        model_names: Vec<String>,

        /// Add every table discovered in the database
        #[arg(short, long)]
        all: bool,

        /// Copy every driver-reported column setting, not just the defaults
        #[arg(long)]
        properties: bool,
    },

    /// Reconcile existing model files against the live schema
    Update {
        /// Name of the configured datasource
        database_name: String,

        /// Models to update (PascalCase)
        model_names: Vec<String>,

        /// Update every model registered against the datasource
        #[arg(short, long)]
        all: bool,

        /// Copy every driver-reported column setting, not just the defaults
        #[arg(long)]
        properties: bool,
    },

    /// Delete models whose backing table no longer exists in the database
    Delete {
        /// Name of the configured datasource
        database_name: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = config::load_from_file(&cli.config)
        .with_context(|| format!("could not load {}", cli.config.display()))?;
    utils::logging::init_logging(&config.logging)?;

    match cli.command {
        Commands::Add {
            database_name,
            model_names,
            all,
            properties,
        } => {
            require_model_names(&model_names, all, "added")?;
            let client = ModelSyncClient::connect(&config, &database_name).await?;
            let outcome = client.add(&model_names, all, properties).await?;
            Ok(report(&outcome))
        }
        Commands::Update {
            database_name,
            model_names,
            all,
            properties,
        } => {
            require_model_names(&model_names, all, "updated")?;
            let client = ModelSyncClient::connect(&config, &database_name).await?;
            let outcome = client.update(&model_names, all, properties).await?;
            Ok(report(&outcome))
        }
        Commands::Delete { database_name } => {
            let client = ModelSyncClient::connect(&config, &database_name).await?;
            match client.delete(&mut StdinConfirm).await? {
                DeleteOutcome::Declined => Ok(ExitCode::SUCCESS),
                DeleteOutcome::Completed(outcome) => Ok(report(&outcome)),
            }
        }
    }
}

fn require_model_names(model_names: &[String], all: bool, verb: &str) -> Result<(), Error> {
    if model_names.is_empty() && !all {
        return Err(Error::InvalidArguments(format!(
            "Provide the names of models to be {} (or pass --all)",
            verb
        )));
    }
    Ok(())
}

/// Summarize a batch and pick the exit code: failure when any model failed,
/// even though the batch ran to completion.
fn report(outcome: &BatchOutcome) -> ExitCode {
    tracing::info!(
        synced = outcome.synced.len(),
        skipped = outcome.skipped.len(),
        failed = outcome.failed.len(),
        "run complete"
    );

    for failure in &outcome.failed {
        eprintln!("{}: {}", failure.model, failure.error);
    }

    if outcome.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
