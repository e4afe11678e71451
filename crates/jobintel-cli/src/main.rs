mod audit;
mod collect;
mod pipeline;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use jobintel_core::{AppConfig, ValidationGate};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "jobintel")]
#[command(about = "Indian tech job market intelligence: collect, clean and audit job postings")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Scrape the configured portals, clean the results, and store them
    Collect {
        /// Restrict the run to one city instead of the configured list
        #[arg(long)]
        city: Option<String>,

        /// Restrict the run to one portal (linkedin, indeed, glassdoor)
        #[arg(long)]
        portal: Option<String>,

        /// Scrape and clean, but do not write to the database
        #[arg(long)]
        dry_run: bool,
    },
    /// Clean and store jobs from a JSON file (an array of raw postings)
    Clean {
        #[arg(long)]
        input: PathBuf,

        /// Print the cleaning report without writing to the database
        #[arg(long)]
        dry_run: bool,
    },
    /// Audit every stored location and print database statistics
    Report,
    /// Delete stored locations that fail validation, with their jobs
    Cleanup {
        /// Delete the previewed rows (default is preview only)
        #[arg(long, conflicts_with = "report_only")]
        execute: bool,

        /// Print the audit summary without listing individual rows
        #[arg(long)]
        report_only: bool,
    },
    /// Classify location strings and print the verdicts as JSON
    Classify {
        #[arg(required = true)]
        text: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match cli.command {
        None => {
            println!("jobintel: no command given; see --help");
            Ok(())
        }
        // A pure lookup: runs without a database or env config.
        Some(Commands::Classify { text }) => {
            let classifier = jobintel_core::LocationClassifier::with_builtin_registry();
            audit::run_classify(&classifier, &text)
        }
        Some(Commands::Collect {
            city,
            portal,
            dry_run,
        }) => {
            let (config, gate) = load_runtime()?;
            let pool = if dry_run {
                None
            } else {
                Some(connect(&config).await?)
            };
            let cancel = shutdown_token();
            collect::run_collect(
                pool.as_ref(),
                &config,
                &gate,
                city.as_deref(),
                portal.as_deref(),
                &cancel,
            )
            .await
        }
        Some(Commands::Clean { input, dry_run }) => {
            let (config, gate) = load_runtime()?;
            let pool = if dry_run {
                None
            } else {
                Some(connect(&config).await?)
            };
            pipeline::run_clean_file(pool.as_ref(), &gate, &input).await
        }
        Some(Commands::Report) => {
            let (config, gate) = load_runtime()?;
            let pool = connect(&config).await?;
            audit::run_report(&pool, gate.classifier()).await
        }
        Some(Commands::Cleanup {
            execute,
            report_only,
        }) => {
            let (config, gate) = load_runtime()?;
            let pool = connect(&config).await?;
            audit::run_cleanup(&pool, gate.classifier(), execute, report_only).await
        }
    }
}

/// Load env config, install the log subscriber, and build the shared gate.
fn load_runtime() -> anyhow::Result<(AppConfig, Arc<ValidationGate>)> {
    let config = jobintel_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let gate = Arc::new(ValidationGate::from_config(&config)?);
    Ok((config, gate))
}

async fn connect(config: &AppConfig) -> anyhow::Result<sqlx::PgPool> {
    let pool = jobintel_db::connect_pool_from_config(config).await?;
    let applied = jobintel_db::run_migrations(&pool).await?;
    if applied > 0 {
        tracing::info!(applied, "applied database migrations");
    }
    Ok(pool)
}

/// Cancelled on Ctrl-C. Units already in flight finish; no new ones start.
fn shutdown_token() -> CancellationToken {
    let token = CancellationToken::new();
    let trigger = token.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                tracing::warn!("received ctrl-c, cancelling remaining scrape units");
                trigger.cancel();
            }
            Err(e) => tracing::error!(error = %e, "failed to listen for ctrl-c"),
        }
    });
    token
}

#[cfg(test)]
mod tests;
