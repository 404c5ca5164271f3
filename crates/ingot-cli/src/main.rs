//! Ingot CLI
//!
//! Offline ingestion and indexing for a retrieval-augmented QA system.

use anyhow::Result;
use clap::Parser;
use ingot_core::{Config, Database, IngotError};
use std::path::PathBuf;

mod app;
mod commands;

use app::{Cli, Commands};

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        let code = err
            .downcast_ref::<IngotError>()
            .map(|e| e.exit_code())
            .unwrap_or(ingot_core::error::exit_codes::GENERAL_ERROR);
        eprintln!("error: {err:#}");
        std::process::exit(code);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let default_level = if cli.verbose {
        tracing::Level::INFO
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(default_level.into()),
        )
        .init();

    let mut config = Config::load()?;
    if let Some(ref root) = cli.store_root {
        config.store.root = root.clone();
    }

    let db_path = cli
        .db
        .clone()
        .or_else(|| std::env::var("INGOT_DB").map(PathBuf::from).ok())
        .or_else(|| config.db_path.clone())
        .unwrap_or_else(Database::default_path);

    match cli.command {
        Commands::Chunk(args) => commands::chunk::run(&args, &config),
        Commands::Index(args) => commands::index::run(&args, &config, &db_path).await,
        Commands::Run(args) => commands::run::run(&args, &config, &db_path).await,
        Commands::Status => commands::status::run(&db_path),
    }
}
