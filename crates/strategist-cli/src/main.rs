//! Strategist CLI
//!
//! Product strategy generation from your terminal.

use anyhow::Result;
use clap::Parser;
use strategist_core::Config;

mod app;
mod commands;

use app::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Run(args) => {
            let pipeline = commands::build_pipeline(&config)?;
            commands::run::run(args, &pipeline, cli.format).await
        }
        Commands::Research(args) => {
            let pipeline = commands::build_pipeline(&config)?;
            commands::research::run(args, &pipeline, cli.format).await
        }
        Commands::Search(args) => {
            let pipeline = commands::build_pipeline(&config)?;
            commands::search::run(args, &pipeline, cli.format).await
        }
        Commands::Recall(args) => {
            let store = commands::open_store(&config)?;
            commands::recall::run(args, &store, cli.format).await
        }
        Commands::Show(args) => {
            let store = commands::open_store(&config)?;
            commands::show::run(args, &store, cli.format).await
        }
        Commands::Status => {
            let store = commands::open_store(&config)?;
            commands::status::run(&store, cli.format).await
        }
        Commands::Mcp => {
            let pipeline = commands::build_pipeline(&config)?;
            strategist_mcp::start_server(&pipeline).await
        }
    }
}
