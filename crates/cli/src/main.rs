//! Scout CLI — the main entry point.
//!
//! Commands:
//! - `serve`   — Seed the catalog and start the HTTP gateway
//! - `seed`    — Reload the company catalog from the CSV dataset
//! - `search`  — Query the company catalog directly

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "scout",
    about = "Scout — startup search backed by an LLM agent",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP gateway server
    Serve {
        /// Override the port
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Reload the company catalog from the CSV dataset
    Seed {
        /// Override the dataset path
        #[arg(short, long)]
        csv: Option<String>,
    },

    /// Search the company catalog without going through the agent
    Search {
        /// Keywords to match against names, descriptions, and site text
        keywords: Vec<String>,

        /// Filter by city
        #[arg(short, long)]
        city: Option<String>,

        /// Maximum number of results
        #[arg(short, long, default_value_t = 10)]
        limit: u32,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    match cli.command {
        Commands::Serve { port } => commands::serve::run(port).await?,
        Commands::Seed { csv } => commands::seed::run(csv).await?,
        Commands::Search {
            keywords,
            city,
            limit,
        } => commands::search::run(keywords, city, limit).await?,
    }

    Ok(())
}
