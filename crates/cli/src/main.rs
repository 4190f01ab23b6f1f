//! Sweet Creations CLI - catalog browsing and seeding tools.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog (Firestore, or CATALOG_FIXTURE_PATH if set)
//! sc-cli stores --category 3 --query torta
//! sc-cli stores --open
//! sc-cli store dulce-aroma
//! sc-cli categories
//!
//! # Check a fixture file without touching the network
//! sc-cli validate crates/storefront/fixtures/catalog.yaml
//!
//! # Upsert a fixture into Firestore
//! sc-cli seed crates/storefront/fixtures/catalog.yaml
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "sc-cli")]
#[command(author, version, about = "Sweet Creations CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List stores, narrowed like the storefront listing
    Stores {
        /// Category ID ("1" means all)
        #[arg(short, long)]
        category: Option<String>,

        /// Search text matched against name, description and specialties
        #[arg(short, long, default_value = "")]
        query: String,

        /// Only open stores, highest rating first
        #[arg(long)]
        open: bool,
    },
    /// Show a store and its menu
    Store {
        /// Store ID
        id: String,
    },
    /// List store categories
    Categories,
    /// Validate a fixture file
    Validate {
        /// Path to a YAML or JSON fixture
        file: PathBuf,
    },
    /// Upsert categories and stores from a fixture into Firestore
    Seed {
        /// Path to a YAML or JSON fixture
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Stores {
            category,
            query,
            open,
        } => commands::catalog::stores(category, query, open).await?,
        Commands::Store { id } => commands::catalog::store(&id).await?,
        Commands::Categories => commands::catalog::categories().await?,
        Commands::Validate { file } => commands::seed::validate(&file).await?,
        Commands::Seed { file } => commands::seed::seed(&file).await?,
    }
    Ok(())
}
