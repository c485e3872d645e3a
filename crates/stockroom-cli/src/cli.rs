//! CLI argument definitions

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use stockroom_types::OutputFormat;

#[derive(Parser)]
#[command(
    name = "stockroom",
    version,
    about = "Retail back-of-house operations service"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP API server
    Serve {
        /// Address to bind, e.g. 127.0.0.1:8000
        #[arg(long)]
        addr: Option<String>,

        /// Database connection string
        #[arg(long)]
        database_url: Option<String>,

        /// Load the demo dataset before serving
        #[arg(long)]
        seed: bool,
    },

    /// Import a CSV dataset export
    Import {
        /// Path to the CSV file
        file: PathBuf,

        /// Dataset name (vendors, products, customers, orders, purchase_orders);
        /// inferred from the header row when omitted
        #[arg(long)]
        dataset: Option<String>,

        /// Clear existing inventory levels before importing products
        #[arg(long)]
        replace_inventory: bool,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Load the demo dataset
    Seed,

    /// Show the effective configuration
    Config,
}
