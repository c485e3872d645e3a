//! Stockroom - retail back-of-house operations service
//!
//! Serves the HTTP API and drives imports and seeding from the shell.

mod cli;
mod commands;
mod output;

use clap::Parser;
use cli::Cli;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = commands::execute(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
