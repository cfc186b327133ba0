//! Command-line interface for draw-solver.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **search**: Find the lowest-payout draws for a ticket file
//! - **check**: Validate a ticket file without running the search
//! - **serve**: Start the interactive web interface
//!
//! ## Usage
//!
//! ```text
//! # Search a plain text ticket file (one ticket per line)
//! draw-solver search tickets.txt
//!
//! # Tickets in the second column of a CSV export
//! draw-solver search tickets.csv --column 2
//!
//! # JSON output for scripting
//! draw-solver search tickets.txt --format json
//!
//! # Just validate the input
//! draw-solver check tickets.csv --column 2
//!
//! # Start web UI
//! draw-solver serve --port 8080 --open
//! ```

use clap::{Parser, Subcommand};

pub mod check;
pub mod search;

#[derive(Parser)]
#[command(name = "draw-solver")]
#[command(version)]
#[command(about = "Find the lowest-payout draw for a book of lottery tickets")]
#[command(
    long_about = "draw-solver answers one question about a 6-of-25 lottery: which draw would pay out the least against the tickets actually sold?\n\nIt checks every one of the 177,100 possible draws against your ticket file and reports:\n- The guaranteed minimum total payout\n- Every draw achieving that minimum\n- A ranking of the tied draws by prize-profile preference"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search every possible draw for the lowest total payout
    Search(search::SearchArgs),

    /// Validate a ticket file without searching
    Check(check::CheckArgs),

    /// Start the web server
    Serve(ServeArgs),
}

#[derive(clap::Args)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(short, long, default_value = "8080")]
    pub port: u16,

    /// Address to bind to
    #[arg(short, long, default_value = "127.0.0.1")]
    pub address: String,

    /// Open browser automatically
    #[arg(long)]
    pub open: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Csv,
}
