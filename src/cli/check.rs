//! The `check` command: validate a ticket file without searching.

use crate::cli::OutputFormat;
use crate::core::types::GameRules;
use crate::parsing::tickets::parse_tickets_file;
use anyhow::{Context, Result};
use clap::Args;
use serde_json::json;
use std::path::PathBuf;

#[derive(Args)]
pub struct CheckArgs {
    /// Ticket file: plain text (one ticket per line), .csv, or .tsv
    pub input: PathBuf,

    /// 1-based column holding the tickets in CSV/TSV input
    #[arg(short, long, default_value = "1", value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..=10_000))]
    pub column: usize,
}

/// Execute the check command. Exits non-zero with the first validation
/// diagnostic if the file is bad.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: CheckArgs, format: OutputFormat, verbose: bool) -> Result<()> {
    let rules = GameRules::default();
    let book = parse_tickets_file(&args.input, &rules, args.column)
        .with_context(|| format!("Invalid ticket file {}", args.input.display()))?;

    if verbose {
        for (i, ticket) in book.tickets().iter().enumerate() {
            eprintln!("  {:>5}: {}", i + 1, ticket);
        }
    }

    match format {
        OutputFormat::Text => {
            println!("OK: {} tickets in {}", book.len(), args.input.display());
        }
        OutputFormat::Json => {
            let output = json!({
                "valid": true,
                "ticket_count": book.len(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Csv => {
            println!("valid,ticket_count");
            println!("true,{}", book.len());
        }
    }

    Ok(())
}
