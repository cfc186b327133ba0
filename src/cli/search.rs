//! The `search` command: find the lowest-payout draws for a ticket file.

use crate::cli::OutputFormat;
use crate::core::payout::PayoutTable;
use crate::core::types::GameRules;
use crate::parsing::tickets::parse_tickets_file;
use crate::search::engine::{SearchConfig, SearchEngine, SearchHooks, SearchReport};
use anyhow::{Context, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::json;
use std::path::PathBuf;
use std::time::{Duration, Instant};

#[derive(Args)]
pub struct SearchArgs {
    /// Ticket file: plain text (one ticket per line), .csv, or .tsv
    pub input: PathBuf,

    /// 1-based column holding the tickets in CSV/TSV input
    #[arg(short, long, default_value = "1", value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..=10_000))]
    pub column: usize,

    /// Show only the best N tied draws (0 = all)
    #[arg(short = 'n', long, default_value = "10")]
    pub top: usize,

    /// Payout for a 3-match ticket
    #[arg(long, default_value = "15")]
    pub payout_3: u64,

    /// Payout for a 4-match ticket
    #[arg(long, default_value = "450")]
    pub payout_4: u64,

    /// Payout for a 5-match ticket
    #[arg(long, default_value = "1850")]
    pub payout_5: u64,

    /// Payout for a 6-match ticket
    #[arg(long, default_value = "50000")]
    pub payout_6: u64,

    /// Evaluate every candidate in full instead of abandoning over-budget ones
    #[arg(long)]
    pub no_prune: bool,

    /// Run on a single thread
    #[arg(long)]
    pub sequential: bool,

    /// Worker threads for the parallel search (default: all cores)
    #[arg(long, conflicts_with = "sequential")]
    pub threads: Option<usize>,

    /// Suppress the progress bar
    #[arg(long)]
    pub no_progress: bool,
}

/// Execute the search command
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: SearchArgs, format: OutputFormat, verbose: bool) -> Result<()> {
    let rules = GameRules::default();
    let payouts = PayoutTable::from_tiers(&[
        (3, args.payout_3),
        (4, args.payout_4),
        (5, args.payout_5),
        (6, args.payout_6),
    ]);

    let book = parse_tickets_file(&args.input, &rules, args.column)
        .with_context(|| format!("Failed to read tickets from {}", args.input.display()))?;

    if verbose {
        eprintln!("Parsed {} tickets from {}", book.len(), args.input.display());
        let tiers: Vec<String> = payouts.tiers().map(|(m, a)| format!("{m}={a}")).collect();
        eprintln!("Payout table: {}", tiers.join(", "));
    }
    if book.is_empty() {
        eprintln!("Warning: no tickets found; every draw pays zero");
    }

    let total = rules.domain_size();
    let bar = if args.no_progress {
        ProgressBar::hidden()
    } else {
        let bar = ProgressBar::new(total);
        bar.set_style(
            ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} draws ({eta})")
                .expect("progress template is valid")
                .progress_chars("=> "),
        );
        bar
    };

    let config = SearchConfig {
        rules,
        payouts,
        prune: !args.no_prune,
        ..SearchConfig::default()
    };
    let engine = SearchEngine::new(&book, config);
    let update = |done: u64, _total: u64| bar.set_position(done);
    let hooks = SearchHooks {
        progress: Some(&update),
        cancel: None,
    };

    let started = Instant::now();
    let report = if args.sequential {
        engine.run_with(hooks)?
    } else if let Some(threads) = args.threads {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .context("Failed to build worker thread pool")?;
        pool.install(|| engine.run_parallel_with(hooks))?
    } else {
        engine.run_parallel_with(hooks)?
    };
    let elapsed = started.elapsed();
    bar.finish_and_clear();

    let shown = if args.top == 0 {
        report.tie_count()
    } else {
        args.top.min(report.tie_count())
    };

    match format {
        OutputFormat::Text => print_text_results(&report, book.len(), shown, elapsed),
        OutputFormat::Json => print_json_results(&report, book.len(), shown, elapsed)?,
        OutputFormat::Csv => print_csv_results(&report, shown),
    }

    Ok(())
}

fn print_text_results(report: &SearchReport, ticket_count: usize, shown: usize, elapsed: Duration) {
    println!(
        "Searched {} candidate draws against {} tickets in {:.2}s",
        report.candidates_evaluated,
        ticket_count,
        elapsed.as_secs_f64()
    );
    println!(
        "Minimum total payout: {} ({} tied draws)",
        report.min_payout,
        report.tie_count()
    );

    if shown == 0 {
        return;
    }
    println!();
    println!(
        "{:>4}  {:<20} {:>8} {:>5} {:>5} {:>5} {:>5} {:>12}",
        "#", "draw", "payout", "3s", "4s", "5s", "6s", "tie score"
    );
    for (i, result) in report.results.iter().take(shown).enumerate() {
        println!(
            "{:>4}  {:<20} {:>8} {:>5} {:>5} {:>5} {:>5} {:>12.1}",
            i + 1,
            result.combination,
            result.total_payout,
            result.tally.count(3),
            result.tally.count(4),
            result.tally.count(5),
            result.tally.count(6),
            result.tiebreak_score
        );
    }
    if shown < report.tie_count() {
        println!("... and {} more tied draws", report.tie_count() - shown);
    }
}

#[allow(clippy::cast_possible_truncation)] // elapsed milliseconds fit in a u64
fn print_json_results(
    report: &SearchReport,
    ticket_count: usize,
    shown: usize,
    elapsed: Duration,
) -> Result<()> {
    let results: Vec<serde_json::Value> = report
        .results
        .iter()
        .take(shown)
        .map(|result| {
            json!({
                "combination": result.combination.numbers(),
                "total_payout": result.total_payout,
                "matches_3": result.tally.count(3),
                "matches_4": result.tally.count(4),
                "matches_5": result.tally.count(5),
                "matches_6": result.tally.count(6),
                "tiebreak_score": result.tiebreak_score,
            })
        })
        .collect();

    let output = json!({
        "ticket_count": ticket_count,
        "candidates_evaluated": report.candidates_evaluated,
        "min_payout": report.min_payout,
        "tie_count": report.tie_count(),
        "elapsed_ms": elapsed.as_millis() as u64,
        "results": results,
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_csv_results(report: &SearchReport, shown: usize) {
    println!("combination,total_payout,matches_3,matches_4,matches_5,matches_6");
    for result in report.results.iter().take(shown) {
        println!(
            "\"{}\",{},{},{},{},{}",
            result.combination,
            result.total_payout,
            result.tally.count(3),
            result.tally.count(4),
            result.tally.count(5),
            result.tally.count(6)
        );
    }
}
