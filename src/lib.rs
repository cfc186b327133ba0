//! # draw-solver
//!
//! A library for finding the lowest-payout draw of a 6-of-25 lottery.
//!
//! In a double-chance game the house draws 6 distinct numbers from 1 to 25
//! and pays every sold ticket by how many numbers it matches. Given the
//! book of tickets actually sold, there is one natural worst-case
//! question: which draw would cost the least? With only
//! C(25, 6) = 177,100 possible draws, the honest answer is to score every
//! single one, and that is exactly what this crate does.
//!
//! ## Features
//!
//! - **Exhaustive search**: Every candidate draw is scored; the reported
//!   minimum is a proof, not an estimate
//! - **Deterministic results**: Identical inputs always produce identical
//!   reports, in sequential and parallel runs alike
//! - **Early abandonment**: Candidates are dropped the moment they exceed
//!   the running minimum, without ever affecting the results
//! - **Tie ranking**: All minimum-payout draws are kept and ordered by a
//!   configurable prize-profile preference
//! - **Strict validation**: Ticket files fail fast with the exact row and
//!   cell that broke the rules
//!
//! ## Example
//!
//! ```rust,no_run
//! use draw_solver::{GameRules, SearchConfig, SearchEngine};
//! use draw_solver::parsing::tickets::parse_tickets_text;
//!
//! // Validate the ticket book
//! let rules = GameRules::default();
//! let book = parse_tickets_text("1,2,3,4,5,6\n2,7,9,18,21,24\n", &rules, None, 1).unwrap();
//!
//! // Search the full domain
//! let engine = SearchEngine::new(&book, SearchConfig::default());
//! let report = engine.run_parallel();
//!
//! println!("minimum payout: {}", report.min_payout);
//! for draw in report.results.iter().take(10) {
//!     println!("{} pays {}", draw.combination, draw.total_payout);
//! }
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Combinations, ticket books, payout tables, and game rules
//! - [`search`]: Enumeration, evaluation, tie-breaking, and the engine
//! - [`parsing`]: Ticket file readers for plain text, CSV, and TSV
//! - [`cli`]: Command-line interface implementation
//! - [`web`]: Web server for browser-based searches

pub mod cli;
pub mod core;
pub mod parsing;
pub mod search;
pub mod utils;
pub mod web;

// Re-export commonly used types for convenience
pub use core::combo::Combination;
pub use core::payout::PayoutTable;
pub use core::ticket::TicketBook;
pub use core::types::*;
pub use parsing::tickets::TicketError;
pub use search::engine::{
    CancelToken, CandidateRecord, SearchCancelled, SearchConfig, SearchEngine, SearchHooks,
    SearchReport,
};
pub use search::evaluate::{Evaluation, MatchTally};
pub use search::tiebreak::TieBreakWeights;
