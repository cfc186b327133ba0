//! Parsers for reading ticket books from user-supplied files.
//!
//! This module accepts three input shapes:
//!
//! - **Plain text**: one ticket per line, numbers comma-separated
//! - **CSV files**: tickets in a designated column, cells optionally quoted
//! - **TSV files**: same as CSV with tab separators
//!
//! ## Example
//!
//! ```rust,no_run
//! use draw_solver::core::types::GameRules;
//! use draw_solver::parsing::tickets::{parse_tickets_file, parse_tickets_text};
//! use std::path::Path;
//!
//! let rules = GameRules::default();
//!
//! // Parse from a file; the delimiter is inferred from the extension
//! let book = parse_tickets_file(Path::new("tickets.csv"), &rules, 1).unwrap();
//!
//! // Or parse raw text directly
//! let book = parse_tickets_text("1,2,3,4,5,6\n2,7,9,18,21,24\n", &rules, None, 1).unwrap();
//! ```
//!
//! ## Ticket Cell Rules
//!
//! Each ticket cell must hold exactly `pick_size` comma-separated integers.
//! The checks run in a fixed order and stop at the first failure:
//!
//! | Order | Check | Error |
//! |-------|-------|-------|
//! | 1     | Exactly `pick_size` fragments | `MalformedTicket` |
//! | 2     | Every fragment parses as an integer | `NonIntegerValue` |
//! | 3     | Every number within `1..=pool_size` | `OutOfRange` |
//! | 4     | All numbers pairwise distinct | `DuplicateValue` |
//!
//! Whitespace around fragments is ignored, and empty fragments (from
//! trailing or doubled commas) are discarded before counting.

pub mod tickets;
