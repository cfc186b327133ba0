//! Core data types for the payout search.
//!
//! This module provides the fundamental types used throughout the library:
//!
//! - [`Combination`]: A set of distinct pool numbers, used for both tickets
//!   and candidate draws
//! - [`TicketBook`]: The validated set of tickets for one search
//! - [`PayoutTable`]: Prize amounts by exact match count
//! - [`GameRules`]: The draw structure (pick size and number pool)
//!
//! ## Bitmask Representation
//!
//! Every combination carries a `u64` bitmask with bit `n - 1` set for each
//! member number `n`. Counting the numbers a candidate shares with a ticket
//! is then `(candidate & ticket).count_ones()`, which is what lets the
//! search visit all 177,100 candidates of the standard game quickly.
//!
//! [`Combination`]: combo::Combination
//! [`TicketBook`]: ticket::TicketBook
//! [`PayoutTable`]: payout::PayoutTable
//! [`GameRules`]: types::GameRules

pub mod combo;
pub mod payout;
pub mod ticket;
pub mod types;
