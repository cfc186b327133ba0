//! The exhaustive payout-minimization search.
//!
//! Components:
//!
//! - [`enumerate`]: lexicographic walk over every candidate draw
//! - [`evaluate`]: scoring one candidate against the ticket book
//! - [`tiebreak`]: ordering policy among payout-tied candidates
//! - [`engine`]: sequential and parallel drivers tying it together
//!
//! The search is exhaustive by construction. The domain for the standard
//! game is C(25, 6) = 177,100 candidates, small enough to visit outright,
//! and visiting all of them is what makes the reported minimum a proof
//! rather than an estimate. Early abandonment of over-budget candidates
//! and the parallel driver change how fast the answer arrives, never what
//! it is.

pub mod engine;
pub mod enumerate;
pub mod evaluate;
pub mod tiebreak;
