//! Scoring one candidate draw against the whole ticket book.

use crate::core::payout::PayoutTable;

/// How many tickets matched the candidate at each exact match count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchTally {
    // counts[m] = tickets sharing exactly m numbers with the candidate
    counts: Vec<u32>,
}

impl MatchTally {
    /// Empty tally for a game picking `pick_size` numbers.
    #[must_use]
    pub fn new(pick_size: u8) -> Self {
        Self {
            counts: vec![0; usize::from(pick_size) + 1],
        }
    }

    /// Tickets matching exactly `matches` numbers. Match counts the game
    /// cannot produce return zero.
    #[must_use]
    pub fn count(&self, matches: usize) -> u32 {
        self.counts.get(matches).copied().unwrap_or(0)
    }

    fn record(&mut self, matches: usize) {
        self.counts[matches] += 1;
    }

    #[cfg(test)]
    pub(crate) fn from_counts(counts: &[u32]) -> Self {
        Self {
            counts: counts.to_vec(),
        }
    }
}

/// Outcome of scoring one candidate.
///
/// An abandoned evaluation carries no total on purpose: a partial sum is
/// not a payout, and keeping the two cases as distinct variants means one
/// can never be compared against the other by accident.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Evaluation {
    /// Every ticket was scored; the total is exact.
    Complete { total: u64, tally: MatchTally },
    /// Scoring stopped as soon as the running total exceeded the bound.
    Abandoned,
}

/// Score `candidate` against every ticket mask.
///
/// With a `bound`, the evaluation is abandoned the moment the running
/// total strictly exceeds it; a candidate whose total merely equals the
/// bound still completes, since it may tie the current minimum.
#[must_use]
#[allow(clippy::cast_possible_truncation)] // popcount of a u64 is at most 64
pub fn evaluate_candidate(
    candidate: u64,
    tickets: &[u64],
    payouts: &PayoutTable,
    bound: Option<u64>,
    pick_size: u8,
) -> Evaluation {
    let mut tally = MatchTally::new(pick_size);
    let mut total = 0u64;

    for &ticket in tickets {
        let matches = (candidate & ticket).count_ones() as usize;
        tally.record(matches);
        total += payouts.amount(matches);
        if let Some(bound) = bound {
            if total > bound {
                return Evaluation::Abandoned;
            }
        }
    }

    Evaluation::Complete { total, tally }
}
