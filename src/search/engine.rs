//! The payout-minimization search engine.
//!
//! The engine walks every candidate draw in the domain, scores it against
//! the ticket book, and keeps the full set of candidates achieving the
//! lowest total payout. Identical inputs always produce identical
//! reports: the parallel driver partitions the domain by leading number
//! and merges partition results in order, so it returns exactly what the
//! sequential driver would.
//!
//! ## Example
//!
//! ```rust
//! use draw_solver::core::combo::Combination;
//! use draw_solver::core::ticket::TicketBook;
//! use draw_solver::search::engine::{SearchConfig, SearchEngine};
//!
//! let book = TicketBook::new(vec![Combination::new(vec![1, 2, 3, 4, 5, 6])]);
//! let engine = SearchEngine::new(&book, SearchConfig::default());
//! let report = engine.run();
//!
//! assert_eq!(report.min_payout, 0);
//! assert_eq!(report.candidates_evaluated, 177_100);
//! ```

use crate::core::combo::Combination;
use crate::core::payout::PayoutTable;
use crate::core::ticket::TicketBook;
use crate::core::types::GameRules;
use crate::search::enumerate::{combinations, CombinationIter};
use crate::search::evaluate::{evaluate_candidate, Evaluation, MatchTally};
use crate::search::tiebreak::TieBreakWeights;
use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use thiserror::Error;

/// Default number of candidates between progress callbacks
pub const DEFAULT_PROGRESS_INTERVAL: u64 = 1000;

/// Full configuration for one search run.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub rules: GameRules,
    pub payouts: PayoutTable,
    pub tiebreak: TieBreakWeights,
    /// Abandon a candidate as soon as its running total exceeds the best
    /// minimum seen so far. Changes timing only, never results.
    pub prune: bool,
    /// Candidates between progress callbacks
    pub progress_interval: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            rules: GameRules::default(),
            payouts: PayoutTable::default(),
            tiebreak: TieBreakWeights::default(),
            prune: true,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
        }
    }
}

/// One minimum-payout draw with its evaluation details.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateRecord {
    pub combination: Combination,
    pub total_payout: u64,
    pub tally: MatchTally,
    /// Score assigned by the tie-break weights; lower ranks first
    pub tiebreak_score: f64,
}

/// Outcome of a completed search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchReport {
    /// The lowest total payout over the whole domain
    pub min_payout: u64,
    /// Candidates enumerated and scored. Always the full domain size:
    /// pruning cuts tickets per candidate, never candidates.
    pub candidates_evaluated: u64,
    /// Every draw achieving `min_payout`, ordered by tie-break score.
    /// Equal scores keep enumeration order.
    pub results: Vec<CandidateRecord>,
}

impl SearchReport {
    #[must_use]
    pub fn tie_count(&self) -> usize {
        self.results.len()
    }
}

/// Error returned when a run is cancelled before finishing. A cancelled
/// search never returns a partial result set.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Search cancelled after {evaluated} of {total} candidates")]
pub struct SearchCancelled {
    pub evaluated: u64,
    pub total: u64,
}

/// Cooperative cancellation flag shared with a running search. Checked
/// between candidate evaluations.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

/// Progress callback: `(candidates_done, candidates_total)`
pub type ProgressFn<'a> = dyn Fn(u64, u64) + Sync + 'a;

/// Optional side channels for a running search. Neither can change the
/// result set.
#[derive(Clone, Copy, Default)]
pub struct SearchHooks<'a> {
    pub progress: Option<&'a ProgressFn<'a>>,
    pub cancel: Option<&'a CancelToken>,
}

/// Running minimum and tied set. Only complete evaluations are offered,
/// so an abandoned candidate can never reach the results.
#[derive(Debug, Default)]
struct Accumulator {
    min_payout: Option<u64>,
    ties: Vec<(u64, MatchTally)>,
}

impl Accumulator {
    fn offer(&mut self, candidate: u64, total: u64, tally: MatchTally) {
        match self.min_payout {
            Some(min) if total > min => {}
            Some(min) if total == min => self.ties.push((candidate, tally)),
            // Strictly better, or the first complete candidate
            _ => {
                self.min_payout = Some(total);
                self.ties.clear();
                self.ties.push((candidate, tally));
            }
        }
    }

    /// Fold in the accumulator of a later partition. Calling in partition
    /// order keeps tied candidates in enumeration order.
    fn merge(&mut self, other: Accumulator) {
        match (self.min_payout, other.min_payout) {
            (_, None) => {}
            (None, Some(_)) => *self = other,
            (Some(a), Some(b)) => {
                if b < a {
                    *self = other;
                } else if b == a {
                    self.ties.extend(other.ties);
                }
            }
        }
    }
}

/// Consistency check on an enumerated candidate. A violation here is a bug
/// in the enumerator, never bad user input, so it panics outright.
#[inline]
fn check_candidate(candidate: u64, rules: &GameRules) {
    assert_eq!(
        candidate.count_ones(),
        u32::from(rules.pick_size),
        "candidate has the wrong number of picks"
    );
    assert_eq!(
        candidate & !rules.pool_mask(),
        0,
        "candidate contains numbers outside the pool"
    );
}

/// Exhaustive minimum-payout search over every possible draw.
pub struct SearchEngine<'a> {
    book: &'a TicketBook,
    config: SearchConfig,
}

impl<'a> SearchEngine<'a> {
    #[must_use]
    pub fn new(book: &'a TicketBook, config: SearchConfig) -> Self {
        Self { book, config }
    }

    /// Run the search on the current thread.
    #[must_use]
    pub fn run(&self) -> SearchReport {
        self.run_with(SearchHooks::default())
            .expect("a search without a cancel token cannot be cancelled")
    }

    /// Run the search across the rayon thread pool.
    #[must_use]
    pub fn run_parallel(&self) -> SearchReport {
        self.run_parallel_with(SearchHooks::default())
            .expect("a search without a cancel token cannot be cancelled")
    }

    /// Run the search on the current thread with progress reporting and
    /// cancellation.
    ///
    /// # Errors
    ///
    /// Returns [`SearchCancelled`] if the cancel token fires.
    pub fn run_with(&self, hooks: SearchHooks<'_>) -> Result<SearchReport, SearchCancelled> {
        let rules = self.config.rules;
        let total = rules.domain_size();
        let tickets = self.book.masks();
        let interval = self.config.progress_interval.max(1);
        tracing::debug!(
            "Sequential search: {} candidates against {} tickets (prune={})",
            total,
            tickets.len(),
            self.config.prune
        );

        let mut acc = Accumulator::default();
        let mut done = 0u64;
        for candidate in combinations(&rules) {
            if let Some(token) = hooks.cancel {
                if token.is_cancelled() {
                    return Err(SearchCancelled {
                        evaluated: done,
                        total,
                    });
                }
            }
            check_candidate(candidate, &rules);

            let bound = if self.config.prune { acc.min_payout } else { None };
            if let Evaluation::Complete {
                total: payout,
                tally,
            } = evaluate_candidate(candidate, tickets, &self.config.payouts, bound, rules.pick_size)
            {
                acc.offer(candidate, payout, tally);
            }

            done += 1;
            if let Some(progress) = hooks.progress {
                if done % interval == 0 || done == total {
                    progress(done, total);
                }
            }
        }

        Ok(self.finalize(acc, done))
    }

    /// Run the search across the rayon thread pool with progress reporting
    /// and cancellation.
    ///
    /// The domain is split into one partition per leading (lowest) number.
    /// Each worker folds its partition with a local minimum; partials are
    /// merged in partition order and sorted once, so the report is
    /// identical to the sequential driver's.
    ///
    /// # Errors
    ///
    /// Returns [`SearchCancelled`] if the cancel token fires.
    pub fn run_parallel_with(
        &self,
        hooks: SearchHooks<'_>,
    ) -> Result<SearchReport, SearchCancelled> {
        let rules = self.config.rules;
        let total = rules.domain_size();
        let tickets = self.book.masks();
        let interval = self.config.progress_interval.max(1);
        let leads: Vec<u8> = (1..=rules.pool_size.saturating_sub(rules.pick_size) + 1).collect();
        tracing::debug!(
            "Parallel search: {} candidates in {} partitions against {} tickets (prune={})",
            total,
            leads.len(),
            tickets.len(),
            self.config.prune
        );

        let counter = AtomicU64::new(0);
        // None marks a partition that observed the cancel flag
        let partials: Vec<Option<Accumulator>> = leads
            .into_par_iter()
            .map(|lead| {
                let mut acc = Accumulator::default();
                for candidate in CombinationIter::with_lead(&rules, lead) {
                    if let Some(token) = hooks.cancel {
                        if token.is_cancelled() {
                            return None;
                        }
                    }
                    check_candidate(candidate, &rules);

                    let bound = if self.config.prune { acc.min_payout } else { None };
                    if let Evaluation::Complete {
                        total: payout,
                        tally,
                    } = evaluate_candidate(
                        candidate,
                        tickets,
                        &self.config.payouts,
                        bound,
                        rules.pick_size,
                    ) {
                        acc.offer(candidate, payout, tally);
                    }

                    let done = counter.fetch_add(1, Ordering::Relaxed) + 1;
                    if let Some(progress) = hooks.progress {
                        if done % interval == 0 || done == total {
                            progress(done, total);
                        }
                    }
                }
                Some(acc)
            })
            .collect();

        let mut acc = Accumulator::default();
        for partial in partials {
            match partial {
                Some(p) => acc.merge(p),
                None => {
                    return Err(SearchCancelled {
                        evaluated: counter.load(Ordering::Relaxed),
                        total,
                    })
                }
            }
        }
        Ok(self.finalize(acc, counter.load(Ordering::Relaxed)))
    }

    fn finalize(&self, acc: Accumulator, evaluated: u64) -> SearchReport {
        let min_payout = acc.min_payout.unwrap_or(0);
        let mut results: Vec<CandidateRecord> = acc
            .ties
            .into_iter()
            .map(|(candidate, tally)| {
                let tiebreak_score = self.config.tiebreak.score(&tally);
                CandidateRecord {
                    combination: Combination::from_mask(candidate),
                    total_payout: min_payout,
                    tally,
                    tiebreak_score,
                }
            })
            .collect();

        // Stable sort, so equal scores keep enumeration order
        results.sort_by(|a, b| a.tiebreak_score.total_cmp(&b.tiebreak_score));

        tracing::debug!(
            "Search finished: minimum payout {} with {} tied draws",
            min_payout,
            results.len()
        );

        SearchReport {
            min_payout,
            candidates_evaluated: evaluated,
            results,
        }
    }
}
