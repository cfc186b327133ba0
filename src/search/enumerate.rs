//! Lexicographic enumeration of the candidate domain.
//!
//! Candidates are produced as bitmasks, in the order of their sorted
//! number lists: `[1,2,3,4,5,6]`, `[1,2,3,4,5,7]`, ... , `[20,21,22,23,24,25]`
//! for the standard game. The parallel driver carves the domain into one
//! partition per leading (lowest) number; concatenating the partitions in
//! lead order reproduces the full sequence exactly.

use crate::core::types::GameRules;

/// Iterator over pick-size subsets of the pool, yielded as bitmasks in
/// lexicographic order of their sorted number lists.
#[derive(Debug, Clone)]
pub struct CombinationIter {
    current: Vec<u8>,
    pool_size: u8,
    // The first `fixed` positions never advance
    fixed: usize,
    exhausted: bool,
}

/// Enumerate the full candidate domain for `rules`.
#[must_use]
pub fn combinations(rules: &GameRules) -> CombinationIter {
    CombinationIter::new(rules)
}

impl CombinationIter {
    /// Iterator over the whole domain, starting at `[1, 2, .., pick_size]`.
    #[must_use]
    pub fn new(rules: &GameRules) -> Self {
        let current: Vec<u8> = (1..=rules.pick_size).collect();
        let exhausted = rules.pick_size > rules.pool_size;
        Self {
            current,
            pool_size: rules.pool_size,
            fixed: 0,
            exhausted,
        }
    }

    /// Iterator over the partition of the domain whose lowest number is
    /// exactly `lead`. Empty when no combination can start there.
    #[must_use]
    pub fn with_lead(rules: &GameRules, lead: u8) -> Self {
        let exhausted = lead < 1
            || rules.pick_size == 0
            || rules.pick_size > rules.pool_size
            || lead > rules.pool_size - rules.pick_size + 1;
        let current: Vec<u8> = if exhausted {
            Vec::new()
        } else {
            (lead..lead + rules.pick_size).collect()
        };
        Self {
            current,
            pool_size: rules.pool_size,
            fixed: 1,
            exhausted,
        }
    }

    /// Advance `current` to its lexicographic successor, or mark the
    /// iterator exhausted.
    #[allow(clippy::cast_possible_truncation)] // pick size is at most 64
    fn advance(&mut self) {
        let k = self.current.len();
        let mut i = k;
        while i > self.fixed {
            i -= 1;
            // Highest value position i can hold and still leave room for
            // the positions after it
            let ceiling = self.pool_size - (k - 1 - i) as u8;
            if self.current[i] < ceiling {
                self.current[i] += 1;
                for j in i + 1..k {
                    self.current[j] = self.current[j - 1] + 1;
                }
                return;
            }
        }
        self.exhausted = true;
    }
}

impl Iterator for CombinationIter {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        if self.exhausted {
            return None;
        }
        let mask = self
            .current
            .iter()
            .fold(0u64, |m, &n| m | 1u64 << (n - 1));
        self.advance();
        Some(mask)
    }
}
