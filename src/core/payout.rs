//! Payout tables: how much one ticket wins at each match count.

/// Payout amounts indexed by exact match count.
///
/// The default table is the standard double-chance game:
///
/// | Matches | Payout |
/// |---------|--------|
/// | 3       | 15     |
/// | 4       | 450    |
/// | 5       | 1,850  |
/// | 6       | 50,000 |
///
/// Any match count without an entry pays nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayoutTable {
    // amounts[m] is the payout for matching exactly m numbers
    amounts: Vec<u64>,
}

impl Default for PayoutTable {
    fn default() -> Self {
        Self::from_tiers(&[(3, 15), (4, 450), (5, 1850), (6, 50_000)])
    }
}

impl PayoutTable {
    /// Build a table from `(match_count, amount)` pairs. Unlisted match
    /// counts pay zero.
    #[must_use]
    pub fn from_tiers(tiers: &[(u8, u64)]) -> Self {
        let top = tiers.iter().map(|&(m, _)| m).max().unwrap_or(0);
        let mut amounts = vec![0u64; usize::from(top) + 1];
        for &(matches, amount) in tiers {
            amounts[usize::from(matches)] = amount;
        }
        Self { amounts }
    }

    /// Payout for a ticket matching exactly `matches` numbers.
    #[must_use]
    pub fn amount(&self, matches: usize) -> u64 {
        self.amounts.get(matches).copied().unwrap_or(0)
    }

    /// The paying tiers, lowest match count first.
    pub fn tiers(&self) -> impl Iterator<Item = (usize, u64)> + '_ {
        self.amounts
            .iter()
            .enumerate()
            .filter(|&(_, &amount)| amount > 0)
            .map(|(matches, &amount)| (matches, amount))
    }
}
