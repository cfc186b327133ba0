//! Ranking policy for candidates tied on total payout.

use crate::search::evaluate::MatchTally;
use serde::{Deserialize, Serialize};

/// Weights for ordering payout-tied candidates. Lower scores rank first.
///
/// With the default weights the four terms are strictly tiered: any
/// difference in the 5-match term outweighs every reachable 4-match
/// difference, which outweighs the 6-match term, and the 3-match tally
/// breaks whatever is left. The default profile prefers draws that leave
/// exactly one ticket at 5 matches, keep the 4-match count near 4.5,
/// and avoid full 6-match hits entirely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TieBreakWeights {
    /// Penalty per unit distance of the 5-match tally from its target
    pub five_match_weight: f64,
    pub five_match_target: f64,
    /// Penalty per unit distance of the 4-match tally from its target
    pub four_match_weight: f64,
    pub four_match_target: f64,
    /// Penalty per 6-match ticket
    pub six_match_weight: f64,
    /// Penalty per 3-match ticket
    pub three_match_weight: f64,
}

impl Default for TieBreakWeights {
    fn default() -> Self {
        Self {
            five_match_weight: 1_000_000.0,
            five_match_target: 1.0,
            four_match_weight: 10_000.0,
            four_match_target: 4.5,
            six_match_weight: 1000.0,
            three_match_weight: 1.0,
        }
    }
}

impl TieBreakWeights {
    /// Score a tally; lower is preferred.
    #[must_use]
    pub fn score(&self, tally: &MatchTally) -> f64 {
        let five = f64::from(tally.count(5));
        let four = f64::from(tally.count(4));
        let six = f64::from(tally.count(6));
        let three = f64::from(tally.count(3));

        (five - self.five_match_target).abs() * self.five_match_weight
            + (four - self.four_match_target).abs() * self.four_match_weight
            + six * self.six_match_weight
            + three * self.three_match_weight
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // counts[m] = tickets with exactly m matches
    fn tally(m3: u32, m4: u32, m5: u32, m6: u32) -> MatchTally {
        MatchTally::from_counts(&[0, 0, 0, m3, m4, m5, m6])
    }

    #[test]
    fn test_all_zero_tally_score() {
        let weights = TieBreakWeights::default();
        // |0 - 1| * 1e6 + |0 - 4.5| * 1e4 = 1,045,000
        let score = weights.score(&tally(0, 0, 0, 0));
        assert!((score - 1_045_000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_four_match_distance_orders_ties() {
        let weights = TieBreakWeights::default();
        // Both hit the 5-match target; 4 matches is closer to 4.5 than 6 is
        let closer = weights.score(&tally(0, 4, 1, 0));
        let farther = weights.score(&tally(0, 6, 1, 0));
        assert!(closer < farther);
    }

    #[test]
    fn test_five_match_term_dominates() {
        let weights = TieBreakWeights::default();
        // A huge 3-match tally still beats missing the 5-match target
        let on_target = weights.score(&tally(50_000, 0, 1, 0));
        let off_target = weights.score(&tally(0, 0, 0, 0));
        assert!(on_target < off_target);

        let two_off = weights.score(&tally(0, 0, 3, 0));
        assert!(off_target < two_off);
    }

    #[test]
    fn test_jackpot_hits_penalized() {
        let weights = TieBreakWeights::default();
        let clean = weights.score(&tally(0, 4, 1, 0));
        let jackpot = weights.score(&tally(0, 4, 1, 1));
        assert!(clean < jackpot);
        assert!((jackpot - clean - 1000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_three_match_breaks_final_ties() {
        let weights = TieBreakWeights::default();
        let few = weights.score(&tally(2, 4, 1, 0));
        let many = weights.score(&tally(9, 4, 1, 0));
        assert!(few < many);
    }

    #[test]
    fn test_custom_weights() {
        let weights = TieBreakWeights {
            five_match_weight: 0.0,
            five_match_target: 0.0,
            four_match_weight: 0.0,
            four_match_target: 0.0,
            six_match_weight: 0.0,
            three_match_weight: 2.0,
        };
        assert!((weights.score(&tally(3, 7, 7, 7)) - 6.0).abs() < f64::EPSILON);
    }
}
