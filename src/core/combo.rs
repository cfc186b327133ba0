//! The `Combination` type: a fixed-size set of distinct pool numbers.
//!
//! Both player tickets and candidate draws are combinations. Alongside the
//! sorted number list, each combination carries a bitmask with bit `n - 1`
//! set for every member `n`, so that counting shared numbers between two
//! combinations is a single AND plus popcount.

/// A set of distinct numbers from the pool, kept sorted ascending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Combination {
    numbers: Vec<u8>,
    mask: u64,
}

impl Combination {
    /// Build a combination from a list of numbers. The list is sorted; it
    /// must already be duplicate-free and within the pool (the ticket
    /// validator and the enumerator both guarantee this).
    #[must_use]
    pub fn new(numbers: impl Into<Vec<u8>>) -> Self {
        let mut numbers = numbers.into();
        numbers.sort_unstable();
        let mask = numbers.iter().fold(0u64, |m, &n| m | 1u64 << (n - 1));
        Self { numbers, mask }
    }

    /// Rebuild the sorted number list from a bitmask.
    #[must_use]
    pub fn from_mask(mask: u64) -> Self {
        let mut numbers = Vec::with_capacity(mask.count_ones() as usize);
        let mut bits = mask;
        while bits != 0 {
            #[allow(clippy::cast_possible_truncation)] // trailing_zeros of a u64 is < 64
            let bit = bits.trailing_zeros() as u8;
            numbers.push(bit + 1);
            bits &= bits - 1;
        }
        Self { numbers, mask }
    }

    /// The member numbers, sorted ascending.
    #[must_use]
    pub fn numbers(&self) -> &[u8] {
        &self.numbers
    }

    /// Bitmask form, one bit per member.
    #[must_use]
    pub fn mask(&self) -> u64 {
        self.mask
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.numbers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.numbers.is_empty()
    }

    /// How many numbers this combination shares with `other`.
    #[must_use]
    pub fn match_count(&self, other: &Combination) -> u32 {
        (self.mask & other.mask).count_ones()
    }
}

impl std::fmt::Display for Combination {
    /// Formats as comma-separated numbers, the same shape the ticket
    /// parser accepts.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for n in &self.numbers {
            if !first {
                write!(f, ",")?;
            }
            write!(f, "{n}")?;
            first = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_sorts_and_masks() {
        let combo = Combination::new(vec![24, 2, 9, 18, 7, 21]);
        assert_eq!(combo.numbers(), &[2, 7, 9, 18, 21, 24]);
        let expected_mask = [2u8, 7, 9, 18, 21, 24]
            .iter()
            .fold(0u64, |m, &n| m | 1u64 << (n - 1));
        assert_eq!(combo.mask(), expected_mask);
    }

    #[test]
    fn test_from_mask_round_trips() {
        let combo = Combination::new(vec![1, 5, 13, 25]);
        let rebuilt = Combination::from_mask(combo.mask());
        assert_eq!(rebuilt, combo);
    }

    #[test]
    fn test_match_count() {
        let ticket = Combination::new(vec![1, 2, 3, 4, 5, 6]);
        let near_miss = Combination::new(vec![1, 2, 3, 4, 5, 7]);
        let disjoint = Combination::new(vec![7, 8, 9, 10, 11, 12]);

        assert_eq!(ticket.match_count(&ticket), 6);
        assert_eq!(ticket.match_count(&near_miss), 5);
        assert_eq!(ticket.match_count(&disjoint), 0);
        // Symmetric
        assert_eq!(near_miss.match_count(&ticket), 5);
    }

    #[test]
    fn test_display_matches_input_shape() {
        let combo = Combination::new(vec![6, 1, 3, 2, 5, 4]);
        assert_eq!(combo.to_string(), "1,2,3,4,5,6");
    }

    #[test]
    fn test_boundary_numbers() {
        let combo = Combination::new(vec![1, 64]);
        assert_eq!(combo.mask(), 1 | 1u64 << 63);
        assert_eq!(Combination::from_mask(combo.mask()).numbers(), &[1, 64]);
    }
}
