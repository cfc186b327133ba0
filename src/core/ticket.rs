//! The ticket book: the validated set of player tickets for one search.

use crate::core::combo::Combination;

/// All tickets in play, with their bitmasks laid out contiguously for the
/// evaluation inner loop.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketBook {
    tickets: Vec<Combination>,
    masks: Vec<u64>,
}

impl TicketBook {
    /// Wrap validated tickets and precompute the mask table.
    #[must_use]
    pub fn new(tickets: Vec<Combination>) -> Self {
        let masks = tickets.iter().map(Combination::mask).collect();
        Self { tickets, masks }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tickets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tickets.is_empty()
    }

    /// The tickets in input order.
    #[must_use]
    pub fn tickets(&self) -> &[Combination] {
        &self.tickets
    }

    /// One mask per ticket, in input order. This is the view the payout
    /// evaluation iterates over.
    #[must_use]
    pub fn masks(&self) -> &[u64] {
        &self.masks
    }
}
