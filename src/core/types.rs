//! Core types shared across the solver.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest supported number pool. Combinations and tickets are tracked as
/// bitmasks in a `u64`, one bit per pool number.
pub const MAX_POOL_SIZE: u8 = 64;

/// Errors raised when building an invalid game configuration.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Pick size must be at least 1")]
    ZeroPick,

    #[error("Pick size {pick} exceeds pool size {pool}")]
    PickExceedsPool { pick: u8, pool: u8 },

    #[error("Pool size {0} exceeds the supported maximum of {MAX_POOL_SIZE}")]
    PoolTooLarge(u8),
}

/// The structure of the game being solved: draw `pick_size` distinct numbers
/// out of the pool `1..=pool_size`.
///
/// The standard game is 6 out of 25, which gives a candidate domain of
/// C(25, 6) = 177,100 draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRules {
    /// Numbers range from 1 to `pool_size` inclusive
    pub pool_size: u8,
    /// How many distinct numbers make up one draw or ticket
    pub pick_size: u8,
}

impl Default for GameRules {
    fn default() -> Self {
        Self {
            pool_size: 25,
            pick_size: 6,
        }
    }
}

impl GameRules {
    /// Create a rule set, rejecting shapes the solver cannot represent.
    pub fn new(pool_size: u8, pick_size: u8) -> Result<Self, ConfigError> {
        if pick_size == 0 {
            return Err(ConfigError::ZeroPick);
        }
        if pool_size > MAX_POOL_SIZE {
            return Err(ConfigError::PoolTooLarge(pool_size));
        }
        if pick_size > pool_size {
            return Err(ConfigError::PickExceedsPool {
                pick: pick_size,
                pool: pool_size,
            });
        }
        Ok(Self {
            pool_size,
            pick_size,
        })
    }

    /// True if `number` belongs to the pool.
    #[must_use]
    pub fn contains(&self, number: u8) -> bool {
        number >= 1 && number <= self.pool_size
    }

    /// Bitmask with one bit set for every pool number.
    #[must_use]
    pub fn pool_mask(&self) -> u64 {
        // pool_size is capped at 64, so the shift below never reaches 64
        u64::MAX >> (64 - u32::from(self.pool_size))
    }

    /// Number of candidate draws in the full domain: C(pool_size, pick_size).
    #[must_use]
    #[allow(clippy::cast_possible_truncation)] // C(64, k) fits in a u64
    pub fn domain_size(&self) -> u64 {
        let n = u128::from(self.pool_size);
        let k = u128::from(self.pick_size);
        let mut result: u128 = 1;
        // Multiply before dividing; each prefix product is divisible by i!
        for i in 1..=k {
            result = result * (n - k + i) / i;
        }
        result as u64
    }
}
