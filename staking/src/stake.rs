//! Per-account stake record.

use moove_types::Timestamp;
use serde::{Deserialize, Serialize};

/// An account's staked balance and lock state.
///
/// Created implicitly on the first stake. The lock flag is independent of the
/// amount: slashing reduces the amount without touching the lock.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakedBalance {
    pub amount: u128,
    pub is_locked: bool,
    /// When the current lock was taken.
    pub locked_at: Option<Timestamp>,
}

impl StakedBalance {
    /// Amount removed by a slash of `percent` (truncating).
    pub fn slash_amount(&self, percent: u8) -> u128 {
        self.amount / 100 * u128::from(percent) + self.amount % 100 * u128::from(percent) / 100
    }
}
