//! Why each address's stake is locked.
//!
//! The staking ledger keeps a single flag per address. An address can be
//! held for several reasons at once (proposer, delegatee, voter on two
//! proposals), so the coordinator counts reasons here and only touches the
//! flag on the first acquire and the last release.

use moove_types::Address;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LockReason {
    /// Proposer of the given proposal, until it is finalized.
    Proposer(u64),
    /// Applied delegatee, until it withdraws.
    Delegatee,
    /// Delegating to some delegatee, until undelegated or released.
    Delegator,
    /// Voted directly on the given proposal, until it is finalized.
    Voted(u64),
}

#[derive(Clone, Debug, Default)]
pub struct LockRegistry {
    reasons: HashMap<Address, BTreeSet<LockReason>>,
}

impl LockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a reason. Returns `true` if it is the address's first one.
    pub fn acquire(&mut self, address: &Address, reason: LockReason) -> bool {
        let set = self.reasons.entry(address.clone()).or_default();
        let first = set.is_empty();
        set.insert(reason);
        first
    }

    /// Drop a reason. Returns `true` if it was the address's last one.
    pub fn release(&mut self, address: &Address, reason: LockReason) -> bool {
        let Some(set) = self.reasons.get_mut(address) else {
            return false;
        };
        if !set.remove(&reason) {
            return false;
        }
        if set.is_empty() {
            self.reasons.remove(address);
            return true;
        }
        false
    }

    pub fn is_held(&self, address: &Address) -> bool {
        self.reasons.contains_key(address)
    }

    pub fn reasons_of(&self, address: &Address) -> Vec<LockReason> {
        self.reasons
            .get(address)
            .map(|s| s.iter().copied().collect())
            .unwrap_or_default()
    }
}
