//! Vote delegation: entrust staked voting power to an applied delegatee.
//!
//! Single-hop only: a delegator points at exactly one delegatee, and a
//! delegatee may never itself be a delegator. The forward map and the
//! delegatee's delegator list are kept in step by every mutation here.

use moove_types::Address;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The delegatee list plus the delegator ↔ delegatee relation.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct DelegationRegistry {
    /// Applied delegatees. Removal swaps the last entry in, so order is not stable.
    delegatees: Vec<Address>,
    /// Delegator → delegatee.
    delegations: HashMap<Address, Address>,
    /// Delegatee → its current delegators.
    delegators: HashMap<Address, Vec<Address>>,
}

impl DelegationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_delegatee(&self, address: &Address) -> bool {
        self.delegatees.contains(address)
    }

    pub fn is_delegator(&self, address: &Address) -> bool {
        self.delegations.contains_key(address)
    }

    pub fn delegatees(&self) -> &[Address] {
        &self.delegatees
    }

    /// The delegatee `delegator` currently points at.
    pub fn delegation_of(&self, delegator: &Address) -> Option<&Address> {
        self.delegations.get(delegator)
    }

    pub fn delegators_of(&self, delegatee: &Address) -> &[Address] {
        self.delegators
            .get(delegatee)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Position of `address` in `delegatee`'s delegator list, if present.
    pub fn position_in_delegators(&self, delegatee: &Address, address: &Address) -> Option<usize> {
        self.delegators_of(delegatee).iter().position(|d| d == address)
    }

    pub(crate) fn add_delegatee(&mut self, address: Address) {
        self.delegators.entry(address.clone()).or_default();
        self.delegatees.push(address);
    }

    /// Remove a delegatee and release every delegator pointing at it.
    /// Returns the released delegators.
    pub(crate) fn remove_delegatee(&mut self, address: &Address) -> Vec<Address> {
        if let Some(index) = self.delegatees.iter().position(|d| d == address) {
            self.delegatees.swap_remove(index);
        }
        let released = self.delegators.remove(address).unwrap_or_default();
        for delegator in &released {
            self.delegations.remove(delegator);
        }
        released
    }

    pub(crate) fn delegate(&mut self, from: &Address, to: &Address) {
        self.delegations.insert(from.clone(), to.clone());
        self.delegators
            .entry(to.clone())
            .or_default()
            .push(from.clone());
    }

    pub(crate) fn undelegate(&mut self, from: &Address) {
        if let Some(old_to) = self.delegations.remove(from) {
            if let Some(list) = self.delegators.get_mut(&old_to) {
                if let Some(index) = list.iter().position(|d| d == from) {
                    list.swap_remove(index);
                }
            }
        }
    }

    /// Every recorded delegation is mirrored in its delegatee's list and vice versa.
    pub fn is_consistent(&self) -> bool {
        let forward = self.delegations.iter().all(|(from, to)| {
            self.is_delegatee(to) && self.delegators_of(to).iter().filter(|d| *d == from).count() == 1
        });
        let backward = self.delegators.iter().all(|(to, list)| {
            list.iter()
                .all(|from| self.delegations.get(from) == Some(to))
        });
        forward && backward
    }
}
