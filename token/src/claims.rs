//! Early-adopter claims: the eligible list, the vesting gate, and the
//! pro-rata payout of the early-adopter pool.

use crate::error::TokenError;
use crate::ledger::TokenLedger;
use moove_types::{Address, Timestamp, SECONDS_PER_DAY};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Per-address claim state.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimRecord {
    /// Balance recorded when the snapshot was taken.
    pub snapshot_balance: Option<u128>,
    /// Share of the early-adopter pool, fixed at snapshot time.
    pub claim_amount: u128,
    pub claimed: bool,
}

/// Append-only list of addresses registered for the early-adopter claim.
#[derive(Clone, Debug, Default)]
pub struct EligibleClaimsList {
    order: Vec<Address>,
    records: HashMap<Address, ClaimRecord>,
}

impl EligibleClaimsList {
    pub fn contains(&self, address: &Address) -> bool {
        self.records.contains_key(address)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn addresses(&self) -> &[Address] {
        &self.order
    }

    pub fn record(&self, address: &Address) -> Option<&ClaimRecord> {
        self.records.get(address)
    }

    fn insert(&mut self, address: Address) -> Result<(), TokenError> {
        if self.records.contains_key(&address) {
            return Err(TokenError::AlreadyRegistered(address));
        }
        self.records.insert(address.clone(), ClaimRecord::default());
        self.order.push(address);
        Ok(())
    }
}

impl TokenLedger {
    /// Register `address` for the early-adopter claim.
    ///
    /// Callable by the coordinator or the team. Duplicates are rejected.
    pub fn update_eligible_addresses(
        &mut self,
        caller: &Address,
        address: &Address,
    ) -> Result<(), TokenError> {
        if caller != &self.accounts.authority && caller != &self.accounts.team {
            return Err(TokenError::NotAuthority(caller.clone()));
        }
        self.eligible.insert(address.clone())?;
        tracing::info!(%address, registered = self.eligible.len(), "eligible claim address added");
        Ok(())
    }

    pub fn eligible(&self) -> &EligibleClaimsList {
        &self.eligible
    }

    pub fn is_vesting_active(&self) -> bool {
        self.vesting_active
    }

    pub fn vesting_ends_at(&self) -> Timestamp {
        self.deployed_at.plus_weeks(self.weeks_of_vesting)
    }

    /// Whole days left until vesting may be closed (floor), zero once elapsed.
    pub fn claim_countdown_in_days(&self, now: Timestamp) -> u64 {
        self.vesting_ends_at().remaining_from(now) / SECONDS_PER_DAY
    }

    /// Close the vesting gate. Authority only, exactly once, after the countdown.
    pub fn change_vesting_period_status(
        &mut self,
        caller: &Address,
        now: Timestamp,
    ) -> Result<(), TokenError> {
        self.ensure_authority(caller)?;
        if !self.vesting_active {
            return Err(TokenError::VestingAlreadyClosed);
        }
        if self.vesting_ends_at().remaining_from(now) > 0 {
            return Err(TokenError::VestingNotElapsed {
                days_left: self.claim_countdown_in_days(now),
            });
        }
        self.vesting_active = false;
        tracing::info!(at = %now, "vesting period closed");
        Ok(())
    }

    /// Snapshot the balances of every eligible address and fix each share of
    /// the early-adopter pool. Returns the summed snapshot balance.
    pub fn snapshot_claims_balance(&mut self, caller: &Address) -> Result<u128, TokenError> {
        self.ensure_authority(caller)?;
        if self.vesting_active {
            return Err(TokenError::VestingActive);
        }
        if self.snapshot_total.is_some() {
            return Err(TokenError::SnapshotAlreadyTaken);
        }

        let balances: Vec<(Address, u128)> = self
            .eligible
            .order
            .iter()
            .map(|a| (a.clone(), self.balance_of(a)))
            .collect();
        let total = balances
            .iter()
            .try_fold(0u128, |acc, (_, b)| acc.checked_add(*b))
            .ok_or(TokenError::Overflow)?;

        let mut shares = Vec::with_capacity(balances.len());
        for (address, balance) in balances {
            let share = if total == 0 {
                0
            } else {
                self.early_adopter_pool
                    .checked_mul(balance)
                    .ok_or(TokenError::Overflow)?
                    / total
            };
            shares.push((address, balance, share));
        }

        for (address, balance, share) in shares {
            if let Some(record) = self.eligible.records.get_mut(&address) {
                record.snapshot_balance = Some(balance);
                record.claim_amount = share;
            }
        }
        self.snapshot_total = Some(total);
        tracing::info!(
            total,
            addresses = self.eligible.len(),
            pool = self.early_adopter_pool,
            "claim snapshot taken"
        );
        Ok(total)
    }

    /// The summed snapshot balance, once taken.
    pub fn get_total_balance_claims(&self) -> Option<u128> {
        self.snapshot_total
    }

    /// Pay the caller's share of the early-adopter pool. Once per address.
    pub fn vesting_token_claims(&mut self, caller: &Address) -> Result<u128, TokenError> {
        if self.vesting_active {
            return Err(TokenError::VestingActive);
        }
        if self.snapshot_total.is_none() {
            return Err(TokenError::SnapshotMissing);
        }
        let record = self
            .eligible
            .record(caller)
            .ok_or_else(|| TokenError::NotEligible(caller.clone()))?;
        if record.claimed {
            return Err(TokenError::AlreadyClaimed(caller.clone()));
        }
        let amount = record.claim_amount;
        if amount == 0 {
            return Err(TokenError::NotEligible(caller.clone()));
        }

        let pool = self.accounts.ledger.clone();
        self.transfer(&pool, caller, amount)?;
        if let Some(record) = self.eligible.records.get_mut(caller) {
            record.claimed = true;
        }
        tracing::info!(claimer = %caller, amount, "early-adopter tokens claimed");
        Ok(amount)
    }

    /// Whether `address` is registered and still has something to claim.
    pub fn check_eligibility_claim(&self, address: &Address) -> bool {
        match self.eligible.record(address) {
            Some(record) if record.claimed => false,
            Some(record) => self.snapshot_total.is_none() || record.claim_amount > 0,
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::tests::{accounts, scenario_params};
    use moove_types::SECONDS_PER_WEEK;

    fn ledger() -> TokenLedger {
        TokenLedger::deploy(&scenario_params(), accounts(), Timestamp::new(0)).unwrap()
    }

    fn dao() -> Address {
        Address::new("0xdao")
    }

    fn after_vesting() -> Timestamp {
        Timestamp::new(4 * SECONDS_PER_WEEK)
    }

    #[test]
    fn test_duplicate_registration_fails() {
        let mut l = ledger();
        let alice = Address::new("0xalice");
        l.update_eligible_addresses(&dao(), &alice).unwrap();
        assert_eq!(
            l.update_eligible_addresses(&dao(), &alice),
            Err(TokenError::AlreadyRegistered(alice.clone()))
        );
        assert_eq!(l.eligible().len(), 1);
    }

    #[test]
    fn test_team_can_register_but_others_cannot() {
        let mut l = ledger();
        let alice = Address::new("0xalice");
        l.update_eligible_addresses(&Address::new("0xteam"), &alice).unwrap();
        let mallory = Address::new("0xmallory");
        assert_eq!(
            l.update_eligible_addresses(&mallory, &mallory),
            Err(TokenError::NotAuthority(mallory.clone()))
        );
    }

    #[test]
    fn test_countdown_floors_to_days() {
        let l = ledger();
        assert_eq!(l.claim_countdown_in_days(Timestamp::new(0)), 28);
        assert_eq!(l.claim_countdown_in_days(Timestamp::new(1)), 27);
        assert_eq!(l.claim_countdown_in_days(after_vesting()), 0);
        assert_eq!(l.claim_countdown_in_days(after_vesting().plus_days(3)), 0);
    }

    #[test]
    fn test_vesting_closes_once_after_countdown() {
        let mut l = ledger();
        assert_eq!(
            l.change_vesting_period_status(&dao(), Timestamp::new(0)),
            Err(TokenError::VestingNotElapsed { days_left: 28 })
        );
        assert_eq!(
            l.change_vesting_period_status(&Address::new("0xteam"), after_vesting()),
            Err(TokenError::NotAuthority(Address::new("0xteam")))
        );
        l.change_vesting_period_status(&dao(), after_vesting()).unwrap();
        assert!(!l.is_vesting_active());
        assert_eq!(
            l.change_vesting_period_status(&dao(), after_vesting()),
            Err(TokenError::VestingAlreadyClosed)
        );
    }

    #[test]
    fn test_claims_blocked_while_vesting() {
        let mut l = ledger();
        let alice = Address::new("0xalice");
        l.update_eligible_addresses(&dao(), &alice).unwrap();
        assert_eq!(l.vesting_token_claims(&alice), Err(TokenError::VestingActive));
        assert_eq!(l.snapshot_claims_balance(&dao()), Err(TokenError::VestingActive));
    }

    #[test]
    fn test_claim_requires_snapshot() {
        let mut l = ledger();
        let alice = Address::new("0xalice");
        l.update_eligible_addresses(&dao(), &alice).unwrap();
        l.change_vesting_period_status(&dao(), after_vesting()).unwrap();
        assert_eq!(l.vesting_token_claims(&alice), Err(TokenError::SnapshotMissing));
    }

    #[test]
    fn test_pro_rata_distribution() {
        let mut l = ledger();
        let alice = Address::new("0xalice");
        let bob = Address::new("0xbob");
        l.sending_token(&dao(), &alice, 3_000).unwrap();
        l.sending_token(&dao(), &bob, 1_000).unwrap();
        l.update_eligible_addresses(&dao(), &alice).unwrap();
        l.update_eligible_addresses(&dao(), &bob).unwrap();
        l.change_vesting_period_status(&dao(), after_vesting()).unwrap();

        assert_eq!(l.snapshot_claims_balance(&dao()), Ok(4_000));
        assert_eq!(l.get_total_balance_claims(), Some(4_000));
        assert_eq!(l.snapshot_claims_balance(&dao()), Err(TokenError::SnapshotAlreadyTaken));

        // A transfer after the snapshot does not change the share.
        l.transfer(&bob, &alice, 1_000).unwrap();

        assert_eq!(l.vesting_token_claims(&alice), Ok(750_000));
        assert_eq!(l.vesting_token_claims(&bob), Ok(250_000));
        assert_eq!(l.balance_of(&alice), 4_000 + 750_000);
        assert_eq!(l.balance_of(&Address::new("0xtoken")), 0);
        assert_eq!(
            l.vesting_token_claims(&alice),
            Err(TokenError::AlreadyClaimed(alice.clone()))
        );
        assert!(!l.check_eligibility_claim(&alice));
    }

    #[test]
    fn test_zero_share_is_not_eligible() {
        let mut l = ledger();
        let alice = Address::new("0xalice");
        let carol = Address::new("0xcarol");
        l.sending_token(&dao(), &alice, 10).unwrap();
        l.update_eligible_addresses(&dao(), &alice).unwrap();
        l.update_eligible_addresses(&dao(), &carol).unwrap();
        l.change_vesting_period_status(&dao(), after_vesting()).unwrap();
        l.snapshot_claims_balance(&dao()).unwrap();

        assert!(!l.check_eligibility_claim(&carol));
        assert_eq!(
            l.vesting_token_claims(&carol),
            Err(TokenError::NotEligible(carol.clone()))
        );
        let stranger = Address::new("0xstranger");
        assert_eq!(
            l.vesting_token_claims(&stranger),
            Err(TokenError::NotEligible(stranger.clone()))
        );
    }

    #[test]
    fn test_empty_snapshot_pays_nothing() {
        let mut l = ledger();
        let alice = Address::new("0xalice");
        l.update_eligible_addresses(&dao(), &alice).unwrap();
        l.change_vesting_period_status(&dao(), after_vesting()).unwrap();
        assert_eq!(l.snapshot_claims_balance(&dao()), Ok(0));
        assert_eq!(
            l.vesting_token_claims(&alice),
            Err(TokenError::NotEligible(alice.clone()))
        );
    }
}
