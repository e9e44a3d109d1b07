//! Core staking ledger.

use crate::error::StakingError;
use crate::stake::StakedBalance;
use moove_token::TokenLedger;
use moove_types::{Address, Timestamp};
use std::collections::HashMap;

/// The staking ledger: custody of staked tokens plus per-account lock flags.
pub struct StakingLedger {
    /// Custody address on the token ledger.
    address: Address,
    /// The coordinator; the only caller allowed to lock, unlock and slash.
    authority: Address,
    slashing_percent: u8,
    balances: HashMap<Address, StakedBalance>,
}

impl StakingLedger {
    pub fn new(address: Address, authority: Address, slashing_percent: u8) -> Self {
        tracing::info!(%address, %authority, slashing_percent, "staking ledger deployed");
        Self {
            address,
            authority,
            slashing_percent,
            balances: HashMap::new(),
        }
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn slashing_percent(&self) -> u8 {
        self.slashing_percent
    }

    /// Move `amount` of the account's tokens into custody and credit the stake.
    pub fn stake(
        &mut self,
        tokens: &mut TokenLedger,
        account: &Address,
        amount: u128,
    ) -> Result<u128, StakingError> {
        if amount == 0 {
            return Err(StakingError::ZeroAmount);
        }
        let available = tokens.balance_of(account);
        if available < amount {
            return Err(StakingError::InsufficientBalance {
                needed: amount,
                available,
            });
        }
        let current = self.get_user_staked_tokens(account);
        let new_amount = current
            .checked_add(amount)
            .ok_or(StakingError::InsufficientBalance {
                needed: amount,
                available,
            })?;

        tokens.transfer(account, &self.address, amount)?;
        self.balances.entry(account.clone()).or_default().amount = new_amount;
        tracing::info!(%account, amount, staked = new_amount, "tokens staked");
        Ok(new_amount)
    }

    /// Withdraw `amount` from an unlocked stake back to the account.
    pub fn unstake(
        &mut self,
        tokens: &mut TokenLedger,
        account: &Address,
        amount: u128,
    ) -> Result<u128, StakingError> {
        if amount == 0 {
            return Err(StakingError::ZeroAmount);
        }
        if self.is_locked(account) {
            return Err(StakingError::TokensLocked(account.clone()));
        }
        let staked = self.get_user_staked_tokens(account);
        if amount > staked {
            return Err(StakingError::InsufficientStake {
                requested: amount,
                staked,
            });
        }

        tokens.transfer(&self.address, account, amount)?;
        let remaining = staked - amount;
        if let Some(balance) = self.balances.get_mut(account) {
            balance.amount = remaining;
        }
        tracing::info!(%account, amount, staked = remaining, "tokens unstaked");
        Ok(remaining)
    }

    pub fn lock(
        &mut self,
        caller: &Address,
        account: &Address,
        now: Timestamp,
    ) -> Result<(), StakingError> {
        self.ensure_authority(caller)?;
        let balance = match self.balances.get_mut(account) {
            Some(b) if b.amount > 0 => b,
            _ => return Err(StakingError::NoTokensToLock(account.clone())),
        };
        if balance.is_locked {
            return Err(StakingError::AlreadyLocked(account.clone()));
        }
        balance.is_locked = true;
        balance.locked_at = Some(now);
        tracing::info!(%account, amount = balance.amount, at = %now, "stake locked");
        Ok(())
    }

    /// Clear the lock flag. Unlocking an unlocked stake is a no-op.
    pub fn unlock(&mut self, caller: &Address, account: &Address) -> Result<(), StakingError> {
        self.ensure_authority(caller)?;
        let balance = self
            .balances
            .get_mut(account)
            .ok_or_else(|| StakingError::NoStakeRecord(account.clone()))?;
        if balance.is_locked {
            balance.is_locked = false;
            balance.locked_at = None;
            tracing::info!(%account, amount = balance.amount, "stake unlocked");
        }
        Ok(())
    }

    /// Remove `slashing_percent` of the account's stake. Returns the amount
    /// removed; the tokens stay in custody for the caller to redistribute.
    pub fn slash(&mut self, caller: &Address, account: &Address) -> Result<u128, StakingError> {
        self.ensure_authority(caller)?;
        let percent = self.slashing_percent;
        let balance = self
            .balances
            .get_mut(account)
            .ok_or_else(|| StakingError::NoStakeRecord(account.clone()))?;
        let slashed = balance.slash_amount(percent);
        balance.amount -= slashed;
        tracing::warn!(%account, slashed, remaining = balance.amount, percent, "stake slashed");
        Ok(slashed)
    }

    pub fn get_user_staked_tokens(&self, account: &Address) -> u128 {
        self.balances.get(account).map(|b| b.amount).unwrap_or(0)
    }

    pub fn is_locked(&self, account: &Address) -> bool {
        self.balances.get(account).is_some_and(|b| b.is_locked)
    }

    pub fn stake_of(&self, account: &Address) -> Option<&StakedBalance> {
        self.balances.get(account)
    }

    /// Sum of all staked amounts.
    pub fn total_staked(&self) -> u128 {
        self.balances.values().map(|b| b.amount).sum()
    }

    fn ensure_authority(&self, caller: &Address) -> Result<(), StakingError> {
        if caller != &self.authority {
            return Err(StakingError::NotAuthority(caller.clone()));
        }
        Ok(())
    }

    pub fn receive_eth(&self) -> Result<(), StakingError> {
        Err(StakingError::UseGovernanceToInteract {
            dao: self.authority.clone(),
        })
    }

    pub fn fallback(&self, _data: &[u8]) -> Result<(), StakingError> {
        self.receive_eth()
    }
}
