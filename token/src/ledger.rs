//! Core token ledger: supply, balances, transfers, initial distribution.

use crate::claims::EligibleClaimsList;
use crate::error::TokenError;
use moove_types::{Address, DaoParams, Timestamp};
use std::collections::HashMap;

/// Addresses the ledger is wired to at deployment.
#[derive(Clone, Debug)]
pub struct TokenAccounts {
    /// The ledger's own address; holds the early-adopter pool.
    pub ledger: Address,
    /// The coordinator. Receives the unallocated remainder and is the only
    /// caller allowed to issue tokens or close vesting.
    pub authority: Address,
    pub team: Address,
}

/// Capped-supply balance ledger.
pub struct TokenLedger {
    name: String,
    symbol: String,
    cap: u128,
    total_supply: u128,
    balances: HashMap<Address, u128>,
    pub(crate) accounts: TokenAccounts,
    pub(crate) early_adopter_pool: u128,
    pub(crate) deployed_at: Timestamp,
    pub(crate) weeks_of_vesting: u64,
    /// `true` while claims are blocked.
    pub(crate) vesting_active: bool,
    pub(crate) eligible: EligibleClaimsList,
    /// Sum of eligible balances at snapshot time; `None` until taken.
    pub(crate) snapshot_total: Option<u128>,
}

impl TokenLedger {
    /// Deploy the ledger and perform the initial distribution.
    ///
    /// Older users receive `older_users_mint_supply / count` each; the
    /// division remainder is never minted.
    pub fn deploy(
        params: &DaoParams,
        accounts: TokenAccounts,
        now: Timestamp,
    ) -> Result<Self, TokenError> {
        if params.name.trim().is_empty() || params.symbol.trim().is_empty() {
            return Err(TokenError::EmptyNameOrSymbol);
        }
        if params.cap == 0 {
            return Err(TokenError::InvalidCap);
        }
        let requested = params.total_initial_mint().unwrap_or(u128::MAX);
        if requested > params.cap {
            return Err(TokenError::MaxSupplyExceeded {
                requested,
                cap: params.cap,
            });
        }
        if params.older_users_mint_supply > 0 && params.older_users_addresses.is_empty() {
            return Err(TokenError::EmptyOlderUsersList);
        }

        let mut ledger = Self {
            name: params.name.clone(),
            symbol: params.symbol.clone(),
            cap: params.cap,
            total_supply: 0,
            balances: HashMap::new(),
            accounts,
            early_adopter_pool: params.early_adopter_mint_supply,
            deployed_at: now,
            weeks_of_vesting: params.weeks_of_vesting,
            vesting_active: true,
            eligible: EligibleClaimsList::default(),
            snapshot_total: None,
        };

        let team = ledger.accounts.team.clone();
        ledger.mint(&team, params.team_mint_supply)?;

        if params.older_users_mint_supply > 0 {
            let count = params.older_users_addresses.len() as u128;
            let share = params.older_users_mint_supply / count;
            for user in &params.older_users_addresses {
                ledger.mint(user, share)?;
            }
        }

        let own = ledger.accounts.ledger.clone();
        ledger.mint(&own, params.early_adopter_mint_supply)?;

        let remainder = params.cap - requested;
        let authority = ledger.accounts.authority.clone();
        ledger.mint(&authority, remainder)?;

        tracing::info!(
            name = %ledger.name,
            symbol = %ledger.symbol,
            cap = ledger.cap,
            total_supply = ledger.total_supply,
            team = params.team_mint_supply,
            early_adopters = params.early_adopter_mint_supply,
            authority_remainder = remainder,
            "token ledger deployed"
        );
        Ok(ledger)
    }

    fn mint(&mut self, to: &Address, amount: u128) -> Result<(), TokenError> {
        if amount == 0 {
            return Ok(());
        }
        let new_supply = self
            .total_supply
            .checked_add(amount)
            .ok_or(TokenError::Overflow)?;
        if new_supply > self.cap {
            return Err(TokenError::MaxSupplyExceeded {
                requested: new_supply,
                cap: self.cap,
            });
        }
        self.total_supply = new_supply;
        *self.balances.entry(to.clone()).or_insert(0) += amount;
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn get_cap(&self) -> u128 {
        self.cap
    }

    pub fn total_supply(&self) -> u128 {
        self.total_supply
    }

    pub fn balance_of(&self, account: &Address) -> u128 {
        self.balances.get(account).copied().unwrap_or(0)
    }

    pub fn address(&self) -> &Address {
        &self.accounts.ledger
    }

    pub fn authority(&self) -> &Address {
        &self.accounts.authority
    }

    pub fn team(&self) -> &Address {
        &self.accounts.team
    }

    /// Move `amount` from `from` to `to`.
    pub fn transfer(&mut self, from: &Address, to: &Address, amount: u128) -> Result<(), TokenError> {
        if amount == 0 {
            return Err(TokenError::ZeroAmount);
        }
        let available = self.balance_of(from);
        if available < amount {
            return Err(TokenError::InsufficientBalance {
                needed: amount,
                available,
            });
        }
        if from == to {
            return Ok(());
        }
        self.balances.insert(from.clone(), available - amount);
        *self.balances.entry(to.clone()).or_insert(0) += amount;
        tracing::debug!(%from, %to, amount, "token transfer");
        Ok(())
    }

    /// Issue tokens from the authority's balance. Authority only.
    pub fn sending_token(
        &mut self,
        caller: &Address,
        to: &Address,
        amount: u128,
    ) -> Result<(), TokenError> {
        self.ensure_authority(caller)?;
        let authority = self.accounts.authority.clone();
        self.transfer(&authority, to, amount)
    }

    pub(crate) fn ensure_authority(&self, caller: &Address) -> Result<(), TokenError> {
        if caller != &self.accounts.authority {
            return Err(TokenError::NotAuthority(caller.clone()));
        }
        Ok(())
    }

    /// Plain ETH sent straight to the ledger is always refused.
    pub fn receive_eth(&self) -> Result<(), TokenError> {
        Err(TokenError::UseGovernanceToBuyTokens {
            dao: self.accounts.authority.clone(),
        })
    }

    /// Calls carrying unknown data are refused the same way.
    pub fn fallback(&self, _data: &[u8]) -> Result<(), TokenError> {
        self.receive_eth()
    }
}
