//! DAO constructor parameters.
//!
//! The full parameter set a Moove DAO is deployed with. Validation happens in
//! the governance crate when the DAO is constructed; this type is plain data.

use crate::address::Address;
use crate::amount::EthAmount;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DaoParams {
    // ── Token ────────────────────────────────────────────────────────────
    pub name: String,
    pub symbol: String,

    /// Tokens minted to the team address at deployment.
    #[serde(with = "crate::wide_int")]
    pub team_mint_supply: u128,

    /// Hard cap on total supply.
    #[serde(with = "crate::wide_int")]
    pub cap: u128,

    /// Tokens split evenly across `older_users_addresses`.
    #[serde(with = "crate::wide_int")]
    pub older_users_mint_supply: u128,

    /// Tokens held by the token ledger itself, distributed pro rata once vesting ends.
    #[serde(with = "crate::wide_int")]
    pub early_adopter_mint_supply: u128,

    pub older_users_addresses: Vec<Address>,

    /// Length of the vesting period that gates early-adopter claims.
    pub weeks_of_vesting: u64,

    /// Price of one token, in wei.
    pub token_price: EthAmount,

    // ── Governance ───────────────────────────────────────────────────────
    #[serde(with = "crate::wide_int")]
    pub minimum_token_staked_to_make_a_proposal: u128,

    /// Percent (0..=100) of total supply that must be circulating before anyone may propose.
    pub minimum_circulating_supply_to_make_a_proposal_in_percent: u8,

    /// Percent (0..=100) of circulating supply that must vote for a proposal to be binding.
    pub proposal_quorum_percent: u8,

    /// Percent (0..=100) of the proposer's stake removed when a proposal misses quorum.
    pub slashing_percent: u8,

    pub voting_period_in_days: u64,
}

impl Default for DaoParams {
    fn default() -> Self {
        Self {
            name: "Moove DAO".to_string(),
            symbol: "MOV".to_string(),
            team_mint_supply: 1_000_000,
            cap: 5_000_000,
            older_users_mint_supply: 0,
            early_adopter_mint_supply: 100_000,
            older_users_addresses: Vec::new(),
            weeks_of_vesting: 12,
            token_price: EthAmount::from_milli_eth(1),
            minimum_token_staked_to_make_a_proposal: 5_000,
            minimum_circulating_supply_to_make_a_proposal_in_percent: 10,
            proposal_quorum_percent: 20,
            slashing_percent: 5,
            voting_period_in_days: 7,
        }
    }
}

impl DaoParams {
    /// Tokens minted at deployment to the team, older users and the early-adopter pool.
    pub fn total_initial_mint(&self) -> Option<u128> {
        self.team_mint_supply
            .checked_add(self.older_users_mint_supply)?
            .checked_add(self.early_adopter_mint_supply)
    }
}
