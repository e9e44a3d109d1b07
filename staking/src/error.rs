//! Staking-specific errors.

use moove_token::TokenError;
use moove_types::Address;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StakingError {
    #[error("amount must be non-zero")]
    ZeroAmount,

    #[error("insufficient token balance: need {needed}, have {available}")]
    InsufficientBalance { needed: u128, available: u128 },

    #[error("tokens of {0} are locked")]
    TokensLocked(Address),

    #[error("cannot unstake {requested}, only {staked} staked")]
    InsufficientStake { requested: u128, staked: u128 },

    #[error("{0} has no tokens to lock")]
    NoTokensToLock(Address),

    #[error("tokens of {0} are already locked")]
    AlreadyLocked(Address),

    #[error("{0} has no stake record")]
    NoStakeRecord(Address),

    #[error("caller {0} is not the governance authority")]
    NotAuthority(Address),

    #[error("use the governance contract at {dao} to interact with the DAO")]
    UseGovernanceToInteract { dao: Address },

    #[error("{0}")]
    Token(#[from] TokenError),
}
