//! Token ledger errors.

use moove_types::Address;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("token name and symbol must not be empty")]
    EmptyNameOrSymbol,

    #[error("cap must be greater than zero")]
    InvalidCap,

    #[error("max supply exceeded: requested {requested}, cap {cap}")]
    MaxSupplyExceeded { requested: u128, cap: u128 },

    #[error("older-users mint supply is non-zero but the older-users list is empty")]
    EmptyOlderUsersList,

    #[error("insufficient token balance: need {needed}, have {available}")]
    InsufficientBalance { needed: u128, available: u128 },

    #[error("amount must be non-zero")]
    ZeroAmount,

    #[error("caller {0} is not authorized for this operation")]
    NotAuthority(Address),

    #[error("address {0} is already registered for claims")]
    AlreadyRegistered(Address),

    #[error("vesting period is still active")]
    VestingActive,

    #[error("vesting period has not elapsed yet: {days_left} days left")]
    VestingNotElapsed { days_left: u64 },

    #[error("vesting period is already closed")]
    VestingAlreadyClosed,

    #[error("claim snapshot has already been taken")]
    SnapshotAlreadyTaken,

    #[error("claim snapshot has not been taken yet")]
    SnapshotMissing,

    #[error("address {0} is not eligible for a claim")]
    NotEligible(Address),

    #[error("address {0} has already claimed")]
    AlreadyClaimed(Address),

    #[error("send ETH to the governance contract at {dao} to buy tokens")]
    UseGovernanceToBuyTokens { dao: Address },

    #[error("arithmetic overflow in token accounting")]
    Overflow,
}
