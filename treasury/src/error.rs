//! Treasury error types.

use moove_types::{Address, EthAmount};
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TreasuryError {
    #[error("caller {0} is not the DAO")]
    NotDao(Address),

    #[error("caller {0} is not the owner")]
    NotOwner(Address),

    #[error("amount must be greater than zero")]
    InvalidInputValue,

    #[error("cannot withdraw {requested}, balance is {balance}")]
    WithdrawExceedsBalance {
        requested: EthAmount,
        balance: EthAmount,
    },

    #[error("treasury is empty, nothing to withdraw")]
    NothingToWithdraw,

    #[error("send ETH to the governance contract at {dao} to buy tokens")]
    SendEthToGovernanceToBuyTokens { dao: Address },

    #[error("use the governance contract at {dao} to interact with the DAO")]
    UseGovernanceToInteract { dao: Address },

    #[error("treasury balance overflow")]
    Overflow,
}
