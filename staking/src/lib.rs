//! Staking ledger for the Moove DAO.
//!
//! Tracks each account's staked balance and an independent lock flag.
//! Staked tokens are held in the ledger's own custody on the token ledger.
//! Locking, unlocking and slashing are driven by the governance coordinator;
//! a locked stake cannot be withdrawn.

pub mod error;
pub mod ledger;
pub mod stake;

pub use error::StakingError;
pub use ledger::StakingLedger;
pub use stake::StakedBalance;
