//! The Moove DAO treasury.
//!
//! Holds the ETH raised by token sales and deposits. Only the governance
//! coordinator may move funds in or out; the owner keeps an emergency exit
//! that drains the vault to the owner address.

pub mod error;
pub mod vault;

pub use error::TreasuryError;
pub use vault::{Payout, Treasury, TreasuryEntry, TreasuryVault};
