//! The Moove governance token ledger.
//!
//! A capped-supply balance ledger. At deployment it mints:
//! - the team allocation to the team address
//! - an even split of the older-users allocation across the older-users list
//! - the early-adopter pool into the ledger's own custody
//! - the remainder of the cap to the coordinator (the issuing authority)
//!
//! The early-adopter pool is paid out once vesting closes, pro rata to the
//! balances of the addresses registered in the eligible-claims list at the
//! moment the claim snapshot is taken.

pub mod claims;
pub mod error;
pub mod ledger;

pub use claims::{ClaimRecord, EligibleClaimsList};
pub use error::TokenError;
pub use ledger::{TokenAccounts, TokenLedger};
