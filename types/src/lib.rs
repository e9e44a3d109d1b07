//! Fundamental types for the Moove DAO.
//!
//! This crate defines the core types shared across every other crate in the workspace:
//! account addresses, ETH amounts, timestamps, the clock oracle, and the DAO
//! constructor parameters.

pub mod address;
pub mod amount;
pub mod error;
pub mod params;
pub mod time;
pub mod wide_int;

pub use address::Address;
pub use amount::EthAmount;
pub use error::TypesError;
pub use params::DaoParams;
pub use time::{Clock, SystemClock, Timestamp, SECONDS_PER_DAY, SECONDS_PER_WEEK};
