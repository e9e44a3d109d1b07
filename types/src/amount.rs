//! ETH amounts.
//!
//! Amounts are represented as integer wei (u128) to avoid floating-point errors.
//! Governance token amounts are plain raw `u128` units and have no wrapper.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

/// Wei per ETH.
pub const WEI_PER_ETH: u128 = 1_000_000_000_000_000_000;

/// An amount of ETH, stored as wei.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct EthAmount(#[serde(with = "crate::wide_int")] u128);

impl EthAmount {
    pub const ZERO: Self = Self(0);

    /// Construct from raw wei.
    pub fn from_wei(wei: u128) -> Self {
        Self(wei)
    }

    /// Whole ETH.
    pub fn from_eth(eth: u128) -> Self {
        Self(eth.saturating_mul(WEI_PER_ETH))
    }

    /// Thousandths of an ETH (`from_milli_eth(1)` is 0.001 ETH).
    pub fn from_milli_eth(milli: u128) -> Self {
        Self(milli.saturating_mul(WEI_PER_ETH / 1_000))
    }

    pub fn wei(&self) -> u128 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }

    pub fn saturating_sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl Add for EthAmount {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub for EthAmount {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl fmt::Display for EthAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} wei", self.0)
    }
}
