//! Nullable infrastructure for deterministic testing.
//!
//! The DAO reads time through the [`moove_types::Clock`] trait. This crate
//! provides a clock that only moves when a test tells it to, so voting windows
//! and vesting periods can be crossed without sleeping.

pub mod clock;

pub use clock::NullClock;
