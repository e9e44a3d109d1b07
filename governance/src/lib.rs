//! The Moove DAO governance coordinator.
//!
//! Owns the proposal lifecycle, the delegation graph and voting-power
//! computation on top of the token ledger, the staking ledger and a treasury.
//!
//! - Proposals need a minimum stake and enough circulating supply; the
//!   proposer's stake is locked until the proposal is finalized.
//! - Votes are stake-weighted. A delegatee votes with its own stake plus
//!   that of its delegators.
//! - Finalization after the voting window checks quorum against circulating
//!   supply. Without quorum the proposer is slashed.
//! - Token sales and ETH deposits are routed to the treasury.
//!
//! All components are mutated as one unit; see [`SharedDao`].

pub mod config;
pub mod delegation;
pub mod engine;
pub mod error;
pub mod event;
pub mod locks;
pub mod params;
pub mod proposal;
pub mod shared;

pub use config::DaoConfig;
pub use delegation::DelegationRegistry;
pub use engine::{DaoAddresses, GovernanceDao};
pub use error::{ConfigError, GovernanceError};
pub use event::{DaoEvent, EventBus};
pub use locks::{LockReason, LockRegistry};
pub use params::validate_params;
pub use proposal::{Ballot, BallotKind, Proposal, ProposalOutcome, VoteChoice};
pub use shared::SharedDao;
