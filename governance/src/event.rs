//! Events emitted by the coordinator for subscribers.

use crate::proposal::VoteChoice;
use moove_types::{Address, EthAmount, Timestamp};
use serde::{Deserialize, Serialize};

/// Coordinator-level events, recorded in order and fanned out via the [`EventBus`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DaoEvent {
    Deployed {
        dao: Address,
        token: Address,
        staking: Address,
        treasury: Address,
    },
    TokensPurchased {
        buyer: Address,
        tokens: u128,
        paid: EthAmount,
    },
    EthDeposited {
        from: Address,
        amount: EthAmount,
    },
    TreasuryFunded {
        amount: EthAmount,
    },
    TreasuryWithdrawal {
        recipient: Address,
        amount: EthAmount,
    },
    TradingStatusChanged {
        allowed: bool,
    },
    TokensLocked {
        account: Address,
        at: Timestamp,
    },
    TokensUnlocked {
        account: Address,
    },
    ProposalCreated {
        id: u64,
        proposer: Address,
        description: String,
        start: Timestamp,
        end: Timestamp,
    },
    DelegateeApplied {
        delegatee: Address,
    },
    DelegateeRemoved {
        delegatee: Address,
        released: Vec<Address>,
    },
    VoteDelegated {
        delegator: Address,
        delegatee: Address,
        power: u128,
    },
    VoteUndelegated {
        delegator: Address,
        delegatee: Address,
    },
    VoteCast {
        id: u64,
        voter: Address,
        choice: VoteChoice,
        power: u128,
    },
    DelegateeVoteCast {
        id: u64,
        delegatee: Address,
        choice: VoteChoice,
        power: u128,
        delegators: Vec<Address>,
    },
    ProposalApproved {
        id: u64,
    },
    ProposalFailed {
        id: u64,
    },
    ProposalRefused {
        id: u64,
        proposer: Address,
        slashed: u128,
    },
    VestingClosed {
        snapshot_total: u128,
    },
    VestingClaimed {
        claimer: Address,
        amount: u128,
    },
}

type Listener = Box<dyn Fn(&DaoEvent) + Send + Sync>;

/// Synchronous fan-out event bus that also keeps the full event log.
///
/// Listeners run inline on the emitting thread while the DAO is locked;
/// keep them fast.
pub struct EventBus {
    listeners: Vec<Listener>,
    log: Vec<DaoEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
            log: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, listener: Listener) {
        self.listeners.push(listener);
    }

    pub fn emit(&mut self, event: DaoEvent) {
        for listener in &self.listeners {
            listener(&event);
        }
        self.log.push(event);
    }

    pub fn log(&self) -> &[DaoEvent] {
        &self.log
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
