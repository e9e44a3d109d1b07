use moove_staking::StakingError;
use moove_token::TokenError;
use moove_treasury::TreasuryError;
use moove_types::{Address, EthAmount};
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GovernanceError {
    #[error("invalid input value: {field}")]
    InvalidInputValue { field: &'static str },

    #[error("older-users mint supply is non-zero but the older-users list is empty")]
    OlderUsersListEmpty,

    #[error("caller {0} is not the owner")]
    NotOwner(Address),

    #[error("the DAO owner is not authorized to do this")]
    DAONotAuthorized,

    #[error("token trading is not allowed")]
    TradingNotAllowed,

    #[error("proposal description is empty")]
    DescriptionEmpty,

    #[error("{0} already has an active proposal")]
    AnotherProposalActive(Address),

    #[error("not enough tokens staked: {staked} < {minimum}")]
    NotEnoughStaked { staked: u128, minimum: u128 },

    #[error("not enough circulating supply: {circulating} < {required}")]
    NotEnoughCirculatingSupply { circulating: u128, required: u128 },

    #[error("proposal {0} does not exist")]
    InvalidId(u64),

    #[error("proposal {0} is out of its voting period")]
    OutOfVotingPeriod(u64),

    #[error("{voter} has already voted on proposal {id}")]
    VoteAlreadyRegistered { id: u64, voter: Address },

    #[error("proposal {0} is still in its voting period")]
    StillVoting(u64),

    #[error("proposal {0} is already finalized")]
    ProposalAlreadyFinalized(u64),

    #[error("{0} has an active proposal and cannot be a delegatee")]
    ProposerCannotBeDelegatee(Address),

    #[error("{0} cannot be both delegatee and delegator")]
    DelegateeCannotBeDelegator(Address),

    #[error("{0} is already a delegatee")]
    AlreadyDelegatee(Address),

    #[error("{0} is not an applied delegatee")]
    NotAppliedDelegatee(Address),

    #[error("delegatee {0} has voted on an active proposal")]
    DelegateeVotedActiveProposal(Address),

    #[error("{0} is already a delegator")]
    AlreadyDelegator(Address),

    #[error("{0} has no delegation")]
    NoDelegationFound(Address),

    #[error("{delegator} has not delegated to {delegatee}")]
    NoDelegationFoundOnThisDelegatee {
        delegator: Address,
        delegatee: Address,
    },

    #[error("{0} has no tokens staked")]
    NoTokensStaked(Address),

    #[error("{0} has delegated its voting power")]
    VotingPowerDelegated(Address),

    #[error("delegatee {0} must vote as delegatee")]
    DelegateeMustVoteAsDelegatee(Address),

    #[error("delegatee {0} cannot make a proposal")]
    DelegateeCannotPropose(Address),

    #[error("delegator {0} cannot make a proposal")]
    DelegatorCannotPropose(Address),

    #[error("{0} has an active proposal and cannot delegate")]
    ProposerCannotBeDelegator(Address),

    #[error("insufficient token supply: {requested} requested, {available} available")]
    InsufficientTokenSupply { requested: u128, available: u128 },

    #[error("insufficient ETH balance: {requested} requested, {available} available")]
    InsufficientEthBalance {
        requested: EthAmount,
        available: EthAmount,
    },

    #[error("plain ETH transfers are refused, use deposit_eth")]
    UseDepositFunction,

    #[error("no function matches the call data")]
    NoFunctionCalled,

    #[error("token ledger: {0}")]
    Token(#[from] TokenError),

    #[error("staking ledger: {0}")]
    Staking(#[from] StakingError),

    #[error("treasury: {0}")]
    Treasury(#[from] TreasuryError),
}

/// Errors loading or rendering a deployment config.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config io: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("config render: {0}")]
    Render(#[from] toml::ser::Error),
}
