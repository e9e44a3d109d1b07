//! Core governance coordinator: proposals, stake-weighted votes, delegation,
//! quorum and slashing, plus the token sale and treasury routing.
//!
//! Every operation checks all of its preconditions before the first write,
//! so an `Err` leaves the DAO exactly as it was.

use crate::delegation::DelegationRegistry;
use crate::error::GovernanceError;
use crate::event::{DaoEvent, EventBus};
use crate::locks::{LockReason, LockRegistry};
use crate::params::validate_params;
use crate::proposal::{Ballot, BallotKind, Proposal, ProposalOutcome, VoteChoice};
use moove_staking::StakingLedger;
use moove_token::{TokenAccounts, TokenLedger};
use moove_treasury::{Payout, Treasury, TreasuryVault};
use moove_types::{Address, Clock, DaoParams, EthAmount, Timestamp};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

/// Addresses fixed at deployment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaoAddresses {
    /// The coordinator itself; the issuing authority for token and staking.
    pub dao: Address,
    /// The team. Governs trading, finalization and treasury withdrawals.
    pub owner: Address,
    pub token: Address,
    pub staking: Address,
    pub treasury: Address,
}

pub struct GovernanceDao {
    params: DaoParams,
    addresses: DaoAddresses,
    token: TokenLedger,
    staking: StakingLedger,
    treasury: Box<dyn Treasury>,
    clock: Arc<dyn Clock>,
    trading_allowed: bool,
    /// ETH held by the coordinator itself, outside the treasury.
    eth_balance: EthAmount,
    /// Index `i` holds proposal id `i + 1`.
    proposals: Vec<Proposal>,
    /// Proposer → its unfinalized proposal.
    active_proposals: HashMap<Address, u64>,
    delegation: DelegationRegistry,
    locks: LockRegistry,
    events: EventBus,
}

impl GovernanceDao {
    /// Validate the parameters and deploy the token ledger, staking ledger
    /// and the given treasury under this coordinator.
    pub fn deploy(
        params: DaoParams,
        addresses: DaoAddresses,
        treasury: Box<dyn Treasury>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, GovernanceError> {
        validate_params(&params)?;
        let now = clock.now();
        let token = TokenLedger::deploy(
            &params,
            TokenAccounts {
                ledger: addresses.token.clone(),
                authority: addresses.dao.clone(),
                team: addresses.owner.clone(),
            },
            now,
        )?;
        let staking = StakingLedger::new(
            addresses.staking.clone(),
            addresses.dao.clone(),
            params.slashing_percent,
        );

        let mut events = EventBus::new();
        events.emit(DaoEvent::Deployed {
            dao: addresses.dao.clone(),
            token: addresses.token.clone(),
            staking: addresses.staking.clone(),
            treasury: addresses.treasury.clone(),
        });
        tracing::info!(
            dao = %addresses.dao,
            owner = %addresses.owner,
            name = %params.name,
            symbol = %params.symbol,
            cap = params.cap,
            "governance DAO deployed"
        );

        Ok(Self {
            params,
            addresses,
            token,
            staking,
            treasury,
            clock,
            trading_allowed: false,
            eth_balance: EthAmount::ZERO,
            proposals: Vec::new(),
            active_proposals: HashMap::new(),
            delegation: DelegationRegistry::new(),
            locks: LockRegistry::new(),
            events,
        })
    }

    /// Deploy with a [`TreasuryVault`] owned by the team and operated by the DAO.
    pub fn deploy_with_vault(
        params: DaoParams,
        addresses: DaoAddresses,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, GovernanceError> {
        let vault = TreasuryVault::new(
            addresses.treasury.clone(),
            addresses.owner.clone(),
            addresses.dao.clone(),
        );
        Self::deploy(params, addresses, Box::new(vault), clock)
    }

    // ── Token sale and ETH routing ─────────────────────────────────────

    /// Sell `eth / token_price` tokens from the DAO's balance to `buyer`,
    /// forward the full ETH amount to the treasury and register the buyer
    /// for the early-adopter claim.
    pub fn buy_token(&mut self, buyer: &Address, eth: EthAmount) -> Result<u128, GovernanceError> {
        if !self.trading_allowed {
            return Err(GovernanceError::TradingNotAllowed);
        }
        let tokens = eth.wei() / self.params.token_price.wei();
        if tokens == 0 {
            return Err(GovernanceError::InvalidInputValue { field: "eth_amount" });
        }
        let available = self.token.balance_of(&self.addresses.dao);
        if available < tokens {
            return Err(GovernanceError::InsufficientTokenSupply {
                requested: tokens,
                available,
            });
        }

        let now = self.clock.now();
        self.treasury.deposit(&self.addresses.dao, eth, now)?;
        self.token
            .sending_token(&self.addresses.dao, buyer, tokens)?;
        if !self.token.eligible().contains(buyer) {
            self.token
                .update_eligible_addresses(&self.addresses.dao, buyer)?;
        }
        tracing::info!(%buyer, tokens, paid = %eth, "tokens purchased");
        self.events.emit(DaoEvent::TokensPurchased {
            buyer: buyer.clone(),
            tokens,
            paid: eth,
        });
        Ok(tokens)
    }

    pub fn deposit_eth(&mut self, sender: &Address, amount: EthAmount) -> Result<(), GovernanceError> {
        if amount.is_zero() {
            return Err(GovernanceError::InvalidInputValue { field: "amount" });
        }
        let now = self.clock.now();
        self.treasury.deposit(&self.addresses.dao, amount, now)?;
        tracing::info!(from = %sender, %amount, "ETH deposited to treasury");
        self.events.emit(DaoEvent::EthDeposited {
            from: sender.clone(),
            amount,
        });
        Ok(())
    }

    /// Credit ETH that reached the coordinator without going through any
    /// operation (a forced transfer).
    pub fn record_forced_eth(&mut self, amount: EthAmount) -> Result<(), GovernanceError> {
        self.eth_balance = self
            .eth_balance
            .checked_add(amount)
            .ok_or(GovernanceError::InvalidInputValue { field: "amount" })?;
        tracing::debug!(%amount, balance = %self.eth_balance, "forced ETH recorded");
        Ok(())
    }

    /// Move ETH held by the coordinator itself into the treasury. Owner only.
    pub fn send_eth_to_treasury_as_owner(
        &mut self,
        caller: &Address,
        amount: EthAmount,
    ) -> Result<(), GovernanceError> {
        self.ensure_owner(caller)?;
        if amount.is_zero() {
            return Err(GovernanceError::InvalidInputValue { field: "amount" });
        }
        let remaining = self.eth_balance.checked_sub(amount).ok_or(
            GovernanceError::InsufficientEthBalance {
                requested: amount,
                available: self.eth_balance,
            },
        )?;
        let now = self.clock.now();
        self.treasury.deposit(&self.addresses.dao, amount, now)?;
        self.eth_balance = remaining;
        tracing::info!(%amount, "coordinator ETH sent to treasury");
        self.events.emit(DaoEvent::TreasuryFunded { amount });
        Ok(())
    }

    /// Pay `amount` out of the treasury. Owner only.
    pub fn withdraw_from_treasury(
        &mut self,
        caller: &Address,
        amount: EthAmount,
        recipient: &Address,
    ) -> Result<Payout, GovernanceError> {
        self.ensure_owner(caller)?;
        let now = self.clock.now();
        let payout = self
            .treasury
            .withdraw(&self.addresses.dao, amount, recipient, now)?;
        tracing::info!(%recipient, %amount, "treasury withdrawal");
        self.events.emit(DaoEvent::TreasuryWithdrawal {
            recipient: recipient.clone(),
            amount,
        });
        Ok(payout)
    }

    /// Toggle token trading. Owner only. Returns the new status.
    pub fn change_trading_status(&mut self, caller: &Address) -> Result<bool, GovernanceError> {
        self.ensure_owner(caller)?;
        self.trading_allowed = !self.trading_allowed;
        tracing::info!(allowed = self.trading_allowed, "trading status changed");
        self.events.emit(DaoEvent::TradingStatusChanged {
            allowed: self.trading_allowed,
        });
        Ok(self.trading_allowed)
    }

    /// Plain ETH sent without calling `deposit_eth`.
    pub fn receive_eth(&self, _sender: &Address, _amount: EthAmount) -> Result<(), GovernanceError> {
        Err(GovernanceError::UseDepositFunction)
    }

    /// A call whose data matches no operation.
    pub fn fallback(&self, _data: &[u8]) -> Result<(), GovernanceError> {
        Err(GovernanceError::NoFunctionCalled)
    }

    // ── Token and staking entry points ─────────────────────────────────

    pub fn transfer_tokens(
        &mut self,
        from: &Address,
        to: &Address,
        amount: u128,
    ) -> Result<(), GovernanceError> {
        if self.is_custody(from) {
            return Err(GovernanceError::DAONotAuthorized);
        }
        self.token.transfer(from, to, amount)?;
        Ok(())
    }

    /// Stake tokens. Returns the new staked total.
    pub fn stake(&mut self, account: &Address, amount: u128) -> Result<u128, GovernanceError> {
        if self.is_custody(account) {
            return Err(GovernanceError::DAONotAuthorized);
        }
        Ok(self.staking.stake(&mut self.token, account, amount)?)
    }

    /// Unstake tokens. Returns what is left staked.
    pub fn unstake(&mut self, account: &Address, amount: u128) -> Result<u128, GovernanceError> {
        Ok(self.staking.unstake(&mut self.token, account, amount)?)
    }

    /// Grant early-adopter eligibility outside a purchase. Owner only.
    pub fn register_eligible(
        &mut self,
        caller: &Address,
        address: &Address,
    ) -> Result<(), GovernanceError> {
        self.ensure_owner(caller)?;
        self.token
            .update_eligible_addresses(&self.addresses.dao, address)?;
        Ok(())
    }

    /// Close vesting and take the claim snapshot in one step. Owner only.
    /// Returns the summed snapshot balance.
    pub fn close_vesting_period(&mut self, caller: &Address) -> Result<u128, GovernanceError> {
        self.ensure_owner(caller)?;
        let now = self.clock.now();
        self.token
            .change_vesting_period_status(&self.addresses.dao, now)?;
        let snapshot_total = self.token.snapshot_claims_balance(&self.addresses.dao)?;
        self.events.emit(DaoEvent::VestingClosed { snapshot_total });
        Ok(snapshot_total)
    }

    pub fn claim_vesting_tokens(&mut self, caller: &Address) -> Result<u128, GovernanceError> {
        let amount = self.token.vesting_token_claims(caller)?;
        self.events.emit(DaoEvent::VestingClaimed {
            claimer: caller.clone(),
            amount,
        });
        Ok(amount)
    }

    // ── Proposals ──────────────────────────────────────────────────────

    /// Open a proposal and lock the proposer's stake. Returns its id.
    pub fn make_proposal(
        &mut self,
        caller: &Address,
        description: &str,
    ) -> Result<u64, GovernanceError> {
        if caller == &self.addresses.owner || self.is_custody(caller) {
            return Err(GovernanceError::DAONotAuthorized);
        }
        if description.trim().is_empty() {
            return Err(GovernanceError::DescriptionEmpty);
        }
        if self.active_proposals.contains_key(caller) {
            return Err(GovernanceError::AnotherProposalActive(caller.clone()));
        }
        if self.delegation.is_delegatee(caller) {
            return Err(GovernanceError::DelegateeCannotPropose(caller.clone()));
        }
        if self.delegation.is_delegator(caller) {
            return Err(GovernanceError::DelegatorCannotPropose(caller.clone()));
        }
        let staked = self.staking.get_user_staked_tokens(caller);
        let minimum = self.params.minimum_token_staked_to_make_a_proposal;
        if staked < minimum {
            return Err(GovernanceError::NotEnoughStaked { staked, minimum });
        }
        let total = self.token.total_supply();
        let percent =
            u128::from(self.params.minimum_circulating_supply_to_make_a_proposal_in_percent);
        let circulating = self.circulating_supply();
        if circulating.saturating_mul(100) < percent.saturating_mul(total) {
            return Err(GovernanceError::NotEnoughCirculatingSupply {
                circulating,
                required: percent.saturating_mul(total).div_ceil(100),
            });
        }

        let now = self.clock.now();
        let id = self.proposals.len() as u64 + 1;
        self.lock_for(caller, LockReason::Proposer(id), now)?;
        let proposal = Proposal::new(
            id,
            caller.clone(),
            description.to_string(),
            now,
            self.params.voting_period_in_days,
        );
        let end = proposal.end_voting_timestamp;
        self.proposals.push(proposal);
        self.active_proposals.insert(caller.clone(), id);

        tracing::info!(proposal_id = id, proposer = %caller, start = %now, end = %end, "proposal created");
        self.events.emit(DaoEvent::ProposalCreated {
            id,
            proposer: caller.clone(),
            description: description.to_string(),
            start: now,
            end,
        });
        Ok(id)
    }

    /// Vote with the caller's own stake. Returns the power counted.
    pub fn vote_on_proposal(
        &mut self,
        caller: &Address,
        id: u64,
        choice: VoteChoice,
    ) -> Result<u128, GovernanceError> {
        let now = self.clock.now();
        let proposal = self.proposal(id)?;
        if !proposal.is_voting_open(now) {
            return Err(GovernanceError::OutOfVotingPeriod(id));
        }
        if proposal.has_voted(caller) {
            return Err(GovernanceError::VoteAlreadyRegistered {
                id,
                voter: caller.clone(),
            });
        }
        if self.delegation.is_delegator(caller) {
            return Err(GovernanceError::VotingPowerDelegated(caller.clone()));
        }
        if self.delegation.is_delegatee(caller) {
            return Err(GovernanceError::DelegateeMustVoteAsDelegatee(caller.clone()));
        }
        let power = self.staking.get_user_staked_tokens(caller);
        if power == 0 {
            return Err(GovernanceError::NoTokensStaked(caller.clone()));
        }

        self.lock_for(caller, LockReason::Voted(id), now)?;
        let proposal = self.proposal_mut(id)?;
        proposal.tally(choice, power);
        proposal.ballots.insert(
            caller.clone(),
            Ballot {
                choice,
                power,
                kind: BallotKind::Direct,
            },
        );

        tracing::info!(proposal_id = id, voter = %caller, ?choice, power, "vote cast");
        self.events.emit(DaoEvent::VoteCast {
            id,
            voter: caller.clone(),
            choice,
            power,
        });
        Ok(power)
    }

    /// Vote as an applied delegatee with its own stake plus the stake of
    /// every delegator that has not already voted here. Returns the power.
    pub fn delegatee_vote_on_proposal(
        &mut self,
        caller: &Address,
        id: u64,
        choice: VoteChoice,
    ) -> Result<u128, GovernanceError> {
        let now = self.clock.now();
        let proposal = self.proposal(id)?;
        if !proposal.is_voting_open(now) {
            return Err(GovernanceError::OutOfVotingPeriod(id));
        }
        if !self.delegation.is_delegatee(caller) {
            return Err(GovernanceError::NotAppliedDelegatee(caller.clone()));
        }
        if proposal.has_voted(caller) {
            return Err(GovernanceError::VoteAlreadyRegistered {
                id,
                voter: caller.clone(),
            });
        }
        let counted: Vec<(Address, u128)> = self
            .delegation
            .delegators_of(caller)
            .iter()
            .filter(|d| !proposal.has_voted(d))
            .map(|d| (d.clone(), self.staking.get_user_staked_tokens(d)))
            .collect();
        let power = counted
            .iter()
            .fold(self.staking.get_user_staked_tokens(caller), |acc, (_, s)| {
                acc + s
            });
        if power == 0 {
            return Err(GovernanceError::NoTokensStaked(caller.clone()));
        }

        let proposal = self.proposal_mut(id)?;
        proposal.tally(choice, power);
        proposal.ballots.insert(
            caller.clone(),
            Ballot {
                choice,
                power,
                kind: BallotKind::AsDelegatee,
            },
        );
        for (delegator, stake) in &counted {
            proposal.ballots.insert(
                delegator.clone(),
                Ballot {
                    choice,
                    power: *stake,
                    kind: BallotKind::ThroughDelegatee(caller.clone()),
                },
            );
        }

        let delegators: Vec<Address> = counted.into_iter().map(|(d, _)| d).collect();
        tracing::info!(
            proposal_id = id,
            delegatee = %caller,
            ?choice,
            power,
            delegators = delegators.len(),
            "delegatee vote cast"
        );
        self.events.emit(DaoEvent::DelegateeVoteCast {
            id,
            delegatee: caller.clone(),
            choice,
            power,
            delegators,
        });
        Ok(power)
    }

    /// Close a proposal after its voting window. Owner only.
    ///
    /// Without quorum the proposer is slashed and the slashed tokens move to
    /// the coordinator. Every branch releases the proposer and direct voters.
    pub fn finalize_proposal(
        &mut self,
        caller: &Address,
        id: u64,
    ) -> Result<ProposalOutcome, GovernanceError> {
        self.ensure_owner(caller)?;
        let now = self.clock.now();
        let proposal = self.proposal(id)?;
        if proposal.is_finalized {
            return Err(GovernanceError::ProposalAlreadyFinalized(id));
        }
        if proposal.is_voting_open(now) {
            return Err(GovernanceError::StillVoting(id));
        }
        let circulating = self.circulating_supply();
        let (quorum_reached, outcome) =
            proposal.resolve(self.params.proposal_quorum_percent, circulating);
        let proposer = proposal.proposer.clone();
        let direct_voters: Vec<Address> = proposal
            .voters()
            .filter(|(_, b)| b.kind == BallotKind::Direct)
            .map(|(a, _)| a.clone())
            .collect();

        let mut slashed = 0;
        if outcome == ProposalOutcome::Refused {
            slashed = self.staking.slash(&self.addresses.dao, &proposer)?;
            if slashed > 0 {
                self.token
                    .transfer(&self.addresses.staking, &self.addresses.dao, slashed)?;
            }
        }
        self.unlock_for(&proposer, LockReason::Proposer(id))?;
        for voter in &direct_voters {
            self.unlock_for(voter, LockReason::Voted(id))?;
        }

        let proposal = self.proposal_mut(id)?;
        proposal.quorum_reached = quorum_reached;
        proposal.is_finalized = true;
        proposal.is_approved = outcome == ProposalOutcome::Approved;
        proposal.outcome = Some(outcome);
        let (for_votes, against_votes, total_votes) =
            (proposal.for_votes, proposal.against_votes, proposal.total_votes);
        self.active_proposals.remove(&proposer);

        tracing::info!(
            proposal_id = id,
            ?outcome,
            for_votes,
            against_votes,
            total_votes,
            circulating,
            "proposal finalized"
        );
        self.events.emit(match outcome {
            ProposalOutcome::Approved => DaoEvent::ProposalApproved { id },
            ProposalOutcome::Failed => DaoEvent::ProposalFailed { id },
            ProposalOutcome::Refused => {
                tracing::warn!(proposal_id = id, %proposer, slashed, "quorum not reached, proposer slashed");
                DaoEvent::ProposalRefused {
                    id,
                    proposer,
                    slashed,
                }
            }
        });
        Ok(outcome)
    }

    // ── Delegation ─────────────────────────────────────────────────────

    pub fn apply_for_delegatee(&mut self, caller: &Address) -> Result<(), GovernanceError> {
        if self.active_proposals.contains_key(caller) {
            return Err(GovernanceError::ProposerCannotBeDelegatee(caller.clone()));
        }
        if self.delegation.is_delegator(caller) {
            return Err(GovernanceError::DelegateeCannotBeDelegator(caller.clone()));
        }
        if self.delegation.is_delegatee(caller) {
            return Err(GovernanceError::AlreadyDelegatee(caller.clone()));
        }
        if self.staking.get_user_staked_tokens(caller) == 0 {
            return Err(GovernanceError::NoTokensStaked(caller.clone()));
        }

        let now = self.clock.now();
        self.lock_for(caller, LockReason::Delegatee, now)?;
        self.delegation.add_delegatee(caller.clone());
        tracing::info!(delegatee = %caller, "delegatee applied");
        self.events.emit(DaoEvent::DelegateeApplied {
            delegatee: caller.clone(),
        });
        Ok(())
    }

    /// Withdraw as delegatee, releasing every delegator.
    pub fn reject_for_delegatee(&mut self, caller: &Address) -> Result<(), GovernanceError> {
        if !self.delegation.is_delegatee(caller) {
            return Err(GovernanceError::NotAppliedDelegatee(caller.clone()));
        }
        if self.voted_on_active_proposal(caller) {
            return Err(GovernanceError::DelegateeVotedActiveProposal(caller.clone()));
        }

        let released = self.delegation.remove_delegatee(caller);
        self.unlock_for(caller, LockReason::Delegatee)?;
        for delegator in &released {
            self.unlock_for(delegator, LockReason::Delegator)?;
        }
        tracing::info!(delegatee = %caller, released = released.len(), "delegatee removed");
        self.events.emit(DaoEvent::DelegateeRemoved {
            delegatee: caller.clone(),
            released,
        });
        Ok(())
    }

    /// Delegate the caller's stake to `delegatee`. Returns the delegated power.
    pub fn delegate_vote(
        &mut self,
        caller: &Address,
        delegatee: &Address,
    ) -> Result<u128, GovernanceError> {
        if self.delegation.is_delegator(caller) {
            return Err(GovernanceError::AlreadyDelegator(caller.clone()));
        }
        if self.delegation.is_delegatee(caller) {
            return Err(GovernanceError::DelegateeCannotBeDelegator(caller.clone()));
        }
        if self.active_proposals.contains_key(caller) {
            return Err(GovernanceError::ProposerCannotBeDelegator(caller.clone()));
        }
        if !self.delegation.is_delegatee(delegatee) {
            return Err(GovernanceError::NotAppliedDelegatee(delegatee.clone()));
        }
        let power = self.staking.get_user_staked_tokens(caller);
        if power == 0 {
            return Err(GovernanceError::NoTokensStaked(caller.clone()));
        }

        let now = self.clock.now();
        self.lock_for(caller, LockReason::Delegator, now)?;
        self.delegation.delegate(caller, delegatee);
        tracing::info!(delegator = %caller, %delegatee, power, "vote delegated");
        self.events.emit(DaoEvent::VoteDelegated {
            delegator: caller.clone(),
            delegatee: delegatee.clone(),
            power,
        });
        Ok(power)
    }

    pub fn undelegate_vote(
        &mut self,
        caller: &Address,
        delegatee: &Address,
    ) -> Result<(), GovernanceError> {
        let recorded = self
            .delegation
            .delegation_of(caller)
            .ok_or_else(|| GovernanceError::NoDelegationFound(caller.clone()))?;
        if recorded != delegatee {
            return Err(GovernanceError::NoDelegationFoundOnThisDelegatee {
                delegator: caller.clone(),
                delegatee: delegatee.clone(),
            });
        }
        if self.voted_on_active_proposal(delegatee) {
            return Err(GovernanceError::DelegateeVotedActiveProposal(delegatee.clone()));
        }

        self.delegation.undelegate(caller);
        self.unlock_for(caller, LockReason::Delegator)?;
        tracing::info!(delegator = %caller, %delegatee, "vote undelegated");
        self.events.emit(DaoEvent::VoteUndelegated {
            delegator: caller.clone(),
            delegatee: delegatee.clone(),
        });
        Ok(())
    }

    // ── Reads ──────────────────────────────────────────────────────────

    pub fn get_proposal_by_id(&self, id: u64) -> Result<&Proposal, GovernanceError> {
        self.proposal(id)
    }

    /// Whether voting on `id` is still open at the current clock time.
    pub fn get_vote_period_active(&self, id: u64) -> Result<bool, GovernanceError> {
        Ok(self.proposal(id)?.is_voting_open(self.clock.now()))
    }

    pub fn check_if_delegator(&self, address: &Address) -> bool {
        self.delegation.is_delegator(address)
    }

    pub fn check_if_delegatee(&self, address: &Address) -> bool {
        self.delegation.is_delegatee(address)
    }

    /// `(true, index)` if `address` is in `delegatee`'s delegator list,
    /// `(false, 0)` otherwise.
    pub fn is_sender_in_delegators(&self, delegatee: &Address, address: &Address) -> (bool, usize) {
        match self.delegation.position_in_delegators(delegatee, address) {
            Some(index) => (true, index),
            None => (false, 0),
        }
    }

    pub fn check_vote_by_id(&self, id: u64, address: &Address) -> Result<bool, GovernanceError> {
        Ok(self.proposal(id)?.has_voted(address))
    }

    /// Power recorded for `address` on `id`; zero if it did not take part.
    pub fn get_voting_power_of_address_by_id(
        &self,
        id: u64,
        address: &Address,
    ) -> Result<u128, GovernanceError> {
        Ok(self
            .proposal(id)?
            .ballot_of(address)
            .map(|b| b.power)
            .unwrap_or(0))
    }

    pub fn proposal_count(&self) -> u64 {
        self.proposals.len() as u64
    }

    pub fn delegatees(&self) -> &[Address] {
        self.delegation.delegatees()
    }

    pub fn delegators_of(&self, delegatee: &Address) -> &[Address] {
        self.delegation.delegators_of(delegatee)
    }

    pub fn delegation_of(&self, delegator: &Address) -> Option<&Address> {
        self.delegation.delegation_of(delegator)
    }

    pub fn delegation(&self) -> &DelegationRegistry {
        &self.delegation
    }

    pub fn active_proposal_of(&self, proposer: &Address) -> Option<u64> {
        self.active_proposals.get(proposer).copied()
    }

    pub fn lock_reasons(&self, address: &Address) -> Vec<LockReason> {
        self.locks.reasons_of(address)
    }

    /// Total supply minus what the token ledger and the coordinator hold.
    pub fn circulating_supply(&self) -> u128 {
        self.token
            .total_supply()
            .saturating_sub(self.token.balance_of(&self.addresses.token))
            .saturating_sub(self.token.balance_of(&self.addresses.dao))
    }

    pub fn is_trading_allowed(&self) -> bool {
        self.trading_allowed
    }

    pub fn eth_balance(&self) -> EthAmount {
        self.eth_balance
    }

    pub fn treasury_balance(&self) -> EthAmount {
        self.treasury.get_balance()
    }

    pub fn token(&self) -> &TokenLedger {
        &self.token
    }

    pub fn staking(&self) -> &StakingLedger {
        &self.staking
    }

    pub fn params(&self) -> &DaoParams {
        &self.params
    }

    pub fn addresses(&self) -> &DaoAddresses {
        &self.addresses
    }

    pub fn now(&self) -> Timestamp {
        self.clock.now()
    }

    pub fn events(&self) -> &[DaoEvent] {
        self.events.log()
    }

    pub fn subscribe(&mut self, listener: Box<dyn Fn(&DaoEvent) + Send + Sync>) {
        self.events.subscribe(listener);
    }

    // ── Internals ──────────────────────────────────────────────────────

    fn ensure_owner(&self, caller: &Address) -> Result<(), GovernanceError> {
        if caller != &self.addresses.owner {
            return Err(GovernanceError::NotOwner(caller.clone()));
        }
        Ok(())
    }

    /// The coordinator and the two ledgers never act as users.
    fn is_custody(&self, address: &Address) -> bool {
        address == &self.addresses.dao
            || address == &self.addresses.token
            || address == &self.addresses.staking
    }

    fn proposal(&self, id: u64) -> Result<&Proposal, GovernanceError> {
        id.checked_sub(1)
            .and_then(|i| self.proposals.get(i as usize))
            .ok_or(GovernanceError::InvalidId(id))
    }

    fn proposal_mut(&mut self, id: u64) -> Result<&mut Proposal, GovernanceError> {
        id.checked_sub(1)
            .and_then(|i| self.proposals.get_mut(i as usize))
            .ok_or(GovernanceError::InvalidId(id))
    }

    fn voted_on_active_proposal(&self, delegatee: &Address) -> bool {
        self.proposals
            .iter()
            .filter(|p| !p.is_finalized)
            .any(|p| p.voted_as_delegatee(delegatee))
    }

    /// Add a lock reason, locking the stake if it is the first one.
    fn lock_for(
        &mut self,
        account: &Address,
        reason: LockReason,
        now: Timestamp,
    ) -> Result<(), GovernanceError> {
        if self.locks.acquire(account, reason) {
            if let Err(e) = self.staking.lock(&self.addresses.dao, account, now) {
                self.locks.release(account, reason);
                return Err(e.into());
            }
            self.events.emit(DaoEvent::TokensLocked {
                account: account.clone(),
                at: now,
            });
        }
        Ok(())
    }

    /// Drop a lock reason, unlocking the stake if it was the last one.
    fn unlock_for(&mut self, account: &Address, reason: LockReason) -> Result<(), GovernanceError> {
        if self.locks.release(account, reason) {
            self.staking.unlock(&self.addresses.dao, account)?;
            self.events.emit(DaoEvent::TokensUnlocked {
                account: account.clone(),
            });
        }
        Ok(())
    }
}
