//! Governance proposals and their lifecycle.

use moove_types::{Address, Timestamp};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A ballot choice. The numeric codes are the ones callers submit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VoteChoice {
    For = 0,
    Against = 1,
    Abstain = 2,
}

impl TryFrom<u8> for VoteChoice {
    type Error = u8;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::For),
            1 => Ok(Self::Against),
            2 => Ok(Self::Abstain),
            other => Err(other),
        }
    }
}

/// How a finalized proposal ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProposalOutcome {
    /// Quorum reached and more power for than against.
    Approved,
    /// Quorum reached, but against votes matched or beat for votes.
    Failed,
    /// Quorum not reached; the proposer was slashed.
    Refused,
}

/// Which path a ballot took into the tally.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BallotKind {
    /// Cast by the voter with its own stake.
    Direct,
    /// Cast by an applied delegatee with its own and its delegators' stake.
    AsDelegatee,
    /// Counted inside the named delegatee's ballot.
    ThroughDelegatee(Address),
}

/// One address's participation in a proposal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ballot {
    pub choice: VoteChoice,
    /// Stake counted for this address at the moment of the vote. For an
    /// `AsDelegatee` ballot this is the aggregated power.
    pub power: u128,
    pub kind: BallotKind,
}

/// A governance proposal.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Proposal {
    /// 1-based; zero is never a valid id.
    pub id: u64,
    pub proposer: Address,
    pub description: String,
    pub for_votes: u128,
    pub against_votes: u128,
    pub abstain_votes: u128,
    pub total_votes: u128,
    pub start_timestamp: Timestamp,
    pub end_voting_timestamp: Timestamp,
    pub quorum_reached: bool,
    pub is_finalized: bool,
    pub is_approved: bool,
    pub outcome: Option<ProposalOutcome>,
    pub(crate) ballots: HashMap<Address, Ballot>,
}

impl Proposal {
    pub(crate) fn new(
        id: u64,
        proposer: Address,
        description: String,
        start: Timestamp,
        voting_period_in_days: u64,
    ) -> Self {
        Self {
            id,
            proposer,
            description,
            for_votes: 0,
            against_votes: 0,
            abstain_votes: 0,
            total_votes: 0,
            start_timestamp: start,
            end_voting_timestamp: start.plus_days(voting_period_in_days),
            quorum_reached: false,
            is_finalized: false,
            is_approved: false,
            outcome: None,
            ballots: HashMap::new(),
        }
    }

    /// Voting is open up to and including the end timestamp.
    pub fn is_voting_open(&self, now: Timestamp) -> bool {
        now <= self.end_voting_timestamp
    }

    pub fn has_voted(&self, address: &Address) -> bool {
        self.ballots.contains_key(address)
    }

    pub fn ballot_of(&self, address: &Address) -> Option<&Ballot> {
        self.ballots.get(address)
    }

    pub fn voters(&self) -> impl Iterator<Item = (&Address, &Ballot)> {
        self.ballots.iter()
    }

    /// Add `power` to the tally for `choice`.
    pub(crate) fn tally(&mut self, choice: VoteChoice, power: u128) {
        match choice {
            VoteChoice::For => self.for_votes += power,
            VoteChoice::Against => self.against_votes += power,
            VoteChoice::Abstain => self.abstain_votes += power,
        }
        self.total_votes += power;
    }

    /// Whether `delegatee` cast a delegatee ballot here.
    pub(crate) fn voted_as_delegatee(&self, delegatee: &Address) -> bool {
        matches!(
            self.ballots.get(delegatee),
            Some(Ballot {
                kind: BallotKind::AsDelegatee,
                ..
            })
        )
    }

    /// Decide the outcome from the tallies and the circulating supply.
    pub(crate) fn resolve(&self, quorum_percent: u8, circulating: u128) -> (bool, ProposalOutcome) {
        let quorum_reached = self.total_votes.saturating_mul(100)
            >= u128::from(quorum_percent).saturating_mul(circulating);
        let outcome = if !quorum_reached {
            ProposalOutcome::Refused
        } else if self.against_votes >= self.for_votes {
            ProposalOutcome::Failed
        } else {
            ProposalOutcome::Approved
        };
        (quorum_reached, outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn proposal() -> Proposal {
        Proposal::new(
            1,
            Address::new("0xproposer"),
            "fund the bike lanes".into(),
            Timestamp::new(1_000),
            7,
        )
    }

    #[test]
    fn test_vote_choice_codes() {
        assert_eq!(VoteChoice::try_from(0), Ok(VoteChoice::For));
        assert_eq!(VoteChoice::try_from(1), Ok(VoteChoice::Against));
        assert_eq!(VoteChoice::try_from(2), Ok(VoteChoice::Abstain));
        assert_eq!(VoteChoice::try_from(3), Err(3));
        assert_eq!(VoteChoice::Abstain as u8, 2);
    }

    #[test]
    fn test_voting_window_is_inclusive() {
        let p = proposal();
        let end = Timestamp::new(1_000).plus_days(7);
        assert_eq!(p.end_voting_timestamp, end);
        assert!(p.is_voting_open(end));
        assert!(!p.is_voting_open(end.plus_secs(1)));
    }

    #[test]
    fn test_tally_and_resolve() {
        let mut p = proposal();
        p.tally(VoteChoice::For, 300);
        p.tally(VoteChoice::Against, 100);
        p.tally(VoteChoice::Abstain, 50);
        assert_eq!(p.total_votes, 450);

        // 450 * 100 >= 20 * 2_250
        assert_eq!(p.resolve(20, 2_250), (true, ProposalOutcome::Approved));
        assert_eq!(p.resolve(20, 2_251), (false, ProposalOutcome::Refused));
    }

    #[test]
    fn test_tie_fails() {
        let mut p = proposal();
        p.tally(VoteChoice::For, 100);
        p.tally(VoteChoice::Against, 100);
        assert_eq!(p.resolve(20, 1_000), (true, ProposalOutcome::Failed));
    }

    #[test]
    fn test_zero_quorum_with_no_votes() {
        let p = proposal();
        assert_eq!(p.resolve(0, 1_000), (true, ProposalOutcome::Failed));
    }
}
