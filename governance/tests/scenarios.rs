//! End-to-end DAO scenarios driven through the public API with a null clock.

use std::sync::Arc;

use moove_governance::{
    DaoAddresses, DaoEvent, GovernanceDao, GovernanceError, ProposalOutcome, SharedDao, VoteChoice,
};
use moove_nullables::NullClock;
use moove_types::{Address, DaoParams, EthAmount};

fn addr(name: &str) -> Address {
    Address::new(format!("0x{name}"))
}

fn team() -> Address {
    addr("team")
}

fn older_users() -> Vec<Address> {
    (0..10).map(|i| addr(&format!("older{i}"))).collect()
}

fn params() -> DaoParams {
    DaoParams {
        name: "MooveToken".into(),
        symbol: "MOV".into(),
        cap: 10_000_000,
        team_mint_supply: 4_000_000,
        older_users_mint_supply: 1_000_000,
        early_adopter_mint_supply: 1_000_000,
        older_users_addresses: older_users(),
        weeks_of_vesting: 4,
        token_price: EthAmount::from_milli_eth(1),
        minimum_token_staked_to_make_a_proposal: 5_000,
        minimum_circulating_supply_to_make_a_proposal_in_percent: 10,
        proposal_quorum_percent: 20,
        slashing_percent: 10,
        voting_period_in_days: 14,
    }
}

fn deploy() -> (GovernanceDao, Arc<NullClock>) {
    let clock = Arc::new(NullClock::new(1_700_000_000));
    let addresses = DaoAddresses {
        dao: addr("dao"),
        owner: team(),
        token: addr("token"),
        staking: addr("staking"),
        treasury: addr("treasury"),
    };
    let dao = GovernanceDao::deploy_with_vault(params(), addresses, clock.clone()).unwrap();
    (dao, clock)
}

fn give_and_stake(dao: &mut GovernanceDao, who: &Address, amount: u128) {
    dao.transfer_tokens(&team(), who, amount).unwrap();
    dao.stake(who, amount).unwrap();
}

#[test]
fn initial_distribution_matches_parameters() {
    let (dao, _) = deploy();
    let token = dao.token();
    assert_eq!(token.balance_of(&team()), 4_000_000);
    for older in older_users() {
        assert_eq!(token.balance_of(&older), 100_000);
    }
    assert_eq!(token.balance_of(&addr("token")), 1_000_000);
    assert_eq!(token.balance_of(&addr("dao")), 4_000_000);
    assert_eq!(token.total_supply(), token.get_cap());
    assert_eq!(dao.circulating_supply(), 5_000_000);
}

#[test]
fn buying_tokens_funds_treasury_and_registers_buyer() {
    let (mut dao, _) = deploy();
    let buyer = addr("buyer");
    dao.change_trading_status(&team()).unwrap();

    assert_eq!(dao.buy_token(&buyer, EthAmount::from_eth(1)), Ok(1_000));
    assert_eq!(dao.token().balance_of(&buyer), 1_000);
    assert_eq!(dao.treasury_balance(), EthAmount::from_eth(1));
    assert!(dao.token().eligible().contains(&buyer));
    assert!(dao.events().contains(&DaoEvent::TokensPurchased {
        buyer,
        tokens: 1_000,
        paid: EthAmount::from_eth(1),
    }));
}

#[test]
fn proposal_without_quorum_is_refused_and_slashed() {
    let (mut dao, clock) = deploy();
    let proposer = addr("proposer");
    let (v1, v2) = (addr("voter1"), addr("voter2"));
    give_and_stake(&mut dao, &proposer, 5_000);
    give_and_stake(&mut dao, &v1, 100_000);
    give_and_stake(&mut dao, &v2, 200_000);

    let id = dao.make_proposal(&proposer, "Plant trees along the river").unwrap();
    dao.vote_on_proposal(&v1, id, VoteChoice::For).unwrap();
    dao.vote_on_proposal(&v2, id, VoteChoice::For).unwrap();

    clock.advance_days(14);
    assert_eq!(
        dao.finalize_proposal(&team(), id),
        Err(GovernanceError::StillVoting(id))
    );
    clock.advance(1);
    assert_eq!(dao.finalize_proposal(&team(), id), Ok(ProposalOutcome::Refused));

    assert_eq!(dao.staking().get_user_staked_tokens(&proposer), 4_500);
    assert!(!dao.staking().is_locked(&proposer));
    let proposal = dao.get_proposal_by_id(id).unwrap();
    assert!(proposal.is_finalized);
    assert!(!proposal.quorum_reached);
    assert!(!proposal.is_approved);
    assert_eq!(proposal.outcome, Some(ProposalOutcome::Refused));
    assert!(dao.events().contains(&DaoEvent::ProposalRefused {
        id,
        proposer: proposer.clone(),
        slashed: 500,
    }));

    // Free to propose again once the first one is closed.
    assert_eq!(dao.make_proposal(&proposer, "Second try"), Err(GovernanceError::NotEnoughStaked {
        staked: 4_500,
        minimum: 5_000,
    }));
}

#[test]
fn proposal_with_quorum_and_majority_is_approved() {
    let (mut dao, clock) = deploy();
    let proposer = addr("proposer");
    let (v1, v2, v3) = (addr("voter1"), addr("voter2"), addr("voter3"));
    give_and_stake(&mut dao, &proposer, 5_000);
    give_and_stake(&mut dao, &v1, 600_000);
    give_and_stake(&mut dao, &v2, 500_000);
    give_and_stake(&mut dao, &v3, 300_000);

    let id = dao.make_proposal(&proposer, "Fund the bike lanes").unwrap();
    dao.vote_on_proposal(&v1, id, VoteChoice::For).unwrap();
    dao.vote_on_proposal(&v2, id, VoteChoice::For).unwrap();
    dao.vote_on_proposal(&v3, id, VoteChoice::Against).unwrap();

    clock.advance_days(15);
    assert_eq!(dao.finalize_proposal(&team(), id), Ok(ProposalOutcome::Approved));
    assert_eq!(dao.staking().get_user_staked_tokens(&proposer), 5_000);
    assert!(!dao.staking().is_locked(&proposer));
    let proposal = dao.get_proposal_by_id(id).unwrap();
    assert!(proposal.quorum_reached && proposal.is_approved);
    assert_eq!(proposal.total_votes, 1_400_000);
    assert_eq!(
        dao.finalize_proposal(&team(), id),
        Err(GovernanceError::ProposalAlreadyFinalized(id))
    );
}

#[test]
fn quorate_proposal_with_more_against_fails_without_slash() {
    let (mut dao, clock) = deploy();
    let proposer = addr("proposer");
    let (v1, v2) = (addr("voter1"), addr("voter2"));
    give_and_stake(&mut dao, &proposer, 5_000);
    give_and_stake(&mut dao, &v1, 600_000);
    give_and_stake(&mut dao, &v2, 600_000);

    let id = dao.make_proposal(&proposer, "Rename the token").unwrap();
    dao.vote_on_proposal(&v1, id, VoteChoice::For).unwrap();
    dao.vote_on_proposal(&v2, id, VoteChoice::Against).unwrap();

    clock.advance_days(15);
    assert_eq!(dao.finalize_proposal(&team(), id), Ok(ProposalOutcome::Failed));
    assert_eq!(dao.staking().get_user_staked_tokens(&proposer), 5_000);
    assert_eq!(dao.active_proposal_of(&proposer), None);
}

#[test]
fn delegated_power_is_fixed_at_vote_time() {
    let (mut dao, clock) = deploy();
    let proposer = addr("proposer");
    let (delegatee, d1, d2) = (addr("delegatee"), addr("d1"), addr("d2"));
    give_and_stake(&mut dao, &proposer, 5_000);
    give_and_stake(&mut dao, &delegatee, 400_000);
    give_and_stake(&mut dao, &d1, 400_000);
    give_and_stake(&mut dao, &d2, 300_000);

    dao.apply_for_delegatee(&delegatee).unwrap();
    dao.delegate_vote(&d1, &delegatee).unwrap();
    dao.delegate_vote(&d2, &delegatee).unwrap();

    let id = dao.make_proposal(&proposer, "Delegated decision").unwrap();
    assert_eq!(
        dao.delegatee_vote_on_proposal(&delegatee, id, VoteChoice::For),
        Ok(1_100_000)
    );

    // Topping up the stake afterwards changes nothing already recorded.
    dao.transfer_tokens(&team(), &d1, 50_000).unwrap();
    dao.stake(&d1, 50_000).unwrap();
    assert_eq!(dao.get_voting_power_of_address_by_id(id, &d1), Ok(400_000));
    assert_eq!(dao.get_proposal_by_id(id).unwrap().for_votes, 1_100_000);
    assert_eq!(
        dao.vote_on_proposal(&d1, id, VoteChoice::Against),
        Err(GovernanceError::VoteAlreadyRegistered { id, voter: d1.clone() })
    );

    clock.advance_days(15);
    assert_eq!(dao.finalize_proposal(&team(), id), Ok(ProposalOutcome::Approved));
}

#[test]
fn delegator_who_voted_directly_is_not_counted_twice() {
    let (mut dao, _) = deploy();
    let proposer = addr("proposer");
    let (delegatee, d1) = (addr("delegatee"), addr("d1"));
    give_and_stake(&mut dao, &proposer, 5_000);
    give_and_stake(&mut dao, &delegatee, 10_000);
    give_and_stake(&mut dao, &d1, 20_000);

    dao.apply_for_delegatee(&delegatee).unwrap();
    let id = dao.make_proposal(&proposer, "Count once").unwrap();
    dao.vote_on_proposal(&d1, id, VoteChoice::Against).unwrap();
    dao.delegate_vote(&d1, &delegatee).unwrap();

    assert_eq!(
        dao.delegatee_vote_on_proposal(&delegatee, id, VoteChoice::For),
        Ok(10_000)
    );
    let proposal = dao.get_proposal_by_id(id).unwrap();
    assert_eq!(proposal.for_votes, 10_000);
    assert_eq!(proposal.against_votes, 20_000);
    assert_eq!(proposal.total_votes, 30_000);
}

#[test]
fn delegate_then_undelegate_restores_empty_state() {
    let (mut dao, _) = deploy();
    let (delegatee, delegator) = (addr("delegatee"), addr("delegator"));
    give_and_stake(&mut dao, &delegatee, 1_000);
    give_and_stake(&mut dao, &delegator, 1_000);
    dao.apply_for_delegatee(&delegatee).unwrap();

    dao.delegate_vote(&delegator, &delegatee).unwrap();
    assert!(dao.check_if_delegator(&delegator));
    assert_eq!(dao.is_sender_in_delegators(&delegatee, &delegator), (true, 0));
    assert!(dao.staking().is_locked(&delegator));

    dao.undelegate_vote(&delegator, &delegatee).unwrap();
    assert!(!dao.check_if_delegator(&delegator));
    assert_eq!(dao.delegation_of(&delegator), None);
    assert_eq!(dao.is_sender_in_delegators(&delegatee, &delegator), (false, 0));
    assert!(!dao.staking().is_locked(&delegator));
    assert!(dao.delegation().is_consistent());
    assert_eq!(dao.unstake(&delegator, 1_000), Ok(0));
}

#[test]
fn early_adopters_claim_after_vesting() {
    let (mut dao, clock) = deploy();
    let (a, b) = (addr("early_a"), addr("early_b"));
    dao.change_trading_status(&team()).unwrap();
    dao.buy_token(&a, EthAmount::from_eth(3)).unwrap();
    dao.buy_token(&b, EthAmount::from_eth(1)).unwrap();

    assert!(dao.claim_vesting_tokens(&a).is_err());
    clock.advance_weeks(4);
    assert_eq!(dao.close_vesting_period(&team()), Ok(4_000));
    assert_eq!(dao.claim_vesting_tokens(&a), Ok(750_000));
    assert_eq!(dao.claim_vesting_tokens(&b), Ok(250_000));
    assert!(dao.claim_vesting_tokens(&b).is_err());
    assert_eq!(dao.token().balance_of(&addr("token")), 0);
}

#[test]
fn shared_handle_runs_a_full_cycle() {
    let (dao, clock) = deploy();
    let shared = SharedDao::new(dao);
    let proposer = addr("proposer");
    let voter = addr("voter");

    shared
        .execute("setup", |dao| {
            dao.transfer_tokens(&team(), &proposer, 5_000)?;
            dao.stake(&proposer, 5_000)?;
            dao.transfer_tokens(&team(), &voter, 1_500_000)?;
            dao.stake(&voter, 1_500_000)?;
            Ok(())
        })
        .unwrap();
    let id = shared
        .execute("make_proposal", |dao| dao.make_proposal(&proposer, "Shared"))
        .unwrap();
    shared
        .execute("vote", |dao| dao.vote_on_proposal(&voter, id, VoteChoice::For))
        .unwrap();
    clock.advance_days(15);
    let outcome = shared
        .execute("finalize", |dao| dao.finalize_proposal(&team(), id))
        .unwrap();
    assert_eq!(outcome, ProposalOutcome::Approved);
    assert!(shared.read(|dao| !dao.staking().is_locked(&voter)));
}
