extern crate std;

use soroban_sdk::{
    symbol_short,
    testutils::{Address as _, Events, Ledger},
    vec, Address, Env, IntoVal, TryIntoVal,
};

use crate::{
    Ballot, DividendRegister, DividendRegisterClient, GrantTransferred, PolicyName,
    ProposalCreated, ProposalExpired, ProposalFinalized, ProposalParams, ProposalRejected,
    RoiCap, StatusCode, UserType, VoteCast, VoteState,
};

fn setup() -> (Env, DividendRegisterClient<'static>, Address, Address, Address) {
    let env = Env::default();
    env.mock_all_auths();
    let contract_id = env.register(DividendRegister, ());
    let client = DividendRegisterClient::new(&env, &contract_id);
    let admin = Address::generate(&env);
    client.init(&admin);

    let proposer = Address::generate(&env);
    let first_voter = Address::generate(&env);
    let second_voter = Address::generate(&env);
    client.register_party(&1, &proposer);
    client.register_party(&2, &first_voter);
    client.register_party(&3, &second_voter);
    (env, client, proposer, first_voter, second_voter)
}

fn params(account: &Address) -> ProposalParams {
    ProposalParams {
        account: account.clone(),
        policy_name: PolicyName::WayFarer,
        user_type: UserType::Investor,
        usd_investment: 5_000,
        target_price: 10,
        roi_target_cap: RoiCap::Iteration,
        weekly_percentage_bps: 50,
        locked: true,
        threshold: 0,
        rates_left: 52,
    }
}

#[test]
fn test_party_set_event() {
    let env = Env::default();
    env.mock_all_auths();
    let contract_id = env.register(DividendRegister, ());
    let client = DividendRegisterClient::new(&env, &contract_id);
    let admin = Address::generate(&env);
    let voter = Address::generate(&env);
    client.init(&admin);

    client.register_party(&2, &voter);

    let last_event = env.events().all().last().expect("No events found");
    assert_eq!(last_event.0, client.address);
    let expected_topics = vec![
        &env,
        symbol_short!("party_set").into_val(&env),
        voter.into_val(&env),
    ];
    assert_eq!(last_event.1, expected_topics);
    let role_id: u32 = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(role_id, 2);
}

#[test]
fn test_proposal_created_event() {
    let (env, client, proposer, _, _) = setup();
    env.ledger().set_timestamp(100);
    let account = Address::generate(&env);

    let proposal = client.create_proposal(&proposer, &params(&account));

    let last_event = env.events().all().last().expect("No events found");
    assert_eq!(last_event.0, client.address);
    let expected_topics = vec![&env, symbol_short!("proposed").into_val(&env)];
    assert_eq!(last_event.1, expected_topics);

    let event_data: ProposalCreated = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        event_data,
        ProposalCreated {
            proposer: proposer.clone(),
            account: account.clone(),
            usd_investment: 5_000,
            expires_at: proposal.expires_at,
        }
    );
}

#[test]
fn test_pending_vote_ends_with_status_event() {
    let (env, client, proposer, first_voter, _) = setup();
    let account = Address::generate(&env);
    client.create_proposal(&proposer, &params(&account));

    client.record_vote(&first_voter, &Ballot::Approve);

    let events = env.events().all();
    let last_event = events.last().expect("No events found");
    let expected_topics = vec![
        &env,
        symbol_short!("status").into_val(&env),
        (StatusCode::VoteRecorded as u32).into_val(&env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let vote_event = events.get(events.len() - 2).unwrap();
    let expected_topics = vec![
        &env,
        symbol_short!("voted").into_val(&env),
        first_voter.into_val(&env),
    ];
    assert_eq!(vote_event.1, expected_topics);
    let cast: VoteCast = vote_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        cast,
        VoteCast {
            voter: first_voter.clone(),
            role_id: 2,
            vote: VoteState::Approve,
        }
    );
}

#[test]
fn test_finalized_event() {
    let (env, client, proposer, first_voter, second_voter) = setup();
    env.ledger().set_timestamp(777);
    let account = Address::generate(&env);
    client.create_proposal(&proposer, &params(&account));
    client.record_vote(&first_voter, &Ballot::Approve);

    client.record_vote(&second_voter, &Ballot::Approve);

    let last_event = env.events().all().last().expect("No events found");
    let expected_topics = vec![
        &env,
        symbol_short!("finalized").into_val(&env),
        1u64.into_val(&env),
    ];
    assert_eq!(last_event.1, expected_topics);
    let event_data: ProposalFinalized = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        event_data,
        ProposalFinalized {
            grant_id: 1,
            account: account.clone(),
            mint_date: 777,
        }
    );
}

#[test]
fn test_rejected_event() {
    let (env, client, proposer, _, second_voter) = setup();
    let account = Address::generate(&env);
    client.create_proposal(&proposer, &params(&account));

    client.record_vote(&second_voter, &Ballot::Reject);

    let last_event = env.events().all().last().expect("No events found");
    let expected_topics = vec![&env, symbol_short!("rejected").into_val(&env)];
    assert_eq!(last_event.1, expected_topics);
    let event_data: ProposalRejected = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        event_data,
        ProposalRejected {
            voter: second_voter.clone(),
            account: account.clone(),
        }
    );
}

#[test]
fn test_expired_event() {
    let (env, client, proposer, first_voter, _) = setup();
    let account = Address::generate(&env);
    client.create_proposal(&proposer, &params(&account));
    env.ledger().set_timestamp(4_000);

    client.force_expire(&first_voter);

    let last_event = env.events().all().last().expect("No events found");
    let expected_topics = vec![&env, symbol_short!("expired").into_val(&env)];
    assert_eq!(last_event.1, expected_topics);
    let event_data: ProposalExpired = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        event_data,
        ProposalExpired {
            caller: first_voter.clone(),
            expires_at: 4_000,
        }
    );
}

#[test]
fn test_transfer_event() {
    let (env, client, proposer, first_voter, second_voter) = setup();
    let owner = Address::generate(&env);
    let buyer = Address::generate(&env);
    client.create_proposal(&proposer, &params(&owner));
    client.record_vote(&first_voter, &Ballot::Approve);
    client.record_vote(&second_voter, &Ballot::Approve);

    client.transfer_ownership(&owner, &1, &buyer);

    let last_event = env.events().all().last().expect("No events found");
    let expected_topics = vec![
        &env,
        symbol_short!("transfer").into_val(&env),
        1u64.into_val(&env),
    ];
    assert_eq!(last_event.1, expected_topics);
    let event_data: GrantTransferred = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        event_data,
        GrantTransferred {
            grant_id: 1,
            from: owner.clone(),
            to: buyer.clone(),
        }
    );
}

#[test]
fn test_unregistered_vote_emits_status_only() {
    let (env, client, proposer, _, _) = setup();
    let account = Address::generate(&env);
    client.create_proposal(&proposer, &params(&account));
    let stranger = Address::generate(&env);

    client.record_vote(&stranger, &Ballot::Approve);

    let events = env.events().all();
    let last_event = events.last().expect("No events found");
    let expected_topics = vec![
        &env,
        symbol_short!("status").into_val(&env),
        (StatusCode::UnregisteredCaller as u32).into_val(&env),
    ];
    assert_eq!(last_event.1, expected_topics);
    let key: u64 = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(key, 1);
}
