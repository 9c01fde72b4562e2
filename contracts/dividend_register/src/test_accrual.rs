extern crate std;

use soroban_sdk::{
    testutils::{Address as _, Ledger},
    token, Address, Env,
};

use crate::clock::SECONDS_PER_WEEK;
use crate::invariants::assert_accrual_monotonic;
use crate::{
    Ballot, DividendRegister, DividendRegisterClient, Eligibility, Error, PolicyName,
    ProposalParams, RoiCap, UserType, VoteOutcome,
};

struct Fixture {
    env: Env,
    client: DividendRegisterClient<'static>,
    admin: Address,
    proposer: Address,
    first_voter: Address,
    second_voter: Address,
}

fn setup() -> Fixture {
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

    Fixture {
        env,
        client,
        admin,
        proposer,
        first_voter,
        second_voter,
    }
}

fn create_token<'a>(env: &Env, admin: &Address) -> token::Client<'a> {
    let addr = env.register_stellar_asset_contract_v2(admin.clone());
    token::Client::new(env, &addr.address())
}

/// Configure a dividend token and fund the contract with `pool` units.
fn fund(f: &Fixture, pool: i128) -> token::Client<'static> {
    let token = create_token(&f.env, &f.admin);
    let sac = token::StellarAssetClient::new(&f.env, &token.address);
    if pool > 0 {
        sac.mint(&f.client.address, &pool);
    }
    f.client.set_dividend_token(&token.address);
    token
}

fn params(account: &Address, cap: RoiCap) -> ProposalParams {
    ProposalParams {
        account: account.clone(),
        policy_name: PolicyName::WayFinder,
        user_type: UserType::Founder,
        // 1% of 1_000 per week = 10 units.
        usd_investment: 1_000,
        target_price: 1,
        roi_target_cap: cap,
        weekly_percentage_bps: 100,
        locked: false,
        threshold: 25,
        rates_left: 2,
    }
}

fn mint(f: &Fixture, params: &ProposalParams) -> u64 {
    f.client.create_proposal(&f.proposer, params);
    f.client.record_vote(&f.first_voter, &Ballot::Approve);
    match f.client.record_vote(&f.second_voter, &Ballot::Approve) {
        VoteOutcome::Finalized(grant_id) => grant_id,
        other => panic!("expected finalized grant, got {:?}", other),
    }
}

fn advance_weeks(env: &Env, weeks: u64) {
    let now = env.ledger().timestamp();
    env.ledger().set_timestamp(now + weeks * SECONDS_PER_WEEK);
}

#[test]
fn test_nothing_due_in_first_week() {
    let f = setup();
    let owner = Address::generate(&f.env);
    let grant_id = mint(&f, &params(&owner, RoiCap::Horizontal));

    f.env.ledger().set_timestamp(SECONDS_PER_WEEK - 1);
    let code = f.client.compute_eligibility(&grant_id);
    assert_eq!(code.status, Eligibility::NotDue);
    assert_eq!(code.amount, 0);
}

#[test]
fn test_eligibility_is_idempotent() {
    let f = setup();
    let owner = Address::generate(&f.env);
    let grant_id = mint(&f, &params(&owner, RoiCap::Horizontal));
    advance_weeks(&f.env, 2);

    let first = f.client.compute_eligibility(&grant_id);
    let second = f.client.compute_eligibility(&grant_id);
    assert_eq!(first, second);
    assert_eq!(first.status, Eligibility::Payable);
    assert_eq!(first.periods_due, 2);
    assert_eq!(first.amount, 20);
}

#[test]
fn test_horizontal_cap_limits_total() {
    let f = setup();
    let token = fund(&f, 1_000);
    let owner = Address::generate(&f.env);
    let grant_id = mint(&f, &params(&owner, RoiCap::Horizontal));
    advance_weeks(&f.env, 3);

    let code = f.client.compute_eligibility(&grant_id);
    assert_eq!(code.status, Eligibility::Payable);
    assert_eq!(code.amount, 25);

    let before = f.client.get_grant(&grant_id);
    assert_eq!(f.client.deliver(&grant_id), 25);
    let after = f.client.get_grant(&grant_id);

    assert_accrual_monotonic(&before, &after);
    assert_eq!(after.accrued, 25);
    assert_eq!(after.periods_paid, 3);
    assert_eq!(token.balance(&owner), 25);

    advance_weeks(&f.env, 5);
    assert_eq!(
        f.client.compute_eligibility(&grant_id).status,
        Eligibility::Exhausted
    );
}

#[test]
fn test_iteration_cap_counts_down_rates() {
    let f = setup();
    let token = fund(&f, 1_000);
    let owner = Address::generate(&f.env);
    let grant_id = mint(&f, &params(&owner, RoiCap::Iteration));
    advance_weeks(&f.env, 5);

    let code = f.client.compute_eligibility(&grant_id);
    assert_eq!(code.periods_due, 2);
    assert_eq!(code.amount, 20);

    f.client.deliver(&grant_id);
    let grant = f.client.get_grant(&grant_id);
    assert_eq!(grant.rates_left, 0);
    assert_eq!(grant.accrued, 20);
    assert_eq!(token.balance(&owner), 20);

    assert_eq!(
        f.client.compute_eligibility(&grant_id).status,
        Eligibility::Exhausted
    );
    assert_eq!(f.client.try_deliver(&grant_id), Err(Ok(Error::NotEligible)));
}

#[test]
fn test_vertical_cap_limits_each_week() {
    let f = setup();
    let owner = Address::generate(&f.env);
    let mut vertical = params(&owner, RoiCap::Vertical);
    vertical.threshold = 4;
    let grant_id = mint(&f, &vertical);
    advance_weeks(&f.env, 3);

    let code = f.client.compute_eligibility(&grant_id);
    assert_eq!(code.periods_due, 3);
    assert_eq!(code.amount, 12);
}

#[test]
fn test_locked_grant_pays_nothing_until_unlocked() {
    let f = setup();
    let token = fund(&f, 1_000);
    let owner = Address::generate(&f.env);
    let mut locked = params(&owner, RoiCap::Horizontal);
    locked.locked = true;
    let grant_id = mint(&f, &locked);
    advance_weeks(&f.env, 1);

    assert_eq!(
        f.client.compute_eligibility(&grant_id).status,
        Eligibility::Locked
    );
    assert_eq!(f.client.try_deliver(&grant_id), Err(Ok(Error::NotEligible)));

    f.client.unlock_grant(&grant_id);
    let unlocked = f.client.get_grant(&grant_id);
    assert!(!unlocked.locked);
    assert_eq!(unlocked.accrues_from, SECONDS_PER_WEEK);

    advance_weeks(&f.env, 1);
    assert_eq!(f.client.deliver(&grant_id), 10);
    assert_eq!(token.balance(&owner), 10);
}

#[test]
fn test_locked_weeks_never_accrue() {
    let f = setup();
    let owner = Address::generate(&f.env);
    let mut locked = params(&owner, RoiCap::Vertical);
    locked.locked = true;
    locked.threshold = 1_000;
    let grant_id = mint(&f, &locked);

    advance_weeks(&f.env, 4);
    f.client.unlock_grant(&grant_id);
    assert_eq!(
        f.client.compute_eligibility(&grant_id).status,
        Eligibility::NotDue
    );

    advance_weeks(&f.env, 2);
    let code = f.client.compute_eligibility(&grant_id);
    assert_eq!(code.status, Eligibility::Payable);
    assert_eq!(code.periods_due, 2);
    assert_eq!(code.amount, 20);

    // A second unlock is a no-op and does not move the start again.
    f.client.unlock_grant(&grant_id);
    assert_eq!(f.client.compute_eligibility(&grant_id), code);
}

#[test]
fn test_deliver_requires_token() {
    let f = setup();
    let owner = Address::generate(&f.env);
    let grant_id = mint(&f, &params(&owner, RoiCap::Horizontal));
    advance_weeks(&f.env, 1);

    assert_eq!(f.client.try_deliver(&grant_id), Err(Ok(Error::TokenNotSet)));
}

#[test]
fn test_deliver_unknown_grant() {
    let f = setup();
    fund(&f, 0);
    assert_eq!(f.client.try_deliver(&7), Err(Ok(Error::NotFound)));
    assert_eq!(f.client.try_compute_eligibility(&7), Err(Ok(Error::NotFound)));
}

#[test]
fn test_failed_transfer_leaves_grant_untouched() {
    let f = setup();
    // Pool smaller than what is due.
    let token = fund(&f, 5);
    let owner = Address::generate(&f.env);
    let grant_id = mint(&f, &params(&owner, RoiCap::Horizontal));
    advance_weeks(&f.env, 2);

    let before = f.client.get_grant(&grant_id);
    assert_eq!(
        f.client.try_deliver(&grant_id),
        Err(Ok(Error::TransferFailed))
    );

    assert_eq!(f.client.get_grant(&grant_id), before);
    assert_eq!(token.balance(&owner), 0);
    assert_eq!(token.balance(&f.client.address), 5);
}

#[test]
fn test_owed_total_sums_owner_grants() {
    let f = setup();
    let owner = Address::generate(&f.env);
    let other = Address::generate(&f.env);
    mint(&f, &params(&owner, RoiCap::Horizontal));
    mint(&f, &params(&owner, RoiCap::Iteration));
    mint(&f, &params(&other, RoiCap::Horizontal));
    advance_weeks(&f.env, 1);

    assert_eq!(f.client.owed_total(&owner), 20);
    assert_eq!(f.client.owed_total(&other), 10);
}

#[test]
fn test_transferred_grant_pays_new_owner() {
    let f = setup();
    let token = fund(&f, 1_000);
    let seller = Address::generate(&f.env);
    let buyer = Address::generate(&f.env);
    let grant_id = mint(&f, &params(&seller, RoiCap::Horizontal));
    advance_weeks(&f.env, 1);

    f.client.transfer_ownership(&seller, &grant_id, &buyer);
    f.client.deliver(&grant_id);

    assert_eq!(token.balance(&buyer), 10);
    assert_eq!(token.balance(&seller), 0);
    assert_eq!(f.client.owed_total(&buyer), 0);
}
