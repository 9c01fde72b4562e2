#![allow(dead_code)]

extern crate std;

use soroban_sdk::Vec;

use crate::types::{AuthorizedParty, Proposal, RegisterEntry, VoteState};

/// INV-1: At most one proposal exists. A refused `create_proposal` leaves the
/// stored proposal exactly as it was.
pub fn assert_singleton(before: &Option<Proposal>, after: &Option<Proposal>) {
    assert!(before.is_some(), "INV-1 violated: no proposal to protect");
    assert_eq!(
        before, after,
        "INV-1 violated: a second proposal replaced or altered the pending one"
    );
}

/// INV-2: After a terminal transition every vote slot is `Unvoted`.
pub fn assert_votes_reset(parties: &Vec<AuthorizedParty>) {
    for party in parties.iter() {
        assert_eq!(
            party.vote,
            VoteState::Unvoted,
            "INV-2 violated: party with role {} still holds {:?}",
            party.role_id,
            party.vote
        );
    }
}

/// INV-3: A grant copies every policy field of the proposal it was minted
/// from; only `grant_id`, `mint_date`, `accrues_from` and `periods_paid` are its own.
pub fn assert_grant_matches_proposal(proposal: &Proposal, grant: &RegisterEntry, mint_date: u64) {
    assert_eq!(grant.account, proposal.account, "INV-3 violated: account");
    assert_eq!(grant.policy_name, proposal.policy_name, "INV-3 violated: policy_name");
    assert_eq!(grant.user_type, proposal.user_type, "INV-3 violated: user_type");
    assert_eq!(
        grant.usd_investment, proposal.usd_investment,
        "INV-3 violated: usd_investment"
    );
    assert_eq!(grant.target_price, proposal.target_price, "INV-3 violated: target_price");
    assert_eq!(
        grant.roi_target_cap, proposal.roi_target_cap,
        "INV-3 violated: roi_target_cap"
    );
    assert_eq!(
        grant.weekly_percentage_bps, proposal.weekly_percentage_bps,
        "INV-3 violated: weekly_percentage_bps"
    );
    assert_eq!(grant.locked, proposal.locked, "INV-3 violated: locked");
    assert_eq!(grant.threshold, proposal.threshold, "INV-3 violated: threshold");
    assert_eq!(grant.rates_left, proposal.rates_left, "INV-3 violated: rates_left");
    assert_eq!(grant.accrued, proposal.accrued, "INV-3 violated: accrued");
    assert_eq!(grant.mint_date, mint_date, "INV-3 violated: mint_date");
    assert_eq!(grant.periods_paid, 0, "INV-3 violated: periods_paid");
    assert_eq!(grant.accrues_from, mint_date, "INV-3 violated: accrues_from");
}

/// INV-4: An ownership transfer touches nothing but `account`.
pub fn assert_only_owner_changed(before: &RegisterEntry, after: &RegisterEntry) {
    let mut expected = before.clone();
    expected.account = after.account.clone();
    assert_eq!(
        &expected, after,
        "INV-4 violated: transfer changed more than the owner of grant {}",
        before.grant_id
    );
}

/// INV-5: Grant ids are sequential starting from 1.
pub fn assert_sequential_ids(grants: &[RegisterEntry]) {
    for (i, grant) in grants.iter().enumerate() {
        assert_eq!(
            grant.grant_id,
            i as u64 + 1,
            "INV-5 violated: expected id {}, got {}",
            i + 1,
            grant.grant_id
        );
    }
}

/// INV-6: Delivery only ever adds to `accrued` and `periods_paid`, and never
/// grows `rates_left`.
pub fn assert_accrual_monotonic(before: &RegisterEntry, after: &RegisterEntry) {
    assert!(
        after.accrued >= before.accrued,
        "INV-6 violated: accrued decreased from {} to {}",
        before.accrued,
        after.accrued
    );
    assert!(
        after.periods_paid >= before.periods_paid,
        "INV-6 violated: periods_paid decreased"
    );
    assert!(
        after.rates_left <= before.rates_left,
        "INV-6 violated: rates_left increased"
    );
}
