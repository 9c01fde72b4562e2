//! # Events
//!
//! Every state-changing entry point publishes exactly one terminal event
//! describing what happened. The leading topic is a short symbol; a second
//! topic carries the subject (grant id, identity) where one exists. Payloads
//! are `#[contracttype]` structs so that off-chain consumers can decode them
//! as maps.
//!
//! | Topic       | Second topic | Payload              |
//! |-------------|--------------|----------------------|
//! | `init`      | –            | admin `Address`      |
//! | `party_set` | identity     | role id `u32`        |
//! | `party_del` | identity     | `()`                 |
//! | `votes_rst` | –            | `()`                 |
//! | `proposed`  | –            | [`ProposalCreated`]  |
//! | `voted`     | voter        | [`VoteCast`]         |
//! | `finalized` | grant id     | [`ProposalFinalized`]|
//! | `rejected`  | –            | [`ProposalRejected`] |
//! | `expired`   | –            | [`ProposalExpired`]  |
//! | `cleared`   | –            | `()`                 |
//! | `transfer`  | grant id     | [`GrantTransferred`] |
//! | `unlocked`  | grant id     | `()`                 |
//! | `token_set` | –            | token `Address`      |
//! | `paid`      | grant id     | [`DividendPaid`]     |
//! | `status`    | code `u32`   | key `u64`            |

use soroban_sdk::{contracttype, symbol_short, Address, Env};

use crate::types::{Proposal, RegisterEntry, VoteState};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProposalCreated {
    pub proposer: Address,
    pub account: Address,
    pub usd_investment: u64,
    pub expires_at: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VoteCast {
    pub voter: Address,
    pub role_id: u32,
    pub vote: VoteState,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProposalFinalized {
    pub grant_id: u64,
    pub account: Address,
    pub mint_date: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProposalRejected {
    pub voter: Address,
    pub account: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProposalExpired {
    pub caller: Address,
    pub expires_at: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GrantTransferred {
    pub grant_id: u64,
    pub from: Address,
    pub to: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DividendPaid {
    pub grant_id: u64,
    pub account: Address,
    pub amount: i128,
    pub periods: u32,
}

pub fn emit_initialized(env: &Env, admin: &Address) {
    env.events().publish((symbol_short!("init"),), admin.clone());
}

pub fn emit_party_set(env: &Env, identity: &Address, role_id: u32) {
    env.events()
        .publish((symbol_short!("party_set"), identity.clone()), role_id);
}

pub fn emit_party_removed(env: &Env, identity: &Address) {
    env.events()
        .publish((symbol_short!("party_del"), identity.clone()), ());
}

pub fn emit_votes_reset(env: &Env) {
    env.events().publish((symbol_short!("votes_rst"),), ());
}

pub fn emit_proposal_created(env: &Env, proposer: &Address, proposal: &Proposal) {
    env.events().publish(
        (symbol_short!("proposed"),),
        ProposalCreated {
            proposer: proposer.clone(),
            account: proposal.account.clone(),
            usd_investment: proposal.usd_investment,
            expires_at: proposal.expires_at,
        },
    );
}

pub fn emit_vote_cast(env: &Env, voter: &Address, role_id: u32, vote: VoteState) {
    env.events().publish(
        (symbol_short!("voted"), voter.clone()),
        VoteCast {
            voter: voter.clone(),
            role_id,
            vote,
        },
    );
}

pub fn emit_finalized(env: &Env, grant: &RegisterEntry) {
    env.events().publish(
        (symbol_short!("finalized"), grant.grant_id),
        ProposalFinalized {
            grant_id: grant.grant_id,
            account: grant.account.clone(),
            mint_date: grant.mint_date,
        },
    );
}

pub fn emit_rejected(env: &Env, voter: &Address, proposal: &Proposal) {
    env.events().publish(
        (symbol_short!("rejected"),),
        ProposalRejected {
            voter: voter.clone(),
            account: proposal.account.clone(),
        },
    );
}

pub fn emit_expired(env: &Env, caller: &Address, expires_at: u64) {
    env.events().publish(
        (symbol_short!("expired"),),
        ProposalExpired {
            caller: caller.clone(),
            expires_at,
        },
    );
}

pub fn emit_cleared(env: &Env) {
    env.events().publish((symbol_short!("cleared"),), ());
}

pub fn emit_transferred(env: &Env, grant_id: u64, from: &Address, to: &Address) {
    env.events().publish(
        (symbol_short!("transfer"), grant_id),
        GrantTransferred {
            grant_id,
            from: from.clone(),
            to: to.clone(),
        },
    );
}

pub fn emit_unlocked(env: &Env, grant_id: u64) {
    env.events()
        .publish((symbol_short!("unlocked"), grant_id), ());
}

pub fn emit_token_set(env: &Env, token: &Address) {
    env.events()
        .publish((symbol_short!("token_set"),), token.clone());
}

pub fn emit_paid(env: &Env, grant: &RegisterEntry, amount: i128, periods: u32) {
    env.events().publish(
        (symbol_short!("paid"), grant.grant_id),
        DividendPaid {
            grant_id: grant.grant_id,
            account: grant.account.clone(),
            amount,
            periods,
        },
    );
}

pub fn emit_status(env: &Env, code: u32, key: u64) {
    env.events().publish((symbol_short!("status"), code), key);
}
