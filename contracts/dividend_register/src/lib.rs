//! # Dividend Register Contract
//!
//! A proposer submits an investment-dividend proposal; two voters must both
//! approve it before it expires. Unanimous approval mints a permanent grant in
//! the register; a single rejection destroys the proposal at once.
//!
//! | Phase          | Entry Point(s)                                                   |
//! |----------------|------------------------------------------------------------------|
//! | Bootstrap      | [`DividendRegister::init`], `set_dividend_token`                 |
//! | Whitelist      | `register_party`, `remove_party`, `reset_votes`                  |
//! | Proposal       | `create_proposal`, `force_expire`, `clear_proposal`              |
//! | Voting         | [`DividendRegister::record_vote`]                                |
//! | Register       | `transfer_ownership`, `unlock_grant`                             |
//! | Dividends      | `compute_eligibility`, `deliver`, `owed_total`                   |
//! | Queries        | `get_party`, `parties`, `get_proposal`, `get_grant`, `grants_of` |
//!
//! ## Architecture
//!
//! Authorization is checked here, at the entry points; storage access is
//! delegated to [`storage`]. Lifecycle rules live in `whitelist`, `proposal`,
//! `quorum`, `register` and `accrual`.
//!
//! Any `Err` returned from an entry point rolls back every write made during
//! that invocation. Unregistered callers of `record_vote` and `force_expire`
//! are the one exception to failing hard: they are written to the status log
//! and the call returns normally.

#![no_std]

use soroban_sdk::{contract, contracterror, contractimpl, Address, Env, Vec};

mod accrual;
pub mod clock;
mod events;
mod proposal;
mod quorum;
mod register;
mod status;
mod storage;
mod types;
mod whitelist;

#[cfg(test)]
mod invariants;
#[cfg(test)]
mod test_accrual;
#[cfg(test)]
mod test_events;

pub use events::{
    DividendPaid, GrantTransferred, ProposalCreated, ProposalExpired, ProposalFinalized,
    ProposalRejected, VoteCast,
};
pub use types::{
    AuthorizedParty, Ballot, Eligibility, EligibilityCode, PolicyName, Proposal, ProposalParams,
    RegisterEntry, RoiCap, StatusCode, StatusMessage, UserType, VoteOutcome, VoteState,
};

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    NotInitialized      = 1,
    AlreadyInitialized  = 2,
    Unauthorized        = 3,
    AlreadyExists       = 4,
    NotFound            = 5,
    AlreadyVoted        = 6,
    Expired             = 7,
    AlreadyExpired      = 8,
    QuorumMisconfigured = 9,
    InvalidParams       = 10,
    NotEligible         = 11,
    TokenNotSet         = 12,
    TransferFailed      = 13,
}

#[contract]
pub struct DividendRegister;

#[contractimpl]
impl DividendRegister {
    // ─────────────────────────────────────────────────────────
    // Bootstrap
    // ─────────────────────────────────────────────────────────

    /// Initialise the contract and set its authority.
    ///
    /// Must be called exactly once immediately after deployment.
    /// Subsequent calls fail with `Error::AlreadyInitialized`.
    pub fn init(env: Env, admin: Address) -> Result<(), Error> {
        admin.require_auth();
        if storage::has_admin(&env) {
            return Err(Error::AlreadyInitialized);
        }
        storage::set_admin(&env, &admin);
        events::emit_initialized(&env, &admin);
        Ok(())
    }

    pub fn admin(env: Env) -> Result<Address, Error> {
        storage::get_admin(&env)
    }

    /// Configure the token `deliver` pays dividends in. Authority only.
    pub fn set_dividend_token(env: Env, token: Address) -> Result<(), Error> {
        storage::require_admin(&env)?;
        storage::set_dividend_token(&env, &token);
        events::emit_token_set(&env, &token);
        Ok(())
    }

    // ─────────────────────────────────────────────────────────
    // Whitelist
    // ─────────────────────────────────────────────────────────

    /// Register `identity` under `role_id` (1 = proposer, 2 and 3 = voters).
    ///
    /// Re-registering an existing identity overwrites its role and resets its vote.
    pub fn register_party(env: Env, role_id: u32, identity: Address) -> Result<(), Error> {
        storage::require_admin(&env)?;
        whitelist::register_party(&env, role_id, &identity);
        events::emit_party_set(&env, &identity, role_id);
        Ok(())
    }

    pub fn remove_party(env: Env, identity: Address) -> Result<(), Error> {
        storage::require_admin(&env)?;
        whitelist::remove_party(&env, &identity)?;
        events::emit_party_removed(&env, &identity);
        Ok(())
    }

    /// Force every vote slot back to `Unvoted`. Authority only.
    pub fn reset_votes(env: Env) -> Result<(), Error> {
        storage::require_admin(&env)?;
        whitelist::reset_votes(&env);
        events::emit_votes_reset(&env);
        Ok(())
    }

    pub fn get_party(env: Env, identity: Address) -> Option<AuthorizedParty> {
        whitelist::lookup(&env, &identity)
    }

    /// All whitelisted parties, proposer first.
    pub fn parties(env: Env) -> Vec<AuthorizedParty> {
        whitelist::iterate_by_role(&env)
    }

    // ─────────────────────────────────────────────────────────
    // Proposal lifecycle
    // ─────────────────────────────────────────────────────────

    /// Submit the single pending proposal.
    ///
    /// - `proposer` must authorize and be the role-1 party.
    /// - Fails with `AlreadyExists` while another proposal is pending and
    ///   unexpired. An expired one is erased and replaced.
    pub fn create_proposal(
        env: Env,
        proposer: Address,
        params: ProposalParams,
    ) -> Result<Proposal, Error> {
        proposer.require_auth();
        proposal::create(&env, &proposer, params)
    }

    /// Cast a ballot on the pending proposal and resolve the quorum.
    pub fn record_vote(env: Env, voter: Address, ballot: Ballot) -> Result<VoteOutcome, Error> {
        voter.require_auth();
        quorum::record_vote(&env, &voter, ballot)
    }

    /// Expire the pending proposal immediately. Any registered party may call this.
    pub fn force_expire(env: Env, caller: Address) -> Result<(), Error> {
        caller.require_auth();
        proposal::force_expire(&env, &caller)
    }

    /// Erase the pending proposal, if any, and reset all votes. Authority only.
    pub fn clear_proposal(env: Env) -> Result<(), Error> {
        storage::require_admin(&env)?;
        proposal::clear(&env);
        whitelist::reset_votes(&env);
        events::emit_cleared(&env);
        Ok(())
    }

    pub fn get_proposal(env: Env) -> Option<Proposal> {
        proposal::current(&env)
    }

    pub fn status_messages(env: Env) -> Vec<StatusMessage> {
        status::messages(&env)
    }

    // ─────────────────────────────────────────────────────────
    // Register
    // ─────────────────────────────────────────────────────────

    /// Transfer a grant. `caller` must authorize and currently own it.
    pub fn transfer_ownership(
        env: Env,
        caller: Address,
        grant_id: u64,
        new_owner: Address,
    ) -> Result<(), Error> {
        caller.require_auth();
        register::transfer_ownership(&env, &caller, grant_id, &new_owner)
    }

    /// Release a locked grant for payment. Authority only; cannot be undone.
    pub fn unlock_grant(env: Env, grant_id: u64) -> Result<(), Error> {
        storage::require_admin(&env)?;
        register::unlock(&env, grant_id)
    }

    pub fn get_grant(env: Env, grant_id: u64) -> Result<RegisterEntry, Error> {
        register::get(&env, grant_id)
    }

    pub fn grants_of(env: Env, owner: Address) -> Vec<RegisterEntry> {
        let mut grants = Vec::new(&env);
        for grant in register::find_by_owner(&env, &owner) {
            grants.push_back(grant);
        }
        grants
    }

    pub fn grant_count(env: Env) -> u64 {
        register::count(&env)
    }

    // ─────────────────────────────────────────────────────────
    // Dividends
    // ─────────────────────────────────────────────────────────

    pub fn compute_eligibility(env: Env, grant_id: u64) -> Result<EligibilityCode, Error> {
        accrual::compute_eligibility(&env, grant_id)
    }

    /// Pay what is currently due on `grant_id` from the contract's token
    /// balance. Authority only. Returns the amount paid.
    pub fn deliver(env: Env, grant_id: u64) -> Result<i128, Error> {
        storage::require_admin(&env)?;
        accrual::deliver(&env, grant_id)
    }

    pub fn owed_total(env: Env, owner: Address) -> i128 {
        accrual::owed_total(&env, &owner)
    }
}
