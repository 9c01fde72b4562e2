//! # Proposal Store
//!
//! The single pending proposal. Absence of the `Proposal` key means there is
//! no pending proposal; terminal outcomes erase it in the same invocation.

use soroban_sdk::{Address, Env};

use crate::clock;
use crate::events;
use crate::status;
use crate::storage;
use crate::types::{Proposal, ProposalParams, RoiCap, StatusCode};
use crate::whitelist;
use crate::Error;

const MAX_WEEKLY_BPS: u32 = 10_000;

/// Reject parameter sets that could never produce a sensible grant.
fn validate(params: &ProposalParams) -> Result<(), Error> {
    if params.usd_investment == 0 {
        return Err(Error::InvalidParams);
    }
    if params.weekly_percentage_bps == 0 || params.weekly_percentage_bps > MAX_WEEKLY_BPS {
        return Err(Error::InvalidParams);
    }
    match params.roi_target_cap {
        RoiCap::Iteration if params.rates_left == 0 => Err(Error::InvalidParams),
        RoiCap::Horizontal | RoiCap::Vertical if params.threshold <= 0 => {
            Err(Error::InvalidParams)
        }
        _ => Ok(()),
    }
}

/// Store a new proposal on behalf of the role-1 party.
///
/// Starts a fresh cycle: the status log is truncated and every vote slot
/// returns to `Unvoted` before the proposal is written. A stored proposal
/// whose deadline has passed is erased first; only a live one blocks.
pub fn create(env: &Env, proposer: &Address, params: ProposalParams) -> Result<Proposal, Error> {
    match whitelist::lookup(env, proposer) {
        Some(party) if party.is_proposer() => {}
        _ => return Err(Error::Unauthorized),
    }
    validate(&params)?;
    if let Some(stale) = current(env) {
        if !stale.is_expired(clock::now(env)) {
            return Err(Error::AlreadyExists);
        }
        clear(env);
    }

    status::clear_all(env);
    whitelist::reset_votes(env);

    let proposal = Proposal::from_params(params, clock::expiry_from_now(env));
    storage::save_proposal(env, &proposal);
    events::emit_proposal_created(env, proposer, &proposal);
    Ok(proposal)
}

/// Move the deadline to now so that no further votes are accepted.
///
/// Unregistered callers are logged and ignored.
pub fn force_expire(env: &Env, caller: &Address) -> Result<(), Error> {
    if whitelist::lookup(env, caller).is_none() {
        status::emit(env, StatusCode::UnregisteredCaller);
        return Ok(());
    }

    let mut proposal = current(env).ok_or(Error::NotFound)?;
    let now = clock::now(env);
    if proposal.is_expired(now) {
        return Err(Error::AlreadyExpired);
    }

    proposal.expires_at = now;
    storage::save_proposal(env, &proposal);
    status::emit(env, StatusCode::ProposalExpired);
    events::emit_expired(env, caller, now);
    Ok(())
}

/// Unconditionally erase the proposal. Callers own the authorization check.
pub fn clear(env: &Env) {
    storage::remove_proposal(env);
}

pub fn current(env: &Env) -> Option<Proposal> {
    storage::load_proposal(env)
}
