//! # Register Ledger
//!
//! Append-only collection of finalized grants. Each grant gets the next
//! auto-incremented id and is indexed under its owner. Grants are never
//! deleted; only ownership, the lock flag and accrual bookkeeping change.

use soroban_sdk::{Address, Env};

use crate::clock;
use crate::events;
use crate::storage;
use crate::types::{Proposal, RegisterEntry};
use crate::Error;

/// Mint a grant from an approved proposal.
pub fn finalize(env: &Env, from: &Proposal, mint_date: u64) -> RegisterEntry {
    let grant = RegisterEntry {
        grant_id: storage::next_grant_id(env),
        account: from.account.clone(),
        policy_name: from.policy_name,
        user_type: from.user_type,
        usd_investment: from.usd_investment,
        target_price: from.target_price,
        roi_target_cap: from.roi_target_cap,
        weekly_percentage_bps: from.weekly_percentage_bps,
        mint_date,
        locked: from.locked,
        threshold: from.threshold,
        rates_left: from.rates_left,
        accrued: from.accrued,
        periods_paid: 0,
        accrues_from: mint_date,
    };
    storage::save_grant(env, &grant);
    index_owner(env, &grant.account, grant.grant_id);
    grant
}

pub fn get(env: &Env, grant_id: u64) -> Result<RegisterEntry, Error> {
    storage::load_grant(env, grant_id).ok_or(Error::NotFound)
}

/// Hand a grant to `new_owner`. Only the current owner may do so.
pub fn transfer_ownership(
    env: &Env,
    caller: &Address,
    grant_id: u64,
    new_owner: &Address,
) -> Result<(), Error> {
    let mut grant = get(env, grant_id)?;
    if grant.account != *caller {
        return Err(Error::Unauthorized);
    }

    unindex_owner(env, caller, grant_id);
    index_owner(env, new_owner, grant_id);
    grant.account = new_owner.clone();
    storage::save_grant(env, &grant);

    events::emit_transferred(env, grant_id, caller, new_owner);
    Ok(())
}

/// Clear the lock flag and start accruing from now. Unlocking is one-way.
pub fn unlock(env: &Env, grant_id: u64) -> Result<(), Error> {
    let mut grant = get(env, grant_id)?;
    if grant.locked {
        grant.locked = false;
        grant.accrues_from = clock::now(env);
        storage::save_grant(env, &grant);
        events::emit_unlocked(env, grant_id);
    }
    Ok(())
}

/// Grants owned by `owner`, loaded one at a time as the iterator advances.
/// Calling again restarts from the first grant.
pub fn find_by_owner<'a>(
    env: &'a Env,
    owner: &Address,
) -> impl Iterator<Item = RegisterEntry> + 'a {
    storage::load_owner_grants(env, owner)
        .into_iter()
        .filter_map(move |grant_id| storage::load_grant(env, grant_id))
}

pub fn count(env: &Env) -> u64 {
    storage::grant_count(env)
}

fn index_owner(env: &Env, owner: &Address, grant_id: u64) {
    let mut ids = storage::load_owner_grants(env, owner);
    ids.push_back(grant_id);
    storage::save_owner_grants(env, owner, &ids);
}

fn unindex_owner(env: &Env, owner: &Address, grant_id: u64) {
    let mut ids = storage::load_owner_grants(env, owner);
    if let Some(index) = ids.first_index_of(grant_id) {
        ids.remove(index);
        storage::save_owner_grants(env, owner, &ids);
    }
}
