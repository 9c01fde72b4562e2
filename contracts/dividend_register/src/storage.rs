//! # Storage
//!
//! Typed helpers over Soroban's two storage tiers used by the Dividend Register:
//!
//! ## Instance storage (contract-lifetime TTL)
//!
//! | Key             | Type                 | Description                          |
//! |-----------------|----------------------|--------------------------------------|
//! | `Admin`         | `Address`            | Contract authority                   |
//! | `PartyList`     | `Vec<Address>`       | Whitelisted identities, by insertion |
//! | `GrantCount`    | `u64`                | Last issued grant id                 |
//! | `DividendToken` | `Address`            | Token paid out by `deliver`          |
//! | `StatusLog`     | `Vec<StatusMessage>` | Diagnostics of the current cycle     |
//!
//! Instance TTL is bumped by **7 days** whenever it falls below 1 day remaining.
//!
//! ## Persistent storage (per-entry TTL)
//!
//! | Key                  | Type              | Description                     |
//! |----------------------|-------------------|---------------------------------|
//! | `Party(addr)`        | `AuthorizedParty` | Whitelist entry                 |
//! | `Proposal`           | `Proposal`        | The singleton pending proposal  |
//! | `Grant(id)`          | `RegisterEntry`   | Finalized grant                 |
//! | `OwnerGrants(addr)`  | `Vec<u64>`        | Secondary index: grants by owner|
//!
//! Persistent TTL is bumped by **30 days** whenever it falls below 7 days remaining.

use soroban_sdk::{contracttype, Address, Env, Vec};

use crate::types::{AuthorizedParty, Proposal, RegisterEntry, StatusMessage};
use crate::Error;

// ── TTL Constants ────────────────────────────────────────────────────

/// Approximate ledgers per day (~5 seconds per ledger).
const DAY_IN_LEDGERS: u32 = 17_280;

/// Instance storage: bump by 7 days when below 1 day remaining.
const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
const INSTANCE_LIFETIME_THRESHOLD: u32 = DAY_IN_LEDGERS;

/// Persistent storage: bump by 30 days when below 7 days remaining.
const PERSISTENT_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const PERSISTENT_LIFETIME_THRESHOLD: u32 = 7 * DAY_IN_LEDGERS;

// ── Storage Keys ─────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    /// Contract authority (Instance).
    Admin,
    /// Whitelisted identities in registration order (Instance).
    PartyList,
    /// Last issued grant id (Instance).
    GrantCount,
    /// Token used for dividend delivery (Instance).
    DividendToken,
    /// Status messages of the current proposal cycle (Instance).
    StatusLog,
    /// Whitelist entry keyed by identity (Persistent).
    Party(Address),
    /// The pending proposal; at most one exists (Persistent).
    Proposal,
    /// Grant keyed by id (Persistent).
    Grant(u64),
    /// Grant ids owned by an account (Persistent).
    OwnerGrants(Address),
}

// ── Instance Storage Helpers ─────────────────────────────────────────

/// Extend instance storage TTL if it falls below the threshold.
fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

pub fn has_admin(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Admin)
}

pub fn set_admin(env: &Env, admin: &Address) {
    env.storage().instance().set(&DataKey::Admin, admin);
    bump_instance(env);
}

/// Retrieve the contract authority.
pub fn get_admin(env: &Env) -> Result<Address, Error> {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::Admin)
        .ok_or(Error::NotInitialized)
}

/// Load the authority and require its signature on the current invocation.
pub fn require_admin(env: &Env) -> Result<Address, Error> {
    let admin = get_admin(env)?;
    admin.require_auth();
    Ok(admin)
}

pub fn load_party_list(env: &Env) -> Vec<Address> {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::PartyList)
        .unwrap_or_else(|| Vec::new(env))
}

pub fn save_party_list(env: &Env, list: &Vec<Address>) {
    env.storage().instance().set(&DataKey::PartyList, list);
}

/// Atomically reads, increments, and stores the grant counter.
/// Returns the id to use for the *current* grant (post-increment value),
/// so the first grant is `1`.
pub fn next_grant_id(env: &Env) -> u64 {
    bump_instance(env);
    let next = grant_count(env) + 1;
    env.storage().instance().set(&DataKey::GrantCount, &next);
    next
}

pub fn grant_count(env: &Env) -> u64 {
    env.storage()
        .instance()
        .get(&DataKey::GrantCount)
        .unwrap_or(0)
}

pub fn set_dividend_token(env: &Env, token: &Address) {
    env.storage().instance().set(&DataKey::DividendToken, token);
    bump_instance(env);
}

pub fn get_dividend_token(env: &Env) -> Option<Address> {
    bump_instance(env);
    env.storage().instance().get(&DataKey::DividendToken)
}

pub fn load_status_log(env: &Env) -> Vec<StatusMessage> {
    env.storage()
        .instance()
        .get(&DataKey::StatusLog)
        .unwrap_or_else(|| Vec::new(env))
}

pub fn save_status_log(env: &Env, log: &Vec<StatusMessage>) {
    env.storage().instance().set(&DataKey::StatusLog, log);
    bump_instance(env);
}

pub fn remove_status_log(env: &Env) {
    env.storage().instance().remove(&DataKey::StatusLog);
}

// ── Persistent Storage Helpers ───────────────────────────────────────

/// Extend the TTL for a persistent storage key.
fn bump_persistent(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

pub fn load_party(env: &Env, identity: &Address) -> Option<AuthorizedParty> {
    let key = DataKey::Party(identity.clone());
    let party: Option<AuthorizedParty> = env.storage().persistent().get(&key);
    if party.is_some() {
        bump_persistent(env, &key);
    }
    party
}

pub fn save_party(env: &Env, party: &AuthorizedParty) {
    let key = DataKey::Party(party.identity.clone());
    env.storage().persistent().set(&key, party);
    bump_persistent(env, &key);
}

pub fn remove_party(env: &Env, identity: &Address) {
    env.storage()
        .persistent()
        .remove(&DataKey::Party(identity.clone()));
}

pub fn load_proposal(env: &Env) -> Option<Proposal> {
    let proposal: Option<Proposal> = env.storage().persistent().get(&DataKey::Proposal);
    if proposal.is_some() {
        bump_persistent(env, &DataKey::Proposal);
    }
    proposal
}

pub fn save_proposal(env: &Env, proposal: &Proposal) {
    env.storage().persistent().set(&DataKey::Proposal, proposal);
    bump_persistent(env, &DataKey::Proposal);
}

pub fn remove_proposal(env: &Env) {
    env.storage().persistent().remove(&DataKey::Proposal);
}

pub fn load_grant(env: &Env, grant_id: u64) -> Option<RegisterEntry> {
    let key = DataKey::Grant(grant_id);
    let grant: Option<RegisterEntry> = env.storage().persistent().get(&key);
    if grant.is_some() {
        bump_persistent(env, &key);
    }
    grant
}

pub fn save_grant(env: &Env, grant: &RegisterEntry) {
    let key = DataKey::Grant(grant.grant_id);
    env.storage().persistent().set(&key, grant);
    bump_persistent(env, &key);
}

pub fn load_owner_grants(env: &Env, owner: &Address) -> Vec<u64> {
    let key = DataKey::OwnerGrants(owner.clone());
    match env.storage().persistent().get(&key) {
        Some(ids) => {
            bump_persistent(env, &key);
            ids
        }
        None => Vec::new(env),
    }
}

/// Empty index lists are removed rather than stored.
pub fn save_owner_grants(env: &Env, owner: &Address, ids: &Vec<u64>) {
    let key = DataKey::OwnerGrants(owner.clone());
    if ids.is_empty() {
        env.storage().persistent().remove(&key);
    } else {
        env.storage().persistent().set(&key, ids);
        bump_persistent(env, &key);
    }
}
