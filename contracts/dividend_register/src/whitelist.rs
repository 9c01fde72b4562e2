//! # Authorization Registry
//!
//! Holds the proposer (role 1) and the two voters (roles 2 and 3) together
//! with each party's vote slot for the current proposal cycle.
//!
//! The registry stores whatever the authority registers; it does not itself
//! insist on exactly one proposer and two voters. [`Quorum::resolve`] checks
//! that shape before every tally.
//!
//! Roles are always read from the stored `role_id` field. Iteration order is
//! only used for presentation.

use soroban_sdk::{Address, Env, Vec};

use crate::storage;
use crate::types::{
    AuthorizedParty, VoteState, FIRST_VOTER_ROLE, PROPOSER_ROLE, SECOND_VOTER_ROLE,
};
use crate::Error;

/// Insert or overwrite the entry for `identity`. The vote slot is always reset.
pub fn register_party(env: &Env, role_id: u32, identity: &Address) {
    let mut list = storage::load_party_list(env);
    if storage::load_party(env, identity).is_none() {
        list.push_back(identity.clone());
        storage::save_party_list(env, &list);
    }
    storage::save_party(
        env,
        &AuthorizedParty {
            role_id,
            identity: identity.clone(),
            vote: VoteState::Unvoted,
        },
    );
}

pub fn remove_party(env: &Env, identity: &Address) -> Result<(), Error> {
    if storage::load_party(env, identity).is_none() {
        return Err(Error::NotFound);
    }
    let mut list = storage::load_party_list(env);
    if let Some(index) = list.first_index_of(identity) {
        list.remove(index);
        storage::save_party_list(env, &list);
    }
    storage::remove_party(env, identity);
    Ok(())
}

pub fn lookup(env: &Env, identity: &Address) -> Option<AuthorizedParty> {
    storage::load_party(env, identity)
}

/// All parties ordered by `role_id` ascending. Parties sharing a role keep
/// their registration order.
pub fn iterate_by_role(env: &Env) -> Vec<AuthorizedParty> {
    let mut ordered: Vec<AuthorizedParty> = Vec::new(env);
    for identity in storage::load_party_list(env).iter() {
        let Some(party) = storage::load_party(env, &identity) else {
            continue;
        };
        let position = ordered
            .iter()
            .position(|existing| existing.role_id > party.role_id)
            .map(|index| index as u32)
            .unwrap_or(ordered.len());
        ordered.insert(position, party);
    }
    ordered
}

pub fn set_vote(env: &Env, party: &AuthorizedParty, vote: VoteState) {
    let mut updated = party.clone();
    updated.vote = vote;
    storage::save_party(env, &updated);
}

/// Return every party to `Unvoted`. Only entries that actually changed are written.
pub fn reset_votes(env: &Env) {
    for identity in storage::load_party_list(env).iter() {
        if let Some(party) = storage::load_party(env, &identity) {
            if party.vote != VoteState::Unvoted {
                set_vote(env, &party, VoteState::Unvoted);
            }
        }
    }
}

/// The quorum the resolver tallies: one proposer and one voter in each voter role.
pub struct Quorum {
    pub first_voter: AuthorizedParty,
    pub second_voter: AuthorizedParty,
}

impl Quorum {
    /// Read the current quorum, failing unless exactly one party holds each
    /// of the roles 1, 2 and 3.
    pub fn resolve(env: &Env) -> Result<Self, Error> {
        let mut proposers = 0u32;
        let mut first_voter: Option<AuthorizedParty> = None;
        let mut second_voter: Option<AuthorizedParty> = None;

        for party in iterate_by_role(env).iter() {
            match party.role_id {
                PROPOSER_ROLE => proposers += 1,
                FIRST_VOTER_ROLE => {
                    if first_voter.replace(party).is_some() {
                        return Err(Error::QuorumMisconfigured);
                    }
                }
                SECOND_VOTER_ROLE => {
                    if second_voter.replace(party).is_some() {
                        return Err(Error::QuorumMisconfigured);
                    }
                }
                _ => {}
            }
        }

        match (proposers, first_voter, second_voter) {
            (1, Some(first_voter), Some(second_voter)) => Ok(Quorum {
                first_voter,
                second_voter,
            }),
            _ => Err(Error::QuorumMisconfigured),
        }
    }
}
