//! # Quorum Resolver
//!
//! Records a voter's ballot and re-tallies after every vote:
//!
//! - any `Reject` ends the proposal immediately, even if the other voter has
//!   not voted yet;
//! - two `Approve`s finalize it into the register;
//! - anything else leaves it pending. `Unvoted` never counts either way.
//!
//! Both terminal outcomes erase the proposal and reset every vote slot, so the
//! next cycle starts clean.

use soroban_sdk::{Address, Env};

use crate::clock;
use crate::events;
use crate::proposal;
use crate::register;
use crate::status;
use crate::types::{Ballot, Proposal, StatusCode, VoteOutcome, VoteState};
use crate::whitelist::{self, Quorum};
use crate::Error;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum Tally {
    Rejected,
    Approved,
    Pending,
}

fn tally(first: VoteState, second: VoteState) -> Tally {
    match (first, second) {
        (VoteState::Reject, _) | (_, VoteState::Reject) => Tally::Rejected,
        (VoteState::Approve, VoteState::Approve) => Tally::Approved,
        _ => Tally::Pending,
    }
}

pub fn record_vote(env: &Env, voter: &Address, ballot: Ballot) -> Result<VoteOutcome, Error> {
    let Some(party) = whitelist::lookup(env, voter) else {
        status::emit(env, StatusCode::UnregisteredCaller);
        return Ok(VoteOutcome::Ignored);
    };
    if !party.is_voter() {
        return Err(Error::Unauthorized);
    }

    let pending = proposal::current(env).ok_or(Error::NotFound)?;
    if pending.is_expired(clock::now(env)) {
        return Err(Error::Expired);
    }
    if party.vote != VoteState::Unvoted {
        return Err(Error::AlreadyVoted);
    }
    // Validates the whitelist shape before anything is written.
    Quorum::resolve(env)?;

    let vote = VoteState::from(ballot);
    whitelist::set_vote(env, &party, vote);
    events::emit_vote_cast(env, voter, party.role_id, vote);

    let quorum = Quorum::resolve(env)?;
    match tally(quorum.first_voter.vote, quorum.second_voter.vote) {
        Tally::Rejected => {
            reject(env, voter, &pending);
            Ok(VoteOutcome::Rejected)
        }
        Tally::Approved => Ok(VoteOutcome::Finalized(finalize(env, &pending))),
        Tally::Pending => {
            status::emit(env, StatusCode::VoteRecorded);
            Ok(VoteOutcome::Pending)
        }
    }
}

fn reject(env: &Env, voter: &Address, pending: &Proposal) {
    proposal::clear(env);
    whitelist::reset_votes(env);
    status::emit(env, StatusCode::ProposalRejected);
    events::emit_rejected(env, voter, pending);
}

fn finalize(env: &Env, pending: &Proposal) -> u64 {
    let grant = register::finalize(env, pending, clock::now(env));
    proposal::clear(env);
    whitelist::reset_votes(env);
    status::emit(env, StatusCode::ProposalFinalized);
    events::emit_finalized(env, &grant);
    grant.grant_id
}
