//! # Types
//!
//! Shared data structures used across all modules of the Dividend Register.
//!
//! ## Design decisions
//!
//! ### Proposal / RegisterEntry split
//!
//! A [`Proposal`] is a short-lived singleton: it exists only while the two
//! voters deliberate. A [`RegisterEntry`] (a *grant*) is the permanent record
//! minted from an approved proposal. The entry copies every policy field of
//! its proposal and adds the accrual bookkeeping that dividend delivery
//! mutates over time.
//!
//! ### Proposal slot as a Finite-State Machine
//!
//! ```text
//! Absent ──► Pending ──► Finalized ──► Absent
//!               ├──────► Rejected  ──► Absent
//!               └──────► Expired   ──► Absent
//! ```
//!
//! `Finalized` and `Rejected` are never stored: the resolver erases the
//! proposal in the same invocation that decides it. An `Expired` proposal
//! only rejects votes; the next `create_proposal` (or `clear_proposal`)
//! erases it and starts a clean cycle.

use soroban_sdk::{contracttype, Address};

/// Role id of the sole party allowed to submit proposals.
pub const PROPOSER_ROLE: u32 = 1;
/// Role id of the first voter.
pub const FIRST_VOTER_ROLE: u32 = 2;
/// Role id of the second voter.
pub const SECOND_VOTER_ROLE: u32 = 3;

/// Vote slot of a whitelisted party for the current proposal cycle.
#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum VoteState {
    Unvoted = 0,
    Reject = 1,
    Approve = 2,
}

/// A vote as submitted by a voter. `Unvoted` cannot be cast.
#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum Ballot {
    Reject = 1,
    Approve = 2,
}

impl From<Ballot> for VoteState {
    fn from(ballot: Ballot) -> Self {
        match ballot {
            Ballot::Reject => VoteState::Reject,
            Ballot::Approve => VoteState::Approve,
        }
    }
}

/// Whitelist entry: a proposer or voter together with its vote slot.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AuthorizedParty {
    /// 1 = proposer, 2 and 3 = voters.
    pub role_id: u32,
    pub identity: Address,
    pub vote: VoteState,
}

impl AuthorizedParty {
    pub fn is_proposer(&self) -> bool {
        self.role_id == PROPOSER_ROLE
    }

    pub fn is_voter(&self) -> bool {
        self.role_id == FIRST_VOTER_ROLE || self.role_id == SECOND_VOTER_ROLE
    }
}

/// Dividend policy family.
#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum PolicyName {
    WayFarer,
    WayFinder,
}

/// Kind of member the grant is issued to.
#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum UserType {
    Founder,
    Investor,
}

/// How the total payout of a grant is capped.
#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum RoiCap {
    /// At most `rates_left` weekly payments.
    Iteration = 1,
    /// At most `threshold` paid in total.
    Horizontal = 2,
    /// At most `threshold` paid per week.
    Vertical = 3,
}

/// Fields entered by the proposer when submitting a proposal.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProposalParams {
    /// Account that will own the grant and receive dividends.
    pub account: Address,
    pub policy_name: PolicyName,
    pub user_type: UserType,
    pub usd_investment: u64,
    pub target_price: u32,
    pub roi_target_cap: RoiCap,
    /// Weekly dividend rate in basis points of `usd_investment`.
    pub weekly_percentage_bps: u32,
    /// Locked grants accrue nothing until unlocked.
    pub locked: bool,
    /// Total cap (Horizontal) or weekly cap (Vertical).
    pub threshold: i128,
    /// Payments left under an Iteration cap.
    pub rates_left: u32,
}

/// The singleton pending proposal.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Proposal {
    pub account: Address,
    pub policy_name: PolicyName,
    pub user_type: UserType,
    pub usd_investment: u64,
    pub target_price: u32,
    pub roi_target_cap: RoiCap,
    pub weekly_percentage_bps: u32,
    pub locked: bool,
    pub rates_left: u32,
    /// Votes are refused once the ledger timestamp reaches this value.
    pub expires_at: u64,
    pub threshold: i128,
    pub accrued: i128,
}

impl Proposal {
    pub fn from_params(params: ProposalParams, expires_at: u64) -> Self {
        Proposal {
            account: params.account,
            policy_name: params.policy_name,
            user_type: params.user_type,
            usd_investment: params.usd_investment,
            target_price: params.target_price,
            roi_target_cap: params.roi_target_cap,
            weekly_percentage_bps: params.weekly_percentage_bps,
            locked: params.locked,
            rates_left: params.rates_left,
            expires_at,
            threshold: params.threshold,
            accrued: 0,
        }
    }

    pub fn is_expired(&self, now: u64) -> bool {
        self.expires_at <= now
    }
}

/// A finalized dividend grant.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RegisterEntry {
    /// Unique identifier (auto-incremented, starting at 1).
    pub grant_id: u64,
    /// Current owner; the only field that changes hands.
    pub account: Address,
    pub policy_name: PolicyName,
    pub user_type: UserType,
    pub usd_investment: u64,
    pub target_price: u32,
    pub roi_target_cap: RoiCap,
    pub weekly_percentage_bps: u32,
    /// Ledger timestamp of finalization.
    pub mint_date: u64,
    pub locked: bool,
    pub threshold: i128,
    pub rates_left: u32,
    /// Total dividend delivered so far.
    pub accrued: i128,
    /// Weekly periods already settled by delivery.
    pub periods_paid: u32,
    /// Start of the first dividend week: `mint_date`, or the unlock time
    /// for a grant minted locked. Locked weeks never accrue.
    pub accrues_from: u64,
}

/// Payment state of a grant at a given instant.
#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum Eligibility {
    Locked = 0,
    NotDue = 1,
    Payable = 2,
    Exhausted = 3,
}

/// What the delivery path should pay for a grant right now.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EligibilityCode {
    pub grant_id: u64,
    pub status: Eligibility,
    pub periods_due: u32,
    pub amount: i128,
}

/// Diagnostic entry for the front end, valid for the current cycle only.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StatusMessage {
    pub key: u64,
    pub code: u32,
}

/// Stable status codes written to the diagnostics log.
#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum StatusCode {
    UnregisteredCaller = 1,
    ProposalRejected = 2,
    VoteRecorded = 3,
    ProposalExpired = 4,
    ProposalFinalized = 5,
}

/// Result of `record_vote`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum VoteOutcome {
    /// Caller is not whitelisted; logged and ignored.
    Ignored,
    /// Waiting for the other voter.
    Pending,
    /// A voter rejected; the proposal is gone.
    Rejected,
    /// Both voters approved; carries the new grant id.
    Finalized(u64),
}
