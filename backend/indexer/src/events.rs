//! Canonical event types emitted by the Dividend Register contract.
//!
//! These mirror the Soroban contract events defined in
//! `contracts/dividend_register/src/events.rs`.

use serde::{Deserialize, Serialize};

/// All recognised event kinds from the Dividend Register contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// The contract authority was set (`init` topic).
    Initialized,
    /// A whitelist entry was created or overwritten (`party_set` topic).
    PartySet,
    /// A whitelist entry was removed (`party_del` topic).
    PartyRemoved,
    /// The authority reset every vote slot (`votes_rst` topic).
    VotesReset,
    /// The proposer submitted a proposal (`proposed` topic).
    ProposalCreated,
    /// A voter cast a ballot (`voted` topic).
    VoteCast,
    /// Both voters approved and a grant was minted (`finalized` topic).
    ProposalFinalized,
    /// A voter rejected the proposal (`rejected` topic).
    ProposalRejected,
    /// The proposal deadline was forced to now (`expired` topic).
    ProposalExpired,
    /// The authority erased the proposal (`cleared` topic).
    ProposalCleared,
    /// A grant changed owner (`transfer` topic).
    GrantTransferred,
    /// A locked grant was released for payment (`unlocked` topic).
    GrantUnlocked,
    /// The dividend token was configured (`token_set` topic).
    DividendTokenSet,
    /// A dividend was delivered to a grant owner (`paid` topic).
    DividendPaid,
    /// A diagnostics code was logged for the front end (`status` topic).
    Status,
    /// An event from this contract that we don't recognise yet.
    Unknown,
}

impl EventKind {
    /// Parse the leading topic symbol string produced by Soroban into an [`EventKind`].
    pub fn from_topic(topic: &str) -> Self {
        match topic {
            "init" => Self::Initialized,
            "party_set" => Self::PartySet,
            "party_del" => Self::PartyRemoved,
            "votes_rst" => Self::VotesReset,
            "proposed" => Self::ProposalCreated,
            "voted" => Self::VoteCast,
            "finalized" => Self::ProposalFinalized,
            "rejected" => Self::ProposalRejected,
            "expired" => Self::ProposalExpired,
            "cleared" => Self::ProposalCleared,
            "transfer" => Self::GrantTransferred,
            "unlocked" => Self::GrantUnlocked,
            "token_set" => Self::DividendTokenSet,
            "paid" => Self::DividendPaid,
            "status" => Self::Status,
            _ => Self::Unknown,
        }
    }

    /// Return a short identifier string suitable for storage in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Initialized => "initialized",
            Self::PartySet => "party_set",
            Self::PartyRemoved => "party_removed",
            Self::VotesReset => "votes_reset",
            Self::ProposalCreated => "proposal_created",
            Self::VoteCast => "vote_cast",
            Self::ProposalFinalized => "proposal_finalized",
            Self::ProposalRejected => "proposal_rejected",
            Self::ProposalExpired => "proposal_expired",
            Self::ProposalCleared => "proposal_cleared",
            Self::GrantTransferred => "grant_transferred",
            Self::GrantUnlocked => "grant_unlocked",
            Self::DividendTokenSet => "dividend_token_set",
            Self::DividendPaid => "dividend_paid",
            Self::Status => "status",
            Self::Unknown => "unknown",
        }
    }

    /// Whether the second topic of this event is a grant id.
    pub fn has_grant_topic(&self) -> bool {
        matches!(
            self,
            Self::ProposalFinalized
                | Self::GrantTransferred
                | Self::GrantUnlocked
                | Self::DividendPaid
        )
    }

    /// Whether the second topic of this event is the acting identity.
    pub fn has_actor_topic(&self) -> bool {
        matches!(self, Self::PartySet | Self::PartyRemoved | Self::VoteCast)
    }
}

/// A fully decoded Dividend Register event, ready to be stored in the database.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterEvent {
    /// RPC-assigned event id; unique per event and used for de-duplication.
    pub event_id: Option<String>,
    pub event_type: String,
    pub grant_id: Option<String>,
    pub actor: Option<String>,
    pub amount: Option<String>,
    /// Kind-specific extra value: role id, vote, new owner or status code.
    pub detail: Option<String>,
    pub ledger: i64,
    pub timestamp: i64,
    pub contract_id: String,
    pub tx_hash: Option<String>,
}

/// A raw event record as stored in / read from the database.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct EventRecord {
    pub id: i64,
    pub event_id: Option<String>,
    pub event_type: String,
    pub grant_id: Option<String>,
    pub actor: Option<String>,
    pub amount: Option<String>,
    pub detail: Option<String>,
    pub ledger: i64,
    pub timestamp: i64,
    pub contract_id: String,
    pub tx_hash: Option<String>,
    pub created_at: i64,
}
