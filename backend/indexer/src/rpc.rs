//! Soroban RPC client: polls `getEvents` and decodes Dividend Register events.
//!
//! ## Resilience
//!
//! * Exponential back-off is applied when the RPC returns an error or rate-limit
//!   response, up to [`MAX_BACKOFF_SECS`] seconds.
//! * Transient network errors (connection reset, timeout) are retried silently.
//! * JSON-RPC codes `-32600` / `-32601` mean the request itself is wrong and
//!   are returned to the caller instead of retried.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::errors::{IndexerError, Result};
use crate::events::{EventKind, RegisterEvent};

const MAX_BACKOFF_SECS: u64 = 60;
const INITIAL_BACKOFF_SECS: u64 = 2;

const HARD_RPC_ERRORS: [i64; 2] = [-32600, -32601];

// ─────────────────────────────────────────────────────────
// JSON-RPC response shapes
// ─────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RpcResponse {
    pub result: Option<EventsResult>,
    pub error: Option<RpcError>,
}

#[derive(Debug, Deserialize)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct EventsResult {
    pub events: Vec<RawEvent>,
    pub cursor: Option<String>,
    #[serde(rename = "latestLedger")]
    pub latest_ledger: Option<u64>,
}

#[derive(Debug, Deserialize, Clone)]
#[allow(dead_code)]
pub struct RawEvent {
    /// XDR-encoded topic list
    pub topic: Vec<String>,
    /// XDR-encoded event value / data
    pub value: Value,
    #[serde(rename = "contractId")]
    pub contract_id: Option<String>,
    #[serde(rename = "txHash")]
    pub tx_hash: Option<String>,
    pub id: Option<String>,
    pub ledger: Option<u64>,
    #[serde(rename = "ledgerClosedAt")]
    pub ledger_closed_at: Option<String>,
    #[serde(rename = "inSuccessfulContractCall")]
    pub in_successful_contract_call: Option<bool>,
    #[serde(rename = "pagingToken")]
    pub paging_token: Option<String>,
}

/// A page of events as returned by [`fetch_events`].
#[derive(Debug)]
pub struct EventPage {
    pub events: Vec<RawEvent>,
    pub next_cursor: Option<String>,
    pub latest_ledger: Option<u64>,
}

// ─────────────────────────────────────────────────────────
// Public API
// ─────────────────────────────────────────────────────────

/// Doubling sleep between retries, capped at [`MAX_BACKOFF_SECS`].
struct Backoff {
    secs: u64,
}

impl Backoff {
    fn new() -> Self {
        Self {
            secs: INITIAL_BACKOFF_SECS,
        }
    }

    async fn wait(&mut self, reason: &str) {
        warn!("{reason} (will retry in {}s)", self.secs);
        tokio::time::sleep(Duration::from_secs(self.secs)).await;
        self.secs = (self.secs * 2).min(MAX_BACKOFF_SECS);
    }
}

/// Fetch a page of events from the RPC.
///
/// * `start_ledger` : the ledger sequence to scan from (inclusive).
/// * `cursor`       : optional opaque pagination cursor from a previous response.
/// * `limit`        : maximum number of events to return.
pub async fn fetch_events(
    client: &Client,
    rpc_url: &str,
    contract_id: &str,
    start_ledger: u32,
    cursor: Option<&str>,
    limit: u32,
) -> Result<EventPage> {
    let mut backoff = Backoff::new();
    let body = json!({
        "jsonrpc": "2.0",
        "id": 1,
        "method": "getEvents",
        "params": build_params(contract_id, start_ledger, cursor, limit),
    });

    loop {
        let resp = match client.post(rpc_url).json(&body).send().await {
            Ok(resp) => resp,
            Err(e) => {
                backoff.wait(&format!("RPC request failed: {e}")).await;
                continue;
            }
        };

        if resp.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            backoff.wait("Rate-limited by RPC").await;
            continue;
        }

        let parsed: RpcResponse = resp.json().await?;

        if let Some(err) = parsed.error {
            if HARD_RPC_ERRORS.contains(&err.code) {
                return Err(IndexerError::Rpc {
                    code: err.code,
                    message: err.message,
                });
            }
            backoff
                .wait(&format!("RPC soft error {} {}", err.code, err.message))
                .await;
            continue;
        }

        let result = parsed.result.ok_or_else(|| {
            IndexerError::EventParse("Empty result from getEvents".to_string())
        })?;

        debug!(
            "Fetched {} events (latest_ledger={:?})",
            result.events.len(),
            result.latest_ledger
        );

        return Ok(EventPage {
            events: result.events,
            next_cursor: result.cursor,
            latest_ledger: result.latest_ledger,
        });
    }
}

fn build_params(contract_id: &str, start_ledger: u32, cursor: Option<&str>, limit: u32) -> Value {
    let mut params = json!({
        "filters": [
            {
                "type": "contract",
                "contractIds": [contract_id]
            }
        ],
        "pagination": {
            "limit": limit
        }
    });

    match cursor {
        Some(cur) => params["pagination"]["cursor"] = json!(cur),
        None => params["startLedger"] = json!(start_ledger),
    }

    params
}

// ─────────────────────────────────────────────────────────
// Event decoding
// ─────────────────────────────────────────────────────────

/// Decode a list of raw RPC events into [`RegisterEvent`] structs.
///
/// Events from failed contract calls are dropped: their state changes were
/// rolled back, so they never happened as far as the register is concerned.
pub fn decode_events(raw: &[RawEvent], contract_id: &str) -> Vec<RegisterEvent> {
    raw.iter()
        .filter(|e| e.in_successful_contract_call.unwrap_or(true))
        .filter_map(|e| decode_single(e, contract_id))
        .collect()
}

fn decode_single(raw: &RawEvent, contract_id: &str) -> Option<RegisterEvent> {
    let first_topic = raw.topic.first()?;
    let kind = EventKind::from_topic(&extract_symbol(first_topic));

    let ledger = raw.ledger.unwrap_or(0) as i64;
    let timestamp = raw
        .ledger_closed_at
        .as_deref()
        .and_then(parse_iso_to_unix)
        .unwrap_or(0);

    let second_topic = raw.topic.get(1).map(|t| extract_scalar(t));
    let grant_id = second_topic.clone().filter(|_| kind.has_grant_topic());
    let topic_actor = second_topic.clone().filter(|_| kind.has_actor_topic());

    let decoded = decode_data(&raw.value, kind);
    let detail = if kind == EventKind::Status {
        // The status code travels in the topic; the payload is only the log key.
        second_topic
    } else {
        decoded.detail
    };

    Some(RegisterEvent {
        event_id: raw.id.clone(),
        event_type: kind.as_str().to_string(),
        grant_id,
        actor: topic_actor.or(decoded.actor),
        amount: decoded.amount,
        detail,
        ledger,
        timestamp,
        contract_id: raw
            .contract_id
            .clone()
            .unwrap_or_else(|| contract_id.to_string()),
        tx_hash: raw.tx_hash.clone(),
    })
}

#[derive(Default)]
struct DecodedData {
    actor: Option<String>,
    amount: Option<String>,
    detail: Option<String>,
}

/// Pull apart the JSON `value` blob that Soroban returns for event data.
/// The XDR is decoded by the RPC into a `{"type":…, …}` JSON object.
fn decode_data(value: &Value, kind: EventKind) -> DecodedData {
    match kind {
        EventKind::Initialized | EventKind::DividendTokenSet => DecodedData {
            actor: scalar(value),
            ..Default::default()
        },
        EventKind::PartySet => DecodedData {
            detail: scalar(value),
            ..Default::default()
        },
        EventKind::ProposalCreated => DecodedData {
            actor: extract_field(value, &["proposer"]).or_else(|| find_nested(value, "proposer")),
            amount: extract_field(value, &["usd_investment"]),
            detail: extract_field(value, &["account"]),
        },
        EventKind::VoteCast => DecodedData {
            actor: extract_field(value, &["voter"]),
            detail: extract_field(value, &["vote"]),
            ..Default::default()
        },
        EventKind::ProposalFinalized => DecodedData {
            actor: extract_field(value, &["account"]),
            detail: extract_field(value, &["mint_date"]),
            ..Default::default()
        },
        EventKind::ProposalRejected => DecodedData {
            actor: extract_field(value, &["voter"]),
            detail: extract_field(value, &["account"]),
            ..Default::default()
        },
        EventKind::ProposalExpired => DecodedData {
            actor: extract_field(value, &["caller"]),
            detail: extract_field(value, &["expires_at"]),
            ..Default::default()
        },
        EventKind::GrantTransferred => DecodedData {
            actor: extract_field(value, &["from"]),
            detail: extract_field(value, &["to"]),
            ..Default::default()
        },
        EventKind::DividendPaid => DecodedData {
            actor: extract_field(value, &["account"]),
            amount: extract_field(value, &["amount"]),
            detail: extract_field(value, &["periods"]),
        },
        EventKind::PartyRemoved
        | EventKind::VotesReset
        | EventKind::ProposalCleared
        | EventKind::GrantUnlocked
        | EventKind::Status
        | EventKind::Unknown => DecodedData::default(),
    }
}

fn scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => extract_field(value, &["value", "address"]),
    }
}

fn extract_field(value: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| match value.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    })
}

fn find_nested(value: &Value, key: &str) -> Option<String> {
    let Value::Object(map) = value else {
        return None;
    };
    map.iter().find_map(|(k, v)| {
        if k == key {
            v.as_str().map(String::from)
        } else {
            find_nested(v, key)
        }
    })
}

/// Extract a Soroban Symbol from the XDR-decoded topic string.
/// The RPC may return `{"type":"symbol","value":"voted"}` or just the raw string.
fn extract_symbol(raw: &str) -> String {
    serde_json::from_str::<Value>(raw)
        .ok()
        .and_then(|v| v.get("value").and_then(|x| x.as_str()).map(String::from))
        .unwrap_or_else(|| raw.to_string())
}

/// Extract a grant id, address or status code from a topic entry that might be
/// a JSON object or a raw number/string.
fn extract_scalar(raw: &str) -> String {
    if let Ok(v) = serde_json::from_str::<Value>(raw) {
        match v.get("value") {
            Some(Value::Number(n)) => return n.to_string(),
            Some(Value::String(s)) => return s.clone(),
            _ => {}
        }
    }
    raw.to_string()
}

/// Parse an ISO-8601 timestamp string into a Unix epoch (seconds).
fn parse_iso_to_unix(s: &str) -> Option<i64> {
    chrono::DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.timestamp())
}

// ─────────────────────────────────────────────────────────
// Unit tests
// ─────────────────────────────────────────────────────────
