//! Background task that polls the Soroban RPC and writes decoded
//! Dividend Register events to the database.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use sqlx::SqlitePool;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::config::Config;
use crate::db::{self, Cursor};
use crate::errors::Result;
use crate::rpc;

pub struct IndexerState {
    pub pool: SqlitePool,
    pub config: Config,
    pub client: Client,
}

/// Poll until `shutdown` fires. Poll errors are logged and retried on the
/// next tick; the cursor only advances after a batch is stored.
pub async fn run(state: Arc<IndexerState>, shutdown: CancellationToken) {
    info!("Indexer starting, contract: {}", state.config.contract_id);

    let mut cursor = match db::load_cursor(&state.pool).await {
        Ok(saved) if saved.last_ledger > 0 => saved,
        Ok(_) => Cursor {
            last_ledger: i64::from(state.config.start_ledger),
            last_cursor: None,
        },
        Err(e) => {
            error!("Could not load indexer cursor: {e}");
            return;
        }
    };

    info!("Resuming from ledger {}", cursor.last_ledger);

    loop {
        match poll_once(&state.pool, &state.client, &state.config, &cursor).await {
            Ok(next) => cursor = next,
            Err(e) => error!("Indexer poll error: {e}"),
        }

        tokio::select! {
            _ = shutdown.cancelled() => {
                info!("Indexer stopped at ledger {}", cursor.last_ledger);
                return;
            }
            _ = tokio::time::sleep(Duration::from_secs(state.config.poll_interval_secs)) => {}
        }
    }
}

/// One `getEvents` round trip. Returns the cursor to resume from.
async fn poll_once(
    pool: &SqlitePool,
    client: &Client,
    config: &Config,
    cursor: &Cursor,
) -> Result<Cursor> {
    let start_ledger = u32::try_from(cursor.last_ledger).unwrap_or(config.start_ledger);
    let page = rpc::fetch_events(
        client,
        &config.rpc_url,
        &config.contract_id,
        start_ledger,
        cursor.last_cursor.as_deref(),
        config.events_per_page,
    )
    .await?;

    if !page.events.is_empty() {
        let decoded = rpc::decode_events(&page.events, &config.contract_id);
        let inserted = db::insert_events(pool, &decoded).await?;
        info!(
            "Polled {} raw events → {} new records stored",
            page.events.len(),
            inserted
        );
    }

    let next = next_cursor(cursor, page.latest_ledger, page.next_cursor);
    db::save_cursor(pool, &next).await?;
    Ok(next)
}

/// The ledger never moves backwards. A paging cursor, when present, wins over
/// the ledger on the next request.
fn next_cursor(current: &Cursor, latest_ledger: Option<u64>, paging: Option<String>) -> Cursor {
    let latest = latest_ledger
        .and_then(|l| i64::try_from(l).ok())
        .unwrap_or(current.last_ledger);
    Cursor {
        last_ledger: latest.max(current.last_ledger),
        last_cursor: paging,
    }
}
