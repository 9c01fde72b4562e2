//! Axum REST API handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::db;
use crate::errors::IndexerError;
use crate::events::EventRecord;

#[derive(Clone)]
pub struct ApiState {
    pub pool: SqlitePool,
}

// ─────────────────────────────────────────────────────────
// Request / response shapes
// ─────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct EventFilter {
    /// Restrict `/events` to one stored kind, e.g. `dividend_paid`.
    pub event_type: Option<String>,
}

#[derive(Serialize)]
pub struct GrantEventsResponse {
    pub grant_id: String,
    pub count: usize,
    pub events: Vec<EventRecord>,
}

#[derive(Serialize)]
pub struct AccountEventsResponse {
    pub address: String,
    pub count: usize,
    pub events: Vec<EventRecord>,
}

#[derive(Serialize)]
pub struct AllEventsResponse {
    pub count: usize,
    pub events: Vec<EventRecord>,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for IndexerError {
    fn into_response(self) -> Response {
        tracing::error!("API request failed: {self}");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

type ApiResult<T> = std::result::Result<Json<T>, IndexerError>;

// ─────────────────────────────────────────────────────────
// Handlers
// ─────────────────────────────────────────────────────────

/// `GET /health`
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// `GET /grants/:id/events`
///
/// Lifecycle of one grant: finalization, transfers, unlock and payouts.
pub async fn get_grant_events(
    State(state): State<Arc<ApiState>>,
    Path(grant_id): Path<String>,
) -> ApiResult<GrantEventsResponse> {
    let events = db::get_events_for_grant(&state.pool, &grant_id).await?;
    Ok(Json(GrantEventsResponse {
        grant_id,
        count: events.len(),
        events,
    }))
}

/// `GET /accounts/:address/events`
pub async fn get_account_events(
    State(state): State<Arc<ApiState>>,
    Path(address): Path<String>,
) -> ApiResult<AccountEventsResponse> {
    let events = db::get_events_for_actor(&state.pool, &address).await?;
    Ok(Json(AccountEventsResponse {
        address,
        count: events.len(),
        events,
    }))
}

/// `GET /events[?event_type=…]`
pub async fn get_all_events(
    State(state): State<Arc<ApiState>>,
    Query(filter): Query<EventFilter>,
) -> ApiResult<AllEventsResponse> {
    let events = db::get_all_events(&state.pool, filter.event_type.as_deref()).await?;
    Ok(Json(AllEventsResponse {
        count: events.len(),
        events,
    }))
}
