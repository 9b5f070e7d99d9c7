//! Bill and maintenance ledger endpoints. There is no update or delete route.

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use hotel_database::entities::{LedgerEntry, LedgerFilter};
use hotel_operations::LedgerEntryInput;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

use super::{parse_optional, parse_required, ApiJson, ApiPath, ApiQuery};
use crate::error::{ErrorResponse, GatewayResult};
use crate::state::GatewayState;

#[derive(Debug, Serialize, ToSchema)]
pub struct LedgerEntryResponse {
    pub id: i64,
    pub hotel_id: i64,
    /// utility, maintenance, inventory, salary or other
    pub category: String,
    pub description: String,
    pub amount_cents: i64,
    pub inventory_transaction_id: Option<i64>,
    pub recorded_on: NaiveDate,
    pub created_at: String,
}

impl From<LedgerEntry> for LedgerEntryResponse {
    fn from(entry: LedgerEntry) -> Self {
        Self {
            id: entry.id,
            hotel_id: entry.hotel_id,
            category: entry.category.to_string(),
            description: entry.description,
            amount_cents: entry.amount_cents,
            inventory_transaction_id: entry.inventory_transaction_id,
            recorded_on: entry.recorded_on,
            created_at: entry.created_at,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RecordEntryRequest {
    pub hotel_id: i64,
    pub category: String,
    pub description: String,
    pub amount_cents: i64,
    /// Defaults to today.
    pub recorded_on: Option<NaiveDate>,
}

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct ListEntriesQuery {
    pub hotel_id: Option<i64>,
    pub category: Option<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Create ledger routes
pub fn create_ledger_routes() -> Router<Arc<GatewayState>> {
    Router::new()
        .route("/ledger", get(list_entries).post(record_entry))
        .route("/ledger/:id", get(get_entry))
}

#[utoipa::path(
    get,
    path = "/api/ledger",
    tag = "Ledger",
    params(ListEntriesQuery),
    responses(
        (status = 200, description = "Expense entries, newest first", body = Vec<LedgerEntryResponse>),
        (status = 400, description = "Invalid filter", body = ErrorResponse)
    )
)]
pub async fn list_entries(
    State(state): State<Arc<GatewayState>>,
    ApiQuery(params): ApiQuery<ListEntriesQuery>,
) -> GatewayResult<Json<Vec<LedgerEntryResponse>>> {
    let filter = LedgerFilter {
        hotel_id: params.hotel_id,
        category: parse_optional(params.category.as_deref())?,
        from: params.from,
        to: params.to,
    };

    let entries = state
        .services
        .ledger
        .list(filter, params.limit, params.offset)
        .await?;
    Ok(Json(entries.into_iter().map(LedgerEntryResponse::from).collect()))
}

#[utoipa::path(
    post,
    path = "/api/ledger",
    tag = "Ledger",
    request_body = RecordEntryRequest,
    responses(
        (status = 201, description = "Entry recorded", body = LedgerEntryResponse),
        (status = 400, description = "Invalid entry", body = ErrorResponse),
        (status = 404, description = "Hotel not found", body = ErrorResponse)
    )
)]
pub async fn record_entry(
    State(state): State<Arc<GatewayState>>,
    ApiJson(payload): ApiJson<RecordEntryRequest>,
) -> GatewayResult<impl IntoResponse> {
    let entry = state
        .services
        .ledger
        .record(LedgerEntryInput {
            hotel_id: payload.hotel_id,
            category: parse_required(&payload.category)?,
            description: payload.description,
            amount_cents: payload.amount_cents,
            recorded_on: payload.recorded_on,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(LedgerEntryResponse::from(entry))))
}

#[utoipa::path(
    get,
    path = "/api/ledger/{id}",
    tag = "Ledger",
    params(("id" = i64, Path, description = "Ledger entry ID")),
    responses(
        (status = 200, description = "Ledger entry", body = LedgerEntryResponse),
        (status = 404, description = "Entry not found", body = ErrorResponse)
    )
)]
pub async fn get_entry(
    State(state): State<Arc<GatewayState>>,
    ApiPath(id): ApiPath<i64>,
) -> GatewayResult<Json<LedgerEntryResponse>> {
    let entry = state.services.ledger.get(id).await?;
    Ok(Json(entry.into()))
}
