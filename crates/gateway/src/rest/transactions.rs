//! Guest payment and refund endpoints

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::NaiveDate;
use hotel_database::entities::{FinancialTransaction, NewPayment, TransactionFilter};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

use super::{parse_optional, parse_required, ApiJson, ApiPath, ApiQuery};
use crate::error::{ErrorResponse, GatewayResult};
use crate::state::GatewayState;

#[derive(Debug, Serialize, ToSchema)]
pub struct TransactionResponse {
    pub id: i64,
    pub hotel_id: i64,
    pub booking_id: Option<i64>,
    /// payment or refund
    pub kind: String,
    /// cash, card or online
    pub method: String,
    pub amount_cents: i64,
    pub reference: Option<String>,
    pub created_at: String,
}

impl From<FinancialTransaction> for TransactionResponse {
    fn from(transaction: FinancialTransaction) -> Self {
        Self {
            id: transaction.id,
            hotel_id: transaction.hotel_id,
            booking_id: transaction.booking_id,
            kind: transaction.kind.to_string(),
            method: transaction.method.to_string(),
            amount_cents: transaction.amount_cents,
            reference: transaction.reference,
            created_at: transaction.created_at,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RecordPaymentRequest {
    pub amount_cents: i64,
    pub method: String,
    pub reference: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct ListTransactionsQuery {
    pub hotel_id: Option<i64>,
    pub booking_id: Option<i64>,
    pub kind: Option<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Create transaction routes
pub fn create_transaction_routes() -> Router<Arc<GatewayState>> {
    Router::new()
        .route("/transactions", get(list_transactions))
        .route("/transactions/:id", get(get_transaction))
        .route("/bookings/:id/payments", post(record_payment))
}

#[utoipa::path(
    get,
    path = "/api/transactions",
    tag = "Transactions",
    params(ListTransactionsQuery),
    responses(
        (status = 200, description = "Payments and refunds, newest first", body = Vec<TransactionResponse>),
        (status = 400, description = "Invalid filter", body = ErrorResponse)
    )
)]
pub async fn list_transactions(
    State(state): State<Arc<GatewayState>>,
    ApiQuery(params): ApiQuery<ListTransactionsQuery>,
) -> GatewayResult<Json<Vec<TransactionResponse>>> {
    let filter = TransactionFilter {
        hotel_id: params.hotel_id,
        booking_id: params.booking_id,
        kind: parse_optional(params.kind.as_deref())?,
        from: params.from,
        to: params.to,
    };

    let transactions = state
        .services
        .payments
        .list(filter, params.limit, params.offset)
        .await?;
    Ok(Json(transactions.into_iter().map(TransactionResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/api/transactions/{id}",
    tag = "Transactions",
    params(("id" = i64, Path, description = "Transaction ID")),
    responses(
        (status = 200, description = "Payment or refund", body = TransactionResponse),
        (status = 404, description = "Transaction not found", body = ErrorResponse)
    )
)]
pub async fn get_transaction(
    State(state): State<Arc<GatewayState>>,
    ApiPath(id): ApiPath<i64>,
) -> GatewayResult<Json<TransactionResponse>> {
    let transaction = state.services.payments.get(id).await?;
    Ok(Json(transaction.into()))
}

#[utoipa::path(
    post,
    path = "/api/bookings/{id}/payments",
    tag = "Transactions",
    params(("id" = i64, Path, description = "Booking ID")),
    request_body = RecordPaymentRequest,
    responses(
        (status = 201, description = "Payment recorded", body = TransactionResponse),
        (status = 400, description = "Invalid payment", body = ErrorResponse),
        (status = 404, description = "Booking not found", body = ErrorResponse),
        (status = 409, description = "Booking cancelled or payment exceeds the balance", body = ErrorResponse)
    )
)]
pub async fn record_payment(
    State(state): State<Arc<GatewayState>>,
    ApiPath(booking_id): ApiPath<i64>,
    ApiJson(payload): ApiJson<RecordPaymentRequest>,
) -> GatewayResult<impl IntoResponse> {
    let payment = state
        .services
        .payments
        .record_payment(NewPayment {
            booking_id,
            amount_cents: payload.amount_cents,
            method: parse_required(&payload.method)?,
            reference: payload.reference,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(TransactionResponse::from(payment))))
}
