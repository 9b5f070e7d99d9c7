//! Booking REST endpoints and the front desk lifecycle

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::NaiveDate;
use hotel_database::entities::{
    Booking, BookingCancellation, BookingFilter, CheckoutSummary, NewBooking,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

use super::transactions::TransactionResponse;
use super::{parse_optional, parse_required, ApiJson, ApiPath, ApiQuery};
use crate::error::{ErrorResponse, GatewayResult};
use crate::state::GatewayState;

#[derive(Debug, Serialize, ToSchema)]
pub struct BookingResponse {
    pub id: i64,
    pub reference: String,
    pub hotel_id: i64,
    pub room_id: i64,
    pub room_number: String,
    pub guest_name: String,
    pub guest_email: String,
    pub guest_phone: Option<String>,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub nights: i64,
    pub guests: i64,
    pub total_cents: i64,
    /// booked, checked_in, checked_out or cancelled
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Booking> for BookingResponse {
    fn from(booking: Booking) -> Self {
        Self {
            nights: booking.nights(),
            id: booking.id,
            reference: booking.reference,
            hotel_id: booking.hotel_id,
            room_id: booking.room_id,
            room_number: booking.room_number,
            guest_name: booking.guest_name,
            guest_email: booking.guest_email,
            guest_phone: booking.guest_phone,
            check_in: booking.check_in,
            check_out: booking.check_out,
            guests: booking.guests,
            total_cents: booking.total_cents,
            status: booking.status.to_string(),
            created_at: booking.created_at,
            updated_at: booking.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CheckoutResponse {
    pub booking: BookingResponse,
    pub nights: i64,
    pub total_cents: i64,
    pub previously_paid_cents: i64,
    pub amount_charged_cents: i64,
    pub payment: Option<TransactionResponse>,
}

impl From<CheckoutSummary> for CheckoutResponse {
    fn from(summary: CheckoutSummary) -> Self {
        Self {
            booking: summary.booking.into(),
            nights: summary.nights,
            total_cents: summary.total_cents,
            previously_paid_cents: summary.previously_paid_cents,
            amount_charged_cents: summary.amount_charged_cents,
            payment: summary.payment.map(TransactionResponse::from),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CancellationResponse {
    pub booking: BookingResponse,
    pub refund: Option<TransactionResponse>,
}

impl From<BookingCancellation> for CancellationResponse {
    fn from(cancellation: BookingCancellation) -> Self {
        Self {
            booking: cancellation.booking.into(),
            refund: cancellation.refund.map(TransactionResponse::from),
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateBookingRequest {
    pub room_id: i64,
    pub guest_name: String,
    pub guest_email: String,
    pub guest_phone: Option<String>,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guests: i64,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CheckOutRequest {
    /// cash, card or online
    pub payment_method: String,
}

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct ListBookingsQuery {
    pub hotel_id: Option<i64>,
    pub room_id: Option<i64>,
    pub status: Option<String>,
    /// Only bookings whose stay covers this night.
    pub date: Option<NaiveDate>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Create booking routes
pub fn create_booking_routes() -> Router<Arc<GatewayState>> {
    Router::new()
        .route("/bookings", get(list_bookings).post(create_booking))
        .route("/bookings/:id", get(get_booking))
        .route("/bookings/by-reference/:reference", get(find_booking_by_reference))
        .route("/bookings/:id/check-in", post(check_in))
        .route("/bookings/:id/check-out", post(check_out))
        .route("/bookings/:id/cancel", post(cancel_booking))
}

#[utoipa::path(
    get,
    path = "/api/bookings",
    tag = "Bookings",
    params(ListBookingsQuery),
    responses(
        (status = 200, description = "Bookings matching the filters", body = Vec<BookingResponse>),
        (status = 400, description = "Invalid filter", body = ErrorResponse)
    )
)]
pub async fn list_bookings(
    State(state): State<Arc<GatewayState>>,
    ApiQuery(params): ApiQuery<ListBookingsQuery>,
) -> GatewayResult<Json<Vec<BookingResponse>>> {
    let filter = BookingFilter {
        hotel_id: params.hotel_id,
        room_id: params.room_id,
        status: parse_optional(params.status.as_deref())?,
        date: params.date,
    };

    let bookings = state
        .services
        .bookings
        .list(filter, params.limit, params.offset)
        .await?;
    Ok(Json(bookings.into_iter().map(BookingResponse::from).collect()))
}

#[utoipa::path(
    post,
    path = "/api/bookings",
    tag = "Bookings",
    request_body = CreateBookingRequest,
    responses(
        (status = 201, description = "Room reserved", body = BookingResponse),
        (status = 400, description = "Invalid dates or party size", body = ErrorResponse),
        (status = 404, description = "Room not found", body = ErrorResponse),
        (status = 409, description = "Room under maintenance or already booked", body = ErrorResponse)
    )
)]
pub async fn create_booking(
    State(state): State<Arc<GatewayState>>,
    ApiJson(payload): ApiJson<CreateBookingRequest>,
) -> GatewayResult<impl IntoResponse> {
    let booking = state
        .services
        .bookings
        .create(NewBooking {
            room_id: payload.room_id,
            guest_name: payload.guest_name,
            guest_email: payload.guest_email,
            guest_phone: payload.guest_phone,
            check_in: payload.check_in,
            check_out: payload.check_out,
            guests: payload.guests,
        })
        .await?;

    tracing::info!(booking_id = booking.id, reference = %booking.reference, "booking created");
    Ok((StatusCode::CREATED, Json(BookingResponse::from(booking))))
}

#[utoipa::path(
    get,
    path = "/api/bookings/{id}",
    tag = "Bookings",
    params(("id" = i64, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Booking details", body = BookingResponse),
        (status = 404, description = "Booking not found", body = ErrorResponse)
    )
)]
pub async fn get_booking(
    State(state): State<Arc<GatewayState>>,
    ApiPath(id): ApiPath<i64>,
) -> GatewayResult<Json<BookingResponse>> {
    let booking = state.services.bookings.get(id).await?;
    Ok(Json(booking.into()))
}

#[utoipa::path(
    get,
    path = "/api/bookings/by-reference/{reference}",
    tag = "Bookings",
    params(("reference" = String, Path, description = "Booking reference given to the guest")),
    responses(
        (status = 200, description = "Booking details", body = BookingResponse),
        (status = 404, description = "Booking not found", body = ErrorResponse)
    )
)]
pub async fn find_booking_by_reference(
    State(state): State<Arc<GatewayState>>,
    ApiPath(reference): ApiPath<String>,
) -> GatewayResult<Json<BookingResponse>> {
    let booking = state.services.bookings.find_by_reference(&reference).await?;
    Ok(Json(booking.into()))
}

#[utoipa::path(
    post,
    path = "/api/bookings/{id}/check-in",
    tag = "Bookings",
    params(("id" = i64, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Guest checked in", body = BookingResponse),
        (status = 404, description = "Booking not found", body = ErrorResponse),
        (status = 409, description = "Booking is not awaiting arrival", body = ErrorResponse)
    )
)]
pub async fn check_in(
    State(state): State<Arc<GatewayState>>,
    ApiPath(id): ApiPath<i64>,
) -> GatewayResult<Json<BookingResponse>> {
    let booking = state.services.bookings.check_in(id).await?;
    Ok(Json(booking.into()))
}

#[utoipa::path(
    post,
    path = "/api/bookings/{id}/check-out",
    tag = "Bookings",
    params(("id" = i64, Path, description = "Booking ID")),
    request_body = CheckOutRequest,
    responses(
        (status = 200, description = "Guest checked out and bill settled", body = CheckoutResponse),
        (status = 400, description = "Unknown payment method", body = ErrorResponse),
        (status = 404, description = "Booking not found", body = ErrorResponse),
        (status = 409, description = "Guest is not checked in", body = ErrorResponse)
    )
)]
pub async fn check_out(
    State(state): State<Arc<GatewayState>>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(payload): ApiJson<CheckOutRequest>,
) -> GatewayResult<Json<CheckoutResponse>> {
    let method = parse_required(&payload.payment_method)?;
    let summary = state.services.bookings.check_out(id, method).await?;
    Ok(Json(summary.into()))
}

#[utoipa::path(
    post,
    path = "/api/bookings/{id}/cancel",
    tag = "Bookings",
    params(("id" = i64, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Booking cancelled, with the refund if money was taken", body = CancellationResponse),
        (status = 404, description = "Booking not found", body = ErrorResponse),
        (status = 409, description = "Only booked stays can be cancelled", body = ErrorResponse)
    )
)]
pub async fn cancel_booking(
    State(state): State<Arc<GatewayState>>,
    ApiPath(id): ApiPath<i64>,
) -> GatewayResult<Json<CancellationResponse>> {
    let cancellation = state.services.bookings.cancel(id).await?;
    Ok(Json(cancellation.into()))
}
