//! REST API endpoints for the gateway

pub mod bookings;
pub mod departments;
pub mod employees;
pub mod health;
pub mod hotels;
pub mod inventory;
pub mod ledger;
pub mod reports;
pub mod rooms;
pub mod transactions;

use axum::extract::{FromRequest, FromRequestParts};
use axum::Router;
use hotel_database::DatabaseError;
use std::str::FromStr;
use std::sync::Arc;

use crate::error::{GatewayError, GatewayResult};
use crate::state::GatewayState;

/// Create all REST API routes
pub fn create_rest_routes() -> Router<Arc<GatewayState>> {
    Router::new()
        .merge(hotels::create_hotel_routes())
        .merge(rooms::create_room_routes())
        .merge(departments::create_department_routes())
        .merge(employees::create_employee_routes())
        .merge(inventory::create_inventory_routes())
        .merge(bookings::create_booking_routes())
        .merge(transactions::create_transaction_routes())
        .merge(ledger::create_ledger_routes())
        .merge(reports::create_report_routes())
}

/// JSON body extractor whose rejections render as [`GatewayError`].
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(GatewayError))]
pub struct ApiJson<T>(pub T);

/// Query string extractor whose rejections render as [`GatewayError`].
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(GatewayError))]
pub struct ApiQuery<T>(pub T);

/// Path extractor whose rejections render as [`GatewayError`].
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(GatewayError))]
pub struct ApiPath<T>(pub T);

/// Parse an optional wire value into one of the stored text enums.
pub(crate) fn parse_optional<T>(value: Option<&str>) -> GatewayResult<Option<T>>
where
    T: FromStr<Err = DatabaseError>,
{
    value.map(parse_required).transpose()
}

pub(crate) fn parse_required<T>(value: &str) -> GatewayResult<T>
where
    T: FromStr<Err = DatabaseError>,
{
    value.parse::<T>().map_err(GatewayError::from)
}
