//! # Hotel Gateway Crate
//!
//! HTTP surface of the hotel backend. Routes JSON requests to the domain
//! services in `hotel-operations` and maps their errors onto status codes.
//!
//! ## Architecture
//!
//! - **REST**: endpoints under `/api` with OpenAPI documentation
//! - **State**: shared pool and services
//! - **Middleware**: CORS, request logging and tracing
//!
//! ## Usage
//!
//! ```rust,no_run
//! # async fn demo() -> anyhow::Result<()> {
//! use hotel_gateway::{create_router, GatewayState};
//!
//! let config = hotel_config::load()?;
//! let state = GatewayState::from_config(&config).await?;
//! let app = create_router(state);
//!
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:7070").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod middleware;
pub mod rest;
pub mod state;

pub use error::{ErrorResponse, GatewayError, GatewayResult};
pub use state::GatewayState;

use axum::{middleware as axum_middleware, routing::get, Router};
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        rest::health::health_check,
        rest::hotels::list_hotels,
        rest::hotels::create_hotel,
        rest::hotels::get_hotel,
        rest::hotels::update_hotel,
        rest::hotels::delete_hotel,
        rest::rooms::list_rooms,
        rest::rooms::create_room,
        rest::rooms::get_room,
        rest::rooms::update_room,
        rest::rooms::delete_room,
        rest::rooms::available_rooms,
        rest::departments::create_department,
        rest::departments::get_department,
        rest::departments::list_departments,
        rest::departments::find_department_by_name,
        rest::employees::list_employees,
        rest::employees::create_employee,
        rest::employees::get_employee,
        rest::employees::update_employee,
        rest::employees::deactivate_employee,
        rest::inventory::list_items,
        rest::inventory::create_item,
        rest::inventory::get_item,
        rest::inventory::update_item,
        rest::inventory::delete_item,
        rest::inventory::place_order,
        rest::inventory::adjust_stock,
        rest::inventory::list_inventory_transactions,
        rest::inventory::get_inventory_transaction,
        rest::inventory::receive_order,
        rest::inventory::cancel_order,
        rest::bookings::list_bookings,
        rest::bookings::create_booking,
        rest::bookings::get_booking,
        rest::bookings::find_booking_by_reference,
        rest::bookings::check_in,
        rest::bookings::check_out,
        rest::bookings::cancel_booking,
        rest::transactions::list_transactions,
        rest::transactions::get_transaction,
        rest::transactions::record_payment,
        rest::ledger::list_entries,
        rest::ledger::record_entry,
        rest::ledger::get_entry,
        rest::reports::financial_summary,
        rest::reports::occupancy,
        rest::reports::receptionist_dashboard,
        rest::reports::manager_dashboard,
        rest::reports::admin_dashboard,
    ),
    components(
        schemas(
            ErrorResponse,
            rest::health::HealthResponse,
            rest::hotels::HotelResponse,
            rest::hotels::CreateHotelRequest,
            rest::hotels::UpdateHotelRequest,
            rest::rooms::RoomResponse,
            rest::rooms::CreateRoomRequest,
            rest::rooms::UpdateRoomRequest,
            rest::departments::DepartmentResponse,
            rest::departments::CreateDepartmentRequest,
            rest::employees::EmployeeResponse,
            rest::employees::CreateEmployeeRequest,
            rest::employees::UpdateEmployeeRequest,
            rest::inventory::InventoryItemResponse,
            rest::inventory::InventoryTransactionResponse,
            rest::inventory::ReceivedOrderResponse,
            rest::inventory::CreateItemRequest,
            rest::inventory::UpdateItemRequest,
            rest::inventory::PlaceOrderRequest,
            rest::inventory::AdjustStockRequest,
            rest::bookings::BookingResponse,
            rest::bookings::CheckoutResponse,
            rest::bookings::CancellationResponse,
            rest::bookings::CreateBookingRequest,
            rest::bookings::CheckOutRequest,
            rest::transactions::TransactionResponse,
            rest::transactions::RecordPaymentRequest,
            rest::ledger::LedgerEntryResponse,
            rest::ledger::RecordEntryRequest,
            rest::reports::CategoryTotalResponse,
            rest::reports::FinancialSummaryResponse,
            rest::reports::OccupancyResponse,
            rest::reports::ReceptionistDashboardResponse,
            rest::reports::HeadcountResponse,
            rest::reports::ManagerDashboardResponse,
            rest::reports::HotelSummaryResponse,
            rest::reports::AdminDashboardResponse,
        )
    ),
    tags(
        (name = "Health", description = "Liveness"),
        (name = "Hotels", description = "Hotel properties"),
        (name = "Rooms", description = "Rooms and availability"),
        (name = "Departments", description = "Hotel departments"),
        (name = "Employees", description = "Staff records"),
        (name = "Inventory", description = "Stock, supplier orders and adjustments"),
        (name = "Bookings", description = "Reservations, check-in and check-out"),
        (name = "Transactions", description = "Guest payments and refunds"),
        (name = "Ledger", description = "Bills and maintenance expenses"),
        (name = "Reports", description = "Financial reports and dashboards"),
    ),
    info(
        title = "Hotel Operations API",
        version = "0.1.0",
        description = "Back office and front desk API for a hotel group"
    )
)]
pub struct ApiDoc;

/// Create the main application router with all routes
pub fn create_router(state: GatewayState) -> Router {
    let arc_state = Arc::new(state);

    Router::new()
        .route("/health", get(rest::health::health_check))
        .nest("/api", rest::create_rest_routes())
        .fallback(route_not_found)
        .with_state(arc_state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(middleware::create_cors_middleware())
        .layer(axum_middleware::from_fn(middleware::logging_middleware))
        .layer(middleware::create_trace_middleware())
}

async fn route_not_found(uri: axum::http::Uri) -> GatewayError {
    GatewayError::NotFound(format!("no route for {}", uri.path()))
}
