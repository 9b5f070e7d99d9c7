//! Financial reports, occupancy and role dashboards

use axum::{extract::State, routing::get, Json, Router};
use chrono::NaiveDate;
use hotel_database::entities::{
    AdminDashboard, CategoryTotal, DepartmentHeadcount, FinancialSummary, HotelSummaryRow,
    ManagerDashboard, OccupancyReport, ReceptionistDashboard,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

use super::ApiQuery;
use crate::error::{ErrorResponse, GatewayResult};
use crate::state::GatewayState;

#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryTotalResponse {
    pub category: String,
    pub amount_cents: i64,
}

impl From<CategoryTotal> for CategoryTotalResponse {
    fn from(total: CategoryTotal) -> Self {
        Self {
            category: total.category.to_string(),
            amount_cents: total.amount_cents,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FinancialSummaryResponse {
    pub hotel_id: i64,
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub revenue_cents: i64,
    pub refunds_cents: i64,
    pub net_revenue_cents: i64,
    pub expenses: Vec<CategoryTotalResponse>,
    pub total_expenses_cents: i64,
    pub profit_cents: i64,
}

impl From<FinancialSummary> for FinancialSummaryResponse {
    fn from(summary: FinancialSummary) -> Self {
        Self {
            hotel_id: summary.hotel_id,
            from: summary.from,
            to: summary.to,
            revenue_cents: summary.revenue_cents,
            refunds_cents: summary.refunds_cents,
            net_revenue_cents: summary.net_revenue_cents,
            expenses: summary.expenses.into_iter().map(Into::into).collect(),
            total_expenses_cents: summary.total_expenses_cents,
            profit_cents: summary.profit_cents,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OccupancyResponse {
    pub hotel_id: i64,
    pub date: NaiveDate,
    pub total_rooms: i64,
    pub occupied: i64,
    pub reserved: i64,
    pub maintenance: i64,
    pub available: i64,
    /// Percentage of rooms occupied, two decimals.
    pub occupancy_rate: f64,
}

impl From<OccupancyReport> for OccupancyResponse {
    fn from(report: OccupancyReport) -> Self {
        Self {
            hotel_id: report.hotel_id,
            date: report.date,
            total_rooms: report.total_rooms,
            occupied: report.occupied,
            reserved: report.reserved,
            maintenance: report.maintenance,
            available: report.available,
            occupancy_rate: report.occupancy_rate,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReceptionistDashboardResponse {
    pub hotel_id: i64,
    pub date: NaiveDate,
    pub arrivals: i64,
    pub departures: i64,
    pub in_house_guests: i64,
    pub available_rooms: i64,
}

impl From<ReceptionistDashboard> for ReceptionistDashboardResponse {
    fn from(dashboard: ReceptionistDashboard) -> Self {
        Self {
            hotel_id: dashboard.hotel_id,
            date: dashboard.date,
            arrivals: dashboard.arrivals,
            departures: dashboard.departures,
            in_house_guests: dashboard.in_house_guests,
            available_rooms: dashboard.available_rooms,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HeadcountResponse {
    pub department: String,
    pub employees: i64,
}

impl From<DepartmentHeadcount> for HeadcountResponse {
    fn from(headcount: DepartmentHeadcount) -> Self {
        Self {
            department: headcount.department,
            employees: headcount.employees,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ManagerDashboardResponse {
    pub hotel_id: i64,
    pub date: NaiveDate,
    pub headcount: Vec<HeadcountResponse>,
    pub low_stock_items: i64,
    pub pending_orders: i64,
    pub pending_order_value_cents: i64,
    pub month_revenue_cents: i64,
    pub month_expenses_cents: i64,
}

impl From<ManagerDashboard> for ManagerDashboardResponse {
    fn from(dashboard: ManagerDashboard) -> Self {
        Self {
            hotel_id: dashboard.hotel_id,
            date: dashboard.date,
            headcount: dashboard.headcount.into_iter().map(Into::into).collect(),
            low_stock_items: dashboard.low_stock_items,
            pending_orders: dashboard.pending_orders,
            pending_order_value_cents: dashboard.pending_order_value_cents,
            month_revenue_cents: dashboard.month_revenue_cents,
            month_expenses_cents: dashboard.month_expenses_cents,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HotelSummaryResponse {
    pub hotel_id: i64,
    pub name: String,
    pub city: String,
    pub rooms: i64,
    pub employees: i64,
    pub revenue_cents: i64,
    pub expenses_cents: i64,
}

impl From<HotelSummaryRow> for HotelSummaryResponse {
    fn from(row: HotelSummaryRow) -> Self {
        Self {
            hotel_id: row.hotel_id,
            name: row.name,
            city: row.city,
            rooms: row.rooms,
            employees: row.employees,
            revenue_cents: row.revenue_cents,
            expenses_cents: row.expenses_cents,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AdminDashboardResponse {
    pub hotels: i64,
    pub rooms: i64,
    pub active_employees: i64,
    pub revenue_cents: i64,
    pub expenses_cents: i64,
    pub per_hotel: Vec<HotelSummaryResponse>,
}

impl From<AdminDashboard> for AdminDashboardResponse {
    fn from(dashboard: AdminDashboard) -> Self {
        Self {
            hotels: dashboard.hotels,
            rooms: dashboard.rooms,
            active_employees: dashboard.active_employees,
            revenue_cents: dashboard.revenue_cents,
            expenses_cents: dashboard.expenses_cents,
            per_hotel: dashboard.per_hotel.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct FinancialSummaryQuery {
    pub hotel_id: i64,
    pub from: NaiveDate,
    pub to: NaiveDate,
}

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct HotelDayQuery {
    pub hotel_id: i64,
    /// Defaults to today.
    pub date: Option<NaiveDate>,
}

/// Create report routes
pub fn create_report_routes() -> Router<Arc<GatewayState>> {
    Router::new()
        .route("/reports/financial-summary", get(financial_summary))
        .route("/reports/occupancy", get(occupancy))
        .route("/dashboards/receptionist", get(receptionist_dashboard))
        .route("/dashboards/manager", get(manager_dashboard))
        .route("/dashboards/admin", get(admin_dashboard))
}

#[utoipa::path(
    get,
    path = "/api/reports/financial-summary",
    tag = "Reports",
    params(FinancialSummaryQuery),
    responses(
        (status = 200, description = "Revenue, expenses and profit for the period", body = FinancialSummaryResponse),
        (status = 400, description = "Invalid period", body = ErrorResponse)
    )
)]
pub async fn financial_summary(
    State(state): State<Arc<GatewayState>>,
    ApiQuery(params): ApiQuery<FinancialSummaryQuery>,
) -> GatewayResult<Json<FinancialSummaryResponse>> {
    let summary = state
        .services
        .reports
        .financial_summary(params.hotel_id, params.from, params.to)
        .await?;
    Ok(Json(summary.into()))
}

#[utoipa::path(
    get,
    path = "/api/reports/occupancy",
    tag = "Reports",
    params(HotelDayQuery),
    responses(
        (status = 200, description = "Room states for the night", body = OccupancyResponse),
        (status = 400, description = "Invalid query", body = ErrorResponse)
    )
)]
pub async fn occupancy(
    State(state): State<Arc<GatewayState>>,
    ApiQuery(params): ApiQuery<HotelDayQuery>,
) -> GatewayResult<Json<OccupancyResponse>> {
    let report = state
        .services
        .reports
        .occupancy(params.hotel_id, params.date)
        .await?;
    Ok(Json(report.into()))
}

#[utoipa::path(
    get,
    path = "/api/dashboards/receptionist",
    tag = "Reports",
    params(HotelDayQuery),
    responses(
        (status = 200, description = "Arrivals, departures and free rooms", body = ReceptionistDashboardResponse),
        (status = 400, description = "Invalid query", body = ErrorResponse)
    )
)]
pub async fn receptionist_dashboard(
    State(state): State<Arc<GatewayState>>,
    ApiQuery(params): ApiQuery<HotelDayQuery>,
) -> GatewayResult<Json<ReceptionistDashboardResponse>> {
    let dashboard = state
        .services
        .reports
        .receptionist_dashboard(params.hotel_id, params.date)
        .await?;
    Ok(Json(dashboard.into()))
}

#[utoipa::path(
    get,
    path = "/api/dashboards/manager",
    tag = "Reports",
    params(HotelDayQuery),
    responses(
        (status = 200, description = "Staffing, stock and month-to-date money", body = ManagerDashboardResponse),
        (status = 400, description = "Invalid query", body = ErrorResponse)
    )
)]
pub async fn manager_dashboard(
    State(state): State<Arc<GatewayState>>,
    ApiQuery(params): ApiQuery<HotelDayQuery>,
) -> GatewayResult<Json<ManagerDashboardResponse>> {
    let dashboard = state
        .services
        .reports
        .manager_dashboard(params.hotel_id, params.date)
        .await?;
    Ok(Json(dashboard.into()))
}

#[utoipa::path(
    get,
    path = "/api/dashboards/admin",
    tag = "Reports",
    responses(
        (status = 200, description = "Totals across every hotel", body = AdminDashboardResponse)
    )
)]
pub async fn admin_dashboard(
    State(state): State<Arc<GatewayState>>,
) -> GatewayResult<Json<AdminDashboardResponse>> {
    let dashboard = state.services.reports.admin_dashboard().await?;
    Ok(Json(dashboard.into()))
}
