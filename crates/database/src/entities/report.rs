//! Aggregated report and dashboard rows

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ledger::LedgerCategory;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct CategoryTotal {
    pub category: LedgerCategory,
    pub amount_cents: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialSummary {
    pub hotel_id: i64,
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub revenue_cents: i64,
    pub refunds_cents: i64,
    pub net_revenue_cents: i64,
    pub expenses: Vec<CategoryTotal>,
    pub total_expenses_cents: i64,
    pub profit_cents: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OccupancyReport {
    pub hotel_id: i64,
    pub date: NaiveDate,
    pub total_rooms: i64,
    pub occupied: i64,
    pub reserved: i64,
    pub maintenance: i64,
    pub available: i64,
    pub occupancy_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceptionistDashboard {
    pub hotel_id: i64,
    pub date: NaiveDate,
    pub arrivals: i64,
    pub departures: i64,
    pub in_house_guests: i64,
    pub available_rooms: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct DepartmentHeadcount {
    pub department: String,
    pub employees: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManagerDashboard {
    pub hotel_id: i64,
    pub date: NaiveDate,
    pub headcount: Vec<DepartmentHeadcount>,
    pub low_stock_items: i64,
    pub pending_orders: i64,
    pub pending_order_value_cents: i64,
    pub month_revenue_cents: i64,
    pub month_expenses_cents: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct HotelSummaryRow {
    pub hotel_id: i64,
    pub name: String,
    pub city: String,
    pub rooms: i64,
    pub employees: i64,
    pub revenue_cents: i64,
    pub expenses_cents: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminDashboard {
    pub hotels: i64,
    pub rooms: i64,
    pub active_employees: i64,
    pub revenue_cents: i64,
    pub expenses_cents: i64,
    pub per_hotel: Vec<HotelSummaryRow>,
}
