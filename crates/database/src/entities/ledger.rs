//! Bill and maintenance ledger entity definitions

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

text_enum! {
    pub enum LedgerCategory {
        Utility => "utility",
        Maintenance => "maintenance",
        Inventory => "inventory",
        Salary => "salary",
        Other => "other",
    }
}

/// Append-only expense row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct LedgerEntry {
    pub id: i64,
    pub hotel_id: i64,
    pub category: LedgerCategory,
    pub description: String,
    pub amount_cents: i64,
    pub inventory_transaction_id: Option<i64>,
    pub recorded_on: NaiveDate,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewLedgerEntry {
    pub hotel_id: i64,
    pub category: LedgerCategory,
    pub description: String,
    pub amount_cents: i64,
    pub inventory_transaction_id: Option<i64>,
    pub recorded_on: NaiveDate,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LedgerFilter {
    pub hotel_id: Option<i64>,
    pub category: Option<LedgerCategory>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}
