//! Inventory and inventory transaction entity definitions

use serde::{Deserialize, Serialize};

use super::ledger::LedgerEntry;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct InventoryItem {
    pub id: i64,
    pub hotel_id: i64,
    pub name: String,
    pub category: String,
    pub unit: String,
    pub quantity: i64,
    pub reorder_level: i64,
    pub unit_cost_cents: i64,
    pub created_at: String,
    pub updated_at: String,
}

impl InventoryItem {
    pub fn is_low_stock(&self, threshold_override: Option<i64>) -> bool {
        self.quantity <= threshold_override.unwrap_or(self.reorder_level)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewInventoryItem {
    pub hotel_id: i64,
    pub name: String,
    pub category: String,
    pub unit: String,
    pub quantity: i64,
    pub reorder_level: i64,
    pub unit_cost_cents: i64,
}

/// Stock quantity is not editable here; use a [`StockAdjustment`] or receive an order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InventoryChanges {
    pub name: Option<String>,
    pub category: Option<String>,
    pub unit: Option<String>,
    pub reorder_level: Option<i64>,
    pub unit_cost_cents: Option<i64>,
}

impl InventoryChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.category.is_none()
            && self.unit.is_none()
            && self.reorder_level.is_none()
            && self.unit_cost_cents.is_none()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InventoryFilter {
    pub hotel_id: Option<i64>,
    pub category: Option<String>,
    pub low_stock_only: bool,
    pub low_stock_threshold: Option<i64>,
}

text_enum! {
    pub enum InventoryTransactionKind {
        Order => "order",
        Adjustment => "adjustment",
    }
}

text_enum! {
    pub enum InventoryTransactionStatus {
        Pending => "pending",
        Completed => "completed",
        Cancelled => "cancelled",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct InventoryTransaction {
    pub id: i64,
    pub inventory_id: i64,
    pub hotel_id: i64,
    pub item_name: String,
    pub kind: InventoryTransactionKind,
    pub quantity: i64,
    pub unit_cost_cents: i64,
    pub total_cents: i64,
    pub status: InventoryTransactionStatus,
    pub supplier: Option<String>,
    pub note: Option<String>,
    pub created_at: String,
    pub completed_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewOrder {
    pub inventory_id: i64,
    pub quantity: i64,
    /// Falls back to the item's current unit cost.
    pub unit_cost_cents: Option<i64>,
    pub supplier: Option<String>,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockAdjustment {
    pub inventory_id: i64,
    pub delta: i64,
    pub note: Option<String>,
}

/// Outcome of receiving a pending order. Orders with a zero total book no
/// ledger expense.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceivedOrder {
    pub transaction: InventoryTransaction,
    pub item: InventoryItem,
    pub ledger_entry: Option<LedgerEntry>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InventoryTransactionFilter {
    pub inventory_id: Option<i64>,
    pub hotel_id: Option<i64>,
    pub status: Option<InventoryTransactionStatus>,
    pub kind: Option<InventoryTransactionKind>,
}
