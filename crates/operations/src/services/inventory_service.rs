//! Inventory service: stock items, purchase orders and adjustments.

use crate::error::{OperationError, OperationResult};
use crate::validation;
use hotel_config::OperationsConfig;
use hotel_database::entities::{
    InventoryChanges, InventoryFilter, InventoryItem, InventoryTransaction,
    InventoryTransactionFilter, NewInventoryItem, NewOrder, ReceivedOrder, StockAdjustment,
};
use hotel_database::InventoryRepository;
use sqlx::SqlitePool;
use tracing::{info, warn};

#[derive(Clone)]
pub struct InventoryService {
    repository: InventoryRepository,
    config: OperationsConfig,
}

impl InventoryService {
    pub fn new(pool: SqlitePool, config: OperationsConfig) -> Self {
        Self {
            repository: InventoryRepository::new(pool),
            config,
        }
    }

    pub async fn create_item(&self, request: NewInventoryItem) -> OperationResult<InventoryItem> {
        let request = NewInventoryItem {
            hotel_id: request.hotel_id,
            name: validation::required_text("name", &request.name, 120)?,
            category: validation::required_text("category", &request.category, 60)?,
            unit: validation::required_text("unit", &request.unit, 30)?,
            quantity: validation::non_negative("quantity", request.quantity)?,
            reorder_level: validation::non_negative("reorder_level", request.reorder_level)?,
            unit_cost_cents: validation::non_negative("unit_cost_cents", request.unit_cost_cents)?,
        };

        Ok(self.repository.create(&request).await?)
    }

    pub async fn get_item(&self, id: i64) -> OperationResult<InventoryItem> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| OperationError::not_found("inventory item", id))
    }

    /// List items; the configured low-stock override wins over per-item reorder levels.
    pub async fn list_items(
        &self,
        filter: InventoryFilter,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> OperationResult<Vec<InventoryItem>> {
        let filter = InventoryFilter {
            low_stock_threshold: filter
                .low_stock_threshold
                .or(self.config.low_stock_threshold_override),
            ..filter
        };
        let page = crate::page(&self.config, limit, offset);
        Ok(self.repository.list(&filter, page).await?)
    }

    pub async fn update_item(&self, id: i64, changes: InventoryChanges) -> OperationResult<InventoryItem> {
        let changes = InventoryChanges {
            name: changes
                .name
                .map(|v| validation::required_text("name", &v, 120))
                .transpose()?,
            category: changes
                .category
                .map(|v| validation::required_text("category", &v, 60))
                .transpose()?,
            unit: changes
                .unit
                .map(|v| validation::required_text("unit", &v, 30))
                .transpose()?,
            reorder_level: changes
                .reorder_level
                .map(|v| validation::non_negative("reorder_level", v))
                .transpose()?,
            unit_cost_cents: changes
                .unit_cost_cents
                .map(|v| validation::non_negative("unit_cost_cents", v))
                .transpose()?,
        };

        Ok(self.repository.update(id, &changes).await?)
    }

    pub async fn delete_item(&self, id: i64) -> OperationResult<()> {
        Ok(self.repository.delete(id).await?)
    }

    pub async fn place_order(&self, order: NewOrder) -> OperationResult<InventoryTransaction> {
        let order = NewOrder {
            inventory_id: order.inventory_id,
            quantity: validation::positive("quantity", order.quantity)?,
            unit_cost_cents: order
                .unit_cost_cents
                .map(|v| validation::non_negative("unit_cost_cents", v))
                .transpose()?,
            supplier: validation::optional_text("supplier", order.supplier.as_deref(), 120)?,
            note: validation::optional_text("note", order.note.as_deref(), 500)?,
        };

        Ok(self.repository.place_order(&order).await?)
    }

    /// Receive a pending order into stock and book the spend in the ledger.
    pub async fn receive_order(&self, transaction_id: i64) -> OperationResult<ReceivedOrder> {
        let received = self
            .repository
            .receive_order(transaction_id, crate::today())
            .await
            .map_err(|e| {
                warn!(transaction_id, error = %e, "receive order failed");
                OperationError::from(e)
            })?;

        if received.item.is_low_stock(self.config.low_stock_threshold_override) {
            info!(
                item_id = received.item.id,
                quantity = received.item.quantity,
                "item still at or below its reorder level after receiving"
            );
        }
        Ok(received)
    }

    pub async fn cancel_order(&self, transaction_id: i64) -> OperationResult<InventoryTransaction> {
        Ok(self.repository.cancel_order(transaction_id).await?)
    }

    pub async fn adjust_stock(&self, adjustment: StockAdjustment) -> OperationResult<InventoryTransaction> {
        if adjustment.delta == 0 {
            return Err(OperationError::validation("delta cannot be zero"));
        }
        let adjustment = StockAdjustment {
            note: validation::optional_text("note", adjustment.note.as_deref(), 500)?,
            ..adjustment
        };

        Ok(self.repository.adjust_stock(&adjustment).await?)
    }

    pub async fn get_transaction(&self, id: i64) -> OperationResult<InventoryTransaction> {
        self.repository
            .find_transaction(id)
            .await?
            .ok_or_else(|| OperationError::not_found("inventory transaction", id))
    }

    pub async fn list_transactions(
        &self,
        filter: InventoryTransactionFilter,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> OperationResult<Vec<InventoryTransaction>> {
        let page = crate::page(&self.config, limit, offset);
        Ok(self.repository.list_transactions(&filter, page).await?)
    }
}
