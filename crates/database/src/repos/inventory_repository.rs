//! Repository for inventory items and their stock transactions.

use crate::entities::{
    InventoryChanges, InventoryFilter, InventoryItem, InventoryTransaction,
    InventoryTransactionFilter, InventoryTransactionKind, InventoryTransactionStatus, LedgerCategory,
    NewInventoryItem, NewLedgerEntry, NewOrder, ReceivedOrder, StockAdjustment,
};
use crate::repos::ensure_hotel_exists;
use crate::repos::ledger_repository::insert_entry;
use crate::types::{now_timestamp, DatabaseError, DatabaseResult, Page};
use chrono::NaiveDate;
use sqlx::{QueryBuilder, Sqlite, SqliteConnection, SqlitePool};
use tracing::{info, warn};

const ITEM_COLUMNS: &str =
    "id, hotel_id, name, category, unit, quantity, reorder_level, unit_cost_cents, created_at, updated_at";

const TRANSACTION_SELECT: &str = "SELECT t.id, t.inventory_id, i.hotel_id, i.name AS item_name,
        t.kind, t.quantity, t.unit_cost_cents, t.total_cents, t.status, t.supplier, t.note,
        t.created_at, t.completed_at
     FROM inventory_transactions t
     JOIN inventory i ON i.id = t.inventory_id";

/// Repository for inventory database operations
#[derive(Clone)]
pub struct InventoryRepository {
    pool: SqlitePool,
}

impl InventoryRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: i64) -> DatabaseResult<Option<InventoryItem>> {
        let mut conn = self.pool.acquire().await?;
        fetch_item(&mut conn, id).await
    }

    /// With `low_stock_only`, keeps items at or below their reorder level, or at
    /// or below `low_stock_threshold` when one is given.
    pub async fn list(&self, filter: &InventoryFilter, page: Page) -> DatabaseResult<Vec<InventoryItem>> {
        let mut query = QueryBuilder::<Sqlite>::new(format!(
            "SELECT {ITEM_COLUMNS} FROM inventory WHERE 1 = 1"
        ));

        if let Some(hotel_id) = filter.hotel_id {
            query.push(" AND hotel_id = ").push_bind(hotel_id);
        }
        if let Some(category) = &filter.category {
            query
                .push(" AND category = ")
                .push_bind(category)
                .push(" COLLATE NOCASE");
        }
        if filter.low_stock_only {
            match filter.low_stock_threshold {
                Some(threshold) => {
                    query.push(" AND quantity <= ").push_bind(threshold);
                }
                None => {
                    query.push(" AND quantity <= reorder_level");
                }
            }
        }

        query
            .push(" ORDER BY name, id LIMIT ")
            .push_bind(page.limit)
            .push(" OFFSET ")
            .push_bind(page.offset);

        let items = query.build_query_as::<InventoryItem>().fetch_all(&self.pool).await?;
        Ok(items)
    }

    pub async fn create(&self, request: &NewInventoryItem) -> DatabaseResult<InventoryItem> {
        let mut tx = self.pool.begin().await?;
        ensure_hotel_exists(&mut tx, request.hotel_id).await?;

        let now = now_timestamp();
        let result = sqlx::query(
            "INSERT INTO inventory (hotel_id, name, category, unit, quantity, reorder_level, unit_cost_cents, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(request.hotel_id)
        .bind(&request.name)
        .bind(&request.category)
        .bind(&request.unit)
        .bind(request.quantity)
        .bind(request.reorder_level)
        .bind(request.unit_cost_cents)
        .bind(&now)
        .bind(&now)
        .execute(&mut *tx)
        .await
        .map_err(|e| duplicate_item(e, &request.name, request.hotel_id))?;
        tx.commit().await?;

        let item_id = result.last_insert_rowid();
        info!(item_id, hotel_id = request.hotel_id, name = %request.name, "created inventory item");

        Ok(InventoryItem {
            id: item_id,
            hotel_id: request.hotel_id,
            name: request.name.clone(),
            category: request.category.clone(),
            unit: request.unit.clone(),
            quantity: request.quantity,
            reorder_level: request.reorder_level,
            unit_cost_cents: request.unit_cost_cents,
            created_at: now.clone(),
            updated_at: now,
        })
    }

    pub async fn update(&self, id: i64, changes: &InventoryChanges) -> DatabaseResult<InventoryItem> {
        let mut tx = self.pool.begin().await?;
        let item = fetch_item(&mut tx, id)
            .await?
            .ok_or_else(|| DatabaseError::not_found("inventory item", id))?;

        if changes.is_empty() {
            return Ok(item);
        }

        let now = now_timestamp();
        let mut query = QueryBuilder::<Sqlite>::new("UPDATE inventory SET ");
        {
            let mut set = query.separated(", ");
            if let Some(name) = &changes.name {
                set.push("name = ").push_bind_unseparated(name);
            }
            if let Some(category) = &changes.category {
                set.push("category = ").push_bind_unseparated(category);
            }
            if let Some(unit) = &changes.unit {
                set.push("unit = ").push_bind_unseparated(unit);
            }
            if let Some(reorder_level) = changes.reorder_level {
                set.push("reorder_level = ").push_bind_unseparated(reorder_level);
            }
            if let Some(unit_cost_cents) = changes.unit_cost_cents {
                set.push("unit_cost_cents = ").push_bind_unseparated(unit_cost_cents);
            }
            set.push("updated_at = ").push_bind_unseparated(&now);
        }
        query.push(" WHERE id = ").push_bind(id);
        query.build().execute(&mut *tx).await.map_err(|e| {
            duplicate_item(e, changes.name.as_deref().unwrap_or(item.name.as_str()), item.hotel_id)
        })?;

        let updated = fetch_item(&mut tx, id)
            .await?
            .ok_or_else(|| DatabaseError::not_found("inventory item", id))?;
        tx.commit().await?;

        info!(item_id = id, "updated inventory item");
        Ok(updated)
    }

    /// Remove an item that has never been ordered or adjusted
    pub async fn delete(&self, id: i64) -> DatabaseResult<()> {
        let mut tx = self.pool.begin().await?;

        let history: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM inventory_transactions WHERE inventory_id = ?")
                .bind(id)
                .fetch_one(&mut *tx)
                .await?;
        if history > 0 {
            return Err(DatabaseError::conflict(format!(
                "inventory item {id} has {history} stock transactions"
            )));
        }

        let result = sqlx::query("DELETE FROM inventory WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("inventory item", id));
        }

        tx.commit().await?;
        info!(item_id = id, "deleted inventory item");
        Ok(())
    }

    /// Record a pending purchase order. Stock does not move until it is received.
    pub async fn place_order(&self, order: &NewOrder) -> DatabaseResult<InventoryTransaction> {
        let mut tx = self.pool.begin().await?;
        let item = fetch_item(&mut tx, order.inventory_id)
            .await?
            .ok_or_else(|| DatabaseError::not_found("inventory item", order.inventory_id))?;

        let unit_cost_cents = order.unit_cost_cents.unwrap_or(item.unit_cost_cents);
        let total_cents = order
            .quantity
            .checked_mul(unit_cost_cents)
            .ok_or_else(|| DatabaseError::ValidationError("order total overflows".to_string()))?;

        let result = sqlx::query(
            "INSERT INTO inventory_transactions (inventory_id, kind, quantity, unit_cost_cents, total_cents, status, supplier, note, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(item.id)
        .bind(InventoryTransactionKind::Order)
        .bind(order.quantity)
        .bind(unit_cost_cents)
        .bind(total_cents)
        .bind(InventoryTransactionStatus::Pending)
        .bind(&order.supplier)
        .bind(&order.note)
        .bind(now_timestamp())
        .execute(&mut *tx)
        .await?;

        let transaction_id = result.last_insert_rowid();
        let placed = fetch_transaction(&mut tx, transaction_id)
            .await?
            .ok_or_else(|| DatabaseError::not_found("inventory transaction", transaction_id))?;
        tx.commit().await?;

        info!(
            transaction_id,
            item_id = item.id,
            quantity = order.quantity,
            total_cents,
            "placed inventory order"
        );
        Ok(placed)
    }

    /// Receive a pending order: mark it completed, add the quantity to stock,
    /// take the order's unit cost as the item's cost, and book the spend in the
    /// ledger. All of it commits together or not at all.
    pub async fn receive_order(&self, transaction_id: i64, received_on: NaiveDate) -> DatabaseResult<ReceivedOrder> {
        let mut tx = self.pool.begin().await?;

        let order = fetch_transaction(&mut tx, transaction_id)
            .await?
            .ok_or_else(|| DatabaseError::not_found("inventory transaction", transaction_id))?;
        if order.kind != InventoryTransactionKind::Order {
            return Err(DatabaseError::conflict(format!(
                "inventory transaction {transaction_id} is an {} and cannot be received",
                order.kind
            )));
        }

        let now = now_timestamp();
        let claimed = sqlx::query(
            "UPDATE inventory_transactions SET status = ?, completed_at = ? WHERE id = ? AND status = ?",
        )
        .bind(InventoryTransactionStatus::Completed)
        .bind(&now)
        .bind(transaction_id)
        .bind(InventoryTransactionStatus::Pending)
        .execute(&mut *tx)
        .await?;
        if claimed.rows_affected() == 0 {
            warn!(transaction_id, status = %order.status, "order is not pending");
            return Err(DatabaseError::conflict(format!(
                "order {transaction_id} is already {}",
                order.status
            )));
        }

        sqlx::query(
            "UPDATE inventory SET quantity = quantity + ?, unit_cost_cents = ?, updated_at = ? WHERE id = ?",
        )
        .bind(order.quantity)
        .bind(order.unit_cost_cents)
        .bind(&now)
        .bind(order.inventory_id)
        .execute(&mut *tx)
        .await?;

        let supplier = order
            .supplier
            .as_deref()
            .map(|s| format!(" from {s}"))
            .unwrap_or_default();
        // Free stock (samples, donations) moves without a ledger expense.
        let ledger_entry = if order.total_cents > 0 {
            let entry = insert_entry(
                &mut tx,
                &NewLedgerEntry {
                    hotel_id: order.hotel_id,
                    category: LedgerCategory::Inventory,
                    description: format!("Received {} x {}{}", order.quantity, order.item_name, supplier),
                    amount_cents: order.total_cents,
                    inventory_transaction_id: Some(order.id),
                    recorded_on: received_on,
                },
            )
            .await?;
            Some(entry)
        } else {
            None
        };

        let transaction = fetch_transaction(&mut tx, transaction_id)
            .await?
            .ok_or_else(|| DatabaseError::not_found("inventory transaction", transaction_id))?;
        let item = fetch_item(&mut tx, order.inventory_id)
            .await?
            .ok_or_else(|| DatabaseError::not_found("inventory item", order.inventory_id))?;
        tx.commit().await?;

        info!(
            transaction_id,
            item_id = item.id,
            quantity = item.quantity,
            ledger_entry_id = ledger_entry.as_ref().map(|entry| entry.id),
            "received inventory order"
        );
        Ok(ReceivedOrder {
            transaction,
            item,
            ledger_entry,
        })
    }

    pub async fn cancel_order(&self, transaction_id: i64) -> DatabaseResult<InventoryTransaction> {
        let mut tx = self.pool.begin().await?;

        let order = fetch_transaction(&mut tx, transaction_id)
            .await?
            .ok_or_else(|| DatabaseError::not_found("inventory transaction", transaction_id))?;

        let result = sqlx::query(
            "UPDATE inventory_transactions SET status = ?, completed_at = ? WHERE id = ? AND kind = ? AND status = ?",
        )
        .bind(InventoryTransactionStatus::Cancelled)
        .bind(now_timestamp())
        .bind(transaction_id)
        .bind(InventoryTransactionKind::Order)
        .bind(InventoryTransactionStatus::Pending)
        .execute(&mut *tx)
        .await?;
        if result.rows_affected() == 0 {
            return Err(DatabaseError::conflict(format!(
                "inventory transaction {transaction_id} is a {} {} and cannot be cancelled",
                order.status, order.kind
            )));
        }

        let cancelled = fetch_transaction(&mut tx, transaction_id)
            .await?
            .ok_or_else(|| DatabaseError::not_found("inventory transaction", transaction_id))?;
        tx.commit().await?;

        info!(transaction_id, "cancelled inventory order");
        Ok(cancelled)
    }

    /// Apply a manual stock correction. Stock never goes below zero.
    pub async fn adjust_stock(&self, adjustment: &StockAdjustment) -> DatabaseResult<InventoryTransaction> {
        let mut tx = self.pool.begin().await?;
        let item = fetch_item(&mut tx, adjustment.inventory_id)
            .await?
            .ok_or_else(|| DatabaseError::not_found("inventory item", adjustment.inventory_id))?;

        let new_quantity = item.quantity.checked_add(adjustment.delta).ok_or_else(|| {
            DatabaseError::ValidationError(format!(
                "adjusting {} by {} overflows the stock count",
                item.name, adjustment.delta
            ))
        })?;
        if new_quantity < 0 {
            return Err(DatabaseError::conflict(format!(
                "adjusting {} by {} would leave {} in stock",
                item.name, adjustment.delta, new_quantity
            )));
        }

        let now = now_timestamp();
        sqlx::query("UPDATE inventory SET quantity = ?, updated_at = ? WHERE id = ?")
            .bind(new_quantity)
            .bind(&now)
            .bind(item.id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query(
            "INSERT INTO inventory_transactions (inventory_id, kind, quantity, unit_cost_cents, total_cents, status, note, created_at, completed_at)
             VALUES (?, ?, ?, ?, 0, ?, ?, ?, ?)",
        )
        .bind(item.id)
        .bind(InventoryTransactionKind::Adjustment)
        .bind(adjustment.delta)
        .bind(item.unit_cost_cents)
        .bind(InventoryTransactionStatus::Completed)
        .bind(&adjustment.note)
        .bind(&now)
        .bind(&now)
        .execute(&mut *tx)
        .await?;

        let transaction_id = result.last_insert_rowid();
        let recorded = fetch_transaction(&mut tx, transaction_id)
            .await?
            .ok_or_else(|| DatabaseError::not_found("inventory transaction", transaction_id))?;
        tx.commit().await?;

        info!(
            item_id = item.id,
            delta = adjustment.delta,
            quantity = new_quantity,
            "adjusted stock"
        );
        Ok(recorded)
    }

    pub async fn find_transaction(&self, id: i64) -> DatabaseResult<Option<InventoryTransaction>> {
        let mut conn = self.pool.acquire().await?;
        fetch_transaction(&mut conn, id).await
    }

    pub async fn list_transactions(
        &self,
        filter: &InventoryTransactionFilter,
        page: Page,
    ) -> DatabaseResult<Vec<InventoryTransaction>> {
        let mut query = QueryBuilder::<Sqlite>::new(format!("{TRANSACTION_SELECT} WHERE 1 = 1"));

        if let Some(inventory_id) = filter.inventory_id {
            query.push(" AND t.inventory_id = ").push_bind(inventory_id);
        }
        if let Some(hotel_id) = filter.hotel_id {
            query.push(" AND i.hotel_id = ").push_bind(hotel_id);
        }
        if let Some(status) = filter.status {
            query.push(" AND t.status = ").push_bind(status);
        }
        if let Some(kind) = filter.kind {
            query.push(" AND t.kind = ").push_bind(kind);
        }

        query
            .push(" ORDER BY t.created_at DESC, t.id DESC LIMIT ")
            .push_bind(page.limit)
            .push(" OFFSET ")
            .push_bind(page.offset);

        let transactions = query
            .build_query_as::<InventoryTransaction>()
            .fetch_all(&self.pool)
            .await?;
        Ok(transactions)
    }
}

async fn fetch_item(conn: &mut SqliteConnection, id: i64) -> DatabaseResult<Option<InventoryItem>> {
    let item = sqlx::query_as::<_, InventoryItem>(&format!(
        "SELECT {ITEM_COLUMNS} FROM inventory WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(conn)
    .await?;
    Ok(item)
}

async fn fetch_transaction(
    conn: &mut SqliteConnection,
    id: i64,
) -> DatabaseResult<Option<InventoryTransaction>> {
    let transaction = sqlx::query_as::<_, InventoryTransaction>(&format!(
        "{TRANSACTION_SELECT} WHERE t.id = ?"
    ))
    .bind(id)
    .fetch_optional(conn)
    .await?;
    Ok(transaction)
}

fn duplicate_item(error: sqlx::Error, name: &str, hotel_id: i64) -> DatabaseError {
    match DatabaseError::from(error) {
        DatabaseError::Duplicate(_) => DatabaseError::Duplicate(format!(
            "inventory item '{name}' already exists in hotel {hotel_id}"
        )),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{date, TestDatabase};

    fn order(inventory_id: i64, quantity: i64, unit_cost_cents: Option<i64>) -> NewOrder {
        NewOrder {
            inventory_id,
            quantity,
            unit_cost_cents,
            supplier: Some("Linen Co".to_string()),
            note: None,
        }
    }

    #[tokio::test]
    async fn test_create_and_update_item_keeps_quantity() {
        let db = TestDatabase::new().await;
        let hotel_id = db.insert_hotel("Harbour View").await;
        let repo = InventoryRepository::new(db.pool.clone());

        let item = repo
            .create(&NewInventoryItem {
                hotel_id,
                name: "Towels".to_string(),
                category: "housekeeping".to_string(),
                unit: "piece".to_string(),
                quantity: 40,
                reorder_level: 20,
                unit_cost_cents: 650,
            })
            .await
            .unwrap();

        let updated = repo
            .update(
                item.id,
                &InventoryChanges {
                    reorder_level: Some(30),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.reorder_level, 30);
        assert_eq!(updated.quantity, 40);

        let duplicate = repo
            .create(&NewInventoryItem {
                hotel_id,
                name: "towels".to_string(),
                category: "housekeeping".to_string(),
                unit: "piece".to_string(),
                quantity: 0,
                reorder_level: 0,
                unit_cost_cents: 0,
            })
            .await;
        assert!(matches!(duplicate, Err(DatabaseError::Duplicate(_))));
    }

    #[tokio::test]
    async fn test_low_stock_listing_uses_reorder_level_or_threshold() {
        let db = TestDatabase::new().await;
        let hotel_id = db.insert_hotel("Harbour View").await;
        db.insert_item(hotel_id, "Soap", 5, 10, 100).await;
        db.insert_item(hotel_id, "Towels", 15, 10, 650).await;
        db.insert_item(hotel_id, "Sheets", 10, 10, 1_200).await;
        let repo = InventoryRepository::new(db.pool.clone());

        let low = repo
            .list(
                &InventoryFilter {
                    hotel_id: Some(hotel_id),
                    low_stock_only: true,
                    ..Default::default()
                },
                Page::default(),
            )
            .await
            .unwrap();
        let names: Vec<_> = low.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Sheets", "Soap"]);

        let below_twenty = repo
            .list(
                &InventoryFilter {
                    hotel_id: Some(hotel_id),
                    low_stock_only: true,
                    low_stock_threshold: Some(20),
                    ..Default::default()
                },
                Page::default(),
            )
            .await
            .unwrap();
        assert_eq!(below_twenty.len(), 3);
    }

    #[tokio::test]
    async fn test_receive_order_updates_stock_cost_and_ledger() {
        let db = TestDatabase::new().await;
        let hotel_id = db.insert_hotel("Harbour View").await;
        let item_id = db.insert_item(hotel_id, "Towels", 10, 20, 600).await;
        let repo = InventoryRepository::new(db.pool.clone());

        let placed = repo.place_order(&order(item_id, 50, Some(700))).await.unwrap();
        assert_eq!(placed.status, InventoryTransactionStatus::Pending);
        assert_eq!(placed.total_cents, 35_000);
        assert_eq!(placed.hotel_id, hotel_id);
        assert_eq!(repo.find_by_id(item_id).await.unwrap().unwrap().quantity, 10);

        let received = repo.receive_order(placed.id, date(2030, 3, 2)).await.unwrap();
        assert_eq!(received.transaction.status, InventoryTransactionStatus::Completed);
        assert!(received.transaction.completed_at.is_some());
        assert_eq!(received.item.quantity, 60);
        assert_eq!(received.item.unit_cost_cents, 700);
        let entry = received.ledger_entry.unwrap();
        assert_eq!(entry.category, LedgerCategory::Inventory);
        assert_eq!(entry.amount_cents, 35_000);
        assert_eq!(entry.inventory_transaction_id, Some(placed.id));
        assert_eq!(entry.recorded_on, date(2030, 3, 2));

        let again = repo.receive_order(placed.id, date(2030, 3, 2)).await;
        assert!(matches!(again, Err(DatabaseError::Conflict(_))));

        let ledger_rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM bill_maintenance_ledger")
            .fetch_one(&db.pool)
            .await
            .unwrap();
        assert_eq!(ledger_rows, 1);
        assert_eq!(repo.find_by_id(item_id).await.unwrap().unwrap().quantity, 60);
    }

    #[tokio::test]
    async fn test_order_defaults_to_item_unit_cost() {
        let db = TestDatabase::new().await;
        let hotel_id = db.insert_hotel("Harbour View").await;
        let item_id = db.insert_item(hotel_id, "Soap", 0, 10, 125).await;
        let repo = InventoryRepository::new(db.pool.clone());

        let placed = repo.place_order(&order(item_id, 8, None)).await.unwrap();
        assert_eq!(placed.unit_cost_cents, 125);
        assert_eq!(placed.total_cents, 1_000);

        let missing = repo.place_order(&order(item_id + 99, 1, None)).await;
        assert!(matches!(missing, Err(DatabaseError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_receive_zero_cost_order_adds_stock_without_ledger_row() {
        let db = TestDatabase::new().await;
        let hotel_id = db.insert_hotel("Harbour View").await;
        let item_id = db.insert_item(hotel_id, "Samples", 0, 10, 0).await;
        let repo = InventoryRepository::new(db.pool.clone());

        let placed = repo.place_order(&order(item_id, 5, None)).await.unwrap();
        assert_eq!(placed.total_cents, 0);

        let received = repo.receive_order(placed.id, date(2030, 3, 2)).await.unwrap();
        assert_eq!(received.transaction.status, InventoryTransactionStatus::Completed);
        assert_eq!(received.item.quantity, 5);
        assert!(received.ledger_entry.is_none());

        let ledger_rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM bill_maintenance_ledger")
            .fetch_one(&db.pool)
            .await
            .unwrap();
        assert_eq!(ledger_rows, 0);
    }

    #[tokio::test]
    async fn test_cancelled_order_cannot_be_received() {
        let db = TestDatabase::new().await;
        let hotel_id = db.insert_hotel("Harbour View").await;
        let item_id = db.insert_item(hotel_id, "Soap", 3, 10, 100).await;
        let repo = InventoryRepository::new(db.pool.clone());

        let placed = repo.place_order(&order(item_id, 20, None)).await.unwrap();
        let cancelled = repo.cancel_order(placed.id).await.unwrap();
        assert_eq!(cancelled.status, InventoryTransactionStatus::Cancelled);

        let receive = repo.receive_order(placed.id, date(2030, 3, 2)).await;
        assert!(matches!(receive, Err(DatabaseError::Conflict(_))));
        assert!(matches!(repo.cancel_order(placed.id).await, Err(DatabaseError::Conflict(_))));
        assert_eq!(repo.find_by_id(item_id).await.unwrap().unwrap().quantity, 3);
    }

    #[tokio::test]
    async fn test_adjust_stock_never_goes_negative() {
        let db = TestDatabase::new().await;
        let hotel_id = db.insert_hotel("Harbour View").await;
        let item_id = db.insert_item(hotel_id, "Soap", 5, 10, 100).await;
        let repo = InventoryRepository::new(db.pool.clone());

        let adjustment = repo
            .adjust_stock(&StockAdjustment {
                inventory_id: item_id,
                delta: -5,
                note: Some("damaged".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(adjustment.kind, InventoryTransactionKind::Adjustment);
        assert_eq!(adjustment.status, InventoryTransactionStatus::Completed);
        assert_eq!(repo.find_by_id(item_id).await.unwrap().unwrap().quantity, 0);

        let below_zero = repo
            .adjust_stock(&StockAdjustment {
                inventory_id: item_id,
                delta: -1,
                note: None,
            })
            .await;
        assert!(matches!(below_zero, Err(DatabaseError::Conflict(_))));

        repo.adjust_stock(&StockAdjustment {
            inventory_id: item_id,
            delta: 3,
            note: None,
        })
        .await
        .unwrap();
        let overflow = repo
            .adjust_stock(&StockAdjustment {
                inventory_id: item_id,
                delta: i64::MAX,
                note: None,
            })
            .await;
        assert!(matches!(overflow, Err(DatabaseError::ValidationError(_))));
        assert_eq!(repo.find_by_id(item_id).await.unwrap().unwrap().quantity, 3);

        let history = repo
            .list_transactions(
                &InventoryTransactionFilter {
                    inventory_id: Some(item_id),
                    ..Default::default()
                },
                Page::default(),
            )
            .await
            .unwrap();
        assert_eq!(history.len(), 2);
        assert!(matches!(repo.delete(item_id).await, Err(DatabaseError::Conflict(_))));
    }
}
