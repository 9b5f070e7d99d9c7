//! Repository for the bill and maintenance ledger.

use crate::entities::{LedgerEntry, LedgerFilter, NewLedgerEntry};
use crate::repos::ensure_hotel_exists;
use crate::types::{now_timestamp, DatabaseResult, Page};
use sqlx::{QueryBuilder, Sqlite, SqliteConnection, SqlitePool};
use tracing::info;

const LEDGER_COLUMNS: &str =
    "id, hotel_id, category, description, amount_cents, inventory_transaction_id, recorded_on, created_at";

#[derive(Clone)]
pub struct LedgerRepository {
    pool: SqlitePool,
}

impl LedgerRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn record(&self, entry: &NewLedgerEntry) -> DatabaseResult<LedgerEntry> {
        let mut tx = self.pool.begin().await?;
        ensure_hotel_exists(&mut tx, entry.hotel_id).await?;
        let recorded = insert_entry(&mut tx, entry).await?;
        tx.commit().await?;

        info!(
            entry_id = recorded.id,
            hotel_id = recorded.hotel_id,
            category = %recorded.category,
            amount_cents = recorded.amount_cents,
            "recorded ledger entry"
        );
        Ok(recorded)
    }

    pub async fn find_by_id(&self, id: i64) -> DatabaseResult<Option<LedgerEntry>> {
        let entry = sqlx::query_as::<_, LedgerEntry>(&format!(
            "SELECT {LEDGER_COLUMNS} FROM bill_maintenance_ledger WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(entry)
    }

    /// Entries newest first; `from` and `to` are inclusive bounds on `recorded_on`.
    pub async fn list(&self, filter: &LedgerFilter, page: Page) -> DatabaseResult<Vec<LedgerEntry>> {
        let mut query = QueryBuilder::<Sqlite>::new(format!(
            "SELECT {LEDGER_COLUMNS} FROM bill_maintenance_ledger WHERE 1 = 1"
        ));

        if let Some(hotel_id) = filter.hotel_id {
            query.push(" AND hotel_id = ").push_bind(hotel_id);
        }
        if let Some(category) = filter.category {
            query.push(" AND category = ").push_bind(category);
        }
        if let Some(from) = filter.from {
            query.push(" AND recorded_on >= ").push_bind(from);
        }
        if let Some(to) = filter.to {
            query.push(" AND recorded_on <= ").push_bind(to);
        }

        query
            .push(" ORDER BY recorded_on DESC, id DESC LIMIT ")
            .push_bind(page.limit)
            .push(" OFFSET ")
            .push_bind(page.offset);

        let entries = query.build_query_as::<LedgerEntry>().fetch_all(&self.pool).await?;
        Ok(entries)
    }
}

pub(crate) async fn insert_entry(
    conn: &mut SqliteConnection,
    entry: &NewLedgerEntry,
) -> DatabaseResult<LedgerEntry> {
    let now = now_timestamp();
    let result = sqlx::query(
        "INSERT INTO bill_maintenance_ledger (hotel_id, category, description, amount_cents, inventory_transaction_id, recorded_on, created_at)
         VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(entry.hotel_id)
    .bind(entry.category)
    .bind(&entry.description)
    .bind(entry.amount_cents)
    .bind(entry.inventory_transaction_id)
    .bind(entry.recorded_on)
    .bind(&now)
    .execute(conn)
    .await?;

    Ok(LedgerEntry {
        id: result.last_insert_rowid(),
        hotel_id: entry.hotel_id,
        category: entry.category,
        description: entry.description.clone(),
        amount_cents: entry.amount_cents,
        inventory_transaction_id: entry.inventory_transaction_id,
        recorded_on: entry.recorded_on,
        created_at: now,
    })
}
