//! Repository for guest payments and refunds.

use crate::entities::{
    BookingStatus, FinancialTransaction, NewPayment, PaymentMethod, TransactionFilter, TransactionKind,
};
use crate::types::{now_timestamp, DatabaseError, DatabaseResult, Page};
use sqlx::{QueryBuilder, Sqlite, SqliteConnection, SqlitePool};
use tracing::{info, warn};

const TRANSACTION_COLUMNS: &str =
    "id, hotel_id, booking_id, kind, method, amount_cents, reference, created_at";

#[derive(Clone)]
pub struct TransactionRepository {
    pool: SqlitePool,
}

impl TransactionRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Take a payment against a booking, capped at its outstanding balance
    pub async fn record_payment(&self, payment: &NewPayment) -> DatabaseResult<FinancialTransaction> {
        let mut tx = self.pool.begin().await?;

        let booking: Option<(i64, i64, BookingStatus)> =
            sqlx::query_as("SELECT hotel_id, total_cents, status FROM bookings WHERE id = ?")
                .bind(payment.booking_id)
                .fetch_optional(&mut *tx)
                .await?;
        let (hotel_id, total_cents, status) =
            booking.ok_or_else(|| DatabaseError::not_found("booking", payment.booking_id))?;

        if status == BookingStatus::Cancelled {
            return Err(DatabaseError::conflict(format!(
                "booking {} is cancelled and cannot take payments",
                payment.booking_id
            )));
        }

        let outstanding = total_cents - net_paid_cents(&mut tx, payment.booking_id).await?;
        if payment.amount_cents > outstanding {
            warn!(
                booking_id = payment.booking_id,
                amount_cents = payment.amount_cents,
                outstanding,
                "payment exceeds outstanding balance"
            );
            return Err(DatabaseError::conflict(format!(
                "payment of {} exceeds the outstanding balance of {} for booking {}",
                payment.amount_cents,
                outstanding.max(0),
                payment.booking_id
            )));
        }

        let recorded = insert_transaction(
            &mut tx,
            hotel_id,
            Some(payment.booking_id),
            TransactionKind::Payment,
            payment.method,
            payment.amount_cents,
            payment.reference.as_deref(),
        )
        .await?;
        tx.commit().await?;

        info!(
            transaction_id = recorded.id,
            booking_id = payment.booking_id,
            amount_cents = recorded.amount_cents,
            method = %recorded.method,
            "recorded payment"
        );
        Ok(recorded)
    }

    pub async fn find_by_id(&self, id: i64) -> DatabaseResult<Option<FinancialTransaction>> {
        let transaction = sqlx::query_as::<_, FinancialTransaction>(&format!(
            "SELECT {TRANSACTION_COLUMNS} FROM transactions WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(transaction)
    }

    /// `from` and `to` are inclusive calendar days matched against `created_at`.
    pub async fn list(
        &self,
        filter: &TransactionFilter,
        page: Page,
    ) -> DatabaseResult<Vec<FinancialTransaction>> {
        let mut query = QueryBuilder::<Sqlite>::new(format!(
            "SELECT {TRANSACTION_COLUMNS} FROM transactions WHERE 1 = 1"
        ));

        if let Some(hotel_id) = filter.hotel_id {
            query.push(" AND hotel_id = ").push_bind(hotel_id);
        }
        if let Some(booking_id) = filter.booking_id {
            query.push(" AND booking_id = ").push_bind(booking_id);
        }
        if let Some(kind) = filter.kind {
            query.push(" AND kind = ").push_bind(kind);
        }
        if let Some(from) = filter.from {
            query.push(" AND substr(created_at, 1, 10) >= ").push_bind(from);
        }
        if let Some(to) = filter.to {
            query.push(" AND substr(created_at, 1, 10) <= ").push_bind(to);
        }

        query
            .push(" ORDER BY created_at DESC, id DESC LIMIT ")
            .push_bind(page.limit)
            .push(" OFFSET ")
            .push_bind(page.offset);

        let transactions = query
            .build_query_as::<FinancialTransaction>()
            .fetch_all(&self.pool)
            .await?;
        Ok(transactions)
    }
}

/// Payments minus refunds recorded for a booking.
pub(crate) async fn net_paid_cents(conn: &mut SqliteConnection, booking_id: i64) -> DatabaseResult<i64> {
    let paid: i64 = sqlx::query_scalar(
        "SELECT COALESCE(SUM(CASE kind WHEN 'payment' THEN amount_cents ELSE -amount_cents END), 0)
         FROM transactions WHERE booking_id = ?",
    )
    .bind(booking_id)
    .fetch_one(conn)
    .await?;
    Ok(paid)
}

pub(crate) async fn insert_transaction(
    conn: &mut SqliteConnection,
    hotel_id: i64,
    booking_id: Option<i64>,
    kind: TransactionKind,
    method: PaymentMethod,
    amount_cents: i64,
    reference: Option<&str>,
) -> DatabaseResult<FinancialTransaction> {
    let now = now_timestamp();
    let result = sqlx::query(
        "INSERT INTO transactions (hotel_id, booking_id, kind, method, amount_cents, reference, created_at)
         VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(hotel_id)
    .bind(booking_id)
    .bind(kind)
    .bind(method)
    .bind(amount_cents)
    .bind(reference)
    .bind(&now)
    .execute(conn)
    .await?;

    Ok(FinancialTransaction {
        id: result.last_insert_rowid(),
        hotel_id,
        booking_id,
        kind,
        method,
        amount_cents,
        reference: reference.map(str::to_string),
        created_at: now,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{date, TestDatabase};

    async fn insert_booking(db: &TestDatabase, total_cents: i64, status: &str) -> (i64, i64) {
        let hotel_id = db.insert_hotel("Harbour View").await;
        let room_id = db.insert_room(hotel_id, "101", 10_000, 2).await;
        let booking_id = sqlx::query(
            "INSERT INTO bookings (reference, hotel_id, room_id, guest_name, guest_email, check_in, check_out, guests, total_cents, status, created_at, updated_at)
             VALUES (?, ?, ?, 'Guest', 'guest@example.com', '2030-04-01', '2030-04-03', 1, ?, ?, datetime('now'), datetime('now'))",
        )
        .bind(cuid2::cuid())
        .bind(hotel_id)
        .bind(room_id)
        .bind(total_cents)
        .bind(status)
        .execute(&db.pool)
        .await
        .unwrap()
        .last_insert_rowid();
        (hotel_id, booking_id)
    }

    fn payment(booking_id: i64, amount_cents: i64) -> NewPayment {
        NewPayment {
            booking_id,
            amount_cents,
            method: PaymentMethod::Card,
            reference: Some("POS-1".to_string()),
        }
    }

    #[tokio::test]
    async fn test_payments_are_capped_at_outstanding_balance() {
        let db = TestDatabase::new().await;
        let (hotel_id, booking_id) = insert_booking(&db, 20_000, "booked").await;
        let repo = TransactionRepository::new(db.pool.clone());

        let deposit = repo.record_payment(&payment(booking_id, 5_000)).await.unwrap();
        assert_eq!(deposit.hotel_id, hotel_id);
        assert_eq!(deposit.kind, TransactionKind::Payment);

        let too_much = repo.record_payment(&payment(booking_id, 15_001)).await;
        assert!(matches!(too_much, Err(DatabaseError::Conflict(_))));

        repo.record_payment(&payment(booking_id, 15_000)).await.unwrap();
        let mut conn = db.pool.acquire().await.unwrap();
        assert_eq!(net_paid_cents(&mut conn, booking_id).await.unwrap(), 20_000);
    }

    #[tokio::test]
    async fn test_cancelled_or_missing_booking_rejects_payment() {
        let db = TestDatabase::new().await;
        let (_, booking_id) = insert_booking(&db, 20_000, "cancelled").await;
        let repo = TransactionRepository::new(db.pool.clone());

        let cancelled = repo.record_payment(&payment(booking_id, 100)).await;
        assert!(matches!(cancelled, Err(DatabaseError::Conflict(_))));

        let missing = repo.record_payment(&payment(booking_id + 10, 100)).await;
        assert!(matches!(missing, Err(DatabaseError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_list_filters_by_kind_and_day() {
        let db = TestDatabase::new().await;
        let (hotel_id, booking_id) = insert_booking(&db, 20_000, "booked").await;
        let repo = TransactionRepository::new(db.pool.clone());

        sqlx::query(
            "INSERT INTO transactions (hotel_id, booking_id, kind, method, amount_cents, created_at)
             VALUES (?, ?, 'payment', 'cash', 3000, '2030-04-01T10:00:00+00:00'),
                    (?, ?, 'refund', 'cash', 1000, '2030-04-02T09:30:00+00:00')",
        )
        .bind(hotel_id)
        .bind(booking_id)
        .bind(hotel_id)
        .bind(booking_id)
        .execute(&db.pool)
        .await
        .unwrap();

        let refunds = repo
            .list(
                &TransactionFilter {
                    booking_id: Some(booking_id),
                    kind: Some(TransactionKind::Refund),
                    ..Default::default()
                },
                Page::default(),
            )
            .await
            .unwrap();
        assert_eq!(refunds.len(), 1);
        assert_eq!(refunds[0].amount_cents, 1_000);

        let first_day = repo
            .list(
                &TransactionFilter {
                    hotel_id: Some(hotel_id),
                    from: Some(date(2030, 4, 1)),
                    to: Some(date(2030, 4, 1)),
                    ..Default::default()
                },
                Page::default(),
            )
            .await
            .unwrap();
        assert_eq!(first_day.len(), 1);
        assert_eq!(first_day[0].kind, TransactionKind::Payment);

        let found = repo.find_by_id(first_day[0].id).await.unwrap().unwrap();
        assert_eq!(found, first_day[0]);
    }
}
