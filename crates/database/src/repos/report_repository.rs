//! Read-only aggregation queries behind reports and role dashboards.

use crate::entities::{
    AdminDashboard, CategoryTotal, DepartmentHeadcount, FinancialSummary, HotelSummaryRow,
    ManagerDashboard, OccupancyReport, ReceptionistDashboard,
};
use crate::repos::ensure_hotel_exists;
use crate::types::DatabaseResult;
use chrono::{Datelike, NaiveDate};
use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;

#[derive(Clone)]
pub struct ReportRepository {
    pool: SqlitePool,
}

impl ReportRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Income and spend for a hotel over the inclusive range `[from, to]`.
    pub async fn financial_summary(
        &self,
        hotel_id: i64,
        from: NaiveDate,
        to: NaiveDate,
    ) -> DatabaseResult<FinancialSummary> {
        let mut conn = self.pool.acquire().await?;
        ensure_hotel_exists(&mut conn, hotel_id).await?;

        let (revenue_cents, refunds_cents) = guest_income(&mut conn, hotel_id, from, to).await?;

        let expenses = sqlx::query_as::<_, CategoryTotal>(
            "SELECT category, SUM(amount_cents) AS amount_cents
             FROM bill_maintenance_ledger
             WHERE hotel_id = ? AND recorded_on >= ? AND recorded_on <= ?
             GROUP BY category
             ORDER BY category",
        )
        .bind(hotel_id)
        .bind(from)
        .bind(to)
        .fetch_all(&mut *conn)
        .await?;

        let total_expenses_cents: i64 = expenses.iter().map(|e| e.amount_cents).sum();
        let net_revenue_cents = revenue_cents - refunds_cents;

        debug!(hotel_id, %from, %to, net_revenue_cents, total_expenses_cents, "built financial summary");
        Ok(FinancialSummary {
            hotel_id,
            from,
            to,
            revenue_cents,
            refunds_cents,
            net_revenue_cents,
            expenses,
            total_expenses_cents,
            profit_cents: net_revenue_cents - total_expenses_cents,
        })
    }

    pub async fn occupancy(&self, hotel_id: i64, date: NaiveDate) -> DatabaseResult<OccupancyReport> {
        let mut conn = self.pool.acquire().await?;
        ensure_hotel_exists(&mut conn, hotel_id).await?;

        let (total_rooms, maintenance): (i64, i64) = sqlx::query_as(
            "SELECT COUNT(*), COALESCE(SUM(CASE WHEN status = 'maintenance' THEN 1 ELSE 0 END), 0)
             FROM rooms WHERE hotel_id = ?",
        )
        .bind(hotel_id)
        .fetch_one(&mut *conn)
        .await?;

        let (occupied, reserved): (i64, i64) = sqlx::query_as(
            "SELECT
                COUNT(DISTINCT CASE WHEN status = 'checked_in' THEN room_id END),
                COUNT(DISTINCT CASE WHEN status = 'booked' THEN room_id END)
             FROM bookings
             WHERE hotel_id = ? AND check_in <= ? AND check_out > ?",
        )
        .bind(hotel_id)
        .bind(date)
        .bind(date)
        .fetch_one(&mut *conn)
        .await?;

        let available = available_rooms_on(&mut conn, hotel_id, date).await?;

        Ok(OccupancyReport {
            hotel_id,
            date,
            total_rooms,
            occupied,
            reserved,
            maintenance,
            available,
            occupancy_rate: occupancy_rate(occupied, total_rooms),
        })
    }

    pub async fn receptionist_dashboard(
        &self,
        hotel_id: i64,
        date: NaiveDate,
    ) -> DatabaseResult<ReceptionistDashboard> {
        let mut conn = self.pool.acquire().await?;
        ensure_hotel_exists(&mut conn, hotel_id).await?;

        let (arrivals, departures, in_house_guests): (i64, i64, i64) = sqlx::query_as(
            "SELECT
                COALESCE(SUM(CASE WHEN status = 'booked' AND check_in = ?2 THEN 1 ELSE 0 END), 0),
                COALESCE(SUM(CASE WHEN status = 'checked_in' AND check_out = ?2 THEN 1 ELSE 0 END), 0),
                COALESCE(SUM(CASE WHEN status = 'checked_in' THEN guests ELSE 0 END), 0)
             FROM bookings WHERE hotel_id = ?1",
        )
        .bind(hotel_id)
        .bind(date)
        .fetch_one(&mut *conn)
        .await?;

        let available_rooms = available_rooms_on(&mut conn, hotel_id, date).await?;

        Ok(ReceptionistDashboard {
            hotel_id,
            date,
            arrivals,
            departures,
            in_house_guests,
            available_rooms,
        })
    }

    /// Staffing, stock and month-to-date money for one hotel.
    pub async fn manager_dashboard(
        &self,
        hotel_id: i64,
        date: NaiveDate,
        low_stock_threshold: Option<i64>,
    ) -> DatabaseResult<ManagerDashboard> {
        let mut conn = self.pool.acquire().await?;
        ensure_hotel_exists(&mut conn, hotel_id).await?;

        let headcount = sqlx::query_as::<_, DepartmentHeadcount>(
            "SELECT d.name AS department, COUNT(e.id) AS employees
             FROM departments d
             LEFT JOIN employees e ON e.department_id = d.id AND e.active = 1
             WHERE d.hotel_id = ?
             GROUP BY d.id, d.name
             ORDER BY d.name",
        )
        .bind(hotel_id)
        .fetch_all(&mut *conn)
        .await?;

        let low_stock_items: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM inventory
             WHERE hotel_id = ? AND quantity <= COALESCE(?, reorder_level)",
        )
        .bind(hotel_id)
        .bind(low_stock_threshold)
        .fetch_one(&mut *conn)
        .await?;

        let (pending_orders, pending_order_value_cents): (i64, i64) = sqlx::query_as(
            "SELECT COUNT(*), COALESCE(SUM(t.total_cents), 0)
             FROM inventory_transactions t
             JOIN inventory i ON i.id = t.inventory_id
             WHERE i.hotel_id = ? AND t.kind = 'order' AND t.status = 'pending'",
        )
        .bind(hotel_id)
        .fetch_one(&mut *conn)
        .await?;

        let month_start = date.with_day(1).unwrap_or(date);
        let (payments, refunds) = guest_income(&mut conn, hotel_id, month_start, date).await?;

        let month_expenses_cents: i64 = sqlx::query_scalar(
            "SELECT COALESCE(SUM(amount_cents), 0) FROM bill_maintenance_ledger
             WHERE hotel_id = ? AND recorded_on >= ? AND recorded_on <= ?",
        )
        .bind(hotel_id)
        .bind(month_start)
        .bind(date)
        .fetch_one(&mut *conn)
        .await?;

        Ok(ManagerDashboard {
            hotel_id,
            date,
            headcount,
            low_stock_items,
            pending_orders,
            pending_order_value_cents,
            month_revenue_cents: payments - refunds,
            month_expenses_cents,
        })
    }

    /// Chain-wide totals with one summary row per hotel.
    pub async fn admin_dashboard(&self) -> DatabaseResult<AdminDashboard> {
        let per_hotel = sqlx::query_as::<_, HotelSummaryRow>(
            "SELECT h.id AS hotel_id, h.name, h.city,
                (SELECT COUNT(*) FROM rooms r WHERE r.hotel_id = h.id) AS rooms,
                (SELECT COUNT(*) FROM employees e WHERE e.hotel_id = h.id AND e.active = 1) AS employees,
                (SELECT COALESCE(SUM(CASE t.kind WHEN 'payment' THEN t.amount_cents ELSE -t.amount_cents END), 0)
                   FROM transactions t WHERE t.hotel_id = h.id) AS revenue_cents,
                (SELECT COALESCE(SUM(l.amount_cents), 0)
                   FROM bill_maintenance_ledger l WHERE l.hotel_id = h.id) AS expenses_cents
             FROM hotels h
             ORDER BY h.name, h.id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(AdminDashboard {
            hotels: per_hotel.len() as i64,
            rooms: per_hotel.iter().map(|h| h.rooms).sum(),
            active_employees: per_hotel.iter().map(|h| h.employees).sum(),
            revenue_cents: per_hotel.iter().map(|h| h.revenue_cents).sum(),
            expenses_cents: per_hotel.iter().map(|h| h.expenses_cents).sum(),
            per_hotel,
        })
    }
}

/// Payments and refunds taken on the calendar days `[from, to]`.
async fn guest_income(
    conn: &mut SqliteConnection,
    hotel_id: i64,
    from: NaiveDate,
    to: NaiveDate,
) -> DatabaseResult<(i64, i64)> {
    let totals: (i64, i64) = sqlx::query_as(
        "SELECT
            COALESCE(SUM(CASE WHEN kind = 'payment' THEN amount_cents ELSE 0 END), 0),
            COALESCE(SUM(CASE WHEN kind = 'refund' THEN amount_cents ELSE 0 END), 0)
         FROM transactions
         WHERE hotel_id = ?
           AND substr(created_at, 1, 10) >= ?
           AND substr(created_at, 1, 10) <= ?",
    )
    .bind(hotel_id)
    .bind(from)
    .bind(to)
    .fetch_one(conn)
    .await?;
    Ok(totals)
}

/// Rooms out of maintenance with no active booking covering `date`.
async fn available_rooms_on(
    conn: &mut SqliteConnection,
    hotel_id: i64,
    date: NaiveDate,
) -> DatabaseResult<i64> {
    let available = sqlx::query_scalar(
        "SELECT COUNT(*) FROM rooms r
         WHERE r.hotel_id = ?1
           AND r.status != 'maintenance'
           AND NOT EXISTS (
               SELECT 1 FROM bookings b
               WHERE b.room_id = r.id
                 AND b.status IN ('booked', 'checked_in')
                 AND b.check_in <= ?2
                 AND b.check_out > ?2
           )",
    )
    .bind(hotel_id)
    .bind(date)
    .fetch_one(conn)
    .await?;
    Ok(available)
}

fn occupancy_rate(occupied: i64, total_rooms: i64) -> f64 {
    if total_rooms == 0 {
        return 0.0;
    }
    (occupied as f64 * 10_000.0 / total_rooms as f64).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{date, TestDatabase};
    use crate::types::DatabaseError;

    async fn booking(db: &TestDatabase, hotel_id: i64, room_id: i64, from: &str, to: &str, guests: i64, status: &str) -> i64 {
        sqlx::query(
            "INSERT INTO bookings (reference, hotel_id, room_id, guest_name, guest_email, check_in, check_out, guests, total_cents, status, created_at, updated_at)
             VALUES (?, ?, ?, 'Guest', 'guest@example.com', ?, ?, ?, 10000, ?, datetime('now'), datetime('now'))",
        )
        .bind(cuid2::cuid())
        .bind(hotel_id)
        .bind(room_id)
        .bind(from)
        .bind(to)
        .bind(guests)
        .bind(status)
        .execute(&db.pool)
        .await
        .unwrap()
        .last_insert_rowid()
    }

    async fn money(db: &TestDatabase, hotel_id: i64, kind: &str, amount: i64, at: &str) {
        sqlx::query(
            "INSERT INTO transactions (hotel_id, kind, method, amount_cents, created_at) VALUES (?, ?, 'card', ?, ?)",
        )
        .bind(hotel_id)
        .bind(kind)
        .bind(amount)
        .bind(at)
        .execute(&db.pool)
        .await
        .unwrap();
    }

    async fn expense(db: &TestDatabase, hotel_id: i64, category: &str, amount: i64, on: &str) {
        sqlx::query(
            "INSERT INTO bill_maintenance_ledger (hotel_id, category, description, amount_cents, recorded_on, created_at)
             VALUES (?, ?, 'bill', ?, ?, datetime('now'))",
        )
        .bind(hotel_id)
        .bind(category)
        .bind(amount)
        .bind(on)
        .execute(&db.pool)
        .await
        .unwrap();
    }

    #[test]
    fn test_occupancy_rate_rounds_to_two_decimals() {
        assert_eq!(occupancy_rate(0, 0), 0.0);
        assert_eq!(occupancy_rate(1, 3), 33.33);
        assert_eq!(occupancy_rate(2, 3), 66.67);
        assert_eq!(occupancy_rate(4, 4), 100.0);
    }

    #[tokio::test]
    async fn test_financial_summary_nets_refunds_and_groups_expenses() {
        let db = TestDatabase::new().await;
        let hotel_id = db.insert_hotel("Harbour View").await;
        money(&db, hotel_id, "payment", 50_000, "2030-03-05T12:00:00+00:00").await;
        money(&db, hotel_id, "payment", 20_000, "2030-03-31T23:00:00+00:00").await;
        money(&db, hotel_id, "refund", 5_000, "2030-03-10T08:00:00+00:00").await;
        money(&db, hotel_id, "payment", 99_000, "2030-04-01T00:00:00+00:00").await;
        expense(&db, hotel_id, "utility", 8_000, "2030-03-02").await;
        expense(&db, hotel_id, "utility", 2_000, "2030-03-20").await;
        expense(&db, hotel_id, "maintenance", 6_000, "2030-03-31").await;
        expense(&db, hotel_id, "salary", 1_000, "2030-02-28").await;

        let repo = ReportRepository::new(db.pool.clone());
        let summary = repo
            .financial_summary(hotel_id, date(2030, 3, 1), date(2030, 3, 31))
            .await
            .unwrap();

        assert_eq!(summary.revenue_cents, 70_000);
        assert_eq!(summary.refunds_cents, 5_000);
        assert_eq!(summary.net_revenue_cents, 65_000);
        assert_eq!(summary.total_expenses_cents, 16_000);
        assert_eq!(summary.profit_cents, 49_000);
        let categories: Vec<_> = summary
            .expenses
            .iter()
            .map(|c| (c.category.as_str(), c.amount_cents))
            .collect();
        assert_eq!(categories, vec![("maintenance", 6_000), ("utility", 10_000)]);

        let missing = repo
            .financial_summary(hotel_id + 1, date(2030, 3, 1), date(2030, 3, 31))
            .await;
        assert!(matches!(missing, Err(DatabaseError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_occupancy_and_receptionist_counts() {
        let db = TestDatabase::new().await;
        let hotel_id = db.insert_hotel("Harbour View").await;
        let r1 = db.insert_room(hotel_id, "101", 10_000, 2).await;
        let r2 = db.insert_room(hotel_id, "102", 10_000, 2).await;
        let r3 = db.insert_room(hotel_id, "103", 10_000, 2).await;
        db.insert_room(hotel_id, "104", 10_000, 2).await;
        sqlx::query("UPDATE rooms SET status = 'maintenance' WHERE id = ?")
            .bind(r3)
            .execute(&db.pool)
            .await
            .unwrap();

        booking(&db, hotel_id, r1, "2030-05-01", "2030-05-04", 2, "checked_in").await;
        booking(&db, hotel_id, r2, "2030-05-03", "2030-05-05", 1, "booked").await;
        booking(&db, hotel_id, r2, "2030-05-01", "2030-05-03", 1, "cancelled").await;

        let repo = ReportRepository::new(db.pool.clone());
        let occupancy = repo.occupancy(hotel_id, date(2030, 5, 3)).await.unwrap();
        assert_eq!(occupancy.total_rooms, 4);
        assert_eq!(occupancy.occupied, 1);
        assert_eq!(occupancy.reserved, 1);
        assert_eq!(occupancy.maintenance, 1);
        assert_eq!(occupancy.available, 1);
        assert_eq!(occupancy.occupancy_rate, 25.0);

        let desk = repo.receptionist_dashboard(hotel_id, date(2030, 5, 3)).await.unwrap();
        assert_eq!(desk.arrivals, 1);
        assert_eq!(desk.departures, 0);
        assert_eq!(desk.in_house_guests, 2);
        assert_eq!(desk.available_rooms, 1);

        let checkout_day = repo.receptionist_dashboard(hotel_id, date(2030, 5, 4)).await.unwrap();
        assert_eq!(checkout_day.departures, 1);
        assert_eq!(checkout_day.arrivals, 0);
    }

    #[tokio::test]
    async fn test_booked_room_in_maintenance_is_not_counted_twice() {
        let db = TestDatabase::new().await;
        let hotel_id = db.insert_hotel("Harbour View").await;
        let r1 = db.insert_room(hotel_id, "101", 10_000, 2).await;
        db.insert_room(hotel_id, "102", 10_000, 2).await;
        db.insert_room(hotel_id, "103", 10_000, 2).await;
        booking(&db, hotel_id, r1, "2030-05-02", "2030-05-05", 1, "booked").await;
        sqlx::query("UPDATE rooms SET status = 'maintenance' WHERE id = ?")
            .bind(r1)
            .execute(&db.pool)
            .await
            .unwrap();

        let repo = ReportRepository::new(db.pool.clone());
        let occupancy = repo.occupancy(hotel_id, date(2030, 5, 3)).await.unwrap();
        assert_eq!(occupancy.reserved, 1);
        assert_eq!(occupancy.maintenance, 1);
        assert_eq!(occupancy.available, 2);

        let desk = repo.receptionist_dashboard(hotel_id, date(2030, 5, 3)).await.unwrap();
        assert_eq!(desk.available_rooms, occupancy.available);
    }

    #[tokio::test]
    async fn test_manager_and_admin_dashboards() {
        let db = TestDatabase::new().await;
        let hotel_id = db.insert_hotel("Harbour View").await;
        let other_hotel = db.insert_hotel("Old Town").await;
        db.insert_room(hotel_id, "101", 10_000, 2).await;
        let kitchen = db.insert_department(hotel_id, "Kitchen").await;
        db.insert_department(hotel_id, "Spa").await;
        sqlx::query(
            "INSERT INTO employees (hotel_id, department_id, first_name, last_name, email, role, salary_cents, hired_on, active, created_at, updated_at)
             VALUES (?1, ?2, 'A', 'Cook', 'a@example.com', 'staff', 1, '2029-01-01', 1, datetime('now'), datetime('now')),
                    (?1, ?2, 'B', 'Cook', 'b@example.com', 'staff', 1, '2029-01-01', 0, datetime('now'), datetime('now'))",
        )
        .bind(hotel_id)
        .bind(kitchen)
        .execute(&db.pool)
        .await
        .unwrap();

        let soap = db.insert_item(hotel_id, "Soap", 2, 10, 100).await;
        db.insert_item(hotel_id, "Towels", 50, 10, 600).await;
        sqlx::query(
            "INSERT INTO inventory_transactions (inventory_id, kind, quantity, unit_cost_cents, total_cents, status, created_at)
             VALUES (?, 'order', 30, 100, 3000, 'pending', datetime('now'))",
        )
        .bind(soap)
        .execute(&db.pool)
        .await
        .unwrap();

        money(&db, hotel_id, "payment", 40_000, "2030-06-02T10:00:00+00:00").await;
        money(&db, hotel_id, "payment", 10_000, "2030-05-31T10:00:00+00:00").await;
        money(&db, other_hotel, "payment", 7_000, "2030-06-03T10:00:00+00:00").await;
        expense(&db, hotel_id, "utility", 4_000, "2030-06-01").await;

        let repo = ReportRepository::new(db.pool.clone());
        let manager = repo.manager_dashboard(hotel_id, date(2030, 6, 15), None).await.unwrap();
        assert_eq!(
            manager.headcount,
            vec![
                DepartmentHeadcount { department: "Kitchen".to_string(), employees: 1 },
                DepartmentHeadcount { department: "Spa".to_string(), employees: 0 },
            ]
        );
        assert_eq!(manager.low_stock_items, 1);
        assert_eq!(manager.pending_orders, 1);
        assert_eq!(manager.pending_order_value_cents, 3_000);
        assert_eq!(manager.month_revenue_cents, 40_000);
        assert_eq!(manager.month_expenses_cents, 4_000);

        let overridden = repo.manager_dashboard(hotel_id, date(2030, 6, 15), Some(100)).await.unwrap();
        assert_eq!(overridden.low_stock_items, 2);

        let admin = repo.admin_dashboard().await.unwrap();
        assert_eq!(admin.hotels, 2);
        assert_eq!(admin.rooms, 1);
        assert_eq!(admin.active_employees, 1);
        assert_eq!(admin.revenue_cents, 57_000);
        assert_eq!(admin.expenses_cents, 4_000);
        assert_eq!(admin.per_hotel[0].name, "Harbour View");
        assert_eq!(admin.per_hotel[0].revenue_cents, 50_000);
    }
}
