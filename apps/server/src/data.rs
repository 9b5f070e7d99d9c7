//! Table dumps and bulk deletion for the `dump-data` and `clear-data` commands.

use anyhow::Context;
use sqlx::{Row, SqlitePool};

/// Child tables first so foreign keys never block a delete.
const TABLES_IN_DELETE_ORDER: &[&str] = &[
    "transactions",
    "bookings",
    "bill_maintenance_ledger",
    "inventory_transactions",
    "inventory",
    "employees",
    "departments",
    "rooms",
    "hotels",
];

/// Delete every row in one transaction, returning the rows removed per table.
pub async fn clear(pool: &SqlitePool) -> anyhow::Result<Vec<(&'static str, u64)>> {
    let mut tx = pool.begin().await.context("failed to begin transaction")?;
    let mut cleared = Vec::with_capacity(TABLES_IN_DELETE_ORDER.len());

    for table in TABLES_IN_DELETE_ORDER {
        let result = sqlx::query(&format!("DELETE FROM {table}"))
            .execute(&mut *tx)
            .await
            .with_context(|| format!("failed to delete {table}"))?;
        cleared.push((*table, result.rows_affected()));
    }

    tx.commit().await.context("failed to commit clear")?;
    Ok(cleared)
}

pub async fn dump(pool: &SqlitePool) -> anyhow::Result<()> {
    let hotels = sqlx::query(
        "SELECT id, name, city, star_rating, created_at FROM hotels ORDER BY id",
    )
    .fetch_all(pool)
    .await
    .context("failed to fetch hotels")?;

    println!("=== HOTELS ===");
    if hotels.is_empty() {
        println!("No hotels found in database");
    } else {
        println!("{:<5} {:<30} {:<20} {:<6} {:<25}", "ID", "Name", "City", "Stars", "Created At");
        println!("{}", "-".repeat(90));
        for hotel in hotels {
            let id: i64 = hotel.get("id");
            let name: String = hotel.get("name");
            let city: String = hotel.get("city");
            let stars: i64 = hotel.get("star_rating");
            let created_at: String = hotel.get("created_at");
            println!("{id:<5} {name:<30} {city:<20} {stars:<6} {created_at:<25}");
        }
    }

    let rooms = sqlx::query(
        "SELECT id, hotel_id, room_number, room_type, rate_cents, capacity, status
         FROM rooms ORDER BY hotel_id, room_number",
    )
    .fetch_all(pool)
    .await
    .context("failed to fetch rooms")?;

    println!("\n=== ROOMS ===");
    if rooms.is_empty() {
        println!("No rooms found in database");
    } else {
        println!(
            "{:<5} {:<8} {:<8} {:<10} {:<12} {:<9} {:<12}",
            "ID", "Hotel", "Number", "Type", "Rate", "Capacity", "Status"
        );
        println!("{}", "-".repeat(70));
        for room in rooms {
            let id: i64 = room.get("id");
            let hotel_id: i64 = room.get("hotel_id");
            let number: String = room.get("room_number");
            let room_type: String = room.get("room_type");
            let rate: i64 = room.get("rate_cents");
            let capacity: i64 = room.get("capacity");
            let status: String = room.get("status");
            println!(
                "{id:<5} {hotel_id:<8} {number:<8} {room_type:<10} {:<12} {capacity:<9} {status:<12}",
                format_cents(rate)
            );
        }
    }

    let employees = sqlx::query(
        "SELECT e.id, e.hotel_id, d.name AS department, e.first_name, e.last_name, e.role, e.active
         FROM employees e JOIN departments d ON d.id = e.department_id
         ORDER BY e.hotel_id, d.name, e.last_name",
    )
    .fetch_all(pool)
    .await
    .context("failed to fetch employees")?;

    println!("\n=== EMPLOYEES ===");
    if employees.is_empty() {
        println!("No employees found in database");
    } else {
        println!(
            "{:<5} {:<8} {:<15} {:<25} {:<14} {:<7}",
            "ID", "Hotel", "Department", "Name", "Role", "Active"
        );
        println!("{}", "-".repeat(80));
        for employee in employees {
            let id: i64 = employee.get("id");
            let hotel_id: i64 = employee.get("hotel_id");
            let department: String = employee.get("department");
            let first: String = employee.get("first_name");
            let last: String = employee.get("last_name");
            let role: String = employee.get("role");
            let active: bool = employee.get("active");
            println!(
                "{id:<5} {hotel_id:<8} {department:<15} {:<25} {role:<14} {active:<7}",
                format!("{first} {last}")
            );
        }
    }

    let items = sqlx::query(
        "SELECT id, hotel_id, name, quantity, reorder_level, unit_cost_cents
         FROM inventory ORDER BY hotel_id, name",
    )
    .fetch_all(pool)
    .await
    .context("failed to fetch inventory")?;

    println!("\n=== INVENTORY ===");
    if items.is_empty() {
        println!("No inventory items found in database");
    } else {
        println!(
            "{:<5} {:<8} {:<25} {:<10} {:<10} {:<12}",
            "ID", "Hotel", "Item", "Quantity", "Reorder", "Unit Cost"
        );
        println!("{}", "-".repeat(75));
        for item in items {
            let id: i64 = item.get("id");
            let hotel_id: i64 = item.get("hotel_id");
            let name: String = item.get("name");
            let quantity: i64 = item.get("quantity");
            let reorder: i64 = item.get("reorder_level");
            let cost: i64 = item.get("unit_cost_cents");
            println!(
                "{id:<5} {hotel_id:<8} {name:<25} {quantity:<10} {reorder:<10} {:<12}",
                format_cents(cost)
            );
        }
    }

    let bookings = sqlx::query(
        "SELECT b.id, b.reference, r.room_number, b.guest_name, b.check_in, b.check_out,
                b.total_cents, b.status
         FROM bookings b JOIN rooms r ON r.id = b.room_id
         ORDER BY b.check_in, b.id",
    )
    .fetch_all(pool)
    .await
    .context("failed to fetch bookings")?;

    println!("\n=== BOOKINGS ===");
    if bookings.is_empty() {
        println!("No bookings found in database");
    } else {
        println!(
            "{:<5} {:<26} {:<7} {:<20} {:<11} {:<11} {:<12} {:<12}",
            "ID", "Reference", "Room", "Guest", "Check In", "Check Out", "Total", "Status"
        );
        println!("{}", "-".repeat(110));
        for booking in bookings {
            let id: i64 = booking.get("id");
            let reference: String = booking.get("reference");
            let room: String = booking.get("room_number");
            let guest: String = booking.get("guest_name");
            let check_in: String = booking.get("check_in");
            let check_out: String = booking.get("check_out");
            let total: i64 = booking.get("total_cents");
            let status: String = booking.get("status");
            println!(
                "{id:<5} {reference:<26} {room:<7} {guest:<20} {check_in:<11} {check_out:<11} {:<12} {status:<12}",
                format_cents(total)
            );
        }
    }

    let money = sqlx::query(
        "SELECT 'payment' AS source, kind AS label, amount_cents, substr(created_at, 1, 10) AS day
           FROM transactions
         UNION ALL
         SELECT 'ledger', category, amount_cents, recorded_on FROM bill_maintenance_ledger
         ORDER BY day, source",
    )
    .fetch_all(pool)
    .await
    .context("failed to fetch money movements")?;

    println!("\n=== MONEY ===");
    if money.is_empty() {
        println!("No payments or expenses found in database");
    } else {
        println!("{:<10} {:<14} {:<12} {:<11}", "Source", "Kind", "Amount", "Day");
        println!("{}", "-".repeat(50));
        for row in money {
            let source: String = row.get("source");
            let label: String = row.get("label");
            let amount: i64 = row.get("amount_cents");
            let day: String = row.get("day");
            println!("{source:<10} {label:<14} {:<12} {day:<11}", format_cents(amount));
        }
    }

    Ok(())
}

fn format_cents(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.unsigned_abs();
    format!("{sign}{}.{:02}", cents / 100, cents % 100)
}
