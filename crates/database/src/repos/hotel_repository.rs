//! Repository for hotel data access operations.

use crate::entities::{Hotel, HotelChanges, HotelFilter, NewHotel};
use crate::types::{now_timestamp, DatabaseError, DatabaseResult, Page};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::info;

const HOTEL_COLUMNS: &str = "id, name, address, city, phone, email, star_rating, image_path, created_at, updated_at";

/// Repository for hotel database operations
#[derive(Clone)]
pub struct HotelRepository {
    pool: SqlitePool,
}

impl HotelRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: i64) -> DatabaseResult<Option<Hotel>> {
        let hotel = sqlx::query_as::<_, Hotel>(&format!(
            "SELECT {HOTEL_COLUMNS} FROM hotels WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(hotel)
    }

    pub async fn list(&self, filter: &HotelFilter, page: Page) -> DatabaseResult<Vec<Hotel>> {
        let mut query = QueryBuilder::<Sqlite>::new(format!(
            "SELECT {HOTEL_COLUMNS} FROM hotels WHERE 1 = 1"
        ));

        if let Some(city) = &filter.city {
            query.push(" AND city = ").push_bind(city).push(" COLLATE NOCASE");
        }

        query
            .push(" ORDER BY name, id LIMIT ")
            .push_bind(page.limit)
            .push(" OFFSET ")
            .push_bind(page.offset);

        let hotels = query.build_query_as::<Hotel>().fetch_all(&self.pool).await?;
        Ok(hotels)
    }

    pub async fn create(&self, request: &NewHotel) -> DatabaseResult<Hotel> {
        let now = now_timestamp();

        let result = sqlx::query(
            "INSERT INTO hotels (name, address, city, phone, email, star_rating, image_path, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&request.name)
        .bind(&request.address)
        .bind(&request.city)
        .bind(&request.phone)
        .bind(&request.email)
        .bind(request.star_rating)
        .bind(&request.image_path)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        let hotel_id = result.last_insert_rowid();
        info!(hotel_id, name = %request.name, city = %request.city, "created hotel");

        Ok(Hotel {
            id: hotel_id,
            name: request.name.clone(),
            address: request.address.clone(),
            city: request.city.clone(),
            phone: request.phone.clone(),
            email: request.email.clone(),
            star_rating: request.star_rating,
            image_path: request.image_path.clone(),
            created_at: now.clone(),
            updated_at: now,
        })
    }

    pub async fn update(&self, id: i64, changes: &HotelChanges) -> DatabaseResult<Hotel> {
        if changes.is_empty() {
            return self
                .find_by_id(id)
                .await?
                .ok_or_else(|| DatabaseError::not_found("hotel", id));
        }

        let now = now_timestamp();
        let mut query = QueryBuilder::<Sqlite>::new("UPDATE hotels SET ");
        {
            let mut set = query.separated(", ");
            if let Some(name) = &changes.name {
                set.push("name = ").push_bind_unseparated(name);
            }
            if let Some(address) = &changes.address {
                set.push("address = ").push_bind_unseparated(address);
            }
            if let Some(city) = &changes.city {
                set.push("city = ").push_bind_unseparated(city);
            }
            if let Some(phone) = &changes.phone {
                set.push("phone = ").push_bind_unseparated(phone);
            }
            if let Some(email) = &changes.email {
                set.push("email = ").push_bind_unseparated(email);
            }
            if let Some(star_rating) = changes.star_rating {
                set.push("star_rating = ").push_bind_unseparated(star_rating);
            }
            if let Some(image_path) = &changes.image_path {
                set.push("image_path = ").push_bind_unseparated(image_path);
            }
            set.push("updated_at = ").push_bind_unseparated(&now);
        }
        query.push(" WHERE id = ").push_bind(id);

        let result = query.build().execute(&self.pool).await?;
        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("hotel", id));
        }

        info!(hotel_id = id, "updated hotel");
        self.find_by_id(id)
            .await?
            .ok_or_else(|| DatabaseError::not_found("hotel", id))
    }

    /// Delete a hotel that nothing references any more
    pub async fn delete(&self, id: i64) -> DatabaseResult<()> {
        let mut tx = self.pool.begin().await?;

        let (rooms, employees, bookings): (i64, i64, i64) = sqlx::query_as(
            "SELECT
                (SELECT COUNT(*) FROM rooms WHERE hotel_id = ?1),
                (SELECT COUNT(*) FROM employees WHERE hotel_id = ?1),
                (SELECT COUNT(*) FROM bookings WHERE hotel_id = ?1)",
        )
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        if rooms + employees + bookings > 0 {
            return Err(DatabaseError::conflict(format!(
                "hotel {id} still has {rooms} rooms, {employees} employees and {bookings} bookings"
            )));
        }

        // Financial and stock history is append-only and pins the hotel.
        let (ledger_rows, stock_movements, payments): (i64, i64, i64) = sqlx::query_as(
            "SELECT
                (SELECT COUNT(*) FROM bill_maintenance_ledger WHERE hotel_id = ?1),
                (SELECT COUNT(*) FROM inventory_transactions t
                   JOIN inventory i ON i.id = t.inventory_id WHERE i.hotel_id = ?1),
                (SELECT COUNT(*) FROM transactions WHERE hotel_id = ?1)",
        )
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        if ledger_rows + stock_movements + payments > 0 {
            return Err(DatabaseError::conflict(format!(
                "hotel {id} has {ledger_rows} ledger entries, {stock_movements} stock movements \
                 and {payments} payments on record"
            )));
        }

        // Departments and never-moved stock items go with the hotel.
        sqlx::query("DELETE FROM inventory WHERE hotel_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM departments WHERE hotel_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM hotels WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("hotel", id));
        }

        tx.commit().await?;
        info!(hotel_id = id, "deleted hotel");
        Ok(())
    }

    pub async fn count(&self) -> DatabaseResult<i64> {
        let count = sqlx::query_scalar("SELECT COUNT(*) FROM hotels")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
