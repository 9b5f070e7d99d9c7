//! Repository for room data access operations.

use crate::entities::{NewRoom, Room, RoomChanges, RoomFilter, RoomStatus};
use crate::repos::ensure_hotel_exists;
use crate::types::{now_timestamp, DatabaseError, DatabaseResult, Page};
use chrono::NaiveDate;
use sqlx::{QueryBuilder, Sqlite, SqliteConnection, SqlitePool};
use tracing::info;

const ROOM_COLUMNS: &str = "id, hotel_id, room_number, room_type, rate_cents, capacity, status, image_path, created_at, updated_at";

/// Repository for room database operations
#[derive(Clone)]
pub struct RoomRepository {
    pool: SqlitePool,
}

impl RoomRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: i64) -> DatabaseResult<Option<Room>> {
        let mut conn = self.pool.acquire().await?;
        fetch_room(&mut conn, id).await
    }

    pub async fn list(&self, filter: &RoomFilter, page: Page) -> DatabaseResult<Vec<Room>> {
        let mut query = QueryBuilder::<Sqlite>::new(format!(
            "SELECT {ROOM_COLUMNS} FROM rooms WHERE 1 = 1"
        ));

        if let Some(hotel_id) = filter.hotel_id {
            query.push(" AND hotel_id = ").push_bind(hotel_id);
        }
        if let Some(status) = filter.status {
            query.push(" AND status = ").push_bind(status);
        }
        if let Some(room_type) = filter.room_type {
            query.push(" AND room_type = ").push_bind(room_type);
        }

        query
            .push(" ORDER BY hotel_id, room_number LIMIT ")
            .push_bind(page.limit)
            .push(" OFFSET ")
            .push_bind(page.offset);

        let rooms = query.build_query_as::<Room>().fetch_all(&self.pool).await?;
        Ok(rooms)
    }

    pub async fn create(&self, request: &NewRoom) -> DatabaseResult<Room> {
        let mut tx = self.pool.begin().await?;
        ensure_hotel_exists(&mut tx, request.hotel_id).await?;

        let now = now_timestamp();
        let result = sqlx::query(
            "INSERT INTO rooms (hotel_id, room_number, room_type, rate_cents, capacity, status, image_path, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(request.hotel_id)
        .bind(&request.room_number)
        .bind(request.room_type)
        .bind(request.rate_cents)
        .bind(request.capacity)
        .bind(RoomStatus::Available)
        .bind(&request.image_path)
        .bind(&now)
        .bind(&now)
        .execute(&mut *tx)
        .await
        .map_err(|e| match DatabaseError::from(e) {
            DatabaseError::Duplicate(_) => DatabaseError::Duplicate(format!(
                "room {} already exists in hotel {}",
                request.room_number, request.hotel_id
            )),
            other => other,
        })?;

        tx.commit().await?;

        let room_id = result.last_insert_rowid();
        info!(
            room_id,
            hotel_id = request.hotel_id,
            room_number = %request.room_number,
            room_type = %request.room_type,
            "created room"
        );

        Ok(Room {
            id: room_id,
            hotel_id: request.hotel_id,
            room_number: request.room_number.clone(),
            room_type: request.room_type,
            rate_cents: request.rate_cents,
            capacity: request.capacity,
            status: RoomStatus::Available,
            image_path: request.image_path.clone(),
            created_at: now.clone(),
            updated_at: now,
        })
    }

    /// Apply partial changes. A room with a checked-in guest stays occupied.
    pub async fn update(&self, id: i64, changes: &RoomChanges) -> DatabaseResult<Room> {
        let mut tx = self.pool.begin().await?;

        let room = fetch_room(&mut tx, id)
            .await?
            .ok_or_else(|| DatabaseError::not_found("room", id))?;

        if changes.is_empty() {
            return Ok(room);
        }

        if let Some(status) = changes.status {
            if status != RoomStatus::Occupied && has_guest_in_house(&mut tx, id).await? {
                return Err(DatabaseError::conflict(format!(
                    "room {} has a checked-in guest and cannot be marked {}",
                    room.room_number, status
                )));
            }
        }

        let now = now_timestamp();
        let mut query = QueryBuilder::<Sqlite>::new("UPDATE rooms SET ");
        {
            let mut set = query.separated(", ");
            if let Some(room_type) = changes.room_type {
                set.push("room_type = ").push_bind_unseparated(room_type);
            }
            if let Some(rate_cents) = changes.rate_cents {
                set.push("rate_cents = ").push_bind_unseparated(rate_cents);
            }
            if let Some(capacity) = changes.capacity {
                set.push("capacity = ").push_bind_unseparated(capacity);
            }
            if let Some(status) = changes.status {
                set.push("status = ").push_bind_unseparated(status);
            }
            if let Some(image_path) = &changes.image_path {
                set.push("image_path = ").push_bind_unseparated(image_path);
            }
            set.push("updated_at = ").push_bind_unseparated(&now);
        }
        query.push(" WHERE id = ").push_bind(id);
        query.build().execute(&mut *tx).await?;

        let updated = fetch_room(&mut tx, id)
            .await?
            .ok_or_else(|| DatabaseError::not_found("room", id))?;
        tx.commit().await?;

        info!(room_id = id, status = %updated.status, "updated room");
        Ok(updated)
    }

    pub async fn delete(&self, id: i64) -> DatabaseResult<()> {
        let mut tx = self.pool.begin().await?;

        let (active, total): (i64, i64) = sqlx::query_as(
            "SELECT
                COALESCE(SUM(CASE WHEN status IN ('booked', 'checked_in') THEN 1 ELSE 0 END), 0),
                COUNT(*)
             FROM bookings WHERE room_id = ?",
        )
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        if active > 0 {
            return Err(DatabaseError::conflict(format!(
                "room {id} has {active} active bookings"
            )));
        }
        if total > 0 {
            return Err(DatabaseError::conflict(format!(
                "room {id} has booking history and cannot be removed"
            )));
        }

        let result = sqlx::query("DELETE FROM rooms WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("room", id));
        }

        tx.commit().await?;
        info!(room_id = id, "deleted room");
        Ok(())
    }

    /// Rooms that can take a stay over `[check_in, check_out)`.
    pub async fn available(
        &self,
        hotel_id: i64,
        check_in: NaiveDate,
        check_out: NaiveDate,
        guests: i64,
    ) -> DatabaseResult<Vec<Room>> {
        let rooms = sqlx::query_as::<_, Room>(&format!(
            "SELECT {ROOM_COLUMNS} FROM rooms r
             WHERE r.hotel_id = ?
               AND r.status != 'maintenance'
               AND r.capacity >= ?
               AND NOT EXISTS (
                   SELECT 1 FROM bookings b
                   WHERE b.room_id = r.id
                     AND b.status IN ('booked', 'checked_in')
                     AND b.check_in < ?
                     AND b.check_out > ?
               )
             ORDER BY r.room_number"
        ))
        .bind(hotel_id)
        .bind(guests)
        .bind(check_out)
        .bind(check_in)
        .fetch_all(&self.pool)
        .await?;

        Ok(rooms)
    }
}

pub(crate) async fn fetch_room(conn: &mut SqliteConnection, id: i64) -> DatabaseResult<Option<Room>> {
    let room = sqlx::query_as::<_, Room>(&format!("SELECT {ROOM_COLUMNS} FROM rooms WHERE id = ?"))
        .bind(id)
        .fetch_optional(conn)
        .await?;
    Ok(room)
}

pub(crate) async fn set_room_status(
    conn: &mut SqliteConnection,
    id: i64,
    status: RoomStatus,
) -> DatabaseResult<()> {
    sqlx::query("UPDATE rooms SET status = ?, updated_at = ? WHERE id = ?")
        .bind(status)
        .bind(now_timestamp())
        .bind(id)
        .execute(conn)
        .await?;
    Ok(())
}

async fn has_guest_in_house(conn: &mut SqliteConnection, room_id: i64) -> DatabaseResult<bool> {
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM bookings WHERE room_id = ? AND status = 'checked_in'",
    )
    .bind(room_id)
    .fetch_one(conn)
    .await?;
    Ok(count > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::RoomType;
    use crate::test_utils::{date, TestDatabase};

    fn new_room(hotel_id: i64, number: &str) -> NewRoom {
        NewRoom {
            hotel_id,
            room_number: number.to_string(),
            room_type: RoomType::Suite,
            rate_cents: 25_000,
            capacity: 3,
            image_path: None,
        }
    }

    async fn insert_booking(db: &TestDatabase, hotel_id: i64, room_id: i64, from: NaiveDate, to: NaiveDate, status: &str) {
        sqlx::query(
            "INSERT INTO bookings (reference, hotel_id, room_id, guest_name, guest_email, check_in, check_out, guests, total_cents, status, created_at, updated_at)
             VALUES (?, ?, ?, 'Guest', 'guest@example.com', ?, ?, 1, 100, ?, datetime('now'), datetime('now'))",
        )
        .bind(cuid2::cuid())
        .bind(hotel_id)
        .bind(room_id)
        .bind(from)
        .bind(to)
        .bind(status)
        .execute(&db.pool)
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn test_create_room_requires_existing_hotel() {
        let db = TestDatabase::new().await;
        let repo = RoomRepository::new(db.pool.clone());

        let result = repo.create(&new_room(42, "101")).await;
        assert!(matches!(result, Err(DatabaseError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_duplicate_room_number_is_rejected() {
        let db = TestDatabase::new().await;
        let hotel_id = db.insert_hotel("Harbour View").await;
        let repo = RoomRepository::new(db.pool.clone());

        let room = repo.create(&new_room(hotel_id, "101")).await.unwrap();
        assert_eq!(room.status, RoomStatus::Available);
        assert_eq!(room.room_type, RoomType::Suite);

        let duplicate = repo.create(&new_room(hotel_id, "101")).await;
        assert!(matches!(duplicate, Err(DatabaseError::Duplicate(_))));

        let other_hotel = db.insert_hotel("Old Town").await;
        repo.create(&new_room(other_hotel, "101")).await.unwrap();
    }

    #[tokio::test]
    async fn test_list_rooms_filters_by_status_and_type() {
        let db = TestDatabase::new().await;
        let hotel_id = db.insert_hotel("Harbour View").await;
        let repo = RoomRepository::new(db.pool.clone());

        repo.create(&new_room(hotel_id, "101")).await.unwrap();
        let second = repo.create(&new_room(hotel_id, "102")).await.unwrap();
        db.insert_room(hotel_id, "103", 9_000, 2).await;

        repo.update(
            second.id,
            &RoomChanges {
                status: Some(RoomStatus::Maintenance),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let suites = repo
            .list(
                &RoomFilter {
                    hotel_id: Some(hotel_id),
                    room_type: Some(RoomType::Suite),
                    ..Default::default()
                },
                Page::default(),
            )
            .await
            .unwrap();
        assert_eq!(suites.len(), 2);

        let maintenance = repo
            .list(
                &RoomFilter {
                    status: Some(RoomStatus::Maintenance),
                    ..Default::default()
                },
                Page::default(),
            )
            .await
            .unwrap();
        assert_eq!(maintenance.len(), 1);
        assert_eq!(maintenance[0].room_number, "102");
    }

    #[tokio::test]
    async fn test_occupied_room_cannot_be_released_while_guest_is_in_house() {
        let db = TestDatabase::new().await;
        let hotel_id = db.insert_hotel("Harbour View").await;
        let room_id = db.insert_room(hotel_id, "101", 10_000, 2).await;
        insert_booking(&db, hotel_id, room_id, date(2030, 1, 1), date(2030, 1, 3), "checked_in").await;

        let repo = RoomRepository::new(db.pool.clone());
        let result = repo
            .update(
                room_id,
                &RoomChanges {
                    status: Some(RoomStatus::Maintenance),
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(result, Err(DatabaseError::Conflict(_))));

        let rate_change = repo
            .update(
                room_id,
                &RoomChanges {
                    rate_cents: Some(12_000),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(rate_change.rate_cents, 12_000);
    }

    #[tokio::test]
    async fn test_delete_room_with_active_booking_is_a_conflict() {
        let db = TestDatabase::new().await;
        let hotel_id = db.insert_hotel("Harbour View").await;
        let booked = db.insert_room(hotel_id, "101", 10_000, 2).await;
        let free = db.insert_room(hotel_id, "102", 10_000, 2).await;
        insert_booking(&db, hotel_id, booked, date(2030, 1, 1), date(2030, 1, 3), "booked").await;

        let repo = RoomRepository::new(db.pool.clone());
        assert!(matches!(repo.delete(booked).await, Err(DatabaseError::Conflict(_))));

        repo.delete(free).await.unwrap();
        assert!(repo.find_by_id(free).await.unwrap().is_none());
        assert!(matches!(repo.delete(free).await, Err(DatabaseError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_available_rooms_respect_half_open_overlap() {
        let db = TestDatabase::new().await;
        let hotel_id = db.insert_hotel("Harbour View").await;
        let taken = db.insert_room(hotel_id, "101", 10_000, 2).await;
        let small = db.insert_room(hotel_id, "102", 10_000, 1).await;
        let cancelled = db.insert_room(hotel_id, "103", 10_000, 2).await;
        insert_booking(&db, hotel_id, taken, date(2030, 5, 10), date(2030, 5, 12), "booked").await;
        insert_booking(&db, hotel_id, cancelled, date(2030, 5, 10), date(2030, 5, 12), "cancelled").await;

        let repo = RoomRepository::new(db.pool.clone());

        let overlapping = repo
            .available(hotel_id, date(2030, 5, 11), date(2030, 5, 13), 2)
            .await
            .unwrap();
        let ids: Vec<i64> = overlapping.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![cancelled]);

        let turnover = repo
            .available(hotel_id, date(2030, 5, 12), date(2030, 5, 14), 1)
            .await
            .unwrap();
        let ids: Vec<i64> = turnover.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![taken, small, cancelled]);
    }
}
