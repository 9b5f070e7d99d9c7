//! Room service: inventory of rooms and date-range availability.

use crate::error::{OperationError, OperationResult};
use crate::validation;
use chrono::NaiveDate;
use hotel_config::OperationsConfig;
use hotel_database::entities::{NewRoom, Room, RoomChanges, RoomFilter};
use hotel_database::{HotelRepository, RoomRepository};
use sqlx::SqlitePool;
use tracing::debug;

#[derive(Clone)]
pub struct RoomService {
    repository: RoomRepository,
    hotels: HotelRepository,
    config: OperationsConfig,
}

impl RoomService {
    pub fn new(pool: SqlitePool, config: OperationsConfig) -> Self {
        Self {
            repository: RoomRepository::new(pool.clone()),
            hotels: HotelRepository::new(pool),
            config,
        }
    }

    pub async fn create(&self, request: NewRoom) -> OperationResult<Room> {
        let request = NewRoom {
            room_number: validation::required_text("room_number", &request.room_number, 20)?,
            rate_cents: validation::positive("rate_cents", request.rate_cents)?,
            capacity: validation::positive("capacity", request.capacity)?,
            image_path: validation::optional_text("image_path", request.image_path.as_deref(), 500)?,
            ..request
        };

        Ok(self.repository.create(&request).await?)
    }

    pub async fn get(&self, id: i64) -> OperationResult<Room> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| OperationError::not_found("room", id))
    }

    pub async fn list(
        &self,
        filter: RoomFilter,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> OperationResult<Vec<Room>> {
        let page = crate::page(&self.config, limit, offset);
        Ok(self.repository.list(&filter, page).await?)
    }

    pub async fn update(&self, id: i64, changes: RoomChanges) -> OperationResult<Room> {
        let changes = RoomChanges {
            rate_cents: changes
                .rate_cents
                .map(|v| validation::positive("rate_cents", v))
                .transpose()?,
            capacity: changes
                .capacity
                .map(|v| validation::positive("capacity", v))
                .transpose()?,
            image_path: changes
                .image_path
                .map(|v| validation::required_text("image_path", &v, 500))
                .transpose()?,
            ..changes
        };

        Ok(self.repository.update(id, &changes).await?)
    }

    pub async fn delete(&self, id: i64) -> OperationResult<()> {
        Ok(self.repository.delete(id).await?)
    }

    /// Rooms of a hotel free for every night in `[check_in, check_out)`.
    pub async fn available(
        &self,
        hotel_id: i64,
        check_in: NaiveDate,
        check_out: NaiveDate,
        guests: Option<i64>,
    ) -> OperationResult<Vec<Room>> {
        validation::stay_dates(check_in, check_out)?;
        let guests = validation::positive("guests", guests.unwrap_or(1))?;

        if self.hotels.find_by_id(hotel_id).await?.is_none() {
            return Err(OperationError::not_found("hotel", hotel_id));
        }

        let rooms = self
            .repository
            .available(hotel_id, check_in, check_out, guests)
            .await?;
        debug!(hotel_id, %check_in, %check_out, guests, found = rooms.len(), "availability search");
        Ok(rooms)
    }
}
