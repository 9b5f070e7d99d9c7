//! Room entity definitions

use serde::{Deserialize, Serialize};

text_enum! {
    pub enum RoomType {
        Single => "single",
        Double => "double",
        Suite => "suite",
        Deluxe => "deluxe",
    }
}

text_enum! {
    /// Housekeeping state of a room, independent of future reservations.
    pub enum RoomStatus {
        Available => "available",
        Occupied => "occupied",
        Maintenance => "maintenance",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Room {
    pub id: i64,
    pub hotel_id: i64,
    pub room_number: String,
    pub room_type: RoomType,
    pub rate_cents: i64,
    pub capacity: i64,
    pub status: RoomStatus,
    pub image_path: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRoom {
    pub hotel_id: i64,
    pub room_number: String,
    pub room_type: RoomType,
    pub rate_cents: i64,
    pub capacity: i64,
    pub image_path: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoomChanges {
    pub room_type: Option<RoomType>,
    pub rate_cents: Option<i64>,
    pub capacity: Option<i64>,
    pub status: Option<RoomStatus>,
    pub image_path: Option<String>,
}

impl RoomChanges {
    pub fn is_empty(&self) -> bool {
        self.room_type.is_none()
            && self.rate_cents.is_none()
            && self.capacity.is_none()
            && self.status.is_none()
            && self.image_path.is_none()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoomFilter {
    pub hotel_id: Option<i64>,
    pub status: Option<RoomStatus>,
    pub room_type: Option<RoomType>,
}
