//! Shared fixtures for repository tests

use crate::connection::prepare_database;
use crate::entities::NewHotel;
use crate::migrations::run_migrations;
use chrono::NaiveDate;
use hotel_config::DatabaseConfig;
use sqlx::SqlitePool;
use tempfile::TempDir;

pub struct TestDatabase {
    pub pool: SqlitePool,
    _temp_dir: TempDir,
}

impl TestDatabase {
    pub async fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let config = DatabaseConfig {
            url: format!("sqlite://{}", temp_dir.path().join("hotel_test.db").display()),
            max_connections: 4,
        };

        let pool = prepare_database(&config).await.unwrap();
        run_migrations(&pool).await.unwrap();

        Self {
            pool,
            _temp_dir: temp_dir,
        }
    }

    pub async fn insert_hotel(&self, name: &str) -> i64 {
        let hotel = sample_hotel(name, "Lisbon");
        sqlx::query(
            "INSERT INTO hotels (name, address, city, phone, email, star_rating, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, datetime('now'), datetime('now'))",
        )
        .bind(&hotel.name)
        .bind(&hotel.address)
        .bind(&hotel.city)
        .bind(&hotel.phone)
        .bind(&hotel.email)
        .bind(hotel.star_rating)
        .execute(&self.pool)
        .await
        .unwrap()
        .last_insert_rowid()
    }

    pub async fn insert_room(&self, hotel_id: i64, number: &str, rate_cents: i64, capacity: i64) -> i64 {
        sqlx::query(
            "INSERT INTO rooms (hotel_id, room_number, room_type, rate_cents, capacity, status, created_at, updated_at)
             VALUES (?, ?, 'double', ?, ?, 'available', datetime('now'), datetime('now'))",
        )
        .bind(hotel_id)
        .bind(number)
        .bind(rate_cents)
        .bind(capacity)
        .execute(&self.pool)
        .await
        .unwrap()
        .last_insert_rowid()
    }

    pub async fn insert_department(&self, hotel_id: i64, name: &str) -> i64 {
        sqlx::query(
            "INSERT INTO departments (hotel_id, name, created_at) VALUES (?, ?, datetime('now'))",
        )
        .bind(hotel_id)
        .bind(name)
        .execute(&self.pool)
        .await
        .unwrap()
        .last_insert_rowid()
    }

    pub async fn insert_item(&self, hotel_id: i64, name: &str, quantity: i64, reorder_level: i64, unit_cost_cents: i64) -> i64 {
        sqlx::query(
            "INSERT INTO inventory (hotel_id, name, category, unit, quantity, reorder_level, unit_cost_cents, created_at, updated_at)
             VALUES (?, ?, 'housekeeping', 'piece', ?, ?, ?, datetime('now'), datetime('now'))",
        )
        .bind(hotel_id)
        .bind(name)
        .bind(quantity)
        .bind(reorder_level)
        .bind(unit_cost_cents)
        .execute(&self.pool)
        .await
        .unwrap()
        .last_insert_rowid()
    }
}

pub fn sample_hotel(name: &str, city: &str) -> NewHotel {
    NewHotel {
        name: name.to_string(),
        address: "1 Rua Augusta".to_string(),
        city: city.to_string(),
        phone: "+351 210 000 000".to_string(),
        email: "front@example.com".to_string(),
        star_rating: 4,
        image_path: None,
    }
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}
