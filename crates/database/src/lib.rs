//! Hotel Database Crate
//!
//! Connection management, embedded migrations, entity types and repositories
//! for the hotel operations backend.

use hotel_config::DatabaseConfig;
use sqlx::SqlitePool;

pub mod connection;
pub mod entities;
pub mod migrations;
pub mod repos;
pub mod types;

#[cfg(test)]
mod test_utils;

pub use connection::{prepare_database, DatabaseConnection};
pub use migrations::run_migrations;

pub use repos::{
    BookingRepository, DepartmentRepository, EmployeeRepository, HotelRepository,
    InventoryRepository, LedgerRepository, ReportRepository, RoomRepository,
    TransactionRepository,
};

pub use types::{now_timestamp, DatabaseError, DatabaseResult, Page};

/// Re-export commonly used types for convenience
pub use sqlx::SqlitePool as Pool;

/// Initialize the database with migrations
pub async fn initialize_database(config: &DatabaseConfig) -> DatabaseResult<SqlitePool> {
    let pool = prepare_database(config)
        .await
        .map_err(|e| DatabaseError::ConnectionError(format!("{e:#}")))?;

    run_migrations(&pool)
        .await
        .map_err(|e| DatabaseError::MigrationError(format!("{e:#}")))?;

    Ok(pool)
}
