//! Database repository implementations

pub mod booking_repository;
pub mod department_repository;
pub mod employee_repository;
pub mod hotel_repository;
pub mod inventory_repository;
pub mod ledger_repository;
pub mod report_repository;
pub mod room_repository;
pub mod transaction_repository;

pub use booking_repository::*;
pub use department_repository::*;
pub use employee_repository::*;
pub use hotel_repository::*;
pub use inventory_repository::*;
pub use ledger_repository::*;
pub use report_repository::*;
pub use room_repository::*;
pub use transaction_repository::*;

use crate::types::{DatabaseError, DatabaseResult};
use sqlx::SqliteConnection;

/// Fail with `NotFound` unless the hotel row exists.
pub(crate) async fn ensure_hotel_exists(
    conn: &mut SqliteConnection,
    hotel_id: i64,
) -> DatabaseResult<()> {
    let exists: Option<i64> = sqlx::query_scalar("SELECT id FROM hotels WHERE id = ?")
        .bind(hotel_id)
        .fetch_optional(conn)
        .await?;

    match exists {
        Some(_) => Ok(()),
        None => Err(DatabaseError::not_found("hotel", hotel_id)),
    }
}
