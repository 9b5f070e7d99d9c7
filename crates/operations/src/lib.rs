//! # Hotel Operations Crate
//!
//! Domain services for the hotel backend. Each service validates its input,
//! applies the business rules that sit above plain persistence, and delegates
//! to the repositories in `hotel-database`.
//!
//! ## Architecture
//!
//! - **Services**: one per module (hotels, rooms, departments, employees,
//!   inventory, bookings, payments, ledger, reports)
//! - **Validation**: shared field checks used at the service boundary
//! - **Errors**: [`OperationError`], mapped onto HTTP statuses by the gateway
//!
//! ## Usage
//!
//! ```rust,no_run
//! # async fn demo(pool: sqlx::SqlitePool) -> Result<(), hotel_operations::OperationError> {
//! use hotel_config::OperationsConfig;
//! use hotel_operations::Services;
//!
//! let services = Services::new(pool, OperationsConfig::default());
//! let hotel = services.hotels.get(1).await?;
//! println!("{}", hotel.name);
//! # Ok(())
//! # }
//! ```

use chrono::NaiveDate;
use hotel_config::OperationsConfig;
use hotel_database::Page;
use sqlx::SqlitePool;

pub mod error;
pub mod services;
pub mod validation;

pub use error::{OperationError, OperationResult};
pub use services::{
    BookingService, DepartmentService, EmployeeService, HotelService, InventoryService,
    LedgerEntryInput, LedgerService, PaymentService, ReportService, RoomService,
};

/// Every domain service, wired to one pool and one configuration.
#[derive(Clone)]
pub struct Services {
    pub hotels: HotelService,
    pub rooms: RoomService,
    pub departments: DepartmentService,
    pub employees: EmployeeService,
    pub inventory: InventoryService,
    pub bookings: BookingService,
    pub payments: PaymentService,
    pub ledger: LedgerService,
    pub reports: ReportService,
}

impl Services {
    pub fn new(pool: SqlitePool, config: OperationsConfig) -> Self {
        Self {
            hotels: HotelService::new(pool.clone(), config.clone()),
            rooms: RoomService::new(pool.clone(), config.clone()),
            departments: DepartmentService::new(pool.clone(), config.clone()),
            employees: EmployeeService::new(pool.clone(), config.clone()),
            inventory: InventoryService::new(pool.clone(), config.clone()),
            bookings: BookingService::new(pool.clone(), config.clone()),
            payments: PaymentService::new(pool.clone(), config.clone()),
            ledger: LedgerService::new(pool.clone(), config.clone()),
            reports: ReportService::new(pool, config),
        }
    }
}

/// Resolve optional paging parameters against the configured bounds.
pub fn page(config: &OperationsConfig, limit: Option<i64>, offset: Option<i64>) -> Page {
    Page::new(config.clamp_limit(limit), offset.unwrap_or(0))
}

/// Current calendar day in UTC, used when a request omits a date.
pub fn today() -> NaiveDate {
    chrono::Utc::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_applies_configured_bounds() {
        let config = OperationsConfig::default();

        assert_eq!(page(&config, None, None), Page::new(50, 0));
        assert_eq!(page(&config, Some(10), Some(20)), Page::new(10, 20));
        assert_eq!(page(&config, Some(5_000), Some(-3)), Page::new(200, 0));
        assert_eq!(page(&config, Some(0), None).limit, 50);
    }
}
