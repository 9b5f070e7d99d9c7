//! Services module for the hotel domain.

pub mod booking_service;
pub mod department_service;
pub mod employee_service;
pub mod hotel_service;
pub mod inventory_service;
pub mod ledger_service;
pub mod payment_service;
pub mod report_service;
pub mod room_service;

pub use booking_service::BookingService;
pub use department_service::DepartmentService;
pub use employee_service::EmployeeService;
pub use hotel_service::HotelService;
pub use inventory_service::InventoryService;
pub use ledger_service::{LedgerEntryInput, LedgerService};
pub use payment_service::PaymentService;
pub use report_service::ReportService;
pub use room_service::RoomService;
