//! Domain entities for the database layer
//!
//! Row types, insert payloads, partial updates, and listing filters for each table.

/// Declares a unit enum stored as lowercase text, with `as_str`, `Display`,
/// and a strict `FromStr` that rejects unknown values.
macro_rules! text_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident { $($variant:ident => $text:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize, sqlx::Type)]
        #[serde(rename_all = "snake_case")]
        #[sqlx(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::types::DatabaseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_ascii_lowercase().as_str() {
                    $($text => Ok($name::$variant),)+
                    other => Err($crate::types::DatabaseError::ValidationError(format!(
                        "unknown {} '{}', expected one of: {}",
                        stringify!($name),
                        other,
                        [$($text),+].join(", ")
                    ))),
                }
            }
        }
    };
}

pub mod booking;
pub mod department;
pub mod employee;
pub mod hotel;
pub mod inventory;
pub mod ledger;
pub mod report;
pub mod room;
pub mod transaction;

pub use booking::{
    Booking, BookingCancellation, BookingFilter, BookingStatus, CheckoutSummary, NewBooking,
};
pub use department::{Department, NewDepartment};
pub use employee::{Employee, EmployeeChanges, EmployeeFilter, EmployeeRole, NewEmployee};
pub use hotel::{Hotel, HotelChanges, HotelFilter, NewHotel};
pub use inventory::{
    InventoryChanges, InventoryFilter, InventoryItem, InventoryTransaction,
    InventoryTransactionFilter, InventoryTransactionKind, InventoryTransactionStatus,
    NewInventoryItem, NewOrder, ReceivedOrder, StockAdjustment,
};
pub use ledger::{LedgerCategory, LedgerEntry, LedgerFilter, NewLedgerEntry};
pub use report::{
    AdminDashboard, CategoryTotal, DepartmentHeadcount, FinancialSummary, HotelSummaryRow,
    ManagerDashboard, OccupancyReport, ReceptionistDashboard,
};
pub use room::{NewRoom, Room, RoomChanges, RoomFilter, RoomStatus, RoomType};
pub use transaction::{
    FinancialTransaction, NewPayment, PaymentMethod, TransactionFilter, TransactionKind,
};
