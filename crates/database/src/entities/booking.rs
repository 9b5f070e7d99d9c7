//! Booking entity definitions

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::transaction::FinancialTransaction;

text_enum! {
    pub enum BookingStatus {
        Booked => "booked",
        CheckedIn => "checked_in",
        CheckedOut => "checked_out",
        Cancelled => "cancelled",
    }
}

impl BookingStatus {
    /// Whether the booking still holds its room for the reserved nights.
    pub fn is_active(&self) -> bool {
        matches!(self, BookingStatus::Booked | BookingStatus::CheckedIn)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Booking {
    pub id: i64,
    pub reference: String,
    pub hotel_id: i64,
    pub room_id: i64,
    pub room_number: String,
    pub guest_name: String,
    pub guest_email: String,
    pub guest_phone: Option<String>,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guests: i64,
    pub total_cents: i64,
    pub status: BookingStatus,
    pub created_at: String,
    pub updated_at: String,
}

impl Booking {
    pub fn nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days()
    }

    /// Half-open stay interval overlap, so a same-day turnover is not a clash.
    pub fn overlaps(&self, check_in: NaiveDate, check_out: NaiveDate) -> bool {
        self.check_in < check_out && check_in < self.check_out
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewBooking {
    pub room_id: i64,
    pub guest_name: String,
    pub guest_email: String,
    pub guest_phone: Option<String>,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guests: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookingFilter {
    pub hotel_id: Option<i64>,
    pub room_id: Option<i64>,
    pub status: Option<BookingStatus>,
    /// Bookings whose stay covers this night.
    pub date: Option<NaiveDate>,
}

/// Bill produced when a guest checks out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutSummary {
    pub booking: Booking,
    pub nights: i64,
    pub total_cents: i64,
    pub previously_paid_cents: i64,
    pub amount_charged_cents: i64,
    pub payment: Option<FinancialTransaction>,
}

/// Result of cancelling a booking; `refund` is set when money had been taken.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingCancellation {
    pub booking: Booking,
    pub refund: Option<FinancialTransaction>,
}
