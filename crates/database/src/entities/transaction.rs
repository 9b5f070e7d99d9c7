//! Guest payment and refund entity definitions

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

text_enum! {
    pub enum TransactionKind {
        Payment => "payment",
        Refund => "refund",
    }
}

text_enum! {
    pub enum PaymentMethod {
        Cash => "cash",
        Card => "card",
        Online => "online",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct FinancialTransaction {
    pub id: i64,
    pub hotel_id: i64,
    pub booking_id: Option<i64>,
    pub kind: TransactionKind,
    pub method: PaymentMethod,
    pub amount_cents: i64,
    pub reference: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPayment {
    pub booking_id: i64,
    pub amount_cents: i64,
    pub method: PaymentMethod,
    pub reference: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransactionFilter {
    pub hotel_id: Option<i64>,
    pub booking_id: Option<i64>,
    pub kind: Option<TransactionKind>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}
