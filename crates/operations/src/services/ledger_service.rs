//! Ledger service for bills and maintenance spend.
//!
//! Entries are only ever appended and read back.

use crate::error::{OperationError, OperationResult};
use crate::validation;
use chrono::NaiveDate;
use hotel_config::OperationsConfig;
use hotel_database::entities::{LedgerCategory, LedgerEntry, LedgerFilter, NewLedgerEntry};
use hotel_database::LedgerRepository;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

/// A manually recorded expense. `recorded_on` defaults to today.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerEntryInput {
    pub hotel_id: i64,
    pub category: LedgerCategory,
    pub description: String,
    pub amount_cents: i64,
    pub recorded_on: Option<NaiveDate>,
}

#[derive(Clone)]
pub struct LedgerService {
    repository: LedgerRepository,
    config: OperationsConfig,
}

impl LedgerService {
    pub fn new(pool: SqlitePool, config: OperationsConfig) -> Self {
        Self {
            repository: LedgerRepository::new(pool),
            config,
        }
    }

    pub async fn record(&self, input: LedgerEntryInput) -> OperationResult<LedgerEntry> {
        let entry = NewLedgerEntry {
            hotel_id: input.hotel_id,
            category: input.category,
            description: validation::required_text("description", &input.description, 500)?,
            amount_cents: validation::positive("amount_cents", input.amount_cents)?,
            inventory_transaction_id: None,
            recorded_on: input.recorded_on.unwrap_or_else(crate::today),
        };

        Ok(self.repository.record(&entry).await?)
    }

    pub async fn get(&self, id: i64) -> OperationResult<LedgerEntry> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| OperationError::not_found("ledger entry", id))
    }

    pub async fn list(
        &self,
        filter: LedgerFilter,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> OperationResult<Vec<LedgerEntry>> {
        if let (Some(from), Some(to)) = (filter.from, filter.to) {
            validation::date_range(from, to)?;
        }
        let page = crate::page(&self.config, limit, offset);
        Ok(self.repository.list(&filter, page).await?)
    }
}
