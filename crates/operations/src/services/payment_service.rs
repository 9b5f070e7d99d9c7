//! Payment service over the guest transactions table.

use crate::error::{OperationError, OperationResult};
use crate::validation;
use hotel_config::OperationsConfig;
use hotel_database::entities::{FinancialTransaction, NewPayment, TransactionFilter};
use hotel_database::TransactionRepository;
use sqlx::SqlitePool;

#[derive(Clone)]
pub struct PaymentService {
    repository: TransactionRepository,
    config: OperationsConfig,
}

impl PaymentService {
    pub fn new(pool: SqlitePool, config: OperationsConfig) -> Self {
        Self {
            repository: TransactionRepository::new(pool),
            config,
        }
    }

    pub async fn record_payment(&self, payment: NewPayment) -> OperationResult<FinancialTransaction> {
        let payment = NewPayment {
            amount_cents: validation::positive("amount_cents", payment.amount_cents)?,
            reference: validation::optional_text("reference", payment.reference.as_deref(), 120)?,
            ..payment
        };

        Ok(self.repository.record_payment(&payment).await?)
    }

    pub async fn get(&self, id: i64) -> OperationResult<FinancialTransaction> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| OperationError::not_found("transaction", id))
    }

    pub async fn list(
        &self,
        filter: TransactionFilter,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> OperationResult<Vec<FinancialTransaction>> {
        if let (Some(from), Some(to)) = (filter.from, filter.to) {
            validation::date_range(from, to)?;
        }
        let page = crate::page(&self.config, limit, offset);
        Ok(self.repository.list(&filter, page).await?)
    }
}
