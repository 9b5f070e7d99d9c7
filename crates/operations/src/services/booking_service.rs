//! Booking service: reservations and the check-in / check-out lifecycle.

use crate::error::{OperationError, OperationResult};
use crate::validation;
use hotel_config::OperationsConfig;
use hotel_database::entities::{
    Booking, BookingCancellation, BookingFilter, CheckoutSummary, NewBooking, PaymentMethod,
};
use hotel_database::BookingRepository;
use sqlx::SqlitePool;

#[derive(Clone)]
pub struct BookingService {
    repository: BookingRepository,
    config: OperationsConfig,
}

impl BookingService {
    pub fn new(pool: SqlitePool, config: OperationsConfig) -> Self {
        Self {
            repository: BookingRepository::new(pool),
            config,
        }
    }

    pub async fn create(&self, request: NewBooking) -> OperationResult<Booking> {
        validation::stay_dates(request.check_in, request.check_out)?;
        let request = NewBooking {
            guest_name: validation::required_text("guest_name", &request.guest_name, 120)?,
            guest_email: validation::email(&request.guest_email)?,
            guest_phone: validation::optional_phone(request.guest_phone.as_deref())?,
            guests: validation::positive("guests", request.guests)?,
            ..request
        };

        Ok(self.repository.create(&request).await?)
    }

    pub async fn get(&self, id: i64) -> OperationResult<Booking> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| OperationError::not_found("booking", id))
    }

    pub async fn find_by_reference(&self, reference: &str) -> OperationResult<Booking> {
        let reference = validation::required_text("reference", reference, 64)?;
        self.repository
            .find_by_reference(&reference)
            .await?
            .ok_or_else(|| OperationError::not_found("booking", reference))
    }

    pub async fn list(
        &self,
        filter: BookingFilter,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> OperationResult<Vec<Booking>> {
        let page = crate::page(&self.config, limit, offset);
        Ok(self.repository.list(&filter, page).await?)
    }

    pub async fn check_in(&self, id: i64) -> OperationResult<Booking> {
        Ok(self.repository.check_in(id).await?)
    }

    /// Check the guest out and settle the balance with `method`.
    pub async fn check_out(&self, id: i64, method: PaymentMethod) -> OperationResult<CheckoutSummary> {
        Ok(self.repository.check_out(id, method).await?)
    }

    pub async fn cancel(&self, id: i64) -> OperationResult<BookingCancellation> {
        Ok(self.repository.cancel(id).await?)
    }
}
