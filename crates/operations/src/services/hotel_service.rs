//! Hotel service for managing hotel properties.

use crate::error::{OperationError, OperationResult};
use crate::validation;
use hotel_config::OperationsConfig;
use hotel_database::entities::{Hotel, HotelChanges, HotelFilter, NewHotel};
use hotel_database::HotelRepository;
use sqlx::SqlitePool;
use tracing::warn;

/// Service for hotel operations
#[derive(Clone)]
pub struct HotelService {
    repository: HotelRepository,
    config: OperationsConfig,
}

impl HotelService {
    pub fn new(pool: SqlitePool, config: OperationsConfig) -> Self {
        Self {
            repository: HotelRepository::new(pool),
            config,
        }
    }

    pub async fn create(&self, request: NewHotel) -> OperationResult<Hotel> {
        let request = NewHotel {
            name: validation::required_text("name", &request.name, 120)?,
            address: validation::required_text("address", &request.address, 255)?,
            city: validation::required_text("city", &request.city, 100)?,
            phone: validation::phone(&request.phone)?,
            email: validation::email(&request.email)?,
            star_rating: validation::star_rating(request.star_rating)?,
            image_path: validation::optional_text("image_path", request.image_path.as_deref(), 500)?,
        };

        Ok(self.repository.create(&request).await?)
    }

    pub async fn get(&self, id: i64) -> OperationResult<Hotel> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| OperationError::not_found("hotel", id))
    }

    pub async fn list(
        &self,
        filter: HotelFilter,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> OperationResult<Vec<Hotel>> {
        let filter = HotelFilter {
            city: validation::optional_text("city", filter.city.as_deref(), 100)?,
        };
        let page = crate::page(&self.config, limit, offset);
        Ok(self.repository.list(&filter, page).await?)
    }

    pub async fn update(&self, id: i64, changes: HotelChanges) -> OperationResult<Hotel> {
        let changes = HotelChanges {
            name: changes
                .name
                .map(|v| validation::required_text("name", &v, 120))
                .transpose()?,
            address: changes
                .address
                .map(|v| validation::required_text("address", &v, 255))
                .transpose()?,
            city: changes
                .city
                .map(|v| validation::required_text("city", &v, 100))
                .transpose()?,
            phone: changes.phone.map(|v| validation::phone(&v)).transpose()?,
            email: changes.email.map(|v| validation::email(&v)).transpose()?,
            star_rating: changes.star_rating.map(validation::star_rating).transpose()?,
            image_path: changes
                .image_path
                .map(|v| validation::required_text("image_path", &v, 500))
                .transpose()?,
        };

        Ok(self.repository.update(id, &changes).await?)
    }

    pub async fn delete(&self, id: i64) -> OperationResult<()> {
        self.repository.delete(id).await.map_err(|e| {
            warn!(hotel_id = id, error = %e, "hotel delete rejected");
            OperationError::from(e)
        })
    }
}
