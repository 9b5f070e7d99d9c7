//! Department service.

use crate::error::{OperationError, OperationResult};
use crate::validation;
use hotel_config::OperationsConfig;
use hotel_database::entities::{Department, NewDepartment};
use hotel_database::{DepartmentRepository, HotelRepository};
use sqlx::SqlitePool;

#[derive(Clone)]
pub struct DepartmentService {
    repository: DepartmentRepository,
    hotels: HotelRepository,
    config: OperationsConfig,
}

impl DepartmentService {
    pub fn new(pool: SqlitePool, config: OperationsConfig) -> Self {
        Self {
            repository: DepartmentRepository::new(pool.clone()),
            hotels: HotelRepository::new(pool),
            config,
        }
    }

    pub async fn create(&self, request: NewDepartment) -> OperationResult<Department> {
        let request = NewDepartment {
            hotel_id: request.hotel_id,
            name: validation::required_text("name", &request.name, 100)?,
            description: validation::optional_text("description", request.description.as_deref(), 500)?,
        };

        Ok(self.repository.create(&request).await?)
    }

    pub async fn get(&self, id: i64) -> OperationResult<Department> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| OperationError::not_found("department", id))
    }

    pub async fn find_by_name(&self, hotel_id: i64, name: &str) -> OperationResult<Department> {
        let name = validation::required_text("department", name, 100)?;
        self.repository
            .find_by_name(hotel_id, &name)
            .await?
            .ok_or_else(|| OperationError::not_found("department", format!("'{name}' in hotel {hotel_id}")))
    }

    pub async fn list(
        &self,
        hotel_id: i64,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> OperationResult<Vec<Department>> {
        if self.hotels.find_by_id(hotel_id).await?.is_none() {
            return Err(OperationError::not_found("hotel", hotel_id));
        }
        let page = crate::page(&self.config, limit, offset);
        Ok(self.repository.list(hotel_id, page).await?)
    }
}
