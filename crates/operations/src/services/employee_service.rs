//! Employee service for staff records.

use crate::error::{OperationError, OperationResult};
use crate::validation;
use hotel_config::OperationsConfig;
use hotel_database::entities::{Employee, EmployeeChanges, EmployeeFilter, NewEmployee};
use hotel_database::EmployeeRepository;
use sqlx::SqlitePool;
use tracing::info;

#[derive(Clone)]
pub struct EmployeeService {
    repository: EmployeeRepository,
    config: OperationsConfig,
}

impl EmployeeService {
    pub fn new(pool: SqlitePool, config: OperationsConfig) -> Self {
        Self {
            repository: EmployeeRepository::new(pool),
            config,
        }
    }

    pub async fn create(&self, request: NewEmployee) -> OperationResult<Employee> {
        let request = NewEmployee {
            department_name: validation::required_text("department_name", &request.department_name, 100)?,
            first_name: validation::required_text("first_name", &request.first_name, 80)?,
            last_name: validation::required_text("last_name", &request.last_name, 80)?,
            email: validation::email(&request.email)?,
            phone: validation::optional_phone(request.phone.as_deref())?,
            salary_cents: validation::non_negative("salary_cents", request.salary_cents)?,
            ..request
        };

        Ok(self.repository.create(&request).await?)
    }

    pub async fn get(&self, id: i64) -> OperationResult<Employee> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| OperationError::not_found("employee", id))
    }

    pub async fn list(
        &self,
        filter: EmployeeFilter,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> OperationResult<Vec<Employee>> {
        let page = crate::page(&self.config, limit, offset);
        Ok(self.repository.list(&filter, page).await?)
    }

    /// Update an employee; a new department is looked up by name and the
    /// whole change is applied atomically.
    pub async fn update(&self, id: i64, changes: EmployeeChanges) -> OperationResult<Employee> {
        let changes = EmployeeChanges {
            department_name: changes
                .department_name
                .map(|v| validation::required_text("department_name", &v, 100))
                .transpose()?,
            first_name: changes
                .first_name
                .map(|v| validation::required_text("first_name", &v, 80))
                .transpose()?,
            last_name: changes
                .last_name
                .map(|v| validation::required_text("last_name", &v, 80))
                .transpose()?,
            email: changes.email.map(|v| validation::email(&v)).transpose()?,
            phone: changes.phone.map(|v| validation::phone(&v)).transpose()?,
            salary_cents: changes
                .salary_cents
                .map(|v| validation::non_negative("salary_cents", v))
                .transpose()?,
            ..changes
        };

        Ok(self.repository.update(id, &changes).await?)
    }

    pub async fn deactivate(&self, id: i64) -> OperationResult<Employee> {
        let employee = self.repository.deactivate(id).await?;
        info!(employee_id = id, name = %employee.full_name(), "employee deactivated");
        Ok(employee)
    }
}
