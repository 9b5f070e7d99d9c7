//! Employee REST endpoints

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::NaiveDate;
use hotel_database::entities::{Employee, EmployeeChanges, EmployeeFilter, NewEmployee};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

use super::{parse_optional, parse_required, ApiJson, ApiPath, ApiQuery};
use crate::error::{ErrorResponse, GatewayResult};
use crate::state::GatewayState;

#[derive(Debug, Serialize, ToSchema)]
pub struct EmployeeResponse {
    pub id: i64,
    pub hotel_id: i64,
    pub department_id: i64,
    pub department_name: String,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub role: String,
    pub salary_cents: i64,
    pub hired_on: NaiveDate,
    pub active: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Employee> for EmployeeResponse {
    fn from(employee: Employee) -> Self {
        Self {
            full_name: employee.full_name(),
            id: employee.id,
            hotel_id: employee.hotel_id,
            department_id: employee.department_id,
            department_name: employee.department_name,
            first_name: employee.first_name,
            last_name: employee.last_name,
            email: employee.email,
            phone: employee.phone,
            role: employee.role.to_string(),
            salary_cents: employee.salary_cents,
            hired_on: employee.hired_on,
            active: employee.active,
            created_at: employee.created_at,
            updated_at: employee.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateEmployeeRequest {
    pub hotel_id: i64,
    /// Resolved against the hotel's departments by name.
    pub department_name: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub role: String,
    pub salary_cents: i64,
    pub hired_on: NaiveDate,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateEmployeeRequest {
    pub department_name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub role: Option<String>,
    pub salary_cents: Option<i64>,
    pub active: Option<bool>,
}

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct ListEmployeesQuery {
    pub hotel_id: Option<i64>,
    pub department: Option<String>,
    pub role: Option<String>,
    pub active: Option<bool>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Create employee routes
pub fn create_employee_routes() -> Router<Arc<GatewayState>> {
    Router::new()
        .route("/employees", get(list_employees).post(create_employee))
        .route("/employees/:id", get(get_employee).put(update_employee))
        .route("/employees/:id/deactivate", post(deactivate_employee))
}

#[utoipa::path(
    get,
    path = "/api/employees",
    tag = "Employees",
    params(ListEmployeesQuery),
    responses(
        (status = 200, description = "Employees matching the filters", body = Vec<EmployeeResponse>),
        (status = 400, description = "Unknown role", body = ErrorResponse)
    )
)]
pub async fn list_employees(
    State(state): State<Arc<GatewayState>>,
    ApiQuery(params): ApiQuery<ListEmployeesQuery>,
) -> GatewayResult<Json<Vec<EmployeeResponse>>> {
    let filter = EmployeeFilter {
        hotel_id: params.hotel_id,
        department: params.department,
        role: parse_optional(params.role.as_deref())?,
        active: params.active,
    };

    let employees = state
        .services
        .employees
        .list(filter, params.limit, params.offset)
        .await?;
    Ok(Json(employees.into_iter().map(EmployeeResponse::from).collect()))
}

#[utoipa::path(
    post,
    path = "/api/employees",
    tag = "Employees",
    request_body = CreateEmployeeRequest,
    responses(
        (status = 201, description = "Employee hired", body = EmployeeResponse),
        (status = 400, description = "Invalid employee details", body = ErrorResponse),
        (status = 404, description = "Hotel or department not found", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse)
    )
)]
pub async fn create_employee(
    State(state): State<Arc<GatewayState>>,
    ApiJson(payload): ApiJson<CreateEmployeeRequest>,
) -> GatewayResult<impl IntoResponse> {
    let employee = state
        .services
        .employees
        .create(NewEmployee {
            hotel_id: payload.hotel_id,
            department_name: payload.department_name,
            first_name: payload.first_name,
            last_name: payload.last_name,
            email: payload.email,
            phone: payload.phone,
            role: parse_required(&payload.role)?,
            salary_cents: payload.salary_cents,
            hired_on: payload.hired_on,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(EmployeeResponse::from(employee))))
}

#[utoipa::path(
    get,
    path = "/api/employees/{id}",
    tag = "Employees",
    params(("id" = i64, Path, description = "Employee ID")),
    responses(
        (status = 200, description = "Employee details", body = EmployeeResponse),
        (status = 404, description = "Employee not found", body = ErrorResponse)
    )
)]
pub async fn get_employee(
    State(state): State<Arc<GatewayState>>,
    ApiPath(id): ApiPath<i64>,
) -> GatewayResult<Json<EmployeeResponse>> {
    let employee = state.services.employees.get(id).await?;
    Ok(Json(employee.into()))
}

#[utoipa::path(
    put,
    path = "/api/employees/{id}",
    tag = "Employees",
    params(("id" = i64, Path, description = "Employee ID")),
    request_body = UpdateEmployeeRequest,
    responses(
        (status = 200, description = "Employee updated", body = EmployeeResponse),
        (status = 400, description = "Invalid employee details", body = ErrorResponse),
        (status = 404, description = "Employee or department not found", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse)
    )
)]
pub async fn update_employee(
    State(state): State<Arc<GatewayState>>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(payload): ApiJson<UpdateEmployeeRequest>,
) -> GatewayResult<Json<EmployeeResponse>> {
    let changes = EmployeeChanges {
        department_name: payload.department_name,
        first_name: payload.first_name,
        last_name: payload.last_name,
        email: payload.email,
        phone: payload.phone,
        role: parse_optional(payload.role.as_deref())?,
        salary_cents: payload.salary_cents,
        active: payload.active,
    };

    let employee = state.services.employees.update(id, changes).await?;
    Ok(Json(employee.into()))
}

#[utoipa::path(
    post,
    path = "/api/employees/{id}/deactivate",
    tag = "Employees",
    params(("id" = i64, Path, description = "Employee ID")),
    responses(
        (status = 200, description = "Employee deactivated", body = EmployeeResponse),
        (status = 404, description = "Employee not found", body = ErrorResponse)
    )
)]
pub async fn deactivate_employee(
    State(state): State<Arc<GatewayState>>,
    ApiPath(id): ApiPath<i64>,
) -> GatewayResult<Json<EmployeeResponse>> {
    let employee = state.services.employees.deactivate(id).await?;
    Ok(Json(employee.into()))
}
