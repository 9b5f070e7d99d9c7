//! Department REST endpoints

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use hotel_database::entities::{Department, NewDepartment};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

use super::{ApiJson, ApiPath, ApiQuery};
use crate::error::{ErrorResponse, GatewayResult};
use crate::state::GatewayState;

#[derive(Debug, Serialize, ToSchema)]
pub struct DepartmentResponse {
    pub id: i64,
    pub hotel_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub employee_count: i64,
    pub created_at: String,
}

impl From<Department> for DepartmentResponse {
    fn from(department: Department) -> Self {
        Self {
            id: department.id,
            hotel_id: department.hotel_id,
            name: department.name,
            description: department.description,
            employee_count: department.employee_count,
            created_at: department.created_at,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateDepartmentRequest {
    pub hotel_id: i64,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct ListDepartmentsQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Create department routes
pub fn create_department_routes() -> Router<Arc<GatewayState>> {
    Router::new()
        .route("/departments", post(create_department))
        .route("/departments/:id", get(get_department))
        .route("/hotels/:id/departments", get(list_departments))
        .route("/hotels/:id/departments/:name", get(find_department_by_name))
}

#[utoipa::path(
    post,
    path = "/api/departments",
    tag = "Departments",
    request_body = CreateDepartmentRequest,
    responses(
        (status = 201, description = "Department created", body = DepartmentResponse),
        (status = 400, description = "Invalid department details", body = ErrorResponse),
        (status = 404, description = "Hotel not found", body = ErrorResponse),
        (status = 409, description = "Department name already used in the hotel", body = ErrorResponse)
    )
)]
pub async fn create_department(
    State(state): State<Arc<GatewayState>>,
    ApiJson(payload): ApiJson<CreateDepartmentRequest>,
) -> GatewayResult<impl IntoResponse> {
    let department = state
        .services
        .departments
        .create(NewDepartment {
            hotel_id: payload.hotel_id,
            name: payload.name,
            description: payload.description,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(DepartmentResponse::from(department))))
}

#[utoipa::path(
    get,
    path = "/api/departments/{id}",
    tag = "Departments",
    params(("id" = i64, Path, description = "Department ID")),
    responses(
        (status = 200, description = "Department details", body = DepartmentResponse),
        (status = 404, description = "Department not found", body = ErrorResponse)
    )
)]
pub async fn get_department(
    State(state): State<Arc<GatewayState>>,
    ApiPath(id): ApiPath<i64>,
) -> GatewayResult<Json<DepartmentResponse>> {
    let department = state.services.departments.get(id).await?;
    Ok(Json(department.into()))
}

#[utoipa::path(
    get,
    path = "/api/hotels/{id}/departments",
    tag = "Departments",
    params(("id" = i64, Path, description = "Hotel ID"), ListDepartmentsQuery),
    responses(
        (status = 200, description = "Departments with active headcount", body = Vec<DepartmentResponse>),
        (status = 404, description = "Hotel not found", body = ErrorResponse)
    )
)]
pub async fn list_departments(
    State(state): State<Arc<GatewayState>>,
    ApiPath(hotel_id): ApiPath<i64>,
    ApiQuery(params): ApiQuery<ListDepartmentsQuery>,
) -> GatewayResult<Json<Vec<DepartmentResponse>>> {
    let departments = state
        .services
        .departments
        .list(hotel_id, params.limit, params.offset)
        .await?;

    Ok(Json(departments.into_iter().map(DepartmentResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/api/hotels/{id}/departments/{name}",
    tag = "Departments",
    params(
        ("id" = i64, Path, description = "Hotel ID"),
        ("name" = String, Path, description = "Department name, matched case-insensitively")
    ),
    responses(
        (status = 200, description = "Department details", body = DepartmentResponse),
        (status = 404, description = "No such department in the hotel", body = ErrorResponse)
    )
)]
pub async fn find_department_by_name(
    State(state): State<Arc<GatewayState>>,
    ApiPath((hotel_id, name)): ApiPath<(i64, String)>,
) -> GatewayResult<Json<DepartmentResponse>> {
    let department = state.services.departments.find_by_name(hotel_id, &name).await?;
    Ok(Json(department.into()))
}
