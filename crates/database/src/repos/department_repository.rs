//! Repository for department data access operations.

use crate::entities::{Department, NewDepartment};
use crate::repos::ensure_hotel_exists;
use crate::types::{now_timestamp, DatabaseError, DatabaseResult, Page};
use sqlx::{SqliteConnection, SqlitePool};
use tracing::info;

const DEPARTMENT_SELECT: &str = "SELECT d.id, d.hotel_id, d.name, d.description, d.created_at,
        (SELECT COUNT(*) FROM employees e WHERE e.department_id = d.id AND e.active = 1) AS employee_count
     FROM departments d";

#[derive(Clone)]
pub struct DepartmentRepository {
    pool: SqlitePool,
}

impl DepartmentRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: i64) -> DatabaseResult<Option<Department>> {
        let department = sqlx::query_as::<_, Department>(&format!("{DEPARTMENT_SELECT} WHERE d.id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(department)
    }

    /// Case-insensitive lookup of a department inside a hotel
    pub async fn find_by_name(&self, hotel_id: i64, name: &str) -> DatabaseResult<Option<Department>> {
        let mut conn = self.pool.acquire().await?;
        fetch_department_by_name(&mut conn, hotel_id, name).await
    }

    pub async fn list(&self, hotel_id: i64, page: Page) -> DatabaseResult<Vec<Department>> {
        let departments = sqlx::query_as::<_, Department>(&format!(
            "{DEPARTMENT_SELECT} WHERE d.hotel_id = ? ORDER BY d.name LIMIT ? OFFSET ?"
        ))
        .bind(hotel_id)
        .bind(page.limit)
        .bind(page.offset)
        .fetch_all(&self.pool)
        .await?;
        Ok(departments)
    }

    pub async fn create(&self, request: &NewDepartment) -> DatabaseResult<Department> {
        let mut tx = self.pool.begin().await?;
        ensure_hotel_exists(&mut tx, request.hotel_id).await?;

        let now = now_timestamp();
        let result = sqlx::query(
            "INSERT INTO departments (hotel_id, name, description, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(request.hotel_id)
        .bind(&request.name)
        .bind(&request.description)
        .bind(&now)
        .execute(&mut *tx)
        .await
        .map_err(|e| match DatabaseError::from(e) {
            DatabaseError::Duplicate(_) => DatabaseError::Duplicate(format!(
                "department '{}' already exists in hotel {}",
                request.name, request.hotel_id
            )),
            other => other,
        })?;
        tx.commit().await?;

        let department_id = result.last_insert_rowid();
        info!(department_id, hotel_id = request.hotel_id, name = %request.name, "created department");

        Ok(Department {
            id: department_id,
            hotel_id: request.hotel_id,
            name: request.name.clone(),
            description: request.description.clone(),
            created_at: now,
            employee_count: 0,
        })
    }
}

pub(crate) async fn fetch_department_by_name(
    conn: &mut SqliteConnection,
    hotel_id: i64,
    name: &str,
) -> DatabaseResult<Option<Department>> {
    let department = sqlx::query_as::<_, Department>(&format!(
        "{DEPARTMENT_SELECT} WHERE d.hotel_id = ? AND d.name = ? COLLATE NOCASE"
    ))
    .bind(hotel_id)
    .bind(name.trim())
    .fetch_optional(conn)
    .await?;
    Ok(department)
}
