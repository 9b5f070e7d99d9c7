//! Repository for employee data access operations.

use crate::entities::{Employee, EmployeeChanges, EmployeeFilter, NewEmployee};
use crate::repos::department_repository::fetch_department_by_name;
use crate::repos::ensure_hotel_exists;
use crate::types::{now_timestamp, DatabaseError, DatabaseResult, Page};
use sqlx::{QueryBuilder, Sqlite, SqliteConnection, SqlitePool};
use tracing::info;

const EMPLOYEE_SELECT: &str = "SELECT e.id, e.hotel_id, e.department_id, d.name AS department_name,
        e.first_name, e.last_name, e.email, e.phone, e.role, e.salary_cents, e.hired_on,
        e.active, e.created_at, e.updated_at
     FROM employees e
     JOIN departments d ON d.id = e.department_id";

#[derive(Clone)]
pub struct EmployeeRepository {
    pool: SqlitePool,
}

impl EmployeeRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: i64) -> DatabaseResult<Option<Employee>> {
        let mut conn = self.pool.acquire().await?;
        fetch_employee(&mut conn, id).await
    }

    pub async fn list(&self, filter: &EmployeeFilter, page: Page) -> DatabaseResult<Vec<Employee>> {
        let mut query = QueryBuilder::<Sqlite>::new(format!("{EMPLOYEE_SELECT} WHERE 1 = 1"));

        if let Some(hotel_id) = filter.hotel_id {
            query.push(" AND e.hotel_id = ").push_bind(hotel_id);
        }
        if let Some(department) = &filter.department {
            query
                .push(" AND d.name = ")
                .push_bind(department.trim())
                .push(" COLLATE NOCASE");
        }
        if let Some(role) = filter.role {
            query.push(" AND e.role = ").push_bind(role);
        }
        if let Some(active) = filter.active {
            query.push(" AND e.active = ").push_bind(active);
        }

        query
            .push(" ORDER BY e.last_name, e.first_name, e.id LIMIT ")
            .push_bind(page.limit)
            .push(" OFFSET ")
            .push_bind(page.offset);

        let employees = query.build_query_as::<Employee>().fetch_all(&self.pool).await?;
        Ok(employees)
    }

    /// Insert an employee, resolving the department by name in the same transaction
    pub async fn create(&self, request: &NewEmployee) -> DatabaseResult<Employee> {
        let mut tx = self.pool.begin().await?;
        ensure_hotel_exists(&mut tx, request.hotel_id).await?;

        let department = fetch_department_by_name(&mut tx, request.hotel_id, &request.department_name)
            .await?
            .ok_or_else(|| {
                DatabaseError::NotFound(format!(
                    "department '{}' in hotel {}",
                    request.department_name, request.hotel_id
                ))
            })?;

        let now = now_timestamp();
        let result = sqlx::query(
            "INSERT INTO employees (hotel_id, department_id, first_name, last_name, email, phone, role, salary_cents, hired_on, active, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, 1, ?, ?)",
        )
        .bind(request.hotel_id)
        .bind(department.id)
        .bind(&request.first_name)
        .bind(&request.last_name)
        .bind(&request.email)
        .bind(&request.phone)
        .bind(request.role)
        .bind(request.salary_cents)
        .bind(request.hired_on)
        .bind(&now)
        .bind(&now)
        .execute(&mut *tx)
        .await
        .map_err(|e| duplicate_email(e, &request.email))?;

        let employee_id = result.last_insert_rowid();
        let employee = fetch_employee(&mut tx, employee_id)
            .await?
            .ok_or_else(|| DatabaseError::not_found("employee", employee_id))?;
        tx.commit().await?;

        info!(
            employee_id,
            hotel_id = request.hotel_id,
            department = %department.name,
            role = %request.role,
            "created employee"
        );
        Ok(employee)
    }

    /// Update an employee. A department change is resolved by name within the
    /// employee's hotel; the lookup and the write commit or roll back together.
    pub async fn update(&self, id: i64, changes: &EmployeeChanges) -> DatabaseResult<Employee> {
        let mut tx = self.pool.begin().await?;

        let current = fetch_employee(&mut tx, id)
            .await?
            .ok_or_else(|| DatabaseError::not_found("employee", id))?;

        if changes.is_empty() {
            return Ok(current);
        }

        let department_id = match &changes.department_name {
            Some(name) => {
                let department = fetch_department_by_name(&mut tx, current.hotel_id, name)
                    .await?
                    .ok_or_else(|| {
                        DatabaseError::NotFound(format!(
                            "department '{}' in hotel {}",
                            name, current.hotel_id
                        ))
                    })?;
                Some(department.id)
            }
            None => None,
        };

        let now = now_timestamp();
        let mut query = QueryBuilder::<Sqlite>::new("UPDATE employees SET ");
        {
            let mut set = query.separated(", ");
            if let Some(department_id) = department_id {
                set.push("department_id = ").push_bind_unseparated(department_id);
            }
            if let Some(first_name) = &changes.first_name {
                set.push("first_name = ").push_bind_unseparated(first_name);
            }
            if let Some(last_name) = &changes.last_name {
                set.push("last_name = ").push_bind_unseparated(last_name);
            }
            if let Some(email) = &changes.email {
                set.push("email = ").push_bind_unseparated(email);
            }
            if let Some(phone) = &changes.phone {
                set.push("phone = ").push_bind_unseparated(phone);
            }
            if let Some(role) = changes.role {
                set.push("role = ").push_bind_unseparated(role);
            }
            if let Some(salary_cents) = changes.salary_cents {
                set.push("salary_cents = ").push_bind_unseparated(salary_cents);
            }
            if let Some(active) = changes.active {
                set.push("active = ").push_bind_unseparated(active);
            }
            set.push("updated_at = ").push_bind_unseparated(&now);
        }
        query.push(" WHERE id = ").push_bind(id);

        query.build().execute(&mut *tx).await.map_err(|e| {
            duplicate_email(e, changes.email.as_deref().unwrap_or(current.email.as_str()))
        })?;

        let updated = fetch_employee(&mut tx, id)
            .await?
            .ok_or_else(|| DatabaseError::not_found("employee", id))?;
        tx.commit().await?;

        info!(
            employee_id = id,
            department = %updated.department_name,
            active = updated.active,
            "updated employee"
        );
        Ok(updated)
    }

    /// Soft delete: the row stays for payroll history
    pub async fn deactivate(&self, id: i64) -> DatabaseResult<Employee> {
        self.update(
            id,
            &EmployeeChanges {
                active: Some(false),
                ..Default::default()
            },
        )
        .await
    }
}

async fn fetch_employee(conn: &mut SqliteConnection, id: i64) -> DatabaseResult<Option<Employee>> {
    let employee = sqlx::query_as::<_, Employee>(&format!("{EMPLOYEE_SELECT} WHERE e.id = ?"))
        .bind(id)
        .fetch_optional(conn)
        .await?;
    Ok(employee)
}

fn duplicate_email(error: sqlx::Error, email: &str) -> DatabaseError {
    match DatabaseError::from(error) {
        DatabaseError::Duplicate(_) => {
            DatabaseError::Duplicate(format!("an employee with email {email} already exists"))
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::EmployeeRole;
    use crate::test_utils::{date, TestDatabase};

    fn new_employee(hotel_id: i64, department: &str, email: &str) -> NewEmployee {
        NewEmployee {
            hotel_id,
            department_name: department.to_string(),
            first_name: "Marta".to_string(),
            last_name: "Costa".to_string(),
            email: email.to_string(),
            phone: None,
            role: EmployeeRole::Receptionist,
            salary_cents: 180_000,
            hired_on: date(2023, 3, 1),
        }
    }

    #[tokio::test]
    async fn test_create_employee_resolves_department_by_name() {
        let db = TestDatabase::new().await;
        let hotel_id = db.insert_hotel("Harbour View").await;
        let front_desk = db.insert_department(hotel_id, "Front Desk").await;
        let repo = EmployeeRepository::new(db.pool.clone());

        let employee = repo
            .create(&new_employee(hotel_id, "front desk", "marta@example.com"))
            .await
            .unwrap();

        assert_eq!(employee.department_id, front_desk);
        assert_eq!(employee.department_name, "Front Desk");
        assert!(employee.active);
        assert_eq!(employee.hired_on, date(2023, 3, 1));
        assert_eq!(employee.full_name(), "Marta Costa");
    }

    #[tokio::test]
    async fn test_create_employee_with_unknown_department_is_not_found() {
        let db = TestDatabase::new().await;
        let hotel_id = db.insert_hotel("Harbour View").await;
        let repo = EmployeeRepository::new(db.pool.clone());

        let result = repo.create(&new_employee(hotel_id, "Spa", "x@example.com")).await;
        assert!(matches!(result, Err(DatabaseError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_duplicate_email_is_rejected() {
        let db = TestDatabase::new().await;
        let hotel_id = db.insert_hotel("Harbour View").await;
        db.insert_department(hotel_id, "Front Desk").await;
        let repo = EmployeeRepository::new(db.pool.clone());

        repo.create(&new_employee(hotel_id, "Front Desk", "marta@example.com"))
            .await
            .unwrap();
        let duplicate = repo
            .create(&new_employee(hotel_id, "Front Desk", "MARTA@example.com"))
            .await;
        assert!(matches!(duplicate, Err(DatabaseError::Duplicate(_))));
    }

    #[tokio::test]
    async fn test_update_employee_moves_department_and_rolls_back_on_unknown_name() {
        let db = TestDatabase::new().await;
        let hotel_id = db.insert_hotel("Harbour View").await;
        db.insert_department(hotel_id, "Front Desk").await;
        let kitchen = db.insert_department(hotel_id, "Kitchen").await;
        let repo = EmployeeRepository::new(db.pool.clone());

        let employee = repo
            .create(&new_employee(hotel_id, "Front Desk", "marta@example.com"))
            .await
            .unwrap();

        let moved = repo
            .update(
                employee.id,
                &EmployeeChanges {
                    department_name: Some("Kitchen".to_string()),
                    role: Some(EmployeeRole::Staff),
                    salary_cents: Some(200_000),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(moved.department_id, kitchen);
        assert_eq!(moved.role, EmployeeRole::Staff);
        assert_eq!(moved.salary_cents, 200_000);

        let failed = repo
            .update(
                employee.id,
                &EmployeeChanges {
                    department_name: Some("Casino".to_string()),
                    salary_cents: Some(1),
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(failed, Err(DatabaseError::NotFound(_))));

        let unchanged = repo.find_by_id(employee.id).await.unwrap().unwrap();
        assert_eq!(unchanged.salary_cents, 200_000);
        assert_eq!(unchanged.department_id, kitchen);
    }

    #[tokio::test]
    async fn test_list_and_deactivate_employees() {
        let db = TestDatabase::new().await;
        let hotel_id = db.insert_hotel("Harbour View").await;
        db.insert_department(hotel_id, "Front Desk").await;
        db.insert_department(hotel_id, "Kitchen").await;
        let repo = EmployeeRepository::new(db.pool.clone());

        let first = repo
            .create(&new_employee(hotel_id, "Front Desk", "a@example.com"))
            .await
            .unwrap();
        repo.create(&new_employee(hotel_id, "Kitchen", "b@example.com"))
            .await
            .unwrap();

        let deactivated = repo.deactivate(first.id).await.unwrap();
        assert!(!deactivated.active);

        let active_front_desk = repo
            .list(
                &EmployeeFilter {
                    hotel_id: Some(hotel_id),
                    department: Some("Front Desk".to_string()),
                    active: Some(true),
                    ..Default::default()
                },
                Page::default(),
            )
            .await
            .unwrap();
        assert!(active_front_desk.is_empty());

        let all = repo
            .list(
                &EmployeeFilter {
                    hotel_id: Some(hotel_id),
                    ..Default::default()
                },
                Page::default(),
            )
            .await
            .unwrap();
        assert_eq!(all.len(), 2);
    }
}
