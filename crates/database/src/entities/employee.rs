//! Employee entity definitions

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

text_enum! {
    pub enum EmployeeRole {
        Admin => "admin",
        Manager => "manager",
        Receptionist => "receptionist",
        Housekeeping => "housekeeping",
        Staff => "staff",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Employee {
    pub id: i64,
    pub hotel_id: i64,
    pub department_id: i64,
    pub department_name: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub role: EmployeeRole,
    pub salary_cents: i64,
    pub hired_on: NaiveDate,
    pub active: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl Employee {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Insert payload. The department is resolved by name inside the hotel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewEmployee {
    pub hotel_id: i64,
    pub department_name: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub role: EmployeeRole,
    pub salary_cents: i64,
    pub hired_on: NaiveDate,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmployeeChanges {
    pub department_name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub role: Option<EmployeeRole>,
    pub salary_cents: Option<i64>,
    pub active: Option<bool>,
}

impl EmployeeChanges {
    pub fn is_empty(&self) -> bool {
        self.department_name.is_none()
            && self.first_name.is_none()
            && self.last_name.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.role.is_none()
            && self.salary_cents.is_none()
            && self.active.is_none()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmployeeFilter {
    pub hotel_id: Option<i64>,
    pub department: Option<String>,
    pub role: Option<EmployeeRole>,
    pub active: Option<bool>,
}
