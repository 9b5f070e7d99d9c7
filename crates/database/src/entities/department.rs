//! Department entity definitions

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Department {
    pub id: i64,
    pub hotel_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub created_at: String,
    /// Active employees assigned to the department.
    pub employee_count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewDepartment {
    pub hotel_id: i64,
    pub name: String,
    pub description: Option<String>,
}
