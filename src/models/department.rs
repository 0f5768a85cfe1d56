use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A department belongs to exactly one company. `number_of_employees` is a
/// derived count maintained by the counter service.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Department {
    pub id: Uuid,
    pub department_name: String,
    pub company: Uuid,
    pub number_of_employees: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepartmentCreate {
    pub department_name: String,
    pub company: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepartmentUpdate {
    pub department_name: Option<String>,
    pub company: Option<Uuid>,
}

/// Outcome of a cascading department delete. The former parent company is
/// carried so counter maintenance can be re-triggered after the delete.
#[derive(Debug, Clone, Serialize)]
pub struct DepartmentCascadeOutcome {
    pub department_id: Uuid,
    pub company: Uuid,
    pub employees_deleted: u64,
}
