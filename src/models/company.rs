use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A company record. `number_of_departments` and `number_of_employees` are
/// derived counts maintained by the counter service; clients cannot set them.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Company {
    pub id: Uuid,
    pub company_name: String,
    pub number_of_departments: i32,
    pub number_of_employees: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyCreate {
    pub company_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyUpdate {
    pub company_name: Option<String>,
}

/// Outcome of a cascading company delete: how many dependents went with it.
#[derive(Debug, Clone, Serialize)]
pub struct CompanyCascadeOutcome {
    pub company_id: Uuid,
    pub departments_deleted: u64,
    pub employees_deleted: u64,
}
