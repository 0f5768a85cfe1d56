use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Employment status. The transition to `Hired` is system-controlled: it is
/// performed through the hire operation, never set directly by clients.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum EmployeeStatus {
    Pending,
    Hired,
    Terminated,
}

impl EmployeeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmployeeStatus::Pending => "pending",
            EmployeeStatus::Hired => "hired",
            EmployeeStatus::Terminated => "terminated",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pending" => Some(EmployeeStatus::Pending),
            "hired" => Some(EmployeeStatus::Hired),
            "terminated" => Some(EmployeeStatus::Terminated),
            _ => None,
        }
    }
}

impl std::fmt::Display for EmployeeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An employee record. `status`, `hired_on` and `days_employed` are
/// system-managed; `days_employed` is only defined while status is Hired.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    pub id: Uuid,
    pub employee_name: String,
    pub email_address: String,
    pub mobile_number: String,
    pub address: String,
    pub designation: String,
    pub department: Uuid,
    pub company: Uuid,
    pub status: EmployeeStatus,
    pub hired_on: Option<NaiveDate>,
    pub days_employed: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeCreate {
    pub employee_name: String,
    pub email_address: String,
    pub mobile_number: String,
    pub address: String,
    pub designation: String,
    pub department: Uuid,
    pub company: Uuid,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmployeeUpdate {
    pub employee_name: Option<String>,
    pub email_address: Option<String>,
    pub mobile_number: Option<String>,
    pub address: Option<String>,
    pub designation: Option<String>,
    pub department: Option<Uuid>,
    pub company: Option<Uuid>,
}

impl EmployeeUpdate {
    /// True when the update moves the employee between departments or
    /// companies, which requires refreshing counts on both old and new
    /// parents.
    pub fn changes_membership(&self) -> bool {
        self.department.is_some() || self.company.is_some()
    }
}
