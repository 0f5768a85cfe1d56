use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use crate::{
    error::ApiError,
    models::{Employee, EmployeeCreate, EmployeeStatus, EmployeeUpdate},
    repositories::{DepartmentRepository, EmployeeRepository},
    services::{counter::CounterService, tenure},
};

/// Write-path orchestrator for employees.
///
/// Order per operation: consistency validation, then persistence, then
/// counter maintenance. Validation runs before any persistence side effect;
/// a counter failure aborts the request with an error rather than being
/// swallowed.
pub struct EmployeeService {
    employee_repo: Arc<dyn EmployeeRepository + Send + Sync>,
    department_repo: Arc<dyn DepartmentRepository + Send + Sync>,
    counter: Arc<CounterService>,
}

impl EmployeeService {
    pub fn new(
        employee_repo: Arc<dyn EmployeeRepository + Send + Sync>,
        department_repo: Arc<dyn DepartmentRepository + Send + Sync>,
        counter: Arc<CounterService>,
    ) -> Self {
        Self {
            employee_repo,
            department_repo,
            counter,
        }
    }

    /// Department and company on an employee must agree: the department's
    /// parent company is the employee's company.
    async fn validate_consistency(&self, department: Uuid, company: Uuid) -> Result<(), ApiError> {
        let dept = self
            .department_repo
            .get_by_id(department)
            .await?
            .ok_or_else(|| ApiError::Validation(format!("Department {} does not exist", department)))?;

        if dept.company != company {
            return Err(ApiError::Validation(format!(
                "Department {} belongs to company {}, not {}",
                department, dept.company, company
            )));
        }

        Ok(())
    }

    pub async fn create(&self, request: EmployeeCreate) -> Result<Employee, ApiError> {
        self.validate_consistency(request.department, request.company)
            .await?;

        let employee = self.employee_repo.create(&request).await?;

        self.counter
            .refresh_employee_counts(employee.department, employee.company)
            .await?;

        tracing::info!(employee = %employee.id, "employee created");

        Ok(employee)
    }

    pub async fn update(&self, id: Uuid, update: EmployeeUpdate) -> Result<Employee, ApiError> {
        let previous = self
            .employee_repo
            .get_by_id(id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("Employee {} not found", id)))?;

        // Validate against the values the record will hold after the update.
        let department = update.department.unwrap_or(previous.department);
        let company = update.company.unwrap_or(previous.company);
        self.validate_consistency(department, company).await?;

        let mut updated = self.employee_repo.update(id, &update).await?;

        // Tenure tracks calendar time; bring it current on any write to a
        // hired employee.
        if updated.status == EmployeeStatus::Hired {
            if let Some(hired_on) = updated.hired_on {
                let days = tenure::days_employed_on(hired_on, Utc::now().date_naive())?;
                self.employee_repo.set_days_employed(id, days).await?;
                updated.days_employed = Some(days);
            }
        }

        self.counter
            .refresh_employee_counts(updated.department, updated.company)
            .await?;

        // A membership change leaves the old parents stale; refresh them too.
        if previous.department != updated.department || previous.company != updated.company {
            self.counter
                .refresh_employee_counts(previous.department, previous.company)
                .await?;
        }

        Ok(updated)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), ApiError> {
        let previous = self
            .employee_repo
            .get_by_id(id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("Employee {} not found", id)))?;

        self.employee_repo.delete(id).await?;

        self.counter
            .refresh_employee_counts(previous.department, previous.company)
            .await?;

        tracing::info!(employee = %id, "employee deleted");

        Ok(())
    }

    /// System transition to Hired. `hired_on` defaults to today; a future
    /// date is rejected before anything is written.
    pub async fn hire(&self, id: Uuid, hired_on: Option<NaiveDate>) -> Result<Employee, ApiError> {
        let employee = self
            .employee_repo
            .get_by_id(id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("Employee {} not found", id)))?;

        if employee.status == EmployeeStatus::Hired {
            return Err(ApiError::Validation(format!(
                "Employee {} is already hired",
                id
            )));
        }

        let today = Utc::now().date_naive();
        let hired_on = hired_on.unwrap_or(today);
        let days_employed = tenure::days_employed_on(hired_on, today)?;

        let hired = self
            .employee_repo
            .mark_hired(id, hired_on, days_employed)
            .await?;

        tracing::info!(employee = %id, hired_on = %hired_on, "employee hired");

        Ok(hired)
    }

    /// System transition to Terminated. Tenure is only defined while Hired,
    /// so it is cleared.
    pub async fn terminate(&self, id: Uuid) -> Result<Employee, ApiError> {
        let employee = self
            .employee_repo
            .get_by_id(id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("Employee {} not found", id)))?;

        if employee.status != EmployeeStatus::Hired {
            return Err(ApiError::Validation(format!(
                "Employee {} is not hired and cannot be terminated",
                id
            )));
        }

        let terminated = self.employee_repo.mark_terminated(id).await?;

        tracing::info!(employee = %id, "employee terminated");

        Ok(terminated)
    }
}
