use std::sync::Arc;

use uuid::Uuid;

use crate::{
    error::ApiError,
    models::{Department, DepartmentCascadeOutcome, DepartmentCreate, DepartmentUpdate},
    repositories::{DepartmentRepository, EmployeeRepository},
    services::{cascade::CascadeService, counter::CounterService},
};

/// Write-path orchestrator for departments: persistence first, then counter
/// maintenance on the parent company.
pub struct DepartmentService {
    department_repo: Arc<dyn DepartmentRepository + Send + Sync>,
    employee_repo: Arc<dyn EmployeeRepository + Send + Sync>,
    counter: Arc<CounterService>,
    cascade: Arc<CascadeService>,
}

impl DepartmentService {
    pub fn new(
        department_repo: Arc<dyn DepartmentRepository + Send + Sync>,
        employee_repo: Arc<dyn EmployeeRepository + Send + Sync>,
        counter: Arc<CounterService>,
        cascade: Arc<CascadeService>,
    ) -> Self {
        Self {
            department_repo,
            employee_repo,
            counter,
            cascade,
        }
    }

    pub async fn create(&self, request: DepartmentCreate) -> Result<Department, ApiError> {
        let department = self.department_repo.create(&request).await?;

        self.counter
            .refresh_department_count(department.company)
            .await?;

        tracing::info!(department = %department.id, company = %department.company, "department created");

        Ok(department)
    }

    pub async fn update(&self, id: Uuid, update: DepartmentUpdate) -> Result<Department, ApiError> {
        let previous = self
            .department_repo
            .get_by_id(id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("Department {} not found", id)))?;

        // Moving a department between companies would silently break the
        // department/company agreement of every employee in it. Employees
        // must be reassigned or removed first.
        if let Some(new_company) = update.company {
            if new_company != previous.company {
                let employee_count = self.employee_repo.count_by_department(id).await?;
                if employee_count > 0 {
                    return Err(ApiError::Validation(format!(
                        "Department {} still has {} employee(s); reassign or remove them before moving it to another company",
                        id, employee_count
                    )));
                }
            }
        }

        let updated = self.department_repo.update(id, &update).await?;

        self.counter
            .refresh_department_count(updated.company)
            .await?;
        if previous.company != updated.company {
            self.counter
                .refresh_department_count(previous.company)
                .await?;
        }

        Ok(updated)
    }

    pub async fn delete(&self, id: Uuid) -> Result<DepartmentCascadeOutcome, ApiError> {
        self.cascade.delete_department(id).await
    }
}
