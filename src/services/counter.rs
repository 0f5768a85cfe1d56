use std::sync::Arc;

use uuid::Uuid;

use crate::{
    error::ApiError,
    repositories::{CompanyRepository, DepartmentRepository, EmployeeRepository},
};

/// Maintains the derived count fields after employee and department writes.
///
/// Recomputation is always a fresh count query followed by a write-back of
/// the exact value, never an increment, so a stale counter heals on the next
/// triggering write. The count and the write-back are not atomic with the
/// triggering child mutation; a crash between the two leaves the counter
/// stale until the next write against the same parent.
pub struct CounterService {
    company_repo: Arc<dyn CompanyRepository + Send + Sync>,
    department_repo: Arc<dyn DepartmentRepository + Send + Sync>,
    employee_repo: Arc<dyn EmployeeRepository + Send + Sync>,
}

impl CounterService {
    pub fn new(
        company_repo: Arc<dyn CompanyRepository + Send + Sync>,
        department_repo: Arc<dyn DepartmentRepository + Send + Sync>,
        employee_repo: Arc<dyn EmployeeRepository + Send + Sync>,
    ) -> Self {
        Self {
            company_repo,
            department_repo,
            employee_repo,
        }
    }

    /// Recompute `number_of_departments` on the given company.
    pub async fn refresh_department_count(&self, company: Uuid) -> Result<i64, ApiError> {
        let count = self.department_repo.count_by_company(company).await?;
        self.company_repo
            .set_department_count(company, count)
            .await?;

        tracing::debug!(
            company = %company,
            count = count,
            "refreshed company department count"
        );

        Ok(count)
    }

    /// Recompute `number_of_employees` on both parents of an employee record:
    /// its department and its company.
    pub async fn refresh_employee_counts(
        &self,
        department: Uuid,
        company: Uuid,
    ) -> Result<(), ApiError> {
        let department_count = self.employee_repo.count_by_department(department).await?;
        self.department_repo
            .set_employee_count(department, department_count)
            .await?;

        let company_count = self.employee_repo.count_by_company(company).await?;
        self.company_repo
            .set_employee_count(company, company_count)
            .await?;

        tracing::debug!(
            department = %department,
            company = %company,
            department_count = department_count,
            company_count = company_count,
            "refreshed employee counts"
        );

        Ok(())
    }

    /// Recompute `number_of_employees` on a company alone. Used after a
    /// department cascade delete, where the department itself is gone.
    pub async fn refresh_company_employee_count(&self, company: Uuid) -> Result<i64, ApiError> {
        let count = self.employee_repo.count_by_company(company).await?;
        self.company_repo.set_employee_count(company, count).await?;
        Ok(count)
    }
}
