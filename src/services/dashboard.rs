use std::sync::Arc;

use serde::Serialize;

use crate::{
    error::ApiError,
    models::{Company, Employee},
    repositories::{CompanyRepository, DepartmentRepository, EmployeeRepository},
};

#[derive(Debug, Clone, Serialize)]
pub struct DashboardStats {
    pub companies: Vec<Company>,
    pub recent_employees: Vec<Employee>,
    pub employees_count: i64,
    pub departments_count: i64,
}

/// Aggregated overview for the dashboard: companies, recent hires, and
/// overall headcounts.
pub struct DashboardService {
    company_repo: Arc<dyn CompanyRepository + Send + Sync>,
    department_repo: Arc<dyn DepartmentRepository + Send + Sync>,
    employee_repo: Arc<dyn EmployeeRepository + Send + Sync>,
}

impl DashboardService {
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

    pub async fn stats(&self, recent_hires_limit: i64) -> Result<DashboardStats, ApiError> {
        let companies = self.company_repo.list_all().await?;
        let recent_employees = self.employee_repo.recently_hired(recent_hires_limit).await?;
        let employees_count = self.employee_repo.count_all().await?;
        let departments_count = self.department_repo.count_all().await?;

        Ok(DashboardStats {
            companies,
            recent_employees,
            employees_count,
            departments_count,
        })
    }
}
