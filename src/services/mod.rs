pub mod cascade;
pub mod counter;
pub mod dashboard;
pub mod department_service;
pub mod employee_service;
pub mod tenure;

#[cfg(test)]
pub mod test_support;

pub use cascade::CascadeService;
pub use counter::CounterService;
pub use dashboard::{DashboardService, DashboardStats};
pub use department_service::DepartmentService;
pub use employee_service::EmployeeService;
pub use tenure::{TenureRecalculationResult, TenureService};
