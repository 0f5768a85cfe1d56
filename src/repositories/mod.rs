pub mod company_repo;
pub mod department_repo;
pub mod employee_repo;

pub use company_repo::CompanyRepository;
pub use department_repo::DepartmentRepository;
pub use employee_repo::EmployeeRepository;
