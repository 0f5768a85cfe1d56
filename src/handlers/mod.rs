pub mod company_handlers;
pub mod dashboard_handlers;
pub mod department_handlers;
pub mod employee_handlers;
pub mod health_handlers;

pub use health_handlers::{health_check, liveness_check, readiness_check};
