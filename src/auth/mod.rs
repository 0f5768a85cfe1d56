pub mod context;
pub mod rbac;
