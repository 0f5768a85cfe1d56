use std::sync::Arc;

use crate::{
    config::Settings,
    database::DatabasePool,
    repositories::{
        company_repo::SqlxCompanyRepository, department_repo::SqlxDepartmentRepository,
        employee_repo::SqlxEmployeeRepository, CompanyRepository, DepartmentRepository,
        EmployeeRepository,
    },
    services::{
        CascadeService, CounterService, DashboardService, DepartmentService, EmployeeService,
        TenureService,
    },
};

pub mod auth;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod services;
pub mod utils;

/// Shared application state containing all dependencies
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Settings>,
    pub db_pool: DatabasePool,
    pub company_repository: Arc<dyn CompanyRepository + Send + Sync>,
    pub department_repository: Arc<dyn DepartmentRepository + Send + Sync>,
    pub employee_repository: Arc<dyn EmployeeRepository + Send + Sync>,
    pub counter_service: Arc<CounterService>,
    pub cascade_service: Arc<CascadeService>,
    pub department_service: Arc<DepartmentService>,
    pub employee_service: Arc<EmployeeService>,
    pub tenure_service: Arc<TenureService>,
    pub dashboard_service: Arc<DashboardService>,
}

impl AppState {
    /// Create new application state with dependency injection
    pub async fn new(config: Settings) -> Result<Self, crate::error::ApiError> {
        let db_pool = crate::database::create_connection_pool(&config.database_url).await?;
        Self::new_with_pool(config, db_pool).await
    }

    /// Create new application state with existing database pool
    pub async fn new_with_pool(
        config: Settings,
        db_pool: DatabasePool,
    ) -> Result<Self, crate::error::ApiError> {
        let config = Arc::new(config);

        let company_repository: Arc<dyn CompanyRepository + Send + Sync> =
            Arc::new(SqlxCompanyRepository::new(db_pool.clone()));
        let department_repository: Arc<dyn DepartmentRepository + Send + Sync> =
            Arc::new(SqlxDepartmentRepository::new(db_pool.clone()));
        let employee_repository: Arc<dyn EmployeeRepository + Send + Sync> =
            Arc::new(SqlxEmployeeRepository::new(db_pool.clone()));

        let counter_service = Arc::new(CounterService::new(
            company_repository.clone(),
            department_repository.clone(),
            employee_repository.clone(),
        ));

        let cascade_service = Arc::new(CascadeService::new(
            company_repository.clone(),
            department_repository.clone(),
            counter_service.clone(),
        ));

        let department_service = Arc::new(DepartmentService::new(
            department_repository.clone(),
            employee_repository.clone(),
            counter_service.clone(),
            cascade_service.clone(),
        ));

        let employee_service = Arc::new(EmployeeService::new(
            employee_repository.clone(),
            department_repository.clone(),
            counter_service.clone(),
        ));

        let tenure_service = Arc::new(TenureService::new(employee_repository.clone()));

        let dashboard_service = Arc::new(DashboardService::new(
            company_repository.clone(),
            department_repository.clone(),
            employee_repository.clone(),
        ));

        Ok(Self {
            config,
            db_pool,
            company_repository,
            department_repository,
            employee_repository,
            counter_service,
            cascade_service,
            department_service,
            employee_service,
            tenure_service,
            dashboard_service,
        })
    }
}
