use axum::Router;
use hr_backend::{config, handlers, middleware, AppState};

/// Create a test application instance backed by the PostgreSQL pointed to by
/// DATABASE_URL. Callers are expected to skip when the variable is unset.
pub async fn create_test_app() -> Router {
    let db_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for tests");
    std::env::set_var("CORS_ALLOW_ORIGINS", "*");
    std::env::set_var("LOG_LEVEL", "error");

    let test_config =
        config::Settings::new_with_env_file(false).expect("Failed to create test config");

    let pool = hr_backend::database::create_connection_pool(&db_url)
        .await
        .expect("Failed to create database pool");

    let app_state = AppState::new_with_pool(test_config, pool)
        .await
        .expect("Failed to create test app state");

    create_test_router(app_state)
}

/// Create a test router with all API endpoints. The auth middleware runs in
/// development mode (no API keys configured), so every request carries an
/// admin context.
pub fn create_test_router(app_state: AppState) -> Router {
    use axum::routing::{delete, get, patch, post};

    Router::new()
        // Health check endpoints
        .route("/api/health", get(handlers::health_check))
        .route("/api/health/live", get(handlers::liveness_check))
        .route("/api/health/ready", get(handlers::readiness_check))
        // Company endpoints
        .route("/api/companies", get(handlers::company_handlers::list_companies))
        .route("/api/companies", post(handlers::company_handlers::create_company))
        .route("/api/companies/:id", get(handlers::company_handlers::get_company))
        .route("/api/companies/:id", patch(handlers::company_handlers::update_company))
        .route("/api/companies/:id", delete(handlers::company_handlers::delete_company))
        // Department endpoints
        .route("/api/departments", get(handlers::department_handlers::list_departments))
        .route("/api/departments", post(handlers::department_handlers::create_department))
        .route("/api/departments/:id", get(handlers::department_handlers::get_department))
        .route("/api/departments/:id", patch(handlers::department_handlers::update_department))
        .route("/api/departments/:id", delete(handlers::department_handlers::delete_department))
        // Employee endpoints
        .route("/api/employees", get(handlers::employee_handlers::list_employees))
        .route("/api/employees", post(handlers::employee_handlers::create_employee))
        .route("/api/employees/recalculate-tenure", post(handlers::employee_handlers::recalculate_tenure))
        .route("/api/employees/:id", get(handlers::employee_handlers::get_employee))
        .route("/api/employees/:id", patch(handlers::employee_handlers::update_employee))
        .route("/api/employees/:id", delete(handlers::employee_handlers::delete_employee))
        .route("/api/employees/:id/hire", post(handlers::employee_handlers::hire_employee))
        .route("/api/employees/:id/terminate", post(handlers::employee_handlers::terminate_employee))
        // Dashboard endpoints
        .route("/api/dashboard/stats", get(handlers::dashboard_handlers::get_dashboard_stats))
        .route_layer(axum::middleware::from_fn_with_state(
            app_state.clone(),
            middleware::auth::auth_middleware,
        ))
        .with_state(app_state)
}

/// Helper to extract response body as bytes
#[allow(dead_code)]
pub async fn extract_body(response: axum::response::Response) -> Vec<u8> {
    use axum::body::to_bytes;
    let body = to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
    body.to_vec()
}
