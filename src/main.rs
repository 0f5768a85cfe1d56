use axum::{
    routing::{delete, get, patch, post},
    Router,
};
use std::net::SocketAddr;
use tokio::signal;

use hr_backend::{config, handlers, middleware, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration first
    let config = config::Settings::new()?;

    // Initialize structured logging with configuration
    middleware::init_logging(&config.log_level, &config.log_format)?;

    tracing::info!("Starting HR Backend v{}", env!("CARGO_PKG_VERSION"));

    let app_state = AppState::new(config.clone()).await?;

    // In-process stand-in for the external scheduler: recalculate tenure on a
    // fixed interval. Zero disables it; the batch endpoint stays available.
    if config.tenure_recalc_interval_hours > 0 {
        let tenure_service = app_state.tenure_service.clone();
        let interval_hours = config.tenure_recalc_interval_hours;
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(std::time::Duration::from_secs(
                interval_hours * 60 * 60,
            ));
            loop {
                ticker.tick().await;
                let today = chrono::Utc::now().date_naive();
                match tenure_service.recalculate_all(today).await {
                    Ok(result) => {
                        tracing::info!(
                            success_count = result.success_count,
                            error_count = result.error_count,
                            "scheduled tenure recalculation finished"
                        );
                    }
                    Err(e) => {
                        tracing::error!("scheduled tenure recalculation failed: {}", e);
                    }
                }
            }
        });
    }

    let cors_layer = middleware::create_cors_layer(config.cors_allow_origins.clone());

    // Public routes (health probes only)
    let public_routes = Router::new()
        .route("/api/health", get(handlers::health_check))
        .route("/api/health/live", get(handlers::liveness_check))
        .route("/api/health/ready", get(handlers::readiness_check));

    // Protected routes (require API key)
    let protected_routes = Router::new()
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
        // Add auth middleware
        .route_layer(axum::middleware::from_fn_with_state(
            app_state.clone(),
            middleware::auth::auth_middleware,
        ));

    let app = Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .with_state(app_state)
        .layer(axum::middleware::from_fn(
            middleware::security_headers_middleware,
        ))
        .layer(axum::middleware::from_fn(
            middleware::request_logging_middleware,
        ))
        .layer(middleware::create_logging_layer())
        .layer(cors_layer);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    tracing::info!("Server starting on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Handle graceful shutdown signals
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting graceful shutdown");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        },
    }
}
