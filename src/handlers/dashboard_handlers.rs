use axum::{
    extract::{Extension, State},
    response::Json,
};

use crate::{
    auth::{context::UserContext, rbac::Permission},
    error::ApiError,
    services::DashboardStats,
    AppState,
};

/// GET /api/dashboard/stats - Companies, recent hires, and overall counts
pub async fn get_dashboard_stats(
    State(app_state): State<AppState>,
    Extension(user): Extension<UserContext>,
) -> Result<Json<DashboardStats>, ApiError> {
    user.require_permission(Permission::ViewDashboard)?;

    let stats = app_state
        .dashboard_service
        .stats(app_state.config.recent_hires_limit)
        .await?;

    Ok(Json(stats))
}
