use crate::auth::context::UserContext;
use crate::auth::rbac::Role;
use crate::AppState;
use axum::{
    extract::{Request, State},
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};

/// API key authentication middleware.
///
/// Requests present the key in the configured header; valid keys run with
/// the Admin role. When no keys are configured the service is in development
/// mode and every request gets an admin context.
pub async fn auth_middleware(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let settings = &state.config;

    if settings.api_keys.is_empty() {
        request.extensions_mut().insert(UserContext::new_dev());
        return Ok(next.run(request).await);
    }

    let api_key = headers
        .get(settings.api_key_header.as_str())
        .and_then(|value| value.to_str().ok())
        .map(|s| s.to_string());

    if let Some(key) = api_key {
        if settings.api_keys.contains(&key) {
            let context = UserContext::new_api_key(vec![Role::Admin]);
            request.extensions_mut().insert(context);
            return Ok(next.run(request).await);
        }
    }

    tracing::debug!("Authentication failed");
    Err(StatusCode::UNAUTHORIZED)
}
