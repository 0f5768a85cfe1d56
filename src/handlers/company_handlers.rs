use axum::{
    extract::{Extension, Path, State},
    response::Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    auth::{context::UserContext, rbac::Permission},
    error::ApiError,
    models::{Company, CompanyCascadeOutcome, CompanyCreate, CompanyUpdate},
    utils::validation::reject_restricted_fields,
    AppState,
};

/// Derived count fields are typed as raw JSON values so a client supplying
/// them gets the named rejection instead of a bare deserialization failure.
#[derive(Debug, Deserialize)]
pub struct CreateCompanyRequest {
    pub company_name: String,
    pub number_of_departments: Option<serde_json::Value>,
    pub number_of_employees: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateCompanyRequest {
    pub company_name: Option<String>,
    pub number_of_departments: Option<serde_json::Value>,
    pub number_of_employees: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
pub struct CompanyListResponse {
    pub companies: Vec<Company>,
}

/// GET /api/companies - List all companies
pub async fn list_companies(
    State(app_state): State<AppState>,
    Extension(user): Extension<UserContext>,
) -> Result<Json<CompanyListResponse>, ApiError> {
    user.require_permission(Permission::ViewCompanies)?;

    let companies = app_state.company_repository.list_all().await?;

    Ok(Json(CompanyListResponse { companies }))
}

/// GET /api/companies/:id - Get a single company
pub async fn get_company(
    State(app_state): State<AppState>,
    Extension(user): Extension<UserContext>,
    Path(id): Path<Uuid>,
) -> Result<Json<Company>, ApiError> {
    user.require_permission(Permission::ViewCompanies)?;

    let company = app_state
        .company_repository
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Company {} not found", id)))?;

    Ok(Json(company))
}

/// POST /api/companies - Create a new company
pub async fn create_company(
    State(app_state): State<AppState>,
    Extension(user): Extension<UserContext>,
    Json(payload): Json<CreateCompanyRequest>,
) -> Result<Json<Company>, ApiError> {
    user.require_permission(Permission::ManageCompanies)?;

    reject_restricted_fields(&[
        ("number_of_departments", payload.number_of_departments.is_some()),
        ("number_of_employees", payload.number_of_employees.is_some()),
    ])?;

    if payload.company_name.trim().is_empty() {
        return Err(ApiError::Validation(
            "Company name cannot be empty".to_string(),
        ));
    }

    let company = app_state
        .company_repository
        .create(&CompanyCreate {
            company_name: payload.company_name,
        })
        .await?;

    Ok(Json(company))
}

/// PATCH /api/companies/:id - Update a company name
pub async fn update_company(
    State(app_state): State<AppState>,
    Extension(user): Extension<UserContext>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateCompanyRequest>,
) -> Result<Json<Company>, ApiError> {
    user.require_permission(Permission::ManageCompanies)?;

    reject_restricted_fields(&[
        ("number_of_departments", payload.number_of_departments.is_some()),
        ("number_of_employees", payload.number_of_employees.is_some()),
    ])?;

    if let Some(name) = &payload.company_name {
        if name.trim().is_empty() {
            return Err(ApiError::Validation(
                "Company name cannot be empty".to_string(),
            ));
        }
    }

    let update = CompanyUpdate {
        company_name: payload.company_name,
    };
    let company = app_state.company_repository.update(id, &update).await?;

    Ok(Json(company))
}

/// DELETE /api/companies/:id - Delete a company and all of its departments
/// and employees
pub async fn delete_company(
    State(app_state): State<AppState>,
    Extension(user): Extension<UserContext>,
    Path(id): Path<Uuid>,
) -> Result<Json<CompanyCascadeOutcome>, ApiError> {
    user.require_permission(Permission::ManageCompanies)?;

    let outcome = app_state.cascade_service.delete_company(id).await?;

    Ok(Json(outcome))
}
