use axum::{
    extract::{Extension, Path, State},
    response::Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    auth::{context::UserContext, rbac::Permission},
    error::ApiError,
    models::{Department, DepartmentCascadeOutcome, DepartmentCreate, DepartmentUpdate},
    utils::validation::reject_restricted_fields,
    AppState,
};

#[derive(Debug, Deserialize)]
pub struct CreateDepartmentRequest {
    pub department_name: String,
    pub company: Uuid,
    pub number_of_employees: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateDepartmentRequest {
    pub department_name: Option<String>,
    pub company: Option<Uuid>,
    pub number_of_employees: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
pub struct DepartmentListResponse {
    pub departments: Vec<Department>,
}

/// GET /api/departments - List all departments
pub async fn list_departments(
    State(app_state): State<AppState>,
    Extension(user): Extension<UserContext>,
) -> Result<Json<DepartmentListResponse>, ApiError> {
    user.require_permission(Permission::ViewDepartments)?;

    let departments = app_state.department_repository.list_all().await?;

    Ok(Json(DepartmentListResponse { departments }))
}

/// GET /api/departments/:id - Get a single department
pub async fn get_department(
    State(app_state): State<AppState>,
    Extension(user): Extension<UserContext>,
    Path(id): Path<Uuid>,
) -> Result<Json<Department>, ApiError> {
    user.require_permission(Permission::ViewDepartments)?;

    let department = app_state
        .department_repository
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Department {} not found", id)))?;

    Ok(Json(department))
}

/// POST /api/departments - Create a new department under a company
pub async fn create_department(
    State(app_state): State<AppState>,
    Extension(user): Extension<UserContext>,
    Json(payload): Json<CreateDepartmentRequest>,
) -> Result<Json<Department>, ApiError> {
    user.require_permission(Permission::ManageDepartments)?;

    reject_restricted_fields(&[(
        "number_of_employees",
        payload.number_of_employees.is_some(),
    )])?;

    if payload.department_name.trim().is_empty() {
        return Err(ApiError::Validation(
            "Department name cannot be empty".to_string(),
        ));
    }

    let department = app_state
        .department_service
        .create(DepartmentCreate {
            department_name: payload.department_name,
            company: payload.company,
        })
        .await?;

    Ok(Json(department))
}

/// PATCH /api/departments/:id - Rename a department or move it to another
/// company
pub async fn update_department(
    State(app_state): State<AppState>,
    Extension(user): Extension<UserContext>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateDepartmentRequest>,
) -> Result<Json<Department>, ApiError> {
    user.require_permission(Permission::ManageDepartments)?;

    reject_restricted_fields(&[(
        "number_of_employees",
        payload.number_of_employees.is_some(),
    )])?;

    if let Some(name) = &payload.department_name {
        if name.trim().is_empty() {
            return Err(ApiError::Validation(
                "Department name cannot be empty".to_string(),
            ));
        }
    }

    let department = app_state
        .department_service
        .update(
            id,
            DepartmentUpdate {
                department_name: payload.department_name,
                company: payload.company,
            },
        )
        .await?;

    Ok(Json(department))
}

/// DELETE /api/departments/:id - Delete a department and its employees
pub async fn delete_department(
    State(app_state): State<AppState>,
    Extension(user): Extension<UserContext>,
    Path(id): Path<Uuid>,
) -> Result<Json<DepartmentCascadeOutcome>, ApiError> {
    user.require_permission(Permission::ManageDepartments)?;

    let outcome = app_state.department_service.delete(id).await?;

    Ok(Json(outcome))
}
