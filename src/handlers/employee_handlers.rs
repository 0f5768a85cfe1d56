use axum::{
    extract::{Extension, Path, State},
    response::Json,
};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    auth::{context::UserContext, rbac::Permission},
    error::ApiError,
    models::{Employee, EmployeeCreate, EmployeeUpdate},
    services::TenureRecalculationResult,
    utils::validation::reject_restricted_fields,
    AppState,
};

/// System-managed fields are typed as raw JSON values so a client supplying
/// them gets the named rejection instead of a bare deserialization failure.
#[derive(Debug, Deserialize)]
pub struct CreateEmployeeRequest {
    pub employee_name: String,
    pub email_address: String,
    pub mobile_number: String,
    pub address: String,
    pub designation: String,
    pub department: Uuid,
    pub company: Uuid,
    pub status: Option<serde_json::Value>,
    pub hired_on: Option<serde_json::Value>,
    pub days_employed: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateEmployeeRequest {
    pub employee_name: Option<String>,
    pub email_address: Option<String>,
    pub mobile_number: Option<String>,
    pub address: Option<String>,
    pub designation: Option<String>,
    pub department: Option<Uuid>,
    pub company: Option<Uuid>,
    pub status: Option<serde_json::Value>,
    pub hired_on: Option<serde_json::Value>,
    pub days_employed: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub struct HireEmployeeRequest {
    pub hired_on: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub struct EmployeeListResponse {
    pub employees: Vec<Employee>,
}

fn reject_system_fields(
    status: &Option<serde_json::Value>,
    hired_on: &Option<serde_json::Value>,
    days_employed: &Option<serde_json::Value>,
) -> Result<(), ApiError> {
    reject_restricted_fields(&[
        ("status", status.is_some()),
        ("hired_on", hired_on.is_some()),
        ("days_employed", days_employed.is_some()),
    ])
}

/// GET /api/employees - List all employees
pub async fn list_employees(
    State(app_state): State<AppState>,
    Extension(user): Extension<UserContext>,
) -> Result<Json<EmployeeListResponse>, ApiError> {
    user.require_permission(Permission::ViewEmployees)?;

    let employees = app_state.employee_repository.list_all().await?;

    Ok(Json(EmployeeListResponse { employees }))
}

/// GET /api/employees/:id - Get a single employee
pub async fn get_employee(
    State(app_state): State<AppState>,
    Extension(user): Extension<UserContext>,
    Path(id): Path<Uuid>,
) -> Result<Json<Employee>, ApiError> {
    user.require_permission(Permission::ViewEmployees)?;

    let employee = app_state
        .employee_repository
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Employee {} not found", id)))?;

    Ok(Json(employee))
}

/// POST /api/employees - Create a new employee
pub async fn create_employee(
    State(app_state): State<AppState>,
    Extension(user): Extension<UserContext>,
    Json(payload): Json<CreateEmployeeRequest>,
) -> Result<Json<Employee>, ApiError> {
    user.require_permission(Permission::ManageEmployees)?;

    reject_system_fields(&payload.status, &payload.hired_on, &payload.days_employed)?;

    if payload.employee_name.trim().is_empty() {
        return Err(ApiError::Validation(
            "Employee name cannot be empty".to_string(),
        ));
    }

    let employee = app_state
        .employee_service
        .create(EmployeeCreate {
            employee_name: payload.employee_name,
            email_address: payload.email_address,
            mobile_number: payload.mobile_number,
            address: payload.address,
            designation: payload.designation,
            department: payload.department,
            company: payload.company,
        })
        .await?;

    Ok(Json(employee))
}

/// PATCH /api/employees/:id - Update an employee
pub async fn update_employee(
    State(app_state): State<AppState>,
    Extension(user): Extension<UserContext>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateEmployeeRequest>,
) -> Result<Json<Employee>, ApiError> {
    user.require_permission(Permission::ManageEmployees)?;

    reject_system_fields(&payload.status, &payload.hired_on, &payload.days_employed)?;

    let employee = app_state
        .employee_service
        .update(
            id,
            EmployeeUpdate {
                employee_name: payload.employee_name,
                email_address: payload.email_address,
                mobile_number: payload.mobile_number,
                address: payload.address,
                designation: payload.designation,
                department: payload.department,
                company: payload.company,
            },
        )
        .await?;

    Ok(Json(employee))
}

/// DELETE /api/employees/:id - Delete an employee
pub async fn delete_employee(
    State(app_state): State<AppState>,
    Extension(user): Extension<UserContext>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    user.require_permission(Permission::ManageEmployees)?;

    app_state.employee_service.delete(id).await?;

    Ok(Json(serde_json::json!({
        "message": format!("Employee '{}' deleted successfully", id)
    })))
}

/// POST /api/employees/:id/hire - Transition an employee to Hired
pub async fn hire_employee(
    State(app_state): State<AppState>,
    Extension(user): Extension<UserContext>,
    Path(id): Path<Uuid>,
    Json(payload): Json<HireEmployeeRequest>,
) -> Result<Json<Employee>, ApiError> {
    user.require_permission(Permission::ManageEmployees)?;

    let employee = app_state.employee_service.hire(id, payload.hired_on).await?;

    Ok(Json(employee))
}

/// POST /api/employees/:id/terminate - Transition an employee to Terminated
pub async fn terminate_employee(
    State(app_state): State<AppState>,
    Extension(user): Extension<UserContext>,
    Path(id): Path<Uuid>,
) -> Result<Json<Employee>, ApiError> {
    user.require_permission(Permission::ManageEmployees)?;

    let employee = app_state.employee_service.terminate(id).await?;

    Ok(Json(employee))
}

/// POST /api/employees/recalculate-tenure - Recompute days_employed for all
/// hired employees as of today
pub async fn recalculate_tenure(
    State(app_state): State<AppState>,
    Extension(user): Extension<UserContext>,
) -> Result<Json<TenureRecalculationResult>, ApiError> {
    user.require_permission(Permission::RunTenureRecalc)?;

    let result = app_state
        .tenure_service
        .recalculate_all(Utc::now().date_naive())
        .await?;

    Ok(Json(result))
}
