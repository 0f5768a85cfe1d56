use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    error::ApiError,
    models::{Employee, EmployeeCreate, EmployeeStatus, EmployeeUpdate},
};

#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    async fn create(&self, employee: &EmployeeCreate) -> Result<Employee, ApiError>;
    async fn get_by_id(&self, id: Uuid) -> Result<Option<Employee>, ApiError>;
    async fn list_all(&self) -> Result<Vec<Employee>, ApiError>;
    async fn update(&self, id: Uuid, update: &EmployeeUpdate) -> Result<Employee, ApiError>;
    async fn delete(&self, id: Uuid) -> Result<(), ApiError>;

    async fn count_by_department(&self, department: Uuid) -> Result<i64, ApiError>;
    async fn count_by_company(&self, company: Uuid) -> Result<i64, ApiError>;
    async fn count_all(&self) -> Result<i64, ApiError>;

    /// All employees currently in Hired status with a hire date, for the
    /// periodic tenure recalculation.
    async fn list_hired(&self) -> Result<Vec<Employee>, ApiError>;

    /// Most recently hired employees, newest hire date first.
    async fn recently_hired(&self, limit: i64) -> Result<Vec<Employee>, ApiError>;

    /// System transition to Hired with a computed tenure. Bypasses
    /// client-facing validation.
    async fn mark_hired(
        &self,
        id: Uuid,
        hired_on: NaiveDate,
        days_employed: i32,
    ) -> Result<Employee, ApiError>;

    /// System transition to Terminated. Clears tenure fields, which are only
    /// defined while the employee is Hired.
    async fn mark_terminated(&self, id: Uuid) -> Result<Employee, ApiError>;

    /// Direct write of the derived tenure value. Does not touch `updated_at`
    /// so the periodic job does not masquerade as a client edit.
    async fn set_days_employed(&self, id: Uuid, days: i32) -> Result<(), ApiError>;
}

pub struct SqlxEmployeeRepository {
    pool: PgPool,
}

impl SqlxEmployeeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const EMPLOYEE_COLUMNS: &str = "id, employee_name, email_address, mobile_number, address, \
     designation, department, company, status, hired_on, days_employed, created_at, updated_at";

// Row type for reading from database
#[derive(sqlx::FromRow)]
struct EmployeeRow {
    id: Uuid,
    employee_name: String,
    email_address: String,
    mobile_number: String,
    address: String,
    designation: String,
    department: Uuid,
    company: Uuid,
    status: String,
    hired_on: Option<NaiveDate>,
    days_employed: Option<i32>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<EmployeeRow> for Employee {
    fn from(row: EmployeeRow) -> Self {
        let status = EmployeeStatus::from_str(&row.status).unwrap_or(EmployeeStatus::Pending);
        Employee {
            id: row.id,
            employee_name: row.employee_name,
            email_address: row.email_address,
            mobile_number: row.mobile_number,
            address: row.address,
            designation: row.designation,
            department: row.department,
            company: row.company,
            status,
            hired_on: row.hired_on,
            days_employed: row.days_employed,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

fn map_fk_violation(e: sqlx::Error) -> ApiError {
    if let sqlx::Error::Database(ref db_err) = e {
        match db_err.constraint() {
            Some("employees_department_fkey") => {
                return ApiError::Validation("Department does not exist".to_string());
            }
            Some("employees_company_fkey") => {
                return ApiError::Validation("Company does not exist".to_string());
            }
            _ => {}
        }
    }
    ApiError::from(e)
}

#[async_trait]
impl EmployeeRepository for SqlxEmployeeRepository {
    async fn create(&self, employee: &EmployeeCreate) -> Result<Employee, ApiError> {
        let id = Uuid::new_v4();

        let row = sqlx::query_as::<_, EmployeeRow>(&format!(
            r#"
            INSERT INTO employees
                (id, employee_name, email_address, mobile_number, address, designation,
                 department, company, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, NOW(), NOW())
            RETURNING {EMPLOYEE_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&employee.employee_name)
        .bind(&employee.email_address)
        .bind(&employee.mobile_number)
        .bind(&employee.address)
        .bind(&employee.designation)
        .bind(employee.department)
        .bind(employee.company)
        .bind(EmployeeStatus::Pending.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(map_fk_violation)?;

        Ok(row.into())
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Employee>, ApiError> {
        let row = sqlx::query_as::<_, EmployeeRow>(&format!(
            "SELECT {EMPLOYEE_COLUMNS} FROM employees WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Employee::from))
    }

    async fn list_all(&self) -> Result<Vec<Employee>, ApiError> {
        let rows = sqlx::query_as::<_, EmployeeRow>(&format!(
            "SELECT {EMPLOYEE_COLUMNS} FROM employees ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Employee::from).collect())
    }

    async fn update(&self, id: Uuid, update: &EmployeeUpdate) -> Result<Employee, ApiError> {
        let row = sqlx::query_as::<_, EmployeeRow>(&format!(
            r#"
            UPDATE employees
            SET employee_name = COALESCE($2, employee_name),
                email_address = COALESCE($3, email_address),
                mobile_number = COALESCE($4, mobile_number),
                address = COALESCE($5, address),
                designation = COALESCE($6, designation),
                department = COALESCE($7, department),
                company = COALESCE($8, company),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {EMPLOYEE_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&update.employee_name)
        .bind(&update.email_address)
        .bind(&update.mobile_number)
        .bind(&update.address)
        .bind(&update.designation)
        .bind(update.department)
        .bind(update.company)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_fk_violation)?;

        row.map(Employee::from)
            .ok_or_else(|| ApiError::NotFound(format!("Employee {} not found", id)))
    }

    async fn delete(&self, id: Uuid) -> Result<(), ApiError> {
        let result = sqlx::query("DELETE FROM employees WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(ApiError::NotFound(format!("Employee {} not found", id)));
        }

        Ok(())
    }

    async fn count_by_department(&self, department: Uuid) -> Result<i64, ApiError> {
        let count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM employees WHERE department = $1")
                .bind(department)
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }

    async fn count_by_company(&self, company: Uuid) -> Result<i64, ApiError> {
        let count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM employees WHERE company = $1")
                .bind(company)
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }

    async fn count_all(&self) -> Result<i64, ApiError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM employees")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn list_hired(&self) -> Result<Vec<Employee>, ApiError> {
        let rows = sqlx::query_as::<_, EmployeeRow>(&format!(
            "SELECT {EMPLOYEE_COLUMNS} FROM employees \
             WHERE status = 'hired' AND hired_on IS NOT NULL"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Employee::from).collect())
    }

    async fn recently_hired(&self, limit: i64) -> Result<Vec<Employee>, ApiError> {
        let rows = sqlx::query_as::<_, EmployeeRow>(&format!(
            "SELECT {EMPLOYEE_COLUMNS} FROM employees \
             WHERE status = 'hired' AND hired_on IS NOT NULL \
             ORDER BY hired_on DESC LIMIT $1"
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Employee::from).collect())
    }

    async fn mark_hired(
        &self,
        id: Uuid,
        hired_on: NaiveDate,
        days_employed: i32,
    ) -> Result<Employee, ApiError> {
        let row = sqlx::query_as::<_, EmployeeRow>(&format!(
            r#"
            UPDATE employees
            SET status = 'hired',
                hired_on = $2,
                days_employed = $3,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {EMPLOYEE_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(hired_on)
        .bind(days_employed)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Employee::from)
            .ok_or_else(|| ApiError::NotFound(format!("Employee {} not found", id)))
    }

    async fn mark_terminated(&self, id: Uuid) -> Result<Employee, ApiError> {
        let row = sqlx::query_as::<_, EmployeeRow>(&format!(
            r#"
            UPDATE employees
            SET status = 'terminated',
                days_employed = NULL,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {EMPLOYEE_COLUMNS}
            "#
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Employee::from)
            .ok_or_else(|| ApiError::NotFound(format!("Employee {} not found", id)))
    }

    async fn set_days_employed(&self, id: Uuid, days: i32) -> Result<(), ApiError> {
        let result = sqlx::query("UPDATE employees SET days_employed = $2 WHERE id = $1")
            .bind(id)
            .bind(days)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(ApiError::NotFound(format!("Employee {} not found", id)));
        }

        Ok(())
    }
}
