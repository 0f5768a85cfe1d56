use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    error::ApiError,
    models::{Department, DepartmentCascadeOutcome, DepartmentCreate, DepartmentUpdate},
};

#[async_trait]
pub trait DepartmentRepository: Send + Sync {
    async fn create(&self, department: &DepartmentCreate) -> Result<Department, ApiError>;
    async fn get_by_id(&self, id: Uuid) -> Result<Option<Department>, ApiError>;
    async fn list_all(&self) -> Result<Vec<Department>, ApiError>;
    async fn update(&self, id: Uuid, update: &DepartmentUpdate) -> Result<Department, ApiError>;

    /// Delete the department and every employee referencing it in one
    /// transaction, so a failed child delete rolls the whole thing back.
    async fn delete_cascade(&self, id: Uuid) -> Result<DepartmentCascadeOutcome, ApiError>;

    async fn count_by_company(&self, company: Uuid) -> Result<i64, ApiError>;
    async fn count_all(&self) -> Result<i64, ApiError>;

    /// Direct write of the derived employee count, bypassing client-facing
    /// validation. Used only by counter maintenance.
    async fn set_employee_count(&self, id: Uuid, count: i64) -> Result<(), ApiError>;
}

pub struct SqlxDepartmentRepository {
    pool: PgPool,
}

impl SqlxDepartmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const DEPARTMENT_COLUMNS: &str =
    "id, department_name, company, number_of_employees, created_at, updated_at";

#[async_trait]
impl DepartmentRepository for SqlxDepartmentRepository {
    async fn create(&self, department: &DepartmentCreate) -> Result<Department, ApiError> {
        let id = Uuid::new_v4();

        let row = sqlx::query_as::<_, Department>(
            r#"
            INSERT INTO departments (id, department_name, company, created_at, updated_at)
            VALUES ($1, $2, $3, NOW(), NOW())
            RETURNING id, department_name, company, number_of_employees, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&department.department_name)
        .bind(department.company)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e {
                if db_err.constraint() == Some("departments_company_fkey") {
                    return ApiError::Validation(format!(
                        "Company {} does not exist",
                        department.company
                    ));
                }
            }
            ApiError::from(e)
        })?;

        Ok(row)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Department>, ApiError> {
        let row = sqlx::query_as::<_, Department>(&format!(
            "SELECT {DEPARTMENT_COLUMNS} FROM departments WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn list_all(&self) -> Result<Vec<Department>, ApiError> {
        let rows = sqlx::query_as::<_, Department>(&format!(
            "SELECT {DEPARTMENT_COLUMNS} FROM departments ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn update(&self, id: Uuid, update: &DepartmentUpdate) -> Result<Department, ApiError> {
        let row = sqlx::query_as::<_, Department>(
            r#"
            UPDATE departments
            SET department_name = COALESCE($2, department_name),
                company = COALESCE($3, company),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, department_name, company, number_of_employees, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&update.department_name)
        .bind(update.company)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e {
                if db_err.constraint() == Some("departments_company_fkey") {
                    return ApiError::Validation(format!(
                        "Company {:?} does not exist",
                        update.company
                    ));
                }
            }
            ApiError::from(e)
        })?;

        row.ok_or_else(|| ApiError::NotFound(format!("Department {} not found", id)))
    }

    async fn delete_cascade(&self, id: Uuid) -> Result<DepartmentCascadeOutcome, ApiError> {
        let mut tx = self.pool.begin().await?;

        let company = sqlx::query_scalar::<_, Uuid>("SELECT company FROM departments WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("Department {} not found", id)))?;

        let employees_deleted = sqlx::query("DELETE FROM employees WHERE department = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        sqlx::query("DELETE FROM departments WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(DepartmentCascadeOutcome {
            department_id: id,
            company,
            employees_deleted,
        })
    }

    async fn count_by_company(&self, company: Uuid) -> Result<i64, ApiError> {
        let count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM departments WHERE company = $1")
                .bind(company)
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }

    async fn count_all(&self) -> Result<i64, ApiError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM departments")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn set_employee_count(&self, id: Uuid, count: i64) -> Result<(), ApiError> {
        let result = sqlx::query("UPDATE departments SET number_of_employees = $2 WHERE id = $1")
            .bind(id)
            .bind(count as i32)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(ApiError::NotFound(format!("Department {} not found", id)));
        }

        Ok(())
    }
}
