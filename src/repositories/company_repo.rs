use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    error::ApiError,
    models::{Company, CompanyCascadeOutcome, CompanyCreate, CompanyUpdate},
};

#[async_trait]
pub trait CompanyRepository: Send + Sync {
    async fn create(&self, company: &CompanyCreate) -> Result<Company, ApiError>;
    async fn get_by_id(&self, id: Uuid) -> Result<Option<Company>, ApiError>;
    async fn list_all(&self) -> Result<Vec<Company>, ApiError>;
    async fn update(&self, id: Uuid, update: &CompanyUpdate) -> Result<Company, ApiError>;

    /// Delete the company together with every employee and department that
    /// references it, in one transaction. Employees go first: departments
    /// would otherwise each re-cascade onto the same employees.
    async fn delete_cascade(&self, id: Uuid) -> Result<CompanyCascadeOutcome, ApiError>;

    /// Direct write of the derived department count, bypassing client-facing
    /// validation. Used only by counter maintenance.
    async fn set_department_count(&self, id: Uuid, count: i64) -> Result<(), ApiError>;

    /// Direct write of the derived employee count, bypassing client-facing
    /// validation. Used only by counter maintenance.
    async fn set_employee_count(&self, id: Uuid, count: i64) -> Result<(), ApiError>;
}

pub struct SqlxCompanyRepository {
    pool: PgPool,
}

impl SqlxCompanyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const COMPANY_COLUMNS: &str =
    "id, company_name, number_of_departments, number_of_employees, created_at, updated_at";

#[async_trait]
impl CompanyRepository for SqlxCompanyRepository {
    async fn create(&self, company: &CompanyCreate) -> Result<Company, ApiError> {
        let id = Uuid::new_v4();

        let row = sqlx::query_as::<_, Company>(
            r#"
            INSERT INTO companies (id, company_name, created_at, updated_at)
            VALUES ($1, $2, NOW(), NOW())
            RETURNING id, company_name, number_of_departments, number_of_employees, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&company.company_name)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Company>, ApiError> {
        let row = sqlx::query_as::<_, Company>(&format!(
            "SELECT {COMPANY_COLUMNS} FROM companies WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn list_all(&self) -> Result<Vec<Company>, ApiError> {
        let rows = sqlx::query_as::<_, Company>(&format!(
            "SELECT {COMPANY_COLUMNS} FROM companies ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn update(&self, id: Uuid, update: &CompanyUpdate) -> Result<Company, ApiError> {
        let row = sqlx::query_as::<_, Company>(
            r#"
            UPDATE companies
            SET company_name = COALESCE($2, company_name),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, company_name, number_of_departments, number_of_employees, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&update.company_name)
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or_else(|| ApiError::NotFound(format!("Company {} not found", id)))
    }

    async fn delete_cascade(&self, id: Uuid) -> Result<CompanyCascadeOutcome, ApiError> {
        let mut tx = self.pool.begin().await?;

        let exists = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM companies WHERE id = $1")
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;
        if exists == 0 {
            return Err(ApiError::NotFound(format!("Company {} not found", id)));
        }

        let employees_deleted = sqlx::query("DELETE FROM employees WHERE company = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let departments_deleted = sqlx::query("DELETE FROM departments WHERE company = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        sqlx::query("DELETE FROM companies WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(CompanyCascadeOutcome {
            company_id: id,
            departments_deleted,
            employees_deleted,
        })
    }

    async fn set_department_count(&self, id: Uuid, count: i64) -> Result<(), ApiError> {
        let result = sqlx::query("UPDATE companies SET number_of_departments = $2 WHERE id = $1")
            .bind(id)
            .bind(count as i32)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(ApiError::NotFound(format!("Company {} not found", id)));
        }

        Ok(())
    }

    async fn set_employee_count(&self, id: Uuid, count: i64) -> Result<(), ApiError> {
        let result = sqlx::query("UPDATE companies SET number_of_employees = $2 WHERE id = $1")
            .bind(id)
            .bind(count as i32)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(ApiError::NotFound(format!("Company {} not found", id)));
        }

        Ok(())
    }
}
