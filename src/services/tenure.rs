use std::sync::Arc;

use chrono::NaiveDate;

use crate::{error::ApiError, repositories::EmployeeRepository};

/// Whole days between hire date and the given current date. A hire date in
/// the future is a validation error, never a negative tenure.
pub fn days_employed_on(hired_on: NaiveDate, today: NaiveDate) -> Result<i32, ApiError> {
    if hired_on > today {
        return Err(ApiError::validation("hire date cannot be in the future"));
    }

    Ok((today - hired_on).num_days() as i32)
}

/// Result of a bulk tenure recalculation
#[derive(Debug, Clone, serde::Serialize)]
pub struct TenureRecalculationResult {
    pub success_count: i32,
    pub error_count: i32,
    pub errors: Vec<String>,
}

/// Recomputes `days_employed` for hired employees.
///
/// The periodic job keeps tenure correct as calendar time advances even when
/// no one writes to the record. Each per-employee update is independent: one
/// failure does not stop the pass.
pub struct TenureService {
    employee_repo: Arc<dyn EmployeeRepository + Send + Sync>,
}

impl TenureService {
    pub fn new(employee_repo: Arc<dyn EmployeeRepository + Send + Sync>) -> Self {
        Self { employee_repo }
    }

    /// Recompute tenure for every Hired employee with a hire date, as of
    /// `today`. Running this twice on the same date is a no-op after the
    /// first run.
    pub async fn recalculate_all(&self, today: NaiveDate) -> Result<TenureRecalculationResult, ApiError> {
        let employees = self.employee_repo.list_hired().await?;

        let mut success_count = 0;
        let mut error_count = 0;
        let mut errors: Vec<String> = Vec::new();

        for employee in employees {
            // list_hired only returns rows with a hire date
            let Some(hired_on) = employee.hired_on else {
                continue;
            };

            let result = match days_employed_on(hired_on, today) {
                Ok(days) => self.employee_repo.set_days_employed(employee.id, days).await,
                Err(e) => Err(e),
            };

            match result {
                Ok(()) => success_count += 1,
                Err(e) => {
                    error_count += 1;
                    if errors.len() < 10 {
                        errors.push(format!("{}: {}", employee.employee_name, e));
                    }
                }
            }
        }

        tracing::info!(
            success_count = success_count,
            error_count = error_count,
            "tenure recalculation completed"
        );

        Ok(TenureRecalculationResult {
            success_count,
            error_count,
            errors,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::InMemoryStore;
    use chrono::Duration;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn counts_whole_days_since_hire() {
        assert_eq!(
            days_employed_on(date(2026, 8, 1), date(2026, 8, 11)).unwrap(),
            10
        );
        assert_eq!(
            days_employed_on(date(2026, 8, 11), date(2026, 8, 11)).unwrap(),
            0
        );
    }

    #[test]
    fn future_hire_date_is_rejected() {
        let err = days_employed_on(date(2026, 8, 12), date(2026, 8, 11)).unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[tokio::test]
    async fn batch_updates_every_hired_employee() {
        let store = Arc::new(InMemoryStore::new());
        let company = store.seed_company("Acme");
        let dept = store.seed_department("Eng", company.id);

        let today = date(2026, 8, 23);
        let alice =
            store.seed_hired_employee("Alice", dept.id, company.id, today - Duration::days(10));
        let bob = store.seed_hired_employee("Bob", dept.id, company.id, today - Duration::days(3));
        // Pending employee is out of scope for the batch.
        let carol = store.seed_employee("Carol", dept.id, company.id);

        let tenure = TenureService::new(store.clone());
        let result = tenure.recalculate_all(today).await.unwrap();

        assert_eq!(result.success_count, 2);
        assert_eq!(result.error_count, 0);
        assert_eq!(store.employee(alice.id).unwrap().days_employed, Some(10));
        assert_eq!(store.employee(bob.id).unwrap().days_employed, Some(3));
        assert_eq!(store.employee(carol.id).unwrap().days_employed, None);
    }

    #[tokio::test]
    async fn batch_is_idempotent_within_a_day() {
        let store = Arc::new(InMemoryStore::new());
        let company = store.seed_company("Acme");
        let dept = store.seed_department("Eng", company.id);

        let today = date(2026, 8, 23);
        let alice =
            store.seed_hired_employee("Alice", dept.id, company.id, today - Duration::days(7));

        let tenure = TenureService::new(store.clone());
        tenure.recalculate_all(today).await.unwrap();
        let first = store.employee(alice.id).unwrap().days_employed;

        tenure.recalculate_all(today).await.unwrap();
        let second = store.employee(alice.id).unwrap().days_employed;

        assert_eq!(first, Some(7));
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn bad_record_does_not_stop_the_pass() {
        let store = Arc::new(InMemoryStore::new());
        let company = store.seed_company("Acme");
        let dept = store.seed_department("Eng", company.id);

        let today = date(2026, 8, 23);
        // Future hire date should never exist, but the batch must survive one.
        store.seed_hired_employee("Eve", dept.id, company.id, today + Duration::days(2));
        let alice =
            store.seed_hired_employee("Alice", dept.id, company.id, today - Duration::days(1));

        let tenure = TenureService::new(store.clone());
        let result = tenure.recalculate_all(today).await.unwrap();

        assert_eq!(result.success_count, 1);
        assert_eq!(result.error_count, 1);
        assert_eq!(result.errors.len(), 1);
        assert_eq!(store.employee(alice.id).unwrap().days_employed, Some(1));
    }
}
