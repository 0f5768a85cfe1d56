use std::sync::Arc;

use uuid::Uuid;

use crate::{
    error::ApiError,
    models::{CompanyCascadeOutcome, DepartmentCascadeOutcome},
    repositories::{CompanyRepository, DepartmentRepository},
    services::counter::CounterService,
};

/// Cascading deletes for parent entities.
///
/// The child deletions and the parent delete run in one transaction at the
/// repository layer, so a failed child delete never leaves a half-applied
/// cascade behind.
pub struct CascadeService {
    company_repo: Arc<dyn CompanyRepository + Send + Sync>,
    department_repo: Arc<dyn DepartmentRepository + Send + Sync>,
    counter: Arc<CounterService>,
}

impl CascadeService {
    pub fn new(
        company_repo: Arc<dyn CompanyRepository + Send + Sync>,
        department_repo: Arc<dyn DepartmentRepository + Send + Sync>,
        counter: Arc<CounterService>,
    ) -> Self {
        Self {
            company_repo,
            department_repo,
            counter,
        }
    }

    /// Delete a company, its employees, and its departments. Employees go
    /// first so department deletion never re-cascades onto them.
    pub async fn delete_company(&self, id: Uuid) -> Result<CompanyCascadeOutcome, ApiError> {
        let outcome = self.company_repo.delete_cascade(id).await?;

        tracing::info!(
            company = %id,
            employees_deleted = outcome.employees_deleted,
            departments_deleted = outcome.departments_deleted,
            "company deleted with cascade"
        );

        Ok(outcome)
    }

    /// Delete a department and its employees, then re-trigger counter
    /// maintenance on the former parent company: both its department count
    /// and its employee count changed.
    pub async fn delete_department(&self, id: Uuid) -> Result<DepartmentCascadeOutcome, ApiError> {
        let outcome = self.department_repo.delete_cascade(id).await?;

        self.counter
            .refresh_department_count(outcome.company)
            .await?;
        self.counter
            .refresh_company_employee_count(outcome.company)
            .await?;

        tracing::info!(
            department = %id,
            company = %outcome.company,
            employees_deleted = outcome.employees_deleted,
            "department deleted with cascade"
        );

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::InMemoryStore;
    use std::sync::atomic::Ordering;

    fn services(store: &Arc<InMemoryStore>) -> CascadeService {
        let counter = Arc::new(CounterService::new(
            store.clone(),
            store.clone(),
            store.clone(),
        ));
        CascadeService::new(store.clone(), store.clone(), counter)
    }

    #[tokio::test]
    async fn company_delete_removes_all_dependents() {
        let store = Arc::new(InMemoryStore::new());
        let company = store.seed_company("Acme");
        let eng = store.seed_department("Eng", company.id);
        let sales = store.seed_department("Sales", company.id);
        store.seed_employee("Alice", eng.id, company.id);
        store.seed_employee("Bob", sales.id, company.id);

        let cascade = services(&store);
        let outcome = cascade.delete_company(company.id).await.unwrap();

        assert_eq!(outcome.departments_deleted, 2);
        assert_eq!(outcome.employees_deleted, 2);
        assert!(store.company(company.id).is_none());
        assert_eq!(store.departments_in_company(company.id), 0);
        assert_eq!(store.employees_in_company(company.id), 0);
    }

    #[tokio::test]
    async fn company_delete_leaves_other_companies_alone() {
        let store = Arc::new(InMemoryStore::new());
        let acme = store.seed_company("Acme");
        let globex = store.seed_company("Globex");
        let eng = store.seed_department("Eng", globex.id);
        store.seed_employee("Carol", eng.id, globex.id);

        let cascade = services(&store);
        cascade.delete_company(acme.id).await.unwrap();

        assert!(store.company(globex.id).is_some());
        assert_eq!(store.departments_in_company(globex.id), 1);
        assert_eq!(store.employees_in_company(globex.id), 1);
    }

    #[tokio::test]
    async fn department_delete_cascades_and_refreshes_parent_counts() {
        let store = Arc::new(InMemoryStore::new());
        let company = store.seed_company("Acme");
        let eng = store.seed_department("Eng", company.id);
        store.seed_employee("Alice", eng.id, company.id);

        let counter = Arc::new(CounterService::new(
            store.clone(),
            store.clone(),
            store.clone(),
        ));
        // Bring derived counts in line with seeded data first.
        counter.refresh_department_count(company.id).await.unwrap();
        counter
            .refresh_employee_counts(eng.id, company.id)
            .await
            .unwrap();
        assert_eq!(store.company(company.id).unwrap().number_of_departments, 1);
        assert_eq!(store.company(company.id).unwrap().number_of_employees, 1);

        let cascade = CascadeService::new(store.clone(), store.clone(), counter);
        let outcome = cascade.delete_department(eng.id).await.unwrap();

        assert_eq!(outcome.employees_deleted, 1);
        assert!(store.department(eng.id).is_none());

        let refreshed = store.company(company.id).unwrap();
        assert_eq!(refreshed.number_of_departments, 0);
        assert_eq!(refreshed.number_of_employees, 0);
    }

    #[tokio::test]
    async fn failed_cascade_deletes_nothing() {
        let store = Arc::new(InMemoryStore::new());
        let company = store.seed_company("Acme");
        let eng = store.seed_department("Eng", company.id);
        store.seed_employee("Alice", eng.id, company.id);

        store.fail_cascades.store(true, Ordering::SeqCst);

        let cascade = services(&store);
        assert!(cascade.delete_company(company.id).await.is_err());
        assert!(cascade.delete_department(eng.id).await.is_err());

        // Fail closed: parent and children all still present.
        assert!(store.company(company.id).is_some());
        assert!(store.department(eng.id).is_some());
        assert_eq!(store.employees_in_company(company.id), 1);
    }

    #[tokio::test]
    async fn deleting_missing_company_is_not_found() {
        let store = Arc::new(InMemoryStore::new());
        let cascade = services(&store);

        let err = cascade.delete_company(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }
}
