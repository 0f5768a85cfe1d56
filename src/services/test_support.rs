//! In-memory repository implementations for service tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::{
    Company, CompanyCascadeOutcome, CompanyCreate, CompanyUpdate, Department,
    DepartmentCascadeOutcome, DepartmentCreate, DepartmentUpdate, Employee, EmployeeCreate,
    EmployeeStatus, EmployeeUpdate,
};
use crate::repositories::{CompanyRepository, DepartmentRepository, EmployeeRepository};

#[derive(Default)]
pub struct InMemoryStore {
    companies: Mutex<HashMap<Uuid, Company>>,
    departments: Mutex<HashMap<Uuid, Department>>,
    employees: Mutex<HashMap<Uuid, Employee>>,
    /// When set, cascade deletes fail before touching anything, standing in
    /// for a storage failure mid-transaction.
    pub fail_cascades: AtomicBool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed_company(&self, name: &str) -> Company {
        let now = Utc::now();
        let company = Company {
            id: Uuid::new_v4(),
            company_name: name.to_string(),
            number_of_departments: 0,
            number_of_employees: 0,
            created_at: now,
            updated_at: now,
        };
        self.companies
            .lock()
            .unwrap()
            .insert(company.id, company.clone());
        company
    }

    pub fn seed_department(&self, name: &str, company: Uuid) -> Department {
        let now = Utc::now();
        let department = Department {
            id: Uuid::new_v4(),
            department_name: name.to_string(),
            company,
            number_of_employees: 0,
            created_at: now,
            updated_at: now,
        };
        self.departments
            .lock()
            .unwrap()
            .insert(department.id, department.clone());
        department
    }

    pub fn seed_employee(&self, name: &str, department: Uuid, company: Uuid) -> Employee {
        let now = Utc::now();
        let employee = Employee {
            id: Uuid::new_v4(),
            employee_name: name.to_string(),
            email_address: format!("{}@example.com", name.to_lowercase()),
            mobile_number: "555-0100".to_string(),
            address: "1 Main St".to_string(),
            designation: "Engineer".to_string(),
            department,
            company,
            status: EmployeeStatus::Pending,
            hired_on: None,
            days_employed: None,
            created_at: now,
            updated_at: now,
        };
        self.employees
            .lock()
            .unwrap()
            .insert(employee.id, employee.clone());
        employee
    }

    pub fn seed_hired_employee(
        &self,
        name: &str,
        department: Uuid,
        company: Uuid,
        hired_on: NaiveDate,
    ) -> Employee {
        let mut employee = self.seed_employee(name, department, company);
        employee.status = EmployeeStatus::Hired;
        employee.hired_on = Some(hired_on);
        self.employees
            .lock()
            .unwrap()
            .insert(employee.id, employee.clone());
        employee
    }

    pub fn company(&self, id: Uuid) -> Option<Company> {
        self.companies.lock().unwrap().get(&id).cloned()
    }

    pub fn department(&self, id: Uuid) -> Option<Department> {
        self.departments.lock().unwrap().get(&id).cloned()
    }

    pub fn employee(&self, id: Uuid) -> Option<Employee> {
        self.employees.lock().unwrap().get(&id).cloned()
    }

    pub fn employees_in_company(&self, company: Uuid) -> usize {
        self.employees
            .lock()
            .unwrap()
            .values()
            .filter(|e| e.company == company)
            .count()
    }

    pub fn departments_in_company(&self, company: Uuid) -> usize {
        self.departments
            .lock()
            .unwrap()
            .values()
            .filter(|d| d.company == company)
            .count()
    }

    fn check_cascade_failure(&self) -> Result<(), ApiError> {
        if self.fail_cascades.load(Ordering::SeqCst) {
            Err(ApiError::internal("simulated storage failure"))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl CompanyRepository for InMemoryStore {
    async fn create(&self, company: &CompanyCreate) -> Result<Company, ApiError> {
        Ok(self.seed_company(&company.company_name))
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Company>, ApiError> {
        Ok(self.company(id))
    }

    async fn list_all(&self) -> Result<Vec<Company>, ApiError> {
        Ok(self.companies.lock().unwrap().values().cloned().collect())
    }

    async fn update(&self, id: Uuid, update: &CompanyUpdate) -> Result<Company, ApiError> {
        let mut companies = self.companies.lock().unwrap();
        let company = companies
            .get_mut(&id)
            .ok_or_else(|| ApiError::NotFound(format!("Company {} not found", id)))?;
        if let Some(name) = &update.company_name {
            company.company_name = name.clone();
        }
        company.updated_at = Utc::now();
        Ok(company.clone())
    }

    async fn delete_cascade(&self, id: Uuid) -> Result<CompanyCascadeOutcome, ApiError> {
        self.check_cascade_failure()?;

        {
            let companies = self.companies.lock().unwrap();
            if !companies.contains_key(&id) {
                return Err(ApiError::NotFound(format!("Company {} not found", id)));
            }
        }

        let employees_deleted = {
            let mut employees = self.employees.lock().unwrap();
            let before = employees.len();
            employees.retain(|_, e| e.company != id);
            (before - employees.len()) as u64
        };

        let departments_deleted = {
            let mut departments = self.departments.lock().unwrap();
            let before = departments.len();
            departments.retain(|_, d| d.company != id);
            (before - departments.len()) as u64
        };

        self.companies.lock().unwrap().remove(&id);

        Ok(CompanyCascadeOutcome {
            company_id: id,
            departments_deleted,
            employees_deleted,
        })
    }

    async fn set_department_count(&self, id: Uuid, count: i64) -> Result<(), ApiError> {
        let mut companies = self.companies.lock().unwrap();
        let company = companies
            .get_mut(&id)
            .ok_or_else(|| ApiError::NotFound(format!("Company {} not found", id)))?;
        company.number_of_departments = count as i32;
        Ok(())
    }

    async fn set_employee_count(&self, id: Uuid, count: i64) -> Result<(), ApiError> {
        let mut companies = self.companies.lock().unwrap();
        let company = companies
            .get_mut(&id)
            .ok_or_else(|| ApiError::NotFound(format!("Company {} not found", id)))?;
        company.number_of_employees = count as i32;
        Ok(())
    }
}

#[async_trait]
impl DepartmentRepository for InMemoryStore {
    async fn create(&self, department: &DepartmentCreate) -> Result<Department, ApiError> {
        if self.company(department.company).is_none() {
            return Err(ApiError::Validation(format!(
                "Company {} does not exist",
                department.company
            )));
        }
        Ok(self.seed_department(&department.department_name, department.company))
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Department>, ApiError> {
        Ok(self.department(id))
    }

    async fn list_all(&self) -> Result<Vec<Department>, ApiError> {
        Ok(self.departments.lock().unwrap().values().cloned().collect())
    }

    async fn update(&self, id: Uuid, update: &DepartmentUpdate) -> Result<Department, ApiError> {
        if let Some(company) = update.company {
            if self.company(company).is_none() {
                return Err(ApiError::Validation(format!(
                    "Company {:?} does not exist",
                    update.company
                )));
            }
        }
        let mut departments = self.departments.lock().unwrap();
        let department = departments
            .get_mut(&id)
            .ok_or_else(|| ApiError::NotFound(format!("Department {} not found", id)))?;
        if let Some(name) = &update.department_name {
            department.department_name = name.clone();
        }
        if let Some(company) = update.company {
            department.company = company;
        }
        department.updated_at = Utc::now();
        Ok(department.clone())
    }

    async fn delete_cascade(&self, id: Uuid) -> Result<DepartmentCascadeOutcome, ApiError> {
        self.check_cascade_failure()?;

        let company = self
            .department(id)
            .ok_or_else(|| ApiError::NotFound(format!("Department {} not found", id)))?
            .company;

        let employees_deleted = {
            let mut employees = self.employees.lock().unwrap();
            let before = employees.len();
            employees.retain(|_, e| e.department != id);
            (before - employees.len()) as u64
        };

        self.departments.lock().unwrap().remove(&id);

        Ok(DepartmentCascadeOutcome {
            department_id: id,
            company,
            employees_deleted,
        })
    }

    async fn count_by_company(&self, company: Uuid) -> Result<i64, ApiError> {
        Ok(self.departments_in_company(company) as i64)
    }

    async fn count_all(&self) -> Result<i64, ApiError> {
        Ok(self.departments.lock().unwrap().len() as i64)
    }

    async fn set_employee_count(&self, id: Uuid, count: i64) -> Result<(), ApiError> {
        let mut departments = self.departments.lock().unwrap();
        let department = departments
            .get_mut(&id)
            .ok_or_else(|| ApiError::NotFound(format!("Department {} not found", id)))?;
        department.number_of_employees = count as i32;
        Ok(())
    }
}

#[async_trait]
impl EmployeeRepository for InMemoryStore {
    async fn create(&self, employee: &EmployeeCreate) -> Result<Employee, ApiError> {
        if self.department(employee.department).is_none() {
            return Err(ApiError::Validation("Department does not exist".to_string()));
        }
        if self.company(employee.company).is_none() {
            return Err(ApiError::Validation("Company does not exist".to_string()));
        }
        let mut created =
            self.seed_employee(&employee.employee_name, employee.department, employee.company);
        created.email_address = employee.email_address.clone();
        created.mobile_number = employee.mobile_number.clone();
        created.address = employee.address.clone();
        created.designation = employee.designation.clone();
        self.employees
            .lock()
            .unwrap()
            .insert(created.id, created.clone());
        Ok(created)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Employee>, ApiError> {
        Ok(self.employee(id))
    }

    async fn list_all(&self) -> Result<Vec<Employee>, ApiError> {
        Ok(self.employees.lock().unwrap().values().cloned().collect())
    }

    async fn update(&self, id: Uuid, update: &EmployeeUpdate) -> Result<Employee, ApiError> {
        let mut employees = self.employees.lock().unwrap();
        let employee = employees
            .get_mut(&id)
            .ok_or_else(|| ApiError::NotFound(format!("Employee {} not found", id)))?;
        if let Some(v) = &update.employee_name {
            employee.employee_name = v.clone();
        }
        if let Some(v) = &update.email_address {
            employee.email_address = v.clone();
        }
        if let Some(v) = &update.mobile_number {
            employee.mobile_number = v.clone();
        }
        if let Some(v) = &update.address {
            employee.address = v.clone();
        }
        if let Some(v) = &update.designation {
            employee.designation = v.clone();
        }
        if let Some(v) = update.department {
            employee.department = v;
        }
        if let Some(v) = update.company {
            employee.company = v;
        }
        employee.updated_at = Utc::now();
        Ok(employee.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<(), ApiError> {
        self.employees
            .lock()
            .unwrap()
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| ApiError::NotFound(format!("Employee {} not found", id)))
    }

    async fn count_by_department(&self, department: Uuid) -> Result<i64, ApiError> {
        Ok(self
            .employees
            .lock()
            .unwrap()
            .values()
            .filter(|e| e.department == department)
            .count() as i64)
    }

    async fn count_by_company(&self, company: Uuid) -> Result<i64, ApiError> {
        Ok(self.employees_in_company(company) as i64)
    }

    async fn count_all(&self) -> Result<i64, ApiError> {
        Ok(self.employees.lock().unwrap().len() as i64)
    }

    async fn list_hired(&self) -> Result<Vec<Employee>, ApiError> {
        Ok(self
            .employees
            .lock()
            .unwrap()
            .values()
            .filter(|e| e.status == EmployeeStatus::Hired && e.hired_on.is_some())
            .cloned()
            .collect())
    }

    async fn recently_hired(&self, limit: i64) -> Result<Vec<Employee>, ApiError> {
        let mut hired: Vec<Employee> = self.list_hired().await?;
        hired.sort_by(|a, b| b.hired_on.cmp(&a.hired_on));
        hired.truncate(limit as usize);
        Ok(hired)
    }

    async fn mark_hired(
        &self,
        id: Uuid,
        hired_on: NaiveDate,
        days_employed: i32,
    ) -> Result<Employee, ApiError> {
        let mut employees = self.employees.lock().unwrap();
        let employee = employees
            .get_mut(&id)
            .ok_or_else(|| ApiError::NotFound(format!("Employee {} not found", id)))?;
        employee.status = EmployeeStatus::Hired;
        employee.hired_on = Some(hired_on);
        employee.days_employed = Some(days_employed);
        employee.updated_at = Utc::now();
        Ok(employee.clone())
    }

    async fn mark_terminated(&self, id: Uuid) -> Result<Employee, ApiError> {
        let mut employees = self.employees.lock().unwrap();
        let employee = employees
            .get_mut(&id)
            .ok_or_else(|| ApiError::NotFound(format!("Employee {} not found", id)))?;
        employee.status = EmployeeStatus::Terminated;
        employee.days_employed = None;
        employee.updated_at = Utc::now();
        Ok(employee.clone())
    }

    async fn set_days_employed(&self, id: Uuid, days: i32) -> Result<(), ApiError> {
        let mut employees = self.employees.lock().unwrap();
        let employee = employees
            .get_mut(&id)
            .ok_or_else(|| ApiError::NotFound(format!("Employee {} not found", id)))?;
        employee.days_employed = Some(days);
        Ok(())
    }
}
