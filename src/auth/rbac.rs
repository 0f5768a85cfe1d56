use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    HrManager,
    Viewer,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::HrManager => "hr_manager",
            Role::Viewer => "viewer",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "admin" => Some(Role::Admin),
            "hr_manager" => Some(Role::HrManager),
            "viewer" => Some(Role::Viewer),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum Permission {
    // Company management
    ManageCompanies,
    ViewCompanies,

    // Department management
    ManageDepartments,
    ViewDepartments,

    // Employee management
    ManageEmployees,
    ViewEmployees,

    // Batch jobs
    RunTenureRecalc,

    // Dashboard
    ViewDashboard,
}

impl Role {
    pub fn permissions(&self) -> Vec<Permission> {
        match self {
            Role::Admin => vec![
                Permission::ManageCompanies,
                Permission::ViewCompanies,
                Permission::ManageDepartments,
                Permission::ViewDepartments,
                Permission::ManageEmployees,
                Permission::ViewEmployees,
                Permission::RunTenureRecalc,
                Permission::ViewDashboard,
            ],
            Role::HrManager => vec![
                Permission::ViewCompanies,
                Permission::ManageDepartments,
                Permission::ViewDepartments,
                Permission::ManageEmployees,
                Permission::ViewEmployees,
                Permission::RunTenureRecalc,
                Permission::ViewDashboard,
            ],
            Role::Viewer => vec![
                Permission::ViewCompanies,
                Permission::ViewDepartments,
                Permission::ViewEmployees,
                Permission::ViewDashboard,
            ],
        }
    }

    pub fn has_permission(&self, permission: &Permission) -> bool {
        self.permissions().contains(permission)
    }
}
