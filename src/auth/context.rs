use crate::auth::rbac::{Permission, Role};
use crate::error::ApiError;
use serde::{Deserialize, Serialize};

/// Identity attached to each request by the auth middleware.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UserContext {
    pub subject: Option<String>,
    pub roles: Vec<Role>,
    pub is_api_key: bool,
}

impl UserContext {
    pub fn new_api_key(roles: Vec<Role>) -> Self {
        Self {
            subject: None,
            roles,
            is_api_key: true,
        }
    }

    /// Context used when no API keys are configured (development mode).
    pub fn new_dev() -> Self {
        Self {
            subject: Some("dev".to_string()),
            roles: vec![Role::Admin],
            is_api_key: false,
        }
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    pub fn has_permission(&self, permission: &Permission) -> bool {
        self.roles.iter().any(|r| r.has_permission(permission))
    }

    /// Permission gate used at the top of every handler.
    pub fn require_permission(&self, permission: Permission) -> Result<(), ApiError> {
        if self.has_permission(&permission) {
            Ok(())
        } else {
            Err(ApiError::Authorization(format!(
                "Permission {:?} required",
                permission
            )))
        }
    }
}
