//! Back-office roles.

use serde::{Deserialize, Serialize};
use slicekit_resource::{Endpoint, Resource, ResourceId};

/// Longest role name the backend accepts
pub const MAX_NAME_LEN: usize = 50;

/// A named set of permissions
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    /// Backend id
    pub id: u64,
    /// Unique name
    pub name: String,
    /// Free-form description
    pub description: Option<String>,
    /// Permission keys granted by the role
    #[serde(default)]
    pub permissions: Vec<String>,
}

/// Body for creating or updating a role
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleInput {
    /// Unique name
    pub name: String,
    /// Free-form description
    pub description: Option<String>,
    /// Permission keys granted by the role
    pub permissions: Vec<String>,
}

impl Resource for Role {
    type Input = RoleInput;
    const NAME: &'static str = "Role";
    const PLURAL: &'static str = "roles";

    fn id(&self) -> ResourceId {
        ResourceId::new(self.id)
    }

    fn validate(input: &RoleInput) -> Result<(), String> {
        let name = input.name.trim();
        if name.is_empty() {
            return Err("Role name is required".to_string());
        }
        if name.chars().count() > MAX_NAME_LEN {
            return Err(format!("Role name must be at most {MAX_NAME_LEN} characters"));
        }
        if input.permissions.is_empty() {
            return Err("At least one permission is required".to_string());
        }
        Ok(())
    }
}

/// `/roles`
#[must_use]
pub fn endpoint() -> Endpoint {
    Endpoint::new("/roles")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(name: &str, permissions: &[&str]) -> RoleInput {
        RoleInput {
            name: name.to_string(),
            description: None,
            permissions: permissions.iter().map(ToString::to_string).collect(),
        }
    }

    #[test]
    fn role_validation() {
        assert_eq!(Role::validate(&input(" ", &["billing.read"])), Err("Role name is required".to_string()));
        assert!(Role::validate(&input(&"x".repeat(51), &["billing.read"])).is_err());
        assert!(Role::validate(&input(&"x".repeat(50), &["billing.read"])).is_ok());
        assert_eq!(
            Role::validate(&input("Auditor", &[])),
            Err("At least one permission is required".to_string())
        );
    }
}
