//! Caller identity and role checks.
//!
//! Token verification happens before the core is called; every operation
//! receives the verified [`Caller`] and asserts its own permitted roles.

use serde::{Deserialize, Serialize};

use crate::error::{MealError, MealResult};
use crate::models::Role;

/// Verified identity of whoever invoked an operation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Caller {
    pub user_id: String,
    pub role: Role,
}

impl Caller {
    pub fn new(user_id: impl Into<String>, role: Role) -> Self {
        Self {
            user_id: user_id.into(),
            role,
        }
    }

    /// Fail unless the caller carries an identity and one of `allowed` roles.
    pub fn require(&self, allowed: &[Role]) -> MealResult<()> {
        if self.user_id.trim().is_empty() {
            tracing::error!("Caller identity missing");
            return Err(MealError::Unauthorized("caller identity required".into()));
        }
        if !allowed.contains(&self.role) {
            tracing::warn!(user_id = %self.user_id, role = %self.role, "Role not permitted");
            return Err(MealError::Forbidden(format!(
                "role {} may not perform this operation",
                self.role
            )));
        }
        Ok(())
    }
}

/// Managers only.
pub const MANAGER: &[Role] = &[Role::Manager];
/// Pantry staff only.
pub const PANTRY: &[Role] = &[Role::Pantry];
/// Delivery staff only.
pub const DELIVERY: &[Role] = &[Role::Delivery];
/// Whoever may hand a prepared meal to a courier.
pub const DISPATCH: &[Role] = &[Role::Manager, Role::Pantry];
/// Any authenticated staff member.
pub const ANY_STAFF: &[Role] = &[Role::Manager, Role::Pantry, Role::Delivery];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permitted_role() {
        let caller = Caller::new("user-1", Role::Pantry);
        assert!(caller.require(DISPATCH).is_ok());
    }

    #[test]
    fn test_wrong_role_forbidden() {
        let caller = Caller::new("user-1", Role::Delivery);
        assert!(matches!(
            caller.require(MANAGER),
            Err(MealError::Forbidden(_))
        ));
    }

    #[test]
    fn test_missing_identity_unauthorized() {
        let caller = Caller::new("  ", Role::Manager);
        assert!(matches!(
            caller.require(MANAGER),
            Err(MealError::Unauthorized(_))
        ));
    }
}
