//! Staff accounts.

use serde::{Deserialize, Serialize};

/// Staff role; decides which operations an account may call.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Plans diets, manages patients, assigns deliveries
    Manager,
    /// Prepares meals
    Pantry,
    /// Carries meals to the ward
    Delivery,
}

impl Role {
    /// Stored/wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Manager => "manager",
            Role::Pantry => "pantry",
            Role::Delivery => "delivery",
        }
    }

    /// Parse the stored representation.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "manager" => Some(Role::Manager),
            "pantry" => Some(Role::Pantry),
            "delivery" => Some(Role::Delivery),
            _ => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A registered staff account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    /// Local UUID
    pub user_id: String,
    /// Login email, unique and lowercase
    pub email: String,
    /// Display name
    pub name: String,
    /// Phone number
    pub contact: String,
    pub role: Role,
    /// Registration timestamp
    pub created_at: String,
    /// Pantry or courier work handed out by the pantry, if any
    pub current_task: Option<StaffTask>,
}

/// The task a staff member is currently working on.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StaffTask {
    /// Free-form label such as `preparation` or `delivery`
    pub task_type: String,
    pub diet_id: String,
    pub assigned_at: String,
}

impl StaffTask {
    pub fn new(task_type: String, diet_id: String) -> Self {
        Self {
            task_type,
            diet_id,
            assigned_at: super::now_timestamp(),
        }
    }
}

impl User {
    /// Create a new account record.
    pub fn new(email: String, name: String, contact: String, role: Role) -> Self {
        Self {
            user_id: uuid::Uuid::new_v4().to_string(),
            email,
            name,
            contact,
            role,
            created_at: super::now_timestamp(),
            current_task: None,
        }
    }
}

/// Who a delivery is assigned to, as shown on dispatch lists.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StaffSummary {
    pub user_id: String,
    pub name: String,
    pub contact: String,
}

impl From<&User> for StaffSummary {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.user_id.clone(),
            name: user.name.clone(),
            contact: user.contact.clone(),
        }
    }
}

/// Signup input, validated by the staff directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewUser {
    pub email: String,
    pub name: String,
    pub contact: String,
    pub role: Role,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse() {
        for role in [Role::Manager, Role::Pantry, Role::Delivery] {
            assert_eq!(Role::parse(role.as_str()), Some(role));
        }
        assert_eq!(Role::parse("pantry_staff"), None);
    }

    #[test]
    fn test_new_user() {
        let user = User::new(
            "ana@ward.test".into(),
            "Ana".into(),
            "+1 555 0100".into(),
            Role::Delivery,
        );
        assert_eq!(user.user_id.len(), 36);
        assert_eq!(user.role, Role::Delivery);
        assert!(user.current_task.is_none());
    }
}
