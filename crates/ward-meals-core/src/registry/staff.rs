//! Staff signup and lookup.

use crate::access::{Caller, ANY_STAFF, DISPATCH, PANTRY};
use crate::error::{MealError, MealResult};
use crate::models::{NewUser, Role, StaffTask, User};
use crate::store::{DietStore, UserStore};

use super::require_field;

const NAME_MIN: usize = 2;
const NAME_MAX: usize = 50;

pub struct StaffDirectory<'a, S> {
    store: &'a S,
}

impl<'a, S: UserStore> StaffDirectory<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Create a staff account. Runs before the caller has an identity.
    ///
    /// Email is trimmed and lowercased; the name is trimmed.
    pub fn register(&self, input: NewUser) -> MealResult<User> {
        let email = normalize_email(&input.email)?;
        let name = validate_name(&input.name)?;
        let contact = validate_contact(&input.contact)?;

        if self.store.get_user_by_email(&email)?.is_some() {
            tracing::warn!(email = %email, "Email already registered");
            return Err(MealError::Conflict(format!("email {} already registered", email)));
        }

        let user = User::new(email, name, contact, input.role);
        self.store.insert_user(&user)?;

        tracing::info!(user_id = %user.user_id, role = %user.role, "Staff registered");
        Ok(user)
    }

    pub fn get(&self, caller: &Caller, user_id: &str) -> MealResult<User> {
        caller.require(ANY_STAFF)?;
        self.store
            .get_user(user_id)?
            .ok_or_else(|| MealError::not_found("User", user_id))
    }

    /// Staff with `role`, by name. Used to pick couriers and cooks.
    pub fn staff_by_role(&self, caller: &Caller, role: Role) -> MealResult<Vec<User>> {
        caller.require(DISPATCH)?;
        let users = self.store.list_users_by_role(role)?;
        tracing::debug!(role = %role, count = users.len(), "Listed staff");
        Ok(users)
    }
}

impl<'a, S: UserStore + DietStore> StaffDirectory<'a, S> {
    /// Hand `staff_id` a task on a diet, replacing whatever they had.
    pub fn assign_task(
        &self,
        caller: &Caller,
        staff_id: &str,
        task_type: &str,
        diet_id: &str,
    ) -> MealResult<User> {
        caller.require(PANTRY)?;
        require_field(task_type, "task type")?;

        let mut user = self
            .store
            .get_user(staff_id)?
            .ok_or_else(|| MealError::not_found("User", staff_id))?;
        if self.store.get_diet(diet_id)?.is_none() {
            return Err(MealError::not_found("Diet", diet_id));
        }

        let task = StaffTask::new(task_type.trim().to_string(), diet_id.to_string());
        if !self.store.set_current_task(staff_id, &task)? {
            return Err(MealError::not_found("User", staff_id));
        }
        user.current_task = Some(task);

        tracing::info!(
            staff_id = %staff_id,
            diet_id = %diet_id,
            task_type = %task_type.trim(),
            "Assigned staff to task"
        );
        Ok(user)
    }
}

fn normalize_email(raw: &str) -> MealResult<String> {
    let email = raw.trim().to_lowercase();
    let invalid = || MealError::Validation("please enter a valid email".into());

    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty()
        || domain.contains('@')
        || email.chars().any(char::is_whitespace)
    {
        return Err(invalid());
    }

    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || labels.iter().any(|l| l.is_empty()) {
        return Err(invalid());
    }
    Ok(email)
}

fn validate_name(raw: &str) -> MealResult<String> {
    require_field(raw, "name")?;
    let name = raw.trim();
    let len = name.chars().count();
    if !(NAME_MIN..=NAME_MAX).contains(&len) {
        return Err(MealError::Validation(format!(
            "name must be between {} and {} characters",
            NAME_MIN, NAME_MAX
        )));
    }
    Ok(name.to_string())
}

fn validate_contact(raw: &str) -> MealResult<String> {
    require_field(raw, "contact number")?;
    let contact = raw.trim();
    let allowed = |c: char| c.is_ascii_digit() || matches!(c, '+' | '-' | ' ' | '(' | ')');
    if !contact.chars().all(allowed) {
        return Err(MealError::Validation(
            "please enter a valid contact number".into(),
        ));
    }
    Ok(contact.to_string())
}
