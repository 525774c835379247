//! Patient and staff records behind the meal workflow.

mod patients;
mod staff;

pub use patients::*;
pub use staff::*;

use crate::error::{MealError, MealResult};

/// Reject blank required text.
fn require_field(value: &str, field: &str) -> MealResult<()> {
    if value.trim().is_empty() {
        return Err(MealError::Validation(format!("{} is required", field)));
    }
    Ok(())
}
