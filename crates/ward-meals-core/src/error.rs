//! Error taxonomy shared by every tracker and registry operation.

use thiserror::Error;

use crate::db::DbError;

/// Failure of a single operation. None of these are retried.
#[derive(Error, Debug)]
pub enum MealError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Storage(#[from] DbError),
}

impl MealError {
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        MealError::NotFound {
            entity,
            id: id.into(),
        }
    }
}

pub type MealResult<T> = Result<T, MealError>;
