//! Database layer for ward meals.

mod schema;
mod users;
mod patients;
mod diets;
mod deliveries;

pub use schema::*;

use rusqlite::Connection;
use std::path::Path;
use thiserror::Error;

use crate::models::{Delivery, MealStatus};
use crate::store::AssignmentStore;

/// Database errors.
#[derive(Error, Debug)]
pub enum DbError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Constraint violation: {0}")]
    Constraint(String),
}

pub type DbResult<T> = Result<T, DbError>;

/// Database connection wrapper.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open database at path, creating if needed.
    pub fn open<P: AsRef<Path>>(path: P) -> DbResult<Self> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.initialize()?;
        Ok(db)
    }

    /// Create in-memory database (for testing).
    pub fn open_in_memory() -> DbResult<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.initialize()?;
        Ok(db)
    }

    /// Initialize schema.
    fn initialize(&self) -> DbResult<()> {
        self.conn.execute_batch(SCHEMA)?;
        Ok(())
    }

    /// Get raw connection (for advanced queries).
    pub fn conn(&self) -> &Connection {
        &self.conn
    }
}

impl AssignmentStore for Database {
    /// Both writes run in one SQLite transaction.
    fn record_assignment(&self, delivery: &Delivery) -> DbResult<bool> {
        let tx = self.conn.unchecked_transaction()?;

        let updated = diets::set_meal_status_on(
            &tx,
            &delivery.diet_id,
            delivery.meal_time,
            MealStatus::Preparing,
        )?;
        if !updated {
            // Dropping the transaction rolls back.
            return Ok(false);
        }
        deliveries::insert_delivery_on(&tx, delivery)?;

        tx.commit()?;
        Ok(true)
    }
}

/// Decode a stored enum column, naming the column on failure.
fn decode<T>(value: &str, column: &str, parse: fn(&str) -> Option<T>) -> DbResult<T> {
    parse(value).ok_or_else(|| DbError::Constraint(format!("Unknown {}: {}", column, value)))
}
