//! SQLite schema definition.

/// Complete database schema for ward meals.
pub const SCHEMA: &str = r#"
-- Enable foreign keys
PRAGMA foreign_keys = ON;

-- ============================================================================
-- Staff Accounts
-- ============================================================================

CREATE TABLE IF NOT EXISTS users (
    user_id TEXT PRIMARY KEY,
    email TEXT NOT NULL UNIQUE,
    name TEXT NOT NULL,
    contact TEXT NOT NULL,
    role TEXT NOT NULL CHECK (role IN ('manager', 'pantry', 'delivery')),
    created_at TEXT NOT NULL,
    task_type TEXT,                              -- current task, all three set or all NULL
    task_diet_id TEXT REFERENCES diets(diet_id),
    task_assigned_at TEXT
);

CREATE INDEX IF NOT EXISTS idx_users_role ON users(role);

-- ============================================================================
-- Patients (never deleted; discharged instead)
-- ============================================================================

CREATE TABLE IF NOT EXISTS patients (
    patient_id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    diseases TEXT NOT NULL DEFAULT '[]',         -- JSON array of strings
    allergies TEXT NOT NULL DEFAULT '[]',        -- JSON array of strings
    room_number TEXT NOT NULL,
    bed_number TEXT NOT NULL,
    floor_number TEXT NOT NULL,
    age INTEGER NOT NULL,
    gender TEXT NOT NULL,
    contact_info TEXT NOT NULL,
    emergency_name TEXT NOT NULL,
    emergency_relation TEXT NOT NULL,
    emergency_contact TEXT NOT NULL,
    status TEXT NOT NULL DEFAULT 'active' CHECK (status IN ('active', 'discharged')),
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_patients_status ON patients(status);

-- ============================================================================
-- Diets (one per patient per day, three fixed meal slots)
-- ============================================================================

CREATE TABLE IF NOT EXISTS diets (
    diet_id TEXT PRIMARY KEY,
    patient_id TEXT NOT NULL REFERENCES patients(patient_id),
    date TEXT NOT NULL,                          -- YYYY-MM-DD
    morning_items TEXT NOT NULL DEFAULT '[]',    -- JSON array of MealItem
    morning_status TEXT NOT NULL DEFAULT 'pending',
    evening_items TEXT NOT NULL DEFAULT '[]',
    evening_status TEXT NOT NULL DEFAULT 'pending',
    night_items TEXT NOT NULL DEFAULT '[]',
    night_status TEXT NOT NULL DEFAULT 'pending',
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    CHECK (morning_status IN ('pending', 'preparing', 'delivered')),
    CHECK (evening_status IN ('pending', 'preparing', 'delivered')),
    CHECK (night_status IN ('pending', 'preparing', 'delivered'))
);

CREATE INDEX IF NOT EXISTS idx_diets_patient ON diets(patient_id);
CREATE INDEX IF NOT EXISTS idx_diets_date ON diets(date);

-- ============================================================================
-- Deliveries
-- ============================================================================

CREATE TABLE IF NOT EXISTS deliveries (
    delivery_id TEXT PRIMARY KEY,
    diet_id TEXT NOT NULL REFERENCES diets(diet_id),
    meal_time TEXT NOT NULL CHECK (meal_time IN ('morning', 'evening', 'night')),
    assigned_to TEXT REFERENCES users(user_id),
    status TEXT NOT NULL DEFAULT 'assigned'
        CHECK (status IN ('assigned', 'in-progress', 'delivered')),
    notes TEXT,
    created_at TEXT NOT NULL,
    delivered_at TEXT,
    updated_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_deliveries_assignee ON deliveries(assigned_to, status);
CREATE INDEX IF NOT EXISTS idx_deliveries_status ON deliveries(status);
CREATE INDEX IF NOT EXISTS idx_deliveries_delivered_at ON deliveries(delivered_at);
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    #[test]
    fn test_schema_valid() {
        let conn = Connection::open_in_memory().unwrap();
        let result = conn.execute_batch(SCHEMA);
        assert!(result.is_ok(), "Schema should be valid SQL: {:?}", result);
    }

    #[test]
    fn test_schema_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(SCHEMA).unwrap();
        assert!(conn.execute_batch(SCHEMA).is_ok());
    }

    #[test]
    fn test_delivery_status_constraint() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(SCHEMA).unwrap();

        conn.execute(
            "INSERT INTO patients (patient_id, name, room_number, bed_number, floor_number, age, gender,
                contact_info, emergency_name, emergency_relation, emergency_contact, created_at, updated_at)
             VALUES ('p1', 'Ann', '301', 'A', '3', 70, 'female', '555', 'Bo', 'son', '556', 'now', 'now')",
            [],
        )
        .unwrap();
        conn.execute(
            "INSERT INTO diets (diet_id, patient_id, date, created_at, updated_at)
             VALUES ('d1', 'p1', '2024-01-15', 'now', 'now')",
            [],
        )
        .unwrap();

        // Unknown status should fail
        let result = conn.execute(
            "INSERT INTO deliveries (delivery_id, diet_id, meal_time, status, created_at, updated_at)
             VALUES ('x1', 'd1', 'morning', 'lost', 'now', 'now')",
            [],
        );
        assert!(result.is_err());

        // Unknown diet should fail
        let result = conn.execute(
            "INSERT INTO deliveries (delivery_id, diet_id, meal_time, created_at, updated_at)
             VALUES ('x2', 'missing', 'morning', 'now', 'now')",
            [],
        );
        assert!(result.is_err());

        // Valid delivery should succeed
        let result = conn.execute(
            "INSERT INTO deliveries (delivery_id, diet_id, meal_time, created_at, updated_at)
             VALUES ('x3', 'd1', 'night', 'now', 'now')",
            [],
        );
        assert!(result.is_ok());
    }
}
