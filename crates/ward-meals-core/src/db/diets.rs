//! Diet plan database operations.

use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::{decode, Database, DbError, DbResult};
use crate::models::{Diet, Meal, MealStatus, MealTime, Meals};
use crate::store::DietStore;

const DIET_COLUMNS: &str = r#"
    diet_id, patient_id, date,
    morning_items, morning_status,
    evening_items, evening_status,
    night_items, night_status,
    created_at, updated_at
"#;

const DATE_FORMAT: &str = "%Y-%m-%d";

impl DietStore for Database {
    fn insert_diet(&self, diet: &Diet) -> DbResult<()> {
        let morning_items = serde_json::to_string(&diet.meals.morning.items)?;
        let evening_items = serde_json::to_string(&diet.meals.evening.items)?;
        let night_items = serde_json::to_string(&diet.meals.night.items)?;

        self.conn.execute(
            r#"
            INSERT INTO diets (
                diet_id, patient_id, date,
                morning_items, morning_status,
                evening_items, evening_status,
                night_items, night_status,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            "#,
            params![
                diet.diet_id,
                diet.patient_id,
                format_date(diet.date),
                morning_items,
                diet.meals.morning.status.as_str(),
                evening_items,
                diet.meals.evening.status.as_str(),
                night_items,
                diet.meals.night.status.as_str(),
                diet.created_at,
                diet.updated_at,
            ],
        )?;
        Ok(())
    }

    fn update_diet(&self, diet: &Diet) -> DbResult<bool> {
        let morning_items = serde_json::to_string(&diet.meals.morning.items)?;
        let evening_items = serde_json::to_string(&diet.meals.evening.items)?;
        let night_items = serde_json::to_string(&diet.meals.night.items)?;

        let rows_affected = self.conn.execute(
            r#"
            UPDATE diets SET
                morning_items = ?2,
                morning_status = ?3,
                evening_items = ?4,
                evening_status = ?5,
                night_items = ?6,
                night_status = ?7,
                updated_at = ?8
            WHERE diet_id = ?1
            "#,
            params![
                diet.diet_id,
                morning_items,
                diet.meals.morning.status.as_str(),
                evening_items,
                diet.meals.evening.status.as_str(),
                night_items,
                diet.meals.night.status.as_str(),
                diet.updated_at,
            ],
        )?;
        Ok(rows_affected > 0)
    }

    fn get_diet(&self, diet_id: &str) -> DbResult<Option<Diet>> {
        self.conn
            .query_row(
                &format!("SELECT {} FROM diets WHERE diet_id = ?", DIET_COLUMNS),
                [diet_id],
                DietRow::read,
            )
            .optional()?
            .map(Diet::try_from)
            .transpose()
    }

    fn set_meal_status(
        &self,
        diet_id: &str,
        meal_time: MealTime,
        status: MealStatus,
    ) -> DbResult<bool> {
        set_meal_status_on(&self.conn, diet_id, meal_time, status)
    }

    fn list_diets_for_patient(&self, patient_id: &str) -> DbResult<Vec<Diet>> {
        self.query_diets(
            &format!(
                "SELECT {} FROM diets WHERE patient_id = ? ORDER BY date DESC, created_at DESC",
                DIET_COLUMNS
            ),
            [patient_id],
        )
    }

    fn list_diets(&self) -> DbResult<Vec<Diet>> {
        self.query_diets(
            &format!(
                "SELECT {} FROM diets ORDER BY date DESC, created_at DESC",
                DIET_COLUMNS
            ),
            [],
        )
    }

    fn list_diets_on(&self, date: NaiveDate) -> DbResult<Vec<Diet>> {
        self.query_diets(
            &format!(
                "SELECT {} FROM diets WHERE date = ? ORDER BY created_at",
                DIET_COLUMNS
            ),
            [format_date(date)],
        )
    }

    fn count_diets_from(&self, date: NaiveDate) -> DbResult<u64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM diets WHERE date >= ?",
            [format_date(date)],
            |row| row.get(0),
        )?;
        Ok(count as u64)
    }
}

impl Database {
    fn query_diets<P: rusqlite::Params>(&self, sql: &str, params: P) -> DbResult<Vec<Diet>> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map(params, DietRow::read)?;

        let mut diets = Vec::new();
        for row in rows {
            diets.push(row?.try_into()?);
        }
        Ok(diets)
    }
}

/// Write one slot's status on any connection or transaction.
pub(super) fn set_meal_status_on(
    conn: &Connection,
    diet_id: &str,
    meal_time: MealTime,
    status: MealStatus,
) -> DbResult<bool> {
    let column = match meal_time {
        MealTime::Morning => "morning_status",
        MealTime::Evening => "evening_status",
        MealTime::Night => "night_status",
    };

    let rows_affected = conn.execute(
        &format!(
            "UPDATE diets SET {} = ?2, updated_at = ?3 WHERE diet_id = ?1",
            column
        ),
        params![diet_id, status.as_str(), crate::models::now_timestamp()],
    )?;
    Ok(rows_affected > 0)
}

fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Intermediate row struct for database mapping.
struct DietRow {
    diet_id: String,
    patient_id: String,
    date: String,
    morning_items: String,
    morning_status: String,
    evening_items: String,
    evening_status: String,
    night_items: String,
    night_status: String,
    created_at: String,
    updated_at: String,
}

impl DietRow {
    fn read(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            diet_id: row.get(0)?,
            patient_id: row.get(1)?,
            date: row.get(2)?,
            morning_items: row.get(3)?,
            morning_status: row.get(4)?,
            evening_items: row.get(5)?,
            evening_status: row.get(6)?,
            night_items: row.get(7)?,
            night_status: row.get(8)?,
            created_at: row.get(9)?,
            updated_at: row.get(10)?,
        })
    }
}

fn meal_from_columns(items: &str, status: &str) -> DbResult<Meal> {
    Ok(Meal {
        items: serde_json::from_str(items)?,
        status: decode(status, "meal status", MealStatus::parse)?,
    })
}

impl TryFrom<DietRow> for Diet {
    type Error = DbError;

    fn try_from(row: DietRow) -> Result<Self, Self::Error> {
        let date = NaiveDate::parse_from_str(&row.date, DATE_FORMAT)
            .map_err(|e| DbError::Constraint(format!("Invalid diet date {}: {}", row.date, e)))?;

        Ok(Diet {
            meals: Meals {
                morning: meal_from_columns(&row.morning_items, &row.morning_status)?,
                evening: meal_from_columns(&row.evening_items, &row.evening_status)?,
                night: meal_from_columns(&row.night_items, &row.night_status)?,
            },
            diet_id: row.diet_id,
            patient_id: row.patient_id,
            date,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EmergencyContact, MealItem, NewDiet, NewPatient, Patient};
    use crate::store::PatientStore;

    fn setup_db() -> (Database, String) {
        let db = Database::open_in_memory().unwrap();
        // Create a test patient
        let patient = Patient::new(NewPatient {
            name: "Ann".into(),
            room_number: "301".into(),
            bed_number: "A".into(),
            floor_number: "3".into(),
            age: 70,
            gender: "female".into(),
            contact_info: "555-0120".into(),
            emergency_contact: EmergencyContact::default(),
            ..Default::default()
        });
        db.insert_patient(&patient).unwrap();
        (db, patient.patient_id)
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn make_diet(patient_id: &str, date: NaiveDate) -> Diet {
        let mut meals = Meals::default();
        meals.morning.items.push(MealItem {
            name: "Oatmeal".into(),
            ingredients: vec!["oats".into(), "milk".into()],
            special_instructions: vec!["no sugar".into()],
        });
        Diet::new(NewDiet {
            patient_id: patient_id.into(),
            date,
            meals,
        })
    }

    #[test]
    fn test_insert_and_get_diet() {
        let (db, patient_id) = setup_db();
        let diet = make_diet(&patient_id, day(15));
        db.insert_diet(&diet).unwrap();

        let retrieved = db.get_diet(&diet.diet_id).unwrap().unwrap();
        assert_eq!(retrieved, diet);
        assert_eq!(retrieved.meals.morning.items[0].ingredients.len(), 2);
    }

    #[test]
    fn test_diet_requires_patient() {
        let (db, _) = setup_db();
        let diet = make_diet("missing-patient", day(15));
        assert!(db.insert_diet(&diet).is_err());
    }

    #[test]
    fn test_set_meal_status_single_slot() {
        let (db, patient_id) = setup_db();
        let diet = make_diet(&patient_id, day(15));
        db.insert_diet(&diet).unwrap();

        assert!(db
            .set_meal_status(&diet.diet_id, MealTime::Evening, MealStatus::Preparing)
            .unwrap());

        let retrieved = db.get_diet(&diet.diet_id).unwrap().unwrap();
        assert_eq!(retrieved.meal_status(MealTime::Morning), MealStatus::Pending);
        assert_eq!(retrieved.meal_status(MealTime::Evening), MealStatus::Preparing);
        assert_eq!(retrieved.meal_status(MealTime::Night), MealStatus::Pending);
    }

    #[test]
    fn test_set_meal_status_missing_diet() {
        let (db, _) = setup_db();
        assert!(!db
            .set_meal_status("missing", MealTime::Morning, MealStatus::Preparing)
            .unwrap());
    }

    #[test]
    fn test_list_for_patient_newest_first() {
        let (db, patient_id) = setup_db();
        let older = make_diet(&patient_id, day(14));
        let newer = make_diet(&patient_id, day(16));
        let middle = make_diet(&patient_id, day(15));
        db.insert_diet(&older).unwrap();
        db.insert_diet(&newer).unwrap();
        db.insert_diet(&middle).unwrap();

        let diets = db.list_diets_for_patient(&patient_id).unwrap();
        let dates: Vec<_> = diets.iter().map(|d| d.date).collect();
        assert_eq!(dates, vec![day(16), day(15), day(14)]);
    }

    #[test]
    fn test_date_filters() {
        let (db, patient_id) = setup_db();
        db.insert_diet(&make_diet(&patient_id, day(14))).unwrap();
        db.insert_diet(&make_diet(&patient_id, day(15))).unwrap();
        db.insert_diet(&make_diet(&patient_id, day(15))).unwrap();
        db.insert_diet(&make_diet(&patient_id, day(16))).unwrap();

        assert_eq!(db.list_diets_on(day(15)).unwrap().len(), 2);
        assert_eq!(db.count_diets_from(day(15)).unwrap(), 3);
        assert_eq!(db.list_diets().unwrap().len(), 4);
    }

    #[test]
    fn test_update_diet_replaces_items() {
        let (db, patient_id) = setup_db();
        let mut diet = make_diet(&patient_id, day(15));
        db.insert_diet(&diet).unwrap();

        diet.meals.night.items.push(MealItem {
            name: "Broth".into(),
            ..Default::default()
        });
        diet.meals.night.status = MealStatus::Delivered;
        assert!(db.update_diet(&diet).unwrap());

        let retrieved = db.get_diet(&diet.diet_id).unwrap().unwrap();
        assert_eq!(retrieved.meals.night.items[0].name, "Broth");
        assert_eq!(retrieved.meals.night.status, MealStatus::Delivered);
    }
}
