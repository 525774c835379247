//! Delivery database operations.

use rusqlite::{params, Connection, OptionalExtension, Row};

use super::{decode, Database, DbError, DbResult};
use crate::models::{Delivery, DeliveryStatus, MealTime};
use crate::store::DeliveryStore;

const DELIVERY_COLUMNS: &str = r#"
    delivery_id, diet_id, meal_time, assigned_to, status, notes,
    created_at, delivered_at, updated_at
"#;

impl DeliveryStore for Database {
    fn insert_delivery(&self, delivery: &Delivery) -> DbResult<()> {
        insert_delivery_on(&self.conn, delivery)
    }

    fn update_delivery(&self, delivery: &Delivery) -> DbResult<bool> {
        let rows_affected = self.conn.execute(
            r#"
            UPDATE deliveries SET
                assigned_to = ?2,
                status = ?3,
                notes = ?4,
                delivered_at = ?5,
                updated_at = ?6
            WHERE delivery_id = ?1
            "#,
            params![
                delivery.delivery_id,
                delivery.assigned_to,
                delivery.status.as_str(),
                delivery.notes,
                delivery.delivered_at,
                delivery.updated_at,
            ],
        )?;
        Ok(rows_affected > 0)
    }

    fn get_delivery(&self, delivery_id: &str) -> DbResult<Option<Delivery>> {
        self.conn
            .query_row(
                &format!(
                    "SELECT {} FROM deliveries WHERE delivery_id = ?",
                    DELIVERY_COLUMNS
                ),
                [delivery_id],
                DeliveryRow::read,
            )
            .optional()?
            .map(Delivery::try_from)
            .transpose()
    }

    fn delete_delivery(&self, delivery_id: &str) -> DbResult<bool> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM deliveries WHERE delivery_id = ?", [delivery_id])?;
        Ok(rows_affected > 0)
    }

    fn list_deliveries(&self) -> DbResult<Vec<Delivery>> {
        self.query_deliveries(
            &format!(
                r#"
                SELECT {} FROM deliveries
                ORDER BY delivered_at IS NULL, delivered_at DESC, created_at DESC
                "#,
                DELIVERY_COLUMNS
            ),
            [],
        )
    }

    fn list_open_deliveries_for(&self, user_id: &str) -> DbResult<Vec<Delivery>> {
        let mut deliveries = self.query_deliveries(
            &format!(
                r#"
                SELECT {} FROM deliveries
                WHERE assigned_to = ?1 AND status != ?2
                ORDER BY created_at
                "#,
                DELIVERY_COLUMNS
            ),
            params![user_id, DeliveryStatus::Delivered.as_str()],
        )?;

        // Serving order, not alphabetical
        deliveries.sort_by_key(|d| d.meal_time);
        Ok(deliveries)
    }

    fn find_delivery_with_status_for(
        &self,
        user_id: &str,
        status: DeliveryStatus,
    ) -> DbResult<Option<Delivery>> {
        self.conn
            .query_row(
                &format!(
                    r#"
                    SELECT {} FROM deliveries
                    WHERE assigned_to = ?1 AND status = ?2
                    LIMIT 1
                    "#,
                    DELIVERY_COLUMNS
                ),
                params![user_id, status.as_str()],
                DeliveryRow::read,
            )
            .optional()?
            .map(Delivery::try_from)
            .transpose()
    }

    fn list_completed_deliveries_for(
        &self,
        user_id: &str,
        from: Option<&str>,
        to: Option<&str>,
    ) -> DbResult<Vec<Delivery>> {
        self.query_deliveries(
            &format!(
                r#"
                SELECT {} FROM deliveries
                WHERE assigned_to = ?1
                  AND status = ?2
                  AND (?3 IS NULL OR delivered_at >= ?3)
                  AND (?4 IS NULL OR delivered_at <= ?4)
                ORDER BY delivered_at DESC
                "#,
                DELIVERY_COLUMNS
            ),
            params![user_id, DeliveryStatus::Delivered.as_str(), from, to],
        )
    }

    fn count_delivered_since(&self, since: &str) -> DbResult<u64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM deliveries WHERE status = ?1 AND delivered_at >= ?2",
            params![DeliveryStatus::Delivered.as_str(), since],
            |row| row.get(0),
        )?;
        Ok(count as u64)
    }

    fn count_deliveries_by_status(&self, statuses: &[DeliveryStatus]) -> DbResult<u64> {
        let mut total = 0;
        for status in statuses {
            let count: i64 = self.conn.query_row(
                "SELECT COUNT(*) FROM deliveries WHERE status = ?",
                [status.as_str()],
                |row| row.get(0),
            )?;
            total += count as u64;
        }
        Ok(total)
    }
}

impl Database {
    fn query_deliveries<P: rusqlite::Params>(
        &self,
        sql: &str,
        params: P,
    ) -> DbResult<Vec<Delivery>> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map(params, DeliveryRow::read)?;

        let mut deliveries = Vec::new();
        for row in rows {
            deliveries.push(row?.try_into()?);
        }
        Ok(deliveries)
    }
}

/// Insert on any connection or transaction.
pub(super) fn insert_delivery_on(conn: &Connection, delivery: &Delivery) -> DbResult<()> {
    conn.execute(
        r#"
        INSERT INTO deliveries (
            delivery_id, diet_id, meal_time, assigned_to, status, notes,
            created_at, delivered_at, updated_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
        "#,
        params![
            delivery.delivery_id,
            delivery.diet_id,
            delivery.meal_time.as_str(),
            delivery.assigned_to,
            delivery.status.as_str(),
            delivery.notes,
            delivery.created_at,
            delivery.delivered_at,
            delivery.updated_at,
        ],
    )?;
    Ok(())
}

/// Intermediate row struct for database mapping.
struct DeliveryRow {
    delivery_id: String,
    diet_id: String,
    meal_time: String,
    assigned_to: Option<String>,
    status: String,
    notes: Option<String>,
    created_at: String,
    delivered_at: Option<String>,
    updated_at: String,
}

impl DeliveryRow {
    fn read(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            delivery_id: row.get(0)?,
            diet_id: row.get(1)?,
            meal_time: row.get(2)?,
            assigned_to: row.get(3)?,
            status: row.get(4)?,
            notes: row.get(5)?,
            created_at: row.get(6)?,
            delivered_at: row.get(7)?,
            updated_at: row.get(8)?,
        })
    }
}

impl TryFrom<DeliveryRow> for Delivery {
    type Error = DbError;

    fn try_from(row: DeliveryRow) -> Result<Self, Self::Error> {
        Ok(Delivery {
            meal_time: decode(&row.meal_time, "meal time", MealTime::parse)?,
            status: decode(&row.status, "delivery status", DeliveryStatus::parse)?,
            delivery_id: row.delivery_id,
            diet_id: row.diet_id,
            assigned_to: row.assigned_to,
            notes: row.notes,
            created_at: row.created_at,
            delivered_at: row.delivered_at,
            updated_at: row.updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        EmergencyContact, Meals, MealStatus, NewDiet, NewPatient, Patient, Role, User, Diet,
    };
    use crate::store::{AssignmentStore, DietStore, PatientStore, UserStore};
    use chrono::{NaiveDate, TimeZone, Utc};

    struct Fixture {
        db: Database,
        diet_id: String,
        courier_id: String,
    }

    fn setup() -> Fixture {
        let db = Database::open_in_memory().unwrap();
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

        let diet = Diet::new(NewDiet {
            patient_id: patient.patient_id.clone(),
            date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            meals: Meals::default(),
        });
        db.insert_diet(&diet).unwrap();

        let courier = User::new(
            "kai@ward.test".into(),
            "Kai".into(),
            "555-0130".into(),
            Role::Delivery,
        );
        db.insert_user(&courier).unwrap();

        Fixture {
            db,
            diet_id: diet.diet_id,
            courier_id: courier.user_id,
        }
    }

    #[test]
    fn test_insert_and_get() {
        let f = setup();
        let delivery = Delivery::new(f.diet_id.clone(), MealTime::Night, Some(f.courier_id.clone()));
        f.db.insert_delivery(&delivery).unwrap();

        let retrieved = f.db.get_delivery(&delivery.delivery_id).unwrap().unwrap();
        assert_eq!(retrieved, delivery);
    }

    #[test]
    fn test_update_and_delete() {
        let f = setup();
        let mut delivery = Delivery::new(f.diet_id.clone(), MealTime::Night, Some(f.courier_id.clone()));
        f.db.insert_delivery(&delivery).unwrap();

        delivery.apply_status(DeliveryStatus::Delivered, Some("done".into()), Utc::now());
        assert!(f.db.update_delivery(&delivery).unwrap());

        let retrieved = f.db.get_delivery(&delivery.delivery_id).unwrap().unwrap();
        assert_eq!(retrieved.status, DeliveryStatus::Delivered);
        assert!(retrieved.delivered_at.is_some());

        assert!(f.db.delete_delivery(&delivery.delivery_id).unwrap());
        assert!(f.db.get_delivery(&delivery.delivery_id).unwrap().is_none());
    }

    #[test]
    fn test_open_deliveries_in_serving_order() {
        let f = setup();
        let courier = Some(f.courier_id.clone());
        let night = Delivery::new(f.diet_id.clone(), MealTime::Night, courier.clone());
        let morning = Delivery::new(f.diet_id.clone(), MealTime::Morning, courier.clone());
        let mut done = Delivery::new(f.diet_id.clone(), MealTime::Evening, courier.clone());
        done.apply_status(DeliveryStatus::Delivered, None, Utc::now());

        f.db.insert_delivery(&night).unwrap();
        f.db.insert_delivery(&morning).unwrap();
        f.db.insert_delivery(&done).unwrap();

        let open = f.db.list_open_deliveries_for(&f.courier_id).unwrap();
        let times: Vec<_> = open.iter().map(|d| d.meal_time).collect();
        assert_eq!(times, vec![MealTime::Morning, MealTime::Night]);
    }

    #[test]
    fn test_find_with_status() {
        let f = setup();
        let mut delivery = Delivery::new(f.diet_id.clone(), MealTime::Morning, Some(f.courier_id.clone()));
        f.db.insert_delivery(&delivery).unwrap();

        assert!(f
            .db
            .find_delivery_with_status_for(&f.courier_id, DeliveryStatus::InProgress)
            .unwrap()
            .is_none());

        delivery.apply_status(DeliveryStatus::InProgress, None, Utc::now());
        f.db.update_delivery(&delivery).unwrap();

        let current = f
            .db
            .find_delivery_with_status_for(&f.courier_id, DeliveryStatus::InProgress)
            .unwrap()
            .unwrap();
        assert_eq!(current.delivery_id, delivery.delivery_id);
    }

    #[test]
    fn test_counts_and_history_range() {
        let f = setup();
        let courier = Some(f.courier_id.clone());
        let yesterday = Utc.with_ymd_and_hms(2024, 1, 14, 18, 0, 0).unwrap();
        let today = Utc.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap();

        let mut old = Delivery::new(f.diet_id.clone(), MealTime::Night, courier.clone());
        old.apply_status(DeliveryStatus::Delivered, None, yesterday);
        let mut fresh = Delivery::new(f.diet_id.clone(), MealTime::Morning, courier.clone());
        fresh.apply_status(DeliveryStatus::Delivered, None, today);
        let open = Delivery::new(f.diet_id.clone(), MealTime::Evening, courier.clone());

        f.db.insert_delivery(&old).unwrap();
        f.db.insert_delivery(&fresh).unwrap();
        f.db.insert_delivery(&open).unwrap();

        assert_eq!(f.db.count_delivered_since("2024-01-15T00:00:00.000000Z").unwrap(), 1);
        assert_eq!(
            f.db.count_deliveries_by_status(&[DeliveryStatus::Assigned, DeliveryStatus::InProgress])
                .unwrap(),
            1
        );

        let all = f.db.list_completed_deliveries_for(&f.courier_id, None, None).unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].delivery_id, fresh.delivery_id);

        let ranged = f
            .db
            .list_completed_deliveries_for(
                &f.courier_id,
                Some("2024-01-14T00:00:00.000000Z"),
                Some("2024-01-14T23:59:59.999999Z"),
            )
            .unwrap();
        assert_eq!(ranged.len(), 1);
        assert_eq!(ranged[0].delivery_id, old.delivery_id);
    }

    #[test]
    fn test_list_deliveries_completed_first() {
        let f = setup();
        let open = Delivery::new(f.diet_id.clone(), MealTime::Evening, None);
        let mut done = Delivery::new(f.diet_id.clone(), MealTime::Morning, None);
        done.apply_status(DeliveryStatus::Delivered, None, Utc::now());

        f.db.insert_delivery(&open).unwrap();
        f.db.insert_delivery(&done).unwrap();

        let all = f.db.list_deliveries().unwrap();
        assert_eq!(all[0].delivery_id, done.delivery_id);
        assert_eq!(all[1].delivery_id, open.delivery_id);
    }

    #[test]
    fn test_record_assignment_transaction() {
        let f = setup();
        let delivery = Delivery::new(f.diet_id.clone(), MealTime::Evening, Some(f.courier_id.clone()));

        assert!(f.db.record_assignment(&delivery).unwrap());

        assert!(f.db.get_delivery(&delivery.delivery_id).unwrap().is_some());
        let diet = f.db.get_diet(&f.diet_id).unwrap().unwrap();
        assert_eq!(diet.meal_status(MealTime::Evening), MealStatus::Preparing);
    }

    #[test]
    fn test_record_assignment_missing_diet_writes_nothing() {
        let f = setup();
        let delivery = Delivery::new("missing".into(), MealTime::Evening, None);

        assert!(!f.db.record_assignment(&delivery).unwrap());
        assert!(f.db.get_delivery(&delivery.delivery_id).unwrap().is_none());
    }
}
