//! Patient database operations.

use rusqlite::{params, OptionalExtension, Row};

use super::{decode, Database, DbError, DbResult};
use crate::models::{EmergencyContact, Patient, PatientStatus};
use crate::store::PatientStore;

const PATIENT_COLUMNS: &str = r#"
    patient_id, name, diseases, allergies, room_number, bed_number, floor_number,
    age, gender, contact_info, emergency_name, emergency_relation, emergency_contact,
    status, created_at, updated_at
"#;

impl PatientStore for Database {
    fn insert_patient(&self, patient: &Patient) -> DbResult<()> {
        let diseases_json = serde_json::to_string(&patient.diseases)?;
        let allergies_json = serde_json::to_string(&patient.allergies)?;

        self.conn.execute(
            r#"
            INSERT INTO patients (
                patient_id, name, diseases, allergies, room_number, bed_number,
                floor_number, age, gender, contact_info, emergency_name,
                emergency_relation, emergency_contact, status, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)
            "#,
            params![
                patient.patient_id,
                patient.name,
                diseases_json,
                allergies_json,
                patient.room_number,
                patient.bed_number,
                patient.floor_number,
                patient.age,
                patient.gender,
                patient.contact_info,
                patient.emergency_contact.name,
                patient.emergency_contact.relation,
                patient.emergency_contact.contact,
                patient.status.as_str(),
                patient.created_at,
                patient.updated_at,
            ],
        )?;
        Ok(())
    }

    fn update_patient(&self, patient: &Patient) -> DbResult<bool> {
        let diseases_json = serde_json::to_string(&patient.diseases)?;
        let allergies_json = serde_json::to_string(&patient.allergies)?;

        let rows_affected = self.conn.execute(
            r#"
            UPDATE patients SET
                name = ?2,
                diseases = ?3,
                allergies = ?4,
                room_number = ?5,
                bed_number = ?6,
                floor_number = ?7,
                age = ?8,
                gender = ?9,
                contact_info = ?10,
                emergency_name = ?11,
                emergency_relation = ?12,
                emergency_contact = ?13,
                status = ?14,
                updated_at = ?15
            WHERE patient_id = ?1
            "#,
            params![
                patient.patient_id,
                patient.name,
                diseases_json,
                allergies_json,
                patient.room_number,
                patient.bed_number,
                patient.floor_number,
                patient.age,
                patient.gender,
                patient.contact_info,
                patient.emergency_contact.name,
                patient.emergency_contact.relation,
                patient.emergency_contact.contact,
                patient.status.as_str(),
                patient.updated_at,
            ],
        )?;
        Ok(rows_affected > 0)
    }

    fn get_patient(&self, patient_id: &str) -> DbResult<Option<Patient>> {
        self.conn
            .query_row(
                &format!("SELECT {} FROM patients WHERE patient_id = ?", PATIENT_COLUMNS),
                [patient_id],
                PatientRow::read,
            )
            .optional()?
            .map(Patient::try_from)
            .transpose()
    }

    fn list_patients_by_status(&self, status: PatientStatus) -> DbResult<Vec<Patient>> {
        // Numeric prefix first so floor 2 sorts before floor 10.
        let mut stmt = self.conn.prepare(&format!(
            r#"
            SELECT {} FROM patients WHERE status = ?
            ORDER BY CAST(floor_number AS INTEGER), floor_number,
                     CAST(room_number AS INTEGER), room_number,
                     bed_number
            "#,
            PATIENT_COLUMNS
        ))?;

        let rows = stmt.query_map([status.as_str()], PatientRow::read)?;

        let mut patients = Vec::new();
        for row in rows {
            patients.push(row?.try_into()?);
        }
        Ok(patients)
    }

    fn count_patients_by_status(&self, status: PatientStatus) -> DbResult<u64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM patients WHERE status = ?",
            [status.as_str()],
            |row| row.get(0),
        )?;
        Ok(count as u64)
    }
}

/// Intermediate row struct for database mapping.
struct PatientRow {
    patient_id: String,
    name: String,
    diseases: String,
    allergies: String,
    room_number: String,
    bed_number: String,
    floor_number: String,
    age: u32,
    gender: String,
    contact_info: String,
    emergency_name: String,
    emergency_relation: String,
    emergency_contact: String,
    status: String,
    created_at: String,
    updated_at: String,
}

impl PatientRow {
    fn read(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            patient_id: row.get(0)?,
            name: row.get(1)?,
            diseases: row.get(2)?,
            allergies: row.get(3)?,
            room_number: row.get(4)?,
            bed_number: row.get(5)?,
            floor_number: row.get(6)?,
            age: row.get(7)?,
            gender: row.get(8)?,
            contact_info: row.get(9)?,
            emergency_name: row.get(10)?,
            emergency_relation: row.get(11)?,
            emergency_contact: row.get(12)?,
            status: row.get(13)?,
            created_at: row.get(14)?,
            updated_at: row.get(15)?,
        })
    }
}

impl TryFrom<PatientRow> for Patient {
    type Error = DbError;

    fn try_from(row: PatientRow) -> Result<Self, Self::Error> {
        Ok(Patient {
            diseases: serde_json::from_str(&row.diseases)?,
            allergies: serde_json::from_str(&row.allergies)?,
            status: decode(&row.status, "patient status", PatientStatus::parse)?,
            patient_id: row.patient_id,
            name: row.name,
            room_number: row.room_number,
            bed_number: row.bed_number,
            floor_number: row.floor_number,
            age: row.age,
            gender: row.gender,
            contact_info: row.contact_info,
            emergency_contact: EmergencyContact {
                name: row.emergency_name,
                relation: row.emergency_relation,
                contact: row.emergency_contact,
            },
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}
