//! Patient admission, updates and discharge.

use crate::access::{Caller, MANAGER};
use crate::error::{MealError, MealResult};
use crate::models::{NewPatient, Patient, PatientStatus};
use crate::store::PatientStore;

use super::require_field;

/// Manager-facing patient records. Patients are discharged, never deleted.
pub struct PatientRegistry<'a, S> {
    store: &'a S,
}

impl<'a, S: PatientStore> PatientRegistry<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    pub fn admit(&self, caller: &Caller, input: NewPatient) -> MealResult<Patient> {
        caller.require(MANAGER)?;
        validate(&input)?;

        let patient = Patient::new(input);
        self.store.insert_patient(&patient)?;

        tracing::info!(patient_id = %patient.patient_id, room = %patient.room_number, "Patient admitted");
        Ok(patient)
    }

    /// Replace every editable field. Status is left alone.
    pub fn update(&self, caller: &Caller, patient_id: &str, input: NewPatient) -> MealResult<Patient> {
        caller.require(MANAGER)?;
        validate(&input)?;

        let mut patient = self.load(patient_id)?;
        patient.apply(input);
        if !self.store.update_patient(&patient)? {
            return Err(MealError::not_found("Patient", patient_id));
        }

        tracing::info!(patient_id, "Patient updated");
        Ok(patient)
    }

    pub fn get(&self, caller: &Caller, patient_id: &str) -> MealResult<Patient> {
        caller.require(MANAGER)?;
        self.load(patient_id)
    }

    /// Active patients in ward order.
    pub fn active_patients(&self, caller: &Caller) -> MealResult<Vec<Patient>> {
        caller.require(MANAGER)?;
        let patients = self.store.list_patients_by_status(PatientStatus::Active)?;
        tracing::debug!(count = patients.len(), "Listed active patients");
        Ok(patients)
    }

    /// Mark a patient discharged. Discharging twice is a no-op.
    pub fn discharge(&self, caller: &Caller, patient_id: &str) -> MealResult<Patient> {
        caller.require(MANAGER)?;

        let mut patient = self.load(patient_id)?;
        if patient.status == PatientStatus::Discharged {
            return Ok(patient);
        }

        patient.status = PatientStatus::Discharged;
        patient.touch();
        if !self.store.update_patient(&patient)? {
            return Err(MealError::not_found("Patient", patient_id));
        }

        tracing::info!(patient_id, "Patient discharged");
        Ok(patient)
    }

    fn load(&self, patient_id: &str) -> MealResult<Patient> {
        self.store
            .get_patient(patient_id)?
            .ok_or_else(|| MealError::not_found("Patient", patient_id))
    }
}

fn validate(input: &NewPatient) -> MealResult<()> {
    require_field(&input.name, "name")?;
    require_field(&input.room_number, "room number")?;
    require_field(&input.bed_number, "bed number")?;
    require_field(&input.floor_number, "floor number")?;
    require_field(&input.gender, "gender")?;
    require_field(&input.contact_info, "contact info")?;
    require_field(&input.emergency_contact.name, "emergency contact name")?;
    require_field(&input.emergency_contact.relation, "emergency contact relation")?;
    require_field(&input.emergency_contact.contact, "emergency contact number")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;
    use crate::models::{EmergencyContact, Role};

    fn manager() -> Caller {
        Caller::new("manager-1", Role::Manager)
    }

    fn input(room: &str) -> NewPatient {
        NewPatient {
            name: "Ann Lee".into(),
            diseases: vec!["diabetes".into()],
            allergies: vec!["peanuts".into()],
            room_number: room.into(),
            bed_number: "A".into(),
            floor_number: "3".into(),
            age: 70,
            gender: "female".into(),
            contact_info: "555-0120".into(),
            emergency_contact: EmergencyContact {
                name: "Bo Lee".into(),
                relation: "son".into(),
                contact: "555-0121".into(),
            },
        }
    }

    #[test]
    fn test_admit_and_get() {
        let db = Database::open_in_memory().unwrap();
        let registry = PatientRegistry::new(&db);

        let patient = registry.admit(&manager(), input("301")).unwrap();
        assert!(patient.is_active());

        let loaded = registry.get(&manager(), &patient.patient_id).unwrap();
        assert_eq!(loaded, patient);
    }

    #[test]
    fn test_admit_requires_fields() {
        let db = Database::open_in_memory().unwrap();
        let registry = PatientRegistry::new(&db);

        let mut bad = input("301");
        bad.bed_number = "  ".into();
        assert!(matches!(
            registry.admit(&manager(), bad),
            Err(MealError::Validation(_))
        ));
    }

    #[test]
    fn test_update_keeps_status() {
        let db = Database::open_in_memory().unwrap();
        let registry = PatientRegistry::new(&db);
        let patient = registry.admit(&manager(), input("301")).unwrap();
        registry.discharge(&manager(), &patient.patient_id).unwrap();

        let updated = registry
            .update(&manager(), &patient.patient_id, input("405"))
            .unwrap();
        assert_eq!(updated.room_number, "405");
        assert_eq!(updated.status, PatientStatus::Discharged);

        assert!(matches!(
            registry.update(&manager(), "missing", input("1")),
            Err(MealError::NotFound { .. })
        ));
    }

    #[test]
    fn test_discharge_idempotent() {
        let db = Database::open_in_memory().unwrap();
        let registry = PatientRegistry::new(&db);
        let a = registry.admit(&manager(), input("301")).unwrap();
        registry.admit(&manager(), input("302")).unwrap();

        let first = registry.discharge(&manager(), &a.patient_id).unwrap();
        let second = registry.discharge(&manager(), &a.patient_id).unwrap();
        assert_eq!(first, second);

        let active = registry.active_patients(&manager()).unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].room_number, "302");
    }

    #[test]
    fn test_pantry_cannot_admit() {
        let db = Database::open_in_memory().unwrap();
        let registry = PatientRegistry::new(&db);
        let pantry = Caller::new("p", Role::Pantry);
        assert!(matches!(
            registry.admit(&pantry, input("301")),
            Err(MealError::Forbidden(_))
        ));
    }
}
