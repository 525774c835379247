//! Shared fixtures for integration tests.

#![allow(dead_code)]

use chrono::{DateTime, NaiveDate, Utc};
use ward_meals_core::models::{EmergencyContact, MealItem, Meals, Meal, NewDiet, NewPatient, NewUser};
use ward_meals_core::{Caller, Database, Patient, PatientRegistry, Role, StaffDirectory, User};

pub fn manager() -> Caller {
    Caller::new("manager-1", Role::Manager)
}

pub fn pantry() -> Caller {
    Caller::new("pantry-1", Role::Pantry)
}

/// Captured once per test so diet dates and dashboard windows agree.
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

pub fn today(now: DateTime<Utc>) -> NaiveDate {
    now.date_naive()
}

pub fn patient_input(room: &str) -> NewPatient {
    NewPatient {
        name: format!("Patient {}", room),
        diseases: vec!["hypertension".to_string()],
        allergies: vec![],
        room_number: room.to_string(),
        bed_number: "A".to_string(),
        floor_number: "3".to_string(),
        age: 64,
        gender: "female".to_string(),
        contact_info: "555-0100".to_string(),
        emergency_contact: EmergencyContact {
            name: "Sam".to_string(),
            relation: "spouse".to_string(),
            contact: "555-0101".to_string(),
        },
    }
}

pub fn admit(db: &Database, room: &str) -> Patient {
    PatientRegistry::new(db)
        .admit(&manager(), patient_input(room))
        .unwrap()
}

pub fn courier(db: &Database, email: &str) -> (User, Caller) {
    let user = StaffDirectory::new(db)
        .register(NewUser {
            email: email.to_string(),
            name: "Courier".to_string(),
            contact: "+1 555 0199".to_string(),
            role: Role::Delivery,
        })
        .unwrap();
    let caller = Caller::new(user.user_id.clone(), Role::Delivery);
    (user, caller)
}

pub fn item(name: &str) -> MealItem {
    MealItem {
        name: name.to_string(),
        ingredients: vec!["salt-free".to_string()],
        special_instructions: vec![],
    }
}

pub fn full_day(patient_id: &str, date: NaiveDate) -> NewDiet {
    NewDiet {
        patient_id: patient_id.to_string(),
        date,
        meals: Meals {
            morning: Meal::new(vec![item("Oatmeal")]),
            evening: Meal::new(vec![item("Lentil soup")]),
            night: Meal::new(vec![item("Steamed fish"), item("Rice")]),
        },
    }
}
