//! Tests for the FFI facade.

use ward_meals_core::{
    open_database_in_memory, FfiCaller, FfiEmergencyContact, FfiMealItem, FfiNewDiet,
    FfiNewPatient, FfiNewUser, WardMealsError,
};

fn caller(user_id: &str, role: &str) -> FfiCaller {
    FfiCaller {
        user_id: user_id.to_string(),
        role: role.to_string(),
    }
}

fn new_patient(room: &str) -> FfiNewPatient {
    FfiNewPatient {
        name: "Ann Lee".to_string(),
        diseases: vec![],
        allergies: vec!["shellfish".to_string()],
        room_number: room.to_string(),
        bed_number: "B".to_string(),
        floor_number: "2".to_string(),
        age: 81,
        gender: "female".to_string(),
        contact_info: "555-0111".to_string(),
        emergency_contact: FfiEmergencyContact {
            name: "Bo Lee".to_string(),
            relation: "son".to_string(),
            contact: "555-0112".to_string(),
        },
    }
}

fn soup() -> FfiMealItem {
    FfiMealItem {
        name: "Soup".to_string(),
        ingredients: vec!["carrot".to_string()],
        special_instructions: vec!["no salt".to_string()],
    }
}

#[test]
fn test_facade_workflow() {
    let core = open_database_in_memory().unwrap();
    let manager = caller("manager-1", "manager");

    let courier = core
        .register_staff(FfiNewUser {
            email: "Kai@Ward.test".to_string(),
            name: "Kai".to_string(),
            contact: "555 0199".to_string(),
            role: "delivery".to_string(),
        })
        .unwrap();
    assert_eq!(courier.email, "kai@ward.test");
    let courier_caller = caller(&courier.user_id, "delivery");

    let patient = core.admit_patient(manager.clone(), new_patient("12")).unwrap();
    assert_eq!(patient.status, "active");

    let now = chrono::Utc::now();
    let at = now.to_rfc3339();
    let today = now.date_naive().format("%Y-%m-%d").to_string();
    let diet = core
        .create_diet(
            manager.clone(),
            FfiNewDiet {
                patient_id: patient.patient_id.clone(),
                date: today.clone(),
                morning: vec![soup()],
                evening: vec![],
                night: vec![soup()],
            },
        )
        .unwrap();
    assert_eq!(diet.date, today);
    assert_eq!(diet.morning.status, "pending");

    let delivery = core
        .assign_delivery(
            manager.clone(),
            diet.diet_id.clone(),
            "evening".to_string(),
            courier.user_id.clone(),
        )
        .unwrap();
    assert_eq!(delivery.status, "assigned");

    let assignments = core.assignments(courier_caller.clone()).unwrap();
    assert_eq!(assignments.len(), 1);
    assert_eq!(assignments[0].patient.room_number, "12");

    let done = core
        .update_delivery_status(
            courier_caller.clone(),
            delivery.delivery_id.clone(),
            "delivered".to_string(),
            Some("left with nurse".to_string()),
        )
        .unwrap();
    assert_eq!(done.status, "delivered");

    let stats = core.manager_dashboard_at(manager, at.clone()).unwrap();
    assert_eq!(stats.total_active_patients, 1);
    assert_eq!(stats.today_deliveries, 1);
    assert_eq!(stats.meals_preparing, 1);

    let pantry = core
        .pantry_dashboard_at(caller("pantry-1", "pantry"), at)
        .unwrap();
    assert_eq!(pantry.total_preparations, 1);
    assert_eq!(pantry.efficiency, 100.0);

    let history = core.delivery_history(courier_caller, None, None).unwrap();
    assert_eq!(history.total_deliveries, 1);

    let all = core.all_deliveries(caller("pantry-1", "pantry")).unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].patient.room_number, "12");
    assert_eq!(all[0].assignee.as_ref().unwrap().name, courier.name);

    let tasked = core
        .assign_staff_task(
            caller("pantry-1", "pantry"),
            courier.user_id.clone(),
            "delivery".to_string(),
            diet.diet_id.clone(),
        )
        .unwrap();
    let task = tasked.current_task.unwrap();
    assert_eq!(task.task_type, "delivery");
    assert_eq!(task.diet_id, diet.diet_id);
}

#[test]
fn test_facade_error_mapping() {
    let core = open_database_in_memory().unwrap();

    let result = core.admit_patient(caller("p", "pantry"), new_patient("1"));
    assert!(matches!(result, Err(WardMealsError::Forbidden(_))));

    let result = core.admit_patient(caller("m", "chef"), new_patient("1"));
    assert!(matches!(result, Err(WardMealsError::InvalidInput(_))));

    let result = core.get_patient(caller("m", "manager"), "missing".to_string());
    assert!(matches!(result, Err(WardMealsError::NotFound(_))));

    let result = core.update_meal_status(
        caller("p", "pantry"),
        "missing".to_string(),
        "brunch".to_string(),
        "pending".to_string(),
    );
    assert!(matches!(result, Err(WardMealsError::InvalidInput(_))));

    let result = core.delivery_history(
        caller("d", "delivery"),
        Some("yesterday".to_string()),
        None,
    );
    assert!(matches!(result, Err(WardMealsError::InvalidInput(_))));
}
