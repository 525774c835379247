//! Ward Meals Core Library
//!
//! Hospital meal planning and delivery tracking for managers, pantry staff
//! and couriers.
//!
//! # Architecture
//!
//! ```text
//!   Manager                 Pantry                      Courier
//!      │                      │                            │
//!  admit patient         update meal status        update delivery status
//!  create diet ──► Diet ◄── assign delivery ──► Delivery ◄─┘
//!      │            │                              │
//!      └────────────┴──────── StatsEngine ─────────┘
//!                         (manager / pantry dashboards)
//! ```
//!
//! Every operation receives a verified [`Caller`] and checks its role before
//! touching the store.
//!
//! # Modules
//!
//! - [`db`]: SQLite implementation of the store traits
//! - [`models`]: Domain types (Patient, Diet, Delivery, User)
//! - [`store`]: Data-access traits the trackers are written against
//! - [`tracker`]: Meal lifecycle and delivery assignment
//! - [`stats`]: Manager and pantry dashboards
//! - [`registry`]: Patient registry and staff directory
//! - [`config`]: Environment configuration and logging

pub mod access;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod registry;
pub mod stats;
pub mod store;
pub mod tracker;

// Re-export commonly used types
pub use access::Caller;
pub use config::CoreConfig;
pub use db::Database;
pub use error::{MealError, MealResult};
pub use models::{
    Delivery, DeliveryAssignment, DeliveryOverview, DeliveryStatus, Diet, MealItem,
    MealPreparation, MealStatus, MealTime, NewDiet, NewPatient, NewUser, Patient, Role,
    StaffSummary, StaffTask, User,
};
pub use registry::{PatientRegistry, StaffDirectory};
pub use stats::{ManagerStats, PantryStats, StatsEngine};
pub use tracker::{DeliveryHistory, DeliveryTracker, DietTracker};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::{Arc, Mutex};

use chrono::{DateTime, NaiveDate, Utc};

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum WardMealsError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<MealError> for WardMealsError {
    fn from(e: MealError) -> Self {
        let message = e.to_string();
        match e {
            MealError::NotFound { .. } => WardMealsError::NotFound(message),
            MealError::Unauthorized(_) => WardMealsError::Unauthorized(message),
            MealError::Forbidden(_) => WardMealsError::Forbidden(message),
            MealError::Conflict(_) => WardMealsError::Conflict(message),
            MealError::Validation(_) => WardMealsError::Validation(message),
            MealError::Storage(_) => WardMealsError::DatabaseError(message),
        }
    }
}

impl From<db::DbError> for WardMealsError {
    fn from(e: db::DbError) -> Self {
        WardMealsError::DatabaseError(e.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for WardMealsError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        WardMealsError::DatabaseError(format!("Lock poisoned: {}", e))
    }
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Open or create a database at the given path.
#[uniffi::export]
pub fn open_database(path: String) -> Result<Arc<WardMealsCore>, WardMealsError> {
    let db = Database::open(&path)?;
    Ok(WardMealsCore::wrap(db))
}

/// Create an in-memory database (for testing).
#[uniffi::export]
pub fn open_database_in_memory() -> Result<Arc<WardMealsCore>, WardMealsError> {
    let db = Database::open_in_memory()?;
    Ok(WardMealsCore::wrap(db))
}

/// Open the database named by `WARD_MEALS_DB_PATH`.
#[uniffi::export]
pub fn open_database_from_env() -> Result<Arc<WardMealsCore>, WardMealsError> {
    let db = CoreConfig::from_env().open_database()?;
    Ok(WardMealsCore::wrap(db))
}

/// Install the log subscriber using `WARD_MEALS_LOG`. False if one was
/// already installed.
#[uniffi::export]
pub fn init_logging() -> bool {
    config::init_logging(&CoreConfig::from_env().log_filter)
}

// =========================================================================
// Main API Object
// =========================================================================

/// Thread-safe database wrapper for FFI.
#[derive(uniffi::Object)]
pub struct WardMealsCore {
    db: Arc<Mutex<Database>>,
}

impl WardMealsCore {
    fn wrap(db: Database) -> Arc<Self> {
        Arc::new(Self {
            db: Arc::new(Mutex::new(db)),
        })
    }
}

#[uniffi::export]
impl WardMealsCore {
    // =========================================================================
    // Staff Operations
    // =========================================================================

    /// Sign up a staff member.
    pub fn register_staff(&self, user: FfiNewUser) -> Result<FfiUser, WardMealsError> {
        let db = self.db.lock()?;
        let input = NewUser::try_from(user)?;
        let user = StaffDirectory::new(&*db).register(input)?;
        Ok(user.into())
    }

    pub fn get_staff(&self, caller: FfiCaller, user_id: String) -> Result<FfiUser, WardMealsError> {
        let db = self.db.lock()?;
        let user = StaffDirectory::new(&*db).get(&Caller::try_from(caller)?, &user_id)?;
        Ok(user.into())
    }

    /// Staff with the given role, by name.
    pub fn staff_by_role(
        &self,
        caller: FfiCaller,
        role: String,
    ) -> Result<Vec<FfiUser>, WardMealsError> {
        let db = self.db.lock()?;
        let role = parse_field(&role, "role", Role::parse)?;
        let users = StaffDirectory::new(&*db).staff_by_role(&Caller::try_from(caller)?, role)?;
        Ok(users.into_iter().map(|u| u.into()).collect())
    }

    /// Give a staff member a task on a diet (pantry only).
    pub fn assign_staff_task(
        &self,
        caller: FfiCaller,
        staff_id: String,
        task_type: String,
        diet_id: String,
    ) -> Result<FfiUser, WardMealsError> {
        let db = self.db.lock()?;
        let user = StaffDirectory::new(&*db).assign_task(
            &Caller::try_from(caller)?,
            &staff_id,
            &task_type,
            &diet_id,
        )?;
        Ok(user.into())
    }

    // =========================================================================
    // Patient Operations
    // =========================================================================

    /// Admit a new patient.
    pub fn admit_patient(
        &self,
        caller: FfiCaller,
        patient: FfiNewPatient,
    ) -> Result<FfiPatient, WardMealsError> {
        let db = self.db.lock()?;
        let patient = PatientRegistry::new(&*db).admit(&Caller::try_from(caller)?, patient.into())?;
        Ok(patient.into())
    }

    pub fn update_patient(
        &self,
        caller: FfiCaller,
        patient_id: String,
        patient: FfiNewPatient,
    ) -> Result<FfiPatient, WardMealsError> {
        let db = self.db.lock()?;
        let patient =
            PatientRegistry::new(&*db).update(&Caller::try_from(caller)?, &patient_id, patient.into())?;
        Ok(patient.into())
    }

    pub fn get_patient(
        &self,
        caller: FfiCaller,
        patient_id: String,
    ) -> Result<FfiPatient, WardMealsError> {
        let db = self.db.lock()?;
        let patient = PatientRegistry::new(&*db).get(&Caller::try_from(caller)?, &patient_id)?;
        Ok(patient.into())
    }

    /// Active patients in ward order.
    pub fn active_patients(&self, caller: FfiCaller) -> Result<Vec<FfiPatient>, WardMealsError> {
        let db = self.db.lock()?;
        let patients = PatientRegistry::new(&*db).active_patients(&Caller::try_from(caller)?)?;
        Ok(patients.into_iter().map(|p| p.into()).collect())
    }

    pub fn discharge_patient(
        &self,
        caller: FfiCaller,
        patient_id: String,
    ) -> Result<FfiPatient, WardMealsError> {
        let db = self.db.lock()?;
        let patient = PatientRegistry::new(&*db).discharge(&Caller::try_from(caller)?, &patient_id)?;
        Ok(patient.into())
    }

    // =========================================================================
    // Diet Operations
    // =========================================================================

    /// Create a diet plan; every slot starts pending.
    pub fn create_diet(&self, caller: FfiCaller, diet: FfiNewDiet) -> Result<FfiDiet, WardMealsError> {
        let db = self.db.lock()?;
        let input = NewDiet::try_from(diet)?;
        let diet = DietTracker::new(&*db).create_diet(&Caller::try_from(caller)?, input)?;
        Ok(diet.into())
    }

    pub fn update_meal_status(
        &self,
        caller: FfiCaller,
        diet_id: String,
        meal_time: String,
        status: String,
    ) -> Result<FfiDiet, WardMealsError> {
        let db = self.db.lock()?;
        let meal_time = parse_field(&meal_time, "meal time", MealTime::parse)?;
        let status = parse_field(&status, "meal status", MealStatus::parse)?;
        let diet = DietTracker::new(&*db).update_meal_status(
            &Caller::try_from(caller)?,
            &diet_id,
            meal_time,
            status,
        )?;
        Ok(diet.into())
    }

    pub fn update_meal_items(
        &self,
        caller: FfiCaller,
        diet_id: String,
        meal_time: String,
        items: Vec<FfiMealItem>,
    ) -> Result<FfiDiet, WardMealsError> {
        let db = self.db.lock()?;
        let meal_time = parse_field(&meal_time, "meal time", MealTime::parse)?;
        let items = items.into_iter().map(|i| i.into()).collect();
        let diet = DietTracker::new(&*db).update_meal_items(
            &Caller::try_from(caller)?,
            &diet_id,
            meal_time,
            items,
        )?;
        Ok(diet.into())
    }

    /// A patient's diets, newest first.
    pub fn diets_for_patient(
        &self,
        caller: FfiCaller,
        patient_id: String,
    ) -> Result<Vec<FfiDiet>, WardMealsError> {
        let db = self.db.lock()?;
        let diets = DietTracker::new(&*db).diets_for_patient(&Caller::try_from(caller)?, &patient_id)?;
        Ok(diets.into_iter().map(|d| d.into()).collect())
    }

    /// The pantry board.
    pub fn meal_preparations(
        &self,
        caller: FfiCaller,
    ) -> Result<Vec<FfiMealPreparation>, WardMealsError> {
        let db = self.db.lock()?;
        let boards = DietTracker::new(&*db).meal_preparations(&Caller::try_from(caller)?)?;
        Ok(boards.into_iter().map(|p| p.into()).collect())
    }

    pub fn meal_preparation(
        &self,
        caller: FfiCaller,
        diet_id: String,
    ) -> Result<FfiMealPreparation, WardMealsError> {
        let db = self.db.lock()?;
        let prep = DietTracker::new(&*db).meal_preparation(&Caller::try_from(caller)?, &diet_id)?;
        Ok(prep.into())
    }

    // =========================================================================
    // Delivery Operations
    // =========================================================================

    /// Hand a meal slot to a courier.
    pub fn assign_delivery(
        &self,
        caller: FfiCaller,
        diet_id: String,
        meal_time: String,
        assignee_id: String,
    ) -> Result<FfiDelivery, WardMealsError> {
        let db = self.db.lock()?;
        let meal_time = parse_field(&meal_time, "meal time", MealTime::parse)?;
        let delivery = DeliveryTracker::new(&*db).assign_delivery(
            &Caller::try_from(caller)?,
            &diet_id,
            meal_time,
            &assignee_id,
        )?;
        Ok(delivery.into())
    }

    pub fn update_delivery_status(
        &self,
        caller: FfiCaller,
        delivery_id: String,
        status: String,
        notes: Option<String>,
    ) -> Result<FfiDelivery, WardMealsError> {
        let db = self.db.lock()?;
        let status = parse_field(&status, "delivery status", DeliveryStatus::parse)?;
        let delivery = DeliveryTracker::new(&*db).update_delivery_status(
            &Caller::try_from(caller)?,
            &delivery_id,
            status,
            notes,
        )?;
        Ok(delivery.into())
    }

    /// The caller's open deliveries in serving order.
    pub fn assignments(
        &self,
        caller: FfiCaller,
    ) -> Result<Vec<FfiDeliveryAssignment>, WardMealsError> {
        let db = self.db.lock()?;
        let list = DeliveryTracker::new(&*db).assignments_for(&Caller::try_from(caller)?)?;
        Ok(list.into_iter().map(|a| a.into()).collect())
    }

    pub fn current_delivery(
        &self,
        caller: FfiCaller,
    ) -> Result<FfiDeliveryAssignment, WardMealsError> {
        let db = self.db.lock()?;
        let current = DeliveryTracker::new(&*db).current_delivery(&Caller::try_from(caller)?)?;
        Ok(current.into())
    }

    /// Every delivery with patient location and courier.
    pub fn all_deliveries(
        &self,
        caller: FfiCaller,
    ) -> Result<Vec<FfiDeliveryOverview>, WardMealsError> {
        let db = self.db.lock()?;
        let deliveries = DeliveryTracker::new(&*db).all_deliveries(&Caller::try_from(caller)?)?;
        Ok(deliveries.into_iter().map(|d| d.into()).collect())
    }

    /// Completed deliveries of the caller. Bounds are RFC 3339 timestamps.
    pub fn delivery_history(
        &self,
        caller: FfiCaller,
        from: Option<String>,
        to: Option<String>,
    ) -> Result<FfiDeliveryHistory, WardMealsError> {
        let db = self.db.lock()?;
        let from = from.as_deref().map(parse_instant).transpose()?;
        let to = to.as_deref().map(parse_instant).transpose()?;
        let history = DeliveryTracker::new(&*db).delivery_history(&Caller::try_from(caller)?, from, to)?;
        Ok(history.into())
    }

    // =========================================================================
    // Dashboards
    // =========================================================================

    pub fn manager_dashboard(&self, caller: FfiCaller) -> Result<FfiManagerStats, WardMealsError> {
        let db = self.db.lock()?;
        let stats = StatsEngine::new(&*db).manager_dashboard_now(&Caller::try_from(caller)?)?;
        Ok(stats.into())
    }

    pub fn pantry_dashboard(&self, caller: FfiCaller) -> Result<FfiPantryStats, WardMealsError> {
        let db = self.db.lock()?;
        let stats = StatsEngine::new(&*db).pantry_dashboard_now(&Caller::try_from(caller)?)?;
        Ok(stats.into())
    }

    /// Manager dashboard for the UTC day containing `at` (RFC 3339).
    pub fn manager_dashboard_at(
        &self,
        caller: FfiCaller,
        at: String,
    ) -> Result<FfiManagerStats, WardMealsError> {
        let at = parse_instant(&at)?;
        let db = self.db.lock()?;
        let stats = StatsEngine::new(&*db).manager_dashboard(&Caller::try_from(caller)?, at)?;
        Ok(stats.into())
    }

    /// Pantry dashboard for the UTC day containing `at` (RFC 3339).
    pub fn pantry_dashboard_at(
        &self,
        caller: FfiCaller,
        at: String,
    ) -> Result<FfiPantryStats, WardMealsError> {
        let at = parse_instant(&at)?;
        let db = self.db.lock()?;
        let stats = StatsEngine::new(&*db).pantry_dashboard(&Caller::try_from(caller)?, at)?;
        Ok(stats.into())
    }
}

// =========================================================================
// Parsing helpers
// =========================================================================

fn parse_field<T>(
    value: &str,
    field: &str,
    parse: fn(&str) -> Option<T>,
) -> Result<T, WardMealsError> {
    parse(value).ok_or_else(|| WardMealsError::InvalidInput(format!("unknown {}: {}", field, value)))
}

fn parse_date(value: &str) -> Result<NaiveDate, WardMealsError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| WardMealsError::InvalidInput(format!("invalid date {}: {}", value, e)))
}

fn parse_instant(value: &str) -> Result<DateTime<Utc>, WardMealsError> {
    DateTime::parse_from_rfc3339(value)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| WardMealsError::InvalidInput(format!("invalid timestamp {}: {}", value, e)))
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe caller identity.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiCaller {
    pub user_id: String,
    pub role: String,
}

impl TryFrom<FfiCaller> for Caller {
    type Error = WardMealsError;

    fn try_from(caller: FfiCaller) -> Result<Self, Self::Error> {
        let role = parse_field(&caller.role, "role", Role::parse)?;
        Ok(Caller::new(caller.user_id, role))
    }
}

/// FFI-safe staff account.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiUser {
    pub user_id: String,
    pub email: String,
    pub name: String,
    pub contact: String,
    pub role: String,
    pub created_at: String,
    pub current_task: Option<FfiStaffTask>,
}

impl From<User> for FfiUser {
    fn from(user: User) -> Self {
        Self {
            user_id: user.user_id,
            email: user.email,
            name: user.name,
            contact: user.contact,
            role: user.role.as_str().to_string(),
            created_at: user.created_at,
            current_task: user.current_task.map(|t| t.into()),
        }
    }
}

/// FFI-safe staff task.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiStaffTask {
    pub task_type: String,
    pub diet_id: String,
    pub assigned_at: String,
}

impl From<StaffTask> for FfiStaffTask {
    fn from(task: StaffTask) -> Self {
        Self {
            task_type: task.task_type,
            diet_id: task.diet_id,
            assigned_at: task.assigned_at,
        }
    }
}

/// FFI-safe signup input.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiNewUser {
    pub email: String,
    pub name: String,
    pub contact: String,
    pub role: String,
}

impl TryFrom<FfiNewUser> for NewUser {
    type Error = WardMealsError;

    fn try_from(user: FfiNewUser) -> Result<Self, Self::Error> {
        Ok(NewUser {
            role: parse_field(&user.role, "role", Role::parse)?,
            email: user.email,
            name: user.name,
            contact: user.contact,
        })
    }
}

/// FFI-safe emergency contact.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiEmergencyContact {
    pub name: String,
    pub relation: String,
    pub contact: String,
}

/// FFI-safe patient.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPatient {
    pub patient_id: String,
    pub name: String,
    pub diseases: Vec<String>,
    pub allergies: Vec<String>,
    pub room_number: String,
    pub bed_number: String,
    pub floor_number: String,
    pub age: u32,
    pub gender: String,
    pub contact_info: String,
    pub emergency_contact: FfiEmergencyContact,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Patient> for FfiPatient {
    fn from(patient: Patient) -> Self {
        Self {
            patient_id: patient.patient_id,
            name: patient.name,
            diseases: patient.diseases,
            allergies: patient.allergies,
            room_number: patient.room_number,
            bed_number: patient.bed_number,
            floor_number: patient.floor_number,
            age: patient.age,
            gender: patient.gender,
            contact_info: patient.contact_info,
            emergency_contact: FfiEmergencyContact {
                name: patient.emergency_contact.name,
                relation: patient.emergency_contact.relation,
                contact: patient.emergency_contact.contact,
            },
            status: patient.status.as_str().to_string(),
            created_at: patient.created_at,
            updated_at: patient.updated_at,
        }
    }
}

/// FFI-safe admission input.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiNewPatient {
    pub name: String,
    pub diseases: Vec<String>,
    pub allergies: Vec<String>,
    pub room_number: String,
    pub bed_number: String,
    pub floor_number: String,
    pub age: u32,
    pub gender: String,
    pub contact_info: String,
    pub emergency_contact: FfiEmergencyContact,
}

impl From<FfiNewPatient> for NewPatient {
    fn from(p: FfiNewPatient) -> Self {
        NewPatient {
            name: p.name,
            diseases: p.diseases,
            allergies: p.allergies,
            room_number: p.room_number,
            bed_number: p.bed_number,
            floor_number: p.floor_number,
            age: p.age,
            gender: p.gender,
            contact_info: p.contact_info,
            emergency_contact: models::EmergencyContact {
                name: p.emergency_contact.name,
                relation: p.emergency_contact.relation,
                contact: p.emergency_contact.contact,
            },
        }
    }
}

/// FFI-safe meal item.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiMealItem {
    pub name: String,
    pub ingredients: Vec<String>,
    pub special_instructions: Vec<String>,
}

impl From<MealItem> for FfiMealItem {
    fn from(item: MealItem) -> Self {
        Self {
            name: item.name,
            ingredients: item.ingredients,
            special_instructions: item.special_instructions,
        }
    }
}

impl From<FfiMealItem> for MealItem {
    fn from(item: FfiMealItem) -> Self {
        MealItem {
            name: item.name,
            ingredients: item.ingredients,
            special_instructions: item.special_instructions,
        }
    }
}

/// FFI-safe meal slot.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiMeal {
    pub items: Vec<FfiMealItem>,
    pub status: String,
}

impl From<models::Meal> for FfiMeal {
    fn from(meal: models::Meal) -> Self {
        Self {
            items: meal.items.into_iter().map(|i| i.into()).collect(),
            status: meal.status.as_str().to_string(),
        }
    }
}

/// FFI-safe diet plan.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiDiet {
    pub diet_id: String,
    pub patient_id: String,
    /// `YYYY-MM-DD`
    pub date: String,
    pub morning: FfiMeal,
    pub evening: FfiMeal,
    pub night: FfiMeal,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Diet> for FfiDiet {
    fn from(diet: Diet) -> Self {
        Self {
            diet_id: diet.diet_id,
            patient_id: diet.patient_id,
            date: diet.date.format("%Y-%m-%d").to_string(),
            morning: diet.meals.morning.into(),
            evening: diet.meals.evening.into(),
            night: diet.meals.night.into(),
            created_at: diet.created_at,
            updated_at: diet.updated_at,
        }
    }
}

/// FFI-safe diet creation input.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiNewDiet {
    pub patient_id: String,
    /// `YYYY-MM-DD`
    pub date: String,
    pub morning: Vec<FfiMealItem>,
    pub evening: Vec<FfiMealItem>,
    pub night: Vec<FfiMealItem>,
}

impl TryFrom<FfiNewDiet> for NewDiet {
    type Error = WardMealsError;

    fn try_from(diet: FfiNewDiet) -> Result<Self, Self::Error> {
        let slot = |items: Vec<FfiMealItem>| {
            models::Meal::new(items.into_iter().map(|i| i.into()).collect())
        };
        Ok(NewDiet {
            date: parse_date(&diet.date)?,
            patient_id: diet.patient_id,
            meals: models::Meals {
                morning: slot(diet.morning),
                evening: slot(diet.evening),
                night: slot(diet.night),
            },
        })
    }
}

/// FFI-safe patient location.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPatientSummary {
    pub patient_id: String,
    pub name: String,
    pub room_number: String,
    pub bed_number: String,
    pub floor_number: String,
}

impl From<models::PatientSummary> for FfiPatientSummary {
    fn from(p: models::PatientSummary) -> Self {
        Self {
            patient_id: p.patient_id,
            name: p.name,
            room_number: p.room_number,
            bed_number: p.bed_number,
            floor_number: p.floor_number,
        }
    }
}

/// FFI-safe pantry board entry.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiMealPreparation {
    pub diet: FfiDiet,
    pub patient: FfiPatientSummary,
}

impl From<MealPreparation> for FfiMealPreparation {
    fn from(prep: MealPreparation) -> Self {
        Self {
            diet: prep.diet.into(),
            patient: prep.patient.into(),
        }
    }
}

/// FFI-safe delivery.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiDelivery {
    pub delivery_id: String,
    pub diet_id: String,
    pub meal_time: String,
    pub assigned_to: Option<String>,
    pub status: String,
    pub notes: Option<String>,
    pub created_at: String,
    pub delivered_at: Option<String>,
    pub updated_at: String,
}

impl From<Delivery> for FfiDelivery {
    fn from(d: Delivery) -> Self {
        Self {
            delivery_id: d.delivery_id,
            diet_id: d.diet_id,
            meal_time: d.meal_time.as_str().to_string(),
            assigned_to: d.assigned_to,
            status: d.status.as_str().to_string(),
            notes: d.notes,
            created_at: d.created_at,
            delivered_at: d.delivered_at,
            updated_at: d.updated_at,
        }
    }
}

/// FFI-safe courier assignment.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiDeliveryAssignment {
    pub delivery: FfiDelivery,
    pub diet_date: String,
    pub patient: FfiPatientSummary,
}

impl From<DeliveryAssignment> for FfiDeliveryAssignment {
    fn from(a: DeliveryAssignment) -> Self {
        Self {
            delivery: a.delivery.into(),
            diet_date: a.diet_date.format("%Y-%m-%d").to_string(),
            patient: a.patient.into(),
        }
    }
}

/// FFI-safe courier name and phone.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiStaffSummary {
    pub user_id: String,
    pub name: String,
    pub contact: String,
}

impl From<StaffSummary> for FfiStaffSummary {
    fn from(s: StaffSummary) -> Self {
        Self {
            user_id: s.user_id,
            name: s.name,
            contact: s.contact,
        }
    }
}

/// FFI-safe dispatch list entry.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiDeliveryOverview {
    pub delivery: FfiDelivery,
    pub diet_date: String,
    pub patient: FfiPatientSummary,
    pub assignee: Option<FfiStaffSummary>,
}

impl From<DeliveryOverview> for FfiDeliveryOverview {
    fn from(o: DeliveryOverview) -> Self {
        Self {
            delivery: o.delivery.into(),
            diet_date: o.diet_date.format("%Y-%m-%d").to_string(),
            patient: o.patient.into(),
            assignee: o.assignee.map(|a| a.into()),
        }
    }
}

/// FFI-safe courier history.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiDeliveryHistory {
    pub total_deliveries: u64,
    pub deliveries: Vec<FfiDeliveryAssignment>,
}

impl From<DeliveryHistory> for FfiDeliveryHistory {
    fn from(h: DeliveryHistory) -> Self {
        Self {
            total_deliveries: h.total_deliveries as u64,
            deliveries: h.deliveries.into_iter().map(|a| a.into()).collect(),
        }
    }
}

/// FFI-safe manager dashboard.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiManagerStats {
    pub total_active_patients: u64,
    pub today_deliveries: u64,
    pub pending_deliveries: u64,
    pub diet_plans_today: u64,
    pub meals_pending: u64,
    pub meals_preparing: u64,
    pub meals_delivered: u64,
}

impl From<ManagerStats> for FfiManagerStats {
    fn from(s: ManagerStats) -> Self {
        Self {
            total_active_patients: s.total_active_patients,
            today_deliveries: s.today_deliveries,
            pending_deliveries: s.pending_deliveries,
            diet_plans_today: s.diet_plans_today,
            meals_pending: s.meal_status_breakdown.pending,
            meals_preparing: s.meal_status_breakdown.preparing,
            meals_delivered: s.meal_status_breakdown.delivered,
        }
    }
}

/// FFI-safe pantry dashboard.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPantryStats {
    pub total_preparations: u64,
    pub pending_preparations: u64,
    pub completed_deliveries: u64,
    pub active_deliveries: u64,
    pub efficiency: f64,
}

impl From<PantryStats> for FfiPantryStats {
    fn from(s: PantryStats) -> Self {
        Self {
            total_preparations: s.total_preparations,
            pending_preparations: s.pending_preparations,
            completed_deliveries: s.completed_deliveries,
            active_deliveries: s.active_deliveries,
            efficiency: s.efficiency,
        }
    }
}
