//! Data-access traits, one per entity.
//!
//! Trackers and the stats engine only see these traits, so the SQLite
//! [`Database`](crate::db::Database) can be swapped or wrapped in tests.

use chrono::NaiveDate;

use crate::db::DbResult;
use crate::models::{
    Delivery, DeliveryStatus, Diet, MealStatus, MealTime, Patient, PatientStatus, Role,
    StaffTask, User,
};

/// Staff account storage.
pub trait UserStore {
    fn insert_user(&self, user: &User) -> DbResult<()>;
    fn get_user(&self, user_id: &str) -> DbResult<Option<User>>;
    fn get_user_by_email(&self, email: &str) -> DbResult<Option<User>>;
    /// Accounts with `role`, ordered by name.
    fn list_users_by_role(&self, role: Role) -> DbResult<Vec<User>>;
    /// Replace the user's current task. Returns false if no such user.
    fn set_current_task(&self, user_id: &str, task: &StaffTask) -> DbResult<bool>;
}

/// Patient storage.
pub trait PatientStore {
    fn insert_patient(&self, patient: &Patient) -> DbResult<()>;
    /// Returns false if no such patient.
    fn update_patient(&self, patient: &Patient) -> DbResult<bool>;
    fn get_patient(&self, patient_id: &str) -> DbResult<Option<Patient>>;
    /// Patients with `status`, ordered by floor and room (numerically where
    /// they are numbers), then bed.
    fn list_patients_by_status(&self, status: PatientStatus) -> DbResult<Vec<Patient>>;
    fn count_patients_by_status(&self, status: PatientStatus) -> DbResult<u64>;
}

/// Diet plan storage.
pub trait DietStore {
    fn insert_diet(&self, diet: &Diet) -> DbResult<()>;
    /// Replace items and statuses of every slot. Returns false if no such diet.
    fn update_diet(&self, diet: &Diet) -> DbResult<bool>;
    fn get_diet(&self, diet_id: &str) -> DbResult<Option<Diet>>;
    /// Single-slot status write. Returns false if no such diet.
    fn set_meal_status(&self, diet_id: &str, meal_time: MealTime, status: MealStatus)
        -> DbResult<bool>;
    /// Every diet of a patient, newest date first.
    fn list_diets_for_patient(&self, patient_id: &str) -> DbResult<Vec<Diet>>;
    /// Every diet, newest date first.
    fn list_diets(&self) -> DbResult<Vec<Diet>>;
    /// Diets dated exactly `date`.
    fn list_diets_on(&self, date: NaiveDate) -> DbResult<Vec<Diet>>;
    /// Diets dated `date` or later.
    fn count_diets_from(&self, date: NaiveDate) -> DbResult<u64>;
}

/// Delivery storage.
pub trait DeliveryStore {
    fn insert_delivery(&self, delivery: &Delivery) -> DbResult<()>;
    /// Persist status, notes and timestamps. Returns false if no such delivery.
    fn update_delivery(&self, delivery: &Delivery) -> DbResult<bool>;
    fn get_delivery(&self, delivery_id: &str) -> DbResult<Option<Delivery>>;
    fn delete_delivery(&self, delivery_id: &str) -> DbResult<bool>;
    /// Every delivery, most recently completed first, open ones last.
    fn list_deliveries(&self) -> DbResult<Vec<Delivery>>;
    /// Non-delivered deliveries assigned to `user_id`, in serving order.
    fn list_open_deliveries_for(&self, user_id: &str) -> DbResult<Vec<Delivery>>;
    /// Any one delivery of `user_id` in `status`.
    fn find_delivery_with_status_for(
        &self,
        user_id: &str,
        status: DeliveryStatus,
    ) -> DbResult<Option<Delivery>>;
    /// Delivered records of `user_id` completed within `[from, to]`, newest first.
    fn list_completed_deliveries_for(
        &self,
        user_id: &str,
        from: Option<&str>,
        to: Option<&str>,
    ) -> DbResult<Vec<Delivery>>;
    /// Deliveries completed at or after the `since` timestamp.
    fn count_delivered_since(&self, since: &str) -> DbResult<u64>;
    /// Deliveries whose status is one of `statuses`.
    fn count_deliveries_by_status(&self, statuses: &[DeliveryStatus]) -> DbResult<u64>;
}

/// The assign-delivery write: new Delivery plus the diet slot moving to
/// `preparing`, applied as one unit.
pub trait AssignmentStore: DietStore + DeliveryStore {
    /// Returns false, with nothing written, if the diet does not exist.
    ///
    /// This provided version compensates: the delivery is inserted first and
    /// deleted again if the diet write fails. Stores with transactions
    /// should override it.
    fn record_assignment(&self, delivery: &Delivery) -> DbResult<bool> {
        self.insert_delivery(delivery)?;

        let outcome =
            self.set_meal_status(&delivery.diet_id, delivery.meal_time, MealStatus::Preparing);

        match outcome {
            Ok(true) => Ok(true),
            Ok(false) => {
                self.delete_delivery(&delivery.delivery_id)?;
                Ok(false)
            }
            Err(e) => {
                if let Err(undo) = self.delete_delivery(&delivery.delivery_id) {
                    tracing::error!(
                        delivery_id = %delivery.delivery_id,
                        error = %undo,
                        "Failed to roll back delivery after diet update failure"
                    );
                }
                Err(e)
            }
        }
    }
}
