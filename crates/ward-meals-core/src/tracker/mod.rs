//! Meal lifecycle and delivery assignment state machines.
//!
//! ```text
//!   create_diet ──► [pending] ◄──► [preparing] ◄──► [delivered]     (pantry, unrestricted)
//!                        │
//!                 assign_delivery ──► slot forced to preparing
//!                        │
//!                        ▼
//!                   [assigned] ──► [in-progress] ──► [delivered]    (courier, terminal)
//! ```
//!
//! Completing a delivery does not touch the diet's slot status.

mod delivery;
mod diet;

pub use delivery::*;
pub use diet::*;

use crate::error::{MealError, MealResult};
use crate::models::{Diet, Patient, PatientSummary};
use crate::store::{DietStore, PatientStore};

/// Load a diet or fail with NotFound.
fn require_diet<S: DietStore + ?Sized>(store: &S, diet_id: &str) -> MealResult<Diet> {
    store
        .get_diet(diet_id)?
        .ok_or_else(|| MealError::not_found("Diet", diet_id))
}

/// Load a patient or fail with NotFound.
fn require_patient<S: PatientStore + ?Sized>(store: &S, patient_id: &str) -> MealResult<Patient> {
    store
        .get_patient(patient_id)?
        .ok_or_else(|| MealError::not_found("Patient", patient_id))
}

/// Room/bed lookup for a diet's patient.
fn summary_for<S: PatientStore + ?Sized>(store: &S, diet: &Diet) -> MealResult<PatientSummary> {
    let patient = require_patient(store, &diet.patient_id)?;
    Ok(PatientSummary::from(&patient))
}
