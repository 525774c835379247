//! Diet/meal state tracker.

use crate::access::{Caller, MANAGER, PANTRY};
use crate::error::{MealError, MealResult};
use crate::models::{Diet, MealItem, MealPreparation, MealStatus, MealTime, NewDiet};
use crate::store::{DietStore, PatientStore};

use super::{require_diet, require_patient, summary_for};

/// Owns diet creation and per-slot preparation status.
pub struct DietTracker<'a, S> {
    store: &'a S,
}

impl<'a, S> DietTracker<'a, S>
where
    S: PatientStore + DietStore,
{
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Create a day's plan for a patient. Every slot starts pending,
    /// whatever status the input carried. Patient status is not checked.
    pub fn create_diet(&self, caller: &Caller, input: NewDiet) -> MealResult<Diet> {
        caller.require(MANAGER)?;

        require_patient(self.store, &input.patient_id)?;

        let diet = Diet::new(input);
        self.store.insert_diet(&diet)?;

        tracing::info!(
            diet_id = %diet.diet_id,
            patient_id = %diet.patient_id,
            date = %diet.date,
            "Created diet plan"
        );
        Ok(diet)
    }

    /// Set one slot's status. Any transition is accepted, including
    /// moving a delivered slot back to pending.
    pub fn update_meal_status(
        &self,
        caller: &Caller,
        diet_id: &str,
        meal_time: MealTime,
        status: MealStatus,
    ) -> MealResult<Diet> {
        caller.require(PANTRY)?;

        if !self.store.set_meal_status(diet_id, meal_time, status)? {
            tracing::error!(diet_id, "Diet not found");
            return Err(MealError::not_found("Diet", diet_id));
        }

        tracing::info!(diet_id, meal_time = %meal_time, status = %status, "Updated meal status");
        require_diet(self.store, diet_id)
    }

    /// All plans for a patient, newest date first.
    pub fn diets_for_patient(&self, caller: &Caller, patient_id: &str) -> MealResult<Vec<Diet>> {
        caller.require(MANAGER)?;

        let diets = self.store.list_diets_for_patient(patient_id)?;
        tracing::debug!(patient_id, count = diets.len(), "Retrieved diets for patient");
        Ok(diets)
    }

    /// Replace the items of one slot, leaving its status alone.
    pub fn update_meal_items(
        &self,
        caller: &Caller,
        diet_id: &str,
        meal_time: MealTime,
        items: Vec<MealItem>,
    ) -> MealResult<Diet> {
        caller.require(MANAGER)?;

        let mut diet = require_diet(self.store, diet_id)?;
        diet.meals.get_mut(meal_time).items = items;
        diet.touch();

        if !self.store.update_diet(&diet)? {
            return Err(MealError::not_found("Diet", diet_id));
        }

        tracing::info!(diet_id, meal_time = %meal_time, "Updated meal items");
        Ok(diet)
    }

    /// Pantry board: every diet with where its patient is.
    pub fn meal_preparations(&self, caller: &Caller) -> MealResult<Vec<MealPreparation>> {
        caller.require(PANTRY)?;

        let preparations = self
            .store
            .list_diets()?
            .into_iter()
            .map(|diet| {
                let patient = summary_for(self.store, &diet)?;
                Ok(MealPreparation { diet, patient })
            })
            .collect::<MealResult<Vec<_>>>()?;

        tracing::info!(count = preparations.len(), "Fetched all meal preparations");
        Ok(preparations)
    }

    /// A single pantry board entry.
    pub fn meal_preparation(&self, caller: &Caller, diet_id: &str) -> MealResult<MealPreparation> {
        caller.require(PANTRY)?;

        let diet = require_diet(self.store, diet_id)?;
        let patient = summary_for(self.store, &diet)?;

        tracing::info!(diet_id, "Fetched meal preparation");
        Ok(MealPreparation { diet, patient })
    }
}
