use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::access::{Caller, PANTRY};
use crate::error::MealResult;
use crate::models::{timestamp, DeliveryStatus};
use crate::store::{DeliveryStore, DietStore, PatientStore};

use super::{day_start, efficiency, today, StatsEngine};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PantryStats {
    /// Diets dated today.
    pub total_preparations: u64,
    /// Today's diets with at least one pending slot.
    pub pending_preparations: u64,
    pub completed_deliveries: u64,
    /// Assigned or in progress.
    pub active_deliveries: u64,
    pub efficiency: f64,
}

impl<'a, S> StatsEngine<'a, S>
where
    S: PatientStore + DietStore + DeliveryStore,
{
    pub fn pantry_dashboard(&self, caller: &Caller, now: DateTime<Utc>) -> MealResult<PantryStats> {
        caller.require(PANTRY)?;

        let diets = self.store.list_diets_on(today(now))?;
        let total_preparations = diets.len() as u64;
        let pending_preparations = diets.iter().filter(|d| d.has_pending_meal()).count() as u64;
        let completed_deliveries = self
            .store
            .count_delivered_since(&timestamp(day_start(now)))?;
        let active_deliveries = self
            .store
            .count_deliveries_by_status(&[DeliveryStatus::Assigned, DeliveryStatus::InProgress])?;

        tracing::info!(
            total_preparations,
            pending_preparations,
            completed_deliveries,
            active_deliveries,
            "Fetched pantry stats"
        );

        Ok(PantryStats {
            total_preparations,
            pending_preparations,
            completed_deliveries,
            active_deliveries,
            efficiency: efficiency(completed_deliveries, total_preparations),
        })
    }

    pub fn pantry_dashboard_now(&self, caller: &Caller) -> MealResult<PantryStats> {
        self.pantry_dashboard(caller, Utc::now())
    }
}
