use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::access::{Caller, MANAGER};
use crate::error::MealResult;
use crate::models::{timestamp, DeliveryStatus, MealStatus, PatientStatus};
use crate::store::{DeliveryStore, DietStore, PatientStore};

use super::{day_start, today, StatsEngine};

/// Slot statuses summed over all three meal times of today's diets.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MealStatusCounts {
    pub pending: u64,
    pub preparing: u64,
    pub delivered: u64,
}

impl MealStatusCounts {
    fn record(&mut self, status: MealStatus) {
        match status {
            MealStatus::Pending => self.pending += 1,
            MealStatus::Preparing => self.preparing += 1,
            MealStatus::Delivered => self.delivered += 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ManagerStats {
    pub total_active_patients: u64,
    /// Deliveries completed since the start of the day.
    pub today_deliveries: u64,
    /// Deliveries not yet delivered, of any date.
    pub pending_deliveries: u64,
    /// Diets dated today or later.
    pub diet_plans_today: u64,
    pub meal_status_breakdown: MealStatusCounts,
}

impl<'a, S> StatsEngine<'a, S>
where
    S: PatientStore + DietStore + DeliveryStore,
{
    pub fn manager_dashboard(&self, caller: &Caller, now: DateTime<Utc>) -> MealResult<ManagerStats> {
        caller.require(MANAGER)?;

        let date = today(now);
        let since = timestamp(day_start(now));

        let total_active_patients = self.store.count_patients_by_status(PatientStatus::Active)?;
        let today_deliveries = self.store.count_delivered_since(&since)?;
        let pending_deliveries = self
            .store
            .count_deliveries_by_status(&[DeliveryStatus::Assigned, DeliveryStatus::InProgress])?;
        let diet_plans_today = self.store.count_diets_from(date)?;

        let mut breakdown = MealStatusCounts::default();
        for diet in self.store.list_diets_on(date)? {
            for (_, meal) in diet.meals.iter() {
                breakdown.record(meal.status);
            }
        }

        tracing::info!(
            total_active_patients,
            today_deliveries,
            pending_deliveries,
            diet_plans_today,
            "Dashboard stats retrieved"
        );

        Ok(ManagerStats {
            total_active_patients,
            today_deliveries,
            pending_deliveries,
            diet_plans_today,
            meal_status_breakdown: breakdown,
        })
    }

    pub fn manager_dashboard_now(&self, caller: &Caller) -> MealResult<ManagerStats> {
        self.manager_dashboard(caller, Utc::now())
    }
}
