//! Delivery assignment tracker.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::access::{Caller, DELIVERY, DISPATCH};
use crate::error::{MealError, MealResult};
use crate::models::{
    timestamp, Delivery, DeliveryAssignment, DeliveryOverview, DeliveryStatus, MealTime, Role,
    StaffSummary,
};
use crate::store::{AssignmentStore, PatientStore, UserStore};

use super::{require_diet, summary_for};

/// A courier's completed deliveries.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeliveryHistory {
    pub total_deliveries: usize,
    pub deliveries: Vec<DeliveryAssignment>,
}

/// Owns delivery records and their status transitions.
pub struct DeliveryTracker<'a, S> {
    store: &'a S,
}

impl<'a, S> DeliveryTracker<'a, S>
where
    S: UserStore + PatientStore + AssignmentStore,
{
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Hand a meal slot to a courier: creates an `assigned` Delivery and
    /// moves the slot to `preparing` in one unit.
    ///
    /// A second open delivery for the same slot is not prevented.
    pub fn assign_delivery(
        &self,
        caller: &Caller,
        diet_id: &str,
        meal_time: MealTime,
        assignee_id: &str,
    ) -> MealResult<Delivery> {
        caller.require(DISPATCH)?;

        require_diet(self.store, diet_id)?;

        let assignee = self.store.get_user(assignee_id)?.ok_or_else(|| {
            tracing::error!(assignee_id, "Delivery personnel not found");
            MealError::not_found("User", assignee_id)
        })?;
        if assignee.role != Role::Delivery {
            return Err(MealError::Validation(format!(
                "user {} is not delivery staff",
                assignee_id
            )));
        }

        let delivery = Delivery::new(diet_id.to_string(), meal_time, Some(assignee.user_id));
        if !self.store.record_assignment(&delivery)? {
            return Err(MealError::not_found("Diet", diet_id));
        }

        tracing::info!(
            delivery_id = %delivery.delivery_id,
            diet_id,
            meal_time = %meal_time,
            assignee_id,
            "Assigned delivery"
        );
        Ok(delivery)
    }

    /// Courier progress update. Delivered records are frozen.
    ///
    /// Reaching `delivered` stamps `delivered_at`; the diet slot keeps
    /// whatever status it had.
    pub fn update_delivery_status(
        &self,
        caller: &Caller,
        delivery_id: &str,
        status: DeliveryStatus,
        notes: Option<String>,
    ) -> MealResult<Delivery> {
        caller.require(DELIVERY)?;

        let mut delivery = self
            .store
            .get_delivery(delivery_id)?
            .filter(|d| d.assigned_to.as_deref() == Some(caller.user_id.as_str()))
            .ok_or_else(|| {
                tracing::error!(delivery_id, user_id = %caller.user_id, "Delivery not found");
                MealError::not_found("Delivery", delivery_id)
            })?;

        if delivery.is_delivered() {
            tracing::warn!(delivery_id, "Attempted to update completed delivery");
            return Err(MealError::Conflict(format!(
                "delivery {} already completed",
                delivery_id
            )));
        }

        delivery.apply_status(status, notes, Utc::now());
        if !self.store.update_delivery(&delivery)? {
            return Err(MealError::not_found("Delivery", delivery_id));
        }

        tracing::info!(delivery_id, status = %status, user_id = %caller.user_id, "Delivery status updated");
        Ok(delivery)
    }

    /// The caller's open deliveries in serving order, with patient location.
    pub fn assignments_for(&self, caller: &Caller) -> MealResult<Vec<DeliveryAssignment>> {
        caller.require(DELIVERY)?;

        let assignments = self
            .store
            .list_open_deliveries_for(&caller.user_id)?
            .into_iter()
            .map(|d| self.resolve(d))
            .collect::<MealResult<Vec<_>>>()?;

        tracing::debug!(user_id = %caller.user_id, count = assignments.len(), "Retrieved assignments");
        Ok(assignments)
    }

    /// The caller's in-progress delivery. If several exist, any one of them.
    pub fn current_delivery(&self, caller: &Caller) -> MealResult<DeliveryAssignment> {
        caller.require(DELIVERY)?;

        let delivery = self
            .store
            .find_delivery_with_status_for(&caller.user_id, DeliveryStatus::InProgress)?
            .ok_or_else(|| {
                tracing::warn!(user_id = %caller.user_id, "No active delivery found");
                MealError::not_found("Delivery", format!("in-progress for {}", caller.user_id))
            })?;

        tracing::info!(delivery_id = %delivery.delivery_id, user_id = %caller.user_id, "Retrieved current delivery");
        self.resolve(delivery)
    }

    /// Every delivery, most recently completed first, with patient location
    /// and courier name and contact.
    pub fn all_deliveries(&self, caller: &Caller) -> MealResult<Vec<DeliveryOverview>> {
        caller.require(DISPATCH)?;

        let deliveries = self
            .store
            .list_deliveries()?
            .into_iter()
            .map(|d| self.overview(d))
            .collect::<MealResult<Vec<_>>>()?;

        tracing::info!(count = deliveries.len(), "Fetched all deliveries");
        Ok(deliveries)
    }

    /// The caller's delivered records, optionally limited to a completion
    /// window.
    pub fn delivery_history(
        &self,
        caller: &Caller,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> MealResult<DeliveryHistory> {
        caller.require(DELIVERY)?;

        if let (Some(from), Some(to)) = (from, to) {
            if from > to {
                return Err(MealError::Validation(
                    "history range start is after its end".into(),
                ));
            }
        }

        let from = from.map(timestamp);
        let to = to.map(timestamp);
        let deliveries = self
            .store
            .list_completed_deliveries_for(&caller.user_id, from.as_deref(), to.as_deref())?
            .into_iter()
            .map(|d| self.resolve(d))
            .collect::<MealResult<Vec<_>>>()?;

        tracing::info!(user_id = %caller.user_id, count = deliveries.len(), "Retrieved delivery history");
        Ok(DeliveryHistory {
            total_deliveries: deliveries.len(),
            deliveries,
        })
    }

    /// Attach the diet date and patient location.
    fn resolve(&self, delivery: Delivery) -> MealResult<DeliveryAssignment> {
        let diet = require_diet(self.store, &delivery.diet_id)?;
        let patient = summary_for(self.store, &diet)?;
        Ok(DeliveryAssignment {
            delivery,
            diet_date: diet.date,
            patient,
        })
    }

    fn overview(&self, delivery: Delivery) -> MealResult<DeliveryOverview> {
        let assignee = match delivery.assigned_to.as_deref() {
            Some(user_id) => self.store.get_user(user_id)?.as_ref().map(StaffSummary::from),
            None => None,
        };
        let DeliveryAssignment {
            delivery,
            diet_date,
            patient,
        } = self.resolve(delivery)?;
        Ok(DeliveryOverview {
            delivery,
            diet_date,
            patient,
            assignee,
        })
    }
}
