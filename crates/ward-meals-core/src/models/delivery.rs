//! Delivery records: hand-off of one prepared meal slot to the ward.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::diet::MealTime;
use super::patient::PatientSummary;
use super::user::StaffSummary;

/// Delivery progress. `Delivered` is terminal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum DeliveryStatus {
    Assigned,
    InProgress,
    Delivered,
}

impl DeliveryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryStatus::Assigned => "assigned",
            DeliveryStatus::InProgress => "in-progress",
            DeliveryStatus::Delivered => "delivered",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "assigned" => Some(DeliveryStatus::Assigned),
            "in-progress" => Some(DeliveryStatus::InProgress),
            "delivered" => Some(DeliveryStatus::Delivered),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, DeliveryStatus::Delivered)
    }
}

impl std::fmt::Display for DeliveryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Logistics record for one meal slot of one diet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Delivery {
    /// Local UUID
    pub delivery_id: String,
    /// Diet this delivery belongs to
    pub diet_id: String,
    /// Slot within the diet
    pub meal_time: MealTime,
    /// Delivery staff user ID
    pub assigned_to: Option<String>,
    pub status: DeliveryStatus,
    /// Free text from the courier
    pub notes: Option<String>,
    /// Creation timestamp
    pub created_at: String,
    /// Completion timestamp, set once on reaching `Delivered`
    pub delivered_at: Option<String>,
    /// Last update timestamp
    pub updated_at: String,
}

impl Delivery {
    /// A freshly assigned delivery.
    pub fn new(diet_id: String, meal_time: MealTime, assigned_to: Option<String>) -> Self {
        let now = super::now_timestamp();
        Self {
            delivery_id: uuid::Uuid::new_v4().to_string(),
            diet_id,
            meal_time,
            assigned_to,
            status: DeliveryStatus::Assigned,
            notes: None,
            created_at: now.clone(),
            delivered_at: None,
            updated_at: now,
        }
    }

    pub fn is_delivered(&self) -> bool {
        self.status.is_terminal()
    }

    /// Move to `status` at instant `at`. Supplied notes replace stored ones.
    ///
    /// Callers must reject terminal records first; this only records the
    /// transition.
    pub fn apply_status(&mut self, status: DeliveryStatus, notes: Option<String>, at: DateTime<Utc>) {
        let stamp = super::timestamp(at);
        self.status = status;
        if notes.is_some() {
            self.notes = notes;
        }
        if status == DeliveryStatus::Delivered {
            self.delivered_at = Some(stamp.clone());
        }
        self.updated_at = stamp;
    }
}

/// A delivery resolved to the patient it is going to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeliveryAssignment {
    pub delivery: Delivery,
    /// Day of the diet being delivered
    pub diet_date: NaiveDate,
    pub patient: PatientSummary,
}

/// Dispatch view of a delivery: where it goes and who carries it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeliveryOverview {
    pub delivery: Delivery,
    pub diet_date: NaiveDate,
    pub patient: PatientSummary,
    /// `None` when unassigned or the account no longer exists
    pub assignee: Option<StaffSummary>,
}
