//! Dashboard aggregation.
//!
//! Every figure is recomputed from the store on each call. The day starts
//! at 00:00 UTC of the `now` passed in.

mod manager;
mod pantry;

pub use manager::*;
pub use pantry::*;

use chrono::{DateTime, NaiveDate, Utc};

use crate::store::{DeliveryStore, DietStore, PatientStore};

/// Read-only dashboard queries over a store.
pub struct StatsEngine<'a, S> {
    store: &'a S,
}

impl<'a, S> StatsEngine<'a, S>
where
    S: PatientStore + DietStore + DeliveryStore,
{
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }
}

/// Midnight UTC of the day containing `now`.
pub fn day_start(now: DateTime<Utc>) -> DateTime<Utc> {
    now.date_naive().and_time(chrono::NaiveTime::MIN).and_utc()
}

/// Calendar day of `now` in UTC.
pub fn today(now: DateTime<Utc>) -> NaiveDate {
    now.date_naive()
}

/// Completed deliveries as a percentage of today's preparations.
///
/// Zero when nothing is planned.
pub fn efficiency(completed: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    completed as f64 * 100.0 / total as f64
}
