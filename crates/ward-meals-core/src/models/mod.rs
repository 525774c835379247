//! Domain models for the ward meals system.

mod delivery;
mod diet;
mod patient;
mod user;

pub use delivery::*;
pub use diet::*;
pub use patient::*;
pub use user::*;

use chrono::{DateTime, SecondsFormat, Utc};

/// Format a UTC instant the way every stored timestamp is written.
///
/// Fixed microsecond precision keeps lexicographic order equal to
/// chronological order, which the store relies on for range filters.
pub fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Current time as a stored timestamp.
pub fn now_timestamp() -> String {
    timestamp(Utc::now())
}
