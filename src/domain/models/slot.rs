use chrono::{DateTime, Utc};
use serde::Serialize;

/// An already-booked interval that blocks overlapping bookings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occupation {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// A bookable window derived from a vet's schedule. Never persisted;
/// recomputed on every request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Slot {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub is_occupied: bool,
    pub is_past: bool,
}
