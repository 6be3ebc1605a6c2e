use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;

use crate::domain::models::schedule::{DayOfWeek, ScheduleEntry, TimeOfDay};
use crate::domain::models::slot::{Occupation, Slot};

pub const DEFAULT_SLOT_MINUTES: i64 = 30;

/// Derives the bookable slots for one calendar day from a vet's weekly
/// schedule and the already-occupied intervals. Pure: `now` is injected,
/// and identical inputs always produce identical output.
pub fn generate_slots(
    date: NaiveDate,
    schedule: &[ScheduleEntry],
    occupations: &[Occupation],
    duration_min: i64,
    now: DateTime<Utc>,
    tz: Tz,
) -> Vec<Slot> {
    let duration_min = if duration_min <= 0 {
        DEFAULT_SLOT_MINUTES
    } else {
        duration_min
    };

    // A day without a configured, active entry has zero slots, never an error.
    let weekday = DayOfWeek::from(date.weekday());
    let Some(entry) = schedule.iter().find(|e| e.day_of_week == weekday && e.active) else {
        return Vec::new();
    };

    // Local times skipped by a DST transition resolve to the earliest valid
    // interpretation; an unresolvable day yields no slots.
    let to_utc = |t: TimeOfDay| {
        tz.from_local_datetime(&date.and_time(t.as_naive()))
            .earliest()
            .map(|dt| dt.with_timezone(&Utc))
    };

    let (Some(work_start), Some(work_end)) = (
        to_utc(TimeOfDay::parse(&entry.work_start)),
        to_utc(TimeOfDay::parse(&entry.work_end)),
    ) else {
        return Vec::new();
    };

    let break_window = match (&entry.break_start, &entry.break_end) {
        (Some(bs), Some(be)) => to_utc(TimeOfDay::parse(bs)).zip(to_utc(TimeOfDay::parse(be))),
        _ => None,
    };

    let step = Duration::minutes(duration_min);
    let mut slots = Vec::new();
    let mut cursor = work_start;

    while cursor + step <= work_end {
        let slot_end = cursor + step;

        // Only slots fully contained in the break are excluded; a slot
        // straddling the break boundary stays bookable.
        let in_break = break_window.is_some_and(|(bs, be)| cursor >= bs && slot_end <= be);

        if !in_break {
            let occupied = occupations
                .iter()
                .any(|occ| cursor < occ.end && slot_end > occ.start);

            slots.push(Slot {
                start: cursor,
                end: slot_end,
                is_occupied: occupied,
                is_past: cursor <= now,
            });
        }

        cursor += step;
    }

    slots
}

/// True iff an active schedule entry exists for the date's weekday. Must
/// agree with the entry lookup in `generate_slots` so a selectable day never
/// resolves to an unconfigured one.
pub fn has_availability(date: NaiveDate, schedule: &[ScheduleEntry]) -> bool {
    let weekday = DayOfWeek::from(date.weekday());
    schedule.iter().any(|e| e.day_of_week == weekday && e.active)
}
