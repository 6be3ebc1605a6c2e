use chrono::{DateTime, NaiveDate, Utc};

use crate::domain::models::schedule::ScheduleEntry;
use crate::domain::models::slot::Slot;
use crate::domain::services::availability::has_availability;

/// Why a slot cannot be chosen. The two causes surface distinct user-facing
/// messages and must never be collapsed into one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotRejection {
    AlreadyBooked,
    InPast,
}

impl SlotRejection {
    pub fn message(self) -> &'static str {
        match self {
            SlotRejection::AlreadyBooked => "This time has already been booked",
            SlotRejection::InPast => "This time is in the past",
        }
    }
}

pub fn check_slot(slot: &Slot) -> Result<(), SlotRejection> {
    if slot.is_occupied {
        return Err(SlotRejection::AlreadyBooked);
    }
    if slot.is_past {
        return Err(SlotRejection::InPast);
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionError {
    DayNotBookable,
    NoDateSelected,
    Slot(SlotRejection),
}

/// Booking selection flow: `NoDateSelected -> DateSelected -> SlotChosen`.
/// Re-selecting a date clears any chosen slot; `clear` models month/date
/// navigation dropping the whole selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    NoDateSelected,
    DateSelected {
        date: NaiveDate,
    },
    SlotChosen {
        date: NaiveDate,
        start: DateTime<Utc>,
    },
}

impl Selection {
    pub fn select_date(
        self,
        date: NaiveDate,
        schedule: &[ScheduleEntry],
        today: NaiveDate,
    ) -> Result<Selection, SelectionError> {
        if date < today || !has_availability(date, schedule) {
            return Err(SelectionError::DayNotBookable);
        }
        Ok(Selection::DateSelected { date })
    }

    pub fn choose_slot(self, slot: &Slot) -> Result<Selection, SelectionError> {
        let date = match self {
            Selection::NoDateSelected => return Err(SelectionError::NoDateSelected),
            Selection::DateSelected { date } | Selection::SlotChosen { date, .. } => date,
        };

        check_slot(slot).map_err(SelectionError::Slot)?;

        Ok(Selection::SlotChosen {
            date,
            start: slot.start,
        })
    }

    pub fn clear(self) -> Selection {
        Selection::NoDateSelected
    }

    pub fn chosen_start(self) -> Option<DateTime<Utc>> {
        match self {
            Selection::SlotChosen { start, .. } => Some(start),
            _ => None,
        }
    }
}
