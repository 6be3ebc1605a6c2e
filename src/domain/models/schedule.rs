use chrono::{DateTime, NaiveTime, Utc, Weekday};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(type_name = "TEXT", rename_all = "UPPERCASE")]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl From<Weekday> for DayOfWeek {
    fn from(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Mon => DayOfWeek::Monday,
            Weekday::Tue => DayOfWeek::Tuesday,
            Weekday::Wed => DayOfWeek::Wednesday,
            Weekday::Thu => DayOfWeek::Thursday,
            Weekday::Fri => DayOfWeek::Friday,
            Weekday::Sat => DayOfWeek::Saturday,
            Weekday::Sun => DayOfWeek::Sunday,
        }
    }
}

/// Wall-clock time parsed from "HH:mm" or "HH:mm:ss". Parsing never fails:
/// an unparsable or out-of-range component degrades to 0, so a malformed
/// string degrades to midnight instead of aborting slot generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TimeOfDay {
    pub hour: u32,
    pub minute: u32,
}

impl TimeOfDay {
    pub fn parse(raw: &str) -> Self {
        let mut parts = raw.splitn(3, ':');
        let hour = parts
            .next()
            .and_then(|p| p.trim().parse::<u32>().ok())
            .filter(|h| *h < 24)
            .unwrap_or(0);
        let minute = parts
            .next()
            .and_then(|p| p.trim().parse::<u32>().ok())
            .filter(|m| *m < 60)
            .unwrap_or(0);
        Self { hour, minute }
    }

    pub fn as_naive(self) -> NaiveTime {
        NaiveTime::from_hms_opt(self.hour, self.minute, 0).unwrap_or(NaiveTime::MIN)
    }
}

/// One weekly working-hours record. At most one entry per weekday per vet;
/// `active = false` means the day has no availability at all. Times are kept
/// as raw strings and parsed leniently where they are consumed.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct ScheduleEntry {
    pub id: String,
    pub vet_id: String,
    pub day_of_week: DayOfWeek,
    pub active: bool,
    pub work_start: String,
    pub work_end: String,
    pub break_start: Option<String>,
    pub break_end: Option<String>,
    pub created_at: DateTime<Utc>,
}
