use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::models::appointment::{Appointment, AppointmentStatus};
use crate::domain::models::schedule::{DayOfWeek, ScheduleEntry};
use crate::domain::models::slot::Slot;

#[derive(Serialize)]
pub struct SlotsResponse {
    pub date: String,
    pub slots: Vec<Slot>,
}

/// Wire contract of the booking frontend: per-month calendar resource with
/// the configured weekly days and the occupied intervals. Field names are
/// the contract; everything behind this boundary uses the canonical records.
#[derive(Serialize)]
pub struct CalendarResponse {
    #[serde(rename = "jornadasConfiguradas")]
    pub configured_days: Vec<ConfiguredDay>,
    #[serde(rename = "ocupaciones")]
    pub occupations: Vec<OccupationDto>,
}

#[derive(Serialize)]
pub struct ConfiguredDay {
    #[serde(rename = "diaSemana")]
    pub day_of_week: DayOfWeek,
    #[serde(rename = "activa")]
    pub active: bool,
    #[serde(rename = "horaInicio")]
    pub work_start: String,
    #[serde(rename = "horaFin")]
    pub work_end: String,
    #[serde(rename = "inicioDescanso", skip_serializing_if = "Option::is_none")]
    pub break_start: Option<String>,
    #[serde(rename = "finDescanso", skip_serializing_if = "Option::is_none")]
    pub break_end: Option<String>,
}

impl From<&ScheduleEntry> for ConfiguredDay {
    fn from(entry: &ScheduleEntry) -> Self {
        Self {
            day_of_week: entry.day_of_week,
            active: entry.active,
            work_start: entry.work_start.clone(),
            work_end: entry.work_end.clone(),
            break_start: entry.break_start.clone(),
            break_end: entry.break_end.clone(),
        }
    }
}

#[derive(Serialize)]
pub struct OccupationDto {
    #[serde(rename = "fechaInicio")]
    pub start: DateTime<Utc>,
    #[serde(rename = "fechaFin")]
    pub end: DateTime<Utc>,
}

impl From<&Appointment> for OccupationDto {
    fn from(appointment: &Appointment) -> Self {
        Self {
            start: appointment.start_time,
            end: appointment.end_time,
        }
    }
}

/// Appointment plus the display attributes of its status, so clients render
/// from one source instead of re-deriving labels and colors.
#[derive(Serialize)]
pub struct AppointmentView {
    #[serde(flatten)]
    pub appointment: Appointment,
    pub status_label: &'static str,
    pub status_color: &'static str,
}

impl From<Appointment> for AppointmentView {
    fn from(appointment: Appointment) -> Self {
        let status: AppointmentStatus = appointment.status;
        Self {
            appointment,
            status_label: status.label(),
            status_color: status.ui_color(),
        }
    }
}
