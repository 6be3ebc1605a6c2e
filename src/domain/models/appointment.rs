use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "TEXT", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    InProgress,
    Completed,
    Cancelled,
}

impl AppointmentStatus {
    /// Single mapping from status to display label and UI color.
    pub fn label(self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "Pending",
            AppointmentStatus::Confirmed => "Confirmed",
            AppointmentStatus::InProgress => "In progress",
            AppointmentStatus::Completed => "Completed",
            AppointmentStatus::Cancelled => "Cancelled",
        }
    }

    pub fn ui_color(self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "#f59e0b",
            AppointmentStatus::Confirmed => "#16a34a",
            AppointmentStatus::InProgress => "#2563eb",
            AppointmentStatus::Completed => "#6b7280",
            AppointmentStatus::Cancelled => "#dc2626",
        }
    }

    /// Whether the appointment still occupies its interval on the calendar.
    pub fn blocks_calendar(self) -> bool {
        !matches!(self, AppointmentStatus::Cancelled)
    }
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Appointment {
    pub id: String,
    pub vet_id: String,
    pub pet_id: String,
    pub owner_id: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub reason: Option<String>,
    pub status: AppointmentStatus,
    pub created_at: DateTime<Utc>,
}

pub struct NewAppointmentParams {
    pub vet_id: String,
    pub pet_id: String,
    pub owner_id: String,
    pub start: DateTime<Utc>,
    pub duration_min: i64,
    pub reason: Option<String>,
}

impl Appointment {
    pub fn new(params: NewAppointmentParams) -> Self {
        let end_time = params.start + chrono::Duration::minutes(params.duration_min);

        Self {
            id: Uuid::new_v4().to_string(),
            vet_id: params.vet_id,
            pet_id: params.pet_id,
            owner_id: params.owner_id,
            start_time: params.start,
            end_time,
            reason: params.reason,
            status: AppointmentStatus::Pending,
            created_at: Utc::now(),
        }
    }
}
