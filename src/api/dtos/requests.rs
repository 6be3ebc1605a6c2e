use chrono::NaiveDate;
use serde::Deserialize;

use crate::domain::models::appointment::AppointmentStatus;
use crate::domain::models::schedule::DayOfWeek;

#[derive(Deserialize)]
pub struct CreateVetRequest {
    pub username: String,
    pub password: String,
    pub full_name: String,
    pub specialty: String,
    pub email: String,
}

#[derive(Deserialize)]
pub struct UpdateVetRequest {
    pub full_name: Option<String>,
    pub specialty: Option<String>,
    pub email: Option<String>,
    pub active: Option<bool>,
}

#[derive(Deserialize)]
pub struct ScheduleEntryRequest {
    pub day_of_week: DayOfWeek,
    pub active: bool,
    pub work_start: String,
    pub work_end: String,
    pub break_start: Option<String>,
    pub break_end: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateScheduleRequest {
    pub entries: Vec<ScheduleEntryRequest>,
}

#[derive(Deserialize)]
pub struct CreatePetRequest {
    pub name: String,
    pub species: String,
    pub breed: Option<String>,
    pub birth_date: Option<NaiveDate>,
    /// Only honored for admins registering pets for walk-in clients.
    pub owner_id: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdatePetRequest {
    pub name: Option<String>,
    pub species: Option<String>,
    pub breed: Option<String>,
    pub birth_date: Option<NaiveDate>,
}

#[derive(Deserialize)]
pub struct CreateAppointmentRequest {
    pub vet_id: String,
    pub pet_id: String,
    pub date: String,
    pub time: String,
    pub duration_min: Option<i64>,
    pub reason: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateAppointmentStatusRequest {
    pub status: AppointmentStatus,
}
