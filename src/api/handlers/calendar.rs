use axum::{extract::{Path, Query, State}, response::IntoResponse, Json};
use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;

use crate::api::dtos::responses::{CalendarResponse, ConfiguredDay, OccupationDto, SlotsResponse};
use crate::domain::models::slot::Occupation;
use crate::domain::services::availability::{generate_slots, has_availability, DEFAULT_SLOT_MINUTES};
use crate::error::AppError;
use crate::state::AppState;

fn parse_date(params: &HashMap<String, String>, key: &str) -> Result<NaiveDate, AppError> {
    let raw = params.get(key).ok_or_else(|| AppError::Validation(format!("{} required", key)))?;
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| AppError::Validation(format!("Invalid {} (expected YYYY-MM-DD)", key)))
}

pub(crate) fn day_bounds(date: NaiveDate, tz: Tz) -> Result<(DateTime<Utc>, DateTime<Utc>), AppError> {
    let start = date.and_hms_opt(0, 0, 0)
        .and_then(|dt| tz.from_local_datetime(&dt).earliest());
    let end = date.and_hms_opt(23, 59, 59)
        .and_then(|dt| tz.from_local_datetime(&dt).earliest());

    match (start, end) {
        (Some(s), Some(e)) => Ok((s.with_timezone(&Utc), e.with_timezone(&Utc))),
        _ => Err(AppError::Validation("Date not representable in clinic timezone".into())),
    }
}

/// The per-month calendar resource the booking frontend consumes: the vet's
/// configured weekly days plus every occupied interval in the range.
pub async fn get_calendar(
    State(state): State<Arc<AppState>>,
    Path(vet_id): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let vet = state.vet_repo.find_by_id(&vet_id).await?
        .ok_or(AppError::NotFound("Veterinarian not found".into()))?;

    let start_date = parse_date(&params, "start")?;
    let end_date = parse_date(&params, "end")?;

    let tz = state.config.timezone();
    let (range_start, _) = day_bounds(start_date, tz)?;
    let (_, range_end) = day_bounds(end_date, tz)?;

    let entries = state.schedule_repo.list_for_vet(&vet.id).await?;
    let appointments = state.appointment_repo
        .list_by_vet_range(&vet.id, range_start, range_end)
        .await?;

    Ok(Json(CalendarResponse {
        configured_days: entries.iter().map(ConfiguredDay::from).collect(),
        occupations: appointments.iter().map(OccupationDto::from).collect(),
    }))
}

/// Days in the range that a calendar UI may enable: an active schedule entry
/// exists for the weekday and the day is not already over.
pub async fn get_available_dates(
    State(state): State<Arc<AppState>>,
    Path(vet_id): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let vet = state.vet_repo.find_by_id(&vet_id).await?
        .ok_or(AppError::NotFound("Veterinarian not found".into()))?;

    let start_date = parse_date(&params, "start")?;
    let end_date = parse_date(&params, "end")?;

    let tz = state.config.timezone();
    let today = Utc::now().with_timezone(&tz).date_naive();
    let entries = state.schedule_repo.list_for_vet(&vet.id).await?;

    let mut available_dates = Vec::new();
    let mut current_date = start_date;

    while current_date <= end_date {
        if current_date >= today && has_availability(current_date, &entries) {
            available_dates.push(current_date.to_string());
        }
        current_date += Duration::days(1);
    }

    Ok(Json(available_dates))
}

pub async fn get_slots(
    State(state): State<Arc<AppState>>,
    Path(vet_id): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let vet = state.vet_repo.find_by_id(&vet_id).await?
        .ok_or(AppError::NotFound("Veterinarian not found".into()))?;

    let date = parse_date(&params, "date")?;

    let duration_min = match params.get("duration") {
        Some(raw) => raw.parse::<i64>()
            .map_err(|_| AppError::Validation("Invalid duration (expected minutes)".into()))?,
        None => DEFAULT_SLOT_MINUTES,
    };

    let tz = state.config.timezone();
    let (day_start, day_end) = day_bounds(date, tz)?;

    let entries = state.schedule_repo.list_for_vet(&vet.id).await?;
    let occupations: Vec<Occupation> = state.appointment_repo
        .list_by_vet_range(&vet.id, day_start, day_end)
        .await?
        .iter()
        .map(|a| Occupation { start: a.start_time, end: a.end_time })
        .collect();

    let slots = generate_slots(date, &entries, &occupations, duration_min, Utc::now(), tz);

    Ok(Json(SlotsResponse {
        date: date.to_string(),
        slots,
    }))
}
