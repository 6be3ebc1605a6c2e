use axum::{extract::{Path, State}, http::{header, StatusCode}, response::IntoResponse, Json};
use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
use tracing::{info, warn};

use crate::api::dtos::requests::{CreateAppointmentRequest, UpdateAppointmentStatusRequest};
use crate::api::dtos::responses::AppointmentView;
use crate::api::extractors::auth::AuthUser;
use crate::domain::models::appointment::{Appointment, AppointmentStatus, NewAppointmentParams};
use crate::domain::models::slot::Occupation;
use crate::domain::models::user::{Role, User};
use crate::domain::services::availability::{generate_slots, DEFAULT_SLOT_MINUTES};
use crate::domain::services::booking_flow::{check_slot, SlotRejection};
use crate::domain::services::calendar::generate_ics;
use crate::error::AppError;
use crate::state::AppState;

pub async fn create_appointment(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Json(payload): Json<CreateAppointmentRequest>,
) -> Result<impl IntoResponse, AppError> {
    if user.role == Role::Vet {
        return Err(AppError::Forbidden("Veterinarians cannot book appointments".into()));
    }

    let pet = state.pet_repo.find_by_id(&payload.pet_id).await?
        .ok_or(AppError::NotFound("Pet not found".into()))?;

    if user.role == Role::Owner && pet.owner_id != user.id {
        return Err(AppError::Forbidden("You can only book for your own pets".into()));
    }

    let vet = state.vet_repo.find_by_id(&payload.vet_id).await?
        .ok_or(AppError::NotFound("Veterinarian not found".into()))?;

    if !vet.active {
        return Err(AppError::Conflict("Veterinarian is not accepting appointments".into()));
    }

    let date = NaiveDate::parse_from_str(&payload.date, "%Y-%m-%d")
        .map_err(|_| AppError::Validation("Invalid date format".into()))?;
    let time = NaiveTime::parse_from_str(&payload.time, "%H:%M")
        .map_err(|_| AppError::Validation("Invalid time format (HH:MM)".into()))?;

    let tz = state.config.timezone();
    let start = tz.from_local_datetime(&date.and_time(time))
        .earliest()
        .ok_or(AppError::Validation("Requested local time does not exist".into()))?
        .with_timezone(&Utc);

    let duration_min = payload.duration_min.filter(|d| *d > 0).unwrap_or(DEFAULT_SLOT_MINUTES);

    info!("create_appointment: vet {} on {} at {}", vet.id, date, payload.time);

    let (day_start, day_end) = super::calendar::day_bounds(date, tz)?;
    let existing = state.appointment_repo
        .list_by_vet_range(&vet.id, day_start, day_end)
        .await?;
    let occupations: Vec<Occupation> = existing.iter()
        .map(|a| Occupation { start: a.start_time, end: a.end_time })
        .collect();

    let entries = state.schedule_repo.list_for_vet(&vet.id).await?;
    let slots = generate_slots(date, &entries, &occupations, duration_min, Utc::now(), tz);

    let Some(slot) = slots.iter().find(|s| s.start == start) else {
        return Err(AppError::Conflict("Selected time is not a bookable slot".into()));
    };

    if let Err(rejection) = check_slot(slot) {
        warn!("Appointment rejected for vet {}: {}", vet.id, rejection.message());
        return Err(match rejection {
            SlotRejection::AlreadyBooked => AppError::Conflict(rejection.message().into()),
            SlotRejection::InPast => AppError::Validation(rejection.message().into()),
        });
    }

    let appointment = Appointment::new(NewAppointmentParams {
        vet_id: vet.id.clone(),
        pet_id: pet.id,
        owner_id: pet.owner_id,
        start,
        duration_min,
        reason: payload.reason,
    });

    let created = state.appointment_repo.create(&appointment).await?;
    info!("Appointment booked: {} with vet {}", created.id, vet.id);

    Ok((StatusCode::CREATED, Json(AppointmentView::from(created))))
}

pub async fn list_appointments(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let appointments = match user.role {
        Role::Admin => state.appointment_repo.list_all().await?,
        Role::Owner => state.appointment_repo.list_by_owner(&user.id).await?,
        Role::Vet => {
            let vet = state.vet_repo.find_by_user_id(&user.id).await?
                .ok_or(AppError::NotFound("Veterinarian profile not found".into()))?;
            state.appointment_repo.list_by_vet(&vet.id).await?
        }
    };

    let views: Vec<AppointmentView> = appointments.into_iter().map(AppointmentView::from).collect();
    Ok(Json(views))
}

pub async fn get_appointment(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(appointment_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let appointment = find_authorized(&state, &user, &appointment_id).await?;
    Ok(Json(AppointmentView::from(appointment)))
}

pub async fn update_status(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(appointment_id): Path<String>,
    Json(payload): Json<UpdateAppointmentStatusRequest>,
) -> Result<impl IntoResponse, AppError> {
    let appointment = state.appointment_repo.find_by_id(&appointment_id).await?
        .ok_or(AppError::NotFound("Appointment not found".into()))?;

    let is_assigned_vet = match user.role {
        Role::Vet => {
            let vet = state.vet_repo.find_by_user_id(&user.id).await?
                .ok_or(AppError::NotFound("Veterinarian profile not found".into()))?;
            vet.id == appointment.vet_id
        }
        _ => false,
    };

    if user.role != Role::Admin && !is_assigned_vet {
        return Err(AppError::Forbidden("Only the assigned veterinarian or an admin can change the status".into()));
    }

    let updated = state.appointment_repo.update_status(&appointment.id, payload.status).await?;
    info!("Appointment {} status changed to {}", updated.id, updated.status.label());
    Ok(Json(AppointmentView::from(updated)))
}

pub async fn cancel_appointment(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(appointment_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let appointment = state.appointment_repo.find_by_id(&appointment_id).await?
        .ok_or(AppError::NotFound("Appointment not found".into()))?;

    if user.role != Role::Admin && appointment.owner_id != user.id {
        return Err(AppError::Forbidden("Only the owner or an admin can cancel".into()));
    }

    if appointment.status == AppointmentStatus::Cancelled {
        return Err(AppError::Conflict("Appointment is already cancelled".into()));
    }

    let cancelled = state.appointment_repo
        .update_status(&appointment.id, AppointmentStatus::Cancelled)
        .await?;
    info!("Appointment cancelled: {}", cancelled.id);
    Ok(Json(AppointmentView::from(cancelled)))
}

pub async fn get_appointment_ics(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(appointment_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let appointment = find_authorized(&state, &user, &appointment_id).await?;

    let vet = state.vet_repo.find_by_id(&appointment.vet_id).await?
        .ok_or(AppError::NotFound("Veterinarian not found".into()))?;
    let pet = state.pet_repo.find_by_id(&appointment.pet_id).await?
        .ok_or(AppError::NotFound("Pet not found".into()))?;

    let ics = generate_ics(&vet, &pet, &appointment);

    Ok(([(header::CONTENT_TYPE, "text/calendar; charset=utf-8")], ics))
}

async fn find_authorized(
    state: &AppState,
    user: &User,
    appointment_id: &str,
) -> Result<Appointment, AppError> {
    let appointment = state.appointment_repo.find_by_id(appointment_id).await?
        .ok_or(AppError::NotFound("Appointment not found".into()))?;

    let allowed = match user.role {
        Role::Admin => true,
        Role::Owner => appointment.owner_id == user.id,
        Role::Vet => {
            let vet = state.vet_repo.find_by_user_id(&user.id).await?;
            vet.is_some_and(|v| v.id == appointment.vet_id)
        }
    };

    if !allowed {
        return Err(AppError::Forbidden("Not allowed to view this appointment".into()));
    }

    Ok(appointment)
}
