use axum::{extract::{Path, State}, response::IntoResponse, Json};
use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::api::dtos::requests::UpdateScheduleRequest;
use crate::api::extractors::auth::AuthUser;
use crate::domain::models::schedule::ScheduleEntry;
use crate::domain::models::user::Role;
use crate::error::AppError;
use crate::state::AppState;

pub async fn put_schedule(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(vet_id): Path<String>,
    Json(payload): Json<UpdateScheduleRequest>,
) -> Result<impl IntoResponse, AppError> {
    let vet = state.vet_repo.find_by_id(&vet_id).await?
        .ok_or(AppError::NotFound("Veterinarian not found".into()))?;

    if user.role != Role::Admin && vet.user_id != user.id {
        return Err(AppError::Forbidden("Not allowed to modify this schedule".into()));
    }

    let mut seen_days = HashSet::new();
    for entry in &payload.entries {
        if !seen_days.insert(entry.day_of_week) {
            return Err(AppError::Validation("At most one entry per weekday".into()));
        }
    }

    let entries: Vec<ScheduleEntry> = payload.entries.into_iter()
        .map(|e| ScheduleEntry {
            id: Uuid::new_v4().to_string(),
            vet_id: vet.id.clone(),
            day_of_week: e.day_of_week,
            active: e.active,
            work_start: e.work_start,
            work_end: e.work_end,
            break_start: e.break_start,
            break_end: e.break_end,
            created_at: Utc::now(),
        })
        .collect();

    let saved = state.schedule_repo.replace_for_vet(&vet.id, &entries).await?;
    info!("Schedule replaced for vet {}: {} entries", vet.id, saved.len());
    Ok(Json(saved))
}

pub async fn get_schedule(
    State(state): State<Arc<AppState>>,
    Path(vet_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let vet = state.vet_repo.find_by_id(&vet_id).await?
        .ok_or(AppError::NotFound("Veterinarian not found".into()))?;

    let entries = state.schedule_repo.list_for_vet(&vet.id).await?;
    Ok(Json(entries))
}
