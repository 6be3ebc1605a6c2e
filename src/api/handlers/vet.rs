use axum::{extract::{Path, State}, http::StatusCode, response::IntoResponse, Json};
use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::api::dtos::requests::{CreateVetRequest, UpdateVetRequest};
use crate::api::extractors::auth::AuthUser;
use crate::domain::models::user::{Role, User};
use crate::domain::models::vet::Veterinarian;
use crate::domain::services::auth_service::AuthService;
use crate::error::AppError;
use crate::state::AppState;

pub async fn create_vet(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Json(payload): Json<CreateVetRequest>,
) -> Result<impl IntoResponse, AppError> {
    if user.role != Role::Admin {
        return Err(AppError::Forbidden("Admin access required".into()));
    }
    if payload.password.len() < 8 {
        return Err(AppError::Validation("Password must be at least 8 characters".into()));
    }

    let password_hash = AuthService::hash_password(&payload.password)?;
    let vet_user = User::new(payload.username, password_hash, payload.full_name.clone(), Role::Vet);
    let vet_user = state.user_repo.create(&vet_user).await?;

    let vet = Veterinarian {
        id: Uuid::new_v4().to_string(),
        user_id: vet_user.id,
        full_name: payload.full_name,
        specialty: payload.specialty,
        email: payload.email,
        active: true,
        created_at: Utc::now(),
    };

    let created = state.vet_repo.create(&vet).await?;
    info!("Veterinarian created: {}", created.id);

    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn list_vets(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let vets = state.vet_repo.list().await?;
    Ok(Json(vets))
}

pub async fn get_vet(
    State(state): State<Arc<AppState>>,
    Path(vet_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let vet = state.vet_repo.find_by_id(&vet_id).await?
        .ok_or(AppError::NotFound("Veterinarian not found".into()))?;
    Ok(Json(vet))
}

pub async fn update_vet(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(vet_id): Path<String>,
    Json(payload): Json<UpdateVetRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut vet = state.vet_repo.find_by_id(&vet_id).await?
        .ok_or(AppError::NotFound("Veterinarian not found".into()))?;

    if user.role != Role::Admin && vet.user_id != user.id {
        return Err(AppError::Forbidden("Not allowed to modify this veterinarian".into()));
    }

    if let Some(val) = payload.full_name { vet.full_name = val; }
    if let Some(val) = payload.specialty { vet.specialty = val; }
    if let Some(val) = payload.email { vet.email = val; }
    if let Some(val) = payload.active { vet.active = val; }

    let updated = state.vet_repo.update(&vet).await?;
    info!("Veterinarian updated: {}", updated.id);
    Ok(Json(updated))
}
