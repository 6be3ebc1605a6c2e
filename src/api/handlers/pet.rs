use axum::{extract::{Path, State}, http::StatusCode, response::IntoResponse, Json};
use std::sync::Arc;

use tracing::info;

use crate::api::dtos::requests::{CreatePetRequest, UpdatePetRequest};
use crate::api::extractors::auth::AuthUser;
use crate::domain::models::pet::Pet;
use crate::domain::models::user::Role;
use crate::error::AppError;
use crate::state::AppState;

pub async fn create_pet(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Json(payload): Json<CreatePetRequest>,
) -> Result<impl IntoResponse, AppError> {
    let owner_id = match user.role {
        Role::Owner => user.id.clone(),
        Role::Admin => payload.owner_id
            .ok_or(AppError::Validation("owner_id required when registering as admin".into()))?,
        Role::Vet => return Err(AppError::Forbidden("Veterinarians cannot register pets".into())),
    };

    if payload.name.trim().is_empty() {
        return Err(AppError::Validation("Pet name is required".into()));
    }

    let pet = Pet::new(owner_id, payload.name, payload.species, payload.breed, payload.birth_date);
    let created = state.pet_repo.create(&pet).await?;

    info!("Pet registered: {} for owner {}", created.id, created.owner_id);
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn list_my_pets(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    if user.role != Role::Owner {
        return Err(AppError::Forbidden("Only pet owners have a pet list".into()));
    }

    let pets = state.pet_repo.list_by_owner(&user.id).await?;
    Ok(Json(pets))
}

pub async fn get_pet(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(pet_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let pet = state.pet_repo.find_by_id(&pet_id).await?
        .ok_or(AppError::NotFound("Pet not found".into()))?;

    // Vets see any pet record for clinical context; owners only their own.
    if user.role == Role::Owner && pet.owner_id != user.id {
        return Err(AppError::Forbidden("Not allowed to view this pet".into()));
    }

    Ok(Json(pet))
}

pub async fn update_pet(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(pet_id): Path<String>,
    Json(payload): Json<UpdatePetRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut pet = state.pet_repo.find_by_id(&pet_id).await?
        .ok_or(AppError::NotFound("Pet not found".into()))?;

    if user.role != Role::Admin && pet.owner_id != user.id {
        return Err(AppError::Forbidden("Not allowed to modify this pet".into()));
    }

    if let Some(val) = payload.name { pet.name = val; }
    if let Some(val) = payload.species { pet.species = val; }
    if let Some(val) = payload.breed { pet.breed = Some(val); }
    if let Some(val) = payload.birth_date { pet.birth_date = Some(val); }

    let updated = state.pet_repo.update(&pet).await?;
    info!("Pet updated: {}", updated.id);
    Ok(Json(updated))
}

pub async fn delete_pet(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(pet_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let pet = state.pet_repo.find_by_id(&pet_id).await?
        .ok_or(AppError::NotFound("Pet not found".into()))?;

    if user.role != Role::Admin && pet.owner_id != user.id {
        return Err(AppError::Forbidden("Not allowed to remove this pet".into()));
    }

    state.pet_repo.delete(&pet.owner_id, &pet.id).await?;
    info!("Pet removed: {}", pet_id);
    Ok(Json(serde_json::json!({ "status": "deleted" })))
}
