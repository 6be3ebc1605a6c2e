use crate::domain::models::{
    appointment::{Appointment, AppointmentStatus},
    auth::RefreshTokenRecord,
    pet::Pet,
    schedule::ScheduleEntry,
    user::User,
    vet::Veterinarian,
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: &User) -> Result<User, AppError>;
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError>;
}

#[async_trait]
pub trait AuthRepository: Send + Sync {
    async fn create_refresh_token(&self, record: &RefreshTokenRecord) -> Result<(), AppError>;
    async fn find_refresh_token(&self, token_hash: &str) -> Result<Option<RefreshTokenRecord>, AppError>;
    async fn delete_refresh_token(&self, token_hash: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait VetRepository: Send + Sync {
    async fn create(&self, vet: &Veterinarian) -> Result<Veterinarian, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Veterinarian>, AppError>;
    async fn find_by_user_id(&self, user_id: &str) -> Result<Option<Veterinarian>, AppError>;
    async fn list(&self) -> Result<Vec<Veterinarian>, AppError>;
    async fn update(&self, vet: &Veterinarian) -> Result<Veterinarian, AppError>;
}

#[async_trait]
pub trait ScheduleRepository: Send + Sync {
    async fn replace_for_vet(&self, vet_id: &str, entries: &[ScheduleEntry]) -> Result<Vec<ScheduleEntry>, AppError>;
    async fn list_for_vet(&self, vet_id: &str) -> Result<Vec<ScheduleEntry>, AppError>;
}

#[async_trait]
pub trait PetRepository: Send + Sync {
    async fn create(&self, pet: &Pet) -> Result<Pet, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Pet>, AppError>;
    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<Pet>, AppError>;
    async fn update(&self, pet: &Pet) -> Result<Pet, AppError>;
    async fn delete(&self, owner_id: &str, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait AppointmentRepository: Send + Sync {
    async fn create(&self, appointment: &Appointment) -> Result<Appointment, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Appointment>, AppError>;
    /// Non-cancelled appointments overlapping `[start, end)` for one vet.
    async fn list_by_vet_range(&self, vet_id: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Vec<Appointment>, AppError>;
    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<Appointment>, AppError>;
    async fn list_by_vet(&self, vet_id: &str) -> Result<Vec<Appointment>, AppError>;
    async fn list_all(&self) -> Result<Vec<Appointment>, AppError>;
    async fn update_status(&self, id: &str, status: AppointmentStatus) -> Result<Appointment, AppError>;
}
