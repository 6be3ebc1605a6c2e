pub mod postgres_appointment_repo;
pub mod postgres_auth_repo;
pub mod postgres_pet_repo;
pub mod postgres_schedule_repo;
pub mod postgres_user_repo;
pub mod postgres_vet_repo;
pub mod sqlite_appointment_repo;
pub mod sqlite_auth_repo;
pub mod sqlite_pet_repo;
pub mod sqlite_schedule_repo;
pub mod sqlite_user_repo;
pub mod sqlite_vet_repo;
