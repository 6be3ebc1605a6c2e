use std::sync::Arc;

use crate::config::Config;
use crate::domain::ports::{
    AppointmentRepository, AuthRepository, PetRepository, ScheduleRepository, UserRepository,
    VetRepository,
};
use crate::domain::services::auth_service::AuthService;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub user_repo: Arc<dyn UserRepository>,
    pub auth_repo: Arc<dyn AuthRepository>,
    pub vet_repo: Arc<dyn VetRepository>,
    pub schedule_repo: Arc<dyn ScheduleRepository>,
    pub pet_repo: Arc<dyn PetRepository>,
    pub appointment_repo: Arc<dyn AppointmentRepository>,
    pub auth_service: Arc<AuthService>,
}
