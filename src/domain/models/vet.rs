use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Veterinarian {
    pub id: String,
    pub user_id: String,
    pub full_name: String,
    pub specialty: String,
    pub email: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}
