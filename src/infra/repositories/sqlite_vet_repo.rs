use crate::domain::{models::vet::Veterinarian, ports::VetRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteVetRepo {
    pool: SqlitePool,
}

impl SqliteVetRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VetRepository for SqliteVetRepo {
    async fn create(&self, vet: &Veterinarian) -> Result<Veterinarian, AppError> {
        sqlx::query_as::<_, Veterinarian>(
            "INSERT INTO vets (id, user_id, full_name, specialty, email, active, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)
             RETURNING *"
        )
            .bind(&vet.id).bind(&vet.user_id).bind(&vet.full_name).bind(&vet.specialty)
            .bind(&vet.email).bind(vet.active).bind(vet.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Veterinarian>, AppError> {
        sqlx::query_as::<_, Veterinarian>("SELECT * FROM vets WHERE id = ?")
            .bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_user_id(&self, user_id: &str) -> Result<Option<Veterinarian>, AppError> {
        sqlx::query_as::<_, Veterinarian>("SELECT * FROM vets WHERE user_id = ?")
            .bind(user_id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn list(&self) -> Result<Vec<Veterinarian>, AppError> {
        sqlx::query_as::<_, Veterinarian>("SELECT * FROM vets ORDER BY full_name ASC")
            .fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn update(&self, vet: &Veterinarian) -> Result<Veterinarian, AppError> {
        sqlx::query_as::<_, Veterinarian>(
            "UPDATE vets SET full_name = ?, specialty = ?, email = ?, active = ?
             WHERE id = ?
             RETURNING *"
        )
            .bind(&vet.full_name).bind(&vet.specialty).bind(&vet.email).bind(vet.active)
            .bind(&vet.id)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }
}
