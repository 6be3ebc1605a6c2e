use crate::domain::{models::vet::Veterinarian, ports::VetRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresVetRepo {
    pool: PgPool,
}

impl PostgresVetRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VetRepository for PostgresVetRepo {
    async fn create(&self, vet: &Veterinarian) -> Result<Veterinarian, AppError> {
        sqlx::query_as::<_, Veterinarian>(
            "INSERT INTO vets (id, user_id, full_name, specialty, email, active, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING *"
        )
            .bind(&vet.id).bind(&vet.user_id).bind(&vet.full_name).bind(&vet.specialty)
            .bind(&vet.email).bind(vet.active).bind(vet.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Veterinarian>, AppError> {
        sqlx::query_as::<_, Veterinarian>("SELECT * FROM vets WHERE id = $1")
            .bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_user_id(&self, user_id: &str) -> Result<Option<Veterinarian>, AppError> {
        sqlx::query_as::<_, Veterinarian>("SELECT * FROM vets WHERE user_id = $1")
            .bind(user_id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn list(&self) -> Result<Vec<Veterinarian>, AppError> {
        sqlx::query_as::<_, Veterinarian>("SELECT * FROM vets ORDER BY full_name ASC")
            .fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn update(&self, vet: &Veterinarian) -> Result<Veterinarian, AppError> {
        sqlx::query_as::<_, Veterinarian>(
            "UPDATE vets SET full_name = $1, specialty = $2, email = $3, active = $4
             WHERE id = $5
             RETURNING *"
        )
            .bind(&vet.full_name).bind(&vet.specialty).bind(&vet.email).bind(vet.active)
            .bind(&vet.id)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }
}
