use crate::domain::{models::pet::Pet, ports::PetRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresPetRepo {
    pool: PgPool,
}

impl PostgresPetRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PetRepository for PostgresPetRepo {
    async fn create(&self, pet: &Pet) -> Result<Pet, AppError> {
        sqlx::query_as::<_, Pet>(
            "INSERT INTO pets (id, owner_id, name, species, breed, birth_date, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING *"
        )
            .bind(&pet.id).bind(&pet.owner_id).bind(&pet.name).bind(&pet.species)
            .bind(&pet.breed).bind(pet.birth_date).bind(pet.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Pet>, AppError> {
        sqlx::query_as::<_, Pet>("SELECT * FROM pets WHERE id = $1")
            .bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<Pet>, AppError> {
        sqlx::query_as::<_, Pet>("SELECT * FROM pets WHERE owner_id = $1 ORDER BY name ASC")
            .bind(owner_id).fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn update(&self, pet: &Pet) -> Result<Pet, AppError> {
        sqlx::query_as::<_, Pet>(
            "UPDATE pets SET name = $1, species = $2, breed = $3, birth_date = $4
             WHERE id = $5 AND owner_id = $6
             RETURNING *"
        )
            .bind(&pet.name).bind(&pet.species).bind(&pet.breed).bind(pet.birth_date)
            .bind(&pet.id).bind(&pet.owner_id)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn delete(&self, owner_id: &str, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM pets WHERE id = $1 AND owner_id = $2")
            .bind(id).bind(owner_id).execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Pet not found".into()));
        }
        Ok(())
    }
}
