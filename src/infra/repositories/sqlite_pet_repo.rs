use crate::domain::{models::pet::Pet, ports::PetRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqlitePetRepo {
    pool: SqlitePool,
}

impl SqlitePetRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PetRepository for SqlitePetRepo {
    async fn create(&self, pet: &Pet) -> Result<Pet, AppError> {
        sqlx::query_as::<_, Pet>(
            "INSERT INTO pets (id, owner_id, name, species, breed, birth_date, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)
             RETURNING *"
        )
            .bind(&pet.id).bind(&pet.owner_id).bind(&pet.name).bind(&pet.species)
            .bind(&pet.breed).bind(pet.birth_date).bind(pet.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Pet>, AppError> {
        sqlx::query_as::<_, Pet>("SELECT * FROM pets WHERE id = ?")
            .bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<Pet>, AppError> {
        sqlx::query_as::<_, Pet>("SELECT * FROM pets WHERE owner_id = ? ORDER BY name ASC")
            .bind(owner_id).fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn update(&self, pet: &Pet) -> Result<Pet, AppError> {
        sqlx::query_as::<_, Pet>(
            "UPDATE pets SET name = ?, species = ?, breed = ?, birth_date = ?
             WHERE id = ? AND owner_id = ?
             RETURNING *"
        )
            .bind(&pet.name).bind(&pet.species).bind(&pet.breed).bind(pet.birth_date)
            .bind(&pet.id).bind(&pet.owner_id)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn delete(&self, owner_id: &str, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM pets WHERE id = ? AND owner_id = ?")
            .bind(id).bind(owner_id).execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Pet not found".into()));
        }
        Ok(())
    }
}
