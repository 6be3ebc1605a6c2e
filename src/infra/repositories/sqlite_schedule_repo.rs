use crate::domain::{models::schedule::ScheduleEntry, ports::ScheduleRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteScheduleRepo {
    pool: SqlitePool,
}

impl SqliteScheduleRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ScheduleRepository for SqliteScheduleRepo {
    async fn replace_for_vet(&self, vet_id: &str, entries: &[ScheduleEntry]) -> Result<Vec<ScheduleEntry>, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        sqlx::query("DELETE FROM schedule_entries WHERE vet_id = ?")
            .bind(vet_id).execute(&mut *tx).await.map_err(AppError::Database)?;

        for entry in entries {
            sqlx::query(
                "INSERT INTO schedule_entries (id, vet_id, day_of_week, active, work_start, work_end, break_start, break_end, created_at)
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)"
            )
                .bind(&entry.id).bind(&entry.vet_id).bind(entry.day_of_week).bind(entry.active)
                .bind(&entry.work_start).bind(&entry.work_end)
                .bind(&entry.break_start).bind(&entry.break_end).bind(entry.created_at)
                .execute(&mut *tx).await.map_err(AppError::Database)?;
        }

        tx.commit().await.map_err(AppError::Database)?;
        self.list_for_vet(vet_id).await
    }

    async fn list_for_vet(&self, vet_id: &str) -> Result<Vec<ScheduleEntry>, AppError> {
        sqlx::query_as::<_, ScheduleEntry>(
            "SELECT * FROM schedule_entries WHERE vet_id = ? ORDER BY created_at ASC"
        )
            .bind(vet_id).fetch_all(&self.pool).await.map_err(AppError::Database)
    }
}
