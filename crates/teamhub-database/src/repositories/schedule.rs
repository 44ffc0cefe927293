//! Schedule repository implementation.

use chrono::NaiveTime;
use sqlx::PgPool;

use teamhub_core::error::{AppError, ErrorKind};
use teamhub_core::result::AppResult;
use teamhub_entity::schedule::Schedule;

/// Repository for personal timetable entries.
#[derive(Debug, Clone)]
pub struct ScheduleRepository {
    pool: PgPool,
}

impl ScheduleRepository {
    /// Create a new schedule repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Register a timetable entry.
    pub async fn create(
        &self,
        user_id: i64,
        day_of_week: i32,
        start_time: NaiveTime,
        end_time: NaiveTime,
        description: Option<&str>,
    ) -> AppResult<Schedule> {
        sqlx::query_as::<_, Schedule>(
            "INSERT INTO schedules (user_id, day_of_week, start_time, end_time, description) \
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(user_id)
        .bind(day_of_week)
        .bind(start_time)
        .bind(end_time)
        .bind(description)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create schedule", e))
    }

    /// Find a schedule entry by ID.
    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<Schedule>> {
        sqlx::query_as::<_, Schedule>("SELECT * FROM schedules WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find schedule", e))
    }

    /// Delete a schedule entry.
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        sqlx::query("DELETE FROM schedules WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete schedule", e))?;
        Ok(())
    }

    /// List one user's timetable.
    pub async fn find_by_user(&self, user_id: i64) -> AppResult<Vec<Schedule>> {
        sqlx::query_as::<_, Schedule>(
            "SELECT * FROM schedules WHERE user_id = $1 ORDER BY day_of_week, start_time",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list schedules", e))
    }

    /// List the timetables of a set of users in one query.
    pub async fn find_by_users(&self, user_ids: &[i64]) -> AppResult<Vec<Schedule>> {
        sqlx::query_as::<_, Schedule>(
            "SELECT * FROM schedules WHERE user_id = ANY($1) ORDER BY day_of_week, start_time",
        )
        .bind(user_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list schedules", e))
    }
}
