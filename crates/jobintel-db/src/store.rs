//! Postgres implementation of the location audit's persistence seam.

use jobintel_core::{CleanupOutcome, LocationStore, PersistedLocation};
use sqlx::PgPool;

use crate::{count_to_u64, DbError};

#[derive(Debug, Clone)]
pub struct PgLocationStore {
    pool: PgPool,
}

impl PgLocationStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl LocationStore for PgLocationStore {
    type Error = DbError;

    async fn fetch_all_locations(&self) -> Result<Vec<PersistedLocation>, DbError> {
        let rows = sqlx::query_as::<_, (i64, Option<String>, Option<String>)>(
            "SELECT location_id, city, state FROM locations ORDER BY location_id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows
            .into_iter()
            .map(|(id, city, state)| PersistedLocation { id, city, state })
            .collect())
    }

    async fn count_jobs_for_locations(&self, ids: &[i64]) -> Result<u64, DbError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM jobs WHERE location_id = ANY($1)",
        )
        .bind(ids)
        .fetch_one(&self.pool)
        .await?;
        Ok(count_to_u64(count))
    }

    async fn delete_jobs_by_location_ids(&self, ids: &[i64]) -> Result<CleanupOutcome, DbError> {
        let mut tx = self.pool.begin().await?;

        let deleted_jobs = sqlx::query("DELETE FROM jobs WHERE location_id = ANY($1)")
            .bind(ids)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        let deleted_locations = sqlx::query("DELETE FROM locations WHERE location_id = ANY($1)")
            .bind(ids)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        tx.commit().await?;
        Ok(CleanupOutcome {
            deleted_jobs,
            deleted_locations,
            deleted_unlocated_jobs: 0,
        })
    }

    async fn list_jobs_without_location(&self) -> Result<Vec<i64>, DbError> {
        let ids = sqlx::query_scalar::<_, i64>(
            "SELECT job_id FROM jobs \
             WHERE location_id IS NULL AND NOT is_remote \
             ORDER BY job_id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(ids)
    }

    async fn delete_jobs_without_location(&self, job_ids: &[i64]) -> Result<u64, DbError> {
        let result = sqlx::query(
            "DELETE FROM jobs \
             WHERE job_id = ANY($1) AND location_id IS NULL AND NOT is_remote",
        )
        .bind(job_ids)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }
}
