//! Aggregate counts over the persisted job data.

use serde::Serialize;
use sqlx::PgPool;

use crate::{count_to_u64, DbError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CityJobCount {
    pub city: String,
    pub jobs: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DatabaseStats {
    pub total_jobs: u64,
    pub total_companies: u64,
    pub total_locations: u64,
    pub remote_jobs: u64,
    /// Highest count first; cities with no jobs are included with zero.
    pub jobs_by_city: Vec<CityJobCount>,
}

/// Collect table totals and the per-city job distribution.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if any query fails.
pub async fn database_stats(pool: &PgPool) -> Result<DatabaseStats, DbError> {
    let (total_jobs, remote_jobs) = sqlx::query_as::<_, (i64, i64)>(
        "SELECT COUNT(*), COUNT(*) FILTER (WHERE is_remote) FROM jobs",
    )
    .fetch_one(pool)
    .await?;
    let total_companies = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM companies")
        .fetch_one(pool)
        .await?;
    let total_locations = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM locations")
        .fetch_one(pool)
        .await?;

    let rows = sqlx::query_as::<_, (Option<String>, i64)>(
        "SELECT l.city, COUNT(j.job_id) \
         FROM locations l \
         LEFT JOIN jobs j ON j.location_id = l.location_id \
         GROUP BY l.city \
         ORDER BY COUNT(j.job_id) DESC, l.city",
    )
    .fetch_all(pool)
    .await?;

    Ok(DatabaseStats {
        total_jobs: count_to_u64(total_jobs),
        total_companies: count_to_u64(total_companies),
        total_locations: count_to_u64(total_locations),
        remote_jobs: count_to_u64(remote_jobs),
        jobs_by_city: rows
            .into_iter()
            .map(|(city, jobs)| CityJobCount {
                city: city.unwrap_or_default(),
                jobs: count_to_u64(jobs),
            })
            .collect(),
    })
}
