//! Database operations for `jobs`.

use jobintel_core::{Admission, CleanJob, ValidationGate};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::PgPool;

use crate::companies::upsert_company;
use crate::locations::upsert_validated_location;
use crate::DbError;

const PROGRESS_EVERY: usize = 100;

/// Result of a successful [`insert_job`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JobInsert {
    pub job_id: i64,
    /// `false` when a job with the same `job_url` already existed.
    pub created: bool,
}

/// Counts from [`insert_jobs`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct InsertSummary {
    pub inserted: usize,
    /// Already present by `job_url`.
    pub existing: usize,
    /// Refused by the pre-insert location gate.
    pub refused: usize,
    pub errors: usize,
}

impl InsertSummary {
    #[must_use]
    pub fn total(&self) -> usize {
        self.inserted + self.existing + self.refused + self.errors
    }
}

/// Insert one cleaned job, resolving its company and location.
///
/// The location is re-validated by `gate` first; `Ok(None)` means the job
/// was refused and nothing was written. A job whose `job_url` already exists
/// is not rewritten and its id is returned with `created: false`. The
/// company, location and job rows are written in one transaction, so a
/// failed insert leaves none of them behind.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if any statement fails.
pub async fn insert_job(
    pool: &PgPool,
    gate: &ValidationGate,
    job: &CleanJob,
) -> Result<Option<JobInsert>, DbError> {
    let Some(admission) = gate.admit_job(job) else {
        return Ok(None);
    };

    if let Some(job_id) = find_job_by_url(pool, job.job_url.as_deref()).await? {
        return Ok(Some(JobInsert {
            job_id,
            created: false,
        }));
    }

    let mut tx = pool.begin().await?;

    let company_id = match job.company.as_deref() {
        Some(name) => Some(upsert_company(&mut tx, name).await?),
        None => None,
    };
    let (location_id, is_remote) = match &admission {
        Admission::Located(location) => (
            Some(upsert_validated_location(&mut tx, location).await?),
            job.remote,
        ),
        Admission::RemoteWithoutLocation => (None, true),
    };

    // A concurrent writer may have inserted the same URL since the lookup.
    let inserted = sqlx::query_scalar::<_, i64>(
        "INSERT INTO jobs \
             (job_title, company_id, location_id, job_description, job_url, \
              experience_level, job_type, salary_min, salary_max, is_remote, \
              posted_date, source_portal) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) \
         ON CONFLICT (job_url) DO NOTHING \
         RETURNING job_id",
    )
    .bind(&job.title)
    .bind(company_id)
    .bind(location_id)
    .bind(&job.description)
    .bind(&job.job_url)
    .bind(&job.experience_level)
    .bind(&job.job_type)
    .bind(job.salary_min.and_then(to_money))
    .bind(job.salary_max.and_then(to_money))
    .bind(is_remote)
    .bind(job.posted_date)
    .bind(&job.source_portal)
    .fetch_optional(&mut *tx)
    .await?;

    let Some(job_id) = inserted else {
        tx.rollback().await?;
        let job_id = find_job_by_url(pool, job.job_url.as_deref())
            .await?
            .ok_or(DbError::NotFound)?;
        return Ok(Some(JobInsert {
            job_id,
            created: false,
        }));
    };

    tx.commit().await?;
    Ok(Some(JobInsert {
        job_id,
        created: true,
    }))
}

async fn find_job_by_url(pool: &PgPool, url: Option<&str>) -> Result<Option<i64>, DbError> {
    let Some(url) = url else {
        return Ok(None);
    };
    let id = sqlx::query_scalar::<_, i64>("SELECT job_id FROM jobs WHERE job_url = $1")
        .bind(url)
        .fetch_optional(pool)
        .await?;
    Ok(id)
}

/// Insert a batch, continuing past individual failures.
///
/// Per-job errors are logged and counted, never propagated.
pub async fn insert_jobs(pool: &PgPool, gate: &ValidationGate, jobs: &[CleanJob]) -> InsertSummary {
    let mut summary = InsertSummary::default();
    for (idx, job) in jobs.iter().enumerate() {
        match insert_job(pool, gate, job).await {
            Ok(Some(JobInsert { created: true, .. })) => summary.inserted += 1,
            Ok(Some(JobInsert { created: false, .. })) => summary.existing += 1,
            Ok(None) => summary.refused += 1,
            Err(e) => {
                summary.errors += 1;
                tracing::error!(title = %job.title, error = %e, "failed to insert job");
            }
        }
        if (idx + 1) % PROGRESS_EVERY == 0 {
            tracing::info!(processed = idx + 1, total = jobs.len(), "insert progress");
        }
    }
    tracing::info!(
        inserted = summary.inserted,
        existing = summary.existing,
        refused = summary.refused,
        errors = summary.errors,
        "bulk insert complete"
    );
    summary
}

/// Salaries are stored as `NUMERIC(12,2)`; non-finite values become NULL.
fn to_money(value: f64) -> Option<Decimal> {
    Decimal::from_f64_retain(value).map(|d| d.round_dp(2))
}
