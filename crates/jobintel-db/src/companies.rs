//! Database operations for `companies`.

use sqlx::{PgConnection, PgPool};

use crate::DbError;

/// Get-or-create a company by exact name. Returns its `company_id`.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the upsert fails.
pub async fn insert_company(pool: &PgPool, name: &str) -> Result<i64, DbError> {
    let mut conn = pool.acquire().await?;
    upsert_company(&mut conn, name).await
}

/// Runs on a caller-supplied connection so it can join a transaction.
pub(crate) async fn upsert_company(conn: &mut PgConnection, name: &str) -> Result<i64, DbError> {
    // The no-op update makes RETURNING yield the existing row on conflict.
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO companies (company_name) \
         VALUES ($1) \
         ON CONFLICT (company_name) DO UPDATE SET company_name = EXCLUDED.company_name \
         RETURNING company_id",
    )
    .bind(name)
    .fetch_one(&mut *conn)
    .await?;
    Ok(id)
}
