//! Database operations for `locations`.
//!
//! Every write goes through the pre-insert location gate: a row is only
//! created for text the classifier accepts, and always in canonical form.

use chrono::{DateTime, Utc};
use jobintel_core::{ValidatedLocation, ValidationGate};
use sqlx::{PgConnection, PgPool};

use crate::DbError;

/// A row from the `locations` table.
///
/// `city` is nullable because rows written before the gate existed may lack
/// one; the cleanup audit reports those as empty.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct LocationRow {
    pub location_id: i64,
    pub city: Option<String>,
    pub state: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Validate `raw` and get-or-create the canonical location row.
///
/// Returns `Ok(None)` without touching the database when the gate refuses
/// the text.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the upsert fails.
pub async fn insert_location(
    pool: &PgPool,
    gate: &ValidationGate,
    raw: Option<&str>,
) -> Result<Option<i64>, DbError> {
    let Some(location) = gate.admit(raw) else {
        return Ok(None);
    };
    let mut conn = pool.acquire().await?;
    upsert_validated_location(&mut conn, &location)
        .await
        .map(Some)
}

/// Get-or-create by canonical city. An existing row keeps its state unless
/// it had none.
pub(crate) async fn upsert_validated_location(
    conn: &mut PgConnection,
    location: &ValidatedLocation,
) -> Result<i64, DbError> {
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO locations (city, state) \
         VALUES ($1, $2) \
         ON CONFLICT (city) DO UPDATE SET \
             state = COALESCE(locations.state, EXCLUDED.state) \
         RETURNING location_id",
    )
    .bind(&location.city)
    .bind(&location.state)
    .fetch_one(&mut *conn)
    .await?;
    Ok(id)
}

/// All locations ordered by `location_id`.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_locations(pool: &PgPool) -> Result<Vec<LocationRow>, DbError> {
    let rows = sqlx::query_as::<_, LocationRow>(
        "SELECT location_id, city, state, created_at \
         FROM locations \
         ORDER BY location_id",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}
