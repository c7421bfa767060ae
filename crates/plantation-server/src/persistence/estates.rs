//! Estate persistence operations.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use plantation_core::Estate;
use sqlx::SqlitePool;
use uuid::Uuid;

/// Insert a new estate.
pub async fn insert_estate(pool: &SqlitePool, estate: &Estate) -> Result<()> {
    sqlx::query("INSERT INTO estates (id, width, length, created_at) VALUES (?1, ?2, ?3, ?4)")
        .bind(estate.id.to_string())
        .bind(i64::from(estate.width))
        .bind(i64::from(estate.length))
        .bind(estate.created_at.to_rfc3339())
        .execute(pool)
        .await?;

    Ok(())
}

/// Load an estate by ID.
pub async fn get_estate(pool: &SqlitePool, id: Uuid) -> Result<Option<Estate>> {
    let row = sqlx::query_as::<_, EstateRow>(
        "SELECT id, width, length, created_at FROM estates WHERE id = ?1",
    )
    .bind(id.to_string())
    .fetch_optional(pool)
    .await?;

    row.map(Estate::try_from).transpose()
}

// Internal row type for SQLx
#[derive(sqlx::FromRow)]
struct EstateRow {
    id: String,
    width: i64,
    length: i64,
    created_at: String,
}

impl TryFrom<EstateRow> for Estate {
    type Error = anyhow::Error;

    fn try_from(row: EstateRow) -> Result<Self> {
        let created_at = DateTime::parse_from_rfc3339(&row.created_at)
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|_| Utc::now());

        Ok(Estate {
            id: Uuid::parse_str(&row.id).context("stored estate id is not a UUID")?,
            width: u32::try_from(row.width).context("stored estate width out of range")?,
            length: u32::try_from(row.length).context("stored estate length out of range")?,
            created_at,
        })
    }
}
