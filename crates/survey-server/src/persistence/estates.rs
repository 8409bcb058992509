//! Estate persistence operations.

use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use survey_core::Estate;

/// Insert a new estate.
pub async fn insert_estate(pool: &SqlitePool, estate: &Estate) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO estates (id, length, width, created_at)
        VALUES (?1, ?2, ?3, ?4)
        "#,
    )
    .bind(&estate.id)
    .bind(i64::from(estate.length))
    .bind(i64::from(estate.width))
    .bind(estate.created_at.to_rfc3339())
    .execute(pool)
    .await?;

    Ok(())
}

/// Fetch one estate by ID.
pub async fn get_estate(pool: &SqlitePool, id: &str) -> Result<Option<Estate>> {
    let row = sqlx::query_as::<_, EstateRow>(
        "SELECT id, length, width, created_at FROM estates WHERE id = ?1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    row.map(Estate::try_from).transpose()
}

/// Load all estates from the database.
pub async fn load_all_estates(pool: &SqlitePool) -> Result<Vec<Estate>> {
    let rows = sqlx::query_as::<_, EstateRow>("SELECT id, length, width, created_at FROM estates")
        .fetch_all(pool)
        .await?;

    rows.into_iter().map(Estate::try_from).collect()
}

// Internal row type for SQLx
#[derive(sqlx::FromRow)]
struct EstateRow {
    id: String,
    length: i64,
    width: i64,
    created_at: String,
}

impl TryFrom<EstateRow> for Estate {
    type Error = anyhow::Error;

    fn try_from(row: EstateRow) -> Result<Self> {
        let created_at = DateTime::parse_from_rfc3339(&row.created_at)
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|_| Utc::now());

        Ok(Estate {
            id: row.id,
            length: u32::try_from(row.length)?,
            width: u32::try_from(row.width)?,
            created_at,
        })
    }
}
