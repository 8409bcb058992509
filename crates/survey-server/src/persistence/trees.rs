//! Tree persistence operations.

use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use survey_core::Tree;

/// Result of planting a tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertTreeOutcome {
    Created,
    /// Another tree already stands on the same cell
    Duplicate,
}

/// Insert a tree, reporting an occupied cell as [`InsertTreeOutcome::Duplicate`].
pub async fn insert_tree(pool: &SqlitePool, tree: &Tree) -> Result<InsertTreeOutcome> {
    let result = sqlx::query(
        r#"
        INSERT INTO trees (id, estate_id, x, y, height, created_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        "#,
    )
    .bind(&tree.id)
    .bind(&tree.estate_id)
    .bind(i64::from(tree.x))
    .bind(i64::from(tree.y))
    .bind(i64::from(tree.height))
    .bind(tree.created_at.to_rfc3339())
    .execute(pool)
    .await;

    match result {
        Ok(_) => Ok(InsertTreeOutcome::Created),
        Err(sqlx::Error::Database(err)) if err.is_unique_violation() => {
            Ok(InsertTreeOutcome::Duplicate)
        }
        Err(err) => Err(err.into()),
    }
}

/// List an estate's trees ordered by `(x, y)`.
pub async fn list_trees(pool: &SqlitePool, estate_id: &str) -> Result<Vec<Tree>> {
    let rows = sqlx::query_as::<_, TreeRow>(
        "SELECT id, estate_id, x, y, height, created_at FROM trees WHERE estate_id = ?1 ORDER BY x, y",
    )
    .bind(estate_id)
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(Tree::try_from).collect()
}

/// Heights of an estate's trees in ascending order.
pub async fn list_tree_heights(pool: &SqlitePool, estate_id: &str) -> Result<Vec<u32>> {
    let heights: Vec<i64> =
        sqlx::query_scalar("SELECT height FROM trees WHERE estate_id = ?1 ORDER BY height")
            .bind(estate_id)
            .fetch_all(pool)
            .await?;

    heights
        .into_iter()
        .map(|h| u32::try_from(h).map_err(Into::into))
        .collect()
}

// Internal row type for SQLx
#[derive(sqlx::FromRow)]
struct TreeRow {
    id: String,
    estate_id: String,
    x: i64,
    y: i64,
    height: i64,
    created_at: String,
}

impl TryFrom<TreeRow> for Tree {
    type Error = anyhow::Error;

    fn try_from(row: TreeRow) -> Result<Self> {
        let created_at = DateTime::parse_from_rfc3339(&row.created_at)
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|_| Utc::now());

        Ok(Tree {
            id: row.id,
            estate_id: row.estate_id,
            x: u32::try_from(row.x)?,
            y: u32::try_from(row.y)?,
            height: u32::try_from(row.height)?,
            created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::{estates::insert_estate, init_database};
    use survey_core::Estate;

    fn tree(id: &str, x: u32, y: u32, height: u32) -> Tree {
        Tree {
            id: id.to_string(),
            estate_id: "estate-1".to_string(),
            x,
            y,
            height,
            created_at: Utc::now(),
        }
    }

    async fn setup() -> SqlitePool {
        let db = init_database(":memory:", 1).await.unwrap();
        let estate = Estate {
            id: "estate-1".to_string(),
            length: 5,
            width: 4,
            created_at: Utc::now(),
        };
        insert_estate(db.pool(), &estate).await.unwrap();
        db.pool().clone()
    }

    #[tokio::test]
    async fn test_duplicate_cell_is_reported() {
        let pool = setup().await;

        let first = insert_tree(&pool, &tree("tree-1", 2, 1, 5)).await.unwrap();
        let second = insert_tree(&pool, &tree("tree-2", 2, 1, 9)).await.unwrap();

        assert_eq!(first, InsertTreeOutcome::Created);
        assert_eq!(second, InsertTreeOutcome::Duplicate);
    }

    #[tokio::test]
    async fn test_list_trees_ordering() {
        let pool = setup().await;
        insert_tree(&pool, &tree("tree-1", 4, 1, 4)).await.unwrap();
        insert_tree(&pool, &tree("tree-2", 2, 3, 5)).await.unwrap();
        insert_tree(&pool, &tree("tree-3", 2, 1, 3)).await.unwrap();

        let coords: Vec<(u32, u32)> = list_trees(&pool, "estate-1")
            .await
            .unwrap()
            .iter()
            .map(|t| (t.x, t.y))
            .collect();
        assert_eq!(coords, vec![(2, 1), (2, 3), (4, 1)]);

        let heights = list_tree_heights(&pool, "estate-1").await.unwrap();
        assert_eq!(heights, vec![3, 4, 5]);
    }
}
