//! Tree persistence operations.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use plantation_core::{HeightMap, Plot, Tree};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::state::AddTreeOutcome;

/// Insert a tree. The unique plot index decides who wins a concurrent insert.
pub async fn insert_tree(pool: &SqlitePool, tree: &Tree) -> Result<AddTreeOutcome> {
    let result = sqlx::query(
        r#"
        INSERT INTO trees (id, estate_id, x, y, height, created_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        "#,
    )
    .bind(tree.id.to_string())
    .bind(tree.estate_id.to_string())
    .bind(i64::from(tree.x))
    .bind(i64::from(tree.y))
    .bind(i64::from(tree.height))
    .bind(tree.created_at.to_rfc3339())
    .execute(pool)
    .await;

    match result {
        Ok(_) => Ok(AddTreeOutcome::Added),
        Err(sqlx::Error::Database(err)) if err.is_unique_violation() => {
            Ok(AddTreeOutcome::PlotTaken)
        }
        Err(err) => Err(err).context("failed to insert tree"),
    }
}

/// Load the tree on a plot, if any.
pub async fn get_tree_at(pool: &SqlitePool, estate_id: Uuid, plot: Plot) -> Result<Option<Tree>> {
    let row = sqlx::query_as::<_, TreeRow>(
        "SELECT id, estate_id, x, y, height, created_at FROM trees WHERE estate_id = ?1 AND x = ?2 AND y = ?3",
    )
    .bind(estate_id.to_string())
    .bind(i64::from(plot.x))
    .bind(i64::from(plot.y))
    .fetch_optional(pool)
    .await?;

    row.map(Tree::try_from).transpose()
}

/// Load every tree height of an estate keyed by plot.
pub async fn load_heights(pool: &SqlitePool, estate_id: Uuid) -> Result<HeightMap> {
    let rows: Vec<(i64, i64, i64)> =
        sqlx::query_as("SELECT x, y, height FROM trees WHERE estate_id = ?1")
            .bind(estate_id.to_string())
            .fetch_all(pool)
            .await?;

    rows.into_iter()
        .map(|(x, y, height)| -> Result<(Plot, u32)> {
            let plot = Plot::new(u32::try_from(x)?, u32::try_from(y)?);
            Ok((plot, u32::try_from(height)?))
        })
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
            id: Uuid::parse_str(&row.id).context("stored tree id is not a UUID")?,
            estate_id: Uuid::parse_str(&row.estate_id).context("stored estate id is not a UUID")?,
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
    use plantation_core::{CreateTreeRequest, Estate};

    #[tokio::test]
    async fn test_heights_keyed_by_plot() {
        let db = init_database(":memory:", 1).await.unwrap();
        let estate = Estate::new(10, 10);
        insert_estate(db.pool(), &estate).await.unwrap();

        for (x, y, height) in [(1, 1, 10), (2, 1, 20), (5, 9, 30)] {
            let tree = CreateTreeRequest { x, y, height }.into_tree(&estate).unwrap();
            insert_tree(db.pool(), &tree).await.unwrap();
        }

        let heights = load_heights(db.pool(), estate.id).await.unwrap();
        assert_eq!(heights.len(), 3);
        assert_eq!(heights.get(&Plot::new(5, 9)), Some(&30));

        let tree = get_tree_at(db.pool(), estate.id, Plot::new(2, 1))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(tree.height, 20);
        assert!(get_tree_at(db.pool(), estate.id, Plot::new(3, 3))
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_plot_is_unique() {
        let db = init_database(":memory:", 1).await.unwrap();
        let estate = Estate::new(3, 3);
        insert_estate(db.pool(), &estate).await.unwrap();

        let first = CreateTreeRequest { x: 2, y: 2, height: 5 }.into_tree(&estate).unwrap();
        let second = CreateTreeRequest { x: 2, y: 2, height: 9 }.into_tree(&estate).unwrap();
        assert_eq!(
            insert_tree(db.pool(), &first).await.unwrap(),
            AddTreeOutcome::Added
        );
        assert_eq!(
            insert_tree(db.pool(), &second).await.unwrap(),
            AddTreeOutcome::PlotTaken
        );

        let heights = load_heights(db.pool(), estate.id).await.unwrap();
        assert_eq!(heights.get(&Plot::new(2, 2)), Some(&5));
    }

    #[tokio::test]
    async fn test_tree_for_missing_estate_is_an_error() {
        let db = init_database(":memory:", 1).await.unwrap();
        let estate = Estate::new(3, 3);
        let tree = CreateTreeRequest { x: 1, y: 1, height: 5 }.into_tree(&estate).unwrap();
        assert!(insert_tree(db.pool(), &tree).await.is_err());
    }
}
