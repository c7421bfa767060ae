//! Estate/tree data provider seam.
//!
//! Handlers only see `dyn EstateProvider`; the flight planner and statistics
//! aggregator receive plain snapshots read through it.

use anyhow::Result;
use async_trait::async_trait;
use plantation_core::{Estate, HeightMap, Plot, Tree};
use uuid::Uuid;

use crate::persistence::{estates, trees, Database};

/// Result of planting a tree on a plot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddTreeOutcome {
    Added,
    /// Another tree already occupies the plot; nothing was stored.
    PlotTaken,
}

#[async_trait]
pub trait EstateProvider: Send + Sync {
    async fn create_estate(&self, estate: &Estate) -> Result<()>;

    /// `Ok(None)` when no estate has this ID.
    async fn get_estate(&self, id: Uuid) -> Result<Option<Estate>>;

    /// Stores the tree unless its plot is occupied. The occupancy check and
    /// the insert happen atomically.
    async fn add_tree(&self, tree: &Tree) -> Result<AddTreeOutcome>;

    async fn get_tree_at(&self, estate_id: Uuid, plot: Plot) -> Result<Option<Tree>>;

    /// Heights of every tree in the estate. Empty for an estate without trees.
    async fn get_tree_heights(&self, estate_id: Uuid) -> Result<HeightMap>;
}

/// Provider backed by the SQLite database.
#[derive(Clone)]
pub struct SqliteProvider {
    db: Database,
}

impl SqliteProvider {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl EstateProvider for SqliteProvider {
    async fn create_estate(&self, estate: &Estate) -> Result<()> {
        estates::insert_estate(self.db.pool(), estate).await
    }

    async fn get_estate(&self, id: Uuid) -> Result<Option<Estate>> {
        estates::get_estate(self.db.pool(), id).await
    }

    async fn add_tree(&self, tree: &Tree) -> Result<AddTreeOutcome> {
        trees::insert_tree(self.db.pool(), tree).await
    }

    async fn get_tree_at(&self, estate_id: Uuid, plot: Plot) -> Result<Option<Tree>> {
        trees::get_tree_at(self.db.pool(), estate_id, plot).await
    }

    async fn get_tree_heights(&self, estate_id: Uuid) -> Result<HeightMap> {
        trees::load_heights(self.db.pool(), estate_id).await
    }
}
