//! In-memory provider using DashMap.

use std::collections::HashMap;

use anyhow::{bail, Result};
use async_trait::async_trait;
use dashmap::DashMap;
use plantation_core::{Estate, HeightMap, Plot, Tree};
use uuid::Uuid;

use super::provider::{AddTreeOutcome, EstateProvider};

/// Thread-safe store for estates and their trees. Contents are lost on restart.
#[derive(Default)]
pub struct MemoryProvider {
    estates: DashMap<Uuid, Estate>,
    trees: DashMap<Uuid, HashMap<Plot, Tree>>,
}

impl MemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EstateProvider for MemoryProvider {
    async fn create_estate(&self, estate: &Estate) -> Result<()> {
        if self.estates.contains_key(&estate.id) {
            bail!("estate {} already exists", estate.id);
        }
        self.estates.insert(estate.id, estate.clone());
        Ok(())
    }

    async fn get_estate(&self, id: Uuid) -> Result<Option<Estate>> {
        Ok(self.estates.get(&id).map(|r| r.value().clone()))
    }

    async fn add_tree(&self, tree: &Tree) -> Result<AddTreeOutcome> {
        if !self.estates.contains_key(&tree.estate_id) {
            bail!("estate {} does not exist", tree.estate_id);
        }
        // The entry guard holds the shard lock across check and insert.
        let mut plots = self.trees.entry(tree.estate_id).or_default();
        if plots.contains_key(&tree.plot()) {
            return Ok(AddTreeOutcome::PlotTaken);
        }
        plots.insert(tree.plot(), tree.clone());
        Ok(AddTreeOutcome::Added)
    }

    async fn get_tree_at(&self, estate_id: Uuid, plot: Plot) -> Result<Option<Tree>> {
        Ok(self
            .trees
            .get(&estate_id)
            .and_then(|plots| plots.get(&plot).cloned()))
    }

    async fn get_tree_heights(&self, estate_id: Uuid) -> Result<HeightMap> {
        Ok(self
            .trees
            .get(&estate_id)
            .map(|plots| {
                plots
                    .iter()
                    .map(|(plot, tree)| (*plot, tree.height))
                    .collect()
            })
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plantation_core::CreateTreeRequest;

    #[tokio::test]
    async fn test_rejects_second_tree_on_plot() {
        let provider = MemoryProvider::new();
        let estate = Estate::new(4, 4);
        provider.create_estate(&estate).await.unwrap();

        let first = CreateTreeRequest { x: 1, y: 4, height: 8 }.into_tree(&estate).unwrap();
        let second = CreateTreeRequest { x: 1, y: 4, height: 3 }.into_tree(&estate).unwrap();
        assert_eq!(provider.add_tree(&first).await.unwrap(), AddTreeOutcome::Added);
        assert_eq!(
            provider.add_tree(&second).await.unwrap(),
            AddTreeOutcome::PlotTaken
        );

        let heights = provider.get_tree_heights(estate.id).await.unwrap();
        assert_eq!(heights.get(&Plot::new(1, 4)), Some(&8));
    }

    #[tokio::test]
    async fn test_tree_needs_an_estate() {
        let provider = MemoryProvider::new();
        let estate = Estate::new(2, 2);
        let tree = CreateTreeRequest { x: 1, y: 1, height: 5 }.into_tree(&estate).unwrap();
        assert!(provider.add_tree(&tree).await.is_err());
    }

    #[tokio::test]
    async fn test_unknown_estate_has_no_heights() {
        let provider = MemoryProvider::new();
        assert!(provider.get_estate(Uuid::new_v4()).await.unwrap().is_none());
        assert!(provider
            .get_tree_heights(Uuid::new_v4())
            .await
            .unwrap()
            .is_empty());
    }
}
