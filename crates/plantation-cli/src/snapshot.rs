//! Offline estate snapshots.
//!
//! A snapshot is a JSON file describing one estate and its trees:
//!
//! ```json
//! { "width": 5, "length": 3, "trees": [{ "x": 1, "y": 1, "height": 10 }] }
//! ```

use std::path::Path;

use anyhow::{bail, Context, Result};
use plantation_core::{CreateEstateRequest, CreateTreeRequest, Estate, HeightMap};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct EstateSnapshot {
    pub width: i64,
    pub length: i64,
    #[serde(default)]
    pub trees: Vec<CreateTreeRequest>,
}

impl EstateSnapshot {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse(&raw).with_context(|| format!("Invalid snapshot {}", path.display()))
    }

    pub fn parse(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Apply the same guards as the server and build the planner inputs.
    pub fn into_inputs(self) -> Result<(Estate, HeightMap)> {
        let estate = CreateEstateRequest {
            width: self.width,
            length: self.length,
        }
        .into_estate()?;

        let mut heights = HeightMap::new();
        for request in self.trees {
            let tree = request.into_tree(&estate)?;
            if heights.insert(tree.plot(), tree.height).is_some() {
                bail!("A tree already exists at {}", tree.plot());
            }
        }
        Ok((estate, heights))
    }
}
