//! Core data models for plantation estates.

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::rules::{
    MAX_ESTATE_DIMENSION, MAX_TREE_HEIGHT_M, MIN_ESTATE_DIMENSION, MIN_TREE_HEIGHT_M,
};

/// Tree height (metres) keyed by plot. Plots without an entry are at ground level.
pub type HeightMap = HashMap<Plot, u32>;

/// A 10m x 10m cell of an estate, 1-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Plot {
    pub x: u32,
    pub y: u32,
}

impl Plot {
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Plot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Rejections raised by the input guards in front of the planner and aggregator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Estate dimensions must be between 1 and 50000")]
    EstateDimensions,
    #[error("Invalid tree coordinates or height")]
    TreeAttributes,
    #[error("Tree coordinates out of bounds")]
    OutOfBounds,
}

/// A rectangular plantation area measured in plots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Estate {
    pub id: Uuid,
    /// Number of plots along the x axis
    pub width: u32,
    /// Number of plots along the y axis
    pub length: u32,
    pub created_at: DateTime<Utc>,
}

impl Estate {
    /// Build a new estate with a fresh identifier.
    pub fn new(width: u32, length: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            width,
            length,
            created_at: Utc::now(),
        }
    }

    /// Whether the plot lies inside this estate.
    pub fn contains(&self, plot: Plot) -> bool {
        (1..=self.width).contains(&plot.x) && (1..=self.length).contains(&plot.y)
    }

    /// Total number of plots.
    pub fn plot_count(&self) -> u64 {
        u64::from(self.width) * u64::from(self.length)
    }
}

/// A tree occupying exactly one plot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tree {
    pub id: Uuid,
    pub estate_id: Uuid,
    pub x: u32,
    pub y: u32,
    /// Height in metres
    pub height: u32,
    pub created_at: DateTime<Utc>,
}

impl Tree {
    pub fn plot(&self) -> Plot {
        Plot::new(self.x, self.y)
    }
}

/// Request body for creating an estate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEstateRequest {
    pub width: i64,
    pub length: i64,
}

impl CreateEstateRequest {
    /// Check the dimensions and build the estate.
    pub fn into_estate(self) -> Result<Estate, ValidationError> {
        let width = dimension(self.width)?;
        let length = dimension(self.length)?;
        Ok(Estate::new(width, length))
    }
}

fn dimension(value: i64) -> Result<u32, ValidationError> {
    u32::try_from(value)
        .ok()
        .filter(|v| (MIN_ESTATE_DIMENSION..=MAX_ESTATE_DIMENSION).contains(v))
        .ok_or(ValidationError::EstateDimensions)
}

/// Request body for planting a tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTreeRequest {
    pub x: i64,
    pub y: i64,
    pub height: i64,
}

impl CreateTreeRequest {
    /// Check coordinates and height without looking at the estate.
    pub fn validate(&self) -> Result<(Plot, u32), ValidationError> {
        let x = positive(self.x)?;
        let y = positive(self.y)?;
        let height = u32::try_from(self.height)
            .ok()
            .filter(|h| (MIN_TREE_HEIGHT_M..=MAX_TREE_HEIGHT_M).contains(h))
            .ok_or(ValidationError::TreeAttributes)?;
        Ok((Plot::new(x, y), height))
    }

    /// Full check against the target estate, producing the tree to store.
    pub fn into_tree(self, estate: &Estate) -> Result<Tree, ValidationError> {
        let (plot, height) = self.validate()?;
        if !estate.contains(plot) {
            return Err(ValidationError::OutOfBounds);
        }
        Ok(Tree {
            id: Uuid::new_v4(),
            estate_id: estate.id,
            x: plot.x,
            y: plot.y,
            height,
            created_at: Utc::now(),
        })
    }
}

fn positive(value: i64) -> Result<u32, ValidationError> {
    u32::try_from(value)
        .ok()
        .filter(|v| *v >= 1)
        .ok_or(ValidationError::TreeAttributes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estate_dimension_bounds() {
        assert!(CreateEstateRequest { width: 1, length: 50_000 }.into_estate().is_ok());
        assert_eq!(
            CreateEstateRequest { width: 0, length: 10 }.into_estate(),
            Err(ValidationError::EstateDimensions)
        );
        assert_eq!(
            CreateEstateRequest { width: 10, length: 50_001 }.into_estate(),
            Err(ValidationError::EstateDimensions)
        );
        assert_eq!(
            CreateEstateRequest { width: -3, length: 10 }.into_estate(),
            Err(ValidationError::EstateDimensions)
        );
    }

    #[test]
    fn test_tree_height_bounds() {
        assert!(CreateTreeRequest { x: 1, y: 1, height: 30 }.validate().is_ok());
        assert_eq!(
            CreateTreeRequest { x: 1, y: 1, height: 31 }.validate(),
            Err(ValidationError::TreeAttributes)
        );
        assert_eq!(
            CreateTreeRequest { x: 0, y: 1, height: 5 }.validate(),
            Err(ValidationError::TreeAttributes)
        );
    }

    #[test]
    fn test_tree_outside_estate() {
        let estate = Estate::new(5, 3);
        let err = CreateTreeRequest { x: 5, y: 4, height: 10 }
            .into_tree(&estate)
            .unwrap_err();
        assert_eq!(err, ValidationError::OutOfBounds);

        let tree = CreateTreeRequest { x: 5, y: 3, height: 10 }
            .into_tree(&estate)
            .unwrap();
        assert_eq!(tree.estate_id, estate.id);
        assert_eq!(tree.plot(), Plot::new(5, 3));
    }

    #[test]
    fn test_validation_messages() {
        assert_eq!(
            ValidationError::EstateDimensions.to_string(),
            "Estate dimensions must be between 1 and 50000"
        );
    }
}
