//! Tree height statistics for an estate.

use serde::{Deserialize, Serialize};

use crate::models::HeightMap;

/// Summary of the tree heights in one estate. All zero for an estate without trees.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EstateStats {
    pub count: u64,
    pub max: u32,
    pub min: u32,
    /// Continuous 50th percentile, truncated to whole metres
    pub median: u32,
}

impl EstateStats {
    /// Aggregate any collection of heights.
    pub fn from_heights<I>(heights: I) -> Self
    where
        I: IntoIterator<Item = u32>,
    {
        let mut sorted: Vec<u32> = heights.into_iter().collect();
        if sorted.is_empty() {
            return Self::default();
        }
        sorted.sort_unstable();

        let count = sorted.len();
        Self {
            count: count as u64,
            min: sorted[0],
            max: sorted[count - 1],
            median: continuous_median(&sorted),
        }
    }
}

/// Linear interpolation between the two middle order statistics of a sorted,
/// non-empty slice. Heights are non-negative so integer division truncates
/// toward zero.
fn continuous_median(sorted: &[u32]) -> u32 {
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        sorted[mid]
    } else {
        let sum = u64::from(sorted[mid - 1]) + u64::from(sorted[mid]);
        (sum / 2) as u32
    }
}

/// Count, max, min and median over an estate's height map.
pub fn compute_stats(heights: &HeightMap) -> EstateStats {
    EstateStats::from_heights(heights.values().copied())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Plot;

    fn map(values: &[u32]) -> HeightMap {
        values
            .iter()
            .enumerate()
            .map(|(i, &h)| (Plot::new(i as u32 + 1, 1), h))
            .collect()
    }

    #[test]
    fn test_empty_estate() {
        assert_eq!(
            compute_stats(&HeightMap::new()),
            EstateStats {
                count: 0,
                max: 0,
                min: 0,
                median: 0
            }
        );
    }

    #[test]
    fn test_even_count_median_is_truncated() {
        // Sorted 5, 10, 15, 20 -> (10 + 15) / 2 = 12.5 -> 12
        let stats = compute_stats(&map(&[10, 20, 5, 15]));
        assert_eq!(stats.count, 4);
        assert_eq!(stats.max, 20);
        assert_eq!(stats.min, 5);
        assert_eq!(stats.median, 12);
    }

    #[test]
    fn test_odd_count_median_is_middle_value() {
        let stats = compute_stats(&map(&[30, 1, 7]));
        assert_eq!(stats.median, 7);
        assert_eq!((stats.min, stats.max), (1, 30));
    }

    #[test]
    fn test_single_tree() {
        let stats = compute_stats(&map(&[13]));
        assert_eq!(
            stats,
            EstateStats {
                count: 1,
                max: 13,
                min: 13,
                median: 13
            }
        );
    }

    #[test]
    fn test_even_count_with_whole_median() {
        let stats = EstateStats::from_heights([4, 8, 2, 6, 10, 12]);
        assert_eq!(stats.median, 7);
    }

    #[test]
    fn test_stats_are_repeatable() {
        let heights = map(&[3, 9, 27, 1, 30]);
        assert_eq!(compute_stats(&heights), compute_stats(&heights));
    }
}
