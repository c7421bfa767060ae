//! Fixed limits for estates, trees and the monitoring drone.

/// Smallest allowed estate width or length, in plots.
pub const MIN_ESTATE_DIMENSION: u32 = 1;
/// Largest allowed estate width or length, in plots.
pub const MAX_ESTATE_DIMENSION: u32 = 50_000;

/// Tree heights are whole metres in this range.
pub const MIN_TREE_HEIGHT_M: u32 = 1;
pub const MAX_TREE_HEIGHT_M: u32 = 30;

/// Horizontal distance between neighbouring plot centres.
pub const PLOT_PITCH_M: u64 = 10;

/// Height of a plot without a tree.
pub const GROUND_LEVEL_M: u32 = 0;
