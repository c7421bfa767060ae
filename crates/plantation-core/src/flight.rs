//! Monitoring drone flight planning.
//!
//! The drone takes off at ground level, visits every plot of an estate row by
//! row (y = 1..=length, x = 1..=width, always left to right) and climbs or
//! descends to the top of whatever grows on each plot. Every plot costs one
//! plot pitch horizontally plus the height change vertically.

use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::{Deserialize, Serialize};

use crate::models::{HeightMap, Plot};
use crate::rules::{GROUND_LEVEL_M, PLOT_PITCH_M};

/// How the distance is reported when the budget is exceeded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CutoffPolicy {
    /// Report the distance including the step that crossed the budget.
    #[default]
    IncludeOverflow,
    /// Report the distance up to the plot before the landing plot.
    RollbackOverflow,
}

impl FromStr for CutoffPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "include" | "include_overflow" => Ok(Self::IncludeOverflow),
            "rollback" | "rollback_overflow" => Ok(Self::RollbackOverflow),
            other => Err(format!("unknown cutoff policy '{}'", other)),
        }
    }
}

/// Result of a flight simulation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightPlan {
    /// Accumulated travel distance in metres
    pub distance: u64,
    /// Plot where the drone had to land, if the budget ran out
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rest: Option<Plot>,
}

/// One step of the flight path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlotVisit {
    pub plot: Plot,
    /// Tree height on this plot, 0 when empty
    pub height: u32,
    /// Cost of flying from the previous plot (or take-off) to this one
    pub step_distance: u64,
    /// Distance flown so far, including this step
    pub total_distance: u64,
}

/// Lazy, deterministic sequence of plot visits over an estate.
#[derive(Debug, Clone)]
pub struct FlightPath<'a> {
    width: u32,
    length: u32,
    heights: &'a HeightMap,
    next: Option<Plot>,
    prev_height: u32,
    total: u64,
}

impl<'a> FlightPath<'a> {
    pub fn new(width: u32, length: u32, heights: &'a HeightMap) -> Self {
        let next = (width > 0 && length > 0).then_some(Plot::new(1, 1));
        Self {
            width,
            length,
            heights,
            next,
            prev_height: GROUND_LEVEL_M,
            total: 0,
        }
    }

    fn advance(&self, plot: Plot) -> Option<Plot> {
        if plot.x < self.width {
            Some(Plot::new(plot.x + 1, plot.y))
        } else if plot.y < self.length {
            Some(Plot::new(1, plot.y + 1))
        } else {
            None
        }
    }

    fn remaining(&self) -> u64 {
        match self.next {
            Some(plot) => {
                let full_rows = u64::from(self.length - plot.y);
                full_rows * u64::from(self.width) + u64::from(self.width - plot.x + 1)
            }
            None => 0,
        }
    }
}

impl Iterator for FlightPath<'_> {
    type Item = PlotVisit;

    fn next(&mut self) -> Option<Self::Item> {
        let plot = self.next?;
        self.next = self.advance(plot);

        let height = self.heights.get(&plot).copied().unwrap_or(GROUND_LEVEL_M);
        let step_distance = u64::from(height.abs_diff(self.prev_height)) + PLOT_PITCH_M;
        self.total += step_distance;
        self.prev_height = height;

        Some(PlotVisit {
            plot,
            height,
            step_distance,
            total_distance: self.total,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match usize::try_from(self.remaining()) {
            Ok(n) => (n, Some(n)),
            Err(_) => (usize::MAX, None),
        }
    }
}

/// Simulate a flight with the default cutoff policy.
///
/// A `max_distance` of `None` or `Some(0)` means the flight is unrestricted.
pub fn plan_flight(
    width: u32,
    length: u32,
    heights: &HeightMap,
    max_distance: Option<u64>,
) -> FlightPlan {
    plan_flight_with(width, length, heights, max_distance, CutoffPolicy::default())
}

/// Simulate a flight, stopping at the first plot whose arrival pushes the
/// distance past `max_distance`.
pub fn plan_flight_with(
    width: u32,
    length: u32,
    heights: &HeightMap,
    max_distance: Option<u64>,
    policy: CutoffPolicy,
) -> FlightPlan {
    simulate(width, length, heights, max_distance, policy, None).unwrap_or_default()
}

/// Like [`plan_flight_with`], but gives up with `None` once `cancel` is set.
/// The flag is checked at the start of every row.
pub fn plan_flight_cancellable(
    width: u32,
    length: u32,
    heights: &HeightMap,
    max_distance: Option<u64>,
    policy: CutoffPolicy,
    cancel: &AtomicBool,
) -> Option<FlightPlan> {
    simulate(width, length, heights, max_distance, policy, Some(cancel))
}

fn simulate(
    width: u32,
    length: u32,
    heights: &HeightMap,
    max_distance: Option<u64>,
    policy: CutoffPolicy,
    cancel: Option<&AtomicBool>,
) -> Option<FlightPlan> {
    let budget = max_distance.filter(|limit| *limit > 0);
    let mut distance = 0;

    for visit in FlightPath::new(width, length, heights) {
        if visit.plot.x == 1 && cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
            return None;
        }
        distance = visit.total_distance;
        if let Some(limit) = budget {
            if visit.total_distance > limit {
                if policy == CutoffPolicy::RollbackOverflow {
                    distance -= visit.step_distance;
                }
                return Some(FlightPlan {
                    distance,
                    rest: Some(visit.plot),
                });
            }
        }
    }

    Some(FlightPlan {
        distance,
        rest: None,
    })
}
