//! Adaptive depth selection between searches.
//!
//! A search never stops early; instead the duration and node count of the
//! last search decide the depth of the next one.

use std::time::Duration;

/// Depth to use next and how long the last search took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepthTuning {
    pub depth: u8,
    pub last_duration: Duration,
}

impl DepthTuning {
    pub fn new(depth: u8) -> Self {
        Self {
            depth,
            last_duration: Duration::ZERO,
        }
    }
}

/// Bounds and budget the tuning works within.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepthLimits {
    pub time_budget: Duration,
    pub min_depth: u8,
    pub max_depth: u8,
}

impl DepthLimits {
    #[inline]
    pub fn clamp(&self, depth: u8) -> u8 {
        depth.clamp(self.min_depth, self.max_depth.max(self.min_depth))
    }
}

/// Effective branching factor of a search that visited `nodes` nodes over
/// `depth` plies.
pub fn effective_branching_factor(nodes: u64, depth: u8) -> f64 {
    if depth == 0 || nodes <= 1 {
        return 1.0;
    }
    (nodes as f64).powf(1.0 / f64::from(depth))
}

/// Depth for the search after one that ran `depth` plies in `elapsed`.
///
/// One more ply is taken if the projected cost (`elapsed` times the
/// branching factor) still fits the budget, one less if the last search
/// already overran it. A promotion shaves a further ply.
pub fn next_depth(
    limits: &DepthLimits,
    depth: u8,
    elapsed: Duration,
    nodes: u64,
    promoted: bool,
) -> u8 {
    let ebf = effective_branching_factor(nodes, depth);
    let projected = elapsed.as_secs_f64() * ebf;
    let budget = limits.time_budget.as_secs_f64();

    let mut next = i32::from(depth);
    if projected < budget {
        next += 1;
    } else if elapsed > limits.time_budget {
        next -= 1;
    }
    if promoted {
        next -= 1;
    }
    let next = u8::try_from(next.max(0)).unwrap_or(u8::MAX);
    limits.clamp(next)
}
