//! Run parameters.
//!
//! A [`SchedulerConfig`] selects the algorithm and controls the search
//! budget, term filter, conflict tolerance, fallback behavior, and the time
//! grid. Every field has a default, so a TOML file only needs the keys it
//! changes:
//!
//! ```toml
//! algorithm = "backtracking"
//! max_iterations = 500
//! term_filter = 1
//!
//! [grid]
//! day_start = "08:00"
//! day_end = "18:00"
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Result, SchedulerError};
use crate::models::TimeGrid;
use crate::scheduler::Algorithm;

/// Default search budget.
pub const DEFAULT_MAX_ITERATIONS: usize = 1000;

/// Parameters for one scheduling run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Which assigner to run.
    pub algorithm: Algorithm,
    /// Search budget for backtracking and CSP (placed entries / assigned
    /// variables). Must be positive.
    pub max_iterations: usize,
    /// Only schedule courses of this term.
    pub term_filter: Option<u32>,
    /// Accept overlapping bookings.
    pub allow_conflicts: bool,
    /// What to do when a strict search fails.
    pub fallback: FallbackPolicy,
    /// How "Both" courses appear in CSP output.
    pub both_representation: BothRepresentation,
    /// Bookable weekly grid.
    pub grid: TimeGrid,
}

/// Behavior when backtracking or CSP cannot finish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackPolicy {
    /// Re-run greedy with conflicts permitted. Always places everything
    /// that has a faculty member and a matching room.
    #[default]
    GreedyWithConflicts,
    /// Re-run greedy conflict-free; unplaceable obligations are skipped.
    GreedyStrict,
}

/// Representation of "Both" courses in the CSP solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BothRepresentation {
    /// Separate Lecture and Lab variables, entries tagged per component.
    #[default]
    Split,
    /// One variable over the full weekly hours, entries tagged `Both`.
    Merged,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::Greedy,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            term_filter: None,
            allow_conflicts: false,
            fallback: FallbackPolicy::default(),
            both_representation: BothRepresentation::default(),
            grid: TimeGrid::default(),
        }
    }
}

impl SchedulerConfig {
    /// Creates the default configuration (greedy, budget 1000).
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Sets the algorithm.
    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Sets the search budget.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Restricts the run to one term.
    pub fn with_term_filter(mut self, term: u32) -> Self {
        self.term_filter = Some(term);
        self
    }

    /// Permits or forbids overlapping bookings.
    pub fn with_allow_conflicts(mut self, allow: bool) -> Self {
        self.allow_conflicts = allow;
        self
    }

    /// Sets the fallback policy.
    pub fn with_fallback(mut self, fallback: FallbackPolicy) -> Self {
        self.fallback = fallback;
        self
    }

    /// Sets the CSP representation of "Both" courses.
    pub fn with_both_representation(mut self, representation: BothRepresentation) -> Self {
        self.both_representation = representation;
        self
    }

    /// Replaces the time grid.
    pub fn with_grid(mut self, grid: TimeGrid) -> Self {
        self.grid = grid;
        self
    }

    /// Checks that the parameters are usable.
    pub fn validate(&self) -> Result<()> {
        if self.max_iterations == 0 {
            return Err(SchedulerError::InvalidConfig(
                "max_iterations must be positive".into(),
            ));
        }
        if self.grid.day_start >= self.grid.day_end {
            return Err(SchedulerError::InvalidConfig(format!(
                "grid day_start {} is not before day_end {}",
                self.grid.day_start, self.grid.day_end
            )));
        }
        if self.grid.days.is_empty() {
            return Err(SchedulerError::InvalidConfig(
                "grid has no operating days".into(),
            ));
        }
        Ok(())
    }
}
