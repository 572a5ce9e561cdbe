//! Depth-first backtracking assigner.
//!
//! # Algorithm
//!
//! 1. Build every obligation and stable-sort by constraint complexity,
//!    hardest first (labs and long courses lead).
//! 2. `assign(i)`: enumerate feasible (pattern, faculty, room) options for
//!    obligation `i`, ordered by preference (earliest start hour, Saturday
//!    penalized).
//! 3. Record each option and recurse into `i + 1`. On failure, undo the
//!    record through its handle and try the next option.
//!
//! The search gives up once more entries are placed than the iteration
//! budget allows. Failure is reported as `None`; the caller decides on a
//! fallback.
//!
//! # Reference
//! Russell & Norvig (2020), "Artificial Intelligence: A Modern Approach",
//! Ch. 6.3: Backtracking Search for CSPs

use tracing::debug;

use super::{Algorithm, Obligation, SchedulingContext};
use crate::config::BothRepresentation;
use crate::conflict::RunState;
use crate::models::Schedule;

/// Recursive assigner with undo.
#[derive(Debug, Clone, Copy)]
pub struct BacktrackingAssigner {
    max_iterations: usize,
    allow_conflicts: bool,
}

impl BacktrackingAssigner {
    /// Creates an assigner with the given search budget.
    pub fn new(max_iterations: usize, allow_conflicts: bool) -> Self {
        Self {
            max_iterations,
            allow_conflicts,
        }
    }

    /// Searches for a complete assignment.
    ///
    /// Returns `None` when the options are exhausted or the budget is hit.
    pub fn assign(&self, ctx: &SchedulingContext<'_>) -> Option<Schedule> {
        let mut obligations = ctx.obligations(BothRepresentation::Split);
        obligations.sort_by(|a, b| b.complexity().cmp(&a.complexity()));
        debug!(obligations = obligations.len(), "backtracking search started");

        let mut state = RunState::new(self.allow_conflicts);
        if !self.search(ctx, &obligations, 0, &mut state) {
            debug!("backtracking search failed");
            return None;
        }

        let mut schedule = Schedule::new();
        schedule.entries = state.into_entries();
        schedule.algorithm = Some(Algorithm::Backtracking);
        Some(schedule)
    }

    fn search(
        &self,
        ctx: &SchedulingContext<'_>,
        obligations: &[Obligation<'_>],
        i: usize,
        state: &mut RunState,
    ) -> bool {
        let Some(obligation) = obligations.get(i) else {
            return true;
        };
        if state.entry_count() > self.max_iterations {
            return false;
        }

        let Ok(candidates) = obligation.candidates(ctx, state.rotation()) else {
            return false;
        };
        let section = obligation.section;
        let mut options: Vec<_> = candidates
            .into_iter()
            .filter(|c| state.can_place(&c.pattern, &c.faculty, &c.room, &section.name))
            .collect();
        options.sort_by_key(|c| c.pattern.preference());

        for option in &options {
            let handle = state.record(obligation.course, section, option, obligation.tag());
            if self.search(ctx, obligations, i + 1, state) {
                return true;
            }
            state.unrecord(handle);
        }
        false
    }
}
