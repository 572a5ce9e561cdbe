//! Timetable assigners and the run entry point.
//!
//! Three interchangeable assigners share one conflict model:
//!
//! - [`GreedyAssigner`]: single pass, first fit in enumeration order.
//! - [`BacktrackingAssigner`]: hardest obligations first, recursive search
//!   with undo.
//! - [`CspSolver`](crate::csp::CspSolver): AC-3 pruning, then MRV/LCV
//!   search with forward checking.
//!
//! [`TimetableScheduler`] validates the input, picks the assigner named in
//! the [`SchedulerConfig`], and applies the fallback policy when a strict
//! search gives up.
//!
//! # KPI
//!
//! [`ScheduleKpi`] computes room usage, utilization, and capacity
//! shortfalls for a produced schedule.
//!
//! # References
//!
//! - Schaerf (1999), "A Survey of Automated Timetabling"
//! - Russell & Norvig (2020), "Artificial Intelligence: A Modern Approach", Ch. 6

mod backtracking;
mod context;
mod greedy;
mod kpi;
mod obligation;

pub use backtracking::BacktrackingAssigner;
pub use context::SchedulingContext;
pub use greedy::GreedyAssigner;
pub use kpi::{RoomUsage, ScheduleKpi};
pub use obligation::Obligation;

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;
use tracing::{info, warn};

use crate::config::{FallbackPolicy, SchedulerConfig};
use crate::csp::CspSolver;
use crate::error::{Result, SchedulerError};
use crate::models::{Course, Fallback, FallbackReason, Faculty, Room, Schedule, Section};
use crate::validation::validate_input;

/// Assignment algorithm selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    /// First-fit single pass.
    #[default]
    Greedy,
    /// Recursive search with undo.
    Backtracking,
    /// AC-3 plus MRV/LCV search with forward checking.
    #[serde(alias = "constraint satisfaction", alias = "csp")]
    ConstraintSatisfaction,
}

impl Algorithm {
    /// Human-readable name.
    pub fn label(self) -> &'static str {
        match self {
            Algorithm::Greedy => "greedy",
            Algorithm::Backtracking => "backtracking",
            Algorithm::ConstraintSatisfaction => "constraint satisfaction",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Algorithm {
    type Err = SchedulerError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "greedy" => Ok(Algorithm::Greedy),
            "backtracking" => Ok(Algorithm::Backtracking),
            "constraint satisfaction" | "constraint_satisfaction" | "csp" => {
                Ok(Algorithm::ConstraintSatisfaction)
            }
            _ => Err(SchedulerError::UnknownAlgorithm(s.to_string())),
        }
    }
}

/// Input tables for one run.
///
/// Courses, rooms, and sections are required. Without a faculty table a
/// single placeholder member teaches everything.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimetableInput {
    /// Course offerings.
    pub courses: Option<Vec<Course>>,
    /// Rooms.
    pub rooms: Option<Vec<Room>>,
    /// Faculty pool.
    pub faculty: Option<Vec<Faculty>>,
    /// Sections.
    pub sections: Option<Vec<Section>>,
}

impl TimetableInput {
    /// Creates an input with no tables.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the course table.
    pub fn with_courses(mut self, courses: Vec<Course>) -> Self {
        self.courses = Some(courses);
        self
    }

    /// Sets the room table.
    pub fn with_rooms(mut self, rooms: Vec<Room>) -> Self {
        self.rooms = Some(rooms);
        self
    }

    /// Sets the faculty table.
    pub fn with_faculty(mut self, faculty: Vec<Faculty>) -> Self {
        self.faculty = Some(faculty);
        self
    }

    /// Sets the section table.
    pub fn with_sections(mut self, sections: Vec<Section>) -> Self {
        self.sections = Some(sections);
        self
    }
}

/// Runs one configured scheduling pass.
///
/// # Example
///
/// ```
/// use u_timetable::config::SchedulerConfig;
/// use u_timetable::models::{Course, Faculty, Room, Section};
/// use u_timetable::scheduler::{Algorithm, TimetableInput, TimetableScheduler};
///
/// let input = TimetableInput::new()
///     .with_courses(vec![
///         Course::new("CS101", "BSCS", 1, 1).with_hours(2),
///         Course::new("CS102", "BSCS", 1, 1).with_hours(2),
///     ])
///     .with_rooms(vec![Room::lecture("R101"), Room::lecture("R102")])
///     .with_faculty(vec![Faculty::new("Alice"), Faculty::new("Bob")])
///     .with_sections(vec![Section::new("BSCS1A", "BSCS", 1, 1)]);
///
/// let config = SchedulerConfig::new().with_algorithm(Algorithm::Backtracking);
/// let schedule = TimetableScheduler::new(config).run(&input).unwrap();
/// assert_eq!(schedule.entry_count(), 2);
/// assert!(schedule.is_conflict_free());
/// ```
#[derive(Debug, Clone, Default)]
pub struct TimetableScheduler {
    config: SchedulerConfig,
}

impl TimetableScheduler {
    /// Creates a scheduler.
    pub fn new(config: SchedulerConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Produces a timetable.
    ///
    /// Fails only on structural problems: missing tables, invalid input,
    /// or an unusable configuration. Unplaceable obligations are reported
    /// in [`Schedule::skipped`].
    pub fn run(&self, input: &TimetableInput) -> Result<Schedule> {
        self.config.validate()?;

        let courses = input
            .courses
            .as_deref()
            .ok_or(SchedulerError::MissingTable("courses"))?;
        let rooms = input
            .rooms
            .as_deref()
            .ok_or(SchedulerError::MissingTable("rooms"))?;
        let sections = input
            .sections
            .as_deref()
            .ok_or(SchedulerError::MissingTable("sections"))?;
        let faculty: Cow<'_, [Faculty]> = match input.faculty.as_deref() {
            Some(faculty) => Cow::Borrowed(faculty),
            None => Cow::Owned(vec![Faculty::placeholder()]),
        };

        validate_input(courses, rooms, &faculty, sections).map_err(SchedulerError::Validation)?;

        let config = &self.config;
        let ctx = SchedulingContext::new(
            courses,
            rooms,
            faculty,
            sections,
            &config.grid,
            config.term_filter,
        );
        info!(
            algorithm = %config.algorithm,
            courses = ctx.courses.len(),
            sections = sections.len(),
            "scheduling run started"
        );
        for course in ctx.courses.iter().filter(|c| c.hours_per_week == 0) {
            warn!(
                course = %course.code,
                program = %course.program,
                "course has no weekly hours, nothing to place"
            );
        }

        let schedule = match config.algorithm {
            Algorithm::Greedy => GreedyAssigner::new(config.allow_conflicts).assign(&ctx),
            Algorithm::Backtracking => {
                BacktrackingAssigner::new(config.max_iterations, config.allow_conflicts)
                    .assign(&ctx)
                    .unwrap_or_else(|| {
                        self.fall_back(
                            &ctx,
                            Algorithm::Backtracking,
                            FallbackReason::SearchExhausted,
                        )
                    })
            }
            Algorithm::ConstraintSatisfaction => CspSolver::new(
                config.max_iterations,
                config.allow_conflicts,
                config.both_representation,
            )
            .solve(&ctx)
            .unwrap_or_else(|reason| {
                self.fall_back(&ctx, Algorithm::ConstraintSatisfaction, reason)
            }),
        };

        info!(
            entries = schedule.entry_count(),
            skipped = schedule.skipped.len(),
            "scheduling run finished"
        );
        Ok(schedule)
    }

    /// Re-runs greedy after a strict search failed.
    fn fall_back(
        &self,
        ctx: &SchedulingContext<'_>,
        requested: Algorithm,
        reason: FallbackReason,
    ) -> Schedule {
        let conflicts_permitted = self.config.allow_conflicts
            || self.config.fallback == FallbackPolicy::GreedyWithConflicts;
        info!(
            %requested,
            ?reason,
            conflicts_permitted,
            "strict search failed, falling back to greedy"
        );

        let mut schedule = GreedyAssigner::new(conflicts_permitted).assign(ctx);
        if !schedule.skipped.is_empty() {
            warn!(skipped = schedule.skipped.len(), "fallback left obligations unplaced");
        }
        schedule.fallback = Some(Fallback {
            requested,
            reason,
            conflicts_permitted,
        });
        schedule
    }
}
