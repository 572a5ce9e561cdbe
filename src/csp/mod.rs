//! Constraint-satisfaction solver.
//!
//! Each obligation becomes a variable whose domain is every
//! (pattern, faculty, room) triple it could use. Every pair of distinct
//! variables is linked by one implicit `no_conflict` relation: two values
//! clash when they share a faculty member, a room, or a section and their
//! patterns overlap on a common day.
//!
//! # Algorithm
//!
//! 1. Build variables and unfiltered domains.
//! 2. Prune with AC-3 ([`ac3`]). An emptied domain means no solution.
//! 3. Search with MRV variable choice, LCV value order, and forward
//!    checking ([`search`]).
//! 4. Flatten the assignment in variable creation order.
//!
//! When conflicts are permitted the relation is not enforced: AC-3 and
//! forward checking are skipped and the first value of every domain wins.
//!
//! # Reference
//! - Mackworth (1977), "Consistency in Networks of Relations"
//! - Haralick & Elliott (1980), "Increasing Tree Search Efficiency for
//!   Constraint Satisfaction Problems"

mod ac3;
mod search;

pub use ac3::ac3;
pub use search::Search;

use tracing::debug;

use crate::config::BothRepresentation;
use crate::models::{FallbackReason, Pattern, Schedule, ScheduleEntry};
use crate::patterns::PatternGenerator;
use crate::scheduler::{Algorithm, Obligation, SchedulingContext};

/// One candidate assignment, as indices.
///
/// `pattern` indexes the variable's own pattern list. `faculty` and `room`
/// index the model-wide name tables, so equal indices mean the same
/// resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Value {
    /// Index into [`Variable::patterns`].
    pub pattern: usize,
    /// Index into the faculty table.
    pub faculty: usize,
    /// Index into the room table.
    pub room: usize,
}

/// A CSP variable.
#[derive(Debug, Clone)]
pub struct Variable<'a> {
    /// Unique name, e.g. `CS201_BSCS2A_Lab`.
    pub name: String,
    /// What it stands for.
    pub obligation: Obligation<'a>,
    /// Candidate patterns, in generator order.
    pub patterns: Vec<Pattern>,
}

/// Variables, their current domains, and the resource name tables.
#[derive(Debug, Clone)]
pub struct CspModel<'a> {
    variables: Vec<Variable<'a>>,
    domains: Vec<Vec<Value>>,
    faculty: Vec<String>,
    rooms: Vec<String>,
}

impl<'a> CspModel<'a> {
    /// Builds one variable per obligation with its full domain.
    ///
    /// Domain order is patterns × faculty × rooms of the matching type.
    pub fn build(ctx: &SchedulingContext<'a>, both: BothRepresentation) -> Self {
        let faculty: Vec<String> = ctx.faculty.iter().map(|f| f.name.clone()).collect();
        let rooms: Vec<String> = ctx.rooms.iter().map(|r| r.name.clone()).collect();
        let generator = PatternGenerator::new(ctx.grid);

        let mut variables = Vec::new();
        let mut domains = Vec::new();
        for obligation in ctx.obligations(both) {
            let patterns = generator.patterns(obligation.hours, obligation.pattern_kind(), 0);
            let faculty_ids: Vec<usize> = ctx
                .faculty_for(obligation.course)
                .iter()
                .filter_map(|f| faculty.iter().position(|name| *name == f.name))
                .collect();
            let room_type = obligation.room_type();
            let room_ids: Vec<usize> = ctx
                .rooms
                .iter()
                .enumerate()
                .filter(|(_, r)| r.room_type == room_type)
                .map(|(i, _)| i)
                .collect();

            let mut domain =
                Vec::with_capacity(patterns.len() * faculty_ids.len() * room_ids.len());
            for pattern in 0..patterns.len() {
                for &f in &faculty_ids {
                    for &room in &room_ids {
                        domain.push(Value {
                            pattern,
                            faculty: f,
                            room,
                        });
                    }
                }
            }

            variables.push(Variable {
                name: obligation.name(),
                obligation,
                patterns,
            });
            domains.push(domain);
        }

        Self {
            variables,
            domains,
            faculty,
            rooms,
        }
    }

    /// Number of variables.
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    /// Whether there are no variables.
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Variables in creation order.
    pub fn variables(&self) -> &[Variable<'a>] {
        &self.variables
    }

    /// Current domain of variable `var`.
    pub fn domain(&self, var: usize) -> &[Value] {
        &self.domains[var]
    }

    /// Whether any domain is empty.
    pub fn has_empty_domain(&self) -> bool {
        self.domains.iter().any(Vec::is_empty)
    }

    /// Whether `x = vx` and `y = vy` can hold together.
    pub fn compatible(&self, x: usize, vx: Value, y: usize, vy: Value) -> bool {
        let (a, b) = (&self.variables[x], &self.variables[y]);
        let shares = vx.faculty == vy.faculty
            || vx.room == vy.room
            || a.obligation.section.name == b.obligation.section.name;
        !shares || !a.patterns[vx.pattern].overlaps(&b.patterns[vy.pattern])
    }

    /// Emits entries for a complete assignment.
    ///
    /// Output order is variable creation order (section, then course, then
    /// component) with sessions in pattern order, whatever order the search
    /// assigned them in. The same input therefore always flattens to the
    /// same entry sequence.
    pub fn flatten(&self, assignment: &[Value]) -> Vec<ScheduleEntry> {
        let mut entries = Vec::new();
        for (variable, value) in self.variables.iter().zip(assignment) {
            let ob = &variable.obligation;
            for session in &variable.patterns[value.pattern].sessions {
                entries.push(ScheduleEntry::new(
                    ob.course,
                    ob.section,
                    session,
                    self.rooms[value.room].as_str(),
                    self.faculty[value.faculty].as_str(),
                    ob.tag(),
                ));
            }
        }
        entries
    }
}

/// CSP front end: build, prune, search, flatten.
#[derive(Debug, Clone, Copy)]
pub struct CspSolver {
    max_iterations: usize,
    allow_conflicts: bool,
    both: BothRepresentation,
}

impl CspSolver {
    /// Creates a solver.
    pub fn new(max_iterations: usize, allow_conflicts: bool, both: BothRepresentation) -> Self {
        Self {
            max_iterations,
            allow_conflicts,
            both,
        }
    }

    /// Solves the run, or reports why the strict search gave up.
    pub fn solve(&self, ctx: &SchedulingContext<'_>) -> Result<Schedule, FallbackReason> {
        let mut model = CspModel::build(ctx, self.both);
        debug!(variables = model.len(), "csp model built");

        if !self.allow_conflicts {
            if model.has_empty_domain() || !ac3(&mut model) {
                debug!("arc consistency emptied a domain");
                return Err(FallbackReason::ArcInconsistent);
            }
            debug!(
                values = model.domains.iter().map(Vec::len).sum::<usize>(),
                "arc consistency done"
            );
        }

        let assignment = Search::new(&mut model, self.max_iterations, self.allow_conflicts)
            .run()
            .ok_or(FallbackReason::SearchExhausted)?;

        let mut schedule = Schedule::new();
        schedule.entries = model.flatten(&assignment);
        schedule.algorithm = Some(Algorithm::ConstraintSatisfaction);
        Ok(schedule)
    }
}
