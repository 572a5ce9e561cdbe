//! Backtracking search with MRV, LCV, and forward checking.
//!
//! Forward checking prunes the domains of unassigned variables in place.
//! Every pruned domain is snapshotted on a trail first, so a rejected
//! value restores the domains exactly.

use super::{CspModel, Value};

/// One search over a model.
#[derive(Debug)]
pub struct Search<'m, 'a> {
    model: &'m mut CspModel<'a>,
    assignment: Vec<Option<Value>>,
    assigned: usize,
    max_iterations: usize,
    allow_conflicts: bool,
}

impl<'m, 'a> Search<'m, 'a> {
    /// Creates a search. `max_iterations` caps the partial assignment size.
    pub fn new(model: &'m mut CspModel<'a>, max_iterations: usize, allow_conflicts: bool) -> Self {
        let n = model.len();
        Self {
            model,
            assignment: vec![None; n],
            assigned: 0,
            max_iterations,
            allow_conflicts,
        }
    }

    /// Runs the search. Returns one value per variable, in creation order.
    pub fn run(mut self) -> Option<Vec<Value>> {
        if !self.backtrack() {
            return None;
        }
        self.assignment.into_iter().collect()
    }

    fn backtrack(&mut self) -> bool {
        if self.assigned == self.model.len() {
            return true;
        }
        if self.assigned > self.max_iterations {
            return false;
        }

        let Some(var) = self.select_variable() else {
            return false;
        };

        for value in self.order_values(var) {
            if !self.allow_conflicts && !self.consistent(var, value) {
                continue;
            }
            self.assign(var, value);

            if self.allow_conflicts {
                if self.backtrack() {
                    return true;
                }
            } else if let Some(trail) = self.forward_check(var, value) {
                if self.backtrack() {
                    return true;
                }
                self.restore(trail);
            }

            self.unassign(var);
        }
        false
    }

    /// MRV: smallest current domain, earliest variable on ties.
    fn select_variable(&self) -> Option<usize> {
        (0..self.model.len())
            .filter(|&v| self.assignment[v].is_none())
            .min_by_key(|&v| self.model.domains[v].len())
    }

    /// LCV: values ordered by how many assigned variables they clash with.
    /// Ties keep domain order.
    fn order_values(&self, var: usize) -> Vec<Value> {
        let mut scored: Vec<(usize, Value)> = self.model.domains[var]
            .iter()
            .map(|&value| (self.conflict_count(var, value), value))
            .collect();
        scored.sort_by_key(|(count, _)| *count);
        scored.into_iter().map(|(_, value)| value).collect()
    }

    fn assigned_values(&self) -> impl Iterator<Item = (usize, Value)> + '_ {
        self.assignment
            .iter()
            .enumerate()
            .filter_map(|(v, value)| value.map(|value| (v, value)))
    }

    fn conflict_count(&self, var: usize, value: Value) -> usize {
        self.assigned_values()
            .filter(|&(other, other_value)| !self.model.compatible(var, value, other, other_value))
            .count()
    }

    fn consistent(&self, var: usize, value: Value) -> bool {
        self.assigned_values()
            .all(|(other, other_value)| self.model.compatible(var, value, other, other_value))
    }

    fn assign(&mut self, var: usize, value: Value) {
        self.assignment[var] = Some(value);
        self.assigned += 1;
    }

    fn unassign(&mut self, var: usize) {
        self.assignment[var] = None;
        self.assigned -= 1;
    }

    /// Removes values incompatible with `var = value` from every other
    /// unassigned domain.
    ///
    /// Returns the trail of replaced domains, or `None` (with domains
    /// already restored) if one was wiped out.
    fn forward_check(&mut self, var: usize, value: Value) -> Option<Vec<(usize, Vec<Value>)>> {
        let mut trail = Vec::new();
        for other in 0..self.model.len() {
            if other == var || self.assignment[other].is_some() {
                continue;
            }
            let model = &*self.model;
            let kept: Vec<Value> = model.domains[other]
                .iter()
                .copied()
                .filter(|&v| model.compatible(var, value, other, v))
                .collect();
            if kept.len() == self.model.domains[other].len() {
                continue;
            }
            let wiped = kept.is_empty();
            let old = std::mem::replace(&mut self.model.domains[other], kept);
            trail.push((other, old));
            if wiped {
                self.restore(trail);
                return None;
            }
        }
        Some(trail)
    }

    fn restore(&mut self, trail: Vec<(usize, Vec<Value>)>) {
        for (var, domain) in trail.into_iter().rev() {
            self.model.domains[var] = domain;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BothRepresentation;
    use crate::models::{Course, CourseType, Day, Faculty, Room, Section, TimeGrid, TimeOfDay};
    use crate::scheduler::SchedulingContext;
    use std::borrow::Cow;

    fn t(s: &str) -> TimeOfDay {
        s.parse().unwrap()
    }

    #[test]
    fn test_finds_assignment_and_restores_nothing_on_success() {
        let courses = vec![
            Course::new("A", "BSCS", 1, 1).with_hours(2),
            Course::new("B", "BSCS", 1, 1).with_hours(2),
        ];
        let rooms = vec![Room::lecture("R1")];
        let faculty = vec![Faculty::new("Alice")];
        let sections = vec![Section::new("S", "BSCS", 1, 1)];
        let grid = TimeGrid::new(t("07:00"), t("11:30"), vec![Day::Monday]);
        let ctx = SchedulingContext::new(
            &courses,
            &rooms,
            Cow::Borrowed(&faculty),
            &sections,
            &grid,
            None,
        );

        let mut model = CspModel::build(&ctx, BothRepresentation::Split);
        let assignment = Search::new(&mut model, 1000, false).run().unwrap();
        assert_eq!(assignment.len(), 2);
        assert!(model.compatible(0, assignment[0], 1, assignment[1]));
    }

    #[test]
    fn test_mrv_prefers_smallest_domain() {
        // The lab (2 patterns on Mon/Thu) is assigned before the lecture
        let courses = vec![
            Course::new("LEC", "BSCS", 1, 1).with_hours(1),
            Course::new("LAB", "BSCS", 1, 1).with_type(CourseType::Lab).with_hours(2),
        ];
        let rooms = vec![Room::lecture("R1"), Room::lab("L1")];
        let faculty = vec![Faculty::new("Alice")];
        let sections = vec![Section::new("S", "BSCS", 1, 1)];
        let grid = TimeGrid::new(t("07:00"), t("08:30"), vec![Day::Monday, Day::Thursday]);
        let ctx = SchedulingContext::new(
            &courses,
            &rooms,
            Cow::Borrowed(&faculty),
            &sections,
            &grid,
            None,
        );

        let mut model = CspModel::build(&ctx, BothRepresentation::Split);
        // lecture: 2 days × 1 start; lab: 1 pair × 1 start
        assert_eq!(model.domain(0).len(), 2);
        assert_eq!(model.domain(1).len(), 1);
        let search = Search::new(&mut model, 1000, false);
        assert_eq!(search.select_variable(), Some(1));
    }

    #[test]
    fn test_lcv_orders_by_clashes_with_assigned() {
        let courses = vec![
            Course::new("A", "BSCS", 1, 1).with_hours(1),
            Course::new("B", "BSCS", 1, 1).with_hours(1),
            Course::new("C", "BSCS", 1, 1).with_hours(1),
        ];
        let rooms = vec![Room::lecture("R1"), Room::lecture("R2")];
        let faculty = vec![Faculty::new("Alice")];
        let sections = vec![Section::new("S", "BSCS", 1, 1)];
        let grid = TimeGrid::new(t("07:00"), t("09:30"), vec![Day::Monday]);
        let ctx = SchedulingContext::new(
            &courses,
            &rooms,
            Cow::Borrowed(&faculty),
            &sections,
            &grid,
            None,
        );

        let mut model = CspModel::build(&ctx, BothRepresentation::Split);
        let starts: Vec<TimeOfDay> = model.variables()[2]
            .patterns
            .iter()
            .map(|p| p.sessions[0].start)
            .collect();
        assert_eq!(starts, vec![t("07:00"), t("07:30"), t("08:00")]);
        // pattern-major, then room: [07:00 R1, 07:00 R2, 07:30 R1, 07:30 R2, 08:00 R1, 08:00 R2]
        let domain = model.domain(2).to_vec();
        assert_eq!(domain.len(), 6);
        // A at 07:00-08:00 and B at 08:00-09:00, both in R1
        let a = model.domain(0)[0];
        let b = model.domain(1)[4];

        let mut search = Search::new(&mut model, 1000, true);
        search.assign(0, a);
        search.assign(1, b);

        // C at 07:00 or 08:00 clashes with one of them, at 07:30 with both
        let counts: Vec<usize> = domain.iter().map(|&v| search.conflict_count(2, v)).collect();
        assert_eq!(counts, vec![1, 1, 2, 2, 1, 1]);

        let ordered = search.order_values(2);
        assert_eq!(
            ordered,
            vec![domain[0], domain[1], domain[4], domain[5], domain[2], domain[3]]
        );
    }

    #[test]
    fn test_wipeout_restores_domains() {
        let courses = vec![
            Course::new("A", "BSCS", 1, 1).with_hours(1),
            Course::new("B", "BSCS", 1, 1).with_hours(1),
        ];
        let rooms = vec![Room::lecture("R1")];
        let faculty = vec![Faculty::new("Alice")];
        let sections = vec![Section::new("S", "BSCS", 1, 1)];
        let grid = TimeGrid::new(t("07:00"), t("08:30"), vec![Day::Monday]);
        let ctx = SchedulingContext::new(
            &courses,
            &rooms,
            Cow::Borrowed(&faculty),
            &sections,
            &grid,
            None,
        );

        let mut model = CspModel::build(&ctx, BothRepresentation::Split);
        let before = model.clone();
        assert!(Search::new(&mut model, 1000, false).run().is_none());
        for var in 0..model.len() {
            assert_eq!(model.domain(var), before.domain(var));
        }
    }
}
