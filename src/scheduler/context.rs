//! Run context: the resolved input tables for one scheduling run.

use std::borrow::Cow;

use super::obligation::Obligation;
use crate::config::BothRepresentation;
use crate::models::{suitable_faculty, Course, Faculty, Room, Section, TimeGrid};

/// Read-only view of the tables a run schedules against.
///
/// Courses are already term-filtered. Faculty may be the placeholder pool.
#[derive(Debug, Clone)]
pub struct SchedulingContext<'a> {
    /// Courses to schedule, in input order.
    pub courses: Vec<&'a Course>,
    /// Rooms, in input order.
    pub rooms: &'a [Room],
    /// Faculty pool, in input order.
    pub faculty: Cow<'a, [Faculty]>,
    /// Sections, in input order.
    pub sections: &'a [Section],
    /// Bookable grid.
    pub grid: &'a TimeGrid,
}

impl<'a> SchedulingContext<'a> {
    /// Creates a context, keeping only courses of `term_filter` if given.
    pub fn new(
        courses: &'a [Course],
        rooms: &'a [Room],
        faculty: Cow<'a, [Faculty]>,
        sections: &'a [Section],
        grid: &'a TimeGrid,
        term_filter: Option<u32>,
    ) -> Self {
        let courses = courses
            .iter()
            .filter(|c| term_filter.map_or(true, |t| c.term == t))
            .collect();
        Self {
            courses,
            rooms,
            faculty,
            sections,
            grid,
        }
    }

    /// Courses a section must take, in input order.
    pub fn courses_for<'s>(
        &'s self,
        section: &'s Section,
    ) -> impl Iterator<Item = &'a Course> + 's {
        self.courses
            .iter()
            .copied()
            .filter(move |c| c.matches(&section.program, section.year_level, section.term))
    }

    /// Faculty eligible for `course`.
    pub fn faculty_for(&self, course: &Course) -> &[Faculty] {
        suitable_faculty(&self.faculty, course)
    }

    /// Every obligation, section-major then course order.
    ///
    /// Zero-hour components have nothing to place and are left out.
    pub fn obligations(&self, both: BothRepresentation) -> Vec<Obligation<'a>> {
        let mut obligations = Vec::new();
        for section in self.sections {
            for course in self.courses_for(section) {
                obligations.extend(
                    Obligation::for_course(course, section, both)
                        .into_iter()
                        .filter(|o| o.hours > 0),
                );
            }
        }
        obligations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CourseType;

    #[test]
    fn test_term_filter_and_matching() {
        let courses = vec![
            Course::new("A", "BSCS", 1, 1).with_hours(2),
            Course::new("B", "BSCS", 1, 2).with_hours(2),
            Course::new("C", "BSIT", 1, 1).with_hours(2),
        ];
        let sections = vec![Section::new("BSCS1A", "BSCS", 1, 1)];
        let grid = TimeGrid::default();

        let ctx = SchedulingContext::new(
            &courses,
            &[],
            Cow::Owned(vec![]),
            &sections,
            &grid,
            Some(1),
        );
        assert_eq!(ctx.courses.len(), 2);
        let codes: Vec<&str> = ctx.courses_for(&sections[0]).map(|c| c.code.as_str()).collect();
        assert_eq!(codes, vec!["A"]);

        let unfiltered = SchedulingContext::new(
            &courses,
            &[],
            Cow::Owned(vec![]),
            &sections,
            &grid,
            None,
        );
        assert_eq!(unfiltered.courses.len(), 3);
    }

    #[test]
    fn test_obligations_split_both_and_drop_zero_hours() {
        let courses = vec![
            Course::new("A", "BSCS", 1, 1).with_type(CourseType::Both).with_hours(6),
            Course::new("B", "BSCS", 1, 1).with_type(CourseType::Both).with_hours(1),
        ];
        let sections = vec![Section::new("BSCS1A", "BSCS", 1, 1)];
        let grid = TimeGrid::default();
        let ctx = SchedulingContext::new(&courses, &[], Cow::Owned(vec![]), &sections, &grid, None);

        let split = ctx.obligations(BothRepresentation::Split);
        // A → lecture 3 + lab 3; B → lecture 0 (dropped) + lab 1
        assert_eq!(split.len(), 3);
        assert_eq!(split[0].hours, 3);
        assert_eq!(split[2].course.code, "B");
        assert_eq!(split[2].hours, 1);

        let merged = ctx.obligations(BothRepresentation::Merged);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].hours, 6);
    }
}
