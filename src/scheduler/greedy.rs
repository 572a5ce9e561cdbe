//! First-fit greedy assigner.
//!
//! # Algorithm
//!
//! 1. Walk sections in input order, and each section's courses in input order.
//! 2. Split "Both" courses into a lecture half and a lab half.
//! 3. For each component, enumerate patterns × faculty × rooms of the right
//!    type and take the first combination that fits all three ledgers.
//! 4. Record it. If nothing fits, report the component as skipped.
//!
//! With conflicts permitted, the first candidate always fits, so greedy
//! places everything that has a faculty member, a matching room, and at
//! least one pattern on the grid.
//!
//! # Complexity
//! O(n · p · f · r · k) where n = obligations, p = patterns, f = faculty,
//! r = rooms, k = sessions already booked on a resource-day.

use tracing::{debug, warn};

use super::{Algorithm, Obligation, SchedulingContext};
use crate::config::BothRepresentation;
use crate::conflict::RunState;
use crate::models::{Schedule, SkipReason};

/// Single-pass first-fit assigner.
///
/// # Example
///
/// ```
/// use std::borrow::Cow;
/// use u_timetable::models::{Course, Faculty, Room, Section, TimeGrid};
/// use u_timetable::scheduler::{GreedyAssigner, SchedulingContext};
///
/// let courses = vec![Course::new("CS101", "BSCS", 1, 1).with_hours(2)];
/// let rooms = vec![Room::lecture("R101")];
/// let faculty = vec![Faculty::new("Alice")];
/// let sections = vec![Section::new("BSCS1A", "BSCS", 1, 1)];
/// let grid = TimeGrid::default();
/// let ctx = SchedulingContext::new(
///     &courses,
///     &rooms,
///     Cow::Borrowed(&faculty),
///     &sections,
///     &grid,
///     None,
/// );
///
/// let schedule = GreedyAssigner::new(false).assign(&ctx);
/// assert_eq!(schedule.entry_count(), 1);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyAssigner {
    allow_conflicts: bool,
}

impl GreedyAssigner {
    /// Creates an assigner.
    pub fn new(allow_conflicts: bool) -> Self {
        Self { allow_conflicts }
    }

    /// Places every obligation it can.
    pub fn assign(&self, ctx: &SchedulingContext<'_>) -> Schedule {
        let mut state = RunState::new(self.allow_conflicts);
        let mut schedule = Schedule::new();

        for section in ctx.sections {
            for course in ctx.courses_for(section) {
                let mut previous_failed = false;
                let obligations =
                    Obligation::for_course(course, section, BothRepresentation::Split);
                for obligation in obligations {
                    if obligation.hours == 0 {
                        continue;
                    }
                    // Lab half waits on its lecture half.
                    if previous_failed && !state.allows_conflicts() {
                        warn!(
                            obligation = %obligation.name(),
                            "lecture half failed; lab not attempted"
                        );
                        schedule.add_skipped(obligation.skipped(SkipReason::PairedComponentFailed));
                        continue;
                    }
                    if let Err(reason) = self.place(ctx, &mut state, &obligation) {
                        warn!(obligation = %obligation.name(), ?reason, "could not schedule");
                        schedule.add_skipped(obligation.skipped(reason));
                        previous_failed = true;
                    }
                }
            }
        }

        debug!(
            entries = state.entry_count(),
            skipped = schedule.skipped.len(),
            "greedy pass finished"
        );
        schedule.entries = state.into_entries();
        schedule.algorithm = Some(Algorithm::Greedy);
        schedule
    }

    fn place(
        &self,
        ctx: &SchedulingContext<'_>,
        state: &mut RunState,
        obligation: &Obligation<'_>,
    ) -> Result<(), SkipReason> {
        let candidates = obligation.candidates(ctx, state.rotation())?;
        let section = obligation.section;
        let chosen = candidates
            .into_iter()
            .find(|c| state.can_place(&c.pattern, &c.faculty, &c.room, &section.name))
            .ok_or(SkipReason::NoFeasibleSlot)?;
        state.record(obligation.course, section, &chosen, obligation.tag());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        ComponentKind, Course, CourseType, Day, Faculty, Room, RoomType, Section, TimeGrid,
        TimeOfDay,
    };
    use std::borrow::Cow;

    fn t(s: &str) -> TimeOfDay {
        s.parse().unwrap()
    }

    fn one_slot_grid() -> TimeGrid {
        // Only 07:00 → 08:00 on Monday
        TimeGrid::new(t("07:00"), t("08:30"), vec![Day::Monday])
    }

    fn run(
        courses: &[Course],
        rooms: &[Room],
        faculty: &[Faculty],
        sections: &[Section],
        grid: &TimeGrid,
        allow_conflicts: bool,
    ) -> Schedule {
        let ctx = SchedulingContext::new(
            courses,
            rooms,
            Cow::Borrowed(faculty),
            sections,
            grid,
            None,
        );
        GreedyAssigner::new(allow_conflicts).assign(&ctx)
    }

    #[test]
    fn test_two_lectures_two_rooms_two_faculty() {
        let courses = vec![
            Course::new("CS101", "BSCS", 1, 1).with_hours(2),
            Course::new("CS102", "BSCS", 1, 1).with_hours(2),
        ];
        let rooms = vec![Room::lecture("R1"), Room::lecture("R2")];
        let faculty = vec![Faculty::new("Alice"), Faculty::new("Bob")];
        let sections = vec![Section::new("BSCS1A", "BSCS", 1, 1)];

        let s = run(&courses, &rooms, &faculty, &sections, &TimeGrid::default(), false);
        assert_eq!(s.entry_count(), 2);
        assert!(s.is_conflict_free());
        assert!(s.skipped.is_empty());
        assert_eq!(s.algorithm, Some(Algorithm::Greedy));
        // First fit: Monday 07:00, then the section is busy until 09:00
        assert_eq!(s.entries[0].start_time, t("07:00"));
        assert_eq!(s.entries[1].start_time, t("09:00"));
        assert_eq!(s.entries[1].faculty, "Alice");
    }

    #[test]
    fn test_single_slot_skips_second_course() {
        let courses = vec![
            Course::new("CS101", "BSCS", 1, 1).with_hours(1),
            Course::new("CS102", "BSCS", 1, 1).with_hours(1),
        ];
        let rooms = vec![Room::lecture("R1")];
        let faculty = vec![Faculty::new("Alice")];
        let sections = vec![Section::new("BSCS1A", "BSCS", 1, 1)];

        let s = run(&courses, &rooms, &faculty, &sections, &one_slot_grid(), false);
        assert_eq!(s.entry_count(), 1);
        assert_eq!(s.skipped.len(), 1);
        assert_eq!(s.skipped[0].course_code, "CS102");
        assert_eq!(s.skipped[0].reason, SkipReason::NoFeasibleSlot);
    }

    #[test]
    fn test_conflicts_allowed_places_everything() {
        let courses = vec![
            Course::new("CS101", "BSCS", 1, 1).with_hours(1),
            Course::new("CS102", "BSCS", 1, 1).with_hours(1),
        ];
        let rooms = vec![Room::lecture("R1")];
        let faculty = vec![Faculty::new("Alice")];
        let sections = vec![Section::new("BSCS1A", "BSCS", 1, 1)];

        let s = run(&courses, &rooms, &faculty, &sections, &one_slot_grid(), true);
        assert_eq!(s.entry_count(), 2);
        assert!(s.skipped.is_empty());
        assert!(!s.is_conflict_free());
    }

    #[test]
    fn test_both_course_split_into_matching_rooms() {
        let courses = vec![Course::new("CS201", "BSCS", 2, 1)
            .with_type(CourseType::Both)
            .with_hours(6)];
        let rooms = vec![Room::lab("LAB1"), Room::lecture("R1")];
        let faculty = vec![Faculty::new("Alice")];
        let sections = vec![Section::new("BSCS2A", "BSCS", 2, 1)];

        let s = run(&courses, &rooms, &faculty, &sections, &TimeGrid::default(), false);
        assert_eq!(s.entry_count(), 4);
        let lecture: Vec<_> = s
            .entries
            .iter()
            .filter(|e| e.component_type == CourseType::Lecture)
            .collect();
        let lab: Vec<_> = s
            .entries
            .iter()
            .filter(|e| e.component_type == CourseType::Lab)
            .collect();
        assert_eq!(lecture.len(), 2);
        assert_eq!(lab.len(), 2);
        assert!(lecture.iter().all(|e| e.room == "R1" && e.duration_minutes() == 90));
        assert!(lab.iter().all(|e| e.room == "LAB1" && e.duration_minutes() == 90));
        assert!(s.is_conflict_free());
    }

    #[test]
    fn test_lab_not_attempted_after_lecture_fails() {
        let courses = vec![Course::new("CS201", "BSCS", 2, 1)
            .with_type(CourseType::Both)
            .with_hours(4)];
        // No lecture room at all
        let rooms = vec![Room::lab("LAB1")];
        let faculty = vec![Faculty::new("Alice")];
        let sections = vec![Section::new("BSCS2A", "BSCS", 2, 1)];

        let s = run(&courses, &rooms, &faculty, &sections, &TimeGrid::default(), false);
        assert!(s.is_empty());
        assert_eq!(s.skipped.len(), 2);
        assert_eq!(s.skipped[0].reason, SkipReason::NoRoom(RoomType::Lecture));
        assert_eq!(s.skipped[0].component, Some(ComponentKind::Lecture));
        assert_eq!(s.skipped[1].reason, SkipReason::PairedComponentFailed);
        assert_eq!(s.skipped[1].component, Some(ComponentKind::Lab));
    }

    #[test]
    fn test_empty_faculty_pool_skips() {
        let courses = vec![Course::new("CS101", "BSCS", 1, 1).with_hours(2)];
        let rooms = vec![Room::lecture("R1")];
        let sections = vec![Section::new("BSCS1A", "BSCS", 1, 1)];

        let s = run(&courses, &rooms, &[], &sections, &TimeGrid::default(), true);
        assert!(s.is_empty());
        assert_eq!(s.skipped[0].reason, SkipReason::NoFaculty);
        assert_eq!(s.skipped[0].component, None);
    }

    #[test]
    fn test_rotation_moves_next_pair() {
        // Two 3-hour lectures for one section: the second one starts on
        // Tue/Fri because the first advanced the rotation.
        let courses = vec![
            Course::new("A", "BSCS", 1, 1).with_hours(3),
            Course::new("B", "BSCS", 1, 1).with_hours(3),
        ];
        let rooms = vec![Room::lecture("R1")];
        let faculty = vec![Faculty::new("Alice")];
        let sections = vec![Section::new("S", "BSCS", 1, 1)];

        let s = run(&courses, &rooms, &faculty, &sections, &TimeGrid::default(), false);
        assert_eq!(s.entry_count(), 4);
        assert_eq!(s.entries[0].day, Day::Monday);
        assert_eq!(s.entries[1].day, Day::Thursday);
        assert_eq!(s.entries[2].day, Day::Tuesday);
        assert_eq!(s.entries[2].start_time, t("07:00"));
        assert_eq!(s.entries[3].day, Day::Friday);
    }
}
