//! Occupancy ledgers and run-scoped booking state.
//!
//! A ledger maps resource name → day → booked sessions. A run keeps three
//! (faculty, room, section) plus the flat entry list and the day-pairing
//! rotation counter. All of it lives in [`RunState`], owned by one call.
//!
//! Every `record` returns a [`RecordHandle`]; `unrecord` consumes it and
//! removes exactly the bookings and entries tagged with that handle.

use std::collections::HashMap;

use crate::models::{Course, CourseType, Day, Pattern, ScheduleEntry, Section, Session};

/// Identifies one recorded placement for undo.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct RecordHandle(u64);

/// A candidate placement: when, by whom, and where.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    /// Weekly sessions.
    pub pattern: Pattern,
    /// Faculty name.
    pub faculty: String,
    /// Room name.
    pub room: String,
}

impl Placement {
    /// Creates a placement.
    pub fn new(pattern: Pattern, faculty: impl Into<String>, room: impl Into<String>) -> Self {
        Self {
            pattern,
            faculty: faculty.into(),
            room: room.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Booking {
    record: u64,
    session: Session,
}

/// Bookings for one resource class.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    bookings: HashMap<String, HashMap<Day, Vec<Booking>>>,
}

impl Ledger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `session` overlaps anything booked for `resource` that day.
    pub fn is_free(&self, resource: &str, session: &Session) -> bool {
        self.bookings
            .get(resource)
            .and_then(|days| days.get(&session.day))
            .map_or(true, |booked| {
                !booked.iter().any(|b| b.session.conflicts_with(session))
            })
    }

    /// Sessions booked for `resource` on `day`.
    pub fn sessions(&self, resource: &str, day: Day) -> Vec<Session> {
        self.bookings
            .get(resource)
            .and_then(|days| days.get(&day))
            .map(|booked| booked.iter().map(|b| b.session).collect())
            .unwrap_or_default()
    }

    /// Total booked sessions across all resources.
    pub fn len(&self) -> usize {
        self.bookings
            .values()
            .flat_map(|days| days.values())
            .map(Vec::len)
            .sum()
    }

    /// Whether nothing is booked.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn book(&mut self, resource: &str, record: u64, session: Session) {
        self.bookings
            .entry(resource.to_string())
            .or_default()
            .entry(session.day)
            .or_default()
            .push(Booking { record, session });
    }

    fn release(&mut self, resource: &str, record: u64) {
        let Some(days) = self.bookings.get_mut(resource) else {
            return;
        };
        days.retain(|_, booked| {
            booked.retain(|b| b.record != record);
            !booked.is_empty()
        });
        if days.is_empty() {
            self.bookings.remove(resource);
        }
    }
}

/// The three resource ledgers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledgers {
    /// Faculty bookings.
    pub faculty: Ledger,
    /// Room bookings.
    pub room: Ledger,
    /// Section bookings.
    pub section: Ledger,
}

#[derive(Debug, Clone)]
struct RecordMeta {
    faculty: String,
    room: String,
    section: String,
    rotated: bool,
}

/// Mutable state of one scheduling run.
#[derive(Debug, Clone)]
pub struct RunState {
    ledgers: Ledgers,
    entries: Vec<(u64, ScheduleEntry)>,
    records: HashMap<u64, RecordMeta>,
    rotation: usize,
    next_record: u64,
    allow_conflicts: bool,
}

impl RunState {
    /// Creates empty run state.
    pub fn new(allow_conflicts: bool) -> Self {
        Self {
            ledgers: Ledgers::default(),
            entries: Vec::new(),
            records: HashMap::new(),
            rotation: 0,
            next_record: 0,
            allow_conflicts,
        }
    }

    /// Whether conflicts are permitted in this run.
    pub fn allows_conflicts(&self) -> bool {
        self.allow_conflicts
    }

    /// Current day-pairing rotation counter.
    pub fn rotation(&self) -> usize {
        self.rotation
    }

    /// Read access to the ledgers.
    pub fn ledgers(&self) -> &Ledgers {
        &self.ledgers
    }

    /// Number of entries placed so far.
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Whether `pattern` fits the faculty, room, and section ledgers.
    ///
    /// Stops at the first conflicting session. Always true when the run
    /// permits conflicts.
    pub fn can_place(&self, pattern: &Pattern, faculty: &str, room: &str, section: &str) -> bool {
        if self.allow_conflicts {
            return true;
        }
        pattern.sessions.iter().all(|s| {
            self.ledgers.faculty.is_free(faculty, s)
                && self.ledgers.room.is_free(room, s)
                && self.ledgers.section.is_free(section, s)
        })
    }

    /// Books a placement in all three ledgers and appends its entries.
    ///
    /// Multi-session patterns advance the rotation counter.
    pub fn record(
        &mut self,
        course: &Course,
        section: &Section,
        placement: &Placement,
        component_type: CourseType,
    ) -> RecordHandle {
        let id = self.next_record;
        self.next_record += 1;

        for session in &placement.pattern.sessions {
            self.ledgers.faculty.book(&placement.faculty, id, *session);
            self.ledgers.room.book(&placement.room, id, *session);
            self.ledgers.section.book(&section.name, id, *session);
            self.entries.push((
                id,
                ScheduleEntry::new(
                    course,
                    section,
                    session,
                    placement.room.as_str(),
                    placement.faculty.as_str(),
                    component_type,
                ),
            ));
        }

        let rotated = placement.pattern.is_multi_session();
        if rotated {
            self.rotation += 1;
        }

        self.records.insert(
            id,
            RecordMeta {
                faculty: placement.faculty.clone(),
                room: placement.room.clone(),
                section: section.name.clone(),
                rotated,
            },
        );
        RecordHandle(id)
    }

    /// Removes exactly what `record` added for `handle`.
    pub fn unrecord(&mut self, handle: RecordHandle) {
        let RecordHandle(id) = handle;
        let Some(meta) = self.records.remove(&id) else {
            return;
        };
        self.ledgers.faculty.release(&meta.faculty, id);
        self.ledgers.room.release(&meta.room, id);
        self.ledgers.section.release(&meta.section, id);
        self.entries.retain(|(record, _)| *record != id);
        if meta.rotated {
            self.rotation -= 1;
        }
    }

    /// Placed entries in placement order.
    pub fn entries(&self) -> impl Iterator<Item = &ScheduleEntry> {
        self.entries.iter().map(|(_, e)| e)
    }

    /// Consumes the state, yielding the placed entries.
    pub fn into_entries(self) -> Vec<ScheduleEntry> {
        self.entries.into_iter().map(|(_, e)| e).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TimeOfDay;

    fn t(s: &str) -> TimeOfDay {
        s.parse().unwrap()
    }

    fn course() -> Course {
        Course::new("CS101", "BSCS", 1, 1).with_hours(3)
    }

    fn section(name: &str) -> Section {
        Section::new(name, "BSCS", 1, 1).with_students(30)
    }

    fn paired(start: &str, end: &str) -> Pattern {
        Pattern::paired((Day::Monday, Day::Thursday), t(start), t(end))
    }

    fn single(day: Day, start: &str, end: &str) -> Pattern {
        Pattern::single(Session::new(day, t(start), t(end)))
    }

    #[test]
    fn test_record_books_all_three_ledgers() {
        let mut state = RunState::new(false);
        let p = Placement::new(paired("08:00", "09:30"), "Alice", "R1");
        state.record(&course(), &section("A"), &p, CourseType::Lecture);

        assert_eq!(state.entry_count(), 2);
        assert_eq!(state.ledgers().faculty.len(), 2);
        assert_eq!(state.ledgers().room.len(), 2);
        assert_eq!(state.ledgers().section.len(), 2);
        assert_eq!(state.ledgers().room.sessions("R1", Day::Thursday).len(), 1);
        assert_eq!(state.rotation(), 1);
    }

    #[test]
    fn test_can_place_checks_each_resource() {
        let mut state = RunState::new(false);
        assert!(!state.allows_conflicts());
        let p = Placement::new(single(Day::Monday, "08:00", "10:00"), "Alice", "R1");
        state.record(&course(), &section("A"), &p, CourseType::Lecture);

        let clash = single(Day::Monday, "09:00", "11:00");
        // Same faculty
        assert!(!state.can_place(&clash, "Alice", "R2", "B"));
        // Same room
        assert!(!state.can_place(&clash, "Bob", "R1", "B"));
        // Same section
        assert!(!state.can_place(&clash, "Bob", "R2", "A"));
        // Disjoint resources
        assert!(state.can_place(&clash, "Bob", "R2", "B"));
        // Back-to-back on the same resources
        assert!(state.can_place(&single(Day::Monday, "10:00", "11:00"), "Alice", "R1", "A"));
    }

    #[test]
    fn test_can_place_always_true_when_conflicts_allowed() {
        let mut state = RunState::new(true);
        assert!(state.allows_conflicts());
        let p = Placement::new(single(Day::Monday, "08:00", "10:00"), "Alice", "R1");
        state.record(&course(), &section("A"), &p, CourseType::Lecture);
        assert!(state.can_place(&p.pattern, "Alice", "R1", "A"));
    }

    #[test]
    fn test_single_session_does_not_rotate() {
        let mut state = RunState::new(false);
        let p = Placement::new(single(Day::Friday, "08:00", "10:00"), "Alice", "R1");
        state.record(&course(), &section("A"), &p, CourseType::Lecture);
        assert_eq!(state.rotation(), 0);
    }

    #[test]
    fn test_unrecord_restores_exact_state() {
        let mut state = RunState::new(false);
        let first = Placement::new(single(Day::Monday, "07:00", "08:00"), "Alice", "R1");
        state.record(&course(), &section("A"), &first, CourseType::Lecture);

        let before_ledgers = state.ledgers().clone();
        let before_entries: Vec<ScheduleEntry> = state.entries().cloned().collect();
        let before_rotation = state.rotation();

        let second = Placement::new(paired("09:00", "10:30"), "Alice", "R1");
        let handle = state.record(&course(), &section("A"), &second, CourseType::Lab);
        assert_ne!(state.ledgers(), &before_ledgers);

        state.unrecord(handle);
        assert_eq!(state.ledgers(), &before_ledgers);
        assert_eq!(state.entries().cloned().collect::<Vec<_>>(), before_entries);
        assert_eq!(state.rotation(), before_rotation);
    }

    #[test]
    fn test_unrecord_leaves_same_course_other_records() {
        // Two records for the same course and section; undo removes only one.
        let mut state = RunState::new(true);
        let c = course();
        let s = section("A");
        let a = Placement::new(single(Day::Monday, "07:00", "08:00"), "Alice", "R1");
        let b = Placement::new(single(Day::Tuesday, "07:00", "08:00"), "Alice", "R1");
        let _ha = state.record(&c, &s, &a, CourseType::Lecture);
        let hb = state.record(&c, &s, &b, CourseType::Lab);
        state.unrecord(hb);

        let remaining: Vec<ScheduleEntry> = state.into_entries();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].day, Day::Monday);
    }
}
