//! Schedule (solution) model.
//!
//! A schedule is the flat list of placed sessions produced by one run,
//! together with the obligations that could not be placed and a record of
//! any fallback the run took.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{ComponentKind, Course, CourseType, Day, Section, Session, TimeOfDay};
use crate::conflict::{conflict_scan, Conflict};
use crate::scheduler::Algorithm;

/// One section's week: start time, then day, to the entry held there.
pub type WeeklyTimetable<'a> = BTreeMap<TimeOfDay, BTreeMap<Day, &'a ScheduleEntry>>;

/// A complete timetable produced by one scheduling run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Schedule {
    /// Placed sessions, in placement order.
    pub entries: Vec<ScheduleEntry>,
    /// Obligations that could not be placed without conflict.
    pub skipped: Vec<SkippedObligation>,
    /// Algorithm that produced the entries (after any fallback).
    pub algorithm: Option<Algorithm>,
    /// Set when a strict search gave up and a fallback produced the entries.
    pub fallback: Option<Fallback>,
}

/// One placed session of a course component for a section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// Course code.
    pub course_code: String,
    /// Course title.
    pub course_title: String,
    /// Section's program.
    pub program: String,
    /// Section's year level.
    pub year_level: u32,
    /// Section's term.
    pub term: u32,
    /// Section name.
    pub section: String,
    /// Day of the week.
    pub day: Day,
    /// Start time.
    pub start_time: TimeOfDay,
    /// End time.
    pub end_time: TimeOfDay,
    /// Room name.
    pub room: String,
    /// Faculty name.
    pub faculty: String,
    /// Component tag: `Lecture`, `Lab`, or `Both` for merged components.
    pub component_type: CourseType,
    /// Students in the section.
    pub students_count: u32,
}

/// An obligation the run could not place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedObligation {
    /// Course code.
    pub course_code: String,
    /// Section name.
    pub section: String,
    /// Component that failed, if the course was split.
    pub component: Option<ComponentKind>,
    /// Why placement failed.
    pub reason: SkipReason,
}

/// Classification of placement failures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkipReason {
    /// The faculty pool is empty.
    NoFaculty,
    /// No room of the required type exists.
    NoRoom(super::RoomType),
    /// Every candidate conflicts with something already booked.
    NoFeasibleSlot,
    /// The lab half was not attempted because the lecture half failed.
    PairedComponentFailed,
}

/// Why a strict search handed over to a fallback pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fallback {
    /// The algorithm that was requested.
    pub requested: Algorithm,
    /// What went wrong.
    pub reason: FallbackReason,
    /// Whether the fallback pass permitted conflicts.
    pub conflicts_permitted: bool,
}

/// Failure modes of the strict searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FallbackReason {
    /// Arc-consistency emptied a domain.
    ArcInconsistent,
    /// Search exhausted every option or hit the iteration budget.
    SearchExhausted,
}

impl ScheduleEntry {
    /// Builds an entry for one session.
    pub fn new(
        course: &Course,
        section: &Section,
        session: &Session,
        room: impl Into<String>,
        faculty: impl Into<String>,
        component_type: CourseType,
    ) -> Self {
        Self {
            course_code: course.code.clone(),
            course_title: course.title.clone(),
            program: section.program.clone(),
            year_level: section.year_level,
            term: section.term,
            section: section.name.clone(),
            day: session.day,
            start_time: session.start,
            end_time: session.end,
            room: room.into(),
            faculty: faculty.into(),
            component_type,
            students_count: section.student_count,
        }
    }

    /// The entry's time block as a session.
    pub fn session(&self) -> Session {
        Session::new(self.day, self.start_time, self.end_time)
    }

    /// Length in minutes.
    pub fn duration_minutes(&self) -> u16 {
        self.session().duration_minutes()
    }
}

impl Schedule {
    /// Creates an empty schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entry.
    pub fn add_entry(&mut self, entry: ScheduleEntry) {
        self.entries.push(entry);
    }

    /// Records a skipped obligation.
    pub fn add_skipped(&mut self, skipped: SkippedObligation) {
        self.skipped.push(skipped);
    }

    /// Whether nothing was scheduled.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries.
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Whether the run placed everything on its first strategy.
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty() && self.fallback.is_none()
    }

    /// Every resource double-booking in this schedule.
    pub fn conflicts(&self) -> Vec<Conflict> {
        conflict_scan(&self.entries)
    }

    /// Whether no resource is double-booked.
    pub fn is_conflict_free(&self) -> bool {
        self.conflicts().is_empty()
    }

    /// All entries for a section.
    pub fn entries_for_section(&self, section: &str) -> Vec<&ScheduleEntry> {
        self.entries.iter().filter(|e| e.section == section).collect()
    }

    /// All entries in a room.
    pub fn entries_for_room(&self, room: &str) -> Vec<&ScheduleEntry> {
        self.entries.iter().filter(|e| e.room == room).collect()
    }

    /// All entries taught by a faculty member.
    pub fn entries_for_faculty(&self, faculty: &str) -> Vec<&ScheduleEntry> {
        self.entries.iter().filter(|e| e.faculty == faculty).collect()
    }

    /// All entries for a course across sections.
    pub fn entries_for_course(&self, course_code: &str) -> Vec<&ScheduleEntry> {
        self.entries
            .iter()
            .filter(|e| e.course_code == course_code)
            .collect()
    }

    /// Weekly grid for one section.
    ///
    /// Rows are the distinct start times the section meets at, ascending.
    /// Only days with a class appear in a row. If two entries share a cell
    /// the first placed one is kept; [`Schedule::conflicts`] reports the
    /// double-booking.
    pub fn weekly_timetable(&self, section: &str) -> WeeklyTimetable<'_> {
        let mut timetable = WeeklyTimetable::new();
        for e in self.entries.iter().filter(|e| e.section == section) {
            timetable
                .entry(e.start_time)
                .or_default()
                .entry(e.day)
                .or_insert(e);
        }
        timetable
    }
}
