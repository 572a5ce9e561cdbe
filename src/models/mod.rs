//! Timetabling domain models.
//!
//! Provides the input tables (courses, rooms, faculty, sections), the time
//! grid, and the output schedule.
//!
//! # Domain Mappings
//!
//! | u-timetable | Generic scheduling |
//! |-------------|--------------------|
//! | Course × Section | Task |
//! | Course component | Activity |
//! | Room / Faculty / Section | Resource |
//! | Pattern | Time assignment |
//! | Schedule | Solution |

mod calendar;
mod course;
mod resource;
mod schedule;
mod section;
mod session;

pub use calendar::{rotated_day_pairs, Day, TimeGrid, TimeOfDay, DAY_PAIRS, SLOT_MINUTES};
pub use course::{ComponentKind, Course, CourseType};
pub use resource::{suitable_faculty, Faculty, Room, RoomType, PLACEHOLDER_FACULTY};
pub use schedule::{
    Fallback, FallbackReason, Schedule, ScheduleEntry, SkipReason, SkippedObligation,
    WeeklyTimetable,
};
pub use section::Section;
pub use session::{Pattern, Session};
