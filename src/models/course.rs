//! Course model.
//!
//! A course is a curriculum offering for one program, year level, and term.
//! Every section with the same triple must take it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::RoomType;
use crate::error::SchedulerError;

/// A course offering to be timetabled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    /// Course code (e.g., "CS101").
    pub code: String,
    /// Human-readable title.
    pub title: String,
    /// Degree program the course belongs to.
    pub program: String,
    /// Curriculum year level.
    pub year_level: u32,
    /// Academic term.
    pub term: u32,
    /// Lecture, lab, or both.
    pub course_type: CourseType,
    /// Credit units (descriptive).
    pub units: u32,
    /// Contact hours per week.
    pub hours_per_week: u32,
}

/// How a course is taught.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CourseType {
    /// Lecture only.
    Lecture,
    /// Laboratory only.
    Lab,
    /// Separate lecture and lab components.
    Both,
}

/// A single placeable component of a course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComponentKind {
    /// Lecture component.
    Lecture,
    /// Lab component.
    Lab,
}

impl Course {
    /// Creates a lecture course with zero hours. Use the builders to fill in.
    pub fn new(
        code: impl Into<String>,
        program: impl Into<String>,
        year_level: u32,
        term: u32,
    ) -> Self {
        Self {
            code: code.into(),
            title: String::new(),
            program: program.into(),
            year_level,
            term,
            course_type: CourseType::Lecture,
            units: 0,
            hours_per_week: 0,
        }
    }

    /// Sets the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the course type.
    pub fn with_type(mut self, course_type: CourseType) -> Self {
        self.course_type = course_type;
        self
    }

    /// Sets the credit units.
    pub fn with_units(mut self, units: u32) -> Self {
        self.units = units;
        self
    }

    /// Sets the weekly contact hours.
    pub fn with_hours(mut self, hours_per_week: u32) -> Self {
        self.hours_per_week = hours_per_week;
        self
    }

    /// Whether a section with this program/year/term takes this course.
    pub fn matches(&self, program: &str, year_level: u32, term: u32) -> bool {
        self.program == program && self.year_level == year_level && self.term == term
    }

    /// Components to place and their weekly hours.
    ///
    /// `Both` splits hours as lecture = ⌊H/2⌋, lab = H − lecture.
    pub fn components(&self) -> Vec<(ComponentKind, u32)> {
        match self.course_type {
            CourseType::Lecture => vec![(ComponentKind::Lecture, self.hours_per_week)],
            CourseType::Lab => vec![(ComponentKind::Lab, self.hours_per_week)],
            CourseType::Both => {
                let lecture = self.hours_per_week / 2;
                vec![
                    (ComponentKind::Lecture, lecture),
                    (ComponentKind::Lab, self.hours_per_week - lecture),
                ]
            }
        }
    }

    /// Ordering weight: higher means harder to place.
    ///
    /// +10 for Lab or Both, + weekly hours, +5 more for Both.
    pub fn constraint_complexity(&self) -> u32 {
        let mut complexity = self.hours_per_week;
        if matches!(self.course_type, CourseType::Lab | CourseType::Both) {
            complexity += 10;
        }
        if self.course_type == CourseType::Both {
            complexity += 5;
        }
        complexity
    }
}

impl CourseType {
    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            CourseType::Lecture => "Lecture",
            CourseType::Lab => "Lab",
            CourseType::Both => "Both",
        }
    }
}

impl fmt::Display for CourseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Lenient parsing of the course-type column.
///
/// Case and whitespace are ignored. Combined spellings such as
/// `"Lecture/Lab"` or `"lec+lab"` map to [`CourseType::Both`], which is then
/// split into one lecture-room and one lab-room component. Room types are
/// never guessed from substrings: anything not listed is rejected.
impl FromStr for CourseType {
    type Err = SchedulerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .to_ascii_lowercase()
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        match normalized.as_str() {
            "lecture" | "lec" => Ok(CourseType::Lecture),
            "lab" | "laboratory" => Ok(CourseType::Lab),
            "both" | "lecture/lab" | "lec/lab" | "lecture+lab" | "lec+lab" => Ok(CourseType::Both),
            _ => Err(SchedulerError::UnknownCourseType(s.to_string())),
        }
    }
}

impl ComponentKind {
    /// Room type this component must be held in.
    pub fn room_type(self) -> RoomType {
        match self {
            ComponentKind::Lecture => RoomType::Lecture,
            ComponentKind::Lab => RoomType::Lab,
        }
    }

    /// The course type an entry for this component is tagged with.
    pub fn as_course_type(self) -> CourseType {
        match self {
            ComponentKind::Lecture => CourseType::Lecture,
            ComponentKind::Lab => CourseType::Lab,
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_course_type().label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_course_builder() {
        let c = Course::new("CS101", "BSCS", 1, 1)
            .with_title("Intro to CS")
            .with_type(CourseType::Lab)
            .with_units(3)
            .with_hours(2);
        assert_eq!(c.code, "CS101");
        assert_eq!(c.title, "Intro to CS");
        assert_eq!(c.course_type, CourseType::Lab);
        assert_eq!(c.units, 3);
        assert_eq!(c.hours_per_week, 2);
        assert!(c.matches("BSCS", 1, 1));
        assert!(!c.matches("BSCS", 1, 2));
    }

    #[test]
    fn test_both_split_hours() {
        let c = Course::new("CS201", "BSCS", 2, 1)
            .with_type(CourseType::Both)
            .with_hours(6);
        assert_eq!(
            c.components(),
            vec![(ComponentKind::Lecture, 3), (ComponentKind::Lab, 3)]
        );

        let odd = c.clone().with_hours(5);
        assert_eq!(
            odd.components(),
            vec![(ComponentKind::Lecture, 2), (ComponentKind::Lab, 3)]
        );
    }

    #[test]
    fn test_constraint_complexity() {
        let lecture = Course::new("A", "P", 1, 1).with_hours(3);
        let lab = lecture.clone().with_type(CourseType::Lab);
        let both = lecture.clone().with_type(CourseType::Both).with_hours(6);
        assert_eq!(lecture.constraint_complexity(), 3);
        assert_eq!(lab.constraint_complexity(), 13);
        assert_eq!(both.constraint_complexity(), 21);
    }

    #[test]
    fn test_course_type_parse() {
        assert_eq!("Lecture".parse::<CourseType>().unwrap(), CourseType::Lecture);
        assert_eq!("LAB".parse::<CourseType>().unwrap(), CourseType::Lab);
        assert_eq!("both".parse::<CourseType>().unwrap(), CourseType::Both);
        assert_eq!("Lecture / Lab".parse::<CourseType>().unwrap(), CourseType::Both);
        assert!("seminar".parse::<CourseType>().is_err());
    }

    #[test]
    fn test_component_room_type() {
        assert_eq!(ComponentKind::Lab.room_type(), RoomType::Lab);
        assert_eq!(ComponentKind::Lecture.room_type(), RoomType::Lecture);
    }
}
