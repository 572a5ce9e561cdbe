//! Input validation for timetabling runs.
//!
//! Checks structural integrity of the input tables before any algorithm
//! runs. Detects:
//! - Duplicate courses (same code, program, year level, and term)
//! - Duplicate room, faculty, and section names
//!
//! Every problem is collected; validation never stops at the first one.
//! A course with zero weekly hours is not an error: it has nothing to
//! place and the run leaves it out.

use crate::models::{Course, Faculty, Room, Section};
use std::collections::HashSet;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two rows share the same identity.
    DuplicateId,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    fn duplicate(table: &str, name: &str) -> Self {
        Self::new(
            ValidationErrorKind::DuplicateId,
            format!("Duplicate {table} name: {name}"),
        )
    }
}

/// Validates the input tables of a timetabling run.
///
/// Checks:
/// 1. No two courses share (code, program, year level, term)
/// 2. No duplicate room names
/// 3. No duplicate faculty names
/// 4. No duplicate section names
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(
    courses: &[Course],
    rooms: &[Room],
    faculty: &[Faculty],
    sections: &[Section],
) -> ValidationResult {
    let mut errors = Vec::new();

    let mut course_keys = HashSet::new();
    for c in courses {
        if !course_keys.insert((c.code.as_str(), c.program.as_str(), c.year_level, c.term)) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!(
                    "Duplicate course: {} ({} year {} term {})",
                    c.code, c.program, c.year_level, c.term
                ),
            ));
        }
    }

    check_unique("room", rooms.iter().map(|r| r.name.as_str()), &mut errors);
    check_unique("faculty", faculty.iter().map(|f| f.name.as_str()), &mut errors);
    check_unique("section", sections.iter().map(|s| s.name.as_str()), &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_unique<'a>(
    table: &str,
    names: impl Iterator<Item = &'a str>,
    errors: &mut Vec<ValidationError>,
) {
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name) {
            errors.push(ValidationError::duplicate(table, name));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_courses() -> Vec<Course> {
        vec![
            Course::new("CS101", "BSCS", 1, 1).with_hours(3),
            // Same code, other program: distinct
            Course::new("CS101", "BSIT", 1, 1).with_hours(3),
            Course::new("CS102", "BSCS", 1, 1).with_hours(2),
        ]
    }

    fn sample_rooms() -> Vec<Room> {
        vec![Room::lecture("R101"), Room::lab("LAB1")]
    }

    fn sample_faculty() -> Vec<Faculty> {
        vec![Faculty::new("Alice"), Faculty::new("Bob")]
    }

    fn sample_sections() -> Vec<Section> {
        vec![
            Section::new("BSCS1A", "BSCS", 1, 1),
            Section::new("BSIT1A", "BSIT", 1, 1),
        ]
    }

    #[test]
    fn test_valid_input() {
        assert!(validate_input(
            &sample_courses(),
            &sample_rooms(),
            &sample_faculty(),
            &sample_sections()
        )
        .is_ok());
    }

    #[test]
    fn test_duplicate_course() {
        let mut courses = sample_courses();
        courses.push(Course::new("CS102", "BSCS", 1, 1).with_hours(2));

        let errors =
            validate_input(&courses, &sample_rooms(), &sample_faculty(), &sample_sections())
                .unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::DuplicateId);
        assert!(errors[0].message.contains("CS102"));
    }

    #[test]
    fn test_duplicate_room_name() {
        let rooms = vec![Room::lecture("R101"), Room::lab("R101")];

        let errors =
            validate_input(&sample_courses(), &rooms, &sample_faculty(), &sample_sections())
                .unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId && e.message.contains("room")));
    }

    #[test]
    fn test_zero_hours_accepted() {
        let mut courses = sample_courses();
        courses.push(Course::new("PE1", "BSCS", 1, 1).with_hours(0));

        assert!(
            validate_input(&courses, &sample_rooms(), &sample_faculty(), &sample_sections())
                .is_ok()
        );
    }

    #[test]
    fn test_multiple_errors() {
        let mut courses = sample_courses();
        courses.push(Course::new("CS101", "BSCS", 1, 1).with_hours(3));
        let faculty = vec![Faculty::new("Alice"), Faculty::new("Alice")];
        let sections = vec![
            Section::new("A", "BSCS", 1, 1),
            Section::new("A", "BSCS", 1, 2),
        ];

        let errors = validate_input(&courses, &sample_rooms(), &faculty, &sections).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.iter().all(|e| e.kind == ValidationErrorKind::DuplicateId));
    }
}
