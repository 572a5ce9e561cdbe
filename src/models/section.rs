//! Section (student cohort) model.

use serde::{Deserialize, Serialize};

/// A block of students that attends classes together.
///
/// Produced upstream from enrollment counts. A section belongs to exactly
/// one program/year/term and takes every course with that triple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Unique section name (e.g., "BSCS1A").
    pub name: String,
    /// Degree program.
    pub program: String,
    /// Year level.
    pub year_level: u32,
    /// Academic term.
    pub term: u32,
    /// Enrolled students.
    pub student_count: u32,
}

impl Section {
    /// Creates a section with no students.
    pub fn new(
        name: impl Into<String>,
        program: impl Into<String>,
        year_level: u32,
        term: u32,
    ) -> Self {
        Self {
            name: name.into(),
            program: program.into(),
            year_level,
            term,
            student_count: 0,
        }
    }

    /// Sets the number of enrolled students.
    pub fn with_students(mut self, student_count: u32) -> Self {
        self.student_count = student_count;
        self
    }
}
