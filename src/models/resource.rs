//! Bookable resources: rooms and faculty.
//!
//! Both are identified by name. Names key the occupancy ledgers, so they
//! must be unique within their table.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::SchedulerError;

/// Placeholder faculty used when no faculty table is supplied.
pub const PLACEHOLDER_FACULTY: &str = "TBA";

/// A teaching room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// Unique room name.
    pub name: String,
    /// Lecture hall or laboratory.
    pub room_type: RoomType,
    /// Seats. Descriptive only; the engine does not enforce it.
    pub capacity: u32,
}

/// Room classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoomType {
    /// Lecture room.
    Lecture,
    /// Laboratory.
    Lab,
}

/// A faculty member.
///
/// The pool is undifferentiated: every member may teach every course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Faculty {
    /// Unique faculty name.
    pub name: String,
}

impl Room {
    /// Creates a room.
    pub fn new(name: impl Into<String>, room_type: RoomType) -> Self {
        Self {
            name: name.into(),
            room_type,
            capacity: 0,
        }
    }

    /// Creates a lecture room.
    pub fn lecture(name: impl Into<String>) -> Self {
        Self::new(name, RoomType::Lecture)
    }

    /// Creates a laboratory.
    pub fn lab(name: impl Into<String>) -> Self {
        Self::new(name, RoomType::Lab)
    }

    /// Sets the capacity.
    pub fn with_capacity(mut self, capacity: u32) -> Self {
        self.capacity = capacity;
        self
    }

    /// Whether `students` fit in this room.
    pub fn fits(&self, students: u32) -> bool {
        students <= self.capacity
    }
}

impl fmt::Display for RoomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RoomType::Lecture => "Lecture",
            RoomType::Lab => "Lab",
        })
    }
}

impl FromStr for RoomType {
    type Err = SchedulerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lecture" | "lec" => Ok(RoomType::Lecture),
            "lab" | "laboratory" => Ok(RoomType::Lab),
            _ => Err(SchedulerError::UnknownRoomType(s.to_string())),
        }
    }
}

impl Faculty {
    /// Creates a faculty member.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// The stand-in used when faculty are not yet assigned.
    pub fn placeholder() -> Self {
        Self::new(PLACEHOLDER_FACULTY)
    }
}

/// Faculty eligible to teach `course`.
///
/// Specialization matching is not modelled, so this passes the whole pool
/// through.
pub fn suitable_faculty<'a>(pool: &'a [Faculty], _course: &super::Course) -> &'a [Faculty] {
    pool
}
