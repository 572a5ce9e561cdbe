//! Academic course timetabling.
//!
//! Assigns course offerings to (faculty, room, day, time block) combinations
//! across programs, year levels, and terms, producing a weekly timetable in
//! which no room, faculty member, or section is double-booked.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Course`, `Room`, `Faculty`, `Section`,
//!   `TimeGrid`, `Session`, `Pattern`, `Schedule`
//! - **`conflict`**: The overlap predicate, occupancy ledgers, and the
//!   post-hoc conflict scan
//! - **`patterns`**: Candidate weekly session patterns for a course component
//! - **`scheduler`**: Greedy and backtracking assigners, the run entry point,
//!   and KPIs
//! - **`csp`**: Constraint-satisfaction solver (AC-3, MRV/LCV, forward checking)
//! - **`config`**: Run parameters, loadable from TOML
//! - **`validation`**: Input integrity checks (duplicate rows and names)
//!
//! # Example
//!
//! ```
//! use u_timetable::{Algorithm, SchedulerConfig, TimetableInput, TimetableScheduler};
//! use u_timetable::models::{Course, CourseType, Room, Section};
//!
//! let input = TimetableInput::new()
//!     .with_courses(vec![
//!         Course::new("CS101", "BSCS", 1, 1).with_hours(3),
//!         Course::new("CS102", "BSCS", 1, 1).with_type(CourseType::Both).with_hours(6),
//!     ])
//!     .with_rooms(vec![Room::lecture("R101"), Room::lab("LAB1")])
//!     .with_sections(vec![Section::new("BSCS1A", "BSCS", 1, 1).with_students(35)]);
//!
//! let config = SchedulerConfig::new().with_algorithm(Algorithm::ConstraintSatisfaction);
//! let schedule = TimetableScheduler::new(config).run(&input).unwrap();
//! assert!(schedule.is_complete());
//! assert!(schedule.is_conflict_free());
//! ```
//!
//! # References
//!
//! - Schaerf (1999), "A Survey of Automated Timetabling"
//! - Mackworth (1977), "Consistency in Networks of Relations"
//! - Russell & Norvig (2020), "Artificial Intelligence: A Modern Approach", Ch. 6

pub mod config;
pub mod conflict;
pub mod csp;
pub mod error;
pub mod models;
pub mod patterns;
pub mod scheduler;
pub mod validation;

pub use config::SchedulerConfig;
pub use error::{Result, SchedulerError};
pub use scheduler::{Algorithm, TimetableInput, TimetableScheduler};
