//! Timetable quality metrics (KPIs).
//!
//! Computes summary indicators from a produced schedule, the room table,
//! and the time grid it was built on.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Rooms used | Distinct rooms with at least one entry |
//! | Room classes | Entries booked in the room |
//! | Sections served | Distinct sections meeting in the room |
//! | Days utilized | Distinct days the room is booked |
//! | Utilization rate | Booked minutes / (rooms × days × minutes per day) |
//! | Capacity shortfalls | Entries whose section outgrows the room |
//!
//! Room capacity is descriptive: the assigners never enforce it, so
//! shortfalls are reported here instead. A capacity of 0 means unknown
//! and is never counted as a shortfall.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::models::{Day, Room, Schedule, TimeGrid};

/// Timetable performance indicators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleKpi {
    /// Number of placed sessions.
    pub total_entries: usize,
    /// Distinct sections with at least one entry.
    pub sections_scheduled: usize,
    /// Distinct rooms with at least one entry.
    pub rooms_used: usize,
    /// Distinct faculty with at least one entry.
    pub faculty_used: usize,
    /// Obligations the run could not place.
    pub skipped_obligations: usize,
    /// Double-bookings found by the conflict scan.
    pub conflict_count: usize,
    /// Entries on Saturday.
    pub saturday_sessions: usize,
    /// Per-room usage, keyed by room name.
    pub room_usage: BTreeMap<String, RoomUsage>,
    /// Booked minutes over bookable minutes across all rooms (0.0..1.0
    /// when conflict-free).
    pub utilization_rate: f64,
    /// Entries whose section exceeds the room's capacity.
    pub capacity_shortfalls: usize,
}

/// Usage of one room.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomUsage {
    /// Entries booked in the room.
    pub total_classes: usize,
    /// Distinct sections meeting there.
    pub sections_served: usize,
    /// Distinct days the room is booked.
    pub days_utilized: usize,
    /// Total booked minutes.
    pub booked_minutes: u32,
}

impl ScheduleKpi {
    /// Computes KPIs from a schedule.
    ///
    /// # Arguments
    /// * `schedule` - The produced schedule.
    /// * `rooms` - The room table (for capacity and the utilization base).
    /// * `grid` - The grid the schedule was built on.
    pub fn calculate(schedule: &Schedule, rooms: &[Room], grid: &TimeGrid) -> Self {
        let entries = &schedule.entries;

        let mut per_room: BTreeMap<&str, (RoomUsage, BTreeSet<&str>, BTreeSet<Day>)> =
            BTreeMap::new();
        for e in entries {
            let (usage, sections, days) = per_room.entry(e.room.as_str()).or_default();
            usage.total_classes += 1;
            usage.booked_minutes += u32::from(e.duration_minutes());
            sections.insert(e.section.as_str());
            days.insert(e.day);
        }
        let room_usage: BTreeMap<String, RoomUsage> = per_room
            .into_iter()
            .map(|(room, (mut usage, sections, days))| {
                usage.sections_served = sections.len();
                usage.days_utilized = days.len();
                (room.to_string(), usage)
            })
            .collect();

        let booked: u32 = room_usage.values().map(|u| u.booked_minutes).sum();
        let available =
            rooms.len() as f64 * grid.days.len() as f64 * f64::from(grid.minutes_per_day());
        let utilization_rate = if available > 0.0 {
            f64::from(booked) / available
        } else {
            0.0
        };

        let capacity_shortfalls = entries
            .iter()
            .filter(|e| {
                rooms
                    .iter()
                    .find(|r| r.name == e.room)
                    .is_some_and(|r| r.capacity > 0 && !r.fits(e.students_count))
            })
            .count();

        let sections_scheduled = entries
            .iter()
            .map(|e| e.section.as_str())
            .collect::<BTreeSet<_>>()
            .len();
        let faculty_used = entries
            .iter()
            .map(|e| e.faculty.as_str())
            .collect::<BTreeSet<_>>()
            .len();

        Self {
            total_entries: entries.len(),
            sections_scheduled,
            rooms_used: room_usage.len(),
            faculty_used,
            skipped_obligations: schedule.skipped.len(),
            conflict_count: schedule.conflicts().len(),
            saturday_sessions: entries.iter().filter(|e| e.day == Day::Saturday).count(),
            room_usage,
            utilization_rate,
            capacity_shortfalls,
        }
    }

    /// Whether the schedule meets the given quality thresholds.
    pub fn meets_thresholds(&self, max_conflicts: usize, min_utilization: f64) -> bool {
        self.conflict_count <= max_conflicts && self.utilization_rate >= min_utilization
    }
}
