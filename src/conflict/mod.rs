//! Temporal conflict model.
//!
//! One overlap predicate serves both the engine (per-assignment gate via
//! [`RunState::can_place`]) and the post-hoc auditor ([`conflict_scan`]),
//! so the two can never disagree.
//!
//! # Semantics
//! Intervals are half-open: `[start, end)`. Back-to-back blocks
//! (one ends exactly when the other starts) do not conflict.

mod ledger;

pub use ledger::{Ledger, Ledgers, Placement, RecordHandle, RunState};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::{Day, ScheduleEntry, TimeOfDay};

/// Whether `[start1, end1)` and `[start2, end2)` overlap.
///
/// True unless one interval ends at or before the other starts.
#[inline]
pub fn overlaps(start1: TimeOfDay, end1: TimeOfDay, start2: TimeOfDay, end2: TimeOfDay) -> bool {
    !(end1 <= start2 || end2 <= start1)
}

/// The resource class a conflict was found on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ConflictKind {
    /// Same room booked twice.
    Room,
    /// Same faculty member teaching twice.
    Faculty,
    /// Same section attending twice.
    Section,
}

/// A double-booking between two schedule entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conflict {
    /// Resource class.
    pub kind: ConflictKind,
    /// Room, faculty, or section name.
    pub resource: String,
    /// Day both entries fall on.
    pub day: Day,
    /// Index of the earlier entry in the scanned slice.
    pub first: usize,
    /// Index of the later entry in the scanned slice.
    pub second: usize,
}

/// Scans entries for every room, faculty, and section double-booking.
///
/// Results are ordered by kind, then resource name, then entry indices.
///
/// # Complexity
/// O(Σ k²) over the entries sharing each resource.
pub fn conflict_scan(entries: &[ScheduleEntry]) -> Vec<Conflict> {
    let mut conflicts = Vec::new();
    scan_by(entries, ConflictKind::Room, |e| &e.room, &mut conflicts);
    scan_by(entries, ConflictKind::Faculty, |e| &e.faculty, &mut conflicts);
    scan_by(entries, ConflictKind::Section, |e| &e.section, &mut conflicts);
    conflicts
}

/// Room double-bookings only.
pub fn room_conflicts(entries: &[ScheduleEntry]) -> Vec<Conflict> {
    let mut conflicts = Vec::new();
    scan_by(entries, ConflictKind::Room, |e| &e.room, &mut conflicts);
    conflicts
}

fn scan_by<'a, F>(entries: &'a [ScheduleEntry], kind: ConflictKind, key: F, out: &mut Vec<Conflict>)
where
    F: Fn(&'a ScheduleEntry) -> &'a String,
{
    let mut groups: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
    for (idx, entry) in entries.iter().enumerate() {
        groups.entry(key(entry).as_str()).or_default().push(idx);
    }

    for (resource, indices) in groups {
        for (pos, &i) in indices.iter().enumerate() {
            for &j in &indices[pos + 1..] {
                let (a, b) = (&entries[i], &entries[j]);
                if a.day == b.day && overlaps(a.start_time, a.end_time, b.start_time, b.end_time) {
                    out.push(Conflict {
                        kind,
                        resource: resource.to_string(),
                        day: a.day,
                        first: i,
                        second: j,
                    });
                }
            }
        }
    }
}
