//! Sessions and patterns.
//!
//! A session is one contiguous block on one day. A pattern is the full
//! weekly placement of a course component: one session, or two sessions
//! of equal length on a day pair.

use serde::{Deserialize, Serialize};

use super::{Day, TimeOfDay};
use crate::conflict::overlaps;

/// An atomic bookable block `[start, end)` on one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Session {
    /// Day of the week.
    pub day: Day,
    /// Start time (inclusive).
    pub start: TimeOfDay,
    /// End time (exclusive).
    pub end: TimeOfDay,
}

impl Session {
    /// Creates a session.
    pub fn new(day: Day, start: TimeOfDay, end: TimeOfDay) -> Self {
        Self { day, start, end }
    }

    /// Length in minutes.
    #[inline]
    pub fn duration_minutes(&self) -> u16 {
        self.end.minutes().saturating_sub(self.start.minutes())
    }

    /// Whether two sessions are on the same day and overlap in time.
    pub fn conflicts_with(&self, other: &Session) -> bool {
        self.day == other.day && overlaps(self.start, self.end, other.start, other.end)
    }
}

/// One component's weekly placement: 1–2 sessions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pattern {
    /// Sessions in placement order.
    pub sessions: Vec<Session>,
}

impl Pattern {
    /// A single-session pattern.
    pub fn single(session: Session) -> Self {
        Self {
            sessions: vec![session],
        }
    }

    /// A two-session pattern on a day pair with the same time block.
    pub fn paired(days: (Day, Day), start: TimeOfDay, end: TimeOfDay) -> Self {
        Self {
            sessions: vec![Session::new(days.0, start, end), Session::new(days.1, start, end)],
        }
    }

    /// Whether the pattern spans more than one session.
    #[inline]
    pub fn is_multi_session(&self) -> bool {
        self.sessions.len() > 1
    }

    /// Whether any session of `self` overlaps any session of `other`.
    pub fn overlaps(&self, other: &Pattern) -> bool {
        self.sessions
            .iter()
            .any(|a| other.sessions.iter().any(|b| a.conflicts_with(b)))
    }

    /// Preference score for ordering candidates (lower is better).
    ///
    /// Start hour of the first session, +20 if any session is on Saturday.
    pub fn preference(&self) -> u32 {
        let hour = self
            .sessions
            .first()
            .map(|s| u32::from(s.start.hour()))
            .unwrap_or(0);
        let saturday = self.sessions.iter().any(|s| s.day == Day::Saturday);
        hour + if saturday { 20 } else { 0 }
    }

    /// Total weekly minutes.
    pub fn total_minutes(&self) -> u32 {
        self.sessions
            .iter()
            .map(|s| u32::from(s.duration_minutes()))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> TimeOfDay {
        s.parse().unwrap()
    }

    #[test]
    fn test_session_duration() {
        let s = Session::new(Day::Monday, t("08:00"), t("09:30"));
        assert_eq!(s.duration_minutes(), 90);
    }

    #[test]
    fn test_sessions_touching_do_not_conflict() {
        let a = Session::new(Day::Monday, t("08:00"), t("09:00"));
        let b = Session::new(Day::Monday, t("09:00"), t("10:00"));
        let c = Session::new(Day::Tuesday, t("08:00"), t("09:00"));
        let d = Session::new(Day::Monday, t("08:30"), t("09:30"));
        assert!(!a.conflicts_with(&b));
        assert!(!a.conflicts_with(&c));
        assert!(a.conflicts_with(&d));
    }

    #[test]
    fn test_pattern_overlap_on_shared_day() {
        let p = Pattern::paired((Day::Monday, Day::Thursday), t("08:00"), t("09:30"));
        let q = Pattern::single(Session::new(Day::Thursday, t("09:00"), t("10:00")));
        let r = Pattern::paired((Day::Tuesday, Day::Friday), t("08:00"), t("09:30"));
        assert!(p.overlaps(&q));
        assert!(!p.overlaps(&r));
        assert!(p.is_multi_session());
        assert!(!q.is_multi_session());
        assert_eq!(p.total_minutes(), 180);
    }

    #[test]
    fn test_pattern_preference() {
        let early = Pattern::single(Session::new(Day::Monday, t("07:00"), t("09:00")));
        let late = Pattern::single(Session::new(Day::Monday, t("15:30"), t("17:30")));
        let saturday = Pattern::paired((Day::Wednesday, Day::Saturday), t("07:00"), t("08:00"));
        assert_eq!(early.preference(), 7);
        assert_eq!(late.preference(), 15);
        assert_eq!(saturday.preference(), 27);
    }
}
