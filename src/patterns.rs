//! Session pattern generation.
//!
//! Enumerates every viable weekly placement for a course component.
//! Generation never picks a winner: assigners search the list.
//!
//! # Rules
//!
//! | Hours (H) | Kind | Shape |
//! |-----------|------|-------|
//! | H ≤ 2 | Lecture | one session of H hours on any day |
//! | H = 1 | Lab | one session of 1 hour on any day |
//! | H = 2 | Lab | two 1-hour sessions on a day pair |
//! | H > 2 | any | two sessions of H/2 hours on a day pair |
//!
//! Day pairs come in rotation order, but all pairs are always generated.
//! Any candidate whose end time is not a grid slot is dropped.

use crate::models::{ComponentKind, Pattern, Session, TimeGrid};

/// Generates candidate patterns on a time grid.
#[derive(Debug, Clone)]
pub struct PatternGenerator<'a> {
    grid: &'a TimeGrid,
}

impl<'a> PatternGenerator<'a> {
    /// Creates a generator over `grid`.
    pub fn new(grid: &'a TimeGrid) -> Self {
        Self { grid }
    }

    /// All candidate patterns for `hours` of `kind`, in search order.
    ///
    /// `rotation` selects which day pair is tried first. Zero hours
    /// yields no candidates.
    pub fn patterns(&self, hours: u32, kind: ComponentKind, rotation: usize) -> Vec<Pattern> {
        if hours == 0 {
            return Vec::new();
        }

        let lab_split = kind == ComponentKind::Lab && hours >= 2;
        if hours <= 2 && !lab_split {
            return self.single_sessions(hours * 60);
        }

        if hours == 2 {
            // 2-hour lab: two 1-hour sessions
            return self.paired_sessions(60, rotation);
        }

        // hours/2 per session, i.e. hours * 30 minutes
        self.paired_sessions(hours * 30, rotation)
    }

    fn single_sessions(&self, minutes: u32) -> Vec<Pattern> {
        let Ok(minutes) = u16::try_from(minutes) else {
            return Vec::new();
        };
        let mut patterns = Vec::new();
        for &day in &self.grid.days {
            for start in self.grid.slots() {
                if let Some(end) = self.grid.add_minutes(start, minutes) {
                    patterns.push(Pattern::single(Session::new(day, start, end)));
                }
            }
        }
        patterns
    }

    fn paired_sessions(&self, minutes: u32, rotation: usize) -> Vec<Pattern> {
        let Ok(minutes) = u16::try_from(minutes) else {
            return Vec::new();
        };
        let mut patterns = Vec::new();
        for pair in self.grid.day_pairs(rotation) {
            for start in self.grid.slots() {
                if let Some(end) = self.grid.add_minutes(start, minutes) {
                    patterns.push(Pattern::paired(pair, start, end));
                }
            }
        }
        patterns
    }
}
