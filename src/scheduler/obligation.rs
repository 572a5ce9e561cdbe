//! Obligations: what must be placed for one section.
//!
//! An obligation is a (course, section) pair, narrowed to one component
//! when a "Both" course is split. It knows its weekly hours, the pattern
//! kind to generate, the room type it needs, and the tag its entries carry.

use super::SchedulingContext;
use crate::config::BothRepresentation;
use crate::conflict::Placement;
use crate::models::{
    ComponentKind, Course, CourseType, RoomType, Section, SkipReason, SkippedObligation,
};
use crate::patterns::PatternGenerator;

/// A placement obligation.
#[derive(Debug, Clone, Copy)]
pub struct Obligation<'a> {
    /// Course to place.
    pub course: &'a Course,
    /// Section that takes it.
    pub section: &'a Section,
    /// Component, or `None` for a merged "Both" obligation.
    pub component: Option<ComponentKind>,
    /// Weekly hours to place.
    pub hours: u32,
}

impl<'a> Obligation<'a> {
    /// Obligations for one course and section.
    ///
    /// "Both" courses yield a Lecture and a Lab obligation unless `both`
    /// asks for the merged form.
    pub fn for_course(
        course: &'a Course,
        section: &'a Section,
        both: BothRepresentation,
    ) -> Vec<Self> {
        if course.course_type == CourseType::Both && both == BothRepresentation::Merged {
            return vec![Self {
                course,
                section,
                component: None,
                hours: course.hours_per_week,
            }];
        }
        course
            .components()
            .into_iter()
            .map(|(kind, hours)| Self {
                course,
                section,
                component: Some(kind),
                hours,
            })
            .collect()
    }

    /// Pattern kind for the generator.
    ///
    /// A merged "Both" obligation is generated as a lecture.
    pub fn pattern_kind(&self) -> ComponentKind {
        self.component.unwrap_or(ComponentKind::Lecture)
    }

    /// Room type required.
    pub fn room_type(&self) -> RoomType {
        self.pattern_kind().room_type()
    }

    /// Tag written on entries.
    pub fn tag(&self) -> CourseType {
        match self.component {
            Some(kind) if self.course.course_type == CourseType::Both => kind.as_course_type(),
            Some(_) => self.course.course_type,
            None => CourseType::Both,
        }
    }

    /// Unique variable-style name: `{code}_{section}[_{component}]`.
    pub fn name(&self) -> String {
        match self.component {
            Some(kind) if self.is_split_component() => {
                format!("{}_{}_{}", self.course.code, self.section.name, kind)
            }
            _ => format!("{}_{}", self.course.code, self.section.name),
        }
    }

    /// Whether this is one half of a split "Both" course.
    pub fn is_split_component(&self) -> bool {
        self.component.is_some() && self.course.course_type == CourseType::Both
    }

    /// Report for an obligation that could not be placed.
    pub fn skipped(&self, reason: SkipReason) -> SkippedObligation {
        SkippedObligation {
            course_code: self.course.code.clone(),
            section: self.section.name.clone(),
            component: self.component.filter(|_| self.is_split_component()),
            reason,
        }
    }

    /// Ordering weight inherited from the course.
    pub fn complexity(&self) -> u32 {
        self.course.constraint_complexity()
    }

    /// Every (pattern, faculty, room) combination, unfiltered.
    ///
    /// Order: patterns (generator order) × faculty × rooms of the right
    /// type, each in input order. Fails if either resource pool is empty.
    pub fn candidates(
        &self,
        ctx: &SchedulingContext<'_>,
        rotation: usize,
    ) -> Result<Vec<Placement>, SkipReason> {
        let faculty = ctx.faculty_for(self.course);
        if faculty.is_empty() {
            return Err(SkipReason::NoFaculty);
        }
        let room_type = self.room_type();
        let rooms: Vec<&str> = ctx
            .rooms
            .iter()
            .filter(|r| r.room_type == room_type)
            .map(|r| r.name.as_str())
            .collect();
        if rooms.is_empty() {
            return Err(SkipReason::NoRoom(room_type));
        }

        let patterns =
            PatternGenerator::new(ctx.grid).patterns(self.hours, self.pattern_kind(), rotation);
        let mut placements = Vec::with_capacity(patterns.len() * faculty.len() * rooms.len());
        for pattern in &patterns {
            for f in faculty {
                for room in &rooms {
                    placements.push(Placement::new(pattern.clone(), f.name.as_str(), *room));
                }
            }
        }
        Ok(placements)
    }
}
