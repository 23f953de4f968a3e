//! The pursued entity, as seen by the driver.

use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;

use glam::Vec2;
use wd_world::{Aabb, WorldResult};

use crate::{SimError, SimResult};

/// Shared, live view of the target.
///
/// Clones share the same position cell: whoever moves the target (a script,
/// a player controller, a test) keeps one clone, the sim keeps another.
#[derive(Clone, Debug)]
pub struct TargetHandle {
    position:     Rc<Cell<Vec2>>,
    half_extents: Vec2,
    head_offset:  Vec2,
    feet_offset:  Vec2,
}

impl TargetHandle {
    /// A box-shaped target; head and feet probes sit at ±75% of the half
    /// height.
    pub fn new(position: Vec2, half_extents: Vec2) -> Self {
        let probe = Vec2::new(0.0, half_extents.y * 0.75);
        Self {
            position: Rc::new(Cell::new(position)),
            half_extents,
            head_offset: probe,
            feet_offset: -probe,
        }
    }

    pub fn with_probe_offsets(mut self, head: Vec2, feet: Vec2) -> Self {
        self.head_offset = head;
        self.feet_offset = feet;
        self
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.position.get()
    }

    #[inline]
    pub fn set_position(&self, position: Vec2) {
        self.position.set(position);
    }

    /// Head and feet, in that order.
    pub fn probes(&self) -> [Vec2; 2] {
        let p = self.position();
        [p + self.head_offset, p + self.feet_offset]
    }

    /// Marker box at the current position.
    pub fn bounds(&self) -> WorldResult<Aabb> {
        Aabb::from_center(self.position(), self.half_extents)
    }
}

/// Targets by well-known tag.
#[derive(Default, Debug)]
pub struct TargetRegistry {
    by_tag: HashMap<String, TargetHandle>,
}

impl TargetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, tag: impl Into<String>, target: TargetHandle) {
        self.by_tag.insert(tag.into(), target);
    }

    /// Look up `tag`; a missing target is fatal for the agent.
    pub fn resolve(&self, tag: &str) -> SimResult<TargetHandle> {
        self.by_tag
            .get(tag)
            .cloned()
            .ok_or_else(|| SimError::TargetNotFound(tag.to_string()))
    }
}
