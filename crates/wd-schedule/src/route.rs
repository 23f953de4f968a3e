//! Waypoints and cyclic patrol routes.

use glam::Vec2;

use crate::{ScheduleError, ScheduleResult};

/// A stop on a patrol route.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Waypoint {
    pub position:    Vec2,
    /// Seconds to stand still after arriving.
    pub wait_secs:   f64,
    /// Turn around when this waypoint becomes the next goal.
    pub turn_around: bool,
}

impl Waypoint {
    pub fn new(position: Vec2, wait_secs: f64, turn_around: bool) -> Self {
        Self { position, wait_secs, turn_around }
    }
}

/// An ordered, cyclic, non-empty sequence of waypoints plus the index of the
/// one currently being walked to.
///
/// The index is always `< len()`: [`advance`](Self::advance) wraps to 0 after
/// the last waypoint.
#[derive(Clone, Debug)]
pub struct PatrolRoute {
    waypoints: Vec<Waypoint>,
    current:   usize,
}

impl PatrolRoute {
    /// Fails on an empty list or on a negative or non-finite wait time.
    pub fn new(waypoints: Vec<Waypoint>) -> ScheduleResult<Self> {
        if waypoints.is_empty() {
            return Err(ScheduleError::EmptyRoute);
        }
        if let Some((index, wp)) = waypoints
            .iter()
            .enumerate()
            .find(|(_, wp)| !wp.wait_secs.is_finite() || wp.wait_secs < 0.0)
        {
            return Err(ScheduleError::InvalidWaitTime { index, secs: wp.wait_secs });
        }
        Ok(Self { waypoints, current: 0 })
    }

    /// The waypoint currently being walked to.
    #[inline]
    pub fn current(&self) -> &Waypoint {
        &self.waypoints[self.current]
    }

    #[inline]
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Move to the next waypoint, wrapping to 0 after the last.
    pub fn advance(&mut self) -> &Waypoint {
        self.current = (self.current + 1) % self.waypoints.len();
        self.current()
    }

    /// Go back to the first waypoint.
    pub fn reset(&mut self) -> &Waypoint {
        self.current = 0;
        self.current()
    }

    /// Number of waypoints; never zero.
    #[inline]
    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    pub fn get(&self, index: usize) -> Option<&Waypoint> {
        self.waypoints.get(index)
    }
}
