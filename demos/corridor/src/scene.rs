//! The corridor level and the scripted target walk.

use glam::Vec2;
use wd_world::{CollisionWorld, CollisionWorldBuilder, Layer, WorldResult};

/// Floor from x = -20 to 40, end walls, and a knee-high crate at x = 7.5
/// between the first two waypoints.
pub fn build_world() -> WorldResult<CollisionWorld> {
    let mut b = CollisionWorldBuilder::new();
    b.add_box(Vec2::new(-20.0, -1.0), Vec2::new(40.0, 0.0), Layer::GROUND)?;
    b.add_box(Vec2::new(-20.0, 0.0), Vec2::new(-19.0, 4.0), Layer::WALL)?;
    b.add_box(Vec2::new(39.0, 0.0), Vec2::new(40.0, 4.0), Layer::WALL)?;
    b.add_box(Vec2::new(7.5, 0.0), Vec2::new(8.0, 1.0), Layer::WALL)?;
    Ok(b.build())
}

/// Piecewise-linear target path.  Two keys at the same time make a jump.
pub struct TargetScript {
    keys: Vec<(f64, Vec2)>,
}

impl TargetScript {
    /// Hidden off-level, then shows up ahead of the agent, runs to the far
    /// wall, waits to be caught, and vanishes again.
    pub fn corridor() -> Self {
        let hidden = Vec2::new(-40.0, 0.5);
        Self {
            keys: vec![
                (0.0,  hidden),
                (8.0,  hidden),
                (8.0,  Vec2::new(19.0, 0.5)),
                (10.0, Vec2::new(19.0, 0.5)),
                (14.0, Vec2::new(38.0, 0.5)),
                (18.0, Vec2::new(38.0, 0.5)),
                (18.0, hidden),
            ],
        }
    }

    pub fn position_at(&self, t: f64) -> Vec2 {
        let Some(&(_, last)) = self.keys.last() else {
            return Vec2::ZERO;
        };
        // Last key at or before `t`; the following key (if any) is the
        // segment end.
        let i = self.keys.partition_point(|&(kt, _)| kt <= t);
        if i == 0 {
            return self.keys[0].1;
        }
        if i == self.keys.len() {
            return last;
        }
        let (t0, p0) = self.keys[i - 1];
        let (t1, p1) = self.keys[i];
        let span = t1 - t0;
        if span <= 0.0 {
            return p1;
        }
        p0.lerp(p1, ((t - t0) / span) as f32)
    }

    pub fn duration(&self) -> f64 {
        self.keys.last().map_or(0.0, |&(t, _)| t)
    }
}
