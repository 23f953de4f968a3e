//! The line-of-sight sensor.

use glam::Vec2;
use tracing::trace;
use wd_core::{geo, Facing};
use wd_world::{Layer, LayerMask, PhysicsQuery};

use crate::{Heading, SightError, SightResult};

// ── Configuration ─────────────────────────────────────────────────────────────

/// Static parameters of a [`SightSensor`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SightConfig {
    /// Full field-of-view angle in degrees.
    pub fov_degrees:      f32,
    /// Maximum ray length.
    pub max_distance:     f32,
    /// Layers that block sight.  The target layer is added automatically.
    pub obstruction_mask: LayerMask,
    /// Layer of the collider that marks the target.
    pub target_layer:     Layer,
    /// Eye position relative to the body centre.
    pub eye_offset:       Vec2,
}

impl Default for SightConfig {
    fn default() -> Self {
        Self {
            fov_degrees:      90.0,
            max_distance:     10.0,
            obstruction_mask: LayerMask::from_layers(&[Layer::GROUND, Layer::WALL]),
            target_layer:     Layer::TARGET_MARKER,
            eye_offset:       Vec2::new(0.0, 0.5),
        }
    }
}

impl SightConfig {
    pub fn validate(&self) -> SightResult<()> {
        if !self.fov_degrees.is_finite() || self.fov_degrees <= 0.0 || self.fov_degrees > 360.0 {
            return Err(SightError::InvalidFov(self.fov_degrees));
        }
        if !self.max_distance.is_finite() || self.max_distance <= 0.0 {
            return Err(SightError::InvalidDistance(self.max_distance));
        }
        Ok(())
    }
}

// ── Aim ───────────────────────────────────────────────────────────────────────

/// Where the sensor looks.
#[derive(Copy, Clone, PartialEq, Debug, Default)]
pub enum AimMode {
    /// Along the agent's facing.
    #[default]
    Facing,
    /// Locked onto the target's live position, regardless of facing.
    Pursuit,
    /// Locked onto a fixed inspection point.
    Alert(Vec2),
}

// ── Debug trace ───────────────────────────────────────────────────────────────

/// How a single cast ended.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum RayOutcome {
    /// Nothing hit within range.
    Miss,
    /// First hit was not the target.
    Blocked,
    /// First hit was the target, but outside the view cone.
    OutsideCone,
    /// The probe is visible.
    Seen,
    /// Edge of the view cone; drawn for reference, not cast.
    Boundary,
}

impl RayOutcome {
    pub fn as_str(self) -> &'static str {
        match self {
            RayOutcome::Miss        => "miss",
            RayOutcome::Blocked     => "blocked",
            RayOutcome::OutsideCone => "outside_cone",
            RayOutcome::Seen        => "seen",
            RayOutcome::Boundary    => "boundary",
        }
    }
}

/// One recorded cast, for debug drawing.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct SightRay {
    pub from:    Vec2,
    pub to:      Vec2,
    pub outcome: RayOutcome,
}

// ── SightSensor ───────────────────────────────────────────────────────────────

/// Ray-cast visibility test against a set of target probe points.
///
/// The sensor is transient: it holds its configuration plus the origin,
/// facing and aim mode for the current tick, and no history.
#[derive(Clone, Debug)]
pub struct SightSensor {
    origin:       Vec2,
    facing:       Facing,
    aim:          AimMode,
    half_angle:   f32,
    max_distance: f32,
    cast_mask:    LayerMask,
    target_layer: Layer,
    eye_offset:   Vec2,
}

impl SightSensor {
    pub fn new(config: &SightConfig) -> SightResult<Self> {
        config.validate()?;
        Ok(Self {
            origin:       Vec2::ZERO,
            facing:       Facing::default(),
            aim:          AimMode::Facing,
            half_angle:   (config.fov_degrees * 0.5).to_radians(),
            max_distance: config.max_distance,
            cast_mask:    config.obstruction_mask.with(config.target_layer),
            target_layer: config.target_layer,
            eye_offset:   config.eye_offset,
        })
    }

    // ── State ─────────────────────────────────────────────────────────────

    /// Move the eye to `origin` (world space).
    #[inline]
    pub fn set_origin(&mut self, origin: Vec2) {
        self.origin = origin;
    }

    /// Place the eye relative to a body centre using the configured offset.
    #[inline]
    pub fn track_body(&mut self, body_position: Vec2) {
        self.origin = body_position + self.eye_offset;
    }

    #[inline]
    pub fn set_facing(&mut self, facing: Facing) {
        self.facing = facing;
    }

    #[inline]
    pub fn set_aim(&mut self, aim: AimMode) {
        self.aim = aim;
    }

    #[inline]
    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    #[inline]
    pub fn facing(&self) -> Facing {
        self.facing
    }

    #[inline]
    pub fn aim(&self) -> AimMode {
        self.aim
    }

    /// Half the field-of-view angle, in radians.
    #[inline]
    pub fn half_angle(&self) -> f32 {
        self.half_angle
    }

    #[inline]
    pub fn max_distance(&self) -> f32 {
        self.max_distance
    }

    /// The direction the sensor looks this tick.
    ///
    /// Pursuit and alert aims point from the origin at their target; if that
    /// target coincides with the origin the facing direction is used instead.
    pub fn aim_heading(&self, target_pos: Vec2) -> Heading {
        let toward = match self.aim {
            AimMode::Facing       => return Heading::from_facing(self.facing),
            AimMode::Pursuit      => target_pos - self.origin,
            AimMode::Alert(point) => point - self.origin,
        };
        Heading::new(toward).unwrap_or_else(|_| Heading::from_facing(self.facing))
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// `true` if any of `probes` is visible from the current origin.
    ///
    /// `target_pos` is the target's live position, used only by the pursuit
    /// aim.  Casting stops at the first visible probe.
    pub fn can_see_target<Q>(&self, world: &Q, target_pos: Vec2, probes: &[Vec2]) -> bool
    where
        Q: PhysicsQuery + ?Sized,
    {
        let aim = self.aim_heading(target_pos);
        probes
            .iter()
            .any(|&probe| self.cast(world, aim, probe).outcome == RayOutcome::Seen)
    }

    /// Like [`can_see_target`](Self::can_see_target), but casts every probe
    /// and appends each cast plus the two cone edges to `rays`.
    pub fn sample<Q>(
        &self,
        world:      &Q,
        target_pos: Vec2,
        probes:     &[Vec2],
        rays:       &mut Vec<SightRay>,
    ) -> bool
    where
        Q: PhysicsQuery + ?Sized,
    {
        let aim = self.aim_heading(target_pos);
        for edge in [self.half_angle, -self.half_angle] {
            rays.push(SightRay {
                from:    self.origin,
                to:      self.origin + aim.rotated(edge).as_vec() * self.max_distance,
                outcome: RayOutcome::Boundary,
            });
        }

        let mut seen = false;
        for &probe in probes {
            let ray = self.cast(world, aim, probe);
            seen |= ray.outcome == RayOutcome::Seen;
            rays.push(ray);
        }
        trace!(origin = ?self.origin, aim = ?aim.as_vec(), probes = probes.len(), seen, "sight sample");
        seen
    }

    // ── Private helpers ───────────────────────────────────────────────────

    fn cast<Q>(&self, world: &Q, aim: Heading, probe: Vec2) -> SightRay
    where
        Q: PhysicsQuery + ?Sized,
    {
        let Ok(toward) = Heading::new(probe - self.origin) else {
            // Probe sits on the eye: there is no direction to cast along.
            return SightRay { from: self.origin, to: self.origin, outcome: RayOutcome::Miss };
        };
        let dir = toward.as_vec();

        let Some(hit) = world.raycast(self.origin, dir, self.max_distance, self.cast_mask) else {
            return SightRay {
                from:    self.origin,
                to:      self.origin + dir * self.max_distance,
                outcome: RayOutcome::Miss,
            };
        };

        let outcome = if hit.layer != self.target_layer {
            RayOutcome::Blocked
        } else if geo::angle_between(aim.as_vec(), dir) < self.half_angle {
            RayOutcome::Seen
        } else {
            RayOutcome::OutsideCone
        };
        SightRay { from: self.origin, to: hit.point, outcome }
    }
}
