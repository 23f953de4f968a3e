//! The `Sim` struct and its step loops.

use glam::Vec2;
use tracing::trace;
use wd_behavior::{AnimationEvent, BehaviorController, BehaviorState, Command, TickContext};
use wd_core::{geo, ColliderId, FixedStep, SimTime, Tick};
use wd_sight::{FieldOfView, SightRay, SightSensor, VisibilityMesh};
use wd_world::{Body, CollisionWorld, PhysicsQuery};

use crate::{
    AnimationSink, SensorCadence, SimConfig, SimError, SimObserver, SimResult, TargetHandle,
    TickSnapshot,
};

/// Slack for frame-time accumulation, so that e.g. five 0.004 s frames add
/// up to one 0.02 s step despite rounding.
const STEP_EPS: f64 = 1e-9;

/// One agent, its body and sensor, the world it moves in, and the target it
/// hunts.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<B: Body> {
    pub(crate) config:          SimConfig,
    pub(crate) clock:           FixedStep,
    pub(crate) world:           CollisionWorld,
    pub(crate) body:            B,
    pub(crate) controller:      BehaviorController,
    pub(crate) sensor:          SightSensor,
    pub(crate) animator:        Box<dyn AnimationSink>,
    pub(crate) target:          TargetHandle,
    pub(crate) target_collider: ColliderId,
    pub(crate) fov:             Option<FieldOfView>,

    /// Last sensor result; refreshed every tick or on throttled frames.
    pub(crate) sees_target:     bool,
    pub(crate) last_sample:     Option<SimTime>,
    /// Unconsumed frame time, always `< step`.
    pub(crate) accumulator:     f64,
    /// Per-waypoint "body inside trigger" flags for edge detection.
    pub(crate) inside_trigger:  Vec<bool>,

    // Scratch buffers reused across ticks.
    pub(crate) rays:            Vec<SightRay>,
    pub(crate) mesh:            VisibilityMesh,
    pub(crate) anim_events:     Vec<AnimationEvent>,
}

impl<B: Body> Sim<B> {
    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn state(&self) -> BehaviorState {
        self.controller.state()
    }

    pub fn controller(&self) -> &BehaviorController {
        &self.controller
    }

    pub fn body(&self) -> &B {
        &self.body
    }

    pub fn sensor(&self) -> &SightSensor {
        &self.sensor
    }

    pub fn world(&self) -> &CollisionWorld {
        &self.world
    }

    pub fn target(&self) -> &TargetHandle {
        &self.target
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Most recent field-of-view mesh; empty until the first frame.
    pub fn mesh(&self) -> &VisibilityMesh {
        &self.mesh
    }

    #[inline]
    pub fn current_tick(&self) -> Tick {
        self.clock.current_tick
    }

    #[inline]
    pub fn now(&self) -> SimTime {
        self.clock.now()
    }

    /// Last sensor result the controller saw or will see.
    #[inline]
    pub fn sees_target(&self) -> bool {
        self.sees_target
    }

    // ── Stepping ──────────────────────────────────────────────────────────

    /// Run `secs` of simulated time as one frame per physics step, then call
    /// [`SimObserver::on_sim_end`].
    pub fn run_for<O: SimObserver + ?Sized>(&mut self, secs: f64, observer: &mut O) -> SimResult<()> {
        let ticks = self.clock.ticks_for_secs(secs);
        let step = self.clock.step_secs;
        for _ in 0..ticks {
            self.frame(step, observer)?;
        }
        observer.on_sim_end(self.clock.current_tick);
        Ok(())
    }

    /// Advance by a variable frame of `dt_secs`: run every whole physics
    /// step that fits, then do the visual-tick work (throttled sensor sample
    /// and field-of-view mesh).
    pub fn frame<O: SimObserver + ?Sized>(&mut self, dt_secs: f64, observer: &mut O) -> SimResult<()> {
        if !dt_secs.is_finite() || dt_secs < 0.0 {
            return Err(SimError::Config(format!("frame time must be non-negative, got {dt_secs}")));
        }

        self.accumulator += dt_secs;
        let step = self.clock.step_secs;
        while self.accumulator + STEP_EPS >= step {
            self.accumulator = (self.accumulator - step).max(0.0);
            self.physics_step(observer)?;
        }

        let tick = self.clock.current_tick;
        let now = self.clock.now();
        if let SensorCadence::Throttled { interval_secs } = self.config.sensor_cadence {
            if self.last_sample.is_none_or(|t| now.since(t) + STEP_EPS >= interval_secs) {
                self.sensor.track_body(self.body.position());
                self.sample(tick, observer);
                self.last_sample = Some(now);
            }
        }

        if let Some(fov) = &self.fov {
            let heading = self.sensor.aim_heading(self.target.position());
            fov.generate_into(&self.world, self.sensor.origin(), heading, &mut self.mesh);
            observer.on_mesh(tick, &self.mesh);
        }
        Ok(())
    }

    /// One fixed physics step.
    pub fn physics_step<O: SimObserver + ?Sized>(&mut self, observer: &mut O) -> SimResult<()> {
        let tick = self.clock.current_tick;
        let now = self.clock.now();
        observer.on_tick_start(tick);

        // ── ① Target ──────────────────────────────────────────────────────
        let target_bounds = self.target.bounds()?;
        self.world.move_dynamic(self.target_collider, target_bounds)?;

        // ── ② Animation callbacks ─────────────────────────────────────────
        let mut events = std::mem::take(&mut self.anim_events);
        self.animator.poll(now, &mut events);
        for event in events.drain(..) {
            trace!(tick = %tick, ?event, "animation callback");
            let cmds = self.controller.on_animation_event(event, now);
            self.apply(cmds, tick, now, observer);
        }
        self.anim_events = events;

        // ── ③ Perception ──────────────────────────────────────────────────
        self.sensor.track_body(self.body.position());
        if self.config.sensor_cadence == SensorCadence::EveryTick {
            self.sample(tick, observer);
        }
        let wall_ahead = self.probe_wall();

        // ── ④ Decide / ⑤ Apply ────────────────────────────────────────────
        let ctx = TickContext {
            tick,
            now,
            position:        self.body.position(),
            target_position: self.target.position(),
            sees_target:     self.sees_target,
            wall_ahead,
        };
        let cmds = self.controller.tick(&ctx);
        self.apply(cmds, tick, now, observer);

        // ── ⑥ Integrate ───────────────────────────────────────────────────
        self.body.step(self.clock.step_secs as f32, &self.world);
        self.check_waypoints(tick, now, observer);

        observer.on_tick_end(&self.snapshot(tick, now));
        self.clock.advance();
        Ok(())
    }

    // ── Private helpers ───────────────────────────────────────────────────

    pub(crate) fn apply<O: SimObserver + ?Sized>(
        &mut self,
        cmds:     Vec<Command>,
        tick:     Tick,
        now:      SimTime,
        observer: &mut O,
    ) {
        for cmd in cmds {
            match cmd {
                Command::MoveX(vx)      => self.body.set_horizontal_velocity(vx),
                Command::Impulse(v)     => self.body.apply_impulse(v),
                Command::Face(facing)   => self.sensor.set_facing(facing),
                Command::Aim(aim)       => self.sensor.set_aim(aim),
                Command::Animate(cue)   => {
                    self.animator.play(cue, now);
                    observer.on_anim_cue(tick, cue);
                }
                Command::Notify(event)  => observer.on_event(tick, &event),
            }
        }
    }

    fn sample<O: SimObserver + ?Sized>(&mut self, tick: Tick, observer: &mut O) {
        self.rays.clear();
        let probes = self.target.probes();
        self.sees_target =
            self.sensor.sample(&self.world, self.target.position(), &probes, &mut self.rays);
        observer.on_sight_rays(tick, &self.rays);
    }

    fn probe_wall(&self) -> bool {
        let facing = self.controller.agent().facing;
        let offset = Vec2::new(self.config.wall_probe_offset.x * facing.sign(), self.config.wall_probe_offset.y);
        self.world.overlap_circle(
            self.body.position() + offset,
            self.config.wall_probe_radius,
            self.config.wall_mask,
        )
    }

    /// Report waypoints whose trigger the body entered this tick.
    fn check_waypoints<O: SimObserver + ?Sized>(&mut self, tick: Tick, now: SimTime, observer: &mut O) {
        let position = self.body.position();
        let radius = self.config.waypoint_trigger_radius;

        let mut entered = Vec::new();
        for (i, wp) in self.controller.route().waypoints().iter().enumerate() {
            let inside = geo::within_horizontal(position, wp.position, radius);
            if inside && !self.inside_trigger[i] {
                entered.push(i);
            }
            self.inside_trigger[i] = inside;
        }

        for index in entered {
            let cmds = self.controller.on_waypoint_reached(index, now);
            self.apply(cmds, tick, now, observer);
        }
    }

    fn snapshot(&self, tick: Tick, now: SimTime) -> TickSnapshot {
        let agent = self.controller.agent();
        TickSnapshot {
            tick,
            time:             now,
            state:            agent.state,
            position:         self.body.position(),
            velocity:         self.body.velocity(),
            facing:           agent.facing,
            grounded:         self.body.is_grounded(),
            target_position:  self.target.position(),
            sees_target:      self.sees_target,
            movement_enabled: agent.movement_enabled,
            patrol_index:     self.controller.route().current_index(),
        }
    }
}
