//! Integration tests for wd-sim: a real collision world, a kinematic body
//! and a scripted target.

use glam::Vec2;
use wd_behavior::{AnimCue, BehaviorConfig, BehaviorEvent, BehaviorState};
use wd_core::Tick;
use wd_schedule::{PatrolRoute, Waypoint};
use wd_sight::{FieldOfView, SightConfig, SightRay, VisibilityMesh};
use wd_world::{CollisionWorld, CollisionWorldBuilder, KinematicBody, Layer, LayerMask};

use crate::{
    NoopObserver, SensorCadence, Sim, SimBuilder, SimConfig, SimError, SimObserver, TargetHandle,
    TargetRegistry, TickSnapshot, TimedAnimator,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

const FAR_BEHIND: Vec2 = Vec2::new(-40.0, 0.5);

/// Floor along y ∈ [-1, 0], optionally with a wall starting at `wall_x`.
fn world(wall_x: Option<f32>) -> CollisionWorld {
    let mut b = CollisionWorldBuilder::new();
    b.add_box(Vec2::new(-50.0, -1.0), Vec2::new(50.0, 0.0), Layer::GROUND).unwrap();
    if let Some(x) = wall_x {
        b.add_box(Vec2::new(x, 0.0), Vec2::new(x + 0.5, 3.0), Layer::WALL).unwrap();
    }
    b.build()
}

/// Unit box resting on the floor at the origin.
fn body() -> KinematicBody {
    let solid = LayerMask::from_layers(&[Layer::GROUND, Layer::WALL]);
    KinematicBody::new(Vec2::new(0.0, 0.5), Vec2::splat(0.5), solid)
}

fn far_route() -> PatrolRoute {
    PatrolRoute::new(vec![Waypoint::new(Vec2::new(20.0, 0.0), 0.0, false)]).unwrap()
}

fn builder(
    config: SimConfig,
    world:  CollisionWorld,
    route:  PatrolRoute,
    target: &TargetHandle,
) -> SimBuilder<KinematicBody> {
    SimBuilder::new(config, world, body(), BehaviorConfig::default(), route, SightConfig::default())
        .target("Player", target.clone())
}

fn target_at(p: Vec2) -> TargetHandle {
    TargetHandle::new(p, Vec2::new(0.3, 0.5))
}

#[derive(Default)]
struct Recorder {
    events:    Vec<(Tick, BehaviorEvent)>,
    cues:      Vec<AnimCue>,
    snapshots: Vec<TickSnapshot>,
    ray_sets:  Vec<Vec<SightRay>>,
    meshes:    Vec<VisibilityMesh>,
    ended:     Option<Tick>,
}

impl Recorder {
    fn transitions(&self) -> Vec<(BehaviorState, BehaviorState)> {
        self.events
            .iter()
            .filter_map(|(_, e)| match e {
                BehaviorEvent::StateChanged { from, to } => Some((*from, *to)),
                _ => None,
            })
            .collect()
    }

    fn count(&self, kind: &str) -> usize {
        self.events.iter().filter(|(_, e)| e.kind() == kind).count()
    }
}

impl SimObserver for Recorder {
    fn on_tick_end(&mut self, snapshot: &TickSnapshot) {
        self.snapshots.push(snapshot.clone());
    }

    fn on_event(&mut self, tick: Tick, event: &BehaviorEvent) {
        self.events.push((tick, event.clone()));
    }

    fn on_anim_cue(&mut self, _tick: Tick, cue: AnimCue) {
        self.cues.push(cue);
    }

    fn on_sight_rays(&mut self, _tick: Tick, rays: &[SightRay]) {
        self.ray_sets.push(rays.to_vec());
    }

    fn on_mesh(&mut self, _tick: Tick, mesh: &VisibilityMesh) {
        self.meshes.push(mesh.clone());
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        self.ended = Some(final_tick);
    }
}

fn expect_err(result: Result<Sim<KinematicBody>, SimError>) -> SimError {
    match result {
        Ok(_) => panic!("build unexpectedly succeeded"),
        Err(e) => e,
    }
}

// ── Builder ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;

    #[test]
    fn missing_target_is_fatal() {
        let err = expect_err(
            SimBuilder::new(
                SimConfig::default(),
                world(None),
                body(),
                BehaviorConfig::default(),
                far_route(),
                SightConfig::default(),
            )
            .build(),
        );
        assert!(matches!(err, SimError::TargetNotFound(ref tag) if tag == "Player"));
    }

    #[test]
    fn target_resolved_by_configured_tag() {
        let target = target_at(FAR_BEHIND);
        let config = SimConfig { target_tag: "Intruder".into(), ..SimConfig::default() };
        let err = expect_err(builder(config.clone(), world(None), far_route(), &target).build());
        assert!(matches!(err, SimError::TargetNotFound(_)));

        let sim = SimBuilder::new(
            config,
            world(None),
            body(),
            BehaviorConfig::default(),
            far_route(),
            SightConfig::default(),
        )
        .target("Intruder", target)
        .build()
        .unwrap();
        assert_eq!(sim.state(), BehaviorState::Patrol);
    }

    #[test]
    fn registry_supplies_tagged_target() {
        let mut registry = TargetRegistry::new();
        registry.register("Player", target_at(FAR_BEHIND));
        registry.register("Intruder", target_at(Vec2::new(12.0, 0.5)));
        let config = SimConfig { target_tag: "Intruder".into(), ..SimConfig::default() };

        let sim = SimBuilder::new(
            config,
            world(None),
            body(),
            BehaviorConfig::default(),
            far_route(),
            SightConfig::default(),
        )
        .targets(registry)
        .build()
        .unwrap();
        assert_eq!(sim.target().position(), Vec2::new(12.0, 0.5));
    }

    #[test]
    fn probe_offsets_follow_the_target() {
        let target = target_at(Vec2::new(3.0, 0.5));
        assert_eq!(target.probes(), [Vec2::new(3.0, 0.875), Vec2::new(3.0, 0.125)]);

        let tall = target.with_probe_offsets(Vec2::new(0.0, 1.5), Vec2::ZERO);
        tall.set_position(Vec2::new(4.0, 0.5));
        assert_eq!(tall.probes(), [Vec2::new(4.0, 2.0), Vec2::new(4.0, 0.5)]);
    }

    #[test]
    fn target_marker_collider_added() {
        let target = target_at(FAR_BEHIND);
        let sim = builder(SimConfig::default(), world(None), far_route(), &target).build().unwrap();
        assert_eq!(sim.world().static_count(), 1);
        assert_eq!(sim.world().dynamic_count(), 1);
    }

    #[test]
    fn invalid_parts_rejected() {
        let target = target_at(FAR_BEHIND);

        let config = SimConfig { physics_step_secs: 0.0, ..SimConfig::default() };
        let err = expect_err(builder(config, world(None), far_route(), &target).build());
        assert!(matches!(err, SimError::Core(_)));

        let config = SimConfig {
            sensor_cadence: SensorCadence::Throttled { interval_secs: 0.0 },
            ..SimConfig::default()
        };
        let err = expect_err(builder(config, world(None), far_route(), &target).build());
        assert!(matches!(err, SimError::Config(_)));

        let fov = FieldOfView {
            fov_degrees:  90.0,
            max_distance: 5.0,
            ray_count:    0,
            mask:         Layer::WALL.into(),
        };
        let err = expect_err(
            builder(SimConfig::default(), world(None), far_route(), &target)
                .field_of_view(fov)
                .build(),
        );
        assert!(matches!(err, SimError::Sight(_)));
    }
}

// ── Stepping ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod step_tests {
    use super::*;

    #[test]
    fn frames_accumulate_into_whole_steps() {
        let target = target_at(FAR_BEHIND);
        let mut sim = builder(SimConfig::default(), world(None), far_route(), &target).build().unwrap();
        for _ in 0..4 {
            sim.frame(0.004, &mut NoopObserver).unwrap();
        }
        assert_eq!(sim.current_tick(), Tick(0));
        sim.frame(0.004, &mut NoopObserver).unwrap();
        assert_eq!(sim.current_tick(), Tick(1));
        sim.frame(0.05, &mut NoopObserver).unwrap();
        assert_eq!(sim.current_tick(), Tick(3));
    }

    #[test]
    fn negative_frame_rejected() {
        let target = target_at(FAR_BEHIND);
        let mut sim = builder(SimConfig::default(), world(None), far_route(), &target).build().unwrap();
        assert!(matches!(sim.frame(-0.01, &mut NoopObserver), Err(SimError::Config(_))));
        assert!(matches!(sim.frame(f64::NAN, &mut NoopObserver), Err(SimError::Config(_))));
    }

    #[test]
    fn run_for_reports_end() {
        let target = target_at(FAR_BEHIND);
        let mut sim = builder(SimConfig::default(), world(None), far_route(), &target).build().unwrap();
        let mut rec = Recorder::default();
        sim.run_for(0.5, &mut rec).unwrap();
        assert_eq!(rec.ended, Some(sim.current_tick()));
        assert_eq!(rec.snapshots.len() as u64, sim.current_tick().0);
        // Every tick sampled: two cone edges plus two probes.
        assert_eq!(rec.ray_sets.len(), rec.snapshots.len());
        assert!(rec.ray_sets.iter().all(|rays| rays.len() == 4));
    }

    #[test]
    fn patrol_moves_toward_goal_on_floor() {
        let target = target_at(FAR_BEHIND);
        let mut sim = builder(SimConfig::default(), world(None), far_route(), &target).build().unwrap();
        let mut rec = Recorder::default();
        sim.run_for(0.5, &mut rec).unwrap();

        let last = rec.snapshots.last().unwrap();
        assert_eq!(last.state, BehaviorState::Patrol);
        assert_eq!(last.velocity.x, 2.0);
        assert!(last.position.x > 0.9);
        assert_eq!(last.position.y, 0.5);
        assert!(last.grounded);
    }
}

// ── Patrol ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod patrol_tests {
    use super::*;

    fn two_stop_route() -> PatrolRoute {
        PatrolRoute::new(vec![
            Waypoint::new(Vec2::new(2.0, 0.0), 1.0, false),
            Waypoint::new(Vec2::new(-2.0, 0.0), 0.0, true),
        ])
        .unwrap()
    }

    #[test]
    fn waits_at_waypoint_then_heads_for_next() {
        let target = target_at(FAR_BEHIND);
        let mut sim = builder(SimConfig::default(), world(None), two_stop_route(), &target)
            .build()
            .unwrap();
        let mut rec = Recorder::default();

        sim.run_for(1.0, &mut rec).unwrap();
        assert!(sim.controller().is_waiting());
        assert_eq!(rec.count("waypoint_reached"), 1);
        let x = sim.body().position.x;
        assert!(x >= 1.75 && x < 2.0, "stopped at {x}");
        assert_eq!(sim.body().velocity.x, 0.0);

        sim.run_for(1.5, &mut rec).unwrap();
        assert!(!sim.controller().is_waiting());
        assert!(rec
            .events
            .iter()
            .any(|(_, e)| *e == BehaviorEvent::PatrolResumed { index: 1 }));
        assert_eq!(sim.body().velocity.x, -2.0);
        assert!(sim.body().position.x < x);
        assert_eq!(sim.sensor().facing(), wd_core::Facing::Left);
    }
}

// ── Detection ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod detection_tests {
    use super::*;

    #[test]
    fn detect_then_check_after_animation() {
        let target = target_at(Vec2::new(5.0, 0.5));
        let mut sim = builder(SimConfig::default(), world(None), far_route(), &target)
            .animator(TimedAnimator::new(0.5, 0.4))
            .build()
            .unwrap();
        let mut rec = Recorder::default();

        sim.physics_step(&mut rec).unwrap();
        assert_eq!(sim.state(), BehaviorState::Detect);
        assert!(rec.cues.contains(&AnimCue::Detect));
        assert_eq!(rec.count("target_spotted"), 1);

        sim.run_for(0.7, &mut rec).unwrap();
        assert_eq!(
            rec.transitions()[..3],
            [
                (BehaviorState::Patrol, BehaviorState::Detect),
                (BehaviorState::Detect, BehaviorState::Check),
                (BehaviorState::Check, BehaviorState::Pursue),
            ]
        );
        assert_eq!(sim.state(), BehaviorState::Pursue);
        assert!(sim.controller().agent().movement_enabled);
        assert!(sim.body().velocity.x > 0.0);
    }

    #[test]
    fn noop_animator_leaves_agent_detecting() {
        let target = target_at(Vec2::new(5.0, 0.5));
        let mut sim = builder(SimConfig::default(), world(None), far_route(), &target).build().unwrap();
        sim.run_for(2.0, &mut NoopObserver).unwrap();
        assert_eq!(sim.state(), BehaviorState::Detect);
        assert_eq!(sim.body().velocity.x, 0.0);
    }

    #[test]
    fn detect_timeout_moves_on_without_animator() {
        let target = target_at(Vec2::new(5.0, 0.5));
        let behavior = BehaviorConfig { detect_timeout: Some(1.0), ..BehaviorConfig::default() };
        let mut sim = SimBuilder::new(
            SimConfig::default(),
            world(None),
            body(),
            behavior,
            far_route(),
            SightConfig::default(),
        )
        .target("Player", target)
        .build()
        .unwrap();
        let mut rec = Recorder::default();
        sim.run_for(1.5, &mut rec).unwrap();
        assert_eq!(rec.count("detect_timed_out"), 1);
        assert!(rec.transitions().contains(&(BehaviorState::Detect, BehaviorState::Check)));
    }

    #[test]
    fn close_target_is_attacked() {
        let target = target_at(Vec2::new(1.0, 0.5));
        let mut sim = builder(SimConfig::default(), world(None), far_route(), &target)
            .animator(TimedAnimator::new(0.5, 0.4))
            .build()
            .unwrap();
        let mut rec = Recorder::default();
        sim.run_for(0.7, &mut rec).unwrap();
        assert_eq!(rec.count("attack_launched"), 1);
        assert_eq!(sim.state(), BehaviorState::Attack);
        assert!(rec.cues.contains(&AnimCue::StartAttack));
    }

    #[test]
    fn throttled_sensor_reuses_last_sample() {
        let target = target_at(FAR_BEHIND);
        let config = SimConfig {
            sensor_cadence: SensorCadence::Throttled { interval_secs: 0.1 },
            ..SimConfig::default()
        };
        let mut sim = builder(config, world(None), far_route(), &target).build().unwrap();

        // First frame samples: nothing in view.
        sim.frame(0.02, &mut NoopObserver).unwrap();
        assert!(!sim.sees_target());

        target.set_position(Vec2::new(5.0, 0.5));
        for _ in 0..4 {
            sim.frame(0.02, &mut NoopObserver).unwrap();
        }
        assert!(!sim.sees_target());
        assert_eq!(sim.state(), BehaviorState::Patrol);

        // 0.1 s after the first sample.
        sim.frame(0.02, &mut NoopObserver).unwrap();
        assert!(sim.sees_target());
        assert_eq!(sim.state(), BehaviorState::Patrol);

        sim.frame(0.02, &mut NoopObserver).unwrap();
        assert_eq!(sim.state(), BehaviorState::Detect);
    }
}

// ── Obstacles ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod obstacle_tests {
    use super::*;

    #[test]
    fn hops_when_wall_ahead() {
        let target = target_at(FAR_BEHIND);
        let mut sim = builder(SimConfig::default(), world(Some(2.0)), far_route(), &target)
            .build()
            .unwrap();
        let mut rec = Recorder::default();
        sim.run_for(1.0, &mut rec).unwrap();

        assert_eq!(rec.count("jumped"), 1);
        let peak = rec.snapshots.iter().map(|s| s.position.y).fold(f32::MIN, f32::max);
        assert!(peak > 1.0, "peak {peak}");
        assert!(rec.snapshots.iter().all(|s| s.position.x + 0.5 <= 2.0));
    }
}

// ── Field of view ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod fov_tests {
    use super::*;

    #[test]
    fn mesh_rebuilt_each_frame() {
        let target = target_at(FAR_BEHIND);
        let fov = FieldOfView {
            fov_degrees:  90.0,
            max_distance: 5.0,
            ray_count:    4,
            mask:         LayerMask::from_layers(&[Layer::GROUND, Layer::WALL]),
        };
        let mut sim = builder(SimConfig::default(), world(Some(3.0)), far_route(), &target)
            .field_of_view(fov)
            .build()
            .unwrap();
        assert!(sim.mesh().is_empty());

        let mut rec = Recorder::default();
        sim.frame(0.02, &mut rec).unwrap();
        sim.frame(0.02, &mut rec).unwrap();
        assert_eq!(rec.meshes.len(), 2);

        let mesh = sim.mesh();
        assert_eq!(mesh.triangle_count(), 4);
        assert_eq!(mesh.origin(), Some(sim.sensor().origin()));
        // Facing right: the middle ray stops on the wall at x = 3, the
        // lowest one on the floor.
        let rim = mesh.rim();
        assert_eq!(rim.len(), 5);
        assert!((rim[2].x - 3.0).abs() < 1e-4);
        assert!(rim[4].y.abs() < 1e-4);
    }
}
