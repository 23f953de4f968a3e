//! Builder for [`Sim`].

use tracing::info;
use wd_behavior::{BehaviorConfig, BehaviorController};
use wd_core::FixedStep;
use wd_schedule::PatrolRoute;
use wd_sight::{FieldOfView, SightConfig, SightSensor, VisibilityMesh};
use wd_world::{Body, CollisionWorld};

use crate::{
    AnimationSink, NoopAnimator, NoopObserver, Sim, SimConfig, SimResult, TargetHandle,
    TargetRegistry,
};

/// Fluent builder for [`Sim`].
///
/// # Required inputs
///
/// - `config`: the driver configuration.
/// - `world`: static geometry; the target's marker collider is added to it.
/// - `body`: the agent's physics body, already placed.
/// - `behavior`, `route`, `sight`: controller and sensor configuration.
/// - A target registered under `config.target_tag`.
///
/// # Optional inputs
///
/// - [`animator`](Self::animator): defaults to [`NoopAnimator`].
/// - [`field_of_view`](Self::field_of_view): no mesh is generated without it.
pub struct SimBuilder<B: Body> {
    config:   SimConfig,
    world:    CollisionWorld,
    body:     B,
    behavior: BehaviorConfig,
    route:    PatrolRoute,
    sight:    SightConfig,
    targets:  TargetRegistry,
    animator: Box<dyn AnimationSink>,
    fov:      Option<FieldOfView>,
}

impl<B: Body> SimBuilder<B> {
    pub fn new(
        config:   SimConfig,
        world:    CollisionWorld,
        body:     B,
        behavior: BehaviorConfig,
        route:    PatrolRoute,
        sight:    SightConfig,
    ) -> Self {
        Self {
            config,
            world,
            body,
            behavior,
            route,
            sight,
            targets:  TargetRegistry::new(),
            animator: Box::new(NoopAnimator),
            fov:      None,
        }
    }

    /// Register a single target under `tag`.
    pub fn target(mut self, tag: impl Into<String>, target: TargetHandle) -> Self {
        self.targets.register(tag, target);
        self
    }

    /// Replace the registry wholesale.
    pub fn targets(mut self, registry: TargetRegistry) -> Self {
        self.targets = registry;
        self
    }

    pub fn animator(mut self, animator: impl AnimationSink + 'static) -> Self {
        self.animator = Box::new(animator);
        self
    }

    pub fn field_of_view(mut self, fov: FieldOfView) -> Self {
        self.fov = Some(fov);
        self
    }

    /// Validate everything, resolve the target, and bring the collaborators
    /// in line with the controller's initial state.
    ///
    /// # Errors
    ///
    /// - [`SimError::Config`][crate::SimError::Config] for an invalid driver config.
    /// - [`SimError::TargetNotFound`][crate::SimError::TargetNotFound] if no
    ///   target carries `config.target_tag`.
    /// - Wrapped core, sight, behavior and world errors from the parts.
    pub fn build(self) -> SimResult<Sim<B>> {
        self.config.validate()?;
        let clock = FixedStep::new(self.config.physics_step_secs)?;
        let sensor = SightSensor::new(&self.sight)?;
        if let Some(fov) = &self.fov {
            fov.validate()?;
        }
        let controller = BehaviorController::new(self.behavior, self.route, self.body.position())?;
        let target = self.targets.resolve(&self.config.target_tag)?;

        let mut world = self.world;
        let target_collider = world.insert_dynamic(target.bounds()?, self.sight.target_layer);
        let waypoints = controller.route().len();

        info!(
            tag       = %self.config.target_tag,
            state     = %controller.state(),
            waypoints,
            colliders = world.collider_count(),
            step      = self.config.physics_step_secs,
            "sim built"
        );

        let mut sim = Sim {
            config: self.config,
            clock,
            world,
            body: self.body,
            controller,
            sensor,
            animator: self.animator,
            target,
            target_collider,
            fov: self.fov,
            sees_target: false,
            last_sample: None,
            accumulator: 0.0,
            inside_trigger: vec![false; waypoints],
            rays: Vec::new(),
            mesh: VisibilityMesh::default(),
            anim_events: Vec::new(),
        };

        sim.sensor.track_body(sim.body.position());
        let cmds = sim.controller.begin();
        let (tick, now) = (sim.clock.current_tick, sim.clock.now());
        sim.apply(cmds, tick, now, &mut NoopObserver);
        Ok(sim)
    }
}
