//! `BehaviorController`: the patrol / detect / check / search / pursue /
//! attack state machine.
//!
//! # Per-tick order
//!
//! ```text
//! 1. poll cooldowns          attack / jump flags restored on expiry
//! 2. poll patrol wait        Fired → resume route, Stale → discard
//! 3. wall probe              jump if enabled
//! 4. state handler           exactly one of patrol() … attack()
//! ```
//!
//! Handlers read the [`TickContext`], mutate the [`Agent`] record and push
//! [`Command`]s.  A handler performs at most one transition per tick, except
//! `Pursue → Attack`, which runs the attack step immediately.

use glam::Vec2;
use tracing::{debug, trace, warn};
use wd_core::{geo, toggle_facing, SimTime, Tick};
use wd_schedule::{DelayPoll, GuardedDelay, PatrolRoute};
use wd_sight::AimMode;

use crate::{
    Agent, AnimCue, AnimationEvent, BehaviorConfig, BehaviorEvent, BehaviorResult, BehaviorState,
    Command, TickContext,
};

/// Which state was active, and which entry into it, when a delay was armed.
///
/// Every transition bumps the epoch, so a stamp taken in `Patrol` no longer
/// matches after `Patrol → Detect → … → Patrol`.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
struct StateStamp {
    state: BehaviorState,
    epoch: u64,
}

/// Drives one agent.
///
/// Construct with [`new`](Self::new), send [`begin`](Self::begin)'s commands
/// once, then call [`tick`](Self::tick) every physics step.  Arrival at a
/// waypoint and animation callbacks arrive through
/// [`on_waypoint_reached`](Self::on_waypoint_reached) and
/// [`on_animation_event`](Self::on_animation_event).
pub struct BehaviorController {
    config:      BehaviorConfig,
    route:       PatrolRoute,
    agent:       Agent,
    patrol_wait: GuardedDelay<StateStamp>,
    epoch:       u64,
    last_tick:   Tick,
}

impl BehaviorController {
    /// Validate `config` and place the agent at `position`, heading for the
    /// route's first waypoint.
    pub fn new(config: BehaviorConfig, route: PatrolRoute, position: Vec2) -> BehaviorResult<Self> {
        config.validate()?;

        let mut agent = Agent::new(position, config.initial_state, route.current().position.x);
        match agent.state {
            BehaviorState::Patrol => {}
            BehaviorState::Detect => agent.detect_timer.start(SimTime::ZERO),
            BehaviorState::Search => agent.alert_timer.start(SimTime::ZERO),
            _ => {}
        }
        if agent.state != BehaviorState::Patrol {
            agent.inspection_point = Some(position);
        }

        Ok(Self {
            config,
            route,
            agent,
            patrol_wait: GuardedDelay::new(),
            epoch:       0,
            last_tick:   Tick::ZERO,
        })
    }

    /// Commands that bring the collaborators in line with the initial state.
    pub fn begin(&self) -> Vec<Command> {
        let mut out = vec![
            Command::Face(self.agent.facing),
            Command::Aim(self.aim_for(self.agent.state)),
        ];
        if self.agent.state == BehaviorState::Patrol {
            out.push(Command::Animate(AnimCue::Move(true)));
        }
        out
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn state(&self) -> BehaviorState {
        self.agent.state
    }

    #[inline]
    pub fn agent(&self) -> &Agent {
        &self.agent
    }

    #[inline]
    pub fn config(&self) -> &BehaviorConfig {
        &self.config
    }

    #[inline]
    pub fn route(&self) -> &PatrolRoute {
        &self.route
    }

    /// `true` while standing at a waypoint.  A wait armed before the last
    /// state change does not count.
    #[inline]
    pub fn is_waiting(&self) -> bool {
        self.patrol_wait.is_live(&self.stamp())
    }

    // ── External triggers ─────────────────────────────────────────────────

    /// Advance one physics tick.
    pub fn tick(&mut self, ctx: &TickContext) -> Vec<Command> {
        self.agent.position = ctx.position;
        self.last_tick = ctx.tick;

        let mut out = Vec::new();
        self.poll_cooldowns(ctx.now);
        self.poll_patrol_wait(ctx.now, &mut out);
        self.check_wall(ctx, &mut out);

        match self.agent.state {
            BehaviorState::Patrol => self.patrol(ctx, &mut out),
            BehaviorState::Detect => self.detect(ctx, &mut out),
            BehaviorState::Check  => self.check(ctx, &mut out),
            BehaviorState::Search => self.search(ctx, &mut out),
            BehaviorState::Pursue => self.pursue(ctx, &mut out),
            BehaviorState::Attack => self.attack(ctx, &mut out),
        }
        out
    }

    /// The body entered waypoint `index`'s trigger.
    ///
    /// Ignored unless patrolling towards exactly that waypoint and not
    /// already waiting.  Otherwise stops the agent and arms the wait,
    /// replacing any wait left over from an earlier patrol.
    pub fn on_waypoint_reached(&mut self, index: usize, now: SimTime) -> Vec<Command> {
        if self.agent.state != BehaviorState::Patrol
            || index != self.route.current_index()
            || self.is_waiting()
        {
            return Vec::new();
        }

        let wait = self.route.current().wait_secs;
        self.agent.movement_enabled = false;
        self.patrol_wait.arm(now, wait, self.stamp());
        trace!(tick = %self.last_tick, index, wait, "waiting at waypoint");

        vec![
            Command::MoveX(0.0),
            Command::Animate(AnimCue::Move(false)),
            Command::Notify(BehaviorEvent::WaypointReached { index }),
        ]
    }

    /// Run the patrol-wait continuation if it is due.
    ///
    /// Called from every [`tick`](Self::tick); exposed so callers can settle
    /// the wait outside the physics step.  A wait that comes due after any
    /// state change is discarded and never retried.
    pub fn resume_patrol(&mut self, now: SimTime) -> Vec<Command> {
        let mut out = Vec::new();
        self.poll_patrol_wait(now, &mut out);
        out
    }

    /// The detection animation finished: `Detect → Check`.  No-op in any
    /// other state.
    pub fn finish_detection(&mut self, _now: SimTime) -> Vec<Command> {
        if self.agent.state != BehaviorState::Detect {
            debug!(tick = %self.last_tick, state = %self.agent.state, "detection finished outside Detect; ignored");
            return Vec::new();
        }
        let mut out = Vec::new();
        self.enter_check(&mut out);
        out
    }

    pub fn set_movement_enabled(&mut self, enabled: bool) {
        self.agent.movement_enabled = enabled;
    }

    pub fn on_animation_event(&mut self, event: AnimationEvent, now: SimTime) -> Vec<Command> {
        match event {
            AnimationEvent::DetectionFinished => self.finish_detection(now),
            AnimationEvent::MovementOn => {
                self.set_movement_enabled(true);
                Vec::new()
            }
            AnimationEvent::MovementOff => {
                self.set_movement_enabled(false);
                Vec::new()
            }
        }
    }

    // ── State handlers ────────────────────────────────────────────────────

    fn patrol(&mut self, ctx: &TickContext, out: &mut Vec<Command>) {
        if ctx.sees_target {
            let at = ctx.target_position;
            self.agent.inspection_point = Some(at);
            self.agent.detect_timer.start(ctx.now);
            out.push(Command::MoveX(0.0));
            out.push(Command::Aim(AimMode::Alert(at)));
            out.push(Command::Animate(AnimCue::Detect));
            out.push(Command::Notify(BehaviorEvent::TargetSpotted { at }));
            self.transition(BehaviorState::Detect, out);
            return;
        }

        if self.agent.movement_enabled {
            let dir = geo::horizontal_sign(ctx.position.x, self.agent.patrol_goal_x);
            out.push(Command::MoveX(dir * self.config.patrol_speed));
        }
    }

    fn detect(&mut self, ctx: &TickContext, out: &mut Vec<Command>) {
        let Some(limit) = self.config.detect_timeout else {
            return;
        };
        if self.agent.detect_timer.has_elapsed(ctx.now, limit) {
            warn!(tick = %ctx.tick, limit, "detection animation never finished; checking anyway");
            out.push(Command::Notify(BehaviorEvent::DetectTimedOut));
            self.enter_check(out);
        }
    }

    fn check(&mut self, ctx: &TickContext, out: &mut Vec<Command>) {
        if ctx.sees_target {
            self.enter_pursue(out);
            return;
        }

        let inspect = self.inspection();
        if geo::within_horizontal(ctx.position, inspect, self.config.arrival_radius) {
            self.enter_search(ctx.now, out);
            return;
        }

        let dir = geo::horizontal_sign(ctx.position.x, inspect.x);
        out.push(Command::MoveX(dir * self.config.check_speed));
        self.face_toward(inspect.x, out);
    }

    fn search(&mut self, ctx: &TickContext, out: &mut Vec<Command>) {
        if ctx.sees_target {
            self.agent.alert_timer.stop();
            self.enter_pursue(out);
            return;
        }
        if !self.agent.alert_timer.has_elapsed(ctx.now, self.config.max_alert_time) {
            return;
        }

        self.agent.alert_timer.stop();
        self.agent.inspection_point = None;
        self.agent.movement_enabled = true;
        let goal_x = self.route.reset().position.x;
        self.agent.patrol_goal_x = goal_x;
        self.face_toward(goal_x, out);
        out.push(Command::Aim(AimMode::Facing));
        out.push(Command::Animate(AnimCue::Return));
        out.push(Command::Animate(AnimCue::Move(true)));
        self.transition(BehaviorState::Patrol, out);
    }

    fn pursue(&mut self, ctx: &TickContext, out: &mut Vec<Command>) {
        let target = ctx.target_position;
        if self.agent.movement_enabled {
            let dir = geo::horizontal_sign(ctx.position.x, target.x);
            out.push(Command::MoveX(dir * self.config.pursue_speed));
        }

        if !ctx.sees_target {
            self.lose_sight(ctx, out);
            return;
        }
        if self.agent.pursue_grace.is_running() {
            trace!(tick = %ctx.tick, "target reacquired within grace period");
            self.agent.pursue_grace.stop();
        }

        if self.agent.movement_enabled {
            self.face_toward(target.x, out);
        }
        if geo::within_range(ctx.position, target, self.config.attack_range) {
            out.push(Command::Animate(AnimCue::StartAttack));
            self.transition(BehaviorState::Attack, out);
            self.attack(ctx, out);
            return;
        }
        self.agent.inspection_point = Some(Vec2::new(target.x, ctx.position.y));
    }

    /// Pursue tick with the target out of sight.
    fn lose_sight(&mut self, ctx: &TickContext, out: &mut Vec<Command>) {
        if !self.agent.pursue_grace.is_running() {
            self.agent.inspection_point = Some(Vec2::new(ctx.target_position.x, ctx.position.y));
            self.agent.pursue_grace.start(ctx.now);
            trace!(tick = %ctx.tick, "target lost; grace period started");
            return;
        }
        if !self.agent.pursue_grace.has_elapsed(ctx.now, self.config.max_pursue_time) {
            return;
        }

        self.agent.pursue_grace.stop();
        let inspect = self.inspection();
        if geo::within_horizontal(ctx.position, inspect, self.config.search_radius) {
            self.enter_search(ctx.now, out);
        } else {
            out.push(Command::Aim(AimMode::Alert(inspect)));
            out.push(Command::Animate(AnimCue::LostSight));
            self.transition(BehaviorState::Check, out);
        }
    }

    fn attack(&mut self, ctx: &TickContext, out: &mut Vec<Command>) {
        let target = ctx.target_position;
        if self.agent.movement_enabled {
            self.face_toward(target.x, out);
        }

        if !geo::within_range(ctx.position, target, self.config.attack_range) {
            out.push(Command::Animate(AnimCue::Pursue));
            self.transition(BehaviorState::Pursue, out);
            return;
        }
        if !self.agent.attack_enabled {
            return;
        }

        self.agent.attack_enabled = false;
        self.agent.attack_cooldown.trigger(ctx.now, self.config.attack_cooldown);
        out.push(Command::Animate(AnimCue::Attack));
        out.push(Command::Notify(BehaviorEvent::AttackLaunched));
    }

    // ── Shared entries ────────────────────────────────────────────────────

    fn enter_check(&mut self, out: &mut Vec<Command>) {
        self.agent.detect_timer.stop();
        out.push(Command::Aim(AimMode::Alert(self.inspection())));
        self.transition(BehaviorState::Check, out);
    }

    /// `Search` issues no movement; the body keeps its last velocity.
    fn enter_search(&mut self, now: SimTime, out: &mut Vec<Command>) {
        self.agent.alert_timer.start(now);
        out.push(Command::Aim(AimMode::Facing));
        out.push(Command::Animate(AnimCue::Search));
        self.transition(BehaviorState::Search, out);
    }

    fn enter_pursue(&mut self, out: &mut Vec<Command>) {
        self.agent.pursue_grace.stop();
        out.push(Command::Aim(AimMode::Pursuit));
        out.push(Command::Animate(AnimCue::Pursue));
        self.transition(BehaviorState::Pursue, out);
    }

    // ── Timers and auxiliaries ────────────────────────────────────────────

    fn poll_cooldowns(&mut self, now: SimTime) {
        if self.agent.attack_cooldown.poll_ready(now) {
            self.agent.attack_enabled = true;
        }
        if self.agent.jump_cooldown.poll_ready(now) {
            self.agent.jump_enabled = true;
        }
    }

    fn poll_patrol_wait(&mut self, now: SimTime, out: &mut Vec<Command>) {
        let stamp = self.stamp();
        match self.patrol_wait.poll(now, &stamp) {
            DelayPoll::Fired(_) => {
                let next = *self.route.advance();
                let index = self.route.current_index();
                self.agent.movement_enabled = true;
                self.agent.patrol_goal_x = next.position.x;
                out.push(Command::Animate(AnimCue::Move(true)));
                if next.turn_around {
                    self.face_toward(next.position.x, out);
                }
                debug!(tick = %self.last_tick, index, "patrol resumed");
                out.push(Command::Notify(BehaviorEvent::PatrolResumed { index }));
            }
            DelayPoll::Stale(armed) => {
                let index = self.route.current_index();
                warn!(
                    tick = %self.last_tick,
                    index,
                    armed_in = %armed.state,
                    now_in = %self.agent.state,
                    "patrol wait came due after a state change; discarded"
                );
                out.push(Command::Notify(BehaviorEvent::ResumeDiscarded { index }));
            }
            DelayPoll::Idle | DelayPoll::Pending => {}
        }
    }

    /// Forward obstruction probe: hop once, then wait out the cooldown.
    fn check_wall(&mut self, ctx: &TickContext, out: &mut Vec<Command>) {
        if !self.agent.jump_enabled || !ctx.wall_ahead {
            return;
        }
        self.agent.jump_enabled = false;
        self.agent.jump_cooldown.trigger(ctx.now, self.config.jump_cooldown);
        out.push(Command::Impulse(Vec2::new(0.0, self.config.jump_force)));
        out.push(Command::Notify(BehaviorEvent::Jumped));
    }

    // ── Helpers ───────────────────────────────────────────────────────────

    fn transition(&mut self, to: BehaviorState, out: &mut Vec<Command>) {
        let from = self.agent.state;
        self.agent.state = to;
        self.epoch += 1;
        debug!(tick = %self.last_tick, %from, %to, "behavior transition");
        out.push(Command::Notify(BehaviorEvent::StateChanged { from, to }));
    }

    fn face_toward(&mut self, x: f32, out: &mut Vec<Command>) {
        let (facing, changed) = toggle_facing(self.agent.facing, self.agent.position.x, x);
        if changed {
            self.agent.facing = facing;
            out.push(Command::Face(facing));
        }
    }

    fn stamp(&self) -> StateStamp {
        StateStamp { state: self.agent.state, epoch: self.epoch }
    }

    fn inspection(&self) -> Vec2 {
        self.agent.inspection_point.unwrap_or(self.agent.position)
    }

    fn aim_for(&self, state: BehaviorState) -> AimMode {
        match state {
            BehaviorState::Patrol | BehaviorState::Search => AimMode::Facing,
            BehaviorState::Detect | BehaviorState::Check  => AimMode::Alert(self.inspection()),
            BehaviorState::Pursue | BehaviorState::Attack => AimMode::Pursuit,
        }
    }
}
