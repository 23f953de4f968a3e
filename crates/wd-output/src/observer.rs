//! `TraceObserver<W>`: bridges `SimObserver` to a `TraceWriter`.

use wd_behavior::BehaviorEvent;
use wd_core::Tick;
use wd_sight::SightRay;
use wd_sim::{SimObserver, TickSnapshot};

use crate::row::{EventRow, RayRow, StateRow};
use crate::writer::TraceWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes agent state, behavior events and (optionally)
/// sensor rays to any [`TraceWriter`].
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run_for()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct TraceObserver<W: TraceWriter> {
    writer:     W,
    rays:       bool,
    ray_rows:   Vec<RayRow>,
    last_error: Option<OutputError>,
}

impl<W: TraceWriter> TraceObserver<W> {
    /// Record state and events; ray recording is on by default.
    pub fn new(writer: W) -> Self {
        Self { writer, rays: true, ray_rows: Vec::new(), last_error: None }
    }

    /// Turn sensor-ray recording on or off.  Rays dominate the trace size.
    pub fn with_rays(mut self, enabled: bool) -> Self {
        self.rays = enabled;
        self
    }

    /// Take the stored write error (if any).
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: TraceWriter> SimObserver for TraceObserver<W> {
    fn on_tick_end(&mut self, s: &TickSnapshot) {
        let row = StateRow {
            tick:             s.tick.0,
            time_secs:        s.time.secs(),
            state:            s.state.as_str(),
            x:                s.position.x,
            y:                s.position.y,
            vx:               s.velocity.x,
            vy:               s.velocity.y,
            facing:           s.facing.as_str(),
            grounded:         s.grounded,
            sees_target:      s.sees_target,
            movement_enabled: s.movement_enabled,
            patrol_index:     s.patrol_index as u32,
        };
        let result = self.writer.write_state(&row);
        self.store_err(result);
    }

    fn on_event(&mut self, tick: Tick, event: &BehaviorEvent) {
        let result = self.writer.write_event(&EventRow::from_event(tick.0, event));
        self.store_err(result);
    }

    fn on_sight_rays(&mut self, tick: Tick, rays: &[SightRay]) {
        if !self.rays || rays.is_empty() {
            return;
        }
        self.ray_rows.clear();
        self.ray_rows.extend(rays.iter().enumerate().map(|(i, r)| RayRow {
            tick:    tick.0,
            index:   i as u32,
            from_x:  r.from.x,
            from_y:  r.from.y,
            to_x:    r.to.x,
            to_y:    r.to.y,
            outcome: r.outcome.as_str(),
        }));
        let result = self.writer.write_rays(&self.ray_rows);
        self.store_err(result);
    }

    fn on_sim_end(&mut self, _final_tick: Tick) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
