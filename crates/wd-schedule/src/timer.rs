//! Explicit timer values for delayed actions.
//!
//! All timers compare against a caller-supplied [`SimTime`]; none of them
//! reads a clock or schedules anything on its own.

use wd_core::SimTime;

// ── Stopwatch ─────────────────────────────────────────────────────────────────

/// Measures time since an optional start instant.
///
/// A stopped stopwatch is the "inactive" state: [`elapsed`](Self::elapsed)
/// returns `None` rather than a sentinel value.
#[derive(Copy, Clone, PartialEq, Debug, Default)]
pub struct Stopwatch {
    started: Option<SimTime>,
}

impl Stopwatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// (Re)start at `now`.
    #[inline]
    pub fn start(&mut self, now: SimTime) {
        self.started = Some(now);
    }

    #[inline]
    pub fn stop(&mut self) {
        self.started = None;
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.started.is_some()
    }

    #[inline]
    pub fn started_at(&self) -> Option<SimTime> {
        self.started
    }

    /// Seconds since [`start`](Self::start), or `None` while stopped.
    #[inline]
    pub fn elapsed(&self, now: SimTime) -> Option<f64> {
        self.started.map(|t| now.since(t))
    }

    /// `true` if running and at least `secs` have elapsed.
    #[inline]
    pub fn has_elapsed(&self, now: SimTime, secs: f64) -> bool {
        self.elapsed(now).is_some_and(|e| e >= secs)
    }
}

// ── Cooldown ──────────────────────────────────────────────────────────────────

/// A "not again until" gate.
///
/// [`trigger`](Self::trigger) closes the gate for a duration.  The owner
/// calls [`poll_ready`](Self::poll_ready) every tick; it returns `true` exactly
/// once, on the first poll at or after the expiry instant, so the owner can
/// restore whatever flag the cooldown guards.
#[derive(Copy, Clone, PartialEq, Debug, Default)]
pub struct Cooldown {
    ready_at: Option<SimTime>,
}

impl Cooldown {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trigger(&mut self, now: SimTime, secs: f64) {
        self.ready_at = Some(now.after(secs));
    }

    /// `true` while the gate is closed at `now`.
    #[inline]
    pub fn is_active(&self, now: SimTime) -> bool {
        self.ready_at.is_some_and(|t| now < t)
    }

    /// Fires once when the cooldown has run out, then resets.
    pub fn poll_ready(&mut self, now: SimTime) -> bool {
        match self.ready_at {
            Some(t) if now >= t => {
                self.ready_at = None;
                true
            }
            _ => false,
        }
    }
}

// ── GuardedDelay ──────────────────────────────────────────────────────────────

/// Result of polling a [`GuardedDelay`].
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum DelayPoll<G> {
    /// Nothing armed.
    Idle,
    /// Armed, not yet due.
    Pending,
    /// Due, and the guard still matches.  The delay is now disarmed.
    Fired(G),
    /// Due, but the guarded state changed while waiting.  The delay is now
    /// disarmed and its action must be skipped.
    Stale(G),
}

/// A one-shot continuation armed together with a snapshot of the state it
/// depends on.
///
/// When the delay comes due, [`poll`](Self::poll) compares the snapshot with
/// the owner's current state: a match yields [`DelayPoll::Fired`], a mismatch
/// [`DelayPoll::Stale`].  Either way the delay disarms itself; a stale
/// continuation is never retried.
#[derive(Clone, PartialEq, Debug)]
pub struct GuardedDelay<G> {
    pending: Option<(SimTime, G)>,
}

impl<G> Default for GuardedDelay<G> {
    fn default() -> Self {
        Self { pending: None }
    }
}

impl<G: PartialEq> GuardedDelay<G> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm (or re-arm) to come due `secs` after `now`.
    pub fn arm(&mut self, now: SimTime, secs: f64, guard: G) {
        self.pending = Some((now.after(secs), guard));
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    #[inline]
    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }

    #[inline]
    pub fn fires_at(&self) -> Option<SimTime> {
        self.pending.as_ref().map(|(t, _)| *t)
    }

    /// The guard the pending delay was armed with.
    #[inline]
    pub fn guard(&self) -> Option<&G> {
        self.pending.as_ref().map(|(_, g)| g)
    }

    /// `true` if armed with a guard equal to `current`, i.e. the delay would
    /// fire rather than go stale.
    #[inline]
    pub fn is_live(&self, current: &G) -> bool {
        self.guard().is_some_and(|g| g == current)
    }

    pub fn poll(&mut self, now: SimTime, current: &G) -> DelayPoll<G> {
        match self.fires_at() {
            None                => return DelayPoll::Idle,
            Some(t) if now < t  => return DelayPoll::Pending,
            Some(_)             => {}
        }
        match self.pending.take() {
            Some((_, guard)) if guard == *current => DelayPoll::Fired(guard),
            Some((_, guard))                      => DelayPoll::Stale(guard),
            None                                  => DelayPoll::Idle,
        }
    }
}
