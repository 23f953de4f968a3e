//! Simulation time model.
//!
//! # Design
//!
//! Behavior runs on a fixed physics step.  The canonical step counter is the
//! integer `Tick`; the continuous time seen by timers is `SimTime`, derived
//! from the tick count:
//!
//!   now = tick * step_secs
//!
//! Deriving time from an integer counter (instead of accumulating `dt`) keeps
//! timer comparisons reproducible across runs.

use std::fmt;

use crate::{CoreError, CoreResult};

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute physics-step counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }

    /// Ticks elapsed from `earlier` to `self` (saturates at zero).
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimTime ──────────────────────────────────────────────────────────────────

/// Seconds of simulated time since the start of the run.
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimTime(pub f64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0.0);

    #[inline]
    pub fn secs(self) -> f64 {
        self.0
    }

    /// The instant `secs` seconds after `self`.
    #[inline]
    pub fn after(self, secs: f64) -> SimTime {
        SimTime(self.0 + secs)
    }

    /// Seconds elapsed from `earlier` to `self`.  Negative if `earlier` is in
    /// the future.
    #[inline]
    pub fn since(self, earlier: SimTime) -> f64 {
        self.0 - earlier.0
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}s", self.0)
    }
}

// ── FixedStep ────────────────────────────────────────────────────────────────

/// Fixed-step physics clock.
///
/// `FixedStep` is cheap to copy and holds no heap data.
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FixedStep {
    /// Seconds advanced per physics tick (e.g. 0.02 for 50 Hz).
    pub step_secs: f64,
    /// The current tick, advanced by [`advance`](Self::advance).
    pub current_tick: Tick,
}

impl FixedStep {
    /// Create a clock at tick 0.  `step_secs` must be finite and positive.
    pub fn new(step_secs: f64) -> CoreResult<Self> {
        if !step_secs.is_finite() || step_secs <= 0.0 {
            return Err(CoreError::Config(format!(
                "physics step must be a positive number of seconds, got {step_secs}"
            )));
        }
        Ok(Self { step_secs, current_tick: Tick::ZERO })
    }

    /// Advance the clock by one tick.
    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = Tick(self.current_tick.0 + 1);
    }

    /// Simulated time at the current tick.
    #[inline]
    pub fn now(&self) -> SimTime {
        self.time_at(self.current_tick)
    }

    /// Simulated time at an arbitrary tick.
    #[inline]
    pub fn time_at(&self, tick: Tick) -> SimTime {
        SimTime(tick.0 as f64 * self.step_secs)
    }

    /// How many ticks span `secs` seconds? (rounds up)
    #[inline]
    pub fn ticks_for_secs(&self, secs: f64) -> u64 {
        if secs <= 0.0 {
            return 0;
        }
        (secs / self.step_secs).ceil() as u64
    }
}

impl fmt::Display for FixedStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.current_tick, self.now())
    }
}
