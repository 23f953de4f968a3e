//! The animation side of the controller's collaborators.

use wd_behavior::{AnimCue, AnimationEvent};
use wd_core::SimTime;

/// Accepts named cues and may call back with [`AnimationEvent`]s later.
pub trait AnimationSink {
    fn play(&mut self, cue: AnimCue, now: SimTime);

    /// Append callbacks due at or before `now`.
    ///
    /// Default: never calls back.
    fn poll(&mut self, _now: SimTime, _out: &mut Vec<AnimationEvent>) {}
}

/// Swallows every cue.  An agent driven with this sink stays in `Detect`
/// unless `detect_timeout` is set.
pub struct NoopAnimator;

impl AnimationSink for NoopAnimator {
    fn play(&mut self, _cue: AnimCue, _now: SimTime) {}
}

/// Fixed-length clips with the usual callbacks:
///
/// | Cue                   | Callbacks                                              |
/// |-----------------------|--------------------------------------------------------|
/// | `Detect`              | `MovementOff` now, `DetectionFinished` after `detect_secs` |
/// | `Attack`              | `MovementOff` now, `MovementOn` after `attack_secs`    |
/// | `Pursue`, `LostSight` | `MovementOn` now                                       |
#[derive(Debug, Clone)]
pub struct TimedAnimator {
    pub detect_secs: f64,
    pub attack_secs: f64,
    pending:         Vec<(SimTime, AnimationEvent)>,
    moving:          bool,
    last_cue:        Option<AnimCue>,
}

impl TimedAnimator {
    pub fn new(detect_secs: f64, attack_secs: f64) -> Self {
        Self { detect_secs, attack_secs, pending: Vec::new(), moving: false, last_cue: None }
    }

    /// State of the `Move` boolean.
    pub fn is_moving(&self) -> bool {
        self.moving
    }

    pub fn last_cue(&self) -> Option<AnimCue> {
        self.last_cue
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}

impl AnimationSink for TimedAnimator {
    fn play(&mut self, cue: AnimCue, now: SimTime) {
        self.last_cue = Some(cue);
        match cue {
            AnimCue::Move(on) => self.moving = on,
            AnimCue::Detect => {
                self.pending.push((now, AnimationEvent::MovementOff));
                self.pending.push((now.after(self.detect_secs), AnimationEvent::DetectionFinished));
            }
            AnimCue::Attack => {
                self.pending.push((now, AnimationEvent::MovementOff));
                self.pending.push((now.after(self.attack_secs), AnimationEvent::MovementOn));
            }
            AnimCue::Pursue | AnimCue::LostSight => {
                self.pending.push((now, AnimationEvent::MovementOn));
            }
            AnimCue::Search | AnimCue::Return | AnimCue::StartAttack => {}
        }
    }

    fn poll(&mut self, now: SimTime, out: &mut Vec<AnimationEvent>) {
        let mut i = 0;
        while i < self.pending.len() {
            if self.pending[i].0 <= now {
                out.push(self.pending.remove(i).1);
            } else {
                i += 1;
            }
        }
    }
}
