//! Timers, the clock they read, and the scheduler that fires them.
mod clock;
mod scheduler;

pub use clock::SimClock;
pub use scheduler::{TimerCallback, TimerScheduler};

use crate::config::SimConfig;

/// Which clock a timer measures against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ClockKind {
    /// Scaled simulation time, stops while the clock is paused.
    #[default]
    Game,
    /// Unscaled real time.
    Wall,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TimerState {
    Running,
    Paused,
    Elapsed,
}

/// Handle to a timer stored in a [`TimerScheduler`].
///
/// Slots are recycled after `remove`; the generation tells a recycled slot
/// apart from the timer an old handle pointed at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimerId {
    index: u32,
    generation: u32,
}

impl TimerId {
    #[inline]
    pub const fn index(self) -> u32 {
        self.index
    }

    #[inline]
    pub const fn generation(self) -> u32 {
        self.generation
    }
}

/// Countdown over one clock.
///
/// A new timer sits in `Elapsed` until started.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Timer {
    clock: ClockKind,
    duration: f64,
    start: f64,
    state: TimerState,
    /// Elapsed time captured when paused.
    paused_elapsed: f64,
}

impl Timer {
    pub fn new(clock: ClockKind, duration: f64) -> Self {
        Self {
            clock,
            duration: sanitize_duration(duration),
            start: 0.0,
            state: TimerState::Elapsed,
            paused_elapsed: 0.0,
        }
    }

    #[inline]
    pub fn clock(&self) -> ClockKind {
        self.clock
    }

    #[inline]
    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn set_duration(&mut self, duration: f64) {
        self.duration = sanitize_duration(duration);
    }

    #[inline]
    pub fn start_time(&self) -> f64 {
        self.start
    }

    #[inline]
    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn start(&mut self, now: f64) {
        self.start = now;
        self.state = TimerState::Running;
    }

    /// Restart the countdown.
    ///
    /// With `sync`, the start moves forward by whole durations so the phase
    /// of a periodic timer is kept even when `advance` ran late.
    pub fn restart(&mut self, sync: bool, now: f64) {
        if sync {
            let periods = ((now - self.start) / self.duration).floor();
            if periods > 0.0 {
                self.start += periods * self.duration;
            }
        } else {
            self.start = now;
        }
        self.state = TimerState::Running;
    }

    /// Elapse without firing.
    pub fn clear(&mut self) {
        self.state = TimerState::Elapsed;
    }

    pub fn pause(&mut self, now: f64) {
        if self.state == TimerState::Running {
            self.paused_elapsed = now - self.start;
            self.state = TimerState::Paused;
        }
    }

    /// Resume with the remaining time preserved.
    pub fn resume(&mut self, now: f64) {
        if self.state == TimerState::Paused {
            self.start = now - self.paused_elapsed;
            self.state = TimerState::Running;
        }
    }

    pub fn elapsed(&self, now: f64) -> f64 {
        match self.state {
            TimerState::Paused => self.paused_elapsed,
            _ => now - self.start,
        }
    }

    pub fn remaining(&self, now: f64) -> f64 {
        (self.duration - self.elapsed(now)).max(0.0)
    }

    /// Running and at or past its duration.
    pub fn is_due(&self, now: f64) -> bool {
        self.state == TimerState::Running && self.elapsed(now) >= self.duration
    }
}

fn sanitize_duration(duration: f64) -> f64 {
    if duration > 0.0 {
        duration
    } else {
        SimConfig::MIN_TIMER_DURATION
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_positive_duration_is_coerced() {
        assert_eq!(Timer::new(ClockKind::Game, 0.0).duration(), 1.0);
        assert_eq!(Timer::new(ClockKind::Game, -3.0).duration(), 1.0);
        assert_eq!(Timer::new(ClockKind::Game, f64::NAN).duration(), 1.0);
        assert_eq!(Timer::new(ClockKind::Game, 2.5).duration(), 2.5);
    }

    #[test]
    fn synced_restart_keeps_phase() {
        let mut timer = Timer::new(ClockKind::Game, 2.0);
        timer.start(0.0);
        // Three whole periods late plus 0.5.
        timer.restart(true, 6.5);
        assert_eq!(timer.start_time(), 6.0);
        assert_eq!(timer.state(), TimerState::Running);
    }

    #[test]
    fn plain_restart_uses_now() {
        let mut timer = Timer::new(ClockKind::Game, 2.0);
        timer.start(0.0);
        timer.restart(false, 6.5);
        assert_eq!(timer.start_time(), 6.5);
    }

    #[test]
    fn synced_restart_before_first_period_keeps_start() {
        let mut timer = Timer::new(ClockKind::Game, 2.0);
        timer.start(1.0);
        timer.restart(true, 2.5);
        assert_eq!(timer.start_time(), 1.0);
    }

    #[test]
    fn pause_preserves_remaining_time() {
        let mut timer = Timer::new(ClockKind::Wall, 4.0);
        timer.start(0.0);
        timer.pause(1.0);
        assert!(!timer.is_due(100.0));
        timer.resume(10.0);
        assert_eq!(timer.remaining(10.0), 3.0);
        assert!(timer.is_due(13.0));
    }

    #[test]
    fn cleared_timer_is_not_due() {
        let mut timer = Timer::new(ClockKind::Game, 1.0);
        timer.start(0.0);
        timer.clear();
        assert!(!timer.is_due(5.0));
    }
}
