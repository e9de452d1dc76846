use super::ClockKind;
use crate::config::SimConfig;

/// Wall and game clocks plus the frame counter.
///
/// Game time advances at `ratio` times wall time. Pausing stores the ratio
/// and drops it to zero; resuming restores it.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    wall_total: f64,
    game_total: f64,
    wall_frame: f64,
    game_frame: f64,
    ratio: f64,
    saved_ratio: f64,
    paused: bool,
    frame: u64,
    unpaused_frames: u64,
    max_frame_seconds: f64,
}

impl SimClock {
    pub fn new(max_frame_seconds: f64) -> Self {
        Self {
            wall_total: 0.0,
            game_total: 0.0,
            wall_frame: 0.0,
            game_frame: 0.0,
            ratio: 1.0,
            saved_ratio: 1.0,
            paused: false,
            frame: 0,
            unpaused_frames: 0,
            max_frame_seconds,
        }
    }

    /// Clock that never clamps a frame delta.
    pub fn unclamped() -> Self {
        Self::new(f64::INFINITY)
    }

    /// Advance both clocks by one frame of `wall_delta` seconds.
    pub fn update(&mut self, wall_delta: f64) {
        let delta = if wall_delta.is_finite() {
            wall_delta.clamp(0.0, self.max_frame_seconds)
        } else {
            0.0
        };
        self.wall_frame = delta;
        self.game_frame = delta * self.ratio;
        self.wall_total += self.wall_frame;
        self.game_total += self.game_frame;
        self.frame += 1;
        if !self.paused {
            self.unpaused_frames += 1;
        }
        tracing::trace!(
            target: "sim_core::timer",
            frame = self.frame,
            game = self.game_total,
            wall = self.wall_total,
            "clock advanced"
        );
    }

    pub fn now(&self, kind: ClockKind) -> f64 {
        match kind {
            ClockKind::Game => self.game_total,
            ClockKind::Wall => self.wall_total,
        }
    }

    pub fn frame_seconds(&self, kind: ClockKind) -> f64 {
        match kind {
            ClockKind::Game => self.game_frame,
            ClockKind::Wall => self.wall_frame,
        }
    }

    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame
    }

    #[inline]
    pub fn unpaused_frames(&self) -> u64 {
        self.unpaused_frames
    }

    #[inline]
    pub fn ratio(&self) -> f64 {
        self.ratio
    }

    /// Set the game/wall ratio. A ratio of zero pauses the clock.
    pub fn set_ratio(&mut self, ratio: f64) {
        self.saved_ratio = self.ratio;
        self.ratio = ratio.max(0.0);
        self.paused = self.ratio == 0.0;
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        if paused == self.paused {
            return;
        }
        self.paused = paused;
        if paused {
            self.saved_ratio = self.ratio;
            self.ratio = 0.0;
        } else {
            self.ratio = self.saved_ratio;
        }
    }
}

impl Default for SimClock {
    fn default() -> Self {
        Self::new(SimConfig::MAX_FRAME_SECONDS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_delta_is_clamped() {
        let mut clock = SimClock::default();
        clock.update(5.0);
        assert_eq!(clock.now(ClockKind::Wall), SimConfig::MAX_FRAME_SECONDS);
        assert_eq!(clock.frame(), 1);
    }

    #[test]
    fn pause_stops_game_time_only() {
        let mut clock = SimClock::unclamped();
        clock.update(1.0);
        clock.set_paused(true);
        clock.update(1.0);
        assert_eq!(clock.now(ClockKind::Game), 1.0);
        assert_eq!(clock.now(ClockKind::Wall), 2.0);
        assert_eq!(clock.unpaused_frames(), 1);

        clock.set_paused(false);
        clock.update(1.0);
        assert_eq!(clock.now(ClockKind::Game), 2.0);
    }

    #[test]
    fn ratio_scales_game_time() {
        let mut clock = SimClock::unclamped();
        clock.set_ratio(0.5);
        clock.update(2.0);
        assert_eq!(clock.now(ClockKind::Game), 1.0);
        assert_eq!(clock.frame_seconds(ClockKind::Game), 1.0);
    }

    #[test]
    fn negative_delta_does_not_rewind() {
        let mut clock = SimClock::unclamped();
        clock.update(1.0);
        clock.update(-4.0);
        assert_eq!(clock.now(ClockKind::Wall), 1.0);
        assert_eq!(clock.frame(), 2);
    }
}
