use crate::score::ScoreBucket;
use crate::state::Color;

/// Engine constants and tunable parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Bucket a score verb writes to when its chain names no target.
    pub default_bucket: ScoreBucket,
    /// Gates the play/stop sound verbs. Built-in effect cues ignore it.
    pub audio_enabled: bool,
    /// Stun spawns a distortion zap instead of a small explosion.
    pub distortion_effects: bool,
    pub kill_magnitude: f32,
    pub vaporize_magnitude: f32,
    pub stun_magnitude: f32,
}

impl SimConfig {
    // ===== compile-time constants =====
    /// Timer durations at or below zero are replaced by this value.
    pub const MIN_TIMER_DURATION: f64 = 1.0;
    /// Upper bound of a single frame's wall delta, in seconds.
    pub const MAX_FRAME_SECONDS: f64 = 0.2;
    /// Device light power is clamped to `0..=MAX_DEVICE_POWER`.
    pub const MAX_DEVICE_POWER: i32 = 100;
    /// Duty cycle percentage when the chain carries no operand.
    pub const DEFAULT_DUTY_CYCLE: i32 = 50;
    /// PWM frequency when the chain carries no operand.
    pub const DEFAULT_PWM_FREQUENCY: i32 = 1;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_KILL_MAGNITUDE: f32 = 0.6;
    pub const DEFAULT_VAPORIZE_MAGNITUDE: f32 = 1.2;
    pub const DEFAULT_STUN_MAGNITUDE: f32 = 2.0;

    pub fn new() -> Self {
        Self {
            default_bucket: ScoreBucket::Color(Color::Red),
            audio_enabled: true,
            distortion_effects: false,
            kill_magnitude: Self::DEFAULT_KILL_MAGNITUDE,
            vaporize_magnitude: Self::DEFAULT_VAPORIZE_MAGNITUDE,
            stun_magnitude: Self::DEFAULT_STUN_MAGNITUDE,
        }
    }

    pub fn with_default_bucket(mut self, bucket: ScoreBucket) -> Self {
        self.default_bucket = bucket;
        self
    }

    pub fn with_audio(mut self, enabled: bool) -> Self {
        self.audio_enabled = enabled;
        self
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self::new()
    }
}
