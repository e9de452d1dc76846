//! Modifier chains attached to script commands.
//!
//! A chain is an ordered `[Modifier]`. The score resolver in [`resolve`] folds
//! the numeric subset into a [`CalculatedScore`]; verbs pull their remaining
//! parameters (color, sound cue, device player, ...) through
//! [`ModifierChainExt`].
mod resolve;

pub use resolve::{CalculatedScore, ResolveContext, ResolveOptions, ScoreTarget, resolve};

use crate::score::ScoreBucket;
use crate::state::ColorChoice;

/// Named numeric actor settings writable by score verbs.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::EnumIter,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SettingName {
    MaxHealth,
    BlipDamage,
    MissileDamage,
}

/// Device addressee of the auxiliary device verbs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PlayerId {
    #[default]
    All,
    One,
    Two,
    Three,
    Four,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PinLevel {
    On,
    #[default]
    Off,
}

/// One 5x5 LED frame, row-major, one bit per LED.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LedFrame {
    pub bits: u32,
    /// Seconds the frame stays up.
    pub duration: f32,
    pub brightness: u8,
}

/// One element of a command's modifier chain.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Modifier {
    /// Literal point value.
    Score { points: i32 },
    /// Reads, or as a target writes, a score bucket.
    ScoreBucket { bucket: ScoreBucket, private: bool },
    /// Reads, or as a target writes, a named actor setting.
    Setting { name: SettingName },
    Health,
    MaxHealth,
    Random,
    Percent,
    Color(ColorChoice),
    Sound { cue: String },
    Player(PlayerId),
    FrequencyUnits { multiplier: i32 },
    Pin(PinLevel),
    LedPattern(LedFrame),
}

/// Parameter lookups over a modifier chain.
pub trait ModifierChainExt {
    /// Last color modifier in the chain.
    fn color_choice(&self) -> Option<ColorChoice>;
    fn sound_cue(&self) -> Option<&str>;
    fn player(&self) -> PlayerId;
    fn frequency_multiplier(&self) -> i32;
    fn pin_level(&self) -> PinLevel;
    fn led_frames(&self) -> Vec<LedFrame>;
    /// Bucket named by the chain, preferring a color modifier.
    fn bucket_target(&self) -> Option<ScoreBucket>;
}

impl ModifierChainExt for [Modifier] {
    fn color_choice(&self) -> Option<ColorChoice> {
        self.iter().rev().find_map(|modifier| match modifier {
            Modifier::Color(choice) => Some(*choice),
            _ => None,
        })
    }

    fn sound_cue(&self) -> Option<&str> {
        self.iter().rev().find_map(|modifier| match modifier {
            Modifier::Sound { cue } => Some(cue.as_str()),
            _ => None,
        })
    }

    fn player(&self) -> PlayerId {
        self.iter()
            .find_map(|modifier| match modifier {
                Modifier::Player(player) => Some(*player),
                _ => None,
            })
            .unwrap_or_default()
    }

    fn frequency_multiplier(&self) -> i32 {
        self.iter()
            .find_map(|modifier| match modifier {
                Modifier::FrequencyUnits { multiplier } => Some(*multiplier),
                _ => None,
            })
            .unwrap_or(1)
    }

    fn pin_level(&self) -> PinLevel {
        self.iter()
            .rev()
            .find_map(|modifier| match modifier {
                Modifier::Pin(level) => Some(*level),
                _ => None,
            })
            .unwrap_or_default()
    }

    fn led_frames(&self) -> Vec<LedFrame> {
        self.iter()
            .filter_map(|modifier| match modifier {
                Modifier::LedPattern(frame) => Some(*frame),
                _ => None,
            })
            .collect()
    }

    fn bucket_target(&self) -> Option<ScoreBucket> {
        if let Some(ColorChoice::Fixed(color)) = self.color_choice() {
            return Some(ScoreBucket::Color(color));
        }
        self.iter().find_map(|modifier| match modifier {
            Modifier::ScoreBucket { bucket, .. } => Some(*bucket),
            _ => None,
        })
    }
}
