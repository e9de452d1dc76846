//! Score buckets, global scoreboard and per-actor private scores.
//!
//! A bucket is either one of the palette colors or a lettered bucket `A..=Z`.
//! The same [`ScoreTable`] backs both the global [`Scoreboard`] and the
//! [`ScoreSet`] each actor carries for private scores.
mod board;

use std::fmt;

pub use board::{ScoreChange, ScoreTable, Scoreboard};

use crate::state::Color;

/// Private score storage carried by each actor.
pub type ScoreSet = ScoreTable;

/// Named score slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScoreBucket {
    Color(Color),
    /// Lettered bucket, `0` is `A` and `25` is `Z`.
    Letter(u8),
}

impl ScoreBucket {
    pub const LETTER_COUNT: u8 = 26;

    /// Lettered bucket from `'A'..='Z'` (either case).
    pub fn letter(letter: char) -> Option<Self> {
        let upper = letter.to_ascii_uppercase();
        if upper.is_ascii_uppercase() {
            Some(Self::Letter(upper as u8 - b'A'))
        } else {
            None
        }
    }

    #[inline]
    pub const fn is_color(self) -> bool {
        matches!(self, Self::Color(_))
    }

    pub const fn color(self) -> Option<Color> {
        match self {
            Self::Color(color) => Some(color),
            Self::Letter(_) => None,
        }
    }
}

impl Default for ScoreBucket {
    fn default() -> Self {
        Self::Color(Color::Red)
    }
}

impl fmt::Display for ScoreBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Color(color) => write!(f, "{color}"),
            Self::Letter(index) => write!(f, "{}", char::from(b'A' + index)),
        }
    }
}

/// How a bucket announces changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScoreVisibility {
    /// Sound cue plus floating effect.
    #[default]
    Loud,
    /// Quiet effect only.
    Quiet,
    Off,
}

bitflags::bitflags! {
    /// Which parts of a score a reset touches.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct ScoreResetFlags: u8 {
        const SCORE = 0b0001;
        const ACTIVE = 0b0010;
        const VISIBILITY = 0b0100;
        /// Leave persistent scores untouched.
        const SKIP_PERSISTENT = 0b1000;
    }
}

/// One bucket's value with its previous-value history.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Score {
    curr: i32,
    prev: i32,
    pub active: bool,
    pub visibility: ScoreVisibility,
    /// Survives level resets that pass `SKIP_PERSISTENT`.
    pub persist: bool,
}

impl Score {
    #[inline]
    pub fn curr(&self) -> i32 {
        self.curr
    }

    #[inline]
    pub fn prev(&self) -> i32 {
        self.prev
    }

    /// Replace the value. The old value becomes `prev`.
    pub fn set_curr(&mut self, value: i32) {
        self.prev = self.curr;
        self.curr = value;
    }

    /// Forget the change history so `prev == curr`.
    pub fn freshen(&mut self) {
        self.prev = self.curr;
    }

    pub fn reset(&mut self, flags: ScoreResetFlags) {
        if flags.contains(ScoreResetFlags::SKIP_PERSISTENT) && self.persist {
            return;
        }
        if flags.contains(ScoreResetFlags::SCORE) {
            self.curr = 0;
            self.prev = 0;
        }
        if flags.contains(ScoreResetFlags::ACTIVE) {
            self.active = false;
        }
        if flags.contains(ScoreResetFlags::VISIBILITY) {
            self.visibility = ScoreVisibility::Loud;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letter_buckets_parse_both_cases() {
        assert_eq!(ScoreBucket::letter('a'), Some(ScoreBucket::Letter(0)));
        assert_eq!(ScoreBucket::letter('Z'), Some(ScoreBucket::Letter(25)));
        assert_eq!(ScoreBucket::letter('7'), None);
        assert_eq!(ScoreBucket::Letter(2).to_string(), "C");
    }

    #[test]
    fn setting_curr_moves_old_value_to_prev() {
        let mut score = Score::default();
        score.set_curr(4);
        score.set_curr(9);
        assert_eq!(score.prev(), 4);
        assert_eq!(score.curr(), 9);
    }

    #[test]
    fn reset_skips_persistent_scores_on_request() {
        let mut score = Score {
            persist: true,
            ..Score::default()
        };
        score.set_curr(5);
        score.reset(ScoreResetFlags::SCORE | ScoreResetFlags::SKIP_PERSISTENT);
        assert_eq!(score.curr(), 5);

        score.reset(ScoreResetFlags::SCORE);
        assert_eq!(score.curr(), 0);
    }
}
