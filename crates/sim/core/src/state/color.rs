use strum::{EnumCount, IntoEnumIterator};

use crate::rng::RandomSource;

/// Palette shared by actor tints, glows, thought balloon borders and the
/// color score buckets.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::EnumCount,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Color {
    White,
    Black,
    Grey,
    Red,
    Green,
    Blue,
    Orange,
    Yellow,
    Purple,
    Pink,
    Brown,
}

impl Color {
    /// Uniformly pick one palette entry.
    pub fn random(rng: &mut dyn RandomSource) -> Self {
        let index = rng.next_below(Self::COUNT as u32) as usize;
        Self::iter().nth(index).unwrap_or(Self::White)
    }
}

/// Color requested by a `Color` modifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ColorChoice {
    Fixed(Color),
    Random,
}

impl ColorChoice {
    pub fn pick(self, rng: &mut dyn RandomSource) -> Color {
        match self {
            Self::Fixed(color) => color,
            Self::Random => Color::random(rng),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::PcgRng;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("Red".parse::<Color>().ok(), Some(Color::Red));
        assert_eq!("purple".parse::<Color>().ok(), Some(Color::Purple));
        assert!("teal".parse::<Color>().is_err());
    }

    #[test]
    fn random_choice_covers_palette() {
        let mut rng = PcgRng::seeded(11);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..500 {
            seen.insert(ColorChoice::Random.pick(&mut rng));
        }
        assert_eq!(seen.len(), Color::COUNT);
    }
}
