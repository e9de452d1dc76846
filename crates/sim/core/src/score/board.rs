use std::collections::BTreeMap;

use super::{Score, ScoreBucket, ScoreResetFlags, ScoreVisibility};

/// Bucket-indexed score storage. Missing buckets read as zero.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoreTable {
    scores: BTreeMap<ScoreBucket, Score>,
}

impl ScoreTable {
    pub fn get(&self, bucket: ScoreBucket) -> i32 {
        self.scores.get(&bucket).map_or(0, Score::curr)
    }

    pub fn prev(&self, bucket: ScoreBucket) -> i32 {
        self.scores.get(&bucket).map_or(0, Score::prev)
    }

    pub fn score(&self, bucket: ScoreBucket) -> Option<&Score> {
        self.scores.get(&bucket)
    }

    pub fn score_mut(&mut self, bucket: ScoreBucket) -> &mut Score {
        self.scores.entry(bucket).or_default()
    }

    /// Write `value` and return the signed delta from the old value.
    pub fn set(&mut self, bucket: ScoreBucket, value: i32) -> i32 {
        let score = self.score_mut(bucket);
        score.set_curr(value);
        score.curr().wrapping_sub(score.prev())
    }

    pub fn freshen(&mut self) {
        self.scores.values_mut().for_each(Score::freshen);
    }

    pub fn reset(&mut self, flags: ScoreResetFlags) {
        for score in self.scores.values_mut() {
            score.reset(flags);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (ScoreBucket, &Score)> {
        self.scores.iter().map(|(bucket, score)| (*bucket, score))
    }
}

/// Result of a global score write, used to drive score feedback.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScoreChange {
    pub bucket: ScoreBucket,
    pub value: i32,
    pub delta: i32,
    pub visibility: ScoreVisibility,
}

impl ScoreChange {
    /// Loud color buckets play a cue and float the delta above the source.
    pub fn is_loud(&self) -> bool {
        self.delta != 0 && self.visibility == ScoreVisibility::Loud && self.bucket.is_color()
    }

    pub fn is_quiet(&self) -> bool {
        self.delta != 0 && !self.is_loud() && self.visibility != ScoreVisibility::Off
    }
}

/// Global scoreboard shared by every actor.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Scoreboard {
    table: ScoreTable,
}

impl Scoreboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, bucket: ScoreBucket) -> i32 {
        self.table.get(bucket)
    }

    pub fn prev(&self, bucket: ScoreBucket) -> i32 {
        self.table.prev(bucket)
    }

    /// Write a bucket and mark it active.
    pub fn set_score(&mut self, bucket: ScoreBucket, value: i32) -> ScoreChange {
        let delta = self.table.set(bucket, value);
        let score = self.table.score_mut(bucket);
        score.active = true;
        tracing::trace!(target: "sim_core::score", %bucket, value, delta, "score set");
        ScoreChange {
            bucket,
            value,
            delta,
            visibility: score.visibility,
        }
    }

    pub fn set_visibility(&mut self, bucket: ScoreBucket, visibility: ScoreVisibility) {
        self.table.score_mut(bucket).visibility = visibility;
    }

    pub fn set_persist(&mut self, bucket: ScoreBucket, persist: bool) {
        self.table.score_mut(bucket).persist = persist;
    }

    pub fn is_active(&self, bucket: ScoreBucket) -> bool {
        self.table.score(bucket).is_some_and(|score| score.active)
    }

    /// Collapse every bucket's change history at a frame boundary.
    pub fn freshen(&mut self) {
        self.table.freshen();
    }

    pub fn reset(&mut self, flags: ScoreResetFlags) {
        self.table.reset(flags);
    }

    pub fn table(&self) -> &ScoreTable {
        &self.table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Color;

    #[test]
    fn missing_bucket_reads_zero() {
        let board = Scoreboard::new();
        assert_eq!(board.get(ScoreBucket::Color(Color::Blue)), 0);
        assert!(!board.is_active(ScoreBucket::Color(Color::Blue)));
    }

    #[test]
    fn set_score_reports_delta_and_activates() {
        let mut board = Scoreboard::new();
        let red = ScoreBucket::Color(Color::Red);
        board.set_score(red, 3);
        let change = board.set_score(red, 1);
        assert_eq!(change.delta, -2);
        assert!(change.is_loud());
        assert!(board.is_active(red));
    }

    #[test]
    fn lettered_and_quiet_buckets_are_not_loud() {
        let mut board = Scoreboard::new();
        let a = ScoreBucket::Letter(0);
        assert!(board.set_score(a, 5).is_quiet());

        let green = ScoreBucket::Color(Color::Green);
        board.set_visibility(green, ScoreVisibility::Off);
        let change = board.set_score(green, 5);
        assert!(!change.is_loud());
        assert!(!change.is_quiet());
    }

    #[test]
    fn freshen_clears_history() {
        let mut board = Scoreboard::new();
        let red = ScoreBucket::Color(Color::Red);
        board.set_score(red, 7);
        board.freshen();
        assert_eq!(board.prev(red), 7);
    }
}
