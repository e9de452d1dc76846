use super::{Modifier, SettingName};
use crate::rng::RandomSource;
use crate::score::{ScoreBucket, Scoreboard};
use crate::state::ActorState;

/// Write target named by a chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScoreTarget {
    Bucket { bucket: ScoreBucket, private: bool },
    Setting(SettingName),
}

/// Folded value of a modifier chain.
///
/// The target is set at most once; later attempts are ignored.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CalculatedScore {
    pub value: i32,
    pub op_count: u32,
    target: Option<ScoreTarget>,
}

impl CalculatedScore {
    pub fn target(&self) -> Option<ScoreTarget> {
        self.target
    }

    pub fn set_target(&mut self, target: ScoreTarget) -> bool {
        if self.target.is_some() {
            return false;
        }
        self.target = Some(target);
        true
    }

    pub fn target_bucket(&self) -> Option<ScoreBucket> {
        match self.target {
            Some(ScoreTarget::Bucket { bucket, .. }) => Some(bucket),
            _ => None,
        }
    }

    pub fn target_setting(&self) -> Option<SettingName> {
        match self.target {
            Some(ScoreTarget::Setting(name)) => Some(name),
            _ => None,
        }
    }

    pub fn is_private(&self) -> bool {
        matches!(self.target, Some(ScoreTarget::Bucket { private: true, .. }))
    }
}

/// Caller-specific knobs for [`resolve`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct ResolveOptions {
    /// Consume the first bucket or setting modifier as the write target.
    pub want_target: bool,
    /// Pre-special value when nothing contributes before the special operator.
    pub default_base: i32,
    /// Caller is an increment or decrement score verb. A bare bucket target
    /// then counts as one point.
    pub counting: bool,
}

impl ResolveOptions {
    /// Plain amount, e.g. damage or a device operand.
    pub const fn amount(default_base: i32) -> Self {
        Self {
            want_target: false,
            default_base,
            counting: false,
        }
    }

    pub const fn targeted(default_base: i32, counting: bool) -> Self {
        Self {
            want_target: true,
            default_base,
            counting,
        }
    }
}

/// Read side of the resolver. Private scores and settings come from the
/// actor running the script, not the verb's target.
#[derive(Clone, Copy)]
pub struct ResolveContext<'a> {
    pub actor: &'a ActorState,
    pub scoreboard: &'a Scoreboard,
}

impl ResolveContext<'_> {
    fn bucket_value(&self, bucket: ScoreBucket, private: bool) -> i32 {
        if private {
            self.actor.private_scores.get(bucket)
        } else {
            self.scoreboard.get(bucket)
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Special {
    Random,
    Percent,
}

/// Fold a modifier chain into a single value.
///
/// Contributions before the special operator (`Random` or `Percent`) sum into
/// the base, contributions after it into the operand. A chain carries at most
/// one special operator.
pub fn resolve(
    chain: &[Modifier],
    options: ResolveOptions,
    ctx: &ResolveContext<'_>,
    rng: &mut dyn RandomSource,
) -> CalculatedScore {
    let mut score = CalculatedScore::default();
    let mut want_target = options.want_target;
    let mut special: Option<Special> = None;
    let mut pre_special = 0i32;
    let mut post_special = 0i32;
    let mut pre_special_set = false;

    for modifier in chain {
        if want_target {
            match modifier {
                Modifier::ScoreBucket { bucket, private } => {
                    score.set_target(ScoreTarget::Bucket {
                        bucket: *bucket,
                        private: *private,
                    });
                    want_target = false;
                    continue;
                }
                Modifier::Setting { name } => {
                    score.set_target(ScoreTarget::Setting(*name));
                    want_target = false;
                    continue;
                }
                _ => {}
            }
        }

        let points = match modifier {
            Modifier::Score { points } => *points,
            Modifier::ScoreBucket { bucket, private } => ctx.bucket_value(*bucket, *private),
            Modifier::Setting { name } => ctx.actor.setting(*name),
            Modifier::Health => ctx.actor.stats.hit_points,
            Modifier::MaxHealth => ctx.actor.stats.max_hit_points,
            Modifier::Random | Modifier::Percent => {
                debug_assert!(special.is_none(), "modifier chain has two special operators");
                if special.is_none() {
                    special = Some(if matches!(modifier, Modifier::Random) {
                        Special::Random
                    } else {
                        Special::Percent
                    });
                }
                continue;
            }
            _ => continue,
        };

        if special.is_none() {
            pre_special = pre_special.wrapping_add(points);
            pre_special_set = true;
        } else {
            post_special = post_special.wrapping_add(points);
        }
        score.op_count += 1;
    }

    if !pre_special_set {
        pre_special = options.default_base;
    }

    let mut total = pre_special;
    match special {
        Some(Special::Random) => {
            let roll = rng.next_below(post_special.unsigned_abs()) as i32;
            total = if post_special >= 0 {
                total.wrapping_add(roll)
            } else {
                total.wrapping_sub(roll)
            };
            score.op_count += 1;
        }
        Some(Special::Percent) => {
            let scaled = f64::from(pre_special) * f64::from(post_special) / 100.0;
            total = scaled.round_ties_even() as i32;
            score.op_count += 1;
        }
        None => {}
    }
    score.value = total;

    if options.counting && score.target_bucket().is_some() && score.op_count == 0 {
        score.value = 1;
    }

    score
}
