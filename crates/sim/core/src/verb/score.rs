//! Score increment, decrement and set.
//!
//! The chain's first bucket or setting modifier names the write target; the
//! rest of the chain is the amount. Private buckets live on the executor,
//! global buckets on the scoreboard.

use super::{DispatchContext, Effector, VerbOutcome};
use crate::config::SimConfig;
use crate::host::{BuiltinCue, Host, ScoreEffect};
use crate::modifier::{ResolveContext, ResolveOptions, ScoreTarget, resolve};
use crate::score::ScoreChange;
use crate::state::{ActorState, Vec3};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScoreStep {
    Increment,
    Decrement,
    Set,
}

impl ScoreStep {
    pub const fn scalar(self) -> i32 {
        match self {
            Self::Increment => 1,
            Self::Decrement => -1,
            Self::Set => 0,
        }
    }

    const fn is_counting(self) -> bool {
        !matches!(self, Self::Set)
    }
}

pub(super) fn apply(
    ctx: &mut DispatchContext<'_>,
    config: &SimConfig,
    effector: &Effector,
    step: ScoreStep,
) -> VerbOutcome {
    let Some(executor) = ctx.world.actor(effector.actor) else {
        return VerbOutcome::refused();
    };
    // A bare set writes 1, a bare increment adds 1.
    let default_base = if step == ScoreStep::Set { 1 } else { 0 };
    let score = {
        let read = ResolveContext {
            actor: executor,
            scoreboard: &*ctx.scoreboard,
        };
        resolve(
            &effector.modifiers,
            ResolveOptions::targeted(default_base, step.is_counting()),
            &read,
            ctx.rng,
        )
    };
    let target = score.target().unwrap_or(ScoreTarget::Bucket {
        bucket: config.default_bucket,
        private: false,
    });
    let amount = score.value.wrapping_mul(step.scalar());

    // Feedback floats over the sensed actor, else the executor.
    let origin_id = effector.sensed.unwrap_or(effector.actor);
    let origin = ctx
        .world
        .actor(origin_id)
        .or_else(|| ctx.world.actor(effector.actor))
        .map(ActorState::position)
        .unwrap_or(Vec3::ZERO);

    match target {
        ScoreTarget::Bucket {
            bucket,
            private: true,
        } => {
            if let Some(actor) = ctx.world.actor_mut(effector.actor) {
                let scores = &mut actor.private_scores;
                let value = match step {
                    ScoreStep::Set => score.value,
                    _ => scores.get(bucket).wrapping_add(amount),
                };
                scores.set(bucket, value);
            }
        }
        ScoreTarget::Bucket {
            bucket,
            private: false,
        } => {
            let value = match step {
                ScoreStep::Set => score.value,
                _ => ctx.scoreboard.get(bucket).wrapping_add(amount),
            };
            let change = ctx.scoreboard.set_score(bucket, value);
            announce(ctx.host, change, origin);
        }
        ScoreTarget::Setting(name) => {
            if let Some(actor) = ctx.world.actor_mut(effector.actor) {
                let value = match step {
                    ScoreStep::Set => score.value,
                    _ => actor.setting(name).wrapping_add(amount),
                };
                actor.set_setting(name, value);
            }
        }
    }
    VerbOutcome::supported()
}

/// Loud color buckets get a cue and a floating delta; others a quiet effect.
fn announce(host: &mut dyn Host, change: ScoreChange, origin: Vec3) {
    if change.is_loud() {
        let cue = if change.delta > 0 {
            BuiltinCue::ScoreUp
        } else {
            BuiltinCue::ScoreDown
        };
        host.play_builtin(cue, None);
        host.score_effect(ScoreEffect {
            bucket: change.bucket,
            delta: change.delta,
            origin: Some(origin),
        });
    } else if change.is_quiet() {
        host.score_effect(ScoreEffect {
            bucket: change.bucket,
            delta: change.delta,
            origin: None,
        });
    }
}
