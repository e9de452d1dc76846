//! Auxiliary device verbs.
//!
//! Every verb addresses the chain's player modifier, or all devices when the
//! chain names none. Operands are folded from the chain and then clamped or
//! defaulted per verb.

use super::{DispatchContext, Effector, VerbOutcome};
use crate::config::SimConfig;
use crate::modifier::{
    CalculatedScore, Modifier, ModifierChainExt, ResolveContext, ResolveOptions, resolve,
};

pub(super) fn say(ctx: &mut DispatchContext<'_>, effector: &Effector) -> VerbOutcome {
    let text = effector
        .params
        .say
        .as_ref()
        .map(|script| script.lines.join(" "))
        .unwrap_or_default();
    ctx.host.scroll_text(effector.modifiers.player(), &text);
    VerbOutcome::supported()
}

/// Light power is the sum of points, bucket scores, health and max health,
/// clamped to the device range.
pub(super) fn lights(ctx: &mut DispatchContext<'_>, effector: &Effector) -> VerbOutcome {
    let Some(executor) = ctx.world.actor(effector.actor) else {
        return VerbOutcome::refused();
    };
    let power: i32 = effector
        .modifiers
        .iter()
        .map(|modifier| match modifier {
            Modifier::Score { points } => *points,
            Modifier::ScoreBucket { bucket, private } => {
                if *private {
                    executor.private_scores.get(*bucket)
                } else {
                    ctx.scoreboard.get(*bucket)
                }
            }
            Modifier::Health => executor.stats.hit_points,
            Modifier::MaxHealth => executor.stats.max_hit_points,
            _ => 0,
        })
        .fold(0i32, i32::saturating_add);
    let power = power.clamp(0, SimConfig::MAX_DEVICE_POWER) as u8;

    ctx.host
        .show_lights(effector.modifiers.player(), effector.params.lights, power);
    VerbOutcome::supported()
}

pub(super) fn show(ctx: &mut DispatchContext<'_>, effector: &Effector) -> VerbOutcome {
    let frames = effector.modifiers.led_frames();
    ctx.host.show_frames(effector.modifiers.player(), &frames);
    VerbOutcome::supported()
}

pub(super) fn set_pin(ctx: &mut DispatchContext<'_>, effector: &Effector) -> VerbOutcome {
    ctx.host.set_pin(
        effector.modifiers.player(),
        effector.params.pin,
        effector.modifiers.pin_level(),
    );
    VerbOutcome::supported()
}

pub(super) fn set_pwm_frequency(ctx: &mut DispatchContext<'_>, effector: &Effector) -> VerbOutcome {
    let Some(score) = operand(ctx, effector) else {
        return VerbOutcome::refused();
    };
    let value = if score.op_count == 0 {
        SimConfig::DEFAULT_PWM_FREQUENCY
    } else {
        score.value
    };
    ctx.host.set_pwm_frequency(
        effector.modifiers.player(),
        effector.params.pin,
        value,
        effector.modifiers.frequency_multiplier(),
    );
    VerbOutcome::supported()
}

pub(super) fn set_pwm_duty_cycle(ctx: &mut DispatchContext<'_>, effector: &Effector) -> VerbOutcome {
    let Some(score) = operand(ctx, effector) else {
        return VerbOutcome::refused();
    };
    let percent = if score.op_count == 0 {
        SimConfig::DEFAULT_DUTY_CYCLE
    } else {
        score.value
    }
    .clamp(0, 100);
    ctx.host.set_pwm_duty_cycle(
        effector.modifiers.player(),
        effector.params.pin,
        percent as f32 / 100.0,
    );
    VerbOutcome::supported()
}

fn operand(ctx: &mut DispatchContext<'_>, effector: &Effector) -> Option<CalculatedScore> {
    let executor = ctx.world.actor(effector.actor)?;
    let read = ResolveContext {
        actor: executor,
        scoreboard: &*ctx.scoreboard,
    };
    Some(resolve(
        &effector.modifiers,
        ResolveOptions::amount(0),
        &read,
        ctx.rng,
    ))
}
