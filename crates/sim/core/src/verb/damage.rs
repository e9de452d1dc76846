//! Damage and heal.
//!
//! The amount comes from the command's modifier chain; how it lands is up to
//! the target chassis' [`DamageHook`]. Lethal damage vaporizes the target.

use super::{Cause, DispatchContext, Effector, VerbOutcome};
use crate::config::SimConfig;
use crate::host::BuiltinCue;
use crate::modifier::{ResolveContext, ResolveOptions, resolve};
use crate::state::{ActorState, DamageProfile, EntityId};

/// What a damage hook did with an amount.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct DamageReport {
    pub applied: bool,
    pub died: bool,
}

/// Per-chassis reaction to damage. Negative amounts hurt, positive heal.
pub trait DamageHook: Send + Sync {
    fn apply(&self, target: &mut ActorState, amount: i32) -> DamageReport;
}

/// Hit points clamped to `0..=max`. Dropping to zero from above is death.
#[derive(Clone, Copy, Debug, Default)]
pub struct StandardDamage;

impl DamageHook for StandardDamage {
    fn apply(&self, target: &mut ActorState, amount: i32) -> DamageReport {
        let stats = &mut target.stats;
        let before = stats.hit_points;
        stats.hit_points = before
            .saturating_add(amount)
            .clamp(0, stats.max_hit_points.max(0));
        DamageReport {
            applied: true,
            died: before > 0 && stats.hit_points == 0,
        }
    }
}

/// Static props ignore damage entirely.
#[derive(Clone, Copy, Debug, Default)]
pub struct ImmuneDamage;

impl DamageHook for ImmuneDamage {
    fn apply(&self, _target: &mut ActorState, _amount: i32) -> DamageReport {
        DamageReport::default()
    }
}

impl DamageProfile {
    pub fn hook(self) -> &'static dyn DamageHook {
        match self {
            Self::Standard => &StandardDamage,
            Self::Immune => &ImmuneDamage,
        }
    }
}

/// `sign` is -1 for damage and +1 for heal.
pub(super) fn apply(
    ctx: &mut DispatchContext<'_>,
    config: &SimConfig,
    target: EntityId,
    effector: &Effector,
    quiet: bool,
    sign: i32,
) -> VerbOutcome {
    let Some(executor) = ctx.world.actor(effector.actor) else {
        return VerbOutcome::refused();
    };
    let amount = {
        let read = ResolveContext {
            actor: executor,
            scoreboard: &*ctx.scoreboard,
        };
        resolve(&effector.modifiers, ResolveOptions::amount(0), &read, ctx.rng).value
    };
    let delta = amount.saturating_mul(sign);

    let Some(actor) = ctx.world.actor_mut(target) else {
        return VerbOutcome::refused();
    };
    let report = actor.chassis.damage.hook().apply(actor, delta);
    if !report.applied {
        return VerbOutcome::refused();
    }
    let muted = quiet || actor.mute;
    let position = actor.position();

    // Missile hits already showed their impact.
    let show_hit = !quiet && delta < 0 && effector.cause != Cause::MissileHit;
    if show_hit && !report.died {
        ctx.host.spawn_explosion(position, config.kill_magnitude);
    }

    if report.died {
        if !quiet {
            ctx.host.spawn_explosion(position, config.vaporize_magnitude);
        }
        if let Some(actor) = ctx.world.actor_mut(target) {
            actor.deactivate();
        }
        if !muted {
            ctx.host.play_builtin(BuiltinCue::Boom, Some(target));
        }
        tracing::debug!(target: "sim_core::verb", %target, "damage was lethal");
    }

    VerbOutcome {
        supported: true,
        died: report.died,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_damage_clamps_and_reports_death() {
        let mut actor = ActorState::new(EntityId(1));
        let report = StandardDamage.apply(&mut actor, -80);
        assert!(report.applied);
        assert!(report.died);
        assert_eq!(actor.stats.hit_points, 0);

        // Already at zero: no second death.
        assert!(!StandardDamage.apply(&mut actor, -5).died);
    }

    #[test]
    fn heal_caps_at_max() {
        let mut actor = ActorState::new(EntityId(1));
        actor.stats.hit_points = 45;
        StandardDamage.apply(&mut actor, 30);
        assert_eq!(actor.stats.hit_points, actor.stats.max_hit_points);
    }

    #[test]
    fn immune_hook_does_nothing() {
        let mut actor = ActorState::new(EntityId(1));
        let report = ImmuneDamage.apply(&mut actor, -10);
        assert!(!report.applied);
        assert_eq!(actor.stats.hit_points, 50);
    }
}
