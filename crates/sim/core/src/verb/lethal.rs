//! Disabling and removal verbs, plus reset.
//!
//! The dispatcher has already checked that the target exists and is not an
//! invulnerable outsider. The caller's `quiet` hides both visuals and cues;
//! the target's `mute` flag only silences cues.

use super::{DispatchContext, Effector, VerbOutcome};
use crate::config::SimConfig;
use crate::host::BuiltinCue;
use crate::state::{EntityId, LifeState, Vec3};

pub(super) fn stun(
    ctx: &mut DispatchContext<'_>,
    config: &SimConfig,
    target: EntityId,
    quiet: bool,
) -> VerbOutcome {
    let Some(actor) = ctx.world.actor(target) else {
        return VerbOutcome::refused();
    };
    let muted = quiet || actor.mute;
    let burst = actor.position() + Vec3::new(0.0, 0.0, actor.chassis.collision_radius);

    if !quiet {
        if config.distortion_effects {
            ctx.host.distortion_zap(target);
        } else {
            ctx.host.spawn_explosion(burst, config.stun_magnitude);
        }
    }
    if !muted {
        ctx.host.play_builtin(BuiltinCue::Stun, Some(target));
    }
    VerbOutcome::supported()
}

pub(super) fn kill(
    ctx: &mut DispatchContext<'_>,
    config: &SimConfig,
    target: EntityId,
    quiet: bool,
) -> VerbOutcome {
    let Some(actor) = ctx.world.actor_mut(target) else {
        return VerbOutcome::refused();
    };
    if actor.is_down() || actor.is_removed() {
        tracing::debug!(target: "sim_core::verb", %target, "refused: already down");
        return VerbOutcome::refused();
    }
    let muted = quiet || actor.mute;
    actor.set_pending_state(LifeState::Dead);
    let position = actor.position();

    if !quiet {
        ctx.host.spawn_explosion(position, config.kill_magnitude);
    }
    if !muted {
        ctx.host.play_builtin(BuiltinCue::Pop, Some(target));
    }
    VerbOutcome::supported()
}

/// Flatten the target.
///
/// Contact causes must be backed by reach: the executor's grab range toward
/// the squashed actor has to cover the distance to its collision center. Any
/// other cause always lands.
pub(super) fn squash(
    ctx: &mut DispatchContext<'_>,
    target: EntityId,
    effector: &Effector,
    quiet: bool,
) -> VerbOutcome {
    let Some(actor) = ctx.world.actor(target) else {
        return VerbOutcome::refused();
    };
    if actor.is_down() || actor.is_removed() {
        tracing::debug!(target: "sim_core::verb", %target, "refused: already down");
        return VerbOutcome::refused();
    }

    if effector.cause.is_proximity() && !in_grab_range(ctx, effector, target) {
        tracing::debug!(target: "sim_core::verb", %target, "refused: out of grab range");
        return VerbOutcome::refused();
    }

    let Some(actor) = ctx.world.actor_mut(target) else {
        return VerbOutcome::refused();
    };
    let muted = quiet || actor.mute;
    actor.set_pending_state(LifeState::Squashed);
    if !muted {
        ctx.host.play_builtin(BuiltinCue::Pop, Some(target));
    }
    VerbOutcome::supported()
}

fn in_grab_range(ctx: &DispatchContext<'_>, effector: &Effector, target: EntityId) -> bool {
    let squashed_id = effector.sensed.unwrap_or(target);
    let (Some(executor), Some(squashed)) =
        (ctx.world.actor(effector.actor), ctx.world.actor(squashed_id))
    else {
        return true;
    };
    if executor.id == squashed.id {
        return true;
    }
    let distance = squashed
        .world_collision_center()
        .distance(executor.world_collision_center());
    distance <= executor.total_grab_range(squashed)
}

/// Remove the target with an explosion. The visual spawns while the actor's
/// position is still valid, the cue plays after deactivation.
pub(super) fn vaporize(
    ctx: &mut DispatchContext<'_>,
    config: &SimConfig,
    target: EntityId,
    quiet: bool,
) -> VerbOutcome {
    let Some(actor) = ctx.world.actor_mut(target) else {
        return VerbOutcome::refused();
    };
    let muted = quiet || actor.mute;
    let position = actor.position();

    if !quiet {
        ctx.host.spawn_explosion(position, config.vaporize_magnitude);
    }
    if let Some(actor) = ctx.world.actor_mut(target) {
        actor.deactivate();
    }
    if !muted {
        ctx.host.play_builtin(BuiltinCue::Boom, Some(target));
    }
    VerbOutcome::supported()
}

pub(super) fn vanish(ctx: &mut DispatchContext<'_>, target: EntityId, quiet: bool) -> VerbOutcome {
    let Some(actor) = ctx.world.actor_mut(target) else {
        return VerbOutcome::refused();
    };
    let muted = quiet || actor.mute;
    actor.deactivate();
    if !muted {
        ctx.host.play_builtin(BuiltinCue::Vanish, Some(target));
    }
    VerbOutcome::supported()
}

/// Restore the target's spawn state immediately, bypassing the refresh.
pub(super) fn reset(ctx: &mut DispatchContext<'_>, target: EntityId) -> VerbOutcome {
    match ctx.world.actor_mut(target) {
        Some(actor) => {
            actor.reset_to_initial();
            VerbOutcome::supported()
        }
        None => VerbOutcome::refused(),
    }
}
