use super::{DispatchContext, Effector, VerbOutcome};
use crate::modifier::ModifierChainExt;
use crate::state::{Color, EntityId};

/// Color from the chain, else the sensed actor's current color.
fn chosen_color(ctx: &mut DispatchContext<'_>, effector: &Effector) -> Option<Color> {
    if let Some(choice) = effector.modifiers.color_choice() {
        return Some(choice.pick(ctx.rng));
    }
    let sensed = effector.sensed?;
    ctx.world.actor(sensed).map(|actor| actor.color)
}

pub(super) fn color(
    ctx: &mut DispatchContext<'_>,
    target: EntityId,
    effector: &Effector,
) -> VerbOutcome {
    let Some(color) = chosen_color(ctx, effector) else {
        return VerbOutcome::refused();
    };
    match ctx.world.actor_mut(target) {
        Some(actor) => {
            actor.color = color;
            VerbOutcome::supported()
        }
        None => VerbOutcome::refused(),
    }
}

pub(super) fn glow(
    ctx: &mut DispatchContext<'_>,
    target: EntityId,
    effector: &Effector,
) -> VerbOutcome {
    let Some(color) = chosen_color(ctx, effector) else {
        return VerbOutcome::refused();
    };
    match ctx.world.actor_mut(target) {
        Some(actor) => {
            actor.glow = Some(color);
            VerbOutcome::supported()
        }
        None => VerbOutcome::refused(),
    }
}

pub(super) fn set_open(ctx: &mut DispatchContext<'_>, target: EntityId, open: bool) -> VerbOutcome {
    match ctx.world.actor_mut(target) {
        Some(actor) => {
            actor.open = open;
            VerbOutcome::supported()
        }
        None => VerbOutcome::refused(),
    }
}
