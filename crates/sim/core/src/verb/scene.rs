use super::{DispatchContext, Effector, VerbOutcome};
use crate::host::{CameraRequest, Victory};
use crate::modifier::{Modifier, ModifierChainExt};
use crate::score::ScoreBucket;
use crate::state::EntityId;

pub(super) fn camera(
    ctx: &mut DispatchContext<'_>,
    request: CameraRequest,
    actor: EntityId,
) -> VerbOutcome {
    ctx.host.camera(request, actor);
    VerbOutcome::supported()
}

pub(super) fn game_over(ctx: &mut DispatchContext<'_>) -> VerbOutcome {
    ctx.host.game_over();
    VerbOutcome::supported()
}

/// Team win for a color bucket, else a player win, else a plain winner.
pub(super) fn victory(ctx: &mut DispatchContext<'_>, effector: &Effector) -> VerbOutcome {
    let chain = effector.modifiers.as_slice();
    let victory = match chain.bucket_target() {
        Some(ScoreBucket::Color(color)) => Victory::Team(color),
        _ if chain.iter().any(|m| matches!(m, Modifier::Player(_))) => {
            Victory::Player(chain.player())
        }
        _ => Victory::Winner,
    };
    ctx.host.victory(victory);
    VerbOutcome::supported()
}
