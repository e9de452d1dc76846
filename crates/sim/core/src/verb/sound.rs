//! Scripted sound cues.
//!
//! These play from the executor. The executor's mute flag does not apply:
//! mute only silences the engine's built-in cues.

use super::{DispatchContext, Effector, VerbOutcome};
use crate::config::SimConfig;
use crate::modifier::ModifierChainExt;

pub(super) fn play(
    ctx: &mut DispatchContext<'_>,
    config: &SimConfig,
    effector: &Effector,
    quiet: bool,
) -> VerbOutcome {
    if config.audio_enabled && !quiet {
        if let Some(cue) = effector.modifiers.sound_cue() {
            ctx.host.play_cue(cue, effector.actor);
        }
    }
    VerbOutcome::supported()
}

pub(super) fn stop(
    ctx: &mut DispatchContext<'_>,
    config: &SimConfig,
    effector: &Effector,
) -> VerbOutcome {
    if config.audio_enabled {
        if let Some(cue) = effector.modifiers.sound_cue() {
            ctx.host.stop_cue(cue, effector.actor);
        }
    }
    VerbOutcome::supported()
}
