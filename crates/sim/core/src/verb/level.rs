//! Previous/next level links.
//!
//! Following a link always pauses the world first so no further rules fire
//! while a dialog is up. A level with unsaved edits asks to save; the yes
//! button carries the verb so the runtime can dispatch it again once the save
//! completes.

use super::{DispatchContext, Effector, Verb, VerbOutcome};
use crate::host::{Dialog, DialogAction, DialogButton, LinkDirection, RetryRequest};
use crate::state::EntityId;

pub(super) fn link(
    ctx: &mut DispatchContext<'_>,
    verb: Verb,
    direction: LinkDirection,
    direct_object: Option<EntityId>,
    effector: &Effector,
) -> VerbOutcome {
    ctx.world.pause_all();
    ctx.host.clear_input();
    tracing::info!(target: "sim_core::verb", %direction, "following level link");

    let destination = match direction {
        LinkDirection::Next => effector
            .params
            .level_link
            .or_else(|| ctx.host.linked_level(direction)),
        LinkDirection::Previous => ctx.host.linked_level(direction),
    };

    if let Some(level) = destination.filter(|_| !ctx.host.loading_from_string()) {
        if ctx.host.level_needs_save() {
            // Pin the resolved destination so the retry goes to the same level.
            let mut retry = effector.clone();
            if direction == LinkDirection::Next {
                retry.params.level_link = Some(level);
            }
            ctx.host.present_dialog(save_required(RetryRequest {
                verb,
                direct_object,
                effector: retry,
            }));
            return VerbOutcome::supported();
        }
        if ctx.host.switch_to_level(level) {
            return VerbOutcome::supported();
        }
    }

    let message_key = match direction {
        LinkDirection::Next => "inGame.nextLevelNotFound",
        LinkDirection::Previous => "inGame.previousLevelNotFound",
    };
    tracing::warn!(target: "sim_core::verb", %direction, message_key, "level link not found");
    ctx.host.present_dialog(Dialog::notice(message_key));
    VerbOutcome::refused()
}

fn save_required(retry: RetryRequest) -> Dialog {
    Dialog {
        message_key: "inGame.saveRequiredBeforeLink",
        buttons: vec![
            DialogButton {
                label_key: "textDialog.yes",
                action: DialogAction::SaveThenRetry(Box::new(retry)),
            },
            DialogButton {
                label_key: "textDialog.no",
                action: DialogAction::ReturnToEditMode,
            },
        ],
    }
}
