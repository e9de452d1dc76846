use sim_core::{
    ActorState, CommandParams, DialogAction, Effector, EntityId, ErrorSeverity, LevelId,
    LinkDirection, SimError, Verb,
};
use sim_runtime::{HostRequest, RecordingHost, RuntimeConfig, RuntimeError, Simulation};

const NEXT: LevelId = LevelId(0xA11CE);
const PREVIOUS: LevelId = LevelId(0xB0B);

fn simulation(host: RecordingHost) -> (Simulation<RecordingHost>, EntityId) {
    let mut sim = Simulation::new(RuntimeConfig::default().with_seed(3), host);
    let actor = sim.world_mut().spawn(ActorState::new);
    (sim, actor)
}

#[test]
fn clean_level_switches_and_pauses() {
    let (mut sim, actor) = simulation(RecordingHost::new().with_link(LinkDirection::Next, NEXT));

    let outcome = sim
        .dispatch(Verb::NextLevel, None, &Effector::new(actor), false)
        .expect("dispatch");

    assert!(outcome.supported);
    assert!(sim.world().is_paused());
    assert!(sim.clock().is_paused());
    assert_eq!(sim.host().current_level(), Some(NEXT));
    assert_eq!(
        sim.host().requests(),
        &[
            HostRequest::ClearInput,
            HostRequest::SwitchLevel {
                level: NEXT,
                switched: true,
            },
        ]
    );
}

#[test]
fn explicit_link_beats_world_link() {
    let (mut sim, actor) = simulation(RecordingHost::new().with_link(LinkDirection::Next, NEXT));
    let explicit = LevelId(77);
    let effector = Effector::new(actor).with_params(CommandParams {
        level_link: Some(explicit),
        ..CommandParams::default()
    });

    sim.dispatch(Verb::NextLevel, None, &effector, false)
        .expect("dispatch");
    assert_eq!(sim.host().current_level(), Some(explicit));
}

#[test]
fn missing_link_shows_notice_and_fails() {
    let (mut sim, actor) = simulation(RecordingHost::new());

    let outcome = sim
        .dispatch(Verb::NextLevel, None, &Effector::new(actor), false)
        .expect("dispatch");

    assert!(!outcome.supported);
    // The world stays paused behind the notice.
    assert!(sim.world().is_paused());
    let dialog = sim.host().last_dialog().expect("notice shown");
    assert_eq!(dialog.message_key, "inGame.nextLevelNotFound");
    assert_eq!(dialog.buttons.len(), 1);
    assert_eq!(dialog.buttons[0].action, DialogAction::Dismiss);
}

#[test]
fn failed_switch_reports_previous_level_not_found() {
    let (mut sim, actor) = simulation(
        RecordingHost::new()
            .with_link(LinkDirection::Previous, PREVIOUS)
            .with_failing_switch(),
    );

    let outcome = sim
        .dispatch(Verb::PreviousLevel, None, &Effector::new(actor), false)
        .expect("dispatch");

    assert!(!outcome.supported);
    assert_eq!(
        sim.host().last_dialog().map(|dialog| dialog.message_key),
        Some("inGame.previousLevelNotFound")
    );
}

#[test]
fn link_while_loading_from_string_is_not_found() {
    let mut host = RecordingHost::new().with_link(LinkDirection::Next, NEXT);
    host.set_loading_from_string(true);
    let (mut sim, actor) = simulation(host);

    let outcome = sim
        .dispatch(Verb::NextLevel, None, &Effector::new(actor), false)
        .expect("dispatch");
    assert!(!outcome.supported);
    assert_eq!(sim.host().current_level(), None);
}

// ============================================================================
// Save-before-link protocol
// ============================================================================

#[test]
fn unsaved_level_retries_after_save() {
    let (mut sim, actor) = simulation(
        RecordingHost::new()
            .with_link(LinkDirection::Next, NEXT)
            .with_unsaved_changes(),
    );

    let outcome = sim
        .dispatch(Verb::NextLevel, None, &Effector::new(actor), false)
        .expect("dispatch");
    assert!(outcome.supported);
    assert_eq!(sim.host().current_level(), None);

    let dialog = sim.host().last_dialog().cloned().expect("save prompt");
    assert_eq!(dialog.message_key, "inGame.saveRequiredBeforeLink");
    assert_eq!(dialog.buttons.len(), 2);

    sim.press_dialog_button(&dialog, 0).expect("yes button");
    assert!(sim.has_pending_save());
    assert_eq!(sim.host().requests().last(), Some(&HostRequest::SaveDialog));

    sim.host_mut().mark_saved();
    let retried = sim.save_completed().expect("retry dispatched");
    assert!(retried.supported);
    assert!(!sim.has_pending_save());
    assert_eq!(sim.host().current_level(), Some(NEXT));
}

#[test]
fn declining_save_returns_to_edit_mode() {
    let (mut sim, actor) = simulation(
        RecordingHost::new()
            .with_link(LinkDirection::Next, NEXT)
            .with_unsaved_changes(),
    );
    sim.dispatch(Verb::NextLevel, None, &Effector::new(actor), false)
        .expect("dispatch");
    let dialog = sim.host().last_dialog().cloned().expect("save prompt");

    sim.press_dialog_button(&dialog, 1).expect("no button");

    assert_eq!(sim.host().requests().last(), Some(&HostRequest::EditMode));
    let err = sim.save_completed().unwrap_err();
    assert!(matches!(err, RuntimeError::NoPendingSave));
    assert_eq!(err.severity(), ErrorSeverity::Recoverable);
}

#[test]
fn pressing_a_missing_button_is_rejected() {
    let (mut sim, actor) = simulation(RecordingHost::new());
    sim.dispatch(Verb::NextLevel, None, &Effector::new(actor), false)
        .expect("dispatch");
    let notice = sim.host().last_dialog().cloned().expect("notice");

    let err = sim.press_dialog_button(&notice, 3).unwrap_err();
    assert_eq!(err.error_code(), "RUNTIME_UNKNOWN_DIALOG");
}

#[test]
fn retry_pins_the_resolved_destination() {
    let (mut sim, actor) = simulation(
        RecordingHost::new()
            .with_link(LinkDirection::Next, NEXT)
            .with_unsaved_changes(),
    );
    sim.dispatch(Verb::NextLevel, None, &Effector::new(actor), false)
        .expect("dispatch");

    let dialog = sim.host().last_dialog().cloned().expect("save prompt");
    let Some(DialogAction::SaveThenRetry(retry)) = dialog.button(0).map(|b| b.action.clone())
    else {
        panic!("yes button should carry a retry");
    };
    assert_eq!(retry.verb, Verb::NextLevel);
    assert_eq!(retry.effector.params.level_link, Some(NEXT));
}

#[test]
fn resume_unpauses_world_and_clock() {
    let (mut sim, actor) = simulation(RecordingHost::new());
    sim.dispatch(Verb::NextLevel, None, &Effector::new(actor), false)
        .expect("dispatch");
    assert!(sim.clock().is_paused());

    sim.resume();
    assert!(!sim.world().is_paused());
    assert!(!sim.clock().is_paused());
    assert_eq!(
        sim.world().actor(actor).map(ActorState::state),
        Some(sim_core::LifeState::Active)
    );
}
