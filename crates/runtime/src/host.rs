//! Ready-made collaborators.
//!
//! [`RecordingHost`] stores every request it receives as a [`HostRequest`]
//! and answers queries from a small set of configurable values. It backs the
//! integration tests and headless runs. [`LoggingHost`] wraps any other host
//! and traces each request before forwarding it.
use sim_core::{
    AudioSink, BuiltinCue, CameraRequest, Color, DeviceHost, Dialog, EffectSink, EntityId, Host,
    LedFrame, LevelId, LightsStyle, LinkDirection, PinLevel, PlayerId, SceneHost, ScoreEffect,
    UiHost, Vec3, Victory,
};

/// One outgoing collaborator request, as seen by a [`RecordingHost`].
#[derive(Clone, Debug, PartialEq)]
pub enum HostRequest {
    Explosion { position: Vec3, magnitude: f32 },
    DistortionZap { actor: EntityId },
    ScoreEffect(ScoreEffect),
    PlayBuiltin { cue: BuiltinCue, source: Option<EntityId> },
    PlayCue { cue: String, source: EntityId },
    StopCue { cue: String, source: EntityId },
    ThoughtBalloon {
        actor: EntityId,
        line: String,
        border: Color,
        accepted: bool,
    },
    Dialog(Dialog),
    SwitchLevel { level: LevelId, switched: bool },
    EditMode,
    SaveDialog,
    ClearInput,
    Camera { request: CameraRequest, actor: EntityId },
    GameOver,
    Victory(Victory),
    ScrollText { player: PlayerId, text: String },
    Lights {
        player: PlayerId,
        style: LightsStyle,
        power: u8,
    },
    Frames { player: PlayerId, frames: Vec<LedFrame> },
    Pin {
        player: PlayerId,
        pin: u8,
        level: PinLevel,
    },
    PwmFrequency {
        player: PlayerId,
        pin: u8,
        value: i32,
        multiplier: i32,
    },
    PwmDutyCycle {
        player: PlayerId,
        pin: u8,
        fraction: f32,
    },
}

// ============================================================================
// RecordingHost
// ============================================================================

/// Collaborator that records requests and answers from fixed settings.
#[derive(Clone, Debug)]
pub struct RecordingHost {
    requests: Vec<HostRequest>,
    next_level: Option<LevelId>,
    previous_level: Option<LevelId>,
    current_level: Option<LevelId>,
    needs_save: bool,
    loading_from_string: bool,
    accept_balloons: bool,
    switch_succeeds: bool,
}

impl Default for RecordingHost {
    fn default() -> Self {
        Self {
            requests: Vec::new(),
            next_level: None,
            previous_level: None,
            current_level: None,
            needs_save: false,
            loading_from_string: false,
            accept_balloons: true,
            switch_succeeds: true,
        }
    }
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_link(mut self, direction: LinkDirection, level: LevelId) -> Self {
        match direction {
            LinkDirection::Next => self.next_level = Some(level),
            LinkDirection::Previous => self.previous_level = Some(level),
        }
        self
    }

    pub fn with_unsaved_changes(mut self) -> Self {
        self.needs_save = true;
        self
    }

    pub fn refusing_balloons(mut self) -> Self {
        self.accept_balloons = false;
        self
    }

    pub fn with_failing_switch(mut self) -> Self {
        self.switch_succeeds = false;
        self
    }

    pub fn set_loading_from_string(&mut self, loading: bool) {
        self.loading_from_string = loading;
    }

    pub fn set_accept_balloons(&mut self, accept: bool) {
        self.accept_balloons = accept;
    }

    /// Called once the save dialog finished writing the level.
    pub fn mark_saved(&mut self) {
        self.needs_save = false;
    }

    pub fn current_level(&self) -> Option<LevelId> {
        self.current_level
    }

    pub fn requests(&self) -> &[HostRequest] {
        &self.requests
    }

    /// Drain recorded requests, leaving the log empty.
    pub fn take_requests(&mut self) -> Vec<HostRequest> {
        std::mem::take(&mut self.requests)
    }

    pub fn dialogs(&self) -> impl Iterator<Item = &Dialog> {
        self.requests.iter().filter_map(|request| match request {
            HostRequest::Dialog(dialog) => Some(dialog),
            _ => None,
        })
    }

    pub fn last_dialog(&self) -> Option<&Dialog> {
        self.dialogs().last()
    }

    pub fn count(&self, predicate: impl Fn(&HostRequest) -> bool) -> usize {
        self.requests.iter().filter(|request| predicate(request)).count()
    }

    fn record(&mut self, request: HostRequest) {
        self.requests.push(request);
    }
}

impl EffectSink for RecordingHost {
    fn spawn_explosion(&mut self, position: Vec3, magnitude: f32) {
        self.record(HostRequest::Explosion {
            position,
            magnitude,
        });
    }

    fn distortion_zap(&mut self, actor: EntityId) {
        self.record(HostRequest::DistortionZap { actor });
    }

    fn score_effect(&mut self, effect: ScoreEffect) {
        self.record(HostRequest::ScoreEffect(effect));
    }
}

impl AudioSink for RecordingHost {
    fn play_builtin(&mut self, cue: BuiltinCue, source: Option<EntityId>) {
        self.record(HostRequest::PlayBuiltin { cue, source });
    }

    fn play_cue(&mut self, cue: &str, source: EntityId) {
        self.record(HostRequest::PlayCue {
            cue: cue.to_owned(),
            source,
        });
    }

    fn stop_cue(&mut self, cue: &str, source: EntityId) {
        self.record(HostRequest::StopCue {
            cue: cue.to_owned(),
            source,
        });
    }
}

impl UiHost for RecordingHost {
    fn show_thought_balloon(&mut self, actor: EntityId, line: &str, border: Color) -> bool {
        let accepted = self.accept_balloons;
        self.record(HostRequest::ThoughtBalloon {
            actor,
            line: line.to_owned(),
            border,
            accepted,
        });
        accepted
    }

    fn present_dialog(&mut self, dialog: Dialog) {
        self.record(HostRequest::Dialog(dialog));
    }
}

impl SceneHost for RecordingHost {
    fn linked_level(&self, direction: LinkDirection) -> Option<LevelId> {
        match direction {
            LinkDirection::Next => self.next_level,
            LinkDirection::Previous => self.previous_level,
        }
    }

    fn level_needs_save(&self) -> bool {
        self.needs_save
    }

    fn loading_from_string(&self) -> bool {
        self.loading_from_string
    }

    fn switch_to_level(&mut self, level: LevelId) -> bool {
        let switched = self.switch_succeeds;
        if switched {
            self.current_level = Some(level);
        }
        self.record(HostRequest::SwitchLevel { level, switched });
        switched
    }

    fn switch_to_edit_mode(&mut self) {
        self.record(HostRequest::EditMode);
    }

    fn show_save_dialog(&mut self) {
        self.record(HostRequest::SaveDialog);
    }

    fn clear_input(&mut self) {
        self.record(HostRequest::ClearInput);
    }

    fn camera(&mut self, request: CameraRequest, actor: EntityId) {
        self.record(HostRequest::Camera { request, actor });
    }

    fn game_over(&mut self) {
        self.record(HostRequest::GameOver);
    }

    fn victory(&mut self, victory: Victory) {
        self.record(HostRequest::Victory(victory));
    }
}

impl DeviceHost for RecordingHost {
    fn scroll_text(&mut self, player: PlayerId, text: &str) {
        self.record(HostRequest::ScrollText {
            player,
            text: text.to_owned(),
        });
    }

    fn show_lights(&mut self, player: PlayerId, style: LightsStyle, power: u8) {
        self.record(HostRequest::Lights {
            player,
            style,
            power,
        });
    }

    fn show_frames(&mut self, player: PlayerId, frames: &[LedFrame]) {
        self.record(HostRequest::Frames {
            player,
            frames: frames.to_vec(),
        });
    }

    fn set_pin(&mut self, player: PlayerId, pin: u8, level: PinLevel) {
        self.record(HostRequest::Pin { player, pin, level });
    }

    fn set_pwm_frequency(&mut self, player: PlayerId, pin: u8, value: i32, multiplier: i32) {
        self.record(HostRequest::PwmFrequency {
            player,
            pin,
            value,
            multiplier,
        });
    }

    fn set_pwm_duty_cycle(&mut self, player: PlayerId, pin: u8, fraction: f32) {
        self.record(HostRequest::PwmDutyCycle {
            player,
            pin,
            fraction,
        });
    }
}

// ============================================================================
// LoggingHost
// ============================================================================

/// Traces every request, then forwards it to the wrapped host.
#[derive(Clone, Debug, Default)]
pub struct LoggingHost<H> {
    inner: H,
}

impl<H: Host> LoggingHost<H> {
    pub fn new(inner: H) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &H {
        &self.inner
    }

    pub fn inner_mut(&mut self) -> &mut H {
        &mut self.inner
    }

    pub fn into_inner(self) -> H {
        self.inner
    }
}

impl<H: Host> EffectSink for LoggingHost<H> {
    fn spawn_explosion(&mut self, position: Vec3, magnitude: f32) {
        tracing::debug!(target: "sim_runtime::host", ?position, magnitude, "explosion");
        self.inner.spawn_explosion(position, magnitude);
    }

    fn distortion_zap(&mut self, actor: EntityId) {
        tracing::debug!(target: "sim_runtime::host", %actor, "distortion zap");
        self.inner.distortion_zap(actor);
    }

    fn score_effect(&mut self, effect: ScoreEffect) {
        tracing::debug!(
            target: "sim_runtime::host",
            bucket = %effect.bucket,
            delta = effect.delta,
            loud = effect.origin.is_some(),
            "score effect"
        );
        self.inner.score_effect(effect);
    }
}

impl<H: Host> AudioSink for LoggingHost<H> {
    fn play_builtin(&mut self, cue: BuiltinCue, source: Option<EntityId>) {
        tracing::debug!(target: "sim_runtime::host", %cue, ?source, "builtin cue");
        self.inner.play_builtin(cue, source);
    }

    fn play_cue(&mut self, cue: &str, source: EntityId) {
        tracing::debug!(target: "sim_runtime::host", cue, %source, "play cue");
        self.inner.play_cue(cue, source);
    }

    fn stop_cue(&mut self, cue: &str, source: EntityId) {
        tracing::debug!(target: "sim_runtime::host", cue, %source, "stop cue");
        self.inner.stop_cue(cue, source);
    }
}

impl<H: Host> UiHost for LoggingHost<H> {
    fn show_thought_balloon(&mut self, actor: EntityId, line: &str, border: Color) -> bool {
        let accepted = self.inner.show_thought_balloon(actor, line, border);
        tracing::info!(target: "sim_runtime::host", %actor, line, %border, accepted, "thought balloon");
        accepted
    }

    fn present_dialog(&mut self, dialog: Dialog) {
        tracing::info!(
            target: "sim_runtime::host",
            message_key = dialog.message_key,
            buttons = dialog.buttons.len(),
            "dialog"
        );
        self.inner.present_dialog(dialog);
    }
}

impl<H: Host> SceneHost for LoggingHost<H> {
    fn linked_level(&self, direction: LinkDirection) -> Option<LevelId> {
        self.inner.linked_level(direction)
    }

    fn level_needs_save(&self) -> bool {
        self.inner.level_needs_save()
    }

    fn loading_from_string(&self) -> bool {
        self.inner.loading_from_string()
    }

    fn switch_to_level(&mut self, level: LevelId) -> bool {
        let switched = self.inner.switch_to_level(level);
        tracing::info!(target: "sim_runtime::host", level = level.0, switched, "switch level");
        switched
    }

    fn switch_to_edit_mode(&mut self) {
        tracing::info!(target: "sim_runtime::host", "return to edit mode");
        self.inner.switch_to_edit_mode();
    }

    fn show_save_dialog(&mut self) {
        tracing::info!(target: "sim_runtime::host", "save dialog");
        self.inner.show_save_dialog();
    }

    fn clear_input(&mut self) {
        self.inner.clear_input();
    }

    fn camera(&mut self, request: CameraRequest, actor: EntityId) {
        tracing::debug!(target: "sim_runtime::host", ?request, %actor, "camera");
        self.inner.camera(request, actor);
    }

    fn game_over(&mut self) {
        tracing::info!(target: "sim_runtime::host", "game over");
        self.inner.game_over();
    }

    fn victory(&mut self, victory: Victory) {
        tracing::info!(target: "sim_runtime::host", ?victory, "victory");
        self.inner.victory(victory);
    }
}

impl<H: Host> DeviceHost for LoggingHost<H> {
    fn scroll_text(&mut self, player: PlayerId, text: &str) {
        tracing::debug!(target: "sim_runtime::host", ?player, text, "device text");
        self.inner.scroll_text(player, text);
    }

    fn show_lights(&mut self, player: PlayerId, style: LightsStyle, power: u8) {
        tracing::debug!(target: "sim_runtime::host", ?player, ?style, power, "device lights");
        self.inner.show_lights(player, style, power);
    }

    fn show_frames(&mut self, player: PlayerId, frames: &[LedFrame]) {
        tracing::debug!(target: "sim_runtime::host", ?player, frames = frames.len(), "device frames");
        self.inner.show_frames(player, frames);
    }

    fn set_pin(&mut self, player: PlayerId, pin: u8, level: PinLevel) {
        tracing::debug!(target: "sim_runtime::host", ?player, pin, ?level, "device pin");
        self.inner.set_pin(player, pin, level);
    }

    fn set_pwm_frequency(&mut self, player: PlayerId, pin: u8, value: i32, multiplier: i32) {
        tracing::debug!(target: "sim_runtime::host", ?player, pin, value, multiplier, "pwm frequency");
        self.inner.set_pwm_frequency(player, pin, value, multiplier);
    }

    fn set_pwm_duty_cycle(&mut self, player: PlayerId, pin: u8, fraction: f32) {
        tracing::debug!(target: "sim_runtime::host", ?player, pin, fraction, "pwm duty cycle");
        self.inner.set_pwm_duty_cycle(player, pin, fraction);
    }
}
