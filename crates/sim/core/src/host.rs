//! Collaborator traits for everything outside the engine.
//!
//! Rendering, audio, UI, scene management and attached devices are all
//! reached through these traits. The dispatcher only ever calls them; it never
//! reads state back except for the few answers the traits return (whether a
//! thought balloon was accepted, which level a link points at, ...).
//!
//! [`Host`] is blanket-implemented for any type providing every collaborator,
//! so a single recording or logging object can stand in for the whole outside
//! world.

use crate::modifier::{LedFrame, PinLevel, PlayerId};
use crate::score::ScoreBucket;
use crate::state::{Color, EntityId, Vec3};
use crate::verb::{Effector, Verb};

/// Sound cues the engine plays on its own, independent of scripted sounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum BuiltinCue {
    Pop,
    Boom,
    Vanish,
    Stun,
    ScoreUp,
    ScoreDown,
}

/// Feedback for a global score change.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScoreEffect {
    pub bucket: ScoreBucket,
    pub delta: i32,
    /// Where to float the change. `None` for quiet feedback.
    pub origin: Option<Vec3>,
}

pub trait EffectSink {
    fn spawn_explosion(&mut self, position: Vec3, magnitude: f32);
    fn distortion_zap(&mut self, actor: EntityId);
    fn score_effect(&mut self, effect: ScoreEffect);
}

pub trait AudioSink {
    fn play_builtin(&mut self, cue: BuiltinCue, source: Option<EntityId>);
    fn play_cue(&mut self, cue: &str, source: EntityId);
    fn stop_cue(&mut self, cue: &str, source: EntityId);
}

/// Modal dialog presented to the player.
#[derive(Clone, Debug, PartialEq)]
pub struct Dialog {
    pub message_key: &'static str,
    pub buttons: Vec<DialogButton>,
}

impl Dialog {
    pub fn notice(message_key: &'static str) -> Self {
        Self {
            message_key,
            buttons: vec![DialogButton {
                label_key: "textDialog.ok",
                action: DialogAction::Dismiss,
            }],
        }
    }

    pub fn button(&self, index: usize) -> Option<&DialogButton> {
        self.buttons.get(index)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct DialogButton {
    pub label_key: &'static str,
    pub action: DialogAction,
}

/// What pressing a dialog button does. Resolved by the runtime.
#[derive(Clone, Debug, PartialEq)]
pub enum DialogAction {
    Dismiss,
    /// Show the save dialog, then dispatch the stored verb again once the
    /// save completes.
    SaveThenRetry(Box<RetryRequest>),
    ReturnToEditMode,
}

/// Verb to dispatch again after a save.
#[derive(Clone, Debug, PartialEq)]
pub struct RetryRequest {
    pub verb: Verb,
    pub direct_object: Option<EntityId>,
    pub effector: Effector,
}

pub trait UiHost {
    /// Returns false when the balloon could not be shown.
    fn show_thought_balloon(&mut self, actor: EntityId, line: &str, border: Color) -> bool;
    fn present_dialog(&mut self, dialog: Dialog);
}

/// Opaque level identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LevelId(pub u128);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
pub enum LinkDirection {
    Previous,
    Next,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CameraRequest {
    FollowMe,
    IgnoreMe,
    FirstPerson,
}

/// Outcome announced by the game victory verb.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Victory {
    Team(Color),
    Player(PlayerId),
    Winner,
}

pub trait SceneHost {
    fn linked_level(&self, direction: LinkDirection) -> Option<LevelId>;
    /// Level has unsaved or only auto-saved edits.
    fn level_needs_save(&self) -> bool;
    /// A level is currently being loaded from an in-memory string.
    fn loading_from_string(&self) -> bool {
        false
    }
    /// Returns false when the level cannot be found.
    fn switch_to_level(&mut self, level: LevelId) -> bool;
    fn switch_to_edit_mode(&mut self);
    fn show_save_dialog(&mut self);
    fn clear_input(&mut self) {}
    fn camera(&mut self, request: CameraRequest, actor: EntityId);
    fn game_over(&mut self);
    fn victory(&mut self, victory: Victory);
}

/// Visual style of the device light verb.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LightsStyle {
    #[default]
    Block,
    Sequential,
}

pub trait DeviceHost {
    fn scroll_text(&mut self, player: PlayerId, text: &str);
    fn show_lights(&mut self, player: PlayerId, style: LightsStyle, power: u8);
    fn show_frames(&mut self, player: PlayerId, frames: &[LedFrame]);
    fn set_pin(&mut self, player: PlayerId, pin: u8, level: PinLevel);
    fn set_pwm_frequency(&mut self, player: PlayerId, pin: u8, value: i32, multiplier: i32);
    /// `fraction` is in `0.0..=1.0`.
    fn set_pwm_duty_cycle(&mut self, player: PlayerId, pin: u8, fraction: f32);
}

/// Everything the dispatcher talks to.
pub trait Host: EffectSink + AudioSink + UiHost + SceneHost + DeviceHost {}

impl<T> Host for T where T: EffectSink + AudioSink + UiHost + SceneHost + DeviceHost {}
