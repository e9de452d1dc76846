//! Verbs and the dispatcher that executes them.
//!
//! A verb is the action half of a script command. [`Dispatcher::execute_verb`]
//! applies one verb to one direct object on behalf of an [`Effector`]: the
//! actor running the script, the actor it sensed, and the command's modifier
//! chain.
mod appearance;
mod damage;
mod device;
mod dispatch;
mod lethal;
mod level;
mod say;
mod scene;
mod score;
mod sound;

pub use damage::{DamageHook, DamageReport, ImmuneDamage, StandardDamage};
pub use dispatch::{DispatchContext, Dispatcher};
pub use score::ScoreStep;

use crate::dedup::EffectFamily;
use crate::error::{ErrorSeverity, SimError};
use crate::host::{LevelId, LightsStyle};
use crate::modifier::Modifier;
use crate::state::EntityId;

/// Closed set of verbs the engine executes.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::IntoStaticStr,
)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Verb {
    Stun,
    Kill,
    Squash,
    Vaporize,
    Vanish,
    Damage,
    Heal,
    Reset,
    Color,
    Glow,
    Open,
    Close,
    Score,
    #[strum(serialize = "unscore")]
    UnScore,
    ScoreSet,
    PlaySound,
    StopSound,
    Say,
    CameraFollowMe,
    CameraIgnoreMe,
    CameraFirstPerson,
    GameOver,
    GameVictory,
    PreviousLevel,
    NextLevel,
    MicrobitSay,
    MicrobitLights,
    MicrobitShow,
    MicrobitSetPin,
    MicrobitSetPwmFrequency,
    MicrobitSetPwmDutyCycle,
}

impl Verb {
    /// Parse a textual verb id such as `"vaporize"` or `"unscore"`.
    pub fn parse(id: &str) -> Result<Self, VerbParseError> {
        id.parse::<Self>()
            .map_err(|_| VerbParseError { id: id.to_owned() })
    }

    /// Dedup family for cosmetic verbs.
    pub const fn family(self) -> Option<EffectFamily> {
        match self {
            Self::Color => Some(EffectFamily::Color),
            Self::Glow => Some(EffectFamily::Glow),
            Self::Open | Self::Close => Some(EffectFamily::OpenClose),
            _ => None,
        }
    }

    /// Verbs refused on an invulnerable target unless self-administered.
    pub const fn is_harmful(self) -> bool {
        matches!(
            self,
            Self::Stun
                | Self::Kill
                | Self::Squash
                | Self::Vaporize
                | Self::Vanish
                | Self::Damage
                | Self::Heal
        )
    }
}

/// Unknown textual verb id.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown verb id `{id}`")]
pub struct VerbParseError {
    pub id: String,
}

impl SimError for VerbParseError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        "VERB_UNKNOWN"
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DispatchError {
    #[error("executor {actor} is not in the world")]
    ExecutorNotFound { actor: EntityId },
}

impl SimError for DispatchError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::ExecutorNotFound { .. } => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::ExecutorNotFound { .. } => "DISPATCH_EXECUTOR_NOT_FOUND",
        }
    }
}

/// Result of a dispatch that reached a verb handler.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct VerbOutcome {
    /// False when a guard refused the verb.
    pub supported: bool,
    /// The target's damage hook reported death.
    pub died: bool,
}

impl VerbOutcome {
    pub const fn supported() -> Self {
        Self {
            supported: true,
            died: false,
        }
    }

    pub const fn refused() -> Self {
        Self {
            supported: false,
            died: false,
        }
    }

    pub const fn from_bool(supported: bool) -> Self {
        Self {
            supported,
            died: false,
        }
    }
}

/// What triggered the command.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Cause {
    #[default]
    Always,
    Timer,
    Input,
    Sight,
    Hearing,
    Bump,
    MissileHit,
}

impl Cause {
    /// Causes that imply physical contact between executor and target.
    pub const fn is_proximity(self) -> bool {
        matches!(self, Self::Bump)
    }
}

/// Identifies one command within an actor's script. Keys per-command state
/// such as the say cursor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CommandId {
    pub actor: EntityId,
    pub index: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SayMode {
    #[default]
    Sequential,
    Random,
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SayScript {
    pub lines: Vec<String>,
    pub mode: SayMode,
}

impl SayScript {
    pub fn new(mode: SayMode, lines: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            mode,
        }
    }
}

/// Per-command parameters that are not modifiers.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CommandParams {
    pub say: Option<SayScript>,
    /// Explicit destination of the next level verb.
    pub level_link: Option<LevelId>,
    /// Zero-based device pin.
    pub pin: u8,
    pub lights: LightsStyle,
}

/// Context of one command: who runs it, what it sensed, and its modifiers.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Effector {
    pub actor: EntityId,
    pub sensed: Option<EntityId>,
    pub modifiers: Vec<Modifier>,
    pub command: CommandId,
    pub cause: Cause,
    pub params: CommandParams,
}

impl Effector {
    pub fn new(actor: EntityId) -> Self {
        Self {
            actor,
            sensed: None,
            modifiers: Vec::new(),
            command: CommandId { actor, index: 0 },
            cause: Cause::Always,
            params: CommandParams::default(),
        }
    }

    pub fn sensing(mut self, sensed: EntityId) -> Self {
        self.sensed = Some(sensed);
        self
    }

    pub fn with_modifiers(mut self, modifiers: impl IntoIterator<Item = Modifier>) -> Self {
        self.modifiers.extend(modifiers);
        self
    }

    pub fn caused_by(mut self, cause: Cause) -> Self {
        self.cause = cause;
        self
    }

    pub fn for_command(mut self, index: u32) -> Self {
        self.command = CommandId {
            actor: self.actor,
            index,
        };
        self
    }

    pub fn with_params(mut self, params: CommandParams) -> Self {
        self.params = params;
        self
    }

    pub fn saying(mut self, script: SayScript) -> Self {
        self.params.say = Some(script);
        self
    }
}
