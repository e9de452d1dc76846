//! Deterministic behavior engine for scripted actors.
//!
//! `sim-core` turns resolved script commands (verbs plus their modifier
//! chains) into state changes on actors. It owns the canonical actor and score
//! state, the modifier score resolver, the per-frame dedup guard, the timer
//! scheduler and the verb dispatcher. Everything that renders, plays audio or
//! presents UI is reached through the collaborator traits in [`host`].
//!
//! All mutation flows through [`verb::Dispatcher::execute_verb`]; the world's
//! staged life-cycle transitions become visible at [`state::World::refresh`].
pub mod config;
pub mod dedup;
pub mod error;
pub mod host;
pub mod modifier;
pub mod rng;
pub mod score;
pub mod state;
pub mod timer;
pub mod verb;

pub use config::SimConfig;
pub use dedup::{DedupGuard, EffectFamily};
pub use error::{ErrorSeverity, SimError};
pub use host::{
    AudioSink, BuiltinCue, CameraRequest, DeviceHost, Dialog, DialogAction, DialogButton,
    EffectSink, Host, LevelId, LightsStyle, LinkDirection, RetryRequest, SceneHost, ScoreEffect,
    UiHost, Victory,
};
pub use modifier::{
    CalculatedScore, LedFrame, Modifier, ModifierChainExt, PinLevel, PlayerId, ResolveContext,
    ResolveOptions, ScoreTarget, SettingName, resolve,
};
pub use rng::{PcgRng, RandomSource};
pub use score::{
    Score, ScoreBucket, ScoreChange, ScoreResetFlags, ScoreSet, ScoreTable, ScoreVisibility,
    Scoreboard,
};
pub use state::{
    ActorState, ActorStats, Chassis, Color, ColorChoice, DamageProfile, EntityId, LifeState,
    Movement, RefreshReport, Vec3, World,
};
pub use timer::{ClockKind, SimClock, Timer, TimerCallback, TimerId, TimerScheduler, TimerState};
pub use verb::{
    Cause, CommandId, CommandParams, DamageHook, DamageReport, DispatchContext, DispatchError,
    Dispatcher, Effector, SayMode, SayScript, ScoreStep, Verb, VerbOutcome, VerbParseError,
};
