use std::collections::HashMap;

use super::score::ScoreStep;
use super::{
    CommandId, DispatchError, Effector, Verb, VerbOutcome, appearance, damage, device, lethal,
    level, say, scene, score, sound,
};
use crate::config::SimConfig;
use crate::dedup::DedupGuard;
use crate::host::{CameraRequest, Host, LinkDirection};
use crate::rng::RandomSource;
use crate::score::Scoreboard;
use crate::state::{EntityId, World};

/// Mutable state one dispatch works against.
///
/// Built by the caller for each tick. `frame` keys the dedup guard, so it must
/// stay constant for all dispatches of one tick.
pub struct DispatchContext<'a> {
    pub world: &'a mut World,
    pub scoreboard: &'a mut Scoreboard,
    pub rng: &'a mut dyn RandomSource,
    pub host: &'a mut dyn Host,
    pub frame: u64,
}

/// Executes verbs against the world.
///
/// Holds the state that outlives a single dispatch: the dedup ledgers and
/// each command's say cursor.
#[derive(Debug, Default)]
pub struct Dispatcher {
    config: SimConfig,
    dedup: DedupGuard,
    say_cursors: HashMap<CommandId, usize>,
}

impl Dispatcher {
    pub fn new(config: SimConfig) -> Self {
        Self {
            config,
            dedup: DedupGuard::new(),
            say_cursors: HashMap::new(),
        }
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Apply `verb` to `direct_object` on behalf of `effector.actor`.
    ///
    /// A missing direct object means the executor itself. Guard refusals are
    /// `Ok` with `supported == false`; only an executor missing from the world
    /// is an error.
    pub fn execute_verb(
        &mut self,
        ctx: &mut DispatchContext<'_>,
        verb: Verb,
        direct_object: Option<EntityId>,
        effector: &Effector,
        quiet: bool,
    ) -> Result<VerbOutcome, DispatchError> {
        let executor = effector.actor;
        if !ctx.world.contains(executor) {
            return Err(DispatchError::ExecutorNotFound { actor: executor });
        }
        let target = direct_object.unwrap_or(executor);

        let outcome = if needs_target(verb) {
            match self.check_target(ctx, verb, target, executor) {
                Some(refusal) => refusal,
                None => self.apply_to_target(ctx, verb, target, effector, quiet),
            }
        } else {
            self.apply_to_executor(ctx, verb, direct_object, effector, quiet)
        };

        tracing::debug!(
            target: "sim_core::verb",
            %verb,
            %executor,
            %target,
            supported = outcome.supported,
            died = outcome.died,
            "verb dispatched"
        );
        Ok(outcome)
    }

    /// Shared guards for verbs that act on the direct object.
    fn check_target(
        &mut self,
        ctx: &mut DispatchContext<'_>,
        verb: Verb,
        target: EntityId,
        executor: EntityId,
    ) -> Option<VerbOutcome> {
        let Some(actor) = ctx.world.actor(target) else {
            tracing::warn!(target: "sim_core::verb", %verb, %target, "direct object not in world");
            return Some(VerbOutcome::refused());
        };

        if verb.is_harmful() && actor.invulnerable && target != executor {
            tracing::debug!(target: "sim_core::verb", %verb, %target, "refused: invulnerable");
            return Some(VerbOutcome::refused());
        }

        let family = verb.family()?;
        if self.dedup.should_apply(family, target, ctx.frame) {
            return None;
        }
        tracing::debug!(target: "sim_core::verb", %verb, %target, "refused: already applied this frame");
        Some(VerbOutcome::refused())
    }

    fn apply_to_target(
        &mut self,
        ctx: &mut DispatchContext<'_>,
        verb: Verb,
        target: EntityId,
        effector: &Effector,
        quiet: bool,
    ) -> VerbOutcome {
        let config = &self.config;
        match verb {
            Verb::Stun => lethal::stun(ctx, config, target, quiet),
            Verb::Kill => lethal::kill(ctx, config, target, quiet),
            Verb::Squash => lethal::squash(ctx, target, effector, quiet),
            Verb::Vaporize => lethal::vaporize(ctx, config, target, quiet),
            Verb::Vanish => lethal::vanish(ctx, target, quiet),
            Verb::Reset => lethal::reset(ctx, target),
            Verb::Damage => damage::apply(ctx, config, target, effector, quiet, -1),
            Verb::Heal => damage::apply(ctx, config, target, effector, quiet, 1),
            Verb::Color => appearance::color(ctx, target, effector),
            Verb::Glow => appearance::glow(ctx, target, effector),
            Verb::Open => appearance::set_open(ctx, target, true),
            Verb::Close => appearance::set_open(ctx, target, false),
            other => misrouted(other),
        }
    }

    fn apply_to_executor(
        &mut self,
        ctx: &mut DispatchContext<'_>,
        verb: Verb,
        direct_object: Option<EntityId>,
        effector: &Effector,
        quiet: bool,
    ) -> VerbOutcome {
        let config = &self.config;
        let executor = effector.actor;
        match verb {
            Verb::Score => score::apply(ctx, config, effector, ScoreStep::Increment),
            Verb::UnScore => score::apply(ctx, config, effector, ScoreStep::Decrement),
            Verb::ScoreSet => score::apply(ctx, config, effector, ScoreStep::Set),
            Verb::PlaySound => sound::play(ctx, config, effector, quiet),
            Verb::StopSound => sound::stop(ctx, config, effector),
            Verb::Say => say::say(ctx, &mut self.say_cursors, effector),
            Verb::CameraFollowMe => scene::camera(ctx, CameraRequest::FollowMe, executor),
            Verb::CameraIgnoreMe => scene::camera(ctx, CameraRequest::IgnoreMe, executor),
            Verb::CameraFirstPerson => scene::camera(ctx, CameraRequest::FirstPerson, executor),
            Verb::GameOver => scene::game_over(ctx),
            Verb::GameVictory => scene::victory(ctx, effector),
            Verb::PreviousLevel => {
                level::link(ctx, verb, LinkDirection::Previous, direct_object, effector)
            }
            Verb::NextLevel => level::link(ctx, verb, LinkDirection::Next, direct_object, effector),
            Verb::MicrobitSay => device::say(ctx, effector),
            Verb::MicrobitLights => device::lights(ctx, effector),
            Verb::MicrobitShow => device::show(ctx, effector),
            Verb::MicrobitSetPin => device::set_pin(ctx, effector),
            Verb::MicrobitSetPwmFrequency => device::set_pwm_frequency(ctx, effector),
            Verb::MicrobitSetPwmDutyCycle => device::set_pwm_duty_cycle(ctx, effector),
            other => misrouted(other),
        }
    }
}

/// A verb reached the handler table for the other side of [`needs_target`].
fn misrouted(verb: Verb) -> VerbOutcome {
    debug_assert!(false, "verb {verb} has no handler on this path");
    tracing::error!(target: "sim_core::verb", %verb, "verb has no handler on this path");
    VerbOutcome::refused()
}

/// Verbs whose effect lands on the direct object rather than the executor.
const fn needs_target(verb: Verb) -> bool {
    verb.is_harmful()
        || verb.family().is_some()
        || matches!(verb, Verb::Reset)
}
