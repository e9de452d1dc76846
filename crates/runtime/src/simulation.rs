//! Tick driver.
//!
//! A [`Simulation`] owns the world, the scoreboard, the dispatcher and the
//! clock for one level. Each frame the host calls [`Simulation::begin_tick`]
//! to advance the clock and fire timers, dispatches the frame's verbs in
//! script order, then calls [`Simulation::end_tick`] to apply staged
//! life-cycle transitions.
//!
//! Level links pause the world and may leave a save dialog up. The host
//! reports the pressed button through [`Simulation::press_dialog_button`] and,
//! once a save finishes, calls [`Simulation::save_completed`] to retry the
//! link.
use sim_core::{
    ClockKind, Dialog, DialogAction, DispatchContext, Dispatcher, Effector, EntityId, Host,
    PcgRng, RefreshReport, RetryRequest, Scoreboard, SimClock, TimerId, TimerScheduler, Verb,
    VerbOutcome, World,
};

use crate::config::RuntimeConfig;
use crate::error::{Result, RuntimeError};

/// What happened at the start of a frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    pub frame: u64,
    pub timers_fired: usize,
}

pub struct Simulation<H> {
    config: RuntimeConfig,
    seed: u64,
    clock: SimClock,
    timers: TimerScheduler<World>,
    world: World,
    scoreboard: Scoreboard,
    dispatcher: Dispatcher,
    rng: PcgRng,
    host: H,
    pending_save: Option<RetryRequest>,
}

impl<H: Host> Simulation<H> {
    pub fn new(config: RuntimeConfig, host: H) -> Self {
        let seed = config.rng_seed.unwrap_or_else(rand::random);
        tracing::info!(
            target: "sim_runtime::simulation",
            seed,
            audio = config.sim.audio_enabled,
            max_frame_seconds = config.max_frame_seconds,
            "simulation created"
        );

        Self {
            clock: SimClock::new(config.max_frame_seconds),
            dispatcher: Dispatcher::new(config.sim.clone()),
            rng: PcgRng::seeded(seed),
            seed,
            timers: TimerScheduler::new(),
            world: World::new(),
            scoreboard: Scoreboard::new(),
            host,
            pending_save: None,
            config,
        }
    }

    // ========================================================================
    // Frame lifecycle
    // ========================================================================

    /// Advance the clock by `wall_delta` seconds and fire due timers.
    pub fn begin_tick(&mut self, wall_delta: f64) -> TickReport {
        self.clock.update(wall_delta);
        let timers_fired = self.timers.advance(&self.clock, &mut self.world);
        TickReport {
            frame: self.clock.frame(),
            timers_fired,
        }
    }

    /// Dispatch one verb within the current frame.
    pub fn dispatch(
        &mut self,
        verb: Verb,
        direct_object: Option<EntityId>,
        effector: &Effector,
        quiet: bool,
    ) -> Result<VerbOutcome> {
        let mut ctx = DispatchContext {
            world: &mut self.world,
            scoreboard: &mut self.scoreboard,
            rng: &mut self.rng,
            host: &mut self.host,
            frame: self.clock.frame(),
        };
        let outcome = self
            .dispatcher
            .execute_verb(&mut ctx, verb, direct_object, effector, quiet)?;
        self.sync_pause();
        Ok(outcome)
    }

    /// Apply staged life-cycle transitions and drop deactivated actors.
    pub fn end_tick(&mut self) -> RefreshReport {
        self.world.refresh()
    }

    /// Resume a world paused by a level link.
    pub fn resume(&mut self) {
        self.world.resume_all();
        self.sync_pause();
    }

    fn sync_pause(&mut self) {
        let paused = self.world.is_paused();
        if paused != self.clock.is_paused() {
            tracing::info!(target: "sim_runtime::simulation", paused, frame = self.clock.frame(), "pause state changed");
            self.clock.set_paused(paused);
        }
    }

    // ========================================================================
    // Dialog protocol
    // ========================================================================

    /// Resolve the button the player pressed on a dialog the host presented.
    pub fn press_dialog_button(&mut self, dialog: &Dialog, button: usize) -> Result<()> {
        let Some(pressed) = dialog.button(button) else {
            return Err(RuntimeError::UnknownDialog {
                message_key: dialog.message_key,
                button,
            });
        };
        self.resolve_dialog_action(pressed.action.clone());
        Ok(())
    }

    pub fn resolve_dialog_action(&mut self, action: DialogAction) {
        match action {
            DialogAction::Dismiss => {}
            DialogAction::ReturnToEditMode => {
                self.pending_save = None;
                self.host.switch_to_edit_mode();
            }
            DialogAction::SaveThenRetry(retry) => {
                tracing::info!(target: "sim_runtime::simulation", verb = %retry.verb, "saving before level link");
                self.pending_save = Some(*retry);
                self.host.show_save_dialog();
            }
        }
    }

    /// Retry the level link that asked for a save.
    pub fn save_completed(&mut self) -> Result<VerbOutcome> {
        let retry = self.pending_save.take().ok_or(RuntimeError::NoPendingSave)?;
        tracing::info!(target: "sim_runtime::simulation", verb = %retry.verb, "save completed, retrying");
        self.dispatch(retry.verb, retry.direct_object, &retry.effector, false)
    }

    /// Drop a pending retry when the player backs out of the save dialog.
    pub fn save_cancelled(&mut self) {
        if self.pending_save.take().is_some() {
            tracing::info!(target: "sim_runtime::simulation", "save cancelled");
        }
    }

    pub fn has_pending_save(&self) -> bool {
        self.pending_save.is_some()
    }

    // ========================================================================
    // Timers
    // ========================================================================

    /// Create and start a timer that fires `callback` with the world.
    pub fn schedule(
        &mut self,
        clock: ClockKind,
        duration: f64,
        callback: impl FnMut(&mut TimerScheduler<World>, &SimClock, TimerId, &mut World) + 'static,
    ) -> TimerId {
        let id = self.timers.create_with(clock, duration, callback);
        self.timers.start(id, &self.clock);
        id
    }

    pub fn timers(&self) -> &TimerScheduler<World> {
        &self.timers
    }

    pub fn timers_mut(&mut self) -> &mut TimerScheduler<World> {
        &mut self.timers
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn scoreboard(&self) -> &Scoreboard {
        &self.scoreboard
    }

    pub fn scoreboard_mut(&mut self) -> &mut Scoreboard {
        &mut self.scoreboard
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }
}
