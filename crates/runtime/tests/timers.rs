use std::cell::Cell;
use std::rc::Rc;

use sim_core::{ActorState, ClockKind, Effector, TimerState, Verb};
use sim_runtime::{RecordingHost, RuntimeConfig, Simulation};

fn simulation() -> Simulation<RecordingHost> {
    let config = RuntimeConfig {
        max_frame_seconds: 1.0,
        ..RuntimeConfig::default().with_seed(9)
    };
    Simulation::new(config, RecordingHost::new())
}

#[test]
fn one_shot_timer_fires_once_and_mutates_world() {
    let mut sim = simulation();
    let actor = sim.world_mut().spawn(ActorState::new);
    let fired = Rc::new(Cell::new(0));

    let counter = Rc::clone(&fired);
    sim.schedule(ClockKind::Game, 1.0, move |_, _, _, world| {
        counter.set(counter.get() + 1);
        if let Some(actor) = world.actor_mut(actor) {
            actor.deactivate();
        }
    });

    assert_eq!(sim.begin_tick(0.5).timers_fired, 0);
    assert_eq!(sim.begin_tick(0.5).timers_fired, 1);
    assert_eq!(sim.begin_tick(0.5).timers_fired, 0);
    assert_eq!(fired.get(), 1);

    let report = sim.end_tick();
    assert_eq!(report.removed, vec![actor]);
}

#[test]
fn zero_duration_is_treated_as_one_second() {
    let mut sim = simulation();
    let id = sim.schedule(ClockKind::Wall, 0.0, |_, _, _, _| {});

    assert_eq!(sim.timers().timer(id).map(|timer| timer.duration()), Some(1.0));
    assert_eq!(sim.begin_tick(0.5).timers_fired, 0);
    assert_eq!(sim.begin_tick(0.5).timers_fired, 1);
    assert_eq!(
        sim.timers().timer(id).map(|timer| timer.state()),
        Some(TimerState::Elapsed)
    );
}

#[test]
fn periodic_timer_restarts_from_callback() {
    let mut sim = simulation();
    let fired = Rc::new(Cell::new(0));

    let counter = Rc::clone(&fired);
    sim.schedule(ClockKind::Game, 1.0, move |timers, clock, id, _| {
        counter.set(counter.get() + 1);
        timers.restart(id, true, clock);
    });

    for _ in 0..6 {
        sim.begin_tick(0.5);
    }
    assert_eq!(fired.get(), 3);
}

#[test]
fn paused_game_clock_holds_game_timers() {
    let mut sim = simulation();
    let actor = sim.world_mut().spawn(ActorState::new);
    let game = sim.schedule(ClockKind::Game, 1.0, |_, _, _, _| {});
    let wall = sim.schedule(ClockKind::Wall, 1.0, |_, _, _, _| {});

    // A broken level link pauses the simulation.
    sim.dispatch(Verb::NextLevel, None, &Effector::new(actor), false)
        .expect("dispatch");

    sim.begin_tick(0.5);
    sim.begin_tick(0.5);
    assert!(sim.timers().is_registered(game));
    assert!(!sim.timers().is_registered(wall));

    sim.resume();
    sim.begin_tick(0.5);
    sim.begin_tick(0.5);
    assert!(!sim.timers().is_registered(game));
}

#[test]
fn paused_timer_keeps_remaining_time() {
    let mut sim = simulation();
    let id = sim.schedule(ClockKind::Wall, 1.0, |_, _, _, _| {});

    sim.begin_tick(0.5);
    let clock = sim.clock().clone();
    sim.timers_mut().pause(id, &clock);

    sim.begin_tick(1.0);
    sim.begin_tick(1.0);
    assert!(sim.timers().is_registered(id));

    let clock = sim.clock().clone();
    sim.timers_mut().resume(id, &clock);
    assert_eq!(
        sim.timers().timer(id).map(|timer| timer.remaining(clock.now(ClockKind::Wall))),
        Some(0.5)
    );
    assert_eq!(sim.begin_tick(0.5).timers_fired, 1);
}
