//! Scripted demo level.
//!
//! A hero, a goblin and a crate. The hero scores, paints and fights the
//! goblin, talks a little, then takes the level link. The level has unsaved
//! edits, so the link goes through the save prompt and retries.
use anyhow::{Context, Result};
use sim_core::{
    ActorState, ActorStats, Cause, Chassis, Color, ColorChoice, DamageProfile, DialogAction,
    Effector, EntityId, LevelId, LinkDirection, Modifier, SayMode, SayScript, ScoreBucket,
    SettingName, Vec3, Verb,
};
use sim_runtime::{LoggingHost, RecordingHost, Simulation};

const FRAME_SECONDS: f64 = 1.0 / 30.0;
const NEXT_LEVEL: LevelId = LevelId(0x5EED);

type DemoSim = Simulation<LoggingHost<RecordingHost>>;

pub fn host() -> RecordingHost {
    RecordingHost::new()
        .with_link(LinkDirection::Next, NEXT_LEVEL)
        .with_unsaved_changes()
}

struct Cast {
    hero: EntityId,
    goblin: EntityId,
    prop: EntityId,
}

fn spawn_cast(sim: &mut DemoSim) -> Cast {
    let world = sim.world_mut();
    let hero = world.spawn(|id| {
        ActorState::new(id)
            .with_color(Color::Blue)
            .with_chassis(Chassis::new(0.6).with_grab_range(1.0))
    });
    let goblin = world.spawn(|id| {
        ActorState::new(id)
            .at(Vec3::new(1.5, 0.0, 0.0))
            .with_color(Color::Green)
            .with_stats(ActorStats {
                hit_points: 30,
                max_hit_points: 30,
                ..ActorStats::default()
            })
    });
    let prop = world.spawn(|id| {
        ActorState::new(id)
            .at(Vec3::new(-2.0, 0.0, 0.0))
            .with_chassis(Chassis::default().with_damage(DamageProfile::Immune))
    });
    Cast { hero, goblin, prop }
}

/// One scripted command: verb, direct object, effector.
type Command = (Verb, Option<EntityId>, Effector);

fn script(cast: &Cast) -> Vec<Vec<Command>> {
    let Cast { hero, goblin, prop } = *cast;
    let red = ScoreBucket::Color(Color::Red);

    vec![
        // Frame 1: score and greet.
        vec![
            (
                Verb::Score,
                None,
                Effector::new(hero).with_modifiers([
                    Modifier::ScoreBucket {
                        bucket: red,
                        private: false,
                    },
                    Modifier::Score { points: 10 },
                ]),
            ),
            (
                Verb::Say,
                None,
                Effector::new(hero).saying(SayScript::new(
                    SayMode::Sequential,
                    ["Hello!", "", "Watch this."],
                )),
            ),
        ],
        // Frame 2: two rules paint the goblin; only the first lands.
        vec![
            (
                Verb::Color,
                Some(goblin),
                Effector::new(hero).with_modifiers([Modifier::Color(ColorChoice::Fixed(
                    Color::Yellow,
                ))]),
            ),
            (
                Verb::Color,
                Some(goblin),
                Effector::new(hero).with_modifiers([Modifier::Color(ColorChoice::Random)]),
            ),
            (
                Verb::Damage,
                Some(prop),
                Effector::new(hero).with_modifiers([Modifier::Score { points: 5 }]),
            ),
        ],
        // Frame 3: a quarter of max health as damage, then a bump squash.
        vec![
            (
                Verb::Damage,
                Some(goblin),
                Effector::new(hero).with_modifiers([
                    Modifier::Setting {
                        name: SettingName::MaxHealth,
                    },
                    Modifier::Percent,
                    Modifier::Score { points: 25 },
                ]),
            ),
            (
                Verb::Squash,
                Some(goblin),
                Effector::new(hero).sensing(goblin).caused_by(Cause::Bump),
            ),
            (
                Verb::Say,
                None,
                Effector::new(hero).saying(SayScript::new(
                    SayMode::Sequential,
                    ["Hello!", "", "Watch this."],
                )),
            ),
        ],
        // Frame 4: leave.
        vec![(Verb::NextLevel, None, Effector::new(hero))],
    ]
}

pub fn run(sim: &mut DemoSim) -> Result<()> {
    let cast = spawn_cast(sim);

    for frame in script(&cast) {
        sim.begin_tick(FRAME_SECONDS);
        for (verb, direct_object, effector) in &frame {
            let outcome = sim.dispatch(*verb, *direct_object, effector, false)?;
            tracing::info!(%verb, supported = outcome.supported, died = outcome.died, "command");
        }
        sim.end_tick();
    }

    answer_save_prompt(sim)
}

/// Press "yes" on the save prompt, finish the save and retry the link.
fn answer_save_prompt(sim: &mut DemoSim) -> Result<()> {
    let Some(dialog) = sim.host().inner().last_dialog().cloned() else {
        return Ok(());
    };
    let yes = dialog
        .buttons
        .iter()
        .position(|button| matches!(button.action, DialogAction::SaveThenRetry(_)));
    let Some(yes) = yes else {
        return Ok(());
    };

    sim.press_dialog_button(&dialog, yes)?;
    sim.host_mut().inner_mut().mark_saved();
    let outcome = sim.save_completed().context("retrying level link")?;
    tracing::info!(supported = outcome.supported, "level link retried");
    Ok(())
}
