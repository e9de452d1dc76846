use std::collections::BTreeMap;

use super::{ActorState, EntityId, LifeState};

/// Summary of one refresh pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RefreshReport {
    /// Actors whose staged state became current.
    pub applied: Vec<EntityId>,
    /// Actors that went inactive and left the live set.
    pub removed: Vec<EntityId>,
}

/// Live set of actors.
///
/// Staged transitions (kill, squash, deactivate) are applied only in
/// [`World::refresh`], which the runtime calls once per tick after all verbs
/// have run.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct World {
    actors: BTreeMap<EntityId, ActorState>,
    next_entity_id: u32,
    paused: bool,
}

impl World {
    pub fn new() -> Self {
        Self {
            actors: BTreeMap::new(),
            next_entity_id: 1,
            paused: false,
        }
    }

    /// Allocate a fresh id and insert the actor built from it.
    pub fn spawn(&mut self, build: impl FnOnce(EntityId) -> ActorState) -> EntityId {
        let id = EntityId(self.next_entity_id);
        self.next_entity_id += 1;
        self.actors.insert(id, build(id));
        id
    }

    /// Insert an actor under its own id, replacing any previous occupant.
    pub fn insert(&mut self, actor: ActorState) {
        self.next_entity_id = self.next_entity_id.max(actor.id.0 + 1);
        self.actors.insert(actor.id, actor);
    }

    pub fn actor(&self, id: EntityId) -> Option<&ActorState> {
        self.actors.get(&id)
    }

    pub fn actor_mut(&mut self, id: EntityId) -> Option<&mut ActorState> {
        self.actors.get_mut(&id)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.actors.contains_key(&id)
    }

    pub fn actors(&self) -> impl Iterator<Item = &ActorState> {
        self.actors.values()
    }

    pub fn len(&self) -> usize {
        self.actors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Freeze every active actor immediately.
    pub fn pause_all(&mut self) {
        self.paused = true;
        for actor in self.actors.values_mut() {
            if actor.state() == LifeState::Active {
                swap_keeping_staged(actor, LifeState::Active, LifeState::Paused);
            }
        }
    }

    pub fn resume_all(&mut self) {
        self.paused = false;
        for actor in self.actors.values_mut() {
            if actor.state() == LifeState::Paused {
                swap_keeping_staged(actor, LifeState::Paused, LifeState::Active);
            }
        }
    }

    /// Apply every staged transition and drop inactive actors.
    pub fn refresh(&mut self) -> RefreshReport {
        let mut report = RefreshReport::default();
        for actor in self.actors.values_mut() {
            if actor.apply_pending() {
                report.applied.push(actor.id);
            }
            if actor.state() == LifeState::Inactive {
                report.removed.push(actor.id);
            }
        }
        for id in &report.removed {
            self.actors.remove(id);
        }
        if !report.applied.is_empty() {
            tracing::debug!(
                target: "sim_core::world",
                applied = report.applied.len(),
                removed = report.removed.len(),
                "world refreshed"
            );
        }
        report
    }
}

/// Swap the current state while keeping a staged transition other than `from`.
fn swap_keeping_staged(actor: &mut ActorState, from: LifeState, to: LifeState) {
    let staged = actor.pending_state();
    actor.force_state(to);
    if staged != from {
        actor.set_pending_state(staged);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_allocates_sequential_ids() {
        let mut world = World::new();
        let a = world.spawn(ActorState::new);
        let b = world.spawn(ActorState::new);
        assert_eq!(a, EntityId(1));
        assert_eq!(b, EntityId(2));
    }

    #[test]
    fn deactivated_actor_leaves_only_at_refresh() {
        let mut world = World::new();
        let id = world.spawn(ActorState::new);
        world.actor_mut(id).map(ActorState::deactivate);
        assert!(world.contains(id));

        let report = world.refresh();
        assert_eq!(report.removed, vec![id]);
        assert!(!world.contains(id));
    }

    #[test]
    fn pause_and_resume_round_trip_active_actors() {
        let mut world = World::new();
        let live = world.spawn(ActorState::new);
        let dead = world.spawn(|id| {
            let mut actor = ActorState::new(id);
            actor.force_state(LifeState::Dead);
            actor
        });

        world.pause_all();
        assert_eq!(world.actor(live).map(ActorState::state), Some(LifeState::Paused));
        assert_eq!(world.actor(dead).map(ActorState::state), Some(LifeState::Dead));

        world.resume_all();
        assert_eq!(world.actor(live).map(ActorState::state), Some(LifeState::Active));
    }

    #[test]
    fn pause_keeps_staged_death() {
        let mut world = World::new();
        let id = world.spawn(ActorState::new);
        world
            .actor_mut(id)
            .map(|actor| actor.set_pending_state(LifeState::Dead));

        world.pause_all();
        assert_eq!(world.actor(id).map(ActorState::state), Some(LifeState::Paused));
        world.refresh();
        assert_eq!(world.actor(id).map(ActorState::state), Some(LifeState::Dead));
    }
}
