//! Authoritative actor state.
//!
//! This module owns the actor records the dispatcher mutates and the world
//! container that applies staged life-cycle transitions. Runtime layers query
//! this state but mutate it exclusively through verbs, timer callbacks or
//! [`World::refresh`].
pub mod actor;
pub mod color;
pub mod world;

use std::fmt;

pub use actor::{ActorState, ActorStats, Chassis, DamageProfile, LifeState, Movement};
pub use color::{Color, ColorChoice};
pub use glam::Vec3;
pub use world::{RefreshReport, World};

/// Unique identifier for any actor tracked in the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityId(pub u32);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
