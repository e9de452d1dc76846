//! Actor-related state types.
//!
//! This module contains the per-actor record the dispatcher mutates:
//! - ActorState: identity, life-cycle, stats, look and private scores
//! - Movement / Chassis: spatial data used by effects and the squash range check
//! - LifeState: the staged life-cycle machine

use super::{Color, EntityId, Vec3};
use crate::modifier::SettingName;
use crate::score::ScoreSet;

/// Life-cycle state of an actor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LifeState {
    #[default]
    Active,
    Inactive,
    Paused,
    Dead,
    Squashed,
}

impl LifeState {
    /// Dead or squashed actors refuse further lethal verbs.
    #[inline]
    pub const fn is_down(self) -> bool {
        matches!(self, Self::Dead | Self::Squashed)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Movement {
    pub position: Vec3,
    pub velocity: Vec3,
}

/// How an actor's chassis reacts to damage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DamageProfile {
    #[default]
    Standard,
    Immune,
}

/// Physical shape of an actor.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Chassis {
    /// Collision center relative to the actor's position.
    pub collision_center: Vec3,
    pub collision_radius: f32,
    /// Reach beyond both collision radii within which squash can land.
    pub grab_range: f32,
    /// Vertical squash factor applied to the collision center.
    pub squash_scale: f32,
    pub damage: DamageProfile,
}

impl Chassis {
    pub fn new(collision_radius: f32) -> Self {
        Self {
            collision_center: Vec3::ZERO,
            collision_radius,
            grab_range: 0.5,
            squash_scale: 1.0,
            damage: DamageProfile::Standard,
        }
    }

    pub fn with_grab_range(mut self, grab_range: f32) -> Self {
        self.grab_range = grab_range;
        self
    }

    pub fn with_damage(mut self, damage: DamageProfile) -> Self {
        self.damage = damage;
        self
    }
}

impl Default for Chassis {
    fn default() -> Self {
        Self::new(0.5)
    }
}

/// Health and the named numeric settings reachable from score verbs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorStats {
    pub hit_points: i32,
    pub max_hit_points: i32,
    pub blip_damage: i32,
    pub missile_damage: i32,
}

impl Default for ActorStats {
    fn default() -> Self {
        Self {
            hit_points: 50,
            max_hit_points: 50,
            blip_damage: 10,
            missile_damage: 20,
        }
    }
}

/// Look and stats captured at spawn, restored by the reset verb.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
struct Initial {
    color: Color,
    stats: ActorStats,
    position: Vec3,
    open: bool,
}

/// Complete record of one scripted actor.
///
/// # Invariants
///
/// - `pending_state` differs from `state` only between a staged transition and
///   the next world refresh
/// - `stats.hit_points` stays within `0..=stats.max_hit_points`
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorState {
    pub id: EntityId,
    state: LifeState,
    pending_state: LifeState,

    /// Refuses lethal and damage verbs issued by any other actor.
    pub invulnerable: bool,
    /// Forces quiet on verbs that honor it.
    pub mute: bool,

    pub stats: ActorStats,
    pub movement: Movement,
    pub chassis: Chassis,

    pub color: Color,
    pub glow: Option<Color>,
    pub open: bool,

    /// Scores visible only to this actor's scripts.
    pub private_scores: ScoreSet,

    initial: Initial,
}

impl ActorState {
    pub fn new(id: EntityId) -> Self {
        let stats = ActorStats::default();
        Self {
            id,
            state: LifeState::Active,
            pending_state: LifeState::Active,
            invulnerable: false,
            mute: false,
            stats,
            movement: Movement::default(),
            chassis: Chassis::default(),
            color: Color::White,
            glow: None,
            open: false,
            private_scores: ScoreSet::default(),
            initial: Initial {
                color: Color::White,
                stats,
                position: Vec3::ZERO,
                open: false,
            },
        }
    }

    pub fn at(mut self, position: Vec3) -> Self {
        self.movement.position = position;
        self.initial.position = position;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self.initial.color = color;
        self
    }

    pub fn with_stats(mut self, stats: ActorStats) -> Self {
        self.stats = stats;
        self.initial.stats = stats;
        self
    }

    pub fn with_chassis(mut self, chassis: Chassis) -> Self {
        self.chassis = chassis;
        self
    }

    pub fn invulnerable(mut self, invulnerable: bool) -> Self {
        self.invulnerable = invulnerable;
        self
    }

    pub fn muted(mut self, mute: bool) -> Self {
        self.mute = mute;
        self
    }

    // ========================================================================
    // Life-cycle
    // ========================================================================

    #[inline]
    pub fn state(&self) -> LifeState {
        self.state
    }

    #[inline]
    pub fn pending_state(&self) -> LifeState {
        self.pending_state
    }

    /// Stage a transition. It becomes the current state at the next refresh.
    ///
    /// A staged removal is final for the tick; only [`Self::force_state`]
    /// overrides it. Returns true when the staged value changed.
    pub fn set_pending_state(&mut self, state: LifeState) -> bool {
        if self.pending_state == LifeState::Inactive {
            return false;
        }
        let changed = self.pending_state != state;
        self.pending_state = state;
        changed
    }

    /// Write the current state immediately, bypassing staging.
    pub fn force_state(&mut self, state: LifeState) {
        self.state = state;
        self.pending_state = state;
    }

    /// True when the actor is dead or squashed, or is staged to be.
    pub fn is_down(&self) -> bool {
        self.state.is_down() || self.pending_state.is_down()
    }

    /// True when the actor is out of the live set, or is staged to leave it.
    pub fn is_removed(&self) -> bool {
        self.state == LifeState::Inactive || self.pending_state == LifeState::Inactive
    }

    /// Stage removal from the live set.
    pub fn deactivate(&mut self) -> bool {
        self.set_pending_state(LifeState::Inactive)
    }

    pub(crate) fn apply_pending(&mut self) -> bool {
        if self.state == self.pending_state {
            return false;
        }
        self.state = self.pending_state;
        true
    }

    /// Restore spawn look, stats and position and make the actor active now.
    pub fn reset_to_initial(&mut self) {
        self.color = self.initial.color;
        self.stats = self.initial.stats;
        self.movement = Movement {
            position: self.initial.position,
            velocity: Vec3::ZERO,
        };
        self.glow = None;
        self.open = self.initial.open;
        self.force_state(LifeState::Active);
    }

    // ========================================================================
    // Geometry
    // ========================================================================

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.movement.position
    }

    /// Collision center in world space, honoring the vertical squash factor.
    pub fn world_collision_center(&self) -> Vec3 {
        let local = self.chassis.collision_center;
        self.movement.position + Vec3::new(local.x, local.y, local.z * self.chassis.squash_scale)
    }

    /// Distance this actor can reach to grab `other`.
    pub fn total_grab_range(&self, other: &ActorState) -> f32 {
        self.chassis.grab_range + self.chassis.collision_radius + other.chassis.collision_radius
    }

    // ========================================================================
    // Settings
    // ========================================================================

    pub fn setting(&self, name: SettingName) -> i32 {
        match name {
            SettingName::MaxHealth => self.stats.max_hit_points,
            SettingName::BlipDamage => self.stats.blip_damage,
            SettingName::MissileDamage => self.stats.missile_damage,
        }
    }

    pub fn set_setting(&mut self, name: SettingName, value: i32) {
        match name {
            SettingName::MaxHealth => {
                self.stats.max_hit_points = value.max(0);
                self.stats.hit_points = self.stats.hit_points.min(self.stats.max_hit_points);
            }
            SettingName::BlipDamage => self.stats.blip_damage = value,
            SettingName::MissileDamage => self.stats.missile_damage = value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn staged_transition_waits_for_apply() {
        let mut actor = ActorState::new(EntityId(1));
        assert!(actor.set_pending_state(LifeState::Dead));
        assert_eq!(actor.state(), LifeState::Active);
        assert!(actor.is_down());
        assert!(actor.apply_pending());
        assert_eq!(actor.state(), LifeState::Dead);
        assert!(!actor.apply_pending());
    }

    #[test]
    fn force_state_overrides_pending() {
        let mut actor = ActorState::new(EntityId(1));
        actor.set_pending_state(LifeState::Squashed);
        actor.force_state(LifeState::Active);
        assert!(!actor.apply_pending());
        assert_eq!(actor.state(), LifeState::Active);
    }

    #[test]
    fn staged_removal_is_not_overwritten() {
        let mut actor = ActorState::new(EntityId(1));
        assert!(actor.deactivate());
        assert!(!actor.set_pending_state(LifeState::Dead));
        assert_eq!(actor.pending_state(), LifeState::Inactive);
        assert!(actor.is_removed());

        actor.reset_to_initial();
        assert!(!actor.is_removed());
    }

    #[test]
    fn lowering_max_health_clamps_hit_points() {
        let mut actor = ActorState::new(EntityId(1));
        actor.set_setting(SettingName::MaxHealth, 20);
        assert_eq!(actor.stats.max_hit_points, 20);
        assert_eq!(actor.stats.hit_points, 20);
    }

    #[test]
    fn reset_restores_spawn_look() {
        let mut actor = ActorState::new(EntityId(3))
            .with_color(Color::Blue)
            .at(Vec3::new(1.0, 2.0, 0.0));
        actor.color = Color::Red;
        actor.stats.hit_points = 1;
        actor.movement.position = Vec3::splat(9.0);
        actor.set_pending_state(LifeState::Dead);

        actor.reset_to_initial();

        assert_eq!(actor.color, Color::Blue);
        assert_eq!(actor.stats.hit_points, 50);
        assert_eq!(actor.position(), Vec3::new(1.0, 2.0, 0.0));
        assert_eq!(actor.state(), LifeState::Active);
        assert_eq!(actor.pending_state(), LifeState::Active);
    }

    #[test]
    fn grab_range_includes_both_radii() {
        let a = ActorState::new(EntityId(1)).with_chassis(Chassis::new(0.5).with_grab_range(1.0));
        let b = ActorState::new(EntityId(2)).with_chassis(Chassis::new(0.25));
        assert!((a.total_grab_range(&b) - 1.75).abs() < f32::EPSILON);
    }
}
