//! One-application-per-target-per-frame guard for cosmetic verbs.
//!
//! Several rules may fire the same cosmetic verb at one actor in a single
//! frame. Only the first one lands; the rest are refused until the frame
//! counter moves on.
use std::collections::HashSet;

use crate::state::EntityId;

/// Verb families that share a dedup ledger.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumCount)]
pub enum EffectFamily {
    Color,
    Glow,
    OpenClose,
}

impl EffectFamily {
    const fn index(self) -> usize {
        match self {
            Self::Color => 0,
            Self::Glow => 1,
            Self::OpenClose => 2,
        }
    }
}

#[derive(Clone, Debug, Default)]
struct Ledger {
    frame: Option<u64>,
    targets: HashSet<EntityId>,
}

#[derive(Clone, Debug, Default)]
pub struct DedupGuard {
    ledgers: [Ledger; <EffectFamily as strum::EnumCount>::COUNT],
}

impl DedupGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an application of `family` to `target` during `frame`.
    ///
    /// Returns false when the target was already recorded this frame.
    pub fn should_apply(&mut self, family: EffectFamily, target: EntityId, frame: u64) -> bool {
        let ledger = &mut self.ledgers[family.index()];
        if ledger.frame != Some(frame) {
            ledger.targets.clear();
            ledger.frame = Some(frame);
        }
        ledger.targets.insert(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_application_in_same_frame_is_refused() {
        let mut guard = DedupGuard::new();
        assert!(guard.should_apply(EffectFamily::Color, EntityId(1), 7));
        assert!(!guard.should_apply(EffectFamily::Color, EntityId(1), 7));
    }

    #[test]
    fn other_targets_are_independent() {
        let mut guard = DedupGuard::new();
        assert!(guard.should_apply(EffectFamily::Color, EntityId(1), 7));
        assert!(guard.should_apply(EffectFamily::Color, EntityId(2), 7));
    }

    #[test]
    fn next_frame_clears_ledger() {
        let mut guard = DedupGuard::new();
        assert!(guard.should_apply(EffectFamily::Glow, EntityId(1), 7));
        assert!(guard.should_apply(EffectFamily::Glow, EntityId(1), 8));
    }

    #[test]
    fn families_do_not_share_ledgers() {
        let mut guard = DedupGuard::new();
        assert!(guard.should_apply(EffectFamily::Color, EntityId(1), 7));
        assert!(guard.should_apply(EffectFamily::Glow, EntityId(1), 7));
        assert!(guard.should_apply(EffectFamily::OpenClose, EntityId(1), 7));
    }
}
