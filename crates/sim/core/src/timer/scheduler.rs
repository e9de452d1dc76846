use std::fmt;

use super::{ClockKind, SimClock, Timer, TimerId};

/// Fired once when a timer elapses.
///
/// The callback receives the scheduler itself so it can restart, clear or
/// create timers, plus the caller's context.
pub type TimerCallback<C> = Box<dyn FnMut(&mut TimerScheduler<C>, &SimClock, TimerId, &mut C)>;

struct Slot<C> {
    timer: Timer,
    callback: Option<TimerCallback<C>>,
}

struct Entry<C> {
    generation: u32,
    slot: Option<Slot<C>>,
}

/// Owns timers and fires the registered ones as the clock passes them.
///
/// Removed slots are reused by later timers. A stale id stays stale because
/// its generation no longer matches.
pub struct TimerScheduler<C = ()> {
    entries: Vec<Entry<C>>,
    free: Vec<u32>,
    registered: Vec<TimerId>,
}

impl<C> TimerScheduler<C> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            free: Vec::new(),
            registered: Vec::new(),
        }
    }

    pub fn create(&mut self, clock: ClockKind, duration: f64) -> TimerId {
        self.insert(Timer::new(clock, duration), None)
    }

    pub fn create_with(
        &mut self,
        clock: ClockKind,
        duration: f64,
        callback: impl FnMut(&mut TimerScheduler<C>, &SimClock, TimerId, &mut C) + 'static,
    ) -> TimerId {
        self.insert(Timer::new(clock, duration), Some(Box::new(callback)))
    }

    fn insert(&mut self, timer: Timer, callback: Option<TimerCallback<C>>) -> TimerId {
        let slot = Some(Slot { timer, callback });
        if let Some(index) = self.free.pop() {
            let entry = &mut self.entries[index as usize];
            entry.generation = entry.generation.wrapping_add(1);
            entry.slot = slot;
            return TimerId {
                index,
                generation: entry.generation,
            };
        }
        let index = self.entries.len() as u32;
        self.entries.push(Entry {
            generation: 0,
            slot,
        });
        TimerId {
            index,
            generation: 0,
        }
    }

    pub fn set_callback(
        &mut self,
        id: TimerId,
        callback: impl FnMut(&mut TimerScheduler<C>, &SimClock, TimerId, &mut C) + 'static,
    ) {
        if let Some(slot) = self.slot_mut(id) {
            slot.callback = Some(Box::new(callback));
        }
    }

    /// Drop a timer entirely and free its slot.
    pub fn remove(&mut self, id: TimerId) {
        self.unregister(id);
        let Some(entry) = self.entry_mut(id) else {
            return;
        };
        if entry.slot.take().is_some() {
            self.free.push(id.index);
        }
    }

    pub fn timer(&self, id: TimerId) -> Option<&Timer> {
        self.entries
            .get(id.index as usize)
            .filter(|entry| entry.generation == id.generation)
            .and_then(|entry| entry.slot.as_ref())
            .map(|slot| &slot.timer)
    }

    /// Live timers, registered or not.
    pub fn len(&self) -> usize {
        self.entries.len() - self.free.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn entry_mut(&mut self, id: TimerId) -> Option<&mut Entry<C>> {
        self.entries
            .get_mut(id.index as usize)
            .filter(|entry| entry.generation == id.generation)
    }

    fn slot_mut(&mut self, id: TimerId) -> Option<&mut Slot<C>> {
        self.entry_mut(id).and_then(|entry| entry.slot.as_mut())
    }

    // ========================================================================
    // Registration
    // ========================================================================

    /// Idempotent.
    pub fn register(&mut self, id: TimerId) {
        if self.timer(id).is_some() && !self.is_registered(id) {
            self.registered.push(id);
        }
    }

    /// No-op when absent.
    pub fn unregister(&mut self, id: TimerId) {
        self.registered.retain(|registered| *registered != id);
    }

    pub fn is_registered(&self, id: TimerId) -> bool {
        self.registered.contains(&id)
    }

    pub fn registered_count(&self) -> usize {
        self.registered.len()
    }

    // ========================================================================
    // Timer control
    // ========================================================================

    /// Capture the current time and start counting down.
    pub fn start(&mut self, id: TimerId, clock: &SimClock) {
        if let Some(slot) = self.slot_mut(id) {
            let now = clock.now(slot.timer.clock());
            slot.timer.start(now);
            self.register(id);
        }
    }

    pub fn restart(&mut self, id: TimerId, sync: bool, clock: &SimClock) {
        if let Some(slot) = self.slot_mut(id) {
            let now = clock.now(slot.timer.clock());
            slot.timer.restart(sync, now);
            self.register(id);
        }
    }

    /// Elapse without firing the callback.
    pub fn clear(&mut self, id: TimerId) {
        if let Some(slot) = self.slot_mut(id) {
            slot.timer.clear();
        }
        self.unregister(id);
    }

    pub fn pause(&mut self, id: TimerId, clock: &SimClock) {
        if let Some(slot) = self.slot_mut(id) {
            let now = clock.now(slot.timer.clock());
            slot.timer.pause(now);
        }
    }

    pub fn resume(&mut self, id: TimerId, clock: &SimClock) {
        if let Some(slot) = self.slot_mut(id) {
            let now = clock.now(slot.timer.clock());
            slot.timer.resume(now);
        }
    }

    // ========================================================================
    // Tick
    // ========================================================================

    /// Fire every registered timer whose duration has passed.
    ///
    /// Iterates over the registered set captured on entry. A timer a callback
    /// unregisters is skipped; one it re-registers waits for the next call.
    /// Returns the number of callbacks run.
    pub fn advance(&mut self, clock: &SimClock, ctx: &mut C) -> usize {
        let snapshot = self.registered.clone();
        let mut fired = 0;

        for id in snapshot {
            if !self.is_registered(id) {
                continue;
            }
            let Some(slot) = self.slot_mut(id) else {
                continue;
            };
            let now = clock.now(slot.timer.clock());
            if !slot.timer.is_due(now) {
                continue;
            }

            slot.timer.clear();
            let callback = slot.callback.take();
            self.unregister(id);
            fired += 1;

            tracing::trace!(target: "sim_core::timer", timer = id.index(), now, "timer elapsed");

            if let Some(mut callback) = callback {
                callback(self, clock, id, ctx);
                if let Some(slot) = self.slot_mut(id) {
                    slot.callback.get_or_insert(callback);
                }
            }
        }

        fired
    }
}

impl<C> Default for TimerScheduler<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> fmt::Debug for TimerScheduler<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimerScheduler")
            .field("timers", &self.len())
            .field("registered", &self.registered)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clock_at(seconds: f64) -> SimClock {
        let mut clock = SimClock::unclamped();
        clock.update(seconds);
        clock
    }

    #[test]
    fn zero_duration_timer_fires_once_at_one_second() {
        let mut scheduler: TimerScheduler<u32> = TimerScheduler::new();
        let id = scheduler.create_with(ClockKind::Game, 0.0, |_, _, _, fired: &mut u32| {
            *fired += 1;
        });
        scheduler.start(id, &SimClock::unclamped());

        let mut fired = 0;
        let clock = clock_at(1.0);
        assert_eq!(scheduler.advance(&clock, &mut fired), 1);
        assert_eq!(scheduler.advance(&clock, &mut fired), 0);
        assert_eq!(fired, 1);
        assert!(!scheduler.is_registered(id));
    }

    #[test]
    fn timer_not_yet_due_stays_registered() {
        let mut scheduler: TimerScheduler = TimerScheduler::new();
        let id = scheduler.create(ClockKind::Game, 2.0);
        scheduler.start(id, &SimClock::unclamped());
        assert_eq!(scheduler.advance(&clock_at(1.5), &mut ()), 0);
        assert!(scheduler.is_registered(id));
    }

    #[test]
    fn register_is_idempotent_and_unregister_tolerates_absence() {
        let mut scheduler: TimerScheduler = TimerScheduler::new();
        let id = scheduler.create(ClockKind::Game, 1.0);
        scheduler.register(id);
        scheduler.register(id);
        assert_eq!(scheduler.registered_count(), 1);
        scheduler.unregister(id);
        scheduler.unregister(id);
        assert_eq!(scheduler.registered_count(), 0);
    }

    #[test]
    fn clear_elapses_without_callback() {
        let mut scheduler: TimerScheduler<u32> = TimerScheduler::new();
        let id = scheduler.create_with(ClockKind::Game, 1.0, |_, _, _, fired: &mut u32| {
            *fired += 1;
        });
        scheduler.start(id, &SimClock::unclamped());
        scheduler.clear(id);

        let mut fired = 0;
        scheduler.advance(&clock_at(5.0), &mut fired);
        assert_eq!(fired, 0);
        assert_eq!(
            scheduler.timer(id).map(Timer::state),
            Some(crate::timer::TimerState::Elapsed)
        );
    }

    #[test]
    fn callback_can_unregister_a_later_timer() {
        let mut scheduler: TimerScheduler<Vec<TimerId>> = TimerScheduler::new();
        let second = scheduler.create_with(ClockKind::Game, 1.0, |_, _, id, log: &mut Vec<TimerId>| {
            log.push(id);
        });
        let first = scheduler.create_with(
            ClockKind::Game,
            1.0,
            move |scheduler, _, id, log: &mut Vec<TimerId>| {
                log.push(id);
                scheduler.unregister(second);
            },
        );
        let start = SimClock::unclamped();
        scheduler.start(first, &start);
        scheduler.start(second, &start);

        let mut log = Vec::new();
        scheduler.advance(&clock_at(1.0), &mut log);
        assert_eq!(log, vec![first]);
    }

    #[test]
    fn periodic_callback_rearms_for_next_advance() {
        let mut scheduler: TimerScheduler<u32> = TimerScheduler::new();
        let id = scheduler.create_with(
            ClockKind::Game,
            1.0,
            |scheduler, clock, id, fired: &mut u32| {
                *fired += 1;
                scheduler.restart(id, true, clock);
            },
        );
        let mut clock = SimClock::unclamped();
        scheduler.start(id, &clock);

        let mut fired = 0;
        for _ in 0..3 {
            clock.update(1.0);
            scheduler.advance(&clock, &mut fired);
        }
        assert_eq!(fired, 3);
        assert!(scheduler.is_registered(id));
    }

    #[test]
    fn removed_slots_are_reused_and_old_ids_go_stale() {
        let mut scheduler: TimerScheduler = TimerScheduler::new();
        let clock = SimClock::unclamped();
        let first = scheduler.create(ClockKind::Game, 1.0);
        scheduler.start(first, &clock);

        for _ in 0..4 {
            let id = scheduler.create(ClockKind::Wall, 2.0);
            scheduler.remove(id);
        }
        scheduler.remove(first);
        let second = scheduler.create(ClockKind::Wall, 3.0);

        assert_eq!(scheduler.entries.len(), 2);
        assert_eq!(scheduler.len(), 1);
        assert_eq!(second.index(), first.index());
        assert_ne!(second, first);
        assert!(scheduler.timer(first).is_none());
        assert!(!scheduler.is_registered(first));

        // A stale handle must not touch the timer that took its slot.
        scheduler.start(first, &clock);
        scheduler.remove(first);
        assert!(!scheduler.is_registered(second));
        assert!(scheduler.timer(second).is_some());
    }

    #[test]
    fn paused_timer_is_skipped() {
        let mut scheduler: TimerScheduler = TimerScheduler::new();
        let id = scheduler.create(ClockKind::Game, 1.0);
        let start = SimClock::unclamped();
        scheduler.start(id, &start);
        scheduler.pause(id, &start);
        assert_eq!(scheduler.advance(&clock_at(10.0), &mut ()), 0);
        assert!(scheduler.is_registered(id));
    }
}
