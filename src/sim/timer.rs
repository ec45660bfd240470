//! Deferred actions on the virtual clock
//!
//! The tick polls this queue once per frame. Entries fire in `(fire_at, seq)`
//! order, so two actions due at the same millisecond run in the order they
//! were scheduled.

use super::state::EntityId;

/// Work that happens some time after it was requested
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerAction {
    /// Drop a dead zombie once its death pose has been on screen long enough
    RemoveZombie(EntityId),
    /// Periodic spawner; re-arms itself when it fires
    SpawnZombie,
    /// Rebuild the round after game over
    RestartRound,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledAction {
    pub fire_at_ms: u64,
    seq: u64,
    pub action: TimerAction,
}

#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    pending: Vec<ScheduledAction>,
    next_seq: u64,
}

impl Scheduler {
    /// Queue `action` to fire `delay_ms` after `now_ms`
    pub fn schedule(&mut self, now_ms: u64, delay_ms: u64, action: TimerAction) {
        let entry = ScheduledAction {
            fire_at_ms: now_ms.saturating_add(delay_ms),
            seq: self.next_seq,
            action,
        };
        self.next_seq += 1;
        self.pending.push(entry);
    }

    /// Remove and return the earliest entry due at or before `now_ms`
    pub fn pop_due(&mut self, now_ms: u64) -> Option<ScheduledAction> {
        let idx = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, e)| e.fire_at_ms <= now_ms)
            .min_by_key(|(_, e)| (e.fire_at_ms, e.seq))
            .map(|(i, _)| i)?;
        Some(self.pending.swap_remove(idx))
    }

    pub fn is_scheduled(&self, action: TimerAction) -> bool {
        self.pending.iter().any(|e| e.action == action)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nothing_due_early() {
        let mut s = Scheduler::default();
        s.schedule(0, 500, TimerAction::RemoveZombie(4));
        assert!(s.pop_due(499).is_none());
        assert_eq!(s.pop_due(500).map(|e| e.action), Some(TimerAction::RemoveZombie(4)));
        assert!(s.is_empty());
    }

    #[test]
    fn test_fires_in_time_then_schedule_order() {
        let mut s = Scheduler::default();
        s.schedule(0, 300, TimerAction::RestartRound);
        s.schedule(0, 100, TimerAction::RemoveZombie(9));
        s.schedule(0, 100, TimerAction::RemoveZombie(3));

        let order: Vec<_> = std::iter::from_fn(|| s.pop_due(1_000).map(|e| e.action)).collect();
        assert_eq!(
            order,
            vec![
                TimerAction::RemoveZombie(9),
                TimerAction::RemoveZombie(3),
                TimerAction::RestartRound,
            ]
        );
    }

    #[test]
    fn test_is_scheduled() {
        let mut s = Scheduler::default();
        assert!(!s.is_scheduled(TimerAction::RestartRound));
        s.schedule(10, 1000, TimerAction::RestartRound);
        assert!(s.is_scheduled(TimerAction::RestartRound));
        assert_eq!(s.len(), 1);
    }
}
