//! Copy-on-write holder for the live console state.
//!
//! A control surface on one thread publishes whole new [`ConsoleState`]
//! values; the tick loop on another takes one [`snapshot`](ControlStore::snapshot)
//! per tick and computes from it. Readers never block writers and never see
//! a half-applied edit.

use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::console::ConsoleState;

/// Lock-free shared console state.
#[derive(Debug)]
pub struct ControlStore {
    current: ArcSwap<ConsoleState>,
}

impl ControlStore {
    /// Creates a store holding `initial`.
    pub fn new(initial: ConsoleState) -> Self {
        Self {
            current: ArcSwap::from_pointee(initial),
        }
    }

    /// Replaces the whole state.
    pub fn publish(&self, state: ConsoleState) {
        self.current.store(Arc::new(state));
    }

    /// Applies `edit` to a copy of the current state and publishes it.
    ///
    /// Retries if another writer published in between, so `edit` may run
    /// more than once. Returns the state that was published.
    pub fn update<F>(&self, mut edit: F) -> ConsoleState
    where
        F: FnMut(&mut ConsoleState),
    {
        let mut published = ConsoleState::default();
        self.current.rcu(|current| {
            let mut next = **current;
            edit(&mut next);
            published = next;
            next
        });
        published
    }

    /// The state to use for one complete tick.
    pub fn snapshot(&self) -> Arc<ConsoleState> {
        self.current.load_full()
    }
}

impl Default for ControlStore {
    fn default() -> Self {
        Self::new(ConsoleState::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::{AuxBus, AuxTap};
    use std::thread;

    #[test]
    fn snapshot_is_isolated_from_later_publishes() {
        let store = ControlStore::default();
        let before = store.snapshot();
        store.update(|s| s.master.fader = 0.1);
        assert_eq!(before.master.fader, 0.8);
        assert_eq!(store.snapshot().master.fader, 0.1);
    }

    #[test]
    fn update_returns_published_state() {
        let store = ControlStore::default();
        let bus = AuxBus::ALL[2];
        let published = store.update(|s| s.toggle_aux_tap(bus));
        assert_eq!(published.aux_tap(bus), AuxTap::PostFader);
        assert_eq!(*store.snapshot(), published);
    }

    #[test]
    fn concurrent_updates_are_not_lost() {
        let store = Arc::new(ControlStore::default());
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    for _ in 0..250 {
                        store.update(|s| s.channels[i].aux[0] += 0.001);
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        let snap = store.snapshot();
        for c in &snap.channels {
            assert!((c.aux[0] - 0.25).abs() < 1e-3);
        }
    }
}
