use std::sync::Arc;

use parking_lot::Mutex;

use crate::models::GameStateSnapshot;

/// Latest successfully parsed snapshot plus the user-visible status line.
/// The lock is held only for the clone or the swap itself, never across
/// network work, so the presentation loop can poll freely.
#[derive(Clone, Default)]
pub struct StateStore {
    inner: Arc<Mutex<Shared>>,
}

#[derive(Default)]
struct Shared {
    snapshot: Option<GameStateSnapshot>,
    status: String,
}

impl StateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Independent copy; callers never see the store's internals move under
    /// them.
    pub fn get(&self) -> Option<GameStateSnapshot> {
        self.inner.lock().snapshot.clone()
    }

    pub fn set(&self, snapshot: GameStateSnapshot) {
        self.inner.lock().snapshot = Some(snapshot);
    }

    /// Session teardown: drop the snapshot so nothing stale survives a
    /// disconnect.
    pub fn clear(&self) {
        self.inner.lock().snapshot = None;
    }

    pub fn set_status(&self, status: impl Into<String>) {
        let status = status.into();

        tracing::debug!("status: {status}");

        self.inner.lock().status = status;
    }

    pub fn status(&self) -> String {
        self.inner.lock().status.clone()
    }
}

#[cfg(test)]
mod tests {
    use crate::models::PlayerState;

    use super::*;

    fn snapshot(deck_size: usize) -> GameStateSnapshot {
        GameStateSnapshot {
            table: vec![],
            player1: PlayerState {
                name: "P1".to_string(),
                hand: vec![],
                captured: 0,
                scopas: 0,
            },
            player2: PlayerState {
                name: "P2".to_string(),
                hand: vec![],
                captured: 0,
                scopas: 0,
            },
            current_player: "P1".to_string(),
            deck_size,
            round_over: false,
        }
    }

    #[test]
    fn test_set_replaces_wholesale() {
        let store = StateStore::new();

        assert_eq!(store.get(), None);

        store.set(snapshot(30));
        store.set(snapshot(27));

        assert_eq!(store.get().unwrap().deck_size, 27);
    }

    #[test]
    fn test_get_returns_an_independent_copy() {
        let store = StateStore::new();

        store.set(snapshot(30));

        let mut copy = store.get().unwrap();
        copy.deck_size = 0;

        assert_eq!(store.get().unwrap().deck_size, 30);
    }

    #[test]
    fn test_clear_and_status() {
        let store = StateStore::new();

        store.set(snapshot(30));
        store.set_status("Game started");
        store.clear();

        assert_eq!(store.get(), None);
        assert_eq!(store.status(), "Game started");
    }
}
