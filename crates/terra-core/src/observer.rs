//! Game state notifications.
//!
//! Observers register per player and receive JSON snapshots after every
//! successful game transition.

use crate::player::PlayerId;
use std::collections::BTreeMap;

/// Receives game state snapshots
pub trait TerraFuturaObserver {
    fn notify(&self, game_state: &str);
}

/// Registry of one observer per player
#[derive(Default)]
pub struct GameObserver {
    observers: BTreeMap<PlayerId, Box<dyn TerraFuturaObserver>>,
}

impl GameObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `observer` for `player`, replacing any previous one
    pub fn register_observer(&mut self, player: PlayerId, observer: Box<dyn TerraFuturaObserver>) {
        self.observers.insert(player, observer);
    }

    pub fn unregister_observer(&mut self, player: PlayerId) {
        self.observers.remove(&player);
    }

    /// Send each player's observer that player's own state
    pub fn notify_all(&self, states: &BTreeMap<PlayerId, String>) {
        for (player, observer) in &self.observers {
            if let Some(state) = states.get(player) {
                observer.notify(state);
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}
