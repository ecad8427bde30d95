//! Logical key state.
//!
//! The simulation never sees raw device events. Hosts (keyboard, touch
//! buttons, tests) call [`InputState::set_key`] and the game reads the
//! result. Press durations are measured on the simulation clock, which the
//! game loop advances once per fixed step, so charge timing is as
//! deterministic as the rest of the simulation.

use std::collections::{HashMap, HashSet};
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Fire,
    Confirm,
    Back,
    Instructions,
    Retry,
    Title,
    Mute,
    Quit,
}

#[derive(Debug, Default)]
pub struct InputState {
    /// Held keys and the simulation time they went down at.
    down: HashMap<Key, Duration>,
    /// Presses not yet consumed by a menu.
    pressed: HashSet<Key>,
    now: Duration,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_key_down(&self, key: Key) -> bool {
        self.down.contains_key(&key)
    }

    /// How long `key` has been held, or zero when it is up.
    pub fn key_pressed_time(&self, key: Key) -> Duration {
        self.down
            .get(&key)
            .map(|&since| self.now.saturating_sub(since))
            .unwrap_or(Duration::ZERO)
    }

    /// Press or release a logical key. Re-pressing a held key keeps its
    /// original press time.
    pub fn set_key(&mut self, key: Key, pressed: bool) {
        if pressed {
            if !self.down.contains_key(&key) {
                self.down.insert(key, self.now);
                self.pressed.insert(key);
            }
        } else {
            self.down.remove(&key);
        }
    }

    /// True once per press; used for menu navigation.
    pub fn consume_press(&mut self, key: Key) -> bool {
        self.pressed.remove(&key)
    }

    /// Advance the simulation clock by one step.
    pub fn advance(&mut self, dt: Duration) {
        self.now += dt;
    }

    /// Forget presses nobody consumed, leaving held keys held.
    pub fn clear_presses(&mut self) {
        self.pressed.clear();
    }

    pub fn release_all(&mut self) {
        self.down.clear();
        self.pressed.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pressed_time_tracks_simulation_clock() {
        let mut input = InputState::new();
        input.set_key(Key::Fire, true);
        input.advance(Duration::from_millis(250));
        input.set_key(Key::Fire, true);
        input.advance(Duration::from_millis(250));
        assert_eq!(input.key_pressed_time(Key::Fire), Duration::from_millis(500));

        input.set_key(Key::Fire, false);
        assert!(!input.is_key_down(Key::Fire));
        assert_eq!(input.key_pressed_time(Key::Fire), Duration::ZERO);
    }

    #[test]
    fn consume_press_fires_once_per_press() {
        let mut input = InputState::new();
        input.set_key(Key::Confirm, true);
        assert!(input.consume_press(Key::Confirm));
        assert!(!input.consume_press(Key::Confirm));

        input.set_key(Key::Confirm, false);
        input.set_key(Key::Confirm, true);
        assert!(input.consume_press(Key::Confirm));
    }
}
