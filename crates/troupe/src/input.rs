//! Keyboard input state and input sources.
//!
//! An [`InputSource`] produces raw [`InputEvent`]s once per frame. The game
//! loop folds them into an [`InputState`], which actors query through
//! [`pressed`](InputState::pressed) and friends while handling input.

use std::collections::{HashSet, VecDeque};

pub use winit::keyboard::KeyCode;

/// Held keys plus this frame's edges.
#[derive(Debug, Default)]
struct KeySet {
    held: HashSet<KeyCode>,
    down_edges: HashSet<KeyCode>,
    up_edges: HashSet<KeyCode>,
}

impl KeySet {
    /// Key-repeat `KeyDown`s for a held key are not new presses.
    fn key_down(&mut self, key: KeyCode) {
        if self.held.insert(key) {
            self.down_edges.insert(key);
        }
    }

    fn key_up(&mut self, key: KeyCode) {
        if self.held.remove(&key) {
            self.up_edges.insert(key);
        }
    }

    fn start_frame(&mut self) {
        self.down_edges.clear();
        self.up_edges.clear();
    }
}

/// A raw event reported by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// The user asked to close the game (window close button, signal).
    Quit,
    KeyDown(KeyCode),
    KeyUp(KeyCode),
}

/// Where input events come from: a window, a replay, a test script.
pub trait InputSource {
    /// Drain every event that arrived since the last call.
    fn poll_events(&mut self) -> Vec<InputEvent>;
}

/// Keyboard snapshot for the current frame, plus the quit flag.
#[derive(Default)]
pub struct InputState {
    keys: KeySet,
    quit_requested: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new frame and fold this frame's events into the snapshot.
    pub fn apply(&mut self, events: &[InputEvent]) {
        self.keys.start_frame();
        for event in events {
            match *event {
                InputEvent::Quit => self.quit_requested = true,
                InputEvent::KeyDown(key) => self.keys.key_down(key),
                InputEvent::KeyUp(key) => self.keys.key_up(key),
            }
        }
    }

    /// Returns `true` if the key is currently held down.
    pub fn pressed(&self, key: KeyCode) -> bool {
        self.keys.held.contains(&key)
    }

    /// Returns `true` if the key was pressed this frame.
    pub fn just_pressed(&self, key: KeyCode) -> bool {
        self.keys.down_edges.contains(&key)
    }

    /// Returns `true` if the key was released this frame.
    pub fn just_released(&self, key: KeyCode) -> bool {
        self.keys.up_edges.contains(&key)
    }

    /// Returns `true` once a [`InputEvent::Quit`] has been seen.
    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }
}

/// Replays queued event batches, one batch per [`poll_events`](InputSource::poll_events) call.
///
/// Once the script runs dry every poll returns nothing.
#[derive(Debug, Default)]
pub struct ScriptedInput {
    frames: VecDeque<Vec<InputEvent>>,
}

impl ScriptedInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the events delivered on the next unscripted frame.
    pub fn push_frame(&mut self, events: Vec<InputEvent>) -> &mut Self {
        self.frames.push_back(events);
        self
    }

    /// Queue `count` frames with no events.
    pub fn idle(&mut self, count: usize) -> &mut Self {
        for _ in 0..count {
            self.frames.push_back(Vec::new());
        }
        self
    }

    /// Frames still queued.
    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl InputSource for ScriptedInput {
    fn poll_events(&mut self) -> Vec<InputEvent> {
        self.frames.pop_front().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_then_hold() {
        let mut state = InputState::new();
        state.apply(&[InputEvent::KeyDown(KeyCode::KeyW)]);
        assert!(state.pressed(KeyCode::KeyW));
        assert!(state.just_pressed(KeyCode::KeyW));

        state.apply(&[]);
        assert!(state.pressed(KeyCode::KeyW));
        assert!(!state.just_pressed(KeyCode::KeyW));

        state.apply(&[InputEvent::KeyUp(KeyCode::KeyW)]);
        assert!(!state.pressed(KeyCode::KeyW));
        assert!(state.just_released(KeyCode::KeyW));
    }

    #[test]
    fn repeated_key_down_is_not_just_pressed_again() {
        let mut state = InputState::new();
        state.apply(&[InputEvent::KeyDown(KeyCode::Space)]);
        state.apply(&[InputEvent::KeyDown(KeyCode::Space)]);
        assert!(state.pressed(KeyCode::Space));
        assert!(!state.just_pressed(KeyCode::Space));
    }

    #[test]
    fn quit_is_sticky() {
        let mut state = InputState::new();
        state.apply(&[InputEvent::Quit]);
        state.apply(&[]);
        assert!(state.quit_requested());
    }

    #[test]
    fn scripted_input_replays_in_order() {
        let mut script = ScriptedInput::new();
        script
            .push_frame(vec![InputEvent::KeyDown(KeyCode::KeyD)])
            .idle(1)
            .push_frame(vec![InputEvent::Quit]);

        assert_eq!(script.poll_events(), vec![InputEvent::KeyDown(KeyCode::KeyD)]);
        assert!(script.poll_events().is_empty());
        assert_eq!(script.poll_events(), vec![InputEvent::Quit]);
        assert!(script.poll_events().is_empty());
        assert_eq!(script.remaining(), 0);
    }
}
