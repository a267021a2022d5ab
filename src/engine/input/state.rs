// Per-frame input state, populated by the host before each simulation step

use std::collections::HashSet;

use super::action::Action;

/// Input state for the current frame
///
/// The window layer (or a test script) feeds presses and releases in; the
/// simulation only ever reads `is_held` / `just_pressed`. `end_frame` must
/// be called once per frame to age the edge-triggered state.
#[derive(Debug, Default)]
pub struct InputState {
    /// Actions currently held down
    held: HashSet<Action>,

    /// Actions that transitioned to held this frame
    just_pressed: HashSet<Action>,
}

impl InputState {
    /// Create an empty input state
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an action press
    pub fn press(&mut self, action: Action) {
        if self.held.insert(action) {
            self.just_pressed.insert(action);
        }
    }

    /// Register an action release
    pub fn release(&mut self, action: Action) {
        self.held.remove(&action);
    }

    /// Check if an action is held this frame
    pub fn is_held(&self, action: Action) -> bool {
        self.held.contains(&action)
    }

    /// Check if an action transitioned to held this frame
    pub fn just_pressed(&self, action: Action) -> bool {
        self.just_pressed.contains(&action)
    }

    /// Age the edge-triggered state; call once at the end of each frame
    pub fn end_frame(&mut self) {
        self.just_pressed.clear();
    }

    /// Release everything (level teardown, window focus loss)
    #[allow(dead_code)]
    pub fn reset(&mut self) {
        self.held.clear();
        self.just_pressed.clear();
    }
}
