//! Held and edge-triggered button sets.

use std::hash::Hash;

use hashbrown::HashSet;

/// Tracks which buttons of one device are down.
///
/// `T` is the device's button identifier: a [`KeyCode`](winit::keyboard::KeyCode)
/// for the keyboard, a [`MouseButton`](winit::event::MouseButton) for the
/// mouse. Besides the held set, the buttons that went down or came up since
/// the last [`end_frame`](Self::end_frame) are kept so one-shot actions fire
/// exactly once per press.
#[derive(Debug, Clone)]
pub struct Buttons<T> {
    held: HashSet<T>,
    went_down: HashSet<T>,
    went_up: HashSet<T>,
}

impl<T> Default for Buttons<T> {
    fn default() -> Self {
        Self {
            held: HashSet::new(),
            went_down: HashSet::new(),
            went_up: HashSet::new(),
        }
    }
}

impl<T: Copy + Eq + Hash> Buttons<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a press. Auto-repeat of a held button is not a new press.
    pub fn press(&mut self, button: T) {
        if self.held.insert(button) {
            self.went_down.insert(button);
        }
    }

    /// Record a release of a held button.
    pub fn release(&mut self, button: T) {
        if self.held.remove(&button) {
            self.went_up.insert(button);
        }
    }

    /// Down right now, including the frame it went down.
    #[must_use]
    pub fn is_held(&self, button: T) -> bool {
        self.held.contains(&button)
    }

    /// Went down since the last frame ended.
    #[must_use]
    pub fn went_down(&self, button: T) -> bool {
        self.went_down.contains(&button)
    }

    /// Came up since the last frame ended.
    #[must_use]
    pub fn went_up(&self, button: T) -> bool {
        self.went_up.contains(&button)
    }

    /// Number of buttons currently down.
    #[must_use]
    pub fn held_count(&self) -> usize {
        self.held.len()
    }

    /// Forget this frame's edges; held buttons stay held.
    pub fn end_frame(&mut self) {
        self.went_down.clear();
        self.went_up.clear();
    }

    /// Release everything without reporting releases, e.g. on focus loss.
    pub fn clear(&mut self) {
        self.held.clear();
        self.went_down.clear();
        self.went_up.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::keyboard::KeyCode;

    #[test]
    fn press_is_an_edge_for_one_frame() {
        let mut keys = Buttons::new();
        keys.press(KeyCode::KeyW);
        assert!(keys.is_held(KeyCode::KeyW));
        assert!(keys.went_down(KeyCode::KeyW));

        keys.end_frame();
        assert!(keys.is_held(KeyCode::KeyW));
        assert!(!keys.went_down(KeyCode::KeyW));

        keys.release(KeyCode::KeyW);
        assert!(!keys.is_held(KeyCode::KeyW));
        assert!(keys.went_up(KeyCode::KeyW));
        keys.end_frame();
        assert!(!keys.went_up(KeyCode::KeyW));
    }

    #[test]
    fn repeat_does_not_press_again() {
        let mut keys = Buttons::new();
        keys.press(KeyCode::Space);
        keys.end_frame();
        keys.press(KeyCode::Space);
        assert!(!keys.went_down(KeyCode::Space));
        assert_eq!(keys.held_count(), 1);
    }

    #[test]
    fn releasing_an_idle_button_is_ignored() {
        let mut keys = Buttons::new();
        keys.release(KeyCode::KeyQ);
        assert!(!keys.went_up(KeyCode::KeyQ));
    }

    #[test]
    fn press_and_release_within_one_frame_still_fires() {
        let mut keys = Buttons::new();
        keys.press(KeyCode::F2);
        keys.release(KeyCode::F2);
        assert!(keys.went_down(KeyCode::F2));
        assert!(!keys.is_held(KeyCode::F2));
    }

    #[test]
    fn clear_drops_held_and_edges() {
        let mut keys = Buttons::new();
        keys.press(KeyCode::KeyA);
        keys.press(KeyCode::KeyD);
        keys.clear();
        assert_eq!(keys.held_count(), 0);
        assert!(!keys.went_down(KeyCode::KeyA));
        assert!(!keys.went_up(KeyCode::KeyD));
    }
}
