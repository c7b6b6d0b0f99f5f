//! Game actions and their bindings.

use hashbrown::HashMap;
use winit::event::MouseButton;
use winit::keyboard::KeyCode;

use crate::buttons::Buttons;

/// Something the player can do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveForward,
    MoveBack,
    MoveLeft,
    MoveRight,
    Jump,
    Break,
    Place,
    NextBlock,
    PreviousBlock,
    DetailUp,
    DetailDown,
    ToggleCursor,
    CycleDebug,
    Screenshot,
}

impl Action {
    pub const ALL: [Self; 14] = [
        Self::MoveForward,
        Self::MoveBack,
        Self::MoveLeft,
        Self::MoveRight,
        Self::Jump,
        Self::Break,
        Self::Place,
        Self::NextBlock,
        Self::PreviousBlock,
        Self::DetailUp,
        Self::DetailDown,
        Self::ToggleCursor,
        Self::CycleDebug,
        Self::Screenshot,
    ];
}

/// An input that can be bound to an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputBinding {
    Key(KeyCode),
    Mouse(MouseButton),
}

impl InputBinding {
    fn is_held(self, keys: &Buttons<KeyCode>, mouse: &Buttons<MouseButton>) -> bool {
        match self {
            Self::Key(key) => keys.is_held(key),
            Self::Mouse(button) => mouse.is_held(button),
        }
    }

    fn went_down(self, keys: &Buttons<KeyCode>, mouse: &Buttons<MouseButton>) -> bool {
        match self {
            Self::Key(key) => keys.went_down(key),
            Self::Mouse(button) => mouse.went_down(button),
        }
    }
}

impl From<KeyCode> for InputBinding {
    fn from(key: KeyCode) -> Self {
        Self::Key(key)
    }
}

impl From<MouseButton> for InputBinding {
    fn from(button: MouseButton) -> Self {
        Self::Mouse(button)
    }
}

/// Inputs bound to each action. An action may have several bindings.
#[derive(Debug, Clone)]
pub struct Bindings {
    actions: HashMap<Action, Vec<InputBinding>>,
}

impl Bindings {
    /// No bindings at all.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            actions: HashMap::new(),
        }
    }

    /// Add a binding, ignoring duplicates.
    pub fn bind(&mut self, action: Action, binding: impl Into<InputBinding>) {
        let binding = binding.into();
        let bound = self.actions.entry(action).or_default();
        if !bound.contains(&binding) {
            bound.push(binding);
        }
    }

    #[must_use]
    pub fn with(mut self, action: Action, binding: impl Into<InputBinding>) -> Self {
        self.bind(action, binding);
        self
    }

    pub fn unbind(&mut self, action: Action, binding: InputBinding) {
        if let Some(bound) = self.actions.get_mut(&action) {
            bound.retain(|b| *b != binding);
        }
    }

    #[must_use]
    pub fn get(&self, action: Action) -> &[InputBinding] {
        self.actions.get(&action).map_or(&[], Vec::as_slice)
    }

    /// Any binding of `action` is held.
    #[must_use]
    pub fn is_pressed(
        &self,
        action: Action,
        keys: &Buttons<KeyCode>,
        mouse: &Buttons<MouseButton>,
    ) -> bool {
        self.get(action).iter().any(|b| b.is_held(keys, mouse))
    }

    /// Any binding of `action` went down this frame.
    #[must_use]
    pub fn is_just_pressed(
        &self,
        action: Action,
        keys: &Buttons<KeyCode>,
        mouse: &Buttons<MouseButton>,
    ) -> bool {
        self.get(action).iter().any(|b| b.went_down(keys, mouse))
    }
}

impl Default for Bindings {
    fn default() -> Self {
        Self::empty()
            .with(Action::MoveForward, KeyCode::KeyW)
            .with(Action::MoveForward, KeyCode::ArrowUp)
            .with(Action::MoveBack, KeyCode::KeyS)
            .with(Action::MoveBack, KeyCode::ArrowDown)
            .with(Action::MoveLeft, KeyCode::KeyA)
            .with(Action::MoveLeft, KeyCode::ArrowLeft)
            .with(Action::MoveRight, KeyCode::KeyD)
            .with(Action::MoveRight, KeyCode::ArrowRight)
            .with(Action::Jump, KeyCode::Space)
            .with(Action::Break, MouseButton::Left)
            .with(Action::Place, MouseButton::Right)
            .with(Action::NextBlock, KeyCode::KeyE)
            .with(Action::PreviousBlock, KeyCode::KeyQ)
            .with(Action::DetailUp, KeyCode::Period)
            .with(Action::DetailDown, KeyCode::Comma)
            .with(Action::ToggleCursor, KeyCode::Escape)
            .with(Action::CycleDebug, KeyCode::F3)
            .with(Action::Screenshot, KeyCode::F2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_action_has_a_default_binding() {
        let bindings = Bindings::default();
        for action in Action::ALL {
            assert!(!bindings.get(action).is_empty(), "{action:?} is unbound");
        }
        assert_eq!(bindings.get(Action::MoveForward).len(), 2);
    }

    #[test]
    fn duplicate_bindings_ignored() {
        let mut bindings = Bindings::empty();
        bindings.bind(Action::Jump, KeyCode::Space);
        bindings.bind(Action::Jump, KeyCode::Space);
        assert_eq!(bindings.get(Action::Jump), &[InputBinding::Key(KeyCode::Space)]);
    }

    #[test]
    fn unbind_and_query() {
        let mut bindings = Bindings::default();
        bindings.unbind(Action::MoveForward, InputBinding::Key(KeyCode::KeyW));

        let mut keys = Buttons::new();
        let mouse = Buttons::new();
        keys.press(KeyCode::KeyW);
        assert!(!bindings.is_pressed(Action::MoveForward, &keys, &mouse));
        keys.press(KeyCode::ArrowUp);
        assert!(bindings.is_pressed(Action::MoveForward, &keys, &mouse));
        assert!(bindings.is_just_pressed(Action::MoveForward, &keys, &mouse));
    }
}
