//! Combined keyboard, mouse and binding state.

use glam::Vec2;
use raycraft_core::{LookDelta, PlayerInput};
use tracing::trace;
use winit::event::{DeviceEvent, ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::action::{Action, Bindings};
use crate::buttons::Buttons;

/// Radians of view rotation per unit of raw mouse motion.
pub const DEFAULT_SENSITIVITY: f32 = 1.0 / 500.0;

/// Pixels of touchpad scroll counted as one wheel line
const PIXELS_PER_LINE: f32 = 100.0;

/// Whether the cursor is free or captured for mouse look.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorMode {
    #[default]
    Normal,
    /// Hidden and grabbed; view follows raw device motion
    Locked,
}

impl CursorMode {
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Normal => Self::Locked,
            Self::Locked => Self::Normal,
        }
    }
}

/// Everything the game reads from the keyboard and mouse.
///
/// Feed it window and device events as they arrive, read it once per frame,
/// then call [`end_frame`](Self::end_frame).
#[derive(Debug, Default)]
pub struct InputState {
    keys: Buttons<KeyCode>,
    mouse_buttons: Buttons<MouseButton>,
    bindings: Bindings,
    cursor_mode: CursorMode,
    /// Last cursor position in window pixels
    cursor_position: Vec2,
    /// Raw device motion this frame, only gathered while locked
    motion: Vec2,
    /// Wheel lines this frame, y positive away from the user
    scroll: Vec2,
    /// Fractional wheel lines not yet turned into block-selection steps
    scroll_carry: f32,
}

impl InputState {
    #[must_use]
    pub fn new() -> Self {
        Self::with_bindings(Bindings::default())
    }

    #[must_use]
    pub fn with_bindings(bindings: Bindings) -> Self {
        Self {
            bindings,
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn keys(&self) -> &Buttons<KeyCode> {
        &self.keys
    }

    pub fn keys_mut(&mut self) -> &mut Buttons<KeyCode> {
        &mut self.keys
    }

    #[must_use]
    pub const fn mouse_buttons(&self) -> &Buttons<MouseButton> {
        &self.mouse_buttons
    }

    pub fn mouse_buttons_mut(&mut self) -> &mut Buttons<MouseButton> {
        &mut self.mouse_buttons
    }

    pub fn bindings_mut(&mut self) -> &mut Bindings {
        &mut self.bindings
    }

    #[must_use]
    pub const fn cursor_position(&self) -> Vec2 {
        self.cursor_position
    }

    /// Process a window event. Returns `true` if the event was consumed.
    pub fn process_window_event(&mut self, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                let PhysicalKey::Code(key) = event.physical_key else {
                    return false;
                };
                match event.state {
                    ElementState::Pressed => self.keys.press(key),
                    ElementState::Released => self.keys.release(key),
                }
                true
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor_position = Vec2::new(position.x as f32, position.y as f32);
                true
            }
            WindowEvent::MouseInput { button, state, .. } => {
                match state {
                    ElementState::Pressed => self.mouse_buttons.press(*button),
                    ElementState::Released => self.mouse_buttons.release(*button),
                }
                true
            }
            WindowEvent::MouseWheel { delta, .. } => {
                self.add_scroll(*delta);
                true
            }
            WindowEvent::Focused(false) => {
                trace!("Focus lost, releasing all input");
                self.clear();
                false
            }
            _ => false,
        }
    }

    /// Process a device event. Raw motion only counts while the cursor is
    /// locked.
    pub fn process_device_event(&mut self, event: &DeviceEvent) {
        if let DeviceEvent::MouseMotion { delta: (dx, dy) } = *event {
            if self.cursor_mode == CursorMode::Locked {
                self.motion += Vec2::new(dx as f32, dy as f32);
            }
        }
    }

    /// Accumulate wheel movement in lines.
    pub fn add_scroll(&mut self, delta: MouseScrollDelta) {
        self.scroll += match delta {
            MouseScrollDelta::LineDelta(x, y) => Vec2::new(x, y),
            MouseScrollDelta::PixelDelta(pos) => {
                Vec2::new(pos.x as f32, pos.y as f32) / PIXELS_PER_LINE
            }
        };
    }

    #[must_use]
    pub fn is_action_pressed(&self, action: Action) -> bool {
        self.bindings
            .is_pressed(action, &self.keys, &self.mouse_buttons)
    }

    #[must_use]
    pub fn is_action_just_pressed(&self, action: Action) -> bool {
        self.bindings
            .is_just_pressed(action, &self.keys, &self.mouse_buttons)
    }

    /// Movement intent from the held movement keys.
    #[must_use]
    pub fn player_input(&self) -> PlayerInput {
        let axis = |positive: Action, negative: Action| {
            f32::from(u8::from(self.is_action_pressed(positive)))
                - f32::from(u8::from(self.is_action_pressed(negative)))
        };
        PlayerInput::new(
            axis(Action::MoveForward, Action::MoveBack),
            axis(Action::MoveRight, Action::MoveLeft),
            self.is_action_pressed(Action::Jump),
        )
    }

    /// View rotation from this frame's raw mouse motion. Moving the mouse
    /// right turns right; moving it up looks up.
    #[must_use]
    pub fn look_delta(&self, sensitivity: f32) -> LookDelta {
        let delta = self.motion * sensitivity;
        LookDelta::new(delta.x, -delta.y)
    }

    /// Whole block-selection steps from the wheel plus the select keys.
    /// Positive selects the next block.
    ///
    /// Partial wheel lines carry over to later frames.
    pub fn selection_steps(&mut self) -> i32 {
        self.scroll_carry -= self.scroll.y;
        let wheel = self.scroll_carry.trunc();
        self.scroll_carry -= wheel;

        let keys = i32::from(self.is_action_just_pressed(Action::NextBlock))
            - i32::from(self.is_action_just_pressed(Action::PreviousBlock));
        wheel as i32 + keys
    }

    #[must_use]
    pub const fn cursor_mode(&self) -> CursorMode {
        self.cursor_mode
    }

    /// Only updates the internal state; the caller applies it to the window.
    pub fn set_cursor_mode(&mut self, mode: CursorMode) {
        self.cursor_mode = mode;
    }

    /// Must be called at the end of every frame.
    pub fn end_frame(&mut self) {
        self.keys.end_frame();
        self.mouse_buttons.end_frame();
        self.motion = Vec2::ZERO;
        self.scroll = Vec2::ZERO;
    }

    /// Release every button and drop pending motion. The cursor mode and
    /// bindings are kept.
    pub fn clear(&mut self) {
        self.keys.clear();
        self.mouse_buttons.clear();
        self.motion = Vec2::ZERO;
        self.scroll = Vec2::ZERO;
        self.scroll_carry = 0.0;
    }
}
