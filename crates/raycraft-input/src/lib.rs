//! Input handling for Raycraft.
//!
//! Raw keyboard and mouse events are folded into per-frame [`Buttons`] sets,
//! and a fixed set of game [`Action`]s is read through rebindable
//! [`Bindings`]. [`InputState`] turns the held movement keys and mouse motion
//! into the [`PlayerInput`](raycraft_core::PlayerInput) and
//! [`LookDelta`](raycraft_core::LookDelta) the simulation consumes.
//!
//! # Usage
//!
//! ```ignore
//! let mut input = InputState::new();
//!
//! // In the window event handler
//! input.process_window_event(&event);
//!
//! // Once per frame
//! let movement = input.player_input();
//! let look = input.look_delta(DEFAULT_SENSITIVITY);
//! if input.is_action_just_pressed(Action::Break) {
//!     // ...
//! }
//! input.end_frame();
//! ```

mod action;
mod buttons;
mod input;

pub use action::{Action, Bindings, InputBinding};
pub use buttons::Buttons;
pub use input::{CursorMode, InputState, DEFAULT_SENSITIVITY};

pub use winit::event::{DeviceEvent, MouseButton, WindowEvent};
pub use winit::keyboard::KeyCode;
