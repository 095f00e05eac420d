use std::collections::HashSet;

use super::frame::InputFrame;
use super::types::{ButtonState, InputEvent, MouseButton, PointerButtonEvent};

/// Current input state of the window.
#[derive(Debug, Default)]
pub struct InputState {
    pub focused: bool,
    /// Last known pointer position in logical pixels; `None` until the
    /// pointer first enters. Kept after the pointer leaves.
    pub pointer_pos: Option<(f32, f32)>,
    pub pointer_inside: bool,
    pub buttons_down: HashSet<MouseButton>,
}

impl InputState {
    /// Updates the state from `ev` and records it into `frame`.
    pub fn apply_event(&mut self, frame: &mut InputFrame, ev: InputEvent) {
        match &ev {
            InputEvent::Focused(focused) => {
                self.focused = *focused;
                if !focused {
                    // Releases are not delivered while unfocused.
                    self.buttons_down.clear();
                }
            }

            InputEvent::PointerMoved { x, y } => {
                self.pointer_pos = Some((*x, *y));
                self.pointer_inside = true;
            }

            InputEvent::PointerLeft => self.pointer_inside = false,

            InputEvent::PointerButton(PointerButtonEvent { button, state, x, y }) => {
                self.pointer_pos = Some((*x, *y));
                match state {
                    ButtonState::Pressed => {
                        if self.buttons_down.insert(*button) {
                            frame.buttons_pressed.insert(*button);
                        }
                    }
                    ButtonState::Released => {
                        if self.buttons_down.remove(button) {
                            frame.buttons_released.insert(*button);
                        }
                    }
                }
            }

            InputEvent::CloseRequested | InputEvent::Resized { .. } | InputEvent::MouseWheel(_) => {}
        }

        frame.push_event(ev);
    }

    pub fn button_down(&self, button: MouseButton) -> bool {
        self.buttons_down.contains(&button)
    }

    /// Last known pointer position, or the origin before any pointer motion.
    pub fn last_pointer_pos(&self) -> (f32, f32) {
        self.pointer_pos.unwrap_or((0.0, 0.0))
    }
}
