use std::collections::HashSet;

use super::types::{InputEvent, MouseButton};

/// Input gathered since the previous frame.
///
/// [`InputState`](super::InputState) holds what is currently down;
/// this holds what happened, in arrival order.
#[derive(Debug, Default)]
pub struct InputFrame {
    pub events: Vec<InputEvent>,
    pub buttons_pressed: HashSet<MouseButton>,
    pub buttons_released: HashSet<MouseButton>,
}

impl InputFrame {
    pub fn clear(&mut self) {
        self.events.clear();
        self.buttons_pressed.clear();
        self.buttons_released.clear();
    }

    pub fn push_event(&mut self, ev: InputEvent) {
        self.events.push(ev);
    }

    pub fn close_requested(&self) -> bool {
        self.events.contains(&InputEvent::CloseRequested)
    }
}
