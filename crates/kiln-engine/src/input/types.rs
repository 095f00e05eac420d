/// Pixel deltas are converted to wheel lines at this rate.
pub const PIXELS_PER_LINE: f32 = 10.0;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other(u16),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ButtonState {
    Pressed,
    Released,
}

/// Scroll amount as reported by the device.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum MouseWheelDelta {
    /// Notched wheels, in lines.
    Line { x: f32, y: f32 },
    /// Touchpads, in logical pixels.
    Pixel { x: f32, y: f32 },
}

impl MouseWheelDelta {
    /// The delta in wheel lines.
    pub fn lines(self) -> (f32, f32) {
        match self {
            Self::Line { x, y } => (x, y),
            Self::Pixel { x, y } => (x / PIXELS_PER_LINE, y / PIXELS_PER_LINE),
        }
    }
}

/// Button transition at the pointer position known when it happened.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointerButtonEvent {
    pub button: MouseButton,
    pub state: ButtonState,
    pub x: f32,
    pub y: f32,
}

/// Platform-agnostic window events, in logical pixels.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// The user asked to close the window.
    CloseRequested,
    Resized { width: f32, height: f32 },
    PointerMoved { x: f32, y: f32 },
    PointerButton(PointerButtonEvent),
    /// Pointer left the window surface.
    PointerLeft,
    MouseWheel(MouseWheelDelta),
    Focused(bool),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_delta_is_unchanged() {
        assert_eq!(MouseWheelDelta::Line { x: 0.0, y: 3.0 }.lines(), (0.0, 3.0));
    }

    #[test]
    fn pixel_delta_converts_to_lines() {
        assert_eq!(MouseWheelDelta::Pixel { x: -20.0, y: 45.0 }.lines(), (-2.0, 4.5));
    }
}
