//! winit → [`InputEvent`] translation.

use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event::{ElementState, MouseButton as WinitMouseButton, MouseScrollDelta, WindowEvent};

use crate::input::{ButtonState, InputEvent, InputState, MouseButton, MouseWheelDelta, PointerButtonEvent};

/// Translates the events the engine consumes; everything else is `None`.
///
/// `scale` is the window's scale factor; all output is in logical pixels.
pub(crate) fn translate_window_event(
    event: &WindowEvent,
    scale: f64,
    state: &InputState,
) -> Option<InputEvent> {
    match event {
        WindowEvent::CloseRequested => Some(InputEvent::CloseRequested),

        WindowEvent::Resized(size) => {
            let (width, height) = logical_size(*size, scale);
            Some(InputEvent::Resized { width, height })
        }

        WindowEvent::Focused(focused) => Some(InputEvent::Focused(*focused)),

        WindowEvent::CursorLeft { .. } => Some(InputEvent::PointerLeft),

        WindowEvent::CursorMoved { position, .. } => {
            let (x, y) = logical_position(*position, scale);
            Some(InputEvent::PointerMoved { x, y })
        }

        WindowEvent::MouseInput { state: st, button, .. } => {
            let (x, y) = state.last_pointer_pos();
            Some(InputEvent::PointerButton(PointerButtonEvent {
                button: map_mouse_button(*button),
                state: match st {
                    ElementState::Pressed => ButtonState::Pressed,
                    ElementState::Released => ButtonState::Released,
                },
                x,
                y,
            }))
        }

        WindowEvent::MouseWheel { delta, .. } => Some(InputEvent::MouseWheel(map_wheel(*delta, scale))),

        _ => None,
    }
}

fn logical_size(size: PhysicalSize<u32>, scale: f64) -> (f32, f32) {
    let l = size.to_logical::<f64>(scale);
    (l.width as f32, l.height as f32)
}

fn logical_position(pos: PhysicalPosition<f64>, scale: f64) -> (f32, f32) {
    let l = pos.to_logical::<f64>(scale);
    (l.x as f32, l.y as f32)
}

fn map_wheel(delta: MouseScrollDelta, scale: f64) -> MouseWheelDelta {
    match delta {
        MouseScrollDelta::LineDelta(x, y) => MouseWheelDelta::Line { x, y },
        MouseScrollDelta::PixelDelta(p) => {
            let (x, y) = logical_position(p, scale);
            MouseWheelDelta::Pixel { x, y }
        }
    }
}

fn map_mouse_button(b: WinitMouseButton) -> MouseButton {
    match b {
        WinitMouseButton::Left => MouseButton::Left,
        WinitMouseButton::Right => MouseButton::Right,
        WinitMouseButton::Middle => MouseButton::Middle,
        WinitMouseButton::Back => MouseButton::Other(3),
        WinitMouseButton::Forward => MouseButton::Other(4),
        WinitMouseButton::Other(v) => MouseButton::Other(v),
    }
}
