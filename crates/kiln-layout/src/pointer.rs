use crate::geometry::Vector2;

/// Frame-to-frame state of the primary pointer button.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum PointerInteraction {
    /// Went down since the previous `set_pointer_state`.
    PressedThisFrame,
    /// Held down.
    Pressed,
    /// Went up since the previous `set_pointer_state`.
    ReleasedThisFrame,
    #[default]
    Released,
}

impl PointerInteraction {
    /// Next state given whether the button is currently down.
    pub fn advance(self, is_down: bool) -> Self {
        match (self, is_down) {
            (Self::PressedThisFrame | Self::Pressed, true) => Self::Pressed,
            (_, true) => Self::PressedThisFrame,
            (Self::ReleasedThisFrame | Self::Released, false) => Self::Released,
            (_, false) => Self::ReleasedThisFrame,
        }
    }

    #[inline]
    pub fn is_down(self) -> bool {
        matches!(self, Self::PressedThisFrame | Self::Pressed)
    }
}

#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct PointerData {
    pub position: Vector2,
    pub state: PointerInteraction,
}
