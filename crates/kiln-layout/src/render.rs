use crate::config::BorderWidth;
use crate::geometry::{BoundingBox, Color, CornerRadius};
use crate::id::ElementId;

/// One drawing instruction produced by [`LayoutContext::end_layout`](crate::LayoutContext::end_layout).
///
/// Commands are emitted in paint order; consumers draw them front to back
/// as listed, honouring scissor start/end pairs.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderCommand {
    pub bounding_box: BoundingBox,
    pub id: ElementId,
    pub z_index: i16,
    pub kind: RenderKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RenderKind {
    Rectangle {
        color: Color,
        corner_radius: CornerRadius,
    },
    /// Stroke drawn inside the bounding box.
    Border {
        color: Color,
        corner_radius: CornerRadius,
        width: BorderWidth,
    },
    /// A single wrapped line.
    Text {
        text: String,
        color: Color,
        font_id: u16,
        font_size: u16,
        letter_spacing: u16,
        line_height: u16,
    },
    ScissorStart {
        horizontal: bool,
        vertical: bool,
    },
    ScissorEnd,
}

impl RenderCommand {
    /// Shifts the command vertically. Used by callers that scroll a whole layout.
    pub fn offset_y(&mut self, dy: f32) {
        self.bounding_box.y += dy;
    }

    pub fn text(&self) -> Option<&str> {
        match &self.kind {
            RenderKind::Text { text, .. } => Some(text),
            _ => None,
        }
    }
}
