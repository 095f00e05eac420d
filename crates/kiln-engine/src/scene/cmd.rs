use crate::coords::{CornerRadii, Rect, Vec2};
use crate::paint::Color;
use crate::text::FontId;

/// Stroke painted inside a quad's edge.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Border {
    /// Left, top, right, bottom widths in logical pixels.
    pub widths: [f32; 4],
    pub color: Color,
}

/// Filled rounded rectangle, optionally stroked.
#[derive(Debug, Clone, PartialEq)]
pub struct QuadCmd {
    pub rect: Rect,
    pub radii: CornerRadii,
    pub fill: Color,
    pub border: Option<Border>,
}

/// A single line of text. `origin` is the top-left of the line box.
#[derive(Debug, Clone, PartialEq)]
pub struct TextCmd {
    pub text: String,
    pub font: FontId,
    pub size: f32,
    pub color: Color,
    pub origin: Vec2,
    pub letter_spacing: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Quad(QuadCmd),
    Text(TextCmd),
}
