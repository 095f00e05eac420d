//! Geometry shared by the scene and the renderers.
//!
//! Everything is in logical pixels, origin top-left, +Y down. Shaders map
//! to NDC with a viewport uniform; scissor rects are scaled to physical
//! pixels by the render context's scale factor.

mod corner_radii;
mod rect;
mod vec2;
mod viewport;

pub use corner_radii::CornerRadii;
pub use rect::Rect;
pub use vec2::Vec2;
pub use viewport::Viewport;
