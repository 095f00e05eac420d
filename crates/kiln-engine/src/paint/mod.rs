//! Color model shared between the scene and the renderers.
//!
//! Colors are linear and premultiplied. The surface is sRGB, so conversion
//! from authored sRGB values happens once, on construction.

mod color;

pub use color::{srgb_to_linear, Color};
