//! Font loading and single-line text metrics (fontdue).

mod font_system;

pub use font_system::{FontId, FontLoadError, FontSystem, LineMetrics};
