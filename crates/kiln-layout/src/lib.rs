//! Immediate-mode flexbox-style layout.
//!
//! Each frame the caller declares a tree of elements between
//! [`LayoutContext::begin_layout`] and [`LayoutContext::end_layout`] and gets
//! back a flat list of [`RenderCommand`]s. Element bounds, scroll positions
//! and hover state carry over to the next frame by [`ElementId`].

pub mod arena;
pub mod config;
pub mod context;
pub mod error;
pub mod geometry;
pub mod id;
pub mod measure;
pub mod pointer;
pub mod render;
pub mod scroll;

pub use arena::{Arena, ArenaError};
pub use config::{
    AlignX, AlignY, AttachPoint, AttachPoints, AttachTo, BorderConfig, BorderWidth, ChildAlignment,
    ClipConfig, ElementDeclaration, FloatingConfig, LayoutConfig, LayoutDirection, Padding,
    PointerCapture, Sizing, SizingAxis, TextAlignment, TextConfig, WrapMode,
};
pub use context::{HoverCallback, LayoutContext};
pub use error::{ErrorHandler, ErrorKind, LayoutError};
pub use geometry::{BoundingBox, Color, CornerRadius, Dimensions, Vector2};
pub use id::ElementId;
pub use measure::MeasureText;
pub use pointer::{PointerData, PointerInteraction};
pub use render::{RenderCommand, RenderKind};
pub use scroll::{ScrollContainerData, ScrollInput, WHEEL_LINE_PIXELS};

/// Element capacity used by [`LayoutContext::initialize`].
pub const DEFAULT_MAX_ELEMENT_COUNT: usize = 8192;

/// Arena bytes needed for [`DEFAULT_MAX_ELEMENT_COUNT`] elements.
pub fn min_memory_size() -> usize {
    min_memory_size_for(DEFAULT_MAX_ELEMENT_COUNT)
}

pub fn min_memory_size_for(max_elements: usize) -> usize {
    context::tables_required_bytes(max_elements)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn min_memory_size_scales_with_capacity() {
        assert!(min_memory_size_for(16) < min_memory_size_for(32));
        assert_eq!(min_memory_size(), min_memory_size_for(DEFAULT_MAX_ELEMENT_COUNT));
    }

    #[test]
    fn min_memory_size_is_aligned() {
        assert_eq!(min_memory_size() % arena::ARENA_ALIGN, 0);
    }
}
