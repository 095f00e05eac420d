//! Element declarations.
//!
//! Everything here is plain data built with chained setters and handed to
//! [`LayoutContext::configure`](crate::LayoutContext::configure) once per frame.

use crate::geometry::{Color, CornerRadius, Vector2};
use crate::id::ElementId;

// ── sizing ────────────────────────────────────────────────────────────────

/// How an element is sized along one axis.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum SizingAxis {
    /// Wraps the content, clamped to `min..=max`.
    Fit { min: f32, max: f32 },
    /// Wraps the content, then expands into free space up to `max`.
    Grow { min: f32, max: f32 },
    /// Exact size.
    Fixed(f32),
    /// Fraction (`0.0..=1.0`) of the parent's inner size.
    Percent(f32),
}

impl Default for SizingAxis {
    fn default() -> Self {
        Self::fit()
    }
}

impl SizingAxis {
    #[inline]
    pub const fn fit() -> Self {
        Self::Fit { min: 0.0, max: f32::MAX }
    }

    #[inline]
    pub const fn fit_between(min: f32, max: f32) -> Self {
        Self::Fit { min, max }
    }

    #[inline]
    pub const fn grow() -> Self {
        Self::Grow { min: 0.0, max: f32::MAX }
    }

    #[inline]
    pub const fn grow_between(min: f32, max: f32) -> Self {
        Self::Grow { min, max }
    }

    #[inline]
    pub const fn fixed(size: f32) -> Self {
        Self::Fixed(size)
    }

    #[inline]
    pub const fn percent(fraction: f32) -> Self {
        Self::Percent(fraction)
    }

    /// Clamp bounds applied after content sizing. Percent sizes are resolved
    /// against the parent later and carry no bounds of their own.
    #[inline]
    pub(crate) fn bounds(self) -> (f32, f32) {
        match self {
            Self::Fit { min, max } | Self::Grow { min, max } => (min, max),
            Self::Fixed(size) => (size, size),
            Self::Percent(_) => (0.0, f32::MAX),
        }
    }

    #[inline]
    pub(crate) fn is_grow(self) -> bool {
        matches!(self, Self::Grow { .. })
    }
}

#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Sizing {
    pub width: SizingAxis,
    pub height: SizingAxis,
}

impl Sizing {
    #[inline]
    pub const fn new(width: SizingAxis, height: SizingAxis) -> Self {
        Self { width, height }
    }

    #[inline]
    pub const fn grow() -> Self {
        Self::new(SizingAxis::grow(), SizingAxis::grow())
    }

    #[inline]
    pub(crate) fn axis(self, x_axis: bool) -> SizingAxis {
        if x_axis { self.width } else { self.height }
    }
}

// ── box model ─────────────────────────────────────────────────────────────

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Padding {
    pub left: u16,
    pub right: u16,
    pub top: u16,
    pub bottom: u16,
}

impl Padding {
    #[inline]
    pub const fn new(left: u16, right: u16, top: u16, bottom: u16) -> Self {
        Self { left, right, top, bottom }
    }

    #[inline]
    pub const fn all(p: u16) -> Self {
        Self::new(p, p, p, p)
    }

    /// Left/right = `x`, top/bottom = `y`.
    #[inline]
    pub const fn symmetric(x: u16, y: u16) -> Self {
        Self::new(x, x, y, y)
    }

    #[inline]
    pub(crate) fn axis_total(self, x_axis: bool) -> f32 {
        if x_axis {
            f32::from(self.left) + f32::from(self.right)
        } else {
            f32::from(self.top) + f32::from(self.bottom)
        }
    }

    #[inline]
    pub(crate) fn axis_start(self, x_axis: bool) -> f32 {
        if x_axis { f32::from(self.left) } else { f32::from(self.top) }
    }
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum AlignX {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum AlignY {
    #[default]
    Top,
    Center,
    Bottom,
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct ChildAlignment {
    pub x: AlignX,
    pub y: AlignY,
}

impl ChildAlignment {
    #[inline]
    pub const fn new(x: AlignX, y: AlignY) -> Self {
        Self { x, y }
    }

    /// Fraction of the free space placed before the content on the given axis.
    pub(crate) fn factor(self, x_axis: bool) -> f32 {
        if x_axis {
            match self.x {
                AlignX::Left => 0.0,
                AlignX::Center => 0.5,
                AlignX::Right => 1.0,
            }
        } else {
            match self.y {
                AlignY::Top => 0.0,
                AlignY::Center => 0.5,
                AlignY::Bottom => 1.0,
            }
        }
    }
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum LayoutDirection {
    #[default]
    LeftToRight,
    TopToBottom,
}

impl LayoutDirection {
    #[inline]
    pub(crate) fn is_x(self) -> bool {
        self == Self::LeftToRight
    }
}

#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct LayoutConfig {
    pub sizing: Sizing,
    pub padding: Padding,
    pub child_gap: u16,
    pub child_alignment: ChildAlignment,
    pub direction: LayoutDirection,
}

impl LayoutConfig {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sizing(mut self, sizing: Sizing) -> Self {
        self.sizing = sizing;
        self
    }

    pub fn width(mut self, width: SizingAxis) -> Self {
        self.sizing.width = width;
        self
    }

    pub fn height(mut self, height: SizingAxis) -> Self {
        self.sizing.height = height;
        self
    }

    pub fn padding(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self
    }

    pub fn child_gap(mut self, gap: u16) -> Self {
        self.child_gap = gap;
        self
    }

    pub fn child_alignment(mut self, alignment: ChildAlignment) -> Self {
        self.child_alignment = alignment;
        self
    }

    pub fn direction(mut self, direction: LayoutDirection) -> Self {
        self.direction = direction;
        self
    }
}

// ── floating ──────────────────────────────────────────────────────────────

/// One of the nine anchor points of a box.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum AttachPoint {
    #[default]
    LeftTop,
    LeftCenter,
    LeftBottom,
    CenterTop,
    CenterCenter,
    CenterBottom,
    RightTop,
    RightCenter,
    RightBottom,
}

impl AttachPoint {
    /// Horizontal and vertical fractions of the box the point sits at.
    pub(crate) fn factors(self) -> (f32, f32) {
        match self {
            Self::LeftTop => (0.0, 0.0),
            Self::LeftCenter => (0.0, 0.5),
            Self::LeftBottom => (0.0, 1.0),
            Self::CenterTop => (0.5, 0.0),
            Self::CenterCenter => (0.5, 0.5),
            Self::CenterBottom => (0.5, 1.0),
            Self::RightTop => (1.0, 0.0),
            Self::RightCenter => (1.0, 0.5),
            Self::RightBottom => (1.0, 1.0),
        }
    }
}

/// Which point of the floating element meets which point of its anchor.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct AttachPoints {
    pub element: AttachPoint,
    pub parent: AttachPoint,
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum AttachTo {
    #[default]
    Parent,
    Element(ElementId),
    Root,
}

/// Whether a floating element blocks hit-testing of what lies beneath it.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum PointerCapture {
    #[default]
    Capture,
    Passthrough,
}

#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct FloatingConfig {
    pub offset: Vector2,
    pub z_index: i16,
    pub attach_to: AttachTo,
    pub attach_points: AttachPoints,
    pub pointer_capture: PointerCapture,
    /// Clip to the nearest clipping ancestor of the declaring element.
    pub clip_to_parent: bool,
}

impl FloatingConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn offset(mut self, offset: Vector2) -> Self {
        self.offset = offset;
        self
    }

    pub fn z_index(mut self, z: i16) -> Self {
        self.z_index = z;
        self
    }

    pub fn attach_to(mut self, attach_to: AttachTo) -> Self {
        self.attach_to = attach_to;
        self
    }

    pub fn attach_points(mut self, element: AttachPoint, parent: AttachPoint) -> Self {
        self.attach_points = AttachPoints { element, parent };
        self
    }

    pub fn pointer_capture(mut self, mode: PointerCapture) -> Self {
        self.pointer_capture = mode;
        self
    }

    pub fn clip_to_parent(mut self, clip: bool) -> Self {
        self.clip_to_parent = clip;
        self
    }
}

// ── clip / border ─────────────────────────────────────────────────────────

#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct ClipConfig {
    pub horizontal: bool,
    pub vertical: bool,
    /// Added to the position of every child. Usually the container's own
    /// [`scroll_offset`](crate::LayoutContext::scroll_offset).
    pub child_offset: Vector2,
}

impl ClipConfig {
    pub fn vertical(child_offset: Vector2) -> Self {
        Self { horizontal: false, vertical: true, child_offset }
    }

    pub fn horizontal(child_offset: Vector2) -> Self {
        Self { horizontal: true, vertical: false, child_offset }
    }

    pub fn both(child_offset: Vector2) -> Self {
        Self { horizontal: true, vertical: true, child_offset }
    }

    #[inline]
    pub(crate) fn on_axis(self, x_axis: bool) -> bool {
        if x_axis { self.horizontal } else { self.vertical }
    }
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct BorderWidth {
    pub left: u16,
    pub right: u16,
    pub top: u16,
    pub bottom: u16,
    /// Separator drawn in the gap between adjacent children.
    pub between_children: u16,
}

impl BorderWidth {
    pub const fn outside(w: u16) -> Self {
        Self { left: w, right: w, top: w, bottom: w, between_children: 0 }
    }

    pub const fn all(w: u16) -> Self {
        Self { left: w, right: w, top: w, bottom: w, between_children: w }
    }

    pub(crate) fn is_zero(self) -> bool {
        self.left == 0
            && self.right == 0
            && self.top == 0
            && self.bottom == 0
            && self.between_children == 0
    }
}

#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct BorderConfig {
    pub color: Color,
    pub width: BorderWidth,
}

// ── text ──────────────────────────────────────────────────────────────────

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub enum WrapMode {
    /// Break on spaces and newlines when the container is too narrow.
    #[default]
    Words,
    /// Break only on explicit newlines.
    Newlines,
    /// Never break.
    None,
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub enum TextAlignment {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TextConfig {
    pub color: Color,
    pub font_id: u16,
    pub font_size: u16,
    pub letter_spacing: u16,
    /// Zero means "use the measured height".
    pub line_height: u16,
    pub wrap: WrapMode,
    pub alignment: TextAlignment,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            color: Color::rgb(255.0, 255.0, 255.0),
            font_id: 0,
            font_size: 16,
            letter_spacing: 0,
            line_height: 0,
            wrap: WrapMode::Words,
            alignment: TextAlignment::Left,
        }
    }
}

impl TextConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn font_id(mut self, id: u16) -> Self {
        self.font_id = id;
        self
    }

    pub fn font_size(mut self, size: u16) -> Self {
        self.font_size = size;
        self
    }

    pub fn letter_spacing(mut self, spacing: u16) -> Self {
        self.letter_spacing = spacing;
        self
    }

    pub fn line_height(mut self, height: u16) -> Self {
        self.line_height = height;
        self
    }

    pub fn wrap(mut self, wrap: WrapMode) -> Self {
        self.wrap = wrap;
        self
    }

    pub fn alignment(mut self, alignment: TextAlignment) -> Self {
        self.alignment = alignment;
        self
    }
}

// ── element ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementDeclaration {
    pub id: Option<ElementId>,
    pub layout: LayoutConfig,
    pub background: Color,
    pub corner_radius: CornerRadius,
    pub floating: Option<FloatingConfig>,
    pub clip: Option<ClipConfig>,
    pub border: Option<BorderConfig>,
}

impl ElementDeclaration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: ElementId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn layout(mut self, layout: LayoutConfig) -> Self {
        self.layout = layout;
        self
    }

    pub fn background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    pub fn corner_radius(mut self, radius: CornerRadius) -> Self {
        self.corner_radius = radius;
        self
    }

    pub fn floating(mut self, floating: FloatingConfig) -> Self {
        self.floating = Some(floating);
        self
    }

    pub fn clip(mut self, clip: ClipConfig) -> Self {
        self.clip = Some(clip);
        self
    }

    pub fn border(mut self, color: Color, width: BorderWidth) -> Self {
        self.border = Some(BorderConfig { color, width });
        self
    }
}
