use super::{Vec2, Viewport};

/// Axis-aligned rectangle in logical pixels.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    #[inline]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { origin: Vec2::new(x, y), size: Vec2::new(w, h) }
    }

    #[inline]
    pub fn right(self) -> f32 {
        self.origin.x + self.size.x
    }

    #[inline]
    pub fn bottom(self) -> f32 {
        self.origin.y + self.size.y
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        !(self.size.x > 0.0 && self.size.y > 0.0)
    }

    /// Overlap of two rects, or an empty rect at `self.origin` when they are disjoint.
    pub fn intersect(self, other: Rect) -> Rect {
        let x0 = self.origin.x.max(other.origin.x);
        let y0 = self.origin.y.max(other.origin.y);
        let x1 = self.right().min(other.right());
        let y1 = self.bottom().min(other.bottom());
        if x1 <= x0 || y1 <= y0 {
            return Rect::from_origin(self.origin);
        }
        Rect::new(x0, y0, x1 - x0, y1 - y0)
    }

    #[inline]
    fn from_origin(origin: Vec2) -> Rect {
        Rect { origin, size: Vec2::zero() }
    }

    /// Physical-pixel scissor `(x, y, w, h)` clamped to the viewport.
    ///
    /// `None` means nothing inside the rect is visible.
    pub fn to_scissor(self, viewport: Viewport, scale: f32) -> Option<(u32, u32, u32, u32)> {
        let max_x = (viewport.width * scale).max(1.0).round() as u32;
        let max_y = (viewport.height * scale).max(1.0).round() as u32;

        let px = |v: f32, max: u32| ((v * scale).round().max(0.0) as u32).min(max);
        let x0 = px(self.origin.x, max_x);
        let y0 = px(self.origin.y, max_y);
        let x1 = px(self.right(), max_x);
        let y1 = px(self.bottom(), max_y);

        let (w, h) = (x1.saturating_sub(x0), y1.saturating_sub(y0));
        (w > 0 && h > 0).then_some((x0, y0, w, h))
    }
}
