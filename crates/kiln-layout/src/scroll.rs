use crate::geometry::{BoundingBox, Dimensions, Vector2};
use crate::id::ElementId;

/// Pixels scrolled per wheel line.
pub const WHEEL_LINE_PIXELS: f32 = 10.0;

const MOMENTUM_DECAY: f32 = 0.95;
const MOMENTUM_EPSILON: f32 = 0.1;
const DRAG_RELEASE_THRESHOLD: f32 = 10.0;

/// Arguments of the last [`update_scroll_containers`](crate::LayoutContext::update_scroll_containers) call.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct ScrollInput {
    pub delta: Vector2,
    pub delta_time: f32,
    pub drag_enabled: bool,
}

impl ScrollInput {
    /// Wheel delta scaled by the frame factor the caller supplied.
    pub fn scaled_delta(&self) -> Vector2 {
        self.delta * self.delta_time
    }
}

/// Public snapshot of one scroll container.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ScrollContainerData {
    pub id: ElementId,
    pub scroll_position: Vector2,
    pub viewport: BoundingBox,
    pub content_size: Dimensions,
    pub horizontal: bool,
    pub vertical: bool,
}

#[derive(Debug, Clone)]
pub(crate) struct ScrollContainer {
    pub id: ElementId,
    pub horizontal: bool,
    pub vertical: bool,
    pub scroll_position: Vector2,
    pub viewport: BoundingBox,
    pub content_size: Dimensions,
    pub open_this_frame: bool,

    pointer_origin: Vector2,
    scroll_origin: Vector2,
    momentum: Vector2,
    momentum_time: f32,
    drag_active: bool,
}

impl ScrollContainer {
    pub fn new(id: ElementId, horizontal: bool, vertical: bool) -> Self {
        Self {
            id,
            horizontal,
            vertical,
            scroll_position: Vector2::zero(),
            viewport: BoundingBox::default(),
            content_size: Dimensions::default(),
            open_this_frame: true,
            pointer_origin: Vector2::zero(),
            scroll_origin: Vector2::zero(),
            momentum: Vector2::zero(),
            momentum_time: 0.0,
            drag_active: false,
        }
    }

    pub fn snapshot(&self) -> ScrollContainerData {
        ScrollContainerData {
            id: self.id,
            scroll_position: self.scroll_position,
            viewport: self.viewport,
            content_size: self.content_size,
            horizontal: self.horizontal,
            vertical: self.vertical,
        }
    }

    fn max_scroll(&self) -> Vector2 {
        Vector2::new(
            (self.content_size.width - self.viewport.width).max(0.0),
            (self.content_size.height - self.viewport.height).max(0.0),
        )
    }

    fn can_scroll_x(&self) -> bool {
        self.horizontal && self.content_size.width > self.viewport.width
    }

    fn can_scroll_y(&self) -> bool {
        self.vertical && self.content_size.height > self.viewport.height
    }

    pub fn clamp(&mut self) {
        let max = self.max_scroll();
        self.scroll_position.x = self.scroll_position.x.clamp(-max.x, 0.0);
        self.scroll_position.y = self.scroll_position.y.clamp(-max.y, 0.0);
    }

    /// Settles a finished drag into momentum and applies existing momentum.
    pub fn coast(&mut self, pointer_active: bool, wheel_moved: bool) {
        if !pointer_active && self.drag_active {
            let diff = self.scroll_position - self.scroll_origin;
            let t = (self.momentum_time * 25.0).max(f32::EPSILON);
            if diff.x.abs() > DRAG_RELEASE_THRESHOLD {
                self.momentum.x = diff.x / t;
            }
            if diff.y.abs() > DRAG_RELEASE_THRESHOLD {
                self.momentum.y = diff.y / t;
            }
            self.drag_active = false;
            self.pointer_origin = Vector2::zero();
            self.scroll_origin = Vector2::zero();
            self.momentum_time = 0.0;
        }

        self.scroll_position = self.scroll_position + self.momentum;
        self.momentum = self.momentum * MOMENTUM_DECAY;
        if self.momentum.x.abs() < MOMENTUM_EPSILON || wheel_moved {
            self.momentum.x = 0.0;
        }
        if self.momentum.y.abs() < MOMENTUM_EPSILON || wheel_moved {
            self.momentum.y = 0.0;
        }
        self.clamp();
    }

    pub fn apply_wheel(&mut self, delta: Vector2) {
        if self.can_scroll_y() {
            self.scroll_position.y += delta.y * WHEEL_LINE_PIXELS;
        }
        if self.can_scroll_x() {
            self.scroll_position.x += delta.x * WHEEL_LINE_PIXELS;
        }
    }

    pub fn apply_drag(&mut self, pointer: Vector2, delta_time: f32) {
        self.momentum = Vector2::zero();

        if !self.drag_active {
            self.pointer_origin = pointer;
            self.scroll_origin = self.scroll_position;
            self.drag_active = true;
            return;
        }

        let before = self.scroll_position;
        let max = self.max_scroll();
        if self.can_scroll_x() {
            self.scroll_position.x =
                (self.scroll_origin.x + (pointer.x - self.pointer_origin.x)).clamp(-max.x, 0.0);
        }
        if self.can_scroll_y() {
            self.scroll_position.y =
                (self.scroll_origin.y + (pointer.y - self.pointer_origin.y)).clamp(-max.y, 0.0);
        }

        let moved = self.scroll_position - before;
        if moved.x.abs() < MOMENTUM_EPSILON
            && moved.y.abs() < MOMENTUM_EPSILON
            && self.momentum_time > 0.15
        {
            self.momentum_time = 0.0;
            self.pointer_origin = pointer;
            self.scroll_origin = self.scroll_position;
        } else {
            self.momentum_time += delta_time;
        }
    }
}
