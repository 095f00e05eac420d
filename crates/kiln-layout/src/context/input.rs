//! Pointer hit-testing, hover callbacks, scroll containers and queries
//! against the last computed layout.

use crate::geometry::{BoundingBox, Vector2};
use crate::id::ElementId;
use crate::pointer::PointerData;
use crate::scroll::{ScrollContainerData, ScrollInput};

use super::LayoutContext;

/// Called during [`LayoutContext::set_pointer_state`] for each element under the pointer.
pub type HoverCallback = Box<dyn FnMut(ElementId, PointerData)>;

impl LayoutContext {
    /// Records the pointer for this frame and hit-tests it against the
    /// previous frame's layout.
    ///
    /// Call once per frame before `begin_layout`; the last call wins.
    /// Hover callbacks registered last frame run afterwards with the
    /// updated pointer state.
    pub fn set_pointer_state(&mut self, position: Vector2, is_down: bool) {
        self.pointer.position = position;
        self.pointer.state = self.pointer.state.advance(is_down);
        self.pointer_over.clear();

        if self.layout_open {
            return;
        }

        let mut stack = std::mem::take(&mut self.bfs_buffer);
        let records = self.arena.get(&self.tables.records);
        let children = self.arena.get(&self.tables.children);

        for root in self.roots.iter().rev() {
            let mut hit = false;
            stack.clear();
            stack.push(root.element);

            while let Some(index) = stack.pop() {
                let record = &records[index as usize];
                let id = ElementId::from_raw(record.id);

                if let Some(entry) = self.elements_by_id.get(&id)
                    && entry.element == index
                    && entry.bounding_box.contains(position)
                {
                    let clipped = !entry.clip_id.is_none()
                        && !self
                            .elements_by_id
                            .get(&entry.clip_id)
                            .is_some_and(|clip| clip.bounding_box.contains(position));
                    if !clipped {
                        self.pointer_over.push(id);
                        hit = true;
                    }
                }

                if !record.is_text() {
                    stack.extend_from_slice(&children[record.children()]);
                }
            }

            if hit && self.captures_pointer(root.element) {
                break;
            }
        }
        self.bfs_buffer = stack;

        let pointer = self.pointer;
        for i in 0..self.pointer_over.len() {
            let id = self.pointer_over[i];
            if let Some(callback) = self.elements_by_id.get_mut(&id).and_then(|e| e.on_hover.as_mut()) {
                callback(id, pointer);
            }
        }
    }

    /// Advances every scroll container by one frame.
    ///
    /// `delta` is in wheel lines; the innermost container under the pointer
    /// receives it. With `enable_drag`, holding the pointer down over a
    /// container drags its content and releasing it leaves momentum.
    pub fn update_scroll_containers(&mut self, enable_drag: bool, delta: Vector2, delta_time: f32) {
        self.last_scroll_input = Some(ScrollInput { delta, delta_time, drag_enabled: enable_drag });

        let pointer_active = enable_drag && self.pointer.state.is_down();
        let wheel_moved = delta.x != 0.0 || delta.y != 0.0;

        let mut target: Option<(usize, usize)> = None;
        for (slot, container) in self.scroll.iter_mut().enumerate() {
            container.coast(pointer_active, wheel_moved);
            if let Some(depth) = self.pointer_over.iter().rposition(|&id| id == container.id)
                && target.is_none_or(|(d, _)| depth > d)
            {
                target = Some((depth, slot));
            }
        }

        if let Some((_, slot)) = target {
            let position = self.pointer.position;
            let container = &mut self.scroll[slot];
            container.apply_wheel(delta);
            if pointer_active {
                container.apply_drag(position, delta_time);
            }
            container.clamp();
        }
    }

    /// Arguments of the most recent [`update_scroll_containers`](Self::update_scroll_containers).
    pub fn last_scroll_input(&self) -> Option<ScrollInput> {
        self.last_scroll_input
    }

    /// Scroll position of the currently open element, or zero when it does
    /// not clip. Pass it as the element's `ClipConfig::child_offset`.
    pub fn scroll_offset(&self) -> Vector2 {
        let Some(open) = self.open_stack.last() else {
            return Vector2::zero();
        };
        self.scroll
            .iter()
            .find(|s| s.id == open.id)
            .map_or(Vector2::zero(), |s| s.scroll_position)
    }

    pub fn scroll_container(&self, id: ElementId) -> Option<ScrollContainerData> {
        self.scroll.iter().find(|s| s.id == id).map(|s| s.snapshot())
    }

    pub fn pointer_state(&self) -> PointerData {
        self.pointer
    }

    /// Whether the pointer is over the currently open element.
    pub fn hovered(&self) -> bool {
        if self.dropped_depth > 0 {
            return false;
        }
        self.open_stack.last().is_some_and(|open| self.pointer_over.contains(&open.id))
    }

    pub fn pointer_over(&self, id: ElementId) -> bool {
        self.pointer_over.contains(&id)
    }

    /// Elements under the pointer, outermost first within each root.
    pub fn pointer_over_ids(&self) -> &[ElementId] {
        &self.pointer_over
    }

    /// Attaches a hover callback to the currently open element.
    pub fn on_hover(&mut self, callback: impl FnMut(ElementId, PointerData) + 'static) {
        if self.dropped_depth > 0 {
            return;
        }
        let Some(open) = self.open_stack.last() else {
            return;
        };
        if let Some(entry) = self.elements_by_id.get_mut(&open.id) {
            entry.on_hover = Some(Box::new(callback));
        }
    }

    /// Bounds of an element from the last completed layout.
    pub fn element_bounds(&self, id: ElementId) -> Option<BoundingBox> {
        self.elements_by_id.get(&id).map(|e| e.bounding_box)
    }
}
