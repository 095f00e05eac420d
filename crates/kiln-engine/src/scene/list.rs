use crate::coords::Rect;

use super::{DrawCmd, QuadCmd, TextCmd};

/// A recorded command with its paint key and effective clip.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    pub z: i32,
    pub order: u32,
    pub cmd: DrawCmd,
    /// Scissor in logical pixels, already intersected with enclosing clips.
    /// `None` draws everywhere.
    pub clip: Option<Rect>,
}

/// Draw stream for one frame. Cleared and refilled every frame; buffers
/// keep their capacity.
#[derive(Debug, Default)]
pub struct DrawList {
    items: Vec<DrawItem>,
    next_order: u32,
    sorted: Vec<usize>,
    sorted_dirty: bool,
    clip_stack: Vec<Rect>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.next_order = 0;
        self.sorted.clear();
        self.sorted_dirty = true;
        if !self.clip_stack.is_empty() {
            log::warn!("draw list cleared with {} clip(s) still pushed", self.clip_stack.len());
            self.clip_stack.clear();
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items in insertion order.
    pub fn items(&self) -> &[DrawItem] {
        &self.items
    }

    pub fn push(&mut self, z: i32, cmd: DrawCmd) {
        let order = self.next_order;
        self.next_order = self.next_order.wrapping_add(1);
        self.items.push(DrawItem { z, order, cmd, clip: self.current_clip() });
        self.sorted_dirty = true;
    }

    pub fn push_quad(&mut self, z: i32, quad: QuadCmd) {
        self.push(z, DrawCmd::Quad(quad));
    }

    pub fn push_text(&mut self, z: i32, text: TextCmd) {
        self.push(z, DrawCmd::Text(text));
    }

    /// Starts a scissor region, intersected with the enclosing one.
    pub fn push_clip(&mut self, rect: Rect) {
        let effective = match self.clip_stack.last() {
            Some(&parent) => parent.intersect(rect),
            None => rect,
        };
        self.clip_stack.push(effective);
    }

    /// Ends the innermost scissor region. Unbalanced pops are ignored.
    pub fn pop_clip(&mut self) {
        if self.clip_stack.pop().is_none() {
            log::warn!("pop_clip without a matching push_clip");
        }
    }

    pub fn current_clip(&self) -> Option<Rect> {
        self.clip_stack.last().copied()
    }

    /// Iterates items back to front.
    pub fn iter_in_paint_order(&mut self) -> impl Iterator<Item = &DrawItem> {
        if self.sorted_dirty {
            self.sorted.clear();
            self.sorted.extend(0..self.items.len());
            let items = &self.items;
            self.sorted.sort_by_key(|&i| (items[i].z, items[i].order));
            self.sorted_dirty = false;
        }
        self.sorted.iter().map(|&i| &self.items[i])
    }
}
