//! Layout context: the per-frame element tree plus state that survives
//! between frames (element bounds, scroll containers, pointer, text cache).
//!
//! A frame is declared between [`LayoutContext::begin_layout`] and
//! [`LayoutContext::end_layout`]. Element records, child lists and the
//! declaration scratch stack live in tables carved out of the [`Arena`].

mod input;
mod solve;

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::ops::Range;

use bytemuck::{Pod, Zeroable};

use crate::arena::{Arena, ArenaError, ArenaSlice};
use crate::config::{
    AttachTo, ElementDeclaration, LayoutConfig, Sizing, SizingAxis, TextConfig, WrapMode,
};
use crate::error::{ErrorHandler, ErrorKind, LayoutError};
use crate::geometry::{BoundingBox, Dimensions};
use crate::id::ElementId;
use crate::measure::{MeasureCache, MeasureText, cache_key};
use crate::pointer::PointerData;
use crate::render::RenderCommand;
use crate::scroll::{ScrollContainer, ScrollInput};
use crate::{DEFAULT_MAX_ELEMENT_COUNT, min_memory_size_for};

pub use input::HoverCallback;

const ROOT_LABEL: &str = "kiln_layout_root";

/// Index of the default (empty) declaration in `decls`.
const DEFAULT_DECL: u32 = 0;
const NO_TEXT: u32 = u32::MAX;
const NO_PARENT: u32 = u32::MAX;

const FLAG_FLOATING: u32 = 1;
const FLAG_CLIP: u32 = 1 << 1;
const FLAG_TEXT: u32 = 1 << 2;

// ── arena tables ──────────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, Default, Pod, Zeroable)]
pub(crate) struct ElementRecord {
    pub id: u32,
    pub parent: u32,
    pub decl: u32,
    pub text: u32,
    pub children_start: u32,
    pub children_len: u32,
    pub flags: u32,
    pub width: f32,
    pub height: f32,
    pub min_width: f32,
    pub min_height: f32,
}

impl ElementRecord {
    #[inline]
    fn is_text(&self) -> bool {
        self.flags & FLAG_TEXT != 0
    }

    #[inline]
    fn is_floating(&self) -> bool {
        self.flags & FLAG_FLOATING != 0
    }

    #[inline]
    fn dim(&self, x_axis: bool) -> f32 {
        if x_axis { self.width } else { self.height }
    }

    #[inline]
    fn min_dim(&self, x_axis: bool) -> f32 {
        if x_axis { self.min_width } else { self.min_height }
    }

    #[inline]
    fn set_dim(&mut self, x_axis: bool, v: f32) {
        if x_axis { self.width = v } else { self.height = v }
    }

    #[inline]
    fn children(&self) -> Range<usize> {
        let start = self.children_start as usize;
        start..start + self.children_len as usize
    }
}

#[derive(Debug, Copy, Clone)]
struct Tables {
    records: ArenaSlice<ElementRecord>,
    children: ArenaSlice<u32>,
    scratch: ArenaSlice<u32>,
}

impl Tables {
    pub(crate) fn required_bytes(max_elements: usize) -> usize {
        Arena::table_size::<ElementRecord>(max_elements) + 2 * Arena::table_size::<u32>(max_elements)
    }

    fn carve(arena: &mut Arena, max_elements: usize) -> Result<Self, ArenaError> {
        Ok(Self {
            records: arena.alloc(max_elements)?,
            children: arena.alloc(max_elements)?,
            scratch: arena.alloc(max_elements)?,
        })
    }
}

pub(crate) fn tables_required_bytes(max_elements: usize) -> usize {
    Tables::required_bytes(max_elements)
}

// ── per-frame bookkeeping ─────────────────────────────────────────────────

#[derive(Debug, Copy, Clone)]
struct OpenEntry {
    element: u32,
    id: ElementId,
    scratch_base: u32,
    floating_children: u32,
}

#[derive(Debug, Copy, Clone)]
struct Root {
    element: u32,
    /// Element a floating root is positioned against; `NONE` for the layout root.
    attach_id: ElementId,
    clip_id: ElementId,
    z_index: i16,
}

#[derive(Debug, Clone)]
struct TextElement {
    text: String,
    config: TextConfig,
    element: u32,
    key: u64,
    preferred: Dimensions,
    lines: Range<usize>,
}

#[derive(Debug, Copy, Clone)]
struct WrappedLine {
    start: usize,
    end: usize,
    width: f32,
}

/// Survives across frames. `bounding_box` is the last computed layout.
struct ElementEntry {
    bounding_box: BoundingBox,
    element: u32,
    clip_id: ElementId,
    frame: u32,
    on_hover: Option<HoverCallback>,
}

#[derive(Debug, Copy, Clone)]
struct Visit {
    element: u32,
    origin: crate::geometry::Vector2,
    exiting: bool,
}

// ── context ───────────────────────────────────────────────────────────────

pub struct LayoutContext {
    arena: Arena,
    tables: Tables,
    max_elements: usize,

    element_count: usize,
    children_used: usize,
    scratch_len: usize,

    decls: Vec<ElementDeclaration>,
    texts: Vec<TextElement>,
    lines: Vec<WrappedLine>,
    roots: Vec<Root>,
    open_stack: Vec<OpenEntry>,
    clip_stack: Vec<ElementId>,
    commands: Vec<RenderCommand>,

    dimensions: Dimensions,
    culling: bool,
    frame: u32,
    layout_open: bool,
    capacity_exceeded: bool,
    measure_reported: bool,
    /// Opens swallowed after the element capacity ran out.
    dropped_depth: u32,

    error_handler: ErrorHandler,
    measure: Option<Box<dyn MeasureText>>,
    measure_cache: MeasureCache,

    elements_by_id: HashMap<ElementId, ElementEntry>,
    pointer: PointerData,
    pointer_over: Vec<ElementId>,
    scroll: Vec<ScrollContainer>,
    last_scroll_input: Option<ScrollInput>,

    // reusable traversal buffers
    bfs_buffer: Vec<u32>,
    resizable_buffer: Vec<u32>,
    visit_buffer: Vec<Visit>,
}

impl LayoutContext {
    /// Creates a context with room for [`DEFAULT_MAX_ELEMENT_COUNT`] elements.
    ///
    /// The arena must hold at least [`min_memory_size`](crate::min_memory_size) bytes.
    pub fn initialize(
        arena: Arena,
        dimensions: Dimensions,
        error_handler: ErrorHandler,
    ) -> Result<Self, LayoutError> {
        Self::initialize_with(arena, dimensions, error_handler, DEFAULT_MAX_ELEMENT_COUNT)
    }

    pub fn initialize_with(
        mut arena: Arena,
        dimensions: Dimensions,
        mut error_handler: ErrorHandler,
        max_elements: usize,
    ) -> Result<Self, LayoutError> {
        arena.reset();
        let tables = match Tables::carve(&mut arena, max_elements) {
            Ok(tables) => tables,
            Err(e) => {
                let err = LayoutError::new(
                    ErrorKind::ArenaCapacityExceeded,
                    format!(
                        "{e}; {} bytes needed for {max_elements} elements",
                        min_memory_size_for(max_elements)
                    ),
                );
                error_handler.report(err.clone());
                return Err(err);
            }
        };

        log::debug!(
            "layout context initialized: {max_elements} elements, {} arena bytes",
            arena.capacity()
        );

        Ok(Self {
            arena,
            tables,
            max_elements,
            element_count: 0,
            children_used: 0,
            scratch_len: 0,
            decls: Vec::new(),
            texts: Vec::new(),
            lines: Vec::new(),
            roots: Vec::new(),
            open_stack: Vec::new(),
            clip_stack: Vec::new(),
            commands: Vec::new(),
            dimensions,
            culling: true,
            frame: 0,
            layout_open: false,
            capacity_exceeded: false,
            measure_reported: false,
            dropped_depth: 0,
            error_handler,
            measure: None,
            measure_cache: MeasureCache::default(),
            elements_by_id: HashMap::new(),
            pointer: PointerData::default(),
            pointer_over: Vec::new(),
            scroll: Vec::new(),
            last_scroll_input: None,
            bfs_buffer: Vec::new(),
            resizable_buffer: Vec::new(),
            visit_buffer: Vec::new(),
        })
    }

    pub fn set_measure_text(&mut self, measure: impl MeasureText + 'static) {
        self.measure = Some(Box::new(measure));
    }

    pub fn set_layout_dimensions(&mut self, dimensions: Dimensions) {
        self.dimensions = dimensions;
    }

    pub fn layout_dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// Skip commands for elements entirely outside the viewport. On by default.
    pub fn set_culling(&mut self, enabled: bool) {
        self.culling = enabled;
    }

    pub fn max_element_count(&self) -> usize {
        self.max_elements
    }

    /// Bytes of the arena in use by the element tables.
    pub fn arena_used(&self) -> usize {
        self.arena.used()
    }

    fn report(&mut self, kind: ErrorKind, message: impl Into<String>) {
        self.error_handler.report(LayoutError::new(kind, message));
    }

    // ── frame lifecycle ───────────────────────────────────────────────────

    pub fn begin_layout(&mut self) {
        if self.layout_open {
            self.report(ErrorKind::UnbalancedOpenClose, "begin_layout called twice without end_layout");
        }

        self.frame = self.frame.wrapping_add(1);
        self.element_count = 0;
        self.children_used = 0;
        self.scratch_len = 0;
        self.decls.clear();
        self.decls.push(ElementDeclaration::default());
        self.texts.clear();
        self.lines.clear();
        self.roots.clear();
        self.open_stack.clear();
        self.clip_stack.clear();
        self.commands.clear();
        self.capacity_exceeded = false;
        self.measure_reported = false;
        self.dropped_depth = 0;
        for s in &mut self.scroll {
            s.open_this_frame = false;
        }

        self.layout_open = true;

        let Dimensions { width, height } = self.dimensions;
        self.open(Some(ElementId::new(ROOT_LABEL)));
        self.configure(ElementDeclaration::new().layout(
            LayoutConfig::new().sizing(Sizing::new(SizingAxis::fixed(width), SizingAxis::fixed(height))),
        ));
        if self.element_count > 0 {
            self.roots.push(Root {
                element: 0,
                attach_id: ElementId::NONE,
                clip_id: ElementId::NONE,
                z_index: 0,
            });
        }
    }

    /// Finishes the frame and returns its render commands in paint order.
    ///
    /// The slice is mutable so callers can post-process command positions.
    pub fn end_layout(&mut self) -> &mut [RenderCommand] {
        self.commands.clear();

        if !self.layout_open {
            self.report(ErrorKind::UnbalancedOpenClose, "end_layout called without begin_layout");
            return &mut self.commands;
        }

        self.dropped_depth = 0;
        if self.open_stack.len() > 1 {
            let open = self.open_stack.len() - 1;
            self.report(
                ErrorKind::UnbalancedOpenClose,
                format!("{open} element(s) still open at end_layout"),
            );
            while self.open_stack.len() > 1 {
                self.close_element();
            }
        }
        self.close_element();
        self.layout_open = false;

        if !self.capacity_exceeded {
            self.size_along_axis(true);
            self.wrap_text();
            self.propagate_heights();
            self.size_along_axis(false);
            self.position_and_emit();
        }

        let frame = self.frame;
        self.elements_by_id.retain(|_, e| e.frame == frame);
        self.scroll.retain(|s| s.open_this_frame);
        self.measure_cache.evict_stale(frame);

        &mut self.commands
    }

    /// Commands from the last [`end_layout`](Self::end_layout).
    pub fn render_commands(&self) -> &[RenderCommand] {
        &self.commands
    }

    // ── declaration ───────────────────────────────────────────────────────

    /// Opens an element. Anonymous elements get an id derived from their
    /// parent and position.
    pub fn open(&mut self, id: Option<ElementId>) {
        if !self.layout_open {
            self.report(ErrorKind::UnbalancedOpenClose, "open called outside begin_layout/end_layout");
            self.dropped_depth += 1;
            return;
        }
        if self.capacity_exceeded || self.element_count >= self.max_elements {
            if !self.capacity_exceeded {
                self.capacity_exceeded = true;
                let max = self.max_elements;
                self.report(
                    ErrorKind::ElementsCapacityExceeded,
                    format!("more than {max} elements declared in one frame"),
                );
            }
            self.dropped_depth += 1;
            return;
        }

        let parent = self.open_stack.last().copied();
        let id = id.unwrap_or_else(|| match parent {
            Some(p) => ElementId::child_of(
                p.id,
                (self.scratch_len as u32 - p.scratch_base) + p.floating_children,
            ),
            None => ElementId::new(ROOT_LABEL),
        });

        let index = self.element_count as u32;
        self.element_count += 1;

        self.arena.get_mut(&self.tables.records)[index as usize] = ElementRecord {
            id: id.raw(),
            parent: parent.map_or(NO_PARENT, |p| p.element),
            decl: DEFAULT_DECL,
            text: NO_TEXT,
            ..ElementRecord::default()
        };

        self.open_stack.push(OpenEntry {
            element: index,
            id,
            scratch_base: self.scratch_len as u32,
            floating_children: 0,
        });
        self.register_id(id, index);
    }

    /// Applies a declaration to the open element. The declaration's `id` is
    /// consumed by [`element`](Self::element) and ignored here.
    pub fn configure(&mut self, decl: ElementDeclaration) {
        if self.dropped_depth > 0 {
            return;
        }
        let Some(&entry) = self.open_stack.last() else {
            self.report(ErrorKind::UnbalancedOpenClose, "configure called with no open element");
            return;
        };
        if self.arena.get(&self.tables.records)[entry.element as usize].decl != DEFAULT_DECL {
            self.report(ErrorKind::UnbalancedOpenClose, "element configured twice");
            return;
        }

        for axis in [decl.layout.sizing.width, decl.layout.sizing.height] {
            if let SizingAxis::Percent(p) = axis
                && !(0.0..=1.0).contains(&p)
            {
                self.report(ErrorKind::PercentageOverOne, format!("percent sizing {p} is outside 0..=1"));
            }
        }

        let mut flags = 0;
        let depth = self.open_stack.len();

        if let Some(floating) = decl.floating
            && depth > 1
        {
            flags |= FLAG_FLOATING;
            let attach_id = match floating.attach_to {
                AttachTo::Parent => self.open_stack[depth - 2].id,
                AttachTo::Root => self.open_stack[0].id,
                AttachTo::Element(target) => {
                    let frame = self.frame;
                    if self.elements_by_id.get(&target).is_some_and(|e| e.frame == frame) {
                        target
                    } else {
                        self.report(
                            ErrorKind::FloatingParentNotFound,
                            format!("no element with id {:#010x} declared before it", target.raw()),
                        );
                        self.open_stack[0].id
                    }
                }
            };
            let clip_id = if floating.clip_to_parent {
                self.clip_stack.last().copied().unwrap_or(ElementId::NONE)
            } else {
                ElementId::NONE
            };

            self.roots.push(Root {
                element: entry.element,
                attach_id,
                clip_id,
                z_index: floating.z_index,
            });
            self.clip_stack.push(clip_id);
            self.open_stack[depth - 2].floating_children += 1;
        }

        if let Some(clip) = decl.clip {
            flags |= FLAG_CLIP;
            self.clip_stack.push(entry.id);
            match self.scroll.iter_mut().find(|s| s.id == entry.id) {
                Some(s) => {
                    s.open_this_frame = true;
                    s.horizontal = clip.horizontal;
                    s.vertical = clip.vertical;
                }
                None => self
                    .scroll
                    .push(ScrollContainer::new(entry.id, clip.horizontal, clip.vertical)),
            }
        }

        let decl_index = self.decls.len() as u32;
        self.decls.push(decl);

        let record = &mut self.arena.get_mut(&self.tables.records)[entry.element as usize];
        record.decl = decl_index;
        record.flags |= flags;
    }

    pub fn close(&mut self) {
        if self.dropped_depth > 0 {
            self.dropped_depth -= 1;
            return;
        }
        if self.open_stack.len() <= 1 {
            self.report(ErrorKind::UnbalancedOpenClose, "close called with no open element");
            return;
        }
        self.close_element();
    }

    /// Opens, configures, declares children and closes in one call.
    pub fn element(&mut self, decl: ElementDeclaration, children: impl FnOnce(&mut Self)) {
        self.open(decl.id);
        self.configure(decl);
        children(self);
        self.close();
    }

    /// Declares a text leaf inside the open element.
    pub fn text(&mut self, text: &str, config: TextConfig) {
        if self.dropped_depth > 0 {
            return;
        }
        let Some(parent) = self.open_stack.last().copied() else {
            self.report(ErrorKind::UnbalancedOpenClose, "text declared with no open element");
            return;
        };
        if self.element_count >= self.max_elements {
            if !self.capacity_exceeded {
                self.capacity_exceeded = true;
                let max = self.max_elements;
                self.report(
                    ErrorKind::ElementsCapacityExceeded,
                    format!("more than {max} elements declared in one frame"),
                );
            }
            return;
        }
        let Some(measurer) = self.measure.as_deref() else {
            if !self.measure_reported {
                self.measure_reported = true;
                self.report(
                    ErrorKind::TextMeasurementNotProvided,
                    "set_measure_text must be called before declaring text",
                );
            }
            return;
        };

        let key = cache_key(text, &config);
        let measured = self.measure_cache.measure(key, text, &config, measurer, self.frame);
        let preferred = measured.dimensions;
        let min_width = if config.wrap == WrapMode::Words {
            measured.min_width
        } else {
            preferred.width
        };
        let height = if config.line_height > 0 {
            f32::from(config.line_height)
        } else {
            preferred.height
        };

        let index = self.element_count as u32;
        self.element_count += 1;
        let slot = (self.scratch_len as u32 - parent.scratch_base) + parent.floating_children;
        let id = ElementId::child_of(parent.id, slot);

        self.arena.get_mut(&self.tables.records)[index as usize] = ElementRecord {
            id: id.raw(),
            parent: parent.element,
            decl: DEFAULT_DECL,
            text: self.texts.len() as u32,
            flags: FLAG_TEXT,
            width: preferred.width,
            height,
            min_width,
            min_height: height,
            ..ElementRecord::default()
        };
        self.texts.push(TextElement {
            text: text.to_owned(),
            config,
            element: index,
            key,
            preferred,
            lines: 0..0,
        });

        self.arena.get_mut(&self.tables.scratch)[self.scratch_len] = index;
        self.scratch_len += 1;
        self.register_id(id, index);
    }

    // ── internals ─────────────────────────────────────────────────────────

    fn register_id(&mut self, id: ElementId, element: u32) {
        let clip_id = self.clip_stack.last().copied().unwrap_or(ElementId::NONE);
        let frame = self.frame;

        let duplicate = match self.elements_by_id.entry(id) {
            Entry::Occupied(mut e) => {
                let entry = e.get_mut();
                if entry.frame == frame {
                    true
                } else {
                    entry.frame = frame;
                    entry.element = element;
                    entry.clip_id = clip_id;
                    entry.on_hover = None;
                    false
                }
            }
            Entry::Vacant(e) => {
                e.insert(ElementEntry {
                    bounding_box: BoundingBox::default(),
                    element,
                    clip_id,
                    frame,
                    on_hover: None,
                });
                false
            }
        };

        if duplicate {
            self.report(
                ErrorKind::DuplicateId,
                format!("element id {:#010x} declared twice in one frame", id.raw()),
            );
        }
    }

    /// Pops the open element, stores its child list and computes its fit size.
    fn close_element(&mut self) {
        let Some(entry) = self.open_stack.pop() else {
            return;
        };

        let base = entry.scratch_base as usize;
        let count = self.scratch_len - base;
        let start = self.children_used;
        {
            let (children, scratch) = self.arena.pair_mut(&self.tables.children, &self.tables.scratch);
            children[start..start + count].copy_from_slice(&scratch[base..base + count]);
        }
        self.children_used += count;
        self.scratch_len = base;

        let (records, children) = self.arena.pair_mut(&self.tables.records, &self.tables.children);
        let mut record = records[entry.element as usize];
        record.children_start = start as u32;
        record.children_len = count as u32;

        let decl = &self.decls[record.decl as usize];
        let fit = solve::fit_content(records, &children[start..start + count], decl);
        record.width = fit.width;
        record.height = fit.height;
        record.min_width = fit.min_width;
        record.min_height = fit.min_height;
        records[entry.element as usize] = record;

        if record.flags & FLAG_CLIP != 0 {
            self.clip_stack.pop();
        }
        if record.is_floating() {
            self.clip_stack.pop();
        } else if !self.open_stack.is_empty() {
            self.arena.get_mut(&self.tables.scratch)[self.scratch_len] = entry.element;
            self.scratch_len += 1;
        }
    }
}

#[cfg(test)]
mod tests;
