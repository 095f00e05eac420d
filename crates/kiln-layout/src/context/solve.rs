//! The layout pass run by `end_layout`: size X, wrap text, propagate heights,
//! size Y, then position everything and emit render commands.

use crate::config::{ElementDeclaration, PointerCapture, SizingAxis, TextAlignment, WrapMode};
use crate::geometry::{BoundingBox, CornerRadius, Dimensions, Vector2};
use crate::id::ElementId;
use crate::measure::MeasuredText;
use crate::render::{RenderCommand, RenderKind};

use super::{ElementRecord, LayoutContext, Visit, WrappedLine};

const EPSILON: f32 = 0.01;

#[inline]
fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

#[inline]
fn clamp_to(v: f32, (lo, hi): (f32, f32)) -> f32 {
    v.max(lo).min(hi)
}

/// Content-derived size of a freshly closed element.
pub(super) struct Fit {
    pub width: f32,
    pub height: f32,
    pub min_width: f32,
    pub min_height: f32,
}

pub(super) fn fit_content(records: &[ElementRecord], kids: &[u32], decl: &ElementDeclaration) -> Fit {
    let layout = &decl.layout;
    let x_axis = layout.direction.is_x();
    let gaps = f32::from(layout.child_gap) * kids.len().saturating_sub(1) as f32;

    let (mut along, mut across, mut min_along, mut min_across) = (0.0f32, 0.0f32, 0.0f32, 0.0f32);
    for &kid in kids {
        let child = &records[kid as usize];
        along += child.dim(x_axis);
        min_along += child.min_dim(x_axis);
        across = across.max(child.dim(!x_axis));
        min_across = min_across.max(child.min_dim(!x_axis));
    }

    let (mut width, mut height, mut min_width, mut min_height) = if x_axis {
        (along + gaps, across, min_along + gaps, min_across)
    } else {
        (across, along + gaps, min_across, min_along + gaps)
    };

    let pad_x = layout.padding.axis_total(true);
    let pad_y = layout.padding.axis_total(false);
    width += pad_x;
    min_width += pad_x;
    height += pad_y;
    min_height += pad_y;

    // clipped content may overflow, so it never forces a minimum
    if let Some(clip) = decl.clip {
        if clip.horizontal {
            min_width = 0.0;
        }
        if clip.vertical {
            min_height = 0.0;
        }
    }

    let wb = layout.sizing.width.bounds();
    let hb = layout.sizing.height.bounds();
    Fit {
        width: clamp_to(width, wb),
        height: clamp_to(height, hb),
        min_width: clamp_to(min_width, wb),
        min_height: clamp_to(min_height, hb),
    }
}

fn shrink(records: &mut [ElementRecord], resizable: &mut Vec<u32>, mut remaining: f32, x_axis: bool) {
    while remaining < -EPSILON && !resizable.is_empty() {
        let mut largest = 0.0f32;
        let mut second = 0.0f32;
        for &kid in resizable.iter() {
            let size = records[kid as usize].dim(x_axis);
            if approx_eq(size, largest) {
                continue;
            }
            if size > largest {
                second = largest;
                largest = size;
            } else {
                second = second.max(size);
            }
        }

        let step = if second < largest { second - largest } else { remaining };
        let step = step.max(remaining / resizable.len() as f32);

        let mut progressed = false;
        let mut i = 0;
        while i < resizable.len() {
            let child = &mut records[resizable[i] as usize];
            let prev = child.dim(x_axis);
            if approx_eq(prev, largest) {
                let min = child.min_dim(x_axis);
                let mut next = prev + step;
                let pinned = next <= min;
                if pinned {
                    next = min;
                }
                child.set_dim(x_axis, next);
                remaining -= next - prev;
                progressed |= pinned || !approx_eq(next, prev);
                if pinned {
                    resizable.swap_remove(i);
                    continue;
                }
            }
            i += 1;
        }
        // Pinning a child at its bound frees the rest of the pass for its siblings.
        if !progressed {
            break;
        }
    }
}

fn grow(
    records: &mut [ElementRecord],
    decls: &[ElementDeclaration],
    resizable: &mut Vec<u32>,
    mut remaining: f32,
    x_axis: bool,
) {
    while remaining > EPSILON && !resizable.is_empty() {
        let mut smallest = f32::MAX;
        let mut second = f32::MAX;
        for &kid in resizable.iter() {
            let size = records[kid as usize].dim(x_axis);
            if approx_eq(size, smallest) {
                continue;
            }
            if size < smallest {
                second = smallest;
                smallest = size;
            } else {
                second = second.min(size);
            }
        }

        let step = if second < f32::MAX { second - smallest } else { remaining };
        let step = step.min(remaining / resizable.len() as f32);

        let mut progressed = false;
        let mut i = 0;
        while i < resizable.len() {
            let child = &mut records[resizable[i] as usize];
            let prev = child.dim(x_axis);
            if approx_eq(prev, smallest) {
                let (_, max) = decls[child.decl as usize].layout.sizing.axis(x_axis).bounds();
                let mut next = prev + step;
                let pinned = next >= max;
                if pinned {
                    next = max;
                }
                child.set_dim(x_axis, next);
                remaining -= next - prev;
                progressed |= pinned || !approx_eq(next, prev);
                if pinned {
                    resizable.swap_remove(i);
                    continue;
                }
            }
            i += 1;
        }
        // Pinning a child at its bound frees the rest of the pass for its siblings.
        if !progressed {
            break;
        }
    }
}

/// Breaks measured words into lines no wider than `limit`.
fn wrap_words(text: &str, measured: &MeasuredText, limit: f32, spacing: f32, out: &mut Vec<WrappedLine>) {
    let bytes = text.as_bytes();
    let mut line_width = 0.0f32;
    let mut line_start = 0usize;
    let mut line_len = 0usize;
    let mut i = 0;

    while i < measured.words.len() {
        let word = measured.words[i];

        if line_len == 0 && !word.is_newline() && word.width > limit {
            // a lone word wider than the container gets a line of its own
            let mut end = word.start + word.len;
            let mut width = word.width;
            if bytes[end - 1] == b' ' {
                end -= 1;
                width -= measured.space_width;
            }
            out.push(WrappedLine { start: word.start, end, width });
            line_start = word.start + word.len;
            i += 1;
        } else if word.is_newline() || line_width + word.width > limit {
            let mut end = line_start + line_len;
            let mut width = line_width;
            if line_len > 0 && bytes[end - 1] == b' ' {
                end -= 1;
                width -= measured.space_width;
            }
            out.push(WrappedLine { start: line_start, end, width: (width - spacing).max(0.0) });
            if line_len == 0 || word.is_newline() {
                i += 1;
            }
            line_start = word.start;
            line_width = 0.0;
            line_len = 0;
        } else {
            line_width += word.width + spacing;
            line_len += word.len;
            i += 1;
        }
    }

    if line_len > 0 {
        out.push(WrappedLine {
            start: line_start,
            end: line_start + line_len,
            width: (line_width - spacing).max(0.0),
        });
    }
}

impl LayoutContext {
    pub(super) fn size_along_axis(&mut self, x_axis: bool) {
        let mut bfs = std::mem::take(&mut self.bfs_buffer);
        let mut resizable = std::mem::take(&mut self.resizable_buffer);
        let frame = self.frame;

        let (records, children) = self.arena.pair_mut(&self.tables.records, &self.tables.children);
        let children: &[u32] = children;
        let decls = &self.decls;

        for root in &self.roots {
            let root_index = root.element as usize;
            let sizing = decls[records[root_index].decl as usize].layout.sizing.axis(x_axis);

            // floating roots resolve grow and percent against their anchor
            if !root.attach_id.is_none()
                && let Some(anchor) = self.elements_by_id.get(&root.attach_id)
                && anchor.frame == frame
            {
                let anchor_size = records[anchor.element as usize].dim(x_axis);
                match sizing {
                    SizingAxis::Grow { .. } => records[root_index].set_dim(x_axis, anchor_size),
                    SizingAxis::Percent(p) => records[root_index].set_dim(x_axis, anchor_size * p),
                    _ => {}
                }
            }
            let clamped = clamp_to(records[root_index].dim(x_axis), sizing.bounds());
            records[root_index].set_dim(x_axis, clamped);

            bfs.clear();
            bfs.push(root.element);
            let mut head = 0;
            while head < bfs.len() {
                let parent = records[bfs[head] as usize];
                head += 1;
                if parent.is_text() || parent.children_len == 0 {
                    continue;
                }

                let decl = &decls[parent.decl as usize];
                let layout = &decl.layout;
                let clips = decl.clip.is_some_and(|c| c.on_axis(x_axis));
                let kids = &children[parent.children()];
                let parent_size = parent.dim(x_axis);
                let padding = layout.padding.axis_total(x_axis);
                let along = layout.direction.is_x() == x_axis;
                let gap = f32::from(layout.child_gap);

                let mut content = 0.0f32;
                let mut pad_and_gaps = padding;
                let mut grow_count = 0;
                resizable.clear();

                for (n, &kid) in kids.iter().enumerate() {
                    let child = &records[kid as usize];
                    let child_sizing = decls[child.decl as usize].layout.sizing.axis(x_axis);
                    if !child.is_text() && child.children_len > 0 {
                        bfs.push(kid);
                    }
                    let wraps = !child.is_text()
                        || self.texts[child.text as usize].config.wrap == WrapMode::Words;
                    if !matches!(child_sizing, SizingAxis::Percent(_) | SizingAxis::Fixed(_)) && wraps {
                        resizable.push(kid);
                    }
                    if child_sizing.is_grow() {
                        grow_count += 1;
                    }

                    if along {
                        if !matches!(child_sizing, SizingAxis::Percent(_)) {
                            content += child.dim(x_axis);
                        }
                        if n > 0 {
                            content += gap;
                            pad_and_gaps += gap;
                        }
                    } else {
                        content = content.max(child.dim(x_axis));
                    }
                }

                for &kid in kids {
                    let child = &mut records[kid as usize];
                    if let SizingAxis::Percent(p) = decls[child.decl as usize].layout.sizing.axis(x_axis) {
                        let size = (parent_size - pad_and_gaps).max(0.0) * p;
                        child.set_dim(x_axis, size);
                        if along {
                            content += size;
                        }
                    }
                }

                if along {
                    let remaining = parent_size - padding - content;
                    if remaining < 0.0 && !clips {
                        shrink(records, &mut resizable, remaining, x_axis);
                    } else if remaining > 0.0 && grow_count > 0 {
                        resizable.retain(|&k| {
                            decls[records[k as usize].decl as usize].layout.sizing.axis(x_axis).is_grow()
                        });
                        grow(records, decls, &mut resizable, remaining, x_axis);
                    }
                } else {
                    let mut max_size = parent_size - padding;
                    if clips {
                        max_size = max_size.max(content);
                    }
                    for &kid in &resizable {
                        let child = &mut records[kid as usize];
                        let child_sizing = decls[child.decl as usize].layout.sizing.axis(x_axis);
                        let mut size = child.dim(x_axis);
                        if let SizingAxis::Grow { max, .. } = child_sizing {
                            size = max_size.min(max);
                        }
                        size = child.min_dim(x_axis).max(size.min(max_size));
                        child.set_dim(x_axis, size);
                    }
                }
            }
        }

        self.bfs_buffer = bfs;
        self.resizable_buffer = resizable;
    }

    pub(super) fn wrap_text(&mut self) {
        let records = self.arena.get_mut(&self.tables.records);

        for t in self.texts.iter_mut() {
            let Some(measured) = self.measure_cache.get(t.key) else {
                continue;
            };
            let record = &mut records[t.element as usize];
            let line_height = if t.config.line_height > 0 {
                f32::from(t.config.line_height)
            } else {
                t.preferred.height
            };

            let first = self.lines.len();
            let fits = !measured.has_newlines && t.preferred.width <= record.width + EPSILON;
            if t.config.wrap == WrapMode::None || fits {
                self.lines.push(WrappedLine {
                    start: 0,
                    end: t.text.len(),
                    width: t.preferred.width,
                });
            } else {
                let limit = match t.config.wrap {
                    WrapMode::Words => record.width,
                    _ => f32::MAX,
                };
                let spacing = f32::from(t.config.letter_spacing);
                wrap_words(&t.text, measured, limit, spacing, &mut self.lines);
            }
            t.lines = first..self.lines.len();

            let count = t.lines.len().max(1);
            record.height = line_height * count as f32;
            record.min_height = record.height;
        }
    }

    /// Recomputes container heights bottom-up now that text has wrapped.
    pub(super) fn propagate_heights(&mut self) {
        let (records, children) = self.arena.pair_mut(&self.tables.records, &self.tables.children);

        // children always have a higher index than their parent
        for index in (0..self.element_count).rev() {
            let record = records[index];
            if record.is_text() || record.children_len == 0 {
                continue;
            }
            let decl = &self.decls[record.decl as usize];
            let layout = &decl.layout;
            let kids = &children[record.children()];
            let padding = layout.padding.axis_total(false);

            let (mut height, mut min_height) = if layout.direction.is_x() {
                kids.iter().fold((0.0f32, 0.0f32), |(h, m), &k| {
                    let c = &records[k as usize];
                    (h.max(c.height), m.max(c.min_height))
                })
            } else {
                let gaps = f32::from(layout.child_gap) * kids.len().saturating_sub(1) as f32;
                kids.iter().fold((gaps, gaps), |(h, m), &k| {
                    let c = &records[k as usize];
                    (h + c.height, m + c.min_height)
                })
            };
            height += padding;
            min_height += padding;
            if decl.clip.is_some_and(|c| c.vertical) {
                min_height = 0.0;
            }

            let bounds = layout.sizing.height.bounds();
            let record = &mut records[index];
            record.height = clamp_to(height, bounds);
            record.min_height = clamp_to(min_height, bounds);
        }
    }

    pub(super) fn position_and_emit(&mut self) {
        self.roots.sort_by_key(|r| r.z_index);

        let viewport = BoundingBox::new(0.0, 0.0, self.dimensions.width, self.dimensions.height);
        let culling = self.culling;
        let mut stack = std::mem::take(&mut self.visit_buffer);

        let (records, children) = self.arena.pair_mut(&self.tables.records, &self.tables.children);
        let children: &[u32] = children;

        for root in &self.roots {
            let root_record = records[root.element as usize];
            let root_decl = &self.decls[root_record.decl as usize];

            let mut origin = Vector2::zero();
            if let Some(floating) = root_decl.floating
                && !root.attach_id.is_none()
            {
                let anchor = self
                    .elements_by_id
                    .get(&root.attach_id)
                    .map(|e| e.bounding_box)
                    .unwrap_or_default();
                let (ex, ey) = floating.attach_points.element.factors();
                let (px, py) = floating.attach_points.parent.factors();
                origin = Vector2::new(
                    anchor.x + anchor.width * px - root_record.width * ex,
                    anchor.y + anchor.height * py - root_record.height * ey,
                ) + floating.offset;
            }

            let root_clip = if root.clip_id.is_none() {
                None
            } else {
                self.elements_by_id.get(&root.clip_id).map(|e| e.bounding_box)
            };
            if let Some(clip_box) = root_clip {
                self.commands.push(RenderCommand {
                    bounding_box: clip_box,
                    id: root.clip_id,
                    z_index: root.z_index,
                    kind: RenderKind::ScissorStart { horizontal: true, vertical: true },
                });
            }

            stack.clear();
            stack.push(Visit { element: root.element, origin, exiting: false });

            while let Some(visit) = stack.pop() {
                let record = records[visit.element as usize];
                let id = ElementId::from_raw(record.id);
                let bbox = BoundingBox::new(visit.origin.x, visit.origin.y, record.width, record.height);
                let visible = !culling || bbox.overlaps(viewport);
                let decl = &self.decls[record.decl as usize];

                if visit.exiting {
                    if decl.clip.is_some() {
                        self.commands.push(RenderCommand {
                            bounding_box: bbox,
                            id,
                            z_index: root.z_index,
                            kind: RenderKind::ScissorEnd,
                        });
                    }
                    if let Some(border) = decl.border
                        && visible
                        && !border.width.is_zero()
                    {
                        self.commands.push(RenderCommand {
                            bounding_box: bbox,
                            id,
                            z_index: root.z_index,
                            kind: RenderKind::Border {
                                color: border.color,
                                corner_radius: decl.corner_radius,
                                width: border.width,
                            },
                        });

                        let between = f32::from(border.width.between_children);
                        let kids = &children[record.children()];
                        if between > 0.0 && kids.len() > 1 {
                            let x_axis = decl.layout.direction.is_x();
                            let inset = (f32::from(decl.layout.child_gap) - between) / 2.0;
                            for &kid in &kids[..kids.len() - 1] {
                                let Some(child) = self
                                    .elements_by_id
                                    .get(&ElementId::from_raw(records[kid as usize].id))
                                    .map(|e| e.bounding_box)
                                else {
                                    continue;
                                };
                                let line = if x_axis {
                                    BoundingBox::new(child.x + child.width + inset, bbox.y, between, bbox.height)
                                } else {
                                    BoundingBox::new(bbox.x, child.y + child.height + inset, bbox.width, between)
                                };
                                self.commands.push(RenderCommand {
                                    bounding_box: line,
                                    id,
                                    z_index: root.z_index,
                                    kind: RenderKind::Rectangle {
                                        color: border.color,
                                        corner_radius: CornerRadius::default(),
                                    },
                                });
                            }
                        }
                    }
                    continue;
                }

                if let Some(entry) = self.elements_by_id.get_mut(&id)
                    && entry.element == visit.element
                {
                    entry.bounding_box = bbox;
                }

                if record.is_text() {
                    let t = &self.texts[record.text as usize];
                    let natural = t.preferred.height;
                    let line_height = if t.config.line_height > 0 {
                        f32::from(t.config.line_height)
                    } else {
                        natural
                    };
                    let y_pad = (line_height - natural) / 2.0;
                    let align = match t.config.alignment {
                        TextAlignment::Left => 0.0,
                        TextAlignment::Center => 0.5,
                        TextAlignment::Right => 1.0,
                    };

                    for (n, line) in self.lines[t.lines.clone()].iter().enumerate() {
                        if line.start == line.end {
                            continue;
                        }
                        let line_box = BoundingBox::new(
                            bbox.x + (bbox.width - line.width).max(0.0) * align,
                            bbox.y + n as f32 * line_height + y_pad,
                            line.width,
                            natural,
                        );
                        if culling && !line_box.overlaps(viewport) {
                            continue;
                        }
                        self.commands.push(RenderCommand {
                            bounding_box: line_box,
                            id,
                            z_index: root.z_index,
                            kind: RenderKind::Text {
                                text: t.text[line.start..line.end].to_owned(),
                                color: t.config.color,
                                font_id: t.config.font_id,
                                font_size: t.config.font_size,
                                letter_spacing: t.config.letter_spacing,
                                line_height: t.config.line_height,
                            },
                        });
                    }
                    continue;
                }

                if visible && decl.background.is_visible() {
                    self.commands.push(RenderCommand {
                        bounding_box: bbox,
                        id,
                        z_index: root.z_index,
                        kind: RenderKind::Rectangle {
                            color: decl.background,
                            corner_radius: decl.corner_radius,
                        },
                    });
                }
                if let Some(clip) = decl.clip {
                    self.commands.push(RenderCommand {
                        bounding_box: bbox,
                        id,
                        z_index: root.z_index,
                        kind: RenderKind::ScissorStart {
                            horizontal: clip.horizontal,
                            vertical: clip.vertical,
                        },
                    });
                }
                stack.push(Visit { exiting: true, ..visit });

                let layout = &decl.layout;
                let x_axis = layout.direction.is_x();
                let kids = &children[record.children()];
                let gap = f32::from(layout.child_gap);

                let content_along = kids.iter().map(|&k| records[k as usize].dim(x_axis)).sum::<f32>()
                    + gap * kids.len().saturating_sub(1) as f32;
                let content_across = kids
                    .iter()
                    .map(|&k| records[k as usize].dim(!x_axis))
                    .fold(0.0f32, f32::max);

                if let Some(clip) = decl.clip
                    && let Some(container) = self.scroll.iter_mut().find(|s| s.id == id)
                {
                    let pad_x = layout.padding.axis_total(true);
                    let pad_y = layout.padding.axis_total(false);
                    container.viewport = bbox;
                    container.content_size = if x_axis {
                        Dimensions::new(content_along + pad_x, content_across + pad_y)
                    } else {
                        Dimensions::new(content_across + pad_x, content_along + pad_y)
                    };
                    container.horizontal = clip.horizontal;
                    container.vertical = clip.vertical;
                }

                let free_along = record.dim(x_axis) - layout.padding.axis_total(x_axis) - content_along;
                let mut cursor = layout.padding.axis_start(x_axis)
                    + free_along.max(0.0) * layout.child_alignment.factor(x_axis);
                let child_offset = decl.clip.map_or(Vector2::zero(), |c| c.child_offset);

                let first_child = stack.len();
                for &kid in kids {
                    let child = &records[kid as usize];
                    let free_across =
                        record.dim(!x_axis) - layout.padding.axis_total(!x_axis) - child.dim(!x_axis);
                    let across = layout.padding.axis_start(!x_axis)
                        + free_across.max(0.0) * layout.child_alignment.factor(!x_axis);
                    let offset = if x_axis {
                        Vector2::new(cursor, across)
                    } else {
                        Vector2::new(across, cursor)
                    };
                    stack.push(Visit {
                        element: kid,
                        origin: visit.origin + offset + child_offset,
                        exiting: false,
                    });
                    cursor += child.dim(x_axis) + gap;
                }
                stack[first_child..].reverse();
            }

            if let Some(clip_box) = root_clip {
                self.commands.push(RenderCommand {
                    bounding_box: clip_box,
                    id: root.clip_id,
                    z_index: root.z_index,
                    kind: RenderKind::ScissorEnd,
                });
            }
        }

        self.visit_buffer = stack;
    }

    /// Whether the floating root that owns `element` swallows pointer hits.
    pub(super) fn captures_pointer(&self, element: u32) -> bool {
        let record = &self.arena.get(&self.tables.records)[element as usize];
        record.is_floating()
            && self.decls[record.decl as usize]
                .floating
                .is_some_and(|f| f.pointer_capture == PointerCapture::Capture)
    }
}
