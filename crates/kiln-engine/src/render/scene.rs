use std::ops::Range;

use crate::coords::Rect;
use crate::scene::{DrawCmd, DrawList};
use crate::text::FontSystem;

use super::quad::{QuadInstance, QuadRenderer};
use super::text::{GlyphInstance, TextRenderer};
use super::{RenderCtx, RenderTarget};

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum BatchKind {
    Quad,
    Text,
}

/// A run of consecutive instances drawn with one pipeline and one scissor.
#[derive(Debug, Clone, PartialEq)]
struct Batch {
    kind: BatchKind,
    clip: Option<Rect>,
    instances: Range<u32>,
}

/// Extends the last batch when kind and clip match and the ranges touch.
fn push_batch(batches: &mut Vec<Batch>, kind: BatchKind, clip: Option<Rect>, instances: Range<u32>) {
    if instances.is_empty() {
        return;
    }
    if let Some(last) = batches.last_mut()
        && last.kind == kind
        && last.clip == clip
        && last.instances.end == instances.start
    {
        last.instances.end = instances.end;
        return;
    }
    batches.push(Batch { kind, clip, instances });
}

/// Draws a [`DrawList`] in paint order.
///
/// Items are grouped into batches by kind and clip rect, so interleaved
/// quads and text keep their relative order while consecutive items of the
/// same kind share one draw call. Everything goes into a single render pass
/// that loads the cleared target.
pub struct SceneRenderer {
    quads: QuadRenderer,
    text: TextRenderer,
    quad_instances: Vec<QuadInstance>,
    glyph_instances: Vec<GlyphInstance>,
    batches: Vec<Batch>,
}

impl Default for SceneRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneRenderer {
    pub fn new() -> Self {
        Self {
            quads: QuadRenderer::new(),
            text: TextRenderer::new(),
            quad_instances: Vec::new(),
            glyph_instances: Vec::new(),
            batches: Vec::new(),
        }
    }

    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        draw_list: &mut DrawList,
        fonts: &FontSystem,
    ) {
        self.quad_instances.clear();
        self.glyph_instances.clear();
        self.batches.clear();

        for item in draw_list.iter_in_paint_order() {
            match &item.cmd {
                DrawCmd::Quad(cmd) => {
                    let start = self.quad_instances.len() as u32;
                    self.quad_instances.extend(QuadInstance::from_cmd(cmd));
                    let end = self.quad_instances.len() as u32;
                    push_batch(&mut self.batches, BatchKind::Quad, item.clip, start..end);
                }
                DrawCmd::Text(cmd) => {
                    let start = self.glyph_instances.len() as u32;
                    self.text.append_glyphs(ctx, fonts, cmd, &mut self.glyph_instances);
                    let end = self.glyph_instances.len() as u32;
                    push_batch(&mut self.batches, BatchKind::Text, item.clip, start..end);
                }
            }
        }

        if self.batches.is_empty() {
            return;
        }

        self.quads.prepare(ctx, &self.quad_instances);
        self.text.prepare(ctx, &self.glyph_instances);

        let full = Rect::new(0.0, 0.0, ctx.viewport.width, ctx.viewport.height);

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("kiln scene pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations { load: wgpu::LoadOp::Load, store: wgpu::StoreOp::Store },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        for batch in &self.batches {
            let Some((x, y, w, h)) = batch.clip.unwrap_or(full).to_scissor(ctx.viewport, ctx.scale_factor)
            else {
                continue;
            };
            rpass.set_scissor_rect(x, y, w, h);
            match batch.kind {
                BatchKind::Quad => self.quads.draw(&mut rpass, batch.instances.clone()),
                BatchKind::Text => self.text.draw(&mut rpass, batch.instances.clone()),
            }
        }
    }
}
