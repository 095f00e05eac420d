use std::collections::HashMap;
use std::ops::Range;

use bytemuck::{Pod, Zeroable};

use crate::scene::TextCmd;
use crate::text::{FontId, FontSystem};

use super::RenderCtx;
use super::common::{create_pipeline, InstanceBuffer, UnitQuad, ViewportUniform};

const ATLAS_SIZE: u32 = 1024;
const GLYPH_PADDING: u32 = 1;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
struct GlyphKey {
    font: FontId,
    ch: char,
    /// Physical pixel size, as f32 bits.
    px: u32,
}

/// Raster metrics in physical pixels plus the atlas slot.
#[derive(Debug, Copy, Clone)]
struct CachedGlyph {
    xmin: f32,
    ymin: f32,
    width: f32,
    height: f32,
    uv_min: [f32; 2],
    uv_max: [f32; 2],
}

/// Shelf-packed R8 coverage atlas.
struct Atlas {
    texture: wgpu::Texture,
    view: wgpu::TextureView,
    cursor_x: u32,
    cursor_y: u32,
    row_height: u32,
    full: bool,
}

impl Atlas {
    fn new(device: &wgpu::Device) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("kiln glyph atlas"),
            size: wgpu::Extent3d { width: ATLAS_SIZE, height: ATLAS_SIZE, depth_or_array_layers: 1 },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::R8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self {
            texture,
            view,
            cursor_x: GLYPH_PADDING,
            cursor_y: GLYPH_PADDING,
            row_height: 0,
            full: false,
        }
    }

    /// Copies a coverage bitmap in and returns its UV rect.
    fn place(&mut self, queue: &wgpu::Queue, bitmap: &[u8], w: u32, h: u32) -> Option<([f32; 2], [f32; 2])> {
        if self.full {
            return None;
        }
        if self.cursor_x + w + GLYPH_PADDING > ATLAS_SIZE {
            self.cursor_y += self.row_height + GLYPH_PADDING;
            self.cursor_x = GLYPH_PADDING;
            self.row_height = 0;
        }
        if self.cursor_y + h + GLYPH_PADDING > ATLAS_SIZE || w + 2 * GLYPH_PADDING > ATLAS_SIZE {
            log::warn!("glyph atlas is full ({ATLAS_SIZE}x{ATLAS_SIZE}); new glyphs will not render");
            self.full = true;
            return None;
        }

        let (x, y) = (self.cursor_x, self.cursor_y);
        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &self.texture,
                mip_level: 0,
                origin: wgpu::Origin3d { x, y, z: 0 },
                aspect: wgpu::TextureAspect::All,
            },
            bitmap,
            wgpu::TexelCopyBufferLayout { offset: 0, bytes_per_row: Some(w), rows_per_image: Some(h) },
            wgpu::Extent3d { width: w, height: h, depth_or_array_layers: 1 },
        );

        self.cursor_x += w + GLYPH_PADDING;
        self.row_height = self.row_height.max(h);

        let s = ATLAS_SIZE as f32;
        Some(([x as f32 / s, y as f32 / s], [(x + w) as f32 / s, (y + h) as f32 / s]))
    }
}

/// Glyph-atlas text pipeline.
///
/// Glyphs are rasterized with fontdue at physical pixel size on first use
/// and cached for the renderer's lifetime.
pub(super) struct TextRenderer {
    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,
    bind_group: Option<wgpu::BindGroup>,
    viewport_ubo: Option<wgpu::Buffer>,
    atlas: Option<Atlas>,
    unit_quad: Option<UnitQuad>,
    instances: InstanceBuffer,
    glyphs: HashMap<GlyphKey, CachedGlyph>,
    pens: Vec<(char, f32)>,
}

impl TextRenderer {
    pub fn new() -> Self {
        Self {
            pipeline_format: None,
            pipeline: None,
            bind_group: None,
            viewport_ubo: None,
            atlas: None,
            unit_quad: None,
            instances: InstanceBuffer::new::<GlyphInstance>("kiln glyph instances"),
            glyphs: HashMap::new(),
            pens: Vec::new(),
        }
    }

    /// Lays out one text run and appends its glyph quads to `out`.
    pub fn append_glyphs(
        &mut self,
        ctx: &RenderCtx<'_>,
        fonts: &FontSystem,
        cmd: &TextCmd,
        out: &mut Vec<GlyphInstance>,
    ) {
        let Some(font) = fonts.get(cmd.font) else {
            log::warn!("text run uses unknown font {:?}; skipped", cmd.font);
            return;
        };
        let atlas = self.atlas.get_or_insert_with(|| Atlas::new(ctx.device));

        let scale = ctx.scale_factor.max(0.01);
        let px = cmd.size * scale;
        let baseline = cmd.origin.y + fonts.line_metrics(cmd.font, cmd.size).ascent;
        let snap = |v: f32| (v * scale).round() / scale;
        let color = cmd.color.to_array();

        FontSystem::pen_positions(font, &cmd.text, cmd.size, cmd.letter_spacing, &mut self.pens);

        for &(ch, pen_x) in &self.pens {
            let key = GlyphKey { font: cmd.font, ch, px: px.to_bits() };
            let glyph = match self.glyphs.get(&key) {
                Some(g) => *g,
                None => {
                    let (m, bitmap) = font.rasterize(ch, px);
                    let (w, h) = (m.width as u32, m.height as u32);
                    let (uv_min, uv_max) = if w == 0 || h == 0 {
                        ([0.0; 2], [0.0; 2])
                    } else {
                        match atlas.place(ctx.queue, &bitmap, w, h) {
                            Some(uv) => uv,
                            None => continue,
                        }
                    };
                    let g = CachedGlyph {
                        xmin: m.xmin as f32,
                        ymin: m.ymin as f32,
                        width: w as f32,
                        height: h as f32,
                        uv_min,
                        uv_max,
                    };
                    self.glyphs.insert(key, g);
                    g
                }
            };

            if glyph.width == 0.0 || glyph.height == 0.0 {
                continue;
            }

            let x = snap(cmd.origin.x + pen_x + glyph.xmin / scale);
            let y = snap(baseline - (glyph.ymin + glyph.height) / scale);
            out.push(GlyphInstance {
                dst_min: [x, y],
                dst_max: [x + glyph.width / scale, y + glyph.height / scale],
                uv_min: glyph.uv_min,
                uv_max: glyph.uv_max,
                color,
            });
        }
    }

    /// Uploads this frame's glyph instances. Call before opening the render pass.
    pub fn prepare(&mut self, ctx: &RenderCtx<'_>, instances: &[GlyphInstance]) {
        if instances.is_empty() {
            return;
        }
        self.ensure_pipeline(ctx);
        if self.unit_quad.is_none() {
            self.unit_quad = Some(UnitQuad::new(ctx.device));
        }
        if let Some(ubo) = &self.viewport_ubo {
            ViewportUniform::write(ctx, ubo);
        }
        self.instances.upload(ctx, instances);
    }

    pub fn draw(&self, rpass: &mut wgpu::RenderPass<'_>, range: Range<u32>) {
        let (Some(pipeline), Some(bind_group), Some(unit_quad), Some(instances)) = (
            self.pipeline.as_ref(),
            self.bind_group.as_ref(),
            self.unit_quad.as_ref(),
            self.instances.buffer(),
        ) else {
            return;
        };
        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, bind_group, &[]);
        unit_quad.bind(rpass, instances);
        UnitQuad::draw(rpass, range);
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }
        let Some(atlas) = self.atlas.as_ref() else {
            return;
        };

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("kiln text shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/text.wgsl").into()),
        });

        let bgl = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("kiln text bgl"),
            entries: &[
                ViewportUniform::layout_entry(),
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let sampler = ctx.device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("kiln text sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        let ubo = ViewportUniform::create_buffer(ctx.device, "kiln text viewport ubo");
        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("kiln text bind group"),
            layout: &bgl,
            entries: &[
                wgpu::BindGroupEntry { binding: 0, resource: ubo.as_entire_binding() },
                wgpu::BindGroupEntry { binding: 1, resource: wgpu::BindingResource::TextureView(&atlas.view) },
                wgpu::BindGroupEntry { binding: 2, resource: wgpu::BindingResource::Sampler(&sampler) },
            ],
        });

        self.pipeline = Some(create_pipeline(ctx, "kiln text pipeline", &shader, &bgl, GlyphInstance::layout()));
        self.pipeline_format = Some(ctx.surface_format);
        self.bind_group = Some(bind_group);
        self.viewport_ubo = Some(ubo);
    }
}

/// Instance data (48 bytes):
///
///  offset  0  dst_min  [f32; 2]  loc 1
///  offset  8  dst_max  [f32; 2]  loc 2
///  offset 16  uv_min   [f32; 2]  loc 3
///  offset 24  uv_max   [f32; 2]  loc 4
///  offset 32  color    [f32; 4]  loc 5
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub(super) struct GlyphInstance {
    pub dst_min: [f32; 2],
    pub dst_max: [f32; 2],
    pub uv_min: [f32; 2],
    pub uv_max: [f32; 2],
    pub color: [f32; 4],
}

impl GlyphInstance {
    const ATTRS: [wgpu::VertexAttribute; 5] = wgpu::vertex_attr_array![
        1 => Float32x2, // dst_min
        2 => Float32x2, // dst_max
        3 => Float32x2, // uv_min
        4 => Float32x2, // uv_max
        5 => Float32x4  // color
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<GlyphInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}
