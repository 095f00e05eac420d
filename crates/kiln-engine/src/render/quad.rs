use std::ops::Range;

use bytemuck::{Pod, Zeroable};

use crate::scene::QuadCmd;

use super::RenderCtx;
use super::common::{create_pipeline, InstanceBuffer, UnitQuad, ViewportUniform};

/// SDF rounded-rectangle pipeline with per-corner radii and per-side borders.
pub(super) struct QuadRenderer {
    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,
    bind_group: Option<wgpu::BindGroup>,
    viewport_ubo: Option<wgpu::Buffer>,
    unit_quad: Option<UnitQuad>,
    instances: InstanceBuffer,
}

impl QuadRenderer {
    pub fn new() -> Self {
        Self {
            pipeline_format: None,
            pipeline: None,
            bind_group: None,
            viewport_ubo: None,
            unit_quad: None,
            instances: InstanceBuffer::new::<QuadInstance>("kiln quad instances"),
        }
    }

    /// Uploads this frame's instances. Call before opening the render pass.
    pub fn prepare(&mut self, ctx: &RenderCtx<'_>, instances: &[QuadInstance]) {
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

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("kiln quad shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/quad.wgsl").into()),
        });

        let bgl = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("kiln quad bgl"),
            entries: &[ViewportUniform::layout_entry()],
        });

        let ubo = ViewportUniform::create_buffer(ctx.device, "kiln quad viewport ubo");
        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("kiln quad bind group"),
            layout: &bgl,
            entries: &[wgpu::BindGroupEntry { binding: 0, resource: ubo.as_entire_binding() }],
        });

        self.pipeline = Some(create_pipeline(ctx, "kiln quad pipeline", &shader, &bgl, QuadInstance::layout()));
        self.pipeline_format = Some(ctx.surface_format);
        self.bind_group = Some(bind_group);
        self.viewport_ubo = Some(ubo);
    }
}

/// Instance data (96 bytes):
///
///  offset  0  origin         [f32; 2]  loc 1
///  offset  8  size           [f32; 2]  loc 2
///  offset 16  radii          [f32; 4]  loc 3  (tl, tr, br, bl)
///  offset 32  fill           [f32; 4]  loc 4
///  offset 48  border_widths  [f32; 4]  loc 5  (left, top, right, bottom)
///  offset 64  border_color   [f32; 4]  loc 6
///  offset 80  _pad           [f32; 4]
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub(super) struct QuadInstance {
    pub origin: [f32; 2],
    pub size: [f32; 2],
    pub radii: [f32; 4],
    pub fill: [f32; 4],
    pub border_widths: [f32; 4],
    pub border_color: [f32; 4],
    pub _pad: [f32; 4],
}

impl QuadInstance {
    const ATTRS: [wgpu::VertexAttribute; 6] = wgpu::vertex_attr_array![
        1 => Float32x2, // origin
        2 => Float32x2, // size
        3 => Float32x4, // radii
        4 => Float32x4, // fill
        5 => Float32x4, // border_widths
        6 => Float32x4  // border_color
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }

    /// `None` when the quad has no area or nothing visible to paint.
    pub fn from_cmd(cmd: &QuadCmd) -> Option<Self> {
        if cmd.rect.is_empty() {
            return None;
        }

        let (border_widths, border_color) = match cmd.border {
            Some(b) if !b.color.is_transparent() => (b.widths.map(|w| w.max(0.0)), b.color.to_array()),
            _ => ([0.0; 4], [0.0; 4]),
        };
        if cmd.fill.is_transparent() && border_widths.iter().all(|&w| w == 0.0) {
            return None;
        }

        Some(Self {
            origin: [cmd.rect.origin.x, cmd.rect.origin.y],
            size: [cmd.rect.size.x, cmd.rect.size.y],
            radii: cmd.radii.to_array(),
            fill: cmd.fill.to_array(),
            border_widths,
            border_color,
            _pad: [0.0; 4],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::{CornerRadii, Rect};
    use crate::paint::Color;
    use crate::scene::Border;

    fn cmd(fill: Color, border: Option<Border>) -> QuadCmd {
        QuadCmd { rect: Rect::new(1.0, 2.0, 30.0, 40.0), radii: CornerRadii::all(8.0), fill, border }
    }

    #[test]
    fn instance_is_96_bytes() {
        assert_eq!(std::mem::size_of::<QuadInstance>(), 96);
    }

    #[test]
    fn filled_quad_copies_geometry() {
        let inst = QuadInstance::from_cmd(&cmd(Color::black(), None)).unwrap();
        assert_eq!(inst.origin, [1.0, 2.0]);
        assert_eq!(inst.size, [30.0, 40.0]);
        assert_eq!(inst.radii, [8.0; 4]);
        assert_eq!(inst.fill, [0.0, 0.0, 0.0, 1.0]);
        assert_eq!(inst.border_widths, [0.0; 4]);
    }

    #[test]
    fn border_only_quad_is_kept() {
        let border = Border { widths: [2.0, 0.0, 2.0, -1.0], color: Color::black() };
        let inst = QuadInstance::from_cmd(&cmd(Color::transparent(), Some(border))).unwrap();
        assert_eq!(inst.border_widths, [2.0, 0.0, 2.0, 0.0]);
        assert_eq!(inst.border_color, [0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn invisible_quads_are_dropped() {
        assert!(QuadInstance::from_cmd(&cmd(Color::transparent(), None)).is_none());
        let clear_border = Border { widths: [1.0; 4], color: Color::transparent() };
        assert!(QuadInstance::from_cmd(&cmd(Color::transparent(), Some(clear_border))).is_none());

        let mut empty = cmd(Color::black(), None);
        empty.rect = Rect::new(0.0, 0.0, 0.0, 10.0);
        assert!(QuadInstance::from_cmd(&empty).is_none());
    }
}
