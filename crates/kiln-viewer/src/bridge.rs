//! Glue between layout output and the engine: render commands become draw
//! list entries, and text measurement goes through the engine's fonts.

use std::rc::Rc;

use kiln_engine::coords::{CornerRadii, Rect, Vec2};
use kiln_engine::paint::Color;
use kiln_engine::scene::{Border, DrawList, QuadCmd, TextCmd};
use kiln_engine::text::{FontId, FontSystem};
use kiln_layout::{
    BorderWidth, BoundingBox, Color as LayoutColor, CornerRadius, Dimensions, MeasureText,
    RenderCommand, RenderKind, TextConfig,
};

fn color(c: LayoutColor) -> Color {
    Color::from_srgb(c.r / 255.0, c.g / 255.0, c.b / 255.0, c.a / 255.0)
}

fn rect(b: BoundingBox) -> Rect {
    Rect::new(b.x, b.y, b.width, b.height)
}

fn radii(r: CornerRadius) -> CornerRadii {
    CornerRadii::new(r.top_left, r.top_right, r.bottom_right, r.bottom_left)
}

fn border_widths(w: BorderWidth) -> [f32; 4] {
    [w.left, w.top, w.right, w.bottom].map(f32::from)
}

/// Translates a frame's [`RenderCommand`]s into a [`DrawList`].
///
/// `fonts[i]` is the engine font registered for layout font id `i`.
pub struct RenderBridge {
    draw_list: DrawList,
    fonts: Vec<FontId>,
}

impl RenderBridge {
    pub fn new(fonts: Vec<FontId>) -> Self {
        Self { draw_list: DrawList::new(), fonts }
    }

    pub fn draw_list_mut(&mut self) -> &mut DrawList {
        &mut self.draw_list
    }

    /// Replaces the draw list contents with `commands`.
    pub fn translate(&mut self, commands: &[RenderCommand]) {
        self.draw_list.clear();

        for command in commands {
            let z = i32::from(command.z_index);
            let bounds = rect(command.bounding_box);

            match &command.kind {
                RenderKind::Rectangle { color: c, corner_radius } => {
                    self.draw_list.push_quad(
                        z,
                        QuadCmd { rect: bounds, radii: radii(*corner_radius), fill: color(*c), border: None },
                    );
                }
                RenderKind::Border { color: c, corner_radius, width } => {
                    self.draw_list.push_quad(
                        z,
                        QuadCmd {
                            rect: bounds,
                            radii: radii(*corner_radius),
                            fill: Color::transparent(),
                            border: Some(Border { widths: border_widths(*width), color: color(*c) }),
                        },
                    );
                }
                RenderKind::Text { text, color: c, font_id, font_size, letter_spacing, .. } => {
                    let Some(&font) = self.fonts.get(usize::from(*font_id)) else {
                        log::debug!("skipping text with unregistered font id {font_id}");
                        continue;
                    };
                    self.draw_list.push_text(
                        z,
                        TextCmd {
                            text: text.clone(),
                            font,
                            size: f32::from(*font_size),
                            color: color(*c),
                            origin: Vec2::new(bounds.origin.x, bounds.origin.y),
                            letter_spacing: f32::from(*letter_spacing),
                        },
                    );
                }
                RenderKind::ScissorStart { .. } => self.draw_list.push_clip(bounds),
                RenderKind::ScissorEnd => self.draw_list.pop_clip(),
            }
        }
    }
}

/// Layout text measurement backed by the shared [`FontSystem`].
pub struct FontMeasure {
    fonts: Rc<FontSystem>,
    slots: Vec<FontId>,
}

impl FontMeasure {
    pub fn new(fonts: Rc<FontSystem>, slots: Vec<FontId>) -> Self {
        Self { fonts, slots }
    }
}

impl MeasureText for FontMeasure {
    fn measure_text(&self, text: &str, config: &TextConfig) -> Dimensions {
        let Some(&font) = self.slots.get(usize::from(config.font_id)) else {
            return Dimensions::default();
        };
        let m = self.fonts.measure_text(
            text,
            font,
            f32::from(config.font_size),
            f32::from(config.letter_spacing),
        );
        Dimensions::new(m.x, m.y)
    }
}

#[cfg(test)]
mod tests {
    use kiln_engine::scene::DrawCmd;
    use kiln_layout::ElementId;

    use super::*;

    const FONT: &[u8] = include_bytes!("../../../assets/DejaVuSans.ttf");

    fn fonts() -> (Rc<FontSystem>, Vec<FontId>) {
        let mut fs = FontSystem::new();
        let id = fs.load_font(FONT).expect("font loads");
        (Rc::new(fs), vec![id])
    }

    fn command(bounds: BoundingBox, kind: RenderKind) -> RenderCommand {
        RenderCommand { bounding_box: bounds, id: ElementId::new("Test"), z_index: 0, kind }
    }

    fn text_kind(font_id: u16) -> RenderKind {
        RenderKind::Text {
            text: "Squirrels".to_string(),
            color: LayoutColor::rgb(255.0, 255.0, 255.0),
            font_id,
            font_size: 16,
            letter_spacing: 0,
            line_height: 0,
        }
    }

    // ── render bridge ────────────────────────────────────────────────────

    #[test]
    fn rectangle_becomes_quad_with_reordered_radii() {
        let mut bridge = RenderBridge::new(Vec::new());
        bridge.translate(&[command(
            BoundingBox::new(1.0, 2.0, 30.0, 40.0),
            RenderKind::Rectangle {
                color: LayoutColor::rgb(255.0, 255.0, 255.0),
                corner_radius: CornerRadius::new(1.0, 2.0, 3.0, 4.0),
            },
        )]);

        let items = bridge.draw_list_mut().items().to_vec();
        assert_eq!(items.len(), 1);
        let DrawCmd::Quad(quad) = &items[0].cmd else { panic!("expected quad") };
        assert_eq!(quad.rect, Rect::new(1.0, 2.0, 30.0, 40.0));
        // top_left, top_right, bottom_right, bottom_left
        assert_eq!(quad.radii, CornerRadii::new(1.0, 2.0, 4.0, 3.0));
        assert_eq!(quad.fill, Color::from_srgb_u8(255, 255, 255, 255));
        assert!(quad.border.is_none());
    }

    #[test]
    fn border_keeps_fill_transparent() {
        let mut bridge = RenderBridge::new(Vec::new());
        let width = BorderWidth { left: 1, right: 2, top: 3, bottom: 4, between_children: 0 };
        bridge.translate(&[command(
            BoundingBox::new(0.0, 0.0, 10.0, 10.0),
            RenderKind::Border {
                color: LayoutColor::rgb(80.0, 80.0, 80.0),
                corner_radius: CornerRadius::all(0.0),
                width,
            },
        )]);

        let DrawCmd::Quad(quad) = &bridge.draw_list_mut().items()[0].cmd else {
            panic!("expected quad")
        };
        assert!(quad.fill.is_transparent());
        let border = quad.border.expect("border");
        assert_eq!(border.widths, [1.0, 3.0, 2.0, 4.0]);
    }

    #[test]
    fn scissor_pair_clips_enclosed_commands_only() {
        let (_, slots) = fonts();
        let mut bridge = RenderBridge::new(slots);
        let clip = BoundingBox::new(0.0, 0.0, 50.0, 50.0);
        bridge.translate(&[
            command(clip, RenderKind::ScissorStart { horizontal: false, vertical: true }),
            command(BoundingBox::new(0.0, 0.0, 20.0, 20.0), text_kind(0)),
            command(clip, RenderKind::ScissorEnd),
            command(BoundingBox::new(0.0, 60.0, 20.0, 20.0), text_kind(0)),
        ]);

        let items = bridge.draw_list_mut().items().to_vec();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].clip, Some(Rect::new(0.0, 0.0, 50.0, 50.0)));
        assert_eq!(items[1].clip, None);
    }

    #[test]
    fn text_uses_registered_font_and_top_left_origin() {
        let (_, slots) = fonts();
        let mut bridge = RenderBridge::new(slots.clone());
        bridge.translate(&[command(BoundingBox::new(5.0, 7.0, 80.0, 19.0), text_kind(0))]);

        let DrawCmd::Text(text) = &bridge.draw_list_mut().items()[0].cmd else {
            panic!("expected text")
        };
        assert_eq!(text.font, slots[0]);
        assert_eq!(text.size, 16.0);
        assert_eq!(text.origin, Vec2::new(5.0, 7.0));
    }

    #[test]
    fn unknown_font_id_is_skipped() {
        let (_, slots) = fonts();
        let mut bridge = RenderBridge::new(slots);
        bridge.translate(&[command(BoundingBox::new(0.0, 0.0, 10.0, 10.0), text_kind(3))]);
        assert!(bridge.draw_list_mut().is_empty());
    }

    #[test]
    fn translate_replaces_previous_frame() {
        let (_, slots) = fonts();
        let mut bridge = RenderBridge::new(slots);
        let frame = [command(BoundingBox::new(0.0, 0.0, 10.0, 10.0), text_kind(0))];
        bridge.translate(&frame);
        bridge.translate(&frame);
        assert_eq!(bridge.draw_list_mut().len(), 1);
    }

    // ── font measure ─────────────────────────────────────────────────────

    #[test]
    fn measure_matches_font_system() {
        let (fs, slots) = fonts();
        let measure = FontMeasure::new(fs.clone(), slots.clone());
        let config = TextConfig { font_size: 16, ..TextConfig::default() };

        let d = measure.measure_text("Squirrels", &config);
        let expected = fs.measure_text("Squirrels", slots[0], 16.0, 0.0);
        assert_eq!(d, Dimensions::new(expected.x, expected.y));
        assert!(d.width > 0.0);
        assert!((d.height - fs.line_height(slots[0], 16.0)).abs() < 1e-4);
    }

    #[test]
    fn measure_includes_letter_spacing() {
        let (fs, slots) = fonts();
        let measure = FontMeasure::new(fs, slots);
        let plain = TextConfig { font_size: 16, ..TextConfig::default() };
        let spaced = TextConfig { letter_spacing: 2, ..plain };

        let a = measure.measure_text("abcd", &plain);
        let b = measure.measure_text("abcd", &spaced);
        assert!((b.width - a.width - 8.0).abs() < 1e-3);
    }

    #[test]
    fn measure_unknown_font_is_empty() {
        let (fs, slots) = fonts();
        let measure = FontMeasure::new(fs, slots);
        let config = TextConfig { font_id: 9, ..TextConfig::default() };
        assert_eq!(measure.measure_text("abc", &config), Dimensions::default());
    }
}
