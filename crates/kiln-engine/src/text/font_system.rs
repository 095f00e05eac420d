use std::fmt;

use crate::coords::Vec2;

/// Error returned by [`FontSystem::load_font`].
#[derive(Debug, Clone)]
pub struct FontLoadError(pub String);

impl fmt::Display for FontLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "font load error: {}", self.0)
    }
}

impl std::error::Error for FontLoadError {}

/// Handle to a font loaded into a [`FontSystem`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct FontId(pub(crate) usize);

/// Vertical metrics of one line at a given pixel size.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LineMetrics {
    /// Distance from the top of the line box to the baseline.
    pub ascent: f32,
    pub line_height: f32,
}

/// Owns the loaded fonts.
///
/// Shared between text measurement (layout) and the glyph renderer so both
/// place glyphs with the same advances, kerning and letter spacing.
#[derive(Default)]
pub struct FontSystem {
    fonts: Vec<fontdue::Font>,
}

impl FontSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a TrueType/OpenType font from memory.
    pub fn load_font(&mut self, bytes: &[u8]) -> Result<FontId, FontLoadError> {
        let font = fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default())
            .map_err(|e| FontLoadError(e.to_string()))?;
        let id = FontId(self.fonts.len());
        self.fonts.push(font);
        log::debug!("loaded font {:?} ({} glyphs)", id, self.fonts[id.0].glyph_count());
        Ok(id)
    }

    pub fn font_count(&self) -> usize {
        self.fonts.len()
    }

    pub(crate) fn get(&self, id: FontId) -> Option<&fontdue::Font> {
        self.fonts.get(id.0)
    }

    pub fn line_metrics(&self, id: FontId, size: f32) -> LineMetrics {
        match self.get(id).and_then(|f| f.horizontal_line_metrics(size)) {
            Some(m) => LineMetrics { ascent: m.ascent, line_height: m.new_line_size },
            None => LineMetrics { ascent: size * 0.8, line_height: size * 1.2 },
        }
    }

    pub fn line_height(&self, id: FontId, size: f32) -> f32 {
        self.line_metrics(id, size).line_height
    }

    /// Size of a single line: pen advance (letter spacing included after
    /// every glyph) by line height.
    #[must_use]
    pub fn measure_text(&self, text: &str, id: FontId, size: f32, letter_spacing: f32) -> Vec2 {
        let height = self.line_height(id, size);
        let Some(font) = self.get(id) else {
            return Vec2::new(0.0, height);
        };
        let width = walk_line(font, text, size, letter_spacing, |_, _| {});
        Vec2::new(width, height)
    }

    /// Pen x of every character of a line, relative to the line start.
    pub(crate) fn pen_positions(
        font: &fontdue::Font,
        text: &str,
        size: f32,
        letter_spacing: f32,
        out: &mut Vec<(char, f32)>,
    ) {
        out.clear();
        walk_line(font, text, size, letter_spacing, |ch, x| out.push((ch, x)));
    }
}

fn walk_line(
    font: &fontdue::Font,
    text: &str,
    size: f32,
    letter_spacing: f32,
    mut visit: impl FnMut(char, f32),
) -> f32 {
    let mut pen = 0.0f32;
    let mut prev: Option<char> = None;
    for ch in text.chars() {
        if let Some(p) = prev {
            pen += font.horizontal_kern(p, ch, size).unwrap_or(0.0);
        }
        visit(ch, pen);
        pen += font.metrics(ch, size).advance_width + letter_spacing;
        prev = Some(ch);
    }
    pen.max(0.0)
}
