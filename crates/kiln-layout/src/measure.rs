//! Text measurement capability and the per-string measurement cache.

use std::collections::HashMap;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::config::TextConfig;
use crate::geometry::Dimensions;

/// Measures a run of text that contains no line breaks.
///
/// Implementations should include `config.letter_spacing` in the returned
/// width. Heights are the line height of the font at `config.font_size`.
pub trait MeasureText {
    fn measure_text(&self, text: &str, config: &TextConfig) -> Dimensions;
}

impl<F> MeasureText for F
where
    F: Fn(&str, &TextConfig) -> Dimensions,
{
    fn measure_text(&self, text: &str, config: &TextConfig) -> Dimensions {
        self(text, config)
    }
}

/// One word of a measured string. Offsets are byte offsets into the source.
///
/// A zero-length word marks an explicit line break.
#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) struct MeasuredWord {
    pub start: usize,
    pub len: usize,
    pub width: f32,
}

impl MeasuredWord {
    #[inline]
    pub fn is_newline(&self) -> bool {
        self.len == 0
    }
}

#[derive(Debug, Clone)]
pub(crate) struct MeasuredText {
    pub dimensions: Dimensions,
    /// Width of the widest single word.
    pub min_width: f32,
    pub space_width: f32,
    pub words: Vec<MeasuredWord>,
    pub has_newlines: bool,
    last_used: u32,
}

#[derive(Debug, Default)]
pub(crate) struct MeasureCache {
    entries: HashMap<u64, MeasuredText>,
}

pub(crate) fn cache_key(text: &str, config: &TextConfig) -> u64 {
    let mut h = DefaultHasher::new();
    text.hash(&mut h);
    config.font_id.hash(&mut h);
    config.font_size.hash(&mut h);
    config.letter_spacing.hash(&mut h);
    h.finish()
}

impl MeasureCache {
    pub fn measure(
        &mut self,
        key: u64,
        text: &str,
        config: &TextConfig,
        measurer: &dyn MeasureText,
        frame: u32,
    ) -> &MeasuredText {
        let entry = self
            .entries
            .entry(key)
            .or_insert_with(|| measure_words(text, config, measurer));
        entry.last_used = frame;
        entry
    }

    pub fn get(&self, key: u64) -> Option<&MeasuredText> {
        self.entries.get(&key)
    }

    /// Drops strings that were not measured in the given frame or the one before.
    pub fn evict_stale(&mut self, frame: u32) {
        self.entries.retain(|_, e| frame.wrapping_sub(e.last_used) <= 1);
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

fn measure_words(text: &str, config: &TextConfig, measurer: &dyn MeasureText) -> MeasuredText {
    let space_width = measurer.measure_text(" ", config).width;
    let letter_spacing = f32::from(config.letter_spacing);

    let mut words = Vec::new();
    let mut min_width = 0.0f32;
    let mut height = 0.0f32;
    let mut line_width = 0.0f32;
    let mut max_line_width = 0.0f32;
    let mut has_newlines = false;
    let mut start = 0usize;

    for (end, b) in text.bytes().enumerate() {
        if b != b' ' && b != b'\n' {
            continue;
        }

        let len = end - start;
        let mut dims = if len > 0 {
            measurer.measure_text(&text[start..end], config)
        } else {
            Dimensions::default()
        };
        min_width = min_width.max(dims.width);
        height = height.max(dims.height);

        if b == b' ' {
            dims.width += space_width;
            words.push(MeasuredWord { start, len: len + 1, width: dims.width });
            line_width += dims.width;
        } else {
            if len > 0 {
                words.push(MeasuredWord { start, len, width: dims.width });
            }
            words.push(MeasuredWord { start: end + 1, len: 0, width: 0.0 });
            line_width += dims.width;
            max_line_width = max_line_width.max(line_width);
            has_newlines = true;
            line_width = 0.0;
        }

        start = end + 1;
    }

    if start < text.len() {
        let dims = measurer.measure_text(&text[start..], config);
        words.push(MeasuredWord { start, len: text.len() - start, width: dims.width });
        line_width += dims.width;
        height = height.max(dims.height);
        min_width = min_width.max(dims.width);
    }

    if height == 0.0 {
        height = measurer.measure_text(" ", config).height;
    }

    max_line_width = max_line_width.max(line_width) - letter_spacing;

    MeasuredText {
        dimensions: Dimensions::new(max_line_width, height),
        min_width,
        space_width,
        words,
        has_newlines,
        last_used: 0,
    }
}
