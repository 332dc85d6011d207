//! Minimal line box from the ink of all rasterized glyphs.

use crate::raster::GlyphSample;

/// The line box shared by every glyph of a font.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineMetrics {
    /// Pixels from the top of the line box down to the baseline.
    pub baseline: u32,
    /// Height of the line box.
    pub line_height: u32,
    /// Highest ink row above the baseline (never below it).
    pub max_top: i32,
    /// Lowest ink row relative to the baseline (never above it).
    pub min_bottom: i32,
}

impl LineMetrics {
    /// Distance from the top of the line box down to the top of `sample`'s bitmap.
    pub fn y_offset(&self, sample: &GlyphSample) -> i32 {
        self.baseline as i32 - sample.top
    }
}

/// Scan every ink-bearing glyph for the tightest line box containing all of them.
///
/// The box always contains the baseline: extrema start at zero, so a set without
/// any ink yields a zero baseline and zero line height.
pub fn reduce_metrics<'s>(samples: impl IntoIterator<Item = &'s GlyphSample>) -> LineMetrics {
    let (max_top, min_bottom) = samples
        .into_iter()
        .filter(|sample| sample.has_ink())
        .fold((0, 0), |(top, bottom), sample| {
            (top.max(sample.top), bottom.min(sample.bottom()))
        });

    LineMetrics {
        baseline: max_top as u32,
        line_height: (max_top - min_bottom) as u32,
        max_top,
        min_bottom,
    }
}
