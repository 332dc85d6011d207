//! The generated font: line metrics, packed samples and the glyph index.

use std::ops::Range;

use gray4_font::{GlyphInfo, packed_len};

use crate::{
    error::{Error, Result},
    metrics::LineMetrics,
};

/// Index entry for one character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphRecord {
    pub character: char,
    pub width: u32,
    pub height: u32,
    pub x_offset: i32,
    /// Distance from the top of the line box down to the top of the bitmap.
    pub y_offset: i32,
    pub x_advance: i32,
    /// Where this glyph's packed samples start; for glyphs without ink, the
    /// buffer length at the point the glyph was visited.
    pub data_offset: u32,
}

impl GlyphRecord {
    pub fn has_ink(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Bytes this glyph occupies in the packed buffer.
    pub fn packed_len(&self) -> usize {
        packed_len(self.width as usize, self.height as usize)
    }

    pub fn data_range(&self) -> Range<usize> {
        let start = self.data_offset as usize;
        start..start + self.packed_len()
    }
}

impl TryFrom<&GlyphRecord> for GlyphInfo {
    type Error = Error;

    fn try_from(record: &GlyphRecord) -> Result<Self> {
        let character = record.character;
        let overflow = |field: &'static str, value: i64| Error::FieldOverflow { character, field, value };

        Ok(GlyphInfo {
            character,
            width: u8::try_from(record.width).map_err(|_| overflow("width", record.width.into()))?,
            height: u8::try_from(record.height)
                .map_err(|_| overflow("height", record.height.into()))?,
            x_offset: i8::try_from(record.x_offset)
                .map_err(|_| overflow("x_offset", record.x_offset.into()))?,
            y_offset: i8::try_from(record.y_offset)
                .map_err(|_| overflow("y_offset", record.y_offset.into()))?,
            x_advance: u8::try_from(record.x_advance)
                .map_err(|_| overflow("x_advance", record.x_advance.into()))?,
            data_offset: record.data_offset,
        })
    }
}

/// A converted font. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontAsset {
    metrics: LineMetrics,
    packed_data: Vec<u8>,
    glyphs: Vec<GlyphRecord>,
}

impl FontAsset {
    pub(crate) fn new(metrics: LineMetrics, packed_data: Vec<u8>, glyphs: Vec<GlyphRecord>) -> Self {
        Self { metrics, packed_data, glyphs }
    }

    pub fn baseline(&self) -> u32 {
        self.metrics.baseline
    }

    pub fn line_height(&self) -> u32 {
        self.metrics.line_height
    }

    /// The line box together with the ink extrema it was derived from.
    pub fn metrics(&self) -> &LineMetrics {
        &self.metrics
    }

    /// Packed 4-bit samples, two per byte, high nibble first.
    pub fn packed_data(&self) -> &[u8] {
        &self.packed_data
    }

    /// Glyph index, strictly ascending by character.
    pub fn glyphs(&self) -> &[GlyphRecord] {
        &self.glyphs
    }

    pub fn get_glyph(&self, character: char) -> Option<&GlyphRecord> {
        self.glyphs
            .binary_search_by_key(&character, |g| g.character)
            .ok()
            .map(|idx| &self.glyphs[idx])
    }

    /// The packed bytes of `glyph`.
    pub fn glyph_data(&self, glyph: &GlyphRecord) -> &[u8] {
        &self.packed_data[glyph.data_range()]
    }

    pub fn glyph_count(&self) -> usize {
        self.glyphs.len()
    }

    pub fn data_size(&self) -> usize {
        self.packed_data.len()
    }

    /// The index as runtime [`GlyphInfo`] values, checking every field fits.
    pub fn glyph_infos(&self) -> Result<Vec<GlyphInfo>> {
        self.glyphs.iter().map(GlyphInfo::try_from).collect()
    }
}
