//! # Gray4 Font
//!
//! Runtime side of the Gray4 bitmap font format: 4-bit (16 level) anti-aliased
//! glyphs, two pixels per byte, looked up by binary search on the character.
//!
//! Fonts are generated ahead of time as `const` items referencing these types.
//!
//! ## Example
//!
//! ```
//! use gray4_font::{GlyphInfo, Gray4Font};
//!
//! const FONT: Gray4Font = Gray4Font {
//!     baseline: 2,
//!     line_height: 2,
//!     packed_data: &[0xF0, 0x7F],
//!     glyphs: &[GlyphInfo {
//!         character: 'a',
//!         width: 2,
//!         height: 2,
//!         x_offset: 0,
//!         y_offset: 0,
//!         x_advance: 3,
//!         data_offset: 0,
//!     }],
//! };
//!
//! let glyph = FONT.get_glyph('a').unwrap();
//! assert_eq!(FONT.get_pixel(glyph, 0, 0), 15);
//! assert_eq!(FONT.get_pixel(glyph, 0, 1), 7);
//! ```

#![no_std]

/// Number of gray levels a single pixel can take.
pub const LEVELS: u8 = 16;

/// Largest pixel value (fully covered).
pub const MAX_LEVEL: u8 = LEVELS - 1;

/// Glyph info - stores position in the packed data array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphInfo {
    pub character: char,
    pub width: u8,
    pub height: u8,
    /// Horizontal bearing from the pen position.
    pub x_offset: i8,
    /// Distance from the top of the line box down to the top of the bitmap.
    pub y_offset: i8,
    /// How far to advance after drawing.
    pub x_advance: u8,
    /// Offset of the first packed byte in [`Gray4Font::packed_data`].
    pub data_offset: u32,
}

impl GlyphInfo {
    /// Whether the glyph has any pixels at all (space has none).
    pub fn has_ink(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Number of packed bytes this glyph occupies.
    pub fn packed_len(&self) -> usize {
        packed_len(self.width as usize, self.height as usize)
    }
}

/// Bytes needed to hold `width * height` 4-bit samples.
pub const fn packed_len(width: usize, height: usize) -> usize {
    (width * height).div_ceil(2)
}

/// Gray4 font - packed format for efficient storage.
#[derive(Debug, Clone, Copy)]
pub struct Gray4Font {
    /// Pixels from the top of the line box to the text baseline.
    pub baseline: u32,
    /// Height of the line box, derived from the actual glyph ink.
    pub line_height: u32,
    /// Packed pixel data, 2 pixels per byte, high nibble first.
    pub packed_data: &'static [u8],
    /// Glyph lookup table, sorted by character.
    pub glyphs: &'static [GlyphInfo],
}

impl Gray4Font {
    /// Binary search for a character.
    pub fn get_glyph(&self, c: char) -> Option<&GlyphInfo> {
        self.glyphs
            .binary_search_by_key(&c, |g| g.character)
            .ok()
            .map(|idx| &self.glyphs[idx])
    }

    /// Get pixel value at (x, y) within a glyph.
    ///
    /// Coordinates outside the glyph, or past the end of the packed data, read as 0.
    pub fn get_pixel(&self, glyph: &GlyphInfo, x: u32, y: u32) -> u8 {
        if x >= glyph.width as u32 || y >= glyph.height as u32 {
            return 0;
        }

        let pixel_index = y * glyph.width as u32 + x;
        let byte_index = glyph.data_offset + pixel_index / 2;
        let Some(&byte) = self.packed_data.get(byte_index as usize) else {
            return 0;
        };

        if pixel_index % 2 == 0 {
            (byte >> 4) & 0x0F
        } else {
            byte & 0x0F
        }
    }

    /// The packed bytes belonging to `glyph`.
    pub fn glyph_data(&self, glyph: &GlyphInfo) -> &'static [u8] {
        let start = glyph.data_offset as usize;
        let end = start + glyph.packed_len();
        self.packed_data.get(start..end).unwrap_or(&[])
    }

    /// Horizontal extent of `text` in pixels.
    ///
    /// Characters missing from the font fall back to a fraction of the line height.
    pub fn text_width(&self, text: &str) -> u32 {
        text.chars()
            .map(|ch| match self.get_glyph(ch) {
                Some(glyph) => glyph.x_advance as u32,
                None if ch == ' ' => self.line_height / 4,
                None => self.line_height / 3,
            })
            .sum()
    }
}
