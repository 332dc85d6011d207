//! Gamma-corrected 4-bit quantization and nibble packing.

use std::iter::repeat;

use gray4_font::MAX_LEVEL;

use crate::{
    asset::{FontAsset, GlyphRecord},
    config::DEFAULT_GAMMA,
    metrics::LineMetrics,
    raster::GlyphSample,
};

/// Maps 8-bit coverage to 4-bit gray levels through a gamma curve.
#[derive(Debug, Clone)]
pub struct Quantizer {
    levels: [u8; 256],
}

impl Quantizer {
    pub fn new(gamma: f64) -> Self {
        let mut levels = [0; 256];
        for (coverage, level) in levels.iter_mut().enumerate() {
            *level = quantize_level(coverage as u8, gamma);
        }
        Self { levels }
    }

    pub fn quantize(&self, coverage: u8) -> u8 {
        self.levels[coverage as usize]
    }
}

impl Default for Quantizer {
    fn default() -> Self {
        Self::new(DEFAULT_GAMMA)
    }
}

/// `trunc((coverage / 255) ^ (1 / gamma) * 15)`
pub fn quantize_level(coverage: u8, gamma: f64) -> u8 {
    let corrected = (f64::from(coverage) / 255.0).powf(1.0 / gamma);
    ((corrected * f64::from(MAX_LEVEL)) as u8).min(MAX_LEVEL)
}

/// Append `levels` two per byte, high nibble first; an odd tail leaves the low nibble 0.
pub fn pack_levels(levels: &[u8], out: &mut Vec<u8>) {
    out.extend(levels.chunks(2).map(|pair| {
        let low = pair.get(1).copied().unwrap_or(0);
        (pair[0] << 4) | (low & 0x0F)
    }));
}

/// Quantized levels of `sample`, exactly `width * height` of them.
///
/// Missing coverage (including an empty buffer) reads as zero.
pub fn glyph_levels(sample: &GlyphSample, quantizer: &Quantizer) -> Vec<u8> {
    let count = sample.width as usize * sample.height as usize;
    sample
        .coverage
        .iter()
        .copied()
        .chain(repeat(0))
        .take(count)
        .map(|coverage| quantizer.quantize(coverage))
        .collect()
}

/// Build the final asset from every sample and the line box computed over all of them.
///
/// Samples are packed in ascending character order; a repeated character keeps its first sample.
pub fn pack(mut samples: Vec<GlyphSample>, metrics: &LineMetrics, quantizer: &Quantizer) -> FontAsset {
    samples.sort_by_key(|sample| sample.character);
    samples.dedup_by_key(|sample| sample.character);

    let mut packed_data = Vec::new();
    let mut glyphs = Vec::with_capacity(samples.len());

    for sample in &samples {
        let data_offset = packed_data.len() as u32;

        if !sample.has_ink() {
            glyphs.push(GlyphRecord {
                character: sample.character,
                width: 0,
                height: 0,
                x_offset: 0,
                y_offset: 0,
                x_advance: sample.advance,
                data_offset,
            });
            continue;
        }

        pack_levels(&glyph_levels(sample, quantizer), &mut packed_data);
        glyphs.push(GlyphRecord {
            character: sample.character,
            width: sample.width,
            height: sample.height,
            x_offset: sample.left,
            y_offset: metrics.y_offset(sample),
            x_advance: sample.advance,
            data_offset,
        });
    }

    FontAsset::new(*metrics, packed_data, glyphs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::reduce_metrics;

    fn sample(character: char, width: u32, height: u32, top: i32, coverage: Vec<u8>) -> GlyphSample {
        GlyphSample {
            character,
            width,
            height,
            left: 1,
            top,
            advance: width as i32 + 2,
            coverage,
        }
    }

    #[test]
    fn test_quantize_bounds() {
        let quantizer = Quantizer::default();
        assert_eq!(quantizer.quantize(0), 0);
        assert_eq!(quantizer.quantize(255), 15);
        assert!((0..=255).all(|c| quantizer.quantize(c) <= 15));
    }

    #[test]
    fn test_quantize_monotonic() {
        let quantizer = Quantizer::default();
        assert!((1..=255u8).all(|c| quantizer.quantize(c) >= quantizer.quantize(c - 1)));
    }

    #[test]
    fn test_gamma_brightens_midtones() {
        // Linear: 128 / 255 * 15 = 7.5, brightened: 0.502 ^ (1 / 1.8) * 15 = 10.2
        assert_eq!(quantize_level(128, 1.0), 7);
        assert_eq!(quantize_level(128, DEFAULT_GAMMA), 10);
    }

    #[test]
    fn test_pack_levels_even() {
        let mut out = Vec::new();
        pack_levels(&[1, 2, 3, 4], &mut out);
        assert_eq!(out, [0x12, 0x34]);
    }

    #[test]
    fn test_pack_levels_odd_pads_low_nibble() {
        let mut out = vec![0xAA];
        pack_levels(&[15, 7, 9], &mut out);
        assert_eq!(out, [0xAA, 0xF7, 0x90]);
    }

    #[test]
    fn test_empty_coverage_reads_as_zero() {
        let degenerate = sample('x', 3, 2, 2, Vec::new());
        assert_eq!(glyph_levels(&degenerate, &Quantizer::default()), vec![0; 6]);
    }

    #[test]
    fn test_pack_three_then_four_samples() {
        let samples = vec![
            sample('a', 3, 1, 1, vec![255, 0, 255]),
            sample('b', 2, 2, 2, vec![255, 255, 0, 255]),
        ];
        let metrics = reduce_metrics(&samples);
        let asset = pack(samples, &metrics, &Quantizer::default());

        assert_eq!(asset.packed_data(), &[0xF0, 0xF0, 0xFF, 0x0F]);
        assert_eq!(asset.glyphs()[0].data_offset, 0);
        assert_eq!(asset.glyphs()[1].data_offset, 2);
    }

    #[test]
    fn test_space_record() {
        let samples = vec![
            sample('!', 1, 2, 2, vec![255, 255]),
            GlyphSample::empty(' ', 5),
            sample('"', 1, 1, 2, vec![255]),
        ];
        let metrics = reduce_metrics(&samples);
        let asset = pack(samples, &metrics, &Quantizer::default());

        let space = asset.get_glyph(' ').unwrap();
        assert_eq!(
            *space,
            GlyphRecord {
                character: ' ',
                width: 0,
                height: 0,
                x_offset: 0,
                y_offset: 0,
                x_advance: 5,
                data_offset: 0,
            }
        );
        assert_eq!(asset.get_glyph('!').unwrap().data_offset, 0);
        assert_eq!(asset.get_glyph('"').unwrap().data_offset, 1);
    }

    #[test]
    fn test_inkless_offset_follows_preceding_glyphs() {
        let samples = vec![sample('a', 3, 1, 1, vec![255; 3]), GlyphSample::empty('b', 4)];
        let metrics = reduce_metrics(&samples);
        let asset = pack(samples, &metrics, &Quantizer::default());
        assert_eq!(asset.get_glyph('b').unwrap().data_offset, 2);
        assert_eq!(asset.data_size(), 2);
    }

    #[test]
    fn test_pack_sorts_and_dedups() {
        let samples = vec![
            sample('c', 1, 1, 1, vec![255]),
            sample('a', 1, 1, 1, vec![0]),
            sample('c', 2, 1, 1, vec![255, 255]),
            GlyphSample::empty('b', 3),
        ];
        let metrics = reduce_metrics(&samples);
        let asset = pack(samples, &metrics, &Quantizer::default());

        let chars: String = asset.glyphs().iter().map(|g| g.character).collect();
        assert_eq!(chars, "abc");
        assert_eq!(asset.get_glyph('c').unwrap().width, 1);
        assert_eq!(asset.packed_data(), &[0x00, 0xF0]);
    }

    #[test]
    fn test_y_offset_uses_global_baseline() {
        let samples = vec![sample('a', 1, 4, 4, vec![255; 4]), sample('q', 1, 6, 3, vec![255; 6])];
        let metrics = reduce_metrics(&samples);
        let asset = pack(samples, &metrics, &Quantizer::default());

        assert_eq!(asset.baseline(), 4);
        assert_eq!(asset.line_height(), 7);
        assert_eq!(asset.get_glyph('a').unwrap().y_offset, 0);
        assert_eq!(asset.get_glyph('q').unwrap().y_offset, 1);
    }
}
