//! Pipeline properties checked against a synthetic rasterizer.

use gray4_font::{GlyphInfo, Gray4Font};
use gray4_generator::{
    CharSet, FontAsset, GlyphSample, Quantizer, Rasterizer, Result, build_asset, quantize_level,
};

/// Produces glyphs whose shape is derived from the character code.
struct Synthetic;

impl Rasterizer for Synthetic {
    fn rasterize(&self, character: char) -> Result<GlyphSample> {
        let code = character as u32;
        if character.is_whitespace() {
            return Ok(GlyphSample::empty(character, 4));
        }

        let width = code % 5;
        let height = code % 7 + 1;
        let coverage = (0..width * height).map(|i| ((i * 37 + code) % 256) as u8).collect();
        Ok(GlyphSample {
            character,
            width,
            height,
            left: (code % 3) as i32 - 1,
            top: (code % 9) as i32 - 2,
            advance: width as i32 + 1,
            coverage,
        })
    }
}

fn build(charset: &CharSet) -> FontAsset {
    build_asset(&Synthetic, charset, &Quantizer::default()).unwrap()
}

fn leak_runtime(asset: &FontAsset) -> Gray4Font {
    let glyphs: Vec<GlyphInfo> = asset.glyph_infos().unwrap();
    Gray4Font {
        baseline: asset.baseline(),
        line_height: asset.line_height(),
        packed_data: Box::leak(asset.packed_data().to_vec().into_boxed_slice()),
        glyphs: Box::leak(glyphs.into_boxed_slice()),
    }
}

#[test]
fn test_output_is_deterministic() {
    let charset = CharSet::default();
    assert_eq!(build(&charset), build(&charset));
}

#[test]
fn test_index_strictly_ascending_for_unsorted_input() {
    let asset = build(&CharSet::from("zyx cba zyx!"));
    let chars: Vec<char> = asset.glyphs().iter().map(|g| g.character).collect();
    assert_eq!(chars, vec![' ', '!', 'a', 'b', 'c', 'x', 'y', 'z']);
    assert!(asset.glyphs().windows(2).all(|w| w[0].character < w[1].character));
}

#[test]
fn test_input_order_does_not_change_output() {
    let forward = build(&CharSet::new('!'..='~'));
    let backward = build(&CharSet::new(('!'..='~').rev()));
    assert_eq!(forward, backward);
}

#[test]
fn test_offsets_are_contiguous() {
    let asset = build(&CharSet::default());
    let glyphs = asset.glyphs();

    for pair in glyphs.windows(2) {
        assert_eq!(
            pair[1].data_offset as usize,
            pair[0].data_offset as usize + (pair[0].width * pair[0].height).div_ceil(2) as usize
        );
    }
    let last = glyphs.last().unwrap();
    assert_eq!(last.data_range().end, asset.data_size());
}

#[test]
fn test_inkless_glyphs() {
    let asset = build(&CharSet::default());
    for glyph in asset.glyphs().iter().filter(|g| g.width == 0 || g.height == 0) {
        assert_eq!((glyph.width, glyph.height), (0, 0));
        assert_eq!((glyph.x_offset, glyph.y_offset), (0, 0));
        assert!(asset.glyph_data(glyph).is_empty());
    }
    assert_eq!(asset.get_glyph(' ').unwrap().x_advance, 4);
}

#[test]
fn test_minimal_line_height() {
    let charset = CharSet::default();
    let samples: Vec<GlyphSample> = charset
        .chars()
        .iter()
        .map(|&c| Synthetic.rasterize(c).unwrap())
        .filter(GlyphSample::has_ink)
        .collect();
    let max_top = samples.iter().map(|s| s.top).max().unwrap();
    let min_bottom = samples.iter().map(GlyphSample::bottom).min().unwrap();

    let asset = build(&charset);
    assert_eq!(asset.baseline() as i32, max_top);
    assert_eq!(asset.line_height() as i32, max_top - min_bottom);
    assert_eq!(asset.metrics().max_top, max_top);
    assert_eq!(asset.metrics().min_bottom, min_bottom);
    for sample in &samples {
        let record = asset.get_glyph(sample.character).unwrap();
        assert_eq!(record.y_offset, max_top - sample.top);
    }
}

#[test]
fn test_empty_charset() {
    let asset = build(&CharSet::new(Vec::new()));
    assert_eq!(asset.baseline(), 0);
    assert_eq!(asset.line_height(), 0);
    assert_eq!(asset.glyph_count(), 0);
    assert_eq!(asset.data_size(), 0);
}

#[test]
fn test_whitespace_only_charset() {
    let asset = build(&CharSet::from(" \t"));
    assert_eq!(asset.baseline(), 0);
    assert_eq!(asset.line_height(), 0);
    assert_eq!(asset.glyph_count(), 2);
    assert_eq!(asset.data_size(), 0);
}

#[test]
fn test_runtime_reads_back_quantized_pixels() {
    let charset = CharSet::default();
    let asset = build(&charset);
    let font = leak_runtime(&asset);

    for &character in charset.chars() {
        let sample = Synthetic.rasterize(character).unwrap();
        let glyph = font.get_glyph(character).unwrap();
        for y in 0..sample.height {
            for x in 0..sample.width {
                let coverage = sample.coverage[(y * sample.width + x) as usize];
                assert_eq!(font.get_pixel(glyph, x, y), quantize_level(coverage, 1.8));
            }
        }
    }
}

#[test]
fn test_every_nibble_in_range() {
    let asset = build(&CharSet::default());
    let font = leak_runtime(&asset);
    for glyph in font.glyphs {
        for y in 0..glyph.height as u32 {
            for x in 0..glyph.width as u32 {
                assert!(font.get_pixel(glyph, x, y) <= 15);
            }
        }
    }
}
