//! # Gray4 Font Generator
//!
//! Convert TrueType/OpenType fonts (optionally variable-weight) into compact,
//! pre-rasterized 4-bit bitmap fonts for devices without a font renderer.
//!
//! The conversion runs in four stages:
//!
//! 1. [`FontInstance::select_weight`] pins a variable font's `wght` axis.
//! 2. A [`Rasterizer`] turns each character into an 8-bit coverage bitmap.
//! 3. [`reduce_metrics`] finds the minimal line box over the ink of *all* glyphs.
//! 4. [`pack`] quantizes coverage to 4 bits and packs the glyph index.
//!
//! ## Example
//!
//! ```no_run
//! use gray4_generator::{EmitOptions, GenerateOptions, emit_rust, generate, load_font};
//!
//! let data = load_font("NotoSans-Variable.ttf").unwrap();
//! let font = generate(&data, &GenerateOptions::new(24).weight(700.0)).unwrap();
//! let source = emit_rust(&font.asset, "noto_sans_24_bold", &EmitOptions::default()).unwrap();
//! std::fs::write("noto_sans_24_bold.rs", source).unwrap();
//! ```

mod asset;
mod config;
mod emit;
mod error;
mod metrics;
mod pack;
mod raster;
mod variant;

use std::{fs, io, path::Path};

use log::info;

pub use asset::{FontAsset, GlyphRecord};
pub use config::{CharSet, DEFAULT_CHARSET, DEFAULT_GAMMA, DEFAULT_WEIGHT, GenerateOptions, WEIGHT_AXIS};
pub use emit::{EmitOptions, RustModule, emit_mod_index, emit_rust};
pub use error::{Error, Result};
pub use metrics::{LineMetrics, reduce_metrics};
pub use pack::{Quantizer, glyph_levels, pack, pack_levels, quantize_level};
pub use raster::{GlyphSample, NominalMetrics, OutlineRasterizer, Rasterizer, rasterize_all};
pub use variant::{AxisInfo, FontInstance, WeightSelection};

/// A converted font along with what was learned while converting it.
#[derive(Debug, Clone)]
pub struct GeneratedFont {
    pub asset: FontAsset,
    pub weight: WeightSelection,
    /// Line metrics declared by the font, for comparison with the minimal ones.
    pub nominal: NominalMetrics,
}

/// Read a font file; a missing file is reported as [`Error::FontNotFound`].
pub fn load_font(path: impl AsRef<Path>) -> Result<Vec<u8>> {
    let path = path.as_ref();
    fs::read(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => Error::FontNotFound(path.to_path_buf()),
        _ => Error::Io(e),
    })
}

/// Convert font data into a Gray4 font.
pub fn generate(data: &[u8], options: &GenerateOptions) -> Result<GeneratedFont> {
    let mut instance = FontInstance::new(data)?;
    let weight = instance.select_weight(options.weight);

    let rasterizer = OutlineRasterizer::new(&instance, options.pixel_size);
    let nominal = rasterizer.nominal_metrics();
    info!(
        "Font metrics: ascender={}, descender={}, line height={}",
        nominal.ascender,
        nominal.descender,
        nominal.line_height()
    );

    let asset = build_asset(&rasterizer, &options.charset, &Quantizer::new(options.gamma))?;
    info!(
        "Minimal line height: {}px, baseline: {}px, {} glyphs, {} bytes",
        asset.line_height(),
        asset.baseline(),
        asset.glyph_count(),
        asset.data_size()
    );

    Ok(GeneratedFont { asset, weight, nominal })
}

/// Run the rasterize, reduce and pack stages over `charset`.
///
/// Every glyph is rasterized before any vertical offset is computed, since the
/// baseline depends on the ink of the whole set.
pub fn build_asset<R>(rasterizer: &R, charset: &CharSet, quantizer: &Quantizer) -> Result<FontAsset>
where
    R: Rasterizer + Sync,
{
    let samples = rasterize_all(rasterizer, charset)?;
    let metrics = reduce_metrics(&samples);
    info!("Ink bounds: top={}, bottom={}", metrics.max_top, metrics.min_bottom);
    Ok(pack(samples, &metrics, quantizer))
}
