//! Rust source emission for generated fonts.

use std::fmt::{self, Display, Formatter};

use gray4_font::GlyphInfo;

use crate::{asset::FontAsset, error::Result};

const BYTES_PER_LINE: usize = 16;

/// Settings for the emitted module.
#[derive(Debug, Clone)]
pub struct EmitOptions {
    /// Path the module imports `GlyphInfo` and `Gray4Font` from.
    pub import_path: String,
    /// Font file name recorded in the header.
    pub source_name: Option<String>,
    pub pixel_size: Option<u32>,
    pub weight: Option<f32>,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            import_path: "gray4_font".to_string(),
            source_name: None,
            pixel_size: None,
            weight: None,
        }
    }
}

/// A font asset rendered as a Rust module of `const` items.
///
/// For an output name `noto_sans_18` the module defines `NOTO_SANS_18_DATA`,
/// `NOTO_SANS_18_GLYPHS` and `NOTO_SANS_18`.
pub struct RustModule<'a> {
    asset: &'a FontAsset,
    glyphs: Vec<GlyphInfo>,
    const_name: String,
    options: &'a EmitOptions,
}

impl<'a> RustModule<'a> {
    /// Fails if a glyph's metrics do not fit the runtime field types.
    pub fn new(asset: &'a FontAsset, name: &str, options: &'a EmitOptions) -> Result<Self> {
        Ok(Self {
            asset,
            glyphs: asset.glyph_infos()?,
            const_name: name.to_uppercase(),
            options,
        })
    }

    fn write_header(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "//! Gray4 (4-bit, 16-level) anti-aliased font with minimal line height")?;
        if let Some(source) = &self.options.source_name {
            writeln!(f, "//! Generated from: {source}")?;
        }
        if let Some(size) = self.options.pixel_size {
            writeln!(f, "//! Size: {size}px")?;
        }
        if let Some(weight) = self.options.weight {
            writeln!(f, "//! Weight: {weight}")?;
        }
        writeln!(f, "//! Characters: {}", self.glyphs.len())?;
        writeln!(
            f,
            "//! Line height: {}px (minimal - actual glyph bounds)",
            self.asset.line_height()
        )?;
        writeln!(f)?;
        writeln!(f, "use {}::{{GlyphInfo, Gray4Font}};", self.options.import_path)
    }

    fn write_data(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "/// Packed pixel data (2 pixels per byte, 4 bits each)")?;
        writeln!(f, "pub const {}_DATA: &[u8] = &[", self.const_name)?;
        for chunk in self.asset.packed_data().chunks(BYTES_PER_LINE) {
            let line: Vec<String> = chunk.iter().map(|b| format!("0x{b:02x}")).collect();
            writeln!(f, "    {},", line.join(", "))?;
        }
        writeln!(f, "];")
    }

    fn write_glyphs(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "/// Glyph metadata for binary search")?;
        writeln!(f, "pub const {}_GLYPHS: &[GlyphInfo] = &[", self.const_name)?;
        for glyph in &self.glyphs {
            writeln!(f, "    GlyphInfo {{")?;
            writeln!(f, "        character: '{}',", glyph.character.escape_default())?;
            writeln!(f, "        width: {},", glyph.width)?;
            writeln!(f, "        height: {},", glyph.height)?;
            writeln!(f, "        x_offset: {},", glyph.x_offset)?;
            writeln!(f, "        y_offset: {},", glyph.y_offset)?;
            writeln!(f, "        x_advance: {},", glyph.x_advance)?;
            writeln!(f, "        data_offset: {},", glyph.data_offset)?;
            writeln!(f, "    }},")?;
        }
        writeln!(f, "];")
    }

    fn write_font(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = &self.const_name;
        writeln!(f, "/// The font")?;
        writeln!(f, "pub const {name}: Gray4Font = Gray4Font {{")?;
        writeln!(f, "    baseline: {},", self.asset.baseline())?;
        writeln!(f, "    line_height: {},", self.asset.line_height())?;
        writeln!(f, "    packed_data: {name}_DATA,")?;
        writeln!(f, "    glyphs: {name}_GLYPHS,")?;
        writeln!(f, "}};")
    }
}

impl Display for RustModule<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.write_header(f)?;
        writeln!(f)?;
        self.write_data(f)?;
        writeln!(f)?;
        self.write_glyphs(f)?;
        writeln!(f)?;
        self.write_font(f)
    }
}

/// Render `asset` as a Rust module named after `name`.
pub fn emit_rust(asset: &FontAsset, name: &str, options: &EmitOptions) -> Result<String> {
    Ok(RustModule::new(asset, name, options)?.to_string())
}

/// A `mod.rs` declaring each generated module and re-exporting its font constant.
pub fn emit_mod_index<S: AsRef<str>>(names: &[S]) -> String {
    let mut out = String::new();
    for name in names {
        out.push_str(&format!("pub mod {};\n", name.as_ref()));
    }
    out.push('\n');
    for name in names {
        let name = name.as_ref();
        out.push_str(&format!("pub use {name}::{};\n", name.to_uppercase()));
    }
    out
}
