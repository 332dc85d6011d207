use std::path::Path;

use anyhow::{Context, Result};
use gray4_generator::{
    CharSet, FontInstance, OutlineRasterizer, Quantizer, build_asset, load_font,
};

/// Print the variation axes of a font and compare its nominal and minimal line heights.
pub fn show_info(font_path: &Path, size: u32, weight: i32) -> Result<()> {
    let data = load_font(font_path)?;
    let mut instance = FontInstance::new(&data)
        .with_context(|| format!("Failed to parse {}", font_path.display()))?;

    let axes = instance.axes();
    if axes.is_empty() {
        println!("Static font");
    } else {
        println!("Variable font axes:");
        for axis in &axes {
            println!(
                "  {:4}  {:6.0} .. {:6.0} (default: {:6.0})",
                axis.tag, axis.min, axis.max, axis.default,
            );
        }
    }

    instance.select_weight(weight as f32);
    let rasterizer = OutlineRasterizer::new(&instance, size);
    let nominal = rasterizer.nominal_metrics();
    let asset = build_asset(&rasterizer, &CharSet::default(), &Quantizer::default())?;

    println!("Metrics at {size}px:");
    println!("  ascender:            {}", nominal.ascender);
    println!("  descender:           {}", nominal.descender);
    println!("  nominal line height: {}px", nominal.line_height());
    println!("  minimal line height: {}px", asset.line_height());
    println!("  baseline from top:   {}px", asset.baseline());
    println!(
        "  ink bounds:          top={}, bottom={}",
        asset.metrics().max_top,
        asset.metrics().min_bottom
    );
    println!("  packed data:         {} bytes", asset.data_size());

    Ok(())
}
