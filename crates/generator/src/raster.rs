//! Glyph rasterization: outlines in, 8-bit coverage bitmaps out.

use kurbo::{Affine, BezPath, PathEl, Point, Rect};
use log::debug;
use rayon::prelude::*;
use skrifa::{
    GlyphId, MetadataProvider,
    instance::Size,
    outline::{DrawSettings, OutlinePen},
};
use zeno::{Command, Mask, Vector};

use crate::{
    config::CharSet,
    error::{Error, Result},
    variant::FontInstance,
};

/// One rasterized character, before quantization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphSample {
    pub character: char,
    pub width: u32,
    pub height: u32,
    /// Distance from the pen position to the left edge of the bitmap.
    pub left: i32,
    /// Distance from the baseline up to the top row of the bitmap.
    pub top: i32,
    /// Horizontal advance in whole pixels.
    pub advance: i32,
    /// Row-major coverage, `width * height` samples (may be empty for degenerate input).
    pub coverage: Vec<u8>,
}

impl GlyphSample {
    /// A glyph without ink, such as space.
    pub fn empty(character: char, advance: i32) -> Self {
        Self {
            character,
            width: 0,
            height: 0,
            left: 0,
            top: 0,
            advance,
            coverage: Vec::new(),
        }
    }

    pub fn has_ink(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Lowest ink row relative to the baseline (negative below it).
    pub fn bottom(&self) -> i32 {
        self.top - self.height as i32
    }
}

/// Produces coverage bitmaps for single characters at a fixed size.
pub trait Rasterizer {
    fn rasterize(&self, character: char) -> Result<GlyphSample>;
}

/// Rasterize every character of `charset`, in character order.
///
/// Characters are rasterized in parallel; the result order does not depend on scheduling.
pub fn rasterize_all<R>(rasterizer: &R, charset: &CharSet) -> Result<Vec<GlyphSample>>
where
    R: Rasterizer + Sync,
{
    charset
        .chars()
        .par_iter()
        .map(|&character| rasterizer.rasterize(character))
        .collect()
}

/// Nominal line metrics as declared by the font, in whole pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NominalMetrics {
    pub ascender: i32,
    pub descender: i32,
}

impl NominalMetrics {
    pub fn line_height(&self) -> i32 {
        self.ascender - self.descender
    }
}

/// Rasterizer drawing unhinted outlines of a [`FontInstance`].
pub struct OutlineRasterizer<'i, 'a> {
    instance: &'i FontInstance<'a>,
    size: Size,
}

impl<'i, 'a> OutlineRasterizer<'i, 'a> {
    /// `pixel_size` sets pixels per em; horizontal scale follows proportionally.
    pub fn new(instance: &'i FontInstance<'a>, pixel_size: u32) -> Self {
        Self {
            instance,
            size: Size::new(pixel_size as f32),
        }
    }

    /// Ascender and descender at this size, rounded outwards.
    pub fn nominal_metrics(&self) -> NominalMetrics {
        let metrics = self.instance.font().metrics(self.size, self.instance.location());
        NominalMetrics {
            ascender: metrics.ascent.ceil() as i32,
            descender: metrics.descent.floor() as i32,
        }
    }
}

impl Rasterizer for OutlineRasterizer<'_, '_> {
    fn rasterize(&self, character: char) -> Result<GlyphSample> {
        let font = self.instance.font();
        let location = self.instance.location();
        let glyph_id = font.charmap().map(character).unwrap_or(GlyphId::NOTDEF);

        let advance = font
            .glyph_metrics(self.size, location)
            .advance_width(glyph_id)
            .unwrap_or_default()
            .round() as i32;

        let mut pen = PathPen::default();
        if let Some(outline) = font.outline_glyphs().get(glyph_id) {
            outline
                .draw(DrawSettings::unhinted(self.size, location), &mut pen)
                .map_err(|source| Error::Draw { character, source })?;
        }

        let sample = render(character, &pen.0, advance);
        debug!(
            "{character:?}: {}x{} at ({}, {}), advance {}",
            sample.width, sample.height, sample.left, sample.top, sample.advance
        );
        Ok(sample)
    }
}

/// Collects skrifa outline commands into a path in font pixel space (y up).
#[derive(Default)]
struct PathPen(BezPath);

impl OutlinePen for PathPen {
    fn move_to(&mut self, x: f32, y: f32) {
        self.0.move_to((f64::from(x), f64::from(y)));
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.0.line_to((f64::from(x), f64::from(y)));
    }

    fn quad_to(&mut self, cx0: f32, cy0: f32, x: f32, y: f32) {
        self.0
            .quad_to((f64::from(cx0), f64::from(cy0)), (f64::from(x), f64::from(y)));
    }

    fn curve_to(&mut self, cx0: f32, cy0: f32, cx1: f32, cy1: f32, x: f32, y: f32) {
        self.0.curve_to(
            (f64::from(cx0), f64::from(cy0)),
            (f64::from(cx1), f64::from(cy1)),
            (f64::from(x), f64::from(y)),
        );
    }

    fn close(&mut self) {
        self.0.close_path();
    }
}

/// Fill `path` into a bitmap covering its pixel-aligned control box.
fn render(character: char, path: &BezPath, advance: i32) -> GlyphSample {
    let Some(bounds) = control_box(path) else {
        return GlyphSample::empty(character, advance);
    };

    let left = bounds.x0.floor();
    let top = bounds.y1.ceil();
    let width = (bounds.x1.ceil() - left) as u32;
    let height = (top - bounds.y0.floor()) as u32;
    if width == 0 || height == 0 {
        return GlyphSample::empty(character, advance);
    }

    // y down, top-left corner of the bitmap at the origin
    let mut path = path.clone();
    path.apply_affine(Affine::new([1.0, 0.0, 0.0, -1.0, -left, top]));
    let commands: Vec<Command> = path.elements().iter().map(to_command).collect();

    let (coverage, _) = Mask::new(commands.as_slice()).size(width, height).render();

    GlyphSample {
        character,
        width,
        height,
        left: left as i32,
        top: top as i32,
        advance,
        coverage,
    }
}

fn control_box(path: &BezPath) -> Option<Rect> {
    path.elements()
        .iter()
        .flat_map(|el| match *el {
            PathEl::MoveTo(p) | PathEl::LineTo(p) => vec![p],
            PathEl::QuadTo(c, p) => vec![c, p],
            PathEl::CurveTo(c0, c1, p) => vec![c0, c1, p],
            PathEl::ClosePath => vec![],
        })
        .fold(None, |bounds: Option<Rect>, p: Point| {
            Some(bounds.map_or_else(|| Rect::from_points(p, p), |r| r.union_pt(p)))
        })
}

fn to_command(el: &PathEl) -> Command {
    let v = |p: Point| Vector::new(p.x as f32, p.y as f32);
    match *el {
        PathEl::MoveTo(p) => Command::MoveTo(v(p)),
        PathEl::LineTo(p) => Command::LineTo(v(p)),
        PathEl::QuadTo(c, p) => Command::QuadTo(v(c), v(p)),
        PathEl::CurveTo(c0, c1, p) => Command::CurveTo(v(c0), v(c1), v(p)),
        PathEl::ClosePath => Command::Close,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(x0: f64, y0: f64, x1: f64, y1: f64) -> BezPath {
        let mut path = BezPath::new();
        path.move_to((x0, y0));
        path.line_to((x1, y0));
        path.line_to((x1, y1));
        path.line_to((x0, y1));
        path.close_path();
        path
    }

    #[test]
    fn test_render_empty_path() {
        let sample = render(' ', &BezPath::new(), 5);
        assert_eq!(sample, GlyphSample::empty(' ', 5));
        assert!(!sample.has_ink());
    }

    #[test]
    fn test_render_pixel_aligned_square() {
        let sample = render('x', &square(1.0, -2.0, 4.0, 3.0), 6);
        assert_eq!((sample.width, sample.height), (3, 5));
        assert_eq!((sample.left, sample.top), (1, 3));
        assert_eq!(sample.bottom(), -2);
        assert_eq!(sample.coverage.len(), 15);
        assert!(sample.coverage.iter().all(|&c| c == 255));
    }

    #[test]
    fn test_render_partial_coverage() {
        let sample = render('x', &square(0.0, 0.0, 1.5, 1.0), 2);
        assert_eq!((sample.width, sample.height), (2, 1));
        assert_eq!(sample.coverage[0], 255);
        assert!(sample.coverage[1] > 0 && sample.coverage[1] < 255);
    }

    #[test]
    fn test_control_box() {
        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        path.quad_to((5.0, 10.0), (10.0, 0.0));
        assert_eq!(control_box(&path), Some(Rect::new(0.0, 0.0, 10.0, 10.0)));
        assert_eq!(control_box(&BezPath::new()), None);
    }

    struct Fixed;

    impl Rasterizer for Fixed {
        fn rasterize(&self, character: char) -> Result<GlyphSample> {
            Ok(GlyphSample::empty(character, character as i32))
        }
    }

    #[test]
    fn test_rasterize_all_keeps_character_order() {
        let samples = rasterize_all(&Fixed, &CharSet::from("dcba")).unwrap();
        let chars: String = samples.iter().map(|s| s.character).collect();
        assert_eq!(chars, "abcd");
    }
}
