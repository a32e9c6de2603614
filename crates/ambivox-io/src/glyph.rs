//! Renders characters from a TrueType/OpenType font into silhouette masks.
use std::fs;
use std::path::PathBuf;

use image::{GrayImage, Luma};
use ttf_parser::OutlineBuilder;

use ambivox_voxel::SilhouetteMask;

use crate::error::IoError;
use crate::mask::fit_to_mask;

/// Pixel height of the canvas a glyph is drawn on before it is fitted.
pub const GLYPH_CANVAS: u32 = 256;

// Line segments per quadratic or cubic curve.
const CURVE_STEPS: usize = 8;

/// One character (or short string) drawn with a font file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GlyphSource {
    pub text: String,
    pub font: PathBuf,
    /// Swap ink and background inside the canvas.
    pub invert: bool,
    /// Glyphs are stretched to fill the frame unless this is set.
    pub keep_aspect_ratio: bool,
}

impl GlyphSource {
    pub fn new(text: impl Into<String>, font: impl Into<PathBuf>) -> Self {
        Self {
            text: text.into(),
            font: font.into(),
            invert: false,
            keep_aspect_ratio: false,
        }
    }

    pub fn with_invert(mut self, invert: bool) -> Self {
        self.invert = invert;
        self
    }

    pub fn with_keep_aspect_ratio(mut self, keep: bool) -> Self {
        self.keep_aspect_ratio = keep;
        self
    }

    /// Reads the font, draws the text and produces an `size x size` mask.
    pub fn load(&self, size: usize) -> Result<SilhouetteMask, IoError> {
        let data = fs::read(&self.font).map_err(|source| IoError::Read {
            path: self.font.clone(),
            source,
        })?;
        let mut bits = render_text(&data, &self.text, GLYPH_CANVAS).map_err(|err| match err {
            RenderError::Font(reason) => IoError::Font {
                path: self.font.clone(),
                reason,
            },
            RenderError::MissingGlyph(ch) => IoError::MissingGlyph {
                path: self.font.clone(),
                ch,
            },
        })?;
        if self.invert {
            for p in bits.pixels_mut() {
                p[0] = u8::from(p[0] == 0);
            }
        }
        Ok(fit_to_mask(bits, size, self.keep_aspect_ratio))
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum RenderError {
    Font(String),
    MissingGlyph(char),
}

/// Draws `text` left to right on a `height * chars` by `height` canvas.
/// Ink pixels are 1, the rest 0.
pub fn render_text(font_data: &[u8], text: &str, height: u32) -> Result<GrayImage, RenderError> {
    let face = ttf_parser::Face::from_slice(font_data, 0).map_err(|e| RenderError::Font(e.to_string()))?;
    let line = f32::from(face.ascender()) - f32::from(face.descender());
    if line <= 0.0 {
        return Err(RenderError::Font("font has no vertical metrics".to_string()));
    }
    let scale = height as f32 / line;
    let width = height * text.chars().count().max(1) as u32;

    let mut outline = Outline::new(scale, f32::from(face.ascender()) * scale);
    for ch in text.chars() {
        let id = face.glyph_index(ch).ok_or(RenderError::MissingGlyph(ch))?;
        // Blank glyphs such as spaces have no outline.
        let _ = face.outline_glyph(id, &mut outline);
        let advance = face.glyph_hor_advance(id).map_or(line, f32::from);
        outline.origin_x += advance * scale;
    }
    Ok(outline.fill(width, height))
}

/// Glyph contours flattened into line segments in canvas pixels (y down).
#[derive(Debug, Default)]
pub struct Outline {
    scale: f32,
    baseline: f32,
    pub origin_x: f32,
    start: (f32, f32),
    cursor: (f32, f32),
    segments: Vec<[(f32, f32); 2]>,
}

impl Outline {
    pub fn new(scale: f32, baseline: f32) -> Self {
        Self {
            scale,
            baseline,
            ..Self::default()
        }
    }

    #[inline]
    fn to_canvas(&self, x: f32, y: f32) -> (f32, f32) {
        (self.origin_x + x * self.scale, self.baseline - y * self.scale)
    }

    fn segment_to(&mut self, p: (f32, f32)) {
        if p != self.cursor {
            self.segments.push([self.cursor, p]);
        }
        self.cursor = p;
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Nonzero-winding scanline fill sampled at pixel centers.
    pub fn fill(&self, width: u32, height: u32) -> GrayImage {
        let mut img = GrayImage::new(width, height);
        let mut crossings: Vec<(f32, i32)> = Vec::new();
        for row in 0..height {
            let y = row as f32 + 0.5;
            crossings.clear();
            for &[(x0, y0), (x1, y1)] in &self.segments {
                let (lo, hi, dir) = if y0 < y1 { (y0, y1, 1) } else { (y1, y0, -1) };
                if y < lo || y >= hi {
                    continue;
                }
                let t = (y - y0) / (y1 - y0);
                crossings.push((x0 + t * (x1 - x0), dir));
            }
            crossings.sort_by(|a, b| a.0.total_cmp(&b.0));

            let mut winding = 0;
            for pair in crossings.windows(2) {
                winding += pair[0].1;
                if winding == 0 {
                    continue;
                }
                let first = (pair[0].0 - 0.5).ceil().max(0.0) as u32;
                let end = (pair[1].0 - 0.5).ceil().clamp(0.0, width as f32) as u32;
                for col in first..end {
                    img.put_pixel(col, row, Luma([1]));
                }
            }
        }
        img
    }
}

impl OutlineBuilder for Outline {
    fn move_to(&mut self, x: f32, y: f32) {
        let p = self.to_canvas(x, y);
        self.start = p;
        self.cursor = p;
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let p = self.to_canvas(x, y);
        self.segment_to(p);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        let p0 = self.cursor;
        let c = self.to_canvas(x1, y1);
        let p = self.to_canvas(x, y);
        for i in 1..=CURVE_STEPS {
            let t = i as f32 / CURVE_STEPS as f32;
            let u = 1.0 - t;
            let q = (
                u * u * p0.0 + 2.0 * u * t * c.0 + t * t * p.0,
                u * u * p0.1 + 2.0 * u * t * c.1 + t * t * p.1,
            );
            self.segment_to(q);
        }
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        let p0 = self.cursor;
        let c1 = self.to_canvas(x1, y1);
        let c2 = self.to_canvas(x2, y2);
        let p = self.to_canvas(x, y);
        for i in 1..=CURVE_STEPS {
            let t = i as f32 / CURVE_STEPS as f32;
            let u = 1.0 - t;
            let (a, b, c, d) = (u * u * u, 3.0 * u * u * t, 3.0 * u * t * t, t * t * t);
            let q = (
                a * p0.0 + b * c1.0 + c * c2.0 + d * p.0,
                a * p0.1 + b * c1.1 + c * c2.1 + d * p.1,
            );
            self.segment_to(q);
        }
    }

    fn close(&mut self) {
        let start = self.start;
        self.segment_to(start);
    }
}
