//! Turns raster images and text drawings into square silhouette masks.
use std::fs;
use std::path::{Path, PathBuf};

use image::imageops::{self, FilterType};
use image::{GrayImage, Luma};
use serde::{Deserialize, Serialize};

use ambivox_voxel::SilhouetteMask;

use crate::error::IoError;

/// Luma threshold applied when none is given: everything but pure white.
pub const DEFAULT_THRESHOLD: u8 = 254;

// On-pixels are stored as 1 rather than 255 so that the resize rounds
// partially covered pixels the same way a 0/1 bitmap would.
const ON: u8 = 1;

/// How a luma pixel is compared against the threshold.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Binarize {
    /// `value <= threshold` is on (dark ink on a light background).
    #[default]
    Le,
    /// `value >= threshold` is on.
    Ge,
}

impl Binarize {
    #[inline]
    pub fn is_on(self, value: u8, threshold: u8) -> bool {
        match self {
            Binarize::Le => value <= threshold,
            Binarize::Ge => value >= threshold,
        }
    }
}

/// A silhouette source on disk plus how to read it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MaskSource {
    pub path: PathBuf,
    pub binarize: Binarize,
    pub threshold: u8,
    pub keep_aspect_ratio: bool,
}

impl MaskSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            binarize: Binarize::Le,
            threshold: DEFAULT_THRESHOLD,
            keep_aspect_ratio: true,
        }
    }

    /// Parses `path` or `path@ge1` / `path@le200`. The suffix overrides the
    /// binarize mode and threshold.
    pub fn parse(spec: &str) -> Result<Self, IoError> {
        let (path, suffix) = match spec.rsplit_once('@') {
            Some((path, suffix)) => (path, Some(suffix)),
            None => (spec, None),
        };
        let mut source = Self::new(path);
        if let Some(suffix) = suffix {
            source.apply_suffix(suffix)?;
        }
        Ok(source)
    }

    pub fn with_binarize(mut self, binarize: Binarize, threshold: u8) -> Self {
        self.binarize = binarize;
        self.threshold = threshold;
        self
    }

    pub fn with_keep_aspect_ratio(mut self, keep: bool) -> Self {
        self.keep_aspect_ratio = keep;
        self
    }

    pub(crate) fn apply_suffix(&mut self, suffix: &str) -> Result<(), IoError> {
        let bad = || IoError::BadSuffix {
            suffix: suffix.to_string(),
        };
        let (binarize, digits) = if let Some(rest) = suffix.strip_prefix("ge") {
            (Binarize::Ge, rest)
        } else if let Some(rest) = suffix.strip_prefix("le") {
            (Binarize::Le, rest)
        } else {
            return Err(bad());
        };
        self.threshold = digits.parse().map_err(|_| bad())?;
        self.binarize = binarize;
        Ok(())
    }

    /// Reads the source and produces an `size x size` mask.
    pub fn load(&self, size: usize) -> Result<SilhouetteMask, IoError> {
        let luma = load_luma(&self.path)?;
        let bits = binarize(&luma, self.binarize, self.threshold);
        Ok(fit_to_mask(bits, size, self.keep_aspect_ratio))
    }
}

/// Loads `path` as 8-bit luma. `.txt` files are read as text drawings.
pub fn load_luma(path: &Path) -> Result<GrayImage, IoError> {
    let is_text = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("txt"));
    if is_text {
        let text = fs::read_to_string(path).map_err(|source| IoError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        return parse_text_mask(&text).ok_or_else(|| IoError::EmptyTextMask {
            path: path.to_path_buf(),
        });
    }
    let img = image::open(path).map_err(|source| IoError::Image {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(img.to_luma8())
}

/// Rows of `#`, `X` or `1` (on, drawn black) and anything else (off, white).
/// Leading and trailing blank lines are dropped; blank lines in between are
/// rows of off cells. Short rows are padded with off cells. Returns `None`
/// for blank input.
pub fn parse_text_mask(text: &str) -> Option<GrayImage> {
    let lines: Vec<&str> = text.lines().map(str::trim_end).collect();
    let first = lines.iter().position(|l| !l.is_empty())?;
    let last = lines.iter().rposition(|l| !l.is_empty())?;
    let rows: Vec<Vec<bool>> = lines[first..=last]
        .iter()
        .map(|l| l.chars().map(|c| matches!(c, '#' | 'X' | '1')).collect())
        .collect();
    let width = rows.iter().map(Vec::len).max()?;
    let mut img = GrayImage::from_pixel(width as u32, rows.len() as u32, Luma([255]));
    for (y, row) in rows.iter().enumerate() {
        for (x, &on) in row.iter().enumerate() {
            if on {
                img.put_pixel(x as u32, y as u32, Luma([0]));
            }
        }
    }
    Some(img)
}

/// On-pixels become 1, everything else 0.
pub fn binarize(img: &GrayImage, mode: Binarize, threshold: u8) -> GrayImage {
    GrayImage::from_fn(img.width(), img.height(), |x, y| {
        Luma([if mode.is_on(img.get_pixel(x, y)[0], threshold) { ON } else { 0 }])
    })
}

/// Bounding box `(x, y, w, h)` of nonzero pixels.
pub fn content_bounds(img: &GrayImage) -> Option<(u32, u32, u32, u32)> {
    let mut bounds: Option<(u32, u32, u32, u32)> = None;
    for (x, y, p) in img.enumerate_pixels() {
        if p[0] == 0 {
            continue;
        }
        bounds = Some(match bounds {
            None => (x, y, x, y),
            Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
        });
    }
    bounds.map(|(x0, y0, x1, y1)| (x0, y0, x1 - x0 + 1, y1 - y0 + 1))
}

/// Crops to content, optionally pads to a centered square, resizes to
/// `size` and thresholds at `> 0`.
pub fn fit_to_mask(bits: GrayImage, size: usize, keep_aspect_ratio: bool) -> SilhouetteMask {
    let mut img = match content_bounds(&bits) {
        Some((x, y, w, h)) => imageops::crop_imm(&bits, x, y, w, h).to_image(),
        None => bits,
    };
    if keep_aspect_ratio && img.width() != img.height() {
        let side = img.width().max(img.height());
        let mut square = GrayImage::new(side, side);
        let dx = (side - img.width()) / 2;
        let dy = (side - img.height()) / 2;
        imageops::replace(&mut square, &img, i64::from(dx), i64::from(dy));
        img = square;
    }
    let n = size as u32;
    if img.width() != n || img.height() != n {
        img = imageops::resize(&img, n, n, FilterType::CatmullRom);
    }
    SilhouetteMask::from_fn(size, |row, col| img.get_pixel(col as u32, row as u32)[0] > 0)
}
