use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use ambivox_voxel::{ColorMode, ViewAxis};

use crate::error::{ConfigError, IoError};
use crate::glyph::GlyphSource;
use crate::mask::{Binarize, DEFAULT_THRESHOLD, MaskSource};
use crate::stl::StlFormat;

fn d_name() -> String {
    "object".to_string()
}
fn d_resolution() -> usize {
    64
}
fn d_threshold() -> u8 {
    DEFAULT_THRESHOLD
}
fn d_true() -> bool {
    true
}

/// One `[[views]]` entry.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct ViewSource {
    /// Image file or `.txt` drawing, optionally with a `@ge<N>`/`@le<N>` suffix.
    pub source: String,
    #[serde(default)]
    pub binarize: Binarize,
    #[serde(default = "d_threshold")]
    pub threshold: u8,
    #[serde(default = "d_true")]
    pub keep_aspect_ratio: bool,
}

impl ViewSource {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            binarize: Binarize::Le,
            threshold: DEFAULT_THRESHOLD,
            keep_aspect_ratio: true,
        }
    }

    /// Resolves the entry; a suffix on `source` wins over the fields.
    pub fn to_mask_source(&self) -> Result<MaskSource, IoError> {
        let (path, suffix) = match self.source.rsplit_once('@') {
            Some((path, suffix)) => (path, Some(suffix)),
            None => (self.source.as_str(), None),
        };
        let mut source = MaskSource::new(path)
            .with_binarize(self.binarize, self.threshold)
            .with_keep_aspect_ratio(self.keep_aspect_ratio);
        if let Some(suffix) = suffix {
            source.apply_suffix(suffix)?;
        }
        Ok(source)
    }
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct BuildConfig {
    #[serde(default = "d_name")]
    pub name: String,
    #[serde(default = "d_resolution")]
    pub resolution: usize,
    #[serde(default)]
    pub use_mirror: bool,
    #[serde(default)]
    pub color_mode: ColorMode,
    #[serde(default)]
    pub merge_coplanar: bool,
    #[serde(default)]
    pub output: Option<PathBuf>,
    #[serde(default)]
    pub format: StlFormat,
    /// In `Left`, `Top`, `Right` order.
    #[serde(default)]
    pub views: Vec<ViewSource>,
    /// Characters drawn with `font`, taking the axes after `views`.
    #[serde(default)]
    pub chars: Vec<String>,
    #[serde(default)]
    pub font: Option<PathBuf>,
    /// Swap ink and background of every character.
    #[serde(default)]
    pub char_inv: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            name: d_name(),
            resolution: d_resolution(),
            use_mirror: false,
            color_mode: ColorMode::Off,
            merge_coplanar: false,
            output: None,
            format: StlFormat::Binary,
            views: Vec::new(),
            chars: Vec::new(),
            font: None,
            char_inv: false,
        }
    }
}

impl BuildConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let cfg: BuildConfig = toml::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.resolution == 0 {
            return Err(ConfigError::ZeroResolution);
        }
        let count = self.view_count();
        if count > ViewAxis::ALL.len() {
            return Err(ConfigError::TooManyViews { count });
        }
        if !self.chars.is_empty() && self.font.is_none() {
            return Err(ConfigError::MissingFont {
                count: self.chars.len(),
            });
        }
        if count == 0 {
            log::warn!("config for {:?} has no views; the solid will be the full cube", self.name);
        }
        Ok(())
    }

    /// Image views plus characters.
    pub fn view_count(&self) -> usize {
        self.views.len() + self.chars.len()
    }

    /// `output`, or `<name>.stl` next to the working directory.
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| PathBuf::from(format!("{}.stl", self.name)))
    }

    /// Resolves every view into a mask source, relative paths against `base`.
    pub fn mask_sources(&self, base: Option<&Path>) -> Result<Vec<MaskSource>, IoError> {
        self.views
            .iter()
            .map(|v| {
                let mut source = v.to_mask_source()?;
                if let Some(base) = base {
                    if source.path.is_relative() {
                        source.path = base.join(&source.path);
                    }
                }
                Ok(source)
            })
            .collect()
    }

    /// One glyph source per entry of `chars`, the font resolved against `base`.
    pub fn glyph_sources(&self, base: Option<&Path>) -> Vec<GlyphSource> {
        let Some(font) = &self.font else {
            return Vec::new();
        };
        let font = match base {
            Some(base) if font.is_relative() => base.join(font),
            _ => font.clone(),
        };
        self.chars
            .iter()
            .map(|text| GlyphSource::new(text.as_str(), font.clone()).with_invert(self.char_inv))
            .collect()
    }
}

pub fn load_config_from_path(path: &Path) -> Result<BuildConfig, ConfigError> {
    let s = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    BuildConfig::from_toml_str(&s)
}
