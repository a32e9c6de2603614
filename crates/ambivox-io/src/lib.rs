//! Build configuration, silhouette loading (images, text drawings, font
//! glyphs) and STL persistence.
#![forbid(unsafe_code)]

pub mod config;
mod error;
pub mod glyph;
pub mod mask;
pub mod stl;

pub use config::{BuildConfig, ViewSource, load_config_from_path};
pub use error::{ConfigError, IoError};
pub use glyph::GlyphSource;
pub use mask::{Binarize, MaskSource};
pub use stl::{StlFormat, load_mesh, read_stl, save_mesh, to_stl_ascii, to_stl_binary};
