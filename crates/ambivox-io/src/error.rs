use std::path::PathBuf;

use ambivox_mesh::MeshError;
use ambivox_voxel::VoxelError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IoError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode image {path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("invalid binarize suffix {suffix:?}; expected ge<N> or le<N> with N in 0..=255")]
    BadSuffix { suffix: String },

    #[error("failed to parse font {path}: {reason}")]
    Font { path: PathBuf, reason: String },

    #[error("{path}: font has no glyph for {ch:?}")]
    MissingGlyph { path: PathBuf, ch: char },

    #[error("{path}: text mask has no rows")]
    EmptyTextMask { path: PathBuf },

    #[error("{path}: malformed STL: {source}")]
    Stl {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Voxel(#[from] VoxelError),

    #[error(transparent)]
    Mesh(#[from] MeshError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("{count} views configured; at most 3 are supported")]
    TooManyViews { count: usize },

    #[error("{count} characters given without a font")]
    MissingFont { count: usize },

    #[error("resolution must be positive")]
    ZeroResolution,
}
