use thiserror::Error;

use crate::axis::ViewAxis;

/// Errors raised while validating carving inputs.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VoxelError {
    #[error("voxel resolution must be positive")]
    ZeroResolution,

    #[error("at most 3 views can be carved, got {count}")]
    TooManyViews { count: usize },

    #[error("{axis} mask is {found}x{found}, expected {expected}x{expected}")]
    MaskSizeMismatch {
        axis: ViewAxis,
        expected: usize,
        found: usize,
    },

    #[error("mask row {row} has {found} cells, expected {expected}")]
    RaggedMask {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("mask must be square, got {rows} rows of {cols} cells")]
    NotSquare { rows: usize, cols: usize },
}
