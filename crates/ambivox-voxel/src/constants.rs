//! Shared constants for ambivox-voxel.

// Bitset configuration (u64-based)
pub(crate) const BITS_PER_WORD: usize = 64;
pub(crate) const WORD_INDEX_SHIFT: usize = 6; // log2(64)
pub(crate) const WORD_INDEX_MASK: usize = 63; // (1<<6) - 1

/// Alpha for voxels inside the union of the view volumes but outside the solid.
pub const UNION_ALPHA: f32 = 0.15;
/// Alpha for solid voxels.
pub const SOLID_ALPHA: f32 = 1.0;
/// Color of solid voxels when per-axis coloring is off.
pub const PLAIN_SOLID_RGBA: [f32; 4] = [0.2, 0.5, 0.1, 1.0];
