//! Shared constants for ambivox-mesh.

/// Grid steps per unit when hashing vertex positions.
pub(crate) const QUANTIZATION_FACTOR: f32 = 1e4;

/// Unmatched edges listed in a closure error.
pub(crate) const MAX_REPORTED_EDGES: usize = 8;

/// Relative slack when comparing enclosed volume against the voxel count.
pub(crate) const VOLUME_TOLERANCE: f64 = 1e-6;
