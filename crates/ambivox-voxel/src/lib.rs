//! Silhouette carving: masks, axis embeddings and the intersected voxel solid.
#![forbid(unsafe_code)]

mod axis;
mod bitset;
mod carve;
mod color;
pub mod constants;
mod error;
mod extrude;
mod grid;
mod mask;

pub use axis::{AxisSpec, ViewAxis};
pub use bitset::Bitset;
pub use carve::{AxisVolume, Carver, Carving, Solid, Views};
pub use color::{ColorAnnotation, ColorMode};
pub use error::VoxelError;
pub use extrude::{extrude, project};
pub use grid::VoxelGrid;
pub use mask::SilhouetteMask;
