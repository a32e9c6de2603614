//! Watertight boundary meshes for voxel solids.
//!
//! Each axis pass emits the two cube faces perpendicular to that axis for
//! every occupied voxel, cancels faces shared by neighbors and normalizes
//! winding. The three passes together form a closed, outward-wound surface.
#![forbid(unsafe_code)]

mod assemble;
mod cancel;
mod constants;
mod cube;
mod error;
mod face;
mod manifold;
mod merge;
mod mesh;

pub use assemble::{assemble, assemble_voxels, boundary_for_axis};
pub use cancel::{cancel, triangle_key};
pub use cube::{FaceTriangle, cubes_for_axis, unit_face};
pub use error::MeshError;
pub use face::Face;
pub use manifold::{EdgeStats, check_closed};
pub use merge::merge_coplanar;
pub use mesh::Mesh;
