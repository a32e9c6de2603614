use std::time::Instant;

use rayon::prelude::*;

use ambivox_geom::Triangle;
use ambivox_voxel::{Solid, ViewAxis, VoxelGrid};

use crate::cancel::cancel;
use crate::constants::VOLUME_TOLERANCE;
use crate::cube::{FaceTriangle, cubes_for_axis};
use crate::error::MeshError;
use crate::mesh::Mesh;

/// Boundary faces perpendicular to `axis`, wound outward.
pub fn boundary_for_axis(voxels: &VoxelGrid, axis: ViewAxis) -> Result<Vec<Triangle>, MeshError> {
    let kept = cancel(axis, cubes_for_axis(voxels, axis))?;
    Ok(kept.into_iter().map(|t: FaceTriangle| t.triangle).collect())
}

pub fn assemble(solid: &Solid) -> Result<Mesh, MeshError> {
    assemble_voxels(solid.voxels())
}

/// Boundary surface of an occupancy grid.
///
/// Runs the three axis passes, concatenates them in `Left`, `Top`, `Right`
/// order and verifies the result is closed and encloses exactly one unit of
/// volume per voxel.
pub fn assemble_voxels(voxels: &VoxelGrid) -> Result<Mesh, MeshError> {
    let t0 = Instant::now();
    let parts = ViewAxis::ALL
        .par_iter()
        .map(|&axis| boundary_for_axis(voxels, axis))
        .collect::<Result<Vec<_>, _>>()?;
    let mesh = Mesh::from_axis_parts(parts);

    let stats = mesh.check_closed()?;
    if stats.non_manifold > 0 {
        log::warn!(
            "{} edge(s) shared by more than two triangles; voxels touch along an edge",
            stats.non_manifold
        );
    }
    check_volume(&mesh, voxels.count() as f64)?;

    let ms: u32 = t0.elapsed().as_millis().min(u128::from(u32::MAX)) as u32;
    log::info!(
        target: "perf",
        "ms={} mesh_assemble size={} voxels={} tris={} edges={} non_manifold={}",
        ms,
        voxels.size(),
        voxels.count(),
        mesh.len(),
        stats.edges,
        stats.non_manifold
    );
    Ok(mesh)
}

pub(crate) fn check_volume(mesh: &Mesh, expected: f64) -> Result<(), MeshError> {
    let found = mesh.signed_volume();
    if (found - expected).abs() > VOLUME_TOLERANCE * expected.max(1.0) {
        return Err(MeshError::VolumeMismatch { expected, found });
    }
    Ok(())
}
