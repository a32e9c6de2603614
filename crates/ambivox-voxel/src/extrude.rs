use crate::axis::ViewAxis;
use crate::error::VoxelError;
use crate::grid::VoxelGrid;
use crate::mask::SilhouetteMask;

/// Extrudes `mask` along `axis` into a `size`-sided volume.
///
/// An absent mask constrains nothing and yields a full volume. A present
/// mask must be `size x size`, otherwise [`VoxelError::MaskSizeMismatch`].
/// `mirror` only changes the embedding of [`ViewAxis::MIRROR`].
pub fn extrude(
    size: usize,
    mask: Option<&SilhouetteMask>,
    axis: ViewAxis,
    mirror: bool,
) -> Result<VoxelGrid, VoxelError> {
    let Some(mask) = mask else {
        return Ok(VoxelGrid::full(size));
    };
    if mask.size() != size {
        return Err(VoxelError::MaskSizeMismatch {
            axis,
            expected: size,
            found: mask.size(),
        });
    }
    let mut grid = VoxelGrid::new(size);
    for row in 0..size {
        for col in 0..size {
            if !mask.get(row, col) {
                continue;
            }
            for depth in 0..size {
                grid.set_at(axis.embed(size, row, col, depth, mirror), true);
            }
        }
    }
    Ok(grid)
}

/// Silhouette of `grid` seen along `axis`: a cell is on when any voxel on its
/// extrusion line is occupied. Inverse of [`extrude`] on extruded volumes.
pub fn project(grid: &VoxelGrid, axis: ViewAxis, mirror: bool) -> SilhouetteMask {
    let size = grid.size();
    SilhouetteMask::from_fn(size, |row, col| {
        (0..size).any(|depth| grid.get_at(axis.embed(size, row, col, depth, mirror)))
    })
}
