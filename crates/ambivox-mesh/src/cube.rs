use ambivox_geom::{Triangle, Vec3};
use ambivox_voxel::{ViewAxis, VoxelGrid};

/// A cube-face triangle tagged with the side of the voxel it came from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FaceTriangle {
    pub triangle: Triangle,
    /// `true` for the face on the high side of the voxel along the plane
    /// normal. Far triangles are emitted with inward winding and flipped
    /// once cancellation is done.
    pub far: bool,
}

// Unit square in the y = 0 plane split into two triangles sharing the
// (1,0,0)-(0,0,1) diagonal: rows 0..3 and rows 2..5. Wound so the normal
// points to -y.
const BASE_SQUARE: [[i32; 3]; 5] = [[0, 0, 0], [1, 0, 0], [0, 0, 1], [1, 0, 0], [1, 0, 1]];

// Cyclic shift of coordinates: component `i` moves to `(i + shift) % 3`.
#[inline]
fn roll(v: [i32; 3], shift: usize) -> [i32; 3] {
    let mut out = [0; 3];
    for (i, c) in v.into_iter().enumerate() {
        out[(i + shift) % 3] = c;
    }
    out
}

/// Near-face triangles of the unit cube at the origin for `axis`, wound
/// outward (towards the negative plane normal).
pub fn unit_face(axis: ViewAxis) -> [Triangle; 2] {
    // The base square lies across y; rolling moves that normal onto the axis plane normal.
    let shift = (axis.plane_normal_dim() + 2) % 3;
    let v = BASE_SQUARE.map(|p| Vec3::from_grid(roll(p, shift)));
    [Triangle::new(v[0], v[1], v[2]), Triangle::new(v[2], v[3], v[4])]
}

/// Emits the near and far faces perpendicular to `axis` for every occupied
/// voxel, in `(x, y, z)` order: near tri 0, near tri 1, far tri 0, far tri 1.
pub fn cubes_for_axis(voxels: &VoxelGrid, axis: ViewAxis) -> Vec<FaceTriangle> {
    let base = unit_face(axis);
    let mut step = [0i32; 3];
    step[axis.plane_normal_dim()] = 1;
    let step = Vec3::from_grid(step);

    let mut out = Vec::with_capacity(voxels.count() * 4);
    for p in voxels.iter_occupied() {
        let origin = Vec3::from_grid([p[0] as i32, p[1] as i32, p[2] as i32]);
        for (offset, far) in [(Vec3::ZERO, false), (step, true)] {
            for t in &base {
                let [a, b, c] = t.vertices;
                out.push(FaceTriangle {
                    triangle: Triangle::new(a + origin + offset, b + origin + offset, c + origin + offset),
                    far,
                });
            }
        }
    }
    out
}
