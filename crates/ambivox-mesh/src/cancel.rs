use hashbrown::HashMap;
use hashbrown::hash_map::Entry;

use ambivox_geom::Triangle;
use ambivox_voxel::ViewAxis;

use crate::cube::FaceTriangle;
use crate::error::MeshError;

struct Slot {
    count: u32,
    far: bool,
}

/// Content key of a grid-aligned triangle: the sum of its vertices.
///
/// The two halves of a unit square differ in their key, so within one axis
/// pass equal keys mean the same triangle emitted by two neighboring voxels.
#[inline]
pub fn triangle_key(t: &Triangle) -> [i64; 3] {
    let mut key = [0i64; 3];
    for v in t.vertices {
        for (k, c) in key.iter_mut().zip(v.to_grid()) {
            *k += i64::from(c);
        }
    }
    key
}

/// Removes faces shared by two occupied voxels and normalizes winding.
///
/// A key seen once is boundary and kept; seen twice (once from each side) it
/// is internal and dropped. Survivors keep their input order, and far
/// triangles get vertices 1 and 2 swapped so all normals point outward.
pub fn cancel(axis: ViewAxis, triangles: Vec<FaceTriangle>) -> Result<Vec<FaceTriangle>, MeshError> {
    let mut slots: HashMap<[i64; 3], Slot> = HashMap::with_capacity(triangles.len());
    for t in &triangles {
        let key = triangle_key(&t.triangle);
        match slots.entry(key) {
            Entry::Vacant(e) => {
                e.insert(Slot { count: 1, far: t.far });
            }
            Entry::Occupied(mut e) => {
                let slot = e.get_mut();
                slot.count += 1;
                if slot.count > 2 {
                    return Err(MeshError::KeyCollision {
                        axis,
                        key,
                        count: slot.count,
                    });
                }
                if slot.far == t.far {
                    return Err(MeshError::SameSideCoincidence { axis, key });
                }
            }
        }
    }

    let mut out = triangles;
    out.retain(|t| slots.get(&triangle_key(&t.triangle)).is_some_and(|s| s.count == 1));
    for t in out.iter_mut().filter(|t| t.far) {
        t.triangle.vertices.swap(1, 2);
    }
    log::debug!(
        "{} pass: kept {} of {} triangles",
        axis,
        out.len(),
        slots.values().map(|s| s.count as usize).sum::<usize>()
    );
    Ok(out)
}
