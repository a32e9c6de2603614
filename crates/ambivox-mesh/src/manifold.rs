use hashbrown::HashMap;

use ambivox_geom::{Triangle, Vec3};

use crate::constants::{MAX_REPORTED_EDGES, QUANTIZATION_FACTOR};
use crate::error::MeshError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
struct QuantizedPoint(i64, i64, i64);

impl QuantizedPoint {
    fn new(p: Vec3) -> Self {
        QuantizedPoint(
            (p.x * QUANTIZATION_FACTOR).round() as i64,
            (p.y * QUANTIZATION_FACTOR).round() as i64,
            (p.z * QUANTIZATION_FACTOR).round() as i64,
        )
    }

    fn to_vec3(self) -> Vec3 {
        Vec3::new(
            self.0 as f32 / QUANTIZATION_FACTOR,
            self.1 as f32 / QUANTIZATION_FACTOR,
            self.2 as f32 / QUANTIZATION_FACTOR,
        )
    }
}

/// Edge usage summary of a closed mesh.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EdgeStats {
    /// Distinct undirected edges.
    pub edges: usize,
    /// Edges carried by more than two triangles (voxels touching only along
    /// an edge). Still closed, as uses pair up with opposite winding.
    pub non_manifold: usize,
}

/// Checks that every directed edge `a -> b` is matched by as many `b -> a`.
///
/// On a manifold patch this is "each edge shared by exactly two triangles
/// with opposite winding". Unmatched edges are returned as
/// [`MeshError::OpenEdges`], sorted, listing the first few.
pub fn check_closed(triangles: &[Triangle]) -> Result<EdgeStats, MeshError> {
    // (forward, backward) uses per undirected edge keyed (min, max)
    let mut edge_counts: HashMap<(QuantizedPoint, QuantizedPoint), (u32, u32)> =
        HashMap::with_capacity(triangles.len() * 3 / 2);

    for tri in triangles {
        for (a, b) in tri.edges() {
            let p0 = QuantizedPoint::new(a);
            let p1 = QuantizedPoint::new(b);
            if p0 < p1 {
                edge_counts.entry((p0, p1)).or_insert((0, 0)).0 += 1;
            } else {
                edge_counts.entry((p1, p0)).or_insert((0, 0)).1 += 1;
            }
        }
    }

    let mut open: Vec<_> = edge_counts
        .iter()
        .filter(|(_, (fwd, bwd))| fwd != bwd)
        .map(|(k, _)| *k)
        .collect();
    if !open.is_empty() {
        open.sort_unstable();
        return Err(MeshError::OpenEdges {
            count: open.len(),
            edges: open
                .iter()
                .take(MAX_REPORTED_EDGES)
                .map(|(a, b)| (a.to_vec3(), b.to_vec3()))
                .collect(),
        });
    }

    Ok(EdgeStats {
        edges: edge_counts.len(),
        non_manifold: edge_counts.values().filter(|(fwd, bwd)| fwd + bwd > 2).count(),
    })
}
