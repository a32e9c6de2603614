use ambivox_geom::Vec3;
use ambivox_voxel::ViewAxis;
use thiserror::Error;

/// Geometry invariant violations. Each one points at a defect in the voxel or
/// triangulation logic; none is repaired.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MeshError {
    #[error("{axis} pass: {count} triangles share cancellation key {key:?}")]
    KeyCollision {
        axis: ViewAxis,
        key: [i64; 3],
        count: u32,
    },

    #[error("{axis} pass: coincident triangles at key {key:?} face the same way")]
    SameSideCoincidence { axis: ViewAxis, key: [i64; 3] },

    #[error("mesh is not closed: {count} unmatched edge(s), first {}", format_edges(.edges))]
    OpenEdges {
        count: usize,
        edges: Vec<(Vec3, Vec3)>,
    },

    #[error("triangle {index} is not half of a unit grid square")]
    NotGridAligned { index: usize },

    #[error("mesh encloses volume {found}, expected {expected}")]
    VolumeMismatch { expected: f64, found: f64 },
}

fn format_edges(edges: &[(Vec3, Vec3)]) -> String {
    edges
        .iter()
        .map(|(a, b)| format!("{a}->{b}"))
        .collect::<Vec<_>>()
        .join(", ")
}
