use std::ops::Range;

use ambivox_geom::{Aabb, Triangle};
use ambivox_voxel::ViewAxis;

use crate::error::MeshError;
use crate::manifold::{EdgeStats, check_closed};

/// A triangle soup with outward winding.
///
/// Meshes produced by [`crate::assemble`] keep the three axis passes as
/// contiguous runs in `Left`, `Top`, `Right` order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    name: String,
    triangles: Vec<Triangle>,
    axis_ranges: Option<[Range<usize>; 3]>,
}

impl Mesh {
    pub fn from_triangles(triangles: Vec<Triangle>) -> Self {
        Self {
            name: String::new(),
            triangles,
            axis_ranges: None,
        }
    }

    /// Concatenates per-axis passes given in `ViewAxis::ALL` order.
    pub(crate) fn from_axis_parts(parts: Vec<Vec<Triangle>>) -> Self {
        let mut triangles = Vec::with_capacity(parts.iter().map(Vec::len).sum());
        let mut ranges: [Range<usize>; 3] = Default::default();
        for (range, part) in ranges.iter_mut().zip(parts) {
            let start = triangles.len();
            triangles.extend(part);
            *range = start..triangles.len();
        }
        Self {
            name: String::new(),
            triangles,
            axis_ranges: Some(ranges),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    pub fn into_triangles(self) -> Vec<Triangle> {
        self.triangles
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Triangles contributed by one axis pass, when the mesh still carries
    /// that layout.
    pub fn axis_triangles(&self, axis: ViewAxis) -> Option<&[Triangle]> {
        let ranges = self.axis_ranges.as_ref()?;
        self.triangles.get(ranges[axis.index()].clone())
    }

    /// Enclosed volume of an outward-wound closed mesh.
    pub fn signed_volume(&self) -> f64 {
        self.triangles.iter().map(Triangle::signed_volume).sum()
    }

    pub fn surface_area(&self) -> f64 {
        self.triangles.iter().map(|t| f64::from(t.area())).sum()
    }

    pub fn bounds(&self) -> Option<Aabb> {
        Aabb::from_points(self.triangles.iter().flat_map(|t| t.vertices))
    }

    pub fn check_closed(&self) -> Result<EdgeStats, MeshError> {
        check_closed(&self.triangles)
    }
}
