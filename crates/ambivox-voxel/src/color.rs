use serde::{Deserialize, Serialize};

use crate::carve::Solid;
use crate::constants::{PLAIN_SOLID_RGBA, SOLID_ALPHA, UNION_ALPHA};
use crate::grid::VoxelGrid;

/// How voxels are colored for visualization.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorMode {
    /// No annotation.
    #[default]
    Off,
    /// Solid voxels share one color.
    Plain,
    /// Red/green/blue per view volume; translucent where only the union is covered.
    ByAxis,
}

/// Per-voxel RGBA annotation. Presentation only; never feeds back into geometry.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorAnnotation {
    size: usize,
    rgba: Vec<[f32; 4]>,
    union: VoxelGrid,
}

impl ColorAnnotation {
    /// Colors `solid` according to `mode`; `None` for [`ColorMode::Off`].
    pub fn compute(solid: &Solid, mode: ColorMode) -> Option<Self> {
        if mode == ColorMode::Off {
            return None;
        }
        let size = solid.size();
        let voxels = solid.voxels();
        let mut rgba = vec![[0.0f32; 4]; size * size * size];
        let mut union = voxels.clone();
        match mode {
            ColorMode::Off => {}
            ColorMode::Plain => {
                for i in voxels.iter_occupied().map(|p| voxels.idx(p[0], p[1], p[2])) {
                    rgba[i] = PLAIN_SOLID_RGBA;
                }
            }
            ColorMode::ByAxis => {
                for view in solid.volumes().iter().filter(|v| v.present) {
                    let channel = view.axis.index();
                    for p in view.volume.iter_occupied() {
                        rgba[voxels.idx(p[0], p[1], p[2])][channel] = 1.0;
                    }
                    union.union_with(&view.volume);
                }
                for p in union.iter_occupied() {
                    rgba[voxels.idx(p[0], p[1], p[2])][3] = UNION_ALPHA;
                }
                for p in voxels.iter_occupied() {
                    rgba[voxels.idx(p[0], p[1], p[2])][3] = SOLID_ALPHA;
                }
            }
        }
        Some(Self { size, rgba, union })
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize, z: usize) -> [f32; 4] {
        self.rgba[(x * self.size + y) * self.size + z]
    }

    /// Voxels covered by any present view volume (plus the solid itself).
    #[inline]
    pub fn union(&self) -> &VoxelGrid {
        &self.union
    }

    /// Number of voxels with a non-zero alpha.
    pub fn visible_count(&self) -> usize {
        self.rgba.iter().filter(|c| c[3] > 0.0).count()
    }
}
