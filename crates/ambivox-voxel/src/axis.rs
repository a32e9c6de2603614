use core::fmt;

use serde::{Deserialize, Serialize};

/// One of the three orthogonal viewing directions.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewAxis {
    Left = 0,
    Top = 1,
    Right = 2,
}

/// Declarative embedding of a mask into the voxel grid for one axis.
///
/// Mask column `c` lands on grid dimension `column`, mask row `r` on grid
/// dimension `row` (reversed when `row_flipped`, so the top image row sits at
/// the high end of that dimension), and the value is repeated along
/// `extrusion`. Dimensions are `0 = x`, `1 = y`, `2 = z`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AxisSpec {
    pub name: &'static str,
    pub extrusion: usize,
    pub column: usize,
    pub row: usize,
    pub row_flipped: bool,
    /// Camera elevation in degrees for the proof view.
    pub elevation: f32,
    /// Camera azimuth in degrees for the proof view.
    pub azimuth: f32,
}

const AXIS_TABLE: [AxisSpec; 3] = [
    AxisSpec {
        name: "Left",
        extrusion: 1,
        column: 0,
        row: 2,
        row_flipped: true,
        elevation: 0.0,
        azimuth: -90.0,
    },
    AxisSpec {
        name: "Top",
        extrusion: 2,
        column: 0,
        row: 1,
        row_flipped: true,
        elevation: 90.0,
        azimuth: -90.0,
    },
    AxisSpec {
        name: "Right",
        extrusion: 0,
        column: 1,
        row: 2,
        row_flipped: true,
        elevation: 0.0,
        azimuth: 0.0,
    },
];

impl ViewAxis {
    /// All axes in mask order (`mask1`, `mask2`, `mask3`).
    pub const ALL: [ViewAxis; 3] = [ViewAxis::Left, ViewAxis::Top, ViewAxis::Right];

    /// The only axis affected by the mirror flag.
    pub const MIRROR: ViewAxis = ViewAxis::Top;

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub fn from_index(i: usize) -> Option<ViewAxis> {
        Self::ALL.get(i).copied()
    }

    #[inline]
    pub fn spec(self) -> &'static AxisSpec {
        &AXIS_TABLE[self.index()]
    }

    #[inline]
    pub fn name(self) -> &'static str {
        self.spec().name
    }

    /// Grid dimension the mesh faces of this axis are perpendicular to.
    #[inline]
    pub fn plane_normal_dim(self) -> usize {
        self.spec().extrusion
    }

    /// Whether mask rows run against the grid dimension, given the mirror flag.
    #[inline]
    pub fn row_flipped(self, mirror: bool) -> bool {
        self.spec().row_flipped ^ (mirror && self == Self::MIRROR)
    }

    /// Grid coordinate of mask cell `(row, col)` at `depth` along the extrusion.
    #[inline]
    pub fn embed(self, size: usize, row: usize, col: usize, depth: usize, mirror: bool) -> [usize; 3] {
        let spec = self.spec();
        let mut p = [0usize; 3];
        p[spec.column] = col;
        p[spec.row] = if self.row_flipped(mirror) {
            size - 1 - row
        } else {
            row
        };
        p[spec.extrusion] = depth;
        p
    }
}

impl fmt::Display for ViewAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
