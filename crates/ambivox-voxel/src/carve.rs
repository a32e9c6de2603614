use std::time::Instant;

use crate::axis::ViewAxis;
use crate::color::{ColorAnnotation, ColorMode};
use crate::error::VoxelError;
use crate::extrude::{extrude, project};
use crate::grid::VoxelGrid;
use crate::mask::SilhouetteMask;

/// Up to one silhouette per axis.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Views {
    masks: [Option<SilhouetteMask>; 3],
}

impl Views {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assigns masks to `Left`, `Top`, `Right` in order.
    pub fn from_masks(masks: Vec<SilhouetteMask>) -> Result<Self, VoxelError> {
        if masks.len() > ViewAxis::ALL.len() {
            return Err(VoxelError::TooManyViews { count: masks.len() });
        }
        let mut views = Self::new();
        for (axis, mask) in ViewAxis::ALL.into_iter().zip(masks) {
            views.set(axis, Some(mask));
        }
        Ok(views)
    }

    pub fn with(mut self, axis: ViewAxis, mask: SilhouetteMask) -> Self {
        self.set(axis, Some(mask));
        self
    }

    pub fn set(&mut self, axis: ViewAxis, mask: Option<SilhouetteMask>) {
        self.masks[axis.index()] = mask;
    }

    #[inline]
    pub fn get(&self, axis: ViewAxis) -> Option<&SilhouetteMask> {
        self.masks[axis.index()].as_ref()
    }

    /// Number of supplied masks.
    pub fn active_count(&self) -> usize {
        self.masks.iter().filter(|m| m.is_some()).count()
    }
}

/// Extruded volume of one axis.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AxisVolume {
    pub axis: ViewAxis,
    /// `false` when no mask was supplied and `volume` is the full grid.
    pub present: bool,
    pub volume: VoxelGrid,
}

/// The carved solid: intersection of the three axis volumes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Solid {
    voxels: VoxelGrid,
    volumes: [AxisVolume; 3],
    use_mirror: bool,
}

impl Solid {
    #[inline]
    pub fn size(&self) -> usize {
        self.voxels.size()
    }

    #[inline]
    pub fn voxels(&self) -> &VoxelGrid {
        &self.voxels
    }

    #[inline]
    pub fn volumes(&self) -> &[AxisVolume; 3] {
        &self.volumes
    }

    #[inline]
    pub fn volume(&self, axis: ViewAxis) -> &AxisVolume {
        &self.volumes[axis.index()]
    }

    #[inline]
    pub fn use_mirror(&self) -> bool {
        self.use_mirror
    }

    #[inline]
    pub fn voxel_count(&self) -> usize {
        self.voxels.count()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.voxels.is_empty()
    }

    /// What the solid looks like from `axis`, in mask orientation.
    pub fn proof_view(&self, axis: ViewAxis) -> SilhouetteMask {
        project(&self.voxels, axis, self.use_mirror)
    }
}

/// Output of one build: the solid plus its optional color annotation.
#[derive(Clone, Debug, PartialEq)]
pub struct Carving {
    pub solid: Solid,
    pub annotation: Option<ColorAnnotation>,
}

/// Voxel solid builder.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Carver {
    size: usize,
    use_mirror: bool,
    color_mode: ColorMode,
}

impl Carver {
    pub fn new(size: usize) -> Result<Self, VoxelError> {
        if size == 0 {
            return Err(VoxelError::ZeroResolution);
        }
        Ok(Self {
            size,
            use_mirror: false,
            color_mode: ColorMode::Off,
        })
    }

    pub fn with_mirror(mut self, use_mirror: bool) -> Self {
        self.use_mirror = use_mirror;
        self
    }

    pub fn with_color_mode(mut self, color_mode: ColorMode) -> Self {
        self.color_mode = color_mode;
        self
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Positional form: `mask1` is Left, `mask2` Top, `mask3` Right.
    pub fn build_masks(
        &self,
        mask1: Option<&SilhouetteMask>,
        mask2: Option<&SilhouetteMask>,
        mask3: Option<&SilhouetteMask>,
    ) -> Result<Carving, VoxelError> {
        let mut views = Views::new();
        for (axis, mask) in ViewAxis::ALL.into_iter().zip([mask1, mask2, mask3]) {
            views.set(axis, mask.cloned());
        }
        self.build(&views)
    }

    /// Extrudes each view, intersects the volumes and annotates the result.
    ///
    /// With no views at all the solid is the full grid.
    pub fn build(&self, views: &Views) -> Result<Carving, VoxelError> {
        let t0 = Instant::now();
        if views.active_count() == 0 {
            log::warn!("no views supplied; carving the full {}^3 cube", self.size);
        }

        let [left, top, right] = ViewAxis::ALL.map(|axis| {
            let mask = views.get(axis);
            extrude(self.size, mask, axis, self.use_mirror).map(|volume| AxisVolume {
                axis,
                present: mask.is_some(),
                volume,
            })
        });
        let volumes = [left?, top?, right?];
        let mut voxels = VoxelGrid::full(self.size);
        for v in &volumes {
            voxels.intersect_with(&v.volume);
        }

        let solid = Solid {
            voxels,
            volumes,
            use_mirror: self.use_mirror,
        };
        let annotation = ColorAnnotation::compute(&solid, self.color_mode);
        let ms: u32 = t0.elapsed().as_millis().min(u128::from(u32::MAX)) as u32;
        log::info!(
            target: "perf",
            "ms={} carve_build size={} views={} mirror={} voxels={}",
            ms,
            self.size,
            views.active_count(),
            self.use_mirror,
            solid.voxel_count()
        );
        Ok(Carving { solid, annotation })
    }
}
