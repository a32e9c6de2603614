use crate::bitset::Bitset;

/// Dense `N x N x N` occupancy grid, indexed `(x, y, z)` with `z` fastest.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VoxelGrid {
    size: usize,
    bits: Bitset,
}

impl VoxelGrid {
    /// Empty grid.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            bits: Bitset::new(size * size * size),
        }
    }

    /// Fully occupied grid; the identity for intersection.
    pub fn full(size: usize) -> Self {
        Self {
            size,
            bits: Bitset::full(size * size * size),
        }
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn idx(&self, x: usize, y: usize, z: usize) -> usize {
        (x * self.size + y) * self.size + z
    }

    #[inline]
    pub fn coord(&self, i: usize) -> [usize; 3] {
        let n = self.size;
        [i / (n * n), (i / n) % n, i % n]
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize, z: usize) -> bool {
        self.bits.get(self.idx(x, y, z))
    }

    #[inline]
    pub fn get_at(&self, p: [usize; 3]) -> bool {
        self.get(p[0], p[1], p[2])
    }

    /// Signed lookup; anything outside the grid reads as empty.
    #[inline]
    pub fn get_i32(&self, x: i32, y: i32, z: i32) -> bool {
        let n = self.size as i32;
        if x < 0 || y < 0 || z < 0 || x >= n || y >= n || z >= n {
            return false;
        }
        self.get(x as usize, y as usize, z as usize)
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, z: usize, v: bool) {
        let i = self.idx(x, y, z);
        self.bits.set(i, v);
    }

    #[inline]
    pub fn set_at(&mut self, p: [usize; 3], v: bool) {
        self.set(p[0], p[1], p[2], v);
    }

    /// Number of occupied voxels.
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    pub fn is_empty(&self) -> bool {
        !self.bits.any()
    }

    /// Occupied coordinates in `(x, y, z)` lexicographic order.
    pub fn iter_occupied(&self) -> impl Iterator<Item = [usize; 3]> + '_ {
        self.bits.iter_ones().map(|i| self.coord(i))
    }

    pub fn intersect_with(&mut self, rhs: &VoxelGrid) {
        debug_assert_eq!(self.size, rhs.size);
        self.bits.and_assign(&rhs.bits);
    }

    pub fn union_with(&mut self, rhs: &VoxelGrid) {
        debug_assert_eq!(self.size, rhs.size);
        self.bits.or_assign(&rhs.bits);
    }

    pub fn is_subset_of(&self, rhs: &VoxelGrid) -> bool {
        self.size == rhs.size && self.bits.is_subset_of(&rhs.bits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coord_inverts_idx() {
        let g = VoxelGrid::new(5);
        for (x, y, z) in [(0, 0, 0), (1, 2, 3), (4, 4, 4), (4, 0, 1)] {
            assert_eq!(g.coord(g.idx(x, y, z)), [x, y, z]);
        }
    }

    #[test]
    fn occupied_iterates_in_c_order() {
        let mut g = VoxelGrid::new(3);
        g.set(2, 0, 0, true);
        g.set(0, 1, 2, true);
        g.set(0, 1, 0, true);
        let got: Vec<_> = g.iter_occupied().collect();
        assert_eq!(got, vec![[0, 1, 0], [0, 1, 2], [2, 0, 0]]);
    }

    #[test]
    fn signed_lookup_outside_is_empty() {
        let g = VoxelGrid::full(2);
        assert!(g.get_i32(1, 1, 1));
        assert!(!g.get_i32(-1, 0, 0));
        assert!(!g.get_i32(0, 2, 0));
    }
}
