use core::fmt;

use crate::error::VoxelError;

/// Square boolean silhouette, row 0 at the top of the source image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SilhouetteMask {
    size: usize,
    cells: Vec<bool>,
}

impl SilhouetteMask {
    /// All-off mask of side `size`.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![false; size * size],
        }
    }

    /// All-on mask of side `size`.
    pub fn full(size: usize) -> Self {
        Self {
            size,
            cells: vec![true; size * size],
        }
    }

    pub fn from_fn(size: usize, mut f: impl FnMut(usize, usize) -> bool) -> Self {
        let mut m = Self::new(size);
        for row in 0..size {
            for col in 0..size {
                m.cells[row * size + col] = f(row, col);
            }
        }
        m
    }

    /// Builds a mask from rows of cells; the rows must form a square.
    pub fn from_rows<R: AsRef<[bool]>>(rows: &[R]) -> Result<Self, VoxelError> {
        let size = rows.len();
        let mut cells = Vec::with_capacity(size * size);
        for (row, r) in rows.iter().enumerate() {
            let r = r.as_ref();
            if r.len() != size {
                if row == 0 {
                    return Err(VoxelError::NotSquare {
                        rows: size,
                        cols: r.len(),
                    });
                }
                return Err(VoxelError::RaggedMask {
                    row,
                    expected: size,
                    found: r.len(),
                });
            }
            cells.extend_from_slice(r);
        }
        Ok(Self { size, cells })
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> bool {
        self.cells[row * self.size + col]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, v: bool) {
        self.cells[row * self.size + col] = v;
    }

    /// Number of on cells.
    pub fn count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    pub fn is_empty(&self) -> bool {
        !self.cells.iter().any(|&c| c)
    }

    /// Renders the mask one text line per row.
    pub fn to_text(&self, on: char, off: char) -> String {
        let mut out = String::with_capacity(self.size * (self.size + 1));
        for row in 0..self.size {
            for col in 0..self.size {
                out.push(if self.get(row, col) { on } else { off });
            }
            out.push('\n');
        }
        out
    }
}

impl fmt::Display for SilhouetteMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text('#', '.'))
    }
}
