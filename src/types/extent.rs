//! Grid extents with a single ghost layer.

use std::fmt;

/// Number of interior cells of a Cartesian patch plus its ghost-padded layout.
///
/// Storage is row-major over `(nx + 2) × (ny + 2)` cells; the outermost ring
/// holds the ghost cells. Interior coordinates `(ix, iy)` start at zero.
///
/// # Example
///
/// ```
/// use wave_rs::types::GridExtent;
///
/// let extent = GridExtent::new(4, 3);
/// assert_eq!(extent.stride(), 6);
/// assert_eq!(extent.len(), 30);
/// assert_eq!(extent.index(0, 0), 7);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GridExtent {
    nx: usize,
    ny: usize,
}

impl GridExtent {
    /// Create a new extent.
    ///
    /// # Panics
    ///
    /// Panics if either `nx` or `ny` is zero.
    pub fn new(nx: usize, ny: usize) -> Self {
        assert!(nx > 0, "nx must be positive, got {}", nx);
        assert!(ny > 0, "ny must be positive, got {}", ny);
        Self { nx, ny }
    }

    /// Interior cells in x-direction.
    #[inline]
    pub fn nx(&self) -> usize {
        self.nx
    }

    /// Interior cells in y-direction.
    #[inline]
    pub fn ny(&self) -> usize {
        self.ny
    }

    /// Distance between two vertically adjacent cells in storage.
    #[inline]
    pub fn stride(&self) -> usize {
        self.nx + 2
    }

    /// Number of stored rows, ghost rows included.
    #[inline]
    pub fn rows(&self) -> usize {
        self.ny + 2
    }

    /// Number of stored cells, ghost cells included.
    #[inline]
    pub fn len(&self) -> usize {
        self.stride() * self.rows()
    }

    /// Always false; an extent holds at least one interior cell.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Number of interior cells.
    #[inline]
    pub fn interior_cells(&self) -> usize {
        self.nx * self.ny
    }

    /// Storage index of interior cell `(ix, iy)`.
    #[inline]
    pub fn index(&self, ix: usize, iy: usize) -> usize {
        (iy + 1) * self.stride() + ix + 1
    }

    /// Storage index of a ghost-inclusive coordinate.
    #[inline]
    pub fn raw_index(&self, gx: usize, gy: usize) -> usize {
        gy * self.stride() + gx
    }

    /// Return as tuple (nx, ny).
    #[inline]
    pub fn as_tuple(&self) -> (usize, usize) {
        (self.nx, self.ny)
    }
}

impl fmt::Display for GridExtent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}×{}", self.nx, self.ny)
    }
}

impl From<(usize, usize)> for GridExtent {
    fn from((nx, ny): (usize, usize)) -> Self {
        Self::new(nx, ny)
    }
}
