//! Regularly sampled 2D fields with bilinear interpolation.

use crate::types::Real;

/// Values sampled on a regular node grid.
///
/// Sample `(i, j)` sits at `(x0 + i·dx, y0 + j·dx)` and is stored row-major
/// at `j · nx + i`. Queries outside the sampled area clamp to the border.
#[derive(Clone, Debug, PartialEq)]
pub struct GriddedField {
    nx: usize,
    ny: usize,
    cell_size: Real,
    origin: (Real, Real),
    data: Vec<Real>,
}

impl GriddedField {
    /// Create a field from row-major samples.
    ///
    /// Returns `None` if `data.len() != nx * ny`, either size is zero, or the
    /// cell size is not positive.
    pub fn new(nx: usize, ny: usize, cell_size: Real, data: Vec<Real>) -> Option<Self> {
        if nx == 0 || ny == 0 || data.len() != nx * ny || cell_size <= 0.0 {
            return None;
        }
        Some(Self {
            nx,
            ny,
            cell_size,
            origin: (0.0, 0.0),
            data,
        })
    }

    /// Create a 1D profile (ny = 1).
    pub fn from_profile(samples: Vec<Real>, spacing: Real) -> Option<Self> {
        let n = samples.len();
        Self::new(n, 1, spacing, samples)
    }

    /// Sample a function at every node.
    pub fn from_fn(nx: usize, ny: usize, cell_size: Real, f: impl Fn(Real, Real) -> Real) -> Self {
        let mut data = Vec::with_capacity(nx * ny);
        for j in 0..ny {
            for i in 0..nx {
                data.push(f(i as Real * cell_size, j as Real * cell_size));
            }
        }
        Self {
            nx: nx.max(1),
            ny: ny.max(1),
            cell_size,
            origin: (0.0, 0.0),
            data,
        }
    }

    /// Move the first sample to `(x0, y0)`.
    pub fn with_origin(mut self, x0: Real, y0: Real) -> Self {
        self.origin = (x0, y0);
        self
    }

    /// Samples in x-direction.
    pub fn nx(&self) -> usize {
        self.nx
    }

    /// Samples in y-direction.
    pub fn ny(&self) -> usize {
        self.ny
    }

    /// Distance between samples.
    pub fn cell_size(&self) -> Real {
        self.cell_size
    }

    /// Position of the first sample.
    pub fn origin(&self) -> (Real, Real) {
        self.origin
    }

    /// Raw samples.
    pub fn data(&self) -> &[Real] {
        &self.data
    }

    /// Sample at node `(i, j)`.
    #[inline]
    pub fn sample(&self, i: usize, j: usize) -> Real {
        self.data[j * self.nx + i]
    }

    /// Base node and fraction along one axis.
    #[inline]
    fn locate(coord: Real, origin: Real, cell_size: Real, n: usize) -> (usize, Real) {
        if n < 2 {
            return (0, 0.0);
        }
        let pos = ((coord - origin) / cell_size).clamp(0.0, (n - 1) as Real);
        let base = (pos.floor() as usize).min(n - 2);
        (base, pos - base as Real)
    }

    /// Bilinearly interpolated value at (x, y).
    pub fn interpolate(&self, x: Real, y: Real) -> Real {
        let (i0, fx) = Self::locate(x, self.origin.0, self.cell_size, self.nx);
        let (j0, fy) = Self::locate(y, self.origin.1, self.cell_size, self.ny);
        let i1 = (i0 + 1).min(self.nx - 1);
        let j1 = (j0 + 1).min(self.ny - 1);

        let bottom = self.sample(i0, j0) * (1.0 - fx) + self.sample(i1, j0) * fx;
        let top = self.sample(i0, j1) * (1.0 - fx) + self.sample(i1, j1) * fx;
        bottom * (1.0 - fy) + top * fy
    }
}
