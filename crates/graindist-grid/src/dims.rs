//! Grid extents, flat-index arithmetic, and physical resolution.

use crate::direction::Direction;
use crate::error::GridError;
use smallvec::SmallVec;

/// Extents of a 3D voxel grid.
///
/// Every axis holds at least one voxel, and the total voxel count fits
/// in `i32` so that voxel indices can be stored in nearest-neighbor
/// arrays.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Dims {
    nx: usize,
    ny: usize,
    nz: usize,
}

impl Dims {
    /// Largest voxel count a grid may have.
    pub const MAX_VOXELS: usize = i32::MAX as usize;

    /// Create grid extents.
    ///
    /// Returns `Err(GridError::EmptyGrid)` if any axis is 0, or
    /// `Err(GridError::TooManyVoxels)` if the voxel count exceeds
    /// [`Dims::MAX_VOXELS`].
    ///
    /// # Examples
    ///
    /// ```
    /// use graindist_grid::Dims;
    ///
    /// let dims = Dims::new(4, 3, 2).unwrap();
    /// assert_eq!(dims.voxel_count(), 24);
    /// assert_eq!(dims.index(1, 2, 1), 12 + 8 + 1);
    /// assert_eq!(dims.coords(21), (1, 2, 1));
    /// ```
    pub fn new(nx: usize, ny: usize, nz: usize) -> Result<Self, GridError> {
        if nx == 0 || ny == 0 || nz == 0 {
            return Err(GridError::EmptyGrid);
        }
        let count = nx
            .checked_mul(ny)
            .and_then(|v| v.checked_mul(nz))
            .filter(|&v| v <= Self::MAX_VOXELS);
        if count.is_none() {
            return Err(GridError::TooManyVoxels {
                dims: (nx, ny, nz),
            });
        }
        Ok(Self { nx, ny, nz })
    }

    /// Voxels along x.
    pub fn nx(&self) -> usize {
        self.nx
    }

    /// Voxels along y.
    pub fn ny(&self) -> usize {
        self.ny
    }

    /// Voxels along z.
    pub fn nz(&self) -> usize {
        self.nz
    }

    /// Total number of voxels.
    #[inline]
    pub fn voxel_count(&self) -> usize {
        self.nx * self.ny * self.nz
    }

    /// Number of voxels in one z plane.
    #[inline]
    pub fn plane_len(&self) -> usize {
        self.nx * self.ny
    }

    /// Flat index of `(x, y, z)`: `z * nx * ny + y * nx + x`.
    #[inline]
    pub fn index(&self, x: usize, y: usize, z: usize) -> usize {
        debug_assert!(
            x < self.nx && y < self.ny && z < self.nz,
            "voxel ({x}, {y}, {z}) outside {}x{}x{}",
            self.nx,
            self.ny,
            self.nz
        );
        z * self.plane_len() + y * self.nx + x
    }

    /// Coordinates of a flat index: `x = i % nx`, `y = (i / nx) % ny`,
    /// `z = i / (nx * ny)`.
    #[inline]
    pub fn coords(&self, index: usize) -> (usize, usize, usize) {
        debug_assert!(index < self.voxel_count(), "voxel index {index} out of range");
        let x = index % self.nx;
        let y = (index / self.nx) % self.ny;
        let z = index / self.plane_len();
        (x, y, z)
    }

    /// Flat index of the neighbor of `index` in direction `dir`.
    ///
    /// Returns `None` when the step would leave the grid. There is no
    /// wraparound.
    #[inline]
    pub fn neighbour(&self, index: usize, dir: Direction) -> Option<usize> {
        let (x, y, z) = self.coords(index);
        match dir {
            Direction::NegZ => (z > 0).then(|| index - self.plane_len()),
            Direction::NegY => (y > 0).then(|| index - self.nx),
            Direction::NegX => (x > 0).then(|| index - 1),
            Direction::PosX => (x + 1 < self.nx).then(|| index + 1),
            Direction::PosY => (y + 1 < self.ny).then(|| index + self.nx),
            Direction::PosZ => (z + 1 < self.nz).then(|| index + self.plane_len()),
        }
    }

    /// In-bounds face neighbors of `index`, in [`Direction::SCAN_ORDER`].
    pub fn neighbours(&self, index: usize) -> SmallVec<[usize; 6]> {
        Direction::SCAN_ORDER
            .iter()
            .filter_map(|&dir| self.neighbour(index, dir))
            .collect()
    }
}

/// Physical spacing between voxel centers along each axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Resolution {
    x: f64,
    y: f64,
    z: f64,
}

impl Resolution {
    /// Create a resolution, rejecting zero, negative, or non-finite spacing.
    pub fn new(x: f64, y: f64, z: f64) -> Result<Self, GridError> {
        for (axis, value) in [("x", x), ("y", y), ("z", z)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(GridError::InvalidResolution { axis, value });
            }
        }
        Ok(Self { x, y, z })
    }

    /// Spacing as `[x, y, z]`.
    pub fn as_array(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// Physical position of voxel `(x, y, z)`: index times spacing.
    #[inline]
    pub fn physical(&self, x: usize, y: usize, z: usize) -> [f64; 3] {
        [x as f64 * self.x, y as f64 * self.y, z as f64 * self.z]
    }

    /// Euclidean distance between two voxels given by flat index.
    pub fn distance(&self, dims: &Dims, a: usize, b: usize) -> f64 {
        let (ax, ay, az) = dims.coords(a);
        let (bx, by, bz) = dims.coords(b);
        let pa = self.physical(ax, ay, az);
        let pb = self.physical(bx, by, bz);
        let dx = pa[0] - pb[0];
        let dy = pa[1] - pb[1];
        let dz = pa[2] - pb[2];
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

impl Default for Resolution {
    fn default() -> Self {
        Self {
            x: 1.0,
            y: 1.0,
            z: 1.0,
        }
    }
}
