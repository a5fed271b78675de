//! Dense per-voxel storage and the labeled [`FeatureGrid`].

use crate::dims::{Dims, Resolution};
use crate::error::GridError;
use graindist_core::FeatureId;

/// Dense 3D storage of one value per voxel.
///
/// Values are stored flat in `z * nx * ny + y * nx + x` order. Accessors
/// are bounds-checked: coordinates through `debug_assert!` in
/// [`Dims::index`], flat indices through slice indexing.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid3D<T> {
    dims: Dims,
    data: Vec<T>,
}

impl<T> Grid3D<T> {
    /// Wrap an existing buffer.
    ///
    /// Returns `Err(GridError::LengthMismatch)` if `data.len()` differs
    /// from the voxel count of `dims`.
    pub fn from_vec(dims: Dims, data: Vec<T>) -> Result<Self, GridError> {
        if data.len() != dims.voxel_count() {
            return Err(GridError::LengthMismatch {
                expected: dims.voxel_count(),
                actual: data.len(),
            });
        }
        Ok(Self { dims, data })
    }

    /// Grid extents.
    pub fn dims(&self) -> Dims {
        self.dims
    }

    /// Number of voxels.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always `false`: [`Dims`] rejects empty grids.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Value at `(x, y, z)`.
    #[inline]
    pub fn at(&self, x: usize, y: usize, z: usize) -> &T {
        &self.data[self.dims.index(x, y, z)]
    }

    /// Value at a flat index.
    #[inline]
    pub fn at_index(&self, index: usize) -> &T {
        &self.data[index]
    }

    /// Mutable value at `(x, y, z)`.
    #[inline]
    pub fn at_mut(&mut self, x: usize, y: usize, z: usize) -> &mut T {
        let i = self.dims.index(x, y, z);
        &mut self.data[i]
    }

    /// The flat buffer.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// The flat buffer, mutably.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Consume the grid and return the flat buffer.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }
}

impl<T: Clone> Grid3D<T> {
    /// A grid with every voxel set to `value`.
    pub fn filled(dims: Dims, value: T) -> Self {
        Self {
            dims,
            data: vec![value; dims.voxel_count()],
        }
    }
}

/// A grid of feature labels together with its physical resolution.
///
/// This is the read-only input of every distance-map run.
///
/// # Examples
///
/// ```
/// use graindist_core::FeatureId;
/// use graindist_grid::{Dims, FeatureGrid, Resolution};
///
/// let dims = Dims::new(5, 1, 1).unwrap();
/// let grid = FeatureGrid::from_ids(dims, Resolution::default(), &[1, 1, 2, 2, 2]).unwrap();
/// assert_eq!(grid.id(2), FeatureId(2));
/// assert_eq!(grid.voxel_count(), 5);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureGrid {
    ids: Grid3D<FeatureId>,
    resolution: Resolution,
}

impl FeatureGrid {
    /// Build a labeled grid from a feature buffer.
    pub fn new(
        dims: Dims,
        resolution: Resolution,
        ids: Vec<FeatureId>,
    ) -> Result<Self, GridError> {
        Ok(Self {
            ids: Grid3D::from_vec(dims, ids)?,
            resolution,
        })
    }

    /// Build a labeled grid from raw i32 labels.
    pub fn from_ids(dims: Dims, resolution: Resolution, ids: &[i32]) -> Result<Self, GridError> {
        Self::new(dims, resolution, ids.iter().copied().map(FeatureId).collect())
    }

    /// Wrap an existing label grid.
    pub fn from_grid(ids: Grid3D<FeatureId>, resolution: Resolution) -> Self {
        Self { ids, resolution }
    }

    /// Grid extents.
    pub fn dims(&self) -> Dims {
        self.ids.dims()
    }

    /// Physical voxel spacing.
    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    /// Number of voxels.
    pub fn voxel_count(&self) -> usize {
        self.ids.len()
    }

    /// Label at a flat index.
    #[inline]
    pub fn id(&self, index: usize) -> FeatureId {
        *self.ids.at_index(index)
    }

    /// All labels, flat.
    pub fn ids(&self) -> &[FeatureId] {
        self.ids.as_slice()
    }

    /// The underlying label grid.
    pub fn grid(&self) -> &Grid3D<FeatureId> {
        &self.ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_vec_rejects_wrong_length() {
        let dims = Dims::new(2, 2, 2).unwrap();
        let err = Grid3D::from_vec(dims, vec![0u8; 7]).unwrap_err();
        assert_eq!(
            err,
            GridError::LengthMismatch {
                expected: 8,
                actual: 7
            }
        );
    }

    #[test]
    fn coordinate_and_flat_access_agree() {
        let dims = Dims::new(3, 2, 2).unwrap();
        let grid = Grid3D::from_vec(dims, (0..12).collect::<Vec<u32>>()).unwrap();
        assert_eq!(*grid.at(0, 0, 0), 0);
        assert_eq!(*grid.at(2, 1, 0), 5);
        assert_eq!(*grid.at(1, 0, 1), 7);
        assert_eq!(*grid.at_index(11), 11);
    }

    #[test]
    fn at_mut_writes_through() {
        let dims = Dims::new(2, 2, 1).unwrap();
        let mut grid = Grid3D::filled(dims, -1.0f32);
        *grid.at_mut(1, 1, 0) = 4.5;
        assert_eq!(grid.as_slice(), &[-1.0, -1.0, -1.0, 4.5]);
        assert_eq!(grid.into_vec().len(), 4);
    }

    #[test]
    fn feature_grid_exposes_labels() {
        let dims = Dims::new(2, 1, 1).unwrap();
        let res = Resolution::new(0.5, 0.5, 0.5).unwrap();
        let grid = FeatureGrid::from_ids(dims, res, &[3, -1]).unwrap();
        assert!(grid.id(0).is_feature());
        assert!(!grid.id(1).is_feature());
        assert_eq!(grid.resolution(), res);
        assert!(FeatureGrid::from_ids(dims, res, &[1]).is_err());
    }
}
