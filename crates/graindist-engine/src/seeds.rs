//! Seed classification: which voxels sit on a boundary, triple line, or
//! quadruple point.

use graindist_core::{ClassSet, DistanceClass, FeatureId, NO_NEIGHBOR, UNRESOLVED};
use graindist_grid::FeatureGrid;
use rayon::prelude::*;
use smallvec::SmallVec;

/// Distinct neighboring features of voxel `index`, in scan order.
///
/// A neighbor counts when its label differs from the voxel's own and is
/// `>= 0`. Background (`0`) therefore counts, negative labels never do.
pub fn coordination_set(grid: &FeatureGrid, index: usize) -> SmallVec<[FeatureId; 6]> {
    let own = grid.id(index);
    let mut set: SmallVec<[FeatureId; 6]> = SmallVec::new();
    for j in grid.dims().neighbours(index) {
        let other = grid.id(j);
        if other != own && other.is_countable() && !set.contains(&other) {
            set.push(other);
        }
    }
    set
}

/// Per-voxel result of the classification scan.
#[derive(Clone, Copy)]
struct VoxelSeed {
    coordination: u8,
    record: [i32; 3],
}

impl VoxelSeed {
    const NONE: Self = Self {
        coordination: 0,
        record: [NO_NEIGHBOR; 3],
    };

    fn classify(grid: &FeatureGrid, index: usize, classes: ClassSet) -> Self {
        if !grid.id(index).is_feature() {
            return Self::NONE;
        }
        let set = coordination_set(grid, index);
        let count = set.len();
        let mut record = [NO_NEIGHBOR; 3];
        if let Some(first) = set.first() {
            // Every populated slot holds the first neighboring feature.
            let c0 = first.0;
            if classes.contains(DistanceClass::GrainBoundary) {
                record = [c0, NO_NEIGHBOR, NO_NEIGHBOR];
            }
            if count >= 2 && classes.contains(DistanceClass::TripleLine) {
                record = [c0, c0, NO_NEIGHBOR];
            }
            if count > 2 && classes.contains(DistanceClass::QuadPoint) {
                record = [c0, c0, c0];
            }
        }
        Self {
            coordination: count as u8,
            record,
        }
    }
}

/// Output of [`classify_seeds`].
///
/// Distance arrays exist only for the requested classes. Seeds hold `0`,
/// every other voxel [`UNRESOLVED`].
#[derive(Clone, Debug, PartialEq)]
pub struct SeedClassification {
    distances: [Option<Vec<f32>>; 3],
    neighbor_record: Vec<i32>,
    coordination: Vec<u8>,
    seed_counts: [usize; 3],
}

impl SeedClassification {
    /// Seeded distance array of `class`, if it was requested.
    pub fn distances(&self, class: DistanceClass) -> Option<&[f32]> {
        self.distances[class.slot()].as_deref()
    }

    /// Move the seeded distance array of `class` out of the classification.
    pub fn take_distances(&mut self, class: DistanceClass) -> Option<Vec<f32>> {
        self.distances[class.slot()].take()
    }

    /// Interleaved 3-slot nearest-neighbor record, `3 * voxel_count` long.
    pub fn neighbor_record(&self) -> &[i32] {
        &self.neighbor_record
    }

    /// Consume the classification and return the neighbor record.
    pub fn into_neighbor_record(self) -> Vec<i32> {
        self.neighbor_record
    }

    /// Number of distinct neighboring features per voxel (0 for background).
    pub fn coordination(&self) -> &[u8] {
        &self.coordination
    }

    /// Number of seed voxels found for `class` (0 if not requested).
    pub fn seed_count(&self, class: DistanceClass) -> usize {
        self.seed_counts[class.slot()]
    }
}

/// Find the seed voxels of every requested class.
///
/// A feature voxel is a seed of `class` when its coordination count meets
/// [`DistanceClass::min_coordination`]. Background voxels are never seeds.
/// The result depends only on `grid` and `classes`; `parallel` changes
/// scheduling, not output.
///
/// # Examples
///
/// ```
/// use graindist_core::{ClassSet, DistanceClass};
/// use graindist_engine::classify_seeds;
/// use graindist_grid::{Dims, FeatureGrid, Resolution};
///
/// let dims = Dims::new(5, 1, 1).unwrap();
/// let grid = FeatureGrid::from_ids(dims, Resolution::default(), &[1, 1, 2, 2, 2]).unwrap();
/// let seeds = classify_seeds(&grid, ClassSet::all(), false);
/// assert_eq!(
///     seeds.distances(DistanceClass::GrainBoundary).unwrap(),
///     &[-1.0, 0.0, 0.0, -1.0, -1.0]
/// );
/// assert_eq!(seeds.seed_count(DistanceClass::TripleLine), 0);
/// ```
pub fn classify_seeds(grid: &FeatureGrid, classes: ClassSet, parallel: bool) -> SeedClassification {
    let n = grid.voxel_count();
    let voxels: Vec<VoxelSeed> = if parallel {
        (0..n)
            .into_par_iter()
            .map(|i| VoxelSeed::classify(grid, i, classes))
            .collect()
    } else {
        (0..n)
            .map(|i| VoxelSeed::classify(grid, i, classes))
            .collect()
    };

    let mut distances: [Option<Vec<f32>>; 3] = [None, None, None];
    let mut seed_counts = [0usize; 3];
    for class in classes.iter() {
        let mut dist = vec![UNRESOLVED; n];
        let mut seeds = 0;
        for (d, v) in dist.iter_mut().zip(&voxels) {
            if class.is_seed(v.coordination as usize) {
                *d = 0.0;
                seeds += 1;
            }
        }
        distances[class.slot()] = Some(dist);
        seed_counts[class.slot()] = seeds;
    }

    let mut neighbor_record = Vec::with_capacity(3 * n);
    let mut coordination = Vec::with_capacity(n);
    for v in &voxels {
        neighbor_record.extend_from_slice(&v.record);
        coordination.push(v.coordination);
    }

    SeedClassification {
        distances,
        neighbor_record,
        coordination,
        seed_counts,
    }
}
