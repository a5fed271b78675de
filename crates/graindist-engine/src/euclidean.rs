//! Euclidean finishing pass.
//!
//! Propagation leaves every resolved voxel with a step count and the
//! index of its nearest seed. This pass replaces the step count with the
//! physical distance to that seed.

use graindist_grid::FeatureGrid;
use rayon::prelude::*;

/// Overwrite `distance[v]` with the Euclidean distance from voxel `v` to
/// voxel `nearest[v]`, for every `v` with a nearest seed.
///
/// Coordinates are integer decompositions of the flat index scaled by the
/// grid resolution. Math is done in f64 and narrowed to f32. Voxels
/// without a nearest seed keep their value.
pub fn euclidean_pass(grid: &FeatureGrid, nearest: &[i32], distance: &mut [f32], parallel: bool) {
    debug_assert_eq!(nearest.len(), distance.len());
    let dims = grid.dims();
    let res = grid.resolution();
    let finish = |(v, d): (usize, &mut f32)| {
        if let Ok(seed) = usize::try_from(nearest[v]) {
            *d = res.distance(&dims, v, seed) as f32;
        }
    };
    if parallel {
        distance.par_iter_mut().enumerate().for_each(finish);
    } else {
        distance.iter_mut().enumerate().for_each(finish);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use graindist_core::{NO_NEIGHBOR, UNRESOLVED};
    use graindist_grid::{Dims, Resolution};

    #[test]
    fn replaces_step_counts_with_physical_distance() {
        let dims = Dims::new(3, 3, 2).unwrap();
        let res = Resolution::new(1.0, 2.0, 3.0).unwrap();
        let grid = FeatureGrid::from_ids(dims, res, &[1; 18]).unwrap();
        let mut distance = vec![UNRESOLVED; 18];
        let mut nearest = vec![NO_NEIGHBOR; 18];
        let v = dims.index(2, 2, 1);
        distance[v] = 4.0;
        nearest[v] = 0;
        euclidean_pass(&grid, &nearest, &mut distance, false);
        // dx = 2, dy = 4, dz = 3
        assert!((distance[v] - 29f32.sqrt()).abs() < 1e-6);
        assert_eq!(distance[0], UNRESOLVED);
    }

    #[test]
    fn seed_stays_at_zero() {
        let dims = Dims::new(2, 1, 1).unwrap();
        let grid = FeatureGrid::from_ids(dims, Resolution::default(), &[1, 2]).unwrap();
        let mut distance = vec![0.0, 0.0];
        euclidean_pass(&grid, &[0, 1], &mut distance, true);
        assert_eq!(distance, vec![0.0, 0.0]);
    }

    #[test]
    fn parallel_matches_sequential() {
        let dims = Dims::new(7, 5, 4).unwrap();
        let res = Resolution::new(0.3, 1.7, 2.9).unwrap();
        let grid = FeatureGrid::from_ids(dims, res, &[1; 140]).unwrap();
        let nearest: Vec<i32> = (0..140).map(|i| if i % 3 == 0 { -1 } else { 139 - i }).collect();
        let mut a = vec![1.0f32; 140];
        let mut b = a.clone();
        euclidean_pass(&grid, &nearest, &mut a, false);
        euclidean_pass(&grid, &nearest, &mut b, true);
        assert_eq!(a, b);
    }
}
