//! Reusable grid fixtures.
//!
//! Hand-built microstructures with known seed layouts:
//!
//! - [`uniform`]: one grain, no boundaries.
//! - [`bicrystal`]: two grains split at `x = nx / 2`.
//! - [`tricrystal`]: three grains meeting along a triple line parallel to z.
//! - [`quad_junction`]: eight octant grains meeting at the grid center.
//!
//! and seeded random ones for property and stress tests:
//!
//! - [`voronoi_grains`]: nearest-center grain map.
//! - [`noise_labels`]: independent random label per voxel.

use graindist_grid::{Dims, FeatureGrid, Resolution};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

fn dims(nx: usize, ny: usize, nz: usize) -> Dims {
    Dims::new(nx, ny, nz).expect("fixture dims must be non-empty")
}

fn build(dims: Dims, resolution: Resolution, ids: Vec<i32>) -> FeatureGrid {
    FeatureGrid::from_ids(dims, resolution, &ids).expect("fixture ids match dims")
}

fn label_by(
    nx: usize,
    ny: usize,
    nz: usize,
    mut f: impl FnMut(usize, usize, usize) -> i32,
) -> FeatureGrid {
    let d = dims(nx, ny, nz);
    let mut ids = Vec::with_capacity(d.voxel_count());
    for z in 0..nz {
        for y in 0..ny {
            for x in 0..nx {
                ids.push(f(x, y, z));
            }
        }
    }
    build(d, Resolution::default(), ids)
}

/// Every voxel labeled `id`.
pub fn uniform(nx: usize, ny: usize, nz: usize, id: i32) -> FeatureGrid {
    label_by(nx, ny, nz, |_, _, _| id)
}

/// Grain 1 for `x < nx / 2`, grain 2 otherwise.
pub fn bicrystal(nx: usize, ny: usize, nz: usize) -> FeatureGrid {
    let half = nx / 2;
    label_by(nx, ny, nz, |x, _, _| if x < half { 1 } else { 2 })
}

/// Grains 1 and 2 split the `x < n / 2` half along y; grain 3 fills the
/// rest. The triple line runs along z at `x = n / 2`, `y = n / 2`.
pub fn tricrystal(n: usize, nz: usize) -> FeatureGrid {
    let half = n / 2;
    label_by(n, n, nz, |x, y, _| match (x < half, y < half) {
        (true, true) => 1,
        (true, false) => 2,
        (false, _) => 3,
    })
}

/// Eight grains, one per octant of an `n`-cube. The eight voxels around
/// the center each touch three other grains: they are the quad points.
pub fn quad_junction(n: usize) -> FeatureGrid {
    let half = n / 2;
    label_by(n, n, n, |x, y, z| {
        1 + i32::from(x >= half) + 2 * i32::from(y >= half) + 4 * i32::from(z >= half)
    })
}

/// `grains` random centers; each voxel takes the label (`1..=grains`) of
/// its closest center, lowest label on ties.
pub fn voronoi_grains(
    nx: usize,
    ny: usize,
    nz: usize,
    grains: usize,
    resolution: Resolution,
    seed: u64,
) -> FeatureGrid {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let centers: Vec<(i64, i64, i64)> = (0..grains.max(1))
        .map(|_| {
            (
                rng.random_range(0..nx) as i64,
                rng.random_range(0..ny) as i64,
                rng.random_range(0..nz) as i64,
            )
        })
        .collect();
    let d = dims(nx, ny, nz);
    let ids = (0..d.voxel_count())
        .map(|i| {
            let (x, y, z) = d.coords(i);
            let (x, y, z) = (x as i64, y as i64, z as i64);
            let mut best = (i64::MAX, 0);
            for (k, &(cx, cy, cz)) in centers.iter().enumerate() {
                let d2 = (x - cx).pow(2) + (y - cy).pow(2) + (z - cz).pow(2);
                if d2 < best.0 {
                    best = (d2, k);
                }
            }
            best.1 as i32 + 1
        })
        .collect();
    build(d, resolution, ids)
}

/// Independent uniformly random label in `min_id..=max_id` per voxel.
pub fn noise_labels(
    nx: usize,
    ny: usize,
    nz: usize,
    min_id: i32,
    max_id: i32,
    seed: u64,
) -> FeatureGrid {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let d = dims(nx, ny, nz);
    let ids = (0..d.voxel_count())
        .map(|_| rng.random_range(min_id..=max_id))
        .collect();
    build(d, Resolution::default(), ids)
}
