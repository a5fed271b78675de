//! Benchmark profiles for graindist distance maps.
//!
//! Provides pre-built grids and configurations for benchmarks and examples:
//!
//! - [`reference_grid`]: 64x64x64 grid (262K voxels) with 48 Voronoi grains
//! - [`stress_grid`]: 160x160x160 grid (~4M voxels) with 400 grains
//! - [`reference_config`]: all three classes, nearest neighbors saved

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use graindist_engine::DistanceMapConfig;
use graindist_grid::{FeatureGrid, Resolution};
use graindist_test_utils::fixtures::voronoi_grains;

/// Reference benchmark grid: 64x64x64 voxels, 48 grains, unit resolution.
pub fn reference_grid(seed: u64) -> FeatureGrid {
    voronoi_grains(64, 64, 64, 48, Resolution::default(), seed)
}

/// Stress benchmark grid: 160x160x160 voxels, 400 grains, anisotropic
/// resolution so the Euclidean pass does real work.
pub fn stress_grid(seed: u64) -> Result<FeatureGrid, String> {
    let res = Resolution::new(0.5, 0.5, 1.25).map_err(|e| e.to_string())?;
    Ok(voronoi_grains(160, 160, 160, 400, res, seed))
}

/// Every class enabled, nearest neighbors kept, default parallelism.
pub fn reference_config() -> DistanceMapConfig {
    DistanceMapConfig {
        do_boundaries: true,
        do_triple_lines: true,
        do_quad_points: true,
        save_nearest_neighbors: true,
        ..DistanceMapConfig::default()
    }
}

/// [`reference_config`] with all rayon parallelism turned off.
pub fn sequential_config() -> DistanceMapConfig {
    DistanceMapConfig {
        parallel_channels: false,
        parallel_sweeps: false,
        ..reference_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use graindist_core::DistanceClass;

    #[test]
    fn reference_config_validates() {
        reference_config().validate().unwrap();
        sequential_config().validate().unwrap();
    }

    #[test]
    fn reference_grid_deterministic() {
        let a = reference_grid(42);
        let b = reference_grid(42);
        assert_eq!(a, b);
        assert_eq!(a.voxel_count(), 64 * 64 * 64);
    }

    #[test]
    fn reference_grid_has_boundaries_and_triple_lines() {
        let g = reference_grid(42);
        let seeds = graindist_engine::classify_seeds(
            &g,
            reference_config().enabled_classes(),
            true,
        );
        for class in [DistanceClass::GrainBoundary, DistanceClass::TripleLine] {
            assert!(seeds.seed_count(class) > 0, "no {class} seeds");
        }
    }
}
