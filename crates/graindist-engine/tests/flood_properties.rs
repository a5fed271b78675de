//! Property tests for seed classification and the flood fill.

use graindist_core::{ClassSet, DistanceClass, NO_NEIGHBOR, UNRESOLVED};
use graindist_engine::{
    classify_seeds, find_distance_map, propagate, ChannelField, DistanceMapConfig,
    PropagateOptions, RunControl,
};
use graindist_grid::{Dims, FeatureGrid, Resolution};
use graindist_test_utils::{bfs_step_counts, boundary_seeds, fixtures};
use proptest::prelude::*;

fn arb_grid() -> impl Strategy<Value = FeatureGrid> {
    (1usize..7, 1usize..7, 1usize..5)
        .prop_flat_map(|(nx, ny, nz)| {
            (
                Just((nx, ny, nz)),
                proptest::collection::vec(-1i32..4, nx * ny * nz),
            )
        })
        .prop_map(|((nx, ny, nz), ids)| {
            FeatureGrid::from_ids(Dims::new(nx, ny, nz).unwrap(), Resolution::default(), &ids)
                .unwrap()
        })
}

fn flood(grid: &FeatureGrid, class: DistanceClass, opts: &PropagateOptions) -> ChannelField {
    let mut seeds = classify_seeds(grid, ClassSet::all(), false);
    let mut field = ChannelField::from_seeds(seeds.take_distances(class).unwrap());
    propagate(grid, class, &mut field, opts, &RunControl::new()).unwrap();
    field
}

fn manhattan() -> PropagateOptions {
    PropagateOptions {
        manhattan_only: true,
        ..PropagateOptions::default()
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn boundary_seeds_match_reference(grid in arb_grid()) {
        let seeds = classify_seeds(&grid, ClassSet::all(), false);
        let expected = boundary_seeds(&grid);
        prop_assert_eq!(
            seeds.distances(DistanceClass::GrainBoundary).unwrap(),
            expected.as_slice()
        );
    }

    #[test]
    fn manhattan_steps_equal_bfs(grid in arb_grid()) {
        for class in DistanceClass::ALL {
            let seeds = classify_seeds(&grid, ClassSet::all(), false);
            let expected = bfs_step_counts(&grid, seeds.distances(class).unwrap());
            let field = flood(&grid, class, &manhattan());
            prop_assert_eq!(field.distance(), expected.as_slice());
        }
    }

    #[test]
    fn nearest_is_a_seed_of_the_same_class(grid in arb_grid()) {
        for class in DistanceClass::ALL {
            let field = flood(&grid, class, &manhattan());
            for (v, (&d, &near)) in field.distance().iter().zip(field.nearest()).enumerate() {
                prop_assert_eq!(d == UNRESOLVED, near == NO_NEIGHBOR);
                if near != NO_NEIGHBOR {
                    prop_assert_eq!(field.distance()[near as usize], 0.0);
                    prop_assert!(grid.id(v).is_feature());
                }
            }
        }
    }

    #[test]
    fn step_counts_never_drop_by_more_than_one_between_neighbors(grid in arb_grid()) {
        let field = flood(&grid, DistanceClass::GrainBoundary, &manhattan());
        let d = field.distance();
        let dims = grid.dims();
        for v in 0..dims.voxel_count() {
            if d[v] <= 0.0 {
                continue;
            }
            // A voxel reached in round k has a neighbor reached in round k - 1.
            let predecessor = dims.neighbours(v).iter().any(|&j| d[j] == d[v] - 1.0);
            prop_assert!(predecessor);
        }
    }

    #[test]
    fn euclidean_distances_are_non_negative(grid in arb_grid()) {
        let field = flood(&grid, DistanceClass::GrainBoundary, &PropagateOptions::default());
        for (&d, &near) in field.distance().iter().zip(field.nearest()) {
            if near != NO_NEIGHBOR {
                prop_assert!(d >= 0.0);
            } else {
                prop_assert_eq!(d, UNRESOLVED);
            }
        }
    }

    #[test]
    fn second_propagation_changes_nothing(grid in arb_grid(), manhattan_only in any::<bool>()) {
        let opts = PropagateOptions { manhattan_only, ..PropagateOptions::default() };
        let mut field = flood(&grid, DistanceClass::TripleLine, &opts);
        let before = field.clone();
        propagate(&grid, DistanceClass::TripleLine, &mut field, &opts, &RunControl::new())
            .unwrap();
        prop_assert_eq!(field, before);
    }

    #[test]
    fn parallel_sweeps_are_bit_identical(grid in arb_grid()) {
        let seq = flood(&grid, DistanceClass::GrainBoundary, &PropagateOptions::default());
        let par = flood(
            &grid,
            DistanceClass::GrainBoundary,
            &PropagateOptions { parallel: true, ..PropagateOptions::default() },
        );
        prop_assert_eq!(seq, par);
    }

    #[test]
    fn channels_are_independent(seed in 0u64..1_000) {
        let grid = fixtures::noise_labels(6, 5, 4, 0, 4, seed);
        let all = find_distance_map(
            &grid,
            DistanceMapConfig::builder().all_classes().build().unwrap(),
        )
        .unwrap();
        for class in DistanceClass::ALL {
            let cfg = DistanceMapConfig {
                do_boundaries: class == DistanceClass::GrainBoundary,
                do_triple_lines: class == DistanceClass::TripleLine,
                do_quad_points: class == DistanceClass::QuadPoint,
                ..DistanceMapConfig::default()
            };
            let single = find_distance_map(&grid, cfg).unwrap();
            prop_assert_eq!(single.distances(class), all.distances(class));
        }
    }
}
