//! Test utilities for graindist development.
//!
//! Provides grid [`fixtures`] and a breadth-first reference oracle for the
//! flood fill, [`bfs_step_counts`], which engine tests compare against.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::collections::VecDeque;

use graindist_core::UNRESOLVED;
use graindist_grid::FeatureGrid;

pub mod fixtures;

/// Multi-source BFS step counts from every voxel with `seeds[v] == 0`.
///
/// Paths only cross feature voxels (`id > 0`). Unreached voxels get
/// [`UNRESOLVED`]. This is what a Manhattan-only propagation must produce.
pub fn bfs_step_counts(grid: &FeatureGrid, seeds: &[f32]) -> Vec<f32> {
    let dims = grid.dims();
    let mut out = vec![UNRESOLVED; grid.voxel_count()];
    let mut queue = VecDeque::new();
    for (v, &s) in seeds.iter().enumerate() {
        if s == 0.0 && grid.id(v).is_feature() {
            out[v] = 0.0;
            queue.push_back(v);
        }
    }
    while let Some(v) = queue.pop_front() {
        for j in dims.neighbours(v) {
            if out[j] == UNRESOLVED && grid.id(j).is_feature() {
                out[j] = out[v] + 1.0;
                queue.push_back(j);
            }
        }
    }
    out
}

/// Reference grain-boundary seeds: `0.0` where a feature voxel touches a
/// different label `>= 0`, [`UNRESOLVED`] elsewhere.
pub fn boundary_seeds(grid: &FeatureGrid) -> Vec<f32> {
    let dims = grid.dims();
    (0..grid.voxel_count())
        .map(|v| {
            let own = grid.id(v);
            let on_boundary = own.is_feature()
                && dims
                    .neighbours(v)
                    .iter()
                    .any(|&j| grid.id(j) != own && grid.id(j).is_countable());
            if on_boundary {
                0.0
            } else {
                UNRESOLVED
            }
        })
        .collect()
}
