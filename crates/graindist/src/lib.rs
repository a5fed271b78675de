//! graindist: grain-boundary distance maps for labeled voxel grids.
//!
//! This is the top-level facade crate that re-exports the public API from all
//! graindist sub-crates. For most users, adding `graindist` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use graindist::prelude::*;
//!
//! // Two grains side by side on a 5x1x1 line.
//! let dims = Dims::new(5, 1, 1).unwrap();
//! let grid = FeatureGrid::from_ids(dims, Resolution::default(), &[1, 1, 2, 2, 2]).unwrap();
//!
//! let config = DistanceMapConfig::builder()
//!     .boundaries(true)
//!     .save_nearest_neighbors(true)
//!     .build()
//!     .unwrap();
//! let out = DistanceMapper::new(config).unwrap().run(&grid).unwrap();
//!
//! assert_eq!(out.distances(DistanceClass::GrainBoundary).unwrap(), &[1.0, 0.0, 0.0, 1.0, 2.0]);
//! assert_eq!(out.nearest(DistanceClass::GrainBoundary, 4), Some(2));
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `graindist-core` | Feature IDs, distance classes, sentinels |
//! | [`grid`] | `graindist-grid` | Dimensions, resolution, scan order, voxel storage |
//! | [`engine`] | `graindist-engine` | Seed classification, propagation, the mapper |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types and sentinels (`graindist-core`).
///
/// Contains [`types::FeatureId`], [`types::DistanceClass`],
/// [`types::ClassSet`], and the output-array names.
pub use graindist_core as types;

/// Voxel grids (`graindist-grid`).
///
/// Provides [`grid::Dims`], [`grid::Resolution`], the
/// [`grid::Direction`] scan order, and [`grid::FeatureGrid`].
pub use graindist_grid as grid;

/// Distance-map engine (`graindist-engine`).
///
/// [`engine::DistanceMapper`] for complete runs, plus the per-stage
/// operations [`engine::classify_seeds`] and [`engine::propagate`].
pub use graindist_engine as engine;

/// Common imports for typical graindist usage.
///
/// ```rust
/// use graindist::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use graindist_core::{ClassSet, DistanceClass, FeatureId, NO_NEIGHBOR, UNRESOLVED};

    // Grid
    pub use graindist_grid::{Dims, FeatureGrid, GridError, Resolution};

    // Engine
    pub use graindist_engine::{
        CancelToken, ConfigError, DistanceArrays, DistanceMapConfig, DistanceMapOutput,
        DistanceMapper, EngineError, ProgressEvent, RunReport, TieBreak,
    };
}
