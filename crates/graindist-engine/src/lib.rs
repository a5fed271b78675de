//! Distance-map engine for labeled voxel grids.
//!
//! Computes, for every voxel of a [`FeatureGrid`](graindist_grid::FeatureGrid),
//! the distance to the nearest grain-boundary, triple-line and
//! quadruple-point voxel, together with the index of that nearest seed.
//!
//! A run has three stages:
//!
//! 1. [`classify_seeds`] counts distinct neighboring features per voxel.
//! 2. [`propagate`] floods each enabled class outward from its seeds in
//!    double-buffered rounds, recording step counts.
//! 3. The Euclidean finishing pass replaces step counts with physical
//!    distances unless `calc_only_manhattan_dist` is set.
//!
//! [`DistanceMapper`] drives all three and runs the classes in parallel.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod cancel;
pub mod config;
pub mod error;
pub mod euclidean;
pub mod mapper;
pub mod progress;
pub mod propagate;
pub mod report;
pub mod seeds;

pub use cancel::CancelToken;
pub use config::{ConfigError, DistanceMapConfig, DistanceMapConfigBuilder, TieBreak};
pub use error::EngineError;
pub use euclidean::euclidean_pass;
pub use mapper::{find_distance_map, DistanceArrays, DistanceMapOutput, DistanceMapper};
pub use progress::{ProgressEvent, ProgressSink, RunControl};
pub use propagate::{propagate, ChannelField, PropagateOptions};
pub use report::{ChannelReport, RunReport};
pub use seeds::{classify_seeds, coordination_set, SeedClassification};
