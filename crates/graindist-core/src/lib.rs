//! Core types for the graindist workspace.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the vocabulary shared by the grid layer and the propagation engine:
//! feature labels, distance classes, and the sentinel values used in
//! per-voxel output arrays.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod class;
pub mod id;

pub use class::{
    ClassSet, DistanceClass, GB_EUCLIDEAN_DISTANCES, NEAREST_NEIGHBORS, QP_EUCLIDEAN_DISTANCES,
    TJ_EUCLIDEAN_DISTANCES,
};
pub use id::{FeatureId, NO_NEIGHBOR, UNRESOLVED};
