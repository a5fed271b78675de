//! Voxel grid storage for graindist.
//!
//! This crate defines the flattened 3D grid that every propagation pass
//! walks, along with the fixed neighbor scan order that makes tie-breaks
//! reproducible.
//!
//! # Layout
//!
//! Voxel `(x, y, z)` lives at flat index `z * nx * ny + y * nx + x`.
//! [`Dims::index`] and [`Dims::coords`] convert between the two forms.
//!
//! # Types
//!
//! - [`Dims`]: grid extents and index arithmetic
//! - [`Resolution`]: physical voxel spacing per axis
//! - [`Direction`]: the six axis-aligned neighbors in scan order
//! - [`Grid3D`]: dense per-voxel storage
//! - [`FeatureGrid`]: a labeled grid plus its resolution

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod dims;
pub mod direction;
pub mod error;
pub mod grid3d;

pub use dims::{Dims, Resolution};
pub use direction::Direction;
pub use error::GridError;
pub use grid3d::{FeatureGrid, Grid3D};
