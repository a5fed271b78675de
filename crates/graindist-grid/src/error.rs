//! Error types for grid construction.

use std::fmt;

/// Errors arising from grid construction.
#[derive(Debug, Clone, PartialEq)]
pub enum GridError {
    /// Attempted to construct a grid with a zero-length axis.
    EmptyGrid,
    /// The voxel count does not fit the i32 indices stored in
    /// nearest-neighbor arrays.
    TooManyVoxels {
        /// Requested extents `(nx, ny, nz)`.
        dims: (usize, usize, usize),
    },
    /// A resolution component is zero, negative, or not finite.
    InvalidResolution {
        /// Axis name (`"x"`, `"y"` or `"z"`).
        axis: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// A data buffer does not match the grid's voxel count.
    LengthMismatch {
        /// Voxel count implied by the dimensions.
        expected: usize,
        /// Length of the supplied buffer.
        actual: usize,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyGrid => write!(f, "grid must have at least one voxel on every axis"),
            Self::TooManyVoxels { dims } => write!(
                f,
                "grid {}x{}x{} exceeds the i32 voxel index range",
                dims.0, dims.1, dims.2
            ),
            Self::InvalidResolution { axis, value } => {
                write!(f, "resolution along {axis} must be finite and positive, got {value}")
            }
            Self::LengthMismatch { expected, actual } => {
                write!(f, "buffer has {actual} elements, grid has {expected} voxels")
            }
        }
    }
}

impl std::error::Error for GridError {}
