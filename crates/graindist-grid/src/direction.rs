//! The six axis-aligned neighbor directions and their scan order.

/// An axis-aligned step to one of the six face neighbors of a voxel.
///
/// The order of [`Direction::SCAN_ORDER`] is part of the engine's
/// contract: whenever several neighbors qualify during propagation,
/// the tie is settled by position in this list. Changing it changes
/// nearest-neighbor assignments.
///
/// # Examples
///
/// ```
/// use graindist_grid::Direction;
///
/// assert_eq!(Direction::SCAN_ORDER[0], Direction::NegZ);
/// assert_eq!(Direction::PosX.offset(), (1, 0, 0));
/// assert_eq!(Direction::NegY.opposite(), Direction::PosY);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// One plane down (`z - 1`).
    NegZ,
    /// One row back (`y - 1`).
    NegY,
    /// One column left (`x - 1`).
    NegX,
    /// One column right (`x + 1`).
    PosX,
    /// One row forward (`y + 1`).
    PosY,
    /// One plane up (`z + 1`).
    PosZ,
}

impl Direction {
    /// Fixed neighbor scan order: `[-z, -y, -x, +x, +y, +z]`.
    ///
    /// This is ascending flat-index order of the neighbors.
    pub const SCAN_ORDER: [Direction; 6] = [
        Direction::NegZ,
        Direction::NegY,
        Direction::NegX,
        Direction::PosX,
        Direction::PosY,
        Direction::PosZ,
    ];

    /// The `(dx, dy, dz)` step of this direction.
    #[inline]
    pub fn offset(self) -> (i64, i64, i64) {
        match self {
            Self::NegZ => (0, 0, -1),
            Self::NegY => (0, -1, 0),
            Self::NegX => (-1, 0, 0),
            Self::PosX => (1, 0, 0),
            Self::PosY => (0, 1, 0),
            Self::PosZ => (0, 0, 1),
        }
    }

    /// The direction pointing the other way.
    pub fn opposite(self) -> Self {
        match self {
            Self::NegZ => Self::PosZ,
            Self::NegY => Self::PosY,
            Self::NegX => Self::PosX,
            Self::PosX => Self::NegX,
            Self::PosY => Self::NegY,
            Self::PosZ => Self::NegZ,
        }
    }
}
