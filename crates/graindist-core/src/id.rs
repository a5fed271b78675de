//! Feature labels and the sentinel values of the output arrays.

use std::fmt;

/// Distance value of a voxel that has not been reached by any seed.
///
/// Every legitimate distance is `>= 0`, so the sentinel never collides
/// with a real value.
pub const UNRESOLVED: f32 = -1.0;

/// Nearest-neighbor slot value meaning "no seed found".
pub const NO_NEIGHBOR: i32 = -1;

/// Label of the grain (feature) a voxel belongs to.
///
/// Values `> 0` identify a feature. `0` and negative values mark
/// unclassified or background voxels, which are never seeds and never
/// receive a propagated distance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FeatureId(pub i32);

impl FeatureId {
    /// The background label.
    pub const BACKGROUND: FeatureId = FeatureId(0);

    /// Whether this voxel belongs to a labeled feature (`id > 0`).
    #[inline]
    pub fn is_feature(self) -> bool {
        self.0 > 0
    }

    /// Whether this label may be counted as a distinct neighbor (`id >= 0`).
    ///
    /// Background (`0`) counts as a neighbor, so a grain touching
    /// unlabeled space is a boundary voxel. Negative labels never count.
    #[inline]
    pub fn is_countable(self) -> bool {
        self.0 >= 0
    }
}

impl fmt::Display for FeatureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for FeatureId {
    fn from(v: i32) -> Self {
        Self(v)
    }
}

impl From<FeatureId> for i32 {
    fn from(v: FeatureId) -> Self {
        v.0
    }
}
