//! Distance classes and the [`ClassSet`] bitset.

use std::fmt;

/// Name of the grain-boundary distance array.
pub const GB_EUCLIDEAN_DISTANCES: &str = "GBEuclideanDistances";
/// Name of the triple-line distance array.
pub const TJ_EUCLIDEAN_DISTANCES: &str = "TJEuclideanDistances";
/// Name of the quadruple-point distance array.
pub const QP_EUCLIDEAN_DISTANCES: &str = "QPEuclideanDistances";
/// Name of the interleaved nearest-neighbor output array.
pub const NEAREST_NEIGHBORS: &str = "NearestNeighbors";

/// The boundary classes a distance map can be computed against.
///
/// Classes are cumulative: every quadruple-point seed is a triple-line
/// seed, and every triple-line seed is a grain-boundary seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DistanceClass {
    /// Voxels touching at least one other feature.
    GrainBoundary,
    /// Voxels touching at least two other features.
    TripleLine,
    /// Voxels touching more than two other features.
    QuadPoint,
}

impl DistanceClass {
    /// All classes in slot order.
    pub const ALL: [DistanceClass; 3] = [
        DistanceClass::GrainBoundary,
        DistanceClass::TripleLine,
        DistanceClass::QuadPoint,
    ];

    /// Slot of this class in the 3-wide nearest-neighbor array.
    #[inline]
    pub fn slot(self) -> usize {
        match self {
            Self::GrainBoundary => 0,
            Self::TripleLine => 1,
            Self::QuadPoint => 2,
        }
    }

    /// Minimum number of distinct neighboring features for a seed.
    #[inline]
    pub fn min_coordination(self) -> usize {
        match self {
            Self::GrainBoundary => 1,
            Self::TripleLine => 2,
            Self::QuadPoint => 3,
        }
    }

    /// Whether a voxel with `coordination` distinct neighbors seeds this class.
    #[inline]
    pub fn is_seed(self, coordination: usize) -> bool {
        coordination >= self.min_coordination()
    }

    /// Name of the per-voxel distance array this class produces.
    pub fn array_name(self) -> &'static str {
        match self {
            Self::GrainBoundary => GB_EUCLIDEAN_DISTANCES,
            Self::TripleLine => TJ_EUCLIDEAN_DISTANCES,
            Self::QuadPoint => QP_EUCLIDEAN_DISTANCES,
        }
    }
}

impl fmt::Display for DistanceClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::GrainBoundary => "grain boundary",
            Self::TripleLine => "triple line",
            Self::QuadPoint => "quadruple point",
        };
        f.pad(s)
    }
}

/// A set of [`DistanceClass`] values packed into one byte.
///
/// Iteration always yields classes in slot order, independent of the
/// order of insertion.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ClassSet {
    bits: u8,
}

impl ClassSet {
    /// Create an empty class set.
    pub fn empty() -> Self {
        Self { bits: 0 }
    }

    /// The set of all three classes.
    pub fn all() -> Self {
        DistanceClass::ALL.into_iter().collect()
    }

    /// Insert a class into the set.
    pub fn insert(&mut self, class: DistanceClass) {
        self.bits |= 1 << class.slot();
    }

    /// Check whether the set contains a class.
    pub fn contains(&self, class: DistanceClass) -> bool {
        self.bits & (1 << class.slot()) != 0
    }

    /// Return the union of two sets.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            bits: self.bits | other.bits,
        }
    }

    /// Number of classes in the set.
    pub fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// Iterate over the classes in slot order.
    pub fn iter(&self) -> impl Iterator<Item = DistanceClass> + '_ {
        DistanceClass::ALL
            .into_iter()
            .filter(move |class| self.contains(*class))
    }
}

impl FromIterator<DistanceClass> for ClassSet {
    fn from_iter<I: IntoIterator<Item = DistanceClass>>(iter: I) -> Self {
        let mut set = Self::empty();
        for class in iter {
            set.insert(class);
        }
        set
    }
}
