//! Distance-map configuration, validation, and error types.
//!
//! [`DistanceMapConfig`] is the input for constructing a
//! [`DistanceMapper`](crate::DistanceMapper).
//! [`validate()`](DistanceMapConfig::validate) checks it up front so that
//! a run never starts with a configuration that cannot produce output.

use std::error::Error;
use std::fmt;

use graindist_core::{ClassSet, DistanceClass};

use crate::propagate::PropagateOptions;

// ── TieBreak ───────────────────────────────────────────────────────

/// Which qualifying neighbor wins when several resolved neighbors could
/// hand their nearest seed to an unresolved voxel in the same round.
///
/// Neighbors are always scanned in
/// [`Direction::SCAN_ORDER`](graindist_grid::Direction::SCAN_ORDER).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TieBreak {
    /// The first qualifying neighbor in scan order wins.
    #[default]
    FirstInScanOrder,
    /// The last qualifying neighbor in scan order wins. Matches the
    /// assignment of the legacy implementation, which overwrote its
    /// choice for every qualifying neighbor.
    LastInScanOrder,
}

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected during [`DistanceMapConfig::validate()`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// None of boundaries, triple lines or quadruple points was requested.
    NoClassesSelected,
    /// `max_sweeps` is `Some(0)`, which could never converge.
    ZeroSweepLimit,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoClassesSelected => write!(
                f,
                "no distance class selected (enable boundaries, triple lines or quad points)"
            ),
            Self::ZeroSweepLimit => write!(f, "max_sweeps must be at least 1"),
        }
    }
}

impl Error for ConfigError {}

// ── DistanceMapConfig ──────────────────────────────────────────────

/// Complete configuration of a distance-map run.
///
/// Defaults match the legacy filter: every class disabled, neighbors not
/// saved, Euclidean finishing pass on. Enabling at least one class is
/// required before the configuration validates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DistanceMapConfig {
    /// Compute distances to grain-boundary voxels.
    pub do_boundaries: bool,
    /// Compute distances to triple-line voxels.
    pub do_triple_lines: bool,
    /// Compute distances to quadruple-point voxels.
    pub do_quad_points: bool,
    /// Keep the interleaved nearest-neighbor array in the output.
    pub save_nearest_neighbors: bool,
    /// Skip the Euclidean finishing pass and report propagation step counts.
    pub calc_only_manhattan_dist: bool,
    /// Tie-break policy during propagation. Default: first in scan order.
    pub tie_break: TieBreak,
    /// Upper bound on propagation rounds per channel. `None` uses
    /// `voxel_count + 1`, which no well-formed grid can reach.
    pub max_sweeps: Option<usize>,
    /// Run the enabled classes concurrently on the rayon pool. Default: true.
    pub parallel_channels: bool,
    /// Parallelize the per-voxel scans inside each round. Default: true.
    pub parallel_sweeps: bool,
}

impl Default for DistanceMapConfig {
    fn default() -> Self {
        Self {
            do_boundaries: false,
            do_triple_lines: false,
            do_quad_points: false,
            save_nearest_neighbors: false,
            calc_only_manhattan_dist: false,
            tie_break: TieBreak::default(),
            max_sweeps: None,
            parallel_channels: true,
            parallel_sweeps: true,
        }
    }
}

impl DistanceMapConfig {
    /// Create a new builder starting from the defaults.
    pub fn builder() -> DistanceMapConfigBuilder {
        DistanceMapConfigBuilder {
            config: Self::default(),
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.enabled_classes().is_empty() {
            return Err(ConfigError::NoClassesSelected);
        }
        if self.max_sweeps == Some(0) {
            return Err(ConfigError::ZeroSweepLimit);
        }
        Ok(())
    }

    /// Whether `class` is requested.
    pub fn is_enabled(&self, class: DistanceClass) -> bool {
        match class {
            DistanceClass::GrainBoundary => self.do_boundaries,
            DistanceClass::TripleLine => self.do_triple_lines,
            DistanceClass::QuadPoint => self.do_quad_points,
        }
    }

    /// The requested classes.
    pub fn enabled_classes(&self) -> ClassSet {
        DistanceClass::ALL
            .into_iter()
            .filter(|c| self.is_enabled(*c))
            .collect()
    }

    /// Round limit for a grid with `voxel_count` voxels.
    pub fn sweep_limit(&self, voxel_count: usize) -> usize {
        self.max_sweeps
            .unwrap_or_else(|| voxel_count.saturating_add(1))
    }

    /// Per-channel propagation options derived from this configuration.
    pub fn propagate_options(&self, voxel_count: usize) -> PropagateOptions {
        PropagateOptions {
            manhattan_only: self.calc_only_manhattan_dist,
            tie_break: self.tie_break,
            max_sweeps: self.sweep_limit(voxel_count),
            parallel: self.parallel_sweeps,
        }
    }
}

/// Builder for [`DistanceMapConfig`].
pub struct DistanceMapConfigBuilder {
    config: DistanceMapConfig,
}

impl DistanceMapConfigBuilder {
    /// Request distances to grain boundaries.
    pub fn boundaries(mut self, on: bool) -> Self {
        self.config.do_boundaries = on;
        self
    }

    /// Request distances to triple lines.
    pub fn triple_lines(mut self, on: bool) -> Self {
        self.config.do_triple_lines = on;
        self
    }

    /// Request distances to quadruple points.
    pub fn quad_points(mut self, on: bool) -> Self {
        self.config.do_quad_points = on;
        self
    }

    /// Request every class.
    pub fn all_classes(self) -> Self {
        self.boundaries(true).triple_lines(true).quad_points(true)
    }

    /// Keep the nearest-neighbor array in the output.
    pub fn save_nearest_neighbors(mut self, on: bool) -> Self {
        self.config.save_nearest_neighbors = on;
        self
    }

    /// Report step counts instead of Euclidean distances.
    pub fn manhattan_only(mut self, on: bool) -> Self {
        self.config.calc_only_manhattan_dist = on;
        self
    }

    /// Set the tie-break policy.
    pub fn tie_break(mut self, tie_break: TieBreak) -> Self {
        self.config.tie_break = tie_break;
        self
    }

    /// Cap the number of propagation rounds per channel.
    pub fn max_sweeps(mut self, limit: usize) -> Self {
        self.config.max_sweeps = Some(limit);
        self
    }

    /// Turn all parallel execution on or off.
    pub fn parallel(mut self, on: bool) -> Self {
        self.config.parallel_channels = on;
        self.config.parallel_sweeps = on;
        self
    }

    /// Build the configuration, validating it.
    ///
    /// # Errors
    ///
    /// Returns `Err` if no class is enabled or the round limit is zero.
    pub fn build(self) -> Result<DistanceMapConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_mirrors_legacy_filter() {
        let c = DistanceMapConfig::default();
        assert!(!c.do_boundaries && !c.do_triple_lines && !c.do_quad_points);
        assert!(!c.save_nearest_neighbors);
        assert!(!c.calc_only_manhattan_dist);
        assert_eq!(c.tie_break, TieBreak::FirstInScanOrder);
        assert_eq!(c.validate(), Err(ConfigError::NoClassesSelected));
    }

    #[test]
    fn builder_sets_flags() {
        let c = DistanceMapConfig::builder()
            .boundaries(true)
            .quad_points(true)
            .manhattan_only(true)
            .parallel(false)
            .build()
            .unwrap();
        let classes: Vec<_> = c.enabled_classes().iter().collect();
        assert_eq!(
            classes,
            vec![DistanceClass::GrainBoundary, DistanceClass::QuadPoint]
        );
        assert!(c.calc_only_manhattan_dist);
        assert!(!c.parallel_channels && !c.parallel_sweeps);
    }

    #[test]
    fn rejects_zero_sweep_limit() {
        let err = DistanceMapConfig::builder()
            .boundaries(true)
            .max_sweeps(0)
            .build()
            .unwrap_err();
        assert_eq!(err, ConfigError::ZeroSweepLimit);
        assert!(err.to_string().contains("max_sweeps"));
    }

    #[test]
    fn sweep_limit_defaults_to_voxel_count_plus_one() {
        let c = DistanceMapConfig::builder().all_classes().build().unwrap();
        assert_eq!(c.sweep_limit(125), 126);
        assert_eq!(c.sweep_limit(usize::MAX), usize::MAX);
        let capped = DistanceMapConfig {
            max_sweeps: Some(7),
            ..c
        };
        assert_eq!(capped.propagate_options(125).max_sweeps, 7);
    }
}
