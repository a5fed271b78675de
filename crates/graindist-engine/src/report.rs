//! Per-run and per-channel statistics.
//!
//! [`RunReport`] is returned by every run alongside the output arrays. It
//! carries timing and convergence data for logging and benchmarks.

use graindist_core::{DistanceClass, FeatureId, UNRESOLVED};
use indexmap::IndexMap;

/// Convergence statistics of one channel.
///
/// Durations are in microseconds.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChannelReport {
    /// Rounds executed, including the final round that committed nothing.
    pub sweeps: usize,
    /// Feature voxels with a resolved distance.
    pub resolved: usize,
    /// Feature voxels no seed could reach.
    pub unresolved: usize,
    /// Largest distance written, or `0.0` if nothing resolved.
    pub max_distance: f32,
    /// Wall-clock time spent in the channel, in microseconds.
    pub elapsed_us: u64,
}

impl ChannelReport {
    /// Tally resolved and unresolved feature voxels of a finished channel.
    pub(crate) fn tally(ids: &[FeatureId], distance: &[f32], sweeps: usize) -> Self {
        let mut report = Self {
            sweeps,
            ..Self::default()
        };
        for (id, &d) in ids.iter().zip(distance) {
            if !id.is_feature() {
                continue;
            }
            if d == UNRESOLVED {
                report.unresolved += 1;
            } else {
                report.resolved += 1;
                report.max_distance = report.max_distance.max(d);
            }
        }
        report
    }
}

/// Summary of a complete distance-map run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RunReport {
    /// Voxels in the grid.
    pub voxel_count: usize,
    /// Seeds found per enabled class, in slot order.
    pub seed_counts: IndexMap<DistanceClass, usize>,
    /// Channel statistics per enabled class, in slot order.
    pub channels: IndexMap<DistanceClass, ChannelReport>,
    /// Wall-clock time of the whole run, in microseconds.
    pub total_us: u64,
}

impl RunReport {
    /// Statistics of `class`, if it ran.
    pub fn channel(&self, class: DistanceClass) -> Option<&ChannelReport> {
        self.channels.get(&class)
    }

    /// Seeds found for `class` (0 if it did not run).
    pub fn seeds(&self, class: DistanceClass) -> usize {
        self.seed_counts.get(&class).copied().unwrap_or(0)
    }
}
