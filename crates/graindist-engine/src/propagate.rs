//! Double-buffered flood fill from seed voxels.
//!
//! Each round has two sweeps over the grid:
//!
//! 1. **Assignment.** Every feature voxel without a nearest seed looks at
//!    its face neighbors in scan order. A neighbor with a resolved
//!    distance hands over its nearest seed. Reads come from the front
//!    buffer, writes go to the back buffer, then the buffers swap. A
//!    voxel assigned this round is invisible to its neighbors until the
//!    next round.
//! 2. **Commit.** Every voxel that just gained a nearest seed gets the
//!    round number as its distance.
//!
//! The channel converges on the first round that commits nothing.

use std::time::Instant;

use graindist_core::{DistanceClass, FeatureId, NO_NEIGHBOR, UNRESOLVED};
use graindist_grid::{Dims, Direction, FeatureGrid};
use log::{debug, trace, warn};
use rayon::prelude::*;

use crate::config::TieBreak;
use crate::error::EngineError;
use crate::euclidean::euclidean_pass;
use crate::progress::{ProgressEvent, RunControl};
use crate::report::ChannelReport;

// ── ChannelField ───────────────────────────────────────────────────

/// The distance and nearest-seed buffers one channel owns while it runs.
#[derive(Clone, Debug, PartialEq)]
pub struct ChannelField {
    distance: Vec<f32>,
    nearest: Vec<i32>,
}

impl ChannelField {
    /// Wrap a seeded distance array. Nearest seeds start unset and are
    /// filled in by [`propagate`].
    pub fn from_seeds(distance: Vec<f32>) -> Self {
        let nearest = vec![NO_NEIGHBOR; distance.len()];
        Self { distance, nearest }
    }

    /// Wrap existing buffers, e.g. the output of an earlier run.
    ///
    /// Returns `Err(EngineError::Precondition)` if the lengths differ.
    pub fn from_parts(distance: Vec<f32>, nearest: Vec<i32>) -> Result<Self, EngineError> {
        if distance.len() != nearest.len() {
            return Err(EngineError::precondition(format!(
                "distance has {} voxels, nearest has {}",
                distance.len(),
                nearest.len()
            )));
        }
        Ok(Self { distance, nearest })
    }

    /// Number of voxels.
    pub fn len(&self) -> usize {
        self.distance.len()
    }

    /// Whether the field holds no voxels.
    pub fn is_empty(&self) -> bool {
        self.distance.is_empty()
    }

    /// Per-voxel distances.
    pub fn distance(&self) -> &[f32] {
        &self.distance
    }

    /// Per-voxel nearest seed index, [`NO_NEIGHBOR`] if none.
    pub fn nearest(&self) -> &[i32] {
        &self.nearest
    }

    /// Consume the field and return `(distance, nearest)`.
    pub fn into_parts(self) -> (Vec<f32>, Vec<i32>) {
        (self.distance, self.nearest)
    }
}

// ── PropagateOptions ───────────────────────────────────────────────

/// Per-channel propagation settings.
///
/// Usually derived from a
/// [`DistanceMapConfig`](crate::DistanceMapConfig) through
/// [`propagate_options`](crate::DistanceMapConfig::propagate_options).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PropagateOptions {
    /// Keep step counts instead of running the Euclidean pass.
    pub manhattan_only: bool,
    /// Neighbor selection when several qualify.
    pub tie_break: TieBreak,
    /// Maximum number of rounds before giving up.
    pub max_sweeps: usize,
    /// Run each sweep on the rayon pool.
    pub parallel: bool,
}

impl Default for PropagateOptions {
    fn default() -> Self {
        Self {
            manhattan_only: false,
            tie_break: TieBreak::default(),
            max_sweeps: usize::MAX,
            parallel: false,
        }
    }
}

// ── propagate ──────────────────────────────────────────────────────

/// Flood-fill distances outward from the seeds in `field` until no voxel
/// changes.
///
/// Voxels whose distance is already resolved keep their nearest seed if
/// one is recorded, and otherwise become their own nearest seed. Running
/// `propagate` again on a converged field therefore changes nothing.
///
/// # Errors
///
/// - [`EngineError::Precondition`] if `field` does not match the grid.
/// - [`EngineError::SweepLimitExceeded`] if the field has not converged
///   after `options.max_sweeps` rounds.
/// - [`EngineError::Cancelled`] if `control.cancel` is set between rounds.
///
/// In both of the latter cases the field holds the partial result.
pub fn propagate(
    grid: &FeatureGrid,
    class: DistanceClass,
    field: &mut ChannelField,
    options: &PropagateOptions,
    control: &RunControl,
) -> Result<ChannelReport, EngineError> {
    let n = grid.voxel_count();
    if field.len() != n {
        return Err(EngineError::precondition(format!(
            "{class} field has {} voxels, grid has {n}",
            field.len()
        )));
    }
    let start = Instant::now();
    let sweeps = {
        let ChannelField { distance, nearest } = field;
        seed_nearest(distance, nearest);
        let mut flood = Flood {
            dims: grid.dims(),
            ids: grid.ids(),
            tie_break: options.tie_break,
            parallel: options.parallel,
            front: std::mem::take(nearest),
            back: Vec::new(),
        };
        flood.back = flood.front.clone();
        let outcome = flood.run(class, distance, options.max_sweeps, control);
        *nearest = flood.front;
        outcome?
    };

    if !options.manhattan_only {
        euclidean_pass(grid, &field.nearest, &mut field.distance, options.parallel);
    }

    let mut report = ChannelReport::tally(grid.ids(), &field.distance, sweeps);
    report.elapsed_us = start.elapsed().as_micros() as u64;
    debug!(
        "{class}: converged after {} sweeps, {} resolved, {} unresolved, max {:.3}",
        report.sweeps, report.resolved, report.unresolved, report.max_distance
    );
    control.progress.emit(ProgressEvent::ChannelConverged {
        class,
        sweeps: report.sweeps,
        resolved: report.resolved,
    });
    Ok(report)
}

/// Resolved voxels without a recorded seed become their own seed.
/// Unresolved voxels start with no seed.
fn seed_nearest(distance: &[f32], nearest: &mut [i32]) {
    for (i, (d, near)) in distance.iter().zip(nearest.iter_mut()).enumerate() {
        if *d == UNRESOLVED {
            *near = NO_NEIGHBOR;
        } else if *near < 0 {
            *near = i as i32;
        }
    }
}

/// Working state of one channel's flood.
struct Flood<'a> {
    dims: Dims,
    ids: &'a [FeatureId],
    tie_break: TieBreak,
    parallel: bool,
    front: Vec<i32>,
    back: Vec<i32>,
}

impl Flood<'_> {
    /// Run rounds until one commits nothing. Returns the number of rounds.
    fn run(
        &mut self,
        class: DistanceClass,
        distance: &mut [f32],
        max_sweeps: usize,
        control: &RunControl,
    ) -> Result<usize, EngineError> {
        let mut sweeps = 0usize;
        loop {
            if control.cancel.is_cancelled() {
                warn!("{class}: cancelled after {sweeps} sweeps");
                return Err(EngineError::Cancelled { class, sweeps });
            }
            if sweeps >= max_sweeps {
                warn!("{class}: no convergence within {max_sweeps} sweeps");
                return Err(EngineError::SweepLimitExceeded {
                    class,
                    limit: max_sweeps,
                });
            }
            sweeps += 1;
            let assigned = self.assign(distance);
            std::mem::swap(&mut self.front, &mut self.back);
            let committed = self.commit(distance, sweeps as f32);
            trace!("{class}: round {sweeps} assigned {assigned}, committed {committed}");
            control.progress.emit(ProgressEvent::RoundCompleted {
                class,
                round: sweeps,
                committed,
            });
            if assigned == 0 && committed == 0 {
                return Ok(sweeps);
            }
        }
    }

    /// Sweep 1: fill the back buffer from the front buffer. Returns the
    /// number of voxels that gained a nearest seed.
    fn assign(&mut self, distance: &[f32]) -> usize {
        let Self {
            dims,
            ids,
            tie_break,
            parallel,
            front,
            back,
        } = self;
        let (dims, ids, tie_break, front) = (*dims, *ids, *tie_break, front.as_slice());
        let step = |(v, slot): (usize, &mut i32)| -> usize {
            let current = front[v];
            *slot = current;
            if current != NO_NEIGHBOR || !ids[v].is_feature() {
                return 0;
            }
            let mut chosen = NO_NEIGHBOR;
            for dir in Direction::SCAN_ORDER {
                if let Some(j) = dims.neighbour(v, dir) {
                    if distance[j] != UNRESOLVED {
                        chosen = front[j];
                        if tie_break == TieBreak::FirstInScanOrder {
                            break;
                        }
                    }
                }
            }
            *slot = chosen;
            usize::from(chosen != NO_NEIGHBOR)
        };
        if *parallel {
            back.par_iter_mut().enumerate().map(step).sum()
        } else {
            back.iter_mut().enumerate().map(step).sum()
        }
    }

    /// Sweep 2: write `round` into every voxel that gained a nearest seed.
    fn commit(&self, distance: &mut [f32], round: f32) -> usize {
        let (ids, front) = (self.ids, self.front.as_slice());
        let step = |(v, d): (usize, &mut f32)| -> usize {
            if front[v] != NO_NEIGHBOR && *d == UNRESOLVED && ids[v].is_feature() {
                *d = round;
                1
            } else {
                0
            }
        };
        if self.parallel {
            distance.par_iter_mut().enumerate().map(step).sum()
        } else {
            distance.iter_mut().enumerate().map(step).sum()
        }
    }
}
