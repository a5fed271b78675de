//! The [`DistanceMapper`] entry point.
//!
//! A mapper validates its [`DistanceMapConfig`] once and can then be run
//! against any number of grids. Each run classifies seeds, floods every
//! enabled class as an independent channel, and hands back the distance
//! arrays together with a [`RunReport`].
//!
//! # Concurrency
//!
//! Channels share the read-only grid and seed classification and own
//! their buffers, so with `parallel_channels` they run as separate tasks
//! on the rayon pool. The mapper holds no state between runs and is both
//! [`Send`] and [`Sync`].

use std::time::Instant;

use crossbeam_channel::Sender;
use graindist_core::{DistanceClass, NO_NEIGHBOR, UNRESOLVED};
use graindist_grid::FeatureGrid;
use log::{debug, info};
use rayon::prelude::*;

use crate::cancel::CancelToken;
use crate::config::{ConfigError, DistanceMapConfig};
use crate::error::EngineError;
use crate::progress::{ProgressEvent, ProgressSink, RunControl};
use crate::propagate::{propagate, ChannelField};
use crate::report::RunReport;
use crate::seeds::classify_seeds;

// Compile-time assertion: a mapper can be shared across threads.
const _: () = {
    #[allow(dead_code)]
    fn assert_send_sync<T: Send + Sync>() {}
    #[allow(dead_code)]
    fn check() {
        assert_send_sync::<DistanceMapper>();
    }
};

// ── DistanceArrays ─────────────────────────────────────────────────

/// Caller-owned output arrays for [`DistanceMapper::run_into`].
///
/// Distance arrays hold one value per voxel. The nearest-neighbor array
/// holds three interleaved slots per voxel, one per [`DistanceClass`] in
/// slot order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DistanceArrays {
    /// Grain-boundary distances.
    pub gb: Option<Vec<f32>>,
    /// Triple-line distances.
    pub tj: Option<Vec<f32>>,
    /// Quadruple-point distances.
    pub qp: Option<Vec<f32>>,
    /// Interleaved nearest-neighbor slots, `3 * voxel_count` long.
    pub nearest_neighbors: Option<Vec<i32>>,
}

impl DistanceArrays {
    /// Allocate the arrays `config` asks for, filled with the unset
    /// sentinels.
    pub fn allocate(config: &DistanceMapConfig, voxel_count: usize) -> Self {
        let mut arrays = Self::default();
        for class in config.enabled_classes().iter() {
            *arrays.slot_mut(class) = Some(vec![UNRESOLVED; voxel_count]);
        }
        if config.save_nearest_neighbors {
            arrays.nearest_neighbors = Some(vec![NO_NEIGHBOR; 3 * voxel_count]);
        }
        arrays
    }

    /// Distance array of `class`, if allocated.
    pub fn distances(&self, class: DistanceClass) -> Option<&[f32]> {
        match class {
            DistanceClass::GrainBoundary => self.gb.as_deref(),
            DistanceClass::TripleLine => self.tj.as_deref(),
            DistanceClass::QuadPoint => self.qp.as_deref(),
        }
    }

    fn slot_mut(&mut self, class: DistanceClass) -> &mut Option<Vec<f32>> {
        match class {
            DistanceClass::GrainBoundary => &mut self.gb,
            DistanceClass::TripleLine => &mut self.tj,
            DistanceClass::QuadPoint => &mut self.qp,
        }
    }
}

// ── DistanceMapOutput ──────────────────────────────────────────────

/// Result of [`DistanceMapper::run`].
#[derive(Clone, Debug, PartialEq)]
pub struct DistanceMapOutput {
    /// Grain-boundary distances, if requested.
    pub gb: Option<Vec<f32>>,
    /// Triple-line distances, if requested.
    pub tj: Option<Vec<f32>>,
    /// Quadruple-point distances, if requested.
    pub qp: Option<Vec<f32>>,
    /// Interleaved nearest-neighbor slots, if `save_nearest_neighbors`.
    pub nearest_neighbors: Option<Vec<i32>>,
    /// Run statistics.
    pub report: RunReport,
}

impl DistanceMapOutput {
    fn new(arrays: DistanceArrays, report: RunReport) -> Self {
        Self {
            gb: arrays.gb,
            tj: arrays.tj,
            qp: arrays.qp,
            nearest_neighbors: arrays.nearest_neighbors,
            report,
        }
    }

    /// Distance array of `class`, if it was requested.
    pub fn distances(&self, class: DistanceClass) -> Option<&[f32]> {
        match class {
            DistanceClass::GrainBoundary => self.gb.as_deref(),
            DistanceClass::TripleLine => self.tj.as_deref(),
            DistanceClass::QuadPoint => self.qp.as_deref(),
        }
    }

    /// Nearest seed of `class` for voxel `index`, if recorded.
    ///
    /// Returns `None` when the nearest-neighbor array was not saved.
    pub fn nearest(&self, class: DistanceClass, index: usize) -> Option<i32> {
        self.nearest_neighbors
            .as_ref()
            .and_then(|nn| nn.get(3 * index + class.slot()).copied())
    }
}

// ── DistanceMapper ─────────────────────────────────────────────────

/// Computes grain-boundary, triple-line and quadruple-point distance maps.
///
/// # Examples
///
/// ```
/// use graindist_core::DistanceClass;
/// use graindist_engine::{DistanceMapConfig, DistanceMapper};
/// use graindist_grid::{Dims, FeatureGrid, Resolution};
///
/// let dims = Dims::new(5, 1, 1).unwrap();
/// let grid = FeatureGrid::from_ids(dims, Resolution::default(), &[1, 1, 2, 2, 2]).unwrap();
/// let config = DistanceMapConfig::builder().boundaries(true).build().unwrap();
/// let out = DistanceMapper::new(config).unwrap().run(&grid).unwrap();
/// assert_eq!(out.distances(DistanceClass::GrainBoundary).unwrap(), &[1.0, 0.0, 0.0, 1.0, 2.0]);
/// assert!(out.tj.is_none());
/// ```
#[derive(Clone, Debug)]
pub struct DistanceMapper {
    config: DistanceMapConfig,
    control: RunControl,
}

impl DistanceMapper {
    /// Create a mapper from a validated configuration.
    pub fn new(config: DistanceMapConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            control: RunControl::new(),
        })
    }

    /// Use `token` to cancel runs of this mapper.
    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.control.cancel = token;
        self
    }

    /// Send [`ProgressEvent`]s to `sender` during runs.
    pub fn with_progress(mut self, sender: Sender<ProgressEvent>) -> Self {
        self.control.progress = ProgressSink::new(sender);
        self
    }

    /// The active configuration.
    pub fn config(&self) -> &DistanceMapConfig {
        &self.config
    }

    /// The token checked between propagation rounds.
    pub fn cancel_token(&self) -> &CancelToken {
        &self.control.cancel
    }

    /// Run against `grid`, allocating fresh output arrays.
    ///
    /// # Errors
    ///
    /// See [`run_into`](Self::run_into).
    pub fn run(&self, grid: &FeatureGrid) -> Result<DistanceMapOutput, EngineError> {
        let mut arrays = DistanceArrays::allocate(&self.config, grid.voxel_count());
        let report = self.run_into(grid, &mut arrays)?;
        Ok(DistanceMapOutput::new(arrays, report))
    }

    /// Run against `grid`, writing into caller-owned arrays.
    ///
    /// Every enabled class needs a distance array of `voxel_count`
    /// elements; with `save_nearest_neighbors` the nearest-neighbor array
    /// needs `3 * voxel_count`. Arrays of disabled classes are not
    /// touched. Nothing is written unless every channel succeeds.
    ///
    /// # Errors
    ///
    /// - [`EngineError::Precondition`] for a missing or mis-sized array.
    /// - [`EngineError::SweepLimitExceeded`] or [`EngineError::Cancelled`]
    ///   from the first failing channel in slot order.
    pub fn run_into(
        &self,
        grid: &FeatureGrid,
        arrays: &mut DistanceArrays,
    ) -> Result<RunReport, EngineError> {
        let n = grid.voxel_count();
        self.check_arrays(arrays, n)?;

        let start = Instant::now();
        let classes = self.config.enabled_classes();
        let dims = grid.dims();
        info!(
            "distance map: {}x{}x{} grid ({n} voxels), classes [{}], manhattan_only={}",
            dims.nx(),
            dims.ny(),
            dims.nz(),
            classes
                .iter()
                .map(|c| c.to_string())
                .collect::<Vec<_>>()
                .join(", "),
            self.config.calc_only_manhattan_dist,
        );

        let mut seeds = classify_seeds(grid, classes, self.config.parallel_sweeps);
        let mut report = RunReport {
            voxel_count: n,
            ..RunReport::default()
        };
        let mut jobs = Vec::with_capacity(classes.len());
        for class in classes.iter() {
            let count = seeds.seed_count(class);
            debug!("{class}: {count} seeds");
            report.seed_counts.insert(class, count);
            self.control
                .progress
                .emit(ProgressEvent::SeedsClassified { class, seeds: count });
            let distance = seeds
                .take_distances(class)
                .unwrap_or_else(|| vec![UNRESOLVED; n]);
            jobs.push((class, ChannelField::from_seeds(distance)));
        }

        let options = self.config.propagate_options(n);
        let control = &self.control;
        let run_channel = |(class, mut field): (DistanceClass, ChannelField)| {
            propagate(grid, class, &mut field, &options, control).map(|r| (class, field, r))
        };
        let results: Vec<_> = if self.config.parallel_channels {
            jobs.into_par_iter().map(run_channel).collect()
        } else {
            jobs.into_iter().map(run_channel).collect()
        };
        let finished = results.into_iter().collect::<Result<Vec<_>, _>>()?;

        let mut record = seeds.into_neighbor_record();
        for (class, field, channel) in finished {
            let (distance, nearest) = field.into_parts();
            for (slot, near) in record
                .iter_mut()
                .skip(class.slot())
                .step_by(3)
                .zip(nearest)
            {
                *slot = near;
            }
            if let Some(out) = arrays.slot_mut(class) {
                out.copy_from_slice(&distance);
            }
            report.channels.insert(class, channel);
        }
        if self.config.save_nearest_neighbors {
            if let Some(out) = arrays.nearest_neighbors.as_mut() {
                out.copy_from_slice(&record);
            }
        }

        report.total_us = start.elapsed().as_micros() as u64;
        info!("distance map finished in {} us", report.total_us);
        self.control.progress.emit(ProgressEvent::Finished {
            voxel_count: n,
            elapsed_us: report.total_us,
        });
        Ok(report)
    }

    fn check_arrays(&self, arrays: &DistanceArrays, n: usize) -> Result<(), EngineError> {
        for class in self.config.enabled_classes().iter() {
            match arrays.distances(class) {
                Some(a) if a.len() == n => {}
                Some(a) => {
                    return Err(EngineError::precondition(format!(
                        "{} has {} elements, grid has {n} voxels",
                        class.array_name(),
                        a.len()
                    )))
                }
                None => {
                    return Err(EngineError::precondition(format!(
                        "{} is not allocated",
                        class.array_name()
                    )))
                }
            }
        }
        if self.config.save_nearest_neighbors {
            let expected = 3 * n;
            match arrays.nearest_neighbors.as_ref().map(Vec::len) {
                Some(len) if len == expected => {}
                Some(len) => {
                    return Err(EngineError::precondition(format!(
                        "{} has {len} elements, expected {expected}",
                        graindist_core::NEAREST_NEIGHBORS
                    )))
                }
                None => {
                    return Err(EngineError::precondition(format!(
                        "{} is not allocated",
                        graindist_core::NEAREST_NEIGHBORS
                    )))
                }
            }
        }
        Ok(())
    }
}

/// One-shot helper: validate `config` and run it against `grid`.
pub fn find_distance_map(
    grid: &FeatureGrid,
    config: DistanceMapConfig,
) -> Result<DistanceMapOutput, EngineError> {
    DistanceMapper::new(config)?.run(grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use graindist_grid::{Dims, Resolution};

    fn grid(nx: usize, ny: usize, nz: usize, ids: &[i32]) -> FeatureGrid {
        FeatureGrid::from_ids(Dims::new(nx, ny, nz).unwrap(), Resolution::default(), ids).unwrap()
    }

    fn all_classes() -> DistanceMapConfig {
        DistanceMapConfig::builder()
            .all_classes()
            .save_nearest_neighbors(true)
            .build()
            .unwrap()
    }

    #[test]
    fn rejects_invalid_config() {
        let err = DistanceMapper::new(DistanceMapConfig::default()).unwrap_err();
        assert_eq!(err, ConfigError::NoClassesSelected);
        let g = grid(1, 1, 1, &[1]);
        assert_eq!(
            find_distance_map(&g, DistanceMapConfig::default()),
            Err(EngineError::Config(ConfigError::NoClassesSelected))
        );
    }

    #[test]
    fn line_of_two_grains_with_nearest_record() {
        let g = grid(5, 1, 1, &[1, 1, 2, 2, 2]);
        let out = find_distance_map(&g, all_classes()).unwrap();
        assert_eq!(out.gb.as_deref().unwrap(), &[1.0, 0.0, 0.0, 1.0, 2.0]);
        assert!(out.tj.as_ref().unwrap().iter().all(|&d| d == UNRESOLVED));
        assert_eq!(
            out.nearest_neighbors.as_deref().unwrap(),
            &[1, -1, -1, 1, -1, -1, 2, -1, -1, 2, -1, -1, 2, -1, -1]
        );
        assert_eq!(out.nearest(DistanceClass::GrainBoundary, 4), Some(2));
        assert_eq!(out.report.seeds(DistanceClass::GrainBoundary), 2);
        assert_eq!(out.report.channels.len(), 3);
    }

    #[test]
    fn disabled_slot_keeps_seed_record() {
        let g = grid(3, 1, 1, &[2, 1, 3]);
        let config = DistanceMapConfig::builder()
            .triple_lines(true)
            .save_nearest_neighbors(true)
            .build()
            .unwrap();
        let out = find_distance_map(&g, config).unwrap();
        assert!(out.gb.is_none());
        assert_eq!(out.tj.as_deref().unwrap(), &[1.0, 0.0, 1.0]);
        assert_eq!(
            out.nearest_neighbors.as_deref().unwrap(),
            &[-1, 1, -1, 2, 1, -1, -1, 1, -1]
        );
    }

    #[test]
    fn nearest_neighbors_dropped_unless_saved() {
        let g = grid(2, 1, 1, &[1, 2]);
        let config = DistanceMapConfig::builder().boundaries(true).build().unwrap();
        let out = find_distance_map(&g, config).unwrap();
        assert!(out.nearest_neighbors.is_none());
        assert_eq!(out.nearest(DistanceClass::GrainBoundary, 0), None);
    }

    #[test]
    fn run_into_rejects_mis_sized_arrays() {
        let g = grid(4, 1, 1, &[1, 1, 2, 2]);
        let mapper = DistanceMapper::new(all_classes()).unwrap();

        let mut arrays = DistanceArrays::allocate(mapper.config(), 4);
        arrays.tj = Some(vec![UNRESOLVED; 3]);
        let err = mapper.run_into(&g, &mut arrays).unwrap_err();
        assert_eq!(
            err,
            EngineError::Precondition {
                reason: "TJEuclideanDistances has 3 elements, grid has 4 voxels".into()
            }
        );

        let mut arrays = DistanceArrays::allocate(mapper.config(), 4);
        arrays.nearest_neighbors = None;
        assert!(matches!(
            mapper.run_into(&g, &mut arrays),
            Err(EngineError::Precondition { .. })
        ));

        let mut arrays = DistanceArrays::allocate(mapper.config(), 4);
        let report = mapper.run_into(&g, &mut arrays).unwrap();
        assert_eq!(report.voxel_count, 4);
        assert_eq!(arrays.gb.as_deref().unwrap(), &[1.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn run_into_leaves_disabled_arrays_alone() {
        let g = grid(2, 1, 1, &[1, 2]);
        let config = DistanceMapConfig::builder().boundaries(true).build().unwrap();
        let mapper = DistanceMapper::new(config).unwrap();
        let mut arrays = DistanceArrays {
            gb: Some(vec![9.0, 9.0]),
            qp: Some(vec![7.0]),
            ..DistanceArrays::default()
        };
        mapper.run_into(&g, &mut arrays).unwrap();
        assert_eq!(arrays.gb.as_deref().unwrap(), &[0.0, 0.0]);
        assert_eq!(arrays.qp.as_deref().unwrap(), &[7.0]);
    }

    #[test]
    fn cancelled_run_writes_nothing() {
        let g = grid(3, 1, 1, &[1, 1, 2]);
        let token = CancelToken::new();
        let mapper = DistanceMapper::new(all_classes())
            .unwrap()
            .with_cancel_token(token.clone());
        token.cancel();
        let mut arrays = DistanceArrays::allocate(mapper.config(), 3);
        let before = arrays.clone();
        let err = mapper.run_into(&g, &mut arrays).unwrap_err();
        assert_eq!(
            err,
            EngineError::Cancelled {
                class: DistanceClass::GrainBoundary,
                sweeps: 0
            }
        );
        assert_eq!(arrays, before);
        assert!(mapper.cancel_token().is_cancelled());
    }

    #[test]
    fn progress_starts_with_seeds_and_ends_with_finished() {
        let g = grid(5, 1, 1, &[1, 1, 2, 2, 2]);
        let (tx, rx) = crossbeam_channel::unbounded();
        let config = DistanceMapConfig::builder()
            .boundaries(true)
            .parallel(false)
            .build()
            .unwrap();
        DistanceMapper::new(config)
            .unwrap()
            .with_progress(tx)
            .run(&g)
            .unwrap();
        let events: Vec<_> = rx.try_iter().collect();
        assert_eq!(
            events.first(),
            Some(&ProgressEvent::SeedsClassified {
                class: DistanceClass::GrainBoundary,
                seeds: 2
            })
        );
        assert!(matches!(
            events.last(),
            Some(ProgressEvent::Finished { voxel_count: 5, .. })
        ));
    }
}
