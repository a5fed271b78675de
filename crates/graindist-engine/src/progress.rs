//! Progress events and the per-run control bundle.
//!
//! Progress is reported over a `crossbeam_channel` sender supplied by the
//! caller. Delivery is best-effort: events are dropped when the channel
//! is full or its receiver is gone, and the run never blocks on it.

use crossbeam_channel::{Sender, TrySendError};
use graindist_core::DistanceClass;

use crate::cancel::CancelToken;

/// One step of progress in a distance-map run.
#[derive(Clone, Debug, PartialEq)]
pub enum ProgressEvent {
    /// Seeds were classified for an enabled class.
    SeedsClassified {
        /// The class.
        class: DistanceClass,
        /// Number of seed voxels found.
        seeds: usize,
    },
    /// A channel finished one assignment + commit round.
    RoundCompleted {
        /// The channel.
        class: DistanceClass,
        /// 1-based round number; equals the step count committed.
        round: usize,
        /// Voxels whose distance was committed this round.
        committed: usize,
    },
    /// A channel reached its fixed point.
    ChannelConverged {
        /// The channel.
        class: DistanceClass,
        /// Rounds executed, including the final quiet round.
        sweeps: usize,
        /// Voxels with a resolved distance.
        resolved: usize,
    },
    /// Every channel completed.
    Finished {
        /// Voxels in the grid.
        voxel_count: usize,
        /// Wall-clock time of the run in microseconds.
        elapsed_us: u64,
    },
}

/// Optional destination for [`ProgressEvent`]s.
#[derive(Clone, Debug, Default)]
pub struct ProgressSink {
    sender: Option<Sender<ProgressEvent>>,
}

impl ProgressSink {
    /// A sink that forwards to `sender`.
    pub fn new(sender: Sender<ProgressEvent>) -> Self {
        Self {
            sender: Some(sender),
        }
    }

    /// A sink that discards every event.
    pub fn none() -> Self {
        Self::default()
    }

    /// Whether events go anywhere.
    pub fn is_connected(&self) -> bool {
        self.sender.is_some()
    }

    pub(crate) fn emit(&self, event: ProgressEvent) {
        if let Some(sender) = &self.sender {
            match sender.try_send(event) {
                Ok(()) | Err(TrySendError::Disconnected(_)) => {}
                Err(TrySendError::Full(ev)) => {
                    log::trace!("progress channel full, dropping {ev:?}");
                }
            }
        }
    }
}

/// Cancellation and progress collaborators shared by every channel of a run.
#[derive(Clone, Debug, Default)]
pub struct RunControl {
    /// Checked between propagation rounds.
    pub cancel: CancelToken,
    /// Receives progress events.
    pub progress: ProgressSink,
}

impl RunControl {
    /// Control with a fresh token and no progress reporting.
    pub fn new() -> Self {
        Self::default()
    }
}
