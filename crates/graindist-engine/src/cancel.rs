//! Cooperative cancellation of a running distance map.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared flag that asks a running map to stop.
///
/// Clones share the same flag. Channels check it between rounds, so a
/// cancelled run stops after at most one more round per channel and
/// returns [`EngineError::Cancelled`](crate::EngineError::Cancelled).
/// A cancelled [`DistanceMapper`](crate::DistanceMapper) run writes no
/// output.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    /// A fresh, uncancelled token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Idempotent.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Release);
    }

    /// Whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }
}
