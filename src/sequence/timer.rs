//! Tracked, individually cancellable timers for one run.
//!
//! Every wait a run performs is registered here for its whole lifetime. Teardown calls
//! [`TimerSet::clear`], which cancels all pending waits at once and refuses new ones, so
//! no timer of a dead run is ever left to fire on its own.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio_util::sync::CancellationToken;

/// Marker returned when a wait or state change is refused because the run was cancelled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Cancelled;

#[derive(Default)]
struct TimerSetInner {
    next_id: u64,
    pending: HashMap<u64, CancellationToken>,
    closed: bool,
}

/// Pending-timer registry shared between a run and its controller.
#[derive(Clone, Default)]
pub struct TimerSet {
    inner: Arc<Mutex<TimerSetInner>>,
}

impl TimerSet {
    /// Create an empty, open timer set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of timers currently waiting.
    pub fn pending(&self) -> usize {
        self.lock().pending.len()
    }

    /// Whether [`clear`](Self::clear) has been called.
    pub fn is_closed(&self) -> bool {
        self.lock().closed
    }

    /// Cancel every pending timer and close the set. Returns how many were cancelled.
    pub fn clear(&self) -> usize {
        let drained: Vec<CancellationToken> = {
            let mut inner = self.lock();
            inner.closed = true;
            inner.pending.drain().map(|(_, t)| t).collect()
        };
        for token in &drained {
            token.cancel();
        }
        drained.len()
    }

    /// Sleep for `duration` unless `run` is cancelled or the set is cleared first.
    pub(crate) async fn sleep(
        &self,
        run: &CancellationToken,
        duration: Duration,
    ) -> Result<(), Cancelled> {
        let (id, token) = self.arm(run)?;
        let _armed = Armed { set: self, id };
        tokio::select! {
            biased;
            () = token.cancelled() => Err(Cancelled),
            () = tokio::time::sleep(duration) => Ok(()),
        }
    }

    fn arm(&self, run: &CancellationToken) -> Result<(u64, CancellationToken), Cancelled> {
        let mut inner = self.lock();
        if inner.closed || run.is_cancelled() {
            return Err(Cancelled);
        }
        let id = inner.next_id;
        inner.next_id = inner.next_id.wrapping_add(1);
        let token = run.child_token();
        inner.pending.insert(id, token.clone());
        Ok((id, token))
    }

    fn disarm(&self, id: u64) {
        self.lock().pending.remove(&id);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, TimerSetInner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

// Deregisters a timer however its wait ends, including when the future is dropped.
struct Armed<'a> {
    set: &'a TimerSet,
    id: u64,
}

impl Drop for Armed<'_> {
    fn drop(&mut self) {
        self.set.disarm(self.id);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sequence/timer.rs"]
mod tests;
