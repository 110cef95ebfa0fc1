//! Owns the single live run of one demo instance.
//!
//! All state transitions happen synchronously on the caller's thread: when a method that
//! stops a run returns, that run's token is cancelled, its timers are cleared, its task is
//! aborted and the stage is back in its reset state.

use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::foundation::core::RunId;
use crate::foundation::error::{ChoreoError, ChoreoResult};
use crate::lifecycle::signal::{LifecycleSignal, Transition};
use crate::sequence::sequencer::{Choreography, RunOutcome, Sequencer};
use crate::sequence::stage::{DisplayState, Stage, StageObserver};
use crate::sequence::timer::TimerSet;

struct LiveRun {
    id: RunId,
    token: CancellationToken,
    timers: TimerSet,
    handle: JoinHandle<RunOutcome>,
}

/// Starts, stops and restarts the choreography of one demo as its visibility changes.
pub struct DemoController {
    name: String,
    choreo: Choreography,
    stage: Arc<Stage>,
    signal: LifecycleSignal,
    live: Option<LiveRun>,
    next_run: u64,
    runtime: Handle,
}

impl DemoController {
    /// Create an idle controller that spawns runs on the current tokio runtime.
    pub fn new(
        name: impl Into<String>,
        choreo: Choreography,
        observer: Arc<dyn StageObserver>,
    ) -> ChoreoResult<Self> {
        let runtime = Handle::try_current()
            .map_err(|e| ChoreoError::runtime(format!("demo controller needs tokio: {e}")))?;
        Ok(Self::with_runtime(name, choreo, observer, runtime))
    }

    /// Create an idle controller that spawns runs on `runtime`.
    pub fn with_runtime(
        name: impl Into<String>,
        choreo: Choreography,
        observer: Arc<dyn StageObserver>,
        runtime: Handle,
    ) -> Self {
        let stage = Arc::new(Stage::new(choreo.script(), observer));
        Self {
            name: name.into(),
            choreo,
            stage,
            signal: LifecycleSignal::default(),
            live: None,
            next_run: 0,
            runtime,
        }
    }

    /// Instance name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Script, explanations and geometry this instance plays.
    pub fn choreography(&self) -> &Choreography {
        &self.choreo
    }

    /// Last applied visibility signal.
    pub fn signal(&self) -> LifecycleSignal {
        self.signal
    }

    /// Update the active-slide input.
    pub fn set_active_slide(&mut self, active: bool) -> Transition {
        self.apply_signal(LifecycleSignal {
            is_active_slide: active,
            ..self.signal
        })
    }

    /// Update the in-viewport input.
    pub fn set_in_viewport(&mut self, visible: bool) -> Transition {
        self.apply_signal(LifecycleSignal {
            is_in_viewport: visible,
            ..self.signal
        })
    }

    /// Apply a full signal; starts or stops the run when `should_play` flips.
    #[tracing::instrument(skip(self), fields(demo = %self.name))]
    pub fn apply_signal(&mut self, signal: LifecycleSignal) -> Transition {
        let was = self.signal.should_play();
        self.signal = signal;
        match (was, signal.should_play()) {
            (true, false) => {
                self.teardown();
                Transition::Stopped
            }
            (false, true) => Transition::Started(self.start()),
            _ => Transition::Unchanged,
        }
    }

    /// Tear down and start a fresh run from the first phase if the instance should play.
    pub fn restart(&mut self) -> Option<RunId> {
        if self.signal.should_play() {
            Some(self.start())
        } else {
            self.teardown();
            None
        }
    }

    /// Stop everything and forget the visibility inputs.
    pub fn shutdown(&mut self) {
        self.signal = LifecycleSignal::default();
        self.teardown();
    }

    /// Re-measure and re-place the tooltip of the current phase. The run keeps going.
    ///
    /// Returns `true` if a tooltip update was committed. Nothing is committed when the run
    /// has moved to another phase while the anchor was being measured.
    pub fn on_resize(&self) -> bool {
        let Some(live) = &self.live else {
            return false;
        };
        let snapshot = self.stage.snapshot();
        if snapshot.run != Some(live.id) {
            return false;
        }
        let index = snapshot.phase_index;
        let tooltip = self.choreo.resolve_tooltip(index);
        self.stage
            .commit_tooltip(live.id, &live.token, index, tooltip)
    }

    /// Whether a run is live and has not finished.
    pub fn is_playing(&self) -> bool {
        self.live.as_ref().is_some_and(|l| !l.handle.is_finished())
    }

    /// Id of the live run, if any.
    pub fn current_run(&self) -> Option<RunId> {
        self.live.as_ref().map(|l| l.id)
    }

    /// Timers the live run is currently waiting on.
    pub fn pending_timers(&self) -> usize {
        self.live.as_ref().map_or(0, |l| l.timers.pending())
    }

    /// The instance's stage.
    pub fn stage(&self) -> &Arc<Stage> {
        &self.stage
    }

    /// Current display state.
    pub fn snapshot(&self) -> DisplayState {
        self.stage.snapshot()
    }

    /// Receiver notified on every display change.
    pub fn subscribe(&self) -> watch::Receiver<DisplayState> {
        self.stage.subscribe()
    }

    fn start(&mut self) -> RunId {
        self.teardown();
        self.next_run += 1;
        let id = RunId(self.next_run);
        let token = CancellationToken::new();
        let timers = TimerSet::new();
        let sequencer = Sequencer::new(
            self.choreo.clone(),
            self.stage.clone(),
            id,
            token.clone(),
            timers.clone(),
        );
        let handle = self.runtime.spawn(sequencer.run());
        tracing::debug!(demo = %self.name, run = %id, "run started");
        self.live = Some(LiveRun {
            id,
            token,
            timers,
            handle,
        });
        id
    }

    fn teardown(&mut self) {
        if let Some(live) = self.live.take() {
            live.token.cancel();
            let cleared = live.timers.clear();
            live.handle.abort();
            tracing::debug!(demo = %self.name, run = %live.id, cleared, "run torn down");
        }
        self.stage.reset();
    }
}

impl Drop for DemoController {
    fn drop(&mut self) {
        if let Some(live) = self.live.take() {
            live.token.cancel();
            live.timers.clear();
            live.handle.abort();
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/lifecycle/controller.rs"]
mod tests;
