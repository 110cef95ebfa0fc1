//! Per-instance display state and the only place it is mutated.
//!
//! A run never writes display state directly: it submits a [`StageChange`] to
//! [`Stage::commit`], which re-checks the run's cancellation token inside the same critical
//! section that applies the change. Teardown cancels the token before it resets the stage,
//! so once teardown returns a cancelled run can no longer change anything.

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use crate::explain::table::Explanation;
use crate::foundation::core::{Phase, RunId, TagKey};
use crate::placement::resolver::Placement;
use crate::sequence::pulse::REST_SCALE;
use crate::sequence::script::Script;

/// Tooltip content plus its resolved geometry.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Tooltip {
    /// Phase the tooltip belongs to.
    pub phase: Phase,
    /// Text payload.
    pub explanation: Explanation,
    /// Where and how large to draw it.
    pub placement: Placement,
}

/// Snapshot of everything the presentation layer renders for one demo.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct DisplayState {
    /// Run that produced the latest change, `None` after a reset.
    pub run: Option<RunId>,
    /// Index of the current phase in the script.
    pub phase_index: usize,
    /// Current phase.
    pub phase: Phase,
    /// Element currently highlighted.
    pub highlight: Option<TagKey>,
    /// Pulse scale applied to the highlighted element.
    pub scale: f64,
    /// Whether the element is scaled above rest.
    pub emphasized: bool,
    /// Tooltip to draw, if any.
    pub tooltip: Option<Tooltip>,
    /// Target scroll offset of the script's pane.
    pub scroll_offset: f64,
    /// Content blocks currently revealed.
    pub revealed: BTreeSet<String>,
}

impl DisplayState {
    /// The reset state for `script`: first phase, rest scale, no scroll, no tooltip.
    pub fn initial(script: &Script) -> Self {
        Self {
            run: None,
            phase_index: 0,
            phase: script.first_phase().cloned().unwrap_or_else(|| Phase::new("")),
            highlight: None,
            scale: REST_SCALE,
            emphasized: false,
            tooltip: None,
            scroll_offset: 0.0,
            revealed: BTreeSet::new(),
        }
    }

    /// Whether this is the deterministic reset state (any run id aside).
    pub fn is_reset(&self) -> bool {
        self.phase_index == 0
            && self.scale == REST_SCALE
            && !self.emphasized
            && self.scroll_offset == 0.0
            && self.tooltip.is_none()
            && self.highlight.is_none()
            && self.revealed.is_empty()
    }

    fn apply(&mut self, run: RunId, change: &StageChange) {
        self.run = Some(run);
        match change {
            StageChange::PhaseEntered {
                index,
                phase,
                highlight,
            } => {
                self.phase_index = *index;
                self.phase = phase.clone();
                self.highlight = highlight.clone();
            }
            StageChange::Pulse { scale } => {
                self.scale = *scale;
                self.emphasized = *scale > REST_SCALE;
            }
            StageChange::Tooltip { tooltip } => self.tooltip = tooltip.clone(),
            StageChange::Scroll { offset } => self.scroll_offset = *offset,
            StageChange::Reveal { key, shown } => {
                if *shown {
                    self.revealed.insert(key.clone());
                } else {
                    self.revealed.remove(key);
                }
            }
            StageChange::Rewound => {
                self.highlight = None;
                self.scale = REST_SCALE;
                self.emphasized = false;
                self.tooltip = None;
                self.scroll_offset = 0.0;
                self.revealed.clear();
            }
        }
    }
}

/// One state change produced by a run.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StageChange {
    /// A new phase started.
    PhaseEntered {
        /// Position in the script.
        index: usize,
        /// Phase tag.
        phase: Phase,
        /// Element highlighted during the phase.
        highlight: Option<TagKey>,
    },
    /// Pulse scale changed.
    Pulse {
        /// New scale.
        scale: f64,
    },
    /// Tooltip replaced (or removed).
    Tooltip {
        /// New tooltip, `None` to hide.
        tooltip: Option<Tooltip>,
    },
    /// Scroll target changed.
    Scroll {
        /// New offset.
        offset: f64,
    },
    /// A content block was shown or hidden.
    Reveal {
        /// Block name.
        key: String,
        /// Visibility.
        shown: bool,
    },
    /// A looping script is about to replay: emphasis, tooltip, scroll and reveals go
    /// back to their initial values.
    Rewound,
}

/// Event delivered to a [`StageObserver`].
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum StageEvent {
    /// A run changed the display state.
    Changed {
        /// Run that made the change.
        run: RunId,
        /// The change.
        change: StageChange,
    },
    /// The display state went back to its reset value.
    Reset,
}

/// Receives every stage event in commit order.
///
/// Called while the stage is locked: implementations must not call back into the stage.
pub trait StageObserver: Send + Sync {
    /// Handle one event.
    fn on_event(&self, event: &StageEvent);
}

/// Observer that ignores everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;

impl StageObserver for NoopObserver {
    fn on_event(&self, _event: &StageEvent) {}
}

/// Observer that records events in memory.
#[derive(Debug, Default)]
pub struct EventLog {
    events: Mutex<Vec<StageEvent>>,
}

impl EventLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of all recorded events.
    pub fn events(&self) -> Vec<StageEvent> {
        self.lock().clone()
    }

    /// Remove and return all recorded events.
    pub fn take(&self) -> Vec<StageEvent> {
        std::mem::take(&mut *self.lock())
    }

    /// Number of recorded events.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<StageEvent>> {
        self.events.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl StageObserver for EventLog {
    fn on_event(&self, event: &StageEvent) {
        self.lock().push(event.clone());
    }
}

/// Display state of one demo instance.
pub struct Stage {
    state: watch::Sender<DisplayState>,
    initial: DisplayState,
    observer: Arc<dyn StageObserver>,
}

impl Stage {
    /// Create a stage in the reset state for `script`.
    pub fn new(script: &Script, observer: Arc<dyn StageObserver>) -> Self {
        let initial = DisplayState::initial(script);
        let (state, _) = watch::channel(initial.clone());
        Self {
            state,
            initial,
            observer,
        }
    }

    /// Current display state.
    pub fn snapshot(&self) -> DisplayState {
        self.state.borrow().clone()
    }

    /// Receiver notified on every change.
    pub fn subscribe(&self) -> watch::Receiver<DisplayState> {
        self.state.subscribe()
    }

    /// Apply `change` on behalf of `run` unless `token` is cancelled.
    ///
    /// Returns `false` (and changes nothing) for a cancelled run.
    pub(crate) fn commit(
        &self,
        run: RunId,
        token: &CancellationToken,
        change: StageChange,
    ) -> bool {
        self.commit_if(run, token, change, |_| true)
    }

    /// Replace the tooltip of phase `index` of `run`.
    ///
    /// Changes nothing unless `run` is the latest writer and still shows phase `index`, so a
    /// tooltip measured for one phase can never land on the next one.
    pub(crate) fn commit_tooltip(
        &self,
        run: RunId,
        token: &CancellationToken,
        index: usize,
        tooltip: Option<Tooltip>,
    ) -> bool {
        self.commit_if(run, token, StageChange::Tooltip { tooltip }, |display| {
            display.run == Some(run) && display.phase_index == index
        })
    }

    fn commit_if(
        &self,
        run: RunId,
        token: &CancellationToken,
        change: StageChange,
        guard: impl FnOnce(&DisplayState) -> bool,
    ) -> bool {
        self.state.send_if_modified(|display| {
            if token.is_cancelled() || !guard(display) {
                return false;
            }
            display.apply(run, &change);
            self.observer.on_event(&StageEvent::Changed { run, change });
            true
        })
    }

    /// Return to the reset state.
    pub(crate) fn reset(&self) {
        self.state.send_modify(|display| {
            *display = self.initial.clone();
            self.observer.on_event(&StageEvent::Reset);
        });
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sequence/stage.rs"]
mod tests;
