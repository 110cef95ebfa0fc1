//! Plays a [`Script`] against a [`Stage`].
//!
//! A step is flattened into a list of segments (scale held for some time) and both the
//! live run and [`Sequencer::plan`] walk the same list, so the plan is exactly what a run
//! plays when nothing cancels it.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::config::EngineConfig;
use crate::explain::table::ExplanationTable;
use crate::foundation::core::{Phase, RunId};
use crate::foundation::error::ChoreoResult;
use crate::geometry::registry::GeometryProvider;
use crate::placement::resolver::place;
use crate::scroll::center::measure_center;
use crate::sequence::pulse::REST_SCALE;
use crate::sequence::script::{Replay, Script, Step, StepEffect};
use crate::sequence::stage::{Stage, StageChange, Tooltip};
use crate::sequence::timer::{Cancelled, TimerSet};

/// Everything a run reads: the script, its explanations, live geometry and engine config.
#[derive(Clone)]
pub struct Choreography {
    script: Arc<Script>,
    explanations: Arc<ExplanationTable>,
    geometry: Arc<dyn GeometryProvider>,
    config: Arc<EngineConfig>,
}

impl Choreography {
    /// Bundle and cross-validate the inputs of a demo.
    pub fn new(
        script: Script,
        explanations: ExplanationTable,
        geometry: Arc<dyn GeometryProvider>,
        config: Arc<EngineConfig>,
    ) -> ChoreoResult<Self> {
        script.validate()?;
        explanations.validate_against(&script)?;
        config.validate()?;
        Ok(Self {
            script: Arc::new(script),
            explanations: Arc::new(explanations),
            geometry,
            config,
        })
    }

    /// The script being played.
    pub fn script(&self) -> &Script {
        &self.script
    }

    /// Explanations keyed by phase.
    pub fn explanations(&self) -> &ExplanationTable {
        &self.explanations
    }

    /// Engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Geometry source.
    pub fn geometry(&self) -> &dyn GeometryProvider {
        &*self.geometry
    }

    /// Measure the anchor of step `index` now and place its tooltip.
    ///
    /// `None` when the step has no explanation, no anchor, or the anchor is not mounted.
    pub fn resolve_tooltip(&self, index: usize) -> Option<Tooltip> {
        let step = self.script.steps.get(index)?;
        let explanation = self.explanations.lookup(&step.phase)?;
        let tag = step.anchor.as_ref()?;
        let Some(anchor) = self.geometry.measure(tag, &self.script.container) else {
            tracing::trace!(phase = %step.phase, %tag, "anchor not measurable, tooltip skipped");
            return None;
        };
        let size = step.tooltip_size.unwrap_or(self.config.tooltip_size);
        Some(Tooltip {
            phase: step.phase.clone(),
            explanation: explanation.clone(),
            placement: place(&anchor, size, &self.config.placement),
        })
    }
}

/// How a run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    /// A [`Replay::Once`] script played to the end.
    Completed,
    /// The run's token was cancelled.
    Cancelled,
}

/// One `(phase, scale, wait)` entry of a playthrough.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct PlanEntry {
    /// Phase active during the wait.
    pub phase: Phase,
    /// Scale held during the wait.
    pub scale: f64,
    /// Wait in milliseconds.
    pub wait_ms: u64,
}

impl PlanEntry {
    /// Wait as a [`Duration`].
    pub fn wait(&self) -> Duration {
        Duration::from_millis(self.wait_ms)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Segment {
    scale: f64,
    hold_ms: u64,
}

// First segment is the rest scale held for the settle pause.
fn segments(step: &Step) -> Vec<Segment> {
    let Some(pulse) = &step.pulse else {
        let hold_ms = step
            .settle_ms
            .saturating_add(step.read_ms)
            .saturating_add(step.trailing_ms);
        return vec![Segment {
            scale: REST_SCALE,
            hold_ms,
        }];
    };

    let mut out = vec![Segment {
        scale: pulse.rest,
        hold_ms: step.settle_ms,
    }];
    let up = pulse.ramp_up();
    let last = up.len().saturating_sub(1);
    out.extend(up.into_iter().enumerate().map(|(i, scale)| Segment {
        scale,
        hold_ms: if i == last { step.read_ms } else { pulse.step_ms },
    }));
    let down = pulse.ramp_down();
    let last = down.len().saturating_sub(1);
    out.extend(down.into_iter().enumerate().map(|(i, scale)| Segment {
        scale,
        hold_ms: if i == last {
            step.trailing_ms
        } else {
            pulse.step_ms
        },
    }));
    out
}

/// One playthrough (or endless loop) of a script, bound to a single run.
pub struct Sequencer {
    choreo: Choreography,
    stage: Arc<Stage>,
    run: RunId,
    token: CancellationToken,
    timers: TimerSet,
}

impl Sequencer {
    /// Bind a run to its stage, cancellation token and timer set.
    pub fn new(
        choreo: Choreography,
        stage: Arc<Stage>,
        run: RunId,
        token: CancellationToken,
        timers: TimerSet,
    ) -> Self {
        Self {
            choreo,
            stage,
            run,
            token,
            timers,
        }
    }

    /// The `(phase, scale, wait)` sequence of one uncancelled playthrough.
    ///
    /// Looping scripts end with the idle pause spent on the last phase.
    pub fn plan(script: &Script) -> Vec<PlanEntry> {
        let mut plan: Vec<PlanEntry> = script
            .steps
            .iter()
            .flat_map(|step| {
                segments(step).into_iter().map(|seg| PlanEntry {
                    phase: step.phase.clone(),
                    scale: seg.scale,
                    wait_ms: seg.hold_ms,
                })
            })
            .collect();
        if script.replay == Replay::Loop
            && let Some(last) = script.steps.last()
        {
            plan.push(PlanEntry {
                phase: last.phase.clone(),
                scale: last.rest_scale(),
                wait_ms: script.idle_ms,
            });
        }
        plan
    }

    /// Play until the script ends or the run is cancelled.
    #[tracing::instrument(skip_all, fields(script = %self.choreo.script.name, run = %self.run))]
    pub async fn run(self) -> RunOutcome {
        match self.play().await {
            Ok(()) => {
                tracing::debug!("run completed");
                RunOutcome::Completed
            }
            Err(Cancelled) => {
                tracing::debug!("run cancelled");
                RunOutcome::Cancelled
            }
        }
    }

    async fn play(&self) -> Result<(), Cancelled> {
        let script = &*self.choreo.script;
        loop {
            for (index, step) in script.steps.iter().enumerate() {
                self.play_step(index, step).await?;
            }
            match script.replay {
                Replay::Once => return Ok(()),
                Replay::Loop => {
                    self.pause(script.idle()).await?;
                    // An all-zero script would otherwise never yield.
                    tokio::task::yield_now().await;
                    self.commit(StageChange::Rewound)?;
                }
            }
        }
    }

    async fn play_step(&self, index: usize, step: &Step) -> Result<(), Cancelled> {
        self.checkpoint()?;
        tracing::debug!(index, phase = %step.phase, "phase entered");
        self.commit(StageChange::PhaseEntered {
            index,
            phase: step.phase.clone(),
            highlight: step.anchor.clone(),
        })?;

        for (i, seg) in segments(step).into_iter().enumerate() {
            self.commit(StageChange::Pulse { scale: seg.scale })?;
            if i == 0 {
                self.commit(StageChange::Tooltip {
                    tooltip: self.choreo.resolve_tooltip(index),
                })?;
                self.apply_effect(step).await?;
            }
            self.pause(Duration::from_millis(seg.hold_ms)).await?;
        }
        Ok(())
    }

    async fn apply_effect(&self, step: &Step) -> Result<(), Cancelled> {
        match &step.effect {
            None => Ok(()),
            Some(StepEffect::Reveal { key, shown }) => self.commit(StageChange::Reveal {
                key: key.clone(),
                shown: *shown,
            }),
            Some(StepEffect::ScrollToCenter { tag }) => {
                let Some(pane) = &self.choreo.script.scroll_pane else {
                    return Ok(());
                };
                self.pause(self.choreo.config.scroll_settle()).await?;
                match measure_center(self.choreo.geometry(), pane, tag) {
                    Some(offset) => self.commit(StageChange::Scroll { offset }),
                    None => {
                        tracing::trace!(%tag, "scroll target not mounted, scroll skipped");
                        Ok(())
                    }
                }
            }
        }
    }

    async fn pause(&self, duration: Duration) -> Result<(), Cancelled> {
        if !duration.is_zero() {
            self.timers.sleep(&self.token, duration).await?;
        }
        self.checkpoint()
    }

    fn checkpoint(&self) -> Result<(), Cancelled> {
        if self.token.is_cancelled() {
            Err(Cancelled)
        } else {
            Ok(())
        }
    }

    fn commit(&self, change: StageChange) -> Result<(), Cancelled> {
        if self.stage.commit(self.run, &self.token, change) {
            Ok(())
        } else {
            Err(Cancelled)
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sequence/sequencer.rs"]
mod tests;
