use std::collections::BTreeSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use crate::foundation::core::{Phase, Size, TagKey};
use crate::foundation::error::{ChoreoError, ChoreoResult};
use crate::scroll::center::ScrollPane;
use crate::sequence::pulse::PulseProfile;

/// Default pause after entering a phase, before the pulse starts.
pub const DEFAULT_SETTLE_MS: u64 = 250;
/// Default pause after a pulse returns to rest.
pub const DEFAULT_TRAILING_MS: u64 = 200;
/// Default pause between the last step and the replay of the first.
pub const DEFAULT_IDLE_MS: u64 = 2500;

fn default_settle_ms() -> u64 {
    DEFAULT_SETTLE_MS
}

fn default_trailing_ms() -> u64 {
    DEFAULT_TRAILING_MS
}

fn default_idle_ms() -> u64 {
    DEFAULT_IDLE_MS
}

/// Side effect performed when a step is entered, before its settle pause.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StepEffect {
    /// Scroll the script's pane so the tagged element is vertically centered.
    ScrollToCenter {
        /// Element to center.
        tag: TagKey,
    },
    /// Show or hide a named content block.
    Reveal {
        /// Block name understood by the presentation layer.
        key: String,
        /// Whether the block becomes visible.
        shown: bool,
    },
}

/// One authored step of a script.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Step {
    /// Phase entered by this step.
    pub phase: Phase,
    /// Element highlighted and used as tooltip anchor.
    #[serde(default)]
    pub anchor: Option<TagKey>,
    /// Pause after entering the phase, in milliseconds.
    #[serde(default = "default_settle_ms")]
    pub settle_ms: u64,
    /// Read time held at peak emphasis, in milliseconds.
    pub read_ms: u64,
    /// Pause after the pulse returns to rest, in milliseconds.
    #[serde(default = "default_trailing_ms")]
    pub trailing_ms: u64,
    /// Emphasis profile; `None` highlights without pulsing.
    #[serde(default)]
    pub pulse: Option<PulseProfile>,
    /// Effect applied on entry.
    #[serde(default)]
    pub effect: Option<StepEffect>,
    /// Tooltip size override for this step.
    #[serde(default)]
    pub tooltip_size: Option<Size>,
}

impl Step {
    /// A step with default settle/trailing pauses, no anchor and no pulse.
    pub fn new(phase: impl Into<Phase>, read_ms: u64) -> Self {
        Self {
            phase: phase.into(),
            anchor: None,
            settle_ms: DEFAULT_SETTLE_MS,
            read_ms,
            trailing_ms: DEFAULT_TRAILING_MS,
            pulse: None,
            effect: None,
            tooltip_size: None,
        }
    }

    /// Highlight and anchor the tooltip on `tag`.
    #[must_use]
    pub fn anchor(mut self, tag: impl Into<TagKey>) -> Self {
        self.anchor = Some(tag.into());
        self
    }

    /// Set the settle pause.
    #[must_use]
    pub fn settle_ms(mut self, ms: u64) -> Self {
        self.settle_ms = ms;
        self
    }

    /// Set the trailing pause.
    #[must_use]
    pub fn trailing_ms(mut self, ms: u64) -> Self {
        self.trailing_ms = ms;
        self
    }

    /// Pulse with the default profile.
    #[must_use]
    pub fn pulsed(self) -> Self {
        self.pulse(PulseProfile::default())
    }

    /// Pulse with a custom profile.
    #[must_use]
    pub fn pulse(mut self, profile: PulseProfile) -> Self {
        self.pulse = Some(profile);
        self
    }

    /// Center `tag` in the script's scroll pane on entry.
    #[must_use]
    pub fn scroll_to(mut self, tag: impl Into<TagKey>) -> Self {
        self.effect = Some(StepEffect::ScrollToCenter { tag: tag.into() });
        self
    }

    /// Toggle a content block on entry.
    #[must_use]
    pub fn reveal(mut self, key: impl Into<String>, shown: bool) -> Self {
        self.effect = Some(StepEffect::Reveal {
            key: key.into(),
            shown,
        });
        self
    }

    /// Override the tooltip size.
    #[must_use]
    pub fn tooltip_size(mut self, size: Size) -> Self {
        self.tooltip_size = Some(size);
        self
    }

    /// Settle pause as a [`Duration`].
    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }

    /// Read time as a [`Duration`].
    pub fn read(&self) -> Duration {
        Duration::from_millis(self.read_ms)
    }

    /// Trailing pause as a [`Duration`].
    pub fn trailing(&self) -> Duration {
        Duration::from_millis(self.trailing_ms)
    }

    /// Scale at which the step starts and ends.
    pub fn rest_scale(&self) -> f64 {
        self.pulse
            .map_or(crate::sequence::pulse::REST_SCALE, |p| p.rest)
    }
}

/// What happens after the last step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Replay {
    /// Pause for the idle time, then start over from the first step.
    #[default]
    Loop,
    /// Stop after one playthrough.
    Once,
}

/// A fixed, named sequence of steps.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Script {
    /// Script name, used in logs.
    pub name: String,
    /// Element all anchors are measured against.
    pub container: TagKey,
    /// Scrolling pane for [`StepEffect::ScrollToCenter`] steps.
    #[serde(default)]
    pub scroll_pane: Option<ScrollPane>,
    /// Steps in playback order.
    pub steps: Vec<Step>,
    /// Pause before replaying, in milliseconds.
    #[serde(default = "default_idle_ms")]
    pub idle_ms: u64,
    /// Behavior after the last step.
    #[serde(default)]
    pub replay: Replay,
}

impl Script {
    /// Validate step list, phase uniqueness and effect targets.
    pub fn validate(&self) -> ChoreoResult<()> {
        if self.name.trim().is_empty() {
            return Err(ChoreoError::script("script name must not be empty"));
        }
        if self.steps.is_empty() {
            return Err(ChoreoError::script(format!(
                "script '{}' must have at least one step",
                self.name
            )));
        }
        let mut seen = BTreeSet::new();
        for step in &self.steps {
            if !seen.insert(&step.phase) {
                return Err(ChoreoError::script(format!(
                    "script '{}' repeats phase '{}'",
                    self.name, step.phase
                )));
            }
            if let Some(pulse) = &step.pulse {
                pulse.validate().map_err(|e| {
                    ChoreoError::script(format!("phase '{}': {e}", step.phase))
                })?;
            }
            if let Some(size) = step.tooltip_size {
                if !(size.width.is_finite() && size.height.is_finite())
                    || size.width <= 0.0
                    || size.height <= 0.0
                {
                    return Err(ChoreoError::script(format!(
                        "phase '{}' tooltip size must be finite and > 0",
                        step.phase
                    )));
                }
            }
            if matches!(step.effect, Some(StepEffect::ScrollToCenter { .. }))
                && self.scroll_pane.is_none()
            {
                return Err(ChoreoError::script(format!(
                    "phase '{}' scrolls but script '{}' has no scroll pane",
                    step.phase, self.name
                )));
            }
        }
        Ok(())
    }

    /// Number of steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the script has no steps.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Position of `phase` in the script.
    pub fn index_of(&self, phase: &Phase) -> Option<usize> {
        self.steps.iter().position(|s| &s.phase == phase)
    }

    /// Phase of the first step.
    pub fn first_phase(&self) -> Option<&Phase> {
        self.steps.first().map(|s| &s.phase)
    }

    /// Idle pause as a [`Duration`].
    pub fn idle(&self) -> Duration {
        Duration::from_millis(self.idle_ms)
    }

    /// Parse and validate a script from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> ChoreoResult<Self> {
        let script: Self = serde_json::from_reader(r)
            .map_err(|e| ChoreoError::serde(format!("parse script JSON: {e}")))?;
        script.validate()?;
        Ok(script)
    }

    /// Parse and validate a script from a JSON file on disk.
    #[tracing::instrument]
    pub fn from_path(path: &Path) -> ChoreoResult<Self> {
        let f = File::open(path).map_err(|e| {
            ChoreoError::validation(format!("open script JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }
}

/// Builder for [`Script`].
pub struct ScriptBuilder {
    name: String,
    container: TagKey,
    scroll_pane: Option<ScrollPane>,
    steps: Vec<Step>,
    idle_ms: u64,
    replay: Replay,
}

impl ScriptBuilder {
    /// Start a script whose anchors are measured against `container`.
    pub fn new(name: impl Into<String>, container: impl Into<TagKey>) -> Self {
        Self {
            name: name.into(),
            container: container.into(),
            scroll_pane: None,
            steps: Vec::new(),
            idle_ms: DEFAULT_IDLE_MS,
            replay: Replay::Loop,
        }
    }

    /// Attach the scrolling pane used by scroll steps.
    pub fn scroll_pane(mut self, pane: ScrollPane) -> Self {
        self.scroll_pane = Some(pane);
        self
    }

    /// Set the idle pause before replay.
    pub fn idle_ms(mut self, ms: u64) -> Self {
        self.idle_ms = ms;
        self
    }

    /// Set the replay behavior.
    pub fn replay(mut self, replay: Replay) -> Self {
        self.replay = replay;
        self
    }

    /// Append a step.
    pub fn step(mut self, step: Step) -> Self {
        self.steps.push(step);
        self
    }

    /// Build and validate the final [`Script`].
    pub fn build(self) -> ChoreoResult<Script> {
        let script = Script {
            name: self.name,
            container: self.container,
            scroll_pane: self.scroll_pane,
            steps: self.steps,
            idle_ms: self.idle_ms,
            replay: self.replay,
        };
        script.validate()?;
        Ok(script)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sequence/script.rs"]
mod tests;
