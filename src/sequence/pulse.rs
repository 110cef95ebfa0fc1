use std::time::Duration;

use crate::foundation::error::{ChoreoError, ChoreoResult};
use crate::sequence::ease::Ease;

/// Scale of an element at rest.
pub const REST_SCALE: f64 = 1.0;
/// Default emphasis peak.
pub const PEAK_SCALE: f64 = 1.04;
/// Default pause between pulse levels.
pub const PULSE_STEP_MS: u64 = 150;
/// Upper bound on [`PulseProfile::levels`].
pub const MAX_PULSE_LEVELS: u32 = 16;

/// Scale-up / hold / scale-down emphasis applied to the highlighted element.
///
/// With the defaults the element goes `1.0 -> 1.02 -> 1.04`, holds for the step's read
/// time, then `1.02 -> 1.0`, with a [`step`](Self::step) pause between levels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PulseProfile {
    /// Scale before and after the pulse.
    pub rest: f64,
    /// Scale held during the read time.
    pub peak: f64,
    /// Number of levels between rest and peak, peak included.
    pub levels: u32,
    /// Pause between consecutive levels, in milliseconds.
    pub step_ms: u64,
    /// Spacing of the intermediate levels.
    pub ease: Ease,
}

impl Default for PulseProfile {
    fn default() -> Self {
        Self {
            rest: REST_SCALE,
            peak: PEAK_SCALE,
            levels: 2,
            step_ms: PULSE_STEP_MS,
            ease: Ease::Linear,
        }
    }
}

impl PulseProfile {
    /// Pause between consecutive levels.
    pub fn step(&self) -> Duration {
        Duration::from_millis(self.step_ms)
    }

    /// Levels emitted on the way up, ending at `peak`.
    pub fn ramp_up(&self) -> Vec<f64> {
        (1..=self.levels)
            .map(|i| self.ease.level(i, self.levels, self.rest, self.peak))
            .collect()
    }

    /// Levels emitted on the way down, ending at `rest`.
    pub fn ramp_down(&self) -> Vec<f64> {
        (0..self.levels)
            .rev()
            .map(|i| self.ease.level(i, self.levels, self.rest, self.peak))
            .collect()
    }

    /// Validate scales and level count.
    pub fn validate(&self) -> ChoreoResult<()> {
        if !self.rest.is_finite() || self.rest <= 0.0 {
            return Err(ChoreoError::script("pulse rest scale must be finite and > 0"));
        }
        if !self.peak.is_finite() || self.peak < self.rest {
            return Err(ChoreoError::script(
                "pulse peak scale must be finite and >= rest",
            ));
        }
        if self.levels == 0 {
            return Err(ChoreoError::script("pulse must have at least one level"));
        }
        if self.levels > MAX_PULSE_LEVELS {
            return Err(ChoreoError::script(format!(
                "pulse has {} levels, at most {MAX_PULSE_LEVELS} allowed",
                self.levels
            )));
        }
        Ok(())
    }
}
