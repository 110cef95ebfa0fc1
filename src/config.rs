use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use crate::foundation::core::Size;
use crate::foundation::error::{ChoreoError, ChoreoResult};
use crate::placement::resolver::PlacementConfig;

/// Default unscaled tooltip size.
pub const DEFAULT_TOOLTIP_SIZE: Size = Size::new(280.0, 160.0);
/// Default length of one layout frame, in milliseconds.
pub const DEFAULT_FRAME_INTERVAL_MS: u64 = 16;

/// Engine-wide tunables shared by every demo instance.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Tooltip placement margins and floors.
    pub placement: PlacementConfig,
    /// Tooltip size used when a step does not override it.
    pub tooltip_size: Size,
    /// Layout frames to wait before measuring a scroll target.
    ///
    /// Zero measures synchronously. Hosts whose layout lags a reveal by a frame or two can
    /// raise it; the wait is cancellable like every other sequencer wait.
    pub settle_frames: u32,
    /// Length of one layout frame, in milliseconds.
    pub frame_interval_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            placement: PlacementConfig::default(),
            tooltip_size: DEFAULT_TOOLTIP_SIZE,
            settle_frames: 0,
            frame_interval_ms: DEFAULT_FRAME_INTERVAL_MS,
        }
    }
}

impl EngineConfig {
    /// Validate placement settings and tooltip size.
    pub fn validate(&self) -> ChoreoResult<()> {
        self.placement.validate()?;
        let Size { width, height } = self.tooltip_size;
        if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
            return Err(ChoreoError::validation(
                "tooltip_size must be finite and > 0",
            ));
        }
        if self.settle_frames > 0 && self.frame_interval_ms == 0 {
            return Err(ChoreoError::validation(
                "frame_interval_ms must be > 0 when settle_frames is set",
            ));
        }
        Ok(())
    }

    /// Total wait before a scroll target is measured.
    pub fn scroll_settle(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms.saturating_mul(u64::from(self.settle_frames)))
    }

    /// Parse and validate a config from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> ChoreoResult<Self> {
        let config: Self = serde_json::from_reader(r)
            .map_err(|e| ChoreoError::serde(format!("parse config JSON: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a config from a JSON file on disk.
    #[tracing::instrument]
    pub fn from_path(path: &Path) -> ChoreoResult<Self> {
        let f = File::open(path).map_err(|e| {
            ChoreoError::validation(format!("open config JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }
}
