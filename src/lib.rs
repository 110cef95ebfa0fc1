//! choreo drives self-playing product-tour demos.
//!
//! A demo is a fixed [`Script`] of phases. While the demo is visible, a single run walks the
//! phases in order: it highlights an element, pulses it, shows an [`Explanation`] in a
//! tooltip placed so it never leaves its container, and optionally scrolls the element into
//! the center of a feed. When the demo stops being visible the run is cancelled and the
//! display returns to its reset state before control returns to the host.
//!
//! # Pipeline overview
//!
//! 1. **Measure**: a [`GeometryProvider`] reports live rectangles for tagged elements.
//! 2. **Place**: [`place`] turns an [`Anchor`] and a tooltip size into a [`Placement`].
//! 3. **Sequence**: a [`Sequencer`] plays the script against a per-instance [`Stage`].
//! 4. **Control**: a [`DemoController`] starts and stops runs from [`LifecycleSignal`]s.
//!
//! Key constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **At most one run per instance**: a new run starts only after the previous one is
//!   cancelled and its timers are cleared.
//! - **Stale runs are inert**: every display change re-checks the run's cancellation token
//!   atomically with the change.
//! - **Missing data degrades**: an unmounted element or a missing explanation skips the
//!   dependent output, it never fails a run.
//!
//! For a walkthrough of the API, see [`crate::guide`].
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod config;
mod demos;
mod explain;
mod foundation;
mod geometry;
mod lifecycle;
mod placement;
mod scroll;
mod sequence;
mod showcase;

/// Standalone walkthrough of choreo's concepts and API.
pub mod guide;

pub use config::{DEFAULT_FRAME_INTERVAL_MS, DEFAULT_TOOLTIP_SIZE, EngineConfig};
pub use demos::DemoKind;
pub use explain::table::{Explanation, ExplanationTable};
pub use foundation::core::{Affine, Phase, Point, Rect, RunId, Size, TagKey, Vec2};
pub use foundation::error::{ChoreoError, ChoreoResult};
pub use geometry::registry::{GeometryProvider, StaticLayout, TagRegistry};
pub use lifecycle::controller::DemoController;
pub use lifecycle::signal::{LifecycleSignal, Transition};
pub use placement::anchor::Anchor;
pub use placement::resolver::{
    DEFAULT_PADDING, MIN_TOOLTIP_HEIGHT, MIN_TOOLTIP_WIDTH, Origin, Placement, PlacementConfig,
    Side, place,
};
pub use scroll::center::{ScrollMeasure, ScrollPane, center_offset, measure, measure_center};
pub use sequence::ease::Ease;
pub use sequence::pulse::{MAX_PULSE_LEVELS, PEAK_SCALE, PULSE_STEP_MS, PulseProfile, REST_SCALE};
pub use sequence::script::{
    DEFAULT_IDLE_MS, DEFAULT_SETTLE_MS, DEFAULT_TRAILING_MS, Replay, Script, ScriptBuilder, Step,
    StepEffect,
};
pub use sequence::sequencer::{Choreography, PlanEntry, RunOutcome, Sequencer};
pub use sequence::stage::{
    DisplayState, EventLog, NoopObserver, Stage, StageChange, StageEvent, StageObserver, Tooltip,
};
pub use sequence::timer::TimerSet;
pub use showcase::Showcase;
