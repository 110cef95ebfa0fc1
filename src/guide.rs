//! # choreo guide
//!
//! A walkthrough of how a demo is described, played and stopped.
//!
//! ---
//!
//! ## Core concepts
//!
//! - [`Script`](crate::Script): the ordered phases of one demo, built with
//!   [`ScriptBuilder`](crate::ScriptBuilder) or loaded from JSON.
//! - [`ExplanationTable`](crate::ExplanationTable): tooltip text per phase. A phase without
//!   an entry simply shows no tooltip.
//! - [`GeometryProvider`](crate::GeometryProvider): live rectangles of tagged elements.
//!   [`TagRegistry`](crate::TagRegistry) takes closures from a UI layer,
//!   [`StaticLayout`](crate::StaticLayout) holds fixed rectangles.
//! - [`Stage`](crate::Stage): the per-instance [`DisplayState`](crate::DisplayState) plus an
//!   optional [`StageObserver`](crate::StageObserver).
//! - [`DemoController`](crate::DemoController): owns the one live run of an instance.
//!
//! ## A step, in order
//!
//! 1. Enter the phase and highlight its anchor element.
//! 2. Measure the anchor and place the tooltip with [`place`](crate::place).
//! 3. Apply the step effect: center an element in the scroll pane, or reveal a block.
//! 4. Wait the settle pause, ramp the pulse up, hold for the read time, ramp down, wait the
//!    trailing pause.
//!
//! [`Sequencer::plan`](crate::Sequencer::plan) returns exactly these waits as data.
//!
//! ## Placement
//!
//! The tooltip goes above its anchor when there is room for it there, or when there is at
//! least as much room above as below. It is scaled down uniformly when it does not fit, then
//! clamped so the scaled box keeps `padding` from every container edge.
//!
//! ```
//! use choreo::{Anchor, PlacementConfig, Rect, Side, Size, TagKey, place};
//!
//! let anchor = Anchor::from_rects(
//!     TagKey::from("row"),
//!     Rect::new(300.0, 200.0, 340.0, 220.0),
//!     Rect::new(0.0, 0.0, 400.0, 300.0),
//! )
//! .unwrap();
//! let p = place(&anchor, Size::new(280.0, 160.0), &PlacementConfig::default());
//! assert_eq!(p.side, Side::Above);
//! assert_eq!(p.scale, 1.0);
//! assert!(p.footprint().x1 <= 388.0);
//! ```
//!
//! ## Lifecycle
//!
//! An instance plays while it is both the active slide and in the viewport. Any change that
//! makes it stop cancels the run token, clears the run's timers, aborts its task and resets
//! the stage before the call returns. Starting always tears down first, so at most one run
//! is live per instance.
//!
//! ```no_run
//! use std::sync::Arc;
//! use choreo::{DemoController, DemoKind, EngineConfig, NoopObserver};
//!
//! # async fn demo() -> choreo::ChoreoResult<()> {
//! let kind = DemoKind::SentimentGauge;
//! let choreo = kind.choreography(Arc::new(kind.layout()), Arc::new(EngineConfig::default()))?;
//! let mut controller = DemoController::new(kind.name(), choreo, Arc::new(NoopObserver))?;
//! controller.set_active_slide(true);
//! controller.set_in_viewport(true);
//! let mut display = controller.subscribe();
//! display.changed().await.ok();
//! println!("{:?}", display.borrow().phase);
//! controller.set_in_viewport(false);
//! assert!(controller.snapshot().is_reset());
//! # Ok(())
//! # }
//! ```
