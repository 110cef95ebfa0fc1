use std::time::Duration;

use super::*;
use crate::config::EngineConfig;
use crate::explain::table::{Explanation, ExplanationTable};
use crate::foundation::core::{Phase, Rect};
use crate::geometry::registry::{StaticLayout, TagRegistry};
use crate::sequence::script::{ScriptBuilder, Step};
use crate::sequence::stage::{EventLog, StageChange, StageEvent};

fn choreography() -> Choreography {
    let script = ScriptBuilder::new("unit", "frame")
        .step(Step::new("one", 1000).anchor("a").pulsed())
        .step(Step::new("two", 1000))
        .build()
        .unwrap();
    let explanations =
        ExplanationTable::new().with("one", Explanation::new("One", "first", "the first"));
    let layout = StaticLayout::new()
        .with("frame", Rect::new(0.0, 0.0, 640.0, 480.0))
        .with("a", Rect::new(100.0, 200.0, 200.0, 240.0));
    Choreography::new(
        script,
        explanations,
        Arc::new(layout),
        Arc::new(EngineConfig::default()),
    )
    .unwrap()
}

fn controller() -> (DemoController, Arc<EventLog>) {
    let log = Arc::new(EventLog::new());
    let c = DemoController::new("unit", choreography(), log.clone()).unwrap();
    (c, log)
}

#[test]
fn new_requires_a_runtime() {
    let err = DemoController::new("unit", choreography(), Arc::new(EventLog::new()))
        .err()
        .unwrap();
    assert!(matches!(err, ChoreoError::Runtime(_)));
}

#[tokio::test(start_paused = true)]
async fn starts_only_when_both_inputs_are_set() {
    let (mut c, _log) = controller();
    assert_eq!(c.set_active_slide(true), Transition::Unchanged);
    assert!(!c.is_playing());
    assert_eq!(c.set_in_viewport(true), Transition::Started(RunId(1)));
    assert!(c.is_playing());
    assert_eq!(c.set_in_viewport(true), Transition::Unchanged);
    assert_eq!(c.current_run(), Some(RunId(1)));
}

#[tokio::test(start_paused = true)]
async fn stop_resets_synchronously() {
    let (mut c, log) = controller();
    c.apply_signal(LifecycleSignal::new(true, true));
    tokio::time::sleep(Duration::from_millis(601)).await;
    assert!(c.snapshot().emphasized);
    assert_eq!(c.pending_timers(), 1);

    assert_eq!(c.set_active_slide(false), Transition::Stopped);
    assert!(c.snapshot().is_reset());
    assert_eq!(c.current_run(), None);
    assert_eq!(c.pending_timers(), 0);
    assert_eq!(log.events().last(), Some(&StageEvent::Reset));

    let quiet = log.len();
    tokio::time::sleep(Duration::from_secs(10)).await;
    assert_eq!(log.len(), quiet);
}

#[tokio::test(start_paused = true)]
async fn restart_begins_a_new_run_from_the_first_phase() {
    let (mut c, _log) = controller();
    c.apply_signal(LifecycleSignal::new(true, true));
    tokio::time::sleep(Duration::from_millis(2101)).await;
    assert_eq!(c.snapshot().phase_index, 1);

    assert_eq!(c.restart(), Some(RunId(2)));
    tokio::task::yield_now().await;
    let s = c.snapshot();
    assert_eq!(s.run, Some(RunId(2)));
    assert_eq!(s.phase_index, 0);

    c.shutdown();
    assert_eq!(c.restart(), None);
    assert!(c.snapshot().is_reset());
}

#[tokio::test(start_paused = true)]
async fn resize_replaces_tooltip_without_restarting() {
    let (mut c, log) = controller();
    assert!(!c.on_resize());
    c.apply_signal(LifecycleSignal::new(true, true));
    tokio::time::sleep(Duration::from_millis(101)).await;
    assert!(c.snapshot().tooltip.is_some());

    log.take();
    assert!(c.on_resize());
    let events = log.take();
    assert_eq!(events.len(), 1);
    assert!(matches!(
        &events[0],
        StageEvent::Changed {
            run: RunId(1),
            change: StageChange::Tooltip { tooltip: Some(_) }
        }
    ));
    assert_eq!(c.current_run(), Some(RunId(1)));
}

#[tokio::test(start_paused = true)]
async fn drop_cancels_the_live_run() {
    let (mut c, log) = controller();
    c.apply_signal(LifecycleSignal::new(true, true));
    tokio::time::sleep(Duration::from_millis(101)).await;
    drop(c);
    let quiet = log.len();
    tokio::time::sleep(Duration::from_secs(10)).await;
    assert_eq!(log.len(), quiet);
}

type Hook = Box<dyn FnOnce() + Send>;

#[tokio::test(start_paused = true)]
async fn resize_measured_across_a_phase_change_is_dropped() {
    let hook: Arc<std::sync::Mutex<Option<Hook>>> = Arc::default();
    let registry = Arc::new(TagRegistry::new());
    registry.register_rect("frame", Rect::new(0.0, 0.0, 640.0, 480.0));
    {
        let hook = hook.clone();
        registry.register("a", move || {
            if let Some(f) = hook.lock().unwrap().take() {
                f();
            }
            Some(Rect::new(100.0, 200.0, 200.0, 240.0))
        });
    }
    let script = ScriptBuilder::new("race", "frame")
        .step(Step::new("one", 5000).anchor("a"))
        .step(Step::new("two", 5000).anchor("a"))
        .build()
        .unwrap();
    let explanations =
        ExplanationTable::new().with("one", Explanation::new("One", "first", "the first"));
    let choreo = Choreography::new(
        script,
        explanations,
        registry,
        Arc::new(EngineConfig::default()),
    )
    .unwrap();
    let mut c = DemoController::new("race", choreo, Arc::new(EventLog::new())).unwrap();
    c.apply_signal(LifecycleSignal::new(true, true));
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(c.snapshot().tooltip.unwrap().phase.as_str(), "one");

    // The run moves on to "two" while the resize is still measuring "one".
    {
        let stage = c.stage().clone();
        let live = c.live.as_ref().unwrap();
        let (id, token) = (live.id, live.token.clone());
        *hook.lock().unwrap() = Some(Box::new(move || {
            stage.commit(
                id,
                &token,
                StageChange::PhaseEntered {
                    index: 1,
                    phase: Phase::from("two"),
                    highlight: None,
                },
            );
            stage.commit(id, &token, StageChange::Tooltip { tooltip: None });
        }));
    }

    assert!(!c.on_resize());
    let s = c.snapshot();
    assert_eq!(s.phase.as_str(), "two");
    assert!(s.tooltip.is_none());
}
