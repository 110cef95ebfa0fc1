use super::*;
use crate::explain::table::Explanation;
use crate::foundation::core::Rect;
use crate::geometry::registry::StaticLayout;
use crate::scroll::center::ScrollPane;
use crate::sequence::script::ScriptBuilder;
use crate::sequence::stage::{EventLog, StageEvent};

fn layout() -> StaticLayout {
    let mut layout = StaticLayout::new()
        .with("frame", Rect::new(0.0, 0.0, 800.0, 600.0))
        .with("a", Rect::new(300.0, 300.0, 340.0, 320.0))
        .with("feed.viewport", Rect::new(0.0, 100.0, 320.0, 400.0))
        .with("feed.content", Rect::new(0.0, 100.0, 320.0, 1300.0));
    for i in 0..12 {
        let top = 100.0 + f64::from(i) * 100.0;
        layout.insert(format!("feed.item-{i}"), Rect::new(0.0, top, 320.0, top + 80.0));
    }
    layout
}

fn explain(phase: &str) -> ExplanationTable {
    ExplanationTable::new().with(phase, Explanation::new("Title", "short", "detail"))
}

struct Harness {
    sequencer: Sequencer,
    stage: Arc<Stage>,
    log: Arc<EventLog>,
    token: CancellationToken,
    timers: TimerSet,
}

fn harness(script: Script, explanations: ExplanationTable) -> Harness {
    let choreo = Choreography::new(
        script,
        explanations,
        Arc::new(layout()),
        Arc::new(EngineConfig::default()),
    )
    .unwrap();
    let log = Arc::new(EventLog::new());
    let stage = Arc::new(Stage::new(choreo.script(), log.clone()));
    let token = CancellationToken::new();
    let timers = TimerSet::new();
    let sequencer = Sequencer::new(
        choreo,
        stage.clone(),
        RunId(1),
        token.clone(),
        timers.clone(),
    );
    Harness {
        sequencer,
        stage,
        log,
        token,
        timers,
    }
}

fn changes(log: &EventLog) -> Vec<StageChange> {
    log.events()
        .into_iter()
        .filter_map(|e| match e {
            StageEvent::Changed { change, .. } => Some(change),
            StageEvent::Reset => None,
        })
        .collect()
}

fn entered(log: &EventLog) -> Vec<usize> {
    changes(log)
        .into_iter()
        .filter_map(|c| match c {
            StageChange::PhaseEntered { index, .. } => Some(index),
            _ => None,
        })
        .collect()
}

fn pulsed_once() -> Script {
    ScriptBuilder::new("pulse", "frame")
        .replay(Replay::Once)
        .step(Step::new("focus", 1000).anchor("a").pulsed())
        .build()
        .unwrap()
}

#[test]
fn plan_of_pulsed_step_ramps_up_holds_and_ramps_down() {
    let plan = Sequencer::plan(&pulsed_once());
    let scales: Vec<f64> = plan.iter().map(|e| e.scale).collect();
    let waits: Vec<u64> = plan.iter().map(|e| e.wait_ms).collect();
    assert_eq!(waits, vec![250, 150, 1000, 150, 200]);
    let expected = [1.0, 1.02, 1.04, 1.02, 1.0];
    for (got, want) in scales.iter().zip(expected) {
        assert!((got - want).abs() < 1e-12, "{got} != {want}");
    }
    assert!(plan.iter().all(|e| e.phase.as_str() == "focus"));
}

#[test]
fn plan_of_looping_script_ends_with_idle() {
    let script = ScriptBuilder::new("loop", "frame")
        .idle_ms(900)
        .step(Step::new("one", 100).settle_ms(0).trailing_ms(0))
        .step(Step::new("two", 300))
        .build()
        .unwrap();
    let plan = Sequencer::plan(&script);
    assert_eq!(plan.len(), 3);
    assert_eq!(plan[0].wait(), Duration::from_millis(100));
    assert_eq!(plan[1].wait_ms, 250 + 300 + 200);
    assert_eq!(plan[2].phase.as_str(), "two");
    assert_eq!(plan[2].scale, 1.0);
    assert_eq!(plan[2].wait_ms, 900);
}

#[test]
fn plan_is_identical_across_calls() {
    let script = pulsed_once();
    assert_eq!(Sequencer::plan(&script), Sequencer::plan(&script));
}

#[tokio::test(start_paused = true)]
async fn run_once_emits_changes_in_order() {
    let h = harness(pulsed_once(), explain("focus"));
    let start = tokio::time::Instant::now();
    assert_eq!(h.sequencer.run().await, RunOutcome::Completed);
    let elapsed = start.elapsed();
    assert!(elapsed >= Duration::from_millis(1750), "{elapsed:?}");
    assert!(elapsed < Duration::from_millis(1760), "{elapsed:?}");

    let changes = changes(&h.log);
    assert!(matches!(
        &changes[0],
        StageChange::PhaseEntered { index: 0, highlight: Some(tag), .. } if tag.as_str() == "a"
    ));
    assert_eq!(changes[1], StageChange::Pulse { scale: 1.0 });
    let StageChange::Tooltip { tooltip: Some(tooltip) } = &changes[2] else {
        panic!("expected a tooltip, got {:?}", changes[2]);
    };
    assert_eq!(tooltip.phase.as_str(), "focus");
    assert_eq!(tooltip.explanation.title, "Title");
    assert_eq!(tooltip.placement.scale, 1.0);

    let scales: Vec<f64> = changes
        .iter()
        .filter_map(|c| match c {
            StageChange::Pulse { scale } => Some(*scale),
            _ => None,
        })
        .collect();
    assert_eq!(scales.len(), 5);
    assert_eq!(scales[2], 1.04);
    assert_eq!(h.stage.snapshot().scale, 1.0);
    assert_eq!(h.timers.pending(), 0);
}

#[tokio::test(start_paused = true)]
async fn missing_anchor_shows_no_tooltip() {
    let script = ScriptBuilder::new("ghost", "frame")
        .replay(Replay::Once)
        .step(Step::new("gone", 100).anchor("not-mounted"))
        .build()
        .unwrap();
    let h = harness(script, explain("gone"));
    assert_eq!(h.sequencer.run().await, RunOutcome::Completed);

    let changes = changes(&h.log);
    assert!(changes.contains(&StageChange::Tooltip { tooltip: None }));
    assert!(h.stage.snapshot().tooltip.is_none());
}

#[tokio::test(start_paused = true)]
async fn missing_explanation_shows_no_tooltip() {
    let h = harness(pulsed_once(), ExplanationTable::new());
    h.sequencer.run().await;
    assert!(changes(&h.log).contains(&StageChange::Tooltip { tooltip: None }));
}

#[tokio::test(start_paused = true)]
async fn scroll_effect_centers_target() {
    let script = ScriptBuilder::new("feed", "frame")
        .scroll_pane(ScrollPane::new("feed.viewport", "feed.content"))
        .replay(Replay::Once)
        .step(Step::new("item", 100).scroll_to("feed.item-5"))
        .step(Step::new("missing", 100).scroll_to("feed.item-99"))
        .build()
        .unwrap();
    let h = harness(script, ExplanationTable::new());
    h.sequencer.run().await;

    let scrolls: Vec<StageChange> = changes(&h.log)
        .into_iter()
        .filter(|c| matches!(c, StageChange::Scroll { .. }))
        .collect();
    assert_eq!(scrolls, vec![StageChange::Scroll { offset: 390.0 }]);
    assert_eq!(h.stage.snapshot().scroll_offset, 390.0);
}

#[tokio::test(start_paused = true)]
async fn reveal_effect_toggles_block() {
    let script = ScriptBuilder::new("reveal", "frame")
        .replay(Replay::Once)
        .step(Step::new("open", 100).reveal("more", true))
        .build()
        .unwrap();
    let h = harness(script, ExplanationTable::new());
    h.sequencer.run().await;
    assert!(h.stage.snapshot().revealed.contains("more"));
}

#[tokio::test(start_paused = true)]
async fn cancelled_before_start_changes_nothing() {
    let h = harness(pulsed_once(), explain("focus"));
    h.token.cancel();
    assert_eq!(h.sequencer.run().await, RunOutcome::Cancelled);
    assert!(h.log.is_empty());
    assert!(h.stage.snapshot().is_reset());
}

#[tokio::test(start_paused = true)]
async fn cancel_mid_step_stops_all_changes() {
    let h = harness(pulsed_once(), explain("focus"));
    let handle = tokio::spawn(h.sequencer.run());

    tokio::time::sleep(Duration::from_millis(501)).await;
    assert_eq!(h.stage.snapshot().scale, 1.04);
    assert_eq!(h.timers.pending(), 1);
    let before = h.log.len();

    h.token.cancel();
    h.timers.clear();
    assert_eq!(handle.await.unwrap(), RunOutcome::Cancelled);
    assert_eq!(h.log.len(), before);
    assert_eq!(h.timers.pending(), 0);
}

#[tokio::test(start_paused = true)]
async fn looping_script_replays_after_idle() {
    let script = ScriptBuilder::new("loop", "frame")
        .idle_ms(50)
        .step(Step::new("one", 100).settle_ms(0).trailing_ms(0))
        .step(Step::new("two", 100).settle_ms(0).trailing_ms(0))
        .build()
        .unwrap();
    let h = harness(script, ExplanationTable::new());
    let handle = tokio::spawn(h.sequencer.run());

    // one: 0-100, two: 100-200, idle: 200-250, one: 250-350, two: 350-450
    tokio::time::sleep(Duration::from_millis(420)).await;
    assert_eq!(entered(&h.log), vec![0, 1, 0, 1]);

    h.token.cancel();
    h.timers.clear();
    assert_eq!(handle.await.unwrap(), RunOutcome::Cancelled);
}

#[test]
fn choreography_rejects_foreign_explanations() {
    let err = Choreography::new(
        pulsed_once(),
        explain("not-a-phase"),
        Arc::new(layout()),
        Arc::new(EngineConfig::default()),
    )
    .err()
    .unwrap();
    assert!(err.to_string().contains("not-a-phase"));
}

#[test]
fn resolve_tooltip_measures_against_container() {
    let choreo = Choreography::new(
        pulsed_once(),
        explain("focus"),
        Arc::new(layout()),
        Arc::new(EngineConfig::default()),
    )
    .unwrap();
    let tooltip = choreo.resolve_tooltip(0).unwrap();
    // anchor mid_x 320, top 300: room above, fits unscaled
    assert_eq!(tooltip.placement.left, 320.0);
    assert_eq!(tooltip.placement.top, 300.0);
    assert!(choreo.resolve_tooltip(1).is_none());
}

#[tokio::test(start_paused = true)]
async fn replay_starts_from_the_same_display_as_the_first_playthrough() {
    let script = ScriptBuilder::new("feed", "frame")
        .scroll_pane(ScrollPane::new("feed.viewport", "feed.content"))
        .idle_ms(500)
        .step(
            Step::new("top", 1000)
                .anchor("a")
                .settle_ms(0)
                .trailing_ms(0),
        )
        .step(
            Step::new("deep", 1000)
                .scroll_to("feed.item-5")
                .settle_ms(0)
                .trailing_ms(0),
        )
        .step(
            Step::new("older", 1000)
                .reveal("more", true)
                .settle_ms(0)
                .trailing_ms(0),
        )
        .build()
        .unwrap();
    let h = harness(script, explain("top"));
    let handle = tokio::spawn(h.sequencer.run());

    tokio::time::sleep(Duration::from_millis(1)).await;
    let first = h.stage.snapshot();
    assert_eq!(first.phase.as_str(), "top");

    tokio::time::sleep(Duration::from_millis(2500)).await;
    let dirty = h.stage.snapshot();
    assert_eq!(dirty.scroll_offset, 390.0);
    assert!(dirty.revealed.contains("more"));

    // top: 0-1000, deep: 1000-2000, older: 2000-3000, idle: 3000-3500, top again at 3500
    tokio::time::sleep(Duration::from_millis(1000)).await;
    let replay = h.stage.snapshot();
    assert_eq!(entered(&h.log), vec![0, 1, 2, 0]);
    assert_eq!(replay, first);

    h.token.cancel();
    h.timers.clear();
    assert_eq!(handle.await.unwrap(), RunOutcome::Cancelled);
}
