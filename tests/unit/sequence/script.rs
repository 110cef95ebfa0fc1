use super::*;
use crate::sequence::pulse::MAX_PULSE_LEVELS;

fn three_steps() -> ScriptBuilder {
    ScriptBuilder::new("calendar", "calendar.frame")
        .step(Step::new("week", 1000).anchor("calendar.week"))
        .step(Step::new("event", 1000).anchor("calendar.event").pulsed())
        .step(Step::new("detail", 1000))
}

#[test]
fn builder_validates_and_indexes_phases() {
    let script = three_steps().build().unwrap();
    assert_eq!(script.len(), 3);
    assert_eq!(script.first_phase(), Some(&Phase::from("week")));
    assert_eq!(script.index_of(&Phase::from("detail")), Some(2));
    assert_eq!(script.index_of(&Phase::from("missing")), None);
    assert_eq!(script.idle(), Duration::from_millis(DEFAULT_IDLE_MS));
    assert_eq!(script.replay, Replay::Loop);
}

#[test]
fn empty_script_is_rejected() {
    let err = ScriptBuilder::new("empty", "frame").build().unwrap_err();
    assert!(err.to_string().contains("at least one step"));
}

#[test]
fn duplicate_phase_is_rejected() {
    let err = three_steps()
        .step(Step::new("week", 10))
        .build()
        .unwrap_err();
    assert!(err.to_string().contains("repeats phase 'week'"));
}

#[test]
fn scroll_step_requires_pane() {
    let err = ScriptBuilder::new("feed", "feed.frame")
        .step(Step::new("first", 10).scroll_to("feed.item-0"))
        .build()
        .unwrap_err();
    assert!(err.to_string().contains("no scroll pane"));

    let ok = ScriptBuilder::new("feed", "feed.frame")
        .scroll_pane(ScrollPane::new("feed.viewport", "feed.content"))
        .step(Step::new("first", 10).scroll_to("feed.item-0"))
        .build();
    assert!(ok.is_ok());
}

#[test]
fn bad_tooltip_size_is_rejected() {
    let err = ScriptBuilder::new("s", "frame")
        .step(Step::new("a", 10).tooltip_size(Size::new(0.0, 10.0)))
        .build()
        .unwrap_err();
    assert!(err.to_string().contains("tooltip size"));
}

#[test]
fn json_defaults_fill_in_pauses() {
    let json = r#"{
        "name": "gauge",
        "container": "gauge.frame",
        "steps": [
            { "phase": "needle", "anchor": "gauge.needle", "read_ms": 1800, "pulse": {} },
            { "phase": "legend", "read_ms": 900, "effect": { "kind": "reveal", "key": "legend", "shown": true } }
        ]
    }"#;
    let script = Script::from_reader(json.as_bytes()).unwrap();
    assert_eq!(script.steps[0].settle_ms, DEFAULT_SETTLE_MS);
    assert_eq!(script.steps[0].trailing_ms, DEFAULT_TRAILING_MS);
    assert_eq!(script.steps[0].pulse, Some(PulseProfile::default()));
    assert_eq!(
        script.steps[1].effect,
        Some(StepEffect::Reveal {
            key: "legend".to_string(),
            shown: true
        })
    );
    assert_eq!(script.idle_ms, DEFAULT_IDLE_MS);
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = Script::from_reader("{ \"name\": 3 }".as_bytes()).unwrap_err();
    assert!(err.to_string().contains("serialization error:"));
}

#[test]
fn oversized_pulse_is_rejected() {
    let err = ScriptBuilder::new("s", "frame")
        .step(Step::new("a", 10).pulse(PulseProfile {
            levels: MAX_PULSE_LEVELS + 1,
            ..PulseProfile::default()
        }))
        .build()
        .unwrap_err();
    assert!(err.to_string().contains("at most 16 allowed"));

    let json = r#"{
        "name": "huge",
        "container": "frame",
        "steps": [ { "phase": "a", "read_ms": 10, "pulse": { "levels": 4000000000 } } ]
    }"#;
    let err = Script::from_reader(json.as_bytes()).unwrap_err();
    assert!(err.to_string().contains("phase 'a'"));

    let max = ScriptBuilder::new("s", "frame")
        .step(Step::new("a", 10).pulse(PulseProfile {
            levels: MAX_PULSE_LEVELS,
            ..PulseProfile::default()
        }))
        .build();
    assert!(max.is_ok());
}
