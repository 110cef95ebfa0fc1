use crate::explain::table::{Explanation, ExplanationTable};
use crate::foundation::core::{Rect, Size};
use crate::foundation::error::ChoreoResult;
use crate::geometry::registry::StaticLayout;
use crate::sequence::pulse::PulseProfile;
use crate::sequence::script::{Script, ScriptBuilder, Step};

pub(crate) fn script() -> ChoreoResult<Script> {
    let needle = PulseProfile {
        peak: 1.06,
        levels: 3,
        ..PulseProfile::default()
    };
    ScriptBuilder::new("sentiment-gauge", "gauge.frame")
        .step(Step::new("reading", 2400).anchor("gauge.needle").pulse(needle))
        .step(Step::new("scale", 2200).anchor("gauge.scale").pulsed())
        .step(
            Step::new("history", 2600)
                .anchor("gauge.history")
                .pulsed()
                .tooltip_size(Size::new(260.0, 140.0)),
        )
        .step(Step::new("drivers", 2600).anchor("gauge.drivers").pulsed())
        .build()
}

pub(crate) fn explanations() -> ExplanationTable {
    ExplanationTable::new()
        .with(
            "reading",
            Explanation::new(
                "Market mood",
                "Current reading",
                "The needle aggregates the tone of every article scored in the last hour.",
            ),
        )
        .with(
            "scale",
            Explanation::new(
                "Scale",
                "Extreme fear to extreme greed",
                "Readings near either end have historically preceded reversals.",
            ),
        )
        .with(
            "history",
            Explanation::new(
                "Trend",
                "The last seven days",
                "The line shows how the reading drifted over the past week.",
            ),
        )
        .with(
            "drivers",
            Explanation::new(
                "Drivers",
                "What moved the needle",
                "The stories contributing most to the current reading are listed first.",
            ),
        )
}

pub(crate) fn layout() -> StaticLayout {
    StaticLayout::new()
        .with("gauge.frame", Rect::new(0.0, 0.0, 480.0, 360.0))
        .with("gauge.needle", Rect::new(220.0, 70.0, 260.0, 170.0))
        .with("gauge.scale", Rect::new(80.0, 40.0, 400.0, 200.0))
        .with("gauge.history", Rect::new(20.0, 220.0, 230.0, 340.0))
        .with("gauge.drivers", Rect::new(250.0, 220.0, 460.0, 340.0))
}
