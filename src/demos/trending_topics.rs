use crate::explain::table::{Explanation, ExplanationTable};
use crate::foundation::core::Rect;
use crate::foundation::error::ChoreoResult;
use crate::geometry::registry::StaticLayout;
use crate::sequence::script::{Script, ScriptBuilder, Step};

pub(crate) fn script() -> ChoreoResult<Script> {
    ScriptBuilder::new("trending-topics", "trends.frame")
        .step(Step::new("top", 2200).anchor("trends.rank-1").pulsed())
        .step(Step::new("velocity", 2400).anchor("trends.velocity").pulsed())
        .step(Step::new("related", 2400).anchor("trends.related").pulsed())
        .step(Step::new("mentions", 2000).anchor("trends.mentions"))
        .build()
}

pub(crate) fn explanations() -> ExplanationTable {
    ExplanationTable::new()
        .with(
            "top",
            Explanation::new(
                "Top topic",
                "Most discussed right now",
                "Topics are ranked by mention volume across news and social sources.",
            ),
        )
        .with(
            "velocity",
            Explanation::new(
                "Velocity",
                "How fast it is rising",
                "A topic climbing quickly from a low base ranks above a steady one.",
            ),
        )
        .with(
            "related",
            Explanation::new(
                "Related assets",
                "Tickers tied to the topic",
                "Assets most often mentioned alongside the topic are linked here.",
            ),
        )
        .with(
            "mentions",
            Explanation::new(
                "Mentions",
                "Volume over time",
                "Bars show hourly mention counts for the last day.",
            ),
        )
}

pub(crate) fn layout() -> StaticLayout {
    let mut layout = StaticLayout::new()
        .with("trends.frame", Rect::new(0.0, 0.0, 640.0, 400.0))
        .with("trends.velocity", Rect::new(420.0, 24.0, 616.0, 80.0))
        .with("trends.related", Rect::new(420.0, 100.0, 616.0, 220.0))
        .with("trends.mentions", Rect::new(24.0, 300.0, 616.0, 380.0));
    for rank in 1..=5 {
        let top = 24.0 + f64::from(rank - 1) * 52.0;
        layout.insert(
            format!("trends.rank-{rank}"),
            Rect::new(24.0, top, 400.0, top + 44.0),
        );
    }
    layout
}
