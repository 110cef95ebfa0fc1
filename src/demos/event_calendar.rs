use crate::explain::table::{Explanation, ExplanationTable};
use crate::foundation::core::Rect;
use crate::foundation::error::ChoreoResult;
use crate::geometry::registry::StaticLayout;
use crate::sequence::script::{Script, ScriptBuilder, Step};

pub(crate) fn script() -> ChoreoResult<Script> {
    ScriptBuilder::new("event-calendar", "cal.frame")
        .step(Step::new("week", 2000).anchor("cal.grid"))
        .step(Step::new("event", 2400).anchor("cal.event-cpi").pulsed())
        .step(Step::new("forecast", 2400).anchor("cal.forecast").pulsed())
        .step(Step::new("assets", 2600).anchor("cal.assets").pulsed())
        .build()
}

pub(crate) fn explanations() -> ExplanationTable {
    ExplanationTable::new()
        .with(
            "week",
            Explanation::new(
                "This week",
                "Scheduled macro events",
                "Releases, central bank meetings and earnings are laid out by day.",
            ),
        )
        .with(
            "event",
            Explanation::new(
                "High-impact release",
                "Consumer price index",
                "Events are ranked by how strongly markets reacted to them in the past.",
            ),
        )
        .with(
            "forecast",
            Explanation::new(
                "Consensus",
                "Forecast versus previous",
                "The gap between consensus and the previous print hints at the size of \
                 a surprise.",
            ),
        )
        .with(
            "assets",
            Explanation::new(
                "Affected assets",
                "What usually moves",
                "Assets that historically react to the release are listed with their \
                 typical move.",
            ),
        )
}

pub(crate) fn layout() -> StaticLayout {
    StaticLayout::new()
        .with("cal.frame", Rect::new(0.0, 0.0, 720.0, 420.0))
        .with("cal.grid", Rect::new(16.0, 16.0, 704.0, 260.0))
        .with("cal.event-cpi", Rect::new(300.0, 110.0, 420.0, 150.0))
        .with("cal.forecast", Rect::new(16.0, 280.0, 350.0, 400.0))
        .with("cal.assets", Rect::new(370.0, 280.0, 704.0, 400.0))
}
