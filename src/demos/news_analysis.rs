use crate::explain::table::{Explanation, ExplanationTable};
use crate::foundation::core::Rect;
use crate::foundation::error::ChoreoResult;
use crate::geometry::registry::StaticLayout;
use crate::sequence::script::{Script, ScriptBuilder, Step};

pub(crate) fn script() -> ChoreoResult<Script> {
    ScriptBuilder::new("news-analysis", "news.frame")
        .idle_ms(3000)
        .step(Step::new("headline", 2200).anchor("news.headline").pulsed())
        .step(Step::new("sources", 2600).anchor("news.sources").pulsed())
        .step(Step::new("bias", 2600).anchor("news.bias-meter").pulsed())
        .step(Step::new("impact", 2400).anchor("news.impact").pulsed())
        .step(Step::new("summary", 3000).anchor("news.summary").pulsed())
        .build()
}

pub(crate) fn explanations() -> ExplanationTable {
    ExplanationTable::new()
        .with(
            "headline",
            Explanation::new(
                "Headline",
                "The story being analyzed",
                "Each incoming article is parsed and its headline is matched against \
                 the assets it mentions.",
            ),
        )
        .with(
            "sources",
            Explanation::new(
                "Source check",
                "Who else is reporting it",
                "Independent outlets covering the same event are grouped so a single \
                 report is not mistaken for consensus.",
            ),
        )
        .with(
            "bias",
            Explanation::new(
                "Tone meter",
                "Bullish, bearish or neutral",
                "The wording of the article is scored from strongly bearish to strongly \
                 bullish.",
            ),
        )
        .with(
            "impact",
            Explanation::new(
                "Impact",
                "Expected market reaction",
                "Historical reactions to similar stories estimate how much the mentioned \
                 assets are likely to move.",
            ),
        )
        .with(
            "summary",
            Explanation::new(
                "Summary",
                "The takeaway in one paragraph",
                "Source agreement, tone and impact are condensed into a short brief.",
            ),
        )
}

pub(crate) fn layout() -> StaticLayout {
    StaticLayout::new()
        .with("news.frame", Rect::new(0.0, 0.0, 720.0, 420.0))
        .with("news.headline", Rect::new(24.0, 20.0, 696.0, 64.0))
        .with("news.sources", Rect::new(24.0, 84.0, 340.0, 200.0))
        .with("news.bias-meter", Rect::new(380.0, 84.0, 696.0, 200.0))
        .with("news.impact", Rect::new(24.0, 220.0, 696.0, 290.0))
        .with("news.summary", Rect::new(24.0, 310.0, 696.0, 400.0))
}
