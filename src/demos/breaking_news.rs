//! Live feed demo: the only one that scrolls.
//!
//! The feed viewport is shorter than its content, so steps center their item before
//! highlighting it. The "show more" step reveals extra items below the fold.

use crate::explain::table::{Explanation, ExplanationTable};
use crate::foundation::core::Rect;
use crate::foundation::error::ChoreoResult;
use crate::geometry::registry::StaticLayout;
use crate::scroll::center::ScrollPane;
use crate::sequence::script::{Script, ScriptBuilder, Step};

const ITEMS: u32 = 8;
const MORE_ITEMS: u32 = 3;
const ITEM_PITCH: f64 = 96.0;
const ITEM_HEIGHT: f64 = 84.0;
const FEED_TOP: f64 = 56.0;

pub(crate) fn script() -> ChoreoResult<Script> {
    ScriptBuilder::new("breaking-news", "feed.frame")
        .scroll_pane(ScrollPane::new("feed.viewport", "feed.content"))
        .step(
            Step::new("latest", 2200)
                .anchor("feed.item-0")
                .scroll_to("feed.item-0")
                .pulsed(),
        )
        .step(
            Step::new("developing", 2400)
                .anchor("feed.item-3")
                .scroll_to("feed.item-3")
                .pulsed(),
        )
        .step(
            Step::new("flagged", 2400)
                .anchor("feed.item-6")
                .scroll_to("feed.item-6")
                .pulsed(),
        )
        .step(
            Step::new("show-more", 1600)
                .anchor("feed.more-button")
                .scroll_to("feed.more-button"),
        )
        .step(
            Step::new("older", 2200)
                .anchor("feed.more-0")
                .reveal("more", true)
                .pulsed(),
        )
        .build()
}

pub(crate) fn explanations() -> ExplanationTable {
    ExplanationTable::new()
        .with(
            "latest",
            Explanation::new(
                "Just in",
                "Newest headline first",
                "Headlines stream in as they are published and are tagged with the \
                 assets they mention.",
            ),
        )
        .with(
            "developing",
            Explanation::new(
                "Developing story",
                "Updates are threaded",
                "Follow-ups to an earlier report are grouped under the original story.",
            ),
        )
        .with(
            "flagged",
            Explanation::new(
                "Flagged",
                "Unconfirmed report",
                "Single-source claims are marked until an independent outlet confirms \
                 them.",
            ),
        )
        .with(
            "show-more",
            Explanation::new(
                "Older items",
                "Load the rest of the feed",
                "Older headlines stay collapsed until requested.",
            ),
        )
        .with(
            "older",
            Explanation::new(
                "Earlier today",
                "Revealed on demand",
                "Expanded items keep their tags and sentiment scores.",
            ),
        )
}

pub(crate) fn layout() -> StaticLayout {
    let content_h = f64::from(ITEMS + MORE_ITEMS) * ITEM_PITCH + ITEM_PITCH;
    let mut layout = StaticLayout::new()
        .with("feed.frame", Rect::new(0.0, 0.0, 360.0, 480.0))
        .with("feed.viewport", Rect::new(0.0, FEED_TOP, 360.0, 480.0))
        .with(
            "feed.content",
            Rect::new(0.0, FEED_TOP, 360.0, FEED_TOP + content_h),
        );
    let item = |i: u32| {
        let top = FEED_TOP + f64::from(i) * ITEM_PITCH;
        Rect::new(12.0, top, 348.0, top + ITEM_HEIGHT)
    };
    for i in 0..ITEMS {
        layout.insert(format!("feed.item-{i}"), item(i));
    }
    let button_top = FEED_TOP + f64::from(ITEMS) * ITEM_PITCH;
    layout.insert(
        "feed.more-button",
        Rect::new(120.0, button_top + 24.0, 240.0, button_top + 60.0),
    );
    for i in 0..MORE_ITEMS {
        layout.insert(format!("feed.more-{i}"), item(ITEMS + 1 + i));
    }
    layout
}
