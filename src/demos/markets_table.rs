use crate::explain::table::{Explanation, ExplanationTable};
use crate::foundation::core::Rect;
use crate::foundation::error::ChoreoResult;
use crate::geometry::registry::StaticLayout;
use crate::sequence::script::{Script, ScriptBuilder, Step};

const ROWS: u32 = 6;
const ROW_HEIGHT: f64 = 44.0;
const HEADER_HEIGHT: f64 = 40.0;

pub(crate) fn script() -> ChoreoResult<Script> {
    ScriptBuilder::new("markets-table", "markets.frame")
        .step(Step::new("table", 2000).anchor("markets.header"))
        .step(Step::new("mover", 2400).anchor("markets.row-2").pulsed())
        .step(Step::new("change", 2200).anchor("markets.change-2").pulsed())
        .step(Step::new("spark", 2400).anchor("markets.spark-2").pulsed())
        .step(Step::new("filters", 2000).anchor("markets.filters").pulsed())
        .build()
}

pub(crate) fn explanations() -> ExplanationTable {
    ExplanationTable::new()
        .with(
            "table",
            Explanation::new(
                "Watchlist",
                "Live quotes",
                "Indices, currencies and commodities update in one table.",
            ),
        )
        .with(
            "mover",
            Explanation::new(
                "Biggest mover",
                "Outsized move today",
                "Rows moving more than usual are highlighted automatically.",
            ),
        )
        .with(
            "change",
            Explanation::new(
                "Daily change",
                "Percent since the open",
                "Colors follow direction; intensity follows the size of the move.",
            ),
        )
        .with(
            "spark",
            Explanation::new(
                "Intraday",
                "Price path today",
                "The sparkline shows where in the session the move happened.",
            ),
        )
        .with(
            "filters",
            Explanation::new(
                "Filters",
                "Narrow the table",
                "Filter by asset class or by the news topics driving each row.",
            ),
        )
}

pub(crate) fn layout() -> StaticLayout {
    let table_top = 56.0;
    let table_bottom = table_top + HEADER_HEIGHT + f64::from(ROWS) * ROW_HEIGHT;
    let mut layout = StaticLayout::new()
        .with("markets.frame", Rect::new(0.0, 0.0, 720.0, 400.0))
        .with("markets.filters", Rect::new(16.0, 12.0, 320.0, 44.0))
        .with("markets.table", Rect::new(16.0, table_top, 704.0, table_bottom))
        .with(
            "markets.header",
            Rect::new(16.0, table_top, 704.0, table_top + HEADER_HEIGHT),
        );
    for row in 0..ROWS {
        let top = table_top + HEADER_HEIGHT + f64::from(row) * ROW_HEIGHT;
        let bottom = top + ROW_HEIGHT;
        layout.insert(format!("markets.row-{row}"), Rect::new(16.0, top, 704.0, bottom));
        layout.insert(
            format!("markets.change-{row}"),
            Rect::new(420.0, top, 520.0, bottom),
        );
        layout.insert(
            format!("markets.spark-{row}"),
            Rect::new(540.0, top, 700.0, bottom),
        );
    }
    layout
}
