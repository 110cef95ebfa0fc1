//! The six built-in product-tour demos.
//!
//! Each demo is fixed static data: a script, the explanations shown along it, and a
//! reference layout of its tagged elements that hosts without live geometry can play on.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::config::EngineConfig;
use crate::explain::table::ExplanationTable;
use crate::foundation::error::{ChoreoError, ChoreoResult};
use crate::geometry::registry::{GeometryProvider, StaticLayout};
use crate::sequence::script::Script;
use crate::sequence::sequencer::Choreography;

mod breaking_news;
mod event_calendar;
mod markets_table;
mod news_analysis;
mod sentiment_gauge;
mod trending_topics;

/// Built-in demo identifiers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DemoKind {
    /// Article scoring: headline, sources, bias, summary.
    NewsAnalysis,
    /// Calendar of market-moving events.
    EventCalendar,
    /// Scrolling live feed with a "show more" reveal.
    BreakingNews,
    /// Market mood gauge.
    SentimentGauge,
    /// Ranked trending topics.
    TrendingTopics,
    /// Quotes table with movers.
    MarketsTable,
}

impl DemoKind {
    /// All demos in showcase order.
    pub const ALL: [Self; 6] = [
        Self::NewsAnalysis,
        Self::EventCalendar,
        Self::BreakingNews,
        Self::SentimentGauge,
        Self::TrendingTopics,
        Self::MarketsTable,
    ];

    /// Stable kebab-case name.
    pub fn name(self) -> &'static str {
        match self {
            Self::NewsAnalysis => "news-analysis",
            Self::EventCalendar => "event-calendar",
            Self::BreakingNews => "breaking-news",
            Self::SentimentGauge => "sentiment-gauge",
            Self::TrendingTopics => "trending-topics",
            Self::MarketsTable => "markets-table",
        }
    }

    /// The demo's script.
    pub fn script(self) -> ChoreoResult<Script> {
        match self {
            Self::NewsAnalysis => news_analysis::script(),
            Self::EventCalendar => event_calendar::script(),
            Self::BreakingNews => breaking_news::script(),
            Self::SentimentGauge => sentiment_gauge::script(),
            Self::TrendingTopics => trending_topics::script(),
            Self::MarketsTable => markets_table::script(),
        }
    }

    /// Tooltip text for the demo's phases.
    pub fn explanations(self) -> ExplanationTable {
        match self {
            Self::NewsAnalysis => news_analysis::explanations(),
            Self::EventCalendar => event_calendar::explanations(),
            Self::BreakingNews => breaking_news::explanations(),
            Self::SentimentGauge => sentiment_gauge::explanations(),
            Self::TrendingTopics => trending_topics::explanations(),
            Self::MarketsTable => markets_table::explanations(),
        }
    }

    /// Reference geometry of the demo's tagged elements.
    pub fn layout(self) -> StaticLayout {
        match self {
            Self::NewsAnalysis => news_analysis::layout(),
            Self::EventCalendar => event_calendar::layout(),
            Self::BreakingNews => breaking_news::layout(),
            Self::SentimentGauge => sentiment_gauge::layout(),
            Self::TrendingTopics => trending_topics::layout(),
            Self::MarketsTable => markets_table::layout(),
        }
    }

    /// Bundle the demo with a geometry source and engine config.
    pub fn choreography(
        self,
        geometry: Arc<dyn GeometryProvider>,
        config: Arc<EngineConfig>,
    ) -> ChoreoResult<Choreography> {
        Choreography::new(self.script()?, self.explanations(), geometry, config)
    }
}

impl fmt::Display for DemoKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DemoKind {
    type Err = ChoreoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| {
                let known: Vec<&str> = Self::ALL.iter().map(|k| k.name()).collect();
                ChoreoError::validation(format!(
                    "unknown demo '{s}' (expected one of: {})",
                    known.join(", ")
                ))
            })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/demos/mod.rs"]
mod tests;
