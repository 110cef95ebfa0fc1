use crate::foundation::core::TagKey;
use crate::geometry::registry::GeometryProvider;

/// A fixed-height viewport over a taller, vertically scrolling content region.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ScrollPane {
    /// Tag of the fixed-height viewport element.
    pub viewport: TagKey,
    /// Tag of the scrolled content element (moves with the scroll offset).
    pub content: TagKey,
}

impl ScrollPane {
    /// Create a pane description from its two tags.
    pub fn new(viewport: impl Into<TagKey>, content: impl Into<TagKey>) -> Self {
        Self {
            viewport: viewport.into(),
            content: content.into(),
        }
    }
}

/// Measurements needed to center one element inside a [`ScrollPane`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollMeasure {
    /// Element top relative to the content top (independent of the current scroll).
    pub element_offset: f64,
    /// Element height.
    pub element_height: f64,
    /// Visible viewport height.
    pub viewport_height: f64,
    /// Full content height.
    pub content_height: f64,
}

impl ScrollMeasure {
    /// Largest reachable scroll offset.
    pub fn max_scroll(&self) -> f64 {
        (self.content_height - self.viewport_height).max(0.0)
    }

    /// Scroll offset that centers the element.
    pub fn target(&self) -> f64 {
        center_offset(
            self.element_offset,
            self.element_height,
            self.viewport_height,
            self.max_scroll(),
        )
    }
}

/// Scroll offset that puts the element's midpoint at the viewport's vertical center,
/// clamped to `[0, max_scroll]`. The lower bound wins if `max_scroll` is negative.
pub fn center_offset(
    element_offset: f64,
    element_height: f64,
    viewport_height: f64,
    max_scroll: f64,
) -> f64 {
    let raw = element_offset - viewport_height * 0.5 + element_height * 0.5;
    raw.min(max_scroll).max(0.0)
}

/// Measure `tag` inside `pane`. `None` when the element, content, or viewport is not
/// mounted; callers leave the scroll position unchanged in that case.
pub fn measure(
    geometry: &dyn GeometryProvider,
    pane: &ScrollPane,
    tag: &TagKey,
) -> Option<ScrollMeasure> {
    let element = geometry.rect_of(tag)?.abs();
    let content = geometry.rect_of(&pane.content)?.abs();
    let viewport = geometry.rect_of(&pane.viewport)?.abs();
    let m = ScrollMeasure {
        element_offset: element.y0 - content.y0,
        element_height: element.height(),
        viewport_height: viewport.height(),
        content_height: content.height(),
    };
    let finite = [
        m.element_offset,
        m.element_height,
        m.viewport_height,
        m.content_height,
    ]
    .iter()
    .all(|v| v.is_finite());
    finite.then_some(m)
}

/// Convenience: measure and resolve the centering offset in one call.
pub fn measure_center(
    geometry: &dyn GeometryProvider,
    pane: &ScrollPane,
    tag: &TagKey,
) -> Option<f64> {
    measure(geometry, pane, tag).map(|m| m.target())
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/center.rs"]
mod tests;
