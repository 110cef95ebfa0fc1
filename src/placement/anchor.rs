use crate::foundation::core::{Rect, Size, TagKey, is_finite_rect};

/// Position and size of a tagged element relative to its measurement container, plus the
/// container's own size, captured at one instant.
///
/// Anchors are re-measured on every phase transition; never cache one across phases.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Anchor {
    /// Left edge relative to the container.
    pub x: f64,
    /// Top edge relative to the container.
    pub y: f64,
    /// Element width (`>= 0`).
    pub w: f64,
    /// Element height (`>= 0`).
    pub h: f64,
    /// Container width (`>= 0`).
    pub container_w: f64,
    /// Container height (`>= 0`).
    pub container_h: f64,
    /// Tag the anchor was measured for.
    pub key: TagKey,
}

impl Anchor {
    /// Build an anchor from an element rectangle and its container rectangle, both in the
    /// same coordinate space. Returns `None` for non-finite geometry.
    pub fn from_rects(key: TagKey, element: Rect, container: Rect) -> Option<Self> {
        if !is_finite_rect(element) || !is_finite_rect(container) {
            return None;
        }
        let e = element.abs();
        let c = container.abs();
        Some(Self {
            x: e.x0 - c.x0,
            y: e.y0 - c.y0,
            w: e.width(),
            h: e.height(),
            container_w: c.width(),
            container_h: c.height(),
            key,
        })
    }

    /// Horizontal midpoint of the element.
    pub fn mid_x(&self) -> f64 {
        self.x + self.w * 0.5
    }

    /// Bottom edge of the element.
    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }

    /// Element rectangle in container coordinates.
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.w, self.y + self.h)
    }

    /// Container size.
    pub fn container(&self) -> Size {
        Size::new(self.container_w, self.container_h)
    }
}
