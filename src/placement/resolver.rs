//! Tooltip placement that never overflows its container.
//!
//! [`place`] takes a measured [`Anchor`] and a desired tooltip size and returns a
//! [`Placement`]: where the box goes, which side of the anchor it sits on, and how far it
//! has to be scaled down to fit.
//!
//! # Invariants
//!
//! 1. For containers larger than `2 * padding` in both directions, the rendered
//!    [`Placement::footprint`] lies inside
//!    `[padding, container_w - padding] x [padding, container_h - padding]`.
//! 2. `0 < scale <= 1`, and `scale == 1` exactly when the box fits unscaled.
//! 3. When the space above equals the space below, the box goes above.

use crate::foundation::core::{Affine, Rect, Size};
use crate::foundation::error::{ChoreoError, ChoreoResult};
use crate::placement::anchor::Anchor;

/// Margin kept between the tooltip and every container edge.
pub const DEFAULT_PADDING: f64 = 12.0;
/// Width budget used when the container is too small to yield one.
pub const MIN_TOOLTIP_WIDTH: f64 = 200.0;
/// Height budget used when the container is too small to yield one.
pub const MIN_TOOLTIP_HEIGHT: f64 = 120.0;

/// Tunables for [`place`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PlacementConfig {
    /// Edge margin in container units.
    pub padding: f64,
    /// Width floor for degenerate containers.
    pub min_width: f64,
    /// Height floor for degenerate containers.
    pub min_height: f64,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            padding: DEFAULT_PADDING,
            min_width: MIN_TOOLTIP_WIDTH,
            min_height: MIN_TOOLTIP_HEIGHT,
        }
    }
}

impl PlacementConfig {
    /// Validate that every field is finite and in range.
    pub fn validate(&self) -> ChoreoResult<()> {
        if !self.padding.is_finite() || self.padding < 0.0 {
            return Err(ChoreoError::validation(
                "placement padding must be finite and >= 0",
            ));
        }
        for (name, value) in [("min_width", self.min_width), ("min_height", self.min_height)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChoreoError::validation(format!(
                    "placement {name} must be finite and > 0",
                )));
            }
        }
        Ok(())
    }
}

/// Which side of the anchor the tooltip sits on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    /// Box bottom edge rests on the anchor's top edge.
    Above,
    /// Box top edge rests on the anchor's bottom edge.
    Below,
}

/// Transform origin of the tooltip box.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    /// Scale around the bottom-center point (used above the anchor).
    BottomCenter,
    /// Scale around the top-center point (used below the anchor).
    TopCenter,
}

impl Origin {
    /// CSS `transform-origin` value.
    pub fn as_css(self) -> &'static str {
        match self {
            Self::BottomCenter => "bottom center",
            Self::TopCenter => "top center",
        }
    }
}

/// Fully resolved tooltip geometry.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Placement {
    /// X of the origin point (box horizontal center) in container coordinates.
    pub left: f64,
    /// Y of the origin point: the box bottom when above, the box top when below.
    pub top: f64,
    /// Maps box-local coordinates `[0, width] x [0, max_height]` into the container.
    pub transform: Affine,
    /// Point the scale is applied around.
    pub origin: Origin,
    /// Side of the anchor the box sits on.
    pub side: Side,
    /// Uniform scale in `(0, 1]`.
    pub scale: f64,
    /// Unscaled box width.
    pub width: f64,
    /// Unscaled box height.
    pub max_height: f64,
}

impl Placement {
    /// Rendered bounding box in container coordinates.
    pub fn footprint(&self) -> Rect {
        self.transform
            .transform_rect_bbox(Rect::new(0.0, 0.0, self.width, self.max_height))
    }

    /// Rendered (scaled) size.
    pub fn rendered_size(&self) -> Size {
        Size::new(self.width * self.scale, self.max_height * self.scale)
    }

    /// CSS rendition of `transform` for a box positioned at (`left`, `top`).
    pub fn css_transform(&self) -> String {
        match self.side {
            Side::Above => format!("translate(-50%, -100%) scale({})", self.scale),
            Side::Below => format!("translate(-50%, 0) scale({})", self.scale),
        }
    }
}

/// Resolve a non-overflowing placement for a box of `desired` size next to `anchor`.
///
/// Pure and total; callers skip placement entirely when no anchor could be measured.
pub fn place(anchor: &Anchor, desired: Size, config: &PlacementConfig) -> Placement {
    let pad = config.padding;
    let cw = anchor.container_w;
    let ch = anchor.container_h;

    let usable_w = budget(cw - 2.0 * pad, config.min_width);
    let usable_h = budget(ch - 2.0 * pad, config.min_height);

    let space_above = anchor.y - pad;
    let space_below = ch - anchor.bottom() - pad;

    let side = if space_above >= desired.height || space_above >= space_below {
        Side::Above
    } else {
        Side::Below
    };

    let side_space = match side {
        Side::Above => space_above,
        Side::Below => space_below,
    };
    let height_limit = if side_space > 0.0 {
        side_space.min(usable_h)
    } else {
        usable_h
    };

    let scale = 1.0_f64
        .min(ratio(usable_w, desired.width))
        .min(ratio(height_limit, desired.height));

    let half_w = desired.width.max(0.0) * scale * 0.5;
    let box_h = desired.height.max(0.0) * scale;

    let left = clamp_range(anchor.mid_x(), pad + half_w, cw - pad - half_w);
    let (top, origin, lift) = match side {
        Side::Above => (
            clamp_range(anchor.y, pad + box_h, ch - pad),
            Origin::BottomCenter,
            -desired.height,
        ),
        Side::Below => (
            clamp_range(anchor.bottom(), pad, ch - pad - box_h),
            Origin::TopCenter,
            0.0,
        ),
    };

    let transform = Affine::translate((left, top))
        * Affine::scale(scale)
        * Affine::translate((-desired.width * 0.5, lift));

    Placement {
        left,
        top,
        transform,
        origin,
        side,
        scale,
        width: desired.width,
        max_height: desired.height,
    }
}

fn budget(usable: f64, floor: f64) -> f64 {
    if usable > 0.0 { usable } else { floor }
}

fn ratio(limit: f64, extent: f64) -> f64 {
    if extent > 0.0 {
        limit / extent
    } else {
        f64::INFINITY
    }
}

// `f64::clamp` panics on inverted bounds; rounding can invert them by an ulp.
fn clamp_range(v: f64, lo: f64, hi: f64) -> f64 {
    if lo > hi {
        (lo + hi) * 0.5
    } else {
        v.max(lo).min(hi)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/placement/resolver.rs"]
mod tests;
